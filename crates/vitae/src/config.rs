use anyhow::{Context, Result};

/// Engine tunables. `Default` gives the values the original product shipped
/// with; `from_env` lets a host override them without code changes.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Hard cap on accepted photo payloads, in bytes (default 5 MiB).
    pub max_photo_bytes: usize,
    /// Score below which the finalize screen discourages downloading.
    pub min_download_score: u8,
    /// Summary char count the wizard nudges users toward.
    pub summary_target_len: usize,
    /// Summary char count beyond which the wizard suggests shortening.
    pub summary_soft_max_len: usize,
    /// Whether rendered documents carry a "Last updated" footer. The footer
    /// is the single permitted non-deterministic piece of export output;
    /// turn it off and rendering becomes a pure function of the data.
    pub date_footer: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_photo_bytes: 5 * 1024 * 1024,
            min_download_score: 40,
            summary_target_len: 50,
            summary_soft_max_len: 400,
            date_footer: true,
        }
    }
}

impl EngineConfig {
    /// Builds a config from the environment, falling back to defaults for
    /// anything unset. Only malformed values are an error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Self::default();
        Ok(Self {
            max_photo_bytes: env_parse("VITAE_MAX_PHOTO_BYTES", defaults.max_photo_bytes)?,
            min_download_score: env_parse("VITAE_MIN_DOWNLOAD_SCORE", defaults.min_download_score)?,
            summary_target_len: env_parse("VITAE_SUMMARY_TARGET_LEN", defaults.summary_target_len)?,
            summary_soft_max_len: env_parse(
                "VITAE_SUMMARY_SOFT_MAX_LEN",
                defaults.summary_soft_max_len,
            )?,
            date_footer: env_parse("VITAE_DATE_FOOTER", defaults.date_footer)?,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_product_limits() {
        let config = EngineConfig::default();
        assert_eq!(config.max_photo_bytes, 5 * 1024 * 1024);
        assert_eq!(config.min_download_score, 40);
        assert_eq!(config.summary_target_len, 50);
        assert!(config.date_footer);
    }

    #[test]
    fn test_env_parse_falls_back_when_unset() {
        let v: usize = env_parse("VITAE_TEST_UNSET_KEY", 7).unwrap();
        assert_eq!(v, 7);
    }
}
