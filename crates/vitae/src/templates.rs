//! Template identities, photo variants, and render-target resolution.
//!
//! The (template, variant) pair is resolved up front so every later stage
//! works on a concrete target. With-photo and without-photo are distinct
//! artifacts even for the same template — resolution refuses a with-photo
//! target when no photo payload exists rather than falling back.

use serde::{Deserialize, Serialize};

use crate::errors::ExportError;
use crate::photo::Photo;

/// The closed template set. Adding a template is a compile-time-checked
/// exhaustive-match change, not a string lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Professional,
    Modern,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Professional,
        TemplateId::Modern,
        TemplateId::Creative,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            TemplateId::Professional => "professional",
            TemplateId::Modern => "modern",
            TemplateId::Creative => "creative",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateId::Professional => "Professional",
            TemplateId::Modern => "Modern",
            TemplateId::Creative => "Creative",
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// The photo axis of the render-target matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoVariant {
    WithPhoto,
    WithoutPhoto,
}

impl PhotoVariant {
    pub fn slug(&self) -> &'static str {
        match self {
            PhotoVariant::WithPhoto => "with-photo",
            PhotoVariant::WithoutPhoto => "without-photo",
        }
    }
}

impl std::fmt::Display for PhotoVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// A resolved (template, variant) pair — the concrete thing the export
/// pipeline renders and encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderTarget {
    pub template: TemplateId,
    pub variant: PhotoVariant,
}

impl RenderTarget {
    /// Resolves a target against the photo slot. A with-photo request with
    /// no payload is refused here, before any rendering or encoding starts.
    pub fn resolve(
        template: TemplateId,
        variant: PhotoVariant,
        photo: Option<&Photo>,
    ) -> Result<Self, ExportError> {
        if variant == PhotoVariant::WithPhoto && photo.is_none() {
            return Err(ExportError::PhotoRequired);
        }
        Ok(RenderTarget { template, variant })
    }

    /// Stable identifier addressing this target's rendered representation.
    pub fn surface_id(&self) -> String {
        format!("resume-preview-pdf-{}-{}", self.template, self.variant)
    }

    /// Deterministic artifact-name stem: `{first}_{last}_Resume_{template}_{variant}`.
    pub fn filename_stem(&self, first_name: &str, last_name: &str) -> String {
        format!(
            "{}_{}_Resume_{}_{}",
            first_name, last_name, self.template, self.variant
        )
    }
}
