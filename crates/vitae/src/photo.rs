//! Photo input boundary: validation and the in-memory embeddable form.
//!
//! One image per upload; last write wins. A rejected upload changes nothing,
//! so a previously accepted photo survives any later failure.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::errors::PhotoError;

/// Default photo size cap: 5 MiB, matching the upload dialog's stated limit.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// An accepted photo, stored as base64 text so it can be embedded directly
/// into render output and serialized with the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    media_type: String,
    data: String,
}

impl Photo {
    /// Validates and accepts an upload. Rejection order matches the original
    /// dialog: media type first, then size. No state is touched on rejection.
    pub fn from_upload(media_type: &str, bytes: &[u8], limit: usize) -> Result<Self, PhotoError> {
        if !media_type.starts_with("image/") {
            return Err(PhotoError::NotAnImage(media_type.to_string()));
        }
        if bytes.len() > limit {
            return Err(PhotoError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }
        Ok(Photo {
            media_type: media_type.to_string(),
            data: BASE64.encode(bytes),
        })
    }

    /// Bounded asynchronous read of an upload stream. The cap is enforced
    /// during the read — at most `limit + 1` bytes are ever buffered.
    pub async fn read_async<R>(
        media_type: &str,
        reader: R,
        limit: usize,
    ) -> Result<Self, PhotoError>
    where
        R: AsyncRead + Unpin,
    {
        if !media_type.starts_with("image/") {
            return Err(PhotoError::NotAnImage(media_type.to_string()));
        }
        let mut buf = Vec::new();
        let mut bounded = reader.take(limit as u64 + 1);
        bounded.read_to_end(&mut buf).await?;
        Self::from_upload(media_type, &buf, limit)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The `data:` URL form used wherever the photo is embedded as text.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    /// Decodes back to raw image bytes (for binary embedding, e.g. PDF).
    pub fn decode_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(BASE64.decode(&self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_accepts_small_image() {
        let photo = Photo::from_upload("image/png", PNG_MAGIC, MAX_PHOTO_BYTES).unwrap();
        assert_eq!(photo.media_type(), "image/png");
        assert!(photo.data_url().starts_with("data:image/png;base64,"));
        assert_eq!(photo.decode_bytes().unwrap(), PNG_MAGIC);
    }

    #[test]
    fn test_rejects_non_image_media_type() {
        let err = Photo::from_upload("application/pdf", PNG_MAGIC, MAX_PHOTO_BYTES).unwrap_err();
        assert!(matches!(err, PhotoError::NotAnImage(t) if t == "application/pdf"));
    }

    #[test]
    fn test_rejects_payload_over_limit() {
        let six_mib = vec![0u8; 6 * 1024 * 1024];
        let err = Photo::from_upload("image/jpeg", &six_mib, MAX_PHOTO_BYTES).unwrap_err();
        match err {
            PhotoError::TooLarge { size, limit } => {
                assert_eq!(size, 6 * 1024 * 1024);
                assert_eq!(limit, MAX_PHOTO_BYTES);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_limit_is_accepted() {
        let payload = vec![0u8; MAX_PHOTO_BYTES];
        assert!(Photo::from_upload("image/png", &payload, MAX_PHOTO_BYTES).is_ok());
    }

    #[tokio::test]
    async fn test_read_async_accepts_within_cap() {
        let photo = Photo::read_async("image/png", PNG_MAGIC, MAX_PHOTO_BYTES)
            .await
            .unwrap();
        assert_eq!(photo.decode_bytes().unwrap(), PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_read_async_rejects_oversized_stream() {
        let six_mib = vec![0u8; 6 * 1024 * 1024];
        let err = Photo::read_async("image/png", six_mib.as_slice(), MAX_PHOTO_BYTES)
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::TooLarge { .. }));
    }

    #[tokio::test]
    async fn test_read_async_checks_media_type_before_reading() {
        let err = Photo::read_async("text/plain", PNG_MAGIC, MAX_PHOTO_BYTES)
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::NotAnImage(_)));
    }
}
