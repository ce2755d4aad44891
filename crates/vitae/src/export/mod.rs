//! Export pipeline: resolve the target, render, encode, deliver.
//!
//! Every failure along the way is non-fatal and leaves the aggregate
//! untouched. No partial artifact is ever surfaced; a download either
//! completes or the caller gets an [`ExportError`] it can retry.

pub mod docx;
pub mod pdf;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::errors::ExportError;
use crate::layout::{RenderSurface, TemplateRenderer};
use crate::models::ResumeData;
use crate::templates::{PhotoVariant, RenderTarget, TemplateId};

// ────────────────────────────────────────────────────────────────────────────
// Formats and artifacts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
        })
    }
}

/// A finished download: named, typed, complete bytes.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Delivery boundary
// ────────────────────────────────────────────────────────────────────────────

/// Where finished artifacts go. The engine never assumes a browser; hosts
/// plug in whatever "offer for download" means to them.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn deliver(&self, artifact: &Artifact) -> Result<(), ExportError>;
}

/// Writes artifacts into a directory. The simplest useful sink, and the
/// one the tests exercise.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn deliver(&self, artifact: &Artifact) -> Result<(), ExportError> {
        let path = self.dir.join(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes)
            .await
            .map_err(|source| {
                error!(filename = %artifact.filename, "delivery failed: {source}");
                ExportError::Delivery {
                    filename: artifact.filename.clone(),
                    source,
                }
            })?;
        info!(filename = %artifact.filename, bytes = artifact.bytes.len(), "artifact delivered");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub struct ExportPipeline {
    surface: Arc<dyn RenderSurface>,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new(Arc::new(TemplateRenderer::new()))
    }
}

impl ExportPipeline {
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        ExportPipeline { surface }
    }

    #[instrument(skip(self, data), fields(%template, %variant, %format))]
    pub async fn export(
        &self,
        data: &ResumeData,
        template: TemplateId,
        variant: PhotoVariant,
        format: ExportFormat,
    ) -> Result<Artifact, ExportError> {
        // Photo gating happens before any rendering or encoding starts.
        let target = RenderTarget::resolve(template, variant, data.photo.as_ref())?;

        let bytes = match format {
            ExportFormat::Pdf => {
                let doc = self.surface.rendered(&target, data).await.map_err(|e| {
                    match &e {
                        crate::errors::RenderError::MissingTarget(id) => {
                            warn!(%id, "render target missing, retryable")
                        }
                        crate::errors::RenderError::Failed(cause) => {
                            error!("render failed: {cause:?}")
                        }
                    }
                    ExportError::from(e)
                })?;
                pdf::encode_pdf(&doc, template, data.photo.as_ref()).map_err(|source| {
                    error!("PDF encoder error: {source:?}");
                    ExportError::Encode {
                        format: ExportFormat::Pdf,
                        source,
                    }
                })?
            }
            ExportFormat::Docx => {
                docx::encode_docx(data).map_err(|source| {
                    error!("DOCX encoder error: {source:?}");
                    ExportError::Encode {
                        format: ExportFormat::Docx,
                        source,
                    }
                })?
            }
        };

        let filename = format!(
            "{}.{}",
            target.filename_stem(&data.contacts.first_name, &data.contacts.last_name),
            format.extension()
        );
        info!(%filename, size = bytes.len(), "export complete");
        Ok(Artifact {
            filename,
            content_type: format.content_type(),
            bytes: Bytes::from(bytes),
        })
    }

    pub async fn export_pdf(
        &self,
        data: &ResumeData,
        template: TemplateId,
        variant: PhotoVariant,
    ) -> Result<Artifact, ExportError> {
        self.export(data, template, variant, ExportFormat::Pdf).await
    }

    pub async fn export_docx(
        &self,
        data: &ResumeData,
        template: TemplateId,
        variant: PhotoVariant,
    ) -> Result<Artifact, ExportError> {
        self.export(data, template, variant, ExportFormat::Docx).await
    }

    /// Export and hand off in one step.
    pub async fn export_to(
        &self,
        sink: &dyn ArtifactSink,
        data: &ResumeData,
        template: TemplateId,
        variant: PhotoVariant,
        format: ExportFormat,
    ) -> Result<Artifact, ExportError> {
        let artifact = self.export(data, template, variant, format).await?;
        sink.deliver(&artifact).await?;
        Ok(artifact)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StaticSurfaces;
    use crate::models::ContactInfo;
    use crate::photo::Photo;

    fn named_data() -> ResumeData {
        let mut data = ResumeData::new();
        data.contacts = ContactInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "1".into(),
            ..ContactInfo::default()
        };
        data.summary = "Analytical engine programmer.".into();
        data
    }

    #[tokio::test]
    async fn test_pdf_export_names_the_artifact() {
        let pipeline = ExportPipeline::default();
        let artifact = pipeline
            .export_pdf(&named_data(), TemplateId::Modern, PhotoVariant::WithoutPhoto)
            .await
            .unwrap();
        assert_eq!(
            artifact.filename,
            "Ada_Lovelace_Resume_modern_without-photo.pdf"
        );
        assert_eq!(artifact.content_type, "application/pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_docx_export_round_trip() {
        let pipeline = ExportPipeline::default();
        let artifact = pipeline
            .export_docx(
                &named_data(),
                TemplateId::Professional,
                PhotoVariant::WithoutPhoto,
            )
            .await
            .unwrap();
        assert_eq!(
            artifact.filename,
            "Ada_Lovelace_Resume_professional_without-photo.docx"
        );
        assert!(artifact.bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_with_photo_export_requires_a_photo() {
        let pipeline = ExportPipeline::default();
        let err = pipeline
            .export_pdf(&named_data(), TemplateId::Creative, PhotoVariant::WithPhoto)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "PHOTO_REQUIRED");
    }

    #[tokio::test]
    async fn test_with_photo_export_embeds_when_present() {
        // 1x1 transparent PNG.
        const PNG: &[u8] = &[
            0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
            0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0b, 0x49, 0x44, 0x41, 0x54, 0x78,
            0x9c, 0x63, 0x60, 0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x01, 0x7a, 0x5e, 0xab, 0x3f,
            0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
        ];
        let mut data = named_data();
        data.photo = Some(Photo::from_upload("image/png", PNG, 1024).unwrap());
        let pipeline = ExportPipeline::default();
        let artifact = pipeline
            .export_pdf(&data, TemplateId::Modern, PhotoVariant::WithPhoto)
            .await
            .unwrap();
        assert_eq!(
            artifact.filename,
            "Ada_Lovelace_Resume_modern_with-photo.pdf"
        );
    }

    #[tokio::test]
    async fn test_missing_surface_is_retryable() {
        let pipeline = ExportPipeline::new(Arc::new(StaticSurfaces::new()));
        let data = named_data();
        let err = pipeline
            .export_pdf(&data, TemplateId::Modern, PhotoVariant::WithoutPhoto)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "RENDER_TARGET_MISSING");
        // The aggregate is untouched; the same call against a working
        // surface succeeds immediately.
        let retry = ExportPipeline::default();
        assert!(retry
            .export_pdf(&data, TemplateId::Modern, PhotoVariant::WithoutPhoto)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_directory_sink_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let pipeline = ExportPipeline::default();
        let artifact = pipeline
            .export_to(
                &sink,
                &named_data(),
                TemplateId::Modern,
                PhotoVariant::WithoutPhoto,
                ExportFormat::Docx,
            )
            .await
            .unwrap();
        let written = std::fs::read(dir.path().join(&artifact.filename)).unwrap();
        assert_eq!(written, artifact.bytes);
    }

    #[tokio::test]
    async fn test_delivery_failure_reports_the_filename() {
        let sink = DirectorySink::new("/definitely/not/a/directory");
        let pipeline = ExportPipeline::default();
        let err = pipeline
            .export_to(
                &sink,
                &named_data(),
                TemplateId::Modern,
                PhotoVariant::WithoutPhoto,
                ExportFormat::Pdf,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "DELIVERY_FAILED");
        assert!(err.user_message().contains("try again"));
    }
}
