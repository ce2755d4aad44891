use thiserror::Error;

use crate::export::ExportFormat;

/// Failure conditions of the photo input boundary. Every variant aborts the
/// upload with no state change — an existing photo survives a failed upload.
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("invalid file: expected an image, got '{0}'")]
    NotAnImage(String),

    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("failed to read photo: {0}")]
    Read(#[from] std::io::Error),
}

impl PhotoError {
    /// Stable machine code for the host UI to key its notification on.
    pub fn code(&self) -> &'static str {
        match self {
            PhotoError::NotAnImage(_) => "INVALID_FILE",
            PhotoError::TooLarge { .. } => "FILE_TOO_LARGE",
            PhotoError::Read(_) => "PHOTO_READ_FAILED",
        }
    }

    /// Human-readable message suitable for a toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            PhotoError::NotAnImage(_) => "Please upload an image file (JPG, PNG, etc.)",
            PhotoError::TooLarge { .. } => "Please upload an image smaller than 5MB",
            PhotoError::Read(_) => "The photo could not be read. Please try again",
        }
    }
}

/// Failure of the rendering collaborator to supply a visual representation.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No rendered representation exists for the requested target. Retryable;
    /// the data model is untouched.
    #[error("no rendered representation for '{0}'")]
    MissingTarget(String),

    #[error("rendering failed: {0}")]
    Failed(#[source] anyhow::Error),
}

/// Export-boundary error taxonomy. All variants are non-fatal: the session
/// and wizard state are left untouched and the user may retry immediately.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A with-photo target was requested but no photo payload is present.
    /// Never silently downgraded to the without-photo variant.
    #[error("photo required: the with-photo format needs an uploaded photo")]
    PhotoRequired,

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Any failure inside an encoder, caught at the export boundary. The
    /// underlying cause is logged; the user sees a generic retry message.
    #[error("{format} encoding failed")]
    Encode {
        format: ExportFormat,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to deliver '{filename}': {source}")]
    Delivery {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::PhotoRequired => "PHOTO_REQUIRED",
            ExportError::Render(RenderError::MissingTarget(_)) => "RENDER_TARGET_MISSING",
            ExportError::Render(RenderError::Failed(_)) => "RENDER_FAILED",
            ExportError::Encode { .. } => "EXPORT_FAILED",
            ExportError::Delivery { .. } => "DELIVERY_FAILED",
        }
    }

    /// Human-readable retry message. Pure; the underlying causes are logged
    /// where the error is produced, at the export boundary.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::PhotoRequired => {
                "Please upload a photo for the resume with photo format".to_string()
            }
            ExportError::Render(RenderError::MissingTarget(_)) => {
                "Resume template not found. Please try again".to_string()
            }
            ExportError::Render(RenderError::Failed(_)) => {
                "There was an error preparing the resume. Please try again".to_string()
            }
            ExportError::Encode { format, .. } => {
                format!("There was an error generating the {format}. Please try again")
            }
            ExportError::Delivery { .. } => {
                "The download could not be delivered. Please try again".to_string()
            }
        }
    }
}
