//! Visual layout: the rendered representation the PDF encoder consumes,
//! and the collaborator boundary that produces it.
//!
//! The PDF encoder never walks [`ResumeData`](crate::models::ResumeData)
//! directly. It asks a [`RenderSurface`] for the [`RenderedDocument`]
//! belonging to a [`RenderTarget`](crate::templates::RenderTarget); a
//! surface that cannot produce one reports
//! [`RenderError::MissingTarget`](crate::errors::RenderError::MissingTarget)
//! and the caller retries later with the data unchanged.

pub mod markup;
pub mod metrics;
pub mod renderer;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RenderError;
use crate::models::ResumeData;
use crate::templates::RenderTarget;

pub use markup::InlineSpan;
pub use renderer::TemplateRenderer;

// ────────────────────────────────────────────────────────────────────────────
// Rendered representation
// ────────────────────────────────────────────────────────────────────────────

/// Visual role of a line; the PDF encoder maps each role to a font face,
/// size, and indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    /// The full name at the top of the page.
    Name,
    /// Contact rows under the name.
    Contact,
    SectionHeading,
    /// An entry's first line (job title, degree, project name).
    ItemTitle,
    /// Secondary line under a title (company, institution, dates).
    ItemMeta,
    Body,
    Bullet,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedLine {
    pub style: LineStyle,
    pub spans: Vec<InlineSpan>,
}

impl RenderedLine {
    pub fn plain(style: LineStyle, text: impl Into<String>) -> Self {
        RenderedLine {
            style,
            spans: vec![InlineSpan::plain(text)],
        }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A group of lines the paginator tries not to split across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBlock {
    pub keep_together: bool,
    pub lines: Vec<RenderedLine>,
}

impl RenderedBlock {
    pub fn keep(lines: Vec<RenderedLine>) -> Self {
        RenderedBlock {
            keep_together: true,
            lines,
        }
    }

    pub fn flow(lines: Vec<RenderedLine>) -> Self {
        RenderedBlock {
            keep_together: false,
            lines,
        }
    }
}

/// Everything the PDF encoder needs: ordered blocks plus an optional photo
/// slot (the encoder embeds the aggregate's photo when this is set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub surface_id: String,
    pub blocks: Vec<RenderedBlock>,
    pub include_photo: bool,
}

impl RenderedDocument {
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Collaborator boundary
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Produces the rendered representation for `target`, or
    /// `RenderError::MissingTarget` when no surface exists for it.
    async fn rendered(
        &self,
        target: &RenderTarget,
        data: &ResumeData,
    ) -> Result<RenderedDocument, RenderError>;
}

/// A fixed set of pre-rendered documents keyed by surface id. Targets not
/// in the map report `MissingTarget`, which makes this the surface of
/// choice for exercising the retry path.
#[derive(Debug, Default)]
pub struct StaticSurfaces {
    documents: HashMap<String, RenderedDocument>,
}

impl StaticSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, document: RenderedDocument) {
        self.documents.insert(document.surface_id.clone(), document);
    }
}

#[async_trait]
impl RenderSurface for StaticSurfaces {
    async fn rendered(
        &self,
        target: &RenderTarget,
        _data: &ResumeData,
    ) -> Result<RenderedDocument, RenderError> {
        let id = target.surface_id();
        self.documents
            .get(&id)
            .cloned()
            .ok_or(RenderError::MissingTarget(id))
    }
}
