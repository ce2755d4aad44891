//! vitae — a résumé wizard engine: the data model, mutation and scoring
//! core of a step-by-step résumé builder, plus a multi-format export
//! pipeline (PDF via printpdf, DOCX via docx-rs).
//!
//! The engine is headless. A host owns a [`ResumeSession`], drives it with
//! the wizard and mutation operations, and asks the [`ExportPipeline`] for
//! finished artifacts. Nothing here persists, serves HTTP, or talks to a
//! model; those concerns belong to the host.

pub mod config;
pub mod errors;
pub mod export;
pub mod layout;
pub mod models;
pub mod photo;
pub mod scoring;
pub mod session;
pub mod steps;
pub mod suggest;
pub mod templates;

pub use config::EngineConfig;
pub use errors::{ExportError, PhotoError, RenderError};
pub use export::{Artifact, ArtifactSink, DirectorySink, ExportFormat, ExportPipeline};
pub use layout::{RenderSurface, RenderedDocument, TemplateRenderer};
pub use models::ResumeData;
pub use photo::Photo;
pub use scoring::{completion_score, section_checklist, ScoreBand, SectionCheck, READY_SCORE};
pub use session::ResumeSession;
pub use steps::{ResumeStep, StepSequence, WizardState};
pub use templates::{PhotoVariant, RenderTarget, TemplateId};
