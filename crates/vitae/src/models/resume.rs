//! Canonical in-memory résumé model.
//!
//! One `ResumeData` aggregate per session, exclusively owned by the
//! [`ResumeSession`](crate::session::ResumeSession). Collections are always
//! present — absence is an empty `Vec`, never a missing field — and their
//! insertion order is the canonical display/export order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::photo::Photo;

// ────────────────────────────────────────────────────────────────────────────
// Entry identity
// ────────────────────────────────────────────────────────────────────────────

/// Opaque identity of a collection entry. Unique within the session's entire
/// history (removed ids are never reissued), immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    pub(crate) fn generate() -> Self {
        EntryId(Uuid::new_v4())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contact block
// ────────────────────────────────────────────────────────────────────────────

/// Singleton contact block. The first five fields feed the completion scorer;
/// website/linkedin/github are optional extras (empty string = absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
}

impl ContactInfo {
    /// Links that go on the optional links line of an export, in fixed order.
    pub fn links(&self) -> Vec<&str> {
        [&self.website, &self.linkedin, &self.github]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect()
    }
}

/// Shallow partial update for the contact block. `None` fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// A work-history entry. Dates are ISO "YYYY-MM" strings; this layer does not
/// validate them (validation is a presentation concern).
///
/// `description` may use a lightweight markup subset: lines starting "- " or
/// "• " become bullets, `**x**` bold, `*x*` italic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: EntryId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current_job: bool,
    pub description: String,
}

impl Experience {
    /// The end date as consumers must see it: `None` while the job is
    /// current, regardless of what `end_date` holds.
    pub fn effective_end(&self) -> Option<&str> {
        if self.is_current_job {
            None
        } else {
            Some(self.end_date.as_str())
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceDraft {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current_job: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperiencePatch {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current_job: Option<bool>,
    pub description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: EntryId,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub is_currently_studying: bool,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

impl Education {
    /// Same present-substitution contract as [`Experience::effective_end`].
    pub fn effective_end(&self) -> Option<&str> {
        if self.is_currently_studying {
            None
        } else {
            Some(self.end_date.as_str())
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationDraft {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub is_currently_studying: bool,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_currently_studying: Option<bool>,
    pub gpa: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Certificates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiration_date: Option<String>,
    pub credential_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateDraft {
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiration_date: Option<String>,
    pub credential_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificatePatch {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiration_date: Option<Option<String>>,
    pub credential_id: Option<Option<String>>,
    pub url: Option<Option<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Ordered proficiency scale. `Ord` follows the declaration order:
/// NotSpecified < Beginner < Intermediate < Advanced < Expert.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SkillLevel {
    #[default]
    NotSpecified,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::NotSpecified => "Not specified",
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

/// A skill entry. `category` is free-form at this layer — the UI offers a
/// suggested list (see [`crate::suggest::SKILL_CATEGORIES`]) but any string
/// is accepted and grouped verbatim for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: EntryId,
    pub name: String,
    pub level: SkillLevel,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillDraft {
    pub name: String,
    pub level: SkillLevel,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<SkillLevel>,
    pub category: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Projects (extended variant)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub url: Option<Option<String>>,
    pub github_url: Option<Option<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The full résumé aggregate. Created empty at session start; mutated only
/// through the session's operations; dropped with the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeData {
    pub contacts: ContactInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub certificates: Vec<Certificate>,
    pub skills: Vec<Skill>,
    /// Extended-variant collection; empty means the résumé has no projects
    /// section (there is no separate "absent" state).
    pub projects: Vec<Project>,
    pub photo: Option<Photo>,
}

impl ResumeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unicode-scalar length of the summary, the unit the scorer and the
    /// summary step predicate both count.
    pub fn summary_len(&self) -> usize {
        self.summary.chars().count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
