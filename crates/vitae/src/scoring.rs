//! Completion scoring — a pure, weighted rule evaluation over the aggregate.
//!
//! The rule table and the step predicates in [`crate::steps`] overlap but are
//! deliberately not identical (the score rewards a second experience entry
//! and certificates; no step requires them). The overall score is a stricter,
//! holistic gate than any single step.

use serde::{Deserialize, Serialize};

use crate::models::ResumeData;

/// Score at or above which the résumé counts as ready (the finalize step's
/// completion predicate and the "excellent" banner threshold).
pub const READY_SCORE: u8 = 70;

/// The weighted rule table. Points sum to exactly 100, so the summed score
/// is already the percentage — no rounding is involved.
const RULES: &[(&str, u8, fn(&ResumeData) -> bool)] = &[
    ("name", 5, |d| {
        !d.contacts.first_name.is_empty() && !d.contacts.last_name.is_empty()
    }),
    ("email", 5, |d| !d.contacts.email.is_empty()),
    ("phone", 5, |d| !d.contacts.phone.is_empty()),
    ("location", 5, |d| !d.contacts.location.is_empty()),
    ("summary", 15, |d| d.summary_len() > 50),
    ("experience", 10, |d| !d.experience.is_empty()),
    ("experience_detail", 10, |d| {
        d.experience
            .iter()
            .any(|e| e.description.chars().count() > 50)
    }),
    ("experience_depth", 10, |d| d.experience.len() >= 2),
    ("education", 15, |d| !d.education.is_empty()),
    ("skills", 5, |d| d.skills.len() >= 3),
    ("skills_breadth", 5, |d| d.skills.len() >= 6),
    ("certificates", 10, |d| !d.certificates.is_empty()),
];

/// Computes the completion score, an integer in 0..=100. Pure and
/// deterministic; re-evaluated on every data change by the session.
pub fn completion_score(data: &ResumeData) -> u8 {
    RULES
        .iter()
        .filter(|(_, _, rule)| rule(data))
        .map(|(_, points, _)| points)
        .sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Finalize-screen reporting
// ────────────────────────────────────────────────────────────────────────────

/// One row of the finalize screen's completion checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCheck {
    pub name: &'static str,
    pub completed: bool,
}

/// The five checklist rows shown on the finalize step, in display order.
/// Note the contact row only requires name and email here — the contacts
/// step predicate is stricter (it also wants a phone number).
pub fn section_checklist(data: &ResumeData) -> Vec<SectionCheck> {
    vec![
        SectionCheck {
            name: "Contact Information",
            completed: !data.contacts.first_name.is_empty()
                && !data.contacts.last_name.is_empty()
                && !data.contacts.email.is_empty(),
        },
        SectionCheck {
            name: "Professional Summary",
            completed: data.summary_len() > 50,
        },
        SectionCheck {
            name: "Work Experience",
            completed: !data.experience.is_empty(),
        },
        SectionCheck {
            name: "Education",
            completed: !data.education.is_empty(),
        },
        SectionCheck {
            name: "Skills",
            completed: data.skills.len() >= 3,
        },
    ]
}

/// Advisory banding of the score as surfaced at finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// Below the download-discouraged threshold.
    NeedsWork,
    /// Downloadable but not yet at the ready mark.
    Fair,
    /// At or above [`READY_SCORE`].
    Ready,
}

impl ScoreBand {
    pub fn classify(score: u8, needs_work_below: u8) -> Self {
        if score >= READY_SCORE {
            ScoreBand::Ready
        } else if score < needs_work_below {
            ScoreBand::NeedsWork
        } else {
            ScoreBand::Fair
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
