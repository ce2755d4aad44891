//! Wizard step state machine: an ordered step sequence, per-step completion
//! predicates, and the clickability policy.
//!
//! Users may always move one step ahead of their current position, jump
//! backward freely, or jump forward to any step already complete — but never
//! skip ahead into unvisited, incomplete territory.

use serde::{Deserialize, Serialize};

use crate::models::ResumeData;
use crate::scoring::{completion_score, READY_SCORE};

/// The closed set of wizard steps across both sequence variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStep {
    Contacts,
    Experience,
    Education,
    Projects,
    Certificates,
    Skills,
    Summary,
    Finalize,
}

impl ResumeStep {
    pub fn title(&self) -> &'static str {
        match self {
            ResumeStep::Contacts => "Contacts",
            ResumeStep::Experience => "Experience",
            ResumeStep::Education => "Education",
            ResumeStep::Projects => "Projects",
            ResumeStep::Certificates => "Certificates",
            ResumeStep::Skills => "Skills",
            ResumeStep::Summary => "Summary",
            ResumeStep::Finalize => "Finalize",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ResumeStep::Contacts => "Personal information",
            ResumeStep::Experience => "Work history",
            ResumeStep::Education => "Academic background",
            ResumeStep::Projects => "Personal & professional projects",
            ResumeStep::Certificates => "Licenses & certifications",
            ResumeStep::Skills => "Technical & soft skills",
            ResumeStep::Summary => "Professional summary",
            ResumeStep::Finalize => "Review & download",
        }
    }

    /// The step's completion predicate. Independent of the numeric score
    /// except for the terminal step, which gates on [`READY_SCORE`].
    pub fn is_complete(&self, data: &ResumeData) -> bool {
        match self {
            ResumeStep::Contacts => {
                !data.contacts.first_name.is_empty()
                    && !data.contacts.last_name.is_empty()
                    && !data.contacts.email.is_empty()
                    && !data.contacts.phone.is_empty()
            }
            ResumeStep::Experience => !data.experience.is_empty(),
            ResumeStep::Education => !data.education.is_empty(),
            ResumeStep::Projects => !data.projects.is_empty(),
            ResumeStep::Certificates => !data.certificates.is_empty(),
            ResumeStep::Skills => data.skills.len() >= 3,
            ResumeStep::Summary => data.summary_len() > 50,
            ResumeStep::Finalize => completion_score(data) >= READY_SCORE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sequences
// ────────────────────────────────────────────────────────────────────────────

/// An ordered wizard sequence. Two shipped variants; positions are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSequence(Vec<ResumeStep>);

impl StepSequence {
    /// The six-step wizard: contacts → experience → education → skills →
    /// summary → finalize.
    pub fn standard() -> Self {
        StepSequence(vec![
            ResumeStep::Contacts,
            ResumeStep::Experience,
            ResumeStep::Education,
            ResumeStep::Skills,
            ResumeStep::Summary,
            ResumeStep::Finalize,
        ])
    }

    /// The extended wizard adds projects and certificates between education
    /// and skills.
    pub fn extended() -> Self {
        StepSequence(vec![
            ResumeStep::Contacts,
            ResumeStep::Experience,
            ResumeStep::Education,
            ResumeStep::Projects,
            ResumeStep::Certificates,
            ResumeStep::Skills,
            ResumeStep::Summary,
            ResumeStep::Finalize,
        ])
    }

    pub fn steps(&self) -> &[ResumeStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn index_of(&self, step: ResumeStep) -> Option<usize> {
        self.0.iter().position(|s| *s == step)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard state
// ────────────────────────────────────────────────────────────────────────────

/// Current position within a sequence. Exactly one step is current at a time;
/// all transitions are explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    sequence: StepSequence,
    current: usize,
}

impl WizardState {
    /// Starts at the first step of the sequence.
    pub fn new(sequence: StepSequence) -> Self {
        WizardState {
            sequence,
            current: 0,
        }
    }

    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    pub fn current_step(&self) -> ResumeStep {
        self.sequence.0[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Whether the user may select `step` right now: at most one ahead of
    /// the current position, or anywhere if the step is already complete.
    pub fn is_clickable(&self, step: ResumeStep, data: &ResumeData) -> bool {
        match self.sequence.index_of(step) {
            Some(index) => index <= self.current + 1 || step.is_complete(data),
            None => false,
        }
    }

    /// Explicit jump. Returns false (and stays put) when the step is not in
    /// the sequence or not clickable.
    pub fn go_to(&mut self, step: ResumeStep, data: &ResumeData) -> bool {
        if !self.is_clickable(step, data) {
            return false;
        }
        // index_of is Some here — is_clickable already checked membership.
        if let Some(index) = self.sequence.index_of(step) {
            self.current = index;
            return true;
        }
        false
    }

    /// Moves one step forward; no-op on the last step.
    pub fn next(&mut self) {
        if self.current + 1 < self.sequence.len() {
            self.current += 1;
        }
    }

    /// Moves one step back; no-op on the first step.
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
