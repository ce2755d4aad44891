//! Static content suggestions surfaced by the wizard forms.
//!
//! The "generate" affordance is a fixed-text stub, not an inference call.

use crate::models::SkillLevel;

/// The canned professional summary inserted by the generate button.
pub const SAMPLE_SUMMARY: &str = "Experienced professional with a proven track record of delivering high-quality results and driving organizational success. Skilled in cross-functional collaboration, strategic planning, and process optimization. Passionate about leveraging technology and innovation to solve complex business challenges and create value for stakeholders.";

/// Suggested skill categories. The data layer accepts any string; this list
/// only seeds the category picker.
pub const SKILL_CATEGORIES: &[&str] = &[
    "Technical Skills",
    "Programming Languages",
    "Frameworks & Libraries",
    "Databases",
    "Tools & Software",
    "Design",
    "Project Management",
    "Communication",
    "Leadership",
    "Languages",
    "Other",
];

/// Proficiency levels in the order the level picker shows them.
pub const SKILL_LEVELS: &[SkillLevel] = &[
    SkillLevel::NotSpecified,
    SkillLevel::Beginner,
    SkillLevel::Intermediate,
    SkillLevel::Advanced,
    SkillLevel::Expert,
];

/// Length feedback shown under the summary editor.
pub fn summary_length_hint(len: usize, target: usize, soft_max: usize) -> Option<&'static str> {
    if len < target {
        Some("aim for 50+ characters")
    } else if len > soft_max {
        Some("consider shortening")
    } else {
        None
    }
}
