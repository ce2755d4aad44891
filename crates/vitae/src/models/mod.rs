pub mod resume;

pub use resume::{
    Certificate, CertificateDraft, CertificatePatch, ContactInfo, ContactPatch, Education,
    EducationDraft, EducationPatch, EntryId, Experience, ExperienceDraft, ExperiencePatch, Project,
    ProjectDraft, ProjectPatch, ResumeData, Skill, SkillDraft, SkillLevel, SkillPatch,
};
