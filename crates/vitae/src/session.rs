//! The résumé session: exclusive owner of one [`ResumeData`] aggregate and
//! the wizard position, exposing every mutation the UI can perform.
//!
//! All operations are synchronous and structurally atomic — an operation
//! either fully applies or (for identity-keyed ops with a stale id, or a
//! rejected photo) leaves the aggregate exactly as it was. Stale ids are a
//! silent no-op by contract: identities are internal, and a stale reference
//! must never surface as a user-facing failure.

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::errors::PhotoError;
use crate::models::{
    Certificate, CertificateDraft, CertificatePatch, ContactPatch, Education, EducationDraft,
    EducationPatch, EntryId, Experience, ExperienceDraft, ExperiencePatch, Project, ProjectDraft,
    ProjectPatch, ResumeData, Skill, SkillDraft, SkillPatch,
};
use crate::photo::Photo;
use crate::scoring::{completion_score, section_checklist, ScoreBand, SectionCheck};
use crate::steps::{ResumeStep, StepSequence, WizardState};
use crate::suggest::{summary_length_hint, SAMPLE_SUMMARY};

pub struct ResumeSession {
    config: EngineConfig,
    data: ResumeData,
    wizard: WizardState,
}

impl Default for ResumeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeSession {
    /// A fresh session: empty aggregate, standard six-step wizard.
    pub fn new() -> Self {
        Self::with(EngineConfig::default(), StepSequence::standard())
    }

    pub fn with(config: EngineConfig, sequence: StepSequence) -> Self {
        ResumeSession {
            config,
            data: ResumeData::new(),
            wizard: WizardState::new(sequence),
        }
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── scoring ─────────────────────────────────────────────────────────────

    pub fn score(&self) -> u8 {
        completion_score(&self.data)
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::classify(self.score(), self.config.min_download_score)
    }

    pub fn checklist(&self) -> Vec<SectionCheck> {
        section_checklist(&self.data)
    }

    // ── wizard ──────────────────────────────────────────────────────────────

    pub fn current_step(&self) -> ResumeStep {
        self.wizard.current_step()
    }

    pub fn is_step_complete(&self, step: ResumeStep) -> bool {
        step.is_complete(&self.data)
    }

    pub fn is_step_clickable(&self, step: ResumeStep) -> bool {
        self.wizard.is_clickable(step, &self.data)
    }

    pub fn go_to_step(&mut self, step: ResumeStep) -> bool {
        self.wizard.go_to(step, &self.data)
    }

    pub fn next_step(&mut self) {
        self.wizard.next();
    }

    pub fn previous_step(&mut self) {
        self.wizard.previous();
    }

    // ── scalar fields ───────────────────────────────────────────────────────

    pub fn update_contacts(&mut self, patch: ContactPatch) {
        let c = &mut self.data.contacts;
        if let Some(v) = patch.first_name {
            c.first_name = v;
        }
        if let Some(v) = patch.last_name {
            c.last_name = v;
        }
        if let Some(v) = patch.email {
            c.email = v;
        }
        if let Some(v) = patch.phone {
            c.phone = v;
        }
        if let Some(v) = patch.location {
            c.location = v;
        }
        if let Some(v) = patch.website {
            c.website = v;
        }
        if let Some(v) = patch.linkedin {
            c.linkedin = v;
        }
        if let Some(v) = patch.github {
            c.github = v;
        }
    }

    pub fn update_summary(&mut self, summary: String) {
        self.data.summary = summary;
    }

    /// The "generate" affordance, a static stub rather than an inference
    /// call.
    pub fn apply_sample_summary(&mut self) {
        self.data.summary = SAMPLE_SUMMARY.to_string();
    }

    /// Length feedback for the summary editor, per the configured targets.
    pub fn summary_hint(&self) -> Option<&'static str> {
        summary_length_hint(
            self.data.summary_len(),
            self.config.summary_target_len,
            self.config.summary_soft_max_len,
        )
    }

    // ── experience ──────────────────────────────────────────────────────────

    pub fn add_experience(&mut self, draft: ExperienceDraft) -> EntryId {
        let id = EntryId::generate();
        debug!(%id, "add experience entry");
        self.data.experience.push(Experience {
            id,
            job_title: draft.job_title,
            company: draft.company,
            location: draft.location,
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_current_job: draft.is_current_job,
            description: draft.description,
        });
        id
    }

    pub fn update_experience(&mut self, id: EntryId, patch: ExperiencePatch) {
        let Some(entry) = self.data.experience.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if let Some(v) = patch.job_title {
            entry.job_title = v;
        }
        if let Some(v) = patch.company {
            entry.company = v;
        }
        if let Some(v) = patch.location {
            entry.location = v;
        }
        if let Some(v) = patch.start_date {
            entry.start_date = v;
        }
        if let Some(v) = patch.end_date {
            entry.end_date = v;
        }
        if let Some(v) = patch.is_current_job {
            entry.is_current_job = v;
        }
        if let Some(v) = patch.description {
            entry.description = v;
        }
    }

    pub fn remove_experience(&mut self, id: EntryId) {
        self.data.experience.retain(|e| e.id != id);
    }

    // ── education ───────────────────────────────────────────────────────────

    pub fn add_education(&mut self, draft: EducationDraft) -> EntryId {
        let id = EntryId::generate();
        debug!(%id, "add education entry");
        self.data.education.push(Education {
            id,
            institution: draft.institution,
            degree: draft.degree,
            field_of_study: draft.field_of_study,
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_currently_studying: draft.is_currently_studying,
            gpa: draft.gpa,
            description: draft.description,
        });
        id
    }

    pub fn update_education(&mut self, id: EntryId, patch: EducationPatch) {
        let Some(entry) = self.data.education.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if let Some(v) = patch.institution {
            entry.institution = v;
        }
        if let Some(v) = patch.degree {
            entry.degree = v;
        }
        if let Some(v) = patch.field_of_study {
            entry.field_of_study = v;
        }
        if let Some(v) = patch.start_date {
            entry.start_date = v;
        }
        if let Some(v) = patch.end_date {
            entry.end_date = v;
        }
        if let Some(v) = patch.is_currently_studying {
            entry.is_currently_studying = v;
        }
        if let Some(v) = patch.gpa {
            entry.gpa = v;
        }
        if let Some(v) = patch.description {
            entry.description = v;
        }
    }

    pub fn remove_education(&mut self, id: EntryId) {
        self.data.education.retain(|e| e.id != id);
    }

    // ── certificates ────────────────────────────────────────────────────────

    pub fn add_certificate(&mut self, draft: CertificateDraft) -> EntryId {
        let id = EntryId::generate();
        debug!(%id, "add certificate entry");
        self.data.certificates.push(Certificate {
            id,
            name: draft.name,
            issuer: draft.issuer,
            issue_date: draft.issue_date,
            expiration_date: draft.expiration_date,
            credential_id: draft.credential_id,
            url: draft.url,
        });
        id
    }

    pub fn update_certificate(&mut self, id: EntryId, patch: CertificatePatch) {
        let Some(entry) = self.data.certificates.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if let Some(v) = patch.name {
            entry.name = v;
        }
        if let Some(v) = patch.issuer {
            entry.issuer = v;
        }
        if let Some(v) = patch.issue_date {
            entry.issue_date = v;
        }
        if let Some(v) = patch.expiration_date {
            entry.expiration_date = v;
        }
        if let Some(v) = patch.credential_id {
            entry.credential_id = v;
        }
        if let Some(v) = patch.url {
            entry.url = v;
        }
    }

    pub fn remove_certificate(&mut self, id: EntryId) {
        self.data.certificates.retain(|e| e.id != id);
    }

    // ── skills ──────────────────────────────────────────────────────────────

    pub fn add_skill(&mut self, draft: SkillDraft) -> EntryId {
        let id = EntryId::generate();
        debug!(%id, "add skill entry");
        self.data.skills.push(Skill {
            id,
            name: draft.name,
            level: draft.level,
            category: draft.category,
        });
        id
    }

    pub fn update_skill(&mut self, id: EntryId, patch: SkillPatch) {
        let Some(entry) = self.data.skills.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if let Some(v) = patch.name {
            entry.name = v;
        }
        if let Some(v) = patch.level {
            entry.level = v;
        }
        if let Some(v) = patch.category {
            entry.category = v;
        }
    }

    pub fn remove_skill(&mut self, id: EntryId) {
        self.data.skills.retain(|e| e.id != id);
    }

    // ── projects ────────────────────────────────────────────────────────────

    pub fn add_project(&mut self, draft: ProjectDraft) -> EntryId {
        let id = EntryId::generate();
        debug!(%id, "add project entry");
        self.data.projects.push(Project {
            id,
            name: draft.name,
            description: draft.description,
            technologies: draft.technologies,
            url: draft.url,
            github_url: draft.github_url,
        });
        id
    }

    pub fn update_project(&mut self, id: EntryId, patch: ProjectPatch) {
        let Some(entry) = self.data.projects.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if let Some(v) = patch.name {
            entry.name = v;
        }
        if let Some(v) = patch.description {
            entry.description = v;
        }
        if let Some(v) = patch.technologies {
            entry.technologies = v;
        }
        if let Some(v) = patch.url {
            entry.url = v;
        }
        if let Some(v) = patch.github_url {
            entry.github_url = v;
        }
    }

    pub fn remove_project(&mut self, id: EntryId) {
        self.data.projects.retain(|e| e.id != id);
    }

    // ── photo ───────────────────────────────────────────────────────────────

    /// Validates and stores an upload. Last write wins; a rejected upload
    /// leaves any existing photo untouched.
    pub fn upload_photo(&mut self, media_type: &str, bytes: &[u8]) -> Result<(), PhotoError> {
        let photo = Photo::from_upload(media_type, bytes, self.config.max_photo_bytes)
            .inspect_err(|e| warn!(media_type, code = e.code(), "photo rejected"))?;
        info!(media_type, size = bytes.len(), "photo accepted");
        self.data.photo = Some(photo);
        Ok(())
    }

    /// Bounded async variant reading from an upload stream.
    pub async fn upload_photo_async<R>(
        &mut self,
        media_type: &str,
        reader: R,
    ) -> Result<(), PhotoError>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let photo = Photo::read_async(media_type, reader, self.config.max_photo_bytes)
            .await
            .inspect_err(|e| warn!(media_type, code = e.code(), "photo rejected"))?;
        info!(media_type, "photo accepted");
        self.data.photo = Some(photo);
        Ok(())
    }

    pub fn clear_photo(&mut self) {
        self.data.photo = None;
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.data.photo.as_ref()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> ExperienceDraft {
        ExperienceDraft {
            job_title: title.into(),
            company: "Acme".into(),
            ..ExperienceDraft::default()
        }
    }

    #[test]
    fn test_add_assigns_identity_and_appends() {
        let mut session = ResumeSession::new();
        let a = session.add_experience(draft("first"));
        let b = session.add_experience(draft("second"));
        assert_ne!(a, b);
        let titles: Vec<_> = session
            .data()
            .experience
            .iter()
            .map(|e| e.job_title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_add_does_not_validate_contents() {
        let mut session = ResumeSession::new();
        session.add_experience(ExperienceDraft::default());
        assert_eq!(session.data().experience[0].job_title, "");
    }

    #[test]
    fn test_update_merges_and_preserves_position() {
        let mut session = ResumeSession::new();
        let a = session.add_experience(draft("first"));
        let b = session.add_experience(draft("second"));
        session.update_experience(
            a,
            ExperiencePatch {
                company: Some("Initech".into()),
                ..ExperiencePatch::default()
            },
        );
        let entries = &session.data().experience;
        assert_eq!(entries[0].id, a, "identity and position preserved");
        assert_eq!(entries[0].company, "Initech");
        assert_eq!(entries[0].job_title, "first", "unpatched fields untouched");
        assert_eq!(entries[1].id, b);
    }

    #[test]
    fn test_update_with_stale_id_is_a_silent_noop() {
        let mut session = ResumeSession::new();
        let id = session.add_experience(draft("only"));
        session.remove_experience(id);
        session.update_experience(
            id,
            ExperiencePatch {
                job_title: Some("ghost".into()),
                ..ExperiencePatch::default()
            },
        );
        assert!(session.data().experience.is_empty());
    }

    #[test]
    fn test_remove_preserves_order_of_the_rest() {
        let mut session = ResumeSession::new();
        let a = session.add_skill(SkillDraft {
            name: "a".into(),
            ..SkillDraft::default()
        });
        let b = session.add_skill(SkillDraft {
            name: "b".into(),
            ..SkillDraft::default()
        });
        let c = session.add_skill(SkillDraft {
            name: "c".into(),
            ..SkillDraft::default()
        });
        session.remove_skill(b);
        let ids: Vec<_> = session.data().skills.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, c]);
        session.remove_skill(b); // stale id, silent no-op
        assert_eq!(session.data().skills.len(), 2);
    }

    #[test]
    fn test_add_remove_counts_balance_across_collections() {
        let mut session = ResumeSession::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(session.add_certificate(CertificateDraft {
                name: format!("cert {i}"),
                ..CertificateDraft::default()
            }));
        }
        for id in ids.drain(..2) {
            session.remove_certificate(id);
        }
        assert_eq!(session.data().certificates.len(), 3);
        let names: Vec<_> = session
            .data()
            .certificates
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["cert 2", "cert 3", "cert 4"]);
    }

    #[test]
    fn test_contact_patch_merges_partially() {
        let mut session = ResumeSession::new();
        session.update_contacts(ContactPatch {
            first_name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            ..ContactPatch::default()
        });
        session.update_contacts(ContactPatch {
            last_name: Some("Lovelace".into()),
            ..ContactPatch::default()
        });
        let c = &session.data().contacts;
        assert_eq!(c.first_name, "Ada");
        assert_eq!(c.last_name, "Lovelace");
        assert_eq!(c.email, "ada@example.com");
        assert_eq!(c.phone, "");
    }

    #[test]
    fn test_option_field_can_be_cleared_via_patch() {
        let mut session = ResumeSession::new();
        let id = session.add_education(EducationDraft {
            institution: "University".into(),
            gpa: Some("3.9".into()),
            ..EducationDraft::default()
        });
        session.update_education(
            id,
            EducationPatch {
                gpa: Some(None),
                ..EducationPatch::default()
            },
        );
        assert_eq!(session.data().education[0].gpa, None);
    }

    #[test]
    fn test_sample_summary_stub() {
        let mut session = ResumeSession::new();
        session.apply_sample_summary();
        assert!(session.is_step_complete(ResumeStep::Summary));
    }

    #[test]
    fn test_failed_upload_leaves_existing_photo_untouched() {
        let mut session = ResumeSession::new();
        session.upload_photo("image/png", &[1, 2, 3]).unwrap();
        let before = session.photo().cloned();

        let six_mib = vec![0u8; 6 * 1024 * 1024];
        let err = session.upload_photo("image/png", &six_mib).unwrap_err();
        assert_eq!(err.code(), "FILE_TOO_LARGE");
        assert_eq!(session.photo().cloned(), before);
    }

    #[test]
    fn test_photo_last_write_wins() {
        let mut session = ResumeSession::new();
        session.upload_photo("image/png", &[1]).unwrap();
        session.upload_photo("image/jpeg", &[2]).unwrap();
        assert_eq!(session.photo().unwrap().media_type(), "image/jpeg");
        session.clear_photo();
        assert!(session.photo().is_none());
    }

    #[tokio::test]
    async fn test_async_upload_round_trip() {
        let mut session = ResumeSession::new();
        session
            .upload_photo_async("image/png", &[9u8, 9, 9][..])
            .await
            .unwrap();
        assert!(session.photo().is_some());
    }

    #[test]
    fn test_score_reflects_mutations() {
        let mut session = ResumeSession::new();
        assert_eq!(session.score(), 0);
        session.add_education(EducationDraft {
            institution: "University".into(),
            ..EducationDraft::default()
        });
        assert_eq!(session.score(), 15);
        assert_eq!(session.score_band(), ScoreBand::NeedsWork);
    }

    #[test]
    fn test_wizard_navigation_through_session() {
        let mut session = ResumeSession::new();
        assert_eq!(session.current_step(), ResumeStep::Contacts);
        assert!(!session.go_to_step(ResumeStep::Summary));
        session.next_step();
        assert_eq!(session.current_step(), ResumeStep::Experience);
        session.previous_step();
        assert_eq!(session.current_step(), ResumeStep::Contacts);
    }
}
