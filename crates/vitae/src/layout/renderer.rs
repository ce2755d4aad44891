//! The default render surface: walks the aggregate in template order and
//! emits the rendered block list the PDF encoder draws.
//!
//! Section order is fixed: header, summary, experience, projects,
//! education, certificates, skills. A section with no content emits
//! nothing, heading included.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::RenderError;
use crate::layout::markup::{self, InlineSpan, LineKind};
use crate::layout::{LineStyle, RenderSurface, RenderedBlock, RenderedDocument, RenderedLine};
use crate::models::{ResumeData, Skill};
use crate::templates::{PhotoVariant, RenderTarget};

/// Turns `YYYY-MM` into `Mon YYYY` for display. Anything that does not
/// parse (free text like "Present", or a malformed month) passes through
/// unchanged.
pub fn display_date(raw: &str) -> String {
    let padded = format!("{raw}-01");
    match NaiveDate::parse_from_str(&padded, "%Y-%m-%d") {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn date_range(start: &str, end: Option<&str>) -> String {
    let start = display_date(start);
    let end = match end {
        Some(e) if !e.is_empty() => display_date(e),
        _ => "Present".to_string(),
    };
    format!("{start} – {end}")
}

pub struct TemplateRenderer {
    date_footer: bool,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        TemplateRenderer { date_footer: true }
    }

    /// Disables the "Last updated" footer, making output a pure function
    /// of the aggregate.
    pub fn without_date_footer() -> Self {
        TemplateRenderer { date_footer: false }
    }

    pub fn from_config(config: &crate::config::EngineConfig) -> Self {
        TemplateRenderer {
            date_footer: config.date_footer,
        }
    }

    fn header(&self, data: &ResumeData) -> RenderedBlock {
        let c = &data.contacts;
        let mut lines = Vec::new();

        let name = format!("{} {}", c.first_name, c.last_name)
            .trim()
            .to_string();
        if !name.is_empty() {
            lines.push(RenderedLine::plain(LineStyle::Name, name));
        }

        let contact_bits: Vec<&str> = [&c.email, &c.phone, &c.location]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if !contact_bits.is_empty() {
            lines.push(RenderedLine::plain(
                LineStyle::Contact,
                contact_bits.join(" | "),
            ));
        }

        let links = c.links();
        if !links.is_empty() {
            lines.push(RenderedLine::plain(LineStyle::Contact, links.join(" | ")));
        }

        RenderedBlock::keep(lines)
    }

    fn description_lines(&self, description: &str, out: &mut Vec<RenderedLine>) {
        for line in markup::parse_description(description) {
            match line.kind {
                LineKind::Bullet => {
                    let mut spans = vec![InlineSpan::plain("– ")];
                    spans.extend(line.spans);
                    out.push(RenderedLine {
                        style: LineStyle::Bullet,
                        spans,
                    });
                }
                LineKind::Paragraph => out.push(RenderedLine {
                    style: LineStyle::Body,
                    spans: line.spans,
                }),
            }
        }
    }

    fn heading(title: &str) -> RenderedBlock {
        RenderedBlock::flow(vec![RenderedLine::plain(LineStyle::SectionHeading, title)])
    }

    fn summary(&self, data: &ResumeData, blocks: &mut Vec<RenderedBlock>) {
        if data.summary.is_empty() {
            return;
        }
        blocks.push(Self::heading("Professional Summary"));
        let mut lines = Vec::new();
        self.description_lines(&data.summary, &mut lines);
        blocks.push(RenderedBlock::flow(lines));
    }

    fn experience(&self, data: &ResumeData, blocks: &mut Vec<RenderedBlock>) {
        if data.experience.is_empty() {
            return;
        }
        blocks.push(Self::heading("Work Experience"));
        for entry in &data.experience {
            let mut lines = vec![RenderedLine {
                style: LineStyle::ItemTitle,
                spans: vec![InlineSpan::bold(&entry.job_title)],
            }];
            let place: Vec<&str> = [entry.company.as_str(), entry.location.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            if !place.is_empty() {
                lines.push(RenderedLine {
                    style: LineStyle::ItemMeta,
                    spans: vec![InlineSpan::italic(place.join(" - "))],
                });
            }
            lines.push(RenderedLine::plain(
                LineStyle::ItemMeta,
                date_range(&entry.start_date, entry.effective_end()),
            ));
            self.description_lines(&entry.description, &mut lines);
            blocks.push(RenderedBlock::keep(lines));
        }
    }

    fn projects(&self, data: &ResumeData, blocks: &mut Vec<RenderedBlock>) {
        if data.projects.is_empty() {
            return;
        }
        blocks.push(Self::heading("Projects"));
        for entry in &data.projects {
            let mut lines = vec![RenderedLine {
                style: LineStyle::ItemTitle,
                spans: vec![InlineSpan::bold(&entry.name)],
            }];
            self.description_lines(&entry.description, &mut lines);
            if !entry.technologies.is_empty() {
                lines.push(RenderedLine::plain(
                    LineStyle::ItemMeta,
                    format!("Technologies: {}", entry.technologies.join(", ")),
                ));
            }
            let links: Vec<&str> = [entry.url.as_deref(), entry.github_url.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect();
            if !links.is_empty() {
                lines.push(RenderedLine::plain(LineStyle::ItemMeta, links.join(" | ")));
            }
            blocks.push(RenderedBlock::keep(lines));
        }
    }

    fn education(&self, data: &ResumeData, blocks: &mut Vec<RenderedBlock>) {
        if data.education.is_empty() {
            return;
        }
        blocks.push(Self::heading("Education"));
        for entry in &data.education {
            let degree = match (entry.degree.is_empty(), entry.field_of_study.is_empty()) {
                (false, false) => format!("{} in {}", entry.degree, entry.field_of_study),
                (false, true) => entry.degree.clone(),
                (true, false) => entry.field_of_study.clone(),
                (true, true) => String::new(),
            };
            let mut lines = Vec::new();
            if !degree.is_empty() {
                lines.push(RenderedLine {
                    style: LineStyle::ItemTitle,
                    spans: vec![InlineSpan::bold(degree)],
                });
            }
            if !entry.institution.is_empty() {
                lines.push(RenderedLine {
                    style: LineStyle::ItemMeta,
                    spans: vec![InlineSpan::italic(&entry.institution)],
                });
            }
            let mut meta = date_range(&entry.start_date, entry.effective_end());
            if let Some(gpa) = entry.gpa.as_deref().filter(|g| !g.is_empty()) {
                meta.push_str(&format!(" | GPA: {gpa}"));
            }
            lines.push(RenderedLine::plain(LineStyle::ItemMeta, meta));
            if let Some(description) = entry.description.as_deref() {
                self.description_lines(description, &mut lines);
            }
            blocks.push(RenderedBlock::keep(lines));
        }
    }

    fn certificates(&self, data: &ResumeData, blocks: &mut Vec<RenderedBlock>) {
        if data.certificates.is_empty() {
            return;
        }
        blocks.push(Self::heading("Certificates"));
        for entry in &data.certificates {
            let mut lines = vec![RenderedLine {
                style: LineStyle::ItemTitle,
                spans: vec![InlineSpan::bold(&entry.name)],
            }];
            let issued: Vec<String> = [
                entry.issuer.clone(),
                display_date(&entry.issue_date),
            ]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
            if !issued.is_empty() {
                lines.push(RenderedLine::plain(LineStyle::ItemMeta, issued.join(" - ")));
            }
            if let Some(url) = entry.url.as_deref().filter(|u| !u.is_empty()) {
                lines.push(RenderedLine::plain(LineStyle::ItemMeta, url));
            }
            blocks.push(RenderedBlock::keep(lines));
        }
    }

    /// Skills grouped by category, first-appearance order; uncategorized
    /// entries collect under "Other".
    fn skills(&self, data: &ResumeData, blocks: &mut Vec<RenderedBlock>) {
        if data.skills.is_empty() {
            return;
        }
        blocks.push(Self::heading("Skills"));

        let mut groups: Vec<(&str, Vec<&Skill>)> = Vec::new();
        for skill in &data.skills {
            let category = if skill.category.is_empty() {
                "Other"
            } else {
                skill.category.as_str()
            };
            match groups.iter_mut().find(|(c, _)| *c == category) {
                Some((_, members)) => members.push(skill),
                None => groups.push((category, vec![skill])),
            }
        }

        let mut lines = Vec::new();
        for (category, members) in groups {
            let names = members
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(RenderedLine {
                style: LineStyle::Body,
                spans: vec![
                    InlineSpan::bold(format!("{category}: ")),
                    InlineSpan::plain(names),
                ],
            });
        }
        blocks.push(RenderedBlock::flow(lines));
    }

    pub fn render(&self, target: &RenderTarget, data: &ResumeData) -> RenderedDocument {
        let mut blocks = vec![self.header(data)];
        self.summary(data, &mut blocks);
        self.experience(data, &mut blocks);
        self.projects(data, &mut blocks);
        self.education(data, &mut blocks);
        self.certificates(data, &mut blocks);
        self.skills(data, &mut blocks);

        if self.date_footer {
            let stamp = chrono::Local::now().format("%b %d, %Y");
            blocks.push(RenderedBlock::flow(vec![RenderedLine::plain(
                LineStyle::Footer,
                format!("Last updated: {stamp}"),
            )]));
        }

        RenderedDocument {
            surface_id: target.surface_id(),
            blocks,
            include_photo: target.variant == PhotoVariant::WithPhoto,
        }
    }
}

#[async_trait]
impl RenderSurface for TemplateRenderer {
    async fn rendered(
        &self,
        target: &RenderTarget,
        data: &ResumeData,
    ) -> Result<RenderedDocument, RenderError> {
        Ok(self.render(target, data))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContactInfo, EntryId, Experience, Project, Skill, SkillLevel,
    };
    use crate::templates::TemplateId;

    fn target() -> RenderTarget {
        RenderTarget {
            template: TemplateId::Professional,
            variant: PhotoVariant::WithoutPhoto,
        }
    }

    fn sample_data() -> ResumeData {
        let mut data = ResumeData::new();
        data.contacts = ContactInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0000".into(),
            location: "London".into(),
            website: String::new(),
            linkedin: "linkedin.com/in/ada".into(),
            github: String::new(),
        };
        data.summary = "Analytical engine programmer.".into();
        data.experience.push(Experience {
            id: EntryId::generate(),
            job_title: "Analyst".into(),
            company: "Babbage & Co".into(),
            location: "London".into(),
            start_date: "1842-05".into(),
            end_date: "1843-09".into(),
            is_current_job: false,
            description: "- wrote the **first** program".into(),
        });
        data
    }

    fn headings(doc: &RenderedDocument) -> Vec<String> {
        doc.blocks
            .iter()
            .flat_map(|b| &b.lines)
            .filter(|l| l.style == LineStyle::SectionHeading)
            .map(RenderedLine::text)
            .collect()
    }

    #[test]
    fn test_display_date_month_name() {
        assert_eq!(display_date("2024-03"), "Mar 2024");
        assert_eq!(display_date("1999-12"), "Dec 1999");
    }

    #[test]
    fn test_display_date_passthrough_for_free_text() {
        assert_eq!(display_date("Present"), "Present");
        assert_eq!(display_date("2024-13"), "2024-13");
        assert_eq!(display_date(""), "");
    }

    #[test]
    fn test_empty_sections_emit_no_heading() {
        let renderer = TemplateRenderer::without_date_footer();
        let doc = renderer.render(&target(), &sample_data());
        assert_eq!(
            headings(&doc),
            vec!["Professional Summary", "Work Experience"]
        );
    }

    #[test]
    fn test_section_order_with_all_sections() {
        let mut data = sample_data();
        data.projects.push(Project {
            id: EntryId::generate(),
            name: "Notes".into(),
            description: "Annotated translation.".into(),
            technologies: vec!["Pen".into()],
            url: None,
            github_url: None,
        });
        data.skills.push(Skill {
            id: EntryId::generate(),
            name: "Mathematics".into(),
            level: SkillLevel::Expert,
            category: "Science".into(),
        });
        let renderer = TemplateRenderer::without_date_footer();
        let doc = renderer.render(&target(), &data);
        assert_eq!(
            headings(&doc),
            vec![
                "Professional Summary",
                "Work Experience",
                "Projects",
                "Skills"
            ]
        );
    }

    #[test]
    fn test_current_job_renders_present() {
        let mut data = sample_data();
        data.experience[0].is_current_job = true;
        let renderer = TemplateRenderer::without_date_footer();
        let doc = renderer.render(&target(), &data);
        let all_text: Vec<String> = doc
            .blocks
            .iter()
            .flat_map(|b| &b.lines)
            .map(RenderedLine::text)
            .collect();
        assert!(all_text.contains(&"May 1842 – Present".to_string()));
        assert!(!all_text.iter().any(|t| t.contains("Sep 1843")));
    }

    #[test]
    fn test_bullet_marker_and_bold_span() {
        let renderer = TemplateRenderer::without_date_footer();
        let doc = renderer.render(&target(), &sample_data());
        let bullet = doc
            .blocks
            .iter()
            .flat_map(|b| &b.lines)
            .find(|l| l.style == LineStyle::Bullet)
            .expect("description bullet");
        assert_eq!(bullet.spans[0], InlineSpan::plain("– "));
        assert!(bullet.spans.iter().any(|s| s.bold && s.text == "first"));
    }

    #[test]
    fn test_skills_group_by_category_in_first_appearance_order() {
        let mut data = ResumeData::new();
        for (name, category) in [
            ("Rust", "Languages"),
            ("Postgres", "Databases"),
            ("Go", "Languages"),
            ("Whittling", ""),
        ] {
            data.skills.push(Skill {
                id: EntryId::generate(),
                name: name.into(),
                level: SkillLevel::NotSpecified,
                category: category.into(),
            });
        }
        let renderer = TemplateRenderer::without_date_footer();
        let doc = renderer.render(&target(), &data);
        let skill_lines: Vec<String> = doc
            .blocks
            .last()
            .unwrap()
            .lines
            .iter()
            .map(RenderedLine::text)
            .collect();
        assert_eq!(
            skill_lines,
            vec![
                "Languages: Rust, Go",
                "Databases: Postgres",
                "Other: Whittling"
            ]
        );
    }

    #[test]
    fn test_footer_toggle() {
        let data = sample_data();
        let with = TemplateRenderer::new().render(&target(), &data);
        let without = TemplateRenderer::without_date_footer().render(&target(), &data);
        let has_footer = |doc: &RenderedDocument| {
            doc.blocks
                .iter()
                .flat_map(|b| &b.lines)
                .any(|l| l.style == LineStyle::Footer)
        };
        assert!(has_footer(&with));
        assert!(!has_footer(&without));
    }

    #[test]
    fn test_without_footer_is_deterministic() {
        let renderer = TemplateRenderer::without_date_footer();
        let data = sample_data();
        assert_eq!(
            renderer.render(&target(), &data),
            renderer.render(&target(), &data)
        );
    }

    #[test]
    fn test_photo_flag_follows_variant() {
        let renderer = TemplateRenderer::without_date_footer();
        let data = sample_data();
        let with = RenderTarget {
            template: TemplateId::Modern,
            variant: PhotoVariant::WithPhoto,
        };
        assert!(renderer.render(&with, &data).include_photo);
        assert!(!renderer.render(&target(), &data).include_photo);
    }

    #[test]
    fn test_header_joins_contact_bits() {
        let renderer = TemplateRenderer::without_date_footer();
        let doc = renderer.render(&target(), &sample_data());
        let header: Vec<String> = doc.blocks[0].lines.iter().map(RenderedLine::text).collect();
        assert_eq!(
            header,
            vec![
                "Ada Lovelace",
                "ada@example.com | +44 20 7946 0000 | London",
                "linkedin.com/in/ada"
            ]
        );
    }
}
