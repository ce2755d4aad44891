//! DOCX encoding: a flat block tree built straight from the aggregate,
//! then packed with docx-rs.
//!
//! This encoder is deliberately plainer than the PDF path: dates stay in
//! their stored form, descriptions are emitted as raw text, and skills
//! collapse to one comma-joined line with no category grouping. The two
//! encoders share no intermediate representation.

use std::io::Cursor;

use anyhow::Context;
use docx_rs::{AlignmentType, Docx, Paragraph, Run, Style, StyleType};

use crate::models::ResumeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl DocRun {
    fn plain(text: impl Into<String>) -> Self {
        DocRun {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        DocRun {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    fn italic(text: impl Into<String>) -> Self {
        DocRun {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocBlock {
    /// The document title (the candidate's name), centered.
    Title(String),
    SectionHeading(String),
    Paragraph { align: DocAlign, runs: Vec<DocRun> },
}

impl DocBlock {
    fn line(runs: Vec<DocRun>) -> Self {
        DocBlock::Paragraph {
            align: DocAlign::Left,
            runs,
        }
    }

    fn centered(text: impl Into<String>) -> Self {
        DocBlock::Paragraph {
            align: DocAlign::Center,
            runs: vec![DocRun::plain(text)],
        }
    }

    pub(crate) fn text(&self) -> String {
        match self {
            DocBlock::Title(t) | DocBlock::SectionHeading(t) => t.clone(),
            DocBlock::Paragraph { runs, .. } => {
                runs.iter().map(|r| r.text.as_str()).collect()
            }
        }
    }
}

fn raw_range(start: &str, end: Option<&str>) -> String {
    let end = match end {
        Some(e) if !e.is_empty() => e,
        _ => "Present",
    };
    format!("{start} - {end}")
}

/// Builds the full document as an ordered block list. Read-only over the
/// aggregate; a section with nothing to say contributes no blocks at all.
pub(crate) fn build_blocks(data: &ResumeData) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let c = &data.contacts;

    let name = format!("{} {}", c.first_name, c.last_name)
        .trim()
        .to_string();
    blocks.push(DocBlock::Title(name));
    blocks.push(DocBlock::centered(format!("{} | {}", c.email, c.phone)));
    if !c.location.is_empty() {
        blocks.push(DocBlock::centered(c.location.clone()));
    }
    let links = c.links();
    if !links.is_empty() {
        blocks.push(DocBlock::centered(links.join(" | ")));
    }

    if !data.summary.is_empty() {
        blocks.push(DocBlock::SectionHeading("Professional Summary".into()));
        blocks.push(DocBlock::line(vec![DocRun::plain(data.summary.clone())]));
    }

    if !data.experience.is_empty() {
        blocks.push(DocBlock::SectionHeading("Work Experience".into()));
        for entry in &data.experience {
            blocks.push(DocBlock::line(vec![DocRun::bold(entry.job_title.clone())]));
            blocks.push(DocBlock::line(vec![DocRun::italic(format!(
                "{} - {}",
                entry.company, entry.location
            ))]));
            blocks.push(DocBlock::line(vec![DocRun::plain(raw_range(
                &entry.start_date,
                entry.effective_end(),
            ))]));
            if !entry.description.is_empty() {
                blocks.push(DocBlock::line(vec![DocRun::plain(
                    entry.description.clone(),
                )]));
            }
        }
    }

    if !data.education.is_empty() {
        blocks.push(DocBlock::SectionHeading("Education".into()));
        for entry in &data.education {
            blocks.push(DocBlock::line(vec![DocRun::bold(format!(
                "{} in {}",
                entry.degree, entry.field_of_study
            ))]));
            blocks.push(DocBlock::line(vec![DocRun::italic(
                entry.institution.clone(),
            )]));
            blocks.push(DocBlock::line(vec![DocRun::plain(raw_range(
                &entry.start_date,
                entry.effective_end(),
            ))]));
            if let Some(description) = entry.description.as_deref() {
                if !description.is_empty() {
                    blocks.push(DocBlock::line(vec![DocRun::plain(description)]));
                }
            }
        }
    }

    if !data.skills.is_empty() {
        blocks.push(DocBlock::SectionHeading("Skills".into()));
        let names = data
            .skills
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        blocks.push(DocBlock::line(vec![DocRun::plain(names)]));
    }

    if !data.projects.is_empty() {
        blocks.push(DocBlock::SectionHeading("Projects".into()));
        for entry in &data.projects {
            blocks.push(DocBlock::line(vec![DocRun::bold(entry.name.clone())]));
            if !entry.description.is_empty() {
                blocks.push(DocBlock::line(vec![DocRun::plain(
                    entry.description.clone(),
                )]));
            }
            if !entry.technologies.is_empty() {
                blocks.push(DocBlock::line(vec![DocRun::plain(format!(
                    "Technologies: {}",
                    entry.technologies.join(", ")
                ))]));
            }
            let links: Vec<String> = [
                ("URL: ", entry.url.as_deref()),
                ("GitHub: ", entry.github_url.as_deref()),
            ]
            .into_iter()
            .filter_map(|(label, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{label}{v}"))
            })
            .collect();
            if !links.is_empty() {
                blocks.push(DocBlock::line(vec![DocRun::plain(links.join(" | "))]));
            }
        }
    }

    if !data.certificates.is_empty() {
        blocks.push(DocBlock::SectionHeading("Certificates".into()));
        for entry in &data.certificates {
            blocks.push(DocBlock::line(vec![DocRun::bold(entry.name.clone())]));
            blocks.push(DocBlock::line(vec![DocRun::plain(format!(
                "{} - {}",
                entry.issuer, entry.issue_date
            ))]));
            if let Some(url) = entry.url.as_deref().filter(|u| !u.is_empty()) {
                blocks.push(DocBlock::line(vec![DocRun::plain(format!("URL: {url}"))]));
            }
        }
    }

    blocks
}

fn paragraph_for(block: &DocBlock) -> Paragraph {
    match block {
        DocBlock::Title(text) => Paragraph::new()
            .style("Title")
            .align(AlignmentType::Center)
            .add_run(Run::new().add_text(text.as_str())),
        DocBlock::SectionHeading(text) => Paragraph::new()
            .style("SectionHeading")
            .add_run(Run::new().add_text(text.as_str())),
        DocBlock::Paragraph { align, runs } => {
            let mut paragraph = Paragraph::new();
            if *align == DocAlign::Center {
                paragraph = paragraph.align(AlignmentType::Center);
            }
            for run in runs {
                let mut r = Run::new().add_text(run.text.as_str());
                if run.bold {
                    r = r.bold();
                }
                if run.italic {
                    r = r.italic();
                }
                paragraph = paragraph.add_run(r);
            }
            paragraph
        }
    }
}

/// Encodes the aggregate to DOCX bytes.
pub fn encode_docx(data: &ResumeData) -> anyhow::Result<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .bold()
                .size(48),
        )
        .add_style(
            Style::new("SectionHeading", StyleType::Paragraph)
                .name("Section Heading")
                .bold()
                .size(28),
        );

    for block in build_blocks(data) {
        docx = docx.add_paragraph(paragraph_for(&block));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .context("packing DOCX archive")?;
    Ok(cursor.into_inner())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
