//! Description markup: the small subset of inline syntax accepted in
//! free-text description fields.
//!
//! Lines starting with `- ` or `• ` are bullets; everything else is a plain
//! paragraph line. Within a line, `**text**` is bold and `*text*` is italic.
//! An unmatched marker is kept as literal text, never an error.

use serde::{Deserialize, Serialize};

/// One styled run of text within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineSpan {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        InlineSpan {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Paragraph,
    Bullet,
}

/// One parsed line of a description field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupLine {
    pub kind: LineKind,
    pub spans: Vec<InlineSpan>,
}

impl MarkupLine {
    /// The line's text with styling stripped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Parses a description field into lines. Blank lines are dropped.
pub fn parse_description(text: &str) -> Vec<MarkupLine> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (kind, rest) = if let Some(rest) = line.strip_prefix("- ") {
                (LineKind::Bullet, rest)
            } else if let Some(rest) = line.strip_prefix("• ") {
                (LineKind::Bullet, rest)
            } else {
                (LineKind::Paragraph, line)
            };
            MarkupLine {
                kind,
                spans: parse_inline(rest),
            }
        })
        .collect()
}

/// Splits a line into styled spans. `**` binds before `*`, so `**x**` is
/// bold rather than two empty italics.
fn parse_inline(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            match after.find("**") {
                Some(end) => {
                    flush_plain(&mut spans, &mut plain);
                    spans.push(InlineSpan::bold(&after[..end]));
                    rest = &after[end + 2..];
                }
                // An unclosed `**` stays literal; never let its second `*`
                // pair up with a later single-star marker.
                None => {
                    plain.push_str("**");
                    rest = after;
                }
            }
            continue;
        }
        if let Some(after) = rest.strip_prefix('*') {
            // A lone `*` with no closing partner stays literal.
            if let Some(end) = after.find('*') {
                flush_plain(&mut spans, &mut plain);
                spans.push(InlineSpan::italic(&after[..end]));
                rest = &after[end + 1..];
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }
    flush_plain(&mut spans, &mut plain);
    spans
}

fn flush_plain(spans: &mut Vec<InlineSpan>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(InlineSpan::plain(std::mem::take(plain)));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
