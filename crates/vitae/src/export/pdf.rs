//! PDF encoding: word-wrap the rendered document against the static font
//! metrics, fill pages, and draw with printpdf's builtin faces.
//!
//! Pagination honors `keep_together`: a block that no longer fits on the
//! current page moves whole to a fresh page when it can, and only splits
//! when it is taller than a full page by itself.

use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, Rgb,
};

use crate::layout::metrics::{default_page_config, get_metrics, FontFamily, PageConfig};
use crate::layout::{LineStyle, RenderedDocument};
use crate::photo::Photo;
use crate::templates::TemplateId;

// ────────────────────────────────────────────────────────────────────────────
// Wrapping and pagination
// ────────────────────────────────────────────────────────────────────────────

/// One word with its resolved styling, ready to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

/// One physical line of output after wrapping.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VisualLine {
    pub style: LineStyle,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone)]
struct LaidBlock {
    keep_together: bool,
    lines: Vec<VisualLine>,
}

fn style_size_pt(style: LineStyle, config: &PageConfig) -> f32 {
    let body = config.font_size_pt as f32;
    match style {
        LineStyle::Name => body * 1.8,
        LineStyle::SectionHeading => body * 1.2,
        LineStyle::ItemTitle => body * 1.05,
        LineStyle::Contact | LineStyle::ItemMeta => body * 0.95,
        LineStyle::Body | LineStyle::Bullet => body,
        LineStyle::Footer => body * 0.8,
    }
}

fn line_height_pt(style: LineStyle, config: &PageConfig) -> f32 {
    style_size_pt(style, config) * config.line_height_factor
}

/// Wraps every rendered line at the page's text width, preserving span
/// styling at word granularity.
fn lay_out(doc: &RenderedDocument, config: &PageConfig) -> Vec<LaidBlock> {
    let metrics = get_metrics(config.font);
    let max_width_pt = config.text_width_em * config.font_size_pt as f32;

    doc.blocks
        .iter()
        .filter(|block| !block.lines.is_empty())
        .map(|block| {
            let mut lines = Vec::new();
            for line in &block.lines {
                let size = style_size_pt(line.style, config);
                let heading_bold =
                    matches!(line.style, LineStyle::Name | LineStyle::SectionHeading);
                let words: Vec<Token> = line
                    .spans
                    .iter()
                    .flat_map(|span| {
                        span.text.split_whitespace().map(move |w| Token {
                            text: w.to_string(),
                            bold: span.bold || heading_bold,
                            italic: span.italic,
                        })
                    })
                    .collect();
                if words.is_empty() {
                    continue;
                }

                let space_w = metrics.space_width * size;
                let mut current: Vec<Token> = Vec::new();
                let mut width = 0.0_f32;
                for word in words {
                    let word_w = metrics.measure_str(&word.text) * size;
                    if !current.is_empty() && width + space_w + word_w > max_width_pt {
                        lines.push(VisualLine {
                            style: line.style,
                            tokens: std::mem::take(&mut current),
                        });
                        width = word_w;
                    } else {
                        if !current.is_empty() {
                            width += space_w;
                        }
                        width += word_w;
                    }
                    current.push(word);
                }
                if !current.is_empty() {
                    lines.push(VisualLine {
                        style: line.style,
                        tokens: current,
                    });
                }
            }
            LaidBlock {
                keep_together: block.keep_together,
                lines,
            }
        })
        .filter(|block| !block.lines.is_empty())
        .collect()
}

fn block_height_pt(block: &LaidBlock, config: &PageConfig) -> f32 {
    block
        .lines
        .iter()
        .map(|l| line_height_pt(l.style, config))
        .sum()
}

/// Greedy page fill over laid-out blocks.
pub(crate) fn paginate(doc: &RenderedDocument, config: &PageConfig) -> Vec<Vec<VisualLine>> {
    let blocks = lay_out(doc, config);
    let page_height = config.usable_height_pt();
    let gap = config.line_height_pt() * 0.6;

    let mut pages: Vec<Vec<VisualLine>> = vec![Vec::new()];
    let mut used = 0.0_f32;

    for block in blocks {
        let height = block_height_pt(&block, config);
        let fits_here = used + height <= page_height;
        let fits_fresh = height <= page_height;

        if !fits_here && block.keep_together && fits_fresh && used > 0.0 {
            pages.push(Vec::new());
            used = 0.0;
        }

        for line in block.lines {
            let line_h = line_height_pt(line.style, config);
            if used + line_h > page_height && !pages.last().unwrap().is_empty() {
                pages.push(Vec::new());
                used = 0.0;
            }
            used += line_h;
            pages.last_mut().unwrap().push(line);
        }
        used += gap;
    }
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Drawing
// ────────────────────────────────────────────────────────────────────────────

struct FaceSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl FaceSet {
    fn pick(&self, bold: bool, italic: bool) -> &IndirectFontRef {
        match (bold, italic) {
            (true, true) => &self.bold_italic,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (false, false) => &self.regular,
        }
    }
}

fn builtin_faces(font: FontFamily) -> [BuiltinFont; 4] {
    match font {
        FontFamily::Helvetica => [
            BuiltinFont::Helvetica,
            BuiltinFont::HelveticaBold,
            BuiltinFont::HelveticaOblique,
            BuiltinFont::HelveticaBoldOblique,
        ],
        FontFamily::TimesRoman => [
            BuiltinFont::TimesRoman,
            BuiltinFont::TimesBold,
            BuiltinFont::TimesItalic,
            BuiltinFont::TimesBoldItalic,
        ],
        FontFamily::Courier => [
            BuiltinFont::Courier,
            BuiltinFont::CourierBold,
            BuiltinFont::CourierOblique,
            BuiltinFont::CourierBoldOblique,
        ],
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt as f64 * 0.352_778)
}

/// Encodes a rendered document to PDF bytes. `photo` is embedded on the
/// first page when the document asks for it.
pub fn encode_pdf(
    doc: &RenderedDocument,
    template: TemplateId,
    photo: Option<&Photo>,
) -> anyhow::Result<Vec<u8>> {
    let family = FontFamily::for_template(template);
    let config = default_page_config(family);
    let metrics = get_metrics(family);
    let pages = paginate(doc, &config);

    let page_w = pt_to_mm(config.page_width_pt);
    let page_h = pt_to_mm(config.page_height_pt);
    let (pdf, first_page, first_layer) = PdfDocument::new("Resume", page_w, page_h, "Layer 1");

    let [regular, bold, italic, bold_italic] = builtin_faces(family);
    let faces = FaceSet {
        regular: pdf.add_builtin_font(regular)?,
        bold: pdf.add_builtin_font(bold)?,
        italic: pdf.add_builtin_font(italic)?,
        bold_italic: pdf.add_builtin_font(bold_italic)?,
    };

    let gap = config.line_height_pt() * 0.6;
    let footer_gray = Color::Rgb(Rgb::new(0.45, 0.45, 0.45, None));
    let black = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                pdf.add_page(page_w, page_h, format!("Layer {}", index + 1));
            pdf.get_page(page_ref).get_layer(layer_ref)
        };

        let mut y_from_top = config.margin_pt;
        let mut previous_style: Option<LineStyle> = None;

        for line in page {
            let size = style_size_pt(line.style, &config);
            // Insert the inter-block gap whenever the visual role changes.
            if previous_style.is_some() && previous_style != Some(line.style) {
                y_from_top += gap;
            }
            y_from_top += line_height_pt(line.style, &config);
            previous_style = Some(line.style);

            if line.style == LineStyle::Footer {
                layer.set_fill_color(footer_gray.clone());
            } else {
                layer.set_fill_color(black.clone());
            }

            let baseline = pt_to_mm(config.page_height_pt - y_from_top);
            let mut x_pt = config.margin_pt;
            for token in &line.tokens {
                let font = faces.pick(token.bold, token.italic);
                layer.use_text(token.text.clone(), size as f64, pt_to_mm(x_pt), baseline, font);
                x_pt += (metrics.measure_str(&token.text) + metrics.space_width) * size;
            }
        }
    }

    if doc.include_photo {
        if let Some(photo) = photo {
            let bytes = photo.decode_bytes()?;
            let dynamic = printpdf::image_crate::load_from_memory(&bytes)?;
            let image = Image::from_dynamic_image(&dynamic);
            let layer = pdf.get_page(first_page).get_layer(first_layer);
            // Top-right corner, inside the margins.
            let slot_pt = 90.0_f32;
            image.add_to_layer(
                layer,
                ImageTransform {
                    translate_x: Some(pt_to_mm(
                        config.page_width_pt - config.margin_pt - slot_pt,
                    )),
                    translate_y: Some(pt_to_mm(
                        config.page_height_pt - config.margin_pt - slot_pt,
                    )),
                    ..Default::default()
                },
            );
        }
    }

    Ok(pdf.save_to_bytes()?)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{InlineSpan, RenderedBlock, RenderedLine};

    fn config() -> PageConfig {
        default_page_config(FontFamily::Helvetica)
    }

    fn body_block(keep: bool, lines: usize) -> RenderedBlock {
        let line = RenderedLine::plain(LineStyle::Body, "steady work on one line");
        RenderedBlock {
            keep_together: keep,
            lines: vec![line; lines],
        }
    }

    fn doc_of(blocks: Vec<RenderedBlock>) -> RenderedDocument {
        RenderedDocument {
            surface_id: "test".into(),
            blocks,
            include_photo: false,
        }
    }

    #[test]
    fn test_everything_fits_on_one_page() {
        let doc = doc_of(vec![body_block(true, 3), body_block(true, 4)]);
        let pages = paginate(&doc, &config());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 7);
    }

    #[test]
    fn test_long_line_wraps_into_several_visual_lines() {
        let text = "word ".repeat(120);
        let doc = doc_of(vec![RenderedBlock::flow(vec![RenderedLine::plain(
            LineStyle::Body,
            text.trim(),
        )])]);
        let pages = paginate(&doc, &config());
        assert!(pages[0].len() > 1, "120 words cannot fit one line");
        let rejoined: Vec<String> = pages
            .iter()
            .flatten()
            .flat_map(|l| l.tokens.iter().map(|t| t.text.clone()))
            .collect();
        assert_eq!(rejoined.len(), 120, "no word lost or duplicated");
    }

    #[test]
    fn test_keep_together_block_moves_to_a_fresh_page() {
        // Fill most of the page, then add a keep-together block that cannot
        // fit in the remainder but fits a fresh page.
        let cfg = config();
        let per_line = cfg.font_size_pt as f32 * cfg.line_height_factor;
        let lines_per_page = (cfg.usable_height_pt() / per_line) as usize;

        let filler = body_block(false, lines_per_page - 3);
        let moved = body_block(true, 8);
        let pages = paginate(&doc_of(vec![filler, moved]), &cfg);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), lines_per_page - 3, "no partial block on page one");
        assert_eq!(pages[1].len(), 8);
    }

    #[test]
    fn test_block_taller_than_a_page_splits_anyway() {
        let cfg = config();
        let per_line = cfg.font_size_pt as f32 * cfg.line_height_factor;
        let lines_per_page = (cfg.usable_height_pt() / per_line) as usize;

        let giant = body_block(true, lines_per_page * 2 + 5);
        let pages = paginate(&doc_of(vec![giant]), &cfg);
        assert!(pages.len() >= 2);
        let total: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(total, lines_per_page * 2 + 5);
    }

    #[test]
    fn test_heading_words_become_bold_tokens() {
        let doc = doc_of(vec![RenderedBlock::flow(vec![RenderedLine::plain(
            LineStyle::SectionHeading,
            "Work Experience",
        )])]);
        let pages = paginate(&doc, &config());
        assert!(pages[0][0].tokens.iter().all(|t| t.bold));
    }

    #[test]
    fn test_span_styles_survive_wrapping() {
        let line = RenderedLine {
            style: LineStyle::Body,
            spans: vec![
                InlineSpan::plain("before "),
                InlineSpan::bold("emphasized"),
                InlineSpan::italic(" after"),
            ],
        };
        let doc = doc_of(vec![RenderedBlock::flow(vec![line])]);
        let pages = paginate(&doc, &config());
        let tokens = &pages[0][0].tokens;
        assert_eq!(tokens[0], Token { text: "before".into(), bold: false, italic: false });
        assert_eq!(tokens[1], Token { text: "emphasized".into(), bold: true, italic: false });
        assert_eq!(tokens[2], Token { text: "after".into(), bold: false, italic: true });
    }

    #[test]
    fn test_empty_document_still_encodes() {
        let doc = doc_of(vec![]);
        let bytes = encode_pdf(&doc, TemplateId::Modern, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_encode_all_three_templates() {
        let doc = doc_of(vec![RenderedBlock::flow(vec![RenderedLine::plain(
            LineStyle::Name,
            "Ada Lovelace",
        )])]);
        for template in TemplateId::ALL {
            let bytes = encode_pdf(&doc, template, None).unwrap();
            assert!(bytes.starts_with(b"%PDF"), "{template} output not a PDF");
        }
    }
}
