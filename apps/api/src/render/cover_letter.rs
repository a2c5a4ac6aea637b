use std::io::Cursor;

use docx_rs::{Docx, LineSpacing, Paragraph, Run};

use crate::errors::AppError;
use crate::layout::font_metrics::FontStyle;
use crate::layout::wrap::split_text_to_size;
use crate::render::document::{Align, Document};

const MARGIN: f32 = 20.0;
const WIDTH: f32 = 170.0;
const FONT_SIZE: f32 = 11.0;
const LEADING: f32 = 6.0;
const PARAGRAPH_GAP: f32 = 4.0;
const BOTTOM_LIMIT: f32 = 277.0;

/// Space after each Word paragraph, in twips.
const DOCX_PARAGRAPH_AFTER: u32 = 200;

pub const COVER_LETTER_FILE_NAME: &str = "Cover_Letter.pdf";
pub const COVER_LETTER_DOCX_FILE_NAME: &str = "Cover_Letter.docx";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Plain letter layout: every input line is a paragraph, blank lines only
/// add spacing.
pub fn layout_cover_letter(text: &str) -> Document {
    let mut doc = Document::new();
    doc.set_font(FontStyle::Normal, FONT_SIZE);
    let mut y = MARGIN;

    for paragraph in text.trim().lines() {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            y += PARAGRAPH_GAP;
            continue;
        }
        for line in split_text_to_size(paragraph, FontStyle::Normal, FONT_SIZE, WIDTH) {
            if y > BOTTOM_LIMIT {
                doc.add_page();
                y = MARGIN;
            }
            doc.text(&line, MARGIN, y, Align::Left);
            y += LEADING;
        }
        y += PARAGRAPH_GAP;
    }

    doc
}

/// One Word paragraph per input line, blank lines included.
fn docx_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n').map(|line| line.trim_end_matches('\r')).collect()
}

/// The letter as a Word document.
pub fn render_cover_letter_docx(text: &str) -> Result<Vec<u8>, AppError> {
    let docx = docx_paragraphs(text)
        .into_iter()
        .fold(Docx::new(), |docx, line| {
            docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(line))
                    .line_spacing(LineSpacing::new().after(DOCX_PARAGRAPH_AFTER)),
            )
        });

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| AppError::Render(format!("docx packing failed: {e}")))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::DrawOp;

    fn baselines(doc: &Document, page: usize) -> Vec<f32> {
        doc.pages()[page]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { baseline, .. } => Some(*baseline),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_paragraphs_are_spaced() {
        let doc = layout_cover_letter("Dear Hiring Manager,\n\nI am writing to apply.");
        assert_eq!(doc.pages().len(), 1);
        // 20, then +6 leading +4 gap, +4 for the blank line.
        assert_eq!(baselines(&doc, 0), vec![20.0, 34.0]);
    }

    #[test]
    fn test_long_letter_breaks_pages() {
        let text = vec!["A paragraph of a rather long cover letter."; 60].join("\n");
        let doc = layout_cover_letter(&text);
        assert!(doc.pages().len() > 1);
        assert_eq!(baselines(&doc, 1)[0], MARGIN);
        assert!(baselines(&doc, 0).iter().all(|y| *y <= BOTTOM_LIMIT));
    }

    #[test]
    fn test_lines_fit_text_column() {
        let text = "word ".repeat(200);
        let doc = layout_cover_letter(&text);
        for op in doc.pages().iter().flatten() {
            if let DrawOp::Text { text, .. } = op {
                let width = crate::layout::font_metrics::text_width_mm(text, FontStyle::Normal, FONT_SIZE);
                assert!(width <= WIDTH + 1e-3, "{text} is {width}mm");
            }
        }
    }

    #[test]
    fn test_docx_keeps_blank_lines_as_paragraphs() {
        assert_eq!(
            docx_paragraphs("Dear team,\r\n\nThank you.\nAda"),
            vec!["Dear team,", "", "Thank you.", "Ada"]
        );
    }

    #[test]
    fn test_docx_is_a_zip_package() {
        let bytes = render_cover_letter_docx("Dear Hiring Manager,\n\nThank you.").unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }
}
