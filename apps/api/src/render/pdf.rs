//! Writes recorded `Document` pages with printpdf's built-in Helvetica faces.

use printpdf::{
    Actions, BuiltinFont, Color, HighlightingMode, IndirectFontRef, Line, LinkAnnotation, Mm,
    PdfDocument, PdfLayerReference, Point, Rect,
};

use crate::errors::AppError;
use crate::layout::font_metrics::{FontStyle, MM_PER_PT};
use crate::render::document::{Document, DrawOp, Rgb, BLACK, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const LAYER: &str = "Layer 1";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.oblique,
        }
    }
}

fn render_err(e: printpdf::Error) -> AppError {
    AppError::Render(e.to_string())
}

fn pdf_color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(rgb.0, rgb.1, rgb.2, None))
}

/// Top-left `y` in mm to PDF user space (origin bottom-left).
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y)
}

/// Serialises every page of `doc` into a PDF file.
pub fn to_pdf_bytes(doc: &Document, title: &str) -> Result<Vec<u8>, AppError> {
    let (pdf, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);

    let fonts = Fonts {
        regular: pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?,
        bold: pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_err)?,
        oblique: pdf
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(render_err)?,
    };

    let mut layer = pdf.get_page(first_page).get_layer(first_layer);
    for (idx, ops) in doc.pages().iter().enumerate() {
        if idx > 0 {
            let (page, page_layer) = pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);
            layer = pdf.get_page(page).get_layer(page_layer);
        }
        draw_page(&layer, ops, &fonts);
    }

    pdf.save_to_bytes().map_err(render_err)
}

fn draw_page(layer: &PdfLayerReference, ops: &[DrawOp], fonts: &Fonts) {
    for op in ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                text,
                style,
                size_pt,
                color,
            } => {
                layer.set_fill_color(pdf_color(*color));
                layer.use_text(text.as_str(), *size_pt, Mm(*x), flip(*baseline), fonts.get(*style));
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness_mm,
            } => {
                layer.set_outline_color(pdf_color(BLACK));
                layer.set_outline_thickness(thickness_mm / MM_PER_PT);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1), flip(*y)), false),
                        (Point::new(Mm(*x2), flip(*y)), false),
                    ],
                    is_closed: false,
                });
            }
            DrawOp::Link { area, url } => {
                let rect = Rect::new(
                    Mm(area.x),
                    flip(area.top + area.height),
                    Mm(area.x + area.width),
                    flip(area.top),
                );
                layer.add_link_annotation(LinkAnnotation::new(
                    rect,
                    None,
                    None,
                    Actions::uri(url.clone()),
                    Some(HighlightingMode::Invert),
                ));
            }
        }
    }
}
