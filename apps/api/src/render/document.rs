//! Page-independent drawing model.
//!
//! Templates lay content out top-down in millimetres (origin at the top-left,
//! `y` is the text baseline) and record drawing operations per page. `pdf.rs`
//! turns the recorded pages into a PDF file.

use std::borrow::Cow;

use tracing::warn;

use crate::layout::encoding::drawable_text;
use crate::layout::font_metrics::{text_width_mm, FontStyle};

/// A4 portrait.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
pub const LINK_BLUE: Rgb = Rgb(0.0, 0.0, 1.0);

/// Rectangle in top-left page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        /// Left edge after alignment.
        x: f32,
        baseline: f32,
        text: String,
        style: FontStyle,
        size_pt: f32,
        color: Rgb,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness_mm: f32,
    },
    Link {
        area: Area,
        url: String,
    },
}

/// Recorded pages plus the current text state.
#[derive(Debug)]
pub struct Document {
    pages: Vec<Vec<DrawOp>>,
    style: FontStyle,
    size_pt: f32,
    color: Rgb,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            style: FontStyle::Normal,
            size_pt: 10.0,
            color: BLACK,
        }
    }

    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.style = style;
        self.size_pt = size_pt;
    }

    pub fn set_style(&mut self, style: FontStyle) {
        self.style = style;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Width of `text` in the current font, as it will be drawn.
    pub fn width(&self, text: &str) -> f32 {
        text_width_mm(&drawable_text(text), self.style, self.size_pt)
    }

    /// Draws one line of text anchored at `x` per `align`.
    pub fn text(&mut self, text: &str, x: f32, baseline: f32, align: Align) {
        if text.is_empty() {
            return;
        }
        let text = drawable_text(text);
        if let Cow::Owned(_) = text {
            warn!("Replaced characters the built-in PDF fonts cannot draw");
        }
        let left = match align {
            Align::Left => x,
            Align::Center => x - self.width(&text) / 2.0,
            Align::Right => x - self.width(&text),
        };
        let op = DrawOp::Text {
            x: left,
            baseline,
            text: text.into_owned(),
            style: self.style,
            size_pt: self.size_pt,
            color: self.color,
        };
        self.current_page().push(op);
    }

    /// Draws consecutive lines starting at `baseline`, `leading` mm apart.
    pub fn text_lines(&mut self, lines: &[String], x: f32, baseline: f32, leading: f32) {
        for (i, line) in lines.iter().enumerate() {
            self.text(line, x, baseline + i as f32 * leading, Align::Left);
        }
    }

    pub fn rule(&mut self, x1: f32, x2: f32, y: f32, thickness_mm: f32) {
        self.current_page().push(DrawOp::Rule {
            x1,
            x2,
            y,
            thickness_mm,
        });
    }

    pub fn link(&mut self, area: Area, url: String) {
        self.current_page().push(DrawOp::Link { area, url });
    }

    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    fn current_page(&mut self) -> &mut Vec<DrawOp> {
        // `pages` starts with one page and never shrinks.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_text_x(doc: &Document) -> f32 {
        match &doc.pages()[0][0] {
            DrawOp::Text { x, .. } => *x,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_alignment_offsets() {
        let mut doc = Document::new();
        doc.set_font(FontStyle::Normal, 10.0);
        let w = doc.width("Hello");

        doc.text("Hello", 105.0, 20.0, Align::Center);
        assert!((first_text_x(&doc) - (105.0 - w / 2.0)).abs() < 1e-4);

        let mut doc = Document::new();
        doc.set_font(FontStyle::Normal, 10.0);
        doc.text("Hello", 190.0, 20.0, Align::Right);
        assert!((first_text_x(&doc) - (190.0 - w)).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut doc = Document::new();
        doc.text("", 20.0, 20.0, Align::Left);
        assert!(doc.pages()[0].is_empty());
    }

    #[test]
    fn test_undrawable_characters_are_measured_as_drawn() {
        let mut doc = Document::new();
        doc.set_font(FontStyle::Bold, 22.0);
        let raw = "Zürich → Tokyo ✓ 東京";
        let w = doc.width(raw);
        doc.text(raw, 105.0, 15.0, Align::Center);
        match &doc.pages()[0][0] {
            DrawOp::Text { text, x, .. } => {
                assert_eq!(text, "Zürich -> Tokyo ? ??");
                assert!((w - text_width_mm(text, FontStyle::Bold, 22.0)).abs() < 1e-4);
                assert!((*x - (105.0 - w / 2.0)).abs() < 1e-4);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_ops_go_to_current_page() {
        let mut doc = Document::new();
        doc.text("one", 20.0, 20.0, Align::Left);
        doc.add_page();
        doc.rule(20.0, 190.0, 30.0, 0.2);
        assert_eq!(doc.pages().len(), 2);
        assert_eq!(doc.pages()[0].len(), 1);
        assert!(matches!(doc.pages()[1][0], DrawOp::Rule { .. }));
    }
}
