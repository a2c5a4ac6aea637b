//! Greedy line breaking against measured Helvetica widths.

use crate::layout::encoding::drawable_text;
use crate::layout::font_metrics::{get_metrics, FontStyle};

/// Splits `text` into lines no wider than `max_width_mm`.
///
/// Explicit newlines start a new paragraph (an empty paragraph yields an empty
/// line). Words are packed greedily; a single word wider than the line is
/// broken between characters. Characters the PDF fonts cannot draw are mapped
/// first so the measured lines are the drawn lines.
pub fn split_text_to_size(
    text: &str,
    style: FontStyle,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let metrics = get_metrics(style);
    let fits = |s: &str| metrics.width_mm(s, size_pt) <= max_width_mm;

    let text = drawable_text(text);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if !fits(word) {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut chunks = break_word(word, &fits);
                current = chunks.pop().unwrap_or_default();
                lines.extend(chunks);
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if fits(&candidate) {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        // Non-empty whenever the paragraph had words; blank paragraphs keep their line.
        lines.push(current);
    }
    lines
}

/// Cuts an over-long word into pieces that each fit; at least one char per piece.
fn break_word(word: &str, fits: &impl Fn(&str) -> bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if !fits(&piece) && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
