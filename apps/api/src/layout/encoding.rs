//! Characters the built-in PDF fonts can draw.
//!
//! The base-14 Helvetica faces are written with WinAnsiEncoding; anything
//! outside it would be dropped by the writer while still being measured.
//! Text is mapped here before it is wrapped, measured or drawn.

use std::borrow::Cow;

/// The 0x80..=0x9F block of Windows-1252 that is not Latin-1.
const CP1252_EXTRAS: &[char] = &[
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}', '\u{02C6}',
    '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}', '\u{2019}', '\u{201C}',
    '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}',
    '\u{0153}', '\u{017E}', '\u{0178}',
];

fn is_drawable(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) || CP1252_EXTRAS.contains(&c)
}

fn substitute(c: char) -> &'static str {
    match c {
        '\r' => "",
        '\t' | '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{202F}' => " ",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => "-",
        '\u{2192}' => "->",
        '\u{2190}' => "<-",
        '\u{21D2}' => "=>",
        '\u{2264}' => "<=",
        '\u{2265}' => ">=",
        '\u{2032}' => "'",
        '\u{2033}' => "\"",
        _ => "?",
    }
}

fn keep(c: char) -> bool {
    c == '\n' || is_drawable(c)
}

/// `text` with every character outside WinAnsi replaced by an ASCII stand-in
/// (`?` when there is none). Line breaks are kept for the wrapper. Borrows
/// when nothing needs replacing.
pub fn drawable_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(keep) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if keep(c) {
            out.push(c);
        } else {
            out.push_str(substitute(c));
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_and_cp1252_pass_through() {
        let text = "José Müller \u{2022} 2019\u{2013}2021 \u{201C}quoted\u{201D} \u{20AC}5";
        assert!(matches!(drawable_text(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unmappable_characters_are_replaced() {
        assert_eq!(drawable_text("Zürich → Tokyo ✓ 東京"), "Zürich -> Tokyo ? ??");
        assert_eq!(drawable_text("José 東京 🚀"), "José ?? ?");
        assert_eq!(drawable_text("a\tb \u{2264} c"), "a b <= c");
        assert_eq!(drawable_text("one\r\ntwo"), "one\ntwo");
    }
}
