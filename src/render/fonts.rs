//! Standard Helvetica fonts: names, metrics and the text encoding
//!
//! The four Helvetica faces are part of the PDF standard-14 set, so nothing
//! is embedded. Text is encoded as Windows-1254: WinAnsi with six slots
//! swapped for the Turkish letters, declared in each font's `/Differences`. Widths are the Adobe AFM advance widths (1/1000 em) for the
//! printable ASCII range; the oblique faces share their upright widths.

use pdf_writer::Name;

use crate::models::FontStyle;

/// Advance widths for U+0020..=U+007E, Helvetica
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths for U+0020..=U+007E, Helvetica-Bold
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for anything outside printable ASCII
const FALLBACK_WIDTH: u16 = 556;

/// Byte written for characters the encoding cannot represent
const REPLACEMENT: u8 = b'?';

/// Slots where Windows-1254 departs from WinAnsi, with their glyph names
pub const TURKISH_DIFFERENCES: [(u8, &[u8]); 6] = [
    (0xD0, b"Gbreve"),
    (0xDD, b"Idotaccent"),
    (0xDE, b"Scedilla"),
    (0xF0, b"gbreve"),
    (0xFD, b"dotlessi"),
    (0xFE, b"scedilla"),
];

/// Resource name of a face on every page
pub fn resource_name(style: FontStyle) -> Name<'static> {
    match style {
        FontStyle::Regular => Name(b"F1"),
        FontStyle::Bold => Name(b"F2"),
        FontStyle::Italic => Name(b"F3"),
        FontStyle::BoldItalic => Name(b"F4"),
    }
}

/// PostScript name of a face
pub fn base_font(style: FontStyle) -> Name<'static> {
    match style {
        FontStyle::Regular => Name(b"Helvetica"),
        FontStyle::Bold => Name(b"Helvetica-Bold"),
        FontStyle::Italic => Name(b"Helvetica-Oblique"),
        FontStyle::BoldItalic => Name(b"Helvetica-BoldOblique"),
    }
}

/// All faces, in resource-name order
pub const ALL_STYLES: [FontStyle; 4] = [
    FontStyle::Regular,
    FontStyle::Bold,
    FontStyle::Italic,
    FontStyle::BoldItalic,
];

fn char_width(style: FontStyle, c: char) -> u16 {
    let bold = style.is_bold();
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    match c {
        ' '..='~' => table[(c as u32 - 0x20) as usize],
        'Ğ' => 778,
        'İ' | 'ı' => 278,
        'Ş' => 667,
        'ğ' if bold => 611,
        'ğ' => 556,
        'ş' if bold => 556,
        'ş' => 500,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at `size`
pub fn text_width(text: &str, style: FontStyle, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(style, c))).sum();
    units as f32 * size / 1000.0
}

/// Encode text as Windows-1254 bytes
pub fn encode_cp1254(text: &str) -> Vec<u8> {
    text.chars().map(cp1254_byte).collect()
}

fn cp1254_byte(c: char) -> u8 {
    match c {
        '\t' => b' ',
        ' '..='~' => c as u8,
        'Ğ' => 0xD0,
        'İ' => 0xDD,
        'Ş' => 0xDE,
        'ğ' => 0xF0,
        'ı' => 0xFD,
        'ş' => 0xFE,
        // Latin-1 letters whose slots carry the Turkish glyphs
        'Ð' | 'Ý' | 'Þ' | 'ð' | 'ý' | 'þ' => REPLACEMENT,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => REPLACEMENT,
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`
///
/// Explicit newlines always break. A single word wider than the line is
/// split by character.
pub fn wrap_text(text: &str, style: FontStyle, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, style, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            for c in word.chars() {
                current.push(c);
                if text_width(&current, style, size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Hi" = H(722) + i(222)
        let width = text_width("Hi", FontStyle::Regular, 10.0);
        assert!((width - 9.44).abs() < 1e-4);

        // bold i is wider
        assert!(text_width("i", FontStyle::Bold, 10.0) > text_width("i", FontStyle::Regular, 10.0));
        assert_eq!(
            text_width("abc", FontStyle::Italic, 12.0),
            text_width("abc", FontStyle::Regular, 12.0)
        );
    }

    #[test]
    fn test_encode_cp1254() {
        assert_eq!(encode_cp1254("A b"), b"A b".to_vec());
        assert_eq!(encode_cp1254("é€"), vec![0xE9, 0x80]);
        assert_eq!(encode_cp1254("漢"), vec![b'?']);
        assert_eq!(encode_cp1254("Þ"), vec![b'?']);
    }

    #[test]
    fn test_turkish_letters_are_encoded() {
        assert_eq!(
            encode_cp1254("Şirket Ağaç İşçi ı"),
            vec![
                0xDE, b'i', b'r', b'k', b'e', b't', b' ', b'A', 0xF0, b'a', 0xE7, b' ', 0xDD,
                0xFE, 0xE7, b'i', b' ', 0xFD,
            ]
        );
        for (slot, _) in TURKISH_DIFFERENCES {
            assert!(encode_cp1254("ĞİŞğış").contains(&slot));
        }
    }

    #[test]
    fn test_turkish_widths() {
        assert!((text_width("ı", FontStyle::Regular, 1000.0) - 278.0).abs() < 1e-3);
        assert!((text_width("ş", FontStyle::Bold, 1000.0) - 556.0).abs() < 1e-3);
        assert!((text_width("Ğ", FontStyle::Regular, 1000.0) - 778.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_on_words() {
        let lines = wrap_text("alpha beta gamma", FontStyle::Regular, 10.0, 60.0);
        assert!(lines.len() >= 2);
        assert!(lines
            .iter()
            .all(|l| text_width(l, FontStyle::Regular, 10.0) <= 60.0));
        assert_eq!(lines.join(" "), "alpha beta gamma");
    }

    #[test]
    fn test_wrap_keeps_explicit_breaks() {
        let lines = wrap_text("one\ntwo", FontStyle::Regular, 10.0, 500.0);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let lines = wrap_text("abcdefghijklmnop", FontStyle::Regular, 10.0, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "abcdefghijklmnop");
    }

    #[test]
    fn test_wrap_empty_text_is_one_line() {
        assert_eq!(wrap_text("", FontStyle::Regular, 10.0, 50.0), vec![""]);
    }
}
