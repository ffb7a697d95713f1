//! Advance widths for the standard-14 Helvetica faces.
//!
//! Widths are in 1/1000 em, taken from the Adobe AFM files for the printable
//! ASCII range. Oblique faces share the upright widths.

use crate::types::{FontWeight, TextStyle};

const FIRST_CHAR: u32 = 32;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of one character in 1/1000 em.
pub fn char_width(c: char, weight: FontWeight) -> u16 {
    let bold = weight == FontWeight::Bold;
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let code = c as u32;
    if (FIRST_CHAR..FIRST_CHAR + table.len() as u32).contains(&code) {
        return table[(code - FIRST_CHAR) as usize];
    }
    match c {
        '\u{a0}' => 278,
        '•' => 350,
        '…' | '—' | '‰' => 1000,
        '–' => 556,
        '‘' | '’' | '‚' => {
            if bold {
                278
            } else {
                222
            }
        }
        '“' | '”' | '„' => {
            if bold {
                500
            } else {
                333
            }
        }
        // Everything else (accented Latin-1, unmapped glyphs) measures as `n`.
        _ => {
            if bold {
                611
            } else {
                556
            }
        }
    }
}

/// Width of `text` in points when set in `style`.
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    let units: u32 = text
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| char_width(c, style.weight) as u32)
        .sum();
    units as f32 * style.font_size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_widths_match_afm() {
        assert_eq!(char_width(' ', FontWeight::Regular), 278);
        assert_eq!(char_width('A', FontWeight::Regular), 667);
        assert_eq!(char_width('A', FontWeight::Bold), 722);
        assert_eq!(char_width('i', FontWeight::Regular), 222);
        assert_eq!(char_width('W', FontWeight::Regular), 944);
        assert_eq!(char_width('~', FontWeight::Bold), 584);
        assert_eq!(char_width('@', FontWeight::Regular), 1015);
    }

    #[test]
    fn text_width_scales_with_size() {
        let style = TextStyle::new(10.0);
        // "nn" = 2 * 556 units at 10pt
        assert!((text_width("nn", &style) - 11.12).abs() < 1e-4);
        let bold = TextStyle::new(20.0).bold();
        assert!((text_width("n", &bold) - 12.22).abs() < 1e-4);
    }

    #[test]
    fn unknown_glyphs_fall_back() {
        assert_eq!(char_width('é', FontWeight::Regular), 556);
        assert_eq!(char_width('•', FontWeight::Bold), 350);
    }
}
