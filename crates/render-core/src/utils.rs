use crate::types::FontWeight;

/// PDF base-font name for the built-in Helvetica family.
pub fn styled_font_name(weight: FontWeight, italic: bool) -> &'static str {
    match (weight, italic) {
        (FontWeight::Regular, false) => "Helvetica",
        (FontWeight::Bold, false) => "Helvetica-Bold",
        (FontWeight::Regular, true) => "Helvetica-Oblique",
        (FontWeight::Bold, true) => "Helvetica-BoldOblique",
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Maps a character to its WinAnsiEncoding byte, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            '‰' => Some(0x89),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            _ => None,
        },
    }
}

/// Encodes text for a WinAnsi Type1 font. Unmappable characters become `?`
/// and control characters are dropped.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            win_ansi_byte(c).unwrap_or_else(|| {
                log::trace!("No WinAnsi code for {:?}, substituting '?'", c);
                b'?'
            })
        })
        .collect()
}
