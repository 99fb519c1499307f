//! Metrics and encoding for the three built-in Type1 fonts the engine uses.
//! Widths are the standard Helvetica AFM values at 1000 units/em, collapsed
//! into range buckets; no font files are read or embedded.

/// Ascender height as a fraction of the font size, used for vertical
/// centering of single text lines.
pub(crate) const ASCENT: f32 = 0.718;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Font {
    /// Resource name inside page font dictionaries.
    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
        }
    }

    pub(crate) fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    fn char_width_1000(self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte < 32 {
            return 0.0;
        }
        match self {
            // Oblique shares the upright widths.
            Font::Helvetica | Font::HelveticaOblique => regular_width(byte),
            Font::HelveticaBold => bold_width(byte),
        }
    }

    /// Advance width of `text` at `size` points, measured with the same
    /// tables the renderer lays out with.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * size / 1000.0)
            .sum()
    }
}

fn regular_width(byte: u8) -> f32 {
    match byte {
        32 => 278.0,                          // space
        33..=47 => 333.0,                     // punctuation
        48..=57 => 556.0,                     // digits
        58..=64 => 333.0,                     // more punctuation
        73 | 74 => 278.0,                     // I J (narrow uppercase)
        77 | 87 => 833.0,                     // M W (wide)
        65..=90 => 667.0,                     // uppercase average
        91..=96 => 333.0,                     // brackets etc.
        102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
        109 | 119 => 833.0,                   // m w
        97..=122 => 556.0,                    // lowercase average
        _ => 556.0,
    }
}

fn bold_width(byte: u8) -> f32 {
    match byte {
        32 => 278.0,
        33..=47 => 333.0,
        48..=57 => 556.0,
        58..=64 => 333.0,
        73 => 278.0,                          // I
        77 | 87 => 944.0,                     // M W
        65..=90 => 722.0,
        91..=96 => 333.0,
        102 | 105 | 106 | 108 | 116 => 333.0,
        109 | 119 => 889.0,
        97..=122 => 611.0,
        _ => 556.0,
    }
}

/// Map a single Unicode char to its WinAnsi (Windows-1252) byte, or 0 if
/// unmappable. Bytes 0x80-0x9F carry the remapped typographic characters;
/// everything else matches the Unicode codepoint directly.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80, // €
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85, // …
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes for PDF Str encoding.
/// Unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b >= 32)
        .collect()
}
