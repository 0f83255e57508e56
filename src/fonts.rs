//! Font registry and text measurement.
//!
//! Standard PDF fonts are referenced by name and measured with built-in AFM
//! widths. Custom TTF/OTF files are parsed with `ttf-parser` for metrics and
//! embedded in the generated PDF.

use std::collections::HashMap;
use std::path::Path;

use printpdf::BuiltinFont;

use crate::error::{FlashcardError, Result};

/// Where the glyphs of a font come from.
#[derive(Clone, Debug)]
pub enum FontKind {
    /// One of the standard PDF fonts every viewer ships with.
    Builtin(BuiltinFont),
    /// Raw TTF/OTF bytes, embedded in the output.
    Embedded(Vec<u8>),
}

/// A usable font with the metrics needed for card layout.
#[derive(Clone, Debug)]
pub struct FontData {
    pub kind: FontKind,
    pub units_per_em: f32,
    pub ascender: f32,
    pub descender: f32,
}

impl FontData {
    fn builtin(font: BuiltinFont) -> Self {
        let (ascender, descender) = match font {
            BuiltinFont::Courier
            | BuiltinFont::CourierBold
            | BuiltinFont::CourierOblique
            | BuiltinFont::CourierBoldOblique => (629.0, -157.0),
            BuiltinFont::TimesRoman
            | BuiltinFont::TimesBold
            | BuiltinFont::TimesItalic
            | BuiltinFont::TimesBoldItalic => (683.0, -217.0),
            _ => (718.0, -207.0),
        };
        Self {
            kind: FontKind::Builtin(font),
            units_per_em: 1000.0,
            ascender,
            descender,
        }
    }

    fn from_bytes(bytes: Vec<u8>) -> std::result::Result<Self, String> {
        let face = ttf_parser::Face::parse(&bytes, 0).map_err(|e| e.to_string())?;
        let units_per_em = face.units_per_em() as f32;
        let ascender = face.ascender() as f32;
        let descender = face.descender() as f32;
        Ok(Self {
            kind: FontKind::Embedded(bytes),
            units_per_em,
            ascender,
            descender,
        })
    }

    /// Ascent in 1000-unit glyph space.
    pub fn ascent(&self) -> f32 {
        self.ascender * 1000.0 / self.units_per_em
    }

    /// Descent in 1000-unit glyph space, usually negative.
    pub fn descent(&self) -> f32 {
        self.descender * 1000.0 / self.units_per_em
    }

    /// Width of `text` in points at `font_size`, without kerning.
    pub fn measure_text_width(&self, text: &str, font_size: f32) -> f32 {
        match &self.kind {
            FontKind::Builtin(font) => {
                let units: u32 = text
                    .chars()
                    .map(|c| builtin_glyph_width(*font, winansi_byte(c)) as u32)
                    .sum();
                units as f32 * font_size / 1000.0
            }
            FontKind::Embedded(bytes) => match ttf_parser::Face::parse(bytes, 0) {
                Ok(face) => {
                    let scale = font_size / self.units_per_em;
                    text.chars()
                        .map(|ch| match face.glyph_index(ch) {
                            Some(gid) => face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale,
                            None => font_size * 0.5,
                        })
                        .sum()
                }
                Err(_) => text.chars().count() as f32 * font_size * 0.5,
            },
        }
    }
}

/// Fonts known to this run, keyed by the name cards refer to them with.
pub struct FontManager {
    fonts: HashMap<String, FontData>,
}

impl FontManager {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }

    /// Load a TTF/OTF file and make it available as `name`.
    ///
    /// Registering the same name twice replaces the earlier font.
    pub fn register_font_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let font_error = |message: String| FlashcardError::Font {
            name: name.to_string(),
            path: path.to_path_buf(),
            message,
        };
        let bytes = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
        let data = FontData::from_bytes(bytes).map_err(font_error)?;
        log::debug!("Registered font '{name}' from '{}'", path.display());
        self.fonts.insert(name.to_string(), data);
        Ok(())
    }

    /// Look up a registered font, falling back to the standard PDF fonts.
    pub fn get(&self, name: &str) -> Result<FontData> {
        if let Some(data) = self.fonts.get(name) {
            return Ok(data.clone());
        }
        builtin_font(name)
            .map(FontData::builtin)
            .ok_or_else(|| FlashcardError::UnknownFont(name.to_string()))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a PostScript font name to a standard PDF font.
pub fn builtin_font(name: &str) -> Option<BuiltinFont> {
    let font = match name {
        "Helvetica" => BuiltinFont::Helvetica,
        "Helvetica-Bold" => BuiltinFont::HelveticaBold,
        "Helvetica-Oblique" => BuiltinFont::HelveticaOblique,
        "Helvetica-BoldOblique" => BuiltinFont::HelveticaBoldOblique,
        "Times-Roman" => BuiltinFont::TimesRoman,
        "Times-Bold" => BuiltinFont::TimesBold,
        "Times-Italic" => BuiltinFont::TimesItalic,
        "Times-BoldItalic" => BuiltinFont::TimesBoldItalic,
        "Courier" => BuiltinFont::Courier,
        "Courier-Bold" => BuiltinFont::CourierBold,
        "Courier-Oblique" => BuiltinFont::CourierOblique,
        "Courier-BoldOblique" => BuiltinFont::CourierBoldOblique,
        _ => return None,
    };
    Some(font)
}

/// Encode a character the way standard fonts see it (WinAnsiEncoding).
/// Characters outside the encoding become `?`.
pub fn winansi_byte(c: char) -> u8 {
    match c {
        '\u{20AC}' => 0x80, // euro
        '\u{201A}' => 0x82, // single low-9 quote
        '\u{201E}' => 0x84, // double low-9 quote
        '\u{2026}' => 0x85, // ellipsis
        '\u{2018}' => 0x91, // left single quote
        '\u{2019}' => 0x92, // right single quote
        '\u{201C}' => 0x93, // left double quote
        '\u{201D}' => 0x94, // right double quote
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96, // en-dash
        '\u{2014}' => 0x97, // em-dash
        '\u{2122}' => 0x99, // trademark
        '\u{00A0}' => 0x20,
        c if (c as u32) < 0x80 || (0xA0..0x100).contains(&(c as u32)) => c as u8,
        _ => b'?',
    }
}

fn builtin_glyph_width(font: BuiltinFont, byte: u8) -> u16 {
    match font {
        BuiltinFont::Courier
        | BuiltinFont::CourierBold
        | BuiltinFont::CourierOblique
        | BuiltinFont::CourierBoldOblique => {
            if byte < 0x20 {
                0
            } else {
                600
            }
        }
        // Times and the bold/oblique Helvetica cuts are measured with regular
        // Helvetica widths.
        _ => helvetica_width(byte),
    }
}

// Helvetica AFM widths for WinAnsi 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

// Helvetica AFM widths for Latin-1 0xA0..=0xFF.
#[rustfmt::skip]
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

fn helvetica_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => HELVETICA_ASCII[(byte - 0x20) as usize],
        0xA0..=0xFF => HELVETICA_LATIN1[(byte - 0xA0) as usize],
        0x80 | 0x96 => 556,
        0x82 | 0x91 | 0x92 => 222,
        0x84 | 0x93 | 0x94 => 333,
        0x85 | 0x97 | 0x99 => 1000,
        0x95 => 350,
        _ => 0,
    }
}
