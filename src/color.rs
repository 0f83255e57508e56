//! Card colours as given on the command line or in a group override.
//!
//! Two notations are accepted:
//!
//! - hexadecimal RGB, `#ff0000` or the short form `#f00`
//! - CMYK percentages, `0,100,100,0`

use printpdf::{Cmyk, Color, Rgb};

use crate::error::{FlashcardError, Result};

/// Default card colour: CMYK red.
pub const DEFAULT_COLOR: CardColor = CardColor::Cmyk {
    c: 0.0,
    m: 100.0,
    y: 100.0,
    k: 0.0,
};

/// Fill colour of words and dots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardColor {
    /// DeviceRGB; r, g, b range from 0.0 to 1.0
    Rgb { r: f32, g: f32, b: f32 },
    /// DeviceCMYK; c, m, y, k are percentages from 0 to 100
    Cmyk { c: f32, m: f32, y: f32, k: f32 },
}

impl CardColor {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
        if hex.len() == 6 {
            Some(Self::Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            })
        } else if hex.len() == 3 {
            Some(Self::Rgb {
                r: channel(&hex[0..1].repeat(2))?,
                g: channel(&hex[1..2].repeat(2))?,
                b: channel(&hex[2..3].repeat(2))?,
            })
        } else {
            None
        }
    }

    pub fn from_cmyk(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return None;
        }
        let mut channels = [0.0f32; 4];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            *slot = part.parse::<u32>().ok()? as f32;
        }
        let [c, m, y, k] = channels;
        Some(Self::Cmyk { c, m, y, k })
    }

    /// Convert into the drawing library's colour, scaling CMYK percentages to 0.0 – 1.0.
    pub fn to_pdf(self) -> Color {
        match self {
            Self::Rgb { r, g, b } => Color::Rgb(Rgb {
                r,
                g,
                b,
                icc_profile: None,
            }),
            Self::Cmyk { c, m, y, k } => Color::Cmyk(Cmyk {
                c: (c / 100.0).clamp(0.0, 1.0),
                m: (m / 100.0).clamp(0.0, 1.0),
                y: (y / 100.0).clamp(0.0, 1.0),
                k: (k / 100.0).clamp(0.0, 1.0),
                icc_profile: None,
            }),
        }
    }
}

/// Parse a colour given as `#rrggbb`, `#rgb` or `c,m,y,k`.
pub fn parse_color(value: &str) -> Result<CardColor> {
    let trimmed = value.trim();
    let parsed = if trimmed.starts_with('#') {
        CardColor::from_hex(trimmed)
    } else {
        CardColor::from_cmyk(trimmed)
    };
    parsed.ok_or_else(|| FlashcardError::InvalidColor(value.to_string()))
}

impl std::str::FromStr for CardColor {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmyk_quadruples() {
        assert_eq!(
            parse_color("0,100,100,10").unwrap(),
            CardColor::Cmyk {
                c: 0.0,
                m: 100.0,
                y: 100.0,
                k: 10.0
            }
        );
        assert_eq!(
            parse_color("5,10,15,20").unwrap(),
            CardColor::Cmyk {
                c: 5.0,
                m: 10.0,
                y: 15.0,
                k: 20.0
            }
        );
    }

    #[test]
    fn hex_colors() {
        assert_eq!(
            parse_color("#ff0000").unwrap(),
            CardColor::Rgb {
                r: 1.0,
                g: 0.0,
                b: 0.0
            }
        );
        assert_eq!(parse_color("#F00").unwrap(), parse_color("#ff0000").unwrap());
    }

    #[test]
    fn invalid_colors() {
        for value in ["red", "#ff00", "#gg0000", "1,2,3", "1,2,3,x", "", "#ééé"] {
            match parse_color(value) {
                Err(FlashcardError::InvalidColor(v)) => assert_eq!(v, value),
                other => panic!("expected InvalidColor for {value:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn cmyk_scaled_for_pdf() {
        match parse_color("0,100,50,0").unwrap().to_pdf() {
            Color::Cmyk(c) => {
                assert_eq!(c.m, 1.0);
                assert_eq!(c.y, 0.5);
            }
            other => panic!("expected CMYK, got {other:?}"),
        }
    }
}
