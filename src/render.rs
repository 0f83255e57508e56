//! PDF renderer – takes a [`DeckLayout`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).

use std::f32::consts::TAU;

use printpdf::*;

use crate::error::{FlashcardError, Result};
use crate::fonts::{winansi_byte, FontData, FontKind};
use crate::layout_config::{CardPage, DeckLayout, PlacedWord, MM_TO_PT};

/// Segments used to approximate a dot outline.
const DOT_SEGMENTS: usize = 48;

/// The font the deck's words are written with.
enum PageFont {
    Builtin(BuiltinFont),
    Embedded(FontId),
}

/// Render a deck into PDF bytes, one page per card.
pub fn render_pdf(deck: &DeckLayout, font: &FontData) -> Result<Vec<u8>> {
    let page_w = Mm(deck.page_width_pt / MM_TO_PT);
    let page_h = Mm(deck.page_height_pt / MM_TO_PT);

    let mut doc = PdfDocument::new(&deck.title);

    let page_font = match &font.kind {
        FontKind::Builtin(builtin) => PageFont::Builtin(*builtin),
        FontKind::Embedded(bytes) => {
            let mut warnings: Vec<PdfWarnMsg> = Vec::new();
            let parsed = ParsedFont::from_bytes(bytes, 0, &mut warnings).ok_or_else(|| {
                FlashcardError::Render(format!("font '{}' could not be embedded", deck.font_name))
            })?;
            PageFont::Embedded(doc.add_font(&parsed))
        }
    };

    let color = deck.color.to_pdf();
    let pages: Vec<PdfPage> = deck
        .pages
        .iter()
        .map(|card| {
            let mut ops = vec![Op::SetFillColor { col: color.clone() }];
            match card {
                CardPage::Word(word) => render_word(&mut ops, word, &page_font),
                CardPage::Dots { dots, radius } => {
                    for dot in dots {
                        ops.push(Op::DrawPolygon {
                            polygon: circle(dot.x, dot.y, *radius),
                        });
                    }
                }
            }
            PdfPage::new(page_w, page_h, ops)
        })
        .collect();

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    Ok(bytes)
}

fn render_word(ops: &mut Vec<Op>, word: &PlacedWord, font: &PageFont) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(word.x),
            y: Pt(word.y),
        },
    });
    match font {
        PageFont::Builtin(builtin) => {
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(word.font_size),
                font: *builtin,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(&word.text))],
                font: *builtin,
            });
        }
        PageFont::Embedded(id) => {
            ops.push(Op::SetFontSize {
                size: Pt(word.font_size),
                font: id.clone(),
            });
            ops.push(Op::WriteText {
                items: vec![TextItem::Text(word.text.clone())],
                font: id.clone(),
            });
        }
    }
    ops.push(Op::EndTextSection);
}

/// Filled circle centered on `(cx, cy)`.
fn circle(cx: f32, cy: f32, radius: f32) -> Polygon {
    let points = (0..DOT_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f32 / DOT_SEGMENTS as f32;
            LinePoint {
                p: Point {
                    x: Pt(cx + radius * angle.cos()),
                    y: Pt(cy + radius * angle.sin()),
                },
                bezier: false,
            }
        })
        .collect();
    Polygon {
        rings: vec![PolygonRing { points }],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s.chars().map(winansi_byte).collect();
    // SAFETY: any byte in 0x80–0xFF makes this invalid UTF-8. The string is
    // only handed to printpdf, which writes builtin-font text with `as_bytes()`
    // and never inspects it as UTF-8; viewers decode it with WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_COLOR;
    use crate::dots::Dot;
    use crate::fonts::FontManager;

    fn deck(pages: Vec<CardPage>) -> DeckLayout {
        let mut deck = DeckLayout::new("Animais", 1247.0, 280.0, "Helvetica", DEFAULT_COLOR);
        deck.pages = pages;
        deck
    }

    #[test]
    fn render_word_and_dot_cards() {
        let font = FontManager::new().get("Helvetica").unwrap();
        let bytes = render_pdf(
            &deck(vec![
                CardPage::Word(PlacedWord {
                    text: "vaca".to_string(),
                    font_size: 250.0,
                    x: 400.0,
                    y: 100.0,
                    width: 450.0,
                }),
                CardPage::Dots {
                    dots: vec![Dot { x: 600.0, y: 140.0 }],
                    radius: 10.0,
                },
            ]),
            &font,
        )
        .unwrap();
        assert!(bytes.len() > 100, "PDF should have content");
        // PDF magic number
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn circle_points_on_radius() {
        let polygon = circle(10.0, 20.0, 5.0);
        let ring = &polygon.rings[0];
        assert_eq!(ring.points.len(), DOT_SEGMENTS);
        for lp in &ring.points {
            let d = (lp.p.x.0 - 10.0).hypot(lp.p.y.0 - 20.0);
            assert!((d - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn winlatin_bytes() {
        assert_eq!(to_winlatin("mão").as_bytes(), &[b'm', 0xE3, b'o']);
    }
}
