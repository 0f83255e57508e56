//! Deck layout – the intermediate representation between card layout and PDF
//! rendering. This is the "frozen" structure that encodes exactly what goes on
//! each page of one group's PDF.

use crate::color::CardColor;
use crate::dots::Dot;

/// Millimetres → PDF points.
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// A complete group deck ready for rendering.
#[derive(Debug, Clone)]
pub struct DeckLayout {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Font every word card is drawn with.
    pub font_name: String,
    pub color: CardColor,
    /// Ordered list of cards, one per page.
    pub pages: Vec<CardPage>,
}

/// One card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardPage {
    Word(PlacedWord),
    Dots { dots: Vec<Dot>, radius: f32 },
}

/// A word positioned on its page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f32,
    /// Left edge of the text, in points from the page's left edge.
    pub x: f32,
    /// Baseline, in points from the page's bottom edge.
    pub y: f32,
    /// Measured width at `font_size`.
    pub width: f32,
}

impl DeckLayout {
    pub fn new(
        title: impl Into<String>,
        page_width_pt: f32,
        page_height_pt: f32,
        font_name: impl Into<String>,
        color: CardColor,
    ) -> Self {
        Self {
            title: title.into(),
            page_width_pt,
            page_height_pt,
            font_name: font_name.into(),
            color,
            pages: Vec::new(),
        }
    }

    /// Words drawn on this deck, in page order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().filter_map(|page| match page {
            CardPage::Word(word) => Some(word.text.as_str()),
            CardPage::Dots { .. } => None,
        })
    }
}

/// Title-case a group name for the document title: `corpo_humano` → `Corpo_Humano`.
pub fn title_case(group: &str) -> String {
    let mut out = String::with_capacity(group.len());
    let mut at_word_start = true;
    for ch in group.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
