//! Card layout – sizes and centers words on their page, and lays out dot
//! cards, producing a [`DeckLayout`] per group.

use rand::Rng;

use crate::config::CardConfig;
use crate::dots::DotSampler;
use crate::fonts::FontData;
use crate::layout_config::{title_case, CardPage, DeckLayout, PlacedWord};

/// Taken off the linear rescale factor so reduced words keep some air.
pub const REDUCTION_SAFE_MARGIN: f32 = 0.10;

/// Font size decision for one word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontFit {
    /// The word fits at the requested size.
    Unchanged(f32),
    /// The word was rescaled to this size.
    Reduced(f32),
    /// The word does not fit and may not be reduced.
    TooWide,
}

impl FontFit {
    pub fn size(self) -> Option<f32> {
        match self {
            FontFit::Unchanged(size) | FontFit::Reduced(size) => Some(size),
            FontFit::TooWide => None,
        }
    }
}

/// Decide the font size of a word measured `measured_width` wide at `requested_size`.
///
/// Oversized words are rescaled once by `page_width / measured_width - 0.10`.
/// The result is not re-measured, so it is an approximation of an exact fit.
pub fn fit_font_size(
    measured_width: f32,
    requested_size: f32,
    page_width: f32,
    max_ratio: f32,
    disable_reduce_to_fit: bool,
) -> FontFit {
    if measured_width / page_width <= max_ratio {
        return FontFit::Unchanged(requested_size);
    }
    if disable_reduce_to_fit {
        return FontFit::TooWide;
    }
    let reduced = requested_size * (page_width / measured_width - REDUCTION_SAFE_MARGIN);
    if reduced > 0.0 {
        FontFit::Reduced(reduced)
    } else {
        FontFit::TooWide
    }
}

/// Baseline center of a single line of text on the page.
///
/// `ascent` and `descent` are in 1000-unit glyph space. The baseline is lowered
/// by half the glyph height so the word looks centered rather than its
/// baseline sitting on the midline.
pub fn centered_position(
    page_width: f32,
    page_height: f32,
    ascent: f32,
    descent: f32,
    font_size: f32,
) -> (f32, f32) {
    let ascent = ascent * font_size / 1000.0;
    let descent = descent.abs() * font_size / 1000.0;
    let font_height = ascent - descent;
    (page_width / 2.0, page_height / 2.0 - font_height / 2.0)
}

/// Lay out one word card per word. Words too wide for the page are skipped.
pub fn build_word_deck<S: AsRef<str>>(
    group: &str,
    words: &[S],
    config: &CardConfig,
    font: &FontData,
) -> DeckLayout {
    let page_width = config.page_width_pt();
    let page_height = config.page_height_pt();
    let mut deck = DeckLayout::new(
        title_case(group),
        page_width,
        page_height,
        config.font_name.clone(),
        config.font_color,
    );

    for word in words {
        let word = word.as_ref().trim();
        let measured = font.measure_text_width(word, config.font_size);
        let fit = fit_font_size(
            measured,
            config.font_size,
            page_width,
            config.max_text_width_ratio,
            config.disable_reduce_to_fit,
        );
        let font_size = match fit {
            FontFit::Unchanged(size) => size,
            FontFit::Reduced(size) => {
                log::info!("Reduced '{group}/{word}' font size to {size:.1} to fit canvas.");
                size
            }
            FontFit::TooWide => {
                log::error!("Failed to write '{group}/{word}': Larger than canvas.");
                continue;
            }
        };

        let (center_x, baseline) = centered_position(
            page_width,
            page_height,
            font.ascent(),
            font.descent(),
            font_size,
        );
        let width = font.measure_text_width(word, font_size);
        deck.pages.push(CardPage::Word(PlacedWord {
            text: word.to_string(),
            font_size,
            x: center_x - width / 2.0,
            y: baseline,
            width,
        }));
    }
    deck
}

/// Lay out dot cards for 1 up to `max_dots` dots.
///
/// When a count cannot be placed the deck stops there; larger counts would not
/// fit either.
pub fn build_dot_deck<R: Rng>(group: &str, config: &CardConfig, rng: &mut R) -> DeckLayout {
    let sampler = DotSampler::from_config(config);
    let mut deck = DeckLayout::new(
        title_case(group),
        sampler.page_width,
        sampler.page_height,
        config.font_name.clone(),
        config.font_color,
    );

    for wanted in 1..=config.max_dots {
        match sampler.place(wanted, rng) {
            Ok(dots) => deck.pages.push(CardPage::Dots {
                dots,
                radius: sampler.dot_radius(),
            }),
            Err(e) => {
                log::error!("Stopped dot cards of '{group}' at {wanted} dots: {e}");
                break;
            }
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontManager;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fitting_word_keeps_size() {
        assert_eq!(fit_font_size(500.0, 250.0, 1000.0, 0.95, false), FontFit::Unchanged(250.0));
        assert_eq!(fit_font_size(950.0, 250.0, 1000.0, 0.95, true), FontFit::Unchanged(250.0));
    }

    #[test]
    fn wide_word_is_rescaled() {
        let fit = fit_font_size(2000.0, 250.0, 1000.0, 0.95, false);
        let expected = 250.0 * (1000.0 / 2000.0 - 0.10);
        assert_eq!(fit, FontFit::Reduced(expected));
        assert!(fit.size().unwrap() < 250.0);

        // Just over the threshold still shrinks.
        let fit = fit_font_size(951.0, 250.0, 1000.0, 0.95, false);
        assert!(fit.size().unwrap() < 250.0);
    }

    #[test]
    fn wide_word_rejected_when_reduction_disabled() {
        assert_eq!(fit_font_size(2000.0, 250.0, 1000.0, 0.95, true), FontFit::TooWide);
    }

    #[test]
    fn absurdly_wide_word_rejected() {
        // page/width - 0.10 <= 0
        assert_eq!(fit_font_size(20_000.0, 250.0, 1000.0, 0.95, false), FontFit::TooWide);
    }

    #[test]
    fn centering_uses_glyph_height() {
        let (x, y) = centered_position(1000.0, 300.0, 718.0, -207.0, 100.0);
        assert_eq!(x, 500.0);
        // (71.8 - 20.7) / 2 = 25.55
        assert!((y - (150.0 - 25.55)).abs() < 1e-3);
    }

    #[test]
    fn word_deck_centers_each_word() {
        let config = CardConfig::default();
        let font = FontManager::new().get("Helvetica").unwrap();
        let deck = build_word_deck("animais", &["vaca", "cachorro"], &config, &font);
        assert_eq!(deck.title, "Animais");
        assert_eq!(deck.pages.len(), 2);
        for page in &deck.pages {
            let CardPage::Word(word) = page else {
                panic!("expected a word card");
            };
            let center = word.x + word.width / 2.0;
            assert!((center - deck.page_width_pt / 2.0).abs() < 1e-2);
            assert_eq!(word.font_size, 250.0);
        }
    }

    #[test]
    fn word_deck_skips_or_shrinks_long_words() {
        let font = FontManager::new().get("Helvetica").unwrap();
        let long = "paralelepipedo-anticonstitucionalissimamente";

        let config = CardConfig::default();
        let deck = build_word_deck("g", &[long], &config, &font);
        let CardPage::Word(word) = &deck.pages[0] else {
            panic!("expected a word card");
        };
        assert!(word.font_size < config.font_size);

        let strict = CardConfig {
            disable_reduce_to_fit: true,
            ..CardConfig::default()
        };
        let deck = build_word_deck("g", &[long, "pé"], &strict, &font);
        assert_eq!(deck.words().collect::<Vec<_>>(), vec!["pé"]);
    }

    #[test]
    fn dot_deck_counts_up() {
        let config = CardConfig {
            font_size: 8.0,
            max_dots: 15,
            ..CardConfig::default()
        };
        let deck = build_dot_deck("numeros", &config, &mut StdRng::seed_from_u64(9));
        assert_eq!(deck.pages.len(), 15);
        for (i, page) in deck.pages.iter().enumerate() {
            match page {
                CardPage::Dots { dots, radius } => {
                    assert_eq!(dots.len(), i + 1);
                    assert_eq!(*radius, 8.0);
                }
                CardPage::Word(_) => panic!("expected a dot card"),
            }
        }
    }

    #[test]
    fn dot_deck_truncated_when_page_too_small() {
        let config = CardConfig::default();
        let deck = build_dot_deck("numeros", &config, &mut StdRng::seed_from_u64(9));
        assert!(deck.pages.is_empty());
    }
}
