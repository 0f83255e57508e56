//! Random dot placement for numeracy cards.
//!
//! Dots are placed by greedy rejection sampling around the page center. The
//! search window starts small and widens with every attempt, so early dots
//! cluster near the middle and later ones spread outwards. Accepting a dot
//! shrinks the window back.

use rand::Rng;

use crate::config::CardConfig;
use crate::error::{FlashcardError, Result};

/// Attempt counter value after every accepted dot.
const FIRST_ATTEMPT: u32 = 5;
/// Search window growth per attempt, as a fraction of the font size.
const WINDOW_STEP: f32 = 0.3;
/// Distance from the page edges kept free, as a multiple of the font size.
const SAFE_MARGIN_FACTOR: f32 = 3.2;

/// Dot center in page coordinates (points, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
}

impl Dot {
    pub fn distance(&self, other: &Dot) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone)]
pub struct DotSampler {
    pub page_width: f32,
    pub page_height: f32,
    pub font_size: f32,
    pub min_distance: f32,
    /// Consecutive rejections tolerated before giving up.
    pub max_attempts: u32,
}

impl DotSampler {
    pub fn from_config(config: &CardConfig) -> Self {
        Self {
            page_width: config.page_width_pt(),
            page_height: config.page_height_pt(),
            font_size: config.font_size,
            min_distance: config.min_dot_distance,
            max_attempts: config.max_placement_attempts,
        }
    }

    pub fn safe_margin(&self) -> f32 {
        self.font_size * SAFE_MARGIN_FACTOR
    }

    /// Radius of a drawn dot.
    pub fn dot_radius(&self) -> f32 {
        self.font_size
    }

    /// Whether `candidate` keeps clear of the page edges and of every placed dot.
    pub fn accepts(&self, candidate: &Dot, placed: &[Dot]) -> bool {
        let margin = self.safe_margin();
        let inside = candidate.x >= margin
            && candidate.x <= self.page_width - margin
            && candidate.y >= margin
            && candidate.y <= self.page_height - margin;
        inside
            && placed
                .iter()
                .all(|dot| dot.distance(candidate) >= self.min_distance)
    }

    /// Place `wanted` dots, or fail once `max_attempts` candidates in a row are rejected.
    pub fn place<R: Rng>(&self, wanted: usize, rng: &mut R) -> Result<Vec<Dot>> {
        let mut placed = Vec::with_capacity(wanted);
        if wanted == 0 {
            return Ok(placed);
        }

        let margin = self.safe_margin();
        if 2.0 * margin > self.page_width || 2.0 * margin > self.page_height {
            return Err(FlashcardError::PlacementExhausted { wanted, placed: 0 });
        }

        let center_x = self.page_width / 2.0;
        let center_y = self.page_height / 2.0;
        let mut attempt = FIRST_ATTEMPT;
        let mut rejected = 0u32;

        while placed.len() < wanted {
            let reach = attempt as f32 * self.font_size * WINDOW_STEP;
            let reach_x = reach.min(center_x);
            let reach_y = reach.min(center_y);
            let candidate = Dot {
                x: center_x + rng.gen_range(-reach_x..=reach_x),
                y: center_y + rng.gen_range(-reach_y..=reach_y),
            };
            attempt = attempt.saturating_add(1);

            if self.accepts(&candidate, &placed) {
                placed.push(candidate);
                attempt = FIRST_ATTEMPT;
                rejected = 0;
            } else {
                rejected += 1;
                if rejected >= self.max_attempts {
                    return Err(FlashcardError::PlacementExhausted {
                        wanted,
                        placed: placed.len(),
                    });
                }
            }
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sampler() -> DotSampler {
        let config = CardConfig {
            font_size: 10.0,
            ..CardConfig::default()
        };
        DotSampler::from_config(&config)
    }

    fn assert_valid(sampler: &DotSampler, dots: &[Dot]) {
        let margin = sampler.safe_margin();
        for (i, a) in dots.iter().enumerate() {
            assert!(a.x >= margin && a.x <= sampler.page_width - margin, "{a:?}");
            assert!(a.y >= margin && a.y <= sampler.page_height - margin, "{a:?}");
            for b in &dots[i + 1..] {
                assert!(a.distance(b) >= 45.0, "{a:?} too close to {b:?}");
            }
        }
    }

    #[test]
    fn places_requested_dots() {
        let sampler = sampler();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            for wanted in 1..=40 {
                let dots = sampler.place(wanted, &mut rng).unwrap();
                assert_eq!(dots.len(), wanted);
                assert_valid(&sampler, &dots);
            }
        }
    }

    #[test]
    fn same_seed_same_dots() {
        let sampler = sampler();
        let a = sampler.place(12, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sampler.place(12, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_dots() {
        let dots = sampler().place(0, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(dots.is_empty());
    }

    #[test]
    fn gives_up_when_page_is_full() {
        let sampler = DotSampler {
            page_width: 200.0,
            page_height: 100.0,
            font_size: 10.0,
            min_distance: 45.0,
            max_attempts: 2_000,
        };
        let mut rng = StdRng::seed_from_u64(3);
        match sampler.place(50, &mut rng) {
            Err(FlashcardError::PlacementExhausted { wanted, placed }) => {
                assert_eq!(wanted, 50);
                assert!(placed < 50);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn margin_larger_than_page() {
        // Default font size leaves no interior on a 99 mm tall card.
        let sampler = DotSampler::from_config(&CardConfig::default());
        assert!(matches!(
            sampler.place(1, &mut StdRng::seed_from_u64(0)),
            Err(FlashcardError::PlacementExhausted { wanted: 1, placed: 0 })
        ));
    }

    #[test]
    fn rejects_edges_and_neighbours() {
        let sampler = sampler();
        let placed = [Dot { x: 300.0, y: 140.0 }];
        assert!(!sampler.accepts(&Dot { x: 10.0, y: 140.0 }, &[]));
        assert!(!sampler.accepts(&Dot { x: 320.0, y: 140.0 }, &placed));
        assert!(sampler.accepts(&Dot { x: 345.0, y: 140.0 }, &placed));
    }
}
