//! Visual prominence as seen by the matcher
//!
//! Six additive signals, capped by `MatcherConfig::max_visual_prominence`:
//! size against the viewport (0-3), centering weighted toward the horizontal
//! axis (0-2), button and prominent styling (0-2), supporting trust text
//! nearby (0-2), color classes (0-2), size against the average element (0-1).

use serde::{Deserialize, Serialize};

use crate::config::MatcherConfig;
use crate::element::{Candidate, TextBlock, Viewport};
use crate::lexicon::{class_matches_any, normalize_text, Lexicon};

/// Share of the viewport area at which each size point is earned
const SIZE_STEPS: [f64; 3] = [0.003, 0.008, 0.015];
const HORIZONTAL_WEIGHT: f64 = 0.7;
/// Element must be this many times the average area to earn the relative bonus
const RELATIVE_SIZE_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Prominence {
    pub size: f64,
    pub centering: f64,
    pub styling: f64,
    pub trust_text: f64,
    pub color: f64,
    pub relative_size: f64,
    /// Capped sum of the signals
    pub total: f64,
}

pub fn size_signal(candidate: &Candidate, viewport: Viewport) -> f64 {
    let area = viewport.area();
    if area <= 0.0 {
        return 0.0;
    }
    let ratio = candidate.coordinates.area() / area;
    SIZE_STEPS.iter().filter(|&&step| ratio > step).count() as f64
}

pub fn centering_signal(candidate: &Candidate, viewport: Viewport) -> f64 {
    let coords = &candidate.coordinates;
    let axis = |pos: f64, center: f64| {
        if center > 0.0 {
            (1.0 - (pos - center).abs() / center).clamp(0.0, 1.0)
        } else {
            0.0
        }
    };
    let horizontal = axis(coords.center_x(), viewport.center_x());
    let vertical = axis(coords.center_y(), viewport.center_y());
    2.0 * (HORIZONTAL_WEIGHT * horizontal + (1.0 - HORIZONTAL_WEIGHT) * vertical)
}

pub fn styling_signal(candidate: &Candidate) -> f64 {
    let mut score = 0.0;
    if candidate.has_button_appearance() {
        score += 1.0;
    }
    if candidate.has_prominent_appearance() {
        score += 1.0;
    }
    score
}

/// One point per trust-text block within the radius, at most two
pub fn trust_text_signal(
    candidate: &Candidate,
    text_blocks: &[TextBlock],
    config: &MatcherConfig,
    lexicon: &Lexicon,
) -> f64 {
    let hits = text_blocks
        .iter()
        .filter(|block| candidate.coordinates.distance_to(&block.coordinates) <= config.trust_text_radius)
        .filter(|block| lexicon.is_trust_text(&normalize_text(&block.text)))
        .count();
    hits.min(2) as f64
}

pub fn color_signal(candidate: &Candidate, lexicon: &Lexicon) -> f64 {
    let class = &candidate.style.class_name;
    if class_matches_any(class, &lexicon.strong_color_hints) {
        2.0
    } else if class_matches_any(class, &lexicon.mild_color_hints) {
        1.0
    } else {
        0.0
    }
}

pub fn relative_size_signal(candidate: &Candidate, average_area: f64) -> f64 {
    if average_area > 0.0 && candidate.coordinates.area() > average_area * RELATIVE_SIZE_FACTOR {
        1.0
    } else {
        0.0
    }
}

pub fn visual_prominence(
    candidate: &Candidate,
    average_area: f64,
    text_blocks: &[TextBlock],
    viewport: Viewport,
    config: &MatcherConfig,
    lexicon: &Lexicon,
) -> Prominence {
    let mut p = Prominence {
        size: size_signal(candidate, viewport),
        centering: centering_signal(candidate, viewport),
        styling: styling_signal(candidate),
        trust_text: trust_text_signal(candidate, text_blocks, config, lexicon),
        color: color_signal(candidate, lexicon),
        relative_size: relative_size_signal(candidate, average_area),
        total: 0.0,
    };
    let sum = p.size + p.centering + p.styling + p.trust_text + p.color + p.relative_size;
    p.total = sum.min(config.max_visual_prominence);
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Coordinates, ElementKind, StyleHints};

    const VIEWPORT: Viewport = Viewport { width: 1920.0, height: 1080.0 };

    fn make(class: &str, x: f64, y: f64, w: f64, h: f64) -> Candidate {
        Candidate::new(
            "Start",
            Coordinates::new(x, y, w, h),
            ElementKind::Button,
            StyleHints::new(class),
            &Lexicon::default(),
        )
    }

    #[test]
    fn test_size_steps() {
        // viewport area is 2_073_600
        assert_eq!(size_signal(&make("", 0.0, 0.0, 60.0, 30.0), VIEWPORT), 0.0);
        assert_eq!(size_signal(&make("", 0.0, 0.0, 200.0, 50.0), VIEWPORT), 1.0);
        assert_eq!(size_signal(&make("", 0.0, 0.0, 300.0, 60.0), VIEWPORT), 2.0);
        assert_eq!(size_signal(&make("", 0.0, 0.0, 400.0, 100.0), VIEWPORT), 3.0);
    }

    #[test]
    fn test_centering_weights_horizontal() {
        let dead_center = make("", 910.0, 515.0, 100.0, 50.0);
        assert!((centering_signal(&dead_center, VIEWPORT) - 2.0).abs() < 1e-9);

        // horizontally centered at the top edge keeps the horizontal share
        let top_center = make("", 910.0, -25.0, 100.0, 50.0);
        assert!((centering_signal(&top_center, VIEWPORT) - 1.4).abs() < 1e-9);

        // vertically centered at the left edge keeps only the vertical share
        let left_middle = make("", -50.0, 515.0, 100.0, 50.0);
        assert!((centering_signal(&left_middle, VIEWPORT) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_trust_text_within_radius() {
        let lex = Lexicon::default();
        let cfg = MatcherConfig::default();
        let button = make("", 800.0, 400.0, 200.0, 50.0);
        let blocks = vec![
            TextBlock::new("No credit card required", Coordinates::new(800.0, 470.0, 300.0, 20.0)),
            TextBlock::new("30-day money back guarantee", Coordinates::new(800.0, 520.0, 300.0, 20.0)),
            TextBlock::new("Cancel anytime", Coordinates::new(800.0, 900.0, 300.0, 20.0)),
            TextBlock::new("Welcome aboard", Coordinates::new(800.0, 460.0, 300.0, 20.0)),
        ];
        assert_eq!(trust_text_signal(&button, &blocks[..1], &cfg, &lex), 1.0);
        assert_eq!(trust_text_signal(&button, &blocks, &cfg, &lex), 2.0);
        assert_eq!(trust_text_signal(&button, &blocks[2..], &cfg, &lex), 0.0);
    }

    #[test]
    fn test_color_and_styling() {
        let lex = Lexicon::default();
        assert_eq!(color_signal(&make("btn btn-orange", 0.0, 0.0, 1.0, 1.0), &lex), 2.0);
        assert_eq!(color_signal(&make("btn bg-brand", 0.0, 0.0, 1.0, 1.0), &lex), 1.0);
        assert_eq!(color_signal(&make("btn", 0.0, 0.0, 1.0, 1.0), &lex), 0.0);

        assert_eq!(styling_signal(&make("btn cta-large", 0.0, 0.0, 1.0, 1.0)), 2.0);
        assert_eq!(styling_signal(&make("", 0.0, 0.0, 1.0, 1.0)), 1.0);
    }

    #[test]
    fn test_color_ignores_hints_inside_words() {
        let lex = Lexicon::default();
        for class in ["text-centered", "btn bordered", "featured-card", "align-center svg-icon"] {
            assert_eq!(color_signal(&make(class, 0.0, 0.0, 1.0, 1.0), &lex), 0.0, "{}", class);
        }
        assert_eq!(color_signal(&make("btn bg-red-500", 0.0, 0.0, 1.0, 1.0), &lex), 2.0);
    }

    #[test]
    fn test_total_is_capped() {
        let lex = Lexicon::default();
        let cfg = MatcherConfig {
            max_visual_prominence: 5.0,
            ..MatcherConfig::default()
        };
        let big = make("btn-primary btn-orange", 760.0, 490.0, 400.0, 100.0);
        let p = visual_prominence(&big, 1000.0, &[], VIEWPORT, &cfg, &lex);
        assert!(p.size + p.centering + p.styling + p.color + p.relative_size > 5.0);
        assert_eq!(p.total, 5.0);

        let uncapped = visual_prominence(&big, 1000.0, &[], VIEWPORT, &MatcherConfig::default(), &lex);
        assert!(uncapped.total <= 12.0);
        assert_eq!(uncapped.relative_size, 1.0);
    }
}
