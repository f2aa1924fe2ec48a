//! Positional priority used by the matcher

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MatcherConfig;
use crate::element::{Coordinates, Viewport};

/// Coarse zone a matched element falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchTier {
    Hero,
    Header,
    BelowFold,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Hero => "hero",
            MatchTier::Header => "header",
            MatchTier::BelowFold => "below-fold",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tier and raw priority score for a position.
///
/// Header elements gain up to 1 point for sitting further right; hero
/// elements gain up to 1 point for being horizontally centered.
pub fn priority(coords: &Coordinates, viewport: Viewport, config: &MatcherConfig) -> (MatchTier, f64) {
    if coords.y >= config.fold_line {
        return (MatchTier::BelowFold, 1.0);
    }

    if coords.y < config.header_max_y {
        let rightness = if viewport.width > 0.0 {
            (coords.x / viewport.width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        return (MatchTier::Header, 2.0 + rightness);
    }

    (MatchTier::Hero, 10.0 + horizontal_centering(coords, viewport))
}

/// 1 at the viewport's horizontal center, falling to 0 at either edge
pub fn horizontal_centering(coords: &Coordinates, viewport: Viewport) -> f64 {
    let center = viewport.center_x();
    if center <= 0.0 {
        return 0.0;
    }
    (1.0 - (coords.center_x() - center).abs() / center).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport { width: 1920.0, height: 1080.0 };

    #[test]
    fn test_below_fold() {
        let cfg = MatcherConfig::default();
        let coords = Coordinates::new(860.0, 1000.0, 200.0, 50.0);
        assert_eq!(priority(&coords, VIEWPORT, &cfg), (MatchTier::BelowFold, 1.0));
    }

    #[test]
    fn test_header_rewards_right_side() {
        let cfg = MatcherConfig::default();
        let left = priority(&Coordinates::new(0.0, 20.0, 100.0, 40.0), VIEWPORT, &cfg);
        let right = priority(&Coordinates::new(1728.0, 20.0, 100.0, 40.0), VIEWPORT, &cfg);
        assert_eq!(left, (MatchTier::Header, 2.0));
        assert_eq!(right.0, MatchTier::Header);
        assert!((right.1 - 2.9).abs() < 1e-9);
    }

    #[test]
    fn test_hero_rewards_centering() {
        let cfg = MatcherConfig::default();
        let centered = priority(&Coordinates::new(860.0, 400.0, 200.0, 50.0), VIEWPORT, &cfg);
        assert_eq!(centered, (MatchTier::Hero, 11.0));

        let edge = priority(&Coordinates::new(-100.0, 150.0, 200.0, 50.0), VIEWPORT, &cfg);
        assert_eq!(edge, (MatchTier::Hero, 10.0));

        // 999 is still above the fold
        let low = priority(&Coordinates::new(860.0, 999.0, 200.0, 50.0), VIEWPORT, &cfg);
        assert_eq!(low.0, MatchTier::Hero);
    }
}
