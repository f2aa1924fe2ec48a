//! Hero-first selection cascade

use serde::{Deserialize, Serialize};

use crate::config::MatcherConfig;
use crate::element::Candidate;

use super::priority::MatchTier;

/// An admitted element with the numbers the cascade ranks on
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub candidate: Candidate,
    pub similarity: f64,
    pub tier: MatchTier,
    pub priority_score: f64,
    pub enhanced_score: f64,
    pub confidence: f64,
}

/// Which pool the winner was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeBucket {
    Hero,
    Header,
    OtherAboveFold,
    /// Nothing was above the fold
    AllCandidates,
}

impl CascadeBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            CascadeBucket::Hero => "hero",
            CascadeBucket::Header => "header",
            CascadeBucket::OtherAboveFold => "other above fold",
            CascadeBucket::AllCandidates => "all candidates",
        }
    }
}

/// True if `challenger` should replace `current` as the leader.
///
/// A clearly higher enhanced score wins; scores within the tie gap fall back
/// to confidence. Equal cases keep the earlier element.
fn outranks(challenger: &MatchCandidate, current: &MatchCandidate, tie_gap: f64) -> bool {
    let delta = challenger.enhanced_score - current.enhanced_score;
    if delta.abs() <= tie_gap {
        challenger.confidence > current.confidence
    } else {
        delta > 0.0
    }
}

/// Top entry of `pool` by enhanced score with the confidence tie-break.
///
/// A single forward pass keeps the choice stable for identical inputs.
pub fn rank_top<'a>(pool: &[&'a MatchCandidate], tie_gap: f64) -> Option<&'a MatchCandidate> {
    let mut best: Option<&MatchCandidate> = None;
    for &entry in pool {
        match best {
            Some(current) if !outranks(entry, current, tie_gap) => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// Pick the winner: hero before header before anything else above the fold,
/// falling back to every candidate when nothing is above the fold.
pub fn select_hero_first<'a>(
    candidates: &'a [MatchCandidate],
    config: &MatcherConfig,
) -> Option<(&'a MatchCandidate, CascadeBucket)> {
    let above: Vec<&MatchCandidate> = candidates
        .iter()
        .filter(|c| c.candidate.is_above_fold)
        .collect();

    if above.is_empty() {
        let all: Vec<&MatchCandidate> = candidates.iter().collect();
        return rank_top(&all, config.tie_gap).map(|c| (c, CascadeBucket::AllCandidates));
    }

    let mut hero = Vec::new();
    let mut header = Vec::new();
    let mut other = Vec::new();
    for c in above {
        let y = c.candidate.coordinates.y;
        if y >= config.header_max_y && y < config.hero_max_y {
            hero.push(c);
        } else if y < config.header_max_y {
            header.push(c);
        } else {
            other.push(c);
        }
    }

    let (pool, bucket) = if !hero.is_empty() {
        (hero, CascadeBucket::Hero)
    } else if !header.is_empty() {
        (header, CascadeBucket::Header)
    } else {
        (other, CascadeBucket::OtherAboveFold)
    };

    rank_top(&pool, config.tie_gap).map(|c| (c, bucket))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Coordinates, ElementKind, StyleHints};
    use crate::lexicon::Lexicon;

    fn entry(text: &str, y: f64, enhanced: f64, confidence: f64) -> MatchCandidate {
        let candidate = Candidate::new(
            text,
            Coordinates::new(800.0, y, 200.0, 50.0),
            ElementKind::Button,
            StyleHints::default(),
            &Lexicon::default(),
        );
        let tier = if y >= 1000.0 {
            MatchTier::BelowFold
        } else if y < 150.0 {
            MatchTier::Header
        } else {
            MatchTier::Hero
        };
        MatchCandidate {
            candidate,
            similarity: 0.0,
            tier,
            priority_score: 0.0,
            enhanced_score: enhanced,
            confidence,
        }
    }

    #[test]
    fn test_hero_beats_higher_scoring_header() {
        let cfg = MatcherConfig::default();
        let candidates = vec![entry("Header", 100.0, 9.0, 0.45), entry("Hero", 400.0, 7.0, 0.35)];
        let (winner, bucket) = select_hero_first(&candidates, &cfg).unwrap();
        assert_eq!(winner.candidate.text, "Hero");
        assert_eq!(bucket, CascadeBucket::Hero);
    }

    #[test]
    fn test_header_used_when_no_hero() {
        let cfg = MatcherConfig::default();
        let candidates = vec![entry("Deep", 2000.0, 20.0, 1.0), entry("Header", 100.0, 5.0, 0.3)];
        let (winner, bucket) = select_hero_first(&candidates, &cfg).unwrap();
        assert_eq!(winner.candidate.text, "Header");
        assert_eq!(bucket, CascadeBucket::Header);
    }

    #[test]
    fn test_other_above_fold_bucket() {
        let cfg = MatcherConfig::default();
        let candidates = vec![entry("Band", 900.0, 5.0, 0.3), entry("Deep", 1200.0, 20.0, 1.0)];
        let (winner, bucket) = select_hero_first(&candidates, &cfg).unwrap();
        assert_eq!(winner.candidate.text, "Band");
        assert_eq!(bucket, CascadeBucket::OtherAboveFold);
    }

    #[test]
    fn test_fallback_to_all_candidates() {
        let cfg = MatcherConfig::default();
        let candidates = vec![entry("A", 1200.0, 5.0, 0.3), entry("B", 1800.0, 9.0, 0.4)];
        let (winner, bucket) = select_hero_first(&candidates, &cfg).unwrap();
        assert_eq!(winner.candidate.text, "B");
        assert_eq!(bucket, CascadeBucket::AllCandidates);
    }

    #[test]
    fn test_tie_gap_uses_confidence() {
        let cfg = MatcherConfig::default();
        let candidates = vec![entry("Scored", 300.0, 12.4, 0.62), entry("Confident", 500.0, 12.0, 0.9)];
        let (winner, _) = select_hero_first(&candidates, &cfg).unwrap();
        assert_eq!(winner.candidate.text, "Confident");

        let apart = vec![entry("Scored", 300.0, 12.6, 0.63), entry("Confident", 500.0, 12.0, 0.9)];
        let (winner, _) = select_hero_first(&apart, &cfg).unwrap();
        assert_eq!(winner.candidate.text, "Scored");
    }

    #[test]
    fn test_exact_ties_keep_first() {
        let cfg = MatcherConfig::default();
        let candidates = vec![entry("First", 300.0, 10.0, 0.5), entry("Second", 500.0, 10.0, 0.5)];
        let (winner, _) = select_hero_first(&candidates, &cfg).unwrap();
        assert_eq!(winner.candidate.text, "First");
    }

    #[test]
    fn test_empty_pool() {
        assert!(select_hero_first(&[], &MatcherConfig::default()).is_none());
    }
}
