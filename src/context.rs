//! Page-level facts the scoring rules read but never modify

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::element::Candidate;
use crate::lexicon::{normalize_text, Lexicon};
use crate::section::{SectionKind, SectionTable};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringContext {
    pub page_height: f64,
    pub total_candidates: usize,
    pub section_counts: BTreeMap<SectionKind, usize>,
    /// Page copy states a value proposition
    pub has_value_proposition: bool,
    /// Page copy creates urgency
    pub has_urgency_text: bool,
}

impl ScoringContext {
    pub fn new(page_height: f64) -> Self {
        Self {
            page_height,
            ..Self::default()
        }
    }

    pub fn with_signals(mut self, has_value_proposition: bool, has_urgency_text: bool) -> Self {
        self.has_value_proposition = has_value_proposition;
        self.has_urgency_text = has_urgency_text;
        self
    }

    /// Fill in total and per-section counts for `candidates`
    pub fn with_counts(mut self, candidates: &[Candidate], sections: &SectionTable) -> Self {
        self.total_candidates = candidates.len();
        self.section_counts.clear();
        for candidate in candidates {
            let kind = sections.classify(candidate.coordinates.y, self.page_height);
            *self.section_counts.entry(kind).or_insert(0) += 1;
        }
        self
    }

    pub fn count_in(&self, kind: SectionKind) -> usize {
        self.section_counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Detect value-proposition and urgency copy across a set of texts
pub fn detect_signals<'a, I>(texts: I, lexicon: &Lexicon) -> (bool, bool)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut value_proposition = false;
    let mut urgency = false;
    for text in texts {
        let normalized = normalize_text(text);
        value_proposition |= lexicon.is_value_proposition(&normalized);
        urgency |= lexicon.is_urgency(&normalized);
        if value_proposition && urgency {
            break;
        }
    }
    (value_proposition, urgency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Coordinates, ElementKind, StyleHints};

    #[test]
    fn test_counts_per_section() {
        let lex = Lexicon::default();
        let make = |y: f64| {
            Candidate::new(
                "Go",
                Coordinates::new(0.0, y, 10.0, 10.0),
                ElementKind::Button,
                StyleHints::default(),
                &lex,
            )
        };
        let candidates = vec![make(50.0), make(300.0), make(400.0), make(2000.0)];
        let ctx = ScoringContext::new(5000.0).with_counts(&candidates, &SectionTable::default());
        assert_eq!(ctx.total_candidates, 4);
        assert_eq!(ctx.count_in(SectionKind::Header), 1);
        assert_eq!(ctx.count_in(SectionKind::Hero), 2);
        assert_eq!(ctx.count_in(SectionKind::BelowFold), 1);
        assert_eq!(ctx.count_in(SectionKind::Footer), 0);
    }

    #[test]
    fn test_detect_signals() {
        let lex = Lexicon::default();
        let (vp, urgency) = detect_signals(["Save hours every week", "Welcome"], &lex);
        assert!(vp);
        assert!(!urgency);

        let (_, urgency) = detect_signals(["Offer ends Sunday - limited time"], &lex);
        assert!(urgency);

        let (vp, urgency) = detect_signals(Vec::<&str>::new(), &lex);
        assert!(!vp && !urgency);
    }
}
