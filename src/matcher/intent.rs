//! The matcher's text-intent strategy (0..=4)

use serde::{Deserialize, Serialize};

use crate::lexicon::{normalize_text, Lexicon};

/// Unlike the scorer's scale this one tops out with product-value phrases,
/// and navigation or passive text simply scores nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchIntent {
    ProductValue,
    StrongAction,
    MediumAction,
    Other,
    NoIntent,
}

impl MatchIntent {
    pub fn classify(text: &str, lexicon: &Lexicon) -> Self {
        let normalized = normalize_text(text);
        if normalized.is_empty() || lexicon.is_navigation(&normalized) {
            MatchIntent::NoIntent
        } else if lexicon.is_product_value(&normalized) {
            MatchIntent::ProductValue
        } else if lexicon.is_strong_action(&normalized) {
            MatchIntent::StrongAction
        } else if lexicon.is_medium_action(&normalized) {
            MatchIntent::MediumAction
        } else if lexicon.is_passive(&normalized) || normalized.contains("click here") {
            MatchIntent::NoIntent
        } else {
            MatchIntent::Other
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            MatchIntent::ProductValue => 4.0,
            MatchIntent::StrongAction => 3.0,
            MatchIntent::MediumAction => 2.0,
            MatchIntent::Other => 1.0,
            MatchIntent::NoIntent => 0.0,
        }
    }
}
