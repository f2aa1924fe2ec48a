//! Scoring Rules - Independent sub-scores for a CTA candidate
//!
//! Each rule is a pure function of one candidate plus the minimal context it
//! needs. Maxima: location 2, text intent 3 (navigation is -1), visual
//! prominence 3, singularity 2, context alignment 2, adjustments 5.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::context::ScoringContext;
use crate::element::{Candidate, Viewport};
use crate::lexicon::{normalize_text, Lexicon};

/// Where a candidate sits relative to the fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationBand {
    AboveFold,
    MidPage,
    BelowFold,
}

impl LocationBand {
    pub fn score(&self) -> i32 {
        match self {
            LocationBand::AboveFold => 2,
            LocationBand::MidPage => 1,
            LocationBand::BelowFold => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationBand::AboveFold => "above-fold",
            LocationBand::MidPage => "mid-page",
            LocationBand::BelowFold => "below-fold",
        }
    }
}

pub fn location_band(y: f64, config: &ScoringConfig) -> LocationBand {
    if y <= config.above_fold_max_y {
        LocationBand::AboveFold
    } else if y <= config.mid_page_max_y {
        LocationBand::MidPage
    } else {
        LocationBand::BelowFold
    }
}

pub fn location_score(y: f64, config: &ScoringConfig) -> i32 {
    location_band(y, config).score()
}

/// The candidate scorer's text-intent strategy (-1..=3).
///
/// The matcher uses its own 0..=4 scale, see `matcher::intent::MatchIntent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextIntent {
    Navigation,
    StrongAction,
    MediumAction,
    Passive,
    Generic,
    Empty,
}

impl TextIntent {
    /// Classify text in strict priority order: navigation, strong, medium,
    /// passive, anything else.
    pub fn classify(text: &str, lexicon: &Lexicon) -> Self {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            TextIntent::Empty
        } else if lexicon.is_navigation(&normalized) {
            TextIntent::Navigation
        } else if lexicon.is_strong_action(&normalized) {
            TextIntent::StrongAction
        } else if lexicon.is_medium_action(&normalized) {
            TextIntent::MediumAction
        } else if lexicon.is_passive(&normalized) {
            TextIntent::Passive
        } else if normalized.contains("click here") {
            TextIntent::Empty
        } else {
            TextIntent::Generic
        }
    }

    pub fn score(&self) -> i32 {
        match self {
            TextIntent::Navigation => -1,
            TextIntent::StrongAction => 3,
            TextIntent::MediumAction => 2,
            TextIntent::Generic => 1,
            TextIntent::Passive | TextIntent::Empty => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextIntent::Navigation => "navigation",
            TextIntent::StrongAction => "strong action",
            TextIntent::MediumAction => "medium action",
            TextIntent::Passive => "passive",
            TextIntent::Generic => "generic",
            TextIntent::Empty => "no text",
        }
    }
}

pub fn text_intent_score(text: &str, lexicon: &Lexicon) -> i32 {
    TextIntent::classify(text, lexicon).score()
}

/// Candidate area divided by the mean area of all candidates (0 when undefined)
pub fn size_ratio(candidate: &Candidate, all: &[Candidate]) -> f64 {
    if all.is_empty() {
        return 0.0;
    }
    let mean = all.iter().map(|c| c.coordinates.area()).sum::<f64>() / all.len() as f64;
    if mean > 0.0 {
        candidate.coordinates.area() / mean
    } else {
        0.0
    }
}

pub fn visual_prominence_score(candidate: &Candidate, all: &[Candidate]) -> i32 {
    let ratio = size_ratio(candidate, all);
    let button = candidate.has_button_appearance();
    let prominent = candidate.has_prominent_appearance();

    if ratio > 1.5 && button && prominent {
        3
    } else if ratio > 1.2 && button {
        2
    } else if button || ratio > 1.0 {
        1
    } else {
        0
    }
}

/// How much the candidate stands alone in its section.
///
/// `section_peers` are all candidates of the candidate's section, itself
/// included.
pub fn singularity_score(candidate: &Candidate, section_peers: &[&Candidate], lexicon: &Lexicon) -> i32 {
    match section_peers.len() {
        0 | 1 => 2,
        2..=3 => {
            let own = text_intent_score(&candidate.text, lexicon) as f64;
            let average = section_peers
                .iter()
                .map(|c| text_intent_score(&c.text, lexicon) as f64)
                .sum::<f64>()
                / section_peers.len() as f64;
            if own > average {
                1
            } else {
                0
            }
        }
        _ => 0,
    }
}

pub fn context_alignment_score(text: &str, context: &ScoringContext, lexicon: &Lexicon) -> i32 {
    let normalized = normalize_text(text);
    if context.has_value_proposition && lexicon.is_perfect_alignment(&normalized) {
        2
    } else if text_intent_score(text, lexicon) >= 2 {
        1
    } else {
        0
    }
}

/// One +1 step of the adjustment layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// Page pairs a value proposition with urgency
    ValuePropositionWithUrgency,
    /// Center lies in the upper-left quadrant of the viewport
    UpperLeftQuadrant,
    /// Sits where a Z-pattern scan ends
    ZPatternEndpoint,
    /// Text mentions savings, free or trial
    ValueKeyword,
    /// Below the fold on a long page
    LongPageBelowFold,
}

impl Adjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Adjustment::ValuePropositionWithUrgency => "value proposition + urgency",
            Adjustment::UpperLeftQuadrant => "upper-left quadrant",
            Adjustment::ZPatternEndpoint => "Z-pattern endpoint",
            Adjustment::ValueKeyword => "value keyword",
            Adjustment::LongPageBelowFold => "long page, below fold",
        }
    }
}

/// Collect every adjustment that applies, in a fixed order
pub fn adjustments(
    candidate: &Candidate,
    context: &ScoringContext,
    viewport: Viewport,
    config: &ScoringConfig,
    lexicon: &Lexicon,
) -> Vec<Adjustment> {
    let mut applied = Vec::new();
    let coords = &candidate.coordinates;

    if context.has_value_proposition && context.has_urgency_text {
        applied.push(Adjustment::ValuePropositionWithUrgency);
    }

    if coords.center_x() < viewport.center_x() && coords.center_y() < viewport.center_y() {
        applied.push(Adjustment::UpperLeftQuadrant);
    }

    let right_side = coords.x > viewport.width * config.z_pattern_x_ratio;
    let upper_half = coords.y < viewport.center_y();
    let bottom_band = coords.y > viewport.height * config.z_pattern_bottom_ratio;
    if right_side && (upper_half || bottom_band) {
        applied.push(Adjustment::ZPatternEndpoint);
    }

    if lexicon.has_value_keyword(&normalize_text(&candidate.text)) {
        applied.push(Adjustment::ValueKeyword);
    }

    if context.page_height > config.long_page_height && coords.y > config.fold_line {
        applied.push(Adjustment::LongPageBelowFold);
    }

    applied
}

/// Sum of applied adjustments, capped
pub fn adjustment_total(applied: &[Adjustment], config: &ScoringConfig) -> i32 {
    (applied.len() as i32).min(config.max_adjustment).max(0)
}
