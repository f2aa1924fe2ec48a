//! Candidate Scorer & Primary Selector
//!
//! Scores every candidate with the five rules plus adjustments, picks a
//! champion per section, then a global champion, and rejects it when it does
//! not reach the configured minimum. "No primary CTA" is a normal outcome,
//! reported through `Rejection`, never an error.

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::context::ScoringContext;
use crate::element::{Candidate, Viewport};
use crate::rules::{self, Adjustment, LocationBand, TextIntent};
use crate::section::SectionKind;

/// Per-rule explanation of a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub location: i32,
    pub location_band: LocationBand,
    pub text_intent: i32,
    pub text_intent_class: TextIntent,
    pub visual_prominence: i32,
    pub size_ratio: f64,
    pub singularity: i32,
    pub section_size: usize,
    pub context_alignment: i32,
    /// Adjustments that applied, before capping
    pub adjustments: Vec<Adjustment>,
    /// Capped adjustment total
    pub adjustment_total: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Sum of the five sub-scores
    pub base_score: i32,
    /// `base_score` plus the capped adjustments
    pub adjusted_score: i32,
    pub section: SectionKind,
    pub section_priority: u32,
    pub breakdown: ScoreBreakdown,
}

/// Why no primary CTA was returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Nothing to score
    NoCandidates,
    /// The best champion did not reach the minimum score
    BelowThreshold { best_score: i32, min_score: i32 },
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::NoCandidates => "no_candidates",
            Rejection::BelowThreshold { .. } => "below_threshold",
        }
    }
}

/// Outcome of primary CTA selection with everything that led to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimarySelection {
    pub primary: Option<ScoredCandidate>,
    pub rejection: Option<Rejection>,
    /// One champion per section, sections in first-encountered order
    pub section_champions: Vec<ScoredCandidate>,
    /// Every candidate, in input order
    pub scored: Vec<ScoredCandidate>,
}

impl PrimarySelection {
    fn rejected(rejection: Rejection, section_champions: Vec<ScoredCandidate>, scored: Vec<ScoredCandidate>) -> Self {
        Self {
            primary: None,
            rejection: Some(rejection),
            section_champions,
            scored,
        }
    }

    pub fn is_found(&self) -> bool {
        self.primary.is_some()
    }
}

/// Score one candidate.
///
/// `all` drives visual prominence; `section_peers` (the candidate's section,
/// itself included) drives singularity.
pub fn score_cta(
    candidate: &Candidate,
    all: &[Candidate],
    section_peers: &[&Candidate],
    context: &ScoringContext,
    viewport: Viewport,
    config: &AnalyzerConfig,
) -> ScoredCandidate {
    let lexicon = &config.lexicon;
    let y = candidate.coordinates.y;

    let location_band = rules::location_band(y, &config.scoring);
    let text_intent_class = TextIntent::classify(&candidate.text, lexicon);
    let visual_prominence = rules::visual_prominence_score(candidate, all);
    let singularity = rules::singularity_score(candidate, section_peers, lexicon);
    let context_alignment = rules::context_alignment_score(&candidate.text, context, lexicon);
    let applied = rules::adjustments(candidate, context, viewport, &config.scoring, lexicon);
    let adjustment_total = rules::adjustment_total(&applied, &config.scoring);

    let breakdown = ScoreBreakdown {
        location: location_band.score(),
        location_band,
        text_intent: text_intent_class.score(),
        text_intent_class,
        visual_prominence,
        size_ratio: rules::size_ratio(candidate, all),
        singularity,
        section_size: section_peers.len(),
        context_alignment,
        adjustments: applied,
        adjustment_total,
    };

    let base_score = breakdown.location
        + breakdown.text_intent
        + breakdown.visual_prominence
        + breakdown.singularity
        + breakdown.context_alignment;

    let section = config.sections.classify(y, context.page_height);

    ScoredCandidate {
        candidate: candidate.clone(),
        base_score,
        adjusted_score: base_score + adjustment_total,
        section,
        section_priority: config.sections.priority(section),
        breakdown,
    }
}

/// Stable, order-preserving group-by: groups appear in the order their first
/// member appears, members keep input order.
pub fn group_by_section(
    candidates: &[Candidate],
    page_height: f64,
    config: &AnalyzerConfig,
) -> Vec<(SectionKind, Vec<usize>)> {
    let mut groups: Vec<(SectionKind, Vec<usize>)> = Vec::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        let kind = config.sections.classify(candidate.coordinates.y, page_height);
        match groups.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, members)) => members.push(idx),
            None => groups.push((kind, vec![idx])),
        }
    }
    groups
}

/// Highest `adjusted_score`; the first one encountered wins ties
fn champion<'a, I>(scored: I) -> Option<&'a ScoredCandidate>
where
    I: IntoIterator<Item = &'a ScoredCandidate>,
{
    let mut best: Option<&ScoredCandidate> = None;
    for candidate in scored {
        match best {
            Some(b) if candidate.adjusted_score <= b.adjusted_score => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Find the page's primary CTA
pub fn find_primary_cta(
    candidates: &[Candidate],
    context: &ScoringContext,
    viewport: Viewport,
    config: &AnalyzerConfig,
) -> PrimarySelection {
    if candidates.is_empty() {
        tracing::debug!("no candidates to score");
        return PrimarySelection::rejected(Rejection::NoCandidates, Vec::new(), Vec::new());
    }

    let groups = group_by_section(candidates, context.page_height, config);

    // Score in input order so `scored` mirrors the caller's list
    let mut scored: Vec<Option<ScoredCandidate>> = vec![None; candidates.len()];
    for (_, members) in &groups {
        let peers: Vec<&Candidate> = members.iter().map(|&i| &candidates[i]).collect();
        for &idx in members {
            let result = score_cta(&candidates[idx], candidates, &peers, context, viewport, config);
            tracing::debug!(
                text = %result.candidate.text,
                section = %result.section,
                base = result.base_score,
                adjusted = result.adjusted_score,
                "scored candidate"
            );
            scored[idx] = Some(result);
        }
    }
    let scored: Vec<ScoredCandidate> = scored.into_iter().flatten().collect();

    let section_champions: Vec<ScoredCandidate> = groups
        .iter()
        .filter_map(|(_, members)| champion(members.iter().map(|&i| &scored[i])).cloned())
        .collect();

    let Some(best) = champion(section_champions.iter()).cloned() else {
        return PrimarySelection::rejected(Rejection::NoCandidates, section_champions, scored);
    };

    let min_score = config.scoring.min_primary_score;
    if best.adjusted_score < min_score {
        tracing::info!(
            best_score = best.adjusted_score,
            min_score,
            "no primary CTA: best candidate below threshold"
        );
        return PrimarySelection::rejected(
            Rejection::BelowThreshold {
                best_score: best.adjusted_score,
                min_score,
            },
            section_champions,
            scored,
        );
    }

    tracing::info!(
        text = %best.candidate.text,
        section = %best.section,
        score = best.adjusted_score,
        "primary CTA selected"
    );

    PrimarySelection {
        primary: Some(best),
        rejection: None,
        section_champions,
        scored,
    }
}
