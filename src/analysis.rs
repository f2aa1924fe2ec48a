//! Snapshot-level entry points
//!
//! Both functions are pure: they read the snapshot and config and allocate
//! their own results, so a desktop and a mobile snapshot of one page can be
//! analyzed concurrently against the same `AnalyzerConfig`.

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::context::ScoringContext;
use crate::matcher::{match_cta, CtaGuess, MatchOutcome};
use crate::scorer::{find_primary_cta, PrimarySelection};
use crate::snapshot::PageSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub context: ScoringContext,
    pub selection: PrimarySelection,
}

/// Find the primary CTA of a captured page
pub fn analyze_page(snapshot: &PageSnapshot, config: &AnalyzerConfig) -> PageAnalysis {
    let candidates = snapshot.candidates(config);
    let context = snapshot.scoring_context(&candidates, config);
    let selection = find_primary_cta(&candidates, &context, snapshot.viewport, config);
    PageAnalysis {
        url: snapshot.url.clone(),
        context,
        selection,
    }
}

/// Anchor a CTA guess to one of the page's elements
pub fn match_guess(snapshot: &PageSnapshot, guess: &CtaGuess, config: &AnalyzerConfig) -> MatchOutcome {
    let elements = snapshot.candidates(config);
    match_cta(guess, &elements, &snapshot.text_blocks, snapshot.viewport, config)
}
