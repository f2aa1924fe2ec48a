//! Text-to-element matcher
//!
//! Reconciles a free-text CTA guess (usually produced by a vision model) with
//! the concrete elements of a page. The guess is treated as a hint: elements
//! are admitted either because their text resembles it or because they look
//! like a strong CTA on their own, and the winner is picked hero-first.
//!
//! "No match" is an ordinary outcome. The trace is always returned so that
//! close calls can be audited afterwards.

pub mod cascade;
pub mod intent;
pub mod priority;
pub mod prominence;
pub mod similarity;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AnalyzerConfig;
use crate::element::{Candidate, Coordinates, ElementKind, TextBlock, Viewport};

use cascade::{select_hero_first, CascadeBucket, MatchCandidate};
use intent::MatchIntent;
use priority::MatchTier;
use prominence::{visual_prominence, Prominence};
use similarity::best_similarity;

/// A probabilistic CTA guess
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CtaGuess {
    pub primary_text: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Confidence reported by whoever produced the guess; informational only
    #[serde(default)]
    pub confidence: f64,
    /// The guess says the CTA submits a form
    #[serde(default)]
    pub form_associated: bool,
}

impl CtaGuess {
    pub fn new(primary_text: &str) -> Self {
        Self {
            primary_text: primary_text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_alternative(mut self, text: &str) -> Self {
        self.alternatives.push(text.to_string());
        self
    }

    pub fn form_associated(mut self, associated: bool) -> Self {
        self.form_associated = associated;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Button,
    Link,
    /// A button merged with its nearby form
    FormButton,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Button => "button",
            MatchKind::Link => "link",
            MatchKind::FormButton => "form-button",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ElementKind> for MatchKind {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Link => MatchKind::Link,
            ElementKind::Button | ElementKind::Form => MatchKind::Button,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedElement {
    pub coordinates: Coordinates,
    pub text: String,
    pub kind: MatchKind,
    pub confidence: f64,
    pub tier: MatchTier,
    pub priority_score: f64,
}

/// What the matcher computed for one evaluated element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub text: String,
    pub kind: ElementKind,
    pub similarity: f64,
    pub tier: MatchTier,
    pub priority_score: f64,
    pub text_intent: MatchIntent,
    pub prominence: Prominence,
    pub enhanced_score: f64,
    pub confidence: f64,
    pub admitted: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DebugTrace {
    pub entries: Vec<TraceEntry>,
    /// Cascade bucket the winner came from
    pub bucket: Option<CascadeBucket>,
    pub form_merged: bool,
}

impl DebugTrace {
    pub fn admitted_count(&self) -> usize {
        self.entries.iter().filter(|e| e.admitted).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matched: Option<MatchedElement>,
    pub trace: DebugTrace,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}

/// Bonuses that depend on the element's role rather than its text or looks
fn contextual_bonus(candidate: &Candidate) -> f64 {
    let mut bonus = 0.0;
    if candidate.kind == ElementKind::Button && candidate.has_form_action == Some(true) {
        bonus += 2.0;
    }
    if candidate.is_above_fold {
        bonus += 1.0;
    }
    if candidate.kind == ElementKind::Link && candidate.has_button_appearance() {
        bonus += 1.0;
    }
    bonus
}

/// Match `guess` against `elements`.
///
/// Visible buttons and links are evaluated; forms only take part in the
/// final merge when the guess is form associated.
pub fn match_cta(
    guess: &CtaGuess,
    elements: &[Candidate],
    text_blocks: &[TextBlock],
    viewport: Viewport,
    config: &AnalyzerConfig,
) -> MatchOutcome {
    let cfg = &config.matcher;
    let lexicon = &config.lexicon;

    let evaluated: Vec<&Candidate> = elements
        .iter()
        .filter(|c| c.is_visible && matches!(c.kind, ElementKind::Button | ElementKind::Link))
        .collect();

    let average_area = if evaluated.is_empty() {
        0.0
    } else {
        evaluated.iter().map(|c| c.coordinates.area()).sum::<f64>() / evaluated.len() as f64
    };

    let mut trace = DebugTrace::default();
    let mut admitted = Vec::new();

    for candidate in evaluated {
        let similarity = best_similarity(&candidate.text, &guess.primary_text, &guess.alternatives);
        let (tier, priority_score) = priority::priority(&candidate.coordinates, viewport, cfg);
        let text_intent = MatchIntent::classify(&candidate.text, lexicon);
        let prominence =
            visual_prominence(candidate, average_area, text_blocks, viewport, cfg, lexicon);

        let enhanced_score =
            priority_score + text_intent.score() + prominence.total + contextual_bonus(candidate);
        let confidence = similarity.max(enhanced_score / cfg.confidence_divisor).min(1.0);

        let score_bar = match candidate.kind {
            ElementKind::Link => cfg.link_score_bar,
            _ => cfg.button_score_bar,
        };
        let is_admitted = similarity > cfg.similarity_bar || enhanced_score > score_bar;

        tracing::debug!(
            text = %candidate.text,
            kind = candidate.kind.as_str(),
            similarity,
            tier = tier.as_str(),
            enhanced_score,
            admitted = is_admitted,
            "evaluated element"
        );

        trace.entries.push(TraceEntry {
            text: candidate.text.clone(),
            kind: candidate.kind,
            similarity,
            tier,
            priority_score,
            text_intent,
            prominence,
            enhanced_score,
            confidence,
            admitted: is_admitted,
        });

        if is_admitted {
            admitted.push(MatchCandidate {
                candidate: candidate.clone(),
                similarity,
                tier,
                priority_score,
                enhanced_score,
                confidence,
            });
        }
    }

    let Some((winner, bucket)) = select_hero_first(&admitted, cfg) else {
        tracing::info!(
            guess = %guess.primary_text,
            evaluated = trace.entries.len(),
            "no element matched the guess"
        );
        return MatchOutcome { matched: None, trace };
    };
    trace.bucket = Some(bucket);

    let mut matched = MatchedElement {
        coordinates: winner.candidate.coordinates,
        text: winner.candidate.text.clone(),
        kind: winner.candidate.kind.into(),
        confidence: winner.confidence,
        tier: winner.tier,
        priority_score: winner.priority_score,
    };

    if guess.form_associated {
        if let Some(form) = nearest_form(&matched.coordinates, elements) {
            let gap = matched.coordinates.vertical_gap(&form.coordinates);
            if gap <= cfg.form_merge_distance {
                matched.coordinates = matched.coordinates.union(&form.coordinates);
                matched.kind = MatchKind::FormButton;
                trace.form_merged = true;
            } else {
                tracing::debug!(gap, "nearest form too far to merge");
            }
        }
    }

    tracing::info!(
        text = %matched.text,
        kind = matched.kind.as_str(),
        bucket = bucket.as_str(),
        confidence = matched.confidence,
        "matched guess to element"
    );

    MatchOutcome {
        matched: Some(matched),
        trace,
    }
}

/// Closest form by vertical gap; the first one wins ties
fn nearest_form<'a>(target: &Coordinates, elements: &'a [Candidate]) -> Option<&'a Candidate> {
    let mut best: Option<(&Candidate, f64)> = None;
    for form in elements.iter().filter(|c| c.kind == ElementKind::Form) {
        let gap = target.vertical_gap(&form.coordinates);
        match best {
            Some((_, best_gap)) if gap >= best_gap => {}
            _ => best = Some((form, gap)),
        }
    }
    best.map(|(form, _)| form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::StyleHints;
    use crate::lexicon::Lexicon;

    const VIEWPORT: Viewport = Viewport { width: 1920.0, height: 1080.0 };

    fn button(text: &str, x: f64, y: f64, w: f64, h: f64) -> Candidate {
        Candidate::new(
            text,
            Coordinates::new(x, y, w, h),
            ElementKind::Button,
            StyleHints::default(),
            &Lexicon::default(),
        )
    }

    fn link(text: &str, x: f64, y: f64) -> Candidate {
        Candidate::new(
            text,
            Coordinates::new(x, y, 80.0, 20.0),
            ElementKind::Link,
            StyleHints::new("nav-link"),
            &Lexicon::default(),
        )
    }

    fn form(x: f64, y: f64, w: f64, h: f64) -> Candidate {
        Candidate::new(
            "",
            Coordinates::new(x, y, w, h),
            ElementKind::Form,
            StyleHints::default(),
            &Lexicon::default(),
        )
    }

    #[test]
    fn test_hero_sign_up_beats_header_sign_up() {
        let config = AnalyzerConfig::default();
        let elements = vec![
            button("Sign Up", 1700.0, 120.0, 120.0, 40.0),
            button("Sign Up", 860.0, 300.0, 200.0, 50.0),
        ];
        let outcome = match_cta(&CtaGuess::new("Sign Up"), &elements, &[], VIEWPORT, &config);

        let matched = outcome.matched.unwrap();
        assert_eq!(matched.coordinates.y, 300.0);
        assert_eq!(matched.tier, MatchTier::Hero);
        assert_eq!(matched.kind, MatchKind::Button);
        assert_eq!(matched.confidence, 1.0);
        assert_eq!(outcome.trace.bucket, Some(CascadeBucket::Hero));
        assert_eq!(outcome.trace.entries.len(), 2);
        assert_eq!(outcome.trace.entries[0].tier, MatchTier::Header);
    }

    #[test]
    fn test_no_match_keeps_trace() {
        let config = AnalyzerConfig::default();
        let elements = vec![link("About", 100.0, 20.0), link("Blog", 200.0, 20.0)];
        let outcome = match_cta(&CtaGuess::new("Start free trial"), &elements, &[], VIEWPORT, &config);

        assert!(!outcome.is_match());
        assert_eq!(outcome.trace.entries.len(), 2);
        assert_eq!(outcome.trace.admitted_count(), 0);
        assert!(outcome.trace.bucket.is_none());
        // header link: priority ~2.05, intent 0 ("about" is navigation), above fold +1
        assert!(outcome.trace.entries.iter().all(|e| e.enhanced_score <= 6.0));
    }

    #[test]
    fn test_alternatives_admit_elements() {
        let config = AnalyzerConfig::default();
        let elements = vec![link("Create account", 1700.0, 1400.0)];
        let guess = CtaGuess::new("Join now").with_alternative("Create Account");
        let outcome = match_cta(&guess, &elements, &[], VIEWPORT, &config);

        let matched = outcome.matched.unwrap();
        assert_eq!(matched.kind, MatchKind::Link);
        assert_eq!(matched.tier, MatchTier::BelowFold);
        assert_eq!(outcome.trace.bucket, Some(CascadeBucket::AllCandidates));
    }

    #[test]
    fn test_invisible_elements_are_skipped() {
        let config = AnalyzerConfig::default();
        let elements = vec![button("Buy now", 860.0, 400.0, 200.0, 50.0).visible(false)];
        let outcome = match_cta(&CtaGuess::new("Buy now"), &elements, &[], VIEWPORT, &config);
        assert!(outcome.matched.is_none());
        assert!(outcome.trace.entries.is_empty());
    }

    #[test]
    fn test_form_merge_within_distance() {
        let config = AnalyzerConfig::default();
        let elements = vec![
            button("Subscribe", 860.0, 400.0, 200.0, 50.0),
            form(760.0, 2000.0, 400.0, 100.0),
            form(760.0, 500.0, 400.0, 200.0),
        ];
        let guess = CtaGuess::new("Subscribe").form_associated(true);
        let outcome = match_cta(&guess, &elements, &[], VIEWPORT, &config);

        let matched = outcome.matched.unwrap();
        assert_eq!(matched.kind, MatchKind::FormButton);
        assert_eq!(matched.coordinates, Coordinates::new(760.0, 400.0, 400.0, 300.0));
        assert!(outcome.trace.form_merged);
        // forms are not evaluated on their own
        assert_eq!(outcome.trace.entries.len(), 1);
    }

    #[test]
    fn test_form_merge_beyond_distance() {
        let config = AnalyzerConfig::default();
        let elements = vec![
            button("Subscribe", 860.0, 400.0, 200.0, 50.0),
            form(760.0, 700.0, 400.0, 200.0),
        ];
        let guess = CtaGuess::new("Subscribe").form_associated(true);
        let outcome = match_cta(&guess, &elements, &[], VIEWPORT, &config);

        let matched = outcome.matched.unwrap();
        assert_eq!(matched.kind, MatchKind::Button);
        assert_eq!(matched.coordinates, Coordinates::new(860.0, 400.0, 200.0, 50.0));
        assert!(!outcome.trace.form_merged);
    }

    #[test]
    fn test_form_ignored_without_hint() {
        let config = AnalyzerConfig::default();
        let elements = vec![
            button("Subscribe", 860.0, 400.0, 200.0, 50.0),
            form(760.0, 460.0, 400.0, 200.0),
        ];
        let outcome = match_cta(&CtaGuess::new("Subscribe"), &elements, &[], VIEWPORT, &config);
        assert_eq!(outcome.matched.unwrap().kind, MatchKind::Button);
    }

    #[test]
    fn test_strong_hero_button_admitted_without_similarity() {
        let config = AnalyzerConfig::default();
        // priority 11, intent 3, above fold +1: already over the button bar
        let elements = vec![button("Get started", 860.0, 400.0, 200.0, 50.0)];
        let outcome = match_cta(&CtaGuess::new("Pricing"), &elements, &[], VIEWPORT, &config);

        let entry = &outcome.trace.entries[0];
        assert_eq!(entry.similarity, 0.0);
        assert!(entry.enhanced_score > 8.0);
        assert!(entry.admitted);
        let matched = outcome.matched.unwrap();
        assert!(matched.confidence > 0.0 && matched.confidence <= 1.0);
        assert!((matched.confidence - entry.enhanced_score / 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_contextual_bonus() {
        let lex = Lexicon::default();
        let submit = button("Go", 0.0, 1200.0, 10.0, 10.0).with_form_action(true);
        assert_eq!(contextual_bonus(&submit), 2.0);

        let styled = Candidate::new(
            "Go",
            Coordinates::new(0.0, 100.0, 10.0, 10.0),
            ElementKind::Link,
            StyleHints::new("btn"),
            &lex,
        );
        assert_eq!(contextual_bonus(&styled), 2.0);
    }

    #[test]
    fn test_matching_is_idempotent() {
        let config = AnalyzerConfig::default();
        let elements = vec![
            button("Sign Up", 1700.0, 120.0, 120.0, 40.0),
            button("Sign Up", 860.0, 300.0, 200.0, 50.0),
            link("Pricing", 300.0, 20.0),
        ];
        let guess = CtaGuess::new("Sign up");
        let first = match_cta(&guess, &elements, &[], VIEWPORT, &config);
        let second = match_cta(&guess, &elements, &[], VIEWPORT, &config);
        assert_eq!(first, second);
    }
}
