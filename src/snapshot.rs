//! Captured DOM snapshot, as handed over by the capture step

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::AnalyzerConfig;
use crate::context::{detect_signals, ScoringContext};
use crate::element::{Candidate, Coordinates, ElementKind, StyleHints, TextBlock, Viewport};
use crate::error::{CtaError, Result};
use crate::lexicon::Lexicon;

fn default_visible() -> bool {
    true
}

/// One interactive element as captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotElement {
    #[serde(default)]
    pub text: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub class_name: String,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    /// Absent means "decide from y"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_above_fold: Option<bool>,
    #[serde(default)]
    pub looks_like_button: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_form_action: Option<bool>,
}

impl SnapshotElement {
    pub fn new(text: &str, coordinates: Coordinates) -> Self {
        Self {
            text: text.to_string(),
            coordinates,
            class_name: String::new(),
            is_visible: true,
            is_above_fold: None,
            looks_like_button: false,
            has_form_action: None,
        }
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    /// Elements without a captured above-fold flag are placed against `fold_line`
    fn to_candidate(&self, kind: ElementKind, lexicon: &Lexicon, fold_line: f64) -> Candidate {
        let style = StyleHints {
            class_name: self.class_name.clone(),
            looks_like_button: self.looks_like_button,
        };
        let mut candidate = Candidate::new(&self.text, self.coordinates, kind, style, lexicon)
            .visible(self.is_visible)
            .fold_at(fold_line);
        if let Some(above) = self.is_above_fold {
            candidate = candidate.above_fold(above);
        }
        if let Some(action) = self.has_form_action {
            candidate = candidate.with_form_action(action);
        }
        candidate
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub viewport: Viewport,
    pub page_height: f64,
    #[serde(default)]
    pub buttons: Vec<SnapshotElement>,
    #[serde(default)]
    pub links: Vec<SnapshotElement>,
    #[serde(default)]
    pub forms: Vec<SnapshotElement>,
    #[serde(default)]
    pub text_blocks: Vec<TextBlock>,
}

impl PageSnapshot {
    pub fn new(viewport: Viewport, page_height: f64) -> Self {
        Self {
            url: None,
            viewport,
            page_height,
            buttons: Vec::new(),
            links: Vec::new(),
            forms: Vec::new(),
            text_blocks: Vec::new(),
        }
    }

    /// Parse and validate a JSON snapshot
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            buttons = snapshot.buttons.len(),
            links = snapshot.links.len(),
            forms = snapshot.forms.len(),
            "loaded page snapshot"
        );
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<()> {
        let vp = self.viewport;
        if !(vp.width.is_finite() && vp.height.is_finite()) || vp.width <= 0.0 || vp.height <= 0.0 {
            return Err(CtaError::SnapshotError(format!(
                "viewport must be non-empty, got {}x{}",
                vp.width, vp.height
            )));
        }
        if !self.page_height.is_finite() || self.page_height < 0.0 {
            return Err(CtaError::SnapshotError(format!(
                "page_height must be a non-negative number, got {}",
                self.page_height
            )));
        }

        let groups = [
            ("buttons", &self.buttons),
            ("links", &self.links),
            ("forms", &self.forms),
        ];
        for (name, elements) in groups {
            for (i, element) in elements.iter().enumerate() {
                if !element.coordinates.is_well_formed() {
                    return Err(CtaError::SnapshotError(format!(
                        "{}[{}] ({:?}) has malformed coordinates",
                        name, i, element.text
                    )));
                }
            }
        }
        for (i, block) in self.text_blocks.iter().enumerate() {
            if !block.coordinates.is_well_formed() {
                return Err(CtaError::SnapshotError(format!(
                    "text_blocks[{}] has malformed coordinates",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Visible elements as candidates: buttons, then links, then forms
    pub fn candidates(&self, config: &AnalyzerConfig) -> Vec<Candidate> {
        self.elements(config)
            .into_iter()
            .filter(|c| c.is_visible)
            .collect()
    }

    /// Every element as a candidate, hidden ones included, in the same order
    pub fn elements(&self, config: &AnalyzerConfig) -> Vec<Candidate> {
        let lexicon = &config.lexicon;
        let fold_line = config.matcher.fold_line;
        let convert = |kind| move |e: &SnapshotElement| e.to_candidate(kind, lexicon, fold_line);
        let buttons = self.buttons.iter().map(convert(ElementKind::Button));
        let links = self.links.iter().map(convert(ElementKind::Link));
        let forms = self.forms.iter().map(convert(ElementKind::Form));
        buttons.chain(links).chain(forms).collect()
    }

    /// Page-level facts for the scorer
    pub fn scoring_context(&self, candidates: &[Candidate], config: &AnalyzerConfig) -> ScoringContext {
        let texts = self
            .text_blocks
            .iter()
            .map(|b| b.text.as_str())
            .chain(candidates.iter().map(|c| c.text.as_str()));
        let (value_proposition, urgency) = detect_signals(texts, &config.lexicon);

        ScoringContext::new(self.page_height)
            .with_signals(value_proposition, urgency)
            .with_counts(candidates, &config.sections)
    }
}
