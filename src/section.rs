//! Section Classifier - Map a vertical position to a page zone
//!
//! Sections are evaluated in table order and the first span containing `y`
//! wins. The canonical table puts header and hero first, then the remaining
//! fixed bands, then the page-relative footer, then a below-fold catch-all,
//! which makes classification total for every `(y, page_height)`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CtaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Header,
    Hero,
    Features,
    Testimonials,
    Footer,
    BelowFold,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Hero => "hero",
            SectionKind::Features => "features",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Footer => "footer",
            SectionKind::BelowFold => "below-fold",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The vertical extent a section claims
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionSpan {
    /// Fixed half-open band `[min_y, max_y)` from the top of the page
    Band { min_y: f64, max_y: f64 },
    /// The last `depth` pixels of the page, `[page_height - depth, inf)`
    Tail { depth: f64 },
    /// Everything not claimed by an earlier section
    CatchAll,
}

impl SectionSpan {
    pub fn contains(&self, y: f64, page_height: f64) -> bool {
        match *self {
            SectionSpan::Band { min_y, max_y } => y >= min_y && y < max_y,
            SectionSpan::Tail { depth } => y >= (page_height - depth).max(0.0),
            SectionSpan::CatchAll => true,
        }
    }

    /// Resolved `[min, max)` for display; `None` means unbounded
    pub fn resolve(&self, page_height: f64) -> (f64, Option<f64>) {
        match *self {
            SectionSpan::Band { min_y, max_y } => (min_y, Some(max_y)),
            SectionSpan::Tail { depth } => ((page_height - depth).max(0.0), None),
            SectionSpan::CatchAll => (0.0, None),
        }
    }
}

/// One row of the section table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRange {
    pub kind: SectionKind,
    /// Relative weight of the zone; higher means more conversion intent
    pub priority: u32,
    pub span: SectionSpan,
}

impl SectionRange {
    fn band(kind: SectionKind, priority: u32, min_y: f64, max_y: f64) -> Self {
        Self {
            kind,
            priority,
            span: SectionSpan::Band { min_y, max_y },
        }
    }
}

/// Ordered section table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionTable {
    pub sections: Vec<SectionRange>,
}

impl Default for SectionTable {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionRange::band(SectionKind::Header, 10, 0.0, 150.0),
                SectionRange::band(SectionKind::Hero, 15, 150.0, 800.0),
                SectionRange::band(SectionKind::Features, 8, 800.0, 1000.0),
                SectionRange::band(SectionKind::Testimonials, 5, 1000.0, 1500.0),
                SectionRange {
                    kind: SectionKind::Footer,
                    priority: 3,
                    span: SectionSpan::Tail { depth: 300.0 },
                },
                SectionRange {
                    kind: SectionKind::BelowFold,
                    priority: 2,
                    span: SectionSpan::CatchAll,
                },
            ],
        }
    }
}

impl SectionTable {
    /// Classify a vertical position.
    ///
    /// Negative offsets (elements scrolled above the origin) count as the top
    /// of the page. A table without a catch-all still classifies everything
    /// as below-fold rather than failing.
    pub fn classify(&self, y: f64, page_height: f64) -> SectionKind {
        self.range_for(y, page_height)
            .map(|r| r.kind)
            .unwrap_or(SectionKind::BelowFold)
    }

    pub fn range_for(&self, y: f64, page_height: f64) -> Option<&SectionRange> {
        let y = if y.is_finite() { y.max(0.0) } else { 0.0 };
        self.sections.iter().find(|r| r.span.contains(y, page_height))
    }

    pub fn priority(&self, kind: SectionKind) -> u32 {
        self.sections
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.priority)
            .unwrap_or(0)
    }

    /// Check that the table partitions `[0, inf)`.
    ///
    /// Header and hero must come first, bands must be contiguous from 0,
    /// page-relative tails may follow the bands, and the last row must be a
    /// catch-all.
    pub fn validate(&self) -> Result<()> {
        let kinds: Vec<SectionKind> = self.sections.iter().map(|r| r.kind).collect();
        if kinds.len() < 3 || kinds[0] != SectionKind::Header || kinds[1] != SectionKind::Hero {
            return Err(CtaError::InvalidSectionTable(
                "the first two sections must be header then hero".into(),
            ));
        }

        let mut expected_min: f64 = 0.0;
        let mut bands_done = false;
        for (idx, range) in self.sections.iter().enumerate() {
            let is_last = idx + 1 == self.sections.len();
            match range.span {
                SectionSpan::Band { min_y, max_y } => {
                    if bands_done {
                        return Err(CtaError::InvalidSectionTable(format!(
                            "band '{}' follows a page-relative section",
                            range.kind
                        )));
                    }
                    if !(min_y.is_finite() && max_y.is_finite()) || max_y <= min_y {
                        return Err(CtaError::InvalidSectionTable(format!(
                            "band '{}' has an empty or non-finite range",
                            range.kind
                        )));
                    }
                    if min_y != expected_min {
                        return Err(CtaError::InvalidSectionTable(format!(
                            "band '{}' starts at {} but the previous band ends at {}",
                            range.kind, min_y, expected_min
                        )));
                    }
                    expected_min = max_y;
                }
                SectionSpan::Tail { depth } => {
                    if !depth.is_finite() || depth < 0.0 {
                        return Err(CtaError::InvalidSectionTable(format!(
                            "tail '{}' has an invalid depth",
                            range.kind
                        )));
                    }
                    bands_done = true;
                }
                SectionSpan::CatchAll => {
                    if !is_last {
                        return Err(CtaError::InvalidSectionTable(format!(
                            "catch-all '{}' must be the last section",
                            range.kind
                        )));
                    }
                }
            }
        }

        match self.sections.last().map(|r| r.span) {
            Some(SectionSpan::CatchAll) => Ok(()),
            _ => Err(CtaError::InvalidSectionTable(
                "the last section must be a catch-all".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: f64 = 5000.0;

    #[test]
    fn test_boundaries_are_half_open() {
        let table = SectionTable::default();
        assert_eq!(table.classify(0.0, PAGE), SectionKind::Header);
        assert_eq!(table.classify(149.9, PAGE), SectionKind::Header);
        assert_eq!(table.classify(150.0, PAGE), SectionKind::Hero);
        assert_eq!(table.classify(799.0, PAGE), SectionKind::Hero);
        assert_eq!(table.classify(800.0, PAGE), SectionKind::Features);
        assert_eq!(table.classify(999.0, PAGE), SectionKind::Features);
        assert_eq!(table.classify(1000.0, PAGE), SectionKind::Testimonials);
        assert_eq!(table.classify(1500.0, PAGE), SectionKind::BelowFold);
    }

    #[test]
    fn test_footer_is_relative_to_page_height() {
        let table = SectionTable::default();
        assert_eq!(table.classify(4700.0, PAGE), SectionKind::Footer);
        assert_eq!(table.classify(4699.0, PAGE), SectionKind::BelowFold);
        assert_eq!(table.classify(2300.0, 2500.0), SectionKind::Footer);
    }

    #[test]
    fn test_header_and_hero_win_on_short_pages() {
        let table = SectionTable::default();
        // The footer tail of a 400px page would start at 100
        assert_eq!(table.classify(120.0, 400.0), SectionKind::Header);
        assert_eq!(table.classify(350.0, 400.0), SectionKind::Hero);
    }

    #[test]
    fn test_classification_is_total() {
        let table = SectionTable::default();
        assert_eq!(table.classify(-40.0, PAGE), SectionKind::Header);
        assert_eq!(table.classify(f64::NAN, PAGE), SectionKind::Header);
        assert_eq!(table.classify(1.0e9, PAGE), SectionKind::Footer);
        let empty = SectionTable { sections: vec![] };
        assert_eq!(empty.classify(10.0, PAGE), SectionKind::BelowFold);
    }

    #[test]
    fn test_priorities() {
        let table = SectionTable::default();
        assert_eq!(table.priority(SectionKind::Hero), 15);
        assert_eq!(table.priority(SectionKind::Header), 10);
        assert!(table.priority(SectionKind::Hero) > table.priority(SectionKind::BelowFold));
    }

    #[test]
    fn test_default_table_validates() {
        assert!(SectionTable::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_gaps_and_order() {
        let mut gap = SectionTable::default();
        gap.sections[2].span = SectionSpan::Band { min_y: 900.0, max_y: 1000.0 };
        assert!(gap.validate().is_err());

        let mut swapped = SectionTable::default();
        swapped.sections.swap(0, 1);
        assert!(swapped.validate().is_err());

        let mut no_catch_all = SectionTable::default();
        no_catch_all.sections.pop();
        assert!(no_catch_all.validate().is_err());
    }
}
