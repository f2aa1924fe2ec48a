use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::element::DEFAULT_FOLD_LINE;
use crate::error::{CtaError, Result};
use crate::lexicon::Lexicon;
use crate::section::SectionTable;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "CTASCOPE_CONFIG";

/// Thresholds for the candidate scorer and primary selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Location scores 2 up to and including this y
    pub above_fold_max_y: f64,
    /// Location scores 1 up to and including this y
    pub mid_page_max_y: f64,
    /// Elements below this y are below the fold
    pub fold_line: f64,
    /// Pages taller than this get the long-page adjustment
    pub long_page_height: f64,
    /// Candidates right of this share of the viewport width reach the Z endpoint
    pub z_pattern_x_ratio: f64,
    /// Candidates below this share of the viewport height reach the Z endpoint
    pub z_pattern_bottom_ratio: f64,
    /// Cap on the additive adjustment layer
    pub max_adjustment: i32,
    /// Champions scoring below this are rejected
    pub min_primary_score: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            above_fold_max_y: 1000.0,
            mid_page_max_y: 1500.0,
            fold_line: DEFAULT_FOLD_LINE,
            long_page_height: 3000.0,
            z_pattern_x_ratio: 0.7,
            z_pattern_bottom_ratio: 0.8,
            max_adjustment: 5,
            min_primary_score: 6,
        }
    }
}

/// Thresholds for the text-to-element matcher.
///
/// The admission bars and the tie gap are uncalibrated; keep them here so
/// they can be tuned without touching the cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Also sets the above-fold flag of snapshot elements that do not carry one
    pub fold_line: f64,
    /// Elements above this y sit in the header tier
    pub header_max_y: f64,
    /// Above-fold elements from `header_max_y` up to this y form the hero bucket
    pub hero_max_y: f64,
    /// Similarity strictly above this admits an element
    pub similarity_bar: f64,
    /// Enhanced score strictly above this admits a button
    pub button_score_bar: f64,
    /// Enhanced score strictly above this admits a link
    pub link_score_bar: f64,
    /// Enhanced scores closer than this are ranked by confidence
    pub tie_gap: f64,
    /// Enhanced score is divided by this to express it as confidence
    pub confidence_divisor: f64,
    pub max_visual_prominence: f64,
    /// Radius in pixels searched for supporting trust text
    pub trust_text_radius: f64,
    /// Largest vertical gap at which a form is merged into the match
    pub form_merge_distance: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            fold_line: DEFAULT_FOLD_LINE,
            header_max_y: 150.0,
            hero_max_y: 800.0,
            similarity_bar: 0.5,
            button_score_bar: 8.0,
            link_score_bar: 6.0,
            tie_gap: 0.5,
            confidence_divisor: 20.0,
            max_visual_prominence: 12.0,
            trust_text_radius: 100.0,
            form_merge_distance: 200.0,
        }
    }
}

/// Every table the analysis reads, injected by reference
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub scoring: ScoringConfig,
    pub matcher: MatcherConfig,
    pub sections: SectionTable,
    pub lexicon: Lexicon,
}

impl AnalyzerConfig {
    /// Load configuration from `path`, the env override, or the default location.
    ///
    /// A missing file at the default location yields the built-in defaults; a
    /// missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match std::env::var(CONFIG_ENV) {
                Ok(p) => (PathBuf::from(p), true),
                Err(_) => (Self::config_path()?, false),
            },
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config = Self::from_toml(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded analyzer config");
            Ok(config)
        } else if explicit {
            Err(CtaError::ConfigError(format!(
                "Config file not found: {}",
                config_path.display()
            )))
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.lexicon = config.lexicon.normalized();
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CtaError::ConfigError(e.to_string()))
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "ctascope")
            .ok_or_else(|| CtaError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        self.sections.validate()?;

        let s = &self.scoring;
        let m = &self.matcher;
        let values = [
            ("scoring.above_fold_max_y", s.above_fold_max_y),
            ("scoring.mid_page_max_y", s.mid_page_max_y),
            ("scoring.fold_line", s.fold_line),
            ("scoring.long_page_height", s.long_page_height),
            ("scoring.z_pattern_x_ratio", s.z_pattern_x_ratio),
            ("scoring.z_pattern_bottom_ratio", s.z_pattern_bottom_ratio),
            ("matcher.fold_line", m.fold_line),
            ("matcher.header_max_y", m.header_max_y),
            ("matcher.hero_max_y", m.hero_max_y),
            ("matcher.similarity_bar", m.similarity_bar),
            ("matcher.button_score_bar", m.button_score_bar),
            ("matcher.link_score_bar", m.link_score_bar),
            ("matcher.tie_gap", m.tie_gap),
            ("matcher.max_visual_prominence", m.max_visual_prominence),
            ("matcher.trust_text_radius", m.trust_text_radius),
            ("matcher.form_merge_distance", m.form_merge_distance),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(CtaError::ConfigError(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !m.confidence_divisor.is_finite() || m.confidence_divisor <= 0.0 {
            return Err(CtaError::ConfigError(
                "matcher.confidence_divisor must be positive".into(),
            ));
        }
        if s.mid_page_max_y < s.above_fold_max_y {
            return Err(CtaError::ConfigError(
                "scoring.mid_page_max_y must not be below scoring.above_fold_max_y".into(),
            ));
        }
        if s.max_adjustment < 0 {
            return Err(CtaError::ConfigError(
                "scoring.max_adjustment must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionKind;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.scoring.min_primary_score, 6);
        assert_eq!(config.matcher.button_score_bar, 8.0);
        assert_eq!(config.matcher.link_score_bar, 6.0);
        assert_eq!(config.matcher.tie_gap, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip_keeps_tables() {
        let config = AnalyzerConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AnalyzerConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = AnalyzerConfig::from_toml(
            r#"
[scoring]
min_primary_score = 8

[lexicon]
strong_actions = ["Adopt"]
"#,
        )
        .unwrap();
        assert_eq!(parsed.scoring.min_primary_score, 8);
        assert_eq!(parsed.scoring.fold_line, 1000.0);
        assert_eq!(parsed.lexicon.strong_actions, vec!["adopt".to_string()]);
        assert_eq!(parsed.sections.classify(400.0, 3000.0), SectionKind::Hero);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AnalyzerConfig::from_toml("[matcher]\ntie_gap = -1.0\n");
        assert!(matches!(err, Err(CtaError::ConfigError(_))));

        let err = AnalyzerConfig::from_toml("[matcher]\nconfidence_divisor = 0.0\n");
        assert!(matches!(err, Err(CtaError::ConfigError(_))));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = std::env::temp_dir().join("ctascope-missing-config-test.toml");
        let _ = std::fs::remove_file(&path);
        assert!(AnalyzerConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("ctascope-config-test-{}", std::process::id()))
            .join("config.toml");
        let mut config = AnalyzerConfig::default();
        config.scoring.long_page_height = 4200.0;
        config.save(&path).unwrap();

        let loaded = AnalyzerConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.scoring.long_page_height, 4200.0);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
