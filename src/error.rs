use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid section table: {0}")]
    InvalidSectionTable(String),

    #[error("Invalid page snapshot: {0}")]
    SnapshotError(String),
}

impl CtaError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CtaError::JsonError(_) => Some(
                "Check that the snapshot file is valid JSON produced by the capture step"
            ),
            CtaError::TomlError(_) | CtaError::ConfigError(_) => Some(
                "Inspect your configuration with `ctascope config show`\nOr reset it with `ctascope config init --force`"
            ),
            CtaError::InvalidSectionTable(_) => Some(
                "Sections must start with header and hero and cover every y from 0 upward.\nRun `ctascope sections` to see the default table"
            ),
            CtaError::SnapshotError(_) => Some(
                "Re-capture the page; element sizes must be non-negative and the viewport non-empty"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CtaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_for_user_facing_errors() {
        assert!(CtaError::SnapshotError("bad".into()).hint().is_some());
        assert!(CtaError::InvalidSectionTable("gap".into()).hint().is_some());
        let io = CtaError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "x"));
        assert!(io.hint().is_none());
    }
}
