//! Error types for record filtering

use thiserror::Error;

/// Errors raised while filtering records
#[derive(Debug, Error)]
pub enum FilterError {
    /// The search term could not be compiled as a pattern
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl FilterError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Check if this error came from a malformed search term
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }

    /// The search term that caused the error
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidPattern { pattern, .. } => pattern,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FilterError>;
