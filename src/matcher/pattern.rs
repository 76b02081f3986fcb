//! Compiled search patterns

use crate::error::{FilterError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Default cap on the compiled program size (1 MiB)
pub const DEFAULT_SIZE_LIMIT: usize = 1 << 20;

/// How a search term is interpreted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    /// Regular expression syntax, metacharacters active
    #[default]
    Regex,
    /// Plain text, metacharacters escaped before compiling
    Literal,
}

impl std::str::FromStr for PatternMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regex" => Ok(Self::Regex),
            "literal" => Ok(Self::Literal),
            other => Err(format!("unknown pattern mode '{}'", other)),
        }
    }
}

/// Pattern compilation options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatternOptions {
    pub mode: PatternMode,
    /// Upper bound on the compiled regex size in bytes
    pub size_limit: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            mode: PatternMode::Regex,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

impl PatternOptions {
    pub fn literal() -> Self {
        Self {
            mode: PatternMode::Literal,
            ..Default::default()
        }
    }

    pub fn is_literal(&self) -> bool {
        self.mode == PatternMode::Literal
    }
}

/// A case-insensitive search term compiled for containment tests
#[derive(Debug, Clone)]
pub struct SearchPattern {
    term: String,
    regex: Regex,
}

impl SearchPattern {
    /// Compile a term with regex semantics
    pub fn compile(term: &str) -> Result<Self> {
        Self::with_options(term, &PatternOptions::default())
    }

    pub fn with_options(term: &str, options: &PatternOptions) -> Result<Self> {
        let source = match options.mode {
            PatternMode::Regex => term.to_string(),
            PatternMode::Literal => regex::escape(term),
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .size_limit(options.size_limit)
            .build()
            .map_err(|e| FilterError::invalid_pattern(term, e))?;

        Ok(Self {
            term: term.to_string(),
            regex,
        })
    }

    /// The term as supplied by the caller
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Unanchored search: true if the pattern occurs anywhere in `value`
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}
