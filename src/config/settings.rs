//! Settings structures for media-filter configuration

use crate::filter::RecordFilter;
use crate::matcher::{FallthroughPolicy, MultiFieldMatcher, PatternOptions};
use crate::records::{Field, FieldPriorityList, Searchable};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Main settings structure matching media-filter.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub filter: FilterSettings,
    pub pattern: PatternOptions,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Merge with environment variables (MEDIA_FILTER_* prefix)
    pub fn merge_env(&mut self) -> Result<()> {
        self.merge_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn merge_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("MEDIA_FILTER_FALLTHROUGH") {
            self.filter.fallthrough = val.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(val) = lookup("MEDIA_FILTER_PATTERN_MODE") {
            self.pattern.mode = val.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(val) = lookup("MEDIA_FILTER_LOG_LEVEL") {
            self.logging.level = val;
        }
        Ok(())
    }

    /// Reject settings the filter cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.filter.fields.is_empty() {
            bail!("filter.fields must name at least one field");
        }

        let mut seen = HashSet::new();
        for field in &self.filter.fields {
            if !seen.insert(field) {
                bail!("filter.fields lists '{}' more than once", field);
            }
        }

        if self.pattern.size_limit == 0 {
            bail!("pattern.size_limit must be greater than zero");
        }

        Ok(())
    }

    /// Build a record filter with the configured field order and options
    pub fn build_filter<R: Searchable + 'static>(&self) -> RecordFilter<R> {
        let matcher = MultiFieldMatcher::new(FieldPriorityList::from_fields(&self.filter.fields))
            .with_fallthrough(self.filter.fallthrough);
        RecordFilter::new(matcher).with_options(self.pattern.clone())
    }
}

/// Field resolution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSettings {
    /// Candidate fields in priority order
    pub fields: Vec<Field>,
    /// Whether a present, non-matching field ends the lookup
    pub fallthrough: FallthroughPolicy,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            fields: Field::STANDARD.to_vec(),
            fallthrough: FallthroughPolicy::FirstPresent,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level or `EnvFilter` directive, e.g. `info` or `media_filter=trace`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MediaRecord;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.filter.fields, Field::STANDARD.to_vec());
        assert_eq!(settings.filter.fallthrough, FallthroughPolicy::FirstPresent);
        assert!(!settings.pattern.is_literal());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let settings = Settings::from_yaml(
            r#"
filter:
  fields: [name, originalTitle]
  fallthrough: first_match
pattern:
  mode: literal
logging:
  level: debug
"#,
        )
        .unwrap();

        assert_eq!(settings.filter.fields, vec![Field::Name, Field::OriginalTitle]);
        assert_eq!(settings.filter.fallthrough, FallthroughPolicy::FirstMatch);
        assert!(settings.pattern.is_literal());
        assert_eq!(settings.pattern.size_limit, crate::matcher::DEFAULT_SIZE_LIMIT);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("logging:\n  level: trace\n").unwrap();
        assert_eq!(settings.filter, FilterSettings::default());
    }

    #[test]
    fn test_rejects_invalid_fields() {
        assert!(Settings::from_yaml("filter:\n  fields: []\n").is_err());
        assert!(Settings::from_yaml("filter:\n  fields: [name, name]\n").is_err());
        assert!(Settings::from_yaml("filter:\n  fields: [title]\n").is_err());
        assert!(Settings::from_yaml("pattern:\n  size_limit: 0\n").is_err());
    }

    #[test]
    fn test_build_filter() {
        let settings = Settings::from_yaml("filter:\n  fields: [name]\n").unwrap();
        let filter = settings.build_filter::<MediaRecord>();
        assert_eq!(filter.matcher().fields().names(), vec!["name"]);

        let records = vec![MediaRecord::movie("Alpha").with_name("Beta")];
        assert_eq!(filter.filter(&records, "beta").unwrap().len(), 1);
    }

    #[test]
    fn test_merge_overrides() {
        let env: HashMap<&str, &str> = [
            ("MEDIA_FILTER_FALLTHROUGH", "first-match"),
            ("MEDIA_FILTER_PATTERN_MODE", "literal"),
            ("MEDIA_FILTER_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings
            .merge_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.filter.fallthrough, FallthroughPolicy::FirstMatch);
        assert!(settings.pattern.is_literal());
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_merge_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings
            .merge_from(|key| (key == "MEDIA_FILTER_FALLTHROUGH").then(|| "sometimes".to_string()))
            .is_err());
        assert!(settings
            .merge_from(|key| (key == "MEDIA_FILTER_PATTERN_MODE").then(|| "glob".to_string()))
            .is_err());
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings::default();
        let yaml = serde_yaml::to_string(&settings).unwrap();
        assert_eq!(Settings::from_yaml(&yaml).unwrap(), settings);
    }
}
