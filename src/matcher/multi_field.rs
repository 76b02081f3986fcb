//! Multi-field record matcher

use super::pattern::SearchPattern;
use crate::error::Result;
use crate::records::{FieldPriorityList, Searchable};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What happens when a present field does not match
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallthroughPolicy {
    /// The first present field decides; later fields are never consulted
    #[default]
    FirstPresent,
    /// A non-matching field falls through to the next one
    FirstMatch,
}

impl std::str::FromStr for FallthroughPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "first_present" => Ok(Self::FirstPresent),
            "first_match" => Ok(Self::FirstMatch),
            other => Err(format!("unknown fallthrough policy '{}'", other)),
        }
    }
}

/// Outcome of evaluating one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'m> {
    /// The named field matched
    Matched(&'m str),
    /// The named field was the last one consulted and did not match
    Rejected(&'m str),
    /// None of the priority fields were present
    NoFields,
}

impl Verdict<'_> {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Tests a record against a search pattern, field by field in priority order
pub struct MultiFieldMatcher<R> {
    fields: FieldPriorityList<R>,
    fallthrough: FallthroughPolicy,
}

impl<R> MultiFieldMatcher<R> {
    pub fn new(fields: FieldPriorityList<R>) -> Self {
        Self {
            fields,
            fallthrough: FallthroughPolicy::default(),
        }
    }

    pub fn with_fallthrough(mut self, fallthrough: FallthroughPolicy) -> Self {
        self.fallthrough = fallthrough;
        self
    }

    pub fn fields(&self) -> &FieldPriorityList<R> {
        &self.fields
    }

    pub fn fallthrough(&self) -> FallthroughPolicy {
        self.fallthrough
    }

    /// Walk the priority list and report which field decided the outcome.
    ///
    /// Absent or empty fields are skipped. The first match wins. Under
    /// [`FallthroughPolicy::FirstPresent`] a present field that does not
    /// match ends the walk.
    pub fn evaluate(&self, record: &R, pattern: &SearchPattern) -> Verdict<'_> {
        let mut verdict = Verdict::NoFields;

        for accessor in &self.fields {
            let Some(value) = accessor.resolve(record) else {
                continue;
            };

            if pattern.is_match(value) {
                return Verdict::Matched(accessor.name());
            }

            verdict = Verdict::Rejected(accessor.name());
            if self.fallthrough == FallthroughPolicy::FirstPresent {
                break;
            }
        }

        verdict
    }

    pub fn matches(&self, record: &R, pattern: &SearchPattern) -> bool {
        let verdict = self.evaluate(record, pattern);
        trace!("Pattern '{}' on record: {:?}", pattern.term(), verdict);
        verdict.is_match()
    }

    /// Compile `term` and match a single record
    pub fn matches_term(&self, record: &R, term: &str) -> Result<bool> {
        let pattern = SearchPattern::compile(term)?;
        Ok(self.matches(record, &pattern))
    }
}

impl<R: Searchable + 'static> MultiFieldMatcher<R> {
    /// Matcher over `original_title`, `original_name`, `name`
    pub fn standard() -> Self {
        Self::new(FieldPriorityList::standard())
    }
}

impl<R: Searchable + 'static> Default for MultiFieldMatcher<R> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<R> Clone for MultiFieldMatcher<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            fallthrough: self.fallthrough,
        }
    }
}

impl<R> std::fmt::Debug for MultiFieldMatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiFieldMatcher")
            .field("fields", &self.fields)
            .field("fallthrough", &self.fallthrough)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Field, MediaRecord};
    use serde_json::{json, Value};

    fn pattern(term: &str) -> SearchPattern {
        SearchPattern::compile(term).unwrap()
    }

    #[test]
    fn test_matches_case_insensitively() {
        let matcher = MultiFieldMatcher::<Value>::standard();
        let record = json!({"name": "Dune"});
        assert!(matcher.matches(&record, &pattern("dune")));
        assert!(matcher.matches(&record, &pattern("DUNE")));
    }

    #[test]
    fn test_first_present_field_decides() {
        let matcher = MultiFieldMatcher::<Value>::standard();
        let record = json!({"originalTitle": "Alpha", "name": "Beta"});

        assert_eq!(
            matcher.evaluate(&record, &pattern("Beta")),
            Verdict::Rejected("original_title")
        );
        assert!(!matcher.matches(&record, &pattern("Beta")));
        assert!(matcher.matches(&record, &pattern("alp")));
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let matcher = MultiFieldMatcher::<Value>::standard();
        let record = json!({"original_title": "", "original_name": null, "name": "Beta"});
        assert_eq!(
            matcher.evaluate(&record, &pattern("beta")),
            Verdict::Matched("name")
        );
    }

    #[test]
    fn test_first_match_falls_through() {
        let matcher =
            MultiFieldMatcher::<Value>::standard().with_fallthrough(FallthroughPolicy::FirstMatch);
        let record = json!({"original_title": "Alpha", "original_name": "Gamma", "name": "Beta"});

        assert_eq!(
            matcher.evaluate(&record, &pattern("Beta")),
            Verdict::Matched("name")
        );
        assert_eq!(
            matcher.evaluate(&record, &pattern("Delta")),
            Verdict::Rejected("name")
        );
    }

    #[test]
    fn test_no_fields_present() {
        let matcher = MultiFieldMatcher::<MediaRecord>::standard();
        let record = MediaRecord {
            title: Some("Dune".to_string()),
            ..Default::default()
        };
        assert_eq!(matcher.evaluate(&record, &pattern("dune")), Verdict::NoFields);
    }

    #[test]
    fn test_custom_priority() {
        let matcher = MultiFieldMatcher::new(FieldPriorityList::<MediaRecord>::from_fields(&[
            Field::Name,
            Field::OriginalTitle,
        ]));
        let record = MediaRecord::movie("Alpha").with_name("Beta");
        assert!(matcher.matches(&record, &pattern("beta")));
        assert!(!matcher.matches(&record, &pattern("alpha")));
    }

    #[test]
    fn test_matches_term_propagates_invalid_pattern() {
        let matcher = MultiFieldMatcher::<MediaRecord>::standard();
        let record = MediaRecord::tv("Dark");
        assert!(matcher.matches_term(&record, "da").unwrap());
        assert!(matcher.matches_term(&record, "(").unwrap_err().is_invalid_pattern());
    }

    #[test]
    fn test_fallthrough_from_str() {
        assert_eq!(
            "first-match".parse::<FallthroughPolicy>(),
            Ok(FallthroughPolicy::FirstMatch)
        );
        assert_eq!(
            "first_present".parse::<FallthroughPolicy>(),
            Ok(FallthroughPolicy::FirstPresent)
        );
        assert!("any".parse::<FallthroughPolicy>().is_err());
    }
}
