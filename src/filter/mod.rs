//! Collection filtering
//!
//! Applies a [`MultiFieldMatcher`] across a sequence of records, keeping
//! the input order. An empty search term keeps every record.

use crate::error::Result;
use crate::matcher::{FallthroughPolicy, MultiFieldMatcher, PatternOptions, SearchPattern};
use crate::records::{FieldPriorityList, Searchable};
use tracing::debug;

/// Filters record collections by search term
pub struct RecordFilter<R> {
    matcher: MultiFieldMatcher<R>,
    options: PatternOptions,
}

impl<R> RecordFilter<R> {
    pub fn new(matcher: MultiFieldMatcher<R>) -> Self {
        Self {
            matcher,
            options: PatternOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PatternOptions) -> Self {
        self.options = options;
        self
    }

    pub fn matcher(&self) -> &MultiFieldMatcher<R> {
        &self.matcher
    }

    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    /// Records whose priority fields match `term`, borrowed in input order.
    ///
    /// An empty term returns every record. A term that does not compile
    /// fails the whole call with `FilterError::InvalidPattern`.
    pub fn filter<'a>(&self, records: &'a [R], term: &str) -> Result<Vec<&'a R>> {
        if term.is_empty() {
            return Ok(records.iter().collect());
        }

        let pattern = self.compile(term)?;
        let results: Vec<&R> = records
            .iter()
            .filter(|record| self.matcher.matches(record, &pattern))
            .collect();

        debug!(
            "Filter '{}' kept {} of {} records",
            term,
            results.len(),
            records.len()
        );
        Ok(results)
    }

    /// Owning variant of [`filter`](Self::filter); an empty term hands back
    /// the input vector untouched
    pub fn filter_owned(&self, mut records: Vec<R>, term: &str) -> Result<Vec<R>> {
        if term.is_empty() {
            return Ok(records);
        }

        let pattern = self.compile(term)?;
        let total = records.len();
        records.retain(|record| self.matcher.matches(record, &pattern));

        debug!(
            "Filter '{}' kept {} of {} records",
            term,
            records.len(),
            total
        );
        Ok(records)
    }

    fn compile(&self, term: &str) -> Result<SearchPattern> {
        SearchPattern::with_options(term, &self.options).inspect_err(|e| {
            debug!("Rejected search term: {}", e);
        })
    }
}

impl<R: Searchable + 'static> RecordFilter<R> {
    /// Standard priority list, first-present fallthrough, regex terms
    pub fn standard() -> Self {
        Self::new(MultiFieldMatcher::standard())
    }

    pub fn with_fields(fields: FieldPriorityList<R>, fallthrough: FallthroughPolicy) -> Self {
        Self::new(MultiFieldMatcher::new(fields).with_fallthrough(fallthrough))
    }
}

impl<R: Searchable + 'static> Default for RecordFilter<R> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<R> Clone for RecordFilter<R> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            options: self.options.clone(),
        }
    }
}

impl<R> std::fmt::Debug for RecordFilter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordFilter")
            .field("matcher", &self.matcher)
            .field("options", &self.options)
            .finish()
    }
}

/// Filter `records` by `term` over `original_title`, `original_name`, `name`
pub fn filter<'a, R: Searchable + 'static>(records: &'a [R], term: &str) -> Result<Vec<&'a R>> {
    RecordFilter::standard().filter(records, term)
}
