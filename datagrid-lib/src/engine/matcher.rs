//! Per-record filter predicate.

use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;
use nucleo_matcher::pattern::Pattern;

use crate::model::Column;
use crate::model::Record;
use crate::query::FilterMode;
use crate::query::Filters;

enum Condition {
    Exact(Column, String),
    Fuzzy(Column, Pattern),
}

/// The applicable filters of a query, compiled once per engine call.
pub(super) struct RecordFilter {
    conditions: Vec<Condition>,
    matcher: Option<Matcher>,
    buf: Vec<char>,
}

impl RecordFilter {
    pub(super) fn new(filters: &Filters, mode: FilterMode) -> Self {
        let conditions: Vec<Condition> = filters
            .applicable()
            .map(|(column, value)| match mode {
                FilterMode::Exact => Condition::Exact(column, value.to_string()),
                FilterMode::Fuzzy => Condition::Fuzzy(
                    column,
                    Pattern::new(value, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy),
                ),
            })
            .collect();

        // The matcher allocates scratch space; only build it when needed.
        let matcher = conditions
            .iter()
            .any(|condition| matches!(condition, Condition::Fuzzy(..)))
            .then(|| Matcher::new(Config::DEFAULT));

        Self {
            conditions,
            matcher,
            buf: Vec::new(),
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub(super) fn matches(&mut self, record: &Record) -> bool {
        for condition in &self.conditions {
            let passed = match condition {
                Condition::Exact(column, value) => record.text(*column) == Some(value.as_str()),
                Condition::Fuzzy(column, pattern) => {
                    let (Some(text), Some(matcher)) = (record.text(*column), self.matcher.as_mut()) else {
                        return false;
                    };
                    let haystack = Utf32Str::new(text, &mut self.buf);
                    pattern.score(haystack, matcher).is_some()
                }
            };
            if !passed {
                return false;
            }
        }
        true
    }
}
