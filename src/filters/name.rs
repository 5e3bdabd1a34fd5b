//! Name facet: case-insensitive text match against the item name.
//!
//! Both sides are trimmed and lowercased before comparison. When a separator
//! is configured the item value is treated as multi-valued (e.g.
//! comma-separated client IDs) and any segment may match.

use crate::controls::Subscribers;
use crate::filters::{FacetFilter, FacetPredicate, match_all};
use crate::model::ItemRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    Substring,
    Prefix,
}

pub struct NameFilter {
    query: String,
    mode: MatchMode,
    separator: Option<char>,
    subscribers: Subscribers,
}

impl NameFilter {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            query: String::new(),
            mode,
            separator: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Treat the item value as `separator`-delimited and match any segment.
    pub fn with_separator(mode: MatchMode, separator: char) -> Self {
        Self {
            separator: Some(separator),
            ..Self::new(mode)
        }
    }

    /// Update the query text. Whitespace-only edits that do not change the
    /// effective needle do not notify.
    pub fn set_query(&mut self, query: &str) -> bool {
        if normalize(query) == normalize(&self.query) {
            self.query = query.to_string();
            return false;
        }
        self.query = query.to_string();
        self.subscribers.notify();
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn matches(mode: MatchMode, haystack: &str, needle: &str) -> bool {
        match mode {
            MatchMode::Substring => haystack.contains(needle),
            MatchMode::Prefix => haystack.starts_with(needle),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

impl FacetFilter for NameFilter {
    fn initialise(&mut self, _items: &[ItemRecord]) {}

    fn sync_with_items(&mut self, _items: &[ItemRecord]) {}

    fn on_change(&mut self, handler: Box<dyn FnMut()>) {
        self.subscribers.subscribe(handler);
    }

    fn clear(&mut self) {
        self.query.clear();
    }

    fn selected_count(&self) -> usize {
        usize::from(!normalize(&self.query).is_empty())
    }

    fn build_predicate(&self) -> FacetPredicate {
        let needle = normalize(&self.query);
        if needle.is_empty() {
            return match_all();
        }
        let mode = self.mode;
        let separator = self.separator;
        Box::new(move |data| match separator {
            Some(sep) => data
                .name
                .split(sep)
                .any(|segment| Self::matches(mode, &normalize(segment), &needle)),
            None => Self::matches(mode, &normalize(&data.name), &needle),
        })
    }
}
