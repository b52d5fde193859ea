//! Query merge and app filtering.
//!
//! Typed text wins over recognized text. Matching is a case-insensitive
//! substring test on the display name, and an empty query matches nothing.

use crate::catalog::AppCatalog;
use crate::entry::AppEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercased, trimmed query: typed text if non-empty, else recognized text.
pub fn effective_query(typed: &str, recognized: &str) -> String {
    let typed = typed.trim();
    let source = if typed.is_empty() {
        recognized.trim()
    } else {
        typed
    };
    source.to_lowercase()
}

/// `query` must already be normalized by [`effective_query`].
pub fn matches(app: &AppEntry, query: &str) -> bool {
    !query.is_empty() && app.display_name.to_lowercase().contains(query)
}

/// Which of the three list headers applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum SearchStatus {
    /// Nothing typed or drawn yet.
    AwaitingInput,
    NoMatches,
    Matches(usize),
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::AwaitingInput => write!(f, "Draw to search apps"),
            SearchStatus::NoMatches => write!(f, "No apps found"),
            SearchStatus::Matches(n) => write!(f, "{} apps found", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub status: SearchStatus,
    /// Matching entries in catalog order.
    pub entries: Vec<AppEntry>,
}

impl SearchResults {
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|e| e.identifier == identifier)
    }
}

impl Default for SearchResults {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: SearchStatus::AwaitingInput,
            entries: Vec::new(),
        }
    }
}

pub fn search(catalog: &AppCatalog, typed: &str, recognized: &str) -> SearchResults {
    let query = effective_query(typed, recognized);
    if query.is_empty() {
        return SearchResults::default();
    }

    let entries: Vec<AppEntry> = catalog
        .entries()
        .iter()
        .filter(|app| matches(app, &query))
        .cloned()
        .collect();

    let status = if entries.is_empty() {
        SearchStatus::NoMatches
    } else {
        SearchStatus::Matches(entries.len())
    };

    SearchResults {
        query,
        status,
        entries,
    }
}
