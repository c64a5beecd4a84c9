//! Results view selection
//!
//! Maps a [`SearchState`] snapshot to exactly one thing to show. First match wins:
//!
//! | state                                            | view        |
//! |--------------------------------------------------|-------------|
//! | `error`                                          | `Error`     |
//! | no usable results and an empty search key        | `Prompt`    |
//! | `is_loading`                                     | `Loading`   |
//! | results present but empty                        | `NoResults` |
//! | results present                                  | `Results`   |
//!
//! A non-empty key with no results that is not loading only exists between a
//! key change and its fetch starting; it maps to `Loading`.

use super::backend::SearchBackend;
use super::result::SearchResult;
use super::store::{SearchState, SearchStore};

/// Examples offered on the empty-query prompt
pub const PROMPT_EXAMPLES: &[&str] = &[
    "api load testing",
    "graphql observability",
    "elastic container service",
    "automated canary deployments",
];

/// Extra examples from the about page
pub const MORE_EXAMPLES: &[&str] = &[
    "kubernetes vs docker swarm",
    "websockets",
    "implementation challenges future work design decisions",
];

/// Every known example query, prompt examples first
pub fn all_examples() -> impl Iterator<Item = &'static str> {
    PROMPT_EXAMPLES.iter().chain(MORE_EXAMPLES).copied()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultsView<'a> {
    /// "Error loading results"
    Error,
    /// Nothing searched yet; shows guidance and example queries
    Prompt(&'static [&'static str]),
    Loading,
    /// Search finished with zero matches
    NoResults,
    /// Matches in backend order
    Results(&'a [SearchResult]),
}

pub fn select(state: &SearchState) -> ResultsView<'_> {
    if state.error {
        return ResultsView::Error;
    }

    if (state.is_empty() || state.results.is_none()) && state.debounced_query.is_empty() {
        return ResultsView::Prompt(PROMPT_EXAMPLES);
    }

    if state.is_loading {
        return ResultsView::Loading;
    }

    match state.results.as_deref() {
        Some([]) => ResultsView::NoResults,
        Some(results) => ResultsView::Results(results),
        None => ResultsView::Loading,
    }
}

/// Run an example straight away, without waiting for the debounce timer
pub fn choose_example<B: SearchBackend>(store: &SearchStore<B>, example: &str) {
    store.set_query(example);
    store.set_debounced_query(example);
}
