//! Completion provider for the caret completion engine.
//!
//! - `completions` - `Completions`, context detection, candidate collection
//!   and ranking for JavaScript, TypeScript, HTML and CSS
//! - `expression` - Extraction of the access chain in front of the cursor
//! - `languages` - Supported languages and their keyword, tag, attribute and
//!   property tables
//! - `options` - `CompletionOptions`
//! - `recency` - `RecencyTracker`, the recently accepted labels

pub mod completions;
pub use completions::{
    CompletionItem, CompletionItemKind, CompletionResult, Completions, MatchTier,
    camel_case_match, compare_case_sensitive_ui, complete_at, default_sort_text, group_order,
    match_tier, sort_priority,
};

pub mod expression;
pub use expression::expression_before;

pub mod languages;
pub use languages::{Language, UnknownLanguage};

pub mod options;
pub use options::CompletionOptions;

pub mod recency;
pub use recency::RecencyTracker;

#[cfg(test)]
#[path = "tests/ranking_tests.rs"]
mod ranking_tests;
