//! Completion options.

use caret_common::limits::{DEFAULT_MAX_COMPLETIONS, DEFAULT_RECENCY_CAPACITY};
use caret_checker::InferenceOptions;
use serde::{Deserialize, Serialize};

/// Knobs for a completion request. Missing fields take their defaults when
/// deserialized, so a config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionOptions {
    /// Entries returned after ranking; 0 means no limit
    pub max_results: usize,
    /// Offer language keywords in non-member positions
    pub include_keywords: bool,
    /// Offer built-in globals (`document`, `console`, ...) in non-member
    /// positions
    pub include_globals: bool,
    /// Prefix matching distinguishes case
    pub case_sensitive: bool,
    /// `gEBI` matches `getElementById`
    pub camel_case_matching: bool,
    /// Size of the recently accepted list the caller keeps
    pub recency_capacity: usize,
    /// Guess types from names when inference gives up
    pub best_guess_types: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        CompletionOptions {
            max_results: DEFAULT_MAX_COMPLETIONS,
            include_keywords: true,
            include_globals: true,
            case_sensitive: false,
            camel_case_matching: true,
            recency_capacity: DEFAULT_RECENCY_CAPACITY,
            best_guess_types: true,
        }
    }
}

impl CompletionOptions {
    pub fn inference_options(&self) -> InferenceOptions {
        InferenceOptions {
            best_guess: self.best_guess_types,
        }
    }
}
