//! caret: a code completion engine for JavaScript, TypeScript, HTML and CSS.
//!
//! The pipeline lives in the workspace crates, re-exported here:
//! - `scanner` - Tokens, per-line highlighting
//! - `parser` - The JavaScript AST and its recursive-descent parser
//! - `solver` - Type descriptors, the built-in catalog, AST typing
//! - `binder` - Scope trees built from a document
//! - `checker` - Access-chain type inference and member enumeration
//! - `lsp` - Completion contexts, candidates and ranking
//!
//! [`Document`] ties them together for callers that query one text many
//! times.

pub use caret_binder as binder;
pub use caret_checker as checker;
pub use caret_common as common;
pub use caret_lsp as lsp;
pub use caret_parser as parser;
pub use caret_scanner as scanner;
pub use caret_solver as solver;

pub use caret_common::{LineMap, Position};
pub use caret_lsp::{
    CompletionItem, CompletionItemKind, CompletionOptions, CompletionResult, Language,
    RecencyTracker, complete_at,
};
pub use caret_solver::TypeDescriptor;

pub mod document;
pub use document::Document;

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod document_tests;
