//! Recursive-descent parser.

mod state;
pub use state::{ParseResult, ParserState, parse_document, parse_expression, parse_program};

mod state_expressions;
mod state_statements;
mod state_statements_class_members;

#[cfg(test)]
#[path = "tests/state_expression_tests.rs"]
mod state_expression_tests;

#[cfg(test)]
#[path = "tests/recovery_tests.rs"]
mod recovery_tests;
