//! JavaScript parser for the caret completion engine.
//!
//! - `ast` - The node model: `Node` (span + `NodeKind`)
//! - `parser` - `ParserState`, a recursive-descent parser over a
//!   materialized token stream, with strict entry points for single
//!   expressions and statements and a recovering entry point for documents

pub mod ast;
pub use ast::{Class, Function, MethodKind, Node, NodeKind, UnaryOperator, VariableKind};

pub mod parser;
pub use parser::{ParseResult, ParserState, parse_document, parse_expression, parse_program};

// Re-export the error type so callers need not depend on the scanner.
pub use caret_scanner::ParseError;
