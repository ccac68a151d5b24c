//! JavaScript scanner/tokenizer for the caret completion engine.
//!
//! This crate provides the lexical analysis phase:
//! - `TokenKind` - Token types, with `TokenCategory` for highlighting
//! - `Scanner` - Tokenizer state machine (never fails, unknown input becomes
//!   an `Unknown` token)
//! - `TokenStream` - Materialized token cursor with lookahead and rewind,
//!   the lexer interface used by the parser
//! - `highlight_line` - Per-line incremental tokenization for syntax highlighting

pub mod token;
pub use token::{Token, TokenCategory, TokenFlags, TokenKind, keyword_kind};

pub mod scanner;
pub use scanner::{Scanner, is_identifier_part, is_identifier_start, tokenize, unescape_string};

pub mod stream;
pub use stream::TokenStream;

pub mod error;
pub use error::ParseError;

pub mod highlight;
pub use highlight::{HighlightToken, LineState, highlight_line};
