//! Parse errors raised by `TokenStream::expect` and the parser.

use crate::token::TokenKind;
use thiserror::Error;

/// A syntax error at a UTF-16 offset.
///
/// Errors abort the strict parser entry points; the caller decides whether
/// to retry, rewind or give up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} but found {found} '{value}' at offset {pos}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        value: String,
        pos: u32,
    },

    #[error("expected an expression but found {found} '{value}' at offset {pos}")]
    ExpectedExpression {
        found: TokenKind,
        value: String,
        pos: u32,
    },

    #[error("expression nested too deeply at offset {pos}")]
    NestingTooDeep { pos: u32 },
}

impl ParseError {
    /// Offset where the error was detected.
    pub fn pos(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { pos, .. }
            | ParseError::ExpectedExpression { pos, .. }
            | ParseError::NestingTooDeep { pos } => *pos,
        }
    }

    /// The token kind the parser wanted, when there was a single one.
    pub fn expected(&self) -> Option<TokenKind> {
        match self {
            ParseError::UnexpectedToken { expected, .. } => Some(*expected),
            _ => None,
        }
    }

    /// The token kind actually found, when known.
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::ExpectedExpression { found, .. } => Some(*found),
            ParseError::NestingTooDeep { .. } => None,
        }
    }
}
