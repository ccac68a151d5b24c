//! Materialized token cursor used by the parser.
//!
//! The whole input is scanned up front; speculation is a saved index that
//! can be restored with [`TokenStream::reset`].

use crate::error::ParseError;
use crate::scanner::tokenize;
use crate::token::{Token, TokenKind};

#[derive(Clone, Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Scan `source` and position the cursor at the first token.
    pub fn new(source: &str) -> Self {
        Self::from_tokens(tokenize(source))
    }

    /// Wrap already scanned tokens. An `EndOfFileToken` is appended when the
    /// list does not end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::EndOfFileToken) {
            let end = tokens.last().map_or(0, |t| t.end);
            tokens.push(Token::new(TokenKind::EndOfFileToken, "", end, end));
        }
        TokenStream { tokens, pos: 0 }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Current token without consuming it.
    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// The token `n` positions ahead (0 is the current token). Looking past
    /// the end yields the end-of-file token.
    pub fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|idx| &self.tokens[idx])
    }

    /// Consume and return the current token. At the end this keeps returning
    /// the end-of-file token.
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek().kind)
    }

    /// Consume the current token if it has the given kind.
    pub fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.next())
        } else {
            None
        }
    }

    /// Consume a token of the given kind or fail with the kinds involved.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.next());
        }
        let found = self.peek();
        Err(ParseError::UnexpectedToken {
            expected: kind,
            found: found.kind,
            value: found.value.clone(),
            pos: found.start,
        })
    }

    /// Cursor index, for a later [`TokenStream::reset`].
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len() - 1);
    }

    pub fn is_eof(&self) -> bool {
        self.check(TokenKind::EndOfFileToken)
    }
}
