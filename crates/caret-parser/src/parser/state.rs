//! Parser state and token-level helpers.
//!
//! `ParserState` is a recursive-descent parser over a materialized
//! [`TokenStream`]. Speculative parses save the stream position and rewind
//! with [`TokenStream::reset`].
//!
//! The three strict entry points (`parse_program`, `parse_expression`,
//! `parse_statement`) stop at the first error. `parse_document` is the
//! tolerant variant the binder uses for text that is being edited.

use crate::ast::{Node, NodeKind};
use caret_common::TextRange;
use caret_common::limits::MAX_PARSE_DEPTH;
use caret_scanner::{ParseError, Token, TokenKind, TokenStream};
use rustc_hash::FxHashSet;
use tracing::{Level, debug, span};

pub type ParseResult<T> = Result<T, ParseError>;

pub struct ParserState {
    pub(crate) stream: TokenStream,
    /// Current nesting depth, bounded by `MAX_PARSE_DEPTH`
    depth: u32,
    /// Inside `parse_document`: blocks may be closed by end of input and
    /// statement errors are collected instead of returned
    pub(crate) recovering: bool,
    /// `in` is not a binary operator (the head of a `for` statement)
    pub(crate) no_in: bool,
    pub(crate) errors: Vec<ParseError>,
    /// Stream positions of `(` tokens that did not start an arrow parameter
    /// list, so each one is tried speculatively at most once
    pub(crate) failed_arrow_params: FxHashSet<usize>,
}

impl ParserState {
    pub fn new(source: &str) -> Self {
        Self::from_stream(TokenStream::new(source))
    }

    pub fn from_stream(stream: TokenStream) -> Self {
        ParserState {
            stream,
            depth: 0,
            recovering: false,
            no_in: false,
            errors: Vec::new(),
            failed_arrow_params: FxHashSet::default(),
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parse statements up to end of input.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let mut body = Vec::new();
        while !self.stream.is_eof() {
            body.push(self.parse_statement()?);
        }
        Ok(Node::new(
            TextRange::new(start, self.stream.peek().end),
            NodeKind::Program { body },
        ))
    }

    /// Parse one expression at assignment precedence.
    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        self.parse_assignment_expression()
    }

    /// Parse a whole document, recovering from errors.
    ///
    /// A statement that fails to parse is skipped up to the next `;`, line
    /// break or closing brace and the error is collected. Blocks that run
    /// into end of input are accepted; their span ends one unit past the end
    /// of input so that a cursor at the very end is inside them.
    pub fn parse_document(&mut self) -> (Node, Vec<ParseError>) {
        let _span = span!(Level::DEBUG, "parse_document").entered();
        self.recovering = true;
        let start = self.token_pos();
        let mut body = Vec::new();
        while !self.stream.is_eof() {
            if let Some(statement) = self.parse_statement_recovering() {
                body.push(statement);
            }
        }
        self.recovering = false;
        let errors = std::mem::take(&mut self.errors);
        debug!(
            statements = body.len(),
            errors = errors.len(),
            "[PARSE] document parsed"
        );
        let program = Node::new(
            TextRange::new(start, self.stream.peek().end),
            NodeKind::Program { body },
        );
        (program, errors)
    }

    /// One statement in recovery mode; `None` after a skipped error.
    pub(crate) fn parse_statement_recovering(&mut self) -> Option<Node> {
        let statement_start = self.stream.position();
        match self.parse_statement() {
            Ok(statement) => Some(statement),
            Err(err) => {
                debug!(pos = err.pos(), "[PARSE] recovering: {err}");
                self.errors.push(err);
                self.synchronize(statement_start);
                None
            }
        }
    }

    /// Skip to a point where a new statement can start.
    ///
    /// Braces the failed statement opened are skipped to their match first,
    /// then tokens up to a `;` (consumed), a `}` or a token on a new line.
    fn synchronize(&mut self, statement_start: usize) {
        let mut open_braces: i32 = self.stream.tokens()[statement_start..self.stream.position()]
            .iter()
            .map(|t| match t.kind {
                TokenKind::OpenBraceToken => 1,
                TokenKind::CloseBraceToken => -1,
                _ => 0,
            })
            .sum();

        if self.stream.position() == statement_start && !self.stream.is_eof() {
            let token = self.stream.next();
            if token.kind == TokenKind::OpenBraceToken {
                open_braces += 1;
            }
        }

        while !self.stream.is_eof() {
            let token = self.stream.peek();
            match token.kind {
                TokenKind::OpenBraceToken => open_braces += 1,
                TokenKind::CloseBraceToken if open_braces > 0 => open_braces -= 1,
                TokenKind::CloseBraceToken => return,
                TokenKind::SemicolonToken if open_braces <= 0 => {
                    self.stream.next();
                    return;
                }
                _ if open_braces <= 0 && token.has_preceding_line_break() => return,
                _ => {}
            }
            self.stream.next();
        }
    }

    // =========================================================================
    // Depth guard
    // =========================================================================

    pub(crate) fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(ParseError::NestingTooDeep {
                pos: self.token_pos(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    pub(crate) fn current(&self) -> &Token {
        self.stream.peek()
    }

    pub(crate) fn is_token(&self, kind: TokenKind) -> bool {
        self.stream.check(kind)
    }

    /// Start offset of the current token.
    pub(crate) fn token_pos(&self) -> u32 {
        self.stream.peek().start
    }

    /// End offset of the last consumed token.
    pub(crate) fn last_end(&self) -> u32 {
        self.stream.previous().map_or(0, |t| t.end)
    }

    /// Node spanning from `start` to the end of the last consumed token.
    pub(crate) fn finish(&self, start: u32, kind: NodeKind) -> Node {
        Node::new(TextRange::new(start, self.last_end().max(start)), kind)
    }

    /// Current token is the generic keyword spelled `word`.
    pub(crate) fn is_keyword(&self, word: &str) -> bool {
        self.stream.peek().is_keyword(word)
    }

    pub(crate) fn parse_optional_keyword(&mut self, word: &str) -> bool {
        if self.is_keyword(word) {
            self.stream.next();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: TokenKind) -> ParseResult<Token> {
        self.stream.expect(kind)
    }

    pub(crate) fn parse_expected_keyword(&mut self, word: &str) -> ParseResult<Token> {
        if self.is_keyword(word) {
            return Ok(self.stream.next());
        }
        Err(self.unexpected(TokenKind::Keyword))
    }

    pub(crate) fn unexpected(&self, expected: TokenKind) -> ParseError {
        let found = self.stream.peek();
        ParseError::UnexpectedToken {
            expected,
            found: found.kind,
            value: found.value.clone(),
            pos: found.start,
        }
    }

    pub(crate) fn expected_expression(&self) -> ParseError {
        let found = self.stream.peek();
        ParseError::ExpectedExpression {
            found: found.kind,
            value: found.value.clone(),
            pos: found.start,
        }
    }

    /// Tokens usable as a binding name: identifiers and contextual keywords.
    pub(crate) fn is_binding_identifier(&self) -> bool {
        let kind = self.stream.peek().kind;
        kind == TokenKind::Identifier || kind.is_contextual_keyword()
    }

    pub(crate) fn parse_binding_identifier(&mut self) -> ParseResult<String> {
        if self.is_binding_identifier() {
            Ok(self.stream.next().value)
        } else {
            Err(self.unexpected(TokenKind::Identifier))
        }
    }

    /// Any word, reserved or not (property names after `.`, object keys).
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Token> {
        if self.stream.peek().kind.is_word() {
            Ok(self.stream.next())
        } else {
            Err(self.unexpected(TokenKind::Identifier))
        }
    }

    /// Automatic semicolon insertion: a `;`, or nothing before `}`, end of
    /// input, or a line break.
    pub(crate) fn parse_semicolon(&mut self) -> ParseResult<()> {
        if self.stream.match_token(TokenKind::SemicolonToken).is_some() {
            return Ok(());
        }
        let token = self.stream.peek();
        if token.kind == TokenKind::CloseBraceToken
            || token.kind == TokenKind::EndOfFileToken
            || token.has_preceding_line_break()
        {
            return Ok(());
        }
        Err(self.unexpected(TokenKind::SemicolonToken))
    }

    /// Whether the current token can end a statement without a `;`.
    pub(crate) fn can_insert_semicolon(&self) -> bool {
        let token = self.stream.peek();
        matches!(
            token.kind,
            TokenKind::SemicolonToken | TokenKind::CloseBraceToken | TokenKind::EndOfFileToken
        ) || token.has_preceding_line_break()
    }
}

/// Parse a complete program, failing on the first error.
pub fn parse_program(source: &str) -> ParseResult<Node> {
    ParserState::new(source).parse_program()
}

/// Parse a single expression.
pub fn parse_expression(source: &str) -> ParseResult<Node> {
    ParserState::new(source).parse_expression()
}

/// Parse a document with error recovery.
pub fn parse_document(source: &str) -> (Node, Vec<ParseError>) {
    ParserState::new(source).parse_document()
}
