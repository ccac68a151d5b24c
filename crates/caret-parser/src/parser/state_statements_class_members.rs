//! Parser state - class declarations and class member parsing

use super::state::{ParseResult, ParserState};
use crate::ast::{Class, MethodKind, Node, NodeKind};
use caret_common::TextRange;
use caret_scanner::{TokenKind, unescape_string};

/// TypeScript accessibility modifiers, skipped in front of member names.
const ACCESSIBILITY_MODIFIERS: &[&str] = &["public", "private", "protected"];

impl ParserState {
    /// `class [Name] [extends Expr] { members }`
    pub(crate) fn parse_class(&mut self, require_name: bool) -> ParseResult<Class> {
        self.parse_expected(TokenKind::ClassKeyword)?;
        let name = if self.is_binding_identifier() {
            Some(self.parse_binding_identifier()?)
        } else if require_name {
            return Err(self.unexpected(TokenKind::Identifier));
        } else {
            None
        };
        let superclass = if self.stream.match_token(TokenKind::ExtendsKeyword).is_some() {
            Some(Box::new(self.parse_left_hand_side_expression()?))
        } else {
            None
        };

        let body_start = self.token_pos();
        self.parse_expected(TokenKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.is_token(TokenKind::CloseBraceToken) && !self.stream.is_eof() {
            if self.stream.match_token(TokenKind::SemicolonToken).is_some() {
                continue;
            }
            let member_start = self.stream.position();
            match self.parse_class_member() {
                Ok(Some(member)) => members.push(member),
                Ok(None) => {}
                Err(err) if self.recovering => {
                    self.errors.push(err);
                    self.skip_class_member(member_start);
                }
                Err(err) => return Err(err),
            }
        }
        let end = self.parse_close_brace()?;

        Ok(Class {
            name,
            superclass,
            members,
            body_span: TextRange::new(body_start, end),
        })
    }

    /// Skip the rest of a malformed member: to the next line, `;`, or the
    /// class's closing brace, stepping over any braces the member opened.
    fn skip_class_member(&mut self, member_start: usize) {
        if self.stream.position() == member_start {
            self.stream.next();
        }
        let mut depth = 0u32;
        while !self.stream.is_eof() {
            let token = self.current();
            match token.kind {
                TokenKind::OpenBraceToken => depth += 1,
                TokenKind::CloseBraceToken if depth == 0 => return,
                TokenKind::CloseBraceToken => depth -= 1,
                TokenKind::SemicolonToken if depth == 0 => {
                    self.stream.next();
                    return;
                }
                _ if depth == 0 && token.has_preceding_line_break() => return,
                _ => {}
            }
            self.stream.next();
        }
    }

    /// One class element. Static initialization blocks are parsed and
    /// dropped (`None`).
    fn parse_class_member(&mut self) -> ParseResult<Option<Node>> {
        let start = self.token_pos();

        while self.is_accessibility_modifier() {
            self.stream.next();
        }

        let mut is_static = false;
        if self.is_token(TokenKind::StaticKeyword) {
            let next = self.stream.peek_nth(1).kind;
            if next == TokenKind::OpenBraceToken {
                self.stream.next();
                self.parse_block_statement()?;
                return Ok(None);
            }
            if self.is_modifier_before_key() {
                self.stream.next();
                is_static = true;
            }
        }

        let mut is_async = false;
        if self.is_token(TokenKind::AsyncKeyword)
            && self.is_modifier_before_key()
            && !self.stream.peek_nth(1).has_preceding_line_break()
        {
            self.stream.next();
            is_async = true;
        }
        let is_generator = self.stream.match_token(TokenKind::AsteriskToken).is_some();

        let mut kind = MethodKind::Method;
        if !is_async
            && !is_generator
            && matches!(self.current().kind, TokenKind::GetKeyword | TokenKind::SetKeyword)
            && self.is_modifier_before_key()
        {
            kind = if self.stream.next().kind == TokenKind::GetKeyword {
                MethodKind::Getter
            } else {
                MethodKind::Setter
            };
        }

        let key = self.parse_class_member_name()?;

        if self.is_token(TokenKind::OpenParenToken) {
            if kind == MethodKind::Method && !is_static && key == "constructor" {
                kind = MethodKind::Constructor;
            }
            let function_start = self.token_pos();
            let function = self.parse_function_rest(Some(key.clone()), is_async)?;
            let end = function.body.end();
            let value = Node::new(
                TextRange::new(function_start, end),
                NodeKind::FunctionExpression(function),
            );
            return Ok(Some(Node::new(
                TextRange::new(start, end),
                NodeKind::MethodDefinition {
                    key,
                    kind,
                    is_static,
                    value: Box::new(value),
                },
            )));
        }

        // Field: `name;` or `name = value;`
        let value = if self.stream.match_token(TokenKind::EqualsToken).is_some() {
            Some(Box::new(self.parse_assignment_expression()?))
        } else {
            None
        };
        self.parse_semicolon()?;
        Ok(Some(self.finish(
            start,
            NodeKind::PropertyDefinition {
                key,
                value,
                is_static,
            },
        )))
    }

    fn is_accessibility_modifier(&self) -> bool {
        let token = self.current();
        token.kind == TokenKind::Keyword
            && ACCESSIBILITY_MODIFIERS.contains(&token.value.as_str())
            && self.is_modifier_before_key()
    }

    /// Member name as a string: words, `#private`, string and numeric keys.
    /// A computed key with a string literal inside keeps that string; any
    /// other computed key becomes `[computed]`.
    fn parse_class_member_name(&mut self) -> ParseResult<String> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::HashToken => {
                self.stream.next();
                let name = self.parse_identifier_name()?;
                Ok(format!("#{}", name.value))
            }
            TokenKind::StringLiteral => {
                self.stream.next();
                Ok(unescape_string(&token.value))
            }
            TokenKind::NumericLiteral => {
                self.stream.next();
                Ok(token.value)
            }
            TokenKind::OpenBracketToken => {
                self.stream.next();
                let key = self.allow_in(Self::parse_assignment_expression)?;
                self.parse_expected(TokenKind::CloseBracketToken)?;
                Ok(match key.kind {
                    NodeKind::StringLiteral { value } => value,
                    _ => "[computed]".to_string(),
                })
            }
            kind if kind.is_word() => {
                self.stream.next();
                Ok(token.value)
            }
            _ => Err(self.unexpected(TokenKind::Identifier)),
        }
    }
}
