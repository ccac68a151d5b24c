//! Parser state - statement and declaration parsing methods

use super::state::{ParseResult, ParserState};
use super::state_expressions::is_binding_kind;
use crate::ast::{Node, NodeKind, VariableKind};
use caret_common::TextRange;
use caret_scanner::TokenKind;

impl ParserState {
    /// Parse one statement or declaration.
    pub fn parse_statement(&mut self) -> ParseResult<Node> {
        self.enter()?;
        let result = self.parse_statement_worker();
        self.leave();
        result
    }

    fn parse_statement_worker(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        match self.current().kind {
            TokenKind::OpenBraceToken => self.parse_block_statement(),
            TokenKind::SemicolonToken => {
                self.stream.next();
                Ok(self.finish(start, NodeKind::Empty))
            }
            TokenKind::VarKeyword | TokenKind::ConstKeyword => self.parse_variable_statement(),
            TokenKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement(),
            TokenKind::FunctionKeyword => self.parse_function_declaration(),
            TokenKind::AsyncKeyword
                if self.stream.peek_nth(1).kind == TokenKind::FunctionKeyword
                    && !self.stream.peek_nth(1).has_preceding_line_break() =>
            {
                self.parse_function_declaration()
            }
            TokenKind::ClassKeyword => {
                let class = self.parse_class(true)?;
                Ok(Node::new(
                    TextRange::new(start, class.body_span.end),
                    NodeKind::ClassDeclaration(class),
                ))
            }
            TokenKind::ReturnKeyword => self.parse_return_statement(),
            TokenKind::Keyword => match self.current().value.clone().as_str() {
                "if" => self.parse_if_statement(),
                "while" => self.parse_while_statement(),
                "do" => self.parse_do_statement(),
                "for" => self.parse_for_statement(),
                "try" => self.parse_try_statement(),
                "throw" => self.parse_throw_statement(),
                "switch" => self.parse_switch_statement(),
                "break" => self.parse_jump_statement(NodeKind::Break),
                "continue" => self.parse_jump_statement(NodeKind::Continue),
                _ => self.parse_expression_statement(),
            },
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` followed by a binding starts a declaration; otherwise `let` is
    /// an identifier.
    fn is_let_declaration(&self) -> bool {
        let next = self.stream.peek_nth(1).kind;
        is_binding_kind(next)
            || next == TokenKind::OpenBraceToken
            || next == TokenKind::OpenBracketToken
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let expression = self.parse_expression_sequence()?;
        self.parse_semicolon()?;
        Ok(self.finish(
            start,
            NodeKind::ExpressionStatement {
                expression: Box::new(expression),
            },
        ))
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// `{ statements }`. While recovering, end of input closes the block and
    /// the span reaches one unit past the end.
    pub(crate) fn parse_block_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected(TokenKind::OpenBraceToken)?;
        let body = self.parse_statement_list(|p| p.is_token(TokenKind::CloseBraceToken))?;
        let end = self.parse_close_brace()?;
        Ok(Node::new(TextRange::new(start, end), NodeKind::Block { body }))
    }

    /// Consume the `}` closing a block-like construct and return the end
    /// offset of the construct.
    pub(crate) fn parse_close_brace(&mut self) -> ParseResult<u32> {
        if self.recovering && self.stream.is_eof() {
            return Ok(self.current().end + 1);
        }
        let close = self.parse_expected(TokenKind::CloseBraceToken)?;
        Ok(close.end)
    }

    /// Statements up to `is_end` or end of input.
    pub(crate) fn parse_statement_list(
        &mut self,
        is_end: impl Fn(&Self) -> bool,
    ) -> ParseResult<Vec<Node>> {
        let mut body = Vec::new();
        while !self.stream.is_eof() && !is_end(self) {
            if self.recovering {
                if let Some(statement) = self.parse_statement_recovering() {
                    body.push(statement);
                }
            } else {
                body.push(self.parse_statement()?);
            }
        }
        Ok(body)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_variable_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let declaration = self.parse_variable_declaration()?;
        self.parse_semicolon()?;
        Ok(self.finish(start, declaration.kind))
    }

    /// `var|let|const` declarators, without the terminating semicolon.
    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let kind = match self.stream.next().kind {
            TokenKind::VarKeyword => VariableKind::Var,
            TokenKind::LetKeyword => VariableKind::Let,
            _ => VariableKind::Const,
        };
        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.token_pos();
            let target = match self.current().kind {
                TokenKind::OpenBraceToken => self.parse_object_literal()?,
                TokenKind::OpenBracketToken => self.parse_array_literal()?,
                _ => {
                    let name = self.parse_binding_identifier()?;
                    self.finish(declarator_start, NodeKind::Identifier { name })
                }
            };
            let init = if self.stream.match_token(TokenKind::EqualsToken).is_some() {
                Some(Box::new(self.parse_assignment_expression()?))
            } else {
                None
            };
            declarations.push(self.finish(
                declarator_start,
                NodeKind::VariableDeclarator {
                    target: Box::new(target),
                    init,
                },
            ));
            if self.stream.match_token(TokenKind::CommaToken).is_none() {
                break;
            }
        }
        Ok(self.finish(start, NodeKind::VariableDeclaration { kind, declarations }))
    }

    /// `[async] function [*] name(params) { body }`
    fn parse_function_declaration(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        tracing::trace!(pos = start, "parse_function_declaration");
        let is_async = self.stream.match_token(TokenKind::AsyncKeyword).is_some();
        self.parse_expected(TokenKind::FunctionKeyword)?;
        self.stream.match_token(TokenKind::AsteriskToken);
        let name = self.parse_binding_identifier()?;
        let function = self.parse_function_rest(Some(name), is_async)?;
        Ok(Node::new(
            TextRange::new(start, function.body.end()),
            NodeKind::FunctionDeclaration(function),
        ))
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_return_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected(TokenKind::ReturnKeyword)?;
        let argument = if self.can_insert_semicolon() {
            None
        } else {
            Some(Box::new(self.parse_expression_sequence()?))
        };
        self.parse_semicolon()?;
        Ok(self.finish(start, NodeKind::Return { argument }))
    }

    fn parse_parenthesized_condition(&mut self) -> ParseResult<Node> {
        self.parse_expected(TokenKind::OpenParenToken)?;
        let test = self.allow_in(Self::parse_expression_sequence)?;
        self.parse_expected(TokenKind::CloseParenToken)?;
        Ok(test)
    }

    fn parse_if_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected_keyword("if")?;
        let test = self.parse_parenthesized_condition()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.parse_optional_keyword("else") {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(self.finish(
            start,
            NodeKind::If {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate,
            },
        ))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected_keyword("while")?;
        let test = self.parse_parenthesized_condition()?;
        let body = self.parse_statement()?;
        Ok(self.finish(
            start,
            NodeKind::While {
                test: Box::new(test),
                body: Box::new(body),
            },
        ))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected_keyword("do")?;
        let body = self.parse_statement()?;
        self.parse_expected_keyword("while")?;
        let test = self.parse_parenthesized_condition()?;
        self.stream.match_token(TokenKind::SemicolonToken);
        Ok(self.finish(
            start,
            NodeKind::DoWhile {
                body: Box::new(body),
                test: Box::new(test),
            },
        ))
    }

    /// `for (init; test; update)`, `for (x in obj)` and `for (x of iter)`.
    fn parse_for_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected_keyword("for")?;
        self.parse_optional_keyword("await");
        self.parse_expected(TokenKind::OpenParenToken)?;

        let init = if self.is_token(TokenKind::SemicolonToken) {
            None
        } else {
            let saved_no_in = std::mem::replace(&mut self.no_in, true);
            let init = if matches!(
                self.current().kind,
                TokenKind::VarKeyword | TokenKind::ConstKeyword
            ) || (self.is_token(TokenKind::LetKeyword) && self.is_let_declaration())
            {
                self.parse_variable_declaration()
            } else {
                self.parse_expression_sequence()
            };
            self.no_in = saved_no_in;
            Some(init?)
        };

        if let Some(left) = init.as_ref()
            && matches!(self.current().kind, TokenKind::InKeyword | TokenKind::OfKeyword)
        {
            let is_of = self.stream.next().kind == TokenKind::OfKeyword;
            let right = if is_of {
                self.parse_assignment_expression()?
            } else {
                self.parse_expression_sequence()?
            };
            self.parse_expected(TokenKind::CloseParenToken)?;
            let body = self.parse_statement()?;
            return Ok(self.finish(
                start,
                NodeKind::ForInOf {
                    left: Box::new(left.clone()),
                    right: Box::new(right),
                    body: Box::new(body),
                    is_of,
                },
            ));
        }

        self.parse_expected(TokenKind::SemicolonToken)?;
        let test = if self.is_token(TokenKind::SemicolonToken) {
            None
        } else {
            Some(Box::new(self.parse_expression_sequence()?))
        };
        self.parse_expected(TokenKind::SemicolonToken)?;
        let update = if self.is_token(TokenKind::CloseParenToken) {
            None
        } else {
            Some(Box::new(self.parse_expression_sequence()?))
        };
        self.parse_expected(TokenKind::CloseParenToken)?;
        let body = self.parse_statement()?;
        Ok(self.finish(
            start,
            NodeKind::For {
                init: init.map(Box::new),
                test,
                update,
                body: Box::new(body),
            },
        ))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected_keyword("switch")?;
        let discriminant = self.parse_parenthesized_condition()?;
        self.parse_expected(TokenKind::OpenBraceToken)?;
        let mut cases = Vec::new();
        while !self.is_token(TokenKind::CloseBraceToken) && !self.stream.is_eof() {
            let case_start = self.token_pos();
            let test = if self.parse_optional_keyword("default") {
                None
            } else {
                self.parse_expected_keyword("case")?;
                Some(Box::new(self.allow_in(Self::parse_expression_sequence)?))
            };
            self.parse_expected(TokenKind::ColonToken)?;
            let consequent = self.parse_statement_list(|p| {
                p.is_token(TokenKind::CloseBraceToken) || p.is_keyword("case") || p.is_keyword("default")
            })?;
            cases.push(self.finish(case_start, NodeKind::SwitchCase { test, consequent }));
        }
        let end = self.parse_close_brace()?;
        Ok(Node::new(
            TextRange::new(start, end),
            NodeKind::Switch {
                discriminant: Box::new(discriminant),
                cases,
            },
        ))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected_keyword("try")?;
        let block = self.parse_block_statement()?;

        let handler = if self.is_keyword("catch") {
            let catch_start = self.token_pos();
            self.stream.next();
            let mut param = None;
            if self.stream.match_token(TokenKind::OpenParenToken).is_some() {
                match self.current().kind {
                    TokenKind::OpenBraceToken => {
                        self.parse_object_literal()?;
                    }
                    TokenKind::OpenBracketToken => {
                        self.parse_array_literal()?;
                    }
                    _ => param = Some(self.parse_binding_identifier()?),
                }
                self.parse_expected(TokenKind::CloseParenToken)?;
            }
            let body = self.parse_block_statement()?;
            Some(Box::new(Node::new(
                TextRange::new(catch_start, body.end()),
                NodeKind::CatchClause {
                    param,
                    body: Box::new(body),
                },
            )))
        } else {
            None
        };

        let finalizer = if self.parse_optional_keyword("finally") {
            Some(Box::new(self.parse_block_statement()?))
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected(TokenKind::Keyword));
        }
        let end = finalizer
            .as_ref()
            .or(handler.as_ref())
            .map_or(block.end(), |node| node.end());
        Ok(Node::new(
            TextRange::new(start, end),
            NodeKind::Try {
                block: Box::new(block),
                handler,
                finalizer,
            },
        ))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected_keyword("throw")?;
        let argument = self.parse_expression_sequence()?;
        self.parse_semicolon()?;
        Ok(self.finish(
            start,
            NodeKind::Throw {
                argument: Box::new(argument),
            },
        ))
    }

    /// `break` / `continue` with an optional same-line label.
    fn parse_jump_statement(&mut self, kind: NodeKind) -> ParseResult<Node> {
        let start = self.token_pos();
        self.stream.next();
        if self.is_binding_identifier() && !self.current().has_preceding_line_break() {
            self.stream.next();
        }
        self.parse_semicolon()?;
        Ok(self.finish(start, kind))
    }
}
