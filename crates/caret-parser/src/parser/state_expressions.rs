//! Parser state - expression parsing methods

use super::state::{ParseResult, ParserState};
use crate::ast::{Function, Node, NodeKind, UnaryOperator};
use caret_common::TextRange;
use caret_scanner::{TokenKind, unescape_string};

/// Binding power of a binary operator; higher binds tighter.
///
/// One level per step of the cascade between conditional and unary, each
/// left-associative except `**`:
///
/// - 1: logical-or and nullish (`||`, `??`)
/// - 2: logical-and (`&&`)
/// - 3 to 5: bitwise or, xor, and
/// - 6: equality
/// - 7: relational, `instanceof`, `in`
/// - 8: shift
/// - 9: additive
/// - 10: multiplicative
/// - 11: exponent (`**`)
///
/// `in` is excluded while parsing the head of a `for` statement.
pub(crate) fn get_binary_operator_precedence(kind: TokenKind, no_in: bool) -> Option<u8> {
    let precedence = match kind {
        TokenKind::BarBarToken | TokenKind::QuestionQuestionToken => 1,
        TokenKind::AmpersandAmpersandToken => 2,
        TokenKind::BarToken => 3,
        TokenKind::CaretToken => 4,
        TokenKind::AmpersandToken => 5,
        TokenKind::EqualsEqualsToken
        | TokenKind::ExclamationEqualsToken
        | TokenKind::EqualsEqualsEqualsToken
        | TokenKind::ExclamationEqualsEqualsToken => 6,
        TokenKind::InKeyword if no_in => return None,
        TokenKind::LessThanToken
        | TokenKind::GreaterThanToken
        | TokenKind::LessThanEqualsToken
        | TokenKind::GreaterThanEqualsToken
        | TokenKind::InstanceofKeyword
        | TokenKind::InKeyword => 7,
        TokenKind::LessThanLessThanToken
        | TokenKind::GreaterThanGreaterThanToken
        | TokenKind::GreaterThanGreaterThanGreaterThanToken => 8,
        TokenKind::PlusToken | TokenKind::MinusToken => 9,
        TokenKind::AsteriskToken | TokenKind::SlashToken | TokenKind::PercentToken => 10,
        TokenKind::AsteriskAsteriskToken => 11,
        _ => return None,
    };
    Some(precedence)
}

fn is_logical_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::AmpersandAmpersandToken
            | TokenKind::BarBarToken
            | TokenKind::QuestionQuestionToken
    )
}

pub(crate) fn is_binding_kind(kind: TokenKind) -> bool {
    kind == TokenKind::Identifier || kind.is_contextual_keyword()
}

/// Numeric value of a numeric literal's source text.
pub(crate) fn parse_numeric_value(raw: &str) -> f64 {
    let text: String = raw.chars().filter(|&c| c != '_').collect();
    let lower = text.to_ascii_lowercase();
    let radix = if lower.starts_with("0x") {
        16
    } else if lower.starts_with("0o") {
        8
    } else if lower.starts_with("0b") {
        2
    } else {
        return text.parse::<f64>().unwrap_or(f64::NAN);
    };
    u64::from_str_radix(&text[2..], radix).map_or(f64::NAN, |v| v as f64)
}

impl ParserState {
    // =========================================================================
    // Assignment, conditional, binary
    // =========================================================================

    /// Parse an expression at assignment precedence.
    pub(crate) fn parse_assignment_expression(&mut self) -> ParseResult<Node> {
        self.enter()?;
        let result = self.parse_assignment_expression_or_higher();
        self.leave();
        result
    }

    fn parse_assignment_expression_or_higher(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let target = self.parse_conditional_expression()?;
        let operator = self.current().kind;
        if !operator.is_assignment_operator() {
            return Ok(target);
        }
        self.stream.next();
        let value = self.parse_assignment_expression()?;
        Ok(Node::new(
            TextRange::new(start, value.end()),
            NodeKind::Assignment {
                operator,
                target: Box::new(target),
                value: Box::new(value),
            },
        ))
    }

    /// Comma-separated expressions; a single one is returned unwrapped.
    pub(crate) fn parse_expression_sequence(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let first = self.parse_assignment_expression()?;
        if !self.is_token(TokenKind::CommaToken) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.stream.match_token(TokenKind::CommaToken).is_some() {
            expressions.push(self.parse_assignment_expression()?);
        }
        Ok(self.finish(start, NodeKind::Sequence { expressions }))
    }

    /// Run `f` with `in` allowed as an operator again.
    pub(crate) fn allow_in<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = std::mem::replace(&mut self.no_in, false);
        let result = f(self);
        self.no_in = saved;
        result
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let test = self.parse_binary_expression(1)?;
        if self.stream.match_token(TokenKind::QuestionToken).is_none() {
            return Ok(test);
        }
        let consequent = self.allow_in(Self::parse_assignment_expression)?;
        self.parse_expected(TokenKind::ColonToken)?;
        let alternate = self.parse_assignment_expression()?;
        Ok(Node::new(
            TextRange::new(start, alternate.end()),
            NodeKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
        ))
    }

    /// Precedence climbing over the binary operator levels.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> ParseResult<Node> {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression()?;
        loop {
            let operator = self.current().kind;
            let Some(precedence) = get_binary_operator_precedence(operator, self.no_in) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.stream.next();
            // `**` is right-associative, everything else associates left.
            let next_min = if operator == TokenKind::AsteriskAsteriskToken {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary_expression(next_min)?;
            let span = TextRange::new(start, right.end());
            let (left_box, right_box) = (Box::new(left), Box::new(right));
            let kind = if is_logical_operator(operator) {
                NodeKind::Logical {
                    operator,
                    left: left_box,
                    right: right_box,
                }
            } else {
                NodeKind::Binary {
                    operator,
                    left: left_box,
                    right: right_box,
                }
            };
            left = Node::new(span, kind);
        }
        Ok(left)
    }

    // =========================================================================
    // Unary and update
    // =========================================================================

    fn parse_unary_expression(&mut self) -> ParseResult<Node> {
        self.enter()?;
        let result = self.parse_unary_expression_inner();
        self.leave();
        result
    }

    fn parse_unary_expression_inner(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let token = self.current();
        let unary = match token.kind {
            TokenKind::ExclamationToken => Some(UnaryOperator::Not),
            TokenKind::TildeToken => Some(UnaryOperator::BitwiseNot),
            TokenKind::PlusToken => Some(UnaryOperator::Plus),
            TokenKind::MinusToken => Some(UnaryOperator::Minus),
            TokenKind::TypeofKeyword => Some(UnaryOperator::Typeof),
            TokenKind::Keyword => match token.value.as_str() {
                "void" => Some(UnaryOperator::Void),
                "delete" => Some(UnaryOperator::Delete),
                "await" => Some(UnaryOperator::Await),
                _ => None,
            },
            _ => None,
        };
        if let Some(operator) = unary {
            self.stream.next();
            let argument = self.parse_unary_expression()?;
            return Ok(Node::new(
                TextRange::new(start, argument.end()),
                NodeKind::Unary {
                    operator,
                    argument: Box::new(argument),
                },
            ));
        }

        if matches!(self.current().kind, TokenKind::PlusPlusToken | TokenKind::MinusMinusToken) {
            let operator = self.stream.next().kind;
            let argument = self.parse_unary_expression()?;
            return Ok(Node::new(
                TextRange::new(start, argument.end()),
                NodeKind::Update {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                },
            ));
        }

        let expression = self.parse_left_hand_side_expression()?;
        let next = self.current();
        if matches!(next.kind, TokenKind::PlusPlusToken | TokenKind::MinusMinusToken)
            && !next.has_preceding_line_break()
        {
            let operator = self.stream.next().kind;
            return Ok(self.finish(
                start,
                NodeKind::Update {
                    operator,
                    prefix: false,
                    argument: Box::new(expression),
                },
            ));
        }
        Ok(expression)
    }

    // =========================================================================
    // new / call / member
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let expression = if self.is_token(TokenKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        if matches!(expression.kind, NodeKind::ArrowFunction { .. }) {
            return Ok(expression);
        }
        self.parse_call_and_member_suffixes(start, expression)
    }

    /// Suffix loop: `.name`, `?.name`, `?.[expr]`, `?.(args)`, `[expr]`,
    /// `(args)` and tagged templates.
    fn parse_call_and_member_suffixes(&mut self, start: u32, mut expression: Node) -> ParseResult<Node> {
        loop {
            match self.current().kind {
                TokenKind::DotToken => {
                    self.stream.next();
                    let property = self.parse_member_name()?;
                    expression = self.member(start, expression, property, false, false);
                }
                TokenKind::QuestionDotToken => {
                    self.stream.next();
                    if self.is_token(TokenKind::OpenParenToken) {
                        let arguments = self.parse_arguments()?;
                        expression = self.finish(
                            start,
                            NodeKind::Call {
                                callee: Box::new(expression),
                                arguments,
                                optional: true,
                            },
                        );
                    } else if self.is_token(TokenKind::OpenBracketToken) {
                        let property = self.parse_computed_member()?;
                        expression = self.member(start, expression, property, true, true);
                    } else {
                        let property = self.parse_member_name()?;
                        expression = self.member(start, expression, property, false, true);
                    }
                }
                TokenKind::OpenBracketToken => {
                    let property = self.parse_computed_member()?;
                    expression = self.member(start, expression, property, true, false);
                }
                TokenKind::OpenParenToken => {
                    let arguments = self.parse_arguments()?;
                    expression = self.finish(
                        start,
                        NodeKind::Call {
                            callee: Box::new(expression),
                            arguments,
                            optional: false,
                        },
                    );
                }
                TokenKind::TemplateLiteral => {
                    let template = self.parse_primary_expression()?;
                    expression = self.finish(
                        start,
                        NodeKind::Call {
                            callee: Box::new(expression),
                            arguments: vec![template],
                            optional: false,
                        },
                    );
                }
                _ => return Ok(expression),
            }
        }
    }

    fn member(&self, start: u32, object: Node, property: Node, computed: bool, optional: bool) -> Node {
        self.finish(
            start,
            NodeKind::Member {
                object: Box::new(object),
                property: Box::new(property),
                computed,
                optional,
            },
        )
    }

    /// Name after `.`: any word, or `#private`.
    fn parse_member_name(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        if self.stream.match_token(TokenKind::HashToken).is_some() {
            let name = self.parse_identifier_name()?;
            return Ok(self.finish(
                start,
                NodeKind::Identifier {
                    name: format!("#{}", name.value),
                },
            ));
        }
        let name = self.parse_identifier_name()?;
        Ok(self.finish(start, NodeKind::Identifier { name: name.value }))
    }

    fn parse_computed_member(&mut self) -> ParseResult<Node> {
        self.parse_expected(TokenKind::OpenBracketToken)?;
        let property = self.allow_in(Self::parse_expression_sequence)?;
        self.parse_expected(TokenKind::CloseBracketToken)?;
        Ok(property)
    }

    /// `( arg, ...spread, )`
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<Node>> {
        self.parse_expected(TokenKind::OpenParenToken)?;
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !p.is_token(TokenKind::CloseParenToken) {
                arguments.push(p.parse_spread_or_assignment()?);
                if !p.is_token(TokenKind::CloseParenToken) {
                    p.parse_expected(TokenKind::CommaToken)?;
                }
            }
            Ok(arguments)
        })?;
        self.parse_expected(TokenKind::CloseParenToken)?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        if self.stream.match_token(TokenKind::DotDotDotToken).is_some() {
            let argument = self.parse_assignment_expression()?;
            return Ok(self.finish(
                start,
                NodeKind::SpreadElement {
                    argument: Box::new(argument),
                },
            ));
        }
        self.parse_assignment_expression()
    }

    /// `new Callee(args)`; the callee takes member accesses but no calls.
    fn parse_new_expression(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected(TokenKind::NewKeyword)?;

        if self.stream.match_token(TokenKind::DotToken).is_some() {
            let meta = self.parse_identifier_name()?;
            return Ok(self.finish(
                start,
                NodeKind::Identifier {
                    name: format!("new.{}", meta.value),
                },
            ));
        }

        let callee_start = self.token_pos();
        let mut callee = if self.is_token(TokenKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        loop {
            match self.current().kind {
                TokenKind::DotToken => {
                    self.stream.next();
                    let property = self.parse_member_name()?;
                    callee = self.member(callee_start, callee, property, false, false);
                }
                TokenKind::OpenBracketToken => {
                    let property = self.parse_computed_member()?;
                    callee = self.member(callee_start, callee, property, true, false);
                }
                _ => break,
            }
        }

        let arguments = if self.is_token(TokenKind::OpenParenToken) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.finish(
            start,
            NodeKind::New {
                callee: Box::new(callee),
                arguments,
            },
        ))
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let token = self.current().clone();
        match token.kind {
            TokenKind::AsyncKeyword => self.parse_async_primary(),
            kind if is_binding_kind(kind) => {
                let next = self.stream.peek_nth(1);
                if next.kind == TokenKind::EqualsGreaterThanToken && !next.has_preceding_line_break() {
                    return self.parse_single_parameter_arrow(start, false);
                }
                self.stream.next();
                Ok(self.finish(start, NodeKind::Identifier { name: token.value }))
            }
            TokenKind::ThisKeyword => {
                self.stream.next();
                Ok(self.finish(start, NodeKind::This))
            }
            TokenKind::StringLiteral => {
                self.stream.next();
                Ok(self.finish(
                    start,
                    NodeKind::StringLiteral {
                        value: unescape_string(&token.value),
                    },
                ))
            }
            TokenKind::NumericLiteral => {
                self.stream.next();
                if token.value.ends_with('n') {
                    return Ok(self.finish(start, NodeKind::BigIntLiteral { raw: token.value }));
                }
                Ok(self.finish(
                    start,
                    NodeKind::NumericLiteral {
                        value: parse_numeric_value(&token.value),
                        raw: token.value,
                    },
                ))
            }
            TokenKind::TemplateLiteral => {
                self.stream.next();
                Ok(self.finish(start, NodeKind::TemplateLiteral { raw: token.value }))
            }
            TokenKind::Keyword => {
                let kind = match token.value.as_str() {
                    "true" => NodeKind::BooleanLiteral { value: true },
                    "false" => NodeKind::BooleanLiteral { value: false },
                    "null" => NodeKind::NullLiteral,
                    "super" => NodeKind::Super,
                    _ => return Err(self.expected_expression()),
                };
                self.stream.next();
                Ok(self.finish(start, kind))
            }
            TokenKind::OpenParenToken => self.parse_parenthesized_or_arrow(start, false),
            TokenKind::OpenBracketToken => self.parse_array_literal(),
            TokenKind::OpenBraceToken => self.parse_object_literal(),
            TokenKind::FunctionKeyword => self.parse_function_expression(start, false),
            TokenKind::ClassKeyword => {
                let class = self.parse_class(false)?;
                Ok(self.finish(start, NodeKind::ClassExpression(class)))
            }
            TokenKind::NewKeyword => self.parse_new_expression(),
            _ => Err(self.expected_expression()),
        }
    }

    /// `async function`, `async x => ...`, `async (...) => ...`, or a plain
    /// identifier named `async`.
    fn parse_async_primary(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        let next = self.stream.peek_nth(1);
        let same_line = !next.has_preceding_line_break();
        let next_kind = next.kind;

        if same_line && next_kind == TokenKind::FunctionKeyword {
            self.stream.next();
            return self.parse_function_expression(start, true);
        }
        if same_line
            && is_binding_kind(next_kind)
            && self.stream.peek_nth(2).kind == TokenKind::EqualsGreaterThanToken
        {
            self.stream.next();
            return self.parse_single_parameter_arrow(start, true);
        }
        if same_line && next_kind == TokenKind::OpenParenToken {
            let saved = self.stream.position();
            self.stream.next();
            if let Some(params) = self.try_arrow_parameters() {
                return self.parse_arrow_function_rest(start, params, true);
            }
            self.stream.reset(saved);
        }

        let token = self.stream.next();
        Ok(self.finish(start, NodeKind::Identifier { name: token.value }))
    }

    fn is_arrow_ahead(&self) -> bool {
        let token = self.current();
        token.kind == TokenKind::EqualsGreaterThanToken && !token.has_preceding_line_break()
    }

    /// `(` starts either an arrow parameter list or a parenthesized
    /// expression. Try the parameter list first; if it does not parse or no
    /// `=>` follows, rewind and parse the parenthesized expression.
    fn parse_parenthesized_or_arrow(&mut self, start: u32, is_async: bool) -> ParseResult<Node> {
        if let Some(params) = self.try_arrow_parameters() {
            return self.parse_arrow_function_rest(start, params, is_async);
        }

        self.parse_expected(TokenKind::OpenParenToken)?;
        let expression = self.allow_in(Self::parse_expression_sequence)?;
        self.parse_expected(TokenKind::CloseParenToken)?;
        Ok(self.finish(
            start,
            NodeKind::Parenthesized {
                expression: Box::new(expression),
            },
        ))
    }

    /// Speculatively parse a parameter list at the current `(` and return
    /// it when `=>` follows. Otherwise the stream is left at the `(` and the
    /// position is remembered: the attempt depends only on the tokens ahead,
    /// so a `(` reached again after an enclosing rewind fails without
    /// re-parsing.
    fn try_arrow_parameters(&mut self) -> Option<Vec<Node>> {
        let saved = self.stream.position();
        if self.failed_arrow_params.contains(&saved) {
            return None;
        }
        let saved_errors = self.errors.len();
        if let Ok(params) = self.parse_parameter_list()
            && self.is_arrow_ahead()
        {
            return Some(params);
        }
        self.stream.reset(saved);
        self.errors.truncate(saved_errors);
        self.failed_arrow_params.insert(saved);
        None
    }

    /// `x => body`: the identifier becomes the only parameter.
    fn parse_single_parameter_arrow(&mut self, start: u32, is_async: bool) -> ParseResult<Node> {
        let param_start = self.token_pos();
        let name = self.parse_binding_identifier()?;
        let param = self.finish(
            param_start,
            NodeKind::Parameter {
                name,
                pattern: None,
                default: None,
                rest: false,
            },
        );
        self.parse_arrow_function_rest(start, vec![param], is_async)
    }

    fn parse_arrow_function_rest(
        &mut self,
        start: u32,
        params: Vec<Node>,
        is_async: bool,
    ) -> ParseResult<Node> {
        self.parse_expected(TokenKind::EqualsGreaterThanToken)?;
        let body = if self.is_token(TokenKind::OpenBraceToken) {
            self.allow_in(Self::parse_block_statement)?
        } else {
            self.parse_assignment_expression()?
        };
        Ok(Node::new(
            TextRange::new(start, body.end()),
            NodeKind::ArrowFunction {
                params,
                body: Box::new(body),
                is_async,
            },
        ))
    }

    /// `( a, b = 1, {c}, ...rest )`. A rest parameter must be last.
    pub(crate) fn parse_parameter_list(&mut self) -> ParseResult<Vec<Node>> {
        self.parse_expected(TokenKind::OpenParenToken)?;
        let mut params = Vec::new();
        while !self.is_token(TokenKind::CloseParenToken) {
            let start = self.token_pos();
            let rest = self.stream.match_token(TokenKind::DotDotDotToken).is_some();
            let (name, pattern) = match self.current().kind {
                TokenKind::OpenBraceToken => (String::new(), Some(Box::new(self.parse_object_literal()?))),
                TokenKind::OpenBracketToken => (String::new(), Some(Box::new(self.parse_array_literal()?))),
                _ => (self.parse_binding_identifier()?, None),
            };
            let default = if self.stream.match_token(TokenKind::EqualsToken).is_some() {
                Some(Box::new(self.allow_in(Self::parse_assignment_expression)?))
            } else {
                None
            };
            params.push(self.finish(
                start,
                NodeKind::Parameter {
                    name,
                    pattern,
                    default,
                    rest,
                },
            ));
            if rest || self.is_token(TokenKind::CloseParenToken) {
                break;
            }
            self.parse_expected(TokenKind::CommaToken)?;
        }
        self.parse_expected(TokenKind::CloseParenToken)?;
        Ok(params)
    }

    // =========================================================================
    // Literals
    // =========================================================================

    /// `[a, , ...b]`; holes are dropped.
    pub(crate) fn parse_array_literal(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected(TokenKind::OpenBracketToken)?;
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            while !p.is_token(TokenKind::CloseBracketToken) {
                if p.stream.match_token(TokenKind::CommaToken).is_some() {
                    continue;
                }
                elements.push(p.parse_spread_or_assignment()?);
                if !p.is_token(TokenKind::CloseBracketToken) {
                    p.parse_expected(TokenKind::CommaToken)?;
                }
            }
            Ok(elements)
        })?;
        self.parse_expected(TokenKind::CloseBracketToken)?;
        Ok(self.finish(start, NodeKind::ArrayLiteral { elements }))
    }

    pub(crate) fn parse_object_literal(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        self.parse_expected(TokenKind::OpenBraceToken)?;
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            while !p.is_token(TokenKind::CloseBraceToken) {
                properties.push(p.parse_object_member()?);
                if !p.is_token(TokenKind::CloseBraceToken) {
                    p.parse_expected(TokenKind::CommaToken)?;
                }
            }
            Ok(properties)
        })?;
        self.parse_expected(TokenKind::CloseBraceToken)?;
        Ok(self.finish(start, NodeKind::ObjectLiteral { properties }))
    }

    /// Whether the token after the current one starts a property key, so
    /// the current `get`/`set`/`async` is a modifier rather than the key.
    pub(crate) fn is_modifier_before_key(&self) -> bool {
        let next = self.stream.peek_nth(1);
        next.kind.is_word()
            || matches!(
                next.kind,
                TokenKind::StringLiteral
                    | TokenKind::NumericLiteral
                    | TokenKind::OpenBracketToken
                    | TokenKind::HashToken
                    | TokenKind::AsteriskToken
            )
    }

    fn parse_object_member(&mut self) -> ParseResult<Node> {
        let start = self.token_pos();
        if self.stream.match_token(TokenKind::DotDotDotToken).is_some() {
            let argument = self.parse_assignment_expression()?;
            return Ok(self.finish(
                start,
                NodeKind::SpreadElement {
                    argument: Box::new(argument),
                },
            ));
        }

        let mut is_async = false;
        if self.is_token(TokenKind::AsyncKeyword) && self.is_modifier_before_key() {
            self.stream.next();
            is_async = true;
        }
        let is_generator = self.stream.match_token(TokenKind::AsteriskToken).is_some();
        let is_accessor = !is_async
            && !is_generator
            && matches!(self.current().kind, TokenKind::GetKeyword | TokenKind::SetKeyword)
            && self.is_modifier_before_key();
        if is_accessor {
            self.stream.next();
        }

        let (key, computed) = self.parse_property_key()?;

        if self.is_token(TokenKind::OpenParenToken) {
            let function_start = self.token_pos();
            let function = self.parse_function_rest(None, is_async)?;
            let value = Node::new(
                TextRange::new(function_start, function.body.end()),
                NodeKind::FunctionExpression(function),
            );
            return Ok(self.finish(
                start,
                NodeKind::Property {
                    key: Box::new(key),
                    value: Box::new(value),
                    computed,
                    shorthand: false,
                    method: true,
                },
            ));
        }

        if self.stream.match_token(TokenKind::ColonToken).is_some() {
            let value = self.parse_assignment_expression()?;
            return Ok(self.finish(
                start,
                NodeKind::Property {
                    key: Box::new(key),
                    value: Box::new(value),
                    computed,
                    shorthand: false,
                    method: false,
                },
            ));
        }

        if !computed && key.as_identifier().is_some() {
            // Shorthand `{ a }`, or `{ a = 1 }` when the literal is a pattern.
            let mut value = key.clone();
            if self.stream.match_token(TokenKind::EqualsToken).is_some() {
                let default = self.parse_assignment_expression()?;
                value = Node::new(
                    TextRange::new(key.start(), default.end()),
                    NodeKind::Assignment {
                        operator: TokenKind::EqualsToken,
                        target: Box::new(key.clone()),
                        value: Box::new(default),
                    },
                );
            }
            return Ok(self.finish(
                start,
                NodeKind::Property {
                    key: Box::new(key),
                    value: Box::new(value),
                    computed: false,
                    shorthand: true,
                    method: false,
                },
            ));
        }

        Err(self.unexpected(TokenKind::ColonToken))
    }

    /// Property key: a word, string, number, or `[computed]`.
    fn parse_property_key(&mut self) -> ParseResult<(Node, bool)> {
        let start = self.token_pos();
        let token = self.current().clone();
        match token.kind {
            TokenKind::OpenBracketToken => {
                let key = self.parse_computed_member()?;
                Ok((key, true))
            }
            TokenKind::StringLiteral | TokenKind::NumericLiteral => {
                Ok((self.parse_primary_expression()?, false))
            }
            kind if kind.is_word() => {
                self.stream.next();
                Ok((self.finish(start, NodeKind::Identifier { name: token.value }), false))
            }
            _ => Err(self.unexpected(TokenKind::Identifier)),
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn parse_function_expression(&mut self, start: u32, is_async: bool) -> ParseResult<Node> {
        self.parse_expected(TokenKind::FunctionKeyword)?;
        self.stream.match_token(TokenKind::AsteriskToken);
        let name = if self.is_binding_identifier() {
            Some(self.parse_binding_identifier()?)
        } else {
            None
        };
        let function = self.parse_function_rest(name, is_async)?;
        Ok(Node::new(
            TextRange::new(start, function.body.end()),
            NodeKind::FunctionExpression(function),
        ))
    }

    /// Parameter list and body of any function form.
    pub(crate) fn parse_function_rest(
        &mut self,
        name: Option<String>,
        is_async: bool,
    ) -> ParseResult<Function> {
        let params = self.parse_parameter_list()?;
        let body = self.allow_in(Self::parse_block_statement)?;
        Ok(Function {
            name,
            params,
            body: Box::new(body),
            is_async,
        })
    }
}
