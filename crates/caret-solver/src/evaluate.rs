//! Type evaluation of AST expressions.
//!
//! `TypeEvaluator` computes a best-effort [`TypeDescriptor`] for an
//! expression node. Names, `this` and member lookups are answered by a
//! [`TypeEnvironment`], so the same evaluator serves the binder (scope-aware)
//! and standalone callers ([`EmptyEnvironment`]).
//!
//! Evaluation never fails. Anything it cannot see through is `Unknown`.

use crate::builtins::{builtin_instance_type, global_type};
use crate::members::lookup_member;
use crate::types::{ClassMember, ClassSide, ClassType, MemberKind, PrimitiveKind, TypeDescriptor};
use caret_common::limits::MAX_TYPE_EVAL_DEPTH;
use caret_parser::{Class, Function, MethodKind, Node, NodeKind, UnaryOperator};
use caret_scanner::TokenKind;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Name, `this` and member information available to the evaluator.
pub trait TypeEnvironment {
    /// Type bound to `name`, if the name is known at all.
    fn type_of_name(&self, name: &str) -> Option<TypeDescriptor>;

    /// Type of `this` at the evaluation point.
    fn this_type(&self) -> TypeDescriptor {
        TypeDescriptor::Unknown
    }

    /// Type of `object.member`. For methods this is the return type.
    fn member_type(&self, object: &TypeDescriptor, member: &str) -> Option<TypeDescriptor> {
        lookup_member(object, member).map(|m| m.type_info)
    }

    /// Type produced by `new callee(...)` for an identifier callee.
    fn construct(&self, callee: &str) -> TypeDescriptor {
        match self.type_of_name(callee) {
            Some(TypeDescriptor::Class(class)) => {
                TypeDescriptor::Class(class.with_side(ClassSide::Instance))
            }
            _ => builtin_instance_type(callee).unwrap_or(TypeDescriptor::Unknown),
        }
    }
}

/// Environment with only the built-in globals.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyEnvironment;

impl TypeEnvironment for EmptyEnvironment {
    fn type_of_name(&self, name: &str) -> Option<TypeDescriptor> {
        global_type(name)
    }
}

/// Function parameters layered over an outer environment, used while
/// inferring a function's return type from its body.
struct ParameterEnvironment<'a> {
    outer: &'a dyn TypeEnvironment,
    params: FxHashMap<String, TypeDescriptor>,
    this_type: Option<TypeDescriptor>,
}

impl TypeEnvironment for ParameterEnvironment<'_> {
    fn type_of_name(&self, name: &str) -> Option<TypeDescriptor> {
        match self.params.get(name) {
            Some(ty) => Some(ty.clone()),
            None => self.outer.type_of_name(name),
        }
    }

    fn this_type(&self) -> TypeDescriptor {
        match &self.this_type {
            Some(ty) => ty.clone(),
            None => self.outer.this_type(),
        }
    }

    fn member_type(&self, object: &TypeDescriptor, member: &str) -> Option<TypeDescriptor> {
        self.outer.member_type(object, member)
    }

    fn construct(&self, callee: &str) -> TypeDescriptor {
        if self.params.contains_key(callee) {
            return TypeDescriptor::Unknown;
        }
        self.outer.construct(callee)
    }
}

pub struct TypeEvaluator<'a> {
    env: &'a dyn TypeEnvironment,
    depth: u32,
}

impl<'a> TypeEvaluator<'a> {
    pub fn new(env: &'a dyn TypeEnvironment) -> Self {
        TypeEvaluator { env, depth: 0 }
    }

    pub fn evaluate(&mut self, node: &Node) -> TypeDescriptor {
        if self.depth >= MAX_TYPE_EVAL_DEPTH {
            trace!(kind = node.kind_name(), "type evaluation depth exceeded");
            return TypeDescriptor::Unknown;
        }
        self.depth += 1;
        let ty = self.evaluate_inner(node);
        self.depth -= 1;
        ty
    }

    fn evaluate_inner(&mut self, node: &Node) -> TypeDescriptor {
        match &node.kind {
            NodeKind::StringLiteral { .. } | NodeKind::TemplateLiteral { .. } => {
                TypeDescriptor::string()
            }
            NodeKind::NumericLiteral { .. } => TypeDescriptor::number(),
            NodeKind::BigIntLiteral { .. } => TypeDescriptor::primitive(PrimitiveKind::BigInt),
            NodeKind::BooleanLiteral { .. } => TypeDescriptor::boolean(),
            NodeKind::NullLiteral => TypeDescriptor::primitive(PrimitiveKind::Null),
            NodeKind::Identifier { name } => self
                .env
                .type_of_name(name)
                .unwrap_or(TypeDescriptor::Unknown),
            NodeKind::This => self.env.this_type(),
            NodeKind::ArrayLiteral { elements } => self.evaluate_array(elements),
            NodeKind::ObjectLiteral { properties } => self.evaluate_object(properties),
            NodeKind::Member {
                object,
                property,
                computed,
                ..
            } => self.evaluate_member(object, property, *computed),
            NodeKind::Call { callee, .. } => self.evaluate_call(callee),
            NodeKind::New { callee, .. } => match callee.skip_parentheses().as_identifier() {
                Some(name) => self.env.construct(name),
                None => TypeDescriptor::Unknown,
            },
            NodeKind::Binary {
                operator,
                left,
                right,
            } => self.evaluate_binary(*operator, left, right),
            NodeKind::Logical {
                operator,
                left,
                right,
            } => {
                let right_ty = self.evaluate(right);
                if *operator == TokenKind::AmpersandAmpersandToken {
                    return right_ty;
                }
                let left_ty = self.evaluate(left);
                prefer_informative(left_ty, right_ty)
            }
            NodeKind::Unary { operator, argument } => match operator {
                UnaryOperator::Typeof => TypeDescriptor::string(),
                UnaryOperator::Not | UnaryOperator::Delete => TypeDescriptor::boolean(),
                UnaryOperator::Void => TypeDescriptor::undefined(),
                UnaryOperator::Await => self.evaluate(argument),
                UnaryOperator::Minus | UnaryOperator::BitwiseNot => {
                    let ty = self.evaluate(argument);
                    if ty.is_primitive(PrimitiveKind::BigInt) {
                        ty
                    } else {
                        TypeDescriptor::number()
                    }
                }
                UnaryOperator::Plus => TypeDescriptor::number(),
            },
            NodeKind::Update { .. } => TypeDescriptor::number(),
            NodeKind::Conditional {
                consequent,
                alternate,
                ..
            } => {
                let consequent = self.evaluate(consequent);
                if consequent.is_unknown() {
                    self.evaluate(alternate)
                } else {
                    consequent
                }
            }
            NodeKind::Assignment {
                operator,
                target,
                value,
            } => match operator {
                TokenKind::EqualsToken
                | TokenKind::BarBarEqualsToken
                | TokenKind::AmpersandAmpersandEqualsToken
                | TokenKind::QuestionQuestionEqualsToken => self.evaluate(value),
                TokenKind::PlusEqualsToken => {
                    self.evaluate_binary(TokenKind::PlusToken, target, value)
                }
                _ => TypeDescriptor::number(),
            },
            NodeKind::Sequence { expressions } => expressions
                .last()
                .map(|last| self.evaluate(last))
                .unwrap_or(TypeDescriptor::Unknown),
            NodeKind::Parenthesized { expression } => self.evaluate(expression),
            NodeKind::ArrowFunction { params, body, .. } => {
                let return_type = if matches!(body.kind, NodeKind::Block { .. }) {
                    self.infer_body_return(params, body, None)
                } else {
                    self.with_parameters(params, None, |this| this.evaluate(body))
                };
                TypeDescriptor::function(None, parameter_names(params), return_type)
            }
            NodeKind::FunctionExpression(function) => self.function_type(function, None),
            NodeKind::ClassExpression(class) => {
                TypeDescriptor::Class(self.class_type(class, class.name.as_deref().unwrap_or("")))
            }
            _ => TypeDescriptor::Unknown,
        }
    }

    /// Element type is the first non-spread element's type.
    fn evaluate_array(&mut self, elements: &[Node]) -> TypeDescriptor {
        let element = elements
            .iter()
            .find(|e| !matches!(e.kind, NodeKind::SpreadElement { .. }))
            .map(|e| self.evaluate(e))
            .unwrap_or(TypeDescriptor::Unknown);
        TypeDescriptor::array(element)
    }

    fn evaluate_object(&mut self, properties: &[Node]) -> TypeDescriptor {
        let mut shape = IndexMap::new();
        for property in properties {
            match &property.kind {
                NodeKind::Property {
                    key,
                    value,
                    computed,
                    ..
                } => {
                    let Some(key) = property_key(key, *computed) else {
                        continue;
                    };
                    let ty = self.evaluate(value);
                    shape.insert(key, ty);
                }
                NodeKind::SpreadElement { argument } => {
                    if let Some(spread) = self.evaluate(argument).shape() {
                        for (key, ty) in spread {
                            shape.insert(key.clone(), ty.clone());
                        }
                    }
                }
                _ => {}
            }
        }
        TypeDescriptor::shaped(shape)
    }

    fn evaluate_member(&mut self, object: &Node, property: &Node, computed: bool) -> TypeDescriptor {
        let object_ty = self.evaluate(object);
        if object_ty.is_unknown() {
            return TypeDescriptor::Unknown;
        }
        let name = if computed {
            match &property.skip_parentheses().kind {
                NodeKind::StringLiteral { value } => value.clone(),
                _ => {
                    return object_ty
                        .element_type()
                        .cloned()
                        .unwrap_or(TypeDescriptor::Unknown);
                }
            }
        } else {
            match property.as_identifier() {
                Some(name) => name.to_string(),
                None => return TypeDescriptor::Unknown,
            }
        };
        self.env
            .member_type(&object_ty, &name)
            .unwrap_or(TypeDescriptor::Unknown)
    }

    /// Member calls already evaluate to the method's return type.
    fn evaluate_call(&mut self, callee: &Node) -> TypeDescriptor {
        let callee = callee.skip_parentheses();
        match &callee.kind {
            NodeKind::Member { .. } => self.evaluate(callee),
            NodeKind::Super => TypeDescriptor::undefined(),
            _ => self.evaluate(callee).call_result(),
        }
    }

    fn evaluate_binary(&mut self, operator: TokenKind, left: &Node, right: &Node) -> TypeDescriptor {
        match operator {
            TokenKind::PlusToken => {
                let left = self.evaluate(left);
                let right = self.evaluate(right);
                if left.is_primitive(PrimitiveKind::String)
                    || right.is_primitive(PrimitiveKind::String)
                {
                    TypeDescriptor::string()
                } else if left.is_primitive(PrimitiveKind::Number)
                    && right.is_primitive(PrimitiveKind::Number)
                {
                    TypeDescriptor::number()
                } else {
                    TypeDescriptor::Unknown
                }
            }
            TokenKind::MinusToken
            | TokenKind::AsteriskToken
            | TokenKind::AsteriskAsteriskToken
            | TokenKind::SlashToken
            | TokenKind::PercentToken
            | TokenKind::AmpersandToken
            | TokenKind::BarToken
            | TokenKind::CaretToken
            | TokenKind::LessThanLessThanToken
            | TokenKind::GreaterThanGreaterThanToken
            | TokenKind::GreaterThanGreaterThanGreaterThanToken => TypeDescriptor::number(),
            TokenKind::EqualsEqualsToken
            | TokenKind::EqualsEqualsEqualsToken
            | TokenKind::ExclamationEqualsToken
            | TokenKind::ExclamationEqualsEqualsToken
            | TokenKind::LessThanToken
            | TokenKind::LessThanEqualsToken
            | TokenKind::GreaterThanToken
            | TokenKind::GreaterThanEqualsToken
            | TokenKind::InstanceofKeyword
            | TokenKind::InKeyword => TypeDescriptor::boolean(),
            _ => TypeDescriptor::Unknown,
        }
    }

    /// Descriptor of a function declaration or expression. `this_type`
    /// overrides `this` inside the body (methods).
    pub fn function_type(
        &mut self,
        function: &Function,
        this_type: Option<TypeDescriptor>,
    ) -> TypeDescriptor {
        let return_type = self.infer_body_return(&function.params, &function.body, this_type);
        let return_type = if function.is_async {
            TypeDescriptor::named("Promise")
        } else {
            return_type
        };
        TypeDescriptor::function(
            function.name.clone(),
            parameter_names(&function.params),
            return_type,
        )
    }

    /// Return type of a block body: the first informative `return` argument,
    /// `undefined` when no `return` carries a value.
    fn infer_body_return(
        &mut self,
        params: &[Node],
        body: &Node,
        this_type: Option<TypeDescriptor>,
    ) -> TypeDescriptor {
        let mut returns = Vec::new();
        collect_returns(body, &mut returns);
        if returns.is_empty() {
            return TypeDescriptor::undefined();
        }
        self.with_parameters(params, this_type, |this| {
            returns
                .iter()
                .map(|argument| this.evaluate(argument))
                .find(|ty| !ty.is_unknown())
                .unwrap_or(TypeDescriptor::Unknown)
        })
    }

    /// Run `f` with the parameters bound: defaults give their value's type,
    /// everything else is unknown.
    fn with_parameters<R>(
        &mut self,
        params: &[Node],
        this_type: Option<TypeDescriptor>,
        f: impl FnOnce(&mut TypeEvaluator<'_>) -> R,
    ) -> R {
        let mut bound = FxHashMap::default();
        for param in params {
            if let NodeKind::Parameter {
                name,
                default,
                rest,
                ..
            } = &param.kind
            {
                if name.is_empty() {
                    continue;
                }
                let ty = match (default, rest) {
                    (_, true) => TypeDescriptor::array(TypeDescriptor::Unknown),
                    (Some(default), false) => self.evaluate(default),
                    (None, false) => TypeDescriptor::Unknown,
                };
                bound.insert(name.clone(), ty);
            }
        }
        let env = ParameterEnvironment {
            outer: self.env,
            params: bound,
            this_type,
        };
        let mut inner = TypeEvaluator {
            env: &env,
            depth: self.depth,
        };
        f(&mut inner)
    }

    /// Constructor-side class type built from the class body: methods,
    /// accessors, fields, and `this.x = ...` assignments in any method.
    pub fn class_type(&mut self, class: &Class, name: &str) -> ClassType {
        let parent = class
            .superclass
            .as_deref()
            .and_then(|s| s.skip_parentheses().as_identifier())
            .map(str::to_string);
        let mut class_type = ClassType {
            name: name.to_string(),
            members: Vec::new(),
            parent,
            side: ClassSide::Constructor,
        };

        for member in &class.members {
            match &member.kind {
                NodeKind::MethodDefinition {
                    key,
                    kind,
                    is_static,
                    value,
                } => {
                    let NodeKind::FunctionExpression(function) = &value.kind else {
                        continue;
                    };
                    let this_type = self_type(&class_type, *is_static);
                    if *kind != MethodKind::Constructor {
                        let (member_kind, type_info) = match kind {
                            MethodKind::Getter | MethodKind::Setter => (
                                MemberKind::Property,
                                self.infer_body_return(
                                    &function.params,
                                    &function.body,
                                    Some(this_type.clone()),
                                ),
                            ),
                            _ => (
                                MemberKind::Method,
                                self.function_type(function, Some(this_type.clone()))
                                    .call_result(),
                            ),
                        };
                        if !has_member(&class_type, key, *is_static) {
                            class_type.members.push(ClassMember {
                                name: key.clone(),
                                kind: member_kind,
                                is_static: *is_static,
                                type_info,
                            });
                        }
                    }
                    let assigned = self.with_parameters(&function.params, Some(this_type), |this| {
                        let mut found = Vec::new();
                        collect_this_assignments(&function.body, this, &mut found);
                        found
                    });
                    for (field, ty) in assigned {
                        if !has_member(&class_type, &field, *is_static) {
                            class_type.members.push(ClassMember {
                                name: field,
                                kind: MemberKind::Property,
                                is_static: *is_static,
                                type_info: ty,
                            });
                        }
                    }
                }
                NodeKind::PropertyDefinition {
                    key,
                    value,
                    is_static,
                } => {
                    let ty = value
                        .as_deref()
                        .map(|v| self.evaluate(v))
                        .unwrap_or(TypeDescriptor::Unknown);
                    let kind = if matches!(ty, TypeDescriptor::Function { .. }) {
                        MemberKind::Method
                    } else {
                        MemberKind::Property
                    };
                    let type_info = match kind {
                        MemberKind::Method => ty.call_result(),
                        MemberKind::Property => ty,
                    };
                    class_type.members.retain(|m| m.name != *key || m.is_static != *is_static);
                    class_type.members.push(ClassMember {
                        name: key.clone(),
                        kind,
                        is_static: *is_static,
                        type_info,
                    });
                }
                _ => {}
            }
        }
        class_type
    }
}

/// `this` inside a method body: the instance for instance methods, the
/// class itself for static ones. Members found so far are visible.
fn self_type(class: &ClassType, is_static: bool) -> TypeDescriptor {
    let side = if is_static {
        ClassSide::Constructor
    } else {
        ClassSide::Instance
    };
    TypeDescriptor::Class(class.with_side(side))
}

fn has_member(class: &ClassType, name: &str, is_static: bool) -> bool {
    class
        .members
        .iter()
        .any(|m| m.name == name && m.is_static == is_static)
}

/// Prefer the left operand of `||`/`??` unless it carries no information.
fn prefer_informative(left: TypeDescriptor, right: TypeDescriptor) -> TypeDescriptor {
    if left.is_unknown()
        || left.is_primitive(PrimitiveKind::Null)
        || left.is_primitive(PrimitiveKind::Undefined)
    {
        right
    } else {
        left
    }
}

fn parameter_names(params: &[Node]) -> Vec<String> {
    params
        .iter()
        .filter_map(|p| match &p.kind {
            NodeKind::Parameter { name, rest, .. } if *rest => Some(format!("...{name}")),
            NodeKind::Parameter { name, .. } if name.is_empty() => Some("{}".to_string()),
            NodeKind::Parameter { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

/// Static key of an object literal property.
pub fn property_key(key: &Node, computed: bool) -> Option<String> {
    match &key.kind {
        NodeKind::Identifier { name } if !computed => Some(name.clone()),
        NodeKind::StringLiteral { value } => Some(value.clone()),
        NodeKind::NumericLiteral { raw, .. } => Some(raw.clone()),
        _ => None,
    }
}

/// `return` arguments in a function body, not descending into nested
/// functions or classes.
pub fn collect_returns<'n>(node: &'n Node, out: &mut Vec<&'n Node>) {
    match &node.kind {
        NodeKind::Return { argument } => {
            if let Some(argument) = argument {
                out.push(argument);
            }
        }
        NodeKind::Block { body } => body.iter().for_each(|s| collect_returns(s, out)),
        NodeKind::If {
            consequent,
            alternate,
            ..
        } => {
            collect_returns(consequent, out);
            if let Some(alternate) = alternate {
                collect_returns(alternate, out);
            }
        }
        NodeKind::While { body, .. }
        | NodeKind::DoWhile { body, .. }
        | NodeKind::For { body, .. }
        | NodeKind::ForInOf { body, .. } => collect_returns(body, out),
        NodeKind::Switch { cases, .. } => cases.iter().for_each(|c| collect_returns(c, out)),
        NodeKind::SwitchCase { consequent, .. } => {
            consequent.iter().for_each(|s| collect_returns(s, out));
        }
        NodeKind::Try {
            block,
            handler,
            finalizer,
        } => {
            collect_returns(block, out);
            if let Some(handler) = handler {
                collect_returns(handler, out);
            }
            if let Some(finalizer) = finalizer {
                collect_returns(finalizer, out);
            }
        }
        NodeKind::CatchClause { body, .. } => collect_returns(body, out),
        _ => {}
    }
}

/// `this.name = value` assignments at statement level of a method body.
/// Arrow functions keep `this`, so their bodies are searched too.
fn collect_this_assignments(
    node: &Node,
    evaluator: &mut TypeEvaluator<'_>,
    out: &mut Vec<(String, TypeDescriptor)>,
) {
    match &node.kind {
        NodeKind::Assignment {
            operator: TokenKind::EqualsToken,
            target,
            value,
        } => {
            if let NodeKind::Member {
                object,
                property,
                computed: false,
                ..
            } = &target.kind
                && matches!(object.kind, NodeKind::This)
                && let Some(name) = property.as_identifier()
                && !out.iter().any(|(n, _)| n == name)
            {
                let ty = evaluator.evaluate(value);
                out.push((name.to_string(), ty));
            }
            collect_this_assignments(value, evaluator, out);
        }
        NodeKind::ExpressionStatement { expression } => {
            collect_this_assignments(expression, evaluator, out);
        }
        NodeKind::Sequence { expressions } => {
            for expression in expressions {
                collect_this_assignments(expression, evaluator, out);
            }
        }
        NodeKind::Block { body } => {
            for statement in body {
                collect_this_assignments(statement, evaluator, out);
            }
        }
        NodeKind::If {
            consequent,
            alternate,
            ..
        } => {
            collect_this_assignments(consequent, evaluator, out);
            if let Some(alternate) = alternate {
                collect_this_assignments(alternate, evaluator, out);
            }
        }
        NodeKind::Try { block, .. } => collect_this_assignments(block, evaluator, out),
        NodeKind::Call { arguments, .. } => {
            for argument in arguments {
                if let NodeKind::ArrowFunction { body, .. } = &argument.kind {
                    collect_this_assignments(body, evaluator, out);
                }
            }
        }
        _ => {}
    }
}

/// Evaluate `node` against the built-in globals only.
pub fn evaluate_standalone(node: &Node) -> TypeDescriptor {
    TypeEvaluator::new(&EmptyEnvironment).evaluate(node)
}

#[cfg(test)]
#[path = "tests/evaluate_tests.rs"]
mod evaluate_tests;
