//! Binder state - statement and expression walks.
//!
//! Scopes are opened at the node that introduces them and closed at that
//! node's end, children before parents:
//! - `Function`: function declarations/expressions and methods, from the
//!   parameter list to the closing brace
//! - `Arrow`: arrow functions
//! - `Class`: the `{ ... }` body of a class
//! - `Block`: blocks, `for` statements, `switch` bodies
//! - `Catch`: `catch` clauses

use crate::environment::{ScopeEnvironment, lookup_member_inherited};
use crate::scope::{ScopeId, ScopeKind};
use crate::state::BinderState;
use crate::symbol::{Symbol, SymbolKind};
use caret_parser::{Class, Function, Node, NodeKind, VariableKind};
use caret_scanner::TokenKind;
use caret_solver::{
    MemberKind, PrimitiveKind, TypeDescriptor, TypeEvaluator, collect_returns, property_key,
};
use tracing::trace;

impl BinderState {
    pub fn bind_program(&mut self, program: &Node) {
        match &program.kind {
            NodeKind::Program { body } => self.bind_statement_list(body),
            _ => self.bind_statement(program),
        }
    }

    fn bind_statement_list(&mut self, statements: &[Node]) {
        self.hoist_functions(statements);
        for statement in statements {
            self.bind_statement(statement);
        }
    }

    /// Function declarations are visible from the top of their list.
    fn hoist_functions(&mut self, statements: &[Node]) {
        for statement in statements {
            if let NodeKind::FunctionDeclaration(function) = &statement.kind
                && let Some(name) = &function.name
            {
                let env = ScopeEnvironment::new(&self.scopes, self.current_scope);
                let ty = TypeEvaluator::new(&env).function_type(function, None);
                self.declare_symbol(self.current_scope, name, SymbolKind::Function, Some(ty));
            }
        }
    }

    fn bind_statement(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::VariableDeclaration { kind, declarations } => {
                for declarator in declarations {
                    self.bind_variable_declarator(*kind, declarator);
                }
            }
            NodeKind::FunctionDeclaration(function) => {
                let declared_in = self.current_scope;
                let symbol = function
                    .name
                    .as_ref()
                    .and_then(|name| self.scopes.resolve(declared_in, name))
                    .cloned();
                let scope = self.bind_function(function, node.start(), symbol, false);
                if let Some(name) = &function.name {
                    self.refine_function_return(declared_in, name, scope, function);
                }
            }
            NodeKind::ClassDeclaration(class) => {
                let name = class.name.clone().unwrap_or_default();
                let symbol = self.class_symbol(class, &name);
                self.declare_symbol(
                    self.current_scope,
                    &name,
                    SymbolKind::Class,
                    symbol.type_info.clone(),
                );
                self.bind_class_body(class, symbol);
            }
            NodeKind::ExpressionStatement { expression } => {
                self.bind_expression(expression);
                if self.options.track_assignments {
                    self.track_assignment(expression);
                }
            }
            NodeKind::Return { argument } => {
                if let Some(argument) = argument {
                    self.bind_expression(argument);
                }
            }
            NodeKind::Throw { argument } => self.bind_expression(argument),
            NodeKind::Block { body } => {
                self.enter_scope(ScopeKind::Block, node.start());
                self.bind_statement_list(body);
                self.exit_scope(node.end());
            }
            NodeKind::If {
                test,
                consequent,
                alternate,
            } => {
                self.bind_expression(test);
                self.bind_statement(consequent);
                if let Some(alternate) = alternate {
                    self.bind_statement(alternate);
                }
            }
            NodeKind::While { test, body } | NodeKind::DoWhile { body, test } => {
                self.bind_expression(test);
                self.bind_statement(body);
            }
            NodeKind::For {
                init,
                test,
                update,
                body,
            } => {
                self.enter_scope(ScopeKind::Block, node.start());
                if let Some(init) = init {
                    if matches!(init.kind, NodeKind::VariableDeclaration { .. }) {
                        self.bind_statement(init);
                    } else {
                        self.bind_expression(init);
                    }
                }
                for part in [test, update].into_iter().flatten() {
                    self.bind_expression(part);
                }
                self.bind_statement(body);
                self.exit_scope(node.end());
            }
            NodeKind::ForInOf {
                left,
                right,
                body,
                is_of,
            } => {
                self.enter_scope(ScopeKind::Block, node.start());
                self.bind_expression(right);
                let iterated = if *is_of {
                    element_of(&self.evaluate(right))
                } else {
                    TypeDescriptor::string()
                };
                match &left.kind {
                    NodeKind::VariableDeclaration { kind, declarations } => {
                        let scope = self.declaration_scope(*kind);
                        for declarator in declarations {
                            if let NodeKind::VariableDeclarator { target, .. } = &declarator.kind {
                                self.bind_pattern(
                                    scope,
                                    target,
                                    Some(iterated.clone()),
                                    symbol_kind(*kind),
                                );
                            }
                        }
                    }
                    _ => self.bind_expression(left),
                }
                self.bind_statement(body);
                self.exit_scope(node.end());
            }
            NodeKind::Switch {
                discriminant,
                cases,
            } => {
                self.bind_expression(discriminant);
                self.enter_scope(ScopeKind::Block, node.start());
                for case in cases {
                    if let NodeKind::SwitchCase { test, consequent } = &case.kind {
                        if let Some(test) = test {
                            self.bind_expression(test);
                        }
                        self.bind_statement_list(consequent);
                    }
                }
                self.exit_scope(node.end());
            }
            NodeKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.bind_statement(block);
                if let Some(handler) = handler {
                    self.bind_catch_clause(handler);
                }
                if let Some(finalizer) = finalizer {
                    self.bind_statement(finalizer);
                }
            }
            _ => {}
        }
    }

    fn bind_catch_clause(&mut self, handler: &Node) {
        let NodeKind::CatchClause { param, body } = &handler.kind else {
            return;
        };
        let scope = self.enter_scope(ScopeKind::Catch, handler.start());
        if let Some(param) = param {
            self.declare_symbol(
                scope,
                param,
                SymbolKind::Parameter,
                Some(TypeDescriptor::named("Error")),
            );
        }
        match &body.kind {
            NodeKind::Block { body } => self.bind_statement_list(body),
            _ => self.bind_statement(body),
        }
        self.exit_scope(handler.end());
    }

    fn declaration_scope(&self, kind: VariableKind) -> ScopeId {
        match kind {
            VariableKind::Var => self.var_scope(),
            VariableKind::Let | VariableKind::Const => self.current_scope,
        }
    }

    fn bind_variable_declarator(&mut self, kind: VariableKind, declarator: &Node) {
        let NodeKind::VariableDeclarator { target, init } = &declarator.kind else {
            return;
        };
        let scope = self.declaration_scope(kind);

        // `const Name = class { ... }` names the class after the binding.
        if let (Some(name), Some(init)) = (target.as_identifier(), init.as_deref())
            && let NodeKind::ClassExpression(class) = &init.skip_parentheses().kind
        {
            let class_name = class.name.clone().unwrap_or_else(|| name.to_string());
            let symbol = self.class_symbol(class, &class_name);
            self.declare_symbol(scope, name, symbol_kind(kind), symbol.type_info.clone());
            self.bind_class_body(class, symbol);
            return;
        }

        let ty = init.as_deref().map(|init| self.evaluate(init));
        self.bind_pattern(scope, target, ty, symbol_kind(kind));
        if let Some(init) = init {
            self.bind_expression(init);
        }
    }

    /// Declare every name in a binding target. `source` is the type of the
    /// value being destructured.
    fn bind_pattern(
        &mut self,
        scope: ScopeId,
        target: &Node,
        source: Option<TypeDescriptor>,
        kind: SymbolKind,
    ) {
        match &target.kind {
            NodeKind::Identifier { name } => self.declare_symbol(scope, name, kind, source),
            NodeKind::ObjectLiteral { properties } => {
                for property in properties {
                    match &property.kind {
                        NodeKind::Property {
                            key,
                            value,
                            computed,
                            ..
                        } => {
                            let member = property_key(key, *computed).and_then(|key| {
                                let source = source.as_ref()?;
                                self.member_of(source, &key)
                            });
                            self.bind_pattern(scope, value, member, kind);
                        }
                        NodeKind::SpreadElement { argument } => {
                            let rest = TypeDescriptor::Object {
                                name: None,
                                shape: None,
                            };
                            self.bind_pattern(scope, argument, Some(rest), kind);
                        }
                        _ => {}
                    }
                }
            }
            NodeKind::ArrayLiteral { elements } => {
                let element = source.as_ref().map(element_of);
                for item in elements {
                    match &item.kind {
                        NodeKind::SpreadElement { argument } => {
                            let rest = element.clone().map(TypeDescriptor::array);
                            self.bind_pattern(scope, argument, rest, kind);
                        }
                        _ => self.bind_pattern(scope, item, element.clone(), kind),
                    }
                }
            }
            NodeKind::Assignment { target, value, .. } => {
                self.bind_expression(value);
                let ty = match source {
                    Some(ty) if !ty.is_unknown() => Some(ty),
                    _ => Some(self.evaluate(value)),
                };
                self.bind_pattern(scope, target, ty, kind);
            }
            _ => {}
        }
    }

    fn member_of(&self, object: &TypeDescriptor, name: &str) -> Option<TypeDescriptor> {
        lookup_member_inherited(&self.scopes, self.current_scope, object, name)
            .map(|member| member.type_info)
    }

    fn bind_parameters(&mut self, params: &[Node]) {
        let scope = self.current_scope;
        for param in params {
            let NodeKind::Parameter {
                name,
                pattern,
                default,
                rest,
            } = &param.kind
            else {
                continue;
            };
            if let Some(default) = default {
                self.bind_expression(default);
            }
            let ty = match (default, rest) {
                (_, true) => Some(TypeDescriptor::array(TypeDescriptor::Unknown)),
                (Some(default), false) => Some(self.evaluate(default)),
                (None, false) => None,
            };
            match pattern {
                Some(pattern) => self.bind_pattern(scope, pattern, ty, SymbolKind::Parameter),
                None => self.declare_symbol(scope, name, SymbolKind::Parameter, ty),
            }
        }
    }

    /// Open a function scope, bind parameters and body, close it. Returns
    /// the new scope.
    fn bind_function(
        &mut self,
        function: &Function,
        start: u32,
        symbol: Option<Symbol>,
        is_static: bool,
    ) -> ScopeId {
        let scope = self.enter_scope(ScopeKind::Function, start);
        if let Some(symbol) = symbol {
            self.scopes.set_function_symbol(scope, symbol, is_static);
        }
        self.bind_parameters(&function.params);
        match &function.body.kind {
            NodeKind::Block { body } => self.bind_statement_list(body),
            _ => self.bind_statement(&function.body),
        }
        self.exit_scope(function.body.end());
        scope
    }

    /// Re-infer a declared function's return type with its body's bindings
    /// in view, each `return` evaluated in the scope that contains it.
    fn refine_function_return(
        &mut self,
        declared_in: ScopeId,
        name: &str,
        function_scope: ScopeId,
        function: &Function,
    ) {
        if function.is_async {
            return;
        }
        let mut returns = Vec::new();
        collect_returns(&function.body, &mut returns);
        let refined = returns
            .iter()
            .map(|argument| {
                let scope = self
                    .scopes
                    .find_scope_at_offset(function_scope, argument.start());
                self.evaluate_in(scope, argument)
            })
            .find(|ty| !ty.is_unknown());
        let Some(refined) = refined else {
            return;
        };
        if let Some(symbol) = self.scopes.symbol_mut(declared_in, name)
            && let Some(TypeDescriptor::Function { return_type, .. }) = &mut symbol.type_info
            && return_type.is_unknown()
        {
            trace!(name, ty = %refined, "refined function return type");
            **return_type = refined;
        }
    }

    fn class_symbol(&self, class: &Class, name: &str) -> Symbol {
        let env = ScopeEnvironment::new(&self.scopes, self.current_scope);
        let class_type = TypeEvaluator::new(&env).class_type(class, name);
        Symbol::new(
            name,
            SymbolKind::Class,
            Some(TypeDescriptor::Class(class_type)),
        )
    }

    /// Class scope holding the members as symbols, with one function scope
    /// per method.
    fn bind_class_body(&mut self, class: &Class, symbol: Symbol) {
        if let Some(superclass) = &class.superclass {
            self.bind_expression(superclass);
        }
        let scope = self.enter_scope(ScopeKind::Class, class.body_span.start);
        if let Some(TypeDescriptor::Class(class_type)) = &symbol.type_info {
            for member in &class_type.members {
                let kind = match member.kind {
                    MemberKind::Method => SymbolKind::Method,
                    MemberKind::Property => SymbolKind::Property,
                };
                self.declare_symbol(scope, &member.name, kind, Some(member.type_info.clone()));
            }
        }
        self.scopes.set_class_symbol(scope, symbol);

        for member in &class.members {
            match &member.kind {
                NodeKind::MethodDefinition {
                    key,
                    is_static,
                    value,
                    ..
                } => {
                    if let NodeKind::FunctionExpression(function) = &value.kind {
                        let member_symbol = self
                            .scopes
                            .get(scope)
                            .and_then(|s| s.symbols.get(key))
                            .cloned()
                            .unwrap_or_else(|| Symbol::new(key.as_str(), SymbolKind::Method, None));
                        self.bind_function(function, value.start(), Some(member_symbol), *is_static);
                    }
                }
                NodeKind::PropertyDefinition {
                    value: Some(value), ..
                } => self.bind_expression(value),
                _ => {}
            }
        }
        self.exit_scope(class.body_span.end);
    }

    /// Walk an expression for the scopes nested in it.
    fn bind_expression(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::ArrowFunction { params, body, .. } => {
                self.enter_scope(ScopeKind::Arrow, node.start());
                self.bind_parameters(params);
                match &body.kind {
                    NodeKind::Block { body } => self.bind_statement_list(body),
                    _ => self.bind_expression(body),
                }
                self.exit_scope(node.end());
            }
            NodeKind::FunctionExpression(function) => {
                let symbol = function
                    .name
                    .as_ref()
                    .map(|name| Symbol::new(name.as_str(), SymbolKind::Function, None));
                let scope = self.bind_function(function, node.start(), symbol.clone(), false);
                // A named function expression sees its own name.
                if let Some(symbol) = symbol {
                    self.scopes.define(scope, symbol);
                }
            }
            NodeKind::ClassExpression(class) => {
                let name = class.name.clone().unwrap_or_default();
                let symbol = self.class_symbol(class, &name);
                self.bind_class_body(class, symbol);
            }
            NodeKind::Member {
                object,
                property,
                computed,
                ..
            } => {
                self.bind_expression(object);
                if *computed {
                    self.bind_expression(property);
                }
            }
            NodeKind::Call {
                callee, arguments, ..
            }
            | NodeKind::New { callee, arguments } => {
                self.bind_expression(callee);
                for argument in arguments {
                    self.bind_expression(argument);
                }
            }
            NodeKind::Binary { left, right, .. } | NodeKind::Logical { left, right, .. } => {
                self.bind_expression(left);
                self.bind_expression(right);
            }
            NodeKind::Assignment { target, value, .. } => {
                self.bind_expression(target);
                self.bind_expression(value);
            }
            NodeKind::Unary { argument, .. }
            | NodeKind::Update { argument, .. }
            | NodeKind::SpreadElement { argument }
            | NodeKind::Parenthesized {
                expression: argument,
            } => self.bind_expression(argument),
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.bind_expression(test);
                self.bind_expression(consequent);
                self.bind_expression(alternate);
            }
            NodeKind::Sequence { expressions } | NodeKind::ArrayLiteral {
                elements: expressions,
            } => {
                for expression in expressions {
                    self.bind_expression(expression);
                }
            }
            NodeKind::ObjectLiteral { properties } => {
                for property in properties {
                    match &property.kind {
                        NodeKind::Property {
                            key,
                            value,
                            computed,
                            ..
                        } => {
                            if *computed {
                                self.bind_expression(key);
                            }
                            self.bind_expression(value);
                        }
                        _ => self.bind_expression(property),
                    }
                }
            }
            _ => {}
        }
    }

    /// `name = value` where `name` was declared without a useful type.
    fn track_assignment(&mut self, expression: &Node) {
        let NodeKind::Assignment {
            operator: TokenKind::EqualsToken,
            target,
            value,
        } = &expression.kind
        else {
            return;
        };
        let Some(name) = target.as_identifier() else {
            return;
        };
        let Some((owner, symbol)) = self.scopes.resolve_with_scope(self.current_scope, name) else {
            return;
        };
        if symbol.type_info.as_ref().is_some_and(|ty| !ty.is_unknown()) {
            return;
        }
        let ty = self.evaluate(value);
        if ty.is_unknown() {
            return;
        }
        if let Some(symbol) = self.scopes.symbol_mut(owner, name) {
            trace!(name, ty = %ty, "typed binding from assignment");
            symbol.type_info = Some(ty);
        }
    }
}

fn symbol_kind(kind: VariableKind) -> SymbolKind {
    match kind {
        VariableKind::Const => SymbolKind::Constant,
        VariableKind::Let | VariableKind::Var => SymbolKind::Variable,
    }
}

/// What iterating a value of type `ty` yields.
fn element_of(ty: &TypeDescriptor) -> TypeDescriptor {
    if let Some(element) = ty.element_type() {
        return element.clone();
    }
    if ty.is_primitive(PrimitiveKind::String) {
        return TypeDescriptor::string();
    }
    match ty.catalog_name() {
        Some("NodeList") => TypeDescriptor::named("HTMLElement"),
        _ => TypeDescriptor::Unknown,
    }
}
