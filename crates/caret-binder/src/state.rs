//! Binder state - builds the scope tree for one document.

use crate::environment::ScopeEnvironment;
use crate::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::symbol::{Symbol, SymbolKind};
use caret_parser::{Node, ParseError, parse_document, parse_program};
use caret_solver::{TypeDescriptor, TypeEvaluator};
use tracing::{Level, debug, span};

/// Configuration options for the binder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinderOptions {
    /// Parse with statement-level error recovery. Without it a document
    /// with a syntax error binds as an empty global scope.
    pub recover: bool,
    /// Refine a binding's type from later `name = value` assignments when
    /// the declaration left it unknown.
    pub track_assignments: bool,
}

impl Default for BinderOptions {
    fn default() -> Self {
        BinderOptions {
            recover: true,
            track_assignments: true,
        }
    }
}

pub struct BinderState {
    pub(crate) options: BinderOptions,
    pub(crate) scopes: ScopeTree,
    pub(crate) current_scope: ScopeId,
    /// Errors from the recovering parse of the last bound document
    pub parse_errors: Vec<ParseError>,
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

impl BinderState {
    pub fn new() -> Self {
        Self::with_options(BinderOptions::default())
    }

    pub fn with_options(options: BinderOptions) -> Self {
        BinderState {
            options,
            scopes: ScopeTree::new(),
            current_scope: ScopeTree::ROOT,
            parse_errors: Vec::new(),
        }
    }

    /// Drop everything bound so far.
    pub fn reset(&mut self) {
        self.scopes = ScopeTree::new();
        self.current_scope = ScopeTree::ROOT;
        self.parse_errors.clear();
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn into_scopes(self) -> ScopeTree {
        self.scopes
    }

    /// Parse `source` and bind it. The global scope covers the whole text
    /// plus one position, so a cursor at the very end is inside it.
    pub fn bind_source(&mut self, source: &str) {
        let _span = span!(Level::DEBUG, "bind_source", len = source.len()).entered();
        self.reset();
        let program = if self.options.recover {
            let (program, errors) = parse_document(source);
            self.parse_errors = errors;
            Some(program)
        } else {
            match parse_program(source) {
                Ok(program) => Some(program),
                Err(err) => {
                    debug!("[BIND] strict parse failed: {}", err);
                    self.parse_errors.push(err);
                    None
                }
            }
        };
        if let Some(program) = &program {
            self.bind_program(program);
        }
        let end = caret_common::text::utf16_len(source) + 1;
        self.scopes.close_scope(ScopeTree::ROOT, end);
        debug!(
            "[BIND] bound {} scopes, {} parse errors",
            self.scopes.len(),
            self.parse_errors.len()
        );
    }

    // =========================================================================
    // Scope management
    // =========================================================================

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind, start: u32) -> ScopeId {
        let id = self.scopes.open_scope(self.current_scope, kind, start);
        if id.is_some() {
            self.current_scope = id;
        }
        id
    }

    pub(crate) fn exit_scope(&mut self, end: u32) {
        let id = self.current_scope;
        self.scopes.close_scope(id, end);
        if let Some(scope) = self.scopes.get(id)
            && scope.parent.is_some()
        {
            self.current_scope = scope.parent;
        }
    }

    /// Nearest scope that owns `var` declarations.
    pub(crate) fn var_scope(&self) -> ScopeId {
        self.scopes
            .ancestors(self.current_scope)
            .find(|id| {
                self.scopes.get(*id).is_some_and(|s| {
                    matches!(
                        s.kind,
                        ScopeKind::Function | ScopeKind::Arrow | ScopeKind::Global
                    )
                })
            })
            .unwrap_or(ScopeTree::ROOT)
    }

    pub(crate) fn declare_symbol(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SymbolKind,
        type_info: Option<TypeDescriptor>,
    ) {
        if name.is_empty() {
            return;
        }
        debug!(
            "[BIND] declare '{}' as {:?} in scope {} ({})",
            name,
            kind,
            scope.0,
            type_info.as_ref().map(ToString::to_string).unwrap_or_default()
        );
        self.scopes.define(scope, Symbol::new(name, kind, type_info));
    }

    /// Evaluate `node` against the bindings visible from the current scope.
    pub(crate) fn evaluate(&self, node: &Node) -> TypeDescriptor {
        let env = ScopeEnvironment::new(&self.scopes, self.current_scope);
        TypeEvaluator::new(&env).evaluate(node)
    }

    pub(crate) fn evaluate_in(&self, scope: ScopeId, node: &Node) -> TypeDescriptor {
        let env = ScopeEnvironment::new(&self.scopes, scope);
        TypeEvaluator::new(&env).evaluate(node)
    }
}

/// Bind `source` with default options and return the scope tree.
pub fn bind_source(source: &str) -> ScopeTree {
    let mut binder = BinderState::new();
    binder.bind_source(source);
    binder.into_scopes()
}
