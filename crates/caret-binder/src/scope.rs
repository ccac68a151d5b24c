//! Scope tree.
//!
//! Scopes live in an arena (`ScopeTree`) and refer to each other by
//! `ScopeId`. Every scope but the root has exactly one parent, fixed when the
//! scope is opened; `children` only grows. A scope's `[start, end)` range
//! covers all of its children, which `close_scope` enforces by widening the
//! end to the last child's end.

use crate::symbol::Symbol;
use caret_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use caret_solver::{ClassSide, TypeDescriptor};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == ScopeId::NONE
    }

    pub fn is_some(self) -> bool {
        self != ScopeId::NONE
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Global,
    Function,
    Block,
    Class,
    Arrow,
    Catch,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scope {
    pub kind: ScopeKind,
    /// `ScopeId::NONE` for the root
    pub parent: ScopeId,
    pub symbols: IndexMap<String, Symbol>,
    pub children: Vec<ScopeId>,
    pub start: u32,
    pub end: u32,
    /// The class a `Class` scope belongs to
    pub class_symbol: Option<Symbol>,
    /// The function or method a `Function` scope belongs to
    pub function_symbol: Option<Symbol>,
    /// Function scope of a static method
    pub is_static: bool,
    pub depth: u32,
}

impl Scope {
    fn new(kind: ScopeKind, parent: ScopeId, start: u32, depth: u32) -> Self {
        Scope {
            kind,
            parent,
            symbols: IndexMap::new(),
            children: Vec::new(),
            start,
            end: start,
            class_symbol: None,
            function_symbol: None,
            is_static: false,
            depth,
        }
    }

    /// `start <= offset < end`
    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub const ROOT: ScopeId = ScopeId(0);

    /// A tree holding only an empty global scope starting at offset 0.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::new(ScopeKind::Global, ScopeId::NONE, 0, 0)],
        }
    }

    pub fn root(&self) -> ScopeId {
        Self::ROOT
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Scopes in creation order, paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, scope)| (ScopeId(i as u32), scope))
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Open a child of `parent` starting at `start`, clamped into the
    /// parent's range. Returns `ScopeId::NONE` for an unknown parent.
    pub fn open_scope(&mut self, parent: ScopeId, kind: ScopeKind, start: u32) -> ScopeId {
        let Some(parent_scope) = self.get(parent) else {
            return ScopeId::NONE;
        };
        let start = start.max(parent_scope.start);
        let depth = parent_scope.depth + 1;
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, parent, start, depth));
        if let Some(parent_scope) = self.get_mut(parent) {
            parent_scope.children.push(id);
        }
        trace!(scope = id.0, ?kind, start, "open scope");
        id
    }

    /// Fix the end of `id`. The end never falls before the scope's start or
    /// before the end of any child.
    pub fn close_scope(&mut self, id: ScopeId, end: u32) {
        let children_end = self
            .get(id)
            .map(|scope| {
                scope
                    .children
                    .iter()
                    .filter_map(|child| self.get(*child))
                    .map(|child| child.end)
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);
        if let Some(scope) = self.get_mut(id) {
            scope.end = end.max(scope.start).max(children_end);
            trace!(scope = id.0, start = scope.start, end = scope.end, "close scope");
        }
    }

    pub fn set_class_symbol(&mut self, id: ScopeId, symbol: Symbol) {
        if let Some(scope) = self.get_mut(id) {
            scope.class_symbol = Some(symbol);
        }
    }

    pub fn set_function_symbol(&mut self, id: ScopeId, symbol: Symbol, is_static: bool) {
        if let Some(scope) = self.get_mut(id) {
            scope.function_symbol = Some(symbol);
            scope.is_static = is_static;
        }
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    /// Insert `symbol` into `scope`, replacing (and returning) an earlier
    /// symbol of the same name.
    pub fn define(&mut self, scope: ScopeId, symbol: Symbol) -> Option<Symbol> {
        let target = self.get_mut(scope)?;
        target.symbols.insert(symbol.name.clone(), symbol)
    }

    pub fn remove(&mut self, scope: ScopeId, name: &str) -> Option<Symbol> {
        self.get_mut(scope)?.symbols.shift_remove(name)
    }

    pub fn symbol_mut(&mut self, scope: ScopeId, name: &str) -> Option<&mut Symbol> {
        self.get_mut(scope)?.symbols.get_mut(name)
    }

    /// `scope` and its ancestors, innermost first.
    pub fn ancestors(&self, scope: ScopeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: scope,
            steps: 0,
        }
    }

    /// Nearest binding of `name` visible from `scope`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        self.resolve_with_scope(scope, name).map(|(_, symbol)| symbol)
    }

    /// Nearest binding of `name` and the scope that owns it. Class members
    /// are skipped; they are reached through `this`.
    pub fn resolve_with_scope(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, &Symbol)> {
        for id in self.ancestors(scope) {
            if let Some(symbol) = self.get(id).and_then(|s| s.symbols.get(name))
                && !symbol.kind.is_member()
            {
                return Some((id, symbol));
            }
        }
        None
    }

    /// Every binding visible from `scope`; an inner binding hides outer ones
    /// of the same name. Innermost scope first, declaration order within a
    /// scope.
    pub fn visible_symbols(&self, scope: ScopeId) -> Vec<&Symbol> {
        let mut seen = FxHashSet::default();
        let mut symbols = Vec::new();
        for id in self.ancestors(scope) {
            let Some(current) = self.get(id) else {
                continue;
            };
            for symbol in current.symbols.values() {
                if symbol.kind.is_member() {
                    continue;
                }
                if seen.insert(symbol.name.as_str()) {
                    symbols.push(symbol);
                }
            }
        }
        symbols
    }

    /// Deepest scope under `scope` whose range contains `offset`; `scope`
    /// itself when no child does.
    pub fn find_scope_at_offset(&self, scope: ScopeId, offset: u32) -> ScopeId {
        let mut current = scope;
        for _ in 0..MAX_SCOPE_WALK_ITERATIONS {
            let Some(node) = self.get(current) else {
                return scope;
            };
            let next = node
                .children
                .iter()
                .rev()
                .copied()
                .find(|child| self.get(*child).is_some_and(|c| c.contains(offset)));
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
        current
    }

    /// Type of `this` inside `scope`.
    ///
    /// Arrow, block and catch scopes are transparent. A class scope, or a
    /// function scope anywhere inside a class, sees the class instance (the
    /// constructor for a static method). Other functions and the global
    /// scope see `Unknown`.
    pub fn this_type(&self, scope: ScopeId) -> TypeDescriptor {
        let mut ancestors = self.ancestors(scope);
        while let Some(id) = ancestors.next() {
            let Some(current) = self.get(id) else {
                break;
            };
            match current.kind {
                ScopeKind::Arrow | ScopeKind::Block | ScopeKind::Catch => continue,
                ScopeKind::Global => break,
                ScopeKind::Class => return class_side_type(current, ClassSide::Instance),
                ScopeKind::Function => {
                    let side = if current.is_static {
                        ClassSide::Constructor
                    } else {
                        ClassSide::Instance
                    };
                    return ancestors
                        .filter_map(|id| self.get(id))
                        .find(|s| s.kind == ScopeKind::Class)
                        .map(|class_scope| class_side_type(class_scope, side))
                        .unwrap_or(TypeDescriptor::Unknown);
                }
            }
        }
        TypeDescriptor::Unknown
    }

    /// Class scope whose class symbol is named `name`.
    pub fn find_class_scope(&self, name: &str) -> Option<ScopeId> {
        self.iter()
            .find(|(_, scope)| {
                scope.kind == ScopeKind::Class
                    && scope.class_symbol.as_ref().is_some_and(|s| s.name == name)
            })
            .map(|(id, _)| id)
    }
}

fn class_side_type(class_scope: &Scope, side: ClassSide) -> TypeDescriptor {
    match class_scope
        .class_symbol
        .as_ref()
        .and_then(|symbol| symbol.type_info.as_ref())
    {
        Some(TypeDescriptor::Class(class)) => TypeDescriptor::Class(class.with_side(side)),
        _ => TypeDescriptor::Unknown,
    }
}

/// Parent-chain walk, bounded by `MAX_SCOPE_WALK_ITERATIONS`.
pub struct Ancestors<'a> {
    tree: &'a ScopeTree,
    next: ScopeId,
    steps: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        if self.next.is_none() || self.steps >= MAX_SCOPE_WALK_ITERATIONS {
            return None;
        }
        let current = self.next;
        let scope = self.tree.get(current)?;
        self.next = scope.parent;
        self.steps += 1;
        Some(current)
    }
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;
