//! Type inference over access chains.
//!
//! `TypeInference` borrows a bound scope tree and answers "what is the type
//! of this expression at this position". The expression is the text in front
//! of the cursor; it does not have to parse. It is split into a head and
//! steps (see `chain`), the head is typed, and each step is folded through
//! member lookup. Any step that cannot be resolved yields `Unknown`, and so
//! does everything after it.

use crate::chain::{AccessChain, ChainSegment, is_identifier, split_access_chain};
use crate::heuristics;
use caret_binder::{ScopeEnvironment, ScopeId, ScopeTree, lookup_member_inherited};
use caret_common::position::{LineMap, Position};
use caret_parser::parse_expression;
use caret_solver::{
    MemberKind, PrimitiveKind, ResolvedMember, TypeDescriptor, TypeEvaluator, global_type,
};
use tracing::{Level, debug, span, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Fall back to name-based guesses when inference yields `Unknown`.
    pub best_guess: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        InferenceOptions { best_guess: true }
    }
}

pub struct TypeInference<'a> {
    pub(crate) scopes: &'a ScopeTree,
    line_map: &'a LineMap,
    options: InferenceOptions,
}

impl<'a> TypeInference<'a> {
    pub fn new(scopes: &'a ScopeTree, line_map: &'a LineMap) -> Self {
        Self::with_options(scopes, line_map, InferenceOptions::default())
    }

    pub fn with_options(
        scopes: &'a ScopeTree,
        line_map: &'a LineMap,
        options: InferenceOptions,
    ) -> Self {
        TypeInference {
            scopes,
            line_map,
            options,
        }
    }

    pub fn options(&self) -> InferenceOptions {
        self.options
    }

    /// Type of `expr` as seen from 0-based `line`/`column` of the document.
    /// A line past the end of the document reads as the end of the document.
    pub fn get_type_of_expression(&self, expr: &str, line: u32, column: u32) -> TypeDescriptor {
        let offset = self
            .line_map
            .position_to_offset(Position::new(line, column))
            .unwrap_or_else(|| self.line_map.len());
        self.get_type_at_offset(expr, offset)
    }

    /// Type of `expr` as seen from the UTF-16 `offset` of the document.
    pub fn get_type_at_offset(&self, expr: &str, offset: u32) -> TypeDescriptor {
        let _span = span!(Level::DEBUG, "get_type_at_offset", offset).entered();
        let scope = self.scopes.find_scope_at_offset(ScopeTree::ROOT, offset);
        let Some(chain) = split_access_chain(expr) else {
            debug!("[INFER] no access chain in '{}'", expr);
            return TypeDescriptor::Unknown;
        };
        let ty = self.resolve_chain(&chain, scope);
        debug!("[INFER] '{}' in scope {} -> {}", expr, scope.0, ty);
        ty
    }

    /// Type of `member` read from a value of type `ty`. For a method this is
    /// its return type. Class parents are looked up from the global scope.
    pub fn resolve_member_access(&self, ty: &TypeDescriptor, member: &str) -> TypeDescriptor {
        self.lookup(ty, member, ScopeTree::ROOT)
            .map(|found| found.type_info)
            .unwrap_or(TypeDescriptor::Unknown)
    }

    fn resolve_chain(&self, chain: &AccessChain, scope: ScopeId) -> TypeDescriptor {
        let mut ty = self.resolve_head(&chain.head, scope);
        trace!(head = %chain.head, ty = %ty, "chain head");
        for segment in &chain.segments {
            ty = self.step(&ty, segment, scope);
            trace!(?segment, ty = %ty, "chain step");
        }
        ty
    }

    /// Built-in globals first, then the scope chain. Anything that is not a
    /// name is parsed and evaluated in `scope`.
    fn resolve_head(&self, head: &str, scope: ScopeId) -> TypeDescriptor {
        if head == "this" {
            return self.scopes.this_type(scope);
        }
        if is_identifier(head) {
            let ty = global_type(head)
                .or_else(|| self.scopes.resolve(scope, head).map(|s| s.type_or_unknown()))
                .unwrap_or(TypeDescriptor::Unknown);
            return self.or_guess(ty, || heuristics::guess_from_name(head));
        }
        match parse_expression(head) {
            Ok(node) => {
                let env = ScopeEnvironment::new(self.scopes, scope);
                TypeEvaluator::new(&env).evaluate(&node)
            }
            Err(err) => {
                debug!("[INFER] head '{}' does not parse: {}", head, err);
                TypeDescriptor::Unknown
            }
        }
    }

    fn step(&self, ty: &TypeDescriptor, segment: &ChainSegment, scope: ScopeId) -> TypeDescriptor {
        match segment {
            ChainSegment::Member { name, called } => {
                let result = match self.lookup(ty, name, scope) {
                    Some(found) => member_value(found, *called),
                    None => TypeDescriptor::Unknown,
                };
                self.or_guess(result, || {
                    if *called {
                        heuristics::guess_method_result(name)
                    } else {
                        heuristics::guess_from_name(name)
                    }
                })
            }
            ChainSegment::Index(text) => match string_key(text) {
                Some(key) => self
                    .lookup(ty, key, scope)
                    .map(|found| member_value(found, false))
                    .unwrap_or(TypeDescriptor::Unknown),
                None => indexed_element(ty),
            },
            ChainSegment::Call => ty.call_result(),
        }
    }

    fn lookup(&self, ty: &TypeDescriptor, member: &str, scope: ScopeId) -> Option<ResolvedMember> {
        lookup_member_inherited(self.scopes, scope, ty, member)
    }

    fn or_guess(
        &self,
        ty: TypeDescriptor,
        guess: impl FnOnce() -> Option<TypeDescriptor>,
    ) -> TypeDescriptor {
        if !ty.is_unknown() || !self.options.best_guess {
            return ty;
        }
        match guess() {
            Some(guessed) => {
                debug!("[INFER] best guess {}", guessed);
                guessed
            }
            None => ty,
        }
    }
}

/// Value of a found member: a method read without a call is a function.
fn member_value(found: ResolvedMember, called: bool) -> TypeDescriptor {
    match (found.kind, called) {
        (MemberKind::Method, true) => found.type_info,
        (MemberKind::Method, false) => {
            TypeDescriptor::function(Some(found.name), Vec::new(), found.type_info)
        }
        (MemberKind::Property, true) => found.type_info.call_result(),
        (MemberKind::Property, false) => found.type_info,
    }
}

/// `'key'` or `"key"`.
fn string_key(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    text.strip_prefix(quote)?.strip_suffix(quote)
}

/// Result of `value[i]` for a non-string index.
fn indexed_element(ty: &TypeDescriptor) -> TypeDescriptor {
    match ty {
        TypeDescriptor::Array { element } => (**element).clone(),
        _ if ty.is_primitive(PrimitiveKind::String) => TypeDescriptor::string(),
        TypeDescriptor::Object {
            name: Some(name), ..
        } if name == "NodeList" => TypeDescriptor::named("HTMLElement"),
        _ => TypeDescriptor::Unknown,
    }
}

#[cfg(test)]
#[path = "tests/inference_unit_tests.rs"]
mod inference_unit_tests;
