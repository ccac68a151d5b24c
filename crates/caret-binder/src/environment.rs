//! Scope-backed type environment.
//!
//! Lets the solver's evaluator see the bindings of a scope tree, and adds
//! the one thing plain descriptor lookup cannot do: following a class's
//! `extends` chain through the scopes.

use crate::scope::{ScopeId, ScopeTree};
use caret_common::limits::MAX_INHERITANCE_DEPTH;
use caret_solver::{
    ClassSide, ClassType, ResolvedMember, TypeDescriptor, TypeEnvironment, global_type,
    lookup_member,
};

pub struct ScopeEnvironment<'a> {
    pub tree: &'a ScopeTree,
    pub scope: ScopeId,
}

impl<'a> ScopeEnvironment<'a> {
    pub fn new(tree: &'a ScopeTree, scope: ScopeId) -> Self {
        ScopeEnvironment { tree, scope }
    }
}

impl TypeEnvironment for ScopeEnvironment<'_> {
    /// Scope bindings first, then the built-in globals. A declared name with
    /// no recorded type is known but `Unknown`.
    fn type_of_name(&self, name: &str) -> Option<TypeDescriptor> {
        match self.tree.resolve(self.scope, name) {
            Some(symbol) => Some(symbol.type_or_unknown()),
            None => global_type(name),
        }
    }

    fn this_type(&self) -> TypeDescriptor {
        self.tree.this_type(self.scope)
    }

    fn member_type(&self, object: &TypeDescriptor, member: &str) -> Option<TypeDescriptor> {
        lookup_member_inherited(self.tree, self.scope, object, member).map(|m| m.type_info)
    }
}

/// Parent class of `class`, on the same side. The name is resolved from
/// `scope`, then from any class scope of that name in the tree.
pub fn parent_class(tree: &ScopeTree, scope: ScopeId, class: &ClassType) -> Option<ClassType> {
    let parent = class.parent.as_deref()?;
    let symbol = match tree.resolve(scope, parent) {
        Some(symbol) => symbol,
        None => tree
            .get(tree.find_class_scope(parent)?)?
            .class_symbol
            .as_ref()?,
    };
    match symbol.type_info.as_ref()? {
        TypeDescriptor::Class(parent_class) => Some(parent_class.with_side(class.side)),
        _ => None,
    }
}

/// Member lookup that walks `extends` for class values, up to
/// `MAX_INHERITANCE_DEPTH` hops. A built-in parent (`extends Error`) answers
/// from the catalog.
pub fn lookup_member_inherited(
    tree: &ScopeTree,
    scope: ScopeId,
    object: &TypeDescriptor,
    member: &str,
) -> Option<ResolvedMember> {
    if let Some(found) = lookup_member(object, member) {
        return Some(found);
    }
    let TypeDescriptor::Class(class) = object else {
        return None;
    };
    let mut current = class.clone();
    for _ in 0..MAX_INHERITANCE_DEPTH {
        match parent_class(tree, scope, &current) {
            Some(parent) => {
                if let Some(found) = lookup_member(&TypeDescriptor::Class(parent.clone()), member) {
                    return Some(found);
                }
                current = parent;
            }
            None => {
                let builtin_parent = current.parent.as_deref()?;
                if current.side == ClassSide::Constructor {
                    return None;
                }
                return lookup_member(&TypeDescriptor::named(builtin_parent), member);
            }
        }
    }
    None
}
