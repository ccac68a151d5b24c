//! Member lookup on type descriptors.
//!
//! These queries only know what a descriptor carries plus the built-in
//! catalog. Following a class's `extends` chain needs the scope tree and is
//! layered on top by the checker.

use crate::builtins::{BuiltinMember, builtin_members, find_builtin_member};
use crate::return_type::parse_return_type_with_element;
use crate::types::{ClassSide, MemberKind, TypeDescriptor};
use rustc_hash::FxHashSet;

/// A member found on a type. For methods `type_info` is the return type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMember {
    pub name: String,
    pub kind: MemberKind,
    pub type_info: TypeDescriptor,
}

impl ResolvedMember {
    fn from_builtin(member: &BuiltinMember, element: Option<&TypeDescriptor>) -> Self {
        ResolvedMember {
            name: member.name.to_string(),
            kind: member.kind,
            type_info: parse_return_type_with_element(member.returns, element),
        }
    }
}

/// Catalog entry used for a named object that has no entry of its own.
const OBJECT_CATALOG: &str = "Object";

/// Catalog types merged for a receiver of unknown type.
const FALLBACK_CATALOGS: &[&str] = &["String", "Array", "Object"];

/// Look up `name` on `ty`.
///
/// Shaped objects answer from their own keys first and then from the
/// `Object` catalog. Class values answer from recorded members of the
/// matching side; constructors also expose the `Function` members.
pub fn lookup_member(ty: &TypeDescriptor, name: &str) -> Option<ResolvedMember> {
    match ty {
        TypeDescriptor::Unknown => None,
        TypeDescriptor::Class(class) => {
            if let Some(member) = class.side_members().find(|m| m.name == name) {
                return Some(ResolvedMember {
                    name: member.name.clone(),
                    kind: member.kind,
                    type_info: member.type_info.clone(),
                });
            }
            match class.side {
                ClassSide::Constructor => lookup_catalog("Function", name, None),
                ClassSide::Instance => None,
            }
        }
        TypeDescriptor::Object {
            shape: Some(shape), ..
        } => match shape.get(name) {
            Some(value) => Some(shape_member(name, value)),
            None => lookup_catalog(OBJECT_CATALOG, name, None),
        },
        _ => {
            let catalog = ty.catalog_name()?;
            lookup_catalog(catalog, name, ty.element_type()).or_else(|| {
                if builtin_members(catalog).is_none() {
                    lookup_catalog(OBJECT_CATALOG, name, None)
                } else {
                    None
                }
            })
        }
    }
}

fn lookup_catalog(
    catalog: &str,
    name: &str,
    element: Option<&TypeDescriptor>,
) -> Option<ResolvedMember> {
    find_builtin_member(catalog, name).map(|m| ResolvedMember::from_builtin(m, element))
}

/// A shape entry holding a function value reads as a method returning the
/// function's return type.
fn shape_member(name: &str, value: &TypeDescriptor) -> ResolvedMember {
    match value {
        TypeDescriptor::Function { return_type, .. } => ResolvedMember {
            name: name.to_string(),
            kind: MemberKind::Method,
            type_info: (**return_type).clone(),
        },
        _ => ResolvedMember {
            name: name.to_string(),
            kind: MemberKind::Property,
            type_info: value.clone(),
        },
    }
}

/// Every member the descriptor itself can list.
///
/// Shaped objects list only their own keys. Class values list the recorded
/// members of their side. Unknown lists nothing; see [`fallback_members`].
pub fn catalog_members(ty: &TypeDescriptor) -> Vec<ResolvedMember> {
    match ty {
        TypeDescriptor::Unknown => Vec::new(),
        TypeDescriptor::Class(class) => class
            .side_members()
            .map(|m| ResolvedMember {
                name: m.name.clone(),
                kind: m.kind,
                type_info: m.type_info.clone(),
            })
            .collect(),
        TypeDescriptor::Object {
            shape: Some(shape), ..
        } => shape
            .iter()
            .map(|(name, value)| shape_member(name, value))
            .collect(),
        _ => {
            let Some(catalog) = ty.catalog_name() else {
                return Vec::new();
            };
            let members = builtin_members(catalog)
                .or_else(|| builtin_members(OBJECT_CATALOG))
                .unwrap_or_default();
            members
                .iter()
                .map(|m| ResolvedMember::from_builtin(m, ty.element_type()))
                .collect()
        }
    }
}

/// Members offered for a receiver of unknown type: the union of the string,
/// array and object catalogs, first spelling of each name wins.
pub fn fallback_members() -> Vec<ResolvedMember> {
    let mut seen = FxHashSet::default();
    let mut members = Vec::new();
    for catalog in FALLBACK_CATALOGS {
        for member in builtin_members(catalog).unwrap_or_default() {
            if seen.insert(member.name) {
                members.push(ResolvedMember::from_builtin(member, None));
            }
        }
    }
    members
}

#[cfg(test)]
#[path = "tests/members_tests.rs"]
mod members_tests;
