//! Member enumeration for completion.

use crate::inference::TypeInference;
use caret_binder::{ScopeTree, SymbolKind, parent_class};
use caret_common::limits::MAX_INHERITANCE_DEPTH;
use caret_solver::{
    ClassSide, ClassType, MemberKind, ResolvedMember, TypeDescriptor, catalog_members,
    fallback_members,
};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

/// Sort groups for member candidates; lower sorts first.
pub mod sort_order {
    pub const OWN: u32 = 0;
    pub const INHERITED: u32 = 10;
    /// `_private` and `#private` names
    pub const PRIVATE: u32 = 90;
    /// Members offered because the receiver's type is unknown
    pub const UNKNOWN: u32 = 100;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub label: String,
    pub kind: MemberKind,
    /// Property type, or the return type of a method
    pub type_info: TypeDescriptor,
    pub is_unknown: bool,
    pub sort_order: u32,
}

impl MemberInfo {
    fn known(member: ResolvedMember, order: u32) -> Self {
        let sort_order = if is_private_name(&member.name) {
            sort_order::PRIVATE
        } else {
            order
        };
        MemberInfo {
            label: member.name,
            kind: member.kind,
            type_info: member.type_info,
            is_unknown: false,
            sort_order,
        }
    }

    fn unknown(member: ResolvedMember) -> Self {
        MemberInfo {
            label: member.name,
            kind: member.kind,
            type_info: member.type_info,
            is_unknown: true,
            sort_order: sort_order::UNKNOWN,
        }
    }
}

fn is_private_name(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('#')
}

/// Collects members, first occurrence of a name wins.
#[derive(Default)]
struct MemberSet {
    seen: FxHashSet<String>,
    members: Vec<MemberInfo>,
}

impl MemberSet {
    fn push(&mut self, member: MemberInfo) {
        if self.seen.insert(member.label.clone()) {
            self.members.push(member);
        }
    }

    fn extend(&mut self, members: Vec<ResolvedMember>, order: u32) {
        for member in members {
            self.push(MemberInfo::known(member, order));
        }
    }
}

impl TypeInference<'_> {
    /// Members offered after `value.` for a value of type `ty`, sorted by
    /// sort order and then by label.
    pub fn get_members_of_type(&self, ty: &TypeDescriptor) -> Vec<MemberInfo> {
        let mut set = MemberSet::default();
        match ty {
            TypeDescriptor::Unknown => {
                for member in fallback_members() {
                    set.push(MemberInfo::unknown(member));
                }
            }
            TypeDescriptor::Class(class) => self.collect_class_members(class, &mut set),
            TypeDescriptor::Function { return_type, .. } => {
                let members = catalog_members(ty)
                    .into_iter()
                    .map(|mut member| {
                        // `f.call(...)` and `f.apply(...)` return what `f` does
                        if member.name == "call" || member.name == "apply" {
                            member.type_info = (**return_type).clone();
                        }
                        member
                    })
                    .collect();
                set.extend(members, sort_order::OWN);
            }
            _ => set.extend(catalog_members(ty), sort_order::OWN),
        }

        let mut members = set.members;
        members.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.label.cmp(&b.label))
        });
        debug!("[MEMBERS] {} -> {} members", ty, members.len());
        members
    }

    /// Recorded members of the class, the member symbols of its class scope,
    /// then everything inherited through `extends`.
    fn collect_class_members(&self, class: &ClassType, set: &mut MemberSet) {
        set.extend(
            catalog_members(&TypeDescriptor::Class(class.clone())),
            sort_order::OWN,
        );

        if class.side == ClassSide::Instance
            && let Some(scope) = self
                .scopes
                .find_class_scope(&class.name)
                .and_then(|id| self.scopes.get(id))
        {
            let statics: FxHashSet<&str> = class
                .members
                .iter()
                .filter(|m| m.is_static)
                .map(|m| m.name.as_str())
                .collect();
            for symbol in scope.symbols.values() {
                if !symbol.kind.is_member() || statics.contains(symbol.name.as_str()) {
                    continue;
                }
                let kind = match symbol.kind {
                    SymbolKind::Method => MemberKind::Method,
                    _ => MemberKind::Property,
                };
                set.push(MemberInfo::known(
                    ResolvedMember {
                        name: symbol.name.clone(),
                        kind,
                        type_info: symbol.type_or_unknown(),
                    },
                    sort_order::OWN,
                ));
            }
        }

        let mut current = class.clone();
        for _ in 0..MAX_INHERITANCE_DEPTH {
            match parent_class(self.scopes, ScopeTree::ROOT, &current) {
                Some(parent) => {
                    set.extend(
                        catalog_members(&TypeDescriptor::Class(parent.clone())),
                        sort_order::INHERITED,
                    );
                    current = parent;
                }
                None => {
                    if class.side == ClassSide::Instance
                        && let Some(builtin) = current.parent.as_deref()
                    {
                        set.extend(
                            catalog_members(&TypeDescriptor::named(builtin)),
                            sort_order::INHERITED,
                        );
                    }
                    break;
                }
            }
        }

        if class.side == ClassSide::Constructor {
            set.extend(
                catalog_members(&TypeDescriptor::named("Function")),
                sort_order::INHERITED,
            );
        }
    }
}
