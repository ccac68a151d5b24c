//! Type layer of the caret completion engine.
//!
//! - `types` - `TypeDescriptor`, the value-like description of an inferred type
//! - `builtins` - Static member catalog for JavaScript and DOM built-ins,
//!   plus the global bindings
//! - `return_type` - The closed grammar of catalog return-type strings
//! - `members` - Member lookup and enumeration on a descriptor
//! - `evaluate` - `TypeEvaluator`, best-effort typing of AST expressions
//!   against a `TypeEnvironment`

pub mod types;
pub use types::{ClassMember, ClassSide, ClassType, MemberKind, PrimitiveKind, TypeDescriptor};

pub mod builtins;
pub use builtins::{
    BuiltinMember, GLOBALS, GlobalBinding, builtin_instance_type, builtin_members,
    find_builtin_member, find_global, global_type, is_builtin_type,
};

pub mod return_type;
pub use return_type::{parse_return_type, parse_return_type_with_element};

pub mod members;
pub use members::{ResolvedMember, catalog_members, fallback_members, lookup_member};

pub mod evaluate;
pub use evaluate::{
    EmptyEnvironment, TypeEnvironment, TypeEvaluator, collect_returns, evaluate_standalone,
    property_key,
};
