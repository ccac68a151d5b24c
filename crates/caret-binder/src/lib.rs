//! Scope and symbol table for the caret completion engine.
//!
//! - `scope` - `ScopeTree`, an arena of lexical scopes with parent links,
//!   resolution, visibility and offset lookup
//! - `symbol` - `Symbol`, a named binding with an optional type
//! - `state` - `BinderState`, the pass that builds a scope tree from a
//!   document
//! - `environment` - `ScopeEnvironment`, the solver's view of a scope

pub mod scope;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};

pub mod symbol;
pub use symbol::{Symbol, SymbolKind};

pub mod environment;
pub use environment::{ScopeEnvironment, lookup_member_inherited, parent_class};

pub mod state;
pub use state::{BinderOptions, BinderState, bind_source};

mod state_binding;
