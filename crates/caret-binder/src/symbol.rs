//! Symbols: named bindings owned by exactly one scope.

use caret_solver::TypeDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// `var` / `let`
    Variable,
    /// `const`
    Constant,
    Function,
    Class,
    Parameter,
    /// Class field, accessor or `this.x` assignment
    Property,
    /// Class method
    Method,
}

impl SymbolKind {
    /// Members live in class scopes but are not lexical bindings: `x` inside a
    /// method does not see the field `x`.
    pub fn is_member(self) -> bool {
        matches!(self, SymbolKind::Property | SymbolKind::Method)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    /// `None` when nothing is known about the binding's value.
    #[serde(rename = "type")]
    pub type_info: Option<TypeDescriptor>,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, type_info: Option<TypeDescriptor>) -> Self {
        Symbol {
            name: name.into(),
            type_info,
            kind,
        }
    }

    /// The symbol's type, `Unknown` when absent.
    pub fn type_or_unknown(&self) -> TypeDescriptor {
        self.type_info.clone().unwrap_or(TypeDescriptor::Unknown)
    }
}
