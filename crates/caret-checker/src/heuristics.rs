//! Best-guess typing.
//!
//! Used only when real inference produced `Unknown` and the caller asked for
//! guesses (`InferenceOptions::best_guess`). Nothing here is derived from the
//! program; it reads names. Kept apart from inference so it can be switched
//! off as a whole.

use caret_solver::TypeDescriptor;

/// Methods that hand back an element whatever the receiver is.
const ELEMENT_METHODS: &[(&str, &str)] = &[
    ("querySelector", "HTMLElement"),
    ("getElementById", "HTMLElement"),
    ("closest", "HTMLElement"),
    ("createElement", "HTMLElement"),
    ("appendChild", "HTMLElement"),
    ("cloneNode", "HTMLElement"),
    ("querySelectorAll", "NodeList"),
    ("getElementsByClassName", "NodeList"),
    ("getElementsByTagName", "NodeList"),
];

/// Substrings of an identifier that suggest an element type, checked in
/// order against the lower-cased name.
const ELEMENT_NAME_HINTS: &[(&str, &str)] = &[
    ("button", "HTMLButtonElement"),
    ("btn", "HTMLButtonElement"),
    ("input", "HTMLInputElement"),
    ("field", "HTMLInputElement"),
    ("modal", "HTMLElement"),
    ("dialog", "HTMLElement"),
    ("container", "HTMLElement"),
    ("wrapper", "HTMLElement"),
    ("element", "HTMLElement"),
    ("panel", "HTMLElement"),
];

const STRING_NAME_HINTS: &[&str] = &["name", "title", "text", "label", "message", "url", "path"];
const NUMBER_NAME_HINTS: &[&str] = &["count", "index", "total", "length", "width", "height"];
const ARRAY_NAME_HINTS: &[&str] = &["list", "items", "array"];

/// Guess the type of a call to `method` on a receiver of unknown type.
pub fn guess_method_result(method: &str) -> Option<TypeDescriptor> {
    ELEMENT_METHODS
        .iter()
        .find(|(name, _)| *name == method)
        .map(|(_, ty)| TypeDescriptor::named(*ty))
}

/// Guess the type of a binding or property from its name alone.
pub fn guess_from_name(name: &str) -> Option<TypeDescriptor> {
    if name.is_empty() {
        return None;
    }
    let lower = name.to_ascii_lowercase();

    if let Some((_, ty)) = ELEMENT_NAME_HINTS.iter().find(|(hint, _)| lower.contains(hint)) {
        return Some(TypeDescriptor::named(*ty));
    }
    // `submitEl`, `el`
    if lower == "el" || (name.len() > 2 && name.ends_with("El")) {
        return Some(TypeDescriptor::named("HTMLElement"));
    }
    if has_word_prefix(name, "is") || has_word_prefix(name, "has") {
        return Some(TypeDescriptor::boolean());
    }
    if ARRAY_NAME_HINTS.iter().any(|hint| lower.ends_with(hint)) {
        return Some(TypeDescriptor::array(TypeDescriptor::Unknown));
    }
    if STRING_NAME_HINTS.iter().any(|hint| lower.ends_with(hint)) {
        return Some(TypeDescriptor::string());
    }
    if NUMBER_NAME_HINTS.iter().any(|hint| lower.ends_with(hint)) {
        return Some(TypeDescriptor::number());
    }
    None
}

/// `isOpen`, `hasItems`: the prefix followed by an upper-case letter.
fn has_word_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
#[path = "tests/heuristics_tests.rs"]
mod heuristics_tests;
