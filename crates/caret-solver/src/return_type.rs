//! Return-type strings of the built-in catalog.
//!
//! The grammar is closed:
//! - `Array<X>` is an array of `X`
//! - `string`, `number`, `boolean`, `bigint`, `symbol`, `null` (and the
//!   capitalized wrapper spellings of the first three) are primitives
//! - `undefined` and `void` are primitive undefined
//! - `unknown` and `any` carry no information
//! - `T` is the element type of the receiver array
//! - anything else names an object type

use crate::types::{PrimitiveKind, TypeDescriptor};

/// Interpret a catalog return-type string. `T` resolves to `Unknown`.
pub fn parse_return_type(text: &str) -> TypeDescriptor {
    parse_return_type_with_element(text, None)
}

/// Interpret a catalog return-type string, substituting `element` for `T`.
pub fn parse_return_type_with_element(
    text: &str,
    element: Option<&TypeDescriptor>,
) -> TypeDescriptor {
    let text = text.trim();
    if let Some(inner) = text
        .strip_prefix("Array<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return TypeDescriptor::array(parse_return_type_with_element(inner, element));
    }
    if let Some(inner) = text.strip_suffix("[]") {
        return TypeDescriptor::array(parse_return_type_with_element(inner, element));
    }

    match text {
        "" | "unknown" | "any" => TypeDescriptor::Unknown,
        "T" => element.cloned().unwrap_or(TypeDescriptor::Unknown),
        "String" => TypeDescriptor::string(),
        "Number" => TypeDescriptor::number(),
        "Boolean" => TypeDescriptor::boolean(),
        "object" => TypeDescriptor::Object {
            name: None,
            shape: None,
        },
        _ => match PrimitiveKind::from_name(text) {
            Some(kind) => TypeDescriptor::primitive(kind),
            None => TypeDescriptor::named(text),
        },
    }
}
