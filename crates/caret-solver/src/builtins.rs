//! Built-in member catalog.
//!
//! Static tables describing the members of the JavaScript and DOM built-ins
//! the engine knows about. Return types are written in the small grammar
//! understood by [`crate::parse_return_type`]; `T` stands for the element
//! type of the array a member is looked up on.

use crate::return_type::parse_return_type;
use crate::types::{MemberKind, TypeDescriptor};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// One member of a built-in type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinMember {
    pub name: &'static str,
    pub kind: MemberKind,
    /// Property type, or the return type of a method.
    pub returns: &'static str,
}

const fn prop(name: &'static str, returns: &'static str) -> BuiltinMember {
    BuiltinMember {
        name,
        kind: MemberKind::Property,
        returns,
    }
}

const fn method(name: &'static str, returns: &'static str) -> BuiltinMember {
    BuiltinMember {
        name,
        kind: MemberKind::Method,
        returns,
    }
}

// =============================================================================
// Language built-ins
// =============================================================================

const STRING_MEMBERS: &[BuiltinMember] = &[
    prop("length", "number"),
    method("at", "string"),
    method("charAt", "string"),
    method("charCodeAt", "number"),
    method("codePointAt", "number"),
    method("concat", "string"),
    method("endsWith", "boolean"),
    method("includes", "boolean"),
    method("indexOf", "number"),
    method("lastIndexOf", "number"),
    method("localeCompare", "number"),
    method("match", "Array<string>"),
    method("matchAll", "Object"),
    method("normalize", "string"),
    method("padEnd", "string"),
    method("padStart", "string"),
    method("repeat", "string"),
    method("replace", "string"),
    method("replaceAll", "string"),
    method("search", "number"),
    method("slice", "string"),
    method("split", "Array<string>"),
    method("startsWith", "boolean"),
    method("substring", "string"),
    method("toLocaleLowerCase", "string"),
    method("toLocaleUpperCase", "string"),
    method("toLowerCase", "string"),
    method("toString", "string"),
    method("toUpperCase", "string"),
    method("trim", "string"),
    method("trimEnd", "string"),
    method("trimStart", "string"),
    method("valueOf", "string"),
];

const NUMBER_MEMBERS: &[BuiltinMember] = &[
    method("toExponential", "string"),
    method("toFixed", "string"),
    method("toLocaleString", "string"),
    method("toPrecision", "string"),
    method("toString", "string"),
    method("valueOf", "number"),
];

const BOOLEAN_MEMBERS: &[BuiltinMember] = &[
    method("toString", "string"),
    method("valueOf", "boolean"),
];

const BIGINT_MEMBERS: &[BuiltinMember] = &[
    method("toLocaleString", "string"),
    method("toString", "string"),
    method("valueOf", "bigint"),
];

const SYMBOL_MEMBERS: &[BuiltinMember] = &[
    prop("description", "string"),
    method("toString", "string"),
    method("valueOf", "symbol"),
];

const ARRAY_MEMBERS: &[BuiltinMember] = &[
    prop("length", "number"),
    method("at", "T"),
    method("concat", "Array<T>"),
    method("copyWithin", "Array<T>"),
    method("entries", "Object"),
    method("every", "boolean"),
    method("fill", "Array<T>"),
    method("filter", "Array<T>"),
    method("find", "T"),
    method("findIndex", "number"),
    method("findLast", "T"),
    method("findLastIndex", "number"),
    method("flat", "Array<unknown>"),
    method("flatMap", "Array<unknown>"),
    method("forEach", "undefined"),
    method("includes", "boolean"),
    method("indexOf", "number"),
    method("join", "string"),
    method("keys", "Object"),
    method("lastIndexOf", "number"),
    method("map", "Array<unknown>"),
    method("pop", "T"),
    method("push", "number"),
    method("reduce", "unknown"),
    method("reduceRight", "unknown"),
    method("reverse", "Array<T>"),
    method("shift", "T"),
    method("slice", "Array<T>"),
    method("some", "boolean"),
    method("sort", "Array<T>"),
    method("splice", "Array<T>"),
    method("toReversed", "Array<T>"),
    method("toSorted", "Array<T>"),
    method("toString", "string"),
    method("unshift", "number"),
    method("values", "Object"),
];

const OBJECT_MEMBERS: &[BuiltinMember] = &[
    prop("constructor", "Function"),
    method("hasOwnProperty", "boolean"),
    method("isPrototypeOf", "boolean"),
    method("propertyIsEnumerable", "boolean"),
    method("toLocaleString", "string"),
    method("toString", "string"),
    method("valueOf", "Object"),
];

const FUNCTION_MEMBERS: &[BuiltinMember] = &[
    method("apply", "unknown"),
    method("bind", "Function"),
    method("call", "unknown"),
    prop("length", "number"),
    prop("name", "string"),
];

const PROMISE_MEMBERS: &[BuiltinMember] = &[
    method("catch", "Promise"),
    method("finally", "Promise"),
    method("then", "Promise"),
];

const MAP_MEMBERS: &[BuiltinMember] = &[
    prop("size", "number"),
    method("clear", "undefined"),
    method("delete", "boolean"),
    method("entries", "Object"),
    method("forEach", "undefined"),
    method("get", "unknown"),
    method("has", "boolean"),
    method("keys", "Object"),
    method("set", "Map"),
    method("values", "Object"),
];

const SET_MEMBERS: &[BuiltinMember] = &[
    prop("size", "number"),
    method("add", "Set"),
    method("clear", "undefined"),
    method("delete", "boolean"),
    method("entries", "Object"),
    method("forEach", "undefined"),
    method("has", "boolean"),
    method("values", "Object"),
];

const DATE_MEMBERS: &[BuiltinMember] = &[
    method("getDate", "number"),
    method("getDay", "number"),
    method("getFullYear", "number"),
    method("getHours", "number"),
    method("getMilliseconds", "number"),
    method("getMinutes", "number"),
    method("getMonth", "number"),
    method("getSeconds", "number"),
    method("getTime", "number"),
    method("getTimezoneOffset", "number"),
    method("setDate", "number"),
    method("setFullYear", "number"),
    method("setHours", "number"),
    method("setMinutes", "number"),
    method("setMonth", "number"),
    method("setSeconds", "number"),
    method("setTime", "number"),
    method("toDateString", "string"),
    method("toISOString", "string"),
    method("toJSON", "string"),
    method("toLocaleDateString", "string"),
    method("toLocaleString", "string"),
    method("toLocaleTimeString", "string"),
    method("toString", "string"),
    method("toTimeString", "string"),
    method("toUTCString", "string"),
    method("valueOf", "number"),
];

const REGEXP_MEMBERS: &[BuiltinMember] = &[
    prop("flags", "string"),
    prop("global", "boolean"),
    prop("ignoreCase", "boolean"),
    prop("lastIndex", "number"),
    prop("multiline", "boolean"),
    prop("source", "string"),
    method("exec", "Array<string>"),
    method("test", "boolean"),
    method("toString", "string"),
];

const ERROR_MEMBERS: &[BuiltinMember] = &[
    prop("cause", "unknown"),
    prop("message", "string"),
    prop("name", "string"),
    prop("stack", "string"),
    method("toString", "string"),
];

const MATH_MEMBERS: &[BuiltinMember] = &[
    prop("E", "number"),
    prop("LN10", "number"),
    prop("LN2", "number"),
    prop("LOG10E", "number"),
    prop("LOG2E", "number"),
    prop("PI", "number"),
    prop("SQRT1_2", "number"),
    prop("SQRT2", "number"),
    method("abs", "number"),
    method("acos", "number"),
    method("asin", "number"),
    method("atan", "number"),
    method("atan2", "number"),
    method("cbrt", "number"),
    method("ceil", "number"),
    method("cos", "number"),
    method("exp", "number"),
    method("floor", "number"),
    method("hypot", "number"),
    method("log", "number"),
    method("log10", "number"),
    method("log2", "number"),
    method("max", "number"),
    method("min", "number"),
    method("pow", "number"),
    method("random", "number"),
    method("round", "number"),
    method("sign", "number"),
    method("sin", "number"),
    method("sqrt", "number"),
    method("tan", "number"),
    method("trunc", "number"),
];

const JSON_MEMBERS: &[BuiltinMember] = &[method("parse", "unknown"), method("stringify", "string")];

const CONSOLE_MEMBERS: &[BuiltinMember] = &[
    method("assert", "undefined"),
    method("clear", "undefined"),
    method("count", "undefined"),
    method("debug", "undefined"),
    method("dir", "undefined"),
    method("error", "undefined"),
    method("group", "undefined"),
    method("groupCollapsed", "undefined"),
    method("groupEnd", "undefined"),
    method("info", "undefined"),
    method("log", "undefined"),
    method("table", "undefined"),
    method("time", "undefined"),
    method("timeEnd", "undefined"),
    method("trace", "undefined"),
    method("warn", "undefined"),
];

// =============================================================================
// Constructor-side statics
// =============================================================================

const OBJECT_CONSTRUCTOR_MEMBERS: &[BuiltinMember] = &[
    method("assign", "Object"),
    method("create", "Object"),
    method("defineProperty", "Object"),
    method("entries", "Array<unknown>"),
    method("freeze", "Object"),
    method("fromEntries", "Object"),
    method("getOwnPropertyNames", "Array<string>"),
    method("getPrototypeOf", "Object"),
    method("is", "boolean"),
    method("isFrozen", "boolean"),
    method("keys", "Array<string>"),
    method("values", "Array<unknown>"),
];

const ARRAY_CONSTRUCTOR_MEMBERS: &[BuiltinMember] = &[
    method("from", "Array<unknown>"),
    method("isArray", "boolean"),
    method("of", "Array<unknown>"),
];

const NUMBER_CONSTRUCTOR_MEMBERS: &[BuiltinMember] = &[
    prop("EPSILON", "number"),
    prop("MAX_SAFE_INTEGER", "number"),
    prop("MAX_VALUE", "number"),
    prop("MIN_SAFE_INTEGER", "number"),
    prop("MIN_VALUE", "number"),
    prop("NaN", "number"),
    prop("NEGATIVE_INFINITY", "number"),
    prop("POSITIVE_INFINITY", "number"),
    method("isFinite", "boolean"),
    method("isInteger", "boolean"),
    method("isNaN", "boolean"),
    method("isSafeInteger", "boolean"),
    method("parseFloat", "number"),
    method("parseInt", "number"),
];

const STRING_CONSTRUCTOR_MEMBERS: &[BuiltinMember] = &[
    method("fromCharCode", "string"),
    method("fromCodePoint", "string"),
    method("raw", "string"),
];

const PROMISE_CONSTRUCTOR_MEMBERS: &[BuiltinMember] = &[
    method("all", "Promise"),
    method("allSettled", "Promise"),
    method("any", "Promise"),
    method("race", "Promise"),
    method("reject", "Promise"),
    method("resolve", "Promise"),
];

const DATE_CONSTRUCTOR_MEMBERS: &[BuiltinMember] = &[
    method("now", "number"),
    method("parse", "number"),
    method("UTC", "number"),
];

// =============================================================================
// DOM
// =============================================================================

const EVENT_TARGET_MEMBERS: &[BuiltinMember] = &[
    method("addEventListener", "undefined"),
    method("dispatchEvent", "boolean"),
    method("removeEventListener", "undefined"),
];

const DOCUMENT_MEMBERS: &[BuiltinMember] = &[
    prop("activeElement", "HTMLElement"),
    prop("body", "HTMLElement"),
    prop("cookie", "string"),
    prop("documentElement", "HTMLElement"),
    prop("head", "HTMLElement"),
    prop("readyState", "string"),
    prop("title", "string"),
    prop("URL", "string"),
    method("addEventListener", "undefined"),
    method("createDocumentFragment", "HTMLElement"),
    method("createElement", "HTMLElement"),
    method("createTextNode", "Object"),
    method("getElementById", "HTMLElement"),
    method("getElementsByClassName", "NodeList"),
    method("getElementsByTagName", "NodeList"),
    method("querySelector", "HTMLElement"),
    method("querySelectorAll", "NodeList"),
    method("removeEventListener", "undefined"),
];

const WINDOW_MEMBERS: &[BuiltinMember] = &[
    prop("console", "Console"),
    prop("document", "Document"),
    prop("innerHeight", "number"),
    prop("innerWidth", "number"),
    prop("localStorage", "Storage"),
    prop("location", "Object"),
    prop("navigator", "Object"),
    prop("scrollX", "number"),
    prop("scrollY", "number"),
    prop("sessionStorage", "Storage"),
    method("addEventListener", "undefined"),
    method("alert", "undefined"),
    method("cancelAnimationFrame", "undefined"),
    method("clearInterval", "undefined"),
    method("clearTimeout", "undefined"),
    method("confirm", "boolean"),
    method("fetch", "Promise"),
    method("getComputedStyle", "CSSStyleDeclaration"),
    method("open", "Window"),
    method("prompt", "string"),
    method("removeEventListener", "undefined"),
    method("requestAnimationFrame", "number"),
    method("scrollTo", "undefined"),
    method("setInterval", "number"),
    method("setTimeout", "number"),
];

const STORAGE_MEMBERS: &[BuiltinMember] = &[
    prop("length", "number"),
    method("clear", "undefined"),
    method("getItem", "string"),
    method("key", "string"),
    method("removeItem", "undefined"),
    method("setItem", "undefined"),
];

const HTML_ELEMENT_MEMBERS: &[BuiltinMember] = &[
    prop("checked", "boolean"),
    prop("children", "NodeList"),
    prop("classList", "DOMTokenList"),
    prop("className", "string"),
    prop("clientHeight", "number"),
    prop("clientWidth", "number"),
    prop("dataset", "Object"),
    prop("disabled", "boolean"),
    prop("firstElementChild", "HTMLElement"),
    prop("hidden", "boolean"),
    prop("id", "string"),
    prop("innerHTML", "string"),
    prop("innerText", "string"),
    prop("lastElementChild", "HTMLElement"),
    prop("nextElementSibling", "HTMLElement"),
    prop("offsetHeight", "number"),
    prop("offsetWidth", "number"),
    prop("outerHTML", "string"),
    prop("parentElement", "HTMLElement"),
    prop("previousElementSibling", "HTMLElement"),
    prop("scrollTop", "number"),
    prop("style", "CSSStyleDeclaration"),
    prop("tagName", "string"),
    prop("textContent", "string"),
    prop("value", "string"),
    method("addEventListener", "undefined"),
    method("after", "undefined"),
    method("append", "undefined"),
    method("appendChild", "HTMLElement"),
    method("before", "undefined"),
    method("blur", "undefined"),
    method("click", "undefined"),
    method("closest", "HTMLElement"),
    method("contains", "boolean"),
    method("focus", "undefined"),
    method("getAttribute", "string"),
    method("getBoundingClientRect", "Object"),
    method("hasAttribute", "boolean"),
    method("insertAdjacentHTML", "undefined"),
    method("matches", "boolean"),
    method("prepend", "undefined"),
    method("querySelector", "HTMLElement"),
    method("querySelectorAll", "NodeList"),
    method("remove", "undefined"),
    method("removeAttribute", "undefined"),
    method("removeChild", "HTMLElement"),
    method("removeEventListener", "undefined"),
    method("replaceWith", "undefined"),
    method("scrollIntoView", "undefined"),
    method("setAttribute", "undefined"),
    method("toggleAttribute", "boolean"),
];

const HTML_INPUT_ELEMENT_EXTRA: &[BuiltinMember] = &[
    prop("defaultValue", "string"),
    prop("max", "string"),
    prop("maxLength", "number"),
    prop("min", "string"),
    prop("name", "string"),
    prop("placeholder", "string"),
    prop("readOnly", "boolean"),
    prop("required", "boolean"),
    prop("selectionEnd", "number"),
    prop("selectionStart", "number"),
    prop("type", "string"),
    prop("valueAsNumber", "number"),
    method("checkValidity", "boolean"),
    method("select", "undefined"),
    method("setSelectionRange", "undefined"),
];

const HTML_BUTTON_ELEMENT_EXTRA: &[BuiltinMember] = &[
    prop("form", "HTMLElement"),
    prop("name", "string"),
    prop("type", "string"),
];

const NODE_LIST_MEMBERS: &[BuiltinMember] = &[
    prop("length", "number"),
    method("entries", "Object"),
    method("forEach", "undefined"),
    method("item", "HTMLElement"),
    method("keys", "Object"),
    method("values", "Object"),
];

const DOM_TOKEN_LIST_MEMBERS: &[BuiltinMember] = &[
    prop("length", "number"),
    prop("value", "string"),
    method("add", "undefined"),
    method("contains", "boolean"),
    method("item", "string"),
    method("remove", "undefined"),
    method("replace", "boolean"),
    method("toggle", "boolean"),
];

const CSS_STYLE_DECLARATION_MEMBERS: &[BuiltinMember] = &[
    prop("background", "string"),
    prop("backgroundColor", "string"),
    prop("border", "string"),
    prop("color", "string"),
    prop("cssText", "string"),
    prop("display", "string"),
    prop("fontSize", "string"),
    prop("height", "string"),
    prop("left", "string"),
    prop("margin", "string"),
    prop("opacity", "string"),
    prop("padding", "string"),
    prop("position", "string"),
    prop("top", "string"),
    prop("transform", "string"),
    prop("visibility", "string"),
    prop("width", "string"),
    prop("zIndex", "string"),
    method("getPropertyValue", "string"),
    method("removeProperty", "string"),
    method("setProperty", "undefined"),
];

const EVENT_MEMBERS: &[BuiltinMember] = &[
    prop("bubbles", "boolean"),
    prop("currentTarget", "HTMLElement"),
    prop("defaultPrevented", "boolean"),
    prop("key", "string"),
    prop("target", "HTMLElement"),
    prop("timeStamp", "number"),
    prop("type", "string"),
    method("preventDefault", "undefined"),
    method("stopImmediatePropagation", "undefined"),
    method("stopPropagation", "undefined"),
];

/// Catalog entries by type name. Subtypes list their own members first and
/// repeat the inherited ones.
static CATALOG: Lazy<FxHashMap<&'static str, Vec<BuiltinMember>>> = Lazy::new(|| {
    let mut catalog: FxHashMap<&'static str, Vec<BuiltinMember>> = FxHashMap::default();
    let simple: &[(&'static str, &[BuiltinMember])] = &[
        ("String", STRING_MEMBERS),
        ("Number", NUMBER_MEMBERS),
        ("Boolean", BOOLEAN_MEMBERS),
        ("BigInt", BIGINT_MEMBERS),
        ("Symbol", SYMBOL_MEMBERS),
        ("Array", ARRAY_MEMBERS),
        ("Object", OBJECT_MEMBERS),
        ("Function", FUNCTION_MEMBERS),
        ("Promise", PROMISE_MEMBERS),
        ("Map", MAP_MEMBERS),
        ("Set", SET_MEMBERS),
        ("Date", DATE_MEMBERS),
        ("RegExp", REGEXP_MEMBERS),
        ("Error", ERROR_MEMBERS),
        ("Math", MATH_MEMBERS),
        ("JSON", JSON_MEMBERS),
        ("Console", CONSOLE_MEMBERS),
        ("ObjectConstructor", OBJECT_CONSTRUCTOR_MEMBERS),
        ("ArrayConstructor", ARRAY_CONSTRUCTOR_MEMBERS),
        ("NumberConstructor", NUMBER_CONSTRUCTOR_MEMBERS),
        ("StringConstructor", STRING_CONSTRUCTOR_MEMBERS),
        ("PromiseConstructor", PROMISE_CONSTRUCTOR_MEMBERS),
        ("DateConstructor", DATE_CONSTRUCTOR_MEMBERS),
        ("Document", DOCUMENT_MEMBERS),
        ("Window", WINDOW_MEMBERS),
        ("Storage", STORAGE_MEMBERS),
        ("HTMLElement", HTML_ELEMENT_MEMBERS),
        ("NodeList", NODE_LIST_MEMBERS),
        ("DOMTokenList", DOM_TOKEN_LIST_MEMBERS),
        ("CSSStyleDeclaration", CSS_STYLE_DECLARATION_MEMBERS),
        ("EventTarget", EVENT_TARGET_MEMBERS),
    ];
    for (name, members) in simple {
        catalog.insert(name, members.to_vec());
    }

    let extend = |own: &[BuiltinMember], base: &[BuiltinMember]| {
        let mut members = own.to_vec();
        members.extend(base.iter().filter(|b| !own.iter().any(|o| o.name == b.name)));
        members
    };
    catalog.insert(
        "HTMLInputElement",
        extend(HTML_INPUT_ELEMENT_EXTRA, HTML_ELEMENT_MEMBERS),
    );
    catalog.insert(
        "HTMLButtonElement",
        extend(HTML_BUTTON_ELEMENT_EXTRA, HTML_ELEMENT_MEMBERS),
    );
    catalog.insert("Event", extend(EVENT_MEMBERS, &[]));
    catalog.insert("KeyboardEvent", extend(&[prop("code", "string")], EVENT_MEMBERS));
    catalog.insert(
        "MouseEvent",
        extend(
            &[
                prop("button", "number"),
                prop("clientX", "number"),
                prop("clientY", "number"),
            ],
            EVENT_MEMBERS,
        ),
    );
    catalog
});

/// Members of the built-in type `name`.
pub fn builtin_members(name: &str) -> Option<&'static [BuiltinMember]> {
    CATALOG.get(name).map(Vec::as_slice)
}

/// Whether `name` has a catalog entry.
pub fn is_builtin_type(name: &str) -> bool {
    CATALOG.contains_key(name)
}

/// One member of a built-in type, looked up by name.
pub fn find_builtin_member(type_name: &str, member: &str) -> Option<&'static BuiltinMember> {
    builtin_members(type_name)?.iter().find(|m| m.name == member)
}

// =============================================================================
// Globals
// =============================================================================

/// A global binding available without declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalBinding {
    pub name: &'static str,
    pub kind: MemberKind,
    /// Value type, or the return type when `kind` is `Method`.
    pub returns: &'static str,
}

const fn global(name: &'static str, returns: &'static str) -> GlobalBinding {
    GlobalBinding {
        name,
        kind: MemberKind::Property,
        returns,
    }
}

const fn global_fn(name: &'static str, returns: &'static str) -> GlobalBinding {
    GlobalBinding {
        name,
        kind: MemberKind::Method,
        returns,
    }
}

pub const GLOBALS: &[GlobalBinding] = &[
    global("Array", "ArrayConstructor"),
    global("Date", "DateConstructor"),
    global("Infinity", "number"),
    global("JSON", "JSON"),
    global("Math", "Math"),
    global("NaN", "number"),
    global("Number", "NumberConstructor"),
    global("Object", "ObjectConstructor"),
    global("Promise", "PromiseConstructor"),
    global("String", "StringConstructor"),
    global("console", "Console"),
    global("document", "Document"),
    global("globalThis", "Window"),
    global("localStorage", "Storage"),
    global("sessionStorage", "Storage"),
    global("undefined", "undefined"),
    global("window", "Window"),
    global_fn("alert", "undefined"),
    global_fn("clearInterval", "undefined"),
    global_fn("clearTimeout", "undefined"),
    global_fn("decodeURIComponent", "string"),
    global_fn("encodeURIComponent", "string"),
    global_fn("fetch", "Promise"),
    global_fn("isFinite", "boolean"),
    global_fn("isNaN", "boolean"),
    global_fn("parseFloat", "number"),
    global_fn("parseInt", "number"),
    global_fn("requestAnimationFrame", "number"),
    global_fn("setInterval", "number"),
    global_fn("setTimeout", "number"),
    global_fn("structuredClone", "unknown"),
];

static GLOBAL_INDEX: Lazy<FxHashMap<&'static str, &'static GlobalBinding>> =
    Lazy::new(|| GLOBALS.iter().map(|g| (g.name, g)).collect());

/// Constructors whose `new` produces a catalog instance type.
const INSTANCE_CONSTRUCTORS: &[&str] = &[
    "Array", "Date", "Error", "Map", "Object", "Promise", "RegExp", "Set", "TypeError",
    "RangeError", "Event", "KeyboardEvent", "MouseEvent",
];

pub fn find_global(name: &str) -> Option<&'static GlobalBinding> {
    GLOBAL_INDEX.get(name).copied()
}

/// Type of a global binding. Global functions are `Function` descriptors
/// returning their catalog return type.
pub fn global_type(name: &str) -> Option<TypeDescriptor> {
    let binding = find_global(name)?;
    let returns = parse_return_type(binding.returns);
    Some(match binding.kind {
        MemberKind::Property => returns,
        MemberKind::Method => {
            TypeDescriptor::function(Some(binding.name.to_string()), Vec::new(), returns)
        }
    })
}

/// Instance type produced by `new name(...)` for built-in constructors.
pub fn builtin_instance_type(name: &str) -> Option<TypeDescriptor> {
    if !INSTANCE_CONSTRUCTORS.contains(&name) {
        return None;
    }
    Some(match name {
        "Array" => TypeDescriptor::array(TypeDescriptor::Unknown),
        "Object" => TypeDescriptor::Object {
            name: None,
            shape: None,
        },
        "TypeError" | "RangeError" => TypeDescriptor::named("Error"),
        _ => TypeDescriptor::named(name),
    })
}

#[cfg(test)]
#[path = "tests/builtins_tests.rs"]
mod builtins_tests;
