//! Languages the completion engine knows and their static word tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Html,
    Css,
}

impl Language {
    /// Editor language identifier, case-insensitive. Common aliases and file
    /// extensions are accepted.
    pub fn from_id(id: &str) -> Option<Language> {
        let language = match id.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "typescript" | "ts" | "tsx" => Language::TypeScript,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            _ => return None,
        };
        Some(language)
    }

    pub fn id(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Html => "html",
            Language::Css => "css",
        }
    }

    /// JavaScript and TypeScript go through the script pipeline.
    pub fn is_script(self) -> bool {
        matches!(self, Language::JavaScript | Language::TypeScript)
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => JS_KEYWORDS,
            Language::TypeScript => TS_KEYWORDS,
            Language::Html | Language::Css => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_id(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

// =============================================================================
// Script keywords
// =============================================================================

pub const JS_KEYWORDS: &[&str] = &[
    "async",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "of",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// JavaScript keywords plus the type-level words of TypeScript.
pub const TS_KEYWORDS: &[&str] = &[
    "abstract",
    "any",
    "as",
    "async",
    "await",
    "bigint",
    "boolean",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "declare",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "keyof",
    "let",
    "namespace",
    "never",
    "new",
    "null",
    "number",
    "of",
    "private",
    "protected",
    "public",
    "readonly",
    "return",
    "static",
    "string",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "type",
    "typeof",
    "unknown",
    "var",
    "void",
    "while",
    "yield",
];

// =============================================================================
// HTML
// =============================================================================

pub const HTML_TAGS: &[&str] = &[
    "a", "abbr", "address", "article", "aside", "audio", "b", "blockquote", "body", "br",
    "button", "canvas", "caption", "code", "col", "datalist", "dd", "details", "dialog", "div",
    "dl", "dt", "em", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "head", "header", "hr", "html", "i", "iframe", "img", "input", "label",
    "legend", "li", "link", "main", "meta", "nav", "noscript", "ol", "optgroup", "option",
    "p", "pre", "progress", "script", "section", "select", "small", "source", "span", "strong",
    "style", "summary", "sup", "table", "tbody", "td", "template", "textarea", "tfoot", "th",
    "thead", "title", "tr", "ul", "video",
];

pub const HTML_GLOBAL_ATTRIBUTES: &[&str] = &[
    "accesskey",
    "class",
    "contenteditable",
    "dir",
    "draggable",
    "hidden",
    "id",
    "lang",
    "onblur",
    "onchange",
    "onclick",
    "onfocus",
    "oninput",
    "onkeydown",
    "onkeyup",
    "onsubmit",
    "role",
    "spellcheck",
    "style",
    "tabindex",
    "title",
];

/// Attributes specific to a tag, offered before the global ones.
pub const HTML_TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["download", "href", "hreflang", "rel", "target", "type"]),
    ("audio", &["autoplay", "controls", "loop", "muted", "preload", "src"]),
    ("button", &["disabled", "form", "name", "type", "value"]),
    ("form", &["action", "autocomplete", "enctype", "method", "novalidate", "target"]),
    ("iframe", &["allow", "height", "loading", "name", "sandbox", "src", "width"]),
    ("img", &["alt", "decoding", "height", "loading", "sizes", "src", "srcset", "width"]),
    (
        "input",
        &[
            "accept", "autocomplete", "autofocus", "checked", "disabled", "max", "maxlength",
            "min", "minlength", "multiple", "name", "pattern", "placeholder", "readonly",
            "required", "step", "type", "value",
        ],
    ),
    ("label", &["for", "form"]),
    ("link", &["as", "crossorigin", "href", "media", "rel", "type"]),
    ("meta", &["charset", "content", "http-equiv", "name"]),
    ("ol", &["reversed", "start", "type"]),
    ("option", &["disabled", "label", "selected", "value"]),
    ("script", &["async", "crossorigin", "defer", "integrity", "src", "type"]),
    ("select", &["autofocus", "disabled", "multiple", "name", "required", "size"]),
    ("source", &["media", "sizes", "src", "srcset", "type"]),
    ("td", &["colspan", "headers", "rowspan"]),
    (
        "textarea",
        &[
            "cols", "disabled", "maxlength", "name", "placeholder", "readonly", "required",
            "rows", "wrap",
        ],
    ),
    ("th", &["colspan", "rowspan", "scope"]),
    ("video", &["autoplay", "controls", "height", "loop", "muted", "poster", "src", "width"]),
];

/// Attributes written without a value.
pub const HTML_BOOLEAN_ATTRIBUTES: &[&str] = &[
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "defer",
    "disabled",
    "hidden",
    "loop",
    "multiple",
    "muted",
    "novalidate",
    "readonly",
    "required",
    "reversed",
    "selected",
];

pub fn html_tag_attributes(tag: &str) -> &'static [&'static str] {
    HTML_TAG_ATTRIBUTES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, attributes)| *attributes)
        .unwrap_or(&[])
}

// =============================================================================
// CSS
// =============================================================================

pub const CSS_PROPERTIES: &[&str] = &[
    "align-items",
    "align-self",
    "animation",
    "background",
    "background-color",
    "background-image",
    "background-position",
    "background-repeat",
    "background-size",
    "border",
    "border-bottom",
    "border-color",
    "border-left",
    "border-radius",
    "border-right",
    "border-style",
    "border-top",
    "border-width",
    "bottom",
    "box-shadow",
    "box-sizing",
    "color",
    "cursor",
    "display",
    "flex",
    "flex-direction",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "float",
    "font",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "gap",
    "grid-template-columns",
    "grid-template-rows",
    "height",
    "justify-content",
    "left",
    "letter-spacing",
    "line-height",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "opacity",
    "outline",
    "overflow",
    "overflow-x",
    "overflow-y",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "pointer-events",
    "position",
    "right",
    "text-align",
    "text-decoration",
    "text-overflow",
    "text-transform",
    "top",
    "transform",
    "transition",
    "user-select",
    "vertical-align",
    "visibility",
    "white-space",
    "width",
    "word-break",
    "z-index",
];

/// Keyword values accepted by every property.
pub const CSS_GLOBAL_VALUES: &[&str] = &["inherit", "initial", "revert", "unset"];

pub const CSS_PROPERTY_VALUES: &[(&str, &[&str])] = &[
    ("align-items", &["baseline", "center", "flex-end", "flex-start", "stretch"]),
    ("align-self", &["auto", "baseline", "center", "flex-end", "flex-start", "stretch"]),
    ("box-sizing", &["border-box", "content-box"]),
    (
        "cursor",
        &["auto", "default", "grab", "move", "not-allowed", "pointer", "text", "wait"],
    ),
    (
        "display",
        &[
            "block", "contents", "flex", "grid", "inline", "inline-block", "inline-flex",
            "none", "table",
        ],
    ),
    ("flex-direction", &["column", "column-reverse", "row", "row-reverse"]),
    ("flex-wrap", &["nowrap", "wrap", "wrap-reverse"]),
    ("float", &["left", "none", "right"]),
    ("font-style", &["italic", "normal", "oblique"]),
    ("font-weight", &["bold", "bolder", "lighter", "normal"]),
    (
        "justify-content",
        &[
            "center", "flex-end", "flex-start", "space-around", "space-between", "space-evenly",
        ],
    ),
    ("overflow", &["auto", "clip", "hidden", "scroll", "visible"]),
    ("overflow-x", &["auto", "clip", "hidden", "scroll", "visible"]),
    ("overflow-y", &["auto", "clip", "hidden", "scroll", "visible"]),
    ("pointer-events", &["auto", "none"]),
    ("position", &["absolute", "fixed", "relative", "static", "sticky"]),
    ("text-align", &["center", "end", "justify", "left", "right", "start"]),
    ("text-decoration", &["line-through", "none", "overline", "underline"]),
    ("text-overflow", &["clip", "ellipsis"]),
    ("text-transform", &["capitalize", "lowercase", "none", "uppercase"]),
    ("user-select", &["all", "auto", "none", "text"]),
    ("vertical-align", &["baseline", "bottom", "middle", "sub", "super", "top"]),
    ("visibility", &["collapse", "hidden", "visible"]),
    ("white-space", &["normal", "nowrap", "pre", "pre-line", "pre-wrap"]),
    ("word-break", &["break-all", "break-word", "keep-all", "normal"]),
];

pub fn css_property_values(property: &str) -> &'static [&'static str] {
    CSS_PROPERTY_VALUES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(property))
        .map(|(_, values)| *values)
        .unwrap_or(&[])
}

#[cfg(test)]
#[path = "tests/languages_tests.rs"]
mod languages_tests;
