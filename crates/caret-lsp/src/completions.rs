//! Completions.
//!
//! Given a document, a cursor position and a language, produces the ranked
//! candidates for the completion popup:
//! 1. Work out the partial word in front of the cursor (the prefix)
//! 2. Decide the context: member access, global name, HTML tag or attribute,
//!    CSS property or value; or nothing at all inside strings and comments
//! 3. Collect candidates for that context
//! 4. Keep the ones matching the prefix, rank them, truncate

use caret_binder::{ScopeTree, SymbolKind};
use caret_checker::{MemberInfo, TypeInference};
use caret_common::position::{LineMap, Position};
use caret_common::text::{byte_to_utf16, utf16_to_byte};
use caret_scanner::is_identifier_part;
use caret_solver::{GLOBALS, MemberKind, TypeDescriptor, global_type};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{Level, debug, span};

use crate::expression::expression_before;
use crate::languages::Language;
use crate::options::CompletionOptions;
use crate::recency::RecencyTracker;

mod filters;
mod markup;
mod ranking;

pub use ranking::{MatchTier, camel_case_match, compare_case_sensitive_ui, match_tier};

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionItemKind {
    /// A variable or constant
    Variable,
    /// A function
    Function,
    /// A class
    Class,
    /// A method
    Method,
    /// A parameter
    Parameter,
    /// A property, or a CSS property name
    Property,
    /// A keyword
    Keyword,
    /// An HTML tag name
    Tag,
    /// An HTML attribute name
    Attribute,
    /// A CSS keyword value
    Value,
}

/// Sort text categories. Lower strings appear first among items that tie on
/// everything else.
pub mod sort_priority {
    /// Bindings visible from the cursor.
    pub const LOCAL_DECLARATION: &str = "10";
    /// Markup names and values.
    pub const LOCATION_PRIORITY: &str = "11";
    /// Properties and methods on a member completion.
    pub const MEMBER: &str = "11";
    /// Built-in globals and keywords.
    pub const GLOBALS_OR_KEYWORDS: &str = "15";
    pub const KEYWORD: &str = "15";
}

/// Coarse ordering of non-member candidates, compared before collation.
/// Member candidates carry the checker's `sort_order` instead.
pub mod group_order {
    pub const LOCAL: u32 = 0;
    /// Tag-specific attributes, property-specific values
    pub const SPECIFIC: u32 = 0;
    pub const GENERIC: u32 = 10;
    pub const GLOBAL: u32 = 20;
    pub const KEYWORD: u32 = 30;
}

/// Result of a completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub language: Language,
    /// Whether this is a global (non-member) completion.
    pub is_global_completion: bool,
    /// Whether this is a member completion (after a dot).
    pub is_member_completion: bool,
    /// The cursor is where a new name is being declared (`const |`); no
    /// entries are offered there.
    pub is_new_identifier_location: bool,
    /// The partial word in front of the cursor the entries were matched
    /// against.
    pub prefix: String,
    pub entries: Vec<CompletionItem>,
}

impl CompletionResult {
    fn empty(language: Language, prefix: String) -> Self {
        CompletionResult {
            language,
            is_global_completion: false,
            is_member_completion: false,
            is_new_identifier_location: false,
            prefix,
            entries: Vec::new(),
        }
    }
}

/// A completion item to be suggested to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// The label to display in the completion list
    pub label: String,
    pub kind: CompletionItemKind,
    /// Type shown next to the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
    /// Text to insert when the completion is accepted, if different from
    /// `label`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_info: Option<TypeDescriptor>,
    /// Offered only because the receiver's type could not be inferred
    pub is_unknown: bool,
    pub sort_order: u32,
}

impl CompletionItem {
    /// Create a new completion item with only the required fields.
    pub fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            sort_text: None,
            insert_text: None,
            type_info: None,
            is_unknown: false,
            sort_order: 0,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Set the sort text.
    pub fn with_sort_text(mut self, sort_text: impl Into<String>) -> Self {
        self.sort_text = Some(sort_text.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, insert_text: String) -> Self {
        self.insert_text = Some(insert_text);
        self
    }

    pub fn with_sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Attach a type; its display form becomes the detail text.
    pub fn with_type(mut self, type_info: TypeDescriptor) -> Self {
        self.detail = Some(type_info.to_string());
        self.type_info = Some(type_info);
        self
    }

    /// Callables insert `name()`.
    fn with_call_parens(self) -> Self {
        let insert = format!("{}()", self.label);
        self.with_insert_text(insert)
    }

    /// Return the effective sort text: the explicitly set value, or a default
    /// derived from the completion kind.
    pub fn effective_sort_text(&self) -> &str {
        if let Some(ref s) = self.sort_text {
            s.as_str()
        } else {
            default_sort_text(self.kind)
        }
    }

    pub fn effective_insert_text(&self) -> &str {
        self.insert_text.as_deref().unwrap_or(&self.label)
    }
}

/// Derive a default sort text from the completion kind.
pub fn default_sort_text(kind: CompletionItemKind) -> &'static str {
    match kind {
        CompletionItemKind::Variable
        | CompletionItemKind::Function
        | CompletionItemKind::Parameter
        | CompletionItemKind::Class => sort_priority::LOCAL_DECLARATION,
        CompletionItemKind::Property | CompletionItemKind::Method => sort_priority::MEMBER,
        CompletionItemKind::Tag | CompletionItemKind::Attribute | CompletionItemKind::Value => {
            sort_priority::LOCATION_PRIORITY
        }
        CompletionItemKind::Keyword => sort_priority::KEYWORD,
    }
}

/// Completions provider.
///
/// Borrows the scope tree bound from `source_text`; markup languages can
/// pass an empty tree.
pub struct Completions<'a> {
    scopes: &'a ScopeTree,
    line_map: &'a LineMap,
    source_text: &'a str,
    language: Language,
    options: CompletionOptions,
    recency: Option<&'a RecencyTracker>,
}

impl<'a> Completions<'a> {
    /// Create a new Completions provider.
    pub fn new(
        scopes: &'a ScopeTree,
        line_map: &'a LineMap,
        source_text: &'a str,
        language: Language,
    ) -> Self {
        Self {
            scopes,
            line_map,
            source_text,
            language,
            options: CompletionOptions::default(),
            recency: None,
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_recency(mut self, recency: &'a RecencyTracker) -> Self {
        self.recency = Some(recency);
        self
    }

    /// Completions at a line/column position. `None` when the position is
    /// past the end of the document.
    pub fn get_completions(&self, position: Position) -> Option<CompletionResult> {
        let offset = self.line_map.position_to_offset(position)?;
        Some(self.get_completions_at_offset(offset))
    }

    /// Completions at a UTF-16 offset; offsets past the end clamp to it.
    pub fn get_completions_at_offset(&self, offset: u32) -> CompletionResult {
        let offset = offset.min(self.line_map.len());
        let _span = span!(
            Level::DEBUG,
            "completions",
            offset,
            language = %self.language
        )
        .entered();

        let (prefix, prefix_start) = self.word_before(offset);
        let mut result = match self.language {
            Language::JavaScript | Language::TypeScript => {
                self.script_completions(offset, prefix_start, &prefix)
            }
            Language::Html => self.html_completions(prefix_start, &prefix),
            Language::Css => self.css_completions(prefix_start, &prefix),
        };
        result.entries = self.rank(std::mem::take(&mut result.entries), &prefix);
        debug!(
            "[COMPLETE] {} at {} prefix '{}' -> {} entries",
            self.language,
            offset,
            prefix,
            result.entries.len()
        );
        result
    }

    /// Partial word ending at `offset` and the offset it starts at.
    fn word_before(&self, offset: u32) -> (String, u32) {
        let end = utf16_to_byte(self.source_text, offset);
        let before = &self.source_text[..end];
        let is_word = |c: char| match self.language {
            Language::JavaScript | Language::TypeScript => is_identifier_part(c),
            Language::Html | Language::Css => c.is_alphanumeric() || c == '-' || c == '_',
        };
        let start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word(*c))
            .last()
            .map_or(end, |(i, _)| i);
        let prefix = before[start..].to_string();
        (prefix, byte_to_utf16(self.source_text, start))
    }

    /// Text of the document before the UTF-16 `offset`.
    fn text_before(&self, offset: u32) -> &str {
        &self.source_text[..utf16_to_byte(self.source_text, offset)]
    }

    // =========================================================================
    // Script
    // =========================================================================

    fn script_completions(&self, offset: u32, prefix_start: u32, prefix: &str) -> CompletionResult {
        let mut result = CompletionResult::empty(self.language, prefix.to_string());
        if self.is_in_no_completion_context(offset) {
            debug!("[COMPLETE] suppressed inside string, comment or number");
            return result;
        }
        if self.is_at_definition_location(prefix_start) {
            result.is_new_identifier_location = true;
            return result;
        }

        let before = self.text_before(prefix_start);
        if before.ends_with('.') && !before.ends_with("...") {
            result.is_member_completion = true;
            result.entries = self.member_completions(prefix_start, offset);
        } else {
            result.is_global_completion = true;
            result.entries = self.global_completions(offset);
        }
        result
    }

    fn member_completions(&self, dot_end: u32, offset: u32) -> Vec<CompletionItem> {
        let expr = expression_before(self.source_text, dot_end);
        let inference = TypeInference::with_options(
            self.scopes,
            self.line_map,
            self.options.inference_options(),
        );
        let ty = inference.get_type_at_offset(&expr, offset);
        debug!("[COMPLETE] member access on '{}': {}", expr, ty);
        inference
            .get_members_of_type(&ty)
            .into_iter()
            .map(member_item)
            .collect()
    }

    /// Visible bindings, then built-in globals, then keywords.
    fn global_completions(&self, offset: u32) -> Vec<CompletionItem> {
        let scope = self.scopes.find_scope_at_offset(ScopeTree::ROOT, offset);
        let mut seen = FxHashSet::default();
        let mut items = Vec::new();

        for symbol in self.scopes.visible_symbols(scope) {
            seen.insert(symbol.name.clone());
            let kind = match symbol.kind {
                SymbolKind::Variable | SymbolKind::Constant => CompletionItemKind::Variable,
                SymbolKind::Function => CompletionItemKind::Function,
                SymbolKind::Class => CompletionItemKind::Class,
                SymbolKind::Parameter => CompletionItemKind::Parameter,
                SymbolKind::Property => CompletionItemKind::Property,
                SymbolKind::Method => CompletionItemKind::Method,
            };
            let mut item = CompletionItem::new(symbol.name.as_str(), kind)
                .with_sort_text(sort_priority::LOCAL_DECLARATION)
                .with_sort_order(group_order::LOCAL)
                .with_type(symbol.type_or_unknown());
            if kind == CompletionItemKind::Function {
                item = item.with_call_parens();
            }
            items.push(item);
        }

        if self.options.include_globals {
            for global in GLOBALS {
                if !seen.insert(global.name.to_string()) {
                    continue;
                }
                let ty = global_type(global.name).unwrap_or(TypeDescriptor::Unknown);
                let kind = if global.kind == MemberKind::Method {
                    CompletionItemKind::Function
                } else if global.returns.ends_with("Constructor") {
                    CompletionItemKind::Class
                } else {
                    CompletionItemKind::Variable
                };
                let mut item = CompletionItem::new(global.name, kind)
                    .with_sort_text(sort_priority::GLOBALS_OR_KEYWORDS)
                    .with_sort_order(group_order::GLOBAL)
                    .with_type(ty);
                if kind == CompletionItemKind::Function {
                    item = item.with_call_parens();
                }
                items.push(item);
            }
        }

        if self.options.include_keywords {
            for keyword in self.language.keywords() {
                if seen.insert(keyword.to_string()) {
                    items.push(
                        CompletionItem::new(*keyword, CompletionItemKind::Keyword)
                            .with_sort_text(sort_priority::KEYWORD)
                            .with_sort_order(group_order::KEYWORD),
                    );
                }
            }
        }
        items
    }

    // =========================================================================
    // Ranking
    // =========================================================================

    /// Keep items matching `prefix` and order them by match tier, recency,
    /// sort order, sort text and finally label collation.
    fn rank(&self, items: Vec<CompletionItem>, prefix: &str) -> Vec<CompletionItem> {
        let mut ranked: Vec<(MatchTier, usize, CompletionItem)> = items
            .into_iter()
            .filter_map(|item| {
                let tier = match_tier(&item.label, prefix, &self.options)?;
                let recency = self
                    .recency
                    .and_then(|r| r.rank(&item.label))
                    .unwrap_or(usize::MAX);
                Some((tier, recency, item))
            })
            .collect();
        ranked.sort_by(|(tier_a, recent_a, a), (tier_b, recent_b, b)| {
            tier_a
                .cmp(tier_b)
                .then_with(|| recent_a.cmp(recent_b))
                .then_with(|| a.sort_order.cmp(&b.sort_order))
                .then_with(|| {
                    compare_case_sensitive_ui(a.effective_sort_text(), b.effective_sort_text())
                })
                .then_with(|| compare_case_sensitive_ui(&a.label, &b.label))
        });

        let mut entries: Vec<CompletionItem> = ranked.into_iter().map(|(_, _, item)| item).collect();
        if self.options.max_results > 0 {
            entries.truncate(self.options.max_results);
        }
        entries
    }
}

fn member_item(member: MemberInfo) -> CompletionItem {
    let kind = match member.kind {
        MemberKind::Method => CompletionItemKind::Method,
        MemberKind::Property => CompletionItemKind::Property,
    };
    let mut item = CompletionItem::new(member.label, kind)
        .with_sort_text(sort_priority::MEMBER)
        .with_sort_order(member.sort_order)
        .with_type(member.type_info);
    item.is_unknown = member.is_unknown;
    if kind == CompletionItemKind::Method {
        item = item.with_call_parens();
    }
    item
}

/// Bind `source` when it is a script, and complete at `offset`.
pub fn complete_at(
    source: &str,
    offset: u32,
    language: Language,
    options: &CompletionOptions,
    recency: Option<&RecencyTracker>,
) -> CompletionResult {
    let scopes = if language.is_script() {
        caret_binder::bind_source(source)
    } else {
        ScopeTree::new()
    };
    let line_map = LineMap::build(source);
    let mut completions =
        Completions::new(&scopes, &line_map, source, language).with_options(options.clone());
    if let Some(recency) = recency {
        completions = completions.with_recency(recency);
    }
    completions.get_completions_at_offset(offset)
}

#[cfg(test)]
#[path = "tests/completions_tests.rs"]
mod completions_tests;
