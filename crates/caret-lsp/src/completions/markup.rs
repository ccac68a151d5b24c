//! HTML and CSS completion contexts.
//!
//! Markup has no scope tree; the context is read straight off the text in
//! front of the cursor.

use super::*;
use crate::languages::{
    CSS_GLOBAL_VALUES, CSS_PROPERTIES, HTML_BOOLEAN_ATTRIBUTES, HTML_GLOBAL_ATTRIBUTES,
    HTML_TAGS, css_property_values, html_tag_attributes,
};

impl<'a> Completions<'a> {
    /// Tag names after `<`, attribute names inside an open tag, nothing in
    /// text content, attribute values or comments.
    pub(super) fn html_completions(&self, prefix_start: u32, prefix: &str) -> CompletionResult {
        let mut result = CompletionResult::empty(self.language, prefix.to_string());
        let before = self.text_before(prefix_start);
        let Some(open) = before.rfind('<') else {
            return result;
        };
        if before.rfind('>').is_some_and(|close| close > open) {
            return result;
        }
        let inside = &before[open + 1..];
        if inside.starts_with('!') {
            return result;
        }

        result.is_global_completion = true;
        if !inside.contains(char::is_whitespace) {
            // `<di|` or `</di|`
            result.entries = HTML_TAGS
                .iter()
                .map(|tag| CompletionItem::new(*tag, CompletionItemKind::Tag))
                .collect();
            return result;
        }

        if inside.ends_with('=') || inside.matches('"').count() % 2 == 1 {
            return result;
        }
        if inside.matches('\'').count() % 2 == 1 {
            return result;
        }

        let mut parts = inside.split_whitespace();
        let tag = parts.next().unwrap_or_default();
        let present: FxHashSet<&str> = parts
            .filter_map(|part| part.split('=').next())
            .map(str::trim)
            .collect();

        let mut seen = FxHashSet::default();
        let specific = html_tag_attributes(tag)
            .iter()
            .map(|name| (*name, group_order::SPECIFIC));
        let generic = HTML_GLOBAL_ATTRIBUTES
            .iter()
            .map(|name| (*name, group_order::GENERIC));
        for (name, order) in specific.chain(generic) {
            if present.contains(name) || !seen.insert(name) {
                continue;
            }
            let mut item =
                CompletionItem::new(name, CompletionItemKind::Attribute).with_sort_order(order);
            if !HTML_BOOLEAN_ATTRIBUTES.contains(&name) {
                item = item.with_insert_text(format!("{name}=\"\""));
            }
            result.entries.push(item);
        }
        result
    }

    /// Property names inside a rule block, values after `property:`, tag
    /// names in selector position, nothing inside comments.
    pub(super) fn css_completions(&self, prefix_start: u32, prefix: &str) -> CompletionResult {
        let mut result = CompletionResult::empty(self.language, prefix.to_string());
        let before = self.text_before(prefix_start);
        if let Some(comment) = before.rfind("/*")
            && before.rfind("*/").is_none_or(|end| end < comment)
        {
            return result;
        }

        result.is_global_completion = true;
        let block_start = before.rfind('{');
        let in_block = block_start.is_some_and(|open| before.rfind('}').is_none_or(|close| close < open));
        let Some(block_start) = block_start.filter(|_| in_block) else {
            // Selector position
            result.entries = HTML_TAGS
                .iter()
                .map(|tag| CompletionItem::new(*tag, CompletionItemKind::Tag))
                .collect();
            return result;
        };

        let declaration_start = before[block_start..]
            .rfind(';')
            .map_or(block_start, |semi| block_start + semi)
            + 1;
        let declaration = &before[declaration_start..];
        match declaration.split_once(':') {
            Some((property, _)) => {
                let property = property.trim();
                let specific = css_property_values(property)
                    .iter()
                    .map(|value| (*value, group_order::SPECIFIC));
                let generic = CSS_GLOBAL_VALUES
                    .iter()
                    .map(|value| (*value, group_order::GENERIC));
                result.entries = specific
                    .chain(generic)
                    .map(|(value, order)| {
                        CompletionItem::new(value, CompletionItemKind::Value).with_sort_order(order)
                    })
                    .collect();
            }
            None => {
                result.entries = CSS_PROPERTIES
                    .iter()
                    .map(|property| {
                        CompletionItem::new(*property, CompletionItemKind::Property)
                            .with_sort_text(sort_priority::LOCATION_PRIORITY)
                            .with_insert_text(format!("{property}: "))
                    })
                    .collect();
            }
        }
        result
    }
}
