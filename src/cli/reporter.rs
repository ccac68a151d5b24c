use colored::Colorize;
use std::fmt::Write;

use caret_binder::{ScopeId, ScopeTree};
use caret_checker::MemberInfo;
use caret_lsp::{CompletionItem, CompletionItemKind, CompletionResult};
use caret_scanner::{HighlightToken, Token};
use caret_solver::TypeDescriptor;

/// Text rendering for the CLI subcommands.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render_tokens(&self, tokens: &[Token]) -> String {
        let mut out = String::new();
        for token in tokens {
            let range = format!("{}..{}", token.start, token.end);
            let _ = writeln!(
                out,
                "{:>9}  {:<24} {}",
                self.dim(&range),
                token.kind.to_string(),
                token.value
            );
        }
        out
    }

    pub fn render_highlight(&self, lines: &[Vec<HighlightToken>]) -> String {
        let mut out = String::new();
        for (number, tokens) in lines.iter().enumerate() {
            let spans: Vec<String> = tokens
                .iter()
                .map(|t| format!("{:?}[{}..{}]", t.category, t.start, t.end))
                .collect();
            let line_number = (number + 1).to_string();
            let _ = writeln!(out, "{:>4}  {}", self.dim(&line_number), spans.join(" "));
        }
        out
    }

    pub fn render_scopes(&self, tree: &ScopeTree) -> String {
        let mut out = String::new();
        self.render_scope(tree, ScopeTree::ROOT, 0, &mut out);
        out
    }

    fn render_scope(&self, tree: &ScopeTree, id: ScopeId, indent: usize, out: &mut String) {
        let Some(scope) = tree.get(id) else {
            return;
        };
        let pad = "  ".repeat(indent);
        let mut header = format!("{:?} [{}, {})", scope.kind, scope.start, scope.end);
        if let Some(class) = &scope.class_symbol {
            header.push_str(&format!(" class {}", class.name));
        }
        if let Some(function) = &scope.function_symbol {
            header.push_str(&format!(" fn {}", function.name));
        }
        let _ = writeln!(out, "{pad}{}", self.bold(&header));
        for symbol in scope.symbols.values() {
            let _ = writeln!(
                out,
                "{pad}  {} {:?}: {}",
                self.name(&symbol.name),
                symbol.kind,
                symbol.type_or_unknown()
            );
        }
        for child in &scope.children {
            self.render_scope(tree, *child, indent + 1, out);
        }
    }

    pub fn render_type(&self, ty: &TypeDescriptor, members: Option<&[MemberInfo]>) -> String {
        let mut out = format!("{ty}\n");
        for member in members.unwrap_or_default() {
            let marker = if member.is_unknown { " ?" } else { "" };
            let _ = writeln!(
                out,
                "  {} {:?}: {}{}",
                self.name(&member.label),
                member.kind,
                member.type_info,
                marker
            );
        }
        out
    }

    pub fn render_completions(&self, result: &CompletionResult) -> String {
        let mut out = String::new();
        let context = if result.is_member_completion {
            "member"
        } else if result.is_new_identifier_location {
            "new identifier"
        } else if result.is_global_completion {
            "global"
        } else {
            "none"
        };
        let _ = writeln!(
            out,
            "{}",
            self.dim(&format!(
                "{} {} completion, prefix '{}', {} entries",
                result.language,
                context,
                result.prefix,
                result.entries.len()
            ))
        );
        for item in &result.entries {
            let _ = writeln!(out, "{}", self.render_item(item));
        }
        out
    }

    fn render_item(&self, item: &CompletionItem) -> String {
        let mut line = format!("{:<10} {}", kind_label(item.kind), self.name(&item.label));
        if let Some(detail) = &item.detail {
            line.push_str(&format!(": {detail}"));
        }
        if let Some(insert) = &item.insert_text
            && insert != &item.label
        {
            line.push_str(&format!("  => {}", self.dim(insert)));
        }
        if item.is_unknown {
            line.push_str(" ?");
        }
        line
    }

    fn name(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn kind_label(kind: CompletionItemKind) -> &'static str {
    match kind {
        CompletionItemKind::Variable => "variable",
        CompletionItemKind::Function => "function",
        CompletionItemKind::Class => "class",
        CompletionItemKind::Method => "method",
        CompletionItemKind::Parameter => "parameter",
        CompletionItemKind::Property => "property",
        CompletionItemKind::Keyword => "keyword",
        CompletionItemKind::Tag => "tag",
        CompletionItemKind::Attribute => "attribute",
        CompletionItemKind::Value => "value",
    }
}
