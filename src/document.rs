//! A document bound once and queried many times.

use caret_binder::{BinderState, ScopeTree};
use caret_checker::{InferenceOptions, MemberInfo, TypeInference};
use caret_common::position::{LineMap, Position};
use caret_lsp::{CompletionOptions, CompletionResult, Completions, Language, RecencyTracker};
use caret_parser::ParseError;
use caret_solver::TypeDescriptor;
use tracing::debug;

/// Source text with its line map and, for scripts, its scope tree.
///
/// Markup documents carry an empty scope tree. Editing the text means
/// building a new `Document`.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    language: Language,
    scopes: ScopeTree,
    line_map: LineMap,
    parse_errors: Vec<ParseError>,
}

impl Document {
    pub fn new(source: impl Into<String>, language: Language) -> Self {
        let source = source.into();
        let (scopes, parse_errors) = if language.is_script() {
            let mut binder = BinderState::new();
            binder.bind_source(&source);
            let errors = std::mem::take(&mut binder.parse_errors);
            (binder.into_scopes(), errors)
        } else {
            (ScopeTree::new(), Vec::new())
        };
        if !parse_errors.is_empty() {
            debug!(
                "[BIND] {} recovered parse errors in {} document",
                parse_errors.len(),
                language
            );
        }
        let line_map = LineMap::build(&source);
        Document {
            source,
            language,
            scopes,
            line_map,
            parse_errors,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// Syntax errors the recovering parser skipped over.
    pub fn parse_errors(&self) -> &[ParseError] {
        &self.parse_errors
    }

    /// UTF-16 length of the text.
    pub fn len(&self) -> u32 {
        self.line_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn offset_at(&self, position: Position) -> Option<u32> {
        self.line_map.position_to_offset(position)
    }

    pub fn completions(
        &self,
        offset: u32,
        options: &CompletionOptions,
        recency: Option<&RecencyTracker>,
    ) -> CompletionResult {
        let mut completions =
            Completions::new(&self.scopes, &self.line_map, &self.source, self.language)
                .with_options(options.clone());
        if let Some(recency) = recency {
            completions = completions.with_recency(recency);
        }
        completions.get_completions_at_offset(offset)
    }

    pub fn inference(&self, options: InferenceOptions) -> TypeInference<'_> {
        TypeInference::with_options(&self.scopes, &self.line_map, options)
    }

    /// Type of the access chain `expr` as seen from `offset`.
    pub fn type_of(&self, expr: &str, offset: u32, options: InferenceOptions) -> TypeDescriptor {
        self.inference(options).get_type_at_offset(expr, offset)
    }

    /// Members offered after `expr.` at `offset`.
    pub fn members_of(&self, expr: &str, offset: u32, options: InferenceOptions) -> Vec<MemberInfo> {
        let inference = self.inference(options);
        let ty = inference.get_type_at_offset(expr, offset);
        inference.get_members_of_type(&ty)
    }
}
