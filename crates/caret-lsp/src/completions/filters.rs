//! Completion context and suppression filters.
//!
//! Lexical checks that decide whether a script position gets completions at
//! all. They re-scan the text before the cursor with comments preserved.

use super::*;
use caret_scanner::{Scanner, Token, TokenFlags, TokenKind};

impl<'a> Completions<'a> {
    /// Tokens that start before `offset`, comments included.
    fn tokens_before(&self, offset: u32) -> Vec<Token> {
        let mut scanner = Scanner::new(self.source_text).with_comments(true);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.scan();
            if token.kind == TokenKind::EndOfFileToken || token.start >= offset {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    /// Check if the cursor is inside a string literal, template literal,
    /// comment, or right after a numeric literal (`1.` is a number, not a
    /// member access).
    pub(super) fn is_in_no_completion_context(&self, offset: u32) -> bool {
        let Some(last) = self.tokens_before(offset).pop() else {
            return false;
        };
        match last.kind {
            TokenKind::StringLiteral | TokenKind::TemplateLiteral => {
                offset < last.end
                    || (offset == last.end && last.flags.contains(TokenFlags::UNTERMINATED))
            }
            TokenKind::Comment => {
                offset < last.end
                    || (offset == last.end
                        && (last.value.starts_with("//")
                            || last.flags.contains(TokenFlags::UNTERMINATED)))
            }
            TokenKind::NumericLiteral => offset == last.end,
            _ => false,
        }
    }

    /// Check if the word at `prefix_start` names a new declaration
    /// (`const |`, `function na|`, `class |`).
    pub(super) fn is_at_definition_location(&self, prefix_start: u32) -> bool {
        let tokens = self.tokens_before(prefix_start);
        let previous = tokens
            .iter()
            .rev()
            .find(|token| token.kind != TokenKind::Comment);
        previous.is_some_and(|token| {
            matches!(
                token.kind,
                TokenKind::VarKeyword
                    | TokenKind::LetKeyword
                    | TokenKind::ConstKeyword
                    | TokenKind::FunctionKeyword
                    | TokenKind::ClassKeyword
            )
        })
    }
}
