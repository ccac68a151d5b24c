//! Per-line incremental tokenization for syntax highlighting.
//!
//! Editors re-highlight one line at a time. The only lexical state that
//! crosses a line boundary is an open block comment or an open template
//! literal, so that is all [`LineState`] carries.

use crate::scanner::Scanner;
use crate::token::{TokenCategory, TokenKind};
use caret_common::text::byte_to_utf16;
use memchr::memmem;
use serde::Serialize;

/// Lexical state at the start of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LineState {
    #[default]
    Normal,
    InBlockComment,
    /// Inside a template literal; `depth` counts open `${` / `{` braces.
    InTemplate { depth: u32 },
}

/// A classified span of one line, offsets in UTF-16 code units from the
/// start of the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightToken {
    pub category: TokenCategory,
    pub kind: TokenKind,
    pub start: u32,
    pub end: u32,
}

/// Tokenize one line given the state left by the previous line.
///
/// Returns the line's tokens (comments included, end-of-file excluded) and
/// the state to pass to the next line.
pub fn highlight_line(line: &str, state: LineState) -> (Vec<HighlightToken>, LineState) {
    let mut tokens = Vec::new();
    let mut scanner = Scanner::new(line).with_comments(true);

    match state {
        LineState::Normal => {}
        LineState::InBlockComment => match memmem::find(line.as_bytes(), b"*/") {
            Some(idx) => {
                let end_byte = idx + 2;
                tokens.push(span_token(TokenKind::Comment, 0, byte_to_utf16(line, end_byte)));
                scanner.seek(end_byte);
            }
            None => {
                if !line.is_empty() {
                    tokens.push(span_token(TokenKind::Comment, 0, byte_to_utf16(line, line.len())));
                }
                return (tokens, LineState::InBlockComment);
            }
        },
        LineState::InTemplate { depth } => {
            let still_open = scanner.skip_template_body(depth);
            let end = byte_to_utf16(line, scanner.byte_pos());
            if end > 0 {
                tokens.push(span_token(TokenKind::TemplateLiteral, 0, end));
            }
            if let Some(depth) = still_open {
                return (tokens, LineState::InTemplate { depth });
            }
        }
    }

    let mut next_state = LineState::Normal;
    loop {
        let token = scanner.scan();
        if token.kind == TokenKind::EndOfFileToken {
            break;
        }
        if token.is_unterminated() {
            match token.kind {
                TokenKind::Comment => next_state = LineState::InBlockComment,
                TokenKind::TemplateLiteral => {
                    if let Some(depth) = scanner.open_template_depth() {
                        next_state = LineState::InTemplate { depth };
                    }
                }
                _ => {}
            }
        }
        tokens.push(HighlightToken {
            category: token.kind.category(),
            kind: token.kind,
            start: token.start,
            end: token.end,
        });
    }

    (tokens, next_state)
}

fn span_token(kind: TokenKind, start: u32, end: u32) -> HighlightToken {
    HighlightToken {
        category: kind.category(),
        kind,
        start,
        end,
    }
}
