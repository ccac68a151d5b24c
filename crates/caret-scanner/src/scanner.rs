//! Scanner - converts source text into tokens.
//!
//! The scanner walks the source by byte index while keeping a parallel UTF-16
//! offset, so token spans agree with editor offsets even for non-ASCII text.
//! It never fails: a character that starts no token becomes a single-character
//! `Unknown` token and scanning continues after it.

use crate::token::{
    PUNCTUATION_1, PUNCTUATION_2, PUNCTUATION_3, PUNCTUATION_4, Token, TokenFlags, TokenKind,
    keyword_kind,
};
use caret_common::text::byte_to_utf16;
use memchr::{memchr, memmem};

/// Tokenizer state machine over a single source string.
pub struct Scanner<'a> {
    source: &'a str,
    /// Current byte position
    pos: usize,
    /// Current position in UTF-16 code units
    utf16_pos: u32,
    /// Emit `Comment` tokens instead of skipping comments
    preserve_comments: bool,
    /// A line terminator was skipped since the previous token
    saw_line_break: bool,
    /// Brace depth of the last template literal that ran into end of input
    open_template_depth: Option<u32>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            pos: 0,
            utf16_pos: 0,
            preserve_comments: false,
            saw_line_break: false,
            open_template_depth: None,
        }
    }

    /// Emit comments as `Comment` tokens (used by syntax highlighting).
    pub fn with_comments(mut self, preserve: bool) -> Self {
        self.preserve_comments = preserve;
        self
    }

    /// Move the scanner to a byte position inside the source.
    pub fn seek(&mut self, byte_pos: usize) {
        let byte_pos = byte_pos.min(self.source.len());
        self.pos = byte_pos;
        self.utf16_pos = byte_to_utf16(self.source, byte_pos);
        self.saw_line_break = false;
    }

    /// Current byte position.
    pub fn byte_pos(&self) -> usize {
        self.pos
    }

    /// Brace depth left open by the last unterminated template literal.
    pub fn open_template_depth(&self) -> Option<u32> {
        self.open_template_depth
    }

    /// Scan every token, ending with a single `EndOfFileToken`.
    pub fn scan_all(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan();
            let done = token.kind == TokenKind::EndOfFileToken;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// Scan and return the next token.
    pub fn scan(&mut self) -> Token {
        self.saw_line_break = false;
        loop {
            self.skip_whitespace();
            if !self.preserve_comments && self.skip_comment() {
                continue;
            }
            break;
        }

        let start_byte = self.pos;
        let start = self.utf16_pos;
        let Some(ch) = self.peek_char() else {
            let mut token = Token::new(TokenKind::EndOfFileToken, "", start, start);
            self.apply_line_break(&mut token);
            return token;
        };

        let mut flags = TokenFlags::empty();
        let kind = match ch {
            '/' if self.preserve_comments && self.at_comment_start() => {
                if !self.scan_comment() {
                    flags |= TokenFlags::UNTERMINATED;
                }
                TokenKind::Comment
            }
            '\'' | '"' => {
                if !self.scan_string(ch) {
                    flags |= TokenFlags::UNTERMINATED;
                }
                TokenKind::StringLiteral
            }
            '`' => {
                self.bump();
                self.open_template_depth = self.skip_template_body(0);
                if self.open_template_depth.is_some() {
                    flags |= TokenFlags::UNTERMINATED;
                }
                TokenKind::TemplateLiteral
            }
            c if c.is_ascii_digit() => {
                self.scan_number();
                TokenKind::NumericLiteral
            }
            '.' if self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number();
                TokenKind::NumericLiteral
            }
            c if is_identifier_start(c) => {
                self.scan_identifier();
                let text = &self.source[start_byte..self.pos];
                keyword_kind(text).unwrap_or(TokenKind::Identifier)
            }
            _ => match self.scan_punctuation() {
                Some(kind) => kind,
                None => {
                    self.bump();
                    TokenKind::Unknown
                }
            },
        };

        let mut token = Token::new(kind, &self.source[start_byte..self.pos], start, self.utf16_pos);
        token.flags |= flags;
        self.apply_line_break(&mut token);
        token
    }

    fn apply_line_break(&self, token: &mut Token) {
        if self.saw_line_break {
            token.flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
    }

    // =========================================================================
    // Character access
    // =========================================================================

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_char_at(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Advance one character.
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        self.utf16_pos += ch.len_utf16() as u32;
        Some(ch)
    }

    /// Advance over `len` bytes that are known to sit on char boundaries.
    fn bump_bytes(&mut self, len: usize) {
        let end = (self.pos + len).min(self.source.len());
        let skipped = &self.source[self.pos..end];
        self.utf16_pos += skipped.chars().map(|c| c.len_utf16() as u32).sum::<u32>();
        if !self.saw_line_break && skipped.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
            self.saw_line_break = true;
        }
        self.pos = end;
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            if is_line_terminator(ch) {
                self.saw_line_break = true;
            }
            self.bump();
        }
    }

    fn at_comment_start(&self) -> bool {
        let rest = self.rest();
        rest.starts_with("//") || rest.starts_with("/*")
    }

    /// Skip one comment if the cursor is at one.
    fn skip_comment(&mut self) -> bool {
        if !self.at_comment_start() {
            return false;
        }
        self.scan_comment();
        true
    }

    /// Advance over a comment starting at the cursor.
    /// Returns false for a block comment that is never closed.
    fn scan_comment(&mut self) -> bool {
        let rest = self.rest().as_bytes();
        if rest.starts_with(b"//") {
            let len = memchr(b'\n', rest).unwrap_or(rest.len());
            // Leave the terminator for skip_whitespace so the line break is recorded.
            let len = if len > 0 && rest[len - 1] == b'\r' && len < rest.len() {
                len - 1
            } else {
                len
            };
            self.bump_bytes(len);
            return true;
        }
        match memmem::find(&rest[2..], b"*/") {
            Some(idx) => {
                self.bump_bytes(idx + 4);
                true
            }
            None => {
                self.bump_bytes(rest.len());
                false
            }
        }
    }

    // =========================================================================
    // Literals
    // =========================================================================

    /// Scan a quoted string. Returns false when the closing quote is missing
    /// before the end of the line or input.
    fn scan_string(&mut self, quote: char) -> bool {
        self.bump();
        while let Some(ch) = self.peek_char() {
            match ch {
                '\\' => {
                    self.bump();
                    // Escaped line continuation is part of the string.
                    self.bump();
                }
                c if c == quote => {
                    self.bump();
                    return true;
                }
                c if is_line_terminator(c) => return false,
                _ => {
                    self.bump();
                }
            }
        }
        false
    }

    /// Skip the body of a template literal after its opening backtick (or
    /// from inside an interpolation at `depth`).
    ///
    /// `${` opens an interpolation and plain braces nest inside it; the
    /// interpolation's contents are not tokenized. Returns `None` once the
    /// closing backtick has been consumed, or `Some(depth)` if input ran out.
    pub(crate) fn skip_template_body(&mut self, mut depth: u32) -> Option<u32> {
        while let Some(ch) = self.peek_char() {
            match ch {
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '$' if self.peek_char_at(1) == Some('{') => {
                    self.bump();
                    self.bump();
                    depth += 1;
                }
                '{' if depth > 0 => {
                    self.bump();
                    depth += 1;
                }
                '}' if depth > 0 => {
                    self.bump();
                    depth -= 1;
                }
                '`' if depth == 0 => {
                    self.bump();
                    return None;
                }
                _ => {
                    self.bump();
                }
            }
        }
        Some(depth)
    }

    fn scan_number(&mut self) {
        let rest = self.rest().as_bytes();
        if rest.len() > 1 && rest[0] == b'0' {
            let radix_digits: Option<fn(char) -> bool> = match rest[1] {
                b'x' | b'X' => Some(|c: char| c.is_ascii_hexdigit()),
                b'o' | b'O' => Some(|c: char| ('0'..='7').contains(&c)),
                b'b' | b'B' => Some(|c: char| c == '0' || c == '1'),
                _ => None,
            };
            if let Some(is_digit) = radix_digits {
                self.bump();
                self.bump();
                self.eat_while(|c| is_digit(c) || c == '_');
                self.eat_bigint_suffix();
                return;
            }
        }

        self.eat_while(|c| c.is_ascii_digit() || c == '_');
        if self.peek_char() == Some('.') {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let after = self.peek_char_at(1);
            let exponent_digit = match after {
                Some('+' | '-') => self.peek_char_at(2).is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exponent_digit {
                self.bump();
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_while(|c| c.is_ascii_digit() || c == '_');
            }
        }
        self.eat_bigint_suffix();
    }

    fn eat_bigint_suffix(&mut self) {
        if self.peek_char() == Some('n') {
            self.bump();
        }
    }

    fn scan_identifier(&mut self) {
        self.bump();
        self.eat_while(is_identifier_part);
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
    }

    /// Longest-match punctuation: four, three, two, then one character.
    fn scan_punctuation(&mut self) -> Option<TokenKind> {
        let rest = self.rest();
        for table in [PUNCTUATION_4, PUNCTUATION_3, PUNCTUATION_2, PUNCTUATION_1] {
            if let Some(&(text, kind)) = table.iter().find(|(text, _)| rest.starts_with(text)) {
                // `a?.5:b` is a conditional, not optional chaining.
                if kind == TokenKind::QuestionDotToken
                    && rest[2..].starts_with(|c: char| c.is_ascii_digit())
                {
                    self.bump();
                    return Some(TokenKind::QuestionToken);
                }
                self.bump_bytes(text.len());
                return Some(kind);
            }
        }
        None
    }
}

/// Tokenize a whole string, comments skipped, ending with `EndOfFileToken`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).scan_all()
}

/// Cooked value of a string literal token's raw text.
///
/// Strips the surrounding quotes and resolves `\n \t \r \\ \' \"` (plus `\0`,
/// `\b`, `\f`, `\v`, `\xHH` and `\u{...}`/`\uHHHH`). Unknown escapes keep the
/// escaped character. An unterminated literal yields everything after the
/// opening quote.
pub fn unescape_string(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let body = chars.as_str();
    let body = body.strip_suffix(quote).unwrap_or(body);

    let mut out = String::with_capacity(body.len());
    let mut iter = body.chars().peekable();
    while let Some(ch) = iter.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(esc) = iter.next() else {
            break;
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            'x' => {
                let hex: String = iter.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => out.push_str(&hex),
                }
            }
            'u' => {
                let hex: String = if iter.peek() == Some(&'{') {
                    iter.next();
                    iter.by_ref().take_while(|&c| c != '}').collect()
                } else {
                    iter.by_ref().take(4).collect()
                };
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => out.push_str(&hex),
                }
            }
            // Line continuation
            '\n' => {}
            '\r' => {
                if iter.peek() == Some(&'\n') {
                    iter.next();
                }
            }
            other => out.push(other),
        }
    }
    out
}

pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

pub fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric() || ch == '\u{200c}' || ch == '\u{200d}'
}

pub(crate) fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
#[path = "tests/scanner_unit_tests.rs"]
mod scanner_unit_tests;
