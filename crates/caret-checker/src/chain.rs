//! Access-chain splitting.
//!
//! Turns the text in front of the cursor (`user.profile.getName().`) into a
//! head expression and a list of steps, without needing the text to parse.
//! Call arguments are dropped first, so `a.b(x.y, z).c` becomes
//! `a.b().c`, and a trailing `.` or `?.` (the member being completed) is
//! ignored.

use caret_common::limits::MAX_CHAIN_SEGMENTS;
use caret_scanner::scanner::{is_identifier_part, is_identifier_start};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainSegment {
    /// `.name`, `called` when directly followed by `()`
    Member { name: String, called: bool },
    /// `[text]`
    Index(String),
    /// `()` applied to the head or to a previous call result
    Call,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessChain {
    /// First part of the chain: an identifier, `this`, a literal, or
    /// `new X()`
    pub head: String,
    pub segments: Vec<ChainSegment>,
}

impl AccessChain {
    /// Head is a plain identifier (or `this`).
    pub fn head_is_identifier(&self) -> bool {
        is_identifier(&self.head)
    }
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part)
}

/// Remove the contents of call-argument lists. A `(` counts as a call when it
/// follows an identifier character, `)` or `]`; grouping parentheses keep
/// their contents.
pub fn strip_call_arguments(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if is_quote(ch) {
            let end = skip_string(&chars, i);
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }
        let previous = out.trim_end().chars().last();
        let is_call = ch == '('
            && previous.is_some_and(|p| is_identifier_part(p) || p == ')' || p == ']');
        if !is_call {
            out.push(ch);
            i += 1;
            continue;
        }
        // Skip to the matching `)`, or to the end of unterminated input.
        let mut depth = 0usize;
        let mut j = i;
        while j < chars.len() {
            let c = chars[j];
            if is_quote(c) {
                j = skip_string(&chars, j);
                continue;
            }
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            j += 1;
        }
        out.push_str("()");
        i = j + 1;
    }
    out
}

fn is_quote(ch: char) -> bool {
    matches!(ch, '\'' | '"' | '`')
}

/// Index just past the string starting at `start`, or the end of input.
fn skip_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

/// Split `expr` into a head and steps. `None` when there is no head or the
/// chain is longer than `MAX_CHAIN_SEGMENTS`.
pub fn split_access_chain(expr: &str) -> Option<AccessChain> {
    let stripped = strip_call_arguments(expr.trim());
    let text = stripped
        .strip_suffix("?.")
        .or_else(|| stripped.strip_suffix('.'))
        .unwrap_or(&stripped)
        .trim_end();
    let chars: Vec<char> = text.chars().collect();

    let (head, mut i) = split_head(&chars);
    let head = head.trim().to_string();
    if head.is_empty() {
        return None;
    }

    let mut segments = Vec::new();
    // Calls written directly on the head: `make()`, `make()()`
    let mut head_text = head.as_str();
    let mut head_calls = 0;
    if !head_text.starts_with("new ") {
        while let Some(rest) = head_text.strip_suffix("()") {
            if rest.trim().is_empty() {
                break;
            }
            head_text = rest.trim_end();
            head_calls += 1;
        }
    }
    segments.extend(std::iter::repeat_n(ChainSegment::Call, head_calls));
    let head = head_text.to_string();

    while i < chars.len() {
        match chars[i] {
            '.' => {
                i += 1;
                let start = i;
                while i < chars.len() && is_identifier_part(chars[i]) {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                if name.is_empty() {
                    return None;
                }
                let mut calls = 0usize;
                while chars.get(i) == Some(&'(') && chars.get(i + 1) == Some(&')') {
                    i += 2;
                    calls += 1;
                }
                segments.push(ChainSegment::Member {
                    name,
                    called: calls > 0,
                });
                segments.extend(std::iter::repeat_n(
                    ChainSegment::Call,
                    calls.saturating_sub(1),
                ));
            }
            '?' if chars.get(i + 1) == Some(&'.') => {
                // `?.name` reads like `.name`; `?.[x]` like `[x]`
                i += 1;
                if chars.get(i + 1) == Some(&'[') {
                    i += 1;
                }
            }
            '[' => {
                let end = matching_bracket(&chars, i)?;
                let inner: String = chars[i + 1..end].iter().collect();
                segments.push(ChainSegment::Index(inner.trim().to_string()));
                i = end + 1;
            }
            '(' if chars.get(i + 1) == Some(&')') => {
                segments.push(ChainSegment::Call);
                i += 2;
            }
            c if c.is_whitespace() => i += 1,
            _ => return None,
        }
        if segments.len() > MAX_CHAIN_SEGMENTS {
            return None;
        }
    }

    Some(AccessChain { head, segments })
}

/// The head runs to the first `.`, `?.` or `[` outside brackets and strings.
/// A `.` between digits belongs to a numeric head (`1.5.toFixed`).
fn split_head(chars: &[char]) -> (String, usize) {
    let mut depth = 0usize;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if is_quote(ch) {
            i = skip_string(chars, i);
            continue;
        }
        match ch {
            '(' | '{' => depth += 1,
            '[' if depth == 0 && i > 0 => break,
            '[' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                let numeric = i > 0
                    && chars[..i].iter().all(|c| c.is_ascii_digit())
                    && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());
                if !numeric {
                    break;
                }
            }
            '?' if depth == 0 && chars.get(i + 1) == Some(&'.') => break,
            _ => {}
        }
        i += 1;
    }
    (chars[..i].iter().collect(), i)
}

fn matching_bracket(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        let ch = chars[i];
        if is_quote(ch) {
            i = skip_string(chars, i);
            continue;
        }
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
#[path = "tests/chain_tests.rs"]
mod chain_tests;
