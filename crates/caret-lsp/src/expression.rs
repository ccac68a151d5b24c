//! Extraction of the access chain in front of the cursor.

use caret_common::limits::MAX_EXPRESSION_SCAN;
use caret_common::text::utf16_to_byte;
use caret_scanner::is_identifier_part;

/// Text of the access chain that ends at the UTF-16 `offset`, e.g.
/// `user.getName().` for `return user.getName().|`. Bracketed groups
/// (call arguments, index expressions) and a leading string literal are kept
/// whole; a leading `new` is included. At most `MAX_EXPRESSION_SCAN`
/// characters are looked at.
pub fn expression_before(text: &str, offset: u32) -> String {
    let end = utf16_to_byte(text, offset);
    let mut window: Vec<char> = text[..end].chars().rev().take(MAX_EXPRESSION_SCAN).collect();
    window.reverse();
    let chars = window;

    let mut i = chars.len();
    while i > 0 {
        let ch = chars[i - 1];
        if is_identifier_part(ch) || ch == '.' {
            i -= 1;
            continue;
        }
        if ch == '?' && chars.get(i) == Some(&'.') {
            i -= 1;
            continue;
        }
        if ch == ')' || ch == ']' {
            match matching_open(&chars, i - 1) {
                Some(open) => {
                    i = open;
                    continue;
                }
                None => break,
            }
        }
        if is_quote(ch)
            && let Some(open) = string_start(&chars, i - 1)
        {
            i = open;
        }
        break;
    }

    // `...items.` is a spread of `items.`
    while i < chars.len() && matches!(chars[i], '.' | '?') {
        i += 1;
    }
    let start = include_new_keyword(&chars, i);
    chars[start..].iter().collect()
}

/// Start of `new ` directly before `start`, or `start` itself.
fn include_new_keyword(chars: &[char], start: usize) -> usize {
    if start == 0 || !chars.get(start).is_some_and(|c| is_identifier_part(*c)) {
        return start;
    }
    let mut i = start;
    while i > 0 && chars[i - 1].is_whitespace() {
        i -= 1;
    }
    if i == start || i < 3 || chars[i - 3..i] != ['n', 'e', 'w'] {
        return start;
    }
    let keyword_start = i - 3;
    if keyword_start > 0 && is_identifier_part(chars[keyword_start - 1]) {
        return start;
    }
    keyword_start
}

fn is_quote(ch: char) -> bool {
    matches!(ch, '\'' | '"' | '`')
}

/// Opening quote of the string whose closing quote is at `close`.
fn string_start(chars: &[char], close: usize) -> Option<usize> {
    let quote = chars[close];
    let mut j = close;
    while j > 0 {
        j -= 1;
        if chars[j] == quote && !is_escaped(chars, j) {
            return Some(j);
        }
    }
    None
}

/// Odd number of backslashes in front of `index`.
fn is_escaped(chars: &[char], index: usize) -> bool {
    chars[..index]
        .iter()
        .rev()
        .take_while(|c| **c == '\\')
        .count()
        % 2
        == 1
}

/// Opening bracket matching the closing one at `close`, skipping strings.
fn matching_open(chars: &[char], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = close + 1;
    while j > 0 {
        j -= 1;
        let ch = chars[j];
        if is_quote(ch) {
            j = string_start(chars, j)?;
            continue;
        }
        match ch {
            ')' | ']' | '}' => depth += 1,
            '(' | '[' | '{' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/expression_tests.rs"]
mod expression_tests;
