//! Prefix matching and collation.

use crate::options::CompletionOptions;
use std::cmp::Ordering;

/// Longest label tried for camel-case matching.
const MAX_CAMEL_CASE_LABEL: usize = 128;

/// How a label matched the typed prefix; earlier variants rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Starts with the prefix exactly (an empty prefix matches everything
    /// here)
    CaseSensitivePrefix,
    /// Starts with the prefix ignoring case
    Prefix,
    /// The prefix picks out word starts: `gEBI` for `getElementById`
    CamelCase,
}

/// Tier at which `label` matches `prefix`, `None` when it does not match.
pub fn match_tier(label: &str, prefix: &str, options: &CompletionOptions) -> Option<MatchTier> {
    if prefix.is_empty() || label.starts_with(prefix) {
        return Some(MatchTier::CaseSensitivePrefix);
    }
    if !options.case_sensitive && starts_with_ignore_case(label, prefix) {
        return Some(MatchTier::Prefix);
    }
    if options.camel_case_matching && camel_case_match(prefix, label, options.case_sensitive) {
        return Some(MatchTier::CamelCase);
    }
    None
}

fn starts_with_ignore_case(label: &str, prefix: &str) -> bool {
    let mut label_chars = label.chars();
    prefix.chars().all(|p| {
        label_chars
            .next()
            .is_some_and(|l| l.to_lowercase().eq(p.to_lowercase()))
    })
}

/// Each pattern character either continues the current word of `label` or
/// starts a later word. The first character must match the label's first.
pub fn camel_case_match(pattern: &str, label: &str, case_sensitive: bool) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let label: Vec<char> = label.chars().collect();
    if pattern.is_empty() || label.len() > MAX_CAMEL_CASE_LABEL {
        return pattern.is_empty();
    }
    let eq = |a: char, b: char| {
        if case_sensitive {
            a == b
        } else {
            a.to_lowercase().eq(b.to_lowercase())
        }
    };
    if label.is_empty() || pattern.len() > label.len() || !eq(pattern[0], label[0]) {
        return false;
    }
    let mut matcher = CamelCaseMatcher {
        pattern: &pattern,
        label: &label,
        eq: &eq,
        memo: vec![None; pattern.len() * (label.len() + 1)],
    };
    matcher.matches(1, 1)
}

/// Backtracking matcher with one memo slot per (pattern index, label index);
/// each pair is decided once.
struct CamelCaseMatcher<'a> {
    pattern: &'a [char],
    label: &'a [char],
    eq: &'a dyn Fn(char, char) -> bool,
    memo: Vec<Option<bool>>,
}

impl CamelCaseMatcher<'_> {
    /// `pattern[p..]` matches `label` with the current word at `at`.
    fn matches(&mut self, p: usize, at: usize) -> bool {
        let Some(&wanted) = self.pattern.get(p) else {
            return true;
        };
        let slot = p * (self.label.len() + 1) + at;
        if let Some(known) = self.memo[slot] {
            return known;
        }
        let continues_word =
            at < self.label.len() && (self.eq)(wanted, self.label[at]) && self.matches(p + 1, at + 1);
        let found = continues_word
            || (at + 1..self.label.len()).any(|j| {
                is_word_start(self.label, j)
                    && (self.eq)(wanted, self.label[j])
                    && self.matches(p + 1, j + 1)
            });
        self.memo[slot] = Some(found);
        found
    }
}

/// `getElement`: `E` starts a word. So does anything after `_`, `-` or `$`,
/// and the first digit of a run.
fn is_word_start(label: &[char], index: usize) -> bool {
    let Some(&current) = label.get(index) else {
        return false;
    };
    let Some(&previous) = index.checked_sub(1).and_then(|i| label.get(i)) else {
        return true;
    };
    if matches!(previous, '_' | '-' | '$') {
        return current != previous;
    }
    (current.is_uppercase() && !previous.is_uppercase())
        || (current.is_ascii_digit() && !previous.is_ascii_digit())
}

/// Case-insensitive comparison with numeric runs compared by value; when
/// that ties, the shorter string first, then lower case before upper case at
/// the first difference.
pub fn compare_case_sensitive_ui(a: &str, b: &str) -> Ordering {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut ai = 0;
    let mut bi = 0;
    let mut case_diff: Option<Ordering> = None;
    while ai < a_chars.len() && bi < b_chars.len() {
        let ac = a_chars[ai];
        let bc = b_chars[bi];

        if ac.is_ascii_digit() && bc.is_ascii_digit() {
            let a_start = ai;
            while ai < a_chars.len() && a_chars[ai].is_ascii_digit() {
                ai += 1;
            }
            let b_start = bi;
            while bi < b_chars.len() && b_chars[bi].is_ascii_digit() {
                bi += 1;
            }
            let a_num = numeric_value(&a_chars[a_start..ai]);
            let b_num = numeric_value(&b_chars[b_start..bi]);
            if a_num != b_num {
                return a_num.cmp(&b_num);
            }
            continue;
        }

        let al = ac.to_ascii_lowercase();
        let bl = bc.to_ascii_lowercase();
        if al != bl {
            return al.cmp(&bl);
        }
        if case_diff.is_none() && ac != bc {
            if ac.is_lowercase() && bc.is_uppercase() {
                case_diff = Some(Ordering::Less);
            } else if ac.is_uppercase() && bc.is_lowercase() {
                case_diff = Some(Ordering::Greater);
            }
        }
        ai += 1;
        bi += 1;
    }

    if ai < a_chars.len() {
        return Ordering::Greater;
    }
    if bi < b_chars.len() {
        return Ordering::Less;
    }
    case_diff.unwrap_or(Ordering::Equal)
}

/// Saturates instead of overflowing on absurdly long digit runs.
fn numeric_value(digits: &[char]) -> u64 {
    digits.iter().fold(0u64, |acc, d| {
        acc.saturating_mul(10)
            .saturating_add(d.to_digit(10).map_or(0, u64::from))
    })
}
