use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_longest_match_punctuation() {
    assert_eq!(
        kinds("a >>>= b"),
        vec![
            TokenKind::Identifier,
            TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            TokenKind::Identifier,
            TokenKind::EndOfFileToken,
        ]
    );
    assert_eq!(
        kinds("a ?? b?.c"),
        vec![
            TokenKind::Identifier,
            TokenKind::QuestionQuestionToken,
            TokenKind::Identifier,
            TokenKind::QuestionDotToken,
            TokenKind::Identifier,
            TokenKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_question_dot_before_digit_is_conditional() {
    assert_eq!(
        kinds("a?.5:b"),
        vec![
            TokenKind::Identifier,
            TokenKind::QuestionToken,
            TokenKind::NumericLiteral,
            TokenKind::ColonToken,
            TokenKind::Identifier,
            TokenKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_number_forms() {
    for source in ["42", "3.14", ".5", "1e10", "2.5E-3", "0xFF", "0o17", "0b1010", "10n", "1_000"] {
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 2, "expected one token for {source:?}: {tokens:?}");
        assert_eq!(tokens[0].kind, TokenKind::NumericLiteral, "{source:?}");
        assert_eq!(tokens[0].value, source);
    }
}

#[test]
fn test_line_break_flag() {
    let tokens = tokenize("a\nb c");
    assert!(!tokens[0].has_preceding_line_break());
    assert!(tokens[1].has_preceding_line_break());
    assert!(!tokens[2].has_preceding_line_break());
}

#[test]
fn test_line_break_inside_block_comment_sets_flag() {
    let tokens = tokenize("a /* x\n y */ b");
    assert_eq!(tokens[1].value, "b");
    assert!(tokens[1].has_preceding_line_break());
}

#[test]
fn test_unterminated_string_stops_at_line_end() {
    let tokens = tokenize("'abc\nx");
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "'abc");
    assert!(tokens[0].is_unterminated());
    assert_eq!(tokens[1].value, "x");
}

#[test]
fn test_template_with_nested_braces() {
    let tokens = tokenize("`a ${ {b: 1}.b } c` + 1");
    assert_eq!(tokens[0].kind, TokenKind::TemplateLiteral);
    assert_eq!(tokens[0].value, "`a ${ {b: 1}.b } c`");
    assert_eq!(tokens[1].kind, TokenKind::PlusToken);
}

#[test]
fn test_seek_recomputes_utf16_offset() {
    let source = "'😀' x";
    let mut scanner = Scanner::new(source);
    // byte 7 is the `x` after the closing quote and space
    scanner.seek(7);
    let token = scanner.scan();
    assert_eq!(token.value, "x");
    assert_eq!(token.start, 5);
}

#[test]
fn test_unescape_common_escapes() {
    assert_eq!(unescape_string(r#"'a\nb\tc'"#), "a\nb\tc");
    assert_eq!(unescape_string(r#""say \"hi\"""#), "say \"hi\"");
    assert_eq!(unescape_string(r"'it\'s'"), "it's");
    assert_eq!(unescape_string(r"'back\\slash'"), "back\\slash");
}

#[test]
fn test_unescape_unicode_and_hex() {
    assert_eq!(unescape_string(r"'\x41B\u{43}'"), "ABC");
    assert_eq!(unescape_string(r"'\q'"), "q");
}

#[test]
fn test_unescape_unterminated() {
    assert_eq!(unescape_string("'abc"), "abc");
    assert_eq!(unescape_string(""), "");
}
