use caret_common::text::utf16_to_byte;
use caret_scanner::{ParseError, Scanner, TokenCategory, TokenKind, TokenStream, tokenize};

/// Rebuild the source from token values plus the gaps between tokens, and
/// check every gap is whitespace or a comment.
fn assert_reconcatenates(source: &str) {
    let tokens = tokenize(source);
    let mut rebuilt = String::new();
    let mut last_byte = 0usize;
    for token in &tokens {
        let start = utf16_to_byte(source, token.start);
        let end = utf16_to_byte(source, token.end);
        let gap = &source[last_byte..start];
        let trivia = Scanner::new(gap).with_comments(true).scan_all();
        assert!(
            trivia
                .iter()
                .all(|t| matches!(t.kind, TokenKind::Comment | TokenKind::EndOfFileToken)),
            "non-trivia gap {gap:?} before {token:?} in {source:?}"
        );
        assert_eq!(&source[start..end], token.value, "span/value mismatch in {source:?}");
        rebuilt.push_str(gap);
        rebuilt.push_str(&token.value);
        last_byte = end;
    }
    rebuilt.push_str(&source[last_byte..]);
    assert_eq!(rebuilt, source);
}

#[test]
fn test_token_values_reconcatenate() {
    for source in [
        "const user = { name: \"Alice\", age: 30 };",
        "a.b?.c[0](x, y) => z",
        "// leading comment\nlet x = `tpl ${a + `inner`}`; /* trailing */",
        "x >>>= 1; y **= 2; z ??= w",
        "'unterminated\nnext",
        "caf\u{e9}.length + '😀'.length",
        "@ # \u{feff} ~",
    ] {
        assert_reconcatenates(source);
    }
}

#[test]
fn test_keywords_and_identifiers() {
    let tokens = tokenize("this new typeof of get while foo");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ThisKeyword,
            TokenKind::NewKeyword,
            TokenKind::TypeofKeyword,
            TokenKind::OfKeyword,
            TokenKind::GetKeyword,
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::EndOfFileToken,
        ]
    );
    assert!(tokens[5].is_keyword("while"));
    assert_eq!(tokens[6].kind.category(), TokenCategory::Identifier);
}

#[test]
fn test_unknown_characters_do_not_stop_scanning() {
    let tokens = tokenize("a \u{feff} b");
    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[2].value, "b");
}

#[test]
fn test_offsets_are_utf16() {
    let tokens = tokenize("'😀'.length");
    assert_eq!(tokens[0].start, 0);
    assert_eq!(tokens[0].end, 4);
    assert_eq!(tokens[1].kind, TokenKind::DotToken);
    assert_eq!(tokens[1].start, 4);
    assert_eq!(tokens[2].start, 5);
    assert_eq!(tokens[2].end, 11);
}

#[test]
fn test_eof_token_is_single_and_positioned() {
    let tokens = tokenize("ab  ");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::EndOfFileToken);
    assert_eq!(tokens[1].start, 4);
}

#[test]
fn test_stream_lookahead_and_rewind() {
    let mut stream = TokenStream::new("(a, b) => a");
    assert!(stream.check(TokenKind::OpenParenToken));
    assert_eq!(stream.peek_nth(2).kind, TokenKind::CommaToken);

    let saved = stream.position();
    stream.next();
    assert!(stream.match_token(TokenKind::Identifier).is_some());
    assert!(stream.match_token(TokenKind::CloseParenToken).is_none());
    stream.reset(saved);
    assert!(stream.check(TokenKind::OpenParenToken));
    assert!(stream.previous().is_none());
}

#[test]
fn test_stream_next_sticks_at_eof() {
    let mut stream = TokenStream::new("x");
    assert_eq!(stream.next().kind, TokenKind::Identifier);
    assert!(stream.is_eof());
    assert_eq!(stream.next().kind, TokenKind::EndOfFileToken);
    assert_eq!(stream.next().kind, TokenKind::EndOfFileToken);
    assert_eq!(stream.previous().map(|t| t.kind), Some(TokenKind::Identifier));
}

#[test]
fn test_stream_check_any() {
    let stream = TokenStream::new("let x");
    assert!(stream.check_any(&[TokenKind::VarKeyword, TokenKind::LetKeyword]));
    assert!(!stream.check_any(&[TokenKind::ConstKeyword]));
}

#[test]
fn test_expect_reports_expected_and_found() {
    let mut stream = TokenStream::new("foo 1");
    assert!(stream.expect(TokenKind::Identifier).is_ok());
    let err = stream.expect(TokenKind::CloseParenToken).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: TokenKind::CloseParenToken,
            found: TokenKind::NumericLiteral,
            value: "1".to_string(),
            pos: 4,
        }
    );
    assert_eq!(err.pos(), 4);
    assert_eq!(err.expected(), Some(TokenKind::CloseParenToken));
    assert_eq!(err.to_string(), "expected ')' but found numeric literal '1' at offset 4");
}

#[test]
fn test_token_serializes_without_flags() {
    let tokens = tokenize("a");
    let json = serde_json::to_string(&tokens[0]).unwrap();
    assert_eq!(json, r#"{"kind":"Identifier","value":"a","start":0,"end":1}"#);
}
