use caret_scanner::{HighlightToken, LineState, TokenCategory, TokenKind, highlight_line};

fn kinds(tokens: &[HighlightToken]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn test_plain_line() {
    let (tokens, state) = highlight_line("const x = 1; // done", LineState::Normal);
    assert_eq!(state, LineState::Normal);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::ConstKeyword,
            TokenKind::Identifier,
            TokenKind::EqualsToken,
            TokenKind::NumericLiteral,
            TokenKind::SemicolonToken,
            TokenKind::Comment,
        ]
    );
    assert_eq!(tokens[0].category, TokenCategory::Keyword);
    assert_eq!(tokens[5].category, TokenCategory::Trivia);
    assert_eq!((tokens[5].start, tokens[5].end), (13, 20));
}

#[test]
fn test_block_comment_spans_lines() {
    let (tokens, state) = highlight_line("let a; /* start", LineState::Normal);
    assert_eq!(state, LineState::InBlockComment);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Comment));

    let (tokens, state) = highlight_line("still comment", state);
    assert_eq!(state, LineState::InBlockComment);
    assert_eq!(tokens.len(), 1);
    assert_eq!((tokens[0].start, tokens[0].end), (0, 13));

    let (tokens, state) = highlight_line("end */ b", state);
    assert_eq!(state, LineState::Normal);
    assert_eq!(kinds(&tokens), vec![TokenKind::Comment, TokenKind::Identifier]);
    assert_eq!((tokens[0].start, tokens[0].end), (0, 6));
    assert_eq!(tokens[1].start, 7);
}

#[test]
fn test_template_spans_lines() {
    let (tokens, state) = highlight_line("const s = `first ${", LineState::Normal);
    assert_eq!(state, LineState::InTemplate { depth: 1 });
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::TemplateLiteral));

    let (tokens, state) = highlight_line("  value } rest", state);
    assert_eq!(state, LineState::InTemplate { depth: 0 });
    assert_eq!(kinds(&tokens), vec![TokenKind::TemplateLiteral]);

    let (tokens, state) = highlight_line("end`;", state);
    assert_eq!(state, LineState::Normal);
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::TemplateLiteral, TokenKind::SemicolonToken]
    );
    assert_eq!((tokens[0].start, tokens[0].end), (0, 4));
}

#[test]
fn test_empty_line_keeps_state() {
    let (tokens, state) = highlight_line("", LineState::InBlockComment);
    assert!(tokens.is_empty());
    assert_eq!(state, LineState::InBlockComment);

    let (tokens, state) = highlight_line("", LineState::Normal);
    assert!(tokens.is_empty());
    assert_eq!(state, LineState::Normal);
}

#[test]
fn test_unterminated_string_does_not_carry() {
    let (tokens, state) = highlight_line("x = 'open", LineState::Normal);
    assert_eq!(state, LineState::Normal);
    assert_eq!(tokens.last().map(|t| t.category), Some(TokenCategory::String));
}
