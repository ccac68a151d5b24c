//! Token kinds and the `Token` record produced by the scanner.

use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

/// Coarse classification of a token, used by syntax highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenCategory {
    Invalid,
    Trivia,
    Number,
    String,
    Punctuation,
    Operator,
    Keyword,
    Identifier,
}

/// Token types.
///
/// Contextual words the parser cares about (`of`, `get`, `set`, `static`,
/// `async`, `constructor`) have their own kinds but remain usable as names.
/// Reserved words without special parser handling share `Keyword`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Unknown,
    EndOfFileToken,
    /// Only produced when the scanner preserves comments (highlighting).
    Comment,

    // Literals and names
    Identifier,
    Keyword,
    StringLiteral,
    TemplateLiteral,
    NumericLiteral,

    // Dedicated keywords
    ThisKeyword,
    NewKeyword,
    TypeofKeyword,
    InstanceofKeyword,
    InKeyword,
    OfKeyword,
    ClassKeyword,
    ExtendsKeyword,
    StaticKeyword,
    GetKeyword,
    SetKeyword,
    AsyncKeyword,
    FunctionKeyword,
    ReturnKeyword,
    ConstructorKeyword,
    VarKeyword,
    LetKeyword,
    ConstKeyword,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    QuestionDotToken,
    SemicolonToken,
    CommaToken,
    ColonToken,
    QuestionToken,
    AtToken,
    HashToken,
    EqualsGreaterThanToken,

    // Operators
    EqualsToken,
    EqualsEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationToken,
    ExclamationEqualsToken,
    ExclamationEqualsEqualsToken,
    LessThanToken,
    LessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionQuestionToken,

    // Compound assignment
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,
}

/// Four-character punctuators.
pub(crate) const PUNCTUATION_4: &[(&str, TokenKind)] =
    &[(">>>=", TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken)];

/// Three-character punctuators.
pub(crate) const PUNCTUATION_3: &[(&str, TokenKind)] = &[
    ("===", TokenKind::EqualsEqualsEqualsToken),
    ("!==", TokenKind::ExclamationEqualsEqualsToken),
    ("**=", TokenKind::AsteriskAsteriskEqualsToken),
    ("...", TokenKind::DotDotDotToken),
    ("<<=", TokenKind::LessThanLessThanEqualsToken),
    (">>=", TokenKind::GreaterThanGreaterThanEqualsToken),
    (">>>", TokenKind::GreaterThanGreaterThanGreaterThanToken),
    ("&&=", TokenKind::AmpersandAmpersandEqualsToken),
    ("||=", TokenKind::BarBarEqualsToken),
    ("??=", TokenKind::QuestionQuestionEqualsToken),
];

/// Two-character punctuators.
pub(crate) const PUNCTUATION_2: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqualsEqualsToken),
    ("!=", TokenKind::ExclamationEqualsToken),
    ("<=", TokenKind::LessThanEqualsToken),
    (">=", TokenKind::GreaterThanEqualsToken),
    ("&&", TokenKind::AmpersandAmpersandToken),
    ("||", TokenKind::BarBarToken),
    ("??", TokenKind::QuestionQuestionToken),
    ("?.", TokenKind::QuestionDotToken),
    ("=>", TokenKind::EqualsGreaterThanToken),
    ("++", TokenKind::PlusPlusToken),
    ("--", TokenKind::MinusMinusToken),
    ("+=", TokenKind::PlusEqualsToken),
    ("-=", TokenKind::MinusEqualsToken),
    ("*=", TokenKind::AsteriskEqualsToken),
    ("/=", TokenKind::SlashEqualsToken),
    ("%=", TokenKind::PercentEqualsToken),
    ("&=", TokenKind::AmpersandEqualsToken),
    ("|=", TokenKind::BarEqualsToken),
    ("^=", TokenKind::CaretEqualsToken),
    ("**", TokenKind::AsteriskAsteriskToken),
    ("<<", TokenKind::LessThanLessThanToken),
    (">>", TokenKind::GreaterThanGreaterThanToken),
];

/// Single-character punctuators.
pub(crate) const PUNCTUATION_1: &[(&str, TokenKind)] = &[
    ("(", TokenKind::OpenParenToken),
    (")", TokenKind::CloseParenToken),
    ("{", TokenKind::OpenBraceToken),
    ("}", TokenKind::CloseBraceToken),
    ("[", TokenKind::OpenBracketToken),
    ("]", TokenKind::CloseBracketToken),
    (".", TokenKind::DotToken),
    (";", TokenKind::SemicolonToken),
    (",", TokenKind::CommaToken),
    (":", TokenKind::ColonToken),
    ("?", TokenKind::QuestionToken),
    ("@", TokenKind::AtToken),
    ("#", TokenKind::HashToken),
    ("=", TokenKind::EqualsToken),
    ("!", TokenKind::ExclamationToken),
    ("<", TokenKind::LessThanToken),
    (">", TokenKind::GreaterThanToken),
    ("+", TokenKind::PlusToken),
    ("-", TokenKind::MinusToken),
    ("*", TokenKind::AsteriskToken),
    ("/", TokenKind::SlashToken),
    ("%", TokenKind::PercentToken),
    ("&", TokenKind::AmpersandToken),
    ("|", TokenKind::BarToken),
    ("^", TokenKind::CaretToken),
    ("~", TokenKind::TildeToken),
];

/// Reserved words that share the generic `Keyword` kind.
pub const RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "false",
    "finally",
    "for",
    "if",
    "implements",
    "import",
    "interface",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "super",
    "switch",
    "throw",
    "true",
    "try",
    "void",
    "while",
    "with",
    "yield",
];

/// Classify an identifier spelling.
///
/// Returns the dedicated keyword kind, `Keyword` for other reserved words, or
/// `None` for ordinary identifiers.
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "this" => TokenKind::ThisKeyword,
        "new" => TokenKind::NewKeyword,
        "typeof" => TokenKind::TypeofKeyword,
        "instanceof" => TokenKind::InstanceofKeyword,
        "in" => TokenKind::InKeyword,
        "of" => TokenKind::OfKeyword,
        "class" => TokenKind::ClassKeyword,
        "extends" => TokenKind::ExtendsKeyword,
        "static" => TokenKind::StaticKeyword,
        "get" => TokenKind::GetKeyword,
        "set" => TokenKind::SetKeyword,
        "async" => TokenKind::AsyncKeyword,
        "function" => TokenKind::FunctionKeyword,
        "return" => TokenKind::ReturnKeyword,
        "constructor" => TokenKind::ConstructorKeyword,
        "var" => TokenKind::VarKeyword,
        "let" => TokenKind::LetKeyword,
        "const" => TokenKind::ConstKeyword,
        _ if RESERVED_WORDS.contains(&text) => TokenKind::Keyword,
        _ => return None,
    };
    Some(kind)
}

impl TokenKind {
    /// Whether this kind came from a word (identifier or any keyword).
    pub fn is_word(self) -> bool {
        self == TokenKind::Identifier || self == TokenKind::Keyword || self.is_dedicated_keyword()
    }

    /// Keywords with their own kind.
    pub fn is_dedicated_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::ThisKeyword
                | TokenKind::NewKeyword
                | TokenKind::TypeofKeyword
                | TokenKind::InstanceofKeyword
                | TokenKind::InKeyword
                | TokenKind::OfKeyword
                | TokenKind::ClassKeyword
                | TokenKind::ExtendsKeyword
                | TokenKind::StaticKeyword
                | TokenKind::GetKeyword
                | TokenKind::SetKeyword
                | TokenKind::AsyncKeyword
                | TokenKind::FunctionKeyword
                | TokenKind::ReturnKeyword
                | TokenKind::ConstructorKeyword
                | TokenKind::VarKeyword
                | TokenKind::LetKeyword
                | TokenKind::ConstKeyword
        )
    }

    /// Contextual keywords that may also serve as binding names.
    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::OfKeyword
                | TokenKind::GetKeyword
                | TokenKind::SetKeyword
                | TokenKind::StaticKeyword
                | TokenKind::AsyncKeyword
                | TokenKind::ConstructorKeyword
                | TokenKind::LetKeyword
        )
    }

    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::EqualsToken
                | TokenKind::PlusEqualsToken
                | TokenKind::MinusEqualsToken
                | TokenKind::AsteriskEqualsToken
                | TokenKind::AsteriskAsteriskEqualsToken
                | TokenKind::SlashEqualsToken
                | TokenKind::PercentEqualsToken
                | TokenKind::LessThanLessThanEqualsToken
                | TokenKind::GreaterThanGreaterThanEqualsToken
                | TokenKind::GreaterThanGreaterThanGreaterThanEqualsToken
                | TokenKind::AmpersandEqualsToken
                | TokenKind::BarEqualsToken
                | TokenKind::CaretEqualsToken
                | TokenKind::AmpersandAmpersandEqualsToken
                | TokenKind::BarBarEqualsToken
                | TokenKind::QuestionQuestionEqualsToken
        )
    }

    /// Source text of a punctuator, if this kind is one.
    pub fn punctuation_text(self) -> Option<&'static str> {
        PUNCTUATION_4
            .iter()
            .chain(PUNCTUATION_3)
            .chain(PUNCTUATION_2)
            .chain(PUNCTUATION_1)
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    pub fn category(self) -> TokenCategory {
        match self {
            TokenKind::Unknown | TokenKind::EndOfFileToken => TokenCategory::Invalid,
            TokenKind::Comment => TokenCategory::Trivia,
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::StringLiteral | TokenKind::TemplateLiteral => TokenCategory::String,
            TokenKind::NumericLiteral => TokenCategory::Number,
            TokenKind::Keyword => TokenCategory::Keyword,
            kind if kind.is_dedicated_keyword() => TokenCategory::Keyword,
            TokenKind::OpenParenToken
            | TokenKind::CloseParenToken
            | TokenKind::OpenBraceToken
            | TokenKind::CloseBraceToken
            | TokenKind::OpenBracketToken
            | TokenKind::CloseBracketToken
            | TokenKind::SemicolonToken
            | TokenKind::CommaToken
            | TokenKind::ColonToken
            | TokenKind::DotToken
            | TokenKind::AtToken
            | TokenKind::HashToken => TokenCategory::Punctuation,
            _ => TokenCategory::Operator,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.punctuation_text() {
            return write!(f, "'{text}'");
        }
        let name = match self {
            TokenKind::Unknown => "unknown character",
            TokenKind::EndOfFileToken => "end of input",
            TokenKind::Comment => "comment",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::StringLiteral => "string literal",
            TokenKind::TemplateLiteral => "template literal",
            TokenKind::NumericLiteral => "numeric literal",
            TokenKind::ThisKeyword => "'this'",
            TokenKind::NewKeyword => "'new'",
            TokenKind::TypeofKeyword => "'typeof'",
            TokenKind::InstanceofKeyword => "'instanceof'",
            TokenKind::InKeyword => "'in'",
            TokenKind::OfKeyword => "'of'",
            TokenKind::ClassKeyword => "'class'",
            TokenKind::ExtendsKeyword => "'extends'",
            TokenKind::StaticKeyword => "'static'",
            TokenKind::GetKeyword => "'get'",
            TokenKind::SetKeyword => "'set'",
            TokenKind::AsyncKeyword => "'async'",
            TokenKind::FunctionKeyword => "'function'",
            TokenKind::ReturnKeyword => "'return'",
            TokenKind::ConstructorKeyword => "'constructor'",
            TokenKind::VarKeyword => "'var'",
            TokenKind::LetKeyword => "'let'",
            TokenKind::ConstKeyword => "'const'",
            _ => "token",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Scanner facts about a token that are not part of its kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// A line terminator appears between the previous token and this one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// String, template or block comment ran into the end of input.
        const UNTERMINATED = 1 << 1;
    }
}

/// A classified lexical unit.
///
/// `value` is the raw source text of the token (string literals keep their
/// quotes, see [`crate::unescape_string`] for the cooked value). `start` and
/// `end` are UTF-16 offsets into the scanned text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub start: u32,
    pub end: u32,
    #[serde(skip)]
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, start: u32, end: u32) -> Self {
        Token {
            kind,
            value: value.into(),
            start,
            end,
            flags: TokenFlags::empty(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether this is the generic `Keyword` token spelled `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == word
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn is_unterminated(&self) -> bool {
        self.flags.contains(TokenFlags::UNTERMINATED)
    }
}
