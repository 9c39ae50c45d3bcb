//! Tokens for the example-statement subset.
//!
//! The tokenizer only needs to understand enough of the source language to
//! recognize `assert f(args) == literal` statements and the literal grammar
//! inside them. Anything outside that subset lexes to an `Error` token,
//! which makes the surrounding statement unrecognizable and therefore
//! skipped rather than a crash.

/// A token with its byte span in the statement text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: u32,
    pub end: u32,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self { kind, start, end }
    }
}

/// The kind of a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Minus,
    /// `==`. A single `=` lexes to `Error`.
    EqEq,
    /// An integer literal.
    Int,
    /// A decimal literal (fraction and/or exponent).
    Float,
    /// A quoted string literal, span includes the quotes.
    Str,
    /// A string literal that was never closed.
    BadStr,
    /// An identifier that is not one of the known keywords.
    Ident,
    Assert,
    Not,
    True,
    False,
    None,
    Import,
    From,
    Eof,
    /// Any character outside the supported subset.
    Error,
}

/// Map an identifier to its keyword kind, if it is one.
pub fn keyword_from_str(text: &str) -> Option<TokenKind> {
    Some(match text {
        "assert" => TokenKind::Assert,
        "not" => TokenKind::Not,
        "True" => TokenKind::True,
        "False" => TokenKind::False,
        "None" => TokenKind::None,
        "import" => TokenKind::Import,
        "from" => TokenKind::From,
        _ => return Option::None,
    })
}
