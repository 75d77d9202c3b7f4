//! Tokens produced by the [`Lexer`](super::Lexer).

use std::fmt;

/// The five segment shapes a path expression is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `.name`
    Method,
    /// `[:name]`
    SymbolKey,
    /// `['text']` or `["text"]`
    StringKey,
    /// `[42]`
    ArrayIndex,
    /// `[name]`
    GenericKey,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Method => "method",
            TokenKind::SymbolKey => "symbol",
            TokenKind::StringKey => "string",
            TokenKind::ArrayIndex => "array_index",
            TokenKind::GenericKey => "index",
        };
        f.write_str(name)
    }
}

/// One lexical unit of a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    matched_text: String,
    mandatory: bool,
    position: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        matched_text: impl Into<String>,
        mandatory: bool,
        position: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            matched_text: matched_text.into(),
            mandatory,
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Inner text: method name, key text or index digits.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Full substring consumed, including delimiters and `!`.
    pub fn matched_text(&self) -> &str {
        &self.matched_text
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Byte offset where the match starts.
    pub fn position(&self) -> usize {
        self.position
    }
}
