//! Path expression tokenizer.
//!
//! Scanning is strictly left to right. At each position the five segment
//! grammars are tried in priority order (method, symbol key, string key,
//! array index, generic key) and the first that matches is emitted; scanning
//! resumes right after it. Every grammar character is ASCII, so positions are
//! byte offsets and always land on character boundaries.

use super::error::LexError;
use super::token::{Token, TokenKind};
use std::ops::Range;

/// A successful match at one scan position.
struct Match {
    kind: TokenKind,
    lexeme: Range<usize>,
    mandatory: bool,
    end: usize,
}

/// Tokenizer over a path expression.
///
/// Yields tokens one at a time; after the first error it yields nothing more.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            failed: false,
        }
    }

    /// Tokenizes the whole expression.
    ///
    /// ```
    /// use schmuck::path::{Lexer, TokenKind};
    ///
    /// let tokens = Lexer::tokenize(".name[:key]").unwrap();
    /// assert_eq!(tokens.len(), 2);
    /// assert_eq!(tokens[1].kind(), TokenKind::SymbolKey);
    /// assert_eq!(tokens[1].lexeme(), "key");
    ///
    /// assert_eq!(Lexer::tokenize("[oops").unwrap_err().position, 0);
    /// ```
    pub fn tokenize(input: &'a str) -> Result<Vec<Token>, LexError> {
        Lexer::new(input).collect()
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    /// Returns the end of the run of bytes starting at `start` that satisfy `accept`.
    fn run_end(&self, start: usize, accept: impl Fn(u8) -> bool) -> usize {
        let bytes = self.input.as_bytes();
        let mut end = start;
        while end < bytes.len() && accept(bytes[end]) {
            end += 1;
        }
        end
    }

    /// Non-empty run of word characters, as a range.
    fn word(&self, start: usize) -> Option<Range<usize>> {
        let end = self.run_end(start, is_word_byte);
        (end > start).then_some(start..end)
    }

    /// Consumes an optional `!`, returning whether it was there and where scanning continues.
    fn bang(&self, pos: usize) -> (bool, usize) {
        if self.byte_at(pos) == Some(b'!') {
            (true, pos + 1)
        } else {
            (false, pos)
        }
    }

    /// Expects `]` at `pos`, returning the position after it.
    fn close(&self, pos: usize) -> Option<usize> {
        (self.byte_at(pos) == Some(b']')).then_some(pos + 1)
    }

    fn match_at(&self, start: usize) -> Option<Match> {
        self.match_method(start).or_else(|| self.match_bracket(start))
    }

    /// `.name` or `.!name`
    fn match_method(&self, start: usize) -> Option<Match> {
        if self.byte_at(start) != Some(b'.') {
            return None;
        }
        let (mandatory, body) = self.bang(start + 1);
        let name = self.word(body)?;
        Some(Match {
            kind: TokenKind::Method,
            end: name.end,
            lexeme: name,
            mandatory,
        })
    }

    /// Any bracketed segment, with the bang before or inside the bracket.
    fn match_bracket(&self, start: usize) -> Option<Match> {
        let (outer_bang, open) = self.bang(start);
        if self.byte_at(open) != Some(b'[') {
            return None;
        }
        let (inner_bang, body) = self.bang(open + 1);

        let (kind, lexeme, end) = self
            .symbol_key(body)
            .or_else(|| self.string_key(body))
            .or_else(|| self.array_index(body))
            .or_else(|| self.generic_key(body))?;

        Some(Match {
            kind,
            lexeme,
            mandatory: outer_bang || inner_bang,
            end,
        })
    }

    /// `:name]`
    fn symbol_key(&self, body: usize) -> Option<(TokenKind, Range<usize>, usize)> {
        if self.byte_at(body) != Some(b':') {
            return None;
        }
        let name = self.word(body + 1)?;
        let end = self.close(name.end)?;
        Some((TokenKind::SymbolKey, name, end))
    }

    /// `'text']` or `"text"]`, same quote on both sides
    fn string_key(&self, body: usize) -> Option<(TokenKind, Range<usize>, usize)> {
        let quote = self.byte_at(body).filter(|b| *b == b'\'' || *b == b'"')?;
        let text = self.word(body + 1)?;
        if self.byte_at(text.end) != Some(quote) {
            return None;
        }
        let end = self.close(text.end + 1)?;
        Some((TokenKind::StringKey, text, end))
    }

    /// `42]`
    fn array_index(&self, body: usize) -> Option<(TokenKind, Range<usize>, usize)> {
        let digits_end = self.run_end(body, |b| b.is_ascii_digit());
        if digits_end == body {
            return None;
        }
        let end = self.close(digits_end)?;
        Some((TokenKind::ArrayIndex, body..digits_end, end))
    }

    /// `name]`
    fn generic_key(&self, body: usize) -> Option<(TokenKind, Range<usize>, usize)> {
        let text = self.word(body)?;
        let end = self.close(text.end)?;
        Some((TokenKind::GenericKey, text, end))
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.input.len() {
            return None;
        }

        let start = self.position;
        match self.match_at(start) {
            Some(m) => {
                self.position = m.end;
                Some(Ok(Token::new(
                    m.kind,
                    &self.input[m.lexeme],
                    &self.input[start..m.end],
                    m.mandatory,
                    start,
                )))
            }
            None => {
                self.failed = true;
                Some(Err(LexError { position: start }))
            }
        }
    }
}
