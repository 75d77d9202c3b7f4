//! Token to segment compilation.

use super::ast::{Path, Segment, Step};
use super::error::CompileError;
use super::token::{Token, TokenKind};

/// Compiles one token into its segment.
pub fn compile_token(token: &Token) -> Result<Segment, CompileError> {
    let lexeme = token.lexeme();
    let step = match token.kind() {
        TokenKind::Method => Step::Method(lexeme.to_string()),
        TokenKind::SymbolKey => Step::SymbolKey(lexeme.to_string()),
        TokenKind::StringKey => Step::StringKey(lexeme.to_string()),
        TokenKind::GenericKey => Step::GenericKey(lexeme.to_string()),
        TokenKind::ArrayIndex => {
            let index = lexeme.parse::<usize>().map_err(|err| CompileError {
                reason: format!(
                    "invalid array index `{}` at position {}: {}",
                    lexeme,
                    token.position(),
                    err
                ),
            })?;
            Step::ArrayIndex(index)
        }
    };
    Ok(Segment::new(step, token.is_mandatory()))
}

/// Compiles tokens into segments, one per token, in the same order.
pub fn compile(tokens: &[Token]) -> Result<Vec<Segment>, CompileError> {
    tokens.iter().map(compile_token).collect()
}

impl Path {
    /// Compiles an already tokenized expression.
    pub fn from_tokens(tokens: &[Token]) -> Result<Self, CompileError> {
        Ok(Path::new(compile(tokens)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_each_kind() {
        let tokens = vec![
            Token::new(TokenKind::Method, "name", ".name", false, 0),
            Token::new(TokenKind::SymbolKey, "key", "[:key]", true, 5),
            Token::new(TokenKind::StringKey, "lit", "['lit']", false, 11),
            Token::new(TokenKind::ArrayIndex, "3", "[3]", false, 18),
            Token::new(TokenKind::GenericKey, "other", "[other]", false, 21),
        ];
        assert_eq!(
            compile(&tokens).unwrap(),
            vec![
                Segment::new(Step::Method("name".into()), false),
                Segment::new(Step::SymbolKey("key".into()), true),
                Segment::new(Step::StringKey("lit".into()), false),
                Segment::new(Step::ArrayIndex(3), false),
                Segment::new(Step::GenericKey("other".into()), false),
            ]
        );
    }

    #[test]
    fn test_non_numeric_index_fails() {
        let token = Token::new(TokenKind::ArrayIndex, "abc", "[abc]", false, 0);
        let err = compile_token(&token).unwrap_err();
        assert!(err.reason.contains("invalid array index `abc`"));
    }

    #[test]
    fn test_compile_is_pure() {
        let tokens = vec![Token::new(TokenKind::ArrayIndex, "42", "![42]", true, 0)];
        assert_eq!(compile(&tokens), compile(&tokens));
    }
}
