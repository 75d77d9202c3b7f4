//! Path expression tokenizer, compiler and evaluator.
//!
//! A path expression is a sequence of segments, evaluated left to right:
//!
//! - `.name` - call the zero-argument method `name`
//! - `[:name]` - look up the symbol key `name`
//! - `['text']` or `["text"]` - look up the string key `text`
//! - `[42]` - index into a sequence
//! - `[name]` - look up the string key `name`, falling back to the symbol key
//!
//! A `!` after `.`, or before or just inside `[`, marks a segment mandatory:
//! it is applied even when the running value is already absent, which
//! usually turns silent `nil` propagation into an error.
//!
//! # Examples
//!
//! ```
//! use schmuck::path::{apply, compile};
//! use schmuck::{Key, Value};
//!
//! let root = Value::hash([(
//!     Key::symbol("multiples"),
//!     Value::from(vec![Value::from(2), Value::from(4), Value::from(6)]),
//! )]);
//!
//! let path = compile("[multiples][1]").unwrap();
//! assert_eq!(apply(&path, &root).unwrap(), Some(Value::from(4)));
//!
//! let shout = compile(".upcase").unwrap();
//! assert_eq!(apply(&shout, &Value::from("abc")).unwrap(), Some(Value::from("ABC")));
//! assert_eq!(apply(&shout, &Value::Nil).unwrap(), None);
//!
//! assert!(apply(&compile("![42]").unwrap(), &Value::Nil).is_err());
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod token;

pub use ast::{Path, Segment, Step};
pub use error::{ApplyError, CompileError, LexError, PathError};
pub use evaluator::Evaluator;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use crate::value::Value;

impl Path {
    /// Tokenizes and compiles `expression`.
    pub fn parse(expression: &str) -> Result<Self, PathError> {
        let tokens = Lexer::tokenize(expression)?;
        Ok(Path::from_tokens(&tokens)?)
    }
}

/// Compiles `expression` into a [`Path`], without caching.
pub fn compile(expression: &str) -> Result<Path, PathError> {
    Path::parse(expression)
}

/// Evaluates a compiled path against `root`.
pub fn apply(path: &Path, root: &Value) -> Result<Option<Value>, ApplyError> {
    path.apply(root)
}
