//! Schmuck compiles compact path expressions such as
//! `.name[:key]["literal"][3][other]` into reusable accessors.
//!
//! An expression is tokenized ([`path::Lexer`]), compiled into an ordered
//! list of segments ([`Path`]) and evaluated against a root [`Value`].
//! Absent values propagate as `None` through optional segments; a `!` makes
//! a segment mandatory. Compiled paths can be memoized in a [`PathCache`].
//!
//! ```
//! use schmuck::{Key, PathCache, Value};
//!
//! let cache = PathCache::default();
//! let name = cache.accessor("[user][:name].capitalize").unwrap();
//!
//! let doc = Value::hash([(
//!     Key::from("user"),
//!     Value::hash([(Key::symbol("name"), Value::from("ada"))]),
//! )]);
//!
//! assert_eq!(name(&doc).unwrap(), Some(Value::from("Ada")));
//! assert_eq!(name(&Value::hash([])).unwrap(), None);
//! ```

pub mod cache;
pub mod config;
pub mod file;
pub mod path;
pub mod value;

pub use cache::{CacheStats, PathCache};
pub use path::{apply, compile, ApplyError, CompileError, LexError, Path, PathError, Segment, Step};
pub use value::{Key, Value};
