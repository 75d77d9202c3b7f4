//! Dynamic values that path expressions are evaluated against.
//!
//! A [`Value`] models the data a path walks through: scalars, symbols,
//! ordered sequences, ordered hashes and host objects. String keys and
//! symbol keys are distinct, which is what the generic-key fallback of
//! [`crate::path::Segment::GenericKey`] exists for.
//!
//! # Example
//!
//! ```
//! use schmuck::value::{Key, Value};
//!
//! let record = Value::hash([
//!     (Key::symbol("name"), Value::from("schmuck")),
//!     (Key::from("tags"), Value::from(vec![Value::from("a"), Value::from("b")])),
//! ]);
//!
//! assert!(record.is_hash());
//! assert_eq!(record.inspect(), r#"{name: "schmuck", "tags" => ["a", "b"]}"#);
//! ```

pub mod convert;
mod methods;
pub mod receiver;

pub use receiver::{KeyPresence, Receiver, ReceiverError};

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A hash key.
///
/// `Key::String("id")` and `Key::Symbol("id")` never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    String(String),
    Symbol(String),
    Integer(i64),
}

impl Key {
    /// Creates a symbol key.
    pub fn symbol(name: impl Into<String>) -> Self {
        Key::Symbol(name.into())
    }

    /// Name of the class a key of this kind belongs to.
    pub fn class_name(&self) -> &'static str {
        match self {
            Key::String(_) => "String",
            Key::Symbol(_) => "Symbol",
            Key::Integer(_) => "Integer",
        }
    }

    /// Converts the key into the equivalent value.
    pub fn to_value(&self) -> Value {
        match self {
            Key::String(s) => Value::String(s.clone()),
            Key::Symbol(s) => Value::Symbol(s.clone()),
            Key::Integer(i) => Value::Integer(*i),
        }
    }

    /// Converts a value into a key, if the value can be one.
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::String(s) => Some(Key::String(s.clone())),
            Value::Symbol(s) => Some(Key::Symbol(s.clone())),
            Value::Integer(i) => Some(Key::Integer(*i)),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Integer(i64::from(i))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value().inspect())
    }
}

/// A dynamic value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// An interned-style name, rendered as `:name`
    Symbol(String),
    Array(Vec<Value>),
    /// Insertion-ordered hash
    Hash(IndexMap<Key, Value>),
    /// A host object exposing its own methods and lookups
    Object(Arc<dyn Receiver>),
}

impl Value {
    /// Creates a symbol value.
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Creates a hash from key/value pairs, keeping their order.
    pub fn hash<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Key, Value)>,
    {
        Value::Hash(entries.into_iter().collect())
    }

    /// Wraps a host object.
    pub fn object<R: Receiver + 'static>(receiver: R) -> Self {
        Value::Object(Arc::new(receiver))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_hash(&self) -> bool {
        matches!(self, Value::Hash(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Maps `Nil` to `None`, anything else to `Some`.
    pub fn into_option(self) -> Option<Value> {
        match self {
            Value::Nil => None,
            other => Some(other),
        }
    }

    /// Name of this value's class, as reported by the `class` method.
    pub fn class_name(&self) -> &str {
        match self {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
            Value::Object(obj) => obj.class_name(),
        }
    }

    /// Debug-style rendering: strings quoted, symbols prefixed with `:`.
    pub fn inspect(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::String(s) => format!("{:?}", s),
            Value::Symbol(s) => format!(":{}", s),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(Value::inspect).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Hash(map) => {
                if map.is_empty() {
                    return "{}".to_string();
                }
                let parts: Vec<String> = map
                    .iter()
                    .map(|(key, value)| match key {
                        Key::Symbol(name) => format!("{}: {}", name, value.inspect()),
                        other => format!("{} => {}", other.to_value().inspect(), value.inspect()),
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Object(obj) => format!("#<{}>", obj.class_name()),
            scalar => scalar.to_string(),
        }
    }
}

/// Formats a float so that integral values keep a trailing `.0`.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{}", f)
    }
}

impl fmt::Display for Value {
    /// Plain rendering, as returned by the `to_s` method.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", format_float(*fl)),
            Value::String(s) | Value::Symbol(s) => write!(f, "{}", s),
            Value::Array(_) | Value::Hash(_) | Value::Object(_) => write!(f, "{}", self.inspect()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Option<Value>> for Value {
    fn from(value: Option<Value>) -> Self {
        value.unwrap_or(Value::Nil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_symbol_keys_differ() {
        assert_ne!(Key::from("id"), Key::symbol("id"));
        let map = Value::hash([(Key::symbol("id"), Value::from(1))]);
        if let Value::Hash(entries) = map {
            assert!(entries.get(&Key::symbol("id")).is_some());
            assert!(entries.get(&Key::from("id")).is_none());
        } else {
            panic!("Expected hash");
        }
    }

    #[test]
    fn test_inspect_scalars() {
        assert_eq!(Value::Nil.inspect(), "nil");
        assert_eq!(Value::from("a\"b").inspect(), r#""a\"b""#);
        assert_eq!(Value::symbol("x").inspect(), ":x");
        assert_eq!(Value::from(2.0).inspect(), "2.0");
        assert_eq!(Value::from(2.5).inspect(), "2.5");
    }

    #[test]
    fn test_inspect_hash_mixed_keys() {
        let map = Value::hash([
            (Key::symbol("a"), Value::from(1)),
            (Key::from("b"), Value::Nil),
            (Key::from(3), Value::from(true)),
        ]);
        assert_eq!(map.inspect(), r#"{a: 1, "b" => nil, 3 => true}"#);
    }

    #[test]
    fn test_display_nil_is_empty() {
        assert_eq!(Value::Nil.to_string(), "");
        assert_eq!(Value::symbol("sym").to_string(), "sym");
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Value::Nil.into_option(), None);
        assert_eq!(Value::from(0).into_option(), Some(Value::from(0)));
    }

    #[test]
    fn test_class_names() {
        assert_eq!(Value::Bool(true).class_name(), "TrueClass");
        assert_eq!(Value::hash([]).class_name(), "Hash");
        assert_eq!(Key::symbol("k").class_name(), "Symbol");
    }
}
