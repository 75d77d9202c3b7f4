//! Capabilities a value offers to path segments.
//!
//! Every [`Value`] is a [`Receiver`]: it answers zero-argument method calls
//! and keyed lookups. Containers that can answer "do you have this key?"
//! without performing the lookup additionally expose [`KeyPresence`].
//! Host applications plug their own types into paths by implementing
//! [`Receiver`] and wrapping them with [`Value::object`].

use super::{methods, Key, Value};
use std::fmt;
use thiserror::Error;

/// Failure raised by a receiver while answering a method call or lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiverError {
    /// The receiver has no public method with this name
    #[error("undefined method `{method}' for an instance of {receiver}")]
    NoMethod { method: String, receiver: String },

    /// The receiver does not support keyed lookup at all
    #[error("undefined method `[]' for an instance of {receiver}")]
    NoIndex { receiver: String },

    /// The receiver rejected the argument or its own contents
    #[error("{0}")]
    Type(String),

    /// Raised by a host object
    #[error("{0}")]
    Custom(String),
}

/// Keyed-lookup-with-presence-test capability.
pub trait KeyPresence {
    /// Returns true if `key` is stored, whatever its value.
    fn has_key(&self, key: &Key) -> bool;
}

/// Something a path segment can be applied to.
pub trait Receiver: fmt::Debug + Send + Sync {
    /// Class name used in `class` and in error messages.
    fn class_name(&self) -> &str;

    /// Invokes the public zero-argument method `method`.
    fn send(&self, method: &str) -> Result<Value, ReceiverError>;

    /// Looks `key` up. A missing key is `Value::Nil`, not an error.
    fn index(&self, key: &Key) -> Result<Value, ReceiverError> {
        let _ = key;
        Err(ReceiverError::NoIndex {
            receiver: self.class_name().to_string(),
        })
    }

    /// Returns the key-presence capability, if this receiver has one.
    fn key_presence(&self) -> Option<&dyn KeyPresence> {
        None
    }
}

impl Receiver for Value {
    fn class_name(&self) -> &str {
        Value::class_name(self)
    }

    fn send(&self, method: &str) -> Result<Value, ReceiverError> {
        methods::call(self, method)
    }

    fn index(&self, key: &Key) -> Result<Value, ReceiverError> {
        match self {
            Value::Hash(map) => Ok(map.get(key).cloned().unwrap_or(Value::Nil)),
            Value::Array(items) => match key {
                Key::Integer(idx) => Ok(element_at(items, *idx)),
                other => Err(implicit_conversion(other.class_name(), "Integer")),
            },
            Value::String(s) | Value::Symbol(s) => match key {
                Key::Integer(idx) => Ok(char_at(s, *idx)),
                Key::String(needle) if s.contains(needle.as_str()) => {
                    Ok(Value::String(needle.clone()))
                }
                Key::String(_) => Ok(Value::Nil),
                Key::Symbol(_) => Err(implicit_conversion("Symbol", "Integer")),
            },
            Value::Integer(n) => match key {
                Key::Integer(bit) => Ok(Value::Integer(bit_at(*n, *bit))),
                other => Err(implicit_conversion(other.class_name(), "Integer")),
            },
            Value::Object(obj) => obj.index(key),
            Value::Nil | Value::Bool(_) | Value::Float(_) => Err(ReceiverError::NoIndex {
                receiver: self.class_name().to_string(),
            }),
        }
    }

    fn key_presence(&self) -> Option<&dyn KeyPresence> {
        match self {
            Value::Hash(_) => Some(self),
            Value::Object(obj) => obj.key_presence(),
            _ => None,
        }
    }
}

impl KeyPresence for Value {
    fn has_key(&self, key: &Key) -> bool {
        match self {
            Value::Hash(map) => map.contains_key(key),
            _ => false,
        }
    }
}

fn implicit_conversion(from: &str, into: &str) -> ReceiverError {
    ReceiverError::Type(format!("no implicit conversion of {} into {}", from, into))
}

/// Negative indices count from the end.
fn element_at(items: &[Value], idx: i64) -> Value {
    let len = items.len() as i64;
    let normalized_idx = if idx < 0 { len + idx } else { idx };

    if normalized_idx >= 0 && normalized_idx < len {
        items[normalized_idx as usize].clone()
    } else {
        Value::Nil
    }
}

fn char_at(s: &str, idx: i64) -> Value {
    let len = s.chars().count() as i64;
    let normalized_idx = if idx < 0 { len + idx } else { idx };

    if normalized_idx < 0 {
        return Value::Nil;
    }
    s.chars()
        .nth(normalized_idx as usize)
        .map(|ch| Value::String(ch.to_string()))
        .unwrap_or(Value::Nil)
}

/// Two's-complement bit reference; bits past the width repeat the sign.
fn bit_at(n: i64, bit: i64) -> i64 {
    if bit < 0 {
        0
    } else if bit >= 64 {
        i64::from(n < 0)
    } else {
        (n >> bit) & 1
    }
}
