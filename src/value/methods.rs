//! Built-in zero-argument methods.

use super::{format_float, Key, Receiver, ReceiverError, Value};
use indexmap::IndexMap;
use std::cmp::Ordering;

type MethodResult = Result<Option<Value>, ReceiverError>;

/// Dispatches `method` on `receiver`, falling back to methods every value has.
pub(crate) fn call(receiver: &Value, method: &str) -> Result<Value, ReceiverError> {
    let specific = match receiver {
        Value::Nil => nil_method(method),
        Value::Bool(_) => Ok(None),
        Value::Integer(i) => integer_method(*i, method),
        Value::Float(f) => float_method(*f, method),
        Value::String(s) => string_method(s, method),
        Value::Symbol(s) => symbol_method(s, method),
        Value::Array(items) => array_method(items, method),
        Value::Hash(map) => hash_method(map, method),
        Value::Object(obj) => match obj.send(method) {
            Err(ReceiverError::NoMethod { .. }) => Ok(None),
            other => return other,
        },
    }?;

    if let Some(value) = specific.or_else(|| common_method(receiver, method)) {
        return Ok(value);
    }
    Err(ReceiverError::NoMethod {
        method: method.to_string(),
        receiver: receiver.class_name().to_string(),
    })
}

fn common_method(receiver: &Value, method: &str) -> Option<Value> {
    let value = match method {
        "class" => Value::String(receiver.class_name().to_string()),
        "inspect" => Value::String(receiver.inspect()),
        "to_s" => Value::String(receiver.to_string()),
        "itself" => receiver.clone(),
        _ => return None,
    };
    Some(value)
}

fn nil_method(method: &str) -> MethodResult {
    Ok(match method {
        "to_a" => Some(Value::Array(Vec::new())),
        "to_i" => Some(Value::Integer(0)),
        "to_f" => Some(Value::Float(0.0)),
        "to_h" => Some(Value::Hash(IndexMap::new())),
        _ => None,
    })
}

fn overflow() -> ReceiverError {
    ReceiverError::Type("integer overflow".to_string())
}

fn integer_method(i: i64, method: &str) -> MethodResult {
    let value = match method {
        "abs" => Value::Integer(i.checked_abs().ok_or_else(overflow)?),
        "succ" => Value::Integer(i.checked_add(1).ok_or_else(overflow)?),
        "pred" => Value::Integer(i.checked_sub(1).ok_or_else(overflow)?),
        "to_i" | "floor" | "ceil" | "round" => Value::Integer(i),
        "to_f" => Value::Float(i as f64),
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn float_to_integer(f: f64) -> Result<Value, ReceiverError> {
    if !f.is_finite() || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(ReceiverError::Type(format_float(f)));
    }
    Ok(Value::Integer(f as i64))
}

fn float_method(f: f64, method: &str) -> MethodResult {
    let value = match method {
        "abs" => Value::Float(f.abs()),
        "to_f" => Value::Float(f),
        "to_i" => float_to_integer(f.trunc())?,
        "floor" => float_to_integer(f.floor())?,
        "ceil" => float_to_integer(f.ceil())?,
        "round" => float_to_integer(f.round())?,
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

fn swapcase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_uppercase() {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
    }
    out
}

/// Longest leading `[+-]?digits` prefix after whitespace, or 0.
fn leading_integer(s: &str) -> i64 {
    let trimmed = s.trim_start();
    let mut end = 0;
    for (pos, ch) in trimmed.char_indices() {
        if ch.is_ascii_digit() || (pos == 0 && (ch == '+' || ch == '-')) {
            end = pos + ch.len_utf8();
        } else {
            break;
        }
    }
    trimmed[..end].parse().unwrap_or(0)
}

/// Longest leading `[+-]?digits(.digits)?` prefix after whitespace, or 0.0.
fn leading_float(s: &str) -> f64 {
    let trimmed = s.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (pos, ch) in trimmed.char_indices() {
        let accept = ch.is_ascii_digit()
            || (pos == 0 && (ch == '+' || ch == '-'))
            || (ch == '.' && !seen_dot);
        if !accept {
            break;
        }
        seen_dot |= ch == '.';
        end = pos + ch.len_utf8();
    }
    let candidate = trimmed[..end].trim_end_matches('.');
    candidate.parse().unwrap_or(0.0)
}

fn string_method(s: &str, method: &str) -> MethodResult {
    let value = match method {
        "upcase" => Value::String(s.to_uppercase()),
        "downcase" => Value::String(s.to_lowercase()),
        "capitalize" => Value::String(capitalize(s)),
        "swapcase" => Value::String(swapcase(s)),
        "reverse" => Value::String(s.chars().rev().collect()),
        "strip" => Value::String(s.trim().to_string()),
        "lstrip" => Value::String(s.trim_start().to_string()),
        "rstrip" => Value::String(s.trim_end().to_string()),
        "length" | "size" => Value::Integer(s.chars().count() as i64),
        "bytesize" => Value::Integer(s.len() as i64),
        "chars" => Value::Array(s.chars().map(|ch| Value::String(ch.to_string())).collect()),
        "lines" => Value::Array(
            s.split_inclusive('\n')
                .map(|line| Value::String(line.to_string()))
                .collect(),
        ),
        "to_sym" => Value::Symbol(s.to_string()),
        "to_i" => Value::Integer(leading_integer(s)),
        "to_f" => Value::Float(leading_float(s)),
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn symbol_method(name: &str, method: &str) -> MethodResult {
    let value = match method {
        "to_sym" => Value::Symbol(name.to_string()),
        "length" | "size" => Value::Integer(name.chars().count() as i64),
        "upcase" => Value::Symbol(name.to_uppercase()),
        "downcase" => Value::Symbol(name.to_lowercase()),
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn flatten_into(items: &[Value], out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(nested) => flatten_into(nested, out),
            other => out.push(other.clone()),
        }
    }
}

fn sum(items: &[Value]) -> Result<Value, ReceiverError> {
    let mut total = Value::Integer(0);
    for item in items {
        total = match (&total, item) {
            (Value::Integer(a), Value::Integer(b)) => {
                Value::Integer(a.checked_add(*b).ok_or_else(overflow)?)
            }
            (Value::Integer(a), Value::Float(b)) => Value::Float(*a as f64 + b),
            (Value::Float(a), Value::Integer(b)) => Value::Float(a + *b as f64),
            (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
            (_, other) => {
                return Err(ReceiverError::Type(format!(
                    "{} can't be coerced into Integer",
                    other.class_name()
                )))
            }
        };
    }
    Ok(total)
}

fn compare(a: &Value, b: &Value) -> Result<Ordering, ReceiverError> {
    let ordering = match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        (Value::Integer(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Integer(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Symbol(x), Value::Symbol(y)) => Some(x.cmp(y)),
        _ => None,
    };
    ordering.ok_or_else(|| {
        ReceiverError::Type(format!(
            "comparison of {} with {} failed",
            a.class_name(),
            b.class_name()
        ))
    })
}

/// Returns the first element that `wanted` ordering prefers, `Nil` when empty.
fn extreme(items: &[Value], wanted: Ordering) -> Result<Value, ReceiverError> {
    let mut best: Option<&Value> = None;
    for item in items {
        match best {
            Some(current) if compare(item, current)? != wanted => {}
            _ => best = Some(item),
        }
    }
    Ok(best.cloned().unwrap_or(Value::Nil))
}

fn array_method(items: &[Value], method: &str) -> MethodResult {
    let value = match method {
        "first" => items.first().cloned().unwrap_or(Value::Nil),
        "last" => items.last().cloned().unwrap_or(Value::Nil),
        "length" | "size" | "count" => Value::Integer(items.len() as i64),
        "reverse" => Value::Array(items.iter().rev().cloned().collect()),
        "compact" => Value::Array(items.iter().filter(|v| !v.is_nil()).cloned().collect()),
        "flatten" => {
            let mut flat = Vec::new();
            flatten_into(items, &mut flat);
            Value::Array(flat)
        }
        "uniq" => {
            let mut unique: Vec<Value> = Vec::new();
            for item in items {
                if !unique.contains(item) {
                    unique.push(item.clone());
                }
            }
            Value::Array(unique)
        }
        "sum" => sum(items)?,
        "min" => extreme(items, Ordering::Less)?,
        "max" => extreme(items, Ordering::Greater)?,
        "to_a" => Value::Array(items.to_vec()),
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn pair(key: &Key, value: &Value) -> Value {
    Value::Array(vec![key.to_value(), value.clone()])
}

fn hash_method(map: &IndexMap<Key, Value>, method: &str) -> MethodResult {
    let value = match method {
        "keys" => Value::Array(map.keys().map(Key::to_value).collect()),
        "values" => Value::Array(map.values().cloned().collect()),
        "length" | "size" | "count" => Value::Integer(map.len() as i64),
        "first" => map
            .first()
            .map(|(key, value)| pair(key, value))
            .unwrap_or(Value::Nil),
        "to_a" => Value::Array(map.iter().map(|(key, value)| pair(key, value)).collect()),
        "to_h" => Value::Hash(map.clone()),
        "compact" => Value::Hash(
            map.iter()
                .filter(|(_, value)| !value.is_nil())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        "invert" => {
            let mut inverted = IndexMap::with_capacity(map.len());
            for (key, value) in map {
                let new_key = Key::from_value(value).ok_or_else(|| {
                    ReceiverError::Type(format!("{} cannot be used as a key", value.class_name()))
                })?;
                inverted.insert(new_key, key.to_value());
            }
            Value::Hash(inverted)
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}
