//! Conversions between parsed documents and [`Value`].
//!
//! Documents arrive as `serde_yaml::Value` (JSON is a subset of what
//! `serde_yaml` accepts). Strings spelled `:name` become symbols when
//! `symbolize` is set, so a document can carry both string and symbol keys.

use super::{format_float, Key, Value};
use serde_yaml::Value as YamlValue;

/// Returns the symbol name if `s` is spelled `:name` with word characters.
fn symbol_name(s: &str) -> Option<&str> {
    let name = s.strip_prefix(':')?;
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        Some(name)
    } else {
        None
    }
}

/// Converts a parsed YAML/JSON document into a [`Value`].
///
/// # Example
///
/// ```
/// use schmuck::value::{convert::from_yaml, Key, Value};
///
/// let doc: serde_yaml::Value = serde_yaml::from_str(":key: v\nother: [1, 2]").unwrap();
/// let value = from_yaml(&doc, true);
/// assert_eq!(
///     value,
///     Value::hash([
///         (Key::symbol("key"), Value::from("v")),
///         (Key::from("other"), Value::from(vec![Value::from(1), Value::from(2)])),
///     ])
/// );
/// ```
pub fn from_yaml(value: &YamlValue, symbolize: bool) -> Value {
    match value {
        YamlValue::Null => Value::Nil,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        YamlValue::String(s) => match symbol_name(s) {
            Some(name) if symbolize => Value::Symbol(name.to_string()),
            _ => Value::String(s.clone()),
        },
        YamlValue::Sequence(items) => {
            Value::Array(items.iter().map(|item| from_yaml(item, symbolize)).collect())
        }
        YamlValue::Mapping(map) => Value::Hash(
            map.iter()
                .map(|(k, v)| (key_from_yaml(k, symbolize), from_yaml(v, symbolize)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => from_yaml(&tagged.value, symbolize),
    }
}

fn key_from_yaml(key: &YamlValue, symbolize: bool) -> Key {
    match from_yaml(key, symbolize) {
        Value::String(s) => Key::String(s),
        Value::Symbol(s) => Key::Symbol(s),
        Value::Integer(i) => Key::Integer(i),
        Value::Nil => Key::String(String::new()),
        Value::Array(_) | Value::Hash(_) => {
            let rendered = serde_yaml::to_string(key).unwrap_or_default();
            Key::String(rendered.trim_end().to_string())
        }
        other => Key::String(other.to_string()),
    }
}

fn key_label(key: &Key) -> String {
    match key {
        Key::String(s) => s.clone(),
        Key::Symbol(s) => format!(":{}", s),
        Key::Integer(i) => i.to_string(),
    }
}

/// Renders a [`Value`] as YAML. Symbols render as `:name`, host objects as
/// their `inspect` text.
pub fn to_yaml(value: &Value) -> YamlValue {
    match value {
        Value::Nil => YamlValue::Null,
        Value::Bool(b) => YamlValue::Bool(*b),
        Value::Integer(i) => YamlValue::Number((*i).into()),
        Value::Float(f) => YamlValue::Number((*f).into()),
        Value::String(s) => YamlValue::String(s.clone()),
        Value::Symbol(s) => YamlValue::String(format!(":{}", s)),
        Value::Array(items) => YamlValue::Sequence(items.iter().map(to_yaml).collect()),
        Value::Hash(map) => {
            let mut mapping = serde_yaml::Mapping::with_capacity(map.len());
            for (key, item) in map {
                let yaml_key = match key {
                    Key::Integer(i) => YamlValue::Number((*i).into()),
                    other => YamlValue::String(key_label(other)),
                };
                mapping.insert(yaml_key, to_yaml(item));
            }
            YamlValue::Mapping(mapping)
        }
        Value::Object(_) => YamlValue::String(value.inspect()),
    }
}

/// Renders a [`Value`] as JSON. Object keys are always strings; non-finite
/// floats become their textual form.
pub fn to_json(value: &Value) -> serde_json::Value {
    use serde_json::Value as JsonValue;

    match value {
        Value::Nil => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(format_float(*f))),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Symbol(s) => JsonValue::String(format!(":{}", s)),
        Value::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Value::Hash(map) => JsonValue::Object(
            map.iter()
                .map(|(key, item)| (key_label(key), to_json(item)))
                .collect(),
        ),
        Value::Object(_) => JsonValue::String(value.inspect()),
    }
}
