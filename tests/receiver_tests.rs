//! Paths applied to host objects that implement `Receiver`.

use schmuck::value::{KeyPresence, Receiver, ReceiverError};
use schmuck::{compile, Key, Value};
use std::collections::HashMap;

/// A record that answers a couple of methods and keyed lookups, and can
/// report which keys it holds.
#[derive(Debug)]
struct Person {
    name: String,
    attributes: HashMap<Key, Value>,
}

impl Receiver for Person {
    fn class_name(&self) -> &str {
        "Person"
    }

    fn send(&self, method: &str) -> Result<Value, ReceiverError> {
        match method {
            "name" => Ok(Value::from(self.name.as_str())),
            "secret" => Err(ReceiverError::Custom("secret is private".to_string())),
            _ => Err(ReceiverError::NoMethod {
                method: method.to_string(),
                receiver: "Person".to_string(),
            }),
        }
    }

    fn index(&self, key: &Key) -> Result<Value, ReceiverError> {
        Ok(self.attributes.get(key).cloned().unwrap_or(Value::Nil))
    }

    fn key_presence(&self) -> Option<&dyn KeyPresence> {
        Some(self)
    }
}

impl KeyPresence for Person {
    fn has_key(&self, key: &Key) -> bool {
        self.attributes.contains_key(key)
    }
}

/// A lookup-only container without a presence test; records every key it
/// was asked for.
#[derive(Debug, Default)]
struct Registry {
    entries: HashMap<Key, Value>,
    asked: std::sync::Mutex<Vec<Key>>,
}

impl Receiver for Registry {
    fn class_name(&self) -> &str {
        "Registry"
    }

    fn send(&self, method: &str) -> Result<Value, ReceiverError> {
        Err(ReceiverError::NoMethod {
            method: method.to_string(),
            receiver: "Registry".to_string(),
        })
    }

    fn index(&self, key: &Key) -> Result<Value, ReceiverError> {
        self.asked.lock().unwrap().push(key.clone());
        Ok(self.entries.get(key).cloned().unwrap_or(Value::Nil))
    }
}

fn person() -> Value {
    let mut attributes = HashMap::new();
    attributes.insert(Key::symbol("age"), Value::from(36));
    attributes.insert(Key::from("email"), Value::from("ada@example.com"));
    attributes.insert(Key::from("nickname"), Value::Nil);
    attributes.insert(Key::symbol("nickname"), Value::from("countess"));
    Value::object(Person {
        name: "ada".to_string(),
        attributes,
    })
}

fn eval(expression: &str, root: &Value) -> Result<Option<Value>, schmuck::ApplyError> {
    compile(expression).unwrap().apply(root)
}

#[test]
fn test_host_methods() {
    let root = person();
    assert_eq!(eval(".name.upcase", &root), Ok(Some(Value::from("ADA"))));
    assert_eq!(eval(".class", &root), Ok(Some(Value::from("Person"))));
    assert_eq!(eval(".inspect", &root), Ok(Some(Value::from("#<Person>"))));
}

#[test]
fn test_host_errors_propagate() {
    let root = person();
    let err = eval(".secret", &root).unwrap_err();
    assert_eq!(err.reason, ReceiverError::Custom("secret is private".to_string()));

    let err = eval(".missing", &root).unwrap_err();
    assert!(matches!(err.reason, ReceiverError::NoMethod { .. }));
}

#[test]
fn test_generic_key_uses_presence_test() {
    let root = person();
    assert_eq!(eval("[age]", &root), Ok(Some(Value::from(36))));
    assert_eq!(eval("[email]", &root), Ok(Some(Value::from("ada@example.com"))));
    // The string key exists with a nil value, so no symbol fallback happens.
    assert_eq!(eval("[nickname]", &root), Ok(None));
    assert_eq!(eval("[:nickname]", &root), Ok(Some(Value::from("countess"))));
}

#[test]
fn test_generic_key_retries_without_presence_test() {
    let mut entries = HashMap::new();
    entries.insert(Key::symbol("port"), Value::from(8080));
    entries.insert(Key::from("host"), Value::from("localhost"));
    let registry = std::sync::Arc::new(Registry {
        entries,
        ..Registry::default()
    });
    let root = Value::Object(registry.clone());

    assert_eq!(eval("[port]", &root), Ok(Some(Value::from(8080))));
    assert_eq!(eval("[host]", &root), Ok(Some(Value::from("localhost"))));
    assert_eq!(
        *registry.asked.lock().unwrap(),
        vec![Key::from("port"), Key::symbol("port"), Key::from("host")]
    );
}

#[test]
fn test_host_objects_nested_in_values() {
    let root = Value::hash([(Key::symbol("people"), Value::from(vec![person()]))]);
    assert_eq!(eval("[people][0].name", &root), Ok(Some(Value::from("ada"))));
    assert_eq!(eval("[people][1].name", &root), Ok(None));
}
