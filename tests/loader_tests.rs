//! Loading documents from disk and applying paths to them.

use flate2::write::GzEncoder;
use flate2::Compression;
use schmuck::file::loader::load_document;
use schmuck::{compile, Key, Value};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper function to create a temporary file path with the given name
fn temp_file_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

const ROWS_YAML: &str = "\
- :integer: 1
  :multiples: [2, 3, 4]
- :integer: 2
  :multiples: [4, 6, 8]
- :integer: 42
";

fn second_multiples(doc: &Value) -> Vec<Option<Value>> {
    let path = compile("[multiples][1]").unwrap();
    match doc {
        Value::Array(rows) => rows.iter().map(|row| path.apply(row).unwrap()).collect(),
        other => panic!("Expected array, got {:?}", other),
    }
}

#[test]
fn test_load_yaml_with_symbol_keys() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "rows.yaml");
    fs::write(&path, ROWS_YAML).unwrap();

    let doc = load_document(&path, true).unwrap();
    assert_eq!(
        second_multiples(&doc),
        vec![Some(Value::from(3)), Some(Value::from(6)), None]
    );

    let first = compile("[0][:integer]").unwrap().apply(&doc).unwrap();
    assert_eq!(first, Some(Value::from(1)));
}

#[test]
fn test_load_without_symbolizing() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "rows.yaml");
    fs::write(&path, ROWS_YAML).unwrap();

    let doc = load_document(&path, false).unwrap();
    // `:` is not a word character, so the colon-prefixed text cannot be quoted.
    let err = compile("[0][':integer']").unwrap_err();
    assert!(err.to_string().contains("position 3"));

    // Keys stay plain strings, so neither key form reaches them.
    assert_eq!(compile("[0][:integer]").unwrap().apply(&doc).unwrap(), None);
    assert_eq!(compile("[0][integer]").unwrap().apply(&doc).unwrap(), None);
    assert_eq!(
        compile("[0].keys.first").unwrap().apply(&doc).unwrap(),
        Some(Value::from(":integer"))
    );
}

#[test]
fn test_load_json() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "data.json");
    fs::write(&path, r#"{"users": [{"name": "alice"}, {"name": "bob"}]}"#).unwrap();

    let doc = load_document(&path, true).unwrap();
    let name = compile("[users][1][\"name\"].capitalize").unwrap();
    assert_eq!(name.apply(&doc).unwrap(), Some(Value::from("Bob")));
}

#[test]
fn test_load_gzipped_yaml() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "rows.yaml.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(ROWS_YAML.as_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    let doc = load_document(&path, true).unwrap();
    assert_eq!(
        second_multiples(&doc),
        vec![Some(Value::from(3)), Some(Value::from(6)), None]
    );
}

#[test]
fn test_load_corrupted_gzip_fails() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "broken.yaml.gz");
    fs::write(&path, b"definitely not gzip").unwrap();

    assert!(load_document(&path, true).is_err());
}

#[test]
fn test_load_jsonl() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "events.jsonl");
    fs::write(&path, "{\"id\": 1}\n{\"id\": 2}\n\n{\"id\": 3}\n").unwrap();

    let doc = load_document(&path, true).unwrap();
    let ids = compile(".size").unwrap().apply(&doc).unwrap();
    assert_eq!(ids, Some(Value::from(3)));
    assert_eq!(
        compile("[2]").unwrap().apply(&doc).unwrap(),
        Some(Value::hash([(Key::from("id"), Value::from(3))]))
    );
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = load_document(temp_file_path(&dir, "absent.yaml"), true).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}
