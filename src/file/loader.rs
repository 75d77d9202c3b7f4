//! Document loading functionality.
//!
//! This module provides functions to load YAML or JSON documents from files
//! or stdin and convert them into [`Value`]s that path expressions can be
//! applied to. Gzip-compressed input and JSON Lines files are supported.

use crate::value::convert::from_yaml;
use crate::value::Value;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Loads and parses a YAML or JSON document from the filesystem.
///
/// Files ending in `.gz` are decompressed first. Files named `*.jsonl` or
/// `*.ndjson` (optionally followed by `.gz`) are read as one JSON value per
/// line and become an array.
///
/// # Arguments
///
/// * `path` - The path to the document
/// * `symbolize` - Load `:name` strings and keys as symbols
///
/// # Examples
///
/// ```no_run
/// use schmuck::file::loader::load_document;
///
/// let doc = load_document("data.yaml", true).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid gzip when it
/// claims to be, or does not parse.
pub fn load_document<P: AsRef<Path>>(path: P, symbolize: bool) -> Result<Value> {
    let path_ref = path.as_ref();

    // Check if file is gzipped
    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };
    log::debug!("loaded {} bytes from {}", content.len(), path_ref.display());

    if determine_jsonl_format(path_ref) {
        parse_jsonl_content(&content, symbolize)
    } else {
        parse_document(&content, symbolize)
    }
}

/// Loads and parses a document from standard input.
///
/// Gzip input is detected by its magic bytes.
pub fn load_document_from_stdin(symbolize: bool) -> Result<Value> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_document(&content, symbolize).context("Failed to parse document from stdin")
}

/// Parses YAML (or JSON) text into a [`Value`].
///
/// A stream with several `---` separated documents becomes an array with
/// one element per document; an empty stream is `nil`.
pub fn parse_document(content: &str, symbolize: bool) -> Result<Value> {
    let mut documents = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .with_context(|| format!("Failed to parse document {}", index + 1))?;
        documents.push(from_yaml(&value, symbolize));
    }

    Ok(match documents.len() {
        0 => Value::Nil,
        1 => documents.remove(0),
        _ => Value::Array(documents),
    })
}

/// Parses JSONL content (newline-delimited JSON) into an array.
///
/// Each line must be a valid JSON value. Blank lines are skipped.
pub fn parse_jsonl_content(content: &str, symbolize: bool) -> Result<Value> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_yaml::Value = serde_yaml::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        lines.push(from_yaml(&value, symbolize));
    }

    Ok(Value::Array(lines))
}

/// Determines if file is JSONL format based on filename.
///
/// Checks for .jsonl or .ndjson extension, handling .gz suffix correctly.
/// Examples:
/// - `data.jsonl` → true
/// - `data.jsonl.gz` → true
/// - `data.json.gz` → false
fn determine_jsonl_format<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();

    let base = if let Some(stripped) = path_str.strip_suffix(".gz") {
        stripped
    } else {
        &path_str
    };

    base.ends_with(".jsonl") || base.ends_with(".ndjson")
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
