//! File I/O for documents.
//!
//! This module loads YAML, JSON and JSON Lines documents from disk or stdin
//! into [`Value`](crate::value::Value)s.

pub mod loader;
