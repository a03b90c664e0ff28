//! File I/O for input documents.
//!
//! This module loads JSON, YAML, TOML and JSONL documents from disk or
//! stdin, with transparent gzip decompression, producing trees for selector
//! evaluation.

pub mod loader;
