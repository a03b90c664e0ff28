//! Document loading functionality.
//!
//! This module provides functions to load documents from files or stdin and
//! parse them into [`Value`](crate::tree::node::Value) trees ready for
//! selector evaluation. JSON, YAML, TOML and JSONL inputs are supported,
//! with transparent gzip decompression.

use crate::tree::node::Value;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Input formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    Toml,
    Jsonl,
    Unknown,
}

/// Loads and parses a document from the filesystem.
///
/// The format is chosen by file extension after stripping a trailing `.gz`
/// (gzipped files are decompressed first): `.json`, `.yaml`/`.yml`, `.toml`,
/// and `.jsonl`/`.ndjson` dispatch directly; any other name is probed as
/// JSON, then JSONL, then TOML, then YAML.
///
/// # Arguments
///
/// * `path` - The path of the document to load
///
/// # Examples
///
/// ```no_run
/// use treepick::file::loader::load_tree_file;
///
/// let tree = load_tree_file("inventory.yaml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read
/// - A gzipped file cannot be decompressed
/// - The contents do not parse in the chosen format
pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read {}", path_ref.display()))?
    };

    match detect_format(path_ref) {
        Format::Json => parse_json_content(&content),
        Format::Yaml => parse_yaml_content(&content),
        Format::Toml => parse_toml_content(&content),
        Format::Jsonl => parse_jsonl_content(&content),
        Format::Unknown => probe_content(&content),
    }
}

/// Loads and parses a document from standard input.
///
/// Gzip-compressed input is detected by its magic bytes and decompressed.
/// With no extension to go by, the content is probed as JSON first, then
/// JSONL, then TOML, then YAML.
///
/// # Examples
///
/// ```no_run
/// use treepick::file::loader::load_tree_from_stdin;
///
/// // Usage: cat inventory.json | treepick 'items [status=active]'
/// let tree = load_tree_from_stdin().unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input is gzipped but corrupted, or is not valid UTF-8
/// - The content parses in none of the probed formats
pub fn load_tree_from_stdin() -> Result<Value> {
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

    probe_content(&content)
}

/// Parses a JSON document into a tree.
pub fn parse_json_content(content: &str) -> Result<Value> {
    let parsed: serde_json::Value =
        serde_json::from_str(content).context("Failed to parse JSON")?;
    Ok(Value::from(parsed))
}

/// Parses a YAML document into a tree.
pub fn parse_yaml_content(content: &str) -> Result<Value> {
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(content).context("Failed to parse YAML")?;
    Ok(Value::from(parsed))
}

/// Parses a TOML document into a tree.
pub fn parse_toml_content(content: &str) -> Result<Value> {
    let parsed: toml::Value = toml::from_str(content).context("Failed to parse TOML")?;
    Ok(Value::from(parsed))
}

/// Parses JSONL content (newline-delimited JSON) into an array tree.
///
/// Each line must be a valid JSON value. Blank lines are skipped.
pub fn parse_jsonl_content(content: &str) -> Result<Value> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let parsed: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        lines.push(Value::from(parsed));
    }

    if lines.is_empty() {
        anyhow::bail!("No valid JSON found in JSONL content");
    }

    Ok(Value::Array(lines))
}

/// Tries each supported format in turn on extension-less content.
fn probe_content(content: &str) -> Result<Value> {
    if let Ok(tree) = parse_json_content(content) {
        return Ok(tree);
    }
    if let Ok(tree) = parse_jsonl_content(content) {
        return Ok(tree);
    }
    if let Ok(tree) = parse_toml_content(content) {
        return Ok(tree);
    }
    parse_yaml_content(content).context("Input is not valid JSON, JSONL, TOML or YAML")
}

/// Determines the input format from the filename, handling a `.gz` suffix.
///
/// Examples:
/// - `data.jsonl` and `data.jsonl.gz` → JSONL
/// - `data.yml.gz` → YAML
/// - `data.txt` → unknown (probed)
fn detect_format<P: AsRef<Path>>(path: P) -> Format {
    let path_str = path.as_ref().to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".jsonl") || base.ends_with(".ndjson") {
        Format::Jsonl
    } else if base.ends_with(".json") {
        Format::Json
    } else if base.ends_with(".yaml") || base.ends_with(".yml") {
        Format::Yaml
    } else if base.ends_with(".toml") {
        Format::Toml
    } else {
        Format::Unknown
    }
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
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
