//! Tree value representation.
//!
//! This module provides the core data structure treepick operates on: a tagged
//! tree of objects, arrays, and scalar values. Documents in any supported input
//! format (JSON, YAML, TOML) are converted into `Value` before evaluation, so
//! the selector engine dispatches on explicit variants rather than on the
//! habits of any one format.
//!
//! # Example
//!
//! ```
//! use treepick::tree::node::{Value, Number};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Value::String("widget".to_string()));
//! map.insert("count".to_string(), Value::Number(Number::Integer(3)));
//! let object = Value::Object(map);
//!
//! assert!(object.is_object());
//! assert_eq!(object.canonical_string(), r#"{"name":"widget","count":3}"#);
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A tree number (integer or float).
///
/// Integers keep their integral textual form (`30`, never `30.0`), which
/// matters for condition matching against literal selector values.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(i) => serializer.serialize_i64(*i),
            // JSON has no representation for non-finite floats
            Number::Float(f) if !f.is_finite() => serializer.serialize_unit(),
            Number::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

/// A node in the input tree.
///
/// Objects preserve field insertion order (`IndexMap`), which fixes both the
/// traversal order of the evaluator and the canonical serialization used for
/// duplicate suppression. The enum is fully owned, so cyclic structures are
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An object containing key-value pairs
    Object(IndexMap<String, Value>),
    /// An array containing ordered values
    Array(Vec<Value>),
    /// A string value
    String(String),
    /// A number (integer or float)
    Number(Number),
    /// A boolean value
    Boolean(bool),
    /// A null value
    Null,
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use treepick::tree::node::{Value, Number};
    /// use indexmap::IndexMap;
    ///
    /// assert!(Value::Object(IndexMap::new()).is_container());
    /// assert!(Value::Array(vec![]).is_container());
    /// assert!(!Value::Number(Number::Integer(42)).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    /// Returns the object fields if this value is an object.
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the array elements if this value is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string content if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Normalizes this value to its comparison text.
    ///
    /// Condition matching compares field values against selector literals as
    /// text. The normalization rules are: null becomes the empty string,
    /// strings pass through unchanged, numbers and booleans use their literal
    /// textual form, arrays join their normalized elements with commas, and
    /// objects use their canonical JSON serialization.
    ///
    /// # Example
    ///
    /// ```
    /// use treepick::tree::node::{Value, Number};
    ///
    /// assert_eq!(Value::Null.to_text(), "");
    /// assert_eq!(Value::Number(Number::Integer(30)).to_text(), "30");
    ///
    /// let tags = Value::Array(vec![
    ///     Value::String("Java".to_string()),
    ///     Value::String("Python".to_string()),
    /// ]);
    /// assert_eq!(tags.to_text(), "Java,Python");
    /// ```
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Array(items) => items
                .iter()
                .map(|item| item.to_text())
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => self.canonical_string(),
        }
    }

    /// Returns the compact JSON serialization of this value.
    ///
    /// Object keys appear in insertion order, so two references to the same
    /// node always produce identical strings. This is the identity key used
    /// for duplicate suppression in results. Falls back to the empty string
    /// if serialization fails.
    pub fn canonical_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
