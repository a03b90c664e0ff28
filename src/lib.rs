//! treepick - extract nodes from nested trees with CSS-like selector rules.
//!
//! A selector rule is a whitespace-separated chain of stages, each an
//! optional key filter plus bracketed field conditions, e.g.
//! `departments [name=Engineering] employees [skills*=Rust]`. Evaluating a
//! rule walks the whole tree and returns every node that matches, wherever
//! it nests.
//!
//! The library converts JSON, YAML, TOML and JSONL documents into a single
//! [`Value`] tree, so one rule works across input formats.
//!
//! # Example
//!
//! ```
//! use treepick::pick;
//! use treepick::file::loader::parse_json_content;
//!
//! let tree = parse_json_content(
//!     r#"{"team": [{"name": "Ada", "lang": "Rust"}, {"name": "Grace", "lang": "COBOL"}]}"#,
//! )
//! .unwrap();
//!
//! let matches = pick(&tree, "team [lang=Rust]");
//! assert_eq!(matches.len(), 1);
//! ```

pub mod config;
pub mod file;
pub mod selector;
pub mod tree;

pub use selector::{
    Condition, EvalError, Evaluator, Limits, Operator, Parser, Selector, SelectorError, Stage,
};
pub use tree::{Number, Value};

/// Extracts every node matching a selector rule from a tree.
///
/// The rule is parsed leniently (unrecognized condition clauses are
/// dropped), and the tree is walked with default [`Limits`]. Matches come
/// back as references into the tree in first-discovery order, with
/// structural duplicates suppressed.
///
/// An empty or whitespace-only rule matches the whole tree, returning the
/// source itself; a null source never matches anything. If evaluation trips
/// a traversal limit, the error is logged as a warning and the result is
/// empty; use [`Evaluator::evaluate`] to observe the error instead.
///
/// # Example
///
/// ```
/// use treepick::{pick, Value};
/// use treepick::file::loader::parse_json_content;
///
/// let tree = parse_json_content(r#"{"servers": [{"host": "a", "up": true}]}"#).unwrap();
///
/// assert_eq!(pick(&tree, "servers [up=true]").len(), 1);
/// assert_eq!(pick(&tree, ""), vec![&tree]);
/// assert!(pick(&Value::Null, "servers").is_empty());
/// ```
pub fn pick<'a>(source: &'a Value, rule: &str) -> Vec<&'a Value> {
    let selector = Parser::parse(rule);
    match Evaluator::new(source).evaluate(&selector) {
        Ok(matches) => matches,
        Err(err) => {
            log::warn!("selector evaluation aborted: {}", err);
            Vec::new()
        }
    }
}
