//! Selector rule parsing and evaluation.
//!
//! This module provides the selector engine: a small CSS-like rule language
//! for pulling nodes out of arbitrarily nested trees by key path and field
//! conditions.
//!
//! # Supported Syntax
//!
//! - `key` - stage matching fields named `key` (case-insensitive)
//! - `[prop=value]` - field equals the literal value
//! - `[prop*=value]` - field text contains the literal value
//! - `[prop!=value]` - field text differs from the literal value
//! - `key[prop=value]` - key filter and conditions on one stage
//! - whitespace separates stages; later stages match among descendants
//!
//! # Examples
//!
//! ```
//! // departments [name=Engineering] employees - employees of one department
//! // servers [status!=down] - server entries not marked down
//! // [skills*=Rust] - any object whose skills mention Rust
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod parser;

pub use ast::{Condition, Operator, Selector, Stage};
pub use error::{EvalError, SelectorError};
pub use evaluator::{Evaluator, Limits};
pub use matcher::matches_conditions;
pub use parser::Parser;
