//! The tree model treepick operates on.
//!
//! Input documents of every supported format are converted into
//! [`node::Value`], a tagged enum of objects, arrays, and scalars. The
//! selector engine dispatches on these explicit variants; `convert` supplies
//! the `From` impls for the serde value types of each input format.

pub mod convert;
pub mod node;

pub use node::{Number, Value};
