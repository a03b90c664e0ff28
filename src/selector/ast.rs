//! Abstract syntax tree types for selector rules.

/// The comparison operator of a condition clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Exact string equality (=)
    Equals,
    /// Substring containment (*=)
    Contains,
    /// String inequality (!=)
    NotEquals,
}

/// A single `[property op value]` clause constraining one field of a
/// candidate node.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field name, looked up case-sensitively.
    pub property: String,
    pub operator: Operator,
    /// Literal compared against the field's normalized text.
    pub value: String,
}

/// One whitespace-separated unit of a rule: an optional key filter plus zero
/// or more field conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Key filter; empty matches any key.
    pub key: String,
    pub conditions: Vec<Condition>,
}

impl Stage {
    /// Returns true if this stage's key filter accepts the given key.
    ///
    /// An empty filter accepts every key; otherwise the comparison is
    /// case-insensitive under Unicode lowercase folding. Condition property
    /// lookups are case-sensitive; only key filters fold case.
    pub fn key_matches(&self, key: &str) -> bool {
        self.key.is_empty() || key.to_lowercase() == self.key.to_lowercase()
    }
}

/// A complete parsed selector rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Stages in ancestor-to-descendant order.
    pub stages: Vec<Stage>,
}

impl Selector {
    /// Creates a new selector with the given stages.
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Returns true if the rule had no stages (empty or whitespace-only).
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
