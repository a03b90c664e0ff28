//! Condition matching against candidate nodes.

use super::ast::{Condition, Operator};
use crate::tree::node::Value;

/// Checks whether a node satisfies every condition of a stage.
///
/// An empty condition list accepts any non-null node. Non-empty conditions
/// can only be satisfied by objects: each condition looks up its property as
/// a field, case-sensitively, normalizes the field value to text, and
/// compares it against the condition literal. A missing field fails the
/// whole check, and the first failing condition short-circuits.
pub fn matches_conditions(node: &Value, conditions: &[Condition]) -> bool {
    if conditions.is_empty() {
        return !node.is_null();
    }

    let fields = match node.as_object() {
        Some(fields) => fields,
        None => return false,
    };

    for condition in conditions {
        let field = match fields.get(&condition.property) {
            Some(field) => field,
            None => return false,
        };
        if !condition_holds(field, condition) {
            return false;
        }
    }

    true
}

fn condition_holds(field: &Value, condition: &Condition) -> bool {
    let text = field.to_text();
    match condition.operator {
        Operator::Equals => text == condition.value,
        Operator::Contains => text.contains(&condition.value),
        Operator::NotEquals => text != condition.value,
    }
}
