//! Iterative tree traversal and match collection.

use std::collections::HashSet;

use super::ast::Selector;
use super::error::EvalError;
use super::matcher::matches_conditions;
use crate::tree::node::Value;

/// Traversal budgets for one evaluation.
///
/// No well-formed document comes near the defaults; they exist to turn
/// pathological inputs into reportable errors instead of unbounded work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum container nesting depth.
    pub max_depth: usize,
    /// Maximum number of traversal steps.
    pub max_steps: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_steps: 1_000_000,
        }
    }
}

/// One unit of pending traversal work.
///
/// `Visit` processes a node at a stage. `Element` examines one array element
/// against its array's active stage before the element's own visits run;
/// keeping it a separate frame preserves the result order of the equivalent
/// nested recursion.
enum Frame<'a> {
    Visit {
        node: &'a Value,
        stage: usize,
        last_key: Option<&'a str>,
        depth: usize,
    },
    Element {
        node: &'a Value,
        stage: usize,
        depth: usize,
    },
}

/// Evaluates parsed selectors against a tree.
///
/// Matches are returned as references into the tree in first-discovery
/// order, with structural duplicates suppressed. The traversal advances
/// through selector stages where keys and conditions allow, and
/// independently restarts the whole selector at every subtree, so a rule
/// can match at any depth.
pub struct Evaluator<'a> {
    root: &'a Value,
    limits: Limits,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over the given tree with default limits.
    pub fn new(root: &'a Value) -> Self {
        Evaluator {
            root,
            limits: Limits::default(),
        }
    }

    /// Creates an evaluator with explicit traversal limits.
    pub fn with_limits(root: &'a Value, limits: Limits) -> Self {
        Evaluator { root, limits }
    }

    /// Evaluates a selector and returns the matching nodes.
    ///
    /// An empty selector matches the whole tree: the result is the root
    /// itself, or nothing when the root is null. Otherwise the tree is
    /// walked depth-first in field and index order. An object is emitted
    /// when it satisfies the final stage's conditions and was reached under
    /// the stage's key; array elements are emitted on conditions alone, and
    /// an array itself can only satisfy a keyless stage.
    ///
    /// # Errors
    ///
    /// Returns `EvalError` when a traversal limit is exceeded.
    pub fn evaluate(&self, selector: &Selector) -> Result<Vec<&'a Value>, EvalError> {
        if selector.is_empty() {
            if self.root.is_null() {
                return Ok(vec![]);
            }
            return Ok(vec![self.root]);
        }

        fn record<'a>(node: &'a Value, seen: &mut HashSet<String>, results: &mut Vec<&'a Value>) {
            if seen.insert(node.canonical_string()) {
                results.push(node);
            }
        }

        let stages = &selector.stages;
        let last_stage = stages.len() - 1;

        let mut results: Vec<&'a Value> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut visited: HashSet<(usize, usize)> = HashSet::new();
        let mut steps = 0usize;

        let mut stack = vec![Frame::Visit {
            node: self.root,
            stage: 0,
            last_key: None,
            depth: 0,
        }];

        while let Some(frame) = stack.pop() {
            steps += 1;
            if steps > self.limits.max_steps {
                return Err(EvalError::StepLimitExceeded {
                    limit: self.limits.max_steps,
                });
            }

            match frame {
                Frame::Visit {
                    node,
                    stage,
                    last_key,
                    depth,
                } => {
                    if depth > self.limits.max_depth {
                        return Err(EvalError::DepthLimitExceeded {
                            limit: self.limits.max_depth,
                        });
                    }
                    // Every node has a single parent, so a repeat arrival at
                    // the same stage can only redo work already done.
                    if !visited.insert((node as *const Value as usize, stage)) {
                        continue;
                    }

                    let current = &stages[stage];

                    match node {
                        Value::Object(fields) => {
                            let satisfied = matches_conditions(node, &current.conditions);

                            if satisfied
                                && stage == last_stage
                                && last_key.map_or(current.key.is_empty(), |k| current.key_matches(k))
                            {
                                record(node, &mut seen, &mut results);
                            }

                            // Fields reversed so pops run in insertion order;
                            // per field the advancement pops before the restart.
                            for (key, child) in fields.iter().rev() {
                                if !child.is_container() {
                                    continue;
                                }
                                stack.push(Frame::Visit {
                                    node: child,
                                    stage: 0,
                                    last_key: Some(key),
                                    depth: depth + 1,
                                });
                                if satisfied && stage < last_stage && current.key_matches(key) {
                                    stack.push(Frame::Visit {
                                        node: child,
                                        stage: stage + 1,
                                        last_key: Some(key),
                                        depth: depth + 1,
                                    });
                                }
                            }
                        }
                        Value::Array(items) => {
                            // The array itself can only satisfy a keyless stage.
                            if current.key.is_empty()
                                && stage == last_stage
                                && matches_conditions(node, &current.conditions)
                            {
                                record(node, &mut seen, &mut results);
                            }

                            for item in items.iter().rev() {
                                if item.is_container() {
                                    stack.push(Frame::Element {
                                        node: item,
                                        stage,
                                        depth: depth + 1,
                                    });
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Frame::Element { node, stage, depth } => {
                    let current = &stages[stage];
                    let satisfied = matches_conditions(node, &current.conditions);

                    // Elements are reached by index, not by key, so the
                    // final stage's key filter does not apply to them.
                    if satisfied && stage == last_stage {
                        record(node, &mut seen, &mut results);
                    }

                    stack.push(Frame::Visit {
                        node,
                        stage: 0,
                        last_key: None,
                        depth,
                    });
                    if satisfied && stage < last_stage {
                        stack.push(Frame::Visit {
                            node,
                            stage: stage + 1,
                            last_key: None,
                            depth,
                        });
                    }
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::parser::Parser;
    use crate::tree::node::Number;

    fn object(fields: Vec<(&str, Value)>) -> Value {
        Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    fn evaluate<'a>(root: &'a Value, rule: &str) -> Vec<&'a Value> {
        Evaluator::new(root).evaluate(&Parser::parse(rule)).unwrap()
    }

    #[test]
    fn test_empty_selector_returns_root() {
        let root = object(vec![("a", Value::Null)]);
        let results = evaluate(&root, "");
        assert_eq!(results, vec![&root]);

        let scalar = string("hello");
        assert_eq!(evaluate(&scalar, "   "), vec![&scalar]);
    }

    #[test]
    fn test_empty_selector_on_null_returns_nothing() {
        assert!(evaluate(&Value::Null, "").is_empty());
    }

    #[test]
    fn test_null_root_never_matches() {
        assert!(evaluate(&Value::Null, "anything").is_empty());
    }

    #[test]
    fn test_single_key_selects_named_object() {
        let users = object(vec![("count", Value::Number(Number::Integer(2)))]);
        let root = object(vec![("users", users.clone())]);

        let results = evaluate(&root, "users");
        assert_eq!(results, vec![&users]);
    }

    #[test]
    fn test_key_comparison_is_case_insensitive() {
        let users = object(vec![("count", Value::Number(Number::Integer(2)))]);
        let root = object(vec![("users", users.clone())]);

        assert_eq!(evaluate(&root, "USERS"), vec![&users]);
        assert_eq!(evaluate(&root, "Users"), vec![&users]);
    }

    #[test]
    fn test_scalar_leaves_are_never_matched() {
        // Only containers can be results; a key naming a scalar selects
        // nothing.
        let root = object(vec![("name", string("Alice"))]);
        assert!(evaluate(&root, "name").is_empty());
    }

    #[test]
    fn test_key_selects_at_any_depth() {
        let target = object(vec![("found", Value::Boolean(true))]);
        let root = object(vec![(
            "a",
            object(vec![("b", object(vec![("target", target.clone())]))]),
        )]);

        assert_eq!(evaluate(&root, "target"), vec![&target]);
    }

    #[test]
    fn test_conditions_filter_objects() {
        let alice = object(vec![("name", string("Alice")), ("age", Value::Number(Number::Integer(30)))]);
        let bob = object(vec![("name", string("Bob")), ("age", Value::Number(Number::Integer(25)))]);
        let root = object(vec![("people", Value::Array(vec![alice.clone(), bob.clone()]))]);

        assert_eq!(evaluate(&root, "[name=Alice]"), vec![&alice]);
        assert_eq!(evaluate(&root, "[age!=30]"), vec![&bob]);
    }

    #[test]
    fn test_chain_advancement_across_stages() {
        let engineer = object(vec![("name", string("Sara")), ("role", string("engineer"))]);
        let root = object(vec![(
            "teams",
            object(vec![(
                "members",
                Value::Array(vec![engineer.clone()]),
            )]),
        )]);

        assert_eq!(evaluate(&root, "teams members [role=engineer]"), vec![&engineer]);
    }

    #[test]
    fn test_advancement_requires_parent_conditions() {
        let team = object(vec![("size", Value::Number(Number::Integer(3)))]);
        let root = object(vec![(
            "dept",
            object(vec![("kind", string("eng")), ("team", team.clone())]),
        )]);

        // A stage's conditions gate advancement out of the object that
        // holds the matching field.
        assert_eq!(evaluate(&root, "[kind=eng] team"), vec![&team]);
        assert!(evaluate(&root, "[kind=sales] team").is_empty());
    }

    #[test]
    fn test_final_stage_combines_key_and_conditions() {
        let sales = object(vec![("kind", string("sales"))]);
        let eng = object(vec![("kind", string("eng"))]);
        let root = object(vec![
            ("east", object(vec![("team", sales.clone())])),
            ("west", object(vec![("team", eng.clone())])),
        ]);

        // On the last stage both the arrival key and the conditions apply
        // to the same node.
        assert_eq!(evaluate(&root, "team[kind=eng]"), vec![&eng]);
    }

    #[test]
    fn test_intermediate_levels_may_be_skipped() {
        let item = object(vec![("sku", string("A-1"))]);
        let root = object(vec![(
            "warehouse",
            object(vec![(
                "shelves",
                object(vec![("items", Value::Array(vec![item.clone()]))]),
            )]),
        )]);

        // The shelves level between the two stages does not break the match.
        assert_eq!(evaluate(&root, "warehouse [sku=A-1]"), vec![&item]);
    }

    #[test]
    fn test_array_is_not_selectable_by_key() {
        let root = object(vec![(
            "items",
            Value::Array(vec![Value::Number(Number::Integer(1))]),
        )]);
        assert!(evaluate(&root, "items").is_empty());
    }

    #[test]
    fn test_keyless_stage_selects_all_containers() {
        let inner = object(vec![("x", Value::Number(Number::Integer(1)))]);
        let items = Value::Array(vec![inner.clone()]);
        let root = object(vec![("items", items.clone())]);

        // "[]" parses to a keyless stage with no conditions.
        let results = evaluate(&root, "[]");
        assert_eq!(results, vec![&root, &items, &inner]);
    }

    #[test]
    fn test_structural_duplicates_are_suppressed() {
        let twin = object(vec![("v", Value::Number(Number::Integer(1)))]);
        let root = object(vec![(
            "all",
            Value::Array(vec![twin.clone(), twin.clone()]),
        )]);

        // Two identical elements serialize identically, so only the first
        // discovery is kept.
        let results = evaluate(&root, "[v=1]");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], &twin);
    }

    #[test]
    fn test_results_follow_first_discovery_order() {
        let inner = object(vec![("v", Value::Number(Number::Integer(1))), ("id", string("inner"))]);
        let b = object(vec![("v", Value::Number(Number::Integer(1))), ("id", string("b"))]);
        let root = Value::Array(vec![Value::Array(vec![inner.clone()]), b.clone()]);

        // The nested element is fully explored before its later sibling is
        // examined, exactly as the equivalent recursion would.
        let results = evaluate(&root, "[v=1]");
        assert_eq!(results, vec![&inner, &b]);
    }

    #[test]
    fn test_condition_only_stage_matches_array_elements() {
        let a = object(vec![("name", string("a"))]);
        let b = object(vec![("name", string("b"))]);
        let root = object(vec![("team", Value::Array(vec![a.clone(), b.clone()]))]);

        assert_eq!(evaluate(&root, "team [name=a]"), vec![&a]);
    }

    #[test]
    fn test_depth_limit_is_reported() {
        let mut node = object(vec![("leaf", Value::Boolean(true))]);
        for _ in 0..10 {
            node = object(vec![("nested", node)]);
        }

        let limits = Limits {
            max_depth: 4,
            max_steps: 1_000_000,
        };
        let result = Evaluator::with_limits(&node, limits).evaluate(&Parser::parse("nested"));
        assert_eq!(result, Err(EvalError::DepthLimitExceeded { limit: 4 }));
    }

    #[test]
    fn test_step_limit_is_reported() {
        let wide = Value::Array(
            (0..100)
                .map(|i| object(vec![("i", Value::Number(Number::Integer(i)))]))
                .collect(),
        );

        let limits = Limits {
            max_depth: 512,
            max_steps: 10,
        };
        let result = Evaluator::with_limits(&wide, limits).evaluate(&Parser::parse("[i=5]"));
        assert_eq!(result, Err(EvalError::StepLimitExceeded { limit: 10 }));
    }

    #[test]
    fn test_within_limits_succeeds() {
        let root = object(vec![("a", object(vec![("b", Value::Boolean(true))]))]);
        let limits = Limits {
            max_depth: 8,
            max_steps: 100,
        };
        let results = Evaluator::with_limits(&root, limits)
            .evaluate(&Parser::parse("a"))
            .unwrap();
        assert_eq!(results.len(), 1);
    }
}
