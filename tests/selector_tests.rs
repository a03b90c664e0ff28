//! Integration tests for selector rule parsing and its observable effects.

use serde_json::json;
use treepick::{pick, Evaluator, Operator, Parser, SelectorError, Value};

#[test]
fn test_key_only_rule_parses_to_key_stages() {
    let selector = Parser::parse("company departments teams");
    let keys: Vec<&str> = selector.stages.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["company", "departments", "teams"]);
    assert!(selector.stages.iter().all(|s| s.conditions.is_empty()));
}

#[test]
fn test_all_three_operators_parse() {
    let selector = Parser::parse("[x=1][y*=2][z!=3]");
    let conditions = &selector.stages[0].conditions;

    assert_eq!(conditions.len(), 3);
    assert_eq!(conditions[0].operator, Operator::Equals);
    assert_eq!(conditions[1].operator, Operator::Contains);
    assert_eq!(conditions[2].operator, Operator::NotEquals);
    assert_eq!(conditions[1].property, "y");
    assert_eq!(conditions[1].value, "2");
}

/// `*=` is recognized before `=`, even when `=` appears earlier in the
/// clause text.
#[test]
fn test_contains_wins_over_equals() {
    let selector = Parser::parse("[a=b*=c]");
    let condition = &selector.stages[0].conditions[0];

    assert_eq!(condition.operator, Operator::Contains);
    assert_eq!(condition.property, "a=b");
    assert_eq!(condition.value, "c");
}

/// The clause splits at the first occurrence of the winning operator.
#[test]
fn test_value_keeps_later_operator_text() {
    let selector = Parser::parse("[note=a=b]");
    let condition = &selector.stages[0].conditions[0];

    assert_eq!(condition.operator, Operator::Equals);
    assert_eq!(condition.property, "note");
    assert_eq!(condition.value, "a=b");
}

#[test]
fn test_key_and_clauses_combine_on_one_stage() {
    let selector = Parser::parse("users[age=30][role*=admin]");

    assert_eq!(selector.stages.len(), 1);
    assert_eq!(selector.stages[0].key, "users");
    assert_eq!(selector.stages[0].conditions.len(), 2);
}

/// Whitespace splits stages before brackets pair up, so a spaced-out clause
/// fragments into key-only stages that match nothing useful.
#[test]
fn test_whitespace_inside_brackets_fragments_the_rule() {
    let selector = Parser::parse("[name = Alice]");
    let keys: Vec<&str> = selector.stages.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["[name", "=", "Alice]"]);

    let source = Value::from(json!({"person": {"name": "Alice"}}));
    assert!(pick(&source, "[name = Alice]").is_empty());
    assert_eq!(pick(&source, "[name=Alice]").len(), 1);
}

/// An unmatched bracket is ordinary key text and matches a field that
/// really carries it.
#[test]
fn test_unmatched_bracket_matches_literal_key() {
    let source = Value::from(json!({"items[": {"count": 1}}));

    let results = pick(&source, "items[");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0], &Value::from(json!({"count": 1})));
}

/// Lenient parsing drops clauses without an operator; the rest of the rule
/// still applies.
#[test]
fn test_unrecognized_clause_is_dropped() {
    let source = Value::from(json!({"users": {"active": 3}}));

    assert_eq!(pick(&source, "users[nonsense]"), pick(&source, "users"));

    let selector = Parser::parse("users[nonsense][active=3]");
    assert_eq!(selector.stages[0].conditions.len(), 1);
    assert_eq!(selector.stages[0].conditions[0].property, "active");
}

#[test]
fn test_strict_parse_rejects_dropped_clause() {
    let result = Parser::parse_strict("records[bad]");
    assert_eq!(
        result,
        Err(SelectorError::UnrecognizedClause {
            stage: 0,
            clause: "bad".to_string(),
        })
    );

    // The stage index counts whitespace-separated tokens.
    let later = Parser::parse_strict("a b[broken]");
    assert_eq!(
        later,
        Err(SelectorError::UnrecognizedClause {
            stage: 1,
            clause: "broken".to_string(),
        })
    );
}

#[test]
fn test_strict_parse_accepts_what_lenient_keeps() {
    let strict = Parser::parse_strict("departments [name=Engineering] employees").unwrap();
    let lenient = Parser::parse("departments [name=Engineering] employees");
    assert_eq!(strict, lenient);
}

#[test]
fn test_unicode_rules_parse() {
    let selector = Parser::parse("部门[名称*=技术]");

    assert_eq!(selector.stages[0].key, "部门");
    assert_eq!(selector.stages[0].conditions[0].property, "名称");
    assert_eq!(selector.stages[0].conditions[0].operator, Operator::Contains);
    assert_eq!(selector.stages[0].conditions[0].value, "技术");
}

/// A parsed selector is reusable across documents and evaluators.
#[test]
fn test_selector_reuse_across_documents() {
    let selector = Parser::parse("servers [status=up]");

    let first = Value::from(json!({"servers": [{"name": "a", "status": "up"}]}));
    let second = Value::from(json!({"servers": [
        {"name": "b", "status": "down"},
        {"name": "c", "status": "up"}
    ]}));

    let from_first = Evaluator::new(&first).evaluate(&selector).unwrap();
    assert_eq!(from_first.len(), 1);

    let from_second = Evaluator::new(&second).evaluate(&selector).unwrap();
    assert_eq!(from_second.len(), 1);
    assert_eq!(
        from_second[0]
            .as_object()
            .and_then(|fields| fields.get("name"))
            .and_then(|name| name.as_str()),
        Some("c")
    );
}
