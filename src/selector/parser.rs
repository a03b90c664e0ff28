//! Selector rule string parser.
//!
//! A rule is a whitespace-separated list of stages; each stage is an optional
//! key filter followed by zero or more bracketed condition clauses, e.g.
//! `departments [name=Engineering] employees [skills*=Rust]`. Parsing is
//! lenient by default: a clause that carries no recognized operator is
//! dropped rather than rejected, so a malformed rule still selects with the
//! clauses that did parse. `parse_strict` turns those drops into errors.

use super::ast::{Condition, Operator, Selector, Stage};
use super::error::SelectorError;

/// Operator tokens in match priority order. `=` goes last because it is a
/// substring of the other two.
const OPERATORS: [(&str, Operator); 3] = [
    ("*=", Operator::Contains),
    ("!=", Operator::NotEquals),
    ("=", Operator::Equals),
];

/// Parser for selector rule strings.
pub struct Parser {
    input: String,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given rule string.
    pub fn new(rule: &str) -> Self {
        Self {
            input: rule.to_string(),
            position: 0,
        }
    }

    /// Parses a rule string into a selector, dropping unrecognized clauses.
    ///
    /// This never fails: an empty or whitespace-only rule yields an empty
    /// selector, and a bracketed clause without a recognized operator is
    /// discarded (reported at debug level) while the rest of the rule takes
    /// effect.
    ///
    /// # Example
    ///
    /// ```
    /// use treepick::selector::parser::Parser;
    /// use treepick::selector::ast::Operator;
    ///
    /// let selector = Parser::parse("employees [skills*=Rust]");
    /// assert_eq!(selector.stages.len(), 2);
    /// assert_eq!(selector.stages[0].key, "employees");
    /// assert_eq!(selector.stages[1].conditions[0].operator, Operator::Contains);
    /// ```
    pub fn parse(rule: &str) -> Selector {
        let (selector, dropped) = Parser::new(rule).parse_rule();
        for (stage, clause) in &dropped {
            log::debug!(
                "dropping unrecognized condition clause '[{}]' in stage {}",
                clause,
                stage
            );
        }
        selector
    }

    /// Parses a rule string, rejecting clauses without a recognized operator.
    ///
    /// # Errors
    ///
    /// Returns `SelectorError::UnrecognizedClause` for the first bracketed
    /// clause the lenient parser would have dropped.
    pub fn parse_strict(rule: &str) -> Result<Selector, SelectorError> {
        let (selector, dropped) = Parser::new(rule).parse_rule();
        if let Some((stage, clause)) = dropped.into_iter().next() {
            return Err(SelectorError::UnrecognizedClause { stage, clause });
        }
        Ok(selector)
    }

    /// Parses the whole rule, returning the selector and any dropped clauses
    /// as `(stage index, clause text)` pairs.
    fn parse_rule(&mut self) -> (Selector, Vec<(usize, String)>) {
        let mut stages = Vec::new();
        let mut dropped = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_eof() {
                break;
            }
            let token = self.take_token();
            let stage = Self::parse_stage(&token, stages.len(), &mut dropped);
            stages.push(stage);
        }

        (Selector::new(stages), dropped)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Checks if we've reached the end of input.
    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes and returns the next run of non-whitespace characters.
    fn take_token(&mut self) -> String {
        let mut token = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                break;
            }
            token.push(ch);
            self.next();
        }
        token
    }

    /// Parses one stage token into a key filter and its conditions.
    ///
    /// Bracket pairs close at the first `]`; the text outside all pairs,
    /// concatenated and trimmed, is the key. An unmatched `[` has no pair to
    /// strip and stays in the key text.
    fn parse_stage(token: &str, index: usize, dropped: &mut Vec<(usize, String)>) -> Stage {
        let mut key = String::new();
        let mut conditions = Vec::new();
        let mut rest = token;

        while let Some(open) = rest.find('[') {
            let close = match rest[open + 1..].find(']') {
                Some(close) => close,
                None => break,
            };
            key.push_str(&rest[..open]);
            let clause = &rest[open + 1..open + 1 + close];
            match Self::parse_condition(clause) {
                Some(condition) => conditions.push(condition),
                None => dropped.push((index, clause.to_string())),
            }
            rest = &rest[open + close + 2..];
        }
        key.push_str(rest);

        Stage {
            key: key.trim().to_string(),
            conditions,
        }
    }

    /// Parses one bracketed clause body, or `None` if no operator matches.
    ///
    /// The clause splits at the first occurrence of the winning operator
    /// token; later occurrences stay in the value.
    fn parse_condition(clause: &str) -> Option<Condition> {
        for (token, operator) in OPERATORS {
            if let Some(at) = clause.find(token) {
                return Some(Condition {
                    property: clause[..at].trim().to_string(),
                    operator,
                    value: clause[at + token.len()..].trim().to_string(),
                });
            }
        }
        None
    }
}
