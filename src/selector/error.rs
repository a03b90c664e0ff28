//! Error types for selector parsing and evaluation.

use std::fmt;

/// Errors that can occur during strict selector parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// A bracketed clause without a recognized operator.
    UnrecognizedClause { stage: usize, clause: String },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::UnrecognizedClause { stage, clause } => write!(
                f,
                "Unrecognized condition clause '[{}]' in stage {}, expected an \
                 operator (*=, != or =)",
                clause, stage
            ),
        }
    }
}

impl std::error::Error for SelectorError {}

/// Errors that can occur during tree evaluation.
///
/// These arise only from the traversal limits; no document shape or selector
/// makes evaluation itself fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Traversal descended past the configured depth limit.
    DepthLimitExceeded { limit: usize },
    /// Traversal performed more steps than the configured limit allows.
    StepLimitExceeded { limit: usize },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DepthLimitExceeded { limit } => {
                write!(f, "Traversal depth limit of {} exceeded", limit)
            }
            EvalError::StepLimitExceeded { limit } => {
                write!(f, "Traversal step limit of {} exceeded", limit)
            }
        }
    }
}

impl std::error::Error for EvalError {}
