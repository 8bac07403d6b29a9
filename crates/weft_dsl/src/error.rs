//! Failures raised while constructing or normalizing a single rule.

use thiserror::Error;
use weft_diagnostic::ErrorCode;

/// A rule-construction or normalization failure.
///
/// In the fail-fast build posture these abort the whole build; in the
/// accumulate posture the section validators convert them into logged
/// diagnostics and substitute a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A unary combinator was handed a list of rules.
    #[error("the `{caller}` function only takes one rule argument; did you mean to call `seq`?")]
    Arity { caller: &'static str },

    /// A precedence combinator was handed the missing-value sentinel.
    #[error("missing precedence value")]
    MissingPrecedence,

    /// The value is not recognizable as a rule.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// An absent value, or a deferred reference that was consumed.
    #[error("undefined symbol{}", quoted_suffix(.name))]
    UndefinedSymbol { name: Option<String> },

    /// An alias target that is neither a string nor a symbol.
    #[error("invalid alias target: {0}")]
    InvalidAliasTarget(String),
}

fn quoted_suffix(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" '{name}'"),
        None => String::new(),
    }
}

impl RuleError {
    /// The stable diagnostic code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            RuleError::Arity { .. } => ErrorCode::E0001,
            RuleError::MissingPrecedence => ErrorCode::E0002,
            RuleError::InvalidAliasTarget(_) => ErrorCode::E0003,
            RuleError::InvalidRule(_) => ErrorCode::E1001,
            RuleError::UndefinedSymbol { .. } => ErrorCode::E1002,
        }
    }
}
