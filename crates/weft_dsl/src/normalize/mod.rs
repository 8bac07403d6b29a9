//! The single coercion point from raw input to rule nodes.

use weft_ir::{is_valid_name, Rule};

use crate::{RawRule, RuleError};

/// Normalize a raw value into a rule node.
///
/// - strings and patterns become the matching leaf, verbatim;
/// - an existing node passes through unchanged, so normalization is
///   idempotent;
/// - a named rule function becomes a symbol reference to that name,
///   provided the name is a valid identifier;
/// - an absent value or a consumed deferred reference fails as an
///   undefined symbol;
/// - anything else is not a rule.
pub fn normalize(raw: RawRule) -> Result<Rule, RuleError> {
    match raw {
        RawRule::String(value) => Ok(Rule::String { value }),
        RawRule::Pattern(value) => Ok(Rule::Pattern { value }),
        RawRule::Rule(rule) => Ok(rule),
        RawRule::NamedFn { name } => {
            if is_valid_name(&name) {
                Ok(Rule::symbol(name))
            } else {
                Err(RuleError::InvalidRule(format!(
                    "invalid name for a rule function: '{name}'"
                )))
            }
        }
        RawRule::Undefined => Err(RuleError::UndefinedSymbol { name: None }),
        RawRule::Deferred { name } => Err(RuleError::UndefinedSymbol { name: Some(name) }),
        list @ RawRule::List(_) => Err(RuleError::InvalidRule(list.describe())),
    }
}

/// Normalize every raw value in order, collecting into a node list.
///
/// The first operand that fails aborts the whole list with that error.
pub fn normalize_all(
    raws: impl IntoIterator<Item = RawRule>,
) -> Result<Vec<Rule>, RuleError> {
    raws.into_iter().map(normalize).collect()
}
