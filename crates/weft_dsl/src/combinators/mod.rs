//! One constructor per rule kind.
//!
//! Each combinator validates its own shape contract, then hands every
//! operand to [`normalize`]. They are plain functions over values; the
//! namespace checks happen later, in the grammar assembler, never here.

use weft_ir::Rule;

use crate::normalize::normalize_all;
use crate::{normalize, RawRule, RuleError};

/// A literal string operand.
pub fn lit(value: impl Into<String>) -> RawRule {
    RawRule::String(value.into())
}

/// A pattern operand from regex source text.
pub fn pat(source: impl Into<String>) -> RawRule {
    RawRule::Pattern(source.into())
}

/// A reference to a rule by name. The name is resolved against the
/// namespace at assembly time, so forward and mutual references are fine.
pub fn sym(name: impl Into<String>) -> RawRule {
    RawRule::Rule(Rule::symbol(name))
}

/// A named zero-argument rule function, the other spelling of a
/// forward reference. Normalization validates the identifier.
pub fn named_fn(name: impl Into<String>) -> RawRule {
    RawRule::NamedFn { name: name.into() }
}

/// The empty rule.
pub fn blank() -> Rule {
    Rule::blank()
}

/// Concatenation, in order. Accepts any number of members.
pub fn seq(members: impl IntoIterator<Item = RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::Seq {
        members: normalize_all(members)?,
    })
}

/// Alternation. Order is meaningful: first match wins.
pub fn choice(members: impl IntoIterator<Item = RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::Choice {
        members: normalize_all(members)?,
    })
}

/// Zero or one occurrence: `choice(rule, blank)`.
pub fn optional(rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    let rule = one_rule("optional", rule)?;
    choice([rule, RawRule::Rule(Rule::blank())])
}

/// Zero or more occurrences.
pub fn repeat(rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::Repeat {
        content: Box::new(normalize(one_rule("repeat", rule)?)?),
    })
}

/// One or more occurrences.
pub fn repeat1(rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::Repeat1 {
        content: Box::new(normalize(one_rule("repeat1", rule)?)?),
    })
}

/// Tag the matched child with an accessor name. Field names are not
/// declarations; they are never checked against the namespace.
pub fn field(name: impl Into<String>, rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::Field {
        name: name.into(),
        content: Box::new(normalize(rule.into())?),
    })
}

/// Rename the matched node. A string target produces an anonymous alias;
/// a target that normalizes to a symbol produces a named alias carrying
/// the symbol's name. A deferred target fails with its reference error.
pub fn alias(rule: impl Into<RawRule>, target: impl Into<RawRule>) -> Result<Rule, RuleError> {
    let content = Box::new(normalize(rule.into())?);
    match target.into() {
        RawRule::String(value) => Ok(Rule::Alias {
            content,
            named: false,
            value,
        }),
        target => match normalize(target)? {
            Rule::Symbol { name } => Ok(Rule::Alias {
                content,
                named: true,
                value: name,
            }),
            other => Err(RuleError::InvalidAliasTarget(format!(
                "a {} rule",
                other.tag()
            ))),
        },
    }
}

/// Mark the subtree as one atomic lexical unit.
pub fn token(rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::Token {
        content: Box::new(normalize(rule.into())?),
    })
}

/// Like [`token`], but no whitespace skipping may precede the match.
pub fn token_immediate(rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::ImmediateToken {
        content: Box::new(normalize(rule.into())?),
    })
}

/// A present-or-missing precedence weight.
///
/// Plain integers convert into present values. [`PrecValue::MISSING`]
/// models weight-less data arriving from outside the typed API (for
/// example a hand-edited document) and fails the combinator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrecValue(Option<i32>);

impl PrecValue {
    /// The absent-weight sentinel.
    pub const MISSING: PrecValue = PrecValue(None);

    fn get(self) -> Result<i32, RuleError> {
        self.0.ok_or(RuleError::MissingPrecedence)
    }
}

impl From<i32> for PrecValue {
    fn from(value: i32) -> Self {
        PrecValue(Some(value))
    }
}

/// Static precedence used to resolve generation-time conflicts.
pub fn prec(value: impl Into<PrecValue>, rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::Prec {
        value: value.into().get()?,
        content: Box::new(normalize(one_rule("prec", rule)?)?),
    })
}

/// Left associativity, default weight 0.
pub fn prec_left(value: impl Into<PrecValue>, rule: impl Into<RawRule>) -> Result<Rule, RuleError> {
    Ok(Rule::PrecLeft {
        value: value.into().get()?,
        content: Box::new(normalize(one_rule("prec_left", rule)?)?),
    })
}

/// Right associativity, default weight 0.
pub fn prec_right(
    value: impl Into<PrecValue>,
    rule: impl Into<RawRule>,
) -> Result<Rule, RuleError> {
    Ok(Rule::PrecRight {
        value: value.into().get()?,
        content: Box::new(normalize(one_rule("prec_right", rule)?)?),
    })
}

/// Precedence compared at parse time instead of generation time.
pub fn prec_dynamic(
    value: impl Into<PrecValue>,
    rule: impl Into<RawRule>,
) -> Result<Rule, RuleError> {
    Ok(Rule::PrecDynamic {
        value: value.into().get()?,
        content: Box::new(normalize(one_rule("prec_dynamic", rule)?)?),
    })
}

/// Guard for the unary combinators: a list where one rule was expected
/// is an arity misuse, reported against the calling combinator.
fn one_rule(caller: &'static str, rule: impl Into<RawRule>) -> Result<RawRule, RuleError> {
    match rule.into() {
        RawRule::List(_) => Err(RuleError::Arity { caller }),
        raw => Ok(raw),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
