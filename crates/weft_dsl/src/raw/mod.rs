//! The heterogeneous rule input union.

use weft_ir::Rule;

/// A raw, author-supplied rule value, before normalization.
///
/// Combinators and grammar sections accept `RawRule` so authors can mix
/// literals, patterns, built nodes and forward references freely; the
/// normalizer is the only place this union is taken apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRule {
    /// A literal string.
    String(String),
    /// A regex, as source text.
    Pattern(String),
    /// An already-built rule node.
    Rule(Rule),
    /// A named zero-argument rule function; normalizes to a symbol
    /// reference when the name is a valid identifier.
    NamedFn { name: String },
    /// A list of raw rules. Never a rule by itself; unary combinators
    /// reject it with an arity error before normalization can.
    List(Vec<RawRule>),
    /// An absent value.
    Undefined,
    /// A reference the dynamic rule builder could not resolve. Behaves
    /// like a rule until consumed, then fails with the carried name.
    Deferred { name: String },
}

impl RawRule {
    /// Short description of the value for error messages.
    pub fn describe(&self) -> String {
        match self {
            RawRule::String(value) => format!("\"{value}\""),
            RawRule::Pattern(value) => format!("/{value}/"),
            RawRule::Rule(rule) => format!("a {} rule", rule.tag()),
            RawRule::NamedFn { name } => format!("a rule function named '{name}'"),
            RawRule::List(items) => format!("a list of {} rules", items.len()),
            RawRule::Undefined => "an undefined value".to_owned(),
            RawRule::Deferred { name } => format!("an unresolved reference to '{name}'"),
        }
    }
}

impl From<&str> for RawRule {
    fn from(value: &str) -> Self {
        RawRule::String(value.to_owned())
    }
}

impl From<String> for RawRule {
    fn from(value: String) -> Self {
        RawRule::String(value)
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        RawRule::Rule(rule)
    }
}

impl From<Vec<RawRule>> for RawRule {
    fn from(items: Vec<RawRule>) -> Self {
        RawRule::List(items)
    }
}
