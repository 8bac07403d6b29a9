//! The grammar rule tree.
//!
//! [`Rule`] is the tagged union behind every combinator: leaves for literal
//! strings, patterns, blanks and symbol references; unary wrappers for
//! fields, aliases, tokens, precedence and repetition; `Seq`/`Choice` for
//! the ordered n-ary forms. Composite nodes only ever hold fully-built
//! `Rule` children - raw author input never survives past construction.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// One node of a grammar's rule tree.
///
/// Serializes to the external schema's internally-tagged form, e.g.
/// `{"type": "SEQ", "members": [...]}`. The variant set and field names
/// must match that schema exactly; the downstream parser generator keys
/// off them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    /// Literal string, matched verbatim.
    String { value: String },
    /// Regular expression, stored as its source text (flags discarded).
    Pattern { value: String },
    /// Matches the empty string.
    Blank,
    /// Reference to another rule by name.
    Symbol { name: String },
    /// Ordered concatenation.
    Seq { members: Vec<Rule> },
    /// Ordered alternation; first match wins.
    Choice { members: Vec<Rule> },
    /// Zero or more occurrences.
    Repeat { content: Box<Rule> },
    /// One or more occurrences.
    Repeat1 { content: Box<Rule> },
    /// Tags the matched child with an accessor name. Field names are not
    /// rule declarations and never enter the namespace.
    Field { name: String, content: Box<Rule> },
    /// Renames the matched node in the output tree. `named: true` renames
    /// to another rule's identity; `named: false` makes it anonymous.
    Alias {
        content: Box<Rule>,
        named: bool,
        value: String,
    },
    /// Marks the subtree as one atomic lexical unit.
    Token { content: Box<Rule> },
    /// Like `Token`, but leading whitespace may not be skipped before it.
    ImmediateToken { content: Box<Rule> },
    /// Static precedence weight.
    Prec { value: i32, content: Box<Rule> },
    /// Left associativity with optional weight.
    PrecLeft { value: i32, content: Box<Rule> },
    /// Right associativity with optional weight.
    PrecRight { value: i32, content: Box<Rule> },
    /// Precedence applied at parse time rather than generation time.
    PrecDynamic { value: i32, content: Box<Rule> },
}

impl Rule {
    /// Literal string leaf.
    pub fn string(value: impl Into<String>) -> Self {
        Rule::String {
            value: value.into(),
        }
    }

    /// Pattern leaf from regex source text.
    pub fn pattern(source: impl Into<String>) -> Self {
        Rule::Pattern {
            value: source.into(),
        }
    }

    /// Direct symbol-reference construction. Used internally by the
    /// normalizer and exposed for schema-to-DSL round trips.
    pub fn symbol(name: impl Into<String>) -> Self {
        Rule::Symbol { name: name.into() }
    }

    /// The empty rule.
    pub fn blank() -> Self {
        Rule::Blank
    }

    /// The node's immediate children: `members` for the n-ary kinds, the
    /// single `content` for unary wrappers, empty for leaves.
    pub fn children(&self) -> &[Rule] {
        match self {
            Rule::String { .. } | Rule::Pattern { .. } | Rule::Blank | Rule::Symbol { .. } => &[],
            Rule::Seq { members } | Rule::Choice { members } => members,
            Rule::Repeat { content }
            | Rule::Repeat1 { content }
            | Rule::Field { content, .. }
            | Rule::Alias { content, .. }
            | Rule::Token { content }
            | Rule::ImmediateToken { content }
            | Rule::Prec { content, .. }
            | Rule::PrecLeft { content, .. }
            | Rule::PrecRight { content, .. }
            | Rule::PrecDynamic { content, .. } => std::slice::from_ref(content),
        }
    }

    /// The node's schema tag, e.g. `"SEQ"`. Used in error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::String { .. } => "STRING",
            Rule::Pattern { .. } => "PATTERN",
            Rule::Blank => "BLANK",
            Rule::Symbol { .. } => "SYMBOL",
            Rule::Seq { .. } => "SEQ",
            Rule::Choice { .. } => "CHOICE",
            Rule::Repeat { .. } => "REPEAT",
            Rule::Repeat1 { .. } => "REPEAT1",
            Rule::Field { .. } => "FIELD",
            Rule::Alias { .. } => "ALIAS",
            Rule::Token { .. } => "TOKEN",
            Rule::ImmediateToken { .. } => "IMMEDIATE_TOKEN",
            Rule::Prec { .. } => "PREC",
            Rule::PrecLeft { .. } => "PREC_LEFT",
            Rule::PrecRight { .. } => "PREC_RIGHT",
            Rule::PrecDynamic { .. } => "PREC_DYNAMIC",
        }
    }

    /// The referenced name for a `Symbol` node.
    pub fn as_symbol_name(&self) -> Option<&str> {
        match self {
            Rule::Symbol { name } => Some(name),
            _ => None,
        }
    }

    /// Whether this node is an alias wrapper.
    pub fn is_alias(&self) -> bool {
        matches!(self, Rule::Alias { .. })
    }
}

/// Collect every `Symbol` name reachable from `rule`, depth-first and
/// left-to-right, first occurrence wins. The deterministic order keeps
/// reference-check diagnostics reproducible across builds.
pub fn collect_symbols(rule: &Rule) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    collect_symbols_into(rule, &mut seen, &mut out);
    out
}

/// Accumulating form of [`collect_symbols`], for walking a whole rules
/// section while deduplicating across rule bodies.
pub fn collect_symbols_into(rule: &Rule, seen: &mut FxHashSet<String>, out: &mut Vec<String>) {
    let mut stack: SmallVec<[&Rule; 16]> = smallvec![rule];
    while let Some(node) = stack.pop() {
        if let Rule::Symbol { name } = node {
            if seen.insert(name.clone()) {
                out.push(name.clone());
            }
        }
        // Children pushed in reverse so the walk pops left-to-right.
        for child in node.children().iter().rev() {
            stack.push(child);
        }
    }
}
