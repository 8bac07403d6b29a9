//! Rule combinators and the normalizer behind them.
//!
//! Grammar authors describe rules with heterogeneous values: literal
//! strings, regex patterns, already-built [`weft_ir::Rule`] nodes,
//! references to rules that do not exist yet. [`RawRule`] is that input
//! union; [`normalize`] is the single coercion point turning it into a
//! fully-built rule node; the combinators ([`seq`], [`choice`],
//! [`optional`], [`repeat`], [`alias`], the precedence and token
//! constructors) each validate their own shape contract and funnel
//! every operand through the normalizer.
//!
//! Everything here is a stateless pure function - no caches, no
//! counters - so concurrent independent grammar builds cannot interfere.

mod combinators;
mod error;
mod normalize;
mod raw;

pub use combinators::{
    alias, blank, choice, field, lit, named_fn, optional, pat, prec, prec_dynamic, prec_left,
    prec_right, repeat, repeat1, seq, sym, token, token_immediate, PrecValue,
};
pub use error::RuleError;
pub use normalize::normalize;
pub use raw::RawRule;
