//! Weft IR - Grammar Representation Types
//!
//! This crate contains the core data structures for the weft grammar toolkit:
//! - [`Rule`] - the tagged tree node for every grammar rule kind
//! - [`Grammar`] - the assembled grammar document
//! - [`RuleMap`] - insertion-ordered rule storage
//! - Identifier validation for rule and grammar names
//!
//! # Serialization
//!
//! The downstream parser generator consumes grammar documents as JSON with a
//! fixed schema: rule nodes are internally tagged (`"type": "SEQ"`, `"STRING"`,
//! ...) and the document's field order is stable. Both [`Rule`] and [`Grammar`]
//! serialize to exactly that shape; any deviation breaks the consumer.
//!
//! # Design Philosophy
//!
//! - Rule trees are immutable once built; combinators always produce fresh
//!   nodes, so documents are cycle-free by construction.
//! - Every type is `Clone + Eq` so build outputs can be compared structurally
//!   in tests and by callers.

mod grammar;
mod name;
mod rule;

pub use grammar::{Grammar, RuleMap};
pub use name::is_valid_name;
pub use rule::{collect_symbols, collect_symbols_into, Rule};
