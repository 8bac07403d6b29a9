//! Grammar assembly: namespace-aware validation over the eight grammar
//! sections.
//!
//! Two assemblers share one rule model, one normalizer and one validator
//! library, differing only in error-propagation posture:
//!
//! - [`assemble`] (validated pipeline) registers every declarable name,
//!   then resolves references against the completed namespace, logging
//!   every problem into an [`weft_diagnostic::ErrorLog`] and degrading
//!   failed fields to documented fallbacks. It always returns a document.
//! - [`assemble_strict`] (legacy posture) resolves references eagerly
//!   through a dynamic [`RuleBuilder`] lookup and aborts on the first
//!   error. It also supports extending a base grammar.
//!
//! A build is one synchronous pure call; the namespace and log are
//! created fresh per call and discarded with it.

mod namespace;
mod pipeline;
mod strict;
pub mod validate;

pub use namespace::{Namespace, SectionTag};
pub use pipeline::{assemble, BuildResult, GrammarDef, RuleDef};
pub use strict::{
    assemble_strict, assemble_strict_with_base, BuildError, RuleBuilder, StrictGrammarDef,
};
