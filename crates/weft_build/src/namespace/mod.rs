//! The shared name registry for one grammar build.
//!
//! Rules and externals declare into a single namespace; inline, conflict,
//! word and supertype references resolve against it. The namespace lives
//! for exactly one build call.

use rustc_hash::FxHashMap;
use std::fmt;

/// Which grammar section owns a declared name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionTag {
    Rule,
    Externals,
}

impl SectionTag {
    /// The section's name as it appears in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionTag::Rule => "rule",
            SectionTag::Externals => "externals",
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from declared name to owning section.
///
/// A name may be declared at most once; the first declaration wins and
/// later ones surface the original owner so callers can log the
/// collision.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    entries: FxHashMap<String, SectionTag>,
}

impl Namespace {
    /// Empty namespace.
    pub fn new() -> Self {
        Namespace::default()
    }

    /// Declare `name` as owned by `tag`. On collision the namespace is
    /// unchanged and the existing owner is returned.
    pub fn declare(&mut self, name: &str, tag: SectionTag) -> Result<(), SectionTag> {
        if let Some(owner) = self.entries.get(name) {
            return Err(*owner);
        }
        self.entries.insert(name.to_owned(), tag);
        Ok(())
    }

    /// Whether `name` has been declared by any section.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The owning section of a declared name.
    pub fn owner(&self, name: &str) -> Option<SectionTag> {
        self.entries.get(name).copied()
    }

    /// Number of declared names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
