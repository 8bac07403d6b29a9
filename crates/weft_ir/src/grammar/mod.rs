//! The assembled grammar document.
//!
//! [`Grammar`] is the build output handed to the downstream parser
//! generator: the named rule map plus the cross-cutting declarations
//! (externals, extras, inline, conflicts, word, supertypes). Field names
//! and ordering follow the external schema and must not drift.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Rule;

/// Insertion-ordered `name -> Rule` storage.
///
/// Declaration order is meaningful: it fixes the serialized document and
/// keeps builds deterministic. Replacing an existing name keeps its
/// original position, which is what base-grammar extension relies on.
/// Lookups are linear scans; grammars hold tens of rules, not thousands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleMap {
    entries: Vec<(String, Rule)>,
}

impl RuleMap {
    /// Empty map.
    pub fn new() -> Self {
        RuleMap {
            entries: Vec::new(),
        }
    }

    /// Insert a rule, returning the displaced rule if the name already
    /// existed. An existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) -> Option<Rule> {
        let name = name.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(slot, rule));
        }
        self.entries.push((name, rule));
        None
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Iterate declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl FromIterator<(String, Rule)> for RuleMap {
    fn from_iter<I: IntoIterator<Item = (String, Rule)>>(iter: I) -> Self {
        let mut map = RuleMap::new();
        for (name, rule) in iter {
            map.insert(name, rule);
        }
        map
    }
}

impl Serialize for RuleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, rule) in &self.entries {
            map.serialize_entry(name, rule)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleMapVisitor;

        impl<'de> Visitor<'de> for RuleMapVisitor {
            type Value = RuleMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of rule names to rules")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RuleMap, A::Error> {
                let mut rules = RuleMap::new();
                while let Some((name, rule)) = access.next_entry::<String, Rule>()? {
                    rules.insert(name, rule);
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RuleMapVisitor)
    }
}

/// A complete grammar document.
///
/// Field declaration order is the serialized order the external consumer
/// expects: `name, word, rules, extras, conflicts, precedences,
/// externals, inline, supertypes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Grammar name; a valid identifier.
    pub name: String,
    /// The keyword-extraction token, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    /// Named rule definitions. Never empty in a valid document.
    pub rules: RuleMap,
    /// Rules allowed between any two tokens (whitespace, comments).
    #[serde(default)]
    pub extras: Vec<Rule>,
    /// Rule-name sets whose ambiguity is intentional.
    #[serde(default)]
    pub conflicts: Vec<Vec<String>>,
    /// Named precedence orderings. Emitted for schema compatibility;
    /// no input section feeds it yet.
    #[serde(default)]
    pub precedences: Vec<Vec<Rule>>,
    /// Tokens produced by an external scanner.
    #[serde(default)]
    pub externals: Vec<Rule>,
    /// Rule names replaced by their definitions at every use site.
    #[serde(default)]
    pub inline: Vec<String>,
    /// Hidden rule names flagged as structural categories.
    #[serde(default)]
    pub supertypes: Vec<String>,
}

impl Grammar {
    /// A document with the given name and no declarations.
    pub fn new(name: impl Into<String>) -> Self {
        Grammar {
            name: name.into(),
            word: None,
            rules: RuleMap::new(),
            extras: Vec::new(),
            conflicts: Vec::new(),
            precedences: Vec::new(),
            externals: Vec::new(),
            inline: Vec::new(),
            supertypes: Vec::new(),
        }
    }
}
