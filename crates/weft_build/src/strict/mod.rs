//! The fail-fast assembler: eager reference resolution, first error
//! aborts.
//!
//! Section closures receive a [`RuleBuilder`], the dynamic stand-in for
//! the namespace: looking up a known name yields a symbol immediately,
//! looking up an unknown one yields a deferred value that only fails when
//! something consumes it as a rule. This is the legacy posture - some
//! grammars in the corpus rely on stopping at the first bad reference
//! rather than collecting a report.
//!
//! Unlike the validated pipeline, a definition here may extend a base
//! grammar: redefined rules replace the base's in place, untouched
//! sections are inherited.

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;
use weft_diagnostic::ErrorCode;
use weft_dsl::{normalize, RawRule, RuleError};
use weft_ir::{is_valid_name, Grammar, Rule};

/// A build-aborting failure from the fail-fast assembler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A rule failed to construct or normalize.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// The grammar name is not an identifier.
    #[error(
        "grammar name '{0}' must not start with a digit and cannot contain non-word characters"
    )]
    InvalidName(String),

    /// The word section produced something other than a symbol.
    #[error("grammar's word must be a named rule, was a {0} rule")]
    InvalidWord(&'static str),

    /// A conflict set member was not a symbol.
    #[error("conflict entries must be symbols, found a {0} rule")]
    InvalidConflict(&'static str),

    /// An inline entry was not a symbol.
    #[error("inline entries must be symbols, found a {0} rule")]
    InvalidInline(&'static str),

    /// A supertype entry was an alias, or not a symbol at all.
    #[error("invalid supertype: {0}")]
    InvalidSupertype(String),

    /// The definition (plus any base) ended up with no rules at all.
    #[error("grammar must have at least one rule")]
    EmptyGrammar,
}

impl BuildError {
    /// The stable diagnostic code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            BuildError::Rule(err) => err.code(),
            BuildError::InvalidName(_) => ErrorCode::E2001,
            BuildError::InvalidWord(_) | BuildError::InvalidConflict(_)
            | BuildError::InvalidInline(_) => ErrorCode::E3001,
            BuildError::InvalidSupertype(_) => ErrorCode::E2004,
            BuildError::EmptyGrammar => ErrorCode::E3002,
        }
    }
}

/// Dynamic name lookup standing in for the namespace.
///
/// An unconstrained builder (used for the externals section, where any
/// name may be introduced) resolves everything; a constrained one hands
/// out deferred values for unknown names. A deferred value is inert until
/// consumed - creating one is never an error by itself.
pub struct RuleBuilder {
    known: Option<FxHashSet<String>>,
}

impl RuleBuilder {
    fn unconstrained() -> Self {
        RuleBuilder { known: None }
    }

    fn with_names(known: FxHashSet<String>) -> Self {
        RuleBuilder { known: Some(known) }
    }

    /// Look up a rule reference by name.
    pub fn get(&self, name: &str) -> RawRule {
        match &self.known {
            Some(known) if !known.contains(name) => RawRule::Deferred {
                name: name.to_owned(),
            },
            _ => RawRule::Rule(Rule::symbol(name)),
        }
    }
}

type SectionFn<T> = Box<dyn Fn(&RuleBuilder) -> Result<T, RuleError>>;

/// Grammar definition for the fail-fast assembler. Every section is a
/// closure over the rule builder, mirroring the reference-resolving
/// functions of the legacy definition style.
pub struct StrictGrammarDef {
    name: String,
    externals: Option<SectionFn<Vec<RawRule>>>,
    rules: Vec<(String, SectionFn<RawRule>)>,
    extras: Option<SectionFn<Vec<RawRule>>>,
    word: Option<SectionFn<RawRule>>,
    conflicts: Option<SectionFn<Vec<Vec<RawRule>>>>,
    inline: Option<SectionFn<Vec<RawRule>>>,
    supertypes: Option<SectionFn<Vec<RawRule>>>,
}

impl StrictGrammarDef {
    /// A definition with the given grammar name and no sections.
    pub fn new(name: impl Into<String>) -> Self {
        StrictGrammarDef {
            name: name.into(),
            externals: None,
            rules: Vec::new(),
            extras: None,
            word: None,
            conflicts: None,
            inline: None,
            supertypes: None,
        }
    }

    /// Declare a rule; the body sees the full name set, declared or not
    /// yet declared alike.
    pub fn rule<R, F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        R: Into<RawRule> + 'static,
        F: Fn(&RuleBuilder) -> Result<R, RuleError> + 'static,
    {
        self.rules
            .push((name.into(), Box::new(move |b| body(b).map(Into::into))));
        self
    }

    /// Provide the externals section. Runs against an unconstrained
    /// builder, since externals introduce names.
    pub fn externals<F>(mut self, section: F) -> Self
    where
        F: Fn(&RuleBuilder) -> Result<Vec<RawRule>, RuleError> + 'static,
    {
        self.externals = Some(Box::new(section));
        self
    }

    /// Provide the extras section.
    pub fn extras<F>(mut self, section: F) -> Self
    where
        F: Fn(&RuleBuilder) -> Result<Vec<RawRule>, RuleError> + 'static,
    {
        self.extras = Some(Box::new(section));
        self
    }

    /// Designate the keyword-extraction token.
    pub fn word<R, F>(mut self, section: F) -> Self
    where
        R: Into<RawRule> + 'static,
        F: Fn(&RuleBuilder) -> Result<R, RuleError> + 'static,
    {
        self.word = Some(Box::new(move |b| section(b).map(Into::into)));
        self
    }

    /// Provide the conflicts section.
    pub fn conflicts<F>(mut self, section: F) -> Self
    where
        F: Fn(&RuleBuilder) -> Result<Vec<Vec<RawRule>>, RuleError> + 'static,
    {
        self.conflicts = Some(Box::new(section));
        self
    }

    /// Provide the inline section.
    pub fn inline<F>(mut self, section: F) -> Self
    where
        F: Fn(&RuleBuilder) -> Result<Vec<RawRule>, RuleError> + 'static,
    {
        self.inline = Some(Box::new(section));
        self
    }

    /// Provide the supertypes section.
    pub fn supertypes<F>(mut self, section: F) -> Self
    where
        F: Fn(&RuleBuilder) -> Result<Vec<RawRule>, RuleError> + 'static,
    {
        self.supertypes = Some(Box::new(section));
        self
    }
}

/// Assemble a grammar from scratch, aborting on the first error.
pub fn assemble_strict(def: &StrictGrammarDef) -> Result<Grammar, BuildError> {
    let mut base = Grammar::new("");
    base.extras = vec![Rule::pattern(r"\s")];
    assemble_strict_with_base(&base, def)
}

/// Assemble a grammar extending `base`: its rules, extras and other
/// sections carry over unless the definition replaces them, and its rule
/// names stay visible to the new rule bodies.
pub fn assemble_strict_with_base(
    base: &Grammar,
    def: &StrictGrammarDef,
) -> Result<Grammar, BuildError> {
    // Externals first; their symbol names join the known-name set.
    let mut externals = base.externals.clone();
    if let Some(section) = &def.externals {
        let builder = RuleBuilder::unconstrained();
        externals = section(&builder)?
            .into_iter()
            .map(normalize)
            .collect::<Result<_, _>>()?;
    }

    let mut known: FxHashSet<String> = base.rules.names().map(ToOwned::to_owned).collect();
    known.extend(def.rules.iter().map(|(name, _)| name.clone()));
    known.extend(
        externals
            .iter()
            .filter_map(|rule| rule.as_symbol_name().map(ToOwned::to_owned)),
    );
    debug!(names = known.len(), "known-name set assembled");
    let builder = RuleBuilder::with_names(known);

    if !is_valid_name(&def.name) {
        return Err(BuildError::InvalidName(def.name.clone()));
    }

    let mut rules = base.rules.clone();
    for (name, body) in &def.rules {
        let rule = normalize(body(&builder)?)?;
        // Redefinition of a base rule replaces it in place.
        rules.insert(name.clone(), rule);
    }

    let mut extras = base.extras.clone();
    if let Some(section) = &def.extras {
        extras = section(&builder)?
            .into_iter()
            .map(normalize)
            .collect::<Result<_, _>>()?;
    }

    let mut word = base.word.clone();
    if let Some(section) = &def.word {
        match normalize(section(&builder)?)? {
            Rule::Symbol { name } => word = Some(name),
            other => return Err(BuildError::InvalidWord(other.tag())),
        }
    }

    let mut conflicts = base.conflicts.clone();
    if let Some(section) = &def.conflicts {
        conflicts = Vec::new();
        for group in section(&builder)? {
            let mut names = Vec::new();
            for raw in group {
                match normalize(raw)? {
                    Rule::Symbol { name } => names.push(name),
                    other => return Err(BuildError::InvalidConflict(other.tag())),
                }
            }
            conflicts.push(names);
        }
    }

    let mut inline = base.inline.clone();
    if let Some(section) = &def.inline {
        inline = Vec::new();
        for raw in section(&builder)? {
            match normalize(raw)? {
                Rule::Symbol { name } => inline.push(name),
                other => return Err(BuildError::InvalidInline(other.tag())),
            }
        }
    }

    let mut supertypes = base.supertypes.clone();
    if let Some(section) = &def.supertypes {
        supertypes = Vec::new();
        for raw in section(&builder)? {
            match normalize(raw)? {
                Rule::Symbol { name } => supertypes.push(name),
                Rule::Alias { value, .. } => {
                    return Err(BuildError::InvalidSupertype(format!(
                        "'{value}' is an alias; aliases have no node identity of their own"
                    )));
                }
                other => {
                    return Err(BuildError::InvalidSupertype(format!(
                        "a {} rule",
                        other.tag()
                    )));
                }
            }
        }
    }

    if rules.is_empty() {
        return Err(BuildError::EmptyGrammar);
    }

    debug!(name = %def.name, rules = rules.len(), "strict assembly complete");
    let mut grammar = Grammar::new(def.name.clone());
    grammar.word = word;
    grammar.rules = rules;
    grammar.extras = extras;
    grammar.conflicts = conflicts;
    grammar.precedences = base.precedences.clone();
    grammar.externals = externals;
    grammar.inline = inline;
    grammar.supertypes = supertypes;
    Ok(grammar)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
