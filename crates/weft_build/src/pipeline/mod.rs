//! The validated-pipeline assembler: collect every error, always return a
//! document.
//!
//! Sections are processed in a fixed order - name, externals, rules,
//! extras, inline, conflicts, word, supertypes - with one namespace and
//! one error log threaded through. Structural problems degrade the
//! offending field to its documented fallback; reference problems are
//! logged without removing entries (conflicts, which filter, are the one
//! exception). The caller gets the document plus the ordered log and
//! decides what a non-empty log means.
//!
//! Rule bodies are thunks, not bare values, and name registration for the
//! whole rules section completes before any reference is resolved. That
//! two-pass shape is what lets rules refer forward to rules declared
//! later, or to each other.

use rustc_hash::FxHashSet;
use tracing::debug;
use weft_diagnostic::{Diagnostic, ErrorCode, ErrorLog};
use weft_dsl::{RawRule, RuleError};
use weft_ir::{collect_symbols_into, Grammar, Rule, RuleMap};

use crate::validate::{
    check_named_reference, declare_or_log, external_name_matches, normalizable, require_declared,
    require_valid_name, NamePolicy,
};
use crate::{Namespace, SectionTag};

/// Fallback grammar name when the declared one is not an identifier.
const INVALID_NAME: &str = "INVALID";

/// The regex source of the default whitespace extra.
const WHITESPACE: &str = r"\s";

/// A rule body: a thunk producing the raw rule, or a bare value.
///
/// Bare values are representable because definitions can arrive from
/// outside the typed builder API, but only thunks are valid - the
/// assembler rejects `Value` entries, matching the "rules must be
/// functions" contract.
pub enum RuleDef {
    /// A zero-argument rule-producing function.
    Thunk(Box<dyn Fn() -> Result<RawRule, RuleError>>),
    /// A bare value where a function was required. Always an error.
    Value(RawRule),
}

/// Author-facing grammar definition for the validated pipeline.
///
/// Section order in the definition is declaration order in the document.
/// Optional sections distinguish "omitted" (documented fallback applies)
/// from "present but empty".
pub struct GrammarDef {
    name: String,
    externals: Vec<(String, RawRule)>,
    rules: Vec<(String, RuleDef)>,
    extras: Option<Vec<RawRule>>,
    inline: Option<Vec<String>>,
    conflicts: Option<Vec<Vec<String>>>,
    word: Option<String>,
    supertypes: Option<Vec<String>>,
}

impl GrammarDef {
    /// A definition with the given grammar name and no sections.
    pub fn new(name: impl Into<String>) -> Self {
        GrammarDef {
            name: name.into(),
            externals: Vec::new(),
            rules: Vec::new(),
            extras: None,
            inline: None,
            conflicts: None,
            word: None,
            supertypes: None,
        }
    }

    /// Declare an external token under `name`.
    pub fn external(mut self, name: impl Into<String>, rule: impl Into<RawRule>) -> Self {
        self.externals.push((name.into(), rule.into()));
        self
    }

    /// Declare a rule as a zero-argument body function.
    pub fn rule<R, F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        R: Into<RawRule> + 'static,
        F: Fn() -> Result<R, RuleError> + 'static,
    {
        self.rules.push((
            name.into(),
            RuleDef::Thunk(Box::new(move || body().map(Into::into))),
        ));
        self
    }

    /// Declare a rule from an explicit [`RuleDef`]. Only useful when the
    /// definition kind itself is dynamic.
    pub fn rule_def(mut self, name: impl Into<String>, def: RuleDef) -> Self {
        self.rules.push((name.into(), def));
        self
    }

    /// Provide the extras section.
    pub fn extras(mut self, entries: impl IntoIterator<Item = RawRule>) -> Self {
        self.extras = Some(entries.into_iter().collect());
        self
    }

    /// Provide the inline section.
    pub fn inline<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.inline = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Add one conflict set.
    pub fn conflict<S: Into<String>>(mut self, group: impl IntoIterator<Item = S>) -> Self {
        self.conflicts
            .get_or_insert_with(Vec::new)
            .push(group.into_iter().map(Into::into).collect());
        self
    }

    /// Designate the keyword-extraction token.
    pub fn word(mut self, name: impl Into<String>) -> Self {
        self.word = Some(name.into());
        self
    }

    /// Provide the supertypes section.
    pub fn supertypes<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.supertypes = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Reconstruct a definition from an existing document, rules as
    /// thunks over their nodes. Assembling the result reproduces the
    /// document. Externals that are not symbols have no declaring key
    /// and are skipped.
    pub fn from_document(grammar: &Grammar) -> Self {
        let mut def = GrammarDef::new(grammar.name.clone());
        for (name, rule) in grammar.rules.iter() {
            let node = rule.clone();
            def = def.rule(name, move || Ok(RawRule::Rule(node.clone())));
        }
        for external in &grammar.externals {
            if let Some(name) = external.as_symbol_name() {
                def = def.external(name, RawRule::Rule(external.clone()));
            }
        }
        if !grammar.extras.is_empty() {
            def = def.extras(
                grammar
                    .extras
                    .iter()
                    .map(|rule| RawRule::Rule(rule.clone()))
                    .collect::<Vec<_>>(),
            );
        }
        if !grammar.inline.is_empty() {
            def = def.inline(grammar.inline.iter().cloned());
        }
        for group in &grammar.conflicts {
            def = def.conflict(group.iter().cloned());
        }
        if let Some(word) = &grammar.word {
            def = def.word(word.clone());
        }
        if !grammar.supertypes.is_empty() {
            def = def.supertypes(grammar.supertypes.iter().cloned());
        }
        def
    }
}

/// Outcome of one accumulate-posture build: the best-effort document and
/// everything the validators logged along the way.
#[derive(Debug)]
pub struct BuildResult {
    /// The assembled document, with fallbacks in place of failed fields.
    pub grammar: Grammar,
    /// Ordered diagnostics from every section.
    pub log: ErrorLog,
}

impl BuildResult {
    /// Treat any logged error as overall failure.
    pub fn into_result(self) -> Result<Grammar, ErrorLog> {
        if self.log.has_errors() {
            Err(self.log)
        } else {
            Ok(self.grammar)
        }
    }
}

/// Assemble a grammar document, collecting all errors.
pub fn assemble(def: &GrammarDef) -> BuildResult {
    let mut namespace = Namespace::new();
    let mut log = ErrorLog::new();

    let name = assemble_name(def, &mut log);
    let externals = assemble_externals(def, &mut namespace, &mut log);
    let rules = assemble_rules(def, &mut namespace, &mut log);
    let extras = assemble_extras(def, &namespace, &mut log);
    let inline = assemble_inline(def, &namespace, &mut log);
    let conflicts = assemble_conflicts(def, &namespace, &mut log);
    let word = assemble_word(def, &namespace, &mut log);
    let supertypes = assemble_supertypes(def, &rules, &namespace, &mut log);

    debug!(
        name = %name,
        rules = rules.len(),
        externals = externals.len(),
        errors = log.error_count(),
        "grammar assembly complete"
    );

    let mut grammar = Grammar::new(name);
    grammar.word = word;
    grammar.rules = rules;
    grammar.extras = extras;
    grammar.conflicts = conflicts;
    grammar.externals = externals;
    grammar.inline = inline;
    grammar.supertypes = supertypes;
    BuildResult { grammar, log }
}

fn assemble_name(def: &GrammarDef, log: &mut ErrorLog) -> String {
    debug!(name = %def.name, "validating grammar name");
    if require_valid_name("name", &def.name, log) {
        def.name.clone()
    } else {
        INVALID_NAME.to_owned()
    }
}

fn assemble_externals(
    def: &GrammarDef,
    namespace: &mut Namespace,
    log: &mut ErrorLog,
) -> Vec<Rule> {
    debug!(count = def.externals.len(), "processing externals");
    let mut externals = Vec::new();
    for (key, raw) in &def.externals {
        let Some(rule) = normalizable(raw.clone(), log) else {
            continue;
        };
        if !external_name_matches(key, &rule, log) {
            continue;
        }
        if !declare_or_log(key, SectionTag::Externals, namespace, log) {
            continue;
        }
        check_named_reference("external", &rule, NamePolicy::MustBeDeclared, namespace, log);
        externals.push(rule);
    }
    externals
}

fn assemble_rules(def: &GrammarDef, namespace: &mut Namespace, log: &mut ErrorLog) -> RuleMap {
    debug!(count = def.rules.len(), "processing rules");
    let mut rules = RuleMap::new();
    let mut seen = FxHashSet::default();
    let mut referenced = Vec::new();

    for (key, rule_def) in &def.rules {
        let body = match rule_def {
            RuleDef::Thunk(body) => body,
            RuleDef::Value(raw) => {
                log.report(Diagnostic::error(ErrorCode::E3001).with_message(format!(
                    "grammar rule '{key}' must be a function, was {}",
                    raw.describe()
                )));
                continue;
            }
        };
        let rule = match body().and_then(weft_dsl::normalize) {
            Ok(rule) => rule,
            Err(err) => {
                log.report(
                    Diagnostic::error(err.code())
                        .with_message(err.to_string())
                        .with_note(format!("while building rule '{key}'")),
                );
                continue;
            }
        };
        collect_symbols_into(&rule, &mut seen, &mut referenced);
        if declare_or_log(key, SectionTag::Rule, namespace, log) {
            rules.insert(key.clone(), rule);
        }
    }

    // Second pass: every reference resolves against the completed
    // namespace, so mutual recursion needs no special handling.
    for name in &referenced {
        require_declared("rules", name, namespace, log);
    }

    if rules.is_empty() {
        log.report(
            Diagnostic::error(ErrorCode::E3002)
                .with_message("grammar must have at least one rule"),
        );
    }
    rules
}

fn assemble_extras(def: &GrammarDef, namespace: &Namespace, log: &mut ErrorLog) -> Vec<Rule> {
    let Some(entries) = &def.extras else {
        return vec![Rule::pattern(WHITESPACE)];
    };
    debug!(count = entries.len(), "processing extras");
    let mut extras = Vec::new();
    for raw in entries {
        let Some(rule) = normalizable(raw.clone(), log) else {
            continue;
        };
        // Extras are standalone tokens; naming a declared rule is a
        // collision, but the entry stays in the list.
        check_named_reference("extras", &rule, NamePolicy::MustBeUndeclared, namespace, log);
        extras.push(rule);
    }
    if extras.is_empty() {
        vec![Rule::pattern(WHITESPACE)]
    } else {
        extras
    }
}

fn assemble_inline(def: &GrammarDef, namespace: &Namespace, log: &mut ErrorLog) -> Vec<String> {
    let Some(names) = &def.inline else {
        return Vec::new();
    };
    debug!(count = names.len(), "processing inline");
    let mut inline = Vec::new();
    for name in names {
        if !require_valid_name("inline", name, log) {
            continue;
        }
        // Undeclared names are logged but kept; filtering is reserved
        // for conflicts.
        require_declared("inline", name, namespace, log);
        inline.push(name.clone());
    }
    inline
}

fn assemble_conflicts(
    def: &GrammarDef,
    namespace: &Namespace,
    log: &mut ErrorLog,
) -> Vec<Vec<String>> {
    let Some(groups) = &def.conflicts else {
        return Vec::new();
    };
    debug!(count = groups.len(), "processing conflicts");
    let mut conflicts = Vec::new();
    for group in groups {
        let mut valid = Vec::new();
        for name in group {
            if require_valid_name("conflict", name, log)
                && require_declared("conflict", name, namespace, log)
            {
                valid.push(name.clone());
            }
        }
        if valid.len() >= 2 {
            conflicts.push(valid);
        } else {
            log.report(Diagnostic::error(ErrorCode::E3003).with_message(format!(
                "invalid conflict [{}] of length {}",
                valid.join(", "),
                valid.len()
            )));
        }
    }
    conflicts
}

fn assemble_word(def: &GrammarDef, namespace: &Namespace, log: &mut ErrorLog) -> Option<String> {
    let name = def.word.as_ref()?;
    debug!(word = %name, "processing word");
    if require_valid_name("word", name, log) && require_declared("word", name, namespace, log) {
        Some(name.clone())
    } else {
        None
    }
}

fn assemble_supertypes(
    def: &GrammarDef,
    rules: &RuleMap,
    namespace: &Namespace,
    log: &mut ErrorLog,
) -> Vec<String> {
    let Some(names) = &def.supertypes else {
        return Vec::new();
    };
    debug!(count = names.len(), "processing supertypes");
    let mut supertypes = Vec::new();
    for name in names {
        if !require_valid_name("supertype", name, log) {
            continue;
        }
        require_declared("supertype", name, namespace, log);
        if rules.get(name).is_some_and(Rule::is_alias) {
            log.report(Diagnostic::error(ErrorCode::E2004).with_message(format!(
                "invalid supertype '{name}': aliases have no node identity of their own"
            )));
            continue;
        }
        supertypes.push(name.clone());
    }
    supertypes
}
