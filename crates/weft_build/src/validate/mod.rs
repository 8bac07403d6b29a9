//! The validator library every grammar section is built from.
//!
//! Each check takes the value under test plus the namespace and error log
//! threaded through the build, logs a diagnostic on failure, and reports
//! success as a `bool` (or the normalized value) so sections can decide
//! between filtering, keeping, or falling back. None of these abort; the
//! fail-fast posture lives in the strict assembler instead.

use weft_diagnostic::{Diagnostic, ErrorCode, ErrorLog};
use weft_dsl::{normalize, RawRule};
use weft_ir::{is_valid_name, Rule};

use crate::{Namespace, SectionTag};

/// How a named reference relates to the namespace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamePolicy {
    /// The name must already be declared (inline, conflicts, word,
    /// supertypes, symbol references out of rule bodies).
    MustBeDeclared,
    /// The name must not be declared (extras entries, which are
    /// standalone tokens rather than references back into the grammar).
    MustBeUndeclared,
}

/// Identifier-shape check; logs `invalid name in <context>: '<name>'`.
pub fn require_valid_name(context: &str, name: &str, log: &mut ErrorLog) -> bool {
    if is_valid_name(name) {
        return true;
    }
    log.report(
        Diagnostic::error(ErrorCode::E2001)
            .with_message(format!("invalid name in {context}: '{name}'")),
    );
    false
}

/// Declared-name check; logs `invalid <context>: name '<name>' not in
/// namespace`.
pub fn require_declared(
    context: &str,
    name: &str,
    namespace: &Namespace,
    log: &mut ErrorLog,
) -> bool {
    if namespace.contains(name) {
        return true;
    }
    log.report(
        Diagnostic::error(ErrorCode::E2003)
            .with_message(format!("invalid {context}: name '{name}' not in namespace")),
    );
    false
}

/// Inverse check; logs a duplicate-declaration diagnostic when the name
/// already has an owner.
pub fn require_not_declared(name: &str, namespace: &Namespace, log: &mut ErrorLog) -> bool {
    match namespace.owner(name) {
        None => true,
        Some(owner) => {
            log.report(
                Diagnostic::error(ErrorCode::E2002)
                    .with_message(format!(
                        "name '{name}' has already been declared in the namespace"
                    ))
                    .with_note(format!("first declared by {owner}")),
            );
            false
        }
    }
}

/// Namespace check for the rules that carry a name: symbols check their
/// referent, aliases check their display value, everything else passes.
pub fn check_named_reference(
    context: &str,
    rule: &Rule,
    policy: NamePolicy,
    namespace: &Namespace,
    log: &mut ErrorLog,
) -> bool {
    let name = match rule {
        Rule::Symbol { name } => name,
        Rule::Alias { value, .. } => value,
        _ => return true,
    };
    match policy {
        NamePolicy::MustBeDeclared => require_declared(context, name, namespace, log),
        NamePolicy::MustBeUndeclared => require_not_declared(name, namespace, log),
    }
}

/// Normalize a raw value, converting failure into a logged diagnostic.
pub fn normalizable(raw: RawRule, log: &mut ErrorLog) -> Option<Rule> {
    match normalize(raw) {
        Ok(rule) => Some(rule),
        Err(err) => {
            log.report(Diagnostic::error(err.code()).with_message(err.to_string()));
            None
        }
    }
}

/// An external declared under `key` whose value is a symbol must agree
/// with that key; logs `mismatched external rule names ...` otherwise.
pub fn external_name_matches(key: &str, rule: &Rule, log: &mut ErrorLog) -> bool {
    match rule.as_symbol_name() {
        Some(found) if found != key => {
            log.report(Diagnostic::error(ErrorCode::E2005).with_message(format!(
                "mismatched external rule names '{key}' and '{found}'"
            )));
            false
        }
        _ => true,
    }
}

/// Register a declaration, logging the collision (first wins) on failure.
pub fn declare_or_log(
    name: &str,
    tag: SectionTag,
    namespace: &mut Namespace,
    log: &mut ErrorLog,
) -> bool {
    match namespace.declare(name, tag) {
        Ok(()) => true,
        Err(owner) => {
            log.report(
                Diagnostic::error(ErrorCode::E2002)
                    .with_message(format!(
                        "name '{name}' has already been declared in the namespace"
                    ))
                    .with_note(format!("first declared by {owner}")),
            );
            false
        }
    }
}
