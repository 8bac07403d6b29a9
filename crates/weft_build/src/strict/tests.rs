use pretty_assertions::assert_eq;
use weft_diagnostic::ErrorCode;
use weft_dsl::{alias, choice, lit, prec_left, seq, token, RuleError};
use weft_ir::Rule;

use super::*;

#[test]
fn test_minimal_strict_grammar() {
    let def = StrictGrammarDef::new("x")
        .rule("a", |b| seq([lit("1"), b.get("b")]))
        .rule("b", |_| Ok(lit("2")));
    let grammar = assemble_strict(&def).unwrap();

    assert_eq!(grammar.name, "x");
    assert_eq!(
        grammar.rules.get("a"),
        Some(&Rule::Seq {
            members: vec![Rule::string("1"), Rule::symbol("b")],
        })
    );
    assert_eq!(grammar.rules.get("b"), Some(&Rule::string("2")));
    // The default base contributes the whitespace extra.
    assert_eq!(grammar.extras, vec![Rule::pattern(r"\s")]);
}

#[test]
fn test_first_unresolved_reference_aborts() {
    let def = StrictGrammarDef::new("g")
        .rule("a", |b| seq([b.get("ghost"), lit("x")]))
        .rule("b", |_| Ok(lit("2")));
    let err = assemble_strict(&def).unwrap_err();

    assert_eq!(
        err,
        BuildError::Rule(RuleError::UndefinedSymbol {
            name: Some("ghost".to_owned())
        })
    );
    assert_eq!(err.code(), ErrorCode::E1002);
}

#[test]
fn test_unconsumed_deferred_reference_is_inert() {
    let def = StrictGrammarDef::new("g").rule("a", |b| {
        // Looked up but never consumed as a rule.
        let _unused = b.get("ghost");
        Ok(lit("x"))
    });
    assert!(assemble_strict(&def).is_ok());
}

#[test]
fn test_aliasing_a_deferred_reference_aborts() {
    let def = StrictGrammarDef::new("g").rule("a", |b| alias(lit("x"), b.get("ghost")));
    let err = assemble_strict(&def).unwrap_err();
    assert_eq!(
        err,
        BuildError::Rule(RuleError::UndefinedSymbol {
            name: Some("ghost".to_owned())
        })
    );
}

#[test]
fn test_externals_resolve_unconstrained_and_join_namespace() {
    let def = StrictGrammarDef::new("g")
        .externals(|b| Ok(vec![b.get("comment"), b.get("heredoc")]))
        .rule("a", |b| seq([b.get("comment"), b.get("heredoc")]));
    let grammar = assemble_strict(&def).unwrap();

    assert_eq!(
        grammar.externals,
        vec![Rule::symbol("comment"), Rule::symbol("heredoc")]
    );
}

#[test]
fn test_invalid_name_aborts() {
    let def = StrictGrammarDef::new("2fast").rule("a", |_| Ok(lit("x")));
    assert_eq!(
        assemble_strict(&def).unwrap_err(),
        BuildError::InvalidName("2fast".to_owned())
    );
}

#[test]
fn test_no_rules_aborts() {
    let err = assemble_strict(&StrictGrammarDef::new("g")).unwrap_err();
    assert_eq!(err, BuildError::EmptyGrammar);
    assert_eq!(err.to_string(), "grammar must have at least one rule");
}

#[test]
fn test_word_must_be_a_symbol() {
    let ok = StrictGrammarDef::new("g")
        .rule("identifier", |_| token(lit("id")))
        .word(|b| Ok(b.get("identifier")));
    assert_eq!(
        assemble_strict(&ok).unwrap().word.as_deref(),
        Some("identifier")
    );

    let bad = StrictGrammarDef::new("g")
        .rule("a", |_| Ok(lit("x")))
        .word(|_| Ok(lit("keyword")));
    assert_eq!(
        assemble_strict(&bad).unwrap_err(),
        BuildError::InvalidWord("STRING")
    );
}

#[test]
fn test_conflicts_and_inline_must_be_symbols() {
    let def = StrictGrammarDef::new("g")
        .rule("a", |_| Ok(lit("x")))
        .rule("b", |_| Ok(lit("y")))
        .conflicts(|b| Ok(vec![vec![b.get("a"), b.get("b")]]))
        .inline(|b| Ok(vec![b.get("b")]));
    let grammar = assemble_strict(&def).unwrap();
    assert_eq!(grammar.conflicts, vec![vec!["a", "b"]]);
    assert_eq!(grammar.inline, vec!["b"]);

    let bad = StrictGrammarDef::new("g")
        .rule("a", |_| Ok(lit("x")))
        .conflicts(|b| Ok(vec![vec![b.get("a"), lit("not a symbol")]]));
    assert_eq!(
        assemble_strict(&bad).unwrap_err(),
        BuildError::InvalidConflict("STRING")
    );
}

#[test]
fn test_alias_supertype_aborts() {
    let def = StrictGrammarDef::new("g")
        .rule("expression", |_| Ok(lit("x")))
        .supertypes(|b| Ok(vec![alias(lit("y"), b.get("expression"))?.into()]));
    let err = assemble_strict(&def).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2004);
    assert!(err.to_string().contains("alias"));
}

#[test]
fn test_extending_a_base_grammar() {
    let base_def = StrictGrammarDef::new("base")
        .rule("a", |_| Ok(lit("old")))
        .rule("b", |_| Ok(lit("2")))
        .extras(|_| Ok(vec![lit(" ")]));
    let base = assemble_strict(&base_def).unwrap();

    let extension = StrictGrammarDef::new("derived")
        // Replaces base's `a`, still sees base's `b`.
        .rule("a", |b| choice([lit("new"), b.get("b")]));
    let grammar = assemble_strict_with_base(&base, &extension).unwrap();

    assert_eq!(grammar.name, "derived");
    // Replacement keeps the base's rule order.
    let names: Vec<&str> = grammar.rules.names().collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(
        grammar.rules.get("a"),
        Some(&Rule::Choice {
            members: vec![Rule::string("new"), Rule::symbol("b")],
        })
    );
    // Untouched sections are inherited.
    assert_eq!(grammar.extras, vec![Rule::string(" ")]);
}

#[test]
fn test_precedence_combinators_flow_through() {
    let def = StrictGrammarDef::new("g").rule("sum", |b| {
        prec_left(1, seq([b.get("sum"), lit("+"), b.get("sum")])?)
    });
    let grammar = assemble_strict(&def).unwrap();
    assert_eq!(
        grammar.rules.get("sum"),
        Some(&Rule::PrecLeft {
            value: 1,
            content: Box::new(Rule::Seq {
                members: vec![Rule::symbol("sum"), Rule::string("+"), Rule::symbol("sum")],
            }),
        })
    );
}
