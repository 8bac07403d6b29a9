use pretty_assertions::assert_eq;
use proptest::prelude::*;
use weft_ir::Rule;

use super::*;

#[test]
fn test_seq_normalizes_members_in_order() {
    let rule = seq([lit("1"), sym("b"), pat(r"\d+")]).unwrap();
    assert_eq!(
        rule,
        Rule::Seq {
            members: vec![Rule::string("1"), Rule::symbol("b"), Rule::pattern(r"\d+")],
        }
    );
}

#[test]
fn test_seq_accepts_zero_members() {
    assert_eq!(seq([]).unwrap(), Rule::Seq { members: vec![] });
}

#[test]
fn test_choice_preserves_order() {
    let rule = choice([lit("+"), lit("-")]).unwrap();
    assert_eq!(
        rule,
        Rule::Choice {
            members: vec![Rule::string("+"), Rule::string("-")],
        }
    );
}

#[test]
fn test_optional_is_choice_with_blank() {
    let via_optional = optional(sym("expr")).unwrap();
    let via_choice = choice([sym("expr"), RawRule::Rule(blank())]).unwrap();
    assert_eq!(via_optional, via_choice);
}

#[test]
fn test_optional_rejects_multiple_rules() {
    let err = optional(vec![lit("a"), lit("b")]).unwrap_err();
    assert_eq!(err, RuleError::Arity { caller: "optional" });
    assert!(err.to_string().contains("did you mean to call `seq`?"));
}

#[test]
fn test_repeat_and_repeat1() {
    assert_eq!(
        repeat(sym("item")).unwrap(),
        Rule::Repeat {
            content: Box::new(Rule::symbol("item")),
        }
    );
    assert_eq!(
        repeat1(sym("item")).unwrap(),
        Rule::Repeat1 {
            content: Box::new(Rule::symbol("item")),
        }
    );
    assert_eq!(
        repeat(vec![lit("a"), lit("b")]).unwrap_err(),
        RuleError::Arity { caller: "repeat" }
    );
}

#[test]
fn test_field_tags_content() {
    let rule = field("operator", lit("+")).unwrap();
    assert_eq!(
        rule,
        Rule::Field {
            name: "operator".to_owned(),
            content: Box::new(Rule::string("+")),
        }
    );
}

#[test]
fn test_alias_with_string_target_is_anonymous() {
    let rule = alias(sym("foo"), lit("bar")).unwrap();
    assert_eq!(
        rule,
        Rule::Alias {
            content: Box::new(Rule::symbol("foo")),
            named: false,
            value: "bar".to_owned(),
        }
    );
}

#[test]
fn test_alias_with_symbol_target_is_named() {
    let rule = alias(sym("foo"), sym("baz")).unwrap();
    assert_eq!(
        rule,
        Rule::Alias {
            content: Box::new(Rule::symbol("foo")),
            named: true,
            value: "baz".to_owned(),
        }
    );
}

#[test]
fn test_alias_with_named_fn_target_is_named() {
    let rule = alias(lit("x"), named_fn("target")).unwrap();
    assert_eq!(
        rule,
        Rule::Alias {
            content: Box::new(Rule::string("x")),
            named: true,
            value: "target".to_owned(),
        }
    );
}

#[test]
fn test_alias_with_other_target_fails() {
    let err = alias(sym("foo"), RawRule::Rule(blank())).unwrap_err();
    assert_eq!(err, RuleError::InvalidAliasTarget("a BLANK rule".to_owned()));
}

#[test]
fn test_alias_with_deferred_target_propagates_reference_error() {
    let err = alias(
        sym("foo"),
        RawRule::Deferred {
            name: "ghost".to_owned(),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        RuleError::UndefinedSymbol {
            name: Some("ghost".to_owned())
        }
    );
}

#[test]
fn test_token_variants() {
    assert_eq!(
        token(lit("&&")).unwrap(),
        Rule::Token {
            content: Box::new(Rule::string("&&")),
        }
    );
    assert_eq!(
        token_immediate(lit(")")).unwrap(),
        Rule::ImmediateToken {
            content: Box::new(Rule::string(")")),
        }
    );
}

#[test]
fn test_precedence_variants_attach_weight() {
    assert_eq!(
        prec(2, sym("unary")).unwrap(),
        Rule::Prec {
            value: 2,
            content: Box::new(Rule::symbol("unary")),
        }
    );
    assert_eq!(
        prec_left(0, sym("binary")).unwrap(),
        Rule::PrecLeft {
            value: 0,
            content: Box::new(Rule::symbol("binary")),
        }
    );
    assert_eq!(
        prec_right(-1, sym("assign")).unwrap(),
        Rule::PrecRight {
            value: -1,
            content: Box::new(Rule::symbol("assign")),
        }
    );
    assert_eq!(
        prec_dynamic(3, sym("call")).unwrap(),
        Rule::PrecDynamic {
            value: 3,
            content: Box::new(Rule::symbol("call")),
        }
    );
}

#[test]
fn test_missing_precedence_fails() {
    assert_eq!(
        prec(PrecValue::MISSING, sym("x")).unwrap_err(),
        RuleError::MissingPrecedence
    );
    assert_eq!(
        prec_dynamic(PrecValue::MISSING, sym("x")).unwrap_err(),
        RuleError::MissingPrecedence
    );
}

#[test]
fn test_prec_rejects_multiple_rules() {
    assert_eq!(
        prec_left(1, vec![lit("a"), lit("b")]).unwrap_err(),
        RuleError::Arity {
            caller: "prec_left"
        }
    );
}

#[test]
fn test_nested_combinators_compose() {
    // (expr ("+" expr)*) with the operator tagged.
    let inner = seq([field("op", lit("+")).unwrap().into(), sym("expr")]).unwrap();
    let rule = seq([sym("expr"), repeat(inner).unwrap().into()]).unwrap();
    assert_eq!(
        rule,
        Rule::Seq {
            members: vec![
                Rule::symbol("expr"),
                Rule::Repeat {
                    content: Box::new(Rule::Seq {
                        members: vec![
                            Rule::Field {
                                name: "op".to_owned(),
                                content: Box::new(Rule::string("+")),
                            },
                            Rule::symbol("expr"),
                        ],
                    }),
                },
            ],
        }
    );
}

proptest! {
    /// optional(r) == choice(r, blank) for any valid operand.
    #[test]
    fn prop_optional_equals_choice_with_blank(value in "[a-z+*()]{1,6}") {
        let via_optional = optional(lit(value.clone())).unwrap();
        let via_choice = choice([lit(value), RawRule::Rule(blank())]).unwrap();
        prop_assert_eq!(via_optional, via_choice);
    }
}
