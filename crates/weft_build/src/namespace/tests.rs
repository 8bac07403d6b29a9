use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_declare_and_lookup() {
    let mut ns = Namespace::new();
    assert!(ns.is_empty());
    assert_eq!(ns.declare("expression", SectionTag::Rule), Ok(()));
    assert_eq!(ns.declare("comment", SectionTag::Externals), Ok(()));

    assert!(ns.contains("expression"));
    assert_eq!(ns.owner("expression"), Some(SectionTag::Rule));
    assert_eq!(ns.owner("comment"), Some(SectionTag::Externals));
    assert_eq!(ns.owner("missing"), None);
    assert_eq!(ns.len(), 2);
}

#[test]
fn test_second_declaration_loses() {
    let mut ns = Namespace::new();
    assert_eq!(ns.declare("comment", SectionTag::Externals), Ok(()));
    assert_eq!(
        ns.declare("comment", SectionTag::Rule),
        Err(SectionTag::Externals)
    );
    // First declaration wins.
    assert_eq!(ns.owner("comment"), Some(SectionTag::Externals));
    assert_eq!(ns.len(), 1);
}

#[test]
fn test_section_tag_display() {
    assert_eq!(SectionTag::Rule.to_string(), "rule");
    assert_eq!(SectionTag::Externals.to_string(), "externals");
}
