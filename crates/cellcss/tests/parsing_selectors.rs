//! Integration tests for selector parsing.
//!
//! - Type selectors: `p`, `h1`
//! - Class and ID selectors: `.note`, `#main`
//! - Universal selector: `*`
//! - Attribute selectors: `[open]`, `[type=hidden]`, `[href^="http"]`
//! - Pseudo-classes and pseudo-elements
//! - Combinators: descendant (space), child (`>`)
//! - Selector lists: `h1, h2`

use cellcss::parser::{
    AttrOp, Combinator, NthChild, PseudoClass, Selector, Specificity, parse_selector_list,
};

// ============================================================================
// TYPE SELECTORS
// ============================================================================

#[test]
fn test_type_selector_simple() {
    let (remaining, list) = parse_selector_list("p").unwrap();
    assert!(remaining.is_empty());

    assert_eq!(list.selectors.len(), 1);
    let complex = &list.selectors[0];
    assert_eq!(complex.parts.len(), 1);

    let compound = &complex.parts[0].compound;
    assert_eq!(compound.selectors.len(), 1);
    assert_eq!(compound.selectors[0], Selector::Type("p".to_string()));
}

#[test]
fn test_type_selector_is_lowercased() {
    let (_, list) = parse_selector_list("TABLE").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Type("table".to_string())
    );
}

// ============================================================================
// CLASS, ID AND UNIVERSAL SELECTORS
// ============================================================================

#[test]
fn test_multiple_classes_chained() {
    let (_, list) = parse_selector_list(".error.disabled").unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(
        compound.selectors,
        vec![
            Selector::Class("error".to_string()),
            Selector::Class("disabled".to_string()),
        ]
    );
}

#[test]
fn test_type_with_class_and_id() {
    let (_, list) = parse_selector_list("div.note#main").unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(
        compound.selectors,
        vec![
            Selector::Type("div".to_string()),
            Selector::Class("note".to_string()),
            Selector::Id("main".to_string()),
        ]
    );
}

#[test]
fn test_universal_selector() {
    let (_, list) = parse_selector_list("*").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[0],
        Selector::Universal
    );
}

// ============================================================================
// ATTRIBUTE SELECTORS
// ============================================================================

#[test]
fn test_attribute_operators() {
    let cases = [
        ("[x]", AttrOp::Exists),
        ("[x=a]", AttrOp::Equals),
        ("[x*=a]", AttrOp::Contains),
        ("[x^=a]", AttrOp::Prefix),
        ("[x$=a]", AttrOp::Suffix),
        ("[x~=a]", AttrOp::Includes),
        ("[x|=a]", AttrOp::DashMatch),
    ];
    for (source, expected) in cases {
        let (_, list) = parse_selector_list(source).unwrap();
        match &list.selectors[0].parts[0].compound.selectors[0] {
            Selector::Attribute { name, op, .. } => {
                assert_eq!(name, "x");
                assert_eq!(*op, expected, "{source}");
            }
            other => panic!("expected an attribute selector, got {other:?}"),
        }
    }
}

#[test]
fn test_attribute_with_quoted_value() {
    let (_, list) = parse_selector_list(r#"input[type="hidden"]"#).unwrap();
    let compound = &list.selectors[0].parts[0].compound;
    assert_eq!(
        compound.selectors[1],
        Selector::Attribute {
            name: "type".to_string(),
            op: AttrOp::Equals,
            value: "hidden".to_string(),
        }
    );
}

// ============================================================================
// PSEUDO-CLASSES AND PSEUDO-ELEMENTS
// ============================================================================

#[test]
fn test_structural_pseudo_classes() {
    let (_, list) = parse_selector_list("tr:nth-child(even), li:last-child").unwrap();
    assert_eq!(
        list.selectors[0].parts[0].compound.selectors[1],
        Selector::PseudoClass(PseudoClass::NthChild(NthChild::Even))
    );
    assert_eq!(
        list.selectors[1].parts[0].compound.selectors[1],
        Selector::PseudoClass(PseudoClass::LastChild)
    );
}

#[test]
fn test_legacy_pseudo_element_syntax() {
    let (_, double) = parse_selector_list("q::after").unwrap();
    let (_, single) = parse_selector_list("q:after").unwrap();
    assert_eq!(double, single);
}

// ============================================================================
// COMBINATORS
// ============================================================================

#[test]
fn test_descendant_combinator() {
    let (_, list) = parse_selector_list("ul li").unwrap();
    let parts = &list.selectors[0].parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].combinator, Combinator::Descendant);
    assert_eq!(parts[1].combinator, Combinator::None);
}

#[test]
fn test_child_combinator_with_and_without_spaces() {
    for source in ["ol>li", "ol > li", "ol >li"] {
        let (_, list) = parse_selector_list(source).unwrap();
        let parts = &list.selectors[0].parts;
        assert_eq!(parts.len(), 2, "{source}");
        assert_eq!(parts[0].combinator, Combinator::Child, "{source}");
    }
}

#[test]
fn test_selector_list() {
    let (_, list) = parse_selector_list("h1, h2 ,h3").unwrap();
    assert_eq!(list.selectors.len(), 3);
}

// ============================================================================
// SPECIFICITY
// ============================================================================

#[test]
fn test_specificity() {
    let spec = |source: &str| {
        let (_, list) = parse_selector_list(source).unwrap();
        list.selectors[0].specificity()
    };
    assert_eq!(
        spec("#nav ul li.active[data-x]"),
        Specificity {
            ids: 1,
            classes: 2,
            types: 2
        }
    );
    assert_eq!(spec("*"), Specificity::default());
    assert!(spec("li:first-child") > spec("ul li"));
}
