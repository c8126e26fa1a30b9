//! Integration tests for `@media` rules.

use cellcss::parser::cascade::{ElementMeta, compute_style};
use cellcss::parser::media::{MediaContext, MediaQuery};
use cellcss::parser::parse_stylesheet;
use cellcss::types::Scalar;

// ============================================================================
// CONDITIONS
// ============================================================================

#[test]
fn test_width_ranges() {
    let narrow = MediaContext::new(40.0, 24.0);
    let wide = MediaContext::new(120.0, 24.0);

    let query = MediaQuery::parse("(max-width: 80)").unwrap();
    assert!(query.evaluate(&narrow));
    assert!(!query.evaluate(&wide));

    let query = MediaQuery::parse("(width >= 60)").unwrap();
    assert!(!query.evaluate(&narrow));
    assert!(query.evaluate(&wide));

    let query = MediaQuery::parse("(100 > width)").unwrap();
    assert!(query.evaluate(&narrow));
    assert!(!query.evaluate(&wide));
}

#[test]
fn test_media_types() {
    let ctx = MediaContext::default();
    assert!(MediaQuery::parse("screen").unwrap().evaluate(&ctx));
    assert!(MediaQuery::parse("all and (min-width: 10)").unwrap().evaluate(&ctx));
    assert!(!MediaQuery::parse("print").unwrap().evaluate(&ctx));
    assert!(MediaQuery::parse("not print").unwrap().evaluate(&ctx));
}

#[test]
fn test_pixel_widths_use_the_cell_size() {
    // 80 cells of 10px is 800px.
    let ctx = MediaContext::default();
    assert!(MediaQuery::parse("(min-width: 600px)").unwrap().evaluate(&ctx));
    assert!(!MediaQuery::parse("(min-width: 900px)").unwrap().evaluate(&ctx));
}

#[test]
fn test_comma_is_or() {
    let ctx = MediaContext::new(100.0, 24.0);
    let query = MediaQuery::parse("(max-width: 50), (min-width: 90)").unwrap();
    assert!(query.evaluate(&ctx));
}

// ============================================================================
// RULES
// ============================================================================

#[test]
fn test_media_block_only_applies_when_true() {
    let css = r#"
        p { width: 10 }
        @media (max-width: 60) {
            p { width: 5 }
        }
    "#;
    let sheet = parse_stylesheet(css).unwrap();
    let p = ElementMeta::new("p");

    let wide = compute_style(&p, &[], &sheet, &MediaContext::new(100.0, 24.0), None);
    assert_eq!(wide.width, Some(Scalar::cells(10.0)));

    let narrow = compute_style(&p, &[], &sheet, &MediaContext::new(40.0, 24.0), None);
    assert_eq!(narrow.width, Some(Scalar::cells(5.0)));
}

#[test]
fn test_unknown_at_rules_are_skipped() {
    let css = r#"
        @import "other.css";
        @font-face { font-family: x; }
        p { width: 3 }
    "#;
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(sheet.rules.len(), 1);
}
