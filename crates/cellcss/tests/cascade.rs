//! Integration tests for the cascade.
//!
//! - Specificity beats source order
//! - Equal specificity: the later rule wins
//! - `!important` beats specificity
//! - Non-conflicting declarations merge
//! - Inheritance from the parent style

use cellcss::parser::cascade::{ElementMeta, collect_declarations, compute_style};
use cellcss::parser::media::MediaContext;
use cellcss::parser::parse_stylesheet;
use cellcss::types::{ComputedStyle, Declaration, FontWeight, RgbaColor, Scalar, TextAlign};

fn style_for(css: &str, element: &ElementMeta, ancestors: &[ElementMeta]) -> ComputedStyle {
    let sheet = parse_stylesheet(css).unwrap();
    compute_style(element, ancestors, &sheet, &MediaContext::default(), None)
}

const RED: RgbaColor = RgbaColor::rgb(255, 0, 0);
const BLUE: RgbaColor = RgbaColor::rgb(0, 0, 255);

// ============================================================================
// SPECIFICITY AND SOURCE ORDER
// ============================================================================

#[test]
fn test_specificity_beats_source_order() {
    let css = "#title { color: red } h1 { color: blue }";
    let h1 = ElementMeta::new("h1").with_attribute("id", "title");
    assert_eq!(style_for(css, &h1, &[]).color, Some(RED));
}

#[test]
fn test_later_rule_wins_on_equal_specificity() {
    let css = "p { color: red } p { color: blue }";
    assert_eq!(style_for(css, &ElementMeta::new("p"), &[]).color, Some(BLUE));
}

#[test]
fn test_class_beats_type() {
    let css = ".note { color: red } p { color: blue }";
    let p = ElementMeta::new("p").with_attribute("class", "note other");
    assert_eq!(style_for(css, &p, &[]).color, Some(RED));
}

#[test]
fn test_important_beats_specificity() {
    let css = "p { color: red !important } #x.y p { color: blue }";
    let ancestors = [ElementMeta::new("div")
        .with_attribute("id", "x")
        .with_attribute("class", "y")];
    let p = ElementMeta::new("p");
    assert_eq!(style_for(css, &p, &ancestors).color, Some(RED));
}

#[test]
fn test_non_conflicting_properties_merge() {
    let css = "h1 { color: red } h1 { font-weight: bold }";
    let style = style_for(css, &ElementMeta::new("h1"), &[]);
    assert_eq!(style.color, Some(RED));
    assert_eq!(style.font_weight, Some(FontWeight::Bold));
}

// ============================================================================
// SELECTOR MATCHING
// ============================================================================

#[test]
fn test_child_and_descendant() {
    let css = "ul > li { width: 5 } ol li { width: 7 }";
    let li = ElementMeta::new("li");

    let in_ul = [ElementMeta::new("ul")];
    assert_eq!(style_for(css, &li, &in_ul).width, Some(Scalar::cells(5.0)));

    let nested = [ElementMeta::new("div"), ElementMeta::new("ol")];
    assert_eq!(style_for(css, &li, &nested).width, Some(Scalar::cells(7.0)));
}

#[test]
fn test_nth_child() {
    let css = "tr:nth-child(odd) { color: red } tr:nth-child(2) { color: blue }";
    let first = ElementMeta::new("tr").at_position(0, 3);
    let second = ElementMeta::new("tr").at_position(1, 3);
    assert_eq!(style_for(css, &first, &[]).color, Some(RED));
    assert_eq!(style_for(css, &second, &[]).color, Some(BLUE));
}

#[test]
fn test_pseudo_element_matches_only_pseudo_nodes() {
    let css = r#"q::before { content: "<" } q { color: red }"#;
    let q = ElementMeta::new("q");
    let before = ElementMeta::new("::before");

    let plain = style_for(css, &q, &[]);
    assert_eq!(plain.content, None);
    assert_eq!(plain.color, Some(RED));

    let pseudo = style_for(css, &before, std::slice::from_ref(&q));
    assert_eq!(pseudo.content.as_deref(), Some("<"));
    assert_eq!(pseudo.color, None);
}

#[test]
fn test_attribute_match() {
    let css = r#"a[href^="https"] { color: red }"#;
    let secure = ElementMeta::new("a").with_attribute("href", "https://example.com");
    let plain = ElementMeta::new("a").with_attribute("href", "http://example.com");
    assert_eq!(style_for(css, &secure, &[]).color, Some(RED));
    assert_eq!(style_for(css, &plain, &[]).color, None);
}

// ============================================================================
// INHERITANCE
// ============================================================================

#[test]
fn test_inherited_properties_flow_to_children() {
    let sheet = parse_stylesheet("div { color: red; text-align: center; width: 10 }").unwrap();
    let media = MediaContext::default();
    let div = ElementMeta::new("div");
    let parent = compute_style(&div, &[], &sheet, &media, None);
    let child = compute_style(&ElementMeta::new("span"), &[div], &sheet, &media, Some(&parent));

    assert_eq!(child.color, Some(RED));
    assert_eq!(child.text_align, Some(TextAlign::Center));
    assert_eq!(child.width, None);
}

#[test]
fn test_unset_blocks_inheritance() {
    let sheet = parse_stylesheet("div { color: red } span { color: unset }").unwrap();
    let media = MediaContext::default();
    let div = ElementMeta::new("div");
    let parent = compute_style(&div, &[], &sheet, &media, None);
    let child = compute_style(&ElementMeta::new("span"), &[div], &sheet, &media, Some(&parent));
    assert_eq!(child.color, None);
}

#[test]
fn test_explicit_inherit_of_non_inherited_property() {
    let sheet = parse_stylesheet("div { width: 12 } span { width: inherit }").unwrap();
    let media = MediaContext::default();
    let div = ElementMeta::new("div");
    let parent = compute_style(&div, &[], &sheet, &media, None);
    let child = compute_style(&ElementMeta::new("span"), &[div], &sheet, &media, Some(&parent));
    assert_eq!(child.width, Some(Scalar::cells(12.0)));
}

// ============================================================================
// MULTIPLE SHEETS
// ============================================================================

#[test]
fn test_later_sheet_wins_ties() {
    let first = parse_stylesheet("p { color: red }").unwrap();
    let second = parse_stylesheet("p { color: blue }").unwrap();
    let matched = collect_declarations(
        &ElementMeta::new("p"),
        &[],
        [&first, &second],
        &MediaContext::default(),
    );
    assert_eq!(
        matched.normal,
        vec![&Declaration::Color(RED), &Declaration::Color(BLUE)]
    );
}
