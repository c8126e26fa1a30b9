//! Integration tests for value parsing.
//!
//! - Scalars in cells, percentages, viewport, font and pixel units
//! - Spacing shorthands with one to four values
//! - Colours by name, hex and function
//! - Border shorthands
//! - Shorthand expansion into longhand declarations

use cellcss::parser::expand_declaration;
use cellcss::parser::units::{scalar, spacing, track_list};
use cellcss::parser::values::parse_border_edge;
use cellcss::types::{
    Axis, BorderStyle, Declaration, LengthContext, ListStyleType, Property, RgbaColor, Scalar,
    Spacing, Unit,
};

// ============================================================================
// SCALARS
// ============================================================================

#[test]
fn test_bare_number_is_cells() {
    assert_eq!(scalar("10"), Some(Scalar::cells(10.0)));
    assert_eq!(scalar("-2"), Some(Scalar::cells(-2.0)));
    assert_eq!(scalar(".5"), Some(Scalar::cells(0.5)));
}

#[test]
fn test_unit_suffixes() {
    let cases = [
        ("50%", Unit::Percent),
        ("30vw", Unit::ViewWidth),
        ("30vh", Unit::ViewHeight),
        ("2em", Unit::Em),
        ("2rem", Unit::Rem),
        ("2ch", Unit::Ch),
        ("20px", Unit::Px),
        ("1fr", Unit::Fraction),
    ];
    for (source, unit) in cases {
        assert_eq!(scalar(source).map(|s| s.unit), Some(unit), "{source}");
    }
}

#[test]
fn test_keywords() {
    assert_eq!(scalar("auto"), Some(Scalar::AUTO));
    assert_eq!(scalar("fit-content"), Some(Scalar::AUTO));
    assert_eq!(scalar("min-content").map(|s| s.unit), Some(Unit::MinContent));
    assert_eq!(scalar("10 px"), None);
    assert_eq!(scalar("wide"), None);
}

#[test]
fn test_pixels_follow_the_cell_size() {
    let ctx = LengthContext::default();
    assert_eq!(Scalar::px(20.0).to_cells(Axis::Horizontal, &ctx), Some(2.0));
    assert_eq!(Scalar::px(40.0).to_cells(Axis::Vertical, &ctx), Some(2.0));
}

#[test]
fn test_percent_needs_available_space() {
    let ctx = LengthContext::default();
    assert_eq!(Scalar::percent(50.0).to_cells(Axis::Horizontal, &ctx), None);
    let ctx = ctx.with_available(Some(30.0));
    assert_eq!(Scalar::percent(50.0).to_cells(Axis::Horizontal, &ctx), Some(15.0));
}

// ============================================================================
// SPACING
// ============================================================================

#[test]
fn test_spacing_value_counts() {
    let one = Scalar::cells(1.0);
    let two = Scalar::cells(2.0);
    let three = Scalar::cells(3.0);
    let four = Scalar::cells(4.0);

    assert_eq!(spacing("1"), Some(Spacing::all(one)));
    assert_eq!(spacing("1 2"), Some(Spacing::vertical_horizontal(one, two)));
    assert_eq!(
        spacing("1 2 3"),
        Some(Spacing {
            top: one,
            right: two,
            bottom: three,
            left: two
        })
    );
    assert_eq!(
        spacing("1 2 3 4"),
        Some(Spacing {
            top: one,
            right: two,
            bottom: three,
            left: four
        })
    );
    assert_eq!(spacing("1 2 3 4 5"), None);
}

// ============================================================================
// COLOURS
// ============================================================================

#[test]
fn test_color_forms() {
    let red = RgbaColor::rgb(255, 0, 0);
    assert_eq!(RgbaColor::parse("red").unwrap(), red);
    assert_eq!(RgbaColor::parse("#f00").unwrap(), red);
    assert_eq!(RgbaColor::parse("#FF0000").unwrap(), red);
    assert_eq!(RgbaColor::parse("rgb(255, 0, 0)").unwrap(), red);
    assert!(RgbaColor::parse("not-a-colour").is_err());
}

#[test]
fn test_transparent() {
    assert!(RgbaColor::parse("transparent").unwrap().is_transparent());
}

// ============================================================================
// BORDERS
// ============================================================================

#[test]
fn test_border_edge_any_order() {
    let a = parse_border_edge("solid 1 blue").unwrap();
    let b = parse_border_edge("blue solid 1").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.style, Some(BorderStyle::Solid));
    assert_eq!(a.width, Some(Scalar::cells(1.0)));
}

#[test]
fn test_border_edge_rejects_garbage() {
    assert_eq!(parse_border_edge("solid solid"), None);
    assert_eq!(parse_border_edge("wobbly"), None);
}

// ============================================================================
// SHORTHAND EXPANSION
// ============================================================================

#[test]
fn test_margin_shorthand() {
    let decls = expand_declaration("margin", "1 2");
    assert_eq!(
        decls,
        vec![
            Declaration::MarginTop(Scalar::cells(1.0)),
            Declaration::MarginRight(Scalar::cells(2.0)),
            Declaration::MarginBottom(Scalar::cells(1.0)),
            Declaration::MarginLeft(Scalar::cells(2.0)),
        ]
    );
}

#[test]
fn test_padding_shorthand_keeps_units_per_side() {
    let decls = expand_declaration("padding", "1 50% 2em");
    assert_eq!(
        decls,
        vec![
            Declaration::PaddingTop(Scalar::cells(1.0)),
            Declaration::PaddingRight(Scalar::percent(50.0)),
            Declaration::PaddingBottom(Scalar::em(2.0)),
            Declaration::PaddingLeft(Scalar::percent(50.0)),
        ]
    );
}

#[test]
fn test_border_shorthand_sets_every_side() {
    let decls = expand_declaration("border", "solid red");
    assert_eq!(decls.len(), 12);
    assert!(decls.contains(&Declaration::BorderLeftStyle(BorderStyle::Solid)));
    assert!(decls.contains(&Declaration::BorderTopColor(RgbaColor::rgb(255, 0, 0))));
}

#[test]
fn test_list_style_shorthand() {
    let decls = expand_declaration("list-style", "square");
    assert!(decls.contains(&Declaration::ListStyleType(ListStyleType::Square)));
}

#[test]
fn test_global_keywords() {
    assert_eq!(
        expand_declaration("color", "inherit"),
        vec![Declaration::Inherit(Property::Color)]
    );
    assert_eq!(
        expand_declaration("width", "unset"),
        vec![Declaration::Unset(Property::Width)]
    );
}

#[test]
fn test_unknown_and_custom_properties() {
    assert_eq!(
        expand_declaration("--accent", "teal"),
        vec![Declaration::Custom("--accent".to_string(), "teal".to_string())]
    );
    assert!(matches!(
        expand_declaration("frobnicate", "1").as_slice(),
        [Declaration::Unknown(_)]
    ));
}

#[test]
fn test_track_list_repeat() {
    let tracks = track_list("repeat(3, 1fr) 10").unwrap();
    assert_eq!(tracks.len(), 4);
    assert_eq!(tracks.get(3), Some(&Scalar::cells(10.0)));
}
