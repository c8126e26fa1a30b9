//! Table rendering through the public API, and the glyph rules behind its
//! borders.

use cellbox::box_drawing::{Junction, exact_glyph, resolve_glyph};
use cellbox::edges::Edges;
use cellbox::grid_style::{GridPart, Mask};
use cellbox::strip::Strip;
use cellbox::table::{Cell, Table};
use cellbox::LineStyle;

fn texts(lines: &[Strip]) -> Vec<String> {
    lines.iter().map(Strip::text).collect()
}

fn two_by_two(line: LineStyle) -> Table {
    let mut table = Table::new();
    for (row, texts) in [["a", "bb"], ["ccc", "d"]].into_iter().enumerate() {
        for text in texts {
            table.add_cell(row, Cell::text(text).with_border(Edges::all(line)));
        }
    }
    table
}

// =============================================================================
// Border styles
// =============================================================================

#[test]
fn ascii_borders() {
    insta::assert_snapshot!(texts(&two_by_two(LineStyle::Ascii).render()).join("\n"), @r"
    +-----+----+
    | a   | bb |
    +-----+----+
    | ccc | d  |
    +-----+----+
    ");
}

#[test]
fn rounded_borders_keep_thin_junctions() {
    insta::assert_snapshot!(texts(&two_by_two(LineStyle::Rounded).render()).join("\n"), @r"
    ╭─────┬────╮
    │ a   │ bb │
    ├─────┼────┤
    │ ccc │ d  │
    ╰─────┴────╯
    ");
}

#[test]
fn all_rows_have_the_same_width() {
    let mut table = Table::new();
    table.add_cell(0, Cell::text("tall\ncell").with_span(2, 1));
    table.add_cell(0, Cell::text("x"));
    table.add_cell(1, Cell::text("a longer line"));
    table.add_cell(2, Cell::text("footer").with_span(1, 2));
    let rows = table.render();
    let width = rows[0].cell_length();
    assert!(rows.iter().all(|row| row.cell_length() == width));
}

// =============================================================================
// Width negotiation
// =============================================================================

#[test]
fn rendered_width_stays_within_max() {
    for max in 11..=40 {
        let mut table = Table::new();
        table.add_cell(0, Cell::text("alpha beta gamma"));
        table.add_cell(0, Cell::text("delta"));
        table.width.max = Some(max);
        let rows = table.render();
        assert!(
            rows.iter().all(|row| row.cell_length() <= max),
            "table wider than {max}: {:?}",
            texts(&rows)
        );
    }
}

#[test]
fn wider_limits_never_shrink_the_table() {
    let mut previous = 0;
    for max in 7..=40 {
        let mut table = Table::new();
        table.add_cell(0, Cell::text("alpha beta gamma"));
        table.add_cell(0, Cell::text("delta"));
        table.width.max = Some(max);
        let width = table.calculate_col_widths().iter().sum::<usize>();
        assert!(width >= previous, "{max}: {width} < {previous}");
        previous = width;
    }
}

#[test]
fn expand_fills_the_maximum() {
    let mut table = Table::new();
    table.add_cell(0, Cell::text("a"));
    table.add_cell(0, Cell::text("b"));
    table.width.max = Some(20);
    table.expand = true;
    assert!(table.render().iter().all(|row| row.cell_length() == 20));
}

// =============================================================================
// Glyph resolution
// =============================================================================

#[test]
fn every_exact_glyph_resolves_to_itself() {
    for north in LineStyle::ALL {
        for east in [LineStyle::NoLine, LineStyle::Thin, LineStyle::Double, LineStyle::Ascii] {
            for south in [LineStyle::NoLine, LineStyle::Thin, LineStyle::Thick] {
                let junction = Junction::new(north, east, south, LineStyle::NoLine);
                if let Some(glyph) = exact_glyph(junction) {
                    assert_eq!(resolve_glyph(junction), glyph);
                }
            }
        }
    }
}

#[test]
fn grid_combine_draws_heavier_outer_frame() {
    let grid = LineStyle::Thin.grid(Mask::GRID).combine(&LineStyle::Double.grid(Mask::OUTER));
    assert_eq!(grid.glyph(GridPart::TopLeft), '╔');
    assert_eq!(grid.glyph(GridPart::MidSplit), '│');
    assert_eq!(grid.glyph(GridPart::SplitSplit), '┼');
}
