//! End-to-end layout tests: markup in, plain text out.
//!
//! Margins at the document edges are collapsed away so snapshots start at
//! the first line of content.

use cellbox::ansi::to_ansi_string;
use cellbox::markup::parse_markup;
use cellbox::{Document, RenderConfig, RenderOutput};

fn config(width: usize) -> RenderConfig {
    RenderConfig::default()
        .with_viewport(width, 20)
        .with_collapse_root_margin(true)
}

fn render_output(source: &str, width: usize) -> RenderOutput {
    let mut doc = parse_markup(source).expect("markup should parse");
    doc.render(&config(width))
}

fn render(source: &str, width: usize) -> String {
    render_output(source, width).to_plain_text()
}

// =============================================================================
// Block flow and margins
// =============================================================================

#[test]
fn paragraph_margins_collapse_between_siblings() {
    insta::assert_snapshot!(render("<p>one</p><p>two</p>", 10), @r"
    one

    two
    ");
}

#[test]
fn the_larger_adjacent_margin_wins() {
    insta::assert_snapshot!(render(r#"<p style="margin-bottom: 3">one</p><p>two</p>"#, 10), @r"
    one



    two
    ");
}

#[test]
fn bordered_box_then_plain_block() {
    let source = r#"<div style="border: 1px solid; padding: 0 1; width: 5">hi</div><div>after</div>"#;
    insta::assert_snapshot!(render(source, 9), @r"
    ┌───────┐
    │ hi    │
    └───────┘
    after
    ");
}

#[test]
fn auto_margins_centre_a_fixed_width_block() {
    let output = render_output(r#"<div style="width: 4; margin: 0 auto">ab</div>"#, 10);
    assert_eq!(output.plain_lines(), ["   ab     "]);
}

#[test]
fn every_line_fills_the_viewport() {
    let output = render_output("<p>one</p><p>two three four</p>", 12);
    assert!(output.lines.iter().all(|line| line.cell_length() == 12));
}

// =============================================================================
// Inline formatting
// =============================================================================

#[test]
fn whitespace_collapses_across_inline_elements() {
    let source = "<p>The   quick\n  <b>brown</b>   fox</p>";
    assert_eq!(render(source, 30), "The quick brown fox");
}

#[test]
fn words_wrap_at_the_viewport() {
    insta::assert_snapshot!(render("<p>the quick brown fox</p>", 10), @r"
    the quick
    brown fox
    ");
}

#[test]
fn line_breaks_end_lines() {
    assert_eq!(render("<p>a<br>b</p>", 10), "a\nb");
}

#[test]
fn preformatted_text_keeps_its_spaces() {
    assert_eq!(render("<pre>a  b\n  c</pre>", 10), "a  b\n  c");
}

// =============================================================================
// Lists and tables
// =============================================================================

#[test]
fn ordered_list_after_a_paragraph() {
    let source = r#"<p style="margin: 0">Steps</p><ol start="3" style="margin: 0"><li>a</li><li>b</li></ol>"#;
    insta::assert_snapshot!(render(source, 20), @r"
    Steps
     3. a
     4. b
    ");
}

#[test]
fn table_below_a_paragraph() {
    let source = "<p style=\"margin: 0\">Scores</p><table style=\"border: 1px solid\">\
        <tr><td>a</td><td>b</td></tr><tr><td>ccc</td><td>d</td></tr></table>";
    insta::assert_snapshot!(render(source, 20), @r"
    Scores
    ┌─────┐
    │a  b │
    │cccd │
    └─────┘
    ");
}

#[test]
fn hidden_rows_leave_the_table_whole() {
    let visible = render(
        "<table style=\"border: 1px solid\"><tr><td>a</td></tr><tr><td>b</td></tr></table>",
        20,
    );
    let with_hidden = render(
        "<table style=\"border: 1px solid\"><tr><td>a</td></tr>\
         <tr style=\"display: none\"><td>gone</td></tr><tr><td>b</td></tr></table>",
        20,
    );
    assert_eq!(with_hidden, visible);
    assert_eq!(with_hidden.matches('┌').count(), 1);
    assert!(!with_hidden.contains("gone"));
}

#[test]
fn grid_tracks_lay_out_items_in_columns() {
    let source = "<div style=\"display: grid; grid-template-columns: 4 1fr\">\
        <div>a</div><div>b</div><div>c</div></div>";
    assert_eq!(render(source, 10), "a   b\nc");
}

// =============================================================================
// Positioning
// =============================================================================

#[test]
fn higher_z_index_paints_last() {
    let output = render_output(
        "<div>....</div>\
         <span style=\"position: absolute; top: 0; left: 0; z-index: 2\">A</span>\
         <span style=\"position: absolute; top: 0; left: 0; z-index: 1\">B</span>",
        4,
    );
    let order: Vec<i32> = output.overlays.iter().map(|o| o.z_index).collect();
    assert_eq!(order, [1, 2]);
    assert_eq!(output.plain_lines()[0], "A...");
}

// =============================================================================
// Document edits and output encodings
// =============================================================================

#[test]
fn edits_show_up_on_the_next_render() {
    let mut doc = Document::new();
    let p = doc.append_element(doc.root(), "p", [("style", "margin: 0")]).unwrap();
    let text = doc.append_text(p, "before").unwrap();
    assert_eq!(doc.render(&config(10)).to_plain_text(), "before");

    doc.set_text(text, "after").unwrap();
    doc.append_element(p, "b", Vec::<(&str, &str)>::new()).unwrap();
    assert_eq!(doc.render(&config(10)).to_plain_text(), "after");
}

#[test]
fn ansi_output_has_one_line_per_row() {
    let output = render_output(r#"<p style="margin: 0">plain <b>bold</b></p><p>next</p>"#, 12);
    let ansi = to_ansi_string(&output).unwrap();
    assert_eq!(ansi.split('\n').count(), output.height());
    assert!(ansi.contains("\u{1b}[1m"));
    assert!(ansi.contains("bold"));
}

#[test]
fn author_sheets_apply_after_the_user_agent_sheet() {
    let mut doc = parse_markup("<p>hello</p>").unwrap();
    doc.add_css("p { text-transform: uppercase }").unwrap();
    assert_eq!(doc.render(&config(10)).to_plain_text(), "HELLO");
}
