//! Integration tests for comment handling in style sheets.

use cellcss::parser::parse_stylesheet;
use cellcss::types::Declaration;

#[test]
fn test_block_comments() {
    let css = r#"
        p {
            /* this is a comment */
            color: red;
        }
    "#;
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].declarations.len(), 1);
}

#[test]
fn test_inline_comments() {
    let css = r#"
        p {
            color: red; /* inline comment */
            background-color: blue;
        }
    "#;
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(sheet.rules[0].declarations.len(), 2);
}

#[test]
fn test_line_comments() {
    let css = r#"
        p {
            // line comment
            color: red;
        }
    "#;
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].declarations.len(), 1);
}

#[test]
fn test_comment_between_rules() {
    let css = "h1 { color: red } /* h2 { color: blue } */ h3 { color: green }";
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(sheet.rules.len(), 2);
}

#[test]
fn test_comment_markers_inside_strings() {
    let css = r#"q::before { content: "/* not a comment */"; }"#;
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(
        sheet.rules[0].declarations,
        vec![Declaration::Content("/* not a comment */".to_string())]
    );
}

#[test]
fn test_unterminated_comment_swallows_the_rest() {
    let css = "p { color: red } /* never closed h1 { color: blue }";
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(sheet.rules.len(), 1);
}
