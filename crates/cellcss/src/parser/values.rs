//! Value parsing helpers.
//!
//! This module handles the parts of property values that are shared by
//! several properties:
//!
//! - Identifiers: generic CSS identifier parsing
//! - Tokenising: splitting values on whitespace or separators while
//!   respecting parentheses and quotes
//! - Borders: `thick solid red`, `#888 dashed`, `2px double`
//! - Lists: `square inside`, `none`
//!
//! Single longhand values are parsed through
//! [`PropertyValue`](crate::types::PropertyValue); the shorthand expansion in
//! the parent module combines the helpers here.

use crate::types::{
    BorderStyle, ListStylePosition, ListStyleType, PropertyValue, RgbaColor, Scalar,
    border_width_keyword,
};
use nom::{IResult, bytes::complete::take_while1};

/// Parses a CSS identifier (alphanumeric characters, dashes, and underscores).
///
/// Identifiers are used for property names, type selectors, class names, etc.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Splits `input` at every top-level `separator`.
///
/// Separators inside parentheses, brackets or quoted strings are kept.
pub fn split_top_level(input: &str, separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                c if depth == 0 && separator(c) => {
                    parts.push(&input[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Splits a value into whitespace separated tokens.
///
/// ```
/// use cellcss::parser::values::split_tokens;
///
/// assert_eq!(split_tokens(" 1px  rgb(1, 2, 3) 'a b' "), ["1px", "rgb(1, 2, 3)", "'a b'"]);
/// ```
pub fn split_tokens(input: &str) -> Vec<&str> {
    split_top_level(input, char::is_whitespace)
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect()
}

/// The components of a `border` or `border-<side>` shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderEdge {
    pub width: Option<Scalar>,
    pub style: Option<BorderStyle>,
    pub color: Option<RgbaColor>,
    /// The colour was `currentcolor`.
    pub current_color: bool,
}

/// Parses a border shorthand: width, style and colour in any order.
///
/// ```
/// use cellcss::parser::values::parse_border_edge;
/// use cellcss::types::{BorderStyle, RgbaColor, Scalar};
///
/// let edge = parse_border_edge("thick solid #f00").unwrap();
/// assert_eq!(edge.width, Some(Scalar::cells(0.3)));
/// assert_eq!(edge.style, Some(BorderStyle::Solid));
/// assert_eq!(edge.color, Some(RgbaColor::rgb(255, 0, 0)));
/// ```
pub fn parse_border_edge(input: &str) -> Option<BorderEdge> {
    let mut edge = BorderEdge::default();
    for token in split_tokens(input) {
        if edge.style.is_none() {
            if let Some(style) = BorderStyle::from_keyword(token) {
                edge.style = Some(style);
                continue;
            }
        }
        if edge.width.is_none() {
            if let Some(width) = border_width_keyword(token).or_else(|| Scalar::parse_value(token)) {
                edge.width = Some(width);
                continue;
            }
        }
        if edge.color.is_none() && !edge.current_color {
            if token.eq_ignore_ascii_case("currentcolor") {
                edge.current_color = true;
                continue;
            }
            if let Ok(color) = RgbaColor::parse(token) {
                edge.color = Some(color);
                continue;
            }
        }
        return None;
    }
    (edge != BorderEdge::default()).then_some(edge)
}

/// Parses the `list-style` shorthand into its type and position.
///
/// Image components are ignored. `none` sets the type.
pub fn parse_list_style(input: &str) -> Option<(Option<ListStyleType>, Option<ListStylePosition>)> {
    let mut kind = None;
    let mut position = None;
    for token in split_tokens(input) {
        if let Some(p) = ListStylePosition::from_keyword(token) {
            position = Some(p);
        } else if let Some(t) = ListStyleType::from_keyword(token) {
            kind = Some(t);
        } else if !token.starts_with("url(") {
            return None;
        }
    }
    (kind.is_some() || position.is_some()).then_some((kind, position))
}

/// Expands the 1 to 4 values of a box shorthand to (top, right, bottom, left).
pub fn box_values<T: Clone>(values: &[T]) -> Option<[T; 4]> {
    match values {
        [all] => Some([all.clone(), all.clone(), all.clone(), all.clone()]),
        [v, h] => Some([v.clone(), h.clone(), v.clone(), h.clone()]),
        [t, h, b] => Some([t.clone(), h.clone(), b.clone(), h.clone()]),
        [t, r, b, l] => Some([t.clone(), r.clone(), b.clone(), l.clone()]),
        _ => None,
    }
}

/// Strips one pair of matching quotes.
pub fn unquote(value: &str) -> &str {
    let value = value.trim();
    for q in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(q).and_then(|v| v.strip_suffix(q)) {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idents() {
        assert_eq!(parse_ident("list-item;"), Ok((";", "list-item")));
        assert_eq!(parse_ident("--accent:"), Ok((":", "--accent")));
        assert!(parse_ident(":x").is_err());
    }

    #[test]
    fn split_respects_nesting() {
        assert_eq!(
            split_top_level("a, rgb(1, 2, 3), 'x,y'", |c| c == ','),
            ["a", " rgb(1, 2, 3)", " 'x,y'"]
        );
        assert_eq!(split_tokens(""), Vec::<&str>::new());
    }

    #[test]
    fn border_edges_in_any_order() {
        let edge = parse_border_edge("#888 dashed 1px").unwrap();
        assert_eq!(edge.style, Some(BorderStyle::Dashed));
        assert_eq!(edge.width, Some(Scalar::px(1.0)));
        assert_eq!(edge.color, Some(RgbaColor::rgb(0x88, 0x88, 0x88)));

        let edge = parse_border_edge("solid currentcolor").unwrap();
        assert!(edge.current_color);
        assert_eq!(edge.color, None);

        assert!(parse_border_edge("solid wobbly").is_none());
        assert!(parse_border_edge("").is_none());
    }

    #[test]
    fn list_style_shorthand() {
        assert_eq!(
            parse_list_style("square inside"),
            Some((Some(ListStyleType::Square), Some(ListStylePosition::Inside)))
        );
        assert_eq!(parse_list_style("none"), Some((Some(ListStyleType::None), None)));
        assert_eq!(parse_list_style("sparkly"), None);
    }

    #[test]
    fn box_value_expansion() {
        assert_eq!(box_values(&[1, 2]), Some([1, 2, 1, 2]));
        assert_eq!(box_values(&[1, 2, 3]), Some([1, 2, 3, 2]));
        assert_eq!(box_values::<u8>(&[]), None);
    }
}
