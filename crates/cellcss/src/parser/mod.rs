//! Stylesheet parsing and data structures.
//!
//! This module provides the core parsing functionality for style sheets,
//! including:
//!
//! - [`parse_stylesheet`]: Main entry point for parsing style sheet source
//! - [`parse_inline_style`]: Lenient parsing of `style="..."` attributes
//! - [`StyleSheet`]: Represents a complete parsed stylesheet
//! - [`Rule`]: A CSS rule with selectors and declarations
//! - Selector types: [`Selector`], [`CompoundSelector`], [`ComplexSelector`]
//!
//! ## Submodules
//!
//! - [`cascade`]: Selector matching, specificity and style computation
//! - [`media`]: `@media` conditions
//! - [`selectors`]: Selector parsing (type, class, ID, attributes, combinators)
//! - [`stylesheet`]: Core data structures for rules and selectors
//! - [`units`]: Numeric value and unit parsing
//! - [`values`]: Tokenising, border and list value parsing
//!
//! ## Example
//!
//! ```rust
//! use cellcss::parser::{parse_stylesheet, Selector};
//! use cellcss::types::{Declaration, FontWeight};
//!
//! let stylesheet = parse_stylesheet("h1 { font-weight: bold; }").unwrap();
//! let rule = &stylesheet.rules[0];
//!
//! assert_eq!(
//!     rule.selectors.selectors[0].parts[0].compound.selectors[0],
//!     Selector::Type("h1".to_string())
//! );
//! assert_eq!(rule.declarations, vec![Declaration::FontWeight(FontWeight::Bold)]);
//! ```

pub mod cascade;
pub mod media;
pub mod selectors;
pub mod stylesheet;
pub mod units;
pub mod values;

pub use crate::parser::stylesheet::{
    AttrOp, Combinator, ComplexSelector, CompoundSelector, NthChild, PseudoClass, Rule, Selector,
    SelectorList, SelectorPart, Specificity, StyleSheet,
};

use crate::error::{CssError, Result};
use crate::parser::media::MediaQuery;
use crate::parser::selectors::parse_complex_selector;
use crate::parser::values::{parse_ident, split_tokens, split_top_level};
use crate::types::{Declaration, Property, RgbaColor, Scalar};

use log::{debug, trace};
use nom::{
    IResult,
    character::complete::{char, multispace0},
    multi::many0,
    sequence::{delimited, preceded, tuple},
};

/// Parses a full style sheet.
///
/// Rules with selectors this engine does not support are skipped, as are
/// unknown at-rules and unparsable declarations. Only structural damage (an
/// unterminated block, a stray brace) is an error.
pub fn parse_stylesheet(source: &str) -> Result<StyleSheet> {
    let source = strip_comments(source);
    let mut sheet = StyleSheet::default();
    parse_rule_list(&source, None, &mut sheet.rules)?;
    Ok(sheet)
}

fn parse_rule_list(mut input: &str, media: Option<&MediaQuery>, rules: &mut Vec<Rule>) -> Result<()> {
    loop {
        input = input.trim_start();
        if input.is_empty() {
            return Ok(());
        }

        if let Some(at_rule) = input.strip_prefix('@') {
            input = parse_at_rule(at_rule, media, rules)?;
            continue;
        }

        match parse_rule(input) {
            Ok((rest, mut rule)) => {
                rule.media = media.cloned();
                rules.push(rule);
                input = rest;
            }
            Err(_) => {
                let (rest, skipped) = skip_block(input)?;
                debug!("skipping unsupported rule `{}`", prelude_of(skipped));
                input = rest;
            }
        }
    }
}

/// Parses the at-rule following an `@`, returning the remaining input.
fn parse_at_rule<'a>(
    input: &'a str,
    media: Option<&MediaQuery>,
    rules: &mut Vec<Rule>,
) -> Result<&'a str> {
    let name = parse_ident(input).map(|(_, name)| name).unwrap_or("");
    if name.eq_ignore_ascii_case("media") {
        let (rest, block) = skip_block(input)?;
        let open = block.find('{').unwrap_or(block.len());
        let condition = &block[name.len()..open];
        let body = block[open..]
            .strip_prefix('{')
            .and_then(|b| b.strip_suffix('}'))
            .unwrap_or("");
        let query = MediaQuery::parse(condition).unwrap_or_else(|err| {
            debug!("{err}; the block will never apply");
            MediaQuery::Never
        });
        let query = match media {
            Some(outer) => outer.clone().and(query),
            None => query,
        };
        parse_rule_list(body, Some(&query), rules)?;
        return Ok(rest);
    }

    // Statement at-rules end at a semicolon; block at-rules at their block.
    let semicolon = input.find(';');
    let brace = input.find('{');
    match (semicolon, brace) {
        (Some(s), Some(b)) if s < b => Ok(&input[s + 1..]),
        (Some(s), None) => Ok(&input[s + 1..]),
        _ => {
            trace!("skipping @{name} block");
            skip_block(input).map(|(rest, _)| rest)
        }
    }
}

/// Top-level parser for a CSS rule (e.g., "p { color: red; }").
pub fn parse_rule(input: &str) -> IResult<&str, Rule> {
    let (input, selectors) = preceded(multispace0, parse_selector_list)(input)?;
    let (input, body) = preceded(multispace0, delimited(char('{'), block_body, char('}')))(input)?;
    let (declarations, important) = parse_declarations(body);
    Ok((input, Rule::new(selectors, declarations, important)))
}

/// Parses a comma-separated list of selectors (e.g., "h1, .title").
pub fn parse_selector_list(input: &str) -> IResult<&str, SelectorList> {
    let (input, _) = multispace0(input)?;
    let (input, first) = parse_complex_selector(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','), multispace0)),
        parse_complex_selector,
    ))(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, SelectorList::new(selectors)))
}

/// Parses the declarations of a block, split into normal and `!important`.
///
/// Invalid declarations are dropped.
pub fn parse_declarations(input: &str) -> (Vec<Declaration>, Vec<Declaration>) {
    let mut normal = Vec::new();
    let mut important = Vec::new();

    for item in split_top_level(input, |c| c == ';') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let parsed: IResult<&str, &str> =
            nom::sequence::terminated(parse_ident, tuple((multispace0, char(':'), multispace0)))(item);
        let Ok((value, property)) = parsed else {
            debug!("dropping malformed declaration `{item}`");
            continue;
        };

        let (value, is_important) = strip_important(value);
        let target = if is_important { &mut important } else { &mut normal };
        target.extend(expand_declaration(property, value));
    }

    (normal, important)
}

/// Parses the contents of a `style` attribute.
///
/// ```
/// use cellcss::parser::parse_inline_style;
/// use cellcss::types::{Declaration, RgbaColor};
///
/// let (normal, _) = parse_inline_style("color: #00f; width: ???");
/// assert_eq!(normal, vec![Declaration::Color(RgbaColor::rgb(0, 0, 255))]);
/// ```
pub fn parse_inline_style(input: &str) -> (Vec<Declaration>, Vec<Declaration>) {
    parse_declarations(&strip_comments(input))
}

fn strip_important(value: &str) -> (&str, bool) {
    let trimmed = value.trim_end();
    if let Some(bang) = trimmed.rfind('!') {
        if trimmed[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (trimmed[..bang].trim_end(), true);
        }
    }
    (trimmed, false)
}

/// Expands one written declaration into longhand declarations.
///
/// Shorthands produce several declarations; an unknown property produces a
/// single [`Declaration::Unknown`]; an invalid value produces none.
///
/// ```
/// use cellcss::parser::expand_declaration;
/// use cellcss::types::{Declaration, Scalar};
///
/// let margin = expand_declaration("margin", "1 2");
/// assert_eq!(margin[0], Declaration::MarginTop(Scalar::cells(1.0)));
/// assert_eq!(margin[3], Declaration::MarginLeft(Scalar::cells(2.0)));
/// ```
pub fn expand_declaration(property: &str, value: &str) -> Vec<Declaration> {
    let name = property.trim().to_ascii_lowercase();
    let value = value.trim();

    if name.starts_with("--") {
        return vec![Declaration::Custom(name, value.to_string())];
    }

    let Some(longhands) = longhands(&name) else {
        trace!("unknown property `{name}`");
        return vec![Declaration::Unknown(name)];
    };

    let keyword = value.to_ascii_lowercase();
    match keyword.as_str() {
        "unset" | "initial" | "revert" => {
            return longhands.iter().map(|p| Declaration::Unset(*p)).collect();
        }
        "inherit" => return longhands.iter().map(|p| Declaration::Inherit(*p)).collect(),
        _ => {}
    }

    let expanded = expand_value(&name, value);
    if expanded.is_empty() {
        debug!("ignoring invalid value `{value}` for `{name}`");
    }
    expanded
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// The longhands a property name sets, or `None` for unknown names.
fn longhands(name: &str) -> Option<Vec<Property>> {
    let per_side = |pattern: &str| -> Vec<Property> {
        SIDES
            .iter()
            .filter_map(|side| Property::from_name(&pattern.replace("{}", side)))
            .collect()
    };
    let list = match name {
        "margin" => per_side("margin-{}"),
        "padding" => per_side("padding-{}"),
        "border-width" => per_side("border-{}-width"),
        "border-style" => per_side("border-{}-style"),
        "border-color" => per_side("border-{}-color"),
        "border" => ["width", "style", "color"]
            .iter()
            .flat_map(|part| per_side(&format!("border-{{}}-{part}")))
            .collect(),
        "border-top" | "border-right" | "border-bottom" | "border-left" => ["width", "style", "color"]
            .iter()
            .filter_map(|part| Property::from_name(&format!("{name}-{part}")))
            .collect(),
        "list-style" => vec![Property::ListStyleType, Property::ListStylePosition],
        "gap" | "grid-gap" => vec![Property::RowGap, Property::ColumnGap],
        "grid-template" => vec![Property::GridTemplateAreas, Property::GridTemplateColumns],
        "grid-column" => vec![Property::GridColumnStart, Property::GridColumnEnd],
        "flex-flow" => vec![Property::FlexDirection],
        "overflow" => vec![Property::OverflowX, Property::OverflowY],
        "background" => vec![Property::BackgroundColor],
        "text-decoration-line" => vec![Property::TextDecoration],
        _ => vec![Property::from_name(name)?],
    };
    Some(list)
}

fn expand_value(name: &str, value: &str) -> Vec<Declaration> {
    match name {
        "margin" | "padding" => {
            let Some(spacing) = units::spacing(value) else {
                return Vec::new();
            };
            let sides = [spacing.top, spacing.right, spacing.bottom, spacing.left];
            longhands(name)
                .unwrap_or_default()
                .into_iter()
                .zip(sides)
                .filter_map(|(p, s)| with_value(Some(p), s))
                .collect()
        }
        "border-width" | "border-style" | "border-color" => {
            let tokens = split_tokens(value);
            let Some(sides) = values::box_values(&tokens) else {
                return Vec::new();
            };
            let parsed: Vec<Declaration> = longhands(name)
                .unwrap_or_default()
                .into_iter()
                .zip(sides)
                .filter_map(|(p, token)| longhand(p, token))
                .collect();
            if parsed.len() == 4 { parsed } else { Vec::new() }
        }
        "border" | "border-top" | "border-right" | "border-bottom" | "border-left" => {
            let Some(edge) = values::parse_border_edge(value) else {
                return Vec::new();
            };
            let sides: Vec<&str> = match name.strip_prefix("border-") {
                Some(side) => vec![side],
                None => SIDES.to_vec(),
            };
            let mut declarations = Vec::new();
            for side in sides {
                let width = edge
                    .width
                    .or_else(|| edge.style.map(|_| Scalar::cells(0.15)))
                    .unwrap_or(Scalar::ZERO);
                declarations.extend(with_value(side_property(side, "width"), width));
                declarations.extend(with_value(side_property(side, "style"), edge.style.unwrap_or_default()));
                match (edge.color, side_property(side, "color")) {
                    (Some(color), Some(p)) => declarations.extend(with_value(Some(p), color)),
                    (None, Some(p)) => declarations.push(Declaration::Unset(p)),
                    _ => {}
                }
            }
            declarations
        }
        "list-style" => match values::parse_list_style(value) {
            Some((kind, position)) => {
                let mut declarations = Vec::new();
                declarations.extend(kind.map(Declaration::ListStyleType));
                declarations.extend(position.map(Declaration::ListStylePosition));
                declarations
            }
            None => Vec::new(),
        },
        "gap" | "grid-gap" => {
            let tokens = split_tokens(value);
            let (row, column) = match tokens.as_slice() {
                [both] => (*both, *both),
                [row, column] => (*row, *column),
                _ => return Vec::new(),
            };
            [longhand(Property::RowGap, row), longhand(Property::ColumnGap, column)]
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .unwrap_or_default()
        }
        "grid-template" => {
            // `<areas> / <columns>`; row sizes are not used.
            let halves = split_top_level(value, |c| c == '/');
            let mut declarations = Vec::new();
            if let Some(rows) = halves.first() {
                if rows.contains(['"', '\'']) {
                    declarations.extend(longhand(Property::GridTemplateAreas, rows));
                }
            }
            if let Some(columns) = halves.get(1) {
                declarations.extend(longhand(Property::GridTemplateColumns, columns));
            }
            declarations
        }
        "grid-column" => {
            let halves = split_top_level(value, |c| c == '/');
            let mut declarations = Vec::new();
            declarations.extend(halves.first().and_then(|s| longhand(Property::GridColumnStart, s)));
            declarations.extend(halves.get(1).and_then(|e| longhand(Property::GridColumnEnd, e)));
            declarations
        }
        "flex-flow" => split_tokens(value)
            .into_iter()
            .find_map(|token| longhand(Property::FlexDirection, token))
            .into_iter()
            .collect(),
        "overflow" => {
            let tokens = split_tokens(value);
            let (x, y) = match tokens.as_slice() {
                [both] => (*both, *both),
                [x, y] => (*x, *y),
                _ => return Vec::new(),
            };
            [longhand(Property::OverflowX, x), longhand(Property::OverflowY, y)]
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .unwrap_or_default()
        }
        "background" => split_tokens(value)
            .into_iter()
            .find_map(|token| longhand(Property::BackgroundColor, token))
            .into_iter()
            .collect(),
        "text-decoration-line" => longhand(Property::TextDecoration, value).into_iter().collect(),
        _ => match Property::from_name(name) {
            Some(property) => longhand(property, value).into_iter().collect(),
            None => Vec::new(),
        },
    }
}

fn side_property(side: &str, part: &str) -> Option<Property> {
    Property::from_name(&format!("border-{side}-{part}"))
}

/// Builds the declaration for `property` from an already parsed value.
fn with_value<T: ToDeclarationValue>(property: Option<Property>, value: T) -> Option<Declaration> {
    property.and_then(|p| value.into_declaration(p))
}

/// Parses a single longhand value, honouring the colour keywords.
fn longhand(property: Property, value: &str) -> Option<Declaration> {
    let value = value.trim();
    let keyword = value.to_ascii_lowercase();
    let is_color = matches!(
        property,
        Property::Color
            | Property::BackgroundColor
            | Property::BorderTopColor
            | Property::BorderRightColor
            | Property::BorderBottomColor
            | Property::BorderLeftColor
    );
    if is_color {
        match keyword.as_str() {
            "currentcolor" if property == Property::Color => {
                return Some(Declaration::Inherit(property));
            }
            "currentcolor" | "default" => return Some(Declaration::Unset(property)),
            _ => {}
        }
    }
    match keyword.as_str() {
        "unset" | "initial" => Some(Declaration::Unset(property)),
        "inherit" => Some(Declaration::Inherit(property)),
        _ => property.parse(value),
    }
}

/// Typed values the shorthand expansion hands to a longhand.
trait ToDeclarationValue {
    fn into_declaration(self, property: Property) -> Option<Declaration>;
}

impl ToDeclarationValue for Scalar {
    fn into_declaration(self, property: Property) -> Option<Declaration> {
        Some(match property {
            Property::MarginTop => Declaration::MarginTop(self),
            Property::MarginRight => Declaration::MarginRight(self),
            Property::MarginBottom => Declaration::MarginBottom(self),
            Property::MarginLeft => Declaration::MarginLeft(self),
            Property::PaddingTop => Declaration::PaddingTop(self),
            Property::PaddingRight => Declaration::PaddingRight(self),
            Property::PaddingBottom => Declaration::PaddingBottom(self),
            Property::PaddingLeft => Declaration::PaddingLeft(self),
            Property::BorderTopWidth => Declaration::BorderTopWidth(self),
            Property::BorderRightWidth => Declaration::BorderRightWidth(self),
            Property::BorderBottomWidth => Declaration::BorderBottomWidth(self),
            Property::BorderLeftWidth => Declaration::BorderLeftWidth(self),
            _ => return None,
        })
    }
}

impl ToDeclarationValue for crate::types::BorderStyle {
    fn into_declaration(self, property: Property) -> Option<Declaration> {
        Some(match property {
            Property::BorderTopStyle => Declaration::BorderTopStyle(self),
            Property::BorderRightStyle => Declaration::BorderRightStyle(self),
            Property::BorderBottomStyle => Declaration::BorderBottomStyle(self),
            Property::BorderLeftStyle => Declaration::BorderLeftStyle(self),
            _ => return None,
        })
    }
}

impl ToDeclarationValue for RgbaColor {
    fn into_declaration(self, property: Property) -> Option<Declaration> {
        Some(match property {
            Property::BorderTopColor => Declaration::BorderTopColor(self),
            Property::BorderRightColor => Declaration::BorderRightColor(self),
            Property::BorderBottomColor => Declaration::BorderBottomColor(self),
            Property::BorderLeftColor => Declaration::BorderLeftColor(self),
            Property::Color => Declaration::Color(self),
            Property::BackgroundColor => Declaration::BackgroundColor(self),
            _ => return None,
        })
    }
}

/// Removes `/* */` comments outside strings, and `//` line comments that
/// start a line.
pub fn strip_comments(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.char_indices().peekable();
    let mut quote: Option<char> = None;
    let mut line_start = true;

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            output.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                output.push(c);
            }
            '/' if source[i..].starts_with("/*") => {
                let end = source[i + 2..].find("*/").map_or(source.len(), |e| i + 2 + e + 2);
                while chars.peek().is_some_and(|(j, _)| *j < end) {
                    chars.next();
                }
                output.push(' ');
                continue;
            }
            '/' if line_start && source[i..].starts_with("//") => {
                while chars.peek().is_some_and(|(_, c)| *c != '\n') {
                    chars.next();
                }
                continue;
            }
            _ => output.push(c),
        }
        if c == '\n' {
            line_start = true;
        } else if !c.is_whitespace() {
            line_start = false;
        }
    }
    output
}

/// Takes everything up to the brace closing the current block.
fn block_body(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in input.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '{' => depth += 1,
                '}' if depth == 0 => return Ok((&input[i..], &input[..i])),
                '}' => depth -= 1,
                _ => {}
            },
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}

/// Skips a prelude and its balanced `{...}` block, returning the rest and the
/// skipped text.
fn skip_block(input: &str) -> Result<(&str, &str)> {
    let open = input.find('{').ok_or_else(|| {
        CssError::InvalidSyntax(format!("expected `{{` after `{}`", prelude_of(input)))
    })?;
    let close = input[..open].find('}');
    if close.is_some() {
        return Err(CssError::InvalidSyntax(format!(
            "unexpected `}}` near `{}`",
            prelude_of(input)
        )));
    }
    let (rest, _) = block_body(&input[open + 1..]).map_err(|_| {
        CssError::InvalidSyntax(format!("unterminated block after `{}`", prelude_of(input)))
    })?;
    // `rest` starts at the closing brace
    let consumed = input.len() - rest.len() + 1;
    Ok((&input[consumed..], &input[..consumed]))
}

fn prelude_of(input: &str) -> &str {
    input.split('{').next().unwrap_or(input).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BorderStyle, ListStylePosition, ListStyleType, Overflow, Unit};

    #[test]
    fn important_declarations_are_separated() {
        let sheet = parse_stylesheet("p { color: red !important; order: 2 ! important; z-index: 1 }").unwrap();
        let rule = &sheet.rules[0];
        assert_eq!(rule.declarations, vec![Declaration::ZIndex(1)]);
        assert_eq!(
            rule.important,
            vec![Declaration::Color(RgbaColor::rgb(255, 0, 0)), Declaration::Order(2)]
        );
    }

    #[test]
    fn border_shorthand_expands_to_every_side() {
        let expanded = expand_declaration("border", "1px solid #888888");
        assert_eq!(expanded.len(), 12);
        assert!(expanded.contains(&Declaration::BorderLeftStyle(BorderStyle::Solid)));
        assert!(expanded.contains(&Declaration::BorderTopWidth(Scalar::px(1.0))));

        let bottom = expand_declaration("border-bottom", "double thick");
        assert_eq!(
            bottom,
            vec![
                Declaration::BorderBottomWidth(Scalar::cells(0.3)),
                Declaration::BorderBottomStyle(BorderStyle::Double),
                Declaration::Unset(Property::BorderBottomColor),
            ]
        );
    }

    #[test]
    fn shorthands() {
        assert_eq!(
            expand_declaration("list-style", "square outside"),
            vec![
                Declaration::ListStyleType(ListStyleType::Square),
                Declaration::ListStylePosition(ListStylePosition::Outside),
            ]
        );
        assert_eq!(
            expand_declaration("overflow", "hidden"),
            vec![Declaration::OverflowX(Overflow::Hidden), Declaration::OverflowY(Overflow::Hidden)]
        );
        assert_eq!(
            expand_declaration("gap", "1 2"),
            vec![Declaration::RowGap(Scalar::cells(1.0)), Declaration::ColumnGap(Scalar::cells(2.0))]
        );
        assert_eq!(
            expand_declaration("background", "url(x.png) #fff no-repeat"),
            vec![Declaration::BackgroundColor(RgbaColor::white())]
        );
        assert_eq!(expand_declaration("border-width", "0 1 2 3 4"), Vec::<Declaration>::new());
        let columns = expand_declaration("grid-template", "'a b' / 1fr 2fr");
        assert_eq!(columns.len(), 2);
        assert!(matches!(&columns[1], Declaration::GridTemplateColumns(t) if t.0[1] == Scalar::new(2.0, Unit::Fraction)));
    }

    #[test]
    fn global_keywords_and_colors() {
        assert_eq!(
            expand_declaration("padding", "unset"),
            vec![
                Declaration::Unset(Property::PaddingTop),
                Declaration::Unset(Property::PaddingRight),
                Declaration::Unset(Property::PaddingBottom),
                Declaration::Unset(Property::PaddingLeft),
            ]
        );
        assert_eq!(
            expand_declaration("color", "currentColor"),
            vec![Declaration::Inherit(Property::Color)]
        );
        assert_eq!(
            expand_declaration("border-top-color", "currentcolor"),
            vec![Declaration::Unset(Property::BorderTopColor)]
        );
        assert_eq!(
            expand_declaration("--accent", " teal "),
            vec![Declaration::Custom("--accent".into(), "teal".into())]
        );
        assert_eq!(
            expand_declaration("scrollbar-width", "thin"),
            vec![Declaration::Unknown("scrollbar-width".into())]
        );
        assert_eq!(expand_declaration("width", "wide"), Vec::<Declaration>::new());
    }

    #[test]
    fn unsupported_rules_are_skipped() {
        let sheet = parse_stylesheet(
            "a:hover { color: red } h1 + p { order: 1 } @font-face { src: x } @charset 'utf-8'; p { order: 2 }",
        )
        .unwrap();
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].declarations, vec![Declaration::Order(2)]);
    }

    #[test]
    fn structural_errors() {
        assert!(parse_stylesheet("p { color: red;").is_err());
        assert!(parse_stylesheet("p color: red; }").is_err());
        assert!(parse_stylesheet("").unwrap().is_empty());
    }

    #[test]
    fn braces_inside_strings() {
        let sheet = parse_stylesheet(r#"q::before { content: "}"; } p { order: 1 }"#).unwrap();
        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(sheet.rules[0].declarations, vec![Declaration::Content("}".into())]);
    }

    #[test]
    fn comments_are_stripped() {
        let css = "/* a } */ p { /* b */ order: 1; }\n// line\nli { order: 2 }";
        let sheet = parse_stylesheet(css).unwrap();
        assert_eq!(sheet.rules.len(), 2);
        let stripped = strip_comments("a { content: '/* kept */' }");
        assert!(stripped.contains("/* kept */"));
    }

    #[test]
    fn nested_media_blocks() {
        let css = "@media screen { @media (min-width: 10) { p { order: 1 } } }";
        let sheet = parse_stylesheet(css).unwrap();
        assert!(matches!(sheet.rules[0].media, Some(MediaQuery::And(_)) | Some(MediaQuery::Feature(_))));
    }
}
