//! A strict reader for well-formed HTML-like markup.
//!
//! This is a convenience for callers without their own parser. Every tag
//! must be closed (void elements aside) and closing tags must match; there
//! is no error recovery. `<style>` and `<script>` hold raw text.
//!
//! ```
//! use cellbox::markup::parse_markup;
//!
//! let doc = parse_markup(r#"<p class=lead>Fish &amp; chips<br/></p>"#).unwrap();
//! let p = doc.find("p").unwrap();
//! assert_eq!(doc.attribute(p, "class"), Some("lead"));
//! assert_eq!(doc.text_content(p), "Fish & chips");
//! ```

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt},
    multi::many0,
    sequence::{delimited, preceded, tuple},
};

use crate::document::{Document, NodeId, VOID_ELEMENTS};
use crate::error::{CellboxError, Result};

/// Elements whose content is raw text.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

#[derive(Debug, PartialEq)]
struct OpenTag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, String)>,
    self_closing: bool,
}

fn tag_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')(input)
}

fn attribute_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'' | '<'))(input)
}

fn attribute_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
        take_while1(|c: char| !c.is_whitespace() && !matches!(c, '>' | '"' | '\'' | '<' | '`' | '=')),
    ))(input)
}

/// `name`, `name=value`, `name="value"` or `name='value'`.
fn attribute(input: &str) -> IResult<&str, (&str, String)> {
    let (input, name) = attribute_name(input)?;
    let (input, value) = opt(preceded(
        delimited(multispace0, char('='), multispace0),
        attribute_value,
    ))(input)?;
    Ok((input, (name, value.map(decode_entities).unwrap_or_default())))
}

fn open_tag(input: &str) -> IResult<&str, OpenTag<'_>> {
    let (input, (_, name, attributes, _, slash, _)) = tuple((
        char('<'),
        tag_name,
        many0(preceded(multispace1, attribute)),
        multispace0,
        opt(char('/')),
        char('>'),
    ))(input)?;
    Ok((
        input,
        OpenTag {
            name,
            attributes,
            self_closing: slash.is_some(),
        },
    ))
}

fn close_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("</"), tag_name, preceded(multispace0, char('>')))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

/// `<!DOCTYPE ...>` and `<?xml ...?>` declarations.
fn declaration(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(tag("<!"), take_till(|c| c == '>'), char('>')),
        delimited(tag("<?"), take_till(|c| c == '>'), char('>')),
    ))(input)
}

fn text(input: &str) -> IResult<&str, &str> {
    take_while1(|c| c != '<')(input)
}

/// Replaces character references with the characters they name.
///
/// Unknown named references are kept as written.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match entity(rest) {
            Ok((after, ch)) => {
                out.push(ch);
                rest = after;
            }
            Err(_) => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn numeric_reference(input: &str) -> IResult<&str, char> {
    let (input, (digits, radix)) = alt((
        map(
            preceded(alt((char('x'), char('X'))), take_while1(|c: char| c.is_ascii_hexdigit())),
            |d| (d, 16),
        ),
        map(take_while1(|c: char| c.is_ascii_digit()), |d| (d, 10)),
    ))(input)?;
    let ch = u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or('\u{FFFD}');
    Ok((input, ch))
}

fn named_reference(input: &str) -> IResult<&str, char> {
    let (rest, name) = take_while(|c: char| c.is_ascii_alphanumeric())(input)?;
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "laquo" => '«',
        "raquo" => '»',
        "ldquo" => '“',
        "rdquo" => '”',
        "lsquo" => '‘',
        "rsquo" => '’',
        "bull" => '•',
        "middot" => '·',
        "times" => '×',
        "deg" => '°',
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )));
        }
    };
    Ok((rest, ch))
}

fn entity(input: &str) -> IResult<&str, char> {
    delimited(
        char('&'),
        alt((preceded(char('#'), numeric_reference), named_reference)),
        char(';'),
    )(input)
}

fn markup_error(source: &str, rest: &str, message: impl Into<String>) -> CellboxError {
    CellboxError::Markup {
        offset: source.len() - rest.len(),
        message: message.into(),
    }
}

/// Parses a complete document.
///
/// The contents of `<style>` elements take part in the cascade as document
/// style sheets.
pub fn parse_markup(source: &str) -> Result<Document> {
    let mut doc = Document::new();
    let mut stack: Vec<(NodeId, &str)> = vec![(doc.root(), "")];
    let mut input = source;

    while !input.is_empty() {
        if input.starts_with("<!--") {
            let (rest, _) = comment(input).map_err(|_| markup_error(source, input, "unterminated comment"))?;
            input = rest;
        } else if input.starts_with("</") {
            let (rest, name) = close_tag(input).map_err(|_| markup_error(source, input, "malformed closing tag"))?;
            let name_lower = name.to_ascii_lowercase();
            let open = stack
                .last()
                .filter(|_| stack.len() > 1)
                .map(|(_, open)| open.to_ascii_lowercase());
            match open {
                Some(open) if open == name_lower => {
                    stack.pop();
                }
                Some(open) => {
                    return Err(markup_error(
                        source,
                        input,
                        format!("</{name_lower}> does not close <{open}>"),
                    ));
                }
                _ => {
                    return Err(markup_error(source, input, format!("</{name_lower}> closes nothing")));
                }
            }
            input = rest;
        } else if input.starts_with("<!") || input.starts_with("<?") {
            let (rest, _) = declaration(input).map_err(|_| markup_error(source, input, "unterminated declaration"))?;
            input = rest;
        } else if input.starts_with('<') {
            let (rest, open) = open_tag(input).map_err(|_| markup_error(source, input, "malformed tag"))?;
            let parent = stack.last().map_or(doc.root(), |(id, _)| *id);
            let element = doc.append_element(parent, open.name, open.attributes)?;
            let name = open.name.to_ascii_lowercase();
            input = rest;

            if open.self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                continue;
            }
            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                let end = find_raw_text_end(input, &name)
                    .ok_or_else(|| markup_error(source, input, format!("unterminated <{name}>")))?;
                if end > 0 {
                    doc.append_text(element, &input[..end])?;
                }
                let (rest, _) = close_tag(&input[end..])
                    .map_err(|_| markup_error(source, &input[end..], "malformed closing tag"))?;
                input = rest;
                continue;
            }
            stack.push((element, open.name));
        } else {
            let (rest, raw) = text(input).map_err(|_| markup_error(source, input, "expected text"))?;
            let parent = stack.last().map_or(doc.root(), |(id, _)| *id);
            doc.append_text(parent, decode_entities(raw))?;
            input = rest;
        }
    }

    if let Some((_, open)) = stack.last().filter(|_| stack.len() > 1) {
        return Err(markup_error(source, input, format!("<{open}> is never closed")));
    }
    Ok(doc)
}

/// Byte offset of the `</name` that ends a raw text element.
fn find_raw_text_end(input: &str, name: &str) -> Option<usize> {
    let lower = input.to_ascii_lowercase();
    let needle = format!("</{name}");
    lower.find(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_tag_attribute_forms() {
        let (rest, open) = open_tag(r#"<input type=text value="a b" disabled data-x='1'/>tail"#).unwrap();
        assert_eq!(rest, "tail");
        assert_eq!(open.name, "input");
        assert!(open.self_closing);
        assert_eq!(
            open.attributes,
            vec![
                ("type", "text".to_string()),
                ("value", "a b".to_string()),
                ("disabled", String::new()),
                ("data-x", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; &#65;&#x42; &bogus; &"), "a <b> & AB &bogus; &");
        assert_eq!(decode_entities("&nbsp;"), "\u{a0}");
    }

    #[test]
    fn test_nested_document() {
        let doc = parse_markup(
            "<!DOCTYPE html><html><body><!-- note --><ul><li>a</li><li>b</li></ul><hr></body></html>",
        )
        .unwrap();
        let ul = doc.find("ul").unwrap();
        assert_eq!(doc.children(ul).len(), 2);
        assert_eq!(doc.text_content(ul), "ab");
        let body = doc.find("body").unwrap();
        assert_eq!(doc.children(body).len(), 2);
    }

    #[test]
    fn test_style_is_raw_text() {
        let doc = parse_markup("<style>p > a { color: red }</style><p>x</p>").unwrap();
        let style = doc.find("style").unwrap();
        assert_eq!(doc.text_content(style), "p > a { color: red }");
        assert_eq!(doc.embedded_sheets().len(), 1);
    }

    #[test]
    fn test_errors_report_offsets() {
        let err = parse_markup("<p><b>x</p>").unwrap_err();
        assert!(matches!(err, CellboxError::Markup { offset: 7, .. }), "{err}");

        let err = parse_markup("<div>open").unwrap_err();
        assert!(matches!(err, CellboxError::Markup { .. }));

        let err = parse_markup("text</p>").unwrap_err();
        assert!(matches!(err, CellboxError::Markup { offset: 4, .. }));

        assert!(parse_markup("<p <b>").is_err());
        assert!(parse_markup("<!-- open").is_err());
    }
}
