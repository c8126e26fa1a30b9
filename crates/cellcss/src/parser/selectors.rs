use crate::parser::{
    AttrOp, Combinator, ComplexSelector, CompoundSelector, NthChild, PseudoClass, Selector,
    SelectorPart, units::parse_u16, values::parse_ident,
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till},
    character::complete::{char, multispace0},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
};

/// Parses a simple selector: Type, .Class, #ID, `*`, `[attr]`,
/// `:pseudo-class` or `::pseudo-element`.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        map(preceded(tag("::"), parse_ident), |s| {
            Selector::PseudoElement(s.to_ascii_lowercase())
        }),
        parse_pseudo_class,
        map(char('*'), |_| Selector::Universal),
        parse_attribute_selector,
        map(parse_ident, |s| Selector::Type(s.to_ascii_lowercase())),
    ))(input)
}

/// Parses `:name` pseudo-classes.
///
/// The legacy single-colon forms of `before`, `after` and `marker` are
/// pseudo-elements. Unsupported pseudo-classes fail to parse, which drops
/// the rule.
fn parse_pseudo_class(input: &str) -> IResult<&str, Selector> {
    let (rest, name) = preceded(char(':'), parse_ident)(input)?;
    let selector = match name.to_ascii_lowercase().as_str() {
        "before" | "after" | "marker" => Selector::PseudoElement(name.to_ascii_lowercase()),
        "first-child" => Selector::PseudoClass(PseudoClass::FirstChild),
        "last-child" => Selector::PseudoClass(PseudoClass::LastChild),
        "only-child" => Selector::PseudoClass(PseudoClass::OnlyChild),
        "link" | "any-link" => Selector::PseudoClass(PseudoClass::Link),
        "nth-child" => {
            let (rest, nth) = delimited(
                pair(char('('), multispace0),
                alt((
                    value(NthChild::Odd, tag_no_case("odd")),
                    value(NthChild::Even, tag_no_case("even")),
                    map(parse_u16, NthChild::Index),
                )),
                pair(multispace0, char(')')),
            )(rest)?;
            return Ok((rest, Selector::PseudoClass(PseudoClass::NthChild(nth))));
        }
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )));
        }
    };
    Ok((rest, selector))
}

/// Parses a compound selector (e.g., "li.item:first-child").
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    // No whitespace between simple selectors: `a.b` is one compound, `a .b` two.
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a complex selector with combinators (e.g., "ul > li a").
///
/// Sibling combinators are not supported; the parse stops in front of them
/// so the surrounding rule fails to match its opening brace and is skipped.
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, mut current_compound) = parse_compound_selector(input)?;
    let mut parts = Vec::new();

    loop {
        let (rem, ws) = multispace0(input)?;

        // An explicit child combinator
        if let Ok((after_op, _)) = char::<&str, nom::error::Error<&str>>('>')(rem) {
            let (after_ws, _) = multispace0(after_op)?;
            match parse_compound_selector(after_ws) {
                Ok((next_input, next_compound)) => {
                    parts.push(SelectorPart::new(current_compound, Combinator::Child));
                    current_compound = next_compound;
                    input = next_input;
                    continue;
                }
                Err(_) => break,
            }
        }

        // Otherwise whitespace is a descendant combinator
        if !ws.is_empty() {
            match parse_compound_selector(rem) {
                Ok((next_input, next_compound)) => {
                    parts.push(SelectorPart::new(current_compound, Combinator::Descendant));
                    current_compound = next_compound;
                    input = next_input;
                    continue;
                }
                Err(_) => break,
            }
        }

        break;
    }

    // The last part always has Combinator::None
    parts.push(SelectorPart::new(current_compound, Combinator::None));
    Ok((input, ComplexSelector::new(parts)))
}

fn parse_attr_op(input: &str) -> IResult<&str, AttrOp> {
    alt((
        value(AttrOp::Equals, tag("=")),
        value(AttrOp::Contains, tag("*=")),
        value(AttrOp::Prefix, tag("^=")),
        value(AttrOp::Suffix, tag("$=")),
        value(AttrOp::Includes, tag("~=")),
        value(AttrOp::DashMatch, tag("|=")),
    ))(input)
}

fn parse_attr_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
        parse_ident,
    ))(input)
}

fn parse_attribute_selector(input: &str) -> IResult<&str, Selector> {
    let (input, (_, _, name, _, test, _, _)) = tuple((
        char('['),
        multispace0,
        parse_ident,
        multispace0,
        opt(pair(parse_attr_op, preceded(multispace0, parse_attr_value))),
        multispace0,
        char(']'),
    ))(input)?;

    let (op, value) = test.unwrap_or((AttrOp::Exists, ""));
    Ok((
        input,
        Selector::Attribute {
            name: name.to_ascii_lowercase(),
            op,
            value: value.to_string(),
        },
    ))
}
