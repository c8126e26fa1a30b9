use crate::parser::values::split_tokens;
use crate::types::geometry::{Scalar, Spacing, Unit};
use crate::types::grid::TrackList;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize},
    sequence::{pair, preceded, terminated, tuple},
};

/// Parse a floating point or integer number (`1`, `-2.5`, `.5`, `+3.`).
pub fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse the unit suffix (e.g., %, vw, rem, px).
fn parse_unit_suffix(input: &str) -> IResult<&str, Unit> {
    alt((
        map(tag_no_case("vw"), |_| Unit::ViewWidth),
        map(tag_no_case("vh"), |_| Unit::ViewHeight),
        map(tag_no_case("fr"), |_| Unit::Fraction),
        map(tag_no_case("px"), |_| Unit::Px),
        map(tag_no_case("rem"), |_| Unit::Rem),
        map(tag_no_case("em"), |_| Unit::Em),
        map(tag_no_case("ch"), |_| Unit::Ch),
        map(char('%'), |_| Unit::Percent),
    ))(input)
}

/// Parse a single Scalar value (e.g., "10", "50%", "2em", "auto").
pub fn parse_scalar(input: &str) -> IResult<&str, Scalar> {
    let input = input.trim_start();

    let keyword: IResult<&str, Scalar> = alt((
        map(tag_no_case("auto"), |_| Scalar::AUTO),
        map(tag_no_case("fit-content"), |_| Scalar::AUTO),
        map(tag_no_case("min-content"), |_| Scalar::new(0.0, Unit::MinContent)),
        map(tag_no_case("max-content"), |_| Scalar::new(0.0, Unit::MaxContent)),
    ))(input);
    if keyword.is_ok() {
        return keyword;
    }

    let (input, value) = parse_number(input)?;
    let (input, unit) = opt(parse_unit_suffix)(input)?;

    Ok((
        input,
        Scalar {
            value,
            unit: unit.unwrap_or(Unit::Cells),
        },
    ))
}

/// Parses a complete value as one scalar.
pub fn scalar(value: &str) -> Option<Scalar> {
    all_consuming(terminated(parse_scalar, multispace0))(value.trim())
        .ok()
        .map(|(_, scalar)| scalar)
}

/// Parse CSS-style spacing (margin/padding).
/// Supports 1 value (all), 2 values (v, h), 3 values (t, h, b) or 4 values
/// (t, r, b, l).
pub fn parse_spacing(input: &str) -> IResult<&str, Spacing> {
    let (input, first) = parse_scalar(input)?;
    let (input, second) = opt(preceded(multispace0, parse_scalar))(input)?;

    match second {
        None => Ok((input, Spacing::all(first))),
        Some(h) => {
            let (input, third) = opt(preceded(multispace0, parse_scalar))(input)?;
            let (input, fourth) = opt(preceded(multispace0, parse_scalar))(input)?;

            match (third, fourth) {
                (Some(b), Some(l)) => Ok((
                    input,
                    Spacing {
                        top: first,
                        right: h,
                        bottom: b,
                        left: l,
                    },
                )),
                (Some(b), None) => Ok((
                    input,
                    Spacing {
                        top: first,
                        right: h,
                        bottom: b,
                        left: h,
                    },
                )),
                _ => Ok((input, Spacing::vertical_horizontal(first, h))),
            }
        }
    }
}

/// Parses a complete `margin`/`padding` value.
pub fn spacing(value: &str) -> Option<Spacing> {
    all_consuming(terminated(parse_spacing, multispace0))(value.trim())
        .ok()
        .map(|(_, spacing)| spacing)
}

/// Parses `repeat(<count>, <tracks>)`, returning the count and the tracks.
fn parse_repeat(input: &str) -> IResult<&str, (usize, &str)> {
    let (input, _) = tuple((tag_no_case("repeat"), multispace0, char('(')))(input)?;
    let (input, count) = preceded(multispace0, map_res(digit1, str::parse::<usize>))(input)?;
    let (input, _) = tuple((multispace0, char(','), multispace0))(input)?;
    let inner = input.strip_suffix(')').unwrap_or(input);
    Ok(("", (count, inner)))
}

/// Parses a `grid-template-columns` track list.
///
/// `repeat()` is expanded in place. Tracks this engine cannot size
/// (`minmax()`, named lines, `auto-fill` repeats) become `auto`, which the
/// grid layout treats as a single fraction.
///
/// ```
/// use cellcss::parser::units::track_list;
/// use cellcss::types::{Scalar, Unit};
///
/// let tracks = track_list("10 repeat(2, 1fr)").unwrap();
/// assert_eq!(tracks.0, vec![
///     Scalar::cells(10.0),
///     Scalar::new(1.0, Unit::Fraction),
///     Scalar::new(1.0, Unit::Fraction),
/// ]);
/// ```
pub fn track_list(value: &str) -> Option<TrackList> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Some(TrackList::default());
    }
    let mut tracks = Vec::new();
    for token in split_tokens(value) {
        if let Ok((_, (count, inner))) = parse_repeat(token) {
            let repeated = track_list(inner)?;
            for _ in 0..count {
                tracks.extend(repeated.0.iter().copied());
            }
        } else if token.starts_with('[') {
            // Named grid lines.
            continue;
        } else {
            tracks.push(scalar(token).unwrap_or(Scalar::AUTO));
        }
    }
    (!tracks.is_empty()).then_some(TrackList(tracks))
}

/// Parses a non-negative integer such as a `span` count or list `start`.
pub fn parse_u16(input: &str) -> IResult<&str, u16> {
    map_res(preceded(multispace0, digit1), str::parse::<u16>)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("12"), Ok(("", 12.0)));
        assert_eq!(parse_number("-0.5em"), Ok(("em", -0.5)));
        assert_eq!(parse_number(".25"), Ok(("", 0.25)));
        assert!(parse_number("abc").is_err());
    }

    #[test]
    fn scalars_with_units() {
        assert_eq!(scalar("2rem"), Some(Scalar::new(2.0, Unit::Rem)));
        assert_eq!(scalar("1.5em"), Some(Scalar::em(1.5)));
        assert_eq!(scalar("100%"), Some(Scalar::percent(100.0)));
        assert_eq!(scalar("20px"), Some(Scalar::px(20.0)));
        assert_eq!(scalar("AUTO"), Some(Scalar::AUTO));
        assert_eq!(scalar("min-content").map(|s| s.unit), Some(Unit::MinContent));
        assert_eq!(scalar("3 4"), None);
        assert_eq!(scalar("10pt"), None);
    }

    #[test]
    fn spacing_forms() {
        let s = spacing("1 2 3").unwrap();
        assert_eq!(s.top, Scalar::cells(1.0));
        assert_eq!(s.left, Scalar::cells(2.0));
        assert_eq!(s.bottom, Scalar::cells(3.0));
        let s = spacing("1em auto").unwrap();
        assert_eq!(s.top, Scalar::em(1.0));
        assert!(s.right.is_auto());
        assert_eq!(spacing("1 2 3 4 5"), None);
    }

    #[test]
    fn track_lists() {
        let tracks = track_list("min-content minmax(10px, 1fr) 2fr").unwrap();
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks.0[0].unit, Unit::MinContent);
        assert!(tracks.0[1].is_auto());
        assert_eq!(tracks.0[2], Scalar::new(2.0, Unit::Fraction));
        assert_eq!(track_list("repeat(3, 1fr 2)").unwrap().len(), 6);
    }
}
