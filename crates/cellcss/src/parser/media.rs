//! `@media` conditions.
//!
//! Conditions guard rule sets and are evaluated against the terminal
//! viewport, measured in cells. Supported syntax:
//!
//! - media types: `all` and `screen` always match, `print` and other types
//!   never do; `only` is ignored
//! - `not`, `and`, and `,`/`or` for alternatives
//! - features: `width`, `height` and `aspect-ratio`, with `min-`/`max-`
//!   prefixes or the range forms `(width >= 80)` and `(40 < width)`
//!
//! Unknown features match, so a rule written for a capability the terminal
//! cannot report stays active.

use crate::error::{CssError, Result};
use crate::parser::units::scalar;
use crate::parser::values::split_top_level;
use crate::types::{Axis, LengthContext, Scalar};

/// The viewport a condition is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaContext {
    /// Viewport width in cells.
    pub width: f64,
    /// Viewport height in cells.
    pub height: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for MediaContext {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 24.0,
            cell_width_px: 10.0,
            cell_height_px: 20.0,
        }
    }
}

impl MediaContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn length_context(&self) -> LengthContext {
        LengthContext {
            available: None,
            viewport_width: self.width,
            viewport_height: self.height,
            cell_width_px: self.cell_width_px,
            cell_height_px: self.cell_height_px,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFeatureName {
    Width,
    Height,
    AspectRatio,
    /// A feature this engine cannot evaluate.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
}

impl Comparison {
    fn holds(self, actual: f64, expected: f64) -> bool {
        match self {
            Comparison::Less => actual < expected,
            Comparison::LessOrEqual => actual <= expected,
            Comparison::Equal => (actual - expected).abs() < f64::EPSILON,
            Comparison::GreaterOrEqual => actual >= expected,
            Comparison::Greater => actual > expected,
        }
    }

    /// The comparison with its operands swapped (`80 < width` is `width > 80`).
    fn flipped(self) -> Self {
        match self {
            Comparison::Less => Comparison::Greater,
            Comparison::LessOrEqual => Comparison::GreaterOrEqual,
            Comparison::Equal => Comparison::Equal,
            Comparison::GreaterOrEqual => Comparison::LessOrEqual,
            Comparison::Greater => Comparison::Less,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaValue {
    Length(Scalar),
    Ratio(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaFeature {
    pub name: MediaFeatureName,
    pub comparison: Comparison,
    pub value: MediaValue,
}

impl MediaFeature {
    fn evaluate(&self, ctx: &MediaContext) -> bool {
        let lengths = ctx.length_context();
        let (actual, expected) = match (self.name, self.value) {
            (MediaFeatureName::Other, _) => return true,
            (MediaFeatureName::Width, MediaValue::Length(v)) => {
                (ctx.width, v.to_cells(Axis::Horizontal, &lengths))
            }
            (MediaFeatureName::Height, MediaValue::Length(v)) => {
                (ctx.height, v.to_cells(Axis::Vertical, &lengths))
            }
            (MediaFeatureName::AspectRatio, MediaValue::Ratio(r)) => {
                let pixels_wide = ctx.width * ctx.cell_width_px;
                let pixels_high = ctx.height * ctx.cell_height_px;
                if pixels_high <= 0.0 {
                    return false;
                }
                (pixels_wide / pixels_high, Some(r))
            }
            _ => return false,
        };
        expected.is_some_and(|expected| self.comparison.holds(actual, expected))
    }
}

/// A parsed media condition.
///
/// ```
/// use cellcss::parser::media::{MediaContext, MediaQuery};
///
/// let query = MediaQuery::parse("screen and (min-width: 60)").unwrap();
/// assert!(query.evaluate(&MediaContext::new(80.0, 24.0)));
/// assert!(!query.evaluate(&MediaContext::new(40.0, 24.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MediaQuery {
    All,
    Never,
    Not(Box<MediaQuery>),
    And(Vec<MediaQuery>),
    Or(Vec<MediaQuery>),
    Feature(MediaFeature),
}

impl MediaQuery {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(syntax(input));
        }

        let alternatives = split_words(input, ",", "or");
        if alternatives.len() > 1 {
            return alternatives
                .into_iter()
                .map(MediaQuery::parse)
                .collect::<Result<Vec<_>>>()
                .map(MediaQuery::Or);
        }

        let lower = input.to_ascii_lowercase();
        if let Some(rest) = strip_word(&lower, "not") {
            let offset = input.len() - rest.len();
            return Ok(MediaQuery::Not(Box::new(MediaQuery::parse(&input[offset..])?)));
        }
        if let Some(rest) = strip_word(&lower, "only") {
            let offset = input.len() - rest.len();
            return MediaQuery::parse(&input[offset..]);
        }

        let terms = split_words(input, "", "and");
        if terms.len() > 1 {
            return terms
                .into_iter()
                .map(MediaQuery::parse)
                .collect::<Result<Vec<_>>>()
                .map(MediaQuery::And);
        }

        if let Some(inner) = input.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            let inner = inner.trim();
            if inner.starts_with('(') || strip_word(&inner.to_ascii_lowercase(), "not").is_some() {
                return MediaQuery::parse(inner);
            }
            return parse_feature(inner).map(MediaQuery::Feature);
        }

        match lower.as_str() {
            "all" | "screen" => Ok(MediaQuery::All),
            _ if lower.chars().all(|c| c.is_alphanumeric() || c == '-') => Ok(MediaQuery::Never),
            _ => Err(syntax(input)),
        }
    }

    pub fn evaluate(&self, ctx: &MediaContext) -> bool {
        match self {
            MediaQuery::All => true,
            MediaQuery::Never => false,
            MediaQuery::Not(inner) => !inner.evaluate(ctx),
            MediaQuery::And(terms) => terms.iter().all(|t| t.evaluate(ctx)),
            MediaQuery::Or(terms) => terms.iter().any(|t| t.evaluate(ctx)),
            MediaQuery::Feature(feature) => feature.evaluate(ctx),
        }
    }

    /// Both conditions must hold; used for nested `@media` blocks.
    pub fn and(self, other: MediaQuery) -> MediaQuery {
        match self {
            MediaQuery::All => other,
            MediaQuery::And(mut terms) => {
                terms.push(other);
                MediaQuery::And(terms)
            }
            this => MediaQuery::And(vec![this, other]),
        }
    }
}

fn syntax(input: &str) -> CssError {
    CssError::InvalidSyntax(format!("invalid media condition `{input}`"))
}

/// Strips a leading keyword followed by whitespace or `(`.
fn strip_word<'a>(input: &'a str, word: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(word)?;
    (rest.starts_with(char::is_whitespace) || rest.starts_with('(')).then_some(rest)
}

/// Splits on a top-level separator character and on a keyword surrounded by
/// whitespace.
fn split_words<'a>(input: &'a str, separator: &str, word: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    for piece in split_top_level(input, |c| separator.contains(c)) {
        let lower = piece.to_ascii_lowercase();
        let mut start = 0;
        let mut depth = 0usize;
        let bytes = lower.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b if depth == 0 && b.is_ascii_whitespace() => {
                    let after = &lower[i + 1..];
                    if after.starts_with(word)
                        && after[word.len()..].starts_with(|c: char| c.is_whitespace() || c == '(')
                    {
                        parts.push(piece[start..i].trim());
                        start = i + 1 + word.len();
                        i = start;
                        continue;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        parts.push(piece[start..].trim());
    }
    parts.retain(|p| !p.is_empty());
    parts
}

fn parse_feature(inner: &str) -> Result<MediaFeature> {
    if let Some((name, value)) = inner.split_once(':') {
        let name = name.trim().to_ascii_lowercase();
        let (comparison, name) = if let Some(n) = name.strip_prefix("min-") {
            (Comparison::GreaterOrEqual, n)
        } else if let Some(n) = name.strip_prefix("max-") {
            (Comparison::LessOrEqual, n)
        } else {
            (Comparison::Equal, name.as_str())
        };
        return feature(name, comparison, value, inner);
    }

    for (op, comparison) in [
        (">=", Comparison::GreaterOrEqual),
        ("<=", Comparison::LessOrEqual),
        (">", Comparison::Greater),
        ("<", Comparison::Less),
        ("=", Comparison::Equal),
    ] {
        if let Some((left, right)) = inner.split_once(op) {
            let left = left.trim().to_ascii_lowercase();
            if left.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return feature(&left, comparison, right, inner);
            }
            return feature(&right.trim().to_ascii_lowercase(), comparison.flipped(), &left, inner);
        }
    }

    // A bare feature name such as `(color)` tests for support.
    Ok(MediaFeature {
        name: MediaFeatureName::Other,
        comparison: Comparison::Equal,
        value: MediaValue::Ratio(0.0),
    })
}

fn feature(name: &str, comparison: Comparison, value: &str, source: &str) -> Result<MediaFeature> {
    let value = value.trim();
    let (name, value) = match name.strip_prefix("device-").unwrap_or(name) {
        "width" => (MediaFeatureName::Width, scalar(value).map(MediaValue::Length)),
        "height" => (MediaFeatureName::Height, scalar(value).map(MediaValue::Length)),
        "aspect-ratio" => (MediaFeatureName::AspectRatio, parse_ratio(value).map(MediaValue::Ratio)),
        _ => (MediaFeatureName::Other, Some(MediaValue::Ratio(0.0))),
    };
    let value = value.ok_or_else(|| syntax(source))?;
    Ok(MediaFeature {
        name,
        comparison,
        value,
    })
}

fn parse_ratio(value: &str) -> Option<f64> {
    match value.split_once('/') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().ok()?;
            let h: f64 = h.trim().parse().ok()?;
            (h != 0.0).then_some(w / h)
        }
        None => value.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(query: &str, width: f64, height: f64) -> bool {
        MediaQuery::parse(query)
            .unwrap()
            .evaluate(&MediaContext::new(width, height))
    }

    #[test]
    fn media_types() {
        assert!(matches("all", 80.0, 24.0));
        assert!(matches("only screen", 80.0, 24.0));
        assert!(!matches("print", 80.0, 24.0));
        assert!(matches("print, screen", 80.0, 24.0));
        assert!(matches("not print", 80.0, 24.0));
    }

    #[test]
    fn width_features() {
        assert!(matches("(max-width: 100)", 80.0, 24.0));
        assert!(!matches("(min-width: 100)", 80.0, 24.0));
        assert!(matches("(width >= 80)", 80.0, 24.0));
        assert!(!matches("(width < 80)", 80.0, 24.0));
        assert!(matches("(60 < width)", 80.0, 24.0));
        // 600px is 60 cells of 10px
        assert!(!matches("(max-width: 600px)", 80.0, 24.0));
        assert!(matches("(max-width: 600px)", 50.0, 24.0));
    }

    #[test]
    fn combined_conditions() {
        assert!(matches("screen and (min-width: 40) and (max-height: 30)", 80.0, 24.0));
        assert!(!matches("screen and (min-width: 40) and (max-height: 20)", 80.0, 24.0));
        assert!(matches("(min-width: 100) or (min-height: 10)", 80.0, 24.0));
        assert!(matches("not (min-width: 100)", 80.0, 24.0));
    }

    #[test]
    fn aspect_ratio_uses_pixels() {
        // 80x24 cells of 10x20px is 800x480px
        assert!(matches("(min-aspect-ratio: 16/10)", 80.0, 24.0));
        assert!(!matches("(min-aspect-ratio: 2/1)", 80.0, 24.0));
    }

    #[test]
    fn unknown_features_match() {
        assert!(matches("(prefers-color-scheme: dark)", 80.0, 24.0));
        assert!(matches("(color)", 80.0, 24.0));
    }

    #[test]
    fn invalid_conditions() {
        assert!(MediaQuery::parse("").is_err());
        assert!(MediaQuery::parse("(min-width: wide)").is_err());
    }
}
