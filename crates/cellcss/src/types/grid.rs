//! Grid layout types.
//!
//! ## CSS Syntax
//!
//! ```css
//! .container {
//!     display: grid;
//!     grid-template-columns: 10 repeat(2, 1fr) min-content;
//!     grid-template-areas: "head head" "side main";
//!     gap: 1;
//! }
//!
//! .child {
//!     grid-area: main;
//!     grid-column: 2 / span 2;
//! }
//! ```

use super::Scalar;

/// Column track sizes, with `repeat()` already expanded.
///
/// Each track is a [`Scalar`]: `fr` values share the free space,
/// `min-content` sizes to the narrowest content, and other intrinsic sizes
/// count as one fraction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackList(pub Vec<Scalar>);

impl TrackList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scalar> {
        self.0.get(index)
    }
}

/// Named grid areas, one row of names per quoted string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridAreas(pub Vec<Vec<String>>);

impl GridAreas {
    /// Parses the quoted rows of `grid-template-areas`.
    ///
    /// ```
    /// use cellcss::types::GridAreas;
    ///
    /// let areas = GridAreas::parse(r#""a a" 'b c'"#);
    /// assert_eq!(areas.0, vec![vec!["a", "a"], vec!["b", "c"]]);
    /// ```
    pub fn parse(value: &str) -> Self {
        let mut rows = Vec::new();
        let mut rest = value;
        while let Some(start) = rest.find(['"', '\'']) {
            let quote = rest[start..].chars().next().unwrap_or('"');
            let body = &rest[start + 1..];
            let Some(end) = body.find(quote) else { break };
            let row: Vec<String> = body[..end].split_whitespace().map(str::to_string).collect();
            if !row.is_empty() {
                rows.push(row);
            }
            rest = &body[end + 1..];
        }
        Self(rows)
    }

    pub fn rows(&self) -> usize {
        self.0.len()
    }

    pub fn columns(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.0.get(row)?.get(col).map(String::as_str)
    }
}

/// One end of a `grid-column` placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPlacement {
    #[default]
    Auto,
    /// A 1-based line number.
    Line(i32),
    Span(u16),
}

impl GridPlacement {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value == "auto" {
            return Some(GridPlacement::Auto);
        }
        if let Some(span) = value.strip_prefix("span") {
            return span.trim().parse().ok().map(GridPlacement::Span);
        }
        value.parse().ok().map(GridPlacement::Line)
    }
}
