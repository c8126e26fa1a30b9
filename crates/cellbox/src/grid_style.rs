//! Grid styles: resolved glyphs for every structural position of a grid.
//!
//! A grid is described by sixteen [`GridPart`]s:
//!
//! ```text
//!             ╭┈┈┈┈┈┈┈┈LEFT
//!             ┊ ╭┈┈┈┈┈┈MID
//!             ┊ ┊ ╭┈┈┈┈SPLIT
//!             ┊ ┊ ┊ ╭┈┈RIGHT
//!             ∨ ∨ ∨ v
//!       TOP┈> ┏ ━ ┳ ┓
//!       MID┈> ┃   ┃ ┃
//!     SPLIT┈> ┣ ━ ╋ ┫
//!    BOTTOM┈> ┗ ━ ┻ ┛
//! ```
//!
//! A [`Mask`] selects, per part, which directions carry a line. Building a
//! [`GridStyle`] from a [`LineStyle`] and a mask puts that style in every
//! flagged direction; two grid styles combine per direction by rank.
//!
//! ```
//! use cellbox::grid_style::{GridStyle, Mask};
//! use cellbox::LineStyle;
//!
//! let grid = GridStyle::build(LineStyle::Thin, Mask::GRID);
//! assert_eq!(grid.top().left, '┌');
//! assert_eq!(grid.split().split, '┼');
//! ```

use std::ops::{Add, BitOr};

use bitflags::bitflags;

use crate::box_drawing::{Junction, resolve_glyph};
use crate::line_style::LineStyle;

/// One of the sixteen positions of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridPart {
    TopLeft = 0,
    TopMid = 1,
    TopSplit = 2,
    TopRight = 3,
    MidLeft = 4,
    MidMid = 5,
    MidSplit = 6,
    MidRight = 7,
    SplitLeft = 8,
    SplitMid = 9,
    SplitSplit = 10,
    SplitRight = 11,
    BottomLeft = 12,
    BottomMid = 13,
    BottomSplit = 14,
    BottomRight = 15,
}

impl GridPart {
    pub const ALL: [GridPart; 16] = [
        GridPart::TopLeft,
        GridPart::TopMid,
        GridPart::TopSplit,
        GridPart::TopRight,
        GridPart::MidLeft,
        GridPart::MidMid,
        GridPart::MidSplit,
        GridPart::MidRight,
        GridPart::SplitLeft,
        GridPart::SplitMid,
        GridPart::SplitSplit,
        GridPart::SplitRight,
        GridPart::BottomLeft,
        GridPart::BottomMid,
        GridPart::BottomSplit,
        GridPart::BottomRight,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// Directions in which a line leaves a grid position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Directions: u8 {
        const NORTH = 0b0001;
        const EAST  = 0b0010;
        const SOUTH = 0b0100;
        const WEST  = 0b1000;
    }
}

const N: Directions = Directions::NORTH;
const E: Directions = Directions::EAST;
const S: Directions = Directions::SOUTH;
const W: Directions = Directions::WEST;
const NONE: Directions = Directions::empty();

/// A selection of directions for each grid part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask([Directions; 16]);

impl Mask {
    pub const EMPTY: Mask = Mask([NONE; 16]);

    #[rustfmt::skip]
    pub const TOP_EDGE: Mask = Mask([
        E, E.union(W), E.union(W), W,
        NONE, NONE, NONE, NONE,
        NONE, NONE, NONE, NONE,
        NONE, NONE, NONE, NONE,
    ]);

    #[rustfmt::skip]
    pub const MIDDLE_EDGE: Mask = Mask([
        NONE, NONE, NONE, NONE,
        NONE, NONE, NONE, NONE,
        E, E.union(W), E.union(W), W,
        NONE, NONE, NONE, NONE,
    ]);

    #[rustfmt::skip]
    pub const BOTTOM_EDGE: Mask = Mask([
        NONE, NONE, NONE, NONE,
        NONE, NONE, NONE, NONE,
        NONE, NONE, NONE, NONE,
        E, E.union(W), E.union(W), W,
    ]);

    #[rustfmt::skip]
    pub const LEFT_EDGE: Mask = Mask([
        S, NONE, NONE, NONE,
        N.union(S), NONE, NONE, NONE,
        N.union(S), NONE, NONE, NONE,
        N, NONE, NONE, NONE,
    ]);

    #[rustfmt::skip]
    pub const CENTER_EDGE: Mask = Mask([
        NONE, NONE, S, NONE,
        NONE, NONE, N.union(S), NONE,
        NONE, NONE, N.union(S), NONE,
        NONE, NONE, N, NONE,
    ]);

    #[rustfmt::skip]
    pub const RIGHT_EDGE: Mask = Mask([
        NONE, NONE, NONE, S,
        NONE, NONE, NONE, N.union(S),
        NONE, NONE, NONE, N.union(S),
        NONE, NONE, NONE, N,
    ]);

    #[rustfmt::skip]
    pub const CORNERS: Mask = Mask([
        E.union(S), NONE, NONE, S.union(W),
        NONE, NONE, NONE, NONE,
        NONE, NONE, NONE, NONE,
        N.union(E), NONE, NONE, N.union(W),
    ]);

    pub const INNER: Mask = Mask::CENTER_EDGE.union(Mask::MIDDLE_EDGE);
    pub const OUTER: Mask = Mask::TOP_EDGE
        .union(Mask::RIGHT_EDGE)
        .union(Mask::BOTTOM_EDGE)
        .union(Mask::LEFT_EDGE);
    pub const GRID: Mask = Mask::INNER.union(Mask::OUTER);

    /// Per-part union of two masks.
    pub const fn union(self, other: Mask) -> Mask {
        let mut parts = self.0;
        let mut i = 0;
        while i < 16 {
            parts[i] = parts[i].union(other.0[i]);
            i += 1;
        }
        Mask(parts)
    }

    pub fn directions(&self, part: GridPart) -> Directions {
        self.0[part.index()]
    }
}

impl BitOr for Mask {
    type Output = Mask;

    fn bitor(self, rhs: Mask) -> Mask {
        self.union(rhs)
    }
}

/// One row of glyphs from a grid style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRow {
    pub left: char,
    pub mid: char,
    pub split: char,
    pub right: char,
}

/// Resolved glyphs for every [`GridPart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridStyle {
    junctions: [Junction; 16],
    glyphs: [char; 16],
}

impl Default for GridStyle {
    fn default() -> Self {
        Self::from_junctions([Junction::default(); 16])
    }
}

impl GridStyle {
    /// Puts `line` in every direction `mask` selects, `NoLine` elsewhere.
    pub fn build(line: LineStyle, mask: Mask) -> Self {
        let pick = |flags: Directions, dir: Directions| {
            if flags.contains(dir) { line } else { LineStyle::NoLine }
        };
        let mut junctions = [Junction::default(); 16];
        for part in GridPart::ALL {
            let flags = mask.directions(part);
            junctions[part.index()] = Junction::new(
                pick(flags, N),
                pick(flags, E),
                pick(flags, S),
                pick(flags, W),
            );
        }
        Self::from_junctions(junctions)
    }

    fn from_junctions(junctions: [Junction; 16]) -> Self {
        let glyphs = junctions.map(resolve_glyph);
        Self { junctions, glyphs }
    }

    /// Takes the higher-ranked style in every direction of every part.
    pub fn combine(&self, other: &GridStyle) -> GridStyle {
        let mut junctions = self.junctions;
        for (mine, theirs) in junctions.iter_mut().zip(other.junctions.iter()) {
            *mine = mine.combine(*theirs);
        }
        Self::from_junctions(junctions)
    }

    pub fn glyph(&self, part: GridPart) -> char {
        self.glyphs[part.index()]
    }

    pub fn junction(&self, part: GridPart) -> Junction {
        self.junctions[part.index()]
    }

    fn row(&self, first: GridPart) -> GridRow {
        let i = first.index();
        GridRow {
            left: self.glyphs[i],
            mid: self.glyphs[i + 1],
            split: self.glyphs[i + 2],
            right: self.glyphs[i + 3],
        }
    }

    pub fn top(&self) -> GridRow {
        self.row(GridPart::TopLeft)
    }

    pub fn mid(&self) -> GridRow {
        self.row(GridPart::MidLeft)
    }

    pub fn split(&self) -> GridRow {
        self.row(GridPart::SplitLeft)
    }

    pub fn bottom(&self) -> GridRow {
        self.row(GridPart::BottomLeft)
    }

    /// The glyph used for horizontal rules.
    pub fn horizontal(&self) -> char {
        self.glyph(GridPart::SplitMid)
    }

    /// The glyph used for vertical rules.
    pub fn vertical(&self) -> char {
        self.glyph(GridPart::MidSplit)
    }
}

impl Add for GridStyle {
    type Output = GridStyle;

    fn add(self, rhs: GridStyle) -> GridStyle {
        self.combine(&rhs)
    }
}

impl std::fmt::Display for GridStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.glyphs.chunks(4).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for glyph in row {
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}

impl LineStyle {
    /// Shorthand for [`GridStyle::build`].
    pub fn grid(self, mask: Mask) -> GridStyle {
        GridStyle::build(self, mask)
    }
}

/// A thin grid with every edge drawn.
pub fn thin_grid() -> GridStyle {
    LineStyle::Thin.grid(Mask::GRID)
}

/// Sunken box: eighth/quarter blocks outside, thin lines inside.
pub fn inset_grid() -> GridStyle {
    LineStyle::UpperRightQuarter.grid(Mask::LEFT_EDGE)
        + LineStyle::LowerLeftQuarter.grid(Mask::RIGHT_EDGE)
        + LineStyle::UpperRightEighth.grid(Mask::BOTTOM_EDGE)
        + LineStyle::LowerLeftEighth.grid(Mask::TOP_EDGE)
        + LineStyle::Thin.grid(Mask::INNER)
}

/// Raised box: the mirror image of [`inset_grid`].
pub fn outset_grid() -> GridStyle {
    LineStyle::LowerLeftEighth.grid(Mask::TOP_EDGE)
        + LineStyle::UpperRightQuarter.grid(Mask::RIGHT_EDGE)
        + LineStyle::UpperRightEighth.grid(Mask::BOTTOM_EDGE)
        + LineStyle::LowerLeftQuarter.grid(Mask::LEFT_EDGE)
        + LineStyle::Thin.grid(Mask::INNER)
}

/// Half blocks hugging the outside of the content.
pub fn outer_half_grid() -> GridStyle {
    LineStyle::UpperRightHalf.grid(Mask::TOP_EDGE)
        + LineStyle::UpperRightHalf.grid(Mask::RIGHT_EDGE)
        + LineStyle::LowerLeftHalf.grid(Mask::LEFT_EDGE)
        + LineStyle::LowerLeftHalf.grid(Mask::BOTTOM_EDGE)
        + LineStyle::Thin.grid(Mask::INNER)
}

/// Half blocks hugging the inside of the content.
pub fn inner_half_grid() -> GridStyle {
    LineStyle::LowerLeftHalf.grid(Mask::TOP_EDGE)
        + LineStyle::LowerLeftHalf.grid(Mask::RIGHT_EDGE)
        + LineStyle::UpperRightHalf.grid(Mask::LEFT_EDGE)
        + LineStyle::UpperRightHalf.grid(Mask::BOTTOM_EDGE)
        + LineStyle::Thin.grid(Mask::INNER)
}
