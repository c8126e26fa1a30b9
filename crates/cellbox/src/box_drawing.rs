//! Glyph lookup for junctions of ranked line styles.
//!
//! A [`Junction`] describes which [`LineStyle`] leaves a character cell in
//! each compass direction. [`resolve_glyph`] maps it to a single character.
//!
//! ## Fallback
//!
//! When the exact combination has no glyph, the direction whose *parent*
//! has the highest rank is replaced by that parent and the table is probed
//! again. This repeats until a glyph is found or no direction has a parent
//! left, in which case a blank is returned. Parent chains are finite and
//! acyclic, so resolution always terminates.
//!
//! ## Example
//!
//! ```
//! use cellbox::box_drawing::{resolve_glyph, Junction};
//! use cellbox::LineStyle;
//!
//! let cross = Junction::uniform(LineStyle::Thin);
//! assert_eq!(resolve_glyph(cross), '┼');
//!
//! // No mixed thin/ascii glyph exists, so both fall back to ascii.
//! let mixed = Junction::new(LineStyle::Thin, LineStyle::Ascii, LineStyle::Thin, LineStyle::Ascii);
//! assert_eq!(resolve_glyph(mixed), '+');
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::line_style::LineStyle;

/// The line styles meeting at a single cell, as (north, east, south, west).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Junction {
    pub north: LineStyle,
    pub east: LineStyle,
    pub south: LineStyle,
    pub west: LineStyle,
}

impl Junction {
    pub const fn new(north: LineStyle, east: LineStyle, south: LineStyle, west: LineStyle) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// The same style in all four directions.
    pub const fn uniform(style: LineStyle) -> Self {
        Self::new(style, style, style, style)
    }

    fn as_array(self) -> [LineStyle; 4] {
        [self.north, self.east, self.south, self.west]
    }

    fn from_array(styles: [LineStyle; 4]) -> Self {
        Self::new(styles[0], styles[1], styles[2], styles[3])
    }

    /// Per-direction higher-ranked style of two junctions.
    ///
    /// On equal rank the direction from `self` is kept.
    pub fn combine(self, other: Junction) -> Junction {
        Junction::new(
            self.north.max_rank(other.north),
            self.east.max_rank(other.east),
            self.south.max_rank(other.south),
            self.west.max_rank(other.west),
        )
    }
}

/// Resolves a junction to its display character.
///
/// Never fails: unmatched combinations generalize through their parents
/// and finally yield a space.
pub fn resolve_glyph(junction: Junction) -> char {
    if let Some(&glyph) = GLYPHS.get(&junction) {
        return glyph;
    }

    let mut styles = junction.as_array();
    loop {
        // Highest-ranked parent wins; on a tie the later direction is chosen.
        let mut best: Option<(usize, (u16, u16))> = None;
        for (idx, style) in styles.iter().enumerate() {
            let Some(parent) = style.parent() else {
                continue;
            };
            let rank = if parent == LineStyle::NoLine {
                (9999, 0)
            } else {
                parent.rank()
            };
            if best.is_none_or(|(_, best_rank)| rank >= best_rank) {
                best = Some((idx, rank));
            }
        }

        let Some((idx, _)) = best else {
            return ' ';
        };
        if let Some(parent) = styles[idx].parent() {
            styles[idx] = parent;
        }
        if let Some(&glyph) = GLYPHS.get(&Junction::from_array(styles)) {
            return glyph;
        }
    }
}

/// Returns the glyph for an exact junction, without fallback.
pub fn exact_glyph(junction: Junction) -> Option<char> {
    GLYPHS.get(&junction).copied()
}

/// Lookup table for junction glyphs.
static GLYPHS: Lazy<HashMap<Junction, char>> = Lazy::new(|| {
    GLYPH_TABLE
        .iter()
        .map(|(styles, glyph)| (Junction::from_array(*styles), *glyph))
        .collect()
});

use LineStyle as L;

#[rustfmt::skip]
const GLYPH_TABLE: &[([LineStyle; 4], char)] = &[
    // blank
    ([L::NoLine, L::NoLine, L::NoLine, L::NoLine], ' '),
    // ascii
    ([L::Ascii, L::NoLine, L::Ascii, L::NoLine], '|'),
    ([L::NoLine, L::Ascii, L::NoLine, L::Ascii], '-'),
    ([L::Ascii, L::Ascii, L::NoLine, L::NoLine], '+'),
    ([L::NoLine, L::Ascii, L::Ascii, L::NoLine], '+'),
    ([L::NoLine, L::NoLine, L::Ascii, L::Ascii], '+'),
    ([L::Ascii, L::NoLine, L::NoLine, L::Ascii], '+'),
    ([L::Ascii, L::Ascii, L::Ascii, L::NoLine], '+'),
    ([L::NoLine, L::Ascii, L::Ascii, L::Ascii], '+'),
    ([L::Ascii, L::NoLine, L::Ascii, L::Ascii], '+'),
    ([L::Ascii, L::Ascii, L::NoLine, L::Ascii], '+'),
    ([L::Ascii, L::Ascii, L::Ascii, L::Ascii], '+'),
    // ascii thick
    ([L::NoLine, L::AsciiThick, L::NoLine, L::AsciiThick], '='),
    // thin
    ([L::Thin, L::NoLine, L::NoLine, L::NoLine], '╵'),
    ([L::NoLine, L::Thin, L::NoLine, L::NoLine], '╶'),
    ([L::NoLine, L::NoLine, L::Thin, L::NoLine], '╷'),
    ([L::NoLine, L::NoLine, L::NoLine, L::Thin], '╴'),
    ([L::Thin, L::NoLine, L::Thin, L::NoLine], '│'),
    ([L::NoLine, L::Thin, L::NoLine, L::Thin], '─'),
    ([L::Thin, L::Thin, L::NoLine, L::NoLine], '└'),
    ([L::NoLine, L::Thin, L::Thin, L::NoLine], '┌'),
    ([L::NoLine, L::NoLine, L::Thin, L::Thin], '┐'),
    ([L::Thin, L::NoLine, L::NoLine, L::Thin], '┘'),
    ([L::Thin, L::Thin, L::Thin, L::NoLine], '├'),
    ([L::NoLine, L::Thin, L::Thin, L::Thin], '┬'),
    ([L::Thin, L::NoLine, L::Thin, L::Thin], '┤'),
    ([L::Thin, L::Thin, L::NoLine, L::Thin], '┴'),
    ([L::Thin, L::Thin, L::Thin, L::Thin], '┼'),
    // rounded corners
    ([L::Rounded, L::Rounded, L::NoLine, L::NoLine], '╰'),
    ([L::NoLine, L::Rounded, L::Rounded, L::NoLine], '╭'),
    ([L::NoLine, L::NoLine, L::Rounded, L::Rounded], '╮'),
    ([L::Rounded, L::NoLine, L::NoLine, L::Rounded], '╯'),
    // thin dashes
    ([L::NoLine, L::ThinDoubleDashed, L::NoLine, L::ThinDoubleDashed], '╌'),
    ([L::ThinDoubleDashed, L::NoLine, L::ThinDoubleDashed, L::NoLine], '╎'),
    ([L::NoLine, L::ThinTripleDashed, L::NoLine, L::ThinTripleDashed], '┄'),
    ([L::ThinTripleDashed, L::NoLine, L::ThinTripleDashed, L::NoLine], '┆'),
    ([L::NoLine, L::ThinQuadDashed, L::NoLine, L::ThinQuadDashed], '┈'),
    ([L::ThinQuadDashed, L::NoLine, L::ThinQuadDashed, L::NoLine], '┊'),
    // double
    ([L::Double, L::NoLine, L::NoLine, L::NoLine], '║'),
    ([L::NoLine, L::Double, L::NoLine, L::NoLine], '═'),
    ([L::NoLine, L::NoLine, L::Double, L::NoLine], '║'),
    ([L::NoLine, L::NoLine, L::NoLine, L::Double], '═'),
    ([L::Double, L::NoLine, L::Double, L::NoLine], '║'),
    ([L::NoLine, L::Double, L::NoLine, L::Double], '═'),
    ([L::Double, L::Double, L::NoLine, L::NoLine], '╚'),
    ([L::NoLine, L::Double, L::Double, L::NoLine], '╔'),
    ([L::NoLine, L::NoLine, L::Double, L::Double], '╗'),
    ([L::Double, L::NoLine, L::NoLine, L::Double], '╝'),
    ([L::Double, L::Double, L::Double, L::NoLine], '╠'),
    ([L::NoLine, L::Double, L::Double, L::Double], '╦'),
    ([L::Double, L::NoLine, L::Double, L::Double], '╣'),
    ([L::Double, L::Double, L::NoLine, L::Double], '╩'),
    ([L::Double, L::Double, L::Double, L::Double], '╬'),
    // double meeting thin
    ([L::Thin, L::Double, L::Thin, L::Double], '╪'),
    ([L::Double, L::Thin, L::Double, L::Thin], '╫'),
    ([L::Double, L::Thin, L::NoLine, L::NoLine], '╙'),
    ([L::NoLine, L::Double, L::Thin, L::NoLine], '╒'),
    ([L::NoLine, L::NoLine, L::Double, L::Thin], '╖'),
    ([L::Thin, L::NoLine, L::NoLine, L::Double], '╛'),
    ([L::Double, L::NoLine, L::NoLine, L::Thin], '╜'),
    ([L::Thin, L::Double, L::NoLine, L::NoLine], '╘'),
    ([L::NoLine, L::Thin, L::Double, L::NoLine], '╓'),
    ([L::NoLine, L::NoLine, L::Thin, L::Double], '╕'),
    ([L::Thin, L::Double, L::Thin, L::NoLine], '╞'),
    ([L::NoLine, L::Thin, L::Double, L::Thin], '╥'),
    ([L::Thin, L::NoLine, L::Thin, L::Double], '╡'),
    ([L::Double, L::Thin, L::NoLine, L::Thin], '╨'),
    ([L::Double, L::Thin, L::Double, L::NoLine], '╟'),
    ([L::NoLine, L::Double, L::Thin, L::Double], '╤'),
    ([L::Double, L::NoLine, L::Double, L::Thin], '╢'),
    ([L::Thin, L::Double, L::NoLine, L::Double], '╧'),
    // thick
    ([L::Thick, L::Thick, L::Thick, L::Thick], '╋'),
    ([L::Thick, L::NoLine, L::NoLine, L::NoLine], '╹'),
    ([L::NoLine, L::Thick, L::NoLine, L::NoLine], '╺'),
    ([L::NoLine, L::NoLine, L::Thick, L::NoLine], '╻'),
    ([L::NoLine, L::NoLine, L::NoLine, L::Thick], '╸'),
    ([L::Thick, L::NoLine, L::Thick, L::NoLine], '┃'),
    ([L::NoLine, L::Thick, L::NoLine, L::Thick], '━'),
    ([L::Thick, L::Thick, L::NoLine, L::NoLine], '┗'),
    ([L::NoLine, L::Thick, L::Thick, L::NoLine], '┏'),
    ([L::NoLine, L::NoLine, L::Thick, L::Thick], '┓'),
    ([L::Thick, L::NoLine, L::NoLine, L::Thick], '┛'),
    ([L::Thick, L::Thick, L::Thick, L::NoLine], '┣'),
    ([L::NoLine, L::Thick, L::Thick, L::Thick], '┳'),
    ([L::Thick, L::NoLine, L::Thick, L::Thick], '┫'),
    ([L::Thick, L::Thick, L::NoLine, L::Thick], '┻'),
    // thick dashes
    ([L::NoLine, L::ThickDoubleDashed, L::NoLine, L::ThickDoubleDashed], '╍'),
    ([L::ThickDoubleDashed, L::NoLine, L::ThickDoubleDashed, L::NoLine], '╏'),
    ([L::NoLine, L::ThickTripleDashed, L::NoLine, L::ThickTripleDashed], '┅'),
    ([L::ThickTripleDashed, L::NoLine, L::ThickTripleDashed, L::NoLine], '┇'),
    ([L::NoLine, L::ThickQuadDashed, L::NoLine, L::ThickQuadDashed], '┉'),
    ([L::ThickQuadDashed, L::NoLine, L::ThickQuadDashed, L::NoLine], '┋'),
    // thick meeting thin
    ([L::NoLine, L::Thick, L::NoLine, L::Thin], '╼'),
    ([L::Thin, L::NoLine, L::Thick, L::NoLine], '╽'),
    ([L::NoLine, L::Thin, L::NoLine, L::Thick], '╾'),
    ([L::Thick, L::NoLine, L::Thin, L::NoLine], '╿'),
    ([L::Thick, L::Thin, L::NoLine, L::NoLine], '┖'),
    ([L::NoLine, L::Thick, L::Thin, L::NoLine], '┍'),
    ([L::NoLine, L::NoLine, L::Thick, L::Thin], '┒'),
    ([L::Thin, L::NoLine, L::NoLine, L::Thick], '┙'),
    ([L::Thick, L::NoLine, L::NoLine, L::Thin], '┚'),
    ([L::Thin, L::Thick, L::NoLine, L::NoLine], '┕'),
    ([L::NoLine, L::Thin, L::Thick, L::NoLine], '┎'),
    ([L::NoLine, L::NoLine, L::Thin, L::Thick], '┑'),
    ([L::Thick, L::Thin, L::Thin, L::NoLine], '┞'),
    ([L::NoLine, L::Thick, L::Thin, L::Thin], '┮'),
    ([L::Thin, L::NoLine, L::Thick, L::Thin], '┧'),
    ([L::Thin, L::Thin, L::NoLine, L::Thick], '┵'),
    ([L::Thick, L::NoLine, L::Thin, L::Thin], '┦'),
    ([L::Thin, L::Thick, L::NoLine, L::Thin], '┶'),
    ([L::Thin, L::Thin, L::Thick, L::NoLine], '┟'),
    ([L::NoLine, L::Thin, L::Thin, L::Thick], '┭'),
    ([L::Thick, L::Thin, L::NoLine, L::Thin], '┸'),
    ([L::Thin, L::Thick, L::Thin, L::NoLine], '┝'),
    ([L::NoLine, L::Thin, L::Thick, L::Thin], '┰'),
    ([L::Thin, L::NoLine, L::Thin, L::Thick], '┥'),
    ([L::Thick, L::Thick, L::Thin, L::NoLine], '┡'),
    ([L::NoLine, L::Thick, L::Thick, L::Thin], '┲'),
    ([L::Thin, L::NoLine, L::Thick, L::Thick], '┪'),
    ([L::Thick, L::Thin, L::NoLine, L::Thick], '┹'),
    ([L::Thick, L::Thick, L::NoLine, L::Thin], '┺'),
    ([L::Thin, L::Thick, L::Thick, L::NoLine], '┢'),
    ([L::NoLine, L::Thin, L::Thick, L::Thick], '┱'),
    ([L::Thick, L::NoLine, L::Thin, L::Thick], '┩'),
    ([L::Thick, L::Thin, L::Thick, L::NoLine], '┠'),
    ([L::NoLine, L::Thick, L::Thin, L::Thick], '┯'),
    ([L::Thick, L::NoLine, L::Thick, L::Thin], '┨'),
    ([L::Thin, L::Thick, L::NoLine, L::Thick], '┷'),
    ([L::Thick, L::Thin, L::Thin, L::Thin], '╀'),
    ([L::Thin, L::Thick, L::Thin, L::Thin], '┾'),
    ([L::Thin, L::Thin, L::Thick, L::Thin], '╁'),
    ([L::Thin, L::Thin, L::Thin, L::Thick], '┽'),
    ([L::Thick, L::Thick, L::Thin, L::Thin], '╄'),
    ([L::Thin, L::Thick, L::Thick, L::Thin], '╆'),
    ([L::Thin, L::Thin, L::Thick, L::Thick], '╅'),
    ([L::Thick, L::Thin, L::Thin, L::Thick], '╃'),
    ([L::Thin, L::Thick, L::Thin, L::Thick], '┿'),
    ([L::Thick, L::Thin, L::Thick, L::Thin], '╂'),
    ([L::Thick, L::Thick, L::Thick, L::Thin], '╊'),
    ([L::Thin, L::Thick, L::Thick, L::Thick], '╈'),
    ([L::Thick, L::Thin, L::Thick, L::Thick], '╉'),
    ([L::Thick, L::Thick, L::Thin, L::Thick], '╇'),
    // upper-right eighth blocks
    ([L::UpperRightEighth, L::NoLine, L::UpperRightEighth, L::NoLine], '▕'),
    ([L::NoLine, L::UpperRightEighth, L::NoLine, L::UpperRightEighth], '▔'),
    ([L::UpperRightEighth, L::UpperRightEighth, L::NoLine, L::NoLine], ' '),
    ([L::NoLine, L::UpperRightEighth, L::UpperRightEighth, L::NoLine], '▕'),
    ([L::NoLine, L::NoLine, L::UpperRightEighth, L::UpperRightEighth], '🭾'),
    ([L::UpperRightEighth, L::NoLine, L::NoLine, L::UpperRightEighth], '▔'),
    ([L::UpperRightEighth, L::UpperRightEighth, L::UpperRightEighth, L::NoLine], '▕'),
    ([L::NoLine, L::UpperRightEighth, L::UpperRightEighth, L::UpperRightEighth], '▔'),
    ([L::UpperRightEighth, L::NoLine, L::UpperRightEighth, L::UpperRightEighth], '▕'),
    ([L::UpperRightEighth, L::UpperRightEighth, L::NoLine, L::UpperRightEighth], '▔'),
    ([L::UpperRightEighth, L::UpperRightEighth, L::UpperRightEighth, L::UpperRightEighth], '▕'),
    // lower-left eighth blocks
    ([L::LowerLeftEighth, L::NoLine, L::LowerLeftEighth, L::NoLine], '▏'),
    ([L::NoLine, L::LowerLeftEighth, L::NoLine, L::LowerLeftEighth], '▁'),
    ([L::LowerLeftEighth, L::LowerLeftEighth, L::NoLine, L::NoLine], '🭼'),
    ([L::NoLine, L::LowerLeftEighth, L::LowerLeftEighth, L::NoLine], '▁'),
    ([L::NoLine, L::NoLine, L::LowerLeftEighth, L::LowerLeftEighth], ' '),
    ([L::LowerLeftEighth, L::NoLine, L::NoLine, L::LowerLeftEighth], '▏'),
    ([L::LowerLeftEighth, L::LowerLeftEighth, L::LowerLeftEighth, L::NoLine], '▏'),
    ([L::NoLine, L::LowerLeftEighth, L::LowerLeftEighth, L::LowerLeftEighth], '▁'),
    ([L::LowerLeftEighth, L::NoLine, L::LowerLeftEighth, L::LowerLeftEighth], '▏'),
    ([L::LowerLeftEighth, L::LowerLeftEighth, L::NoLine, L::LowerLeftEighth], '▁'),
    ([L::LowerLeftEighth, L::LowerLeftEighth, L::LowerLeftEighth, L::LowerLeftEighth], '▏'),
    // mixed eighths
    ([L::NoLine, L::LowerLeftEighth, L::UpperRightEighth, L::NoLine], ' '),
    ([L::LowerLeftEighth, L::NoLine, L::NoLine, L::UpperRightEighth], ' '),
    ([L::NoLine, L::UpperRightEighth, L::LowerLeftEighth, L::NoLine], '🭽'),
    ([L::UpperRightEighth, L::NoLine, L::NoLine, L::LowerLeftEighth], '🭿'),
    // eighths meeting thin
    ([L::LowerLeftEighth, L::Thin, L::LowerLeftEighth, L::NoLine], '▏'),
    ([L::NoLine, L::LowerLeftEighth, L::Thin, L::LowerLeftEighth], '▁'),
    ([L::LowerLeftEighth, L::NoLine, L::LowerLeftEighth, L::Thin], '▏'),
    ([L::Thin, L::LowerLeftEighth, L::NoLine, L::LowerLeftEighth], '▁'),
    ([L::UpperRightEighth, L::Thin, L::UpperRightEighth, L::NoLine], '▕'),
    ([L::NoLine, L::UpperRightEighth, L::Thin, L::UpperRightEighth], '▔'),
    ([L::UpperRightEighth, L::NoLine, L::UpperRightEighth, L::Thin], '▕'),
    ([L::Thin, L::UpperRightEighth, L::NoLine, L::UpperRightEighth], '▔'),
    ([L::NoLine, L::NoLine, L::UpperRightEighth, L::LowerLeftEighth], '▁'),
    ([L::LowerLeftEighth, L::UpperRightEighth, L::NoLine, L::NoLine], '▔'),
    // upper-right quarter blocks
    ([L::UpperRightQuarter, L::NoLine, L::UpperRightQuarter, L::NoLine], '🮇'),
    ([L::NoLine, L::UpperRightQuarter, L::NoLine, L::UpperRightQuarter], '🮂'),
    ([L::NoLine, L::UpperRightQuarter, L::UpperRightQuarter, L::NoLine], '🮇'),
    ([L::UpperRightQuarter, L::NoLine, L::NoLine, L::UpperRightQuarter], '🮂'),
    ([L::UpperRightQuarter, L::UpperRightQuarter, L::UpperRightQuarter, L::NoLine], '🮇'),
    ([L::UpperRightQuarter, L::UpperRightQuarter, L::NoLine, L::UpperRightQuarter], '🮂'),
    // quarter corners
    ([L::NoLine, L::LowerLeftEighth, L::UpperRightQuarter, L::NoLine], ' '),
    ([L::NoLine, L::NoLine, L::LowerLeftQuarter, L::LowerLeftEighth], ' '),
    ([L::LowerLeftQuarter, L::NoLine, L::NoLine, L::UpperRightEighth], ' '),
    ([L::UpperRightQuarter, L::UpperRightEighth, L::NoLine, L::NoLine], ' '),
    ([L::NoLine, L::NoLine, L::UpperRightQuarter, L::UpperRightEighth], '▁'),
    ([L::UpperRightQuarter, L::NoLine, L::NoLine, L::UpperRightEighth], '▔'),
    ([L::LowerLeftQuarter, L::UpperRightEighth, L::NoLine, L::NoLine], '▔'),
    ([L::NoLine, L::LowerLeftEighth, L::LowerLeftQuarter, L::NoLine], '▁'),
    // lower-left quarter blocks
    ([L::LowerLeftQuarter, L::NoLine, L::LowerLeftQuarter, L::NoLine], '▎'),
    ([L::NoLine, L::LowerLeftQuarter, L::NoLine, L::LowerLeftQuarter], '▂'),
    ([L::NoLine, L::LowerLeftQuarter, L::LowerLeftQuarter, L::NoLine], '▂'),
    ([L::LowerLeftQuarter, L::NoLine, L::NoLine, L::LowerLeftQuarter], '▎'),
    ([L::NoLine, L::LowerLeftQuarter, L::LowerLeftQuarter, L::LowerLeftQuarter], '▂'),
    ([L::LowerLeftQuarter, L::NoLine, L::LowerLeftQuarter, L::LowerLeftQuarter], '▎'),
    // halves meeting thin
    ([L::LowerLeftQuarter, L::Thin, L::LowerLeftQuarter, L::NoLine], '▎'),
    ([L::NoLine, L::LowerLeftQuarter, L::Thin, L::LowerLeftQuarter], '▂'),
    ([L::LowerLeftQuarter, L::NoLine, L::LowerLeftQuarter, L::Thin], '▎'),
    ([L::Thin, L::LowerLeftQuarter, L::NoLine, L::LowerLeftQuarter], '▂'),
    ([L::UpperRightQuarter, L::Thin, L::UpperRightQuarter, L::NoLine], '🮇'),
    ([L::NoLine, L::UpperRightQuarter, L::Thin, L::UpperRightQuarter], '🮂'),
    ([L::UpperRightQuarter, L::NoLine, L::UpperRightQuarter, L::Thin], '🮇'),
    ([L::Thin, L::UpperRightQuarter, L::NoLine, L::UpperRightQuarter], '🮂'),
    // upper-right half blocks
    ([L::UpperRightHalf, L::NoLine, L::UpperRightHalf, L::NoLine], '▐'),
    ([L::NoLine, L::UpperRightHalf, L::NoLine, L::UpperRightHalf], '▀'),
    ([L::UpperRightHalf, L::UpperRightHalf, L::NoLine, L::NoLine], '▝'),
    ([L::NoLine, L::UpperRightHalf, L::UpperRightHalf, L::NoLine], '▐'),
    ([L::UpperRightHalf, L::NoLine, L::NoLine, L::UpperRightHalf], '▀'),
    ([L::UpperRightHalf, L::UpperRightHalf, L::UpperRightHalf, L::NoLine], '▐'),
    ([L::NoLine, L::UpperRightHalf, L::UpperRightHalf, L::UpperRightHalf], '▜'),
    ([L::UpperRightHalf, L::NoLine, L::UpperRightHalf, L::UpperRightHalf], '▜'),
    ([L::UpperRightHalf, L::UpperRightHalf, L::NoLine, L::UpperRightHalf], '▀'),
    ([L::UpperRightHalf, L::UpperRightHalf, L::UpperRightHalf, L::UpperRightHalf], '▜'),
    // lower-left half blocks
    ([L::LowerLeftHalf, L::NoLine, L::LowerLeftHalf, L::NoLine], '▌'),
    ([L::NoLine, L::LowerLeftHalf, L::NoLine, L::LowerLeftHalf], '▄'),
    ([L::NoLine, L::LowerLeftHalf, L::LowerLeftHalf, L::NoLine], '▄'),
    ([L::NoLine, L::NoLine, L::LowerLeftHalf, L::LowerLeftHalf], '▖'),
    ([L::LowerLeftHalf, L::NoLine, L::NoLine, L::LowerLeftHalf], '▌'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::LowerLeftHalf, L::NoLine], '▙'),
    ([L::NoLine, L::LowerLeftHalf, L::LowerLeftHalf, L::LowerLeftHalf], '▄'),
    ([L::LowerLeftHalf, L::NoLine, L::LowerLeftHalf, L::LowerLeftHalf], '▌'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::NoLine, L::LowerLeftHalf], '▙'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::LowerLeftHalf, L::LowerLeftHalf], '▙'),
    // mixed halves
    ([L::LowerLeftHalf, L::NoLine, L::NoLine, L::UpperRightHalf], '▘'),
    ([L::NoLine, L::LowerLeftHalf, L::UpperRightHalf, L::NoLine], '▗'),
    // halves meeting thin
    ([L::LowerLeftHalf, L::Thin, L::LowerLeftHalf, L::NoLine], '▌'),
    ([L::NoLine, L::LowerLeftHalf, L::Thin, L::LowerLeftHalf], '▄'),
    ([L::LowerLeftHalf, L::NoLine, L::LowerLeftHalf, L::Thin], '▌'),
    ([L::Thin, L::LowerLeftHalf, L::NoLine, L::LowerLeftHalf], '▄'),
    ([L::UpperRightHalf, L::Thin, L::UpperRightHalf, L::NoLine], '▐'),
    ([L::NoLine, L::UpperRightHalf, L::Thin, L::UpperRightHalf], '▀'),
    ([L::UpperRightHalf, L::NoLine, L::UpperRightHalf, L::Thin], '▐'),
    ([L::Thin, L::UpperRightHalf, L::NoLine, L::UpperRightHalf], '▀'),
    ([L::UpperRightHalf, L::UpperRightHalf, L::LowerLeftHalf, L::LowerLeftHalf], '█'),
    ([L::LowerLeftHalf, L::UpperRightHalf, L::UpperRightHalf, L::LowerLeftHalf], '█'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::UpperRightHalf, L::UpperRightHalf], '█'),
    ([L::UpperRightHalf, L::LowerLeftHalf, L::LowerLeftHalf, L::UpperRightHalf], '█'),
    ([L::Thin, L::UpperRightHalf, L::LowerLeftHalf, L::Thin], '▛'),
    ([L::NoLine, L::UpperRightHalf, L::LowerLeftHalf, L::Thin], '▛'),
    ([L::Thin, L::UpperRightHalf, L::LowerLeftHalf, L::NoLine], '▛'),
    ([L::NoLine, L::UpperRightHalf, L::LowerLeftHalf, L::NoLine], '▛'),
    ([L::Thin, L::Thin, L::UpperRightHalf, L::UpperRightHalf], '▜'),
    ([L::NoLine, L::Thin, L::UpperRightHalf, L::UpperRightHalf], '▜'),
    ([L::Thin, L::NoLine, L::UpperRightHalf, L::UpperRightHalf], '▜'),
    ([L::NoLine, L::NoLine, L::UpperRightHalf, L::UpperRightHalf], '▜'),
    ([L::UpperRightHalf, L::Thin, L::Thin, L::LowerLeftHalf], '▟'),
    ([L::UpperRightHalf, L::NoLine, L::Thin, L::LowerLeftHalf], '▟'),
    ([L::UpperRightHalf, L::Thin, L::NoLine, L::LowerLeftHalf], '▟'),
    ([L::UpperRightHalf, L::NoLine, L::NoLine, L::LowerLeftHalf], '▟'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::Thin, L::Thin], '▙'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::NoLine, L::Thin], '▙'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::Thin, L::NoLine], '▙'),
    ([L::LowerLeftHalf, L::LowerLeftHalf, L::NoLine, L::NoLine], '▙'),
    // full blocks
    ([L::Full, L::NoLine, L::Full, L::NoLine], '█'),
    ([L::NoLine, L::Full, L::NoLine, L::Full], '█'),
    ([L::Full, L::Full, L::NoLine, L::NoLine], '█'),
    ([L::NoLine, L::Full, L::Full, L::NoLine], '█'),
    ([L::NoLine, L::NoLine, L::Full, L::Full], '█'),
    ([L::Full, L::NoLine, L::NoLine, L::Full], '█'),
    ([L::Full, L::Full, L::Full, L::NoLine], '█'),
    ([L::NoLine, L::Full, L::Full, L::Full], '█'),
    ([L::Full, L::NoLine, L::Full, L::Full], '█'),
    ([L::Full, L::Full, L::NoLine, L::Full], '█'),
    ([L::Full, L::Full, L::Full, L::Full], '█'),
    // full block end-stops
    ([L::Full, L::NoLine, L::NoLine, L::NoLine], '▀'),
    ([L::NoLine, L::Full, L::NoLine, L::NoLine], '▐'),
    ([L::NoLine, L::NoLine, L::Full, L::NoLine], '▄'),
    ([L::NoLine, L::NoLine, L::NoLine, L::Full], '▌'),
    // full blocks meeting halves
    ([L::Full, L::NoLine, L::NoLine, L::LowerLeftHalf], '█'),
    ([L::Full, L::LowerLeftHalf, L::NoLine, L::NoLine], '█'),
    ([L::NoLine, L::UpperRightHalf, L::Full, L::NoLine], '█'),
    ([L::NoLine, L::NoLine, L::Full, L::UpperRightHalf], '█'),
    ([L::Full, L::NoLine, L::NoLine, L::UpperRightHalf], '▀'),
    ([L::Full, L::UpperRightHalf, L::NoLine, L::NoLine], '▀'),
    ([L::NoLine, L::LowerLeftHalf, L::Full, L::NoLine], '▄'),
    ([L::NoLine, L::NoLine, L::Full, L::LowerLeftHalf], '▄'),
    ([L::NoLine, L::Full, L::LowerLeftHalf, L::NoLine], '█'),
    ([L::NoLine, L::NoLine, L::LowerLeftHalf, L::Full], '▌'),
    ([L::LowerLeftHalf, L::NoLine, L::NoLine, L::Full], '▌'),
    ([L::LowerLeftHalf, L::Full, L::NoLine, L::NoLine], '█'),
    ([L::Full, L::LowerLeftHalf, L::Full, L::NoLine], '█'),
    ([L::NoLine, L::LowerLeftHalf, L::Full, L::LowerLeftHalf], '▄'),
    ([L::Full, L::LowerLeftHalf, L::Full, L::LowerLeftHalf], '█'),
    ([L::Full, L::NoLine, L::Full, L::LowerLeftHalf], '█'),
    ([L::Full, L::UpperRightHalf, L::NoLine, L::UpperRightHalf], '▀'),
    ([L::Full, L::UpperRightHalf, L::Full, L::NoLine], '█'),
    ([L::Full, L::UpperRightHalf, L::Full, L::UpperRightHalf], '█'),
    ([L::NoLine, L::UpperRightHalf, L::Full, L::UpperRightHalf], '█'),
    ([L::UpperRightHalf, L::NoLine, L::UpperRightHalf, L::Full], '█'),
    ([L::Full, L::LowerLeftHalf, L::NoLine, L::LowerLeftHalf], '█'),
    ([L::LowerLeftHalf, L::Full, L::LowerLeftHalf, L::NoLine], '█'),
    ([L::NoLine, L::NoLine, L::UpperRightHalf, L::Full], '█'),
    ([L::UpperRightHalf, L::NoLine, L::NoLine, L::Full], '█'),
    ([L::NoLine, L::Full, L::LowerLeftHalf, L::Full], '█'),
    ([L::NoLine, L::Full, L::UpperRightHalf, L::Full], '█'),
    ([L::UpperRightHalf, L::Full, L::UpperRightHalf, L::Full], '█'),
    ([L::UpperRightHalf, L::Full, L::LowerLeftHalf, L::Full], '█'),
    ([L::LowerLeftHalf, L::Full, L::LowerLeftHalf, L::Full], '█'),
    ([L::LowerLeftHalf, L::Full, L::NoLine, L::Full], '█'),
    // full blocks meeting eighths
    ([L::NoLine, L::UpperRightEighth, L::Full, L::UpperRightEighth], '█'),
    ([L::UpperRightEighth, L::NoLine, L::UpperRightEighth, L::Full], '█'),
    ([L::Full, L::LowerLeftEighth, L::NoLine, L::LowerLeftEighth], '█'),
    ([L::LowerLeftEighth, L::Full, L::LowerLeftEighth, L::NoLine], '█'),
    // upper-right dotted halves
    ([L::UpperRightHalfDotted, L::NoLine, L::UpperRightHalfDotted, L::NoLine], '⢸'),
    ([L::NoLine, L::UpperRightHalfDotted, L::NoLine, L::UpperRightHalfDotted], '⠛'),
    ([L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::NoLine, L::NoLine], '▝'),
    ([L::NoLine, L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::NoLine], '⢸'),
    ([L::NoLine, L::NoLine, L::UpperRightHalfDotted, L::UpperRightHalfDotted], '▜'),
    ([L::UpperRightHalfDotted, L::NoLine, L::NoLine, L::UpperRightHalfDotted], '⠛'),
    ([L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::NoLine], '⢸'),
    ([L::NoLine, L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::UpperRightHalfDotted], '▜'),
    ([L::UpperRightHalfDotted, L::NoLine, L::UpperRightHalfDotted, L::UpperRightHalfDotted], '▜'),
    ([L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::NoLine, L::UpperRightHalfDotted], '⠛'),
    ([L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::UpperRightHalfDotted, L::UpperRightHalfDotted], '▜'),
    // lower-left dotted halves
    ([L::LowerLeftHalfDotted, L::NoLine, L::LowerLeftHalfDotted, L::NoLine], '⡇'),
    ([L::NoLine, L::LowerLeftHalfDotted, L::NoLine, L::LowerLeftHalfDotted], '⣤'),
    ([L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::NoLine, L::NoLine], '▙'),
    ([L::NoLine, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::NoLine], '⣤'),
    ([L::NoLine, L::NoLine, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted], '▖'),
    ([L::LowerLeftHalfDotted, L::NoLine, L::NoLine, L::LowerLeftHalfDotted], '⡇'),
    ([L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::NoLine], '▙'),
    ([L::NoLine, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted], '⣤'),
    ([L::LowerLeftHalfDotted, L::NoLine, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted], '⡇'),
    ([L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::NoLine, L::LowerLeftHalfDotted], '▙'),
    ([L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted, L::LowerLeftHalfDotted], '▙'),
    // mixed halves
    ([L::NoLine, L::UpperRightHalfDotted, L::LowerLeftHalfDotted, L::NoLine], '▛'),
    ([L::UpperRightHalfDotted, L::NoLine, L::NoLine, L::LowerLeftHalfDotted], '▟'),
    ([L::LowerLeftHalfDotted, L::NoLine, L::NoLine, L::UpperRightHalfDotted], '▘'),
    ([L::NoLine, L::LowerLeftHalfDotted, L::UpperRightHalfDotted, L::NoLine], '▗'),
    // full dotted blocks
    ([L::FullDotted, L::NoLine, L::FullDotted, L::NoLine], '⣿'),
    ([L::NoLine, L::FullDotted, L::NoLine, L::FullDotted], '⣿'),
    ([L::FullDotted, L::FullDotted, L::NoLine, L::NoLine], '⣿'),
    ([L::NoLine, L::FullDotted, L::FullDotted, L::NoLine], '⣿'),
    ([L::NoLine, L::NoLine, L::FullDotted, L::FullDotted], '⣿'),
    ([L::FullDotted, L::NoLine, L::NoLine, L::FullDotted], '⣿'),
    ([L::FullDotted, L::FullDotted, L::FullDotted, L::NoLine], '⣿'),
    ([L::NoLine, L::FullDotted, L::FullDotted, L::FullDotted], '⣿'),
    ([L::FullDotted, L::NoLine, L::FullDotted, L::FullDotted], '⣿'),
    ([L::FullDotted, L::FullDotted, L::NoLine, L::FullDotted], '⣿'),
    ([L::FullDotted, L::FullDotted, L::FullDotted, L::FullDotted], '⣿'),
    // full dotted end-stops
    ([L::FullDotted, L::NoLine, L::NoLine, L::NoLine], '⠛'),
    ([L::NoLine, L::FullDotted, L::NoLine, L::NoLine], '⢸'),
    ([L::NoLine, L::NoLine, L::FullDotted, L::NoLine], '⣤'),
    ([L::NoLine, L::NoLine, L::NoLine, L::FullDotted], '⡇'),
    // full blocks meeting halves
    ([L::FullDotted, L::NoLine, L::NoLine, L::LowerLeftHalfDotted], '⣿'),
    ([L::FullDotted, L::LowerLeftHalfDotted, L::NoLine, L::NoLine], '⣿'),
    ([L::NoLine, L::UpperRightHalfDotted, L::FullDotted, L::NoLine], '⣿'),
    ([L::NoLine, L::NoLine, L::FullDotted, L::UpperRightHalfDotted], '⣿'),
    ([L::FullDotted, L::NoLine, L::NoLine, L::UpperRightHalfDotted], '⠛'),
    ([L::FullDotted, L::UpperRightHalfDotted, L::NoLine, L::NoLine], '⠛'),
    ([L::NoLine, L::LowerLeftHalfDotted, L::FullDotted, L::NoLine], '⣤'),
    ([L::NoLine, L::NoLine, L::FullDotted, L::LowerLeftHalfDotted], '⣤'),
    ([L::NoLine, L::FullDotted, L::LowerLeftHalfDotted, L::NoLine], '⣿'),
    ([L::NoLine, L::NoLine, L::LowerLeftHalfDotted, L::FullDotted], '⡇'),
    ([L::LowerLeftHalfDotted, L::NoLine, L::NoLine, L::FullDotted], '⡇'),
    ([L::LowerLeftHalfDotted, L::FullDotted, L::NoLine, L::NoLine], '⣿'),
    ([L::FullDotted, L::LowerLeftHalfDotted, L::FullDotted, L::NoLine], '⣿'),
    ([L::NoLine, L::LowerLeftHalfDotted, L::FullDotted, L::LowerLeftHalfDotted], '⣤'),
    ([L::FullDotted, L::LowerLeftHalfDotted, L::FullDotted, L::LowerLeftHalfDotted], '⣿'),
    ([L::FullDotted, L::NoLine, L::FullDotted, L::LowerLeftHalfDotted], '⣿'),
    ([L::FullDotted, L::UpperRightHalfDotted, L::NoLine, L::UpperRightHalfDotted], '⠛'),
    ([L::FullDotted, L::UpperRightHalfDotted, L::FullDotted, L::NoLine], '⣿'),
    ([L::FullDotted, L::UpperRightHalfDotted, L::FullDotted, L::UpperRightHalfDotted], '⣿'),
    ([L::NoLine, L::UpperRightHalfDotted, L::FullDotted, L::UpperRightHalfDotted], '⣿'),
    ([L::UpperRightHalfDotted, L::NoLine, L::UpperRightHalfDotted, L::FullDotted], '⣿'),
    ([L::FullDotted, L::LowerLeftHalfDotted, L::NoLine, L::LowerLeftHalfDotted], '⣿'),
    ([L::LowerLeftHalfDotted, L::FullDotted, L::LowerLeftHalfDotted, L::NoLine], '⣿'),
    ([L::NoLine, L::NoLine, L::UpperRightHalfDotted, L::FullDotted], '⣿'),
    ([L::UpperRightHalfDotted, L::NoLine, L::NoLine, L::FullDotted], '⣿'),
    ([L::NoLine, L::FullDotted, L::LowerLeftHalfDotted, L::FullDotted], '⣿'),
    ([L::NoLine, L::FullDotted, L::UpperRightHalfDotted, L::FullDotted], '⣿'),
    ([L::UpperRightHalfDotted, L::FullDotted, L::UpperRightHalfDotted, L::FullDotted], '⣿'),
    ([L::UpperRightHalfDotted, L::FullDotted, L::LowerLeftHalfDotted, L::FullDotted], '⣿'),
    ([L::LowerLeftHalfDotted, L::FullDotted, L::LowerLeftHalfDotted, L::FullDotted], '⣿'),
    ([L::LowerLeftHalfDotted, L::FullDotted, L::NoLine, L::FullDotted], '⣿'),
];
