//! Ranked line styles used to draw borders and grids.
//!
//! Every [`LineStyle`] carries a two-part rank `(weight, fanciness)` and an
//! optional parent. The rank decides which style wins where two borders
//! meet; the parent is the style the glyph resolver falls back to when no
//! glyph exists for an exact combination.
//!
//! ```text
//!  NoLine ── Invisible
//!  Ascii ─┬─ AsciiThick
//!         └─ Thin ─┬─ Rounded, *Dashed, *Eighth
//!                  └─ Thick ─┬─ Double, *Dashed, *Quarter, Full, FullDotted
//!                            └─ *Half ── *HalfDotted
//! ```

/// A named, ranked style of line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    /// No line (`border-style: none`). Lowest priority.
    #[default]
    NoLine,
    /// A blank line which takes precedence over every other style
    /// (`border-style: hidden`).
    Invisible,
    Ascii,
    AsciiThick,
    Thin,
    Rounded,
    ThinQuadDashed,
    ThinTripleDashed,
    ThinDoubleDashed,
    UpperRightEighth,
    LowerLeftEighth,
    Thick,
    Double,
    ThickQuadDashed,
    ThickTripleDashed,
    ThickDoubleDashed,
    UpperRightQuarter,
    LowerLeftQuarter,
    UpperRightHalf,
    LowerLeftHalf,
    UpperRightHalfDotted,
    LowerLeftHalfDotted,
    Full,
    FullDotted,
}

impl LineStyle {
    /// Every known line style, in declaration order.
    pub const ALL: [LineStyle; 24] = [
        LineStyle::NoLine,
        LineStyle::Invisible,
        LineStyle::Ascii,
        LineStyle::AsciiThick,
        LineStyle::Thin,
        LineStyle::Rounded,
        LineStyle::ThinQuadDashed,
        LineStyle::ThinTripleDashed,
        LineStyle::ThinDoubleDashed,
        LineStyle::UpperRightEighth,
        LineStyle::LowerLeftEighth,
        LineStyle::Thick,
        LineStyle::Double,
        LineStyle::ThickQuadDashed,
        LineStyle::ThickTripleDashed,
        LineStyle::ThickDoubleDashed,
        LineStyle::UpperRightQuarter,
        LineStyle::LowerLeftQuarter,
        LineStyle::UpperRightHalf,
        LineStyle::LowerLeftHalf,
        LineStyle::UpperRightHalfDotted,
        LineStyle::LowerLeftHalfDotted,
        LineStyle::Full,
        LineStyle::FullDotted,
    ];

    /// The `(weight, fanciness)` rank of this style.
    pub const fn rank(self) -> (u16, u16) {
        match self {
            LineStyle::NoLine => (0, 0),
            LineStyle::Invisible => (9999, 9999),
            LineStyle::Ascii => (1, 0),
            LineStyle::ThinQuadDashed => (1, 1),
            LineStyle::ThinTripleDashed => (1, 2),
            LineStyle::ThinDoubleDashed => (1, 3),
            LineStyle::Thin => (1, 4),
            LineStyle::Rounded => (1, 5),
            LineStyle::UpperRightEighth | LineStyle::LowerLeftEighth => (2, 1),
            LineStyle::AsciiThick => (3, 0),
            LineStyle::ThickQuadDashed => (3, 1),
            LineStyle::ThickTripleDashed => (3, 2),
            LineStyle::ThickDoubleDashed => (3, 3),
            LineStyle::Thick => (3, 4),
            LineStyle::Double => (3, 5),
            LineStyle::UpperRightQuarter | LineStyle::LowerLeftQuarter => (4, 2),
            LineStyle::UpperRightHalfDotted => (5, 1),
            LineStyle::UpperRightHalf | LineStyle::LowerLeftHalf => (5, 2),
            LineStyle::LowerLeftHalfDotted => (5, 2),
            LineStyle::FullDotted => (6, 1),
            LineStyle::Full => (6, 2),
        }
    }

    /// The style this one generalizes to when no glyph matches.
    pub const fn parent(self) -> Option<LineStyle> {
        match self {
            LineStyle::NoLine | LineStyle::Ascii => None,
            LineStyle::Invisible => Some(LineStyle::NoLine),
            LineStyle::Thin | LineStyle::AsciiThick => Some(LineStyle::Ascii),
            LineStyle::Rounded
            | LineStyle::ThinQuadDashed
            | LineStyle::ThinTripleDashed
            | LineStyle::ThinDoubleDashed
            | LineStyle::UpperRightEighth
            | LineStyle::LowerLeftEighth
            | LineStyle::Thick => Some(LineStyle::Thin),
            LineStyle::Double
            | LineStyle::ThickQuadDashed
            | LineStyle::ThickTripleDashed
            | LineStyle::ThickDoubleDashed
            | LineStyle::UpperRightQuarter
            | LineStyle::LowerLeftQuarter
            | LineStyle::UpperRightHalf
            | LineStyle::LowerLeftHalf
            | LineStyle::Full
            | LineStyle::FullDotted => Some(LineStyle::Thick),
            LineStyle::UpperRightHalfDotted => Some(LineStyle::UpperRightHalf),
            LineStyle::LowerLeftHalfDotted => Some(LineStyle::LowerLeftHalf),
        }
    }

    /// Whether the style draws anything at all.
    pub const fn is_visible(self) -> bool {
        !matches!(self, LineStyle::NoLine | LineStyle::Invisible)
    }

    /// Returns whichever of `self` and `other` has the higher rank.
    ///
    /// On equal rank `self` is kept, so combining is stable with respect to
    /// operand order.
    pub fn max_rank(self, other: LineStyle) -> LineStyle {
        if other.rank() > self.rank() { other } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_chains_terminate() {
        for style in LineStyle::ALL {
            let mut current = style;
            let mut steps = 0;
            while let Some(parent) = current.parent() {
                current = parent;
                steps += 1;
                assert!(steps < LineStyle::ALL.len(), "cycle from {style:?}");
            }
        }
    }

    #[test]
    fn test_parent_rank_never_exceeds_child() {
        for style in LineStyle::ALL {
            if let Some(parent) = style.parent() {
                if style != LineStyle::Invisible {
                    assert!(parent.rank() <= style.rank(), "{style:?} -> {parent:?}");
                }
            }
        }
    }

    #[test]
    fn test_max_rank_prefers_heavier() {
        assert_eq!(LineStyle::Thin.max_rank(LineStyle::Double), LineStyle::Double);
        assert_eq!(LineStyle::Double.max_rank(LineStyle::Thin), LineStyle::Double);
        assert_eq!(
            LineStyle::NoLine.max_rank(LineStyle::Invisible),
            LineStyle::Invisible
        );
    }

    #[test]
    fn test_max_rank_tie_keeps_first() {
        assert_eq!(
            LineStyle::UpperRightEighth.max_rank(LineStyle::LowerLeftEighth),
            LineStyle::UpperRightEighth
        );
        assert_eq!(
            LineStyle::LowerLeftEighth.max_rank(LineStyle::UpperRightEighth),
            LineStyle::LowerLeftEighth
        );
    }

    #[test]
    fn test_visibility() {
        assert!(!LineStyle::NoLine.is_visible());
        assert!(!LineStyle::Invisible.is_visible());
        assert!(LineStyle::Ascii.is_visible());
    }
}
