//! Border styles and width keywords.
//!
//! ## CSS Syntax
//!
//! ```css
//! h1 {
//!     border-bottom: thick solid #888;
//!     border-style: none none double none;
//! }
//! ```

use super::Scalar;

keyword_enum! {
    /// The CSS `border-style` keywords.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum BorderStyle {
        /// No border (default).
        #[default]
        None = "none",
        /// A blank border which wins every conflict with a neighbour.
        Hidden = "hidden",
        Dotted = "dotted",
        Dashed = "dashed",
        Solid = "solid",
        Double = "double",
        Groove = "groove",
        Ridge = "ridge",
        Inset = "inset",
        Outset = "outset",
    }
}

/// Resolves `thin`, `medium` and `thick` to a width in cells.
///
/// Borders are always drawn one cell wide; the width only selects how heavy
/// the line glyphs are.
pub fn border_width_keyword(keyword: &str) -> Option<Scalar> {
    match keyword {
        "thin" => Some(Scalar::cells(0.1)),
        "medium" => Some(Scalar::cells(0.15)),
        "thick" => Some(Scalar::cells(0.3)),
        _ => None,
    }
}
