//! Typed values for every supported property.
//!
//! Keyword properties are plain enums generated by `keyword_enum!`, which
//! gives each type a `from_keyword` parser and a `keyword` accessor returning
//! the CSS spelling. The [`style`] module ties the types together into the
//! property schema and the [`ComputedStyle`] they fold into.

/// Declares a keyword enum together with its CSS spellings.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $keyword:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Parses the CSS keyword (ASCII case-insensitive).
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                let keyword = keyword.trim();
                $(
                    if keyword.eq_ignore_ascii_case($keyword) {
                        return Some($name::$variant);
                    }
                )+
                None
            }

            /// The CSS spelling of this value.
            pub fn keyword(self) -> &'static str {
                match self {
                    $($name::$variant => $keyword,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
}

pub mod border;
pub mod color;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod style;
pub mod text;

pub use border::{BorderStyle, border_width_keyword};
pub use color::RgbaColor;
pub use geometry::{Axis, LengthContext, Scalar, Spacing, Unit};
pub use grid::{GridAreas, GridPlacement, TrackList};
pub use layout::{
    AlignContent, BorderCollapse, BoxSizing, Display, FlexDirection, Float, Overflow, Position,
    Visibility,
};
pub use style::{ComputedStyle, Declaration, Property, PropertyValue};
pub use text::{
    FontStyle, FontWeight, ListStylePosition, ListStyleType, TextAlign, TextDecoration,
    TextTransform, VerticalAlign, WhiteSpace,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip_through_their_spelling() {
        for display in Display::ALL {
            assert_eq!(Display::from_keyword(display.keyword()), Some(*display));
        }
        assert_eq!(ListStyleType::from_keyword("Disclosure-Open"), Some(ListStyleType::DisclosureOpen));
        assert_eq!(Overflow::from_keyword("sideways"), None);
    }

    #[test]
    fn defaults_follow_initial_values() {
        assert_eq!(Display::default(), Display::Block);
        assert_eq!(TextAlign::default(), TextAlign::Left);
        assert_eq!(ListStylePosition::default(), ListStylePosition::Inside);
        assert_eq!(BorderStyle::default(), BorderStyle::None);
        assert_eq!(VerticalAlign::default().to_string(), "baseline");
    }
}
