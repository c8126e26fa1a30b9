//! The property schema.
//!
//! Every supported longhand property is declared once in the `properties!`
//! table below. From that table the macro derives:
//!
//! - [`Property`]: the property names, with their inheritance flag
//! - [`Declaration`]: one typed variant per property, plus the `unset`,
//!   `inherit`, custom-property and unknown forms
//! - [`ComputedStyle`]: a sparse record with one `Option` per property and a
//!   string overlay for `--custom` properties
//!
//! Shorthands (`margin`, `border`, `list-style`, ...) are expanded into these
//! longhands by the parser and never reach the schema.

use std::collections::BTreeMap;

use super::{
    AlignContent, BorderCollapse, BorderStyle, BoxSizing, Display, FlexDirection, Float,
    FontStyle, FontWeight, GridAreas, GridPlacement, ListStylePosition, ListStyleType, Overflow,
    Position, RgbaColor, Scalar, TextAlign, TextDecoration, TextTransform, TrackList,
    VerticalAlign, Visibility, WhiteSpace, border_width_keyword,
};
use crate::parser::units;

/// A value type that can be parsed from the text of a declaration.
pub trait PropertyValue: Sized + Clone {
    /// Returns `None` when the text is not a valid value of this type.
    fn parse_value(value: &str) -> Option<Self>;
}

macro_rules! keyword_values {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn parse_value(value: &str) -> Option<Self> {
                    <$ty>::from_keyword(value)
                }
            }
        )+
    };
}

keyword_values!(
    AlignContent,
    BorderCollapse,
    BorderStyle,
    BoxSizing,
    Display,
    FlexDirection,
    Float,
    FontStyle,
    ListStylePosition,
    ListStyleType,
    Overflow,
    Position,
    TextAlign,
    TextTransform,
    VerticalAlign,
    Visibility,
    WhiteSpace,
);

impl PropertyValue for FontWeight {
    fn parse_value(value: &str) -> Option<Self> {
        FontWeight::from_keyword(value)
            .or_else(|| value.trim().parse::<f64>().ok().map(FontWeight::from_number))
    }
}

impl PropertyValue for TextDecoration {
    fn parse_value(value: &str) -> Option<Self> {
        TextDecoration::from_keywords(value)
    }
}

impl PropertyValue for Scalar {
    fn parse_value(value: &str) -> Option<Self> {
        let value = value.trim();
        border_width_keyword(value).or_else(|| units::scalar(value))
    }
}

impl PropertyValue for RgbaColor {
    fn parse_value(value: &str) -> Option<Self> {
        RgbaColor::parse(value).ok()
    }
}

impl PropertyValue for i32 {
    fn parse_value(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl PropertyValue for f64 {
    fn parse_value(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
            None => value.parse().ok(),
        }
    }
}

impl PropertyValue for String {
    fn parse_value(value: &str) -> Option<Self> {
        let value = value.trim();
        let unquoted = ['"', '\'']
            .iter()
            .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)));
        Some(unquoted.unwrap_or(value).to_string())
    }
}

impl PropertyValue for TrackList {
    fn parse_value(value: &str) -> Option<Self> {
        units::track_list(value)
    }
}

impl PropertyValue for GridAreas {
    fn parse_value(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("none") {
            return Some(GridAreas::default());
        }
        let areas = GridAreas::parse(value);
        (!areas.0.is_empty()).then_some(areas)
    }
}

impl PropertyValue for GridPlacement {
    fn parse_value(value: &str) -> Option<Self> {
        GridPlacement::parse(value)
    }
}

macro_rules! is_inherited {
    () => {
        false
    };
    (inherited) => {
        true
    };
}

macro_rules! properties {
    ($(
        $(#[$meta:meta])*
        $variant:ident($field:ident: $ty:ty) = $name:literal $(, $inherited:ident)?;
    )+) => {
        /// A longhand property name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Property {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl Property {
            pub const ALL: &'static [Property] = &[$(Property::$variant),+];

            /// The CSS spelling of the property.
            pub fn name(self) -> &'static str {
                match self {
                    $(Property::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Property::$variant),)+
                    _ => None,
                }
            }

            /// Whether children take this property from their parent when
            /// they do not declare it themselves.
            pub fn is_inherited(self) -> bool {
                match self {
                    $(Property::$variant => is_inherited!($($inherited)?),)+
                }
            }

            /// Parses a value for this property into a declaration.
            pub fn parse(self, value: &str) -> Option<Declaration> {
                match self {
                    $(Property::$variant => {
                        <$ty as PropertyValue>::parse_value(value).map(Declaration::$variant)
                    })+
                }
            }
        }

        impl std::fmt::Display for Property {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        /// A single parsed `property: value` pair.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Declaration {
            $($variant($ty),)+
            /// `unset`: forget any earlier value, including an inherited one.
            Unset(Property),
            /// `inherit`: take the parent's value.
            Inherit(Property),
            /// A `--custom` property and its raw value.
            Custom(String, String),
            /// A property this engine does not know.
            Unknown(String),
        }

        impl Declaration {
            /// The property this declaration sets, if it is a known one.
            pub fn property(&self) -> Option<Property> {
                match self {
                    $(Declaration::$variant(_) => Some(Property::$variant),)+
                    Declaration::Unset(property) | Declaration::Inherit(property) => Some(*property),
                    Declaration::Custom(..) | Declaration::Unknown(_) => None,
                }
            }
        }

        /// The folded result of a run of declarations.
        ///
        /// A field is `None` until some declaration sets it; consumers
        /// substitute the initial value when reading.
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct ComputedStyle {
            $(pub $field: Option<$ty>,)+
            /// Custom properties, keyed by their full `--name`.
            pub custom: BTreeMap<String, String>,
        }

        impl ComputedStyle {
            /// Applies one declaration. `parent` resolves `inherit`.
            pub fn apply(&mut self, declaration: &Declaration, parent: Option<&ComputedStyle>) {
                match declaration {
                    $(Declaration::$variant(value) => self.$field = Some(value.clone()),)+
                    Declaration::Unset(property) => self.clear(*property),
                    Declaration::Inherit(property) => match parent {
                        Some(parent) => self.copy_property(*property, parent),
                        None => self.clear(*property),
                    },
                    Declaration::Custom(name, value) => {
                        self.custom.insert(name.clone(), value.clone());
                    }
                    Declaration::Unknown(_) => {}
                }
            }

            pub fn clear(&mut self, property: Property) {
                match property {
                    $(Property::$variant => self.$field = None,)+
                }
            }

            /// Copies one property (set or not) from another style.
            pub fn copy_property(&mut self, property: Property, from: &ComputedStyle) {
                match property {
                    $(Property::$variant => self.$field = from.$field.clone(),)+
                }
            }

            pub fn is_set(&self, property: Property) -> bool {
                match property {
                    $(Property::$variant => self.$field.is_some(),)+
                }
            }

            /// The current value of a property as a declaration.
            pub fn declaration(&self, property: Property) -> Option<Declaration> {
                match property {
                    $(Property::$variant => self.$field.clone().map(Declaration::$variant),)+
                }
            }
        }
    };
}

properties! {
    Display(display: Display) = "display";
    Float(float: Float) = "float";
    Position(position: Position) = "position";
    Top(top: Scalar) = "top";
    Right(right: Scalar) = "right";
    Bottom(bottom: Scalar) = "bottom";
    Left(left: Scalar) = "left";
    ZIndex(z_index: i32) = "z-index";
    Visibility(visibility: Visibility) = "visibility", inherited;
    Opacity(opacity: f64) = "opacity";
    Order(order: i32) = "order";
    OverflowX(overflow_x: Overflow) = "overflow-x";
    OverflowY(overflow_y: Overflow) = "overflow-y";
    BoxSizing(box_sizing: BoxSizing) = "box-sizing";

    Width(width: Scalar) = "width";
    Height(height: Scalar) = "height";
    MinWidth(min_width: Scalar) = "min-width";
    MaxWidth(max_width: Scalar) = "max-width";
    MinHeight(min_height: Scalar) = "min-height";
    MaxHeight(max_height: Scalar) = "max-height";

    MarginTop(margin_top: Scalar) = "margin-top";
    MarginRight(margin_right: Scalar) = "margin-right";
    MarginBottom(margin_bottom: Scalar) = "margin-bottom";
    MarginLeft(margin_left: Scalar) = "margin-left";
    PaddingTop(padding_top: Scalar) = "padding-top";
    PaddingRight(padding_right: Scalar) = "padding-right";
    PaddingBottom(padding_bottom: Scalar) = "padding-bottom";
    PaddingLeft(padding_left: Scalar) = "padding-left";

    BorderTopStyle(border_top_style: BorderStyle) = "border-top-style";
    BorderRightStyle(border_right_style: BorderStyle) = "border-right-style";
    BorderBottomStyle(border_bottom_style: BorderStyle) = "border-bottom-style";
    BorderLeftStyle(border_left_style: BorderStyle) = "border-left-style";
    BorderTopWidth(border_top_width: Scalar) = "border-top-width";
    BorderRightWidth(border_right_width: Scalar) = "border-right-width";
    BorderBottomWidth(border_bottom_width: Scalar) = "border-bottom-width";
    BorderLeftWidth(border_left_width: Scalar) = "border-left-width";
    BorderTopColor(border_top_color: RgbaColor) = "border-top-color";
    BorderRightColor(border_right_color: RgbaColor) = "border-right-color";
    BorderBottomColor(border_bottom_color: RgbaColor) = "border-bottom-color";
    BorderLeftColor(border_left_color: RgbaColor) = "border-left-color";
    BorderCollapse(border_collapse: BorderCollapse) = "border-collapse";
    BorderRadius(border_radius: Scalar) = "border-radius";

    Color(color: RgbaColor) = "color", inherited;
    BackgroundColor(background_color: RgbaColor) = "background-color";
    FontWeight(font_weight: FontWeight) = "font-weight", inherited;
    FontStyle(font_style: FontStyle) = "font-style", inherited;
    FontSize(font_size: Scalar) = "font-size", inherited;
    TextDecoration(text_decoration: TextDecoration) = "text-decoration", inherited;
    TextTransform(text_transform: TextTransform) = "text-transform", inherited;
    TextAlign(text_align: TextAlign) = "text-align", inherited;
    VerticalAlign(vertical_align: VerticalAlign) = "vertical-align", inherited;
    WhiteSpace(white_space: WhiteSpace) = "white-space", inherited;
    ListStyleType(list_style_type: ListStyleType) = "list-style-type", inherited;
    ListStylePosition(list_style_position: ListStylePosition) = "list-style-position", inherited;

    FlexDirection(flex_direction: FlexDirection) = "flex-direction";
    AlignContent(align_content: AlignContent) = "align-content";
    RowGap(row_gap: Scalar) = "row-gap";
    ColumnGap(column_gap: Scalar) = "column-gap";
    GridTemplateColumns(grid_template_columns: TrackList) = "grid-template-columns";
    GridTemplateAreas(grid_template_areas: GridAreas) = "grid-template-areas";
    GridArea(grid_area: String) = "grid-area";
    GridColumnStart(grid_column_start: GridPlacement) = "grid-column-start";
    GridColumnEnd(grid_column_end: GridPlacement) = "grid-column-end";

    /// Generated content of `::before`, `::after` and `::marker` boxes.
    Content(content: String) = "content";
}

impl Property {
    /// Properties that shape the box itself rather than its text.
    ///
    /// Text runs inside inline elements take every other property from
    /// their inline ancestor.
    pub fn is_box_geometry(self) -> bool {
        matches!(
            self,
            Property::Display
                | Property::Float
                | Property::Position
                | Property::Top
                | Property::Right
                | Property::Bottom
                | Property::Left
                | Property::ZIndex
                | Property::Order
                | Property::OverflowX
                | Property::OverflowY
                | Property::BoxSizing
                | Property::Width
                | Property::Height
                | Property::MinWidth
                | Property::MaxWidth
                | Property::MinHeight
                | Property::MaxHeight
                | Property::MarginTop
                | Property::MarginRight
                | Property::MarginBottom
                | Property::MarginLeft
                | Property::PaddingTop
                | Property::PaddingRight
                | Property::PaddingBottom
                | Property::PaddingLeft
                | Property::BorderTopStyle
                | Property::BorderRightStyle
                | Property::BorderBottomStyle
                | Property::BorderLeftStyle
                | Property::BorderTopWidth
                | Property::BorderRightWidth
                | Property::BorderBottomWidth
                | Property::BorderLeftWidth
                | Property::BorderTopColor
                | Property::BorderRightColor
                | Property::BorderBottomColor
                | Property::BorderLeftColor
                | Property::BorderRadius
                | Property::Content
        )
    }
}

impl ComputedStyle {
    /// Overlays every property `other` sets onto `self`.
    pub fn merge(&mut self, other: &ComputedStyle) {
        for property in Property::ALL {
            if other.is_set(*property) {
                self.copy_property(*property, other);
            }
        }
        self.custom
            .extend(other.custom.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Takes the heritable properties `self` does not set from `parent`.
    ///
    /// `allow` can veto individual properties, which is how an element
    /// blocks inheritance with an `unset` declaration.
    pub fn inherit_from(&mut self, parent: &ComputedStyle, allow: impl Fn(Property) -> bool) {
        for property in Property::ALL.iter().copied() {
            if property.is_inherited() && !self.is_set(property) && allow(property) {
                self.copy_property(property, parent);
            }
        }
    }

    /// Takes every property `self` does not set from `parent`, except the
    /// box geometry.
    pub fn inherit_text_style_from(&mut self, parent: &ComputedStyle) {
        for property in Property::ALL.iter().copied() {
            if !property.is_box_geometry() && !self.is_set(property) {
                self.copy_property(property, parent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_names_round_trip() {
        for property in Property::ALL {
            assert_eq!(Property::from_name(property.name()), Some(*property));
        }
        assert_eq!(Property::from_name("colour"), None);
    }

    #[test]
    fn heritable_properties() {
        assert!(Property::Color.is_inherited());
        assert!(Property::ListStyleType.is_inherited());
        assert!(!Property::BackgroundColor.is_inherited());
        assert!(!Property::MarginTop.is_inherited());
    }

    #[test]
    fn parse_typed_values() {
        assert_eq!(
            Property::FontWeight.parse("700"),
            Some(Declaration::FontWeight(FontWeight::Bold))
        );
        assert_eq!(Property::Opacity.parse("50%"), Some(Declaration::Opacity(0.5)));
        assert_eq!(
            Property::Content.parse("'“'"),
            Some(Declaration::Content("“".to_string()))
        );
        assert_eq!(
            Property::BorderTopWidth.parse("thick"),
            Some(Declaration::BorderTopWidth(Scalar::cells(0.3)))
        );
        assert_eq!(Property::Display.parse("sideways"), None);
        assert_eq!(Property::ZIndex.parse("auto"), None);
    }

    #[test]
    fn apply_unset_and_inherit() {
        let mut parent = ComputedStyle::default();
        parent.apply(&Declaration::Color(RgbaColor::rgb(255, 0, 0)), None);

        let mut child = ComputedStyle::default();
        child.apply(&Declaration::Color(RgbaColor::rgb(0, 0, 255)), None);
        child.apply(&Declaration::Inherit(Property::Color), Some(&parent));
        assert_eq!(child.color, Some(RgbaColor::rgb(255, 0, 0)));

        child.apply(&Declaration::Unset(Property::Color), Some(&parent));
        assert_eq!(child.color, None);
        assert!(!child.is_set(Property::Color));
    }

    #[test]
    fn inherit_from_respects_veto() {
        let mut parent = ComputedStyle::default();
        parent.text_align = Some(TextAlign::Center);
        parent.color = Some(RgbaColor::white());
        parent.margin_top = Some(Scalar::cells(2.0));

        let mut child = ComputedStyle::default();
        child.inherit_from(&parent, |p| p != Property::TextAlign);
        assert_eq!(child.color, Some(RgbaColor::white()));
        assert_eq!(child.text_align, None);
        assert_eq!(child.margin_top, None);
    }

    #[test]
    fn merge_overlays_set_fields() {
        let mut base = ComputedStyle::default();
        base.font_weight = Some(FontWeight::Bold);
        base.color = Some(RgbaColor::black());

        let mut top = ComputedStyle::default();
        top.color = Some(RgbaColor::rgb(255, 0, 0));
        top.custom.insert("--accent".into(), "teal".into());

        base.merge(&top);
        assert_eq!(base.font_weight, Some(FontWeight::Bold));
        assert_eq!(base.color, Some(RgbaColor::rgb(255, 0, 0)));
        assert_eq!(base.custom.get("--accent").map(String::as_str), Some("teal"));
    }
}
