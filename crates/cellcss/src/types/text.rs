//! Text and list presentation types.

use bitflags::bitflags;

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum TextAlign {
        #[default]
        Left = "left",
        Center = "center",
        Right = "right",
        Justify = "justify",
        Start = "start",
        End = "end",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum VerticalAlign {
        #[default]
        Baseline = "baseline",
        Top = "top",
        Middle = "middle",
        Bottom = "bottom",
        TextTop = "text-top",
        TextBottom = "text-bottom",
        Sub = "sub",
        Super = "super",
    }
}

keyword_enum! {
    /// Font weights collapse onto the three renderable intensities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum FontWeight {
        #[default]
        Normal = "normal",
        Bold = "bold",
        Bolder = "bolder",
        Lighter = "lighter",
    }
}

impl FontWeight {
    /// Maps a numeric weight (100-900) onto a keyword.
    pub fn from_number(weight: f64) -> Self {
        if weight >= 700.0 {
            FontWeight::Bold
        } else if weight <= 300.0 {
            FontWeight::Lighter
        } else {
            FontWeight::Normal
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontWeight::Bold | FontWeight::Bolder)
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum FontStyle {
        #[default]
        Normal = "normal",
        Italic = "italic",
        Oblique = "oblique",
    }
}

bitflags! {
    /// Lines drawn through, over or under text, plus blinking.
    ///
    /// ```
    /// use cellcss::types::TextDecoration;
    ///
    /// let deco = TextDecoration::from_keywords("underline blink").unwrap();
    /// assert!(deco.contains(TextDecoration::UNDERLINE | TextDecoration::BLINK));
    /// assert!(TextDecoration::from_keywords("none").unwrap().is_empty());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextDecoration: u8 {
        const UNDERLINE    = 0b0001;
        const OVERLINE     = 0b0010;
        const LINE_THROUGH = 0b0100;
        const BLINK        = 0b1000;
    }
}

impl TextDecoration {
    /// Parses a space separated list of decoration keywords.
    ///
    /// Colour and style components of the shorthand are skipped; an input
    /// with no recognised keyword yields `None`.
    pub fn from_keywords(value: &str) -> Option<Self> {
        let mut deco = TextDecoration::empty();
        let mut recognised = false;
        for word in value.split_whitespace() {
            let flag = match word.to_ascii_lowercase().as_str() {
                "none" => TextDecoration::empty(),
                "underline" => TextDecoration::UNDERLINE,
                "overline" => TextDecoration::OVERLINE,
                "line-through" => TextDecoration::LINE_THROUGH,
                "blink" => TextDecoration::BLINK,
                _ => continue,
            };
            recognised = true;
            deco |= flag;
        }
        recognised.then_some(deco)
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum TextTransform {
        #[default]
        None = "none",
        Uppercase = "uppercase",
        Lowercase = "lowercase",
        Capitalize = "capitalize",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum WhiteSpace {
        #[default]
        Normal = "normal",
        Nowrap = "nowrap",
        Pre = "pre",
        PreWrap = "pre-wrap",
        PreLine = "pre-line",
    }
}

impl WhiteSpace {
    /// Whether line breaks and runs of spaces in the source are kept.
    pub fn is_preformatted(self) -> bool {
        matches!(self, WhiteSpace::Pre | WhiteSpace::PreWrap | WhiteSpace::PreLine)
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum ListStyleType {
        #[default]
        None = "none",
        Disc = "disc",
        Circle = "circle",
        Square = "square",
        Triangle = "triangle",
        DisclosureOpen = "disclosure-open",
        DisclosureClosed = "disclosure-closed",
        Decimal = "decimal",
        LowerAlpha = "lower-alpha",
        UpperAlpha = "upper-alpha",
        LowerRoman = "lower-roman",
        UpperRoman = "upper-roman",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum ListStylePosition {
        #[default]
        Inside = "inside",
        Outside = "outside",
    }
}
