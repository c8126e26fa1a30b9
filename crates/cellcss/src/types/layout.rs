//! Layout control types.
//!
//! These decide which layout a box gets and how it takes part in the flow:
//!
//! - [`Display`]: the box category (block, inline, table, ...)
//! - [`Float`] and [`Position`]: taking a box out of normal flow
//! - [`Visibility`] and [`Overflow`]: what is drawn
//! - [`FlexDirection`] and [`AlignContent`]: the flex approximation
//!
//! ## Display vs Visibility
//!
//! - `display: none` removes the element from layout entirely
//! - `visibility: hidden` hides the element but preserves its space

keyword_enum! {
    /// The box category an element is laid out as.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Display {
        #[default]
        Block = "block",
        Inline = "inline",
        InlineBlock = "inline-block",
        Table = "table",
        TableCell = "table-cell",
        ListItem = "list-item",
        Flex = "flex",
        Grid = "grid",
        None = "none",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Float {
        #[default]
        None = "none",
        Left = "left",
        Right = "right",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Position {
        #[default]
        Static = "static",
        Relative = "relative",
        Absolute = "absolute",
        Fixed = "fixed",
        Sticky = "sticky",
    }
}

impl Position {
    /// Absolutely and fixed positioned boxes never take part in the flow.
    pub fn is_out_of_flow(self) -> bool {
        matches!(self, Position::Absolute | Position::Fixed)
    }
}

keyword_enum! {
    /// Unlike `Display::None`, a hidden element still occupies space.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Visibility {
        #[default]
        Visible = "visible",
        Hidden = "hidden",
        Collapse = "collapse",
    }
}

keyword_enum! {
    /// How content exceeding the box is handled along one axis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Overflow {
        #[default]
        Visible = "visible",
        Hidden = "hidden",
        Clip = "clip",
        Auto = "auto",
        Scroll = "scroll",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum BoxSizing {
        #[default]
        ContentBox = "content-box",
        BorderBox = "border-box",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum BorderCollapse {
        #[default]
        Separate = "separate",
        Collapse = "collapse",
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum FlexDirection {
        #[default]
        Row = "row",
        RowReverse = "row-reverse",
        Column = "column",
        ColumnReverse = "column-reverse",
    }
}

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }
}

keyword_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum AlignContent {
        #[default]
        Normal = "normal",
        Start = "start",
        FlexStart = "flex-start",
        Baseline = "baseline",
        Center = "center",
        End = "end",
        FlexEnd = "flex-end",
        Stretch = "stretch",
        SpaceBetween = "space-between",
        SpaceAround = "space-around",
    }
}
