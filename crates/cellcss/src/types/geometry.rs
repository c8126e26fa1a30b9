//! Lengths and their conversion to terminal cells.

/// The unit attached to a [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Character cells (a bare number).
    #[default]
    Cells,
    /// Percentage of the available space along the axis.
    Percent,
    /// Percentage of viewport width.
    ViewWidth,
    /// Percentage of viewport height.
    ViewHeight,
    /// Font-relative units; one unit is one cell wide.
    Em,
    Rem,
    Ch,
    /// CSS pixels, converted through the cell pixel size.
    Px,
    /// Grid fraction (fr).
    Fraction,
    /// Automatic sizing based on content.
    Auto,
    MinContent,
    MaxContent,
}

/// Which way a length is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Everything needed to turn a relative length into cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthContext {
    /// Size of the containing block along the measured axis, if known.
    pub available: Option<f64>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for LengthContext {
    fn default() -> Self {
        Self {
            available: None,
            viewport_width: 80.0,
            viewport_height: 24.0,
            cell_width_px: 10.0,
            cell_height_px: 20.0,
        }
    }
}

impl LengthContext {
    pub fn with_available(self, available: Option<f64>) -> Self {
        Self { available, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scalar {
    pub value: f64,
    pub unit: Unit,
}

impl Scalar {
    pub const AUTO: Self = Self {
        value: 0.0,
        unit: Unit::Auto,
    };
    pub const ZERO: Self = Self {
        value: 0.0,
        unit: Unit::Cells,
    };

    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn cells(value: f64) -> Self {
        Self::new(value, Unit::Cells)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    pub const fn em(value: f64) -> Self {
        Self::new(value, Unit::Em)
    }

    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Whether the value depends on content size rather than a number.
    pub fn is_intrinsic(&self) -> bool {
        matches!(self.unit, Unit::Auto | Unit::MinContent | Unit::MaxContent)
    }

    /// Converts the length to (fractional) cells.
    ///
    /// Returns `None` for intrinsic sizes and for percentages when the
    /// available space is unknown. Vertical font-relative and pixel lengths
    /// are scaled by the cell aspect ratio.
    ///
    /// ```
    /// use cellcss::types::{Axis, LengthContext, Scalar};
    ///
    /// let ctx = LengthContext::default().with_available(Some(40.0));
    /// assert_eq!(Scalar::percent(50.0).to_cells(Axis::Horizontal, &ctx), Some(20.0));
    /// assert_eq!(Scalar::px(20.0).to_cells(Axis::Horizontal, &ctx), Some(2.0));
    /// assert_eq!(Scalar::em(2.0).to_cells(Axis::Vertical, &ctx), Some(1.0));
    /// ```
    pub fn to_cells(&self, axis: Axis, ctx: &LengthContext) -> Option<f64> {
        if self.value == 0.0 && !self.is_intrinsic() {
            return Some(0.0);
        }
        let aspect = ctx.cell_width_px / ctx.cell_height_px;
        match self.unit {
            Unit::Cells | Unit::Fraction => Some(self.value),
            Unit::Percent => ctx.available.map(|available| self.value / 100.0 * available),
            Unit::ViewWidth => Some(self.value / 100.0 * ctx.viewport_width),
            Unit::ViewHeight => Some(self.value / 100.0 * ctx.viewport_height),
            Unit::Em | Unit::Rem | Unit::Ch => match axis {
                Axis::Horizontal => Some(self.value),
                Axis::Vertical => Some(self.value * aspect),
            },
            Unit::Px => {
                let cols = self.value / ctx.cell_width_px;
                match axis {
                    Axis::Horizontal => Some(cols),
                    Axis::Vertical => Some(cols * aspect),
                }
            }
            Unit::Auto | Unit::MinContent | Unit::MaxContent => None,
        }
    }
}

/// Four lengths, as written in a `margin` or `padding` shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub top: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
    pub left: Scalar,
}

impl Spacing {
    pub fn all(value: Scalar) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn vertical_horizontal(vertical: Scalar, horizontal: Scalar) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }
}
