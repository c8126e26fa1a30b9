//! Resolved styles for document nodes.
//!
//! A [`Theme`] is the cascade result for one element, generated box or text
//! run, plus the derived values layout reads from it. Declarations are
//! layered in this order, each layer overriding the one before:
//!
//! 1. the user agent sheet, with values inherited from the parent's user
//!    agent layer
//! 2. presentational attributes (`border`, `bgcolor`, `width`, ...)
//! 3. document sheets, then `<style>` sheets
//! 4. the `style` attribute
//! 5. heritable values from the parent's author layers
//! 6. `!important` declarations, user agent first
//!
//! An `unset` in the user agent sheet stops inheritance of that property,
//! which is how table cells avoid taking `text-align` from a centred
//! ancestor.
//!
//! Themes are memoised per document generation, so any edit to the tree,
//! its sheets or the render configuration recomputes them.

use std::sync::Arc;

use cellcss::parser::cascade::collect_declarations;
use cellcss::parser::{StyleSheet, expand_declaration, parse_inline_style, parse_stylesheet};
use cellcss::types::{
    AlignContent, Axis, BorderStyle, BoxSizing, ComputedStyle, Declaration, Display, FlexDirection,
    Float, FontStyle, LengthContext, ListStylePosition, ListStyleType, Overflow, Position,
    Property, RgbaColor, Scalar, TextAlign, TextDecoration, TextTransform, Unit, VerticalAlign,
    Visibility, WhiteSpace,
};
use log::{error, trace};
use once_cell::sync::Lazy;
use phf::phf_map;

use crate::document::{Document, NodeId, NodeKind, PseudoKind};
use crate::edges::{EdgeLines, Edges};
use crate::grid_style::{GridStyle, Mask};
use crate::line_style::LineStyle;
use crate::segment::Style;

const USER_AGENT_CSS: &str = r#"
body { background-color: #ffffff; }

head, base, command, link, meta, noscript, script, style, title, option,
input[type=hidden] { display: none; }

::before, ::after, abbr, acronym, audio, bdi, bdo, big, br, canvas, data,
datalist, embed, iframe, label, map, meter, object, output, picture,
progress, q, ruby, select, slot, small, span, template, textarea, time, tt,
video, wbr { display: inline; }

a { display: inline; text-decoration: underline; color: #0000ff; }
b, strong { display: inline; font-weight: bold; }
blink { display: inline; text-decoration: blink; }
cite, dfn, em, i, var { display: inline; font-style: italic; }
code { display: inline; }
del, s { display: inline; text-decoration: line-through; }
ins, u { display: inline; text-decoration: underline; }
kbd { display: inline; background-color: #333344; color: #ffffff; }
mark { display: inline; color: #000000; background-color: #ffff00; }
samp { display: inline; background-color: #334433; color: #ffffff; }
sub { display: inline; vertical-align: sub; }
sup { display: inline; vertical-align: super; }
q::before { content: '“'; }
q::after { content: '”'; }

img, svg { display: inline-block; overflow-x: hidden; overflow-y: hidden; }
img[width="0"], img[height="0"], svg[width="0"], svg[height="0"] { display: none; }
img[_missing], svg[_missing] { border: 1px solid #888888; }

center, caption { display: block; text-align: center; }

table { display: table; border-collapse: collapse; }
td, th { border-width: 0; }
td { display: table-cell; text-align: unset; }
th { display: table-cell; font-weight: bold; text-align: center; }

input {
    display: inline-block;
    white-space: pre;
    color: #000000;
    border: 2px inset;
    vertical-align: middle;
}
input[type=text] {
    background-color: #fafafa;
    border-color: #606060 #e9e7e3 #e9e7e3 #606060;
    overflow-x: hidden;
}
input[type=button], input[type=submit], input[type=reset] {
    background-color: #d4d0c8;
    border-color: #ffffff #606060 #606060 #ffffff;
}
button {
    display: inline-block;
    color: #000000;
    border: 2px outset;
    background-color: #d4d0c8;
    border-color: #ffffff #606060 #606060 #ffffff;
}

h1 {
    font-weight: bold;
    text-decoration: underline;
    border-bottom: thick solid;
    padding-bottom: 2rem;
    margin-top: 2rem;
    margin-bottom: 2em;
}
h2 {
    font-weight: bold;
    border-bottom: thick double;
    padding-bottom: 1.5rem;
    margin-top: 1.5rem;
    margin-bottom: 1.5rem;
}
h3 {
    font-weight: bold;
    font-style: italic;
    border-bottom: thin outset;
    padding-top: 1rem;
    padding-bottom: 1rem;
    margin-bottom: 1.5rem;
}
h4 {
    text-decoration: underline;
    border-bottom: thin solid;
    padding-top: 1rem;
    padding-bottom: 1rem;
    margin-bottom: 1.5rem;
}
h5 { border-bottom: thin dashed; margin-bottom: 1.5rem; }
h6 { font-style: italic; border-bottom: thin dotted; margin-bottom: 1.5rem; }

blockquote { margin: 1em 2em; }
hr { margin-top: 1rem; margin-bottom: 1rem; border-top: thin solid ansired; width: 100%; }
p { margin-top: 1em; margin-bottom: 1em; }
pre { margin-top: 1em; margin-bottom: 1em; white-space: pre; }

::marker { display: inline-block; padding-right: 1em; text-align: right; }

ol {
    list-style-type: decimal;
    list-style-position: outside;
    padding-left: 4em;
    margin-top: 1em;
    margin-bottom: 1em;
}
ul, menu, dir {
    list-style-type: disc;
    list-style-position: outside;
    padding-left: 3em;
    margin-top: 1em;
    margin-bottom: 1em;
}
ul ul, ol ul, menu ul, dir ul, ul menu, ol menu, menu menu, dir menu,
ul dir, ol dir, menu dir, dir dir {
    list-style-type: circle;
    margin-top: 0;
    margin-bottom: 0;
}
ul ol, ol ol, menu ol, dir ol { margin-top: 0; margin-bottom: 0; }
ul ul ul, ol ul ul, menu ul ul, ul ol ul, ol ol ul, ul menu ul, ul ul menu,
ol ul menu, ul ul dir, ol ol menu, ol ol dir, dir dir dir {
    list-style-type: square;
}
li { display: list-item; }

details > summary {
    display: list-item;
    list-style-type: disclosure-closed;
    list-style-position: inside;
}
details[open] > summary { list-style-type: disclosure-open; }
"#;

static USER_AGENT_SHEET: Lazy<StyleSheet> = Lazy::new(|| match parse_stylesheet(USER_AGENT_CSS) {
    Ok(sheet) => sheet,
    Err(err) => {
        error!("user agent style sheet failed to parse: {err}");
        StyleSheet::default()
    }
});

static SUBSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '₀', '1' => '₁', '2' => '₂', '3' => '₃', '4' => '₄', '5' => '₅',
    '6' => '₆', '7' => '₇', '8' => '₈', '9' => '₉', '+' => '₊', '-' => '₋',
    '=' => '₌', '(' => '₍', ')' => '₎', 'a' => 'ₐ', 'e' => 'ₑ', 'i' => 'ᵢ',
    'j' => 'ⱼ', 'o' => 'ₒ', 'r' => 'ᵣ', 'u' => 'ᵤ', 'v' => 'ᵥ', 'x' => 'ₓ',
    'β' => 'ᵦ', 'γ' => 'ᵧ', 'ρ' => 'ᵨ', 'φ' => 'ᵩ', 'χ' => 'ᵪ',
};

static SUPERSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '⁰', '1' => '¹', '2' => '²', '3' => '³', '4' => '⁴', '5' => '⁵',
    '6' => '⁶', '7' => '⁷', '8' => '⁸', '9' => '⁹', '+' => '⁺', '-' => '⁻',
    '=' => '⁼', '(' => '⁽', ')' => '⁾', 'a' => 'ᵃ', 'b' => 'ᵇ', 'c' => 'ᶜ',
    'd' => 'ᵈ', 'e' => 'ᵉ', 'f' => 'ᶠ', 'g' => 'ᵍ', 'h' => 'ʰ', 'i' => 'ⁱ',
    'j' => 'ʲ', 'k' => 'ᵏ', 'l' => 'ˡ', 'm' => 'ᵐ', 'n' => 'ⁿ', 'o' => 'ᵒ',
    'p' => 'ᵖ', 'r' => 'ʳ', 's' => 'ˢ', 't' => 'ᵗ', 'u' => 'ᵘ', 'v' => 'ᵛ',
    'w' => 'ʷ', 'x' => 'ˣ', 'y' => 'ʸ', 'z' => 'ᶻ', 'A' => 'ᴬ', 'B' => 'ᴮ',
    'D' => 'ᴰ', 'E' => 'ᴱ', 'G' => 'ᴳ', 'H' => 'ᴴ', 'I' => 'ᴵ', 'J' => 'ᴶ',
    'K' => 'ᴷ', 'L' => 'ᴸ', 'M' => 'ᴹ', 'N' => 'ᴺ', 'O' => 'ᴼ', 'P' => 'ᴾ',
    'R' => 'ᴿ', 'T' => 'ᵀ', 'U' => 'ᵁ', 'V' => 'ⱽ', 'W' => 'ᵂ', 'α' => 'ᵅ',
    'β' => 'ᵝ', 'γ' => 'ᵞ', 'δ' => 'ᵟ', '∊' => 'ᵋ', 'θ' => 'ᶿ', 'ι' => 'ᶥ',
    'Φ' => 'ᶲ', 'φ' => 'ᵠ', 'χ' => 'ᵡ',
};

/// `input` types drawn as a text box.
const TEXT_INPUT_TYPES: &[&str] = &["text", "password", "email", "number", "search", "tel", "url"];

/// Python-style rounding, halves to even.
pub(crate) fn round_cells(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// The resolved style of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Element name; `::before` and friends for generated boxes, `::text`
    /// for text runs.
    pub name: String,
    pub pseudo: Option<PseudoKind>,
    /// The full cascade result.
    pub style: ComputedStyle,
    /// Effective text colour.
    pub fg: Option<RgbaColor>,
    /// Effective background: the nearest opaque background up the tree.
    pub bg: Option<RgbaColor>,
    pub(crate) agent: ComputedStyle,
    pub(crate) author: ComputedStyle,
    pub(crate) parent: Option<Arc<Theme>>,
    /// Default width of text `input` boxes, from their `size` attribute.
    input_width: Option<usize>,
}

impl Theme {
    fn new(name: impl Into<String>, pseudo: Option<PseudoKind>, parent: Option<Arc<Theme>>) -> Self {
        Self {
            name: name.into(),
            pseudo,
            style: ComputedStyle::default(),
            fg: None,
            bg: None,
            agent: ComputedStyle::default(),
            author: ComputedStyle::default(),
            parent,
            input_width: None,
        }
    }

    pub fn parent(&self) -> Option<&Theme> {
        self.parent.as_deref()
    }

    /// Derives the effective colours against the parent's.
    fn resolve_colors(&mut self) {
        let parent_bg = self.parent.as_ref().and_then(|p| p.bg);
        let parent_fg = self.parent.as_ref().and_then(|p| p.fg);
        self.bg = match self.style.background_color {
            Some(bg) if !bg.is_transparent() => Some(bg),
            _ => parent_bg,
        };
        self.fg = match self.style.color {
            Some(fg) if fg.is_transparent() => self.bg,
            Some(fg) => Some(fg),
            None if self.style.background_color.is_some_and(|bg| !bg.is_transparent()) => {
                Some(RgbaColor::black())
            }
            None => parent_fg,
        };
    }

    // Display

    pub fn display(&self) -> Display {
        self.style.display.unwrap_or_default()
    }

    fn parent_is(&self, test: impl Fn(&Theme) -> bool) -> bool {
        self.parent().is_some_and(test)
    }

    /// The float side; floats are ignored inside flex containers.
    pub fn floated(&self) -> Option<Float> {
        match self.style.float.unwrap_or_default() {
            Float::None => None,
            _ if self.parent_is(Theme::is_flex) => None,
            side => Some(side),
        }
    }

    pub fn is_flex(&self) -> bool {
        self.display() == Display::Flex
    }

    pub fn is_grid(&self) -> bool {
        self.display() == Display::Grid
    }

    pub fn flex_direction(&self) -> FlexDirection {
        self.style.flex_direction.unwrap_or_default()
    }

    pub fn is_flex_item(&self) -> bool {
        self.parent_is(Theme::is_flex)
    }

    pub fn is_grid_item(&self) -> bool {
        self.parent_is(Theme::is_grid)
    }

    pub fn is_block(&self) -> bool {
        let own = matches!(self.display(), Display::Block | Display::Flex | Display::Grid)
            && match self.parent() {
                None => true,
                Some(parent) if parent.is_flex() => !parent.flex_direction().is_row(),
                Some(_) => self.floated().is_none(),
            };
        own || self.is_grid_item()
    }

    pub fn is_inline(&self) -> bool {
        self.parent().is_some_and(|p| !p.is_grid() && !p.is_flex())
            && self.floated().is_none()
            && self.display() == Display::Inline
    }

    /// Inline blocks, floats and items of a row flex container.
    pub fn is_inline_block(&self) -> bool {
        self.display() == Display::InlineBlock
            || self.floated().is_some()
            || self.parent_is(|p| p.is_flex() && p.flex_direction().is_row())
    }

    pub fn is_table(&self) -> bool {
        self.display() == Display::Table
    }

    pub fn is_table_cell(&self) -> bool {
        self.display() == Display::TableCell
    }

    pub fn is_list_item(&self) -> bool {
        self.display() == Display::ListItem && self.floated().is_none()
    }

    /// Boxes that start on a new line and take the available width.
    pub fn is_blocky(&self) -> bool {
        self.is_block() || self.is_grid() || self.is_table() || self.is_table_cell() || self.is_list_item()
    }

    pub fn is_image(&self) -> bool {
        matches!(self.name.as_str(), "img" | "svg")
    }

    pub fn is_text(&self) -> bool {
        self.name == "::text"
    }

    pub fn position(&self) -> Position {
        self.style.position.unwrap_or_default()
    }

    pub fn z_index(&self) -> i32 {
        self.style.z_index.unwrap_or(0)
    }

    pub fn order(&self) -> i32 {
        self.style.order.unwrap_or(0)
    }

    /// Drawn in the background colour only.
    pub fn hidden(&self) -> bool {
        self.style.visibility == Some(Visibility::Hidden) || self.style.opacity == Some(0.0)
    }

    /// Generated content, for `::before`, `::after` and `::marker`.
    pub fn content(&self) -> Option<&str> {
        self.style
            .content
            .as_deref()
            .filter(|c| !matches!(*c, "normal" | "none"))
    }

    /// Whether the node produces no box at all.
    pub fn skip(&self) -> bool {
        let empty_generated =
            matches!(self.pseudo, Some(PseudoKind::Before | PseudoKind::After)) && self.content().is_none();
        empty_generated
            || self.display() == Display::None
            || (self.position() == Position::Absolute && self.hidden())
    }

    /// Whether the box takes part in normal flow.
    pub fn in_flow(&self) -> bool {
        !self.skip() && !self.position().is_out_of_flow() && self.name != "html" && self.floated().is_none()
    }

    pub fn white_space(&self) -> WhiteSpace {
        self.style.white_space.unwrap_or_default()
    }

    pub fn preformatted(&self) -> bool {
        self.white_space().is_preformatted()
    }

    pub fn overflow_x(&self) -> Overflow {
        self.style.overflow_x.unwrap_or_default()
    }

    pub fn overflow_y(&self) -> Overflow {
        self.style.overflow_y.unwrap_or_default()
    }

    pub fn box_sizing(&self) -> BoxSizing {
        self.style.box_sizing.unwrap_or_default()
    }

    pub fn border_collapse(&self) -> bool {
        self.style.border_collapse == Some(cellcss::types::BorderCollapse::Collapse)
    }

    pub fn list_style_type(&self) -> ListStyleType {
        self.style.list_style_type.unwrap_or_default()
    }

    pub fn list_style_position(&self) -> ListStylePosition {
        self.style.list_style_position.unwrap_or_default()
    }

    // Alignment

    pub fn text_align(&self) -> TextAlign {
        match self.style.text_align.unwrap_or_default() {
            TextAlign::Start => TextAlign::Left,
            TextAlign::End => TextAlign::Right,
            align => align,
        }
    }

    pub fn vertical_align(&self) -> VerticalAlign {
        self.style.vertical_align.unwrap_or_default()
    }

    /// Where a shorter box sits within a taller row: 0 top, 0.5 middle,
    /// 1 bottom.
    pub fn valign_fraction(&self) -> f64 {
        if let Some(parent) = self.parent().filter(|p| p.is_flex()) {
            return match parent.style.align_content.unwrap_or_default() {
                AlignContent::Normal | AlignContent::Start | AlignContent::FlexStart | AlignContent::Baseline => 0.0,
                AlignContent::Center => 0.5,
                _ => 1.0,
            };
        }
        match self.vertical_align() {
            VerticalAlign::Top | VerticalAlign::TextTop => 0.0,
            VerticalAlign::Middle => 0.5,
            _ => 1.0,
        }
    }

    /// How the box itself sits within the width available to it.
    pub fn block_align(&self) -> TextAlign {
        let auto = |side: Option<Scalar>| side.is_some_and(|s| s.is_auto());
        match (auto(self.style.margin_left), auto(self.style.margin_right)) {
            (true, true) => TextAlign::Center,
            (true, false) => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }

    // Sizes

    fn cells(value: Option<Scalar>, axis: Axis, ctx: &LengthContext) -> Option<f64> {
        value.and_then(|v| v.to_cells(axis, ctx))
    }

    /// `min-content` or `max-content` when the width is intrinsic.
    pub fn intrinsic_width(&self) -> Option<Unit> {
        self.style
            .width
            .map(|w| w.unit)
            .filter(|u| matches!(u, Unit::MinContent | Unit::MaxContent))
    }

    /// The prescribed width in cells, capped at the available width.
    pub fn width(&self, ctx: &LengthContext) -> Option<usize> {
        if self.style.width.is_some() {
            let cells = Self::cells(self.style.width, Axis::Horizontal, ctx)?;
            let width = round_cells(cells).max(0) as usize;
            return Some(match ctx.available {
                Some(available) => width.min(available.max(0.0) as usize),
                None => width,
            });
        }
        self.input_width
    }

    pub fn min_width(&self, ctx: &LengthContext) -> Option<usize> {
        Self::cells(self.style.min_width, Axis::Horizontal, ctx).map(|v| round_cells(v).max(0) as usize)
    }

    pub fn max_width(&self, ctx: &LengthContext) -> Option<usize> {
        Self::cells(self.style.max_width, Axis::Horizontal, ctx).map(|v| round_cells(v).max(0) as usize)
    }

    pub fn height(&self, ctx: &LengthContext) -> Option<usize> {
        Self::cells(self.style.height, Axis::Vertical, ctx).map(|v| round_cells(v).max(0) as usize)
    }

    pub fn min_height(&self, ctx: &LengthContext) -> Option<usize> {
        Self::cells(self.style.min_height, Axis::Vertical, ctx).map(|v| round_cells(v).max(0) as usize)
    }

    pub fn max_height(&self, ctx: &LengthContext) -> Option<usize> {
        Self::cells(self.style.max_height, Axis::Vertical, ctx).map(|v| round_cells(v).max(0) as usize)
    }

    // Box edges

    /// Padding in cells. Inline boxes get no vertical padding.
    pub fn padding(&self, ctx: &LengthContext) -> Edges<usize> {
        let side = |value: Option<Scalar>, axis| {
            round_cells(Self::cells(value, axis, ctx).unwrap_or(0.0)).max(0) as usize
        };
        let mut padding = Edges::new(
            side(self.style.padding_top, Axis::Vertical),
            side(self.style.padding_right, Axis::Horizontal),
            side(self.style.padding_bottom, Axis::Vertical),
            side(self.style.padding_left, Axis::Horizontal),
        );
        if self.is_inline() || self.is_inline_block() {
            padding.top = 0;
            padding.bottom = 0;
        }
        padding
    }

    /// Margins as written, before collapsing. Fractions below 0.3 of a
    /// cell round down, anything larger rounds up; `auto` is zero.
    pub fn base_margin(&self, ctx: &LengthContext) -> Edges<usize> {
        let side = |value: Option<Scalar>, axis| {
            let cells = Self::cells(value, axis, ctx).unwrap_or(0.0);
            round_cells(cells + 0.2).max(0) as usize
        };
        Edges::new(
            side(self.style.margin_top, Axis::Vertical),
            side(self.style.margin_right, Axis::Horizontal),
            side(self.style.margin_bottom, Axis::Vertical),
            side(self.style.margin_left, Axis::Horizontal),
        )
    }

    /// Horizontal and vertical spacing between flex or grid items.
    pub fn gap(&self, ctx: &LengthContext) -> (usize, usize) {
        let gap = |value: Option<Scalar>, axis| round_cells(Self::cells(value, axis, ctx).unwrap_or(0.0)).max(0) as usize;
        (
            gap(self.style.column_gap, Axis::Horizontal),
            gap(self.style.row_gap, Axis::Vertical),
        )
    }

    /// Offsets of a positioned box: its margin plus `top`, `right`,
    /// `bottom` and `left`, against the viewport.
    pub fn offsets(&self, across: &LengthContext, down: &LengthContext) -> Edges<i64> {
        let margin = self.base_margin(across);
        let offset = |value: Option<Scalar>, axis, ctx| round_cells(Self::cells(value, axis, ctx).unwrap_or(0.0));
        Edges::new(
            margin.top as i64 + offset(self.style.top, Axis::Vertical, down),
            margin.right as i64 + offset(self.style.right, Axis::Horizontal, across),
            margin.bottom as i64 + offset(self.style.bottom, Axis::Vertical, down),
            margin.left as i64 + offset(self.style.left, Axis::Horizontal, across),
        )
    }

    /// Which of `top`, `right`, `bottom` and `left` are set.
    pub fn anchors(&self) -> Edges<bool> {
        Edges::new(
            self.style.top.is_some(),
            self.style.right.is_some(),
            self.style.bottom.is_some(),
            self.style.left.is_some(),
        )
    }

    // Borders

    fn border_styles(&self) -> Edges<BorderStyle> {
        Edges::new(
            self.style.border_top_style.unwrap_or_default(),
            self.style.border_right_style.unwrap_or_default(),
            self.style.border_bottom_style.unwrap_or_default(),
            self.style.border_left_style.unwrap_or_default(),
        )
    }

    /// Border widths in (fractional) cells; they pick the line weight.
    pub fn border_widths(&self, ctx: &LengthContext) -> Edges<f64> {
        let width = |value: Option<Scalar>| Self::cells(value, Axis::Horizontal, ctx).unwrap_or(0.0).max(0.0);
        Edges::new(
            width(self.style.border_top_width),
            width(self.style.border_right_width),
            width(self.style.border_bottom_width),
            width(self.style.border_left_width),
        )
    }

    /// Which edges draw a border. Inline boxes draw only the sides.
    pub fn border_visibility(&self, ctx: &LengthContext) -> Edges<bool> {
        let mut visible = self
            .border_widths(ctx)
            .zip_with(self.border_styles(), |w, s| w != 0.0 && s != BorderStyle::None);
        if self.is_inline() {
            visible.top = false;
            visible.bottom = false;
        }
        visible
    }

    pub fn border_line(&self, ctx: &LengthContext) -> EdgeLines {
        let widths = self.border_widths(ctx);
        let styles = self.border_styles();
        let rounded = Self::cells(self.style.border_radius, Axis::Horizontal, ctx).is_some_and(|r| r > 0.0);
        let inline = self.is_inline();
        let pick = |edge: Edge, width: f64, style: BorderStyle| {
            if inline && width > 0.0 && style != BorderStyle::None {
                match edge {
                    Edge::Left => return LineStyle::LowerLeftEighth,
                    Edge::Right => return LineStyle::UpperRightEighth,
                    _ => {}
                }
            }
            match line_for(edge, width, style) {
                LineStyle::Thin if rounded => LineStyle::Rounded,
                line => line,
            }
        };
        Edges::new(
            pick(Edge::Top, widths.top, styles.top),
            pick(Edge::Right, widths.right, styles.right),
            pick(Edge::Bottom, widths.bottom, styles.bottom),
            pick(Edge::Left, widths.left, styles.left),
        )
    }

    /// A grid combining the line of each edge.
    pub fn border_grid(&self, ctx: &LengthContext) -> GridStyle {
        let line = self.border_line(ctx);
        line.top.grid(Mask::TOP_EDGE)
            + line.right.grid(Mask::RIGHT_EDGE)
            + line.bottom.grid(Mask::BOTTOM_EDGE)
            + line.left.grid(Mask::LEFT_EDGE)
    }

    /// Glyph style of each border edge. A transparent border colour shows
    /// the parent's background.
    pub fn border_style(&self) -> Edges<Option<Style>> {
        let parent_bg = self.parent().and_then(|p| p.bg);
        let color = |c: Option<RgbaColor>| {
            let fg = match c {
                Some(c) if c.is_transparent() => parent_bg,
                Some(c) => Some(c),
                None => self.fg,
            };
            Some(Style {
                fg,
                bg: self.bg,
                ..Style::default()
            })
        };
        Edges::new(
            color(self.style.border_top_color),
            color(self.style.border_right_color),
            color(self.style.border_bottom_color),
            color(self.style.border_left_color),
        )
    }

    // Text

    /// The style text in this box is drawn with.
    pub fn text_style(&self) -> Style {
        let deco = self.style.text_decoration.unwrap_or_default();
        let hidden = self.hidden();
        Style {
            fg: self.fg,
            bg: self.bg,
            bold: self.style.font_weight.is_some_and(|w| w.is_bold()),
            italic: matches!(self.style.font_style, Some(FontStyle::Italic | FontStyle::Oblique)),
            underline: deco.contains(TextDecoration::UNDERLINE) && !hidden,
            overline: deco.contains(TextDecoration::OVERLINE) && !hidden,
            strike: deco.contains(TextDecoration::LINE_THROUGH),
            blink: deco.contains(TextDecoration::BLINK),
            hidden,
            ..Style::default()
        }
    }

    /// The style padding and fill runs take: colours without decoration.
    pub fn fill_style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            hidden: self.hidden(),
            ..Style::default()
        }
    }

    /// Applies `text-transform`, then sub/superscript substitution.
    pub fn transform_text(&self, text: &str) -> String {
        let transformed = match self.style.text_transform.unwrap_or_default() {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => capitalize_words(text),
        };
        let table = match self.vertical_align() {
            VerticalAlign::Sub => &SUBSCRIPTS,
            VerticalAlign::Super => &SUPERSCRIPTS,
            _ => return transformed,
        };
        transformed
            .chars()
            .map(|c| table.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Top and right borders sit on the upper right of their cell.
    fn is_outer(self) -> bool {
        matches!(self, Edge::Top | Edge::Right)
    }
}

/// The line for one edge given its width in cells and its style.
fn line_for(edge: Edge, width: f64, style: BorderStyle) -> LineStyle {
    use LineStyle as L;

    let half = |outer, inner| if edge.is_outer() { outer } else { inner };
    match style {
        BorderStyle::None => L::NoLine,
        BorderStyle::Hidden => L::Invisible,
        _ if width <= 0.0 => L::NoLine,
        BorderStyle::Solid if width >= 2.0 => L::Full,
        BorderStyle::Solid if width >= 1.0 => match edge {
            Edge::Top => L::UpperRightHalf,
            Edge::Bottom => L::LowerLeftHalf,
            _ => L::Full,
        },
        BorderStyle::Solid if width >= 0.5 => half(L::UpperRightHalf, L::LowerLeftHalf),
        BorderStyle::Solid if width >= 0.2 => L::Thick,
        BorderStyle::Solid => L::Thin,
        BorderStyle::Dotted if width >= 1.0 => match edge {
            Edge::Top => L::UpperRightHalfDotted,
            Edge::Bottom => L::LowerLeftHalfDotted,
            _ => L::FullDotted,
        },
        BorderStyle::Dotted if width >= 0.2 => L::ThickQuadDashed,
        BorderStyle::Dotted => L::ThinQuadDashed,
        BorderStyle::Dashed if width >= 0.2 => L::ThickDoubleDashed,
        BorderStyle::Dashed => L::ThinDoubleDashed,
        BorderStyle::Groove if width >= 0.2 => L::Thick,
        BorderStyle::Groove => L::Thin,
        BorderStyle::Double | BorderStyle::Ridge => L::Double,
        BorderStyle::Inset => half(L::LowerLeftEighth, L::UpperRightEighth),
        BorderStyle::Outset => half(L::UpperRightEighth, L::LowerLeftEighth),
    }
}

/// Upper-cases the first letter of every word.
fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_start = true;
    for c in text.chars() {
        if at_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
            at_start = false;
        } else {
            out.push(c);
            if c.is_whitespace() {
                at_start = true;
            }
        }
    }
    out
}

fn unset_properties<'a>(declarations: impl IntoIterator<Item = &'a Declaration>) -> Vec<Property> {
    declarations
        .into_iter()
        .filter_map(|d| match d {
            Declaration::Unset(p) => Some(*p),
            _ => None,
        })
        .collect()
}

impl Document {
    /// The resolved theme of a node, memoised until the next edit.
    pub fn theme(&self, id: NodeId) -> Arc<Theme> {
        self.refresh_cache();
        if let Some(theme) = self.cache.borrow().themes.get(&id) {
            return Arc::clone(theme);
        }
        let theme = Arc::new(self.compute_theme(id));
        self.cache.borrow_mut().themes.insert(id, Arc::clone(&theme));
        theme
    }

    fn compute_theme(&self, id: NodeId) -> Theme {
        let parent = self.parent(id).map(|p| self.theme(p));
        let theme = match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Text(_)) => self.text_theme(parent),
            Some(_) => self.element_theme(id, parent),
            None => Theme::new("::detached", None, parent),
        };
        trace!(
            "theme {id:?} <{}> display={} fg={:?} bg={:?}",
            theme.name,
            theme.display(),
            theme.fg.map(|c| c.to_hex()),
            theme.bg.map(|c| c.to_hex())
        );
        theme
    }

    /// Text runs take their look from the inline elements around them and
    /// inherit the rest from the nearest block.
    fn text_theme(&self, parent: Option<Arc<Theme>>) -> Theme {
        let mut theme = Theme::new("::text", None, parent);
        let mut style = ComputedStyle::default();
        let mut ancestor = theme.parent.clone();
        while let Some(current) = ancestor {
            if current.is_inline() {
                style.inherit_text_style_from(&current.style);
                ancestor = current.parent.clone();
            } else {
                style.inherit_from(&current.style, |_| true);
                break;
            }
        }
        // Text never carries its own box.
        style.background_color = None;
        style.display = Some(Display::Inline);
        theme.style = style;
        theme.resolve_colors();
        theme
    }

    fn element_theme(&self, id: NodeId, parent: Option<Arc<Theme>>) -> Theme {
        let pseudo = self.pseudo_kind(id);
        let name = self.name(id).unwrap_or_default().to_string();
        let mut theme = Theme::new(name.as_str(), pseudo, parent);
        let Some(meta) = self.element_meta(id) else {
            return theme;
        };
        let ancestors = self.ancestor_metas(id);
        let config = self.config();
        let media = config.media_context();
        let parent = theme.parent.clone();
        let parent_style = parent.as_ref().map(|p| &p.style);

        // User agent layer
        let mut agent = ComputedStyle::default();
        let mut agent_unset = Vec::new();
        let mut agent_important: Vec<Declaration> = Vec::new();
        if config.user_agent_styles {
            let matched = collect_declarations(&meta, &ancestors, std::iter::once(&*USER_AGENT_SHEET), &media);
            for declaration in matched.normal.iter().chain(&matched.important) {
                agent.apply(declaration, parent_style);
            }
            agent_unset = unset_properties(matched.normal.iter().chain(&matched.important).copied());
            agent_important = matched.important.into_iter().cloned().collect();
        } else if matches!(pseudo, Some(PseudoKind::Before | PseudoKind::After)) {
            agent.display = Some(Display::Inline);
        }
        if let Some(parent) = &parent {
            agent.inherit_from(&parent.agent, |p| !agent_unset.contains(&p));
        }

        // Author layers
        let mut author = ComputedStyle::default();
        for declaration in presentational_declarations(self, id) {
            author.apply(&declaration, parent_style);
        }
        let embedded = self.embedded_sheets();
        let sheets = self.stylesheets().iter().chain(embedded.iter());
        let matched = collect_declarations(&meta, &ancestors, sheets, &media);
        let (inline, inline_important) = self.attribute(id, "style").map(parse_inline_style).unwrap_or_default();
        let author_important: Vec<&Declaration> = matched.important.iter().copied().chain(&inline_important).collect();
        for declaration in matched.normal.iter().copied().chain(&inline).chain(author_important.iter().copied()) {
            author.apply(declaration, parent_style);
        }
        let author_unset = unset_properties(matched.normal.iter().copied().chain(&inline).chain(author_important.iter().copied()));
        if let Some(parent) = &parent {
            author.inherit_from(&parent.author, |p| !agent_unset.contains(&p) && !author_unset.contains(&p));
        }

        let mut style = agent.clone();
        style.merge(&author);
        for declaration in agent_important.iter().chain(author_important.iter().copied()) {
            style.apply(declaration, parent_style);
        }

        if name == "input" {
            let kind = self.attribute(id, "type").unwrap_or("text");
            if TEXT_INPUT_TYPES.contains(&kind) {
                theme.input_width = Some(
                    self.attribute(id, "size")
                        .and_then(|s| s.trim().parse().ok())
                        .unwrap_or(20),
                );
            }
        }
        theme.agent = agent;
        theme.author = author;
        theme.style = style;
        theme.resolve_colors();
        theme
    }
}

/// Declarations implied by legacy HTML attributes.
fn presentational_declarations(doc: &Document, id: NodeId) -> Vec<Declaration> {
    let Some(attributes) = doc.attributes(id) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    if let Some(border) = attributes.get("border").map(|b| b.trim()).filter(|b| !b.is_empty()) {
        out.extend(expand_declaration("border-width", &format!("{border}px")));
        out.extend(expand_declaration("border-style", "solid"));
    }
    let mapped = [
        ("color", "color"),
        ("bgcolor", "background-color"),
        ("halign", "text-align"),
        ("valign", "vertical-align"),
    ];
    for (attribute, property) in mapped {
        if let Some(value) = attributes.get(attribute) {
            out.extend(expand_declaration(property, value));
        }
    }
    for dimension in ["width", "height"] {
        if let Some(value) = attributes.get(dimension).map(|v| v.trim()) {
            let value = if value.parse::<f64>().is_ok() {
                format!("{value}px")
            } else {
                value.to_string()
            };
            out.extend(expand_declaration(dimension, &value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use cellcss::types::FontWeight;

    use super::*;
    use crate::config::RenderConfig;
    use crate::markup::parse_markup;

    fn ctx() -> LengthContext {
        RenderConfig::default().length_context(Some(80.0))
    }

    #[test]
    fn test_user_agent_sheet_parses() {
        assert!(USER_AGENT_SHEET.rules.len() > 40);
    }

    #[test]
    fn test_author_colour_keeps_agent_weight() {
        let mut doc = parse_markup("<h1>Title</h1>").unwrap();
        doc.add_css("h1 { color: red }").unwrap();
        let theme = doc.theme(doc.find("h1").unwrap());
        assert_eq!(theme.style.font_weight, Some(FontWeight::Bold));
        assert_eq!(theme.fg, Some(RgbaColor::rgb(255, 0, 0)));
        assert!(theme.text_style().bold);
        assert!(theme.text_style().underline);
    }

    #[test]
    fn test_specificity_and_important() {
        let mut doc = parse_markup(r#"<p id="x" class="c" style="color: blue">a</p>"#).unwrap();
        doc.add_css("#x { order: 2 } p { order: 1 } .c { color: green !important }").unwrap();
        let theme = doc.theme(doc.find("p").unwrap());
        assert_eq!(theme.order(), 2);
        assert_eq!(theme.fg, Some(RgbaColor::rgb(0, 128, 0)));
    }

    #[test]
    fn test_unset_blocks_inheritance() {
        let doc = parse_markup("<center><table><tr><td>x</td></tr></table></center>").unwrap();
        let td = doc.find("td").unwrap();
        assert_eq!(doc.theme(td).style.text_align, None);
        assert_eq!(doc.theme(doc.find("table").unwrap()).text_align(), TextAlign::Center);
    }

    #[test]
    fn test_text_inherits_from_inline_ancestor() {
        let doc = parse_markup(r#"<p><a href="/x">link <b>bold</b></a></p>"#).unwrap();
        let b = doc.find("b").unwrap();
        let text = doc.children(b)[0];
        let theme = doc.theme(text);
        assert!(theme.is_text());
        assert_eq!(theme.fg, Some(RgbaColor::rgb(0, 0, 255)));
        let style = theme.text_style();
        assert!(style.bold && style.underline);
        assert_eq!(theme.style.margin_top, None);
    }

    #[test]
    fn test_body_background_makes_text_black() {
        let doc = parse_markup("<body><p>x</p></body>").unwrap();
        let p = doc.theme(doc.find("p").unwrap());
        assert_eq!(p.bg, Some(RgbaColor::white()));
        assert_eq!(p.fg, Some(RgbaColor::black()));
    }

    #[test]
    fn test_user_agent_styles_can_be_disabled() {
        let mut doc = parse_markup("<h1>x</h1>").unwrap();
        doc.set_config(&RenderConfig::default().with_user_agent_styles(false));
        let theme = doc.theme(doc.find("h1").unwrap());
        assert_eq!(theme.style.font_weight, None);
        assert_eq!(theme.display(), Display::Block);
    }

    #[test]
    fn test_presentational_attributes() {
        let doc = parse_markup(r#"<table border="1" bgcolor="red" width="40"><tr><td valign="top">x</td></tr></table>"#).unwrap();
        let table = doc.theme(doc.find("table").unwrap());
        assert_eq!(table.bg, Some(RgbaColor::rgb(255, 0, 0)));
        assert_eq!(table.width(&ctx()), Some(4));
        assert!(table.border_visibility(&ctx()).any());
        let td = doc.theme(doc.find("td").unwrap());
        assert_eq!(td.vertical_align(), VerticalAlign::Top);
        assert_eq!(td.valign_fraction(), 0.0);
    }

    #[test]
    fn test_heading_border_lines() {
        let doc = parse_markup("<h1>a</h1><h2>b</h2><h3>c</h3>").unwrap();
        let line = |name| doc.theme(doc.find(name).unwrap()).border_line(&ctx());
        assert_eq!(line("h1").bottom, LineStyle::Thick);
        assert_eq!(line("h1").top, LineStyle::NoLine);
        assert_eq!(line("h2").bottom, LineStyle::Double);
        assert_eq!(line("h3").bottom, LineStyle::LowerLeftEighth);
    }

    #[test]
    fn test_line_table() {
        assert_eq!(line_for(Edge::Left, 1.0, BorderStyle::Solid), LineStyle::Full);
        assert_eq!(line_for(Edge::Top, 1.0, BorderStyle::Solid), LineStyle::UpperRightHalf);
        assert_eq!(line_for(Edge::Bottom, 0.6, BorderStyle::Solid), LineStyle::LowerLeftHalf);
        assert_eq!(line_for(Edge::Top, 0.1, BorderStyle::Dotted), LineStyle::ThinQuadDashed);
        assert_eq!(line_for(Edge::Right, 0.3, BorderStyle::Dashed), LineStyle::ThickDoubleDashed);
        assert_eq!(line_for(Edge::Top, 0.1, BorderStyle::Inset), LineStyle::LowerLeftEighth);
        assert_eq!(line_for(Edge::Left, 0.1, BorderStyle::Outset), LineStyle::LowerLeftEighth);
        assert_eq!(line_for(Edge::Top, 0.0, BorderStyle::Solid), LineStyle::NoLine);
        assert_eq!(line_for(Edge::Top, 3.0, BorderStyle::Hidden), LineStyle::Invisible);
    }

    #[test]
    fn test_rounded_and_inline_borders() {
        let mut doc = parse_markup("<div>a</div><p><span>b</span></p>").unwrap();
        doc.add_css("div { border: thin solid; border-radius: 1 } span { border: thin solid }").unwrap();
        let div = doc.theme(doc.find("div").unwrap());
        assert_eq!(div.border_line(&ctx()), Edges::all(LineStyle::Rounded));
        let span = doc.theme(doc.find("span").unwrap());
        let lines = span.border_line(&ctx());
        assert_eq!((lines.left, lines.right), (LineStyle::LowerLeftEighth, LineStyle::UpperRightEighth));
        assert_eq!(span.border_visibility(&ctx()), Edges::new(false, true, false, true));
    }

    #[test]
    fn test_margins_round_up_past_three_tenths() {
        let mut doc = parse_markup("<div>a</div>").unwrap();
        doc.add_css("div { margin: 0.25 0.2 0.35 auto }").unwrap();
        let theme = doc.theme(doc.find("div").unwrap());
        assert_eq!(theme.base_margin(&ctx()), Edges::new(0, 0, 1, 0));
        assert_eq!(theme.block_align(), TextAlign::Right);
    }

    #[test]
    fn test_paragraph_margin_is_half_em_vertically() {
        let doc = parse_markup("<p>a</p>").unwrap();
        let theme = doc.theme(doc.find("p").unwrap());
        assert_eq!(theme.base_margin(&ctx()), Edges::new(1, 0, 1, 0));
    }

    #[test]
    fn test_sub_and_sup() {
        let doc = parse_markup("<p>H<sub>2</sub>O x<sup>n+1</sup></p>").unwrap();
        let sub = doc.theme(doc.children(doc.find("sub").unwrap())[0]);
        assert_eq!(sub.transform_text("2"), "₂");
        let sup = doc.theme(doc.children(doc.find("sup").unwrap())[0]);
        assert_eq!(sup.transform_text("n+1q"), "ⁿ⁺¹q");
    }

    #[test]
    fn test_text_transform() {
        let mut doc = parse_markup("<p>a</p><h6>b</h6>").unwrap();
        doc.add_css("p { text-transform: capitalize } h6 { text-transform: uppercase }").unwrap();
        let p = doc.theme(doc.find("p").unwrap());
        assert_eq!(p.transform_text("hello wide-world  x"), "Hello Wide-world  X");
        let h6 = doc.theme(doc.find("h6").unwrap());
        assert_eq!(h6.transform_text("straße"), "STRASSE");
    }

    #[test]
    fn test_generated_content_and_skip() {
        let doc = parse_markup("<p><q>hi</q></p>").unwrap();
        let q = doc.find("q").unwrap();
        let before = doc.theme(doc.pseudo(q, PseudoKind::Before).unwrap());
        assert_eq!(before.content(), Some("“"));
        assert!(!before.skip());
        let p_before = doc.theme(doc.pseudo(doc.find("p").unwrap(), PseudoKind::Before).unwrap());
        assert!(p_before.skip());
    }

    #[test]
    fn test_flex_items_are_inline_blocks() {
        let mut doc = parse_markup("<div><p>a</p><p>b</p></div>").unwrap();
        doc.add_css("div { display: flex; align-content: center; column-gap: 2 } p { float: left }").unwrap();
        let p = doc.theme(doc.find("p").unwrap());
        assert!(p.is_flex_item());
        assert!(p.is_inline_block());
        assert_eq!(p.floated(), None);
        assert_eq!(p.valign_fraction(), 0.5);
        assert_eq!(p.parent().unwrap().gap(&ctx()), (2, 0));
    }

    #[test]
    fn test_input_default_width() {
        let doc = parse_markup(r#"<input type="text" size="8"/><input type="checkbox"/>"#).unwrap();
        let inputs = doc.find_all("input");
        assert_eq!(doc.theme(inputs[0]).width(&ctx()), Some(8));
        assert_eq!(doc.theme(inputs[1]).width(&ctx()), None);
    }

    #[test]
    fn test_themes_are_memoised_per_generation() {
        let mut doc = parse_markup("<p>a</p>").unwrap();
        let p = doc.find("p").unwrap();
        let first = doc.theme(p);
        assert!(Arc::ptr_eq(&first, &doc.theme(p)));
        doc.add_css("p { color: red }").unwrap();
        let second = doc.theme(p);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.fg, Some(RgbaColor::rgb(255, 0, 0)));
    }
}
