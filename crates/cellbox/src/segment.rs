//! Segment: the atomic unit of rendered output.
//!
//! A Segment is a run of text sharing one [`Style`] and, optionally, the
//! metadata of the element it came from (a link target, a media region).
//! Segments are collected into [`Strip`](crate::strip::Strip)s, one per line.
//!
//! ## Pipeline Position
//! ```text
//! Document → Theme → layout → Strip[] → Segment[] → RenderOutput
//!                                          ↑
//!                                     You are here
//! ```

use std::fmt;
use std::sync::Arc;

use cellcss::types::RgbaColor;

use crate::grapheme::{byte_index_at_width, display_width};
use crate::output::MediaId;

/// Rendering style for a segment.
///
/// Styles are layered during layout: text takes its element's style, and
/// borders, padding and fill take the style of the box they belong to.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Style {
    /// Foreground (text) color.
    pub fg: Option<RgbaColor>,
    /// Background color.
    pub bg: Option<RgbaColor>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub overline: bool,
    pub strike: bool,
    pub blink: bool,
    /// Reverse video (swap fg/bg).
    pub reverse: bool,
    /// Drawn in the background colour only (`visibility: hidden`).
    pub hidden: bool,
}

impl Style {
    /// Creates a new style with the specified foreground color.
    pub fn with_fg(fg: RgbaColor) -> Self {
        Self {
            fg: Some(fg),
            ..Default::default()
        }
    }

    /// Creates a new style with the specified background color.
    pub fn with_bg(bg: RgbaColor) -> Self {
        Self {
            bg: Some(bg),
            ..Default::default()
        }
    }

    /// Creates a new style with both foreground and background colors.
    pub fn with_colors(fg: RgbaColor, bg: RgbaColor) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            ..Default::default()
        }
    }

    /// Returns true if no style properties are set.
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    /// Applies another style on top of this one.
    ///
    /// Colours set in `other` override those in `self`; flags are OR'd.
    pub fn apply(&self, other: &Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            overline: self.overline || other.overline,
            strike: self.strike || other.strike,
            blink: self.blink || other.blink,
            reverse: self.reverse || other.reverse,
            hidden: self.hidden || other.hidden,
        }
    }

    /// The style with its text decorations removed, used for padding runs
    /// so underlines do not extend past the text.
    pub fn without_decoration(&self) -> Style {
        Style {
            underline: false,
            overline: false,
            strike: false,
            ..*self
        }
    }
}

/// Formats the style as a space separated tag string.
///
/// ```
/// use cellbox::segment::Style;
/// use cellcss::types::RgbaColor;
///
/// let style = Style { bold: true, underline: true, ..Style::with_colors(RgbaColor::rgb(255, 0, 0), RgbaColor::black()) };
/// assert_eq!(style.to_string(), "fg:#ff0000 bg:#000000 bold underline");
/// ```
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(fg) = self.fg {
            parts.push(format!("fg:{}", fg.to_hex()));
        }
        if let Some(bg) = self.bg {
            parts.push(format!("bg:{}", bg.to_hex()));
        }
        let flags = [
            (self.bold, "bold"),
            (self.dim, "dim"),
            (self.italic, "italic"),
            (self.underline, "underline"),
            (self.overline, "overline"),
            (self.strike, "strike"),
            (self.blink, "blink"),
            (self.reverse, "reverse"),
            (self.hidden, "hidden"),
        ];
        parts.extend(flags.iter().filter(|(on, _)| *on).map(|(_, name)| name.to_string()));
        f.write_str(&parts.join(" "))
    }
}

/// Where a clickable span points.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LinkMeta {
    pub href: Option<String>,
    pub title: Option<String>,
    pub alt: Option<String>,
}

/// Out-of-band information carried by a segment.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SegmentMeta {
    pub link: Option<LinkMeta>,
    pub media: Option<MediaId>,
}

/// A styled text chunk.
///
/// # Examples
///
/// ```
/// use cellbox::segment::{Segment, Style};
/// use cellcss::types::RgbaColor;
///
/// let seg = Segment::new("Hello");
/// assert_eq!(seg.cell_length(), 5);
///
/// let styled = Segment::new("World").with_style(Style::with_fg(RgbaColor::rgb(255, 0, 0)));
/// assert!(styled.style().is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    text: String,
    style: Option<Style>,
    meta: Option<Arc<SegmentMeta>>,
}

impl Segment {
    /// Creates a new segment with the given text and no style.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            style: None,
            meta: None,
        }
    }

    /// Creates a new segment with the given text and style.
    pub fn styled<S: Into<String>>(text: S, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
            meta: None,
        }
    }

    /// Creates a blank segment of spaces with the given width and style.
    ///
    /// Unstyled blanks are transparent when pasted over other content.
    pub fn blank(width: usize, style: Option<Style>) -> Self {
        Self {
            text: " ".repeat(width),
            style,
            meta: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_meta(mut self, meta: Arc<SegmentMeta>) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn meta(&self) -> Option<&Arc<SegmentMeta>> {
        self.meta.as_ref()
    }

    /// Returns the foreground color, if any.
    pub fn fg(&self) -> Option<RgbaColor> {
        self.style.and_then(|s| s.fg)
    }

    /// Returns the background color, if any.
    pub fn bg(&self) -> Option<RgbaColor> {
        self.style.and_then(|s| s.bg)
    }

    /// Returns the terminal cell width of this segment.
    pub fn cell_length(&self) -> usize {
        display_width(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this is an unstyled run of spaces.
    pub fn is_transparent(&self) -> bool {
        self.style.is_none() && self.text.chars().all(|c| c == ' ')
    }

    /// Splits the segment at a cell position.
    ///
    /// Returns cells `0..cut` and `cut..end`. A wide grapheme straddling the
    /// cut goes to the right-hand segment.
    ///
    /// ```
    /// use cellbox::segment::Segment;
    ///
    /// let (left, right) = Segment::new("Hello").split_at(2);
    /// assert_eq!(left.text(), "He");
    /// assert_eq!(right.text(), "llo");
    /// ```
    pub fn split_at(&self, cut: usize) -> (Segment, Segment) {
        let byte = byte_index_at_width(&self.text, cut);
        let (left, right) = self.text.split_at(byte);
        (self.with_text(left), self.with_text(right))
    }

    /// A copy of this segment with different text.
    pub fn with_text(&self, text: impl Into<String>) -> Segment {
        Segment {
            text: text.into(),
            style: self.style,
            meta: self.meta.clone(),
        }
    }

    /// Applies a style layer on top of this segment's style.
    pub fn apply_style(&self, style: &Style) -> Segment {
        let style = match &self.style {
            Some(existing) => existing.apply(style),
            None => *style,
        };
        Segment {
            style: Some(style),
            ..self.clone()
        }
    }

    /// Layers this segment's style over `base`, so the segment's own
    /// colours win.
    pub fn under_style(&self, base: &Style) -> Segment {
        let style = match &self.style {
            Some(existing) => base.apply(existing),
            None => *base,
        };
        Segment {
            style: Some(style),
            ..self.clone()
        }
    }

    /// Fills in the metadata fields the segment does not carry yet.
    pub fn or_meta(&self, meta: &Arc<SegmentMeta>) -> Segment {
        let meta = match &self.meta {
            None => Arc::clone(meta),
            Some(own) if own.link.is_some() && own.media.is_some() => Arc::clone(own),
            Some(own) => Arc::new(SegmentMeta {
                link: own.link.clone().or_else(|| meta.link.clone()),
                media: own.media.or(meta.media),
            }),
        };
        Segment {
            meta: Some(meta),
            ..self.clone()
        }
    }
}
