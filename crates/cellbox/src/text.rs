//! Operations on blocks of styled lines.
//!
//! A block is a `Vec<Strip>`, one strip per terminal row. The layout engine
//! builds every box out of these operations: wrap the text, align it, pad it,
//! put a border round it, then paste or concatenate the result into its
//! parent's block.

use cellcss::types::{TextAlign, VerticalAlign};

use crate::edges::Edges;
use crate::grapheme::display_width;
use crate::grid_style::{GridRow, GridStyle, thin_grid};
use crate::segment::{Segment, Style};
use crate::strip::Strip;

/// Drawn at the end of a truncated line.
pub const ELLIPSIS: &str = "…";

/// Width of the widest line in a block.
pub fn max_width(lines: &[Strip]) -> usize {
    lines.iter().map(Strip::cell_length).max().unwrap_or(0)
}

/// Splits a line into words. A word ends after whitespace, `-` or `/`, and
/// keeps the separator.
///
/// ```
/// use cellbox::strip::Strip;
/// use cellbox::text::split_words;
///
/// let words: Vec<String> = split_words(&Strip::plain("a well-known path/to")).iter().map(Strip::text).collect();
/// assert_eq!(words, ["a ", "well-", "known ", "path/", "to"]);
/// ```
pub fn split_words(line: &Strip) -> Vec<Strip> {
    let mut words = Vec::new();
    let mut word = Strip::new();
    for segment in line.segments() {
        let mut start = 0;
        for (idx, ch) in segment.text().char_indices() {
            if ch.is_whitespace() || ch == '-' || ch == '/' {
                let end = idx + ch.len_utf8();
                word.push(segment.with_text(&segment.text()[start..end]));
                words.push(std::mem::take(&mut word));
                start = end;
            }
        }
        word.push(segment.with_text(&segment.text()[start..]));
    }
    if !word.is_empty() {
        words.push(word);
    }
    words
}

/// Cuts a line down to `width` cells, ending it with `placeholder`.
///
/// Lines that already fit are returned unchanged.
pub fn truncate(line: &Strip, width: usize, placeholder: &str) -> Strip {
    if line.cell_length() <= width {
        return line.clone();
    }
    let marker_width = display_width(placeholder);
    let keep = width.saturating_sub(marker_width);
    let mut cut = line.crop(0, keep);
    let style = line
        .crop(keep, keep + 1)
        .segments()
        .first()
        .and_then(|s| s.style().copied());
    if marker_width <= width {
        cut.push(Segment::blank(0, style).with_text(placeholder));
    }
    cut
}

/// Wraps one line at `width` cells.
///
/// Words that do not fit move to the next row. A word longer than a whole
/// row is truncated with [`ELLIPSIS`]. Leading whitespace is dropped at the
/// start of every continuation row.
///
/// ```
/// use cellbox::strip::Strip;
/// use cellbox::text::wrap;
///
/// let rows: Vec<String> = wrap(&Strip::plain("This is a long sentence"), 7, true).iter().map(Strip::text).collect();
/// assert_eq!(rows, ["This", "is a", "long", "senten…"]);
/// ```
pub fn wrap(line: &Strip, width: usize, strip_trailing: bool) -> Vec<Strip> {
    if line.cell_length() <= width {
        return vec![line.clone()];
    }
    let finish = |row: Strip| if strip_trailing { row.rstrip() } else { row };

    let mut rows = Vec::new();
    let mut row = Strip::new();
    let mut left = 0;
    for word in split_words(line) {
        let blank = word.text().trim().is_empty();
        if left + word.cell_length() > width && left > 0 {
            if blank && !strip_trailing {
                row.extend(&word.crop(0, width - left.min(width)));
            }
            rows.push(finish(std::mem::take(&mut row)));
            left = 0;
            if blank && !strip_trailing {
                continue;
            }
        }
        let word = if left == 0 { word.lstrip() } else { word };
        let word_width = word.cell_length();
        if left == 0 && word_width > width {
            let trimmed = word.rstrip();
            if trimmed.cell_length() <= width {
                row.extend(&word.crop(0, width));
            } else {
                row.extend(&truncate(&trimmed, width, ELLIPSIS));
            }
        } else {
            row.extend(&word);
        }
        left += word_width;
    }
    rows.push(finish(row));
    rows
}

/// Wraps every line of a block.
pub fn wrap_lines(lines: &[Strip], width: usize, strip_trailing: bool) -> Vec<Strip> {
    lines
        .iter()
        .flat_map(|line| wrap(line, width, strip_trailing))
        .collect()
}

/// Aligns every line within `width` cells, or within the widest line when
/// `width` is `None`. Over-long lines are truncated.
pub fn align(lines: &[Strip], how: TextAlign, width: Option<usize>, style: Option<Style>) -> Vec<Strip> {
    let width = width.unwrap_or_else(|| max_width(lines));
    let pad_style = style.map(|s| s.without_decoration());
    lines
        .iter()
        .map(|line| {
            if line.cell_length() > width {
                truncate(line, width, ELLIPSIS)
            } else {
                line.text_align(how, width, pad_style)
            }
        })
        .collect()
}

/// Pads a block with blank rows to `height`.
pub fn valign(lines: &[Strip], how: VerticalAlign, height: usize, style: Option<Style>) -> Vec<Strip> {
    let width = max_width(lines);
    let remaining = height.saturating_sub(lines.len());
    let above = match how {
        VerticalAlign::Middle => remaining / 2,
        VerticalAlign::Bottom | VerticalAlign::TextBottom => remaining,
        _ => 0,
    };
    let blank = Strip::blank(width, style);
    let mut block = vec![blank.clone(); above];
    block.extend(lines.iter().cloned());
    block.resize(lines.len() + remaining, blank);
    block
}

/// Fills every line with blanks up to `width` (default: the widest line).
pub fn pad(lines: &[Strip], width: Option<usize>, style: Option<Style>) -> Vec<Strip> {
    let width = width.unwrap_or_else(|| max_width(lines));
    let style = style.map(|s| s.without_decoration());
    lines
        .iter()
        .map(|line| {
            if line.cell_length() < width {
                line.adjust_cell_length(width, style)
            } else {
                line.clone()
            }
        })
        .collect()
}

/// Prefixes every line with `margin`.
pub fn indent(lines: &[Strip], margin: &Strip, skip_first: bool) -> Vec<Strip> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 && skip_first {
                line.clone()
            } else {
                line.prepend(margin)
            }
        })
        .collect()
}

/// Draws `top` over `bottom` with its top-left corner at (`row`, `col`).
///
/// With `transparent`, unstyled blanks in `top` let `bottom` show through.
/// Rows of `top` below the end of `bottom` are discarded.
pub fn paste(top: &[Strip], bottom: &[Strip], row: usize, col: usize, transparent: bool) -> Vec<Strip> {
    bottom
        .iter()
        .enumerate()
        .map(|(y, under)| {
            let Some(over) = y.checked_sub(row).and_then(|i| top.get(i)) else {
                return under.clone();
            };
            let width = over.cell_length();
            let mut line = under.crop(0, col).adjust_cell_length(col, None);
            if transparent {
                let mut x = col;
                for segment in over.segments() {
                    let len = segment.cell_length();
                    if segment.is_transparent() {
                        line.extend(&under.crop(x, x + len).adjust_cell_length(len, None));
                    } else {
                        line.push(segment.clone());
                    }
                    x += len;
                }
            } else {
                line.extend(over);
            }
            line.extend(&under.crop(col + width, under.cell_length()));
            line
        })
        .collect()
}

/// Joins two blocks side by side, lining up row `baseline_a` of `a` with row
/// `baseline_b` of `b`. Returns the joined block and its baseline.
pub fn concat(
    a: &[Strip],
    b: &[Strip],
    baseline_a: usize,
    baseline_b: usize,
    style: Option<Style>,
) -> (Vec<Strip>, usize) {
    let rows = |block: &[Strip]| block.len().max(1);
    let below_a = rows(a).saturating_sub(baseline_a + 1);
    let below_b = rows(b).saturating_sub(baseline_b + 1);
    let baseline = baseline_a.max(baseline_b);
    let below = below_a.max(below_b);
    let height = baseline + 1 + below;

    let place = |block: &[Strip], base: usize| {
        let mut placed = vec![Strip::new(); baseline - base];
        placed.extend(block.iter().cloned());
        placed.resize(height, Strip::new());
        placed
    };
    let left = pad(&place(a, baseline_a), Some(max_width(a)), style);
    let right = place(b, baseline_b);
    let joined = left
        .into_iter()
        .zip(right)
        .map(|(mut l, r)| {
            l.extend(&r);
            l
        })
        .collect();
    (joined, baseline)
}

/// How a box is framed by [`add_border`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub grid: GridStyle,
    /// Which edges get a border line.
    pub visibility: Edges<bool>,
    /// Style of the border glyphs on each edge.
    pub border_style: Edges<Option<Style>>,
    pub padding: Edges<usize>,
    pub padding_style: Option<Style>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            grid: thin_grid(),
            visibility: Edges::all(true),
            border_style: Edges::all(None),
            padding: Edges::all(0),
            padding_style: None,
        }
    }
}

impl Frame {
    /// Padding only, no border lines.
    pub fn spacing(padding: Edges<usize>, style: Option<Style>) -> Self {
        Self {
            visibility: Edges::all(false),
            padding,
            padding_style: style,
            ..Self::default()
        }
    }

    /// Cells the frame adds left and right of the content.
    pub fn horizontal(&self) -> usize {
        usize::from(self.visibility.left) + usize::from(self.visibility.right) + self.padding.horizontal()
    }

    /// Rows the frame adds above and below the content.
    pub fn vertical(&self) -> usize {
        usize::from(self.visibility.top) + usize::from(self.visibility.bottom) + self.padding.vertical()
    }
}

/// Encloses a block in padding and a border.
///
/// `width` is the total width including the frame; `None` fits the frame
/// around the widest line. `style` fills short content lines.
///
/// ```
/// use cellbox::strip::Strip;
/// use cellbox::text::{add_border, Frame};
///
/// let boxed: Vec<String> = add_border(&[Strip::plain("hi")], None, None, &Frame::default()).iter().map(Strip::text).collect();
/// assert_eq!(boxed, ["┌──┐", "│hi│", "└──┘"]);
/// ```
pub fn add_border(lines: &[Strip], width: Option<usize>, style: Option<Style>, frame: &Frame) -> Vec<Strip> {
    let inner = match width {
        Some(w) => w.saturating_sub(frame.horizontal()),
        None => max_width(lines),
    };
    let span = inner + frame.padding.horizontal();
    let base = style.map(|s| s.without_decoration()).unwrap_or_default();
    let edge_style = |edge: Option<Style>| base.apply(&edge.unwrap_or_default());
    let glyphs = |ch: char, count: usize| ch.to_string().repeat(count);
    let vis = frame.visibility;

    let side = |ch: char, edge: Option<Style>, on: bool| {
        if on {
            Strip::from_segment(Segment::styled(ch.to_string(), edge_style(edge)))
        } else {
            Strip::new()
        }
    };
    let mid = frame.grid.mid();
    let left_side = side(mid.left, frame.border_style.left, vis.left);
    let right_side = side(mid.right, frame.border_style.right, vis.right);
    let padding_style = frame.padding_style.map(|s| base.apply(&s)).or(style.map(|_| base));

    let rule = |row: GridRow, edge: Option<Style>| {
        let mut strip = side(row.left, edge, vis.left);
        strip.push(Segment::styled(glyphs(row.mid, span), edge_style(edge)));
        strip.extend(&side(row.right, edge, vis.right));
        strip
    };
    let spacer = || {
        let mut strip = left_side.clone();
        strip.extend(&Strip::blank(span, padding_style));
        strip.extend(&right_side);
        strip
    };

    let mut output = Vec::with_capacity(lines.len() + frame.vertical());
    if vis.top {
        output.push(rule(frame.grid.top(), frame.border_style.top));
    }
    output.extend((0..frame.padding.top).map(|_| spacer()));
    for line in align(lines, TextAlign::Left, Some(inner), style) {
        let mut prefix = left_side.clone();
        prefix.extend(&Strip::blank(frame.padding.left, padding_style));
        let mut row = line.prepend(&prefix);
        row.extend(&Strip::blank(frame.padding.right, padding_style));
        row.extend(&right_side);
        output.push(row);
    }
    output.extend((0..frame.padding.bottom).map(|_| spacer()));
    if vis.bottom {
        output.push(rule(frame.grid.bottom(), frame.border_style.bottom));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_style::LineStyle;
    use crate::grid_style::Mask;

    fn texts(lines: &[Strip]) -> Vec<String> {
        lines.iter().map(Strip::text).collect()
    }

    fn plain(lines: &[&str]) -> Vec<Strip> {
        lines.iter().map(|l| Strip::plain(*l)).collect()
    }

    #[test]
    fn test_wrap_fits_untouched() {
        assert_eq!(texts(&wrap(&Strip::plain("short"), 10, true)), ["short"]);
    }

    #[test]
    fn test_wrap_width_bound() {
        let line = Strip::plain("the quick brown fox jumps over a supercalifragilistic dog");
        for width in 3..20 {
            for row in wrap(&line, width, false) {
                assert!(row.cell_length() <= width, "width {width}: {:?}", row.text());
            }
        }
    }

    #[test]
    fn test_wrap_breaks_after_hyphen() {
        assert_eq!(texts(&wrap(&Strip::plain("well-known"), 6, true)), ["well-", "known"]);
    }

    #[test]
    fn test_wrap_wide_characters() {
        assert_eq!(texts(&wrap(&Strip::plain("日本 語文"), 4, true)), ["日本", "語文"]);
    }

    #[test]
    fn test_truncate_with_placeholder() {
        assert_eq!(truncate(&Strip::plain("abcdef"), 4, ELLIPSIS).text(), "abc…");
        assert_eq!(truncate(&Strip::plain("abcd"), 4, ELLIPSIS).text(), "abcd");
        assert_eq!(truncate(&Strip::plain("abcdef"), 4, "▹").cell_length(), 4);
    }

    #[test]
    fn test_align_center_and_truncate() {
        let lines = plain(&["ab", "abcdefgh"]);
        assert_eq!(texts(&align(&lines, TextAlign::Center, Some(6), None)), ["  ab  ", "abcde…"]);
    }

    #[test]
    fn test_valign_middle() {
        let lines = plain(&["x"]);
        assert_eq!(texts(&valign(&lines, VerticalAlign::Middle, 3, None)), [" ", "x", " "]);
        assert_eq!(texts(&valign(&lines, VerticalAlign::Bottom, 2, None)), [" ", "x"]);
    }

    #[test]
    fn test_paste_opaque_and_transparent() {
        let bottom = plain(&["......", "......"]);
        let top = vec![Strip::from_segments(vec![
            Segment::styled("A", Style::default()),
            Segment::blank(1, None),
            Segment::styled("B", Style::default()),
        ])];
        assert_eq!(texts(&paste(&top, &bottom, 1, 2, false)), ["......", "..A B."]);
        assert_eq!(texts(&paste(&top, &bottom, 1, 2, true)), ["......", "..A.B."]);
    }

    #[test]
    fn test_paste_beyond_short_line_pads() {
        let bottom = plain(&["ab"]);
        let top = plain(&["X"]);
        assert_eq!(texts(&paste(&top, &bottom, 0, 4, false)), ["ab  X"]);
    }

    #[test]
    fn test_concat_aligns_baselines() {
        let a = plain(&["a1", "a2"]);
        let b = plain(&["b"]);
        let (joined, baseline) = concat(&a, &b, 1, 0, None);
        assert_eq!(texts(&joined), ["a1", "a2b"]);
        assert_eq!(baseline, 1);

        let (joined, baseline) = concat(&b, &a, 0, 0, None);
        assert_eq!(texts(&joined), ["ba1", " a2"]);
        assert_eq!(baseline, 0);
    }

    #[test]
    fn test_add_border_with_padding() {
        let frame = Frame {
            padding: Edges::new(0, 1, 0, 1),
            ..Frame::default()
        };
        let boxed = add_border(&plain(&["hi"]), Some(8), None, &frame);
        assert_eq!(texts(&boxed), ["┌──────┐", "│ hi   │", "└──────┘"]);
    }

    #[test]
    fn test_add_border_partial_visibility() {
        let frame = Frame {
            grid: LineStyle::Thick.grid(Mask::OUTER),
            visibility: Edges::new(false, false, true, false),
            ..Frame::default()
        };
        let boxed = add_border(&plain(&["title"]), None, None, &frame);
        assert_eq!(texts(&boxed), ["title", "━━━━━"]);
    }

    #[test]
    fn test_add_border_resolves_hanging_marker() {
        let frame = Frame::spacing(Edges::new(0, 0, 0, 3), None);
        let line = Strip::plain("item").with_hanging(Strip::plain("• "));
        let boxed = add_border(&[line], None, None, &frame);
        assert_eq!(texts(&boxed), [" • item"]);
    }

    #[test]
    fn test_indent() {
        let lines = plain(&["a", "b"]);
        assert_eq!(texts(&indent(&lines, &Strip::plain("> "), true)), ["a", "> b"]);
    }
}
