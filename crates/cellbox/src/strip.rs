//! Strip: one rendered line of Segments.
//!
//! Every block the layout engine produces is a `Vec<Strip>` whose strips all
//! share one cell width. Strips support cropping, alignment and
//! style layering.
//!
//! A strip may also carry *hanging* content: an outside list marker that
//! belongs in the margin to its left. The hanging content travels with the
//! strip until some ancestor prepends a prefix (margin, padding or border)
//! wide enough to hold it, at which point it is drawn into the rightmost
//! cells of that prefix.
//!
//! ## Pipeline Position
//! ```text
//! Document → Theme → layout → Strip[] → Segment[] → RenderOutput
//!                               ↑
//!                          You are here
//! ```

use std::sync::Arc;

use cellcss::types::TextAlign;
use smallvec::{SmallVec, smallvec};

use crate::segment::{Segment, SegmentMeta, Style};

/// Inline storage for 2 segments covers most lines: a single styled word
/// run, or text plus its padding.
pub type SegmentVec = SmallVec<[Segment; 2]>;

/// A horizontal line of segments with a cached cell width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strip {
    segments: SegmentVec,
    cell_length: usize,
    hanging: Option<Box<Strip>>,
}

impl Strip {
    /// Creates an empty strip.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self::from_smallvec(SegmentVec::from_vec(segments))
    }

    pub fn from_segment(segment: Segment) -> Self {
        Self::from_smallvec(smallvec![segment])
    }

    /// A line of plain text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_segment(Segment::new(text))
    }

    /// A strip of `width` spaces.
    pub fn blank(width: usize, style: Option<Style>) -> Self {
        if width == 0 {
            return Strip::new();
        }
        Self::from_segment(Segment::blank(width, style))
    }

    fn from_smallvec(segments: SegmentVec) -> Self {
        let segments: SegmentVec = segments.into_iter().filter(|s| !s.is_empty()).collect();
        let cell_length = segments.iter().map(Segment::cell_length).sum();
        Self {
            segments,
            cell_length,
            hanging: None,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn cell_length(&self) -> usize {
        self.cell_length
    }

    pub fn is_empty(&self) -> bool {
        self.cell_length == 0
    }

    /// The plain text of the strip, without styles.
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    /// Content waiting to be drawn into the margin left of this line.
    pub fn hanging(&self) -> Option<&Strip> {
        self.hanging.as_deref()
    }

    pub fn with_hanging(mut self, hanging: Strip) -> Strip {
        self.hanging = Some(Box::new(hanging));
        self
    }

    /// Drops any unresolved hanging content.
    pub fn without_hanging(mut self) -> Strip {
        self.hanging = None;
        self
    }

    /// Appends a segment in place.
    pub fn push(&mut self, segment: Segment) {
        if segment.is_empty() {
            return;
        }
        self.cell_length += segment.cell_length();
        self.segments.push(segment);
    }

    /// Appends the segments of another strip in place.
    pub fn extend(&mut self, other: &Strip) {
        for segment in &other.segments {
            self.push(segment.clone());
        }
    }

    /// Extracts cells `start..end`.
    ///
    /// Hanging content survives only when the crop keeps the left edge.
    pub fn crop(&self, start: usize, end: usize) -> Strip {
        let end = end.min(self.cell_length);
        if start >= end {
            return self.keep_hanging(start, Strip::new());
        }
        if start == 0 && end == self.cell_length {
            return self.clone();
        }

        let mut taken = SegmentVec::new();
        let mut pos = 0;
        for segment in &self.segments {
            if pos >= end {
                break;
            }
            let len = segment.cell_length();
            let seg_end = pos + len;
            if seg_end > start {
                let (_, tail) = segment.split_at(start.saturating_sub(pos));
                let keep = end.min(seg_end) - pos.max(start);
                let (piece, _) = tail.split_at(keep);
                taken.push(piece);
            }
            pos = seg_end;
        }
        self.keep_hanging(start, Strip::from_smallvec(taken))
    }

    fn keep_hanging(&self, start: usize, mut strip: Strip) -> Strip {
        if start == 0 {
            strip.hanging = self.hanging.clone();
        }
        strip
    }

    /// Splits the strip at the given cell positions.
    pub fn divide(&self, cuts: &[usize]) -> Vec<Strip> {
        let mut parts = Vec::with_capacity(cuts.len() + 1);
        let mut last = 0;
        for &cut in cuts {
            if cut > last && cut <= self.cell_length {
                parts.push(self.crop(last, cut));
                last = cut;
            }
        }
        if last < self.cell_length || parts.is_empty() {
            parts.push(self.crop(last, self.cell_length));
        }
        parts
    }

    /// Layers `style` over every segment.
    pub fn apply_style(&self, style: &Style) -> Strip {
        self.map_segments(|s| s.apply_style(style))
    }

    /// Puts `style` underneath every segment; the segments' own colours win.
    pub fn under_style(&self, style: &Style) -> Strip {
        self.map_segments(|s| s.under_style(style))
    }

    /// Attaches metadata to every segment that has none.
    pub fn with_meta(&self, meta: &Arc<SegmentMeta>) -> Strip {
        self.map_segments(|s| s.or_meta(meta))
    }

    fn map_segments(&self, f: impl Fn(&Segment) -> Segment) -> Strip {
        let mut strip = Strip::from_smallvec(self.segments.iter().map(f).collect());
        strip.hanging = self.hanging.clone();
        strip
    }

    /// Merges adjacent segments with identical style and metadata.
    pub fn simplify(&self) -> Strip {
        let mut merged: SegmentVec = SegmentVec::new();
        for segment in &self.segments {
            match merged.last_mut() {
                Some(last) if last.style() == segment.style() && last.meta() == segment.meta() => {
                    let text = format!("{}{}", last.text(), segment.text());
                    *last = last.with_text(text);
                }
                _ => merged.push(segment.clone()),
            }
        }
        let mut strip = Strip::from_smallvec(merged);
        strip.hanging = self.hanging.clone();
        strip
    }

    /// Concatenates strips left to right. The first strip's hanging content
    /// is kept.
    pub fn join(strips: impl IntoIterator<Item = Strip>) -> Strip {
        let mut iter = strips.into_iter();
        let Some(mut joined) = iter.next() else {
            return Strip::new();
        };
        for strip in iter {
            joined.extend(&strip);
        }
        joined
    }

    /// Draws `prefix` to the left of this strip.
    ///
    /// Hanging content that fits inside the prefix replaces its rightmost
    /// cells; otherwise it stays attached to the result.
    pub fn prepend(&self, prefix: &Strip) -> Strip {
        let mut body = self.clone();
        let hanging = body.hanging.take();
        let mut joined = match hanging {
            Some(hang) if hang.cell_length <= prefix.cell_length => {
                let mut left = prefix.crop(0, prefix.cell_length - hang.cell_length);
                left.extend(&hang);
                left
            }
            other => {
                let mut left = prefix.clone().without_hanging();
                left.hanging = other;
                left
            }
        };
        joined.extend(&body);
        joined
    }

    /// Pads with blanks or crops so the strip is exactly `length` cells.
    pub fn adjust_cell_length(&self, length: usize, pad_style: Option<Style>) -> Strip {
        if self.cell_length >= length {
            return self.crop(0, length);
        }
        let mut padded = self.clone();
        padded.push(Segment::blank(length - self.cell_length, pad_style));
        padded
    }

    /// Aligns the strip within `width` cells.
    ///
    /// Content wider than `width` is cropped. `Start` and `End` behave as
    /// `Left` and `Right`.
    pub fn text_align(&self, align: TextAlign, width: usize, pad_style: Option<Style>) -> Strip {
        if self.cell_length >= width {
            return self.crop(0, width);
        }
        let gap = width - self.cell_length;
        let (left, right) = match align {
            TextAlign::Left | TextAlign::Start => (0, gap),
            TextAlign::Right | TextAlign::End => (gap, 0),
            TextAlign::Center => (gap / 2, gap - gap / 2),
            TextAlign::Justify => return self.justify(width, pad_style),
        };
        let mut aligned = Strip::blank(left, pad_style);
        aligned.hanging = self.hanging.clone();
        aligned.extend(self);
        aligned.push(Segment::blank(right, pad_style));
        aligned
    }

    /// Spreads extra cells across the spaces of the line, rightmost gaps
    /// first.
    pub fn justify(&self, width: usize, pad_style: Option<Style>) -> Strip {
        if self.cell_length >= width {
            return self.crop(0, width);
        }
        let gaps: usize = self
            .segments
            .iter()
            .map(|seg| seg.text().matches(' ').count())
            .sum();
        if gaps == 0 {
            return self.text_align(TextAlign::Left, width, pad_style);
        }

        let extra = width - self.cell_length;
        let mut gap_index = 0;
        let mut justified = Strip::new();
        justified.hanging = self.hanging.clone();
        for segment in &self.segments {
            let mut word = String::new();
            for ch in segment.text().chars() {
                if ch != ' ' {
                    word.push(ch);
                    continue;
                }
                justified.push(segment.with_text(std::mem::take(&mut word)));
                // Gap i receives one extra cell per full round plus one more
                // when it falls among the rightmost `extra % gaps` gaps.
                let from_right = gaps - 1 - gap_index;
                let share = extra / gaps + usize::from(from_right < extra % gaps);
                justified.push(segment.with_text(" ".repeat(1 + share)));
                gap_index += 1;
            }
            justified.push(segment.with_text(word));
        }
        justified
    }

    /// Removes trailing spaces.
    pub fn rstrip(&self) -> Strip {
        let mut segments: SegmentVec = self.segments.clone();
        while let Some(last) = segments.pop() {
            let trimmed = last.text().trim_end_matches(' ');
            if !trimmed.is_empty() {
                let kept = last.with_text(trimmed);
                segments.push(kept);
                break;
            }
        }
        let mut strip = Strip::from_smallvec(segments);
        strip.hanging = self.hanging.clone();
        strip
    }

    /// Removes leading spaces.
    pub fn lstrip(&self) -> Strip {
        let mut segments = self.segments.iter();
        let mut kept = SegmentVec::new();
        for segment in segments.by_ref() {
            let trimmed = segment.text().trim_start_matches(' ');
            if !trimmed.is_empty() {
                kept.push(segment.with_text(trimmed));
                break;
            }
        }
        kept.extend(segments.cloned());
        let mut strip = Strip::from_smallvec(kept);
        strip.hanging = self.hanging.clone();
        strip
    }
}

impl FromIterator<Segment> for Strip {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Strip::from_smallvec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcss::types::RgbaColor;

    fn red() -> Style {
        Style::with_fg(RgbaColor::rgb(255, 0, 0))
    }

    #[test]
    fn strip_new_is_empty() {
        let strip = Strip::new();
        assert!(strip.is_empty());
        assert_eq!(strip.cell_length(), 0);
    }

    #[test]
    fn strip_from_segments_counts_cells() {
        let strip = Strip::from_segments(vec![Segment::new("ab"), Segment::new("日")]);
        assert_eq!(strip.cell_length(), 4);
        assert_eq!(strip.text(), "ab日");
    }

    #[test]
    fn strip_crop_middle() {
        let strip = Strip::plain("Hello World");
        assert_eq!(strip.crop(2, 7).text(), "llo W");
    }

    #[test]
    fn strip_crop_across_segments() {
        let strip = Strip::from_segments(vec![
            Segment::new("Hello"),
            Segment::styled(" ", red()),
            Segment::new("World"),
        ]);
        let cropped = strip.crop(3, 8);
        assert_eq!(cropped.text(), "lo Wo");
        assert_eq!(cropped.segments().len(), 3);
    }

    #[test]
    fn strip_crop_out_of_bounds() {
        assert!(Strip::plain("Hi").crop(5, 10).is_empty());
        assert_eq!(Strip::plain("Hi").crop(0, 10).text(), "Hi");
    }

    #[test]
    fn strip_crop_keeps_hanging_only_at_left_edge() {
        let strip = Strip::plain("item").with_hanging(Strip::plain("• "));
        assert!(strip.crop(0, 2).hanging().is_some());
        assert!(strip.crop(1, 3).hanging().is_none());
    }

    #[test]
    fn strip_divide() {
        let parts = Strip::plain("abcdef").divide(&[2, 4]);
        let texts: Vec<_> = parts.iter().map(Strip::text).collect();
        assert_eq!(texts, ["ab", "cd", "ef"]);
    }

    #[test]
    fn strip_simplify_merges_same_style() {
        let strip = Strip::from_segments(vec![
            Segment::styled("a", red()),
            Segment::styled("b", red()),
            Segment::new("c"),
        ]);
        let simple = strip.simplify();
        assert_eq!(simple.segments().len(), 2);
        assert_eq!(simple.segments()[0].text(), "ab");
    }

    #[test]
    fn strip_adjust_cell_length_pad_and_crop() {
        assert_eq!(Strip::plain("Hi").adjust_cell_length(5, None).text(), "Hi   ");
        assert_eq!(Strip::plain("Hello").adjust_cell_length(3, None).text(), "Hel");
    }

    #[test]
    fn strip_text_align_variants() {
        let strip = Strip::plain("ab");
        assert_eq!(strip.text_align(TextAlign::Left, 6, None).text(), "ab    ");
        assert_eq!(strip.text_align(TextAlign::Right, 6, None).text(), "    ab");
        assert_eq!(strip.text_align(TextAlign::Center, 7, None).text(), "  ab   ");
        assert_eq!(strip.text_align(TextAlign::End, 4, None).text(), "  ab");
    }

    #[test]
    fn strip_text_align_too_wide_crops() {
        assert_eq!(Strip::plain("Hello").text_align(TextAlign::Center, 3, None).text(), "Hel");
    }

    #[test]
    fn strip_justify_fills_rightmost_gaps_first() {
        let strip = Strip::plain("a b c");
        assert_eq!(strip.justify(8, None).text(), "a  b   c");
        assert_eq!(strip.justify(8, None).cell_length(), 8);
    }

    #[test]
    fn strip_justify_without_spaces_aligns_left() {
        assert_eq!(Strip::plain("abc").justify(5, None).text(), "abc  ");
    }

    #[test]
    fn strip_rstrip_and_lstrip() {
        let strip = Strip::from_segments(vec![Segment::new("  hi "), Segment::new("  ")]);
        assert_eq!(strip.rstrip().text(), "  hi");
        assert_eq!(strip.lstrip().text(), "hi   ");
        assert!(Strip::plain("   ").rstrip().is_empty());
    }

    #[test]
    fn strip_prepend_draws_hanging_into_prefix() {
        let strip = Strip::plain("item").with_hanging(Strip::plain("1. "));
        let placed = strip.prepend(&Strip::blank(4, None));
        assert_eq!(placed.text(), " 1. item");
        assert!(placed.hanging().is_none());
    }

    #[test]
    fn strip_prepend_carries_hanging_when_prefix_too_narrow() {
        let strip = Strip::plain("item").with_hanging(Strip::plain("1. "));
        let carried = strip.prepend(&Strip::blank(1, None));
        assert_eq!(carried.text(), " item");
        assert_eq!(carried.hanging().map(Strip::text).as_deref(), Some("1. "));
    }

    #[test]
    fn strip_join_keeps_first_hanging() {
        let first = Strip::plain("a").with_hanging(Strip::plain("•"));
        let joined = Strip::join([first, Strip::plain("b")]);
        assert_eq!(joined.text(), "ab");
        assert!(joined.hanging().is_some());
    }
}
