//! Normal flow: inline line breaking, floats and block stacking.
//!
//! Inline content is cut into word tokens that fill a running line until
//! the next token does not fit. Inline blocks are single tokens several rows
//! tall; they join the line at a baseline picked by their vertical
//! alignment. Blocks flush the line and stack below it.
//!
//! Floats are held per side and handed out one row at a time next to
//! whatever the flow emits, until the flow finishes and drains them.

use std::collections::VecDeque;

use cellcss::types::{Float, TextAlign};
use log::trace;

use super::{Layout, Space, paint, wraps};
use crate::document::NodeId;
use crate::segment::Style;
use crate::strip::Strip;
use crate::text;
use crate::theme::Theme;

/// The line buffer of one block container.
#[derive(Debug)]
pub(crate) struct Flow {
    width: usize,
    fill: Option<Style>,
    align: TextAlign,
    output: Vec<Strip>,
    /// Rows of the line being built; more than one once an inline block
    /// taller than a row joins it.
    line: Vec<Strip>,
    left: usize,
    baseline: usize,
    /// Whether the last token was text, whose trailing space is trimmed at
    /// the end of the line.
    ends_in_text: bool,
    floats_left: VecDeque<Strip>,
    floats_right: VecDeque<Strip>,
    /// Set by a `br`; a second one in a row adds an empty line.
    broke: bool,
}

impl Flow {
    pub(crate) fn new(width: usize, fill: Option<Style>, align: TextAlign) -> Self {
        Self {
            width,
            fill,
            align,
            output: Vec::new(),
            line: Vec::new(),
            left: 0,
            baseline: 0,
            ends_in_text: false,
            floats_left: VecDeque::new(),
            floats_right: VecDeque::new(),
            broke: false,
        }
    }

    fn float_widths(&self) -> (usize, usize) {
        (
            self.floats_left.front().map_or(0, Strip::cell_length),
            self.floats_right.front().map_or(0, Strip::cell_length),
        )
    }

    /// Width left between the floats.
    pub(crate) fn line_width(&self) -> usize {
        let (left, right) = self.float_widths();
        self.width.saturating_sub(left + right)
    }

    /// Adds one word of text.
    pub(crate) fn add_word(&mut self, word: Strip) {
        let blank = word.text().trim().is_empty();
        let fits = self.left + word.rstrip().cell_length() <= self.line_width();
        if !self.line.is_empty() && !fits {
            self.flush();
        }
        if self.line.is_empty() && blank {
            return;
        }
        self.add_rows(vec![word], 0.0);
        self.ends_in_text = true;
    }

    /// Adds an unbreakable run of text, such as one line of `pre`.
    pub(crate) fn add_run(&mut self, run: Strip) {
        if run.is_empty() {
            return;
        }
        self.add_rows(vec![run], 0.0);
        self.ends_in_text = true;
    }

    /// Adds an inline block, wrapping first when it does not fit.
    pub(crate) fn add_inline_block(&mut self, rows: Vec<Strip>, valign: f64) {
        if rows.is_empty() {
            return;
        }
        let width = text::max_width(&rows);
        if !self.line.is_empty() && self.left + width > self.line_width() {
            self.flush();
        }
        self.add_rows(rows, valign);
        self.ends_in_text = false;
    }

    fn add_rows(&mut self, rows: Vec<Strip>, valign: f64) {
        self.broke = false;
        let width = text::max_width(&rows);
        let baseline = (valign * (rows.len().saturating_sub(1)) as f64) as usize;
        if self.line.is_empty() {
            self.line = rows;
            self.baseline = baseline;
        } else if self.line.len() == 1 && rows.len() == 1 {
            if let (Some(line), Some(row)) = (self.line.first_mut(), rows.first()) {
                line.extend(row);
            }
        } else {
            let (line, baseline) = text::concat(&self.line, &rows, self.baseline, baseline, self.fill);
            self.line = line;
            self.baseline = baseline;
        }
        self.left += width;
    }

    /// Ends the current line.
    pub(crate) fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let mut rows = std::mem::take(&mut self.line);
        if self.ends_in_text {
            if let Some(row) = rows.get_mut(self.baseline) {
                *row = row.rstrip();
            }
        }
        let rows = text::pad(&rows, None, self.fill);
        for row in rows {
            self.emit(row);
        }
        self.left = 0;
        self.baseline = 0;
        self.ends_in_text = false;
    }

    /// A forced line break.
    pub(crate) fn line_break(&mut self) {
        if !self.line.is_empty() {
            self.flush();
        } else if self.broke {
            self.emit(Strip::new());
        }
        self.broke = true;
    }

    /// Stacks a block below the current line.
    pub(crate) fn add_block(&mut self, rows: Vec<Strip>) {
        self.flush();
        self.broke = false;
        for row in rows {
            self.emit(row);
        }
    }

    pub(crate) fn add_float(&mut self, side: Float, rows: Vec<Strip>, style: Option<Style>) {
        if rows.is_empty() {
            return;
        }
        let rows = text::pad(&rows, None, style);
        let (existing, new_is_left) = match side {
            Float::Right => (&mut self.floats_right, true),
            _ => (&mut self.floats_left, false),
        };
        let old: Vec<Strip> = existing.drain(..).collect();
        let old_width = text::max_width(&old);
        let new_width = text::max_width(&rows);
        let height = old.len().max(rows.len());
        for i in 0..height {
            let new = rows.get(i).cloned().unwrap_or_else(|| Strip::blank(new_width, style));
            let previous = old.get(i).cloned().unwrap_or_else(|| Strip::blank(old_width, None));
            let (mut first, second) = if new_is_left { (new, previous) } else { (previous, new) };
            first.extend(&second);
            existing.push_back(first);
        }
    }

    /// Writes one row, with a row of each float beside it.
    fn emit(&mut self, row: Strip) {
        if self.floats_left.is_empty() && self.floats_right.is_empty() {
            self.output.push(row);
            return;
        }
        let middle = self.line_width();
        let mut composed = self.floats_left.pop_front().unwrap_or_default();
        composed.extend(&row.text_align(self.align, middle, self.fill));
        if let Some(right) = self.floats_right.pop_front() {
            composed.extend(&right);
        }
        self.output.push(composed);
    }

    /// Ends the flow and draws the remaining float rows.
    pub(crate) fn finish(mut self) -> Vec<Strip> {
        self.flush();
        while !self.floats_left.is_empty() || !self.floats_right.is_empty() {
            self.emit(Strip::new());
        }
        self.output
    }
}

impl Layout<'_> {
    /// Lays out `children` in normal flow inside the content box of `id`.
    pub(crate) fn render_flow(&mut self, id: NodeId, theme: &Theme, children: &[NodeId], space: Space) -> Vec<Strip> {
        let mut flow = Flow::new(space.width, paint(theme.fill_style()), theme.text_align());
        let mut items = Vec::new();
        self.inline_items(children, &mut items);
        for child in items {
            self.flow_item(&mut flow, child, space);
        }
        let lines = flow.finish();
        trace!("flow {id:?}: {} line(s) at width {}", lines.len(), space.width);
        lines
    }

    /// Expands inline elements into the items they contain, so their text
    /// breaks as part of the surrounding line.
    fn inline_items(&self, children: &[NodeId], out: &mut Vec<NodeId>) {
        for &child in children {
            let theme = self.doc.theme(child);
            if theme.skip() {
                continue;
            }
            if !self.doc.is_text(child) && theme.in_flow() && theme.is_inline() {
                let nested = self.flow_children(child);
                if !nested.is_empty() {
                    self.inline_items(&nested, out);
                    continue;
                }
            }
            out.push(child);
        }
    }

    fn flow_item(&mut self, flow: &mut Flow, child: NodeId, space: Space) {
        let theme = self.doc.theme(child);
        if self.doc.name(child) == Some("br") {
            flow.line_break();
            return;
        }
        if theme.position().is_out_of_flow() {
            self.position(child, &theme);
            return;
        }
        if self.doc.is_text(child) {
            self.flow_text(flow, child, &theme);
            return;
        }
        let inline_space = Space {
            width: flow.width,
            height: space.height,
        };
        if let Some(side) = theme.floated() {
            let rows = self.render_box(child, inline_space);
            let style = theme.parent().and_then(|p| paint(p.fill_style()));
            flow.add_float(side, rows, style);
            return;
        }
        if theme.is_inline() {
            let rows = self.render_box(child, inline_space);
            match rows.as_slice() {
                [row] => {
                    for word in text::split_words(row) {
                        flow.add_word(word);
                    }
                }
                _ => flow.add_inline_block(rows, theme.valign_fraction()),
            }
            return;
        }
        if theme.is_inline_block() {
            let rows = self.render_box(child, inline_space);
            flow.add_inline_block(rows, theme.valign_fraction());
            return;
        }
        flow.flush();
        let block_space = Space {
            width: flow.line_width(),
            height: space.height,
        };
        let rows = self.render_box(child, block_space);
        flow.add_block(rows);
    }

    fn flow_text(&self, flow: &mut Flow, child: NodeId, theme: &Theme) {
        let Some(run) = self.render_text(child, theme) else {
            return;
        };
        let white_space = theme.white_space();
        if theme.preformatted() {
            let pieces = run.text().split('\n').map(str::len).collect::<Vec<_>>();
            let mut start = 0;
            for (i, len) in pieces.into_iter().enumerate() {
                if i > 0 {
                    flow.line_break();
                }
                let piece = crop_bytes(&run, start, start + len);
                start += len + 1;
                if wraps(white_space) {
                    for word in text::split_words(&piece) {
                        flow.add_word(word);
                    }
                } else {
                    flow.add_run(piece);
                }
            }
        } else if wraps(white_space) {
            for word in text::split_words(&run) {
                flow.add_word(word);
            }
        } else {
            flow.add_run(run);
        }
    }
}

/// The part of a strip covering bytes `start..end` of its text.
fn crop_bytes(strip: &Strip, start: usize, end: usize) -> Strip {
    let mut out = Strip::new();
    let mut offset = 0;
    for segment in strip.segments() {
        let text = segment.text();
        let seg_end = offset + text.len();
        let from = start.max(offset);
        let to = end.min(seg_end);
        if from < to {
            out.push(segment.with_text(&text[from - offset..to - offset]));
        }
        offset = seg_end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Strip]) -> Vec<String> {
        lines.iter().map(Strip::text).collect()
    }

    fn words(flow: &mut Flow, text: &str) {
        for word in text::split_words(&Strip::plain(text)) {
            flow.add_word(word);
        }
    }

    #[test]
    fn test_words_wrap_at_width() {
        let mut flow = Flow::new(10, None, TextAlign::Left);
        words(&mut flow, "the quick brown fox");
        assert_eq!(texts(&flow.finish()), ["the quick", "brown fox"]);
    }

    #[test]
    fn test_trailing_space_does_not_force_a_wrap() {
        let mut flow = Flow::new(9, None, TextAlign::Left);
        words(&mut flow, "the quick brown");
        assert_eq!(texts(&flow.finish()), ["the quick", "brown"]);
    }

    #[test]
    fn test_inline_block_sits_on_the_baseline() {
        let mut flow = Flow::new(20, None, TextAlign::Left);
        words(&mut flow, "ab ");
        flow.add_inline_block(vec![Strip::plain("┌┐"), Strip::plain("└┘")], 1.0);
        words(&mut flow, " cd");
        assert_eq!(texts(&flow.finish()), ["   ┌┐   ", "ab └┘ cd"]);
    }

    #[test]
    fn test_double_break_adds_empty_line() {
        let mut flow = Flow::new(10, None, TextAlign::Left);
        words(&mut flow, "a");
        flow.line_break();
        flow.line_break();
        words(&mut flow, "b");
        assert_eq!(texts(&flow.finish()), ["a", "", "b"]);
    }

    #[test]
    fn test_text_flows_around_floats() {
        let mut flow = Flow::new(10, None, TextAlign::Left);
        flow.add_float(Float::Right, vec![Strip::plain("[R]"), Strip::plain("[R]")], None);
        words(&mut flow, "aaa bbb ccc");
        assert_eq!(texts(&flow.finish()), ["aaa bbb[R]", "ccc    [R]"]);
    }

    #[test]
    fn test_left_floats_line_up() {
        let mut flow = Flow::new(6, None, TextAlign::Left);
        flow.add_float(Float::Left, vec![Strip::plain("A")], None);
        flow.add_float(Float::Left, vec![Strip::plain("B"), Strip::plain("B")], None);
        let lines = flow.finish();
        assert_eq!(texts(&lines), ["AB    ", " B    "]);
    }

    #[test]
    fn test_crop_bytes() {
        let strip = Strip::plain("ab\ncd");
        assert_eq!(crop_bytes(&strip, 3, 5).text(), "cd");
    }
}
