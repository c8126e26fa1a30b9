//! Formatting applied to every laid out box.
//!
//! The steps run in a fixed order: overflow truncation, height clamping,
//! content alignment, width fill, border and padding, the outside list
//! marker, relative offsets, margins and finally link metadata. Each step
//! only sees the result of the ones before it.

use cellcss::types::{Overflow, Position, TextAlign};

use super::{Layout, Metrics, Space, paint};
use crate::document::NodeId;
use crate::edges::Edges;
use crate::strip::Strip;
use crate::text::{self, Frame};
use crate::theme::Theme;

impl Layout<'_> {
    pub(crate) fn format(
        &mut self,
        mut lines: Vec<Strip>,
        id: NodeId,
        theme: &Theme,
        metrics: &Metrics,
        space: Space,
    ) -> Vec<Strip> {
        let blocky = theme.is_blocky();
        let inline_block = theme.is_inline_block();
        let fill = paint(theme.fill_style());
        let content_width = metrics.content_width;

        // Overflow
        let max_width = theme.max_width(&metrics.across);
        if !theme.is_inline() && (!theme.preformatted() || max_width.is_some()) {
            let marker = match theme.overflow_x() {
                Overflow::Visible => None,
                Overflow::Hidden | Overflow::Clip => Some(String::new()),
                Overflow::Auto | Overflow::Scroll => Some(self.config.overflow_marker.to_string()),
            };
            if let Some(marker) = marker {
                lines = lines
                    .iter()
                    .map(|line| text::truncate(line, content_width, &marker))
                    .collect();
            }
        }

        // Height
        let clip = theme.overflow_y() != Overflow::Visible;
        let target = match (theme.min_height(&metrics.down), theme.max_height(&metrics.down)) {
            (Some(min), _) if min > lines.len() => Some(min),
            (_, Some(max)) if max < lines.len() => Some(max),
            _ => metrics.content_height,
        };
        if let Some(target) = target {
            if clip {
                lines.truncate(target);
            }
            if blocky && lines.len() < target {
                lines.resize(target, Strip::new());
            }
        }

        // Alignment
        let align = theme.text_align();
        if blocky && align != TextAlign::Left && !lines.is_empty() {
            let width = if inline_block { None } else { Some(content_width) };
            lines = text::align(&lines, align, width, fill);
        }

        // Fill
        if !lines.is_empty() && ((blocky && !theme.is_table()) || inline_block) {
            let width = if blocky || metrics.width.is_some() {
                content_width
            } else {
                text::max_width(&lines)
            };
            lines = text::pad(&lines, Some(width), fill);
        }

        // Border and padding
        if blocky || inline_block {
            let visibility = if theme.is_table() {
                Edges::all(false)
            } else {
                metrics.border
            };
            if metrics.padding.any() || visibility.any() {
                let frame = Frame {
                    grid: theme.border_grid(&metrics.across),
                    visibility,
                    border_style: theme.border_style(),
                    padding: metrics.padding,
                    padding_style: fill,
                };
                let width = lines.is_empty().then(|| content_width + frame.horizontal());
                lines = text::add_border(&lines, width, fill, &frame);
            }
        }

        if lines.is_empty() {
            return lines;
        }

        if let Some(marker) = self.outside_marker(id, theme) {
            if let Some(first) = lines.first_mut() {
                *first = std::mem::take(first).with_hanging(marker);
            }
        }

        if theme.position() == Position::Relative {
            lines = self.shift(lines, theme, metrics);
        }

        // Margins
        if !theme.position().is_out_of_flow() {
            let parent_fill = theme.parent().and_then(|p| paint(p.fill_style()));
            let margin = metrics.margin;
            let block_align = theme.block_align();
            if block_align != TextAlign::Left {
                lines = text::align(&lines, block_align, Some(space.width), parent_fill);
                if margin.top > 0 || margin.bottom > 0 {
                    let vertical = Edges::new(margin.top, 0, margin.bottom, 0);
                    lines = text::add_border(&lines, None, parent_fill, &Frame::spacing(vertical, parent_fill));
                }
            } else if margin.any() {
                lines = text::add_border(&lines, None, parent_fill, &Frame::spacing(margin, parent_fill));
            }
        }

        if !self.doc.is_text(id) {
            if let Some(meta) = self.link_meta(id) {
                lines = lines.iter().map(|line| line.with_meta(&meta)).collect();
            }
        }
        lines
    }

    /// Moves a relatively positioned box within its own footprint.
    fn shift(&self, lines: Vec<Strip>, theme: &Theme, metrics: &Metrics) -> Vec<Strip> {
        let offsets = theme.offsets(&metrics.across, &metrics.down);
        let margin = theme.base_margin(&metrics.across);
        let dx = (offsets.left - margin.left as i64) - (offsets.right - margin.right as i64);
        let dy = (offsets.top - margin.top as i64) - (offsets.bottom - margin.bottom as i64);
        if dx == 0 && dy == 0 {
            return lines;
        }
        let width = text::max_width(&lines);
        let height = lines.len();
        let moved = lines.iter().map(|line| {
            if dx >= 0 {
                let mut shifted = Strip::blank(dx as usize, None);
                shifted.extend(line);
                shifted.crop(0, width)
            } else {
                line.crop(dx.unsigned_abs() as usize, width).adjust_cell_length(width, None)
            }
        });
        let blank = || Strip::blank(width, None);
        if dy >= 0 {
            let down = (dy as usize).min(height);
            std::iter::repeat_with(blank).take(down).chain(moved).take(height).collect()
        } else {
            let up = (dy.unsigned_abs() as usize).min(height);
            moved.skip(up).chain(std::iter::repeat_with(blank)).take(height).collect()
        }
    }
}
