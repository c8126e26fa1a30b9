//! Box metrics: collapsed margins and the width left for content.

use cellcss::types::{BoxSizing, LengthContext};

use super::{Layout, Space};
use crate::document::NodeId;
use crate::edges::Edges;
use crate::theme::Theme;

/// Sizes of one box, resolved against the space its parent offers.
#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    /// Lengths measured across the parent's content width.
    pub across: LengthContext,
    /// Lengths measured down the parent's content height.
    pub down: LengthContext,
    pub margin: Edges<usize>,
    pub padding: Edges<usize>,
    pub border: Edges<bool>,
    /// The `width` property, if set.
    pub width: Option<usize>,
    pub content_width: usize,
    pub content_height: Option<usize>,
}

impl Layout<'_> {
    pub(crate) fn metrics(&mut self, id: NodeId, theme: &Theme, space: Space) -> Metrics {
        let across = self.config.length_context(Some(space.width as f64));
        let down = self.config.length_context(Some(space.height as f64));
        let margin = self.margin(id, space.width);
        let padding = theme.padding(&across);
        let border = theme.border_visibility(&across);
        let width = theme.width(&across);

        let mut border_box = theme.box_sizing() == BoxSizing::BorderBox;
        let mut value = match width {
            Some(width) => width as i64,
            None => {
                // Blocks without a width fill the space, frame included.
                if theme.is_blocky() || theme.is_inline_block() {
                    border_box = true;
                }
                space.width as i64 - margin.left as i64 - margin.right as i64
            }
        };
        if theme.is_table_cell() {
            border_box = false;
        }
        if border_box {
            value -= padding.horizontal() as i64;
            value -= i64::from(border.left) + i64::from(border.right);
        }
        match (theme.max_width(&across), theme.min_width(&across)) {
            (Some(max), _) if (max as i64) < value => value = max as i64,
            (_, Some(min)) if min as i64 > value => value = min as i64,
            _ => {}
        }

        Metrics {
            across,
            down,
            margin,
            padding,
            border,
            width,
            content_width: value.max(0) as usize,
            content_height: theme.height(&down),
        }
    }

    /// Margins after collapsing against parent, children and siblings.
    ///
    /// Memoised per available width; siblings share it, so the previous
    /// sibling's margin is always a cache hit while its parent lays out.
    pub(crate) fn margin(&mut self, id: NodeId, width: usize) -> Edges<usize> {
        if let Some(margin) = self.margins.get(&(id, width)) {
            return *margin;
        }
        let previous = self.previous_in_flow(id);
        if let Some(previous) = previous {
            if !self.margins.contains_key(&(previous, width)) {
                // Fill the cache front to back so the lookups below never
                // recurse down a long run of siblings.
                for sibling in self.siblings_before(id) {
                    self.margin(sibling, width);
                }
            }
        }

        let doc = self.doc;
        let theme = doc.theme(id);
        let ctx = self.config.length_context(Some(width as f64));
        let mut margin = theme.base_margin(&ctx);
        let is_root = id == doc.root();

        if theme.is_blocky() && !(is_root && self.config.collapse_root_margin) {
            let border = theme.border_visibility(&ctx);
            let padding = theme.padding(&ctx);

            // An empty rule, like `hr`
            if border.top && !border.bottom && theme.height(&ctx).is_none() {
                margin.top = 0;
                margin.bottom = 0;
            }

            if let Some(parent) = doc.parent(id) {
                let parent_theme = doc.theme(parent);
                if parent_theme.is_blocky() {
                    let parent_border = parent_theme.border_visibility(&ctx);
                    let parent_padding = parent_theme.padding(&ctx);
                    if previous.is_none() && !parent_border.top && parent_padding.top == 0 {
                        margin.top = 0;
                    }
                    if self.next_in_flow(id).is_none() && !parent_border.bottom && parent_padding.bottom == 0 {
                        margin.bottom = 0;
                    }
                }
            }

            // Margins of the first and last child move onto this box.
            let flow: Vec<NodeId> = self
                .flow_children(id)
                .into_iter()
                .filter(|child| self.in_flow(*child))
                .collect();
            if let Some(first) = flow.first().map(|c| doc.theme(*c)).filter(|t| t.is_blocky()) {
                if !border.top && padding.top == 0 {
                    margin.top = margin.top.max(first.base_margin(&ctx).top);
                }
            }
            if let Some(last) = flow.last().map(|c| doc.theme(*c)).filter(|t| t.is_blocky()) {
                if !border.bottom && padding.bottom == 0 {
                    margin.bottom = margin.bottom.max(last.base_margin(&ctx).bottom);
                }
            }

            if let Some(previous) = previous.filter(|p| doc.theme(*p).is_blocky()) {
                let above = self.margins.get(&(previous, width)).map_or(0, |m| m.bottom);
                margin.top = margin.top.saturating_sub(above);
            }
        }

        if theme.is_inline() {
            margin.top = 0;
            margin.bottom = 0;
        }
        if theme.is_flex_item() {
            if let Some(parent) = theme.parent() {
                let (column_gap, row_gap) = parent.gap(&ctx);
                margin.right += column_gap;
                margin.bottom += row_gap;
            }
        }

        self.margins.insert((id, width), margin);
        margin
    }

    /// In-flow siblings of `id`, in flow order, up to but excluding `id`.
    fn siblings_before(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.doc.parent(id) else {
            return Vec::new();
        };
        self.flow_children(parent)
            .into_iter()
            .take_while(|sibling| *sibling != id)
            .filter(|sibling| self.in_flow(*sibling))
            .collect()
    }

    pub(crate) fn previous_in_flow(&self, id: NodeId) -> Option<NodeId> {
        self.siblings_before(id).pop()
    }

    pub(crate) fn next_in_flow(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.doc.parent(id)?;
        self.flow_children(parent)
            .into_iter()
            .skip_while(|sibling| *sibling != id)
            .skip(1)
            .find(|sibling| self.in_flow(*sibling))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RenderConfig;
    use crate::layout::{Layout, Space};
    use crate::markup::parse_markup;

    #[test]
    fn test_adjacent_margins_collapse() {
        let mut doc = parse_markup(r#"<div><p style="margin: 2 0">a</p><p style="margin: 3 0">b</p></div>"#).unwrap();
        doc.set_config(&RenderConfig::default());
        let paragraphs = doc.find_all("p");
        let mut layout = Layout::new(&doc);
        let first = layout.margin(paragraphs[0], 80);
        let second = layout.margin(paragraphs[1], 80);
        // The first child's top margin moves to the div.
        assert_eq!((first.top, first.bottom), (0, 2));
        // 3 - 2 leaves one more row above the second paragraph.
        assert_eq!((second.top, second.bottom), (1, 0));
    }

    #[test]
    fn test_parent_takes_child_margin() {
        let mut doc = parse_markup(r#"<section><div style="margin-top: 2">x</div></section>"#).unwrap();
        doc.set_config(&RenderConfig::default());
        let section = doc.find("section").unwrap();
        let mut layout = Layout::new(&doc);
        assert_eq!(layout.margin(section, 80).top, 2);
    }

    #[test]
    fn test_padding_blocks_collapse() {
        let mut doc =
            parse_markup(r#"<section style="padding-top: 1"><div style="margin-top: 2">x</div></section>"#).unwrap();
        doc.set_config(&RenderConfig::default());
        let div = doc.find("div").unwrap();
        let mut layout = Layout::new(&doc);
        assert_eq!(layout.margin(div, 80).top, 2);
    }

    #[test]
    fn test_inline_boxes_have_no_vertical_margin() {
        let mut doc = parse_markup(r#"<p>a <span style="margin: 2">b</span></p>"#).unwrap();
        doc.set_config(&RenderConfig::default());
        let span = doc.find("span").unwrap();
        let mut layout = Layout::new(&doc);
        let margin = layout.margin(span, 80);
        assert_eq!((margin.top, margin.right, margin.bottom, margin.left), (0, 2, 0, 2));
    }

    #[test]
    fn test_content_width_subtracts_frame() {
        let mut doc = parse_markup(r#"<div style="padding: 0 2; border: 1px solid; margin: 0 3">x</div>"#).unwrap();
        doc.set_config(&RenderConfig::default());
        let div = doc.find("div").unwrap();
        let theme = doc.theme(div);
        let mut layout = Layout::new(&doc);
        let metrics = layout.metrics(div, &theme, Space { width: 40, height: 10 });
        assert_eq!(metrics.content_width, 40 - 6 - 4 - 2);
    }
}
