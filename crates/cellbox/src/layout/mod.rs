//! Document layout.
//!
//! Layout turns a styled [`Document`] into rows of [`Strip`]s. Each box is
//! rendered in two phases: its content (flowed text, a table, a list item,
//! an image, ...) and then its formatting (overflow, height, alignment,
//! fill, border and padding, margins, link metadata), always in that order
//! so no step sees the decoration added by a later one.
//!
//! ## Architecture
//!
//! - **mod.rs**: the [`Layout`] pass and the per-box dispatch
//! - **whitespace.rs**: collapses document whitespace before layout
//! - **metrics.rs**: margins (with collapsing) and content widths
//! - **flow.rs**: inline line breaking, floats and block stacking
//! - **format.rs**: the formatting steps applied to every box
//! - **lists.rs**: list markers and `details`
//! - **tables.rs**: tables and the grid approximation
//! - **replaced.rs**: images and form controls
//!
//! Layout never fails. Anything it cannot make sense of renders as empty
//! content, and missing assets render as placeholders.

mod flow;
mod format;
mod lists;
mod metrics;
mod replaced;
mod tables;
mod whitespace;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use cellcss::types::{Position, WhiteSpace};
use log::{debug, trace};

use crate::config::RenderConfig;
use crate::document::{Document, NodeId, PseudoKind};
use crate::edges::Edges;
use crate::output::{MediaId, Overlay, RenderOutput};
use crate::segment::{LinkMeta, Segment, SegmentMeta, Style};
use crate::strip::Strip;
use crate::text;
use crate::theme::Theme;

pub(crate) use metrics::Metrics;

/// Room a container offers one of its children, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Space {
    pub width: usize,
    pub height: usize,
}

/// An absolutely or fixed positioned box waiting for the flow to finish.
#[derive(Debug)]
struct Positioned {
    node: NodeId,
    z_index: i32,
    anchors: Edges<bool>,
    offsets: Edges<i64>,
    fixed: bool,
    lines: Vec<Strip>,
}

/// State of one render pass.
pub(crate) struct Layout<'a> {
    doc: &'a Document,
    config: &'a RenderConfig,
    /// Whitespace-collapsed text of every text node.
    texts: HashMap<NodeId, String>,
    /// List item numbers.
    ordinals: HashMap<NodeId, i64>,
    /// Collapsed margins, by node and available width.
    margins: HashMap<(NodeId, usize), Edges<usize>>,
    positioned: Vec<Positioned>,
    media: BTreeMap<MediaId, (NodeId, String)>,
}

impl Document {
    /// Lays out the document at the configured viewport size.
    ///
    /// Adopts `config` first, so themes are recomputed when it differs from
    /// the last render's.
    pub fn render(&mut self, config: &RenderConfig) -> RenderOutput {
        self.set_config(config);
        let doc: &Document = self;
        let mut layout = Layout::new(doc);
        let lines = layout.render_root();
        let overlays = layout.place_overlays(&lines);
        debug!(
            "rendered {} line(s), {} overlay(s), {} media region(s) at {}x{}",
            lines.len(),
            overlays.len(),
            layout.media.len(),
            config.width,
            config.height
        );
        RenderOutput::new(lines, overlays, &layout.media)
    }
}

/// `None` for an empty style, so blanks drawn with it stay transparent.
pub(crate) fn paint(style: Style) -> Option<Style> {
    (!style.is_empty()).then_some(style)
}

impl<'a> Layout<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        let texts = whitespace::collapse(doc);
        let ordinals = lists::number_items(doc);
        Self {
            doc,
            config: doc.config(),
            texts,
            ordinals,
            margins: HashMap::new(),
            positioned: Vec::new(),
            media: BTreeMap::new(),
        }
    }

    fn viewport(&self) -> Space {
        Space {
            width: self.config.width,
            height: self.config.height,
        }
    }

    fn render_root(&mut self) -> Vec<Strip> {
        let lines = self.render_box(self.doc.root(), self.viewport());
        lines.into_iter().map(Strip::without_hanging).collect()
    }

    /// Renders one box, content and formatting, within `space`.
    pub(crate) fn render_box(&mut self, id: NodeId, space: Space) -> Vec<Strip> {
        let theme = self.doc.theme(id);
        if theme.skip() {
            return Vec::new();
        }
        if self.doc.is_text(id) {
            return self.render_text(id, &theme).into_iter().collect();
        }
        let metrics = self.metrics(id, &theme, space);
        trace!(
            "layout {id:?} <{}> in {}x{}: content width {}",
            theme.name, space.width, space.height, metrics.content_width
        );
        let content = self.render_content(id, &theme, &metrics, space);
        self.format(content, id, &theme, &metrics, space)
    }

    fn render_content(&mut self, id: NodeId, theme: &Arc<Theme>, metrics: &Metrics, space: Space) -> Vec<Strip> {
        let inner = Space {
            width: metrics.content_width,
            height: metrics.content_height.unwrap_or(space.height),
        };
        if theme.is_table() {
            return self.render_table(id, theme, metrics, inner);
        }
        if theme.is_grid() {
            return self.render_grid(id, theme, metrics, inner);
        }
        if theme.pseudo.is_some() {
            return self.render_generated(id, theme);
        }
        match self.doc.name(id) {
            Some("img" | "svg") => self.render_image(id, theme, metrics),
            Some("input") => self.render_input(id, theme, inner),
            Some("details") => self.render_details(id, theme, inner),
            _ => {
                let mut children = self.flow_children(id);
                if theme.is_list_item() {
                    self.insert_inside_marker(id, theme, &mut children);
                }
                self.render_flow(id, theme, &children, inner)
            }
        }
    }

    /// Text of `::before`, `::after` and `::marker` boxes.
    fn render_generated(&mut self, id: NodeId, theme: &Theme) -> Vec<Strip> {
        let text = match (theme.content(), theme.pseudo) {
            (Some(content), _) => content.to_string(),
            (None, Some(PseudoKind::Marker)) => match self.doc.parent(id) {
                Some(item) => self.marker_text(item),
                None => String::new(),
            },
            _ => String::new(),
        };
        if text.is_empty() {
            return Vec::new();
        }
        let text = theme.transform_text(&text);
        vec![Strip::from_segment(Segment::styled(text, theme.text_style()))]
    }

    /// A text node as a single run. Preformatted text keeps its newlines.
    fn render_text(&self, id: NodeId, theme: &Theme) -> Option<Strip> {
        let text = self.texts.get(&id)?;
        if text.is_empty() {
            return None;
        }
        let text = theme.transform_text(text);
        let strip = Strip::from_segment(Segment::styled(text, theme.text_style()));
        Some(match self.link_meta(id) {
            Some(meta) => strip.with_meta(&meta),
            None => strip,
        })
    }

    /// Generated `::before`, the children, then `::after`, in flow order.
    ///
    /// Children of flex and grid containers are ordered by `order`.
    pub(crate) fn flow_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self.doc.children(id).to_vec();
        let theme = self.doc.theme(id);
        if theme.is_flex() || theme.is_grid() {
            children.sort_by_key(|child| self.doc.theme(*child).order());
        }
        let before = self.doc.pseudo(id, PseudoKind::Before);
        let after = self.doc.pseudo(id, PseudoKind::After);
        before.into_iter().chain(children).chain(after).collect()
    }

    /// Whether a node takes up room in normal flow. Text that collapsed to
    /// nothing does not.
    pub(crate) fn in_flow(&self, id: NodeId) -> bool {
        if !self.doc.theme(id).in_flow() {
            return false;
        }
        if self.doc.is_text(id) {
            return self.texts.get(&id).is_some_and(|t| !t.is_empty());
        }
        true
    }

    /// Link metadata from the node or the inline elements around it.
    fn link_meta(&self, id: NodeId) -> Option<Arc<SegmentMeta>> {
        let mut link = LinkMeta::default();
        let mut current = Some(id);
        while let Some(node) = current {
            let inline = node == id || self.doc.is_text(node) || self.doc.theme(node).is_inline();
            if !inline {
                break;
            }
            if self.doc.attributes(node).is_some() {
                if link.href.is_none() && self.doc.name(node) == Some("a") {
                    link.href = self.doc.attribute(node, "href").map(|href| self.config.resolve_uri(href));
                }
                if link.title.is_none() {
                    link.title = self.doc.attribute(node, "title").map(str::to_string);
                }
                if link.alt.is_none() {
                    link.alt = self.doc.attribute(node, "alt").map(str::to_string);
                }
            }
            current = self.doc.parent(node);
        }
        if link == LinkMeta::default() {
            return None;
        }
        Some(Arc::new(SegmentMeta {
            link: Some(link),
            media: None,
        }))
    }

    /// Keeps an out-of-flow box for the overlay pass.
    fn position(&mut self, id: NodeId, theme: &Theme) {
        let viewport = self.viewport();
        let lines = self.render_box(id, viewport);
        if lines.is_empty() {
            return;
        }
        let across = self.config.length_context(Some(viewport.width as f64));
        let down = self.config.length_context(Some(viewport.height as f64));
        self.positioned.push(Positioned {
            node: id,
            z_index: theme.z_index(),
            anchors: theme.anchors(),
            offsets: theme.offsets(&across, &down),
            fixed: theme.position() == Position::Fixed,
            lines,
        });
    }

    /// Resolves positioned boxes against the finished flow: absolute boxes
    /// against the document, fixed boxes against the viewport.
    fn place_overlays(&mut self, flow: &[Strip]) -> Vec<Overlay> {
        let flow_width = text::max_width(flow).max(self.config.width);
        std::mem::take(&mut self.positioned)
            .into_iter()
            .map(|p| {
                let (height, width) = if p.fixed {
                    (self.config.height, self.config.width)
                } else {
                    (flow.len(), flow_width)
                };
                let box_height = p.lines.len();
                let box_width = text::max_width(&p.lines);
                let row = if p.anchors.top {
                    p.offsets.top
                } else if p.anchors.bottom {
                    height as i64 - box_height as i64 - p.offsets.bottom
                } else {
                    0
                };
                let col = if p.anchors.left {
                    p.offsets.left
                } else if p.anchors.right {
                    width as i64 - box_width as i64 - p.offsets.right
                } else {
                    0
                };
                Overlay {
                    node: p.node,
                    z_index: p.z_index,
                    row: row.max(0) as usize,
                    col: col.max(0) as usize,
                    width: box_width,
                    height: box_height,
                    lines: p.lines,
                }
            })
            .collect()
    }
}

/// Whether text in this white-space mode wraps at the line width.
pub(crate) fn wraps(white_space: WhiteSpace) -> bool {
    !matches!(white_space, WhiteSpace::Pre | WhiteSpace::Nowrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_markup;

    fn render(source: &str, width: usize) -> RenderOutput {
        let mut doc = parse_markup(source).unwrap();
        doc.render(&RenderConfig::default().with_viewport(width, 10))
    }

    #[test]
    fn test_render_empty_document() {
        let output = render("", 20);
        assert!(output.lines.is_empty());
        assert!(output.overlays.is_empty());
    }

    #[test]
    fn test_render_fills_viewport_width() {
        let output = render("<div>hello</div>", 12);
        assert_eq!(output.plain_lines(), vec!["hello       "]);
    }

    #[test]
    fn test_absolute_box_becomes_overlay() {
        let output = render(
            r#"<div>aaaa</div><div>bbbb</div><span style="position: absolute; top: 1; left: 2">X</span>"#,
            6,
        );
        assert_eq!(output.overlays.len(), 1);
        assert_eq!((output.overlays[0].row, output.overlays[0].col), (1, 2));
        assert_eq!(output.plain_lines(), vec!["aaaa  ", "bbXb  "]);
    }

    #[test]
    fn test_fixed_box_anchors_to_viewport_bottom() {
        let mut doc = parse_markup(r#"<p style="margin: 0">a</p><div style="position: fixed; bottom: 0; right: 0">Z</div>"#)
            .unwrap();
        let output = doc.render(&RenderConfig::default().with_viewport(5, 3));
        let overlay = &output.overlays[0];
        assert_eq!((overlay.row, overlay.col), (2, 4));
        assert_eq!(output.plain_lines().last().map(String::as_str), Some("    Z"));
    }

    #[test]
    fn test_link_regions() {
        let output = render(r#"<p style="margin: 0">see <a href="/docs" title="Docs">the docs</a></p>"#, 20);
        assert_eq!(output.links.len(), 1);
        let link = &output.links[0];
        assert_eq!(link.href.as_deref(), Some("/docs"));
        assert_eq!(link.title.as_deref(), Some("Docs"));
        assert_eq!((link.row, link.col, link.width), (0, 4, 8));
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let mut doc = parse_markup("<p>one <b>two</b></p><ul><li>three</li></ul>").unwrap();
        let config = RenderConfig::default().with_viewport(30, 10);
        let first = doc.render(&config);
        let second = doc.render(&config);
        assert_eq!(first, second);
    }
}
