//! The result of laying out a document.
//!
//! Besides the styled lines, a render reports where things ended up: image
//! regions for an external graphics layer, positioned overlays, and link
//! regions for hit-testing. Media and link positions are read back from the
//! segment metadata of the final lines, so they always agree with the text.

use std::collections::BTreeMap;
use std::fmt;

use crate::document::NodeId;
use crate::strip::Strip;
use crate::text;

/// Identifies one media region across a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(pub(crate) usize);

impl MediaId {
    pub(crate) fn for_node(node: NodeId) -> Self {
        Self(node.index())
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media-{}", self.0)
    }
}

/// Where an image landed, in cells from the top-left of the output.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaRecord {
    pub id: MediaId,
    pub node: NodeId,
    pub uri: String,
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

/// A clickable run of cells on one line: a link, or an element with a
/// title or alt text.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkRegion {
    pub href: Option<String>,
    pub title: Option<String>,
    pub alt: Option<String>,
    pub row: usize,
    pub col: usize,
    pub width: usize,
}

/// An absolutely or fixed positioned box, drawn over the flow.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub node: NodeId,
    pub z_index: i32,
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
    pub lines: Vec<Strip>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOutput {
    pub lines: Vec<Strip>,
    pub media: Vec<MediaRecord>,
    /// Sorted by z-index, lowest first; ties keep document order.
    pub overlays: Vec<Overlay>,
    pub links: Vec<LinkRegion>,
}

impl RenderOutput {
    /// Builds the output and its position records.
    ///
    /// `sources` names the node and URI behind each media id found in the
    /// lines.
    pub(crate) fn new(
        lines: Vec<Strip>,
        mut overlays: Vec<Overlay>,
        sources: &BTreeMap<MediaId, (NodeId, String)>,
    ) -> Self {
        overlays.sort_by_key(|o| o.z_index);
        let mut output = Self {
            lines,
            media: Vec::new(),
            overlays,
            links: Vec::new(),
        };
        let composite = output.composite();
        output.links = link_regions(&composite);
        output.media = media_regions(&composite, sources);
        output
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn width(&self) -> usize {
        text::max_width(&self.lines)
    }

    /// The flow with every overlay pasted on top, in z-index order.
    pub fn composite(&self) -> Vec<Strip> {
        let mut base = self.lines.clone();
        let bottom = self
            .overlays
            .iter()
            .map(|o| o.row + o.lines.len())
            .max()
            .unwrap_or(0);
        if bottom > base.len() {
            base.resize(bottom, Strip::new());
        }
        self.overlays.iter().fold(base, |lines, overlay| {
            text::paste(&overlay.lines, &lines, overlay.row, overlay.col, true)
        })
    }

    /// The composited text without styles, one string per line.
    pub fn plain_lines(&self) -> Vec<String> {
        self.composite().iter().map(Strip::text).collect()
    }

    /// The composited text without styles, trailing spaces trimmed.
    pub fn to_plain_text(&self) -> String {
        self.plain_lines()
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn link_regions(lines: &[Strip]) -> Vec<LinkRegion> {
    let mut regions: Vec<LinkRegion> = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        let mut col = 0;
        for segment in line.segments() {
            let width = segment.cell_length();
            if let Some(link) = segment.meta().and_then(|m| m.link.as_ref()) {
                match regions.last_mut() {
                    Some(last)
                        if last.row == row
                            && last.col + last.width == col
                            && last.href == link.href
                            && last.title == link.title =>
                    {
                        last.width += width;
                    }
                    _ => regions.push(LinkRegion {
                        href: link.href.clone(),
                        title: link.title.clone(),
                        alt: link.alt.clone(),
                        row,
                        col,
                        width,
                    }),
                }
            }
            col += width;
        }
    }
    regions
}

fn media_regions(lines: &[Strip], sources: &BTreeMap<MediaId, (NodeId, String)>) -> Vec<MediaRecord> {
    // id -> (top, left, bottom, right)
    let mut extents: BTreeMap<MediaId, (usize, usize, usize, usize)> = BTreeMap::new();
    for (row, line) in lines.iter().enumerate() {
        let mut col = 0;
        for segment in line.segments() {
            let width = segment.cell_length();
            if let Some(id) = segment.meta().and_then(|m| m.media) {
                let extent = extents.entry(id).or_insert((row, col, row, col + width));
                extent.0 = extent.0.min(row);
                extent.1 = extent.1.min(col);
                extent.2 = extent.2.max(row);
                extent.3 = extent.3.max(col + width);
            }
            col += width;
        }
    }
    extents
        .into_iter()
        .filter_map(|(id, (top, left, bottom, right))| {
            let (node, uri) = sources.get(&id)?;
            Some(MediaRecord {
                id,
                node: *node,
                uri: uri.clone(),
                row: top,
                col: left,
                width: right - left,
                height: bottom - top + 1,
            })
        })
        .collect()
}
