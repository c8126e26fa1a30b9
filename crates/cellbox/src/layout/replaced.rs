//! Replaced elements: images and form controls.

use std::sync::Arc;

use log::debug;

use super::{Layout, Metrics, Space};
use crate::document::{AssetState, NodeId};
use crate::output::MediaId;
use crate::segment::{Segment, SegmentMeta};
use crate::strip::Strip;
use crate::text;
use crate::theme::Theme;

/// Shown in place of an image that did not load.
const IMAGE_PLACEHOLDER: &str = "🌄";

/// Narrower images show the placeholder glyph alone.
const MIN_CAPTION_WIDTH: usize = 7;

impl Layout<'_> {
    /// An image: its converted text when the asset loaded, else a
    /// placeholder with the alt text.
    pub(super) fn render_image(&mut self, id: NodeId, theme: &Theme, metrics: &Metrics) -> Vec<Strip> {
        let style = theme.text_style();
        let width = metrics.content_width;
        let uri = self.doc.image_source(id);

        if let Some(uri) = uri.as_deref() {
            if let Some(AssetState::Loaded { rendered, .. }) = self.doc.asset(uri) {
                let media = MediaId::for_node(id);
                self.media.insert(media, (id, uri.to_string()));
                let meta = Arc::new(SegmentMeta {
                    link: None,
                    media: Some(media),
                });
                let lines: Vec<Strip> = match rendered {
                    Some(rendered) => rendered
                        .trim_end_matches('\n')
                        .split('\n')
                        .map(|line| Strip::from_segment(Segment::styled(line, style)).crop(0, width))
                        .collect(),
                    None => vec![self.image_placeholder(id, uri, width, theme)],
                };
                let lines = text::pad(&lines, None, Some(style));
                return lines.iter().map(|line| line.with_meta(&meta)).collect();
            }
        }
        debug!("image {id:?} has no loaded source; drawing a placeholder");
        vec![self.image_placeholder(id, uri.as_deref().unwrap_or_default(), width, theme)]
    }

    fn image_placeholder(&self, id: NodeId, uri: &str, width: usize, theme: &Theme) -> Strip {
        let style = theme.text_style();
        let mut strip = Strip::from_segment(Segment::styled(IMAGE_PLACEHOLDER, style));
        if width >= MIN_CAPTION_WIDTH {
            let file = uri.split(['?', '#']).next().unwrap_or(uri).rsplit('/').next().unwrap_or_default();
            let caption = self
                .doc
                .attribute(id, "alt")
                .filter(|alt| !alt.trim().is_empty())
                .or((!file.is_empty()).then_some(file))
                .unwrap_or("Image");
            strip.push(Segment::styled(format!(" {caption}"), style));
        }
        strip
    }

    /// A form control showing its value, else its placeholder.
    pub(super) fn render_input(&mut self, id: NodeId, theme: &Theme, space: Space) -> Vec<Strip> {
        let value = ["value", "placeholder"]
            .into_iter()
            .find_map(|name| self.doc.attribute(id, name).filter(|v| !v.is_empty()))
            .unwrap_or(" ");
        let strip = Strip::from_segment(Segment::styled(theme.transform_text(value), theme.text_style()));
        if space.width == 0 {
            return vec![strip];
        }
        text::wrap(&strip, space.width, true)
    }
}
