//! Tables and the grid approximation, both drawn by [`crate::table`].

use std::collections::HashMap;

use cellcss::types::{Axis, GridPlacement, Unit};
use log::trace;

use super::{Layout, Metrics, Space, paint};
use crate::document::NodeId;
use crate::edges::Edges;
use crate::grapheme::display_width;
use crate::line_style::LineStyle;
use crate::strip::Strip;
use crate::table::{Cell, RowCol, Table, TableWidth};
use crate::theme::Theme;

impl Layout<'_> {
    /// Rows of a table in display order: `thead`, `tbody`, bare `tr`, then
    /// `tfoot`, wherever they appear in the source.
    fn table_rows(&self, table: NodeId) -> Vec<NodeId> {
        let doc = self.doc;
        let children: Vec<NodeId> = doc.element_children(table).collect();
        let rows_of = |parent: NodeId| -> Vec<NodeId> {
            doc.element_children(parent).filter(|r| doc.name(*r) == Some("tr")).collect()
        };
        let mut rows = Vec::new();
        for section in ["thead", "tbody"] {
            for &child in children.iter().filter(|c| doc.name(**c) == Some(section)) {
                rows.extend(rows_of(child));
            }
        }
        rows.extend(rows_of(table));
        for &child in children.iter().filter(|c| doc.name(**c) == Some("tfoot")) {
            rows.extend(rows_of(child));
        }
        rows
    }

    pub(super) fn render_table(&mut self, id: NodeId, theme: &Theme, metrics: &Metrics, space: Space) -> Vec<Strip> {
        let doc = self.doc;
        let ctx = self.config.length_context(Some(space.width as f64));
        let frame = usize::from(metrics.border.left) + usize::from(metrics.border.right);
        let outer = metrics.content_width + frame;

        let mut table = Table::new();
        table.width = TableWidth {
            min: theme.min_width(&metrics.across),
            preferred: metrics.width.map(|_| outer),
            max: Some(outer),
        };
        table.expand = metrics.width.is_some();
        table.min_col_width = self.config.min_column_width;
        table.align = theme.text_align();
        table.style = paint(theme.fill_style());
        table.padding = Edges::all(0);
        table.border_line = theme.border_line(&metrics.across);
        table.border_style = theme.border_style().top;
        table.border_visibility = theme.border_visibility(&metrics.across);
        table.collapse_empty_borders = theme.border_collapse();

        let mut cells: Vec<(usize, NodeId)> = Vec::new();
        let rows = self.table_rows(id).into_iter().filter(|tr| !doc.theme(*tr).skip());
        for (y, tr) in rows.enumerate() {
            let row_theme = doc.theme(tr);
            *table.row_mut(y) = RowCol {
                align: Some(row_theme.text_align()),
                style: paint(row_theme.fill_style()),
                padding: None,
                border_line: row_theme.border_line(&ctx),
                border_style: row_theme.border_style().top,
                border_visibility: row_theme.border_visibility(&ctx),
            };
            for td in doc.element_children(tr).filter(|c| matches!(doc.name(*c), Some("td" | "th"))) {
                let cell_theme = doc.theme(td);
                if cell_theme.skip() {
                    continue;
                }
                let span = |name| {
                    doc.attribute(td, name)
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(1)
                        .max(1)
                };
                let lines = self.render_cell(td, &cell_theme, Space { width: outer, ..space });
                let cell = Cell {
                    lines,
                    row_span: span("rowspan"),
                    col_span: span("colspan"),
                    width: cell_theme.width(&ctx),
                    align: Some(cell_theme.text_align()),
                    style: paint(cell_theme.fill_style()),
                    padding: Some(cell_theme.padding(&ctx)),
                    border_line: cell_theme.border_line(&ctx),
                    border_style: cell_theme.border_style().top,
                    border_visibility: cell_theme.border_visibility(&ctx),
                };
                cells.push((table.add_cell(y, cell), td));
            }
        }

        let mut lines = Vec::new();
        if !cells.is_empty() {
            table.fill_gaps();
            let widths = table.calculate_col_widths();
            for (cell_id, td) in cells {
                let width = table.inner_width(cell_id, &widths);
                let cell_theme = doc.theme(td);
                let content = self.render_cell(td, &cell_theme, Space { width, ..space });
                if let Some(cell) = table.cell_mut(cell_id) {
                    cell.lines = content;
                }
            }
            trace!("table {id:?}: column widths {widths:?}");
            lines = table.render_with(&widths);
        }

        let captions: Vec<NodeId> = doc
            .element_children(id)
            .filter(|c| doc.name(*c) == Some("caption"))
            .collect();
        if captions.is_empty() {
            return lines;
        }
        let caption_space = Space {
            width: if lines.is_empty() {
                space.width
            } else {
                crate::text::max_width(&lines)
            },
            ..space
        };
        let mut output = Vec::new();
        for caption in captions {
            output.extend(self.render_box(caption, caption_space));
        }
        output.extend(lines);
        output
    }

    /// The content of a table cell. Its padding and borders belong to the
    /// table.
    fn render_cell(&mut self, td: NodeId, theme: &Theme, space: Space) -> Vec<Strip> {
        let children = self.flow_children(td);
        self.render_flow(td, theme, &children, space)
    }

    pub(super) fn render_grid(&mut self, id: NodeId, theme: &Theme, metrics: &Metrics, space: Space) -> Vec<Strip> {
        let doc = self.doc;
        let style = &theme.style;
        let tracks = style.grid_template_columns.clone().unwrap_or_default();
        let areas = style.grid_template_areas.clone().unwrap_or_default();
        let n_cols = tracks.len().max(areas.columns()).max(1);
        let (gap_x, gap_y) = theme.gap(&metrics.across);

        let mut table = Table::new();
        table.padding = Edges::all(0);
        table.style = paint(theme.fill_style());
        table.min_col_width = 0;
        let blank_cell = || Cell {
            border_line: Edges::all(LineStyle::NoLine),
            border_visibility: Edges::all(false),
            ..Cell::default()
        };

        let children: Vec<NodeId> = self
            .flow_children(id)
            .into_iter()
            .filter(|c| self.in_flow(*c) && !doc.is_text(*c))
            .collect();

        // Children with a named area go first.
        let mut by_area: HashMap<String, NodeId> = HashMap::new();
        for &child in &children {
            if let Some(area) = doc.theme(child).style.grid_area.clone() {
                by_area.entry(area).or_insert(child);
            }
        }
        let mut placed: Vec<(usize, NodeId)> = Vec::new();
        for y in 0..areas.rows() {
            for x in 0..areas.columns() {
                let Some(area) = areas.get(y, x) else { continue };
                let Some(child) = by_area.remove(area) else { continue };
                let col_span = (x..areas.columns()).take_while(|&i| areas.get(y, i) == Some(area)).count();
                let last = x + col_span - 1;
                let row_span = (y..areas.rows()).take_while(|&i| areas.get(i, last) == Some(area)).count();
                let cell = Cell {
                    row_span,
                    col_span,
                    ..blank_cell()
                };
                if let Some(cell_id) = table.place_cell(y, x, cell) {
                    placed.push((cell_id, child));
                }
            }
        }

        // Everything else fills the next free slot.
        let (mut x, mut y) = (0, 0);
        for child in children {
            if placed.iter().any(|(_, c)| *c == child) {
                continue;
            }
            let child_theme = doc.theme(child);
            let (col_start, col_span) = placement(
                child_theme.style.grid_column_start.unwrap_or_default(),
                child_theme.style.grid_column_end.unwrap_or_default(),
            );
            let col_start = col_start.filter(|c| *c < n_cols);
            loop {
                let allowed = match col_start {
                    Some(start) => start == x,
                    None => x == 0 || x + col_span <= n_cols,
                };
                if allowed {
                    let cell = Cell {
                        col_span,
                        ..blank_cell()
                    };
                    if let Some(cell_id) = table.place_cell(y, x, cell) {
                        placed.push((cell_id, child));
                        break;
                    }
                }
                x += 1;
                if x >= n_cols {
                    x = 0;
                    y += 1;
                }
            }
        }
        if placed.is_empty() {
            return Vec::new();
        }

        // Gaps pad every cell that is not in the last column or row.
        let n_cols = n_cols.max(table.col_count());
        let n_rows = table.row_count();
        for (cell_id, _) in &placed {
            let Some((row, col)) = table.position(*cell_id) else { continue };
            if let Some(cell) = table.cell_mut(*cell_id) {
                let right = if col + cell.col_span < n_cols { gap_x } else { 0 };
                let bottom = if row + cell.row_span < n_rows { gap_y } else { 0 };
                cell.padding = Some(Edges::new(0, right, bottom, 0));
            }
        }

        table.fill_gaps();
        let tracks = self.track_widths(&tracks, n_cols, space.width.saturating_sub(gap_x * (n_cols - 1)), &table, &placed);
        let widths: Vec<usize> = tracks
            .iter()
            .enumerate()
            .map(|(x, w)| if x + 1 < n_cols { w + gap_x } else { *w })
            .collect();
        trace!("grid {id:?}: {n_cols} column(s), widths {widths:?}");

        for (cell_id, child) in placed {
            let width = table.inner_width(cell_id, &widths);
            let lines = self.render_box(child, Space { width, ..space });
            if let Some(cell) = table.cell_mut(cell_id) {
                cell.lines = lines;
            }
        }
        table.render_with(&widths)
    }

    /// Track sizes: fixed lengths first, then `min-content` columns, with
    /// what is left shared by fractions. Undefined tracks count as `1fr`
    /// and rounding slack goes to the last column.
    fn track_widths(
        &self,
        tracks: &cellcss::types::TrackList,
        n_cols: usize,
        available: usize,
        table: &Table,
        placed: &[(usize, NodeId)],
    ) -> Vec<usize> {
        let ctx = self.config.length_context(Some(available as f64));
        let mut widths: Vec<Option<usize>> = vec![None; n_cols];
        let mut fractions: Vec<(usize, f64)> = Vec::new();
        for (x, width) in widths.iter_mut().enumerate() {
            let Some(track) = tracks.get(x) else {
                fractions.push((x, 1.0));
                continue;
            };
            match track.unit {
                Unit::Fraction => fractions.push((x, if track.value > 0.0 { track.value } else { 1.0 })),
                Unit::MinContent => {
                    let content = placed
                        .iter()
                        .filter(|(cell_id, _)| {
                            table.position(*cell_id).is_some_and(|(_, col)| col == x)
                                && table.cell(*cell_id).is_some_and(|c| c.col_span == 1)
                        })
                        .map(|(_, child)| self.min_content_width(*child))
                        .max();
                    match content {
                        Some(content) => *width = Some(content),
                        None => fractions.push((x, 1.0)),
                    }
                }
                _ => match track.to_cells(Axis::Horizontal, &ctx) {
                    Some(cells) => *width = Some(cells.round().max(0.0) as usize),
                    None => fractions.push((x, 1.0)),
                },
            }
        }

        let fixed: usize = widths.iter().flatten().sum();
        let free = available.saturating_sub(fixed) as f64;
        let shares: f64 = fractions.iter().map(|(_, v)| v).sum();
        for (x, value) in fractions {
            widths[x] = Some((value / shares * free).round() as usize);
        }
        let mut widths: Vec<usize> = widths.into_iter().map(Option::unwrap_or_default).collect();
        let total: usize = widths.iter().sum();
        if let Some(last) = widths.last_mut() {
            if total < available {
                *last += available - total;
            } else {
                *last = last.saturating_sub(total - available);
            }
        }
        widths
    }

    /// The widest word in a subtree.
    fn min_content_width(&self, id: NodeId) -> usize {
        self.doc
            .descendants(id)
            .into_iter()
            .filter_map(|node| self.texts.get(&node))
            .flat_map(|text| text.split_whitespace())
            .map(display_width)
            .max()
            .unwrap_or(0)
    }
}

/// Start column (0-based) and span from `grid-column`.
fn placement(start: GridPlacement, end: GridPlacement) -> (Option<usize>, usize) {
    let first = match start {
        GridPlacement::Line(line) if line > 0 => Some(line as usize - 1),
        _ => None,
    };
    let span = match (start, end) {
        (_, GridPlacement::Span(span)) | (GridPlacement::Span(span), _) => usize::from(span),
        (GridPlacement::Line(s), GridPlacement::Line(e)) if e > s => (e - s) as usize,
        _ => 1,
    };
    (first, span.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::markup::parse_markup;

    fn render(source: &str, width: usize) -> Vec<String> {
        let mut doc = parse_markup(source).unwrap();
        let output = doc.render(&RenderConfig::default().with_viewport(width, 20));
        output.plain_lines().iter().map(|l| l.trim_end().to_string()).collect()
    }

    #[test]
    fn test_bordered_table() {
        let lines = render(
            r#"<table style="border: 1px solid"><tr><td>a</td><td>b</td></tr><tr><td>ccc</td><td>d</td></tr></table>"#,
            20,
        );
        assert_eq!(lines, ["┌─────┐", "│a  b │", "│cccd │", "└─────┘"]);
    }

    #[test]
    fn test_sections_are_ordered() {
        let lines = render(
            "<table><tfoot><tr><td>foot</td></tr></tfoot><tbody><tr><td>body</td></tr></tbody>\
             <thead><tr><td>head</td></tr></thead></table>",
            20,
        );
        assert_eq!(lines, ["head", "body", "foot"]);
    }

    #[test]
    fn test_colspan_covers_both_columns() {
        let lines = render(
            r#"<table style="border: 1px solid"><tr><td colspan="2">wide</td></tr><tr><td>a</td><td>b</td></tr></table>"#,
            20,
        );
        assert_eq!(lines, ["┌────┐", "│wide│", "│a b │", "└────┘"]);
    }

    #[test]
    fn test_caption_sits_above() {
        let lines = render("<table><caption>Hi</caption><tr><td>abc</td><td>def</td></tr></table>", 20);
        assert_eq!(lines, ["  Hi", "abcdef"]);
    }

    #[test]
    fn test_grid_tracks() {
        let lines = render(
            r#"<div style="display: grid; grid-template-columns: 4 1fr"><div>a</div><div>b</div><div>c</div></div>"#,
            10,
        );
        assert_eq!(lines, ["a   b", "c"]);
    }

    #[test]
    fn test_grid_gap_pads_inner_cells() {
        let mut doc = parse_markup(
            r#"<div style="display: grid; grid-template-columns: 2 2; gap: 1"><div>a</div><div>b</div><div>c</div></div>"#,
        )
        .unwrap();
        let output = doc.render(&RenderConfig::default().with_viewport(5, 20));
        assert_eq!(output.plain_lines(), ["a  b ", "     ", "c    "]);
    }

    #[test]
    fn test_grid_areas() {
        let source = r#"<style>
            .g { display: grid; grid-template-columns: 3 1fr; grid-template-areas: "h h" "s m"; }
            .h { grid-area: h; } .s { grid-area: s; } .m { grid-area: m; }
        </style><div class="g"><div class="m">m</div><div class="s">s</div><div class="h">head</div></div>"#;
        assert_eq!(render(source, 8), ["head", "s  m"]);
    }

    #[test]
    fn test_placement() {
        assert_eq!(placement(GridPlacement::Line(2), GridPlacement::Span(2)), (Some(1), 2));
        assert_eq!(placement(GridPlacement::Line(1), GridPlacement::Line(3)), (Some(0), 2));
        assert_eq!(placement(GridPlacement::Auto, GridPlacement::Auto), (None, 1));
    }
}
