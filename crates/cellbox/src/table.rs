//! Tabular layout: a grid of cells with row and column spans, drawn with
//! resolved box-drawing borders.
//!
//! ```
//! use cellbox::table::{Cell, Table};
//!
//! let mut table = Table::new();
//! table.add_cell(0, Cell::text("a"));
//! table.add_cell(0, Cell::text("b"));
//! table.add_cell(1, Cell::text("wide").with_span(1, 2));
//! let rows: Vec<String> = table.render().iter().map(|s| s.text()).collect();
//! assert_eq!(
//!     rows,
//!     ["┌───┬───┐", "│ a │ b │", "├───┴───┤", "│ wide  │", "└───────┘"]
//! );
//! ```

use std::borrow::Cow;
use std::collections::VecDeque;

use cellcss::types::TextAlign;

use crate::box_drawing::{Junction, resolve_glyph};
use crate::edges::{EdgeLines, Edges};
use crate::line_style::LineStyle;
use crate::segment::{Segment, Style};
use crate::strip::Strip;
use crate::text::{align, max_width, wrap_lines};

/// What occupies one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Empty,
    /// The top-left position of a cell, holding its id.
    Cell(usize),
    /// A position covered by a spanning cell.
    Placeholder {
        owner: usize,
        row_offset: usize,
        col_offset: usize,
    },
}

/// Defaults shared by every cell in a row or column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowCol {
    pub align: Option<TextAlign>,
    pub style: Option<Style>,
    pub padding: Option<Edges<usize>>,
    /// `NoLine` leaves the edge to the cell or table.
    pub border_line: EdgeLines,
    pub border_style: Option<Style>,
    pub border_visibility: Edges<bool>,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub lines: Vec<Strip>,
    pub row_span: usize,
    pub col_span: usize,
    /// Explicit content width, excluding padding.
    pub width: Option<usize>,
    pub align: Option<TextAlign>,
    pub style: Option<Style>,
    pub padding: Option<Edges<usize>>,
    pub border_line: EdgeLines,
    pub border_style: Option<Style>,
    pub border_visibility: Edges<bool>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            row_span: 1,
            col_span: 1,
            width: None,
            align: None,
            style: None,
            padding: None,
            border_line: Edges::all(LineStyle::Thin),
            border_style: None,
            border_visibility: Edges::all(true),
        }
    }
}

impl Cell {
    pub fn new(lines: Vec<Strip>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// A cell of plain text, one line per `\n`.
    pub fn text(text: &str) -> Self {
        Self::new(text.split('\n').map(Strip::plain).collect())
    }

    pub fn with_span(mut self, rows: usize, cols: usize) -> Self {
        self.row_span = rows.max(1);
        self.col_span = cols.max(1);
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_padding(mut self, padding: Edges<usize>) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_border(mut self, line: EdgeLines) -> Self {
        self.border_line = line;
        self
    }

    pub fn with_border_visibility(mut self, visibility: Edges<bool>) -> Self {
        self.border_visibility = visibility;
        self
    }

    /// An empty cell with no border of its own.
    fn filler() -> Self {
        Self::default()
            .with_border(Edges::all(LineStyle::NoLine))
            .with_border_visibility(Edges::all(false))
    }
}

/// Width constraints for a whole table, borders included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableWidth {
    pub min: Option<usize>,
    pub preferred: Option<usize>,
    pub max: Option<usize>,
}

/// A grid of cells.
#[derive(Debug, Clone)]
pub struct Table {
    cells: Vec<Cell>,
    positions: Vec<(usize, usize)>,
    slots: Vec<Vec<Slot>>,
    rows: Vec<RowCol>,
    cols: Vec<RowCol>,
    pub width: TableWidth,
    /// Grow to `width.max` when the content is narrower.
    pub expand: bool,
    pub min_col_width: usize,
    pub align: TextAlign,
    pub style: Option<Style>,
    pub padding: Edges<usize>,
    pub border_line: EdgeLines,
    pub border_style: Option<Style>,
    pub border_visibility: Edges<bool>,
    /// Drop edges whose every segment has no line at all.
    pub collapse_empty_borders: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            positions: Vec::new(),
            slots: Vec::new(),
            rows: Vec::new(),
            cols: Vec::new(),
            width: TableWidth::default(),
            expand: false,
            min_col_width: 2,
            align: TextAlign::Left,
            style: None,
            padding: Edges::new(0, 1, 0, 1),
            border_line: Edges::all(LineStyle::NoLine),
            border_style: None,
            border_visibility: Edges::all(false),
            collapse_empty_borders: true,
        }
    }
}

/// Border attributes of one grid position after applying table, row and
/// column defaults.
#[derive(Debug, Clone, Copy, Default)]
struct Resolved {
    lines: EdgeLines,
    visible: Edges<bool>,
    border_style: Option<Style>,
}

fn layer(styles: impl IntoIterator<Item = Option<Style>>) -> Option<Style> {
    styles.into_iter().fold(None, |acc, next| match (acc, next) {
        (Some(a), Some(b)) => Some(a.apply(&b)),
        (a, b) => a.or(b),
    })
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn cell_mut(&mut self, id: usize) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }

    /// Grid position of a cell's top-left corner.
    pub fn position(&self, id: usize) -> Option<(usize, usize)> {
        self.positions.get(id).copied()
    }

    pub fn slot(&self, row: usize, col: usize) -> Slot {
        self.slots
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Slot::Empty)
    }

    pub fn row_mut(&mut self, row: usize) -> &mut RowCol {
        self.grow(row + 1, 0);
        &mut self.rows[row]
    }

    pub fn col_mut(&mut self, col: usize) -> &mut RowCol {
        self.grow(0, col + 1);
        &mut self.cols[col]
    }

    fn grow(&mut self, rows: usize, cols: usize) {
        let cols = cols.max(self.cols.len());
        if self.cols.len() < cols {
            self.cols.resize(cols, RowCol::default());
        }
        if self.rows.len() < rows {
            self.rows.resize(rows, RowCol::default());
        }
        if self.slots.len() < rows {
            self.slots.resize(rows, Vec::new());
        }
        for row in &mut self.slots {
            row.resize(cols, Slot::Empty);
        }
    }

    fn is_free(&self, row: usize, col: usize, rows: usize, cols: usize) -> bool {
        (row..row + rows).all(|r| (col..col + cols).all(|c| self.slot(r, c) == Slot::Empty))
    }

    /// Adds a cell at the first position in `row` where its whole span is
    /// unoccupied. Returns the cell id.
    pub fn add_cell(&mut self, row: usize, cell: Cell) -> usize {
        let mut col = 0;
        while !self.is_free(row, col, cell.row_span, cell.col_span) {
            col += 1;
        }
        self.insert(row, col, cell)
    }

    /// Adds a cell at an exact position, or returns `None` when any position
    /// it would cover is taken.
    pub fn place_cell(&mut self, row: usize, col: usize, cell: Cell) -> Option<usize> {
        if !self.is_free(row, col, cell.row_span, cell.col_span) {
            return None;
        }
        Some(self.insert(row, col, cell))
    }

    fn insert(&mut self, row: usize, col: usize, cell: Cell) -> usize {
        let id = self.cells.len();
        self.grow(row + cell.row_span, col + cell.col_span);
        for row_offset in 0..cell.row_span {
            for col_offset in 0..cell.col_span {
                self.slots[row + row_offset][col + col_offset] = if row_offset == 0 && col_offset == 0 {
                    Slot::Cell(id)
                } else {
                    Slot::Placeholder {
                        owner: id,
                        row_offset,
                        col_offset,
                    }
                };
            }
        }
        self.cells.push(cell);
        self.positions.push((row, col));
        id
    }

    /// Puts an empty, borderless cell at every unoccupied position, so each
    /// row covers every column. Existing cell ids are unchanged.
    pub fn fill_gaps(&mut self) {
        for row in 0..self.row_count() {
            for col in 0..self.col_count() {
                if self.slot(row, col) == Slot::Empty {
                    self.insert(row, col, Cell::filler());
                }
            }
        }
    }

    fn complete(&self) -> Cow<'_, Table> {
        if self.slots.iter().flatten().all(|slot| *slot != Slot::Empty) {
            return Cow::Borrowed(self);
        }
        let mut table = self.clone();
        table.fill_gaps();
        Cow::Owned(table)
    }

    fn owner(&self, row: usize, col: usize) -> Option<usize> {
        match self.slot(row, col) {
            Slot::Empty => None,
            Slot::Cell(id) | Slot::Placeholder { owner: id, .. } => Some(id),
        }
    }

    /// Padding of a cell: the widest of the table, row, column and cell values.
    pub fn cell_padding(&self, id: usize) -> Edges<usize> {
        let (row, col) = self.positions[id];
        [
            Some(self.padding),
            self.rows[row].padding,
            self.cols[col].padding,
            self.cells[id].padding,
        ]
        .into_iter()
        .flatten()
        .fold(Edges::all(0), |acc, p| acc.zip_with(p, usize::max))
    }

    fn cell_style(&self, id: usize) -> Option<Style> {
        let (row, col) = self.positions[id];
        layer([self.style, self.cols[col].style, self.rows[row].style, self.cells[id].style])
    }

    fn cell_align(&self, id: usize) -> TextAlign {
        let (row, col) = self.positions[id];
        self.cells[id]
            .align
            .or(self.rows[row].align)
            .or(self.cols[col].align)
            .unwrap_or(self.align)
    }

    fn resolve(&self, row: usize, col: usize) -> Resolved {
        let (id, row_offset, col_offset) = match self.slot(row, col) {
            Slot::Empty => return Resolved::default(),
            Slot::Cell(id) => (id, 0, 0),
            Slot::Placeholder {
                owner,
                row_offset,
                col_offset,
            } => (owner, row_offset, col_offset),
        };
        let cell = &self.cells[id];
        let r = &self.rows[row];
        let c = &self.cols[col];
        let first_row = row == 0;
        let last_row = row + 1 == self.row_count();
        let first_col = col == 0;
        let last_col = col + 1 == self.col_count();

        let pick = |own: LineStyle, table: LineStyle, at_edge: bool| {
            if own != LineStyle::NoLine {
                own
            } else if at_edge {
                table
            } else {
                LineStyle::NoLine
            }
        };
        let inherited = Edges::new(
            pick(r.border_line.top, self.border_line.top, first_row),
            pick(c.border_line.right, self.border_line.right, last_col),
            pick(r.border_line.bottom, self.border_line.bottom, last_row),
            pick(c.border_line.left, self.border_line.left, first_col),
        );
        let mut lines = inherited.zip_with(cell.border_line, |base, own| {
            if own != LineStyle::NoLine { own } else { base }
        });
        if col_offset > 0 {
            lines.left = LineStyle::Invisible;
        }
        if row_offset > 0 {
            lines.top = LineStyle::Invisible;
        }

        let cv = cell.border_visibility;
        let visible = Edges::new(
            cv.top || r.border_visibility.top || (first_row && (c.border_visibility.top || self.border_visibility.top)),
            cv.right
                || c.border_visibility.right
                || (last_col && (r.border_visibility.right || self.border_visibility.right)),
            cv.bottom
                || r.border_visibility.bottom
                || (last_row && (c.border_visibility.bottom || self.border_visibility.bottom)),
            cv.left
                || c.border_visibility.left
                || (first_col && (r.border_visibility.left || self.border_visibility.left)),
        );

        Resolved {
            lines,
            visible,
            border_style: layer([self.border_style, c.border_style, r.border_style, cell.border_style]),
        }
    }

    fn resolve_all(&self) -> Vec<Vec<Resolved>> {
        (0..self.row_count())
            .map(|r| (0..self.col_count()).map(|c| self.resolve(r, c)).collect())
            .collect()
    }

    /// Which horizontal (row) and vertical (column) edges are drawn.
    fn edge_visibility(&self, resolved: &[Vec<Resolved>]) -> (Vec<bool>, Vec<bool>) {
        let mut row_edges = vec![false; self.row_count() + 1];
        let mut col_edges = vec![false; self.col_count() + 1];
        let counts = |visible: bool, line: LineStyle| visible && (!self.collapse_empty_borders || line != LineStyle::NoLine);
        for (y, row) in resolved.iter().enumerate() {
            for (x, res) in row.iter().enumerate() {
                row_edges[y] |= counts(res.visible.top, res.lines.top);
                row_edges[y + 1] |= counts(res.visible.bottom, res.lines.bottom);
                col_edges[x] |= counts(res.visible.left, res.lines.left);
                col_edges[x + 1] |= counts(res.visible.right, res.lines.right);
            }
        }
        (row_edges, col_edges)
    }

    /// Width of a cell's content plus padding, or 0 for spanning cells.
    fn natural_width(&self, row: usize, col: usize) -> usize {
        let Some(id) = self.owner(row, col) else {
            return 0;
        };
        let cell = &self.cells[id];
        if cell.col_span > 1 {
            if let Slot::Placeholder { .. } = self.slot(row, col) {
                return self.cell_padding(id).horizontal();
            }
            return 0;
        }
        let content = match self.slot(row, col) {
            Slot::Cell(_) => cell.width.unwrap_or_else(|| max_width(&cell.lines)),
            _ => 0,
        };
        content + self.cell_padding(id).horizontal()
    }

    /// Computes column widths, growing or shrinking toward the table's width
    /// constraints one cell at a time.
    pub fn calculate_col_widths(&self) -> Vec<usize> {
        self.complete().col_widths()
    }

    fn col_widths(&self) -> Vec<usize> {
        let resolved = self.resolve_all();
        let (_, col_edges) = self.edge_visibility(&resolved);
        let n_cols = self.col_count();
        let mut widths: Vec<usize> = (0..n_cols)
            .map(|c| {
                (0..self.row_count())
                    .map(|r| self.natural_width(r, c))
                    .fold(self.min_col_width, usize::max)
            })
            .collect();
        let borders = col_edges.iter().filter(|v| **v).count();
        let total = |widths: &[usize]| widths.iter().sum::<usize>() + borders;
        let flexible: Vec<usize> = (0..n_cols)
            .filter(|&c| {
                (0..self.row_count()).all(|r| self.owner(r, c).is_none_or(|id| self.cells[id].width.is_none()))
            })
            .collect();
        let floor = n_cols * self.min_col_width;

        let expand = |widths: &mut Vec<usize>, target: usize| {
            let target = target.max(floor);
            let candidates: Vec<usize> = if flexible.is_empty() {
                (0..n_cols).collect()
            } else {
                flexible.clone()
            };
            while total(widths.as_slice()) < target {
                let Some(&idx) = candidates.iter().min_by_key(|&&c| widths[c]) else {
                    break;
                };
                widths[idx] += 1;
            }
        };
        let contract = |widths: &mut Vec<usize>, target: usize| {
            let target = target.max(floor);
            while total(widths.as_slice()) > target {
                let Some(idx) = (0..n_cols).rev().max_by_key(|&c| widths[c]) else {
                    break;
                };
                if widths[idx] <= self.min_col_width {
                    break;
                }
                widths[idx] -= 1;
            }
        };

        let current = total(&widths);
        if let Some(preferred) = self.width.preferred {
            if current < preferred {
                expand(&mut widths, preferred);
            } else if current > preferred {
                contract(&mut widths, preferred);
            }
        }
        if let Some(max) = self.width.max {
            if current > max {
                contract(&mut widths, max);
            }
            if current < max && self.expand {
                expand(&mut widths, max);
            }
        }
        if let Some(min) = self.width.min {
            if current < min {
                expand(&mut widths, min);
            }
        }
        log::trace!("table column widths {widths:?} (natural total {current})");
        widths
    }

    /// Width covered by a cell: its columns plus the visible edges between them.
    pub fn span_width(&self, id: usize, widths: &[usize]) -> usize {
        let table = self.complete();
        let resolved = table.resolve_all();
        let (_, col_edges) = table.edge_visibility(&resolved);
        table.span_width_with(id, widths, &col_edges)
    }

    fn span_width_with(&self, id: usize, widths: &[usize], col_edges: &[bool]) -> usize {
        let (_, col) = self.positions[id];
        let span = self.cells[id].col_span;
        let end = (col + span).min(widths.len());
        widths[col.min(end)..end].iter().sum::<usize>()
            + (col + 1..end).filter(|&x| col_edges[x]).count()
    }

    /// Width available for a cell's content once padding is removed.
    pub fn inner_width(&self, id: usize, widths: &[usize]) -> usize {
        self.span_width(id, widths)
            .saturating_sub(self.cell_padding(id).horizontal())
    }

    fn cell_lines(&self, id: usize, inner: usize) -> VecDeque<Strip> {
        let cell = &self.cells[id];
        let padding = self.cell_padding(id);
        let mut lines = vec![Strip::new(); padding.top];
        if cell.lines.is_empty() {
            lines.push(Strip::new());
        } else {
            lines.extend(wrap_lines(&cell.lines, inner, true));
        }
        lines.extend(std::iter::repeat_n(Strip::new(), padding.bottom));
        align(&lines, self.cell_align(id), Some(inner), self.cell_style(id)).into()
    }

    /// Renders with widths from [`calculate_col_widths`](Self::calculate_col_widths).
    pub fn render(&self) -> Vec<Strip> {
        let table = self.complete();
        table.draw(&table.col_widths())
    }

    /// Renders with the given column widths. Unoccupied positions are drawn
    /// as empty cells.
    pub fn render_with(&self, widths: &[usize]) -> Vec<Strip> {
        self.complete().draw(widths)
    }

    fn draw(&self, widths: &[usize]) -> Vec<Strip> {
        let n_rows = self.row_count();
        let n_cols = self.col_count().min(widths.len());
        if n_rows == 0 || n_cols == 0 {
            return Vec::new();
        }
        let resolved = self.resolve_all();
        let (row_edges, col_edges) = self.edge_visibility(&resolved);
        let at = |r: Option<usize>, c: Option<usize>| -> Resolved {
            match (r, c) {
                (Some(r), Some(c)) if r < n_rows && c < n_cols => resolved[r][c],
                _ => Resolved::default(),
            }
        };
        let mut remaining: Vec<VecDeque<Strip>> = (0..self.cells.len())
            .map(|id| {
                let inner = self
                    .span_width_with(id, widths, &col_edges)
                    .saturating_sub(self.cell_padding(id).horizontal());
                self.cell_lines(id, inner)
            })
            .collect();

        let mut output = Vec::new();
        for y in 0..=n_rows {
            if y > 0 {
                self.draw_content_rows(y - 1, widths, &col_edges, &at, &mut remaining, &mut output);
            }
            let all_spanned = y < n_rows
                && y > 0
                && (0..n_cols).all(|x| matches!(self.slot(y, x), Slot::Placeholder { row_offset, .. } if row_offset > 0));
            if row_edges[y] && !all_spanned {
                output.push(self.draw_border_row(y, widths, &col_edges, &at, &mut remaining));
            }
        }
        output
    }

    /// One padded line of a cell, `span_width` cells wide.
    fn cell_row(&self, id: usize, widths: &[usize], col_edges: &[bool], line: Option<Strip>) -> Strip {
        let padding = self.cell_padding(id);
        let inner = self
            .span_width_with(id, widths, col_edges)
            .saturating_sub(padding.horizontal());
        let style = self.cell_style(id);
        let pad_style = style.map(|s| s.without_decoration());
        let mut row = Strip::blank(padding.left, pad_style);
        row.extend(&line.unwrap_or_default().adjust_cell_length(inner, pad_style));
        row.extend(&Strip::blank(padding.right, pad_style));
        row
    }

    fn terminates(&self, row: usize, col: usize) -> Option<usize> {
        match self.slot(row, col) {
            Slot::Cell(id) if self.cells[id].row_span == 1 => Some(id),
            Slot::Placeholder {
                owner,
                row_offset,
                col_offset: 0,
            } if row_offset + 1 == self.cells[owner].row_span => Some(owner),
            _ => None,
        }
    }

    fn draw_content_rows(
        &self,
        y: usize,
        widths: &[usize],
        col_edges: &[bool],
        at: &dyn Fn(Option<usize>, Option<usize>) -> Resolved,
        remaining: &mut [VecDeque<Strip>],
        output: &mut Vec<Strip>,
    ) {
        let n_cols = self.col_count().min(widths.len());
        let vertical = |x: usize| -> Strip {
            if !col_edges[x] {
                return Strip::new();
            }
            let w = at(Some(y), x.checked_sub(1));
            let e = at(Some(y), Some(x));
            let line = w.lines.right.max_rank(e.lines.left);
            let glyph = resolve_glyph(Junction::new(line, LineStyle::NoLine, line, LineStyle::NoLine));
            Strip::from_segment(Segment::styled(
                glyph.to_string(),
                e.border_style.or(w.border_style).unwrap_or_default(),
            ))
        };

        while (0..n_cols).any(|x| self.terminates(y, x).is_some_and(|id| !remaining[id].is_empty())) {
            let mut line = Strip::new();
            for x in 0..n_cols {
                let slot = self.slot(y, x);
                if let Slot::Placeholder { col_offset, .. } = slot {
                    if col_offset > 0 {
                        continue;
                    }
                }
                line.extend(&vertical(x));
                match self.owner(y, x) {
                    Some(id) => {
                        let next = remaining[id].pop_front();
                        line.extend(&self.cell_row(id, widths, col_edges, next));
                    }
                    None => line.extend(&Strip::blank(widths[x], self.style)),
                }
            }
            line.extend(&vertical(n_cols));
            output.push(line);
        }
    }

    fn draw_border_row(
        &self,
        y: usize,
        widths: &[usize],
        col_edges: &[bool],
        at: &dyn Fn(Option<usize>, Option<usize>) -> Resolved,
        remaining: &mut [VecDeque<Strip>],
    ) -> Strip {
        let n_cols = self.col_count().min(widths.len());
        let above = y.checked_sub(1);
        let mut line = Strip::new();
        for x in 0..=n_cols {
            let se_slot = if x < n_cols && y < self.row_count() {
                self.slot(y, x)
            } else {
                Slot::Empty
            };
            if let Slot::Placeholder {
                row_offset,
                col_offset,
                ..
            } = se_slot
            {
                if row_offset > 0 && col_offset > 0 {
                    continue;
                }
            }
            let left = x.checked_sub(1);
            let nw = at(above, left);
            let ne = at(above, Some(x));
            let sw = at(Some(y), left);
            let se = at(Some(y), Some(x));
            if col_edges[x] {
                let junction = Junction::new(
                    nw.lines.right.max_rank(ne.lines.left),
                    ne.lines.bottom.max_rank(se.lines.top),
                    se.lines.left.max_rank(sw.lines.right),
                    sw.lines.top.max_rank(nw.lines.bottom),
                );
                let style = se
                    .border_style
                    .or(ne.border_style)
                    .or(sw.border_style)
                    .or(nw.border_style)
                    .unwrap_or_default();
                line.push(Segment::styled(resolve_glyph(junction).to_string(), style));
            }
            if x == n_cols {
                break;
            }
            match se_slot {
                Slot::Placeholder {
                    owner, row_offset, ..
                } if row_offset > 0 => {
                    let next = remaining[owner].pop_front();
                    line.extend(&self.cell_row(owner, widths, col_edges, next));
                }
                _ => {
                    let edge = ne.lines.bottom.max_rank(se.lines.top);
                    let glyph = resolve_glyph(Junction::new(LineStyle::NoLine, edge, LineStyle::NoLine, edge));
                    let style = se.border_style.or(ne.border_style).unwrap_or_default();
                    line.push(Segment::styled(glyph.to_string().repeat(widths[x]), style));
                }
            }
        }
        line
    }
}
