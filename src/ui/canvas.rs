//! Abstract drawing surface and its terminal implementation.
//!
//! Scenes draw in logical playfield units through [`Canvas`]. [`CellCanvas`]
//! rasterizes those calls into a grid of terminal cells (a cell is covered when
//! its center falls inside the shape) and then stamps the grid row-by-row as
//! Paragraph widgets, like the other cell-buffer scenes.

use crate::runner::Aabb;
use glam::Vec2;
use image::RgbaImage;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

/// Draw calls a scene may issue.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Aabb, color: Color);
    fn stroke_rect(&mut self, rect: Aabb, color: Color);
    fn fill_ellipse(&mut self, rect: Aabb, color: Color);
    fn stroke_ellipse(&mut self, rect: Aabb, color: Color);
    fn hline(&mut self, y: f32, x0: f32, x1: f32, color: Color);
    /// Draw `image` with its top-left corner at `pos`, one pixel per unit.
    fn blit(&mut self, pos: Vec2, image: &RgbaImage);
    fn text(&mut self, pos: Vec2, text: &str, color: Color, bold: bool);
}

/// Cell in the render buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
            bold: false,
        }
    }
}

/// Canvas backed by a terminal cell grid.
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    /// Cells per logical unit on each axis.
    scale: Vec2,
    cells: Vec<Vec<Cell>>,
}

impl CellCanvas {
    /// A `cols` x `rows` grid showing a logical field of `field` units.
    pub fn new(cols: u16, rows: u16, field: Vec2) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        Self {
            cols,
            rows,
            scale: Vec2::new(cols as f32 / field.x, rows as f32 / field.y),
            cells: vec![vec![Cell::default(); cols]; rows],
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn col_span(&self, x: f32, w: f32) -> Option<Range<usize>> {
        cell_span(x, w, self.scale.x, self.cols)
    }

    fn row_span(&self, y: f32, h: f32) -> Option<Range<usize>> {
        cell_span(y, h, self.scale.y, self.rows)
    }

    /// Logical coordinates of a cell's center.
    fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) / self.scale.x,
            (row as f32 + 0.5) / self.scale.y,
        )
    }

    /// Cells covered by an ellipse inscribed in `rect`.
    fn ellipse_cells(&self, rect: Aabb) -> Vec<(usize, usize)> {
        let (Some(cols), Some(rows)) = (self.col_span(rect.x, rect.w), self.row_span(rect.y, rect.h))
        else {
            return Vec::new();
        };
        let center = Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
        let radius = Vec2::new(rect.w / 2.0, rect.h / 2.0).max(Vec2::splat(f32::EPSILON));

        let mut covered = Vec::new();
        for row in rows.clone() {
            for col in cols.clone() {
                let d = (self.cell_center(col, row) - center) / radius;
                if d.length_squared() <= 1.0 {
                    covered.push((col, row));
                }
            }
        }
        if covered.is_empty() {
            // Too small to contain a cell center; keep it visible
            covered.push((
                (cols.start + cols.end - 1) / 2,
                (rows.start + rows.end - 1) / 2,
            ));
        }
        covered
    }

    /// Stamp the grid into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let render_width = area.width.min(self.cols as u16);
        for (row_idx, row_data) in self.cells.iter().enumerate().take(area.height as usize) {
            let mut spans: Vec<Span> = Vec::new();
            let mut current = Style::default();
            let mut current_text = String::new();

            for cell in row_data.iter().take(render_width as usize) {
                let mut style = Style::default().fg(cell.fg).bg(cell.bg);
                if cell.bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if style != current && !current_text.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current_text), current));
                }
                current = style;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(current_text, current));
            }

            let row_area = Rect::new(area.x, area.y + row_idx as u16, render_width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

/// Cells along one axis whose centers fall inside `[start, start + len)`.
/// Shapes thinner than a cell still cover the cell holding their midpoint.
fn cell_span(start: f32, len: f32, scale: f32, limit: usize) -> Option<Range<usize>> {
    if limit == 0 || !(len > 0.0) {
        return None;
    }
    let lo = start * scale;
    let hi = (start + len) * scale;
    let mut first = (lo - 0.5).ceil();
    let mut last = (hi - 0.5).floor();
    if first > last {
        let mid = ((lo + hi) / 2.0).floor();
        first = mid;
        last = mid;
    }
    let first = first.max(0.0);
    let last = last.min(limit as f32 - 1.0);
    if first > last {
        return None;
    }
    Some(first as usize..last as usize + 1)
}

impl Canvas for CellCanvas {
    fn clear(&mut self, color: Color) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = Cell {
                    bg: color,
                    ..Cell::default()
                };
            }
        }
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        let (Some(cols), Some(rows)) = (self.col_span(rect.x, rect.w), self.row_span(rect.y, rect.h))
        else {
            return;
        };
        for row in rows {
            for cell in &mut self.cells[row][cols.clone()] {
                *cell = Cell {
                    bg: color,
                    ..Cell::default()
                };
            }
        }
    }

    fn stroke_rect(&mut self, rect: Aabb, color: Color) {
        let (Some(cols), Some(rows)) = (self.col_span(rect.x, rect.w), self.row_span(rect.y, rect.h))
        else {
            return;
        };
        let (left, right) = (cols.start, cols.end - 1);
        let (top, bottom) = (rows.start, rows.end - 1);
        for row in rows {
            for col in cols.clone() {
                let on_edge = row == top || row == bottom || col == left || col == right;
                if !on_edge {
                    continue;
                }
                let ch = match (left == right, top == bottom) {
                    (true, true) => '□',
                    (true, false) => '│',
                    (false, true) => '─',
                    (false, false) => match (row == top, row == bottom, col == left, col == right) {
                        (true, _, true, _) => '┌',
                        (true, _, _, true) => '┐',
                        (_, true, true, _) => '└',
                        (_, true, _, true) => '┘',
                        (true, _, _, _) | (_, true, _, _) => '─',
                        _ => '│',
                    },
                };
                let cell = &mut self.cells[row][col];
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    fn fill_ellipse(&mut self, rect: Aabb, color: Color) {
        for (col, row) in self.ellipse_cells(rect) {
            self.cells[row][col] = Cell {
                bg: color,
                ..Cell::default()
            };
        }
    }

    fn stroke_ellipse(&mut self, rect: Aabb, color: Color) {
        let covered = self.ellipse_cells(rect);
        for &(col, row) in &covered {
            let interior = col > 0
                && row > 0
                && [(col - 1, row), (col + 1, row), (col, row - 1), (col, row + 1)]
                    .iter()
                    .all(|n| covered.contains(n));
            if !interior {
                let cell = &mut self.cells[row][col];
                cell.ch = '•';
                cell.fg = color;
            }
        }
    }

    fn hline(&mut self, y: f32, x0: f32, x1: f32, color: Color) {
        let row = (y * self.scale.y).floor();
        if row < 0.0 || row >= self.rows as f32 {
            return;
        }
        let Some(cols) = self.col_span(x0, x1 - x0) else {
            return;
        };
        for cell in &mut self.cells[row as usize][cols] {
            cell.ch = '▔';
            cell.fg = color;
        }
    }

    fn blit(&mut self, pos: Vec2, image: &RgbaImage) {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return;
        }
        let (Some(cols), Some(rows)) = (
            self.col_span(pos.x, w as f32),
            self.row_span(pos.y, h as f32),
        ) else {
            return;
        };
        for row in rows {
            for col in cols.clone() {
                let local = self.cell_center(col, row) - pos;
                let px = (local.x.max(0.0) as u32).min(w - 1);
                let py = (local.y.max(0.0) as u32).min(h - 1);
                let [r, g, b, a] = image.get_pixel(px, py).0;
                if a >= 128 {
                    self.cells[row][col] = Cell {
                        bg: Color::Rgb(r, g, b),
                        ..Cell::default()
                    };
                }
            }
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Color, bold: bool) {
        let row = (pos.y * self.scale.y).floor();
        let col = (pos.x * self.scale.x).floor();
        if row < 0.0 || row >= self.rows as f32 {
            return;
        }
        let row = row as usize;
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as f32;
            if c < 0.0 {
                continue;
            }
            if c >= self.cols as f32 {
                break;
            }
            let cell = &mut self.cells[row][c as usize];
            cell.ch = ch;
            cell.fg = color;
            cell.bold = bold;
        }
    }
}

/// Canvas that records calls instead of drawing them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    FillRect(Aabb, Color),
    StrokeRect(Aabb, Color),
    FillEllipse(Aabb, Color),
    StrokeEllipse(Aabb, Color),
    HLine(f32, Color),
    Blit(Vec2, (u32, u32)),
    Text(Vec2, String),
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }
    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.calls.push(DrawCall::FillRect(rect, color));
    }
    fn stroke_rect(&mut self, rect: Aabb, color: Color) {
        self.calls.push(DrawCall::StrokeRect(rect, color));
    }
    fn fill_ellipse(&mut self, rect: Aabb, color: Color) {
        self.calls.push(DrawCall::FillEllipse(rect, color));
    }
    fn stroke_ellipse(&mut self, rect: Aabb, color: Color) {
        self.calls.push(DrawCall::StrokeEllipse(rect, color));
    }
    fn hline(&mut self, y: f32, _x0: f32, _x1: f32, color: Color) {
        self.calls.push(DrawCall::HLine(y, color));
    }
    fn blit(&mut self, pos: Vec2, image: &RgbaImage) {
        self.calls.push(DrawCall::Blit(pos, image.dimensions()));
    }
    fn text(&mut self, pos: Vec2, text: &str, _color: Color, _bold: bool) {
        self.calls.push(DrawCall::Text(pos, text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 80 x 30 cells over the 800 x 300 field: 10 units per cell on both axes.
    fn test_canvas() -> CellCanvas {
        CellCanvas::new(80, 30, Vec2::new(800.0, 300.0))
    }

    #[test]
    fn test_cell_span_center_rule() {
        assert_eq!(cell_span(0.0, 40.0, 0.1, 80), Some(0..4));
        assert_eq!(cell_span(80.0, 40.0, 0.1, 80), Some(8..12));
        // 3 units wide, centered inside cell 1
        assert_eq!(cell_span(12.0, 3.0, 0.1, 80), Some(1..2));
        // Fully off the left edge
        assert_eq!(cell_span(-150.0, 40.0, 0.1, 80), None);
        // Clipped at the right edge
        assert_eq!(cell_span(780.0, 50.0, 0.1, 80), Some(78..80));
        assert_eq!(cell_span(10.0, 0.0, 0.1, 80), None);
    }

    #[test]
    fn test_fill_rect_sets_background() {
        let mut canvas = test_canvas();
        canvas.fill_rect(Aabb::new(80.0, 180.0, 40.0, 40.0), Color::Green);
        assert_eq!(canvas.cell(8, 18).unwrap().bg, Color::Green);
        assert_eq!(canvas.cell(11, 21).unwrap().bg, Color::Green);
        assert_eq!(canvas.cell(12, 18).unwrap().bg, Color::Reset);
        assert_eq!(canvas.cell(8, 22).unwrap().bg, Color::Reset);
    }

    #[test]
    fn test_stroke_rect_draws_box_corners() {
        let mut canvas = test_canvas();
        canvas.stroke_rect(Aabb::new(80.0, 180.0, 40.0, 40.0), Color::Black);
        assert_eq!(canvas.cell(8, 18).unwrap().ch, '┌');
        assert_eq!(canvas.cell(11, 18).unwrap().ch, '┐');
        assert_eq!(canvas.cell(8, 21).unwrap().ch, '└');
        assert_eq!(canvas.cell(11, 21).unwrap().ch, '┘');
        assert_eq!(canvas.cell(9, 18).unwrap().ch, '─');
        assert_eq!(canvas.cell(8, 19).unwrap().ch, '│');
        assert_eq!(canvas.cell(9, 19).unwrap().ch, ' ');
    }

    #[test]
    fn test_ellipse_covers_center_not_corners() {
        let mut canvas = test_canvas();
        canvas.fill_ellipse(Aabb::new(400.0, 100.0, 60.0, 40.0), Color::Blue);
        assert_eq!(canvas.cell(43, 12).unwrap().bg, Color::Blue);
        assert_eq!(canvas.cell(40, 10).unwrap().bg, Color::Reset);
    }

    #[test]
    fn test_tiny_ellipse_still_visible() {
        let mut canvas = test_canvas();
        canvas.fill_ellipse(Aabb::new(401.0, 101.0, 4.0, 4.0), Color::Blue);
        assert_eq!(canvas.cell(40, 10).unwrap().bg, Color::Blue);
    }

    #[test]
    fn test_blit_samples_opaque_pixels() {
        let mut canvas = test_canvas();
        let mut image = RgbaImage::from_pixel(20, 20, Rgba([255, 0, 0, 255]));
        for y in 0..20 {
            for x in 10..20 {
                image.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
        canvas.blit(Vec2::new(100.0, 100.0), &image);
        assert_eq!(canvas.cell(10, 10).unwrap().bg, Color::Rgb(255, 0, 0));
        // Transparent half leaves the background alone
        assert_eq!(canvas.cell(11, 10).unwrap().bg, Color::Reset);
    }

    #[test]
    fn test_text_clipped_at_right_edge() {
        let mut canvas = test_canvas();
        canvas.text(Vec2::new(770.0, 20.0), "SCORE", Color::Black, true);
        assert_eq!(canvas.cell(77, 2).unwrap().ch, 'S');
        assert_eq!(canvas.cell(79, 2).unwrap().ch, 'O');
        assert!(canvas.cell(77, 2).unwrap().bold);
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut canvas = test_canvas();
        canvas.text(Vec2::new(0.0, 0.0), "x", Color::Black, false);
        canvas.clear(Color::Cyan);
        let cell = canvas.cell(0, 0).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.bg, Color::Cyan);
    }

    #[test]
    fn test_hline_marks_row() {
        let mut canvas = test_canvas();
        canvas.hline(220.0, 0.0, 800.0, Color::Black);
        assert_eq!(canvas.cell(0, 22).unwrap().ch, '▔');
        assert_eq!(canvas.cell(79, 22).unwrap().ch, '▔');
    }
}
