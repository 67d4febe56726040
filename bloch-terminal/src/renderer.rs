/// ASCII rasterizer for terminal rendering
use bloch_core::{BlochResult, Color, DrawingSurface, Point2D, Stroke};
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: TermColor,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: TermColor::Reset,
};

/// Glyph and terminal colour for a drawing colour.
///
/// The canvas is white-on-black in the terminal, so dark ink maps to bright
/// glyphs and white paper maps to blank cells.
fn ink(color: Color, filled: bool) -> Cell {
    let luminance = color.luminance();
    if luminance > 0.9 {
        BLANK
    } else if luminance > 0.5 {
        Cell {
            glyph: if filled { ':' } else { '.' },
            color: TermColor::DarkGrey,
        }
    } else {
        Cell {
            glyph: if filled { '@' } else { '#' },
            color: TermColor::White,
        }
    }
}

/// Drawing surface that rasterises into a grid of terminal cells.
///
/// Logical coordinates (e.g. the 2000×2000 canvas) are scaled uniformly to
/// fit the grid and centred, compensating for the cell aspect ratio.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    cells: Vec<Cell>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize, logical_width: f64, logical_height: f64) -> Self {
        let scale =
            (width as f64 / logical_width).min(CELL_ASPECT * height as f64 / logical_height);
        let offset_x = (width as f64 - logical_width * scale) / 2.0;
        let offset_y = (height as f64 - logical_height * scale / CELL_ASPECT) / 2.0;

        Self {
            width,
            height,
            scale,
            offset_x,
            offset_y,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col].glyph)
        } else {
            None
        }
    }

    /// Map a logical point to fractional cell coordinates
    fn to_cell(&self, p: Point2D) -> (f64, f64) {
        (
            p.x * self.scale + self.offset_x,
            p.y * self.scale / CELL_ASPECT + self.offset_y,
        )
    }

    /// Logical position of a cell's centre
    fn to_logical(&self, col: usize, row: usize) -> (f64, f64) {
        (
            (col as f64 + 0.5 - self.offset_x) / self.scale,
            (row as f64 + 0.5 - self.offset_y) * CELL_ASPECT / self.scale,
        )
    }

    fn plot(&mut self, x: f64, y: f64, cell: Cell) {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return;
        }
        let (col, row) = (x as usize, y as usize);
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }

    /// DDA line between two points in cell space, clipped to the grid first
    fn raster_line(&mut self, from: (f64, f64), to: (f64, f64), cell: Cell) {
        let Some((from, to)) = clip_segment(from, to, self.width as f64, self.height as f64)
        else {
            return;
        };
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        if !steps.is_finite() {
            return;
        }
        let steps = steps as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(from.0 + dx * t, from.1 + dy * t, cell);
        }
    }

    /// Even-odd scanline fill of a polygon in cell space
    fn raster_polygon(&mut self, points: &[(f64, f64)], cell: Cell) {
        if points.len() < 3 {
            return;
        }

        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        if !(min_y.is_finite() && max_y.is_finite()) {
            return;
        }
        let first_row = min_y.floor().max(0.0) as usize;
        let last_row = (max_y.ceil().max(0.0) as usize).min(self.height);

        let mut crossings = Vec::new();
        for row in first_row..last_row {
            let y = row as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.1 <= y && b.1 > y) || (b.1 <= y && a.1 > y) {
                    crossings.push(a.0 + (y - a.1) / (b.1 - a.1) * (b.0 - a.0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let start = span[0].round().max(0.0) as usize;
                let end = (span[1].round().max(0.0) as usize).min(self.width);
                for col in start..end {
                    self.cells[row * self.width + col] = cell;
                }
            }
        }

        // keep outlines visible for polygons thinner than a cell
        for i in 0..points.len() {
            self.raster_line(points[i], points[(i + 1) % points.len()], cell);
        }
    }

    /// Plain-text rendering, one line per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|c| c.glyph).collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Queue the grid to a terminal writer, positioning each row explicitly
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for (row, cells) in self.cells.chunks(self.width.max(1)).enumerate() {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawingSurface for AsciiCanvas {
    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> BlochResult<()> {
        let cell = ink(color, true);
        let (x0, y0) = self.to_cell(Point2D::new(x, y));
        let (x1, y1) = self.to_cell(Point2D::new(x + width, y + height));

        let cols = x0.floor().max(0.0) as usize..(x1.ceil().max(0.0) as usize).min(self.width);
        let rows = y0.floor().max(0.0) as usize..(y1.ceil().max(0.0) as usize).min(self.height);
        for row in rows {
            for col in cols.clone() {
                self.cells[row * self.width + col] = cell;
            }
        }
        Ok(())
    }

    // Stroke widths are well below one cell and are ignored.
    fn stroke_path(&mut self, path: &[Point2D], stroke: &Stroke) -> BlochResult<()> {
        let cell = ink(stroke.color, false);
        let points: Vec<(f64, f64)> = path.iter().map(|p| self.to_cell(*p)).collect();
        match points.as_slice() {
            [] => {}
            [only] => self.plot(only.0, only.1, cell),
            _ => {
                for pair in points.windows(2) {
                    self.raster_line(pair[0], pair[1], cell);
                }
            }
        }
        Ok(())
    }

    fn fill_path(&mut self, path: &[Point2D], color: Color) -> BlochResult<()> {
        let cell = ink(color, true);
        let points: Vec<(f64, f64)> = path.iter().map(|p| self.to_cell(*p)).collect();
        self.raster_polygon(&points, cell);
        Ok(())
    }

    fn fill_circle(&mut self, centre: Point2D, radius: f64, color: Color) -> BlochResult<()> {
        let cell = ink(color, true);
        let (cx, cy) = self.to_cell(centre);
        let reach_x = radius * self.scale;
        let reach_y = radius * self.scale / CELL_ASPECT;

        let cols = (cx - reach_x).floor().max(0.0) as usize
            ..((cx + reach_x).ceil().max(0.0) as usize).min(self.width);
        let rows = (cy - reach_y).floor().max(0.0) as usize
            ..((cy + reach_y).ceil().max(0.0) as usize).min(self.height);
        for row in rows {
            for col in cols.clone() {
                let (lx, ly) = self.to_logical(col, row);
                if (lx - centre.x).hypot(ly - centre.y) <= radius {
                    self.cells[row * self.width + col] = cell;
                }
            }
        }

        // a dot smaller than a cell still marks its cell
        self.plot(cx, cy, cell);
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        centre: Point2D,
        radius: f64,
        stroke: &Stroke,
    ) -> BlochResult<()> {
        let cell = ink(stroke.color, false);
        let (cx, cy) = self.to_cell(centre);
        let reach_x = radius * self.scale;
        let reach_y = radius * self.scale / CELL_ASPECT;

        // only cells inside the circle's box that is on screen are visited
        let cols = (cx - reach_x).floor().clamp(0.0, self.width as f64) as usize
            ..((cx + reach_x).floor() + 1.0).clamp(0.0, self.width as f64) as usize;
        let rows = (cy - reach_y).floor().clamp(0.0, self.height as f64) as usize
            ..((cy + reach_y).floor() + 1.0).clamp(0.0, self.height as f64) as usize;
        for row in rows {
            for col in cols.clone() {
                let (x0, y0) = self.to_logical(col, row);
                let (half_w, half_h) = (0.5 / self.scale, 0.5 * CELL_ASPECT / self.scale);
                let (dx, dy) = ((x0 - centre.x).abs(), (y0 - centre.y).abs());

                let near = (dx - half_w).max(0.0).hypot((dy - half_h).max(0.0));
                let far = (dx + half_w).hypot(dy + half_h);
                if near <= radius && radius <= far {
                    self.cells[row * self.width + col] = cell;
                }
            }
        }
        Ok(())
    }
}

/// Liang-Barsky clip of a segment to `[0, width] × [0, height]`
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, from.0),
        (dx, width - from.0),
        (-dy, from.1),
        (dy, height - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloch_core::Scene;

    fn canvas() -> AsciiCanvas {
        // 40×20 cells over a 200×200 logical surface: 5 logical units per column
        AsciiCanvas::new(40, 20, 200.0, 200.0)
    }

    #[test]
    fn test_scaling_fits_and_centres() {
        let c = AsciiCanvas::new(100, 20, 2000.0, 2000.0);
        // height-limited: 40 columns wide, centred
        assert!((c.scale - 0.02).abs() < 1e-12);
        assert!((c.offset_x - 30.0).abs() < 1e-12);
        assert!(c.offset_y.abs() < 1e-12);
    }

    #[test]
    fn test_fill_rect_covers_area() {
        let mut c = canvas();
        c.fill_rect(0.0, 0.0, 200.0, 200.0, Color::BLACK).unwrap();
        assert!(c.cells.iter().all(|cell| cell.glyph == '@'));

        c.fill_rect(0.0, 0.0, 200.0, 200.0, Color::WHITE).unwrap();
        assert!(c.cells.iter().all(|cell| *cell == BLANK));
    }

    #[test]
    fn test_horizontal_line() {
        let mut c = canvas();
        let stroke = Stroke::new(Color::BLACK, 3.0);
        c.stroke_line(Point2D::new(0.0, 101.0), Point2D::new(199.0, 101.0), &stroke)
            .unwrap();
        for col in 0..40 {
            assert_eq!(c.glyph_at(col, 10), Some('#'), "column {col}");
        }
        assert_eq!(c.glyph_at(0, 9), Some(' '));
    }

    #[test]
    fn test_light_grey_uses_faint_glyph() {
        let mut c = canvas();
        let stroke = Stroke::new(Color::LIGHT_GREY, 3.0);
        c.stroke_line(Point2D::new(0.0, 0.0), Point2D::new(0.0, 199.0), &stroke)
            .unwrap();
        assert_eq!(c.glyph_at(0, 5), Some('.'));
    }

    #[test]
    fn test_fill_path_square() {
        let mut c = canvas();
        let square = [
            Point2D::new(50.0, 50.0),
            Point2D::new(150.0, 50.0),
            Point2D::new(150.0, 150.0),
            Point2D::new(50.0, 150.0),
        ];
        c.fill_path(&square, Color::BLACK).unwrap();
        assert_eq!(c.glyph_at(20, 10), Some('@'));
        assert_eq!(c.glyph_at(2, 10), Some(' '));
        assert_eq!(c.glyph_at(20, 1), Some(' '));
    }

    #[test]
    fn test_tiny_dot_marks_a_cell() {
        let mut c = canvas();
        c.fill_circle(Point2D::new(100.0, 100.0), 0.5, Color::BLACK)
            .unwrap();
        assert_eq!(c.glyph_at(20, 10), Some('@'));
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut c = canvas();
        let stroke = Stroke::new(Color::BLACK, 3.0);
        c.stroke_line(Point2D::new(-500.0, -500.0), Point2D::new(900.0, 900.0), &stroke)
            .unwrap();
        c.stroke_circle(Point2D::new(100.0, 100.0), 1000.0, &stroke)
            .unwrap();
        assert_eq!(c.cells.len(), 40 * 20);
    }

    #[test]
    fn test_clip_segment() {
        let inside = clip_segment((1.0, 1.0), (3.0, 2.0), 10.0, 10.0).unwrap();
        assert_eq!(inside, ((1.0, 1.0), (3.0, 2.0)));

        let (a, b) = clip_segment((-10.0, 5.0), (20.0, 5.0), 10.0, 10.0).unwrap();
        assert!((a.0 - 0.0).abs() < 1e-12 && (b.0 - 10.0).abs() < 1e-12);
        assert_eq!((a.1, b.1), (5.0, 5.0));

        assert!(clip_segment((-5.0, -5.0), (-1.0, 20.0), 10.0, 10.0).is_none());
        assert!(clip_segment((0.0, f64::NAN), (1.0, 1.0), 10.0, 10.0).is_none());
    }

    #[test]
    fn test_huge_line_is_clipped_to_grid() {
        let mut c = canvas();
        let stroke = Stroke::new(Color::BLACK, 3.0);
        c.stroke_line(Point2D::new(-1e12, 101.0), Point2D::new(1e12, 101.0), &stroke)
            .unwrap();
        for col in 0..40 {
            assert_eq!(c.glyph_at(col, 10), Some('#'), "column {col}");
        }
    }

    #[test]
    fn test_stroke_circle_outline() {
        let mut c = canvas();
        let stroke = Stroke::new(Color::BLACK, 3.0);
        c.stroke_circle(Point2D::new(100.0, 100.0), 50.0, &stroke)
            .unwrap();
        assert_eq!(c.glyph_at(30, 10), Some('#'));
        assert_eq!(c.glyph_at(10, 10), Some('#'));
        assert_eq!(c.glyph_at(20, 5), Some('#'));
        assert_eq!(c.glyph_at(20, 10), Some(' '));
        assert_eq!(c.glyph_at(0, 0), Some(' '));
    }

    #[test]
    fn test_scene_renders_sphere() {
        let mut c = AsciiCanvas::new(80, 40, 2000.0, 2000.0);
        Scene::default().draw(&mut c, 0.0).unwrap();

        let text = c.to_text();
        assert_eq!(text.lines().count(), 40);
        assert!(text.contains('#'));
        assert!(text.contains('.'));
        assert!(text.contains('@'));
    }
}
