/// Host-independent drawing surface abstraction
use crate::error::BlochResult;
use crate::geometry::Point2D;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// CSS `lightgrey`
    pub const LIGHT_GREY: Color = Color::rgb(211, 211, 211);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form accepted by CSS and canvas styles
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived brightness in `0.0..=1.0`
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

/// Stroke style for lines and outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// The primitives a 2D host has to provide to draw the scene
pub trait DrawingSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color)
        -> BlochResult<()>;

    /// Stroke an open polyline through `path`
    fn stroke_path(&mut self, path: &[Point2D], stroke: &Stroke) -> BlochResult<()>;

    /// Fill the polygon enclosed by `path`
    fn fill_path(&mut self, path: &[Point2D], color: Color) -> BlochResult<()>;

    fn stroke_line(&mut self, from: Point2D, to: Point2D, stroke: &Stroke) -> BlochResult<()> {
        self.stroke_path(&[from, to], stroke)
    }

    fn fill_circle(&mut self, centre: Point2D, radius: f64, color: Color) -> BlochResult<()>;

    fn stroke_circle(&mut self, centre: Point2D, radius: f64, stroke: &Stroke)
        -> BlochResult<()>;
}

/// A single recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    StrokePath {
        path: Vec<Point2D>,
        stroke: Stroke,
    },
    FillPath {
        path: Vec<Point2D>,
        color: Color,
    },
    StrokeLine {
        from: Point2D,
        to: Point2D,
        stroke: Stroke,
    },
    FillCircle {
        centre: Point2D,
        radius: f64,
        color: Color,
    },
    StrokeCircle {
        centre: Point2D,
        radius: f64,
        stroke: Stroke,
    },
}

/// Surface that records every call instead of drawing it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawingSurface for RecordingSurface {
    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> BlochResult<()> {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &[Point2D], stroke: &Stroke) -> BlochResult<()> {
        self.commands.push(DrawCommand::StrokePath {
            path: path.to_vec(),
            stroke: *stroke,
        });
        Ok(())
    }

    fn fill_path(&mut self, path: &[Point2D], color: Color) -> BlochResult<()> {
        self.commands.push(DrawCommand::FillPath {
            path: path.to_vec(),
            color,
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D, stroke: &Stroke) -> BlochResult<()> {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            stroke: *stroke,
        });
        Ok(())
    }

    fn fill_circle(&mut self, centre: Point2D, radius: f64, color: Color) -> BlochResult<()> {
        self.commands.push(DrawCommand::FillCircle {
            centre,
            radius,
            color,
        });
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        centre: Point2D,
        radius: f64,
        stroke: &Stroke,
    ) -> BlochResult<()> {
        self.commands.push(DrawCommand::StrokeCircle {
            centre,
            radius,
            stroke: *stroke,
        });
        Ok(())
    }
}
