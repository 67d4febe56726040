/// Frame composition: guide lines, axis arrows and the state vector
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::BlochResult;
use crate::geometry::{normal_vector, try_unit_vector, Point2D};
use crate::surface::{Color, DrawingSurface, Stroke};
use crate::view::{StateVectorAngles, ViewState};

/// Polar angles (degrees) of the light-grey latitude guides
pub const GUIDE_LATITUDES: std::ops::Range<u32> = 10..180;
pub const GUIDE_LATITUDE_STEP: usize = 10;
pub const EQUATOR: f64 = 90.0;

/// Sizes and widths used when composing a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    pub surface_width: f64,
    pub surface_height: f64,
    pub line_width: f64,
    pub dot_radius: f64,
    pub arrow_half_width: f64,
    pub arrow_length: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            surface_width: 2000.0,
            surface_height: 2000.0,
            line_width: 3.0,
            dot_radius: 10.0,
            arrow_half_width: 22.0,
            arrow_length: 40.0,
        }
    }
}

/// Everything needed to redraw the Bloch sphere for a given time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub view: ViewState,
    pub state: StateVectorAngles,
    pub style: SceneStyle,
    /// Sphere spin rate in degrees per second of accumulated time
    pub degrees_per_second: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            view: ViewState::default(),
            state: StateVectorAngles::default(),
            style: SceneStyle::default(),
            degrees_per_second: 30.0,
        }
    }
}

impl Scene {
    pub fn new(view: ViewState, state: StateVectorAngles, style: SceneStyle) -> Self {
        Self {
            view,
            state,
            style,
            ..Self::default()
        }
    }

    fn stroke(&self, color: Color) -> Stroke {
        Stroke::new(color, self.style.line_width)
    }

    fn centre(&self) -> Point2D {
        Point2D::new(self.view.cx, self.view.cy)
    }

    /// Azimuth offset (degrees) after `time_ms` of animation
    pub fn rotation_offset(&self, time_ms: f64) -> f64 {
        self.degrees_per_second * time_ms / 1000.0
    }

    pub fn draw_line_of_latitude<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        latitude: f64,
        color: Color,
    ) -> BlochResult<()> {
        let path = self.view.line_of_latitude(latitude);
        surface.stroke_path(&path, &self.stroke(color))
    }

    /// Polygon of an arrowhead whose tip sits at `tip`, pointing along
    /// `direction`
    pub fn arrow_head(&self, tip: Point2D, direction: Vector2<f64>) -> Vec<Point2D> {
        let w = self.style.arrow_half_width;
        let h = self.style.arrow_length;
        let u = normal_vector(direction.x, direction.y);
        let n = normal_vector(u.x, u.y);

        vec![
            tip,
            tip + u * w + n * h,
            tip + n * (h * 0.8),
            tip - u * w + n * h,
            tip,
        ]
    }

    pub fn draw_arrow_head<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        tip: Point2D,
        direction: Vector2<f64>,
    ) -> BlochResult<()> {
        let path = self.arrow_head(tip, direction);
        surface.fill_path(&path, Color::BLACK)
    }

    /// Arrow from the sphere centre to the surface point `(theta, phi)`
    pub fn draw_axis<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        theta: f64,
        phi: f64,
    ) -> BlochResult<()> {
        let centre = self.centre();
        let tip = self.view.project_surface(theta, phi);
        surface.stroke_line(centre, tip, &self.stroke(Color::BLACK))?;

        // an axis seen end-on has no direction to point the head along
        match try_unit_vector(tip.x - centre.x, tip.y - centre.y) {
            Some(direction) => self.draw_arrow_head(surface, tip, direction),
            None => Ok(()),
        }
    }

    /// State-vector line plus the dot at its tip
    pub fn draw_state<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        time_ms: f64,
    ) -> BlochResult<()> {
        let r = self.rotation_offset(time_ms);
        let tip = self.view.project_surface(
            self.state.alpha,
            self.state.beta + self.view.sphere_rotation + r,
        );

        surface.stroke_line(self.centre(), tip, &self.stroke(Color::BLACK))?;
        surface.fill_circle(tip, self.style.dot_radius, Color::BLACK)
    }

    /// Redraw the whole frame from scratch
    pub fn draw<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        time_ms: f64,
    ) -> BlochResult<()> {
        surface.fill_rect(
            0.0,
            0.0,
            self.style.surface_width,
            self.style.surface_height,
            Color::WHITE,
        )?;

        for latitude in GUIDE_LATITUDES.step_by(GUIDE_LATITUDE_STEP) {
            self.draw_line_of_latitude(surface, latitude as f64, Color::LIGHT_GREY)?;
        }

        let spin = self.view.sphere_rotation + self.rotation_offset(time_ms);
        self.draw_axis(surface, 180.0, spin)?;
        self.draw_axis(surface, 90.0, spin)?;
        self.draw_axis(surface, 90.0, 90.0 + spin)?;

        self.draw_state(surface, time_ms)?;

        surface.stroke_circle(
            self.centre(),
            self.view.sphere_radius,
            &self.stroke(Color::BLACK),
        )?;

        self.draw_line_of_latitude(surface, EQUATOR, Color::BLACK)
    }
}
