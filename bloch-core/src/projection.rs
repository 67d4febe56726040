/// Sphere sampling and the fixed rotate-then-translate projection
use crate::geometry::{Point2D, Point3D};
use crate::view::ViewState;

/// Azimuth step (degrees) used when sweeping a line of latitude
pub const LATITUDE_STEP_DEGREES: usize = 5;

impl ViewState {
    /// Project a sphere-space point onto the drawing surface.
    ///
    /// Rotates about the x axis by `alpha`, then about the y axis by `beta`,
    /// drops depth and translates by `(cx, cy)`.
    pub fn project_point(&self, point: &Point3D) -> Point2D {
        let alpha = self.angle_unit.to_radians(self.alpha);
        let beta = self.angle_unit.to_radians(self.beta);

        let (sa, ca) = alpha.sin_cos();
        let (sb, cb) = beta.sin_cos();

        let x2 = point.x;
        let y2 = ca * point.y + sa * point.z;
        let z2 = -sa * point.y + ca * point.z;

        let x3 = cb * x2 - sb * z2;
        let y3 = y2;

        Point2D::new(x3 + self.cx, y3 + self.cy)
    }

    /// Point on the sphere surface at polar angle `theta` and azimuth `phi`
    /// (both degrees)
    pub fn surface_vector(&self, theta: f64, phi: f64) -> Point3D {
        let theta = theta.to_radians();
        let phi = phi.to_radians();
        let r = self.sphere_radius;

        Point3D::new(
            r * theta.sin() * phi.cos(),
            r * theta.sin() * phi.sin(),
            r * theta.cos(),
        )
    }

    pub fn project_surface(&self, theta: f64, phi: f64) -> Point2D {
        self.project_point(&self.surface_vector(theta, phi))
    }

    /// Projected polyline of constant polar angle, sampled every 5 degrees of
    /// azimuth from 0 to 360 inclusive
    pub fn line_of_latitude(&self, latitude: f64) -> Vec<Point2D> {
        (0..=360)
            .step_by(LATITUDE_STEP_DEGREES)
            .map(|phi| self.project_surface(latitude, phi as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::AngleUnit;

    #[test]
    fn test_line_of_latitude_is_closed() {
        let view = ViewState::default();
        for latitude in (0..=180).step_by(5) {
            let path = view.line_of_latitude(latitude as f64);
            assert_eq!(path.len(), 73);
            let first = path[0];
            let last = path[72];
            assert!((first - last).norm() < 1e-9, "latitude {latitude} not closed");
        }
    }

    #[test]
    fn test_surface_vector_on_sphere() {
        let view = ViewState::default();
        for theta in (0..=180).step_by(15) {
            for phi in (0..360).step_by(20) {
                let p = view.surface_vector(theta as f64, phi as f64);
                let r = p.coords.norm();
                assert!((r - view.sphere_radius).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_surface_vector_poles() {
        let view = ViewState::default();
        let north = view.surface_vector(0.0, 123.0);
        assert!((north.z - 800.0).abs() < 1e-9);
        let south = view.surface_vector(180.0, 0.0);
        assert!((south.z + 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_point_deterministic() {
        let view = ViewState::default();
        let p = Point3D::new(12.5, -300.0, 42.0);
        assert_eq!(view.project_point(&p), view.project_point(&p));
    }

    #[test]
    fn test_project_point_translation() {
        let view = ViewState::default();
        let moved = view.centred_at(view.cx + 37.0, view.cy - 11.5);
        let p = Point3D::new(250.0, 100.0, -600.0);
        let a = view.project_point(&p);
        let b = moved.project_point(&p);
        assert!((b.x - a.x - 37.0).abs() < 1e-9);
        assert!((b.y - a.y + 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_equator_point_projects_to_silhouette() {
        let view = ViewState::default();
        let p = view.project_surface(90.0, 0.0);
        let centre = Point2D::new(1000.0, 1000.0);
        assert!(((p - centre).norm() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_raw_angles_are_not_degrees() {
        let raw = ViewState::default();
        let degrees = ViewState {
            angle_unit: AngleUnit::Degrees,
            ..raw
        };
        let p = raw.surface_vector(0.0, 0.0);
        let a = raw.project_point(&p);
        let b = degrees.project_point(&p);
        // north pole: y = sin(alpha) * R
        assert!((a.y - (1000.0 + 70f64.sin() * 800.0)).abs() < 1e-9);
        assert!((b.y - (1000.0 + 70f64.to_radians().sin() * 800.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rotation_is_orthographic_top_view() {
        let view = ViewState::new(0.0, 0.0, 0.0, 0.0, 1.0);
        let p = view.project_point(&Point3D::new(3.0, 4.0, 5.0));
        assert!((p.x - 3.0).abs() < 1e-12);
        assert!((p.y - 4.0).abs() < 1e-12);
    }
}
