/// Point and 2D vector primitives for the projection pipeline
use nalgebra::{Point2, Point3, Vector2};

/// A projected point on the drawing surface
pub type Point2D = Point2<f64>;

/// A point in sphere space, centred on the origin
pub type Point3D = Point3<f64>;

/// Normalise a 2D vector.
///
/// Zero-length input is not guarded and yields NaN components; use
/// [`try_unit_vector`] where the input may be degenerate.
pub fn unit_vector(x: f64, y: f64) -> Vector2<f64> {
    let m = (x * x + y * y).sqrt();
    Vector2::new(x / m, y / m)
}

/// Normalise a 2D vector, returning `None` for zero-length input
pub fn try_unit_vector(x: f64, y: f64) -> Option<Vector2<f64>> {
    let m = (x * x + y * y).sqrt();
    if m == 0.0 || !m.is_finite() {
        return None;
    }
    Some(Vector2::new(x / m, y / m))
}

/// Rotate a 2D vector by 90 degrees.
///
/// The second row is `sin·x - cos·y` rather than `sin·x + cos·y`; at 90
/// degrees `cos` is ~6e-17 so the result matches a counter-clockwise
/// quarter turn to within rounding.
pub fn normal_vector(x: f64, y: f64) -> Vector2<f64> {
    let theta = std::f64::consts::FRAC_PI_2;
    let x2 = theta.cos() * x - theta.sin() * y;
    let y2 = theta.sin() * x - theta.cos() * y;
    Vector2::new(x2, y2)
}
