use nalgebra as na;

/// A plain coordinate in pixel space or world space. The space is fixed by
/// context; the two only meet through a `CoordinateSystem`.
pub type Point2D = na::Point2<f64>;

pub type Vector2D = na::Vector2<f64>;

#[inline]
pub fn point(x: f64, y: f64) -> Point2D {
    na::Point2::new(x, y)
}

#[inline]
pub fn distance(a: &Point2D, b: &Point2D) -> f64 {
    na::distance(a, b)
}

/// Counter-clockwise rotation by `degrees`:
/// `x' = x·cosθ - y·sinθ`, `y' = x·sinθ + y·cosθ`.
#[inline]
pub fn rotate_deg(v: Vector2D, degrees: f64) -> Vector2D {
    na::Rotation2::new(degrees.to_radians()) * v
}
