//! Pure trigonometric helpers.
//!
//! All angles are radians, measured counter-clockwise from the positive
//! x-axis. Degrees exist only in `Rotate` instructions and are converted
//! once, in the compiler. Inputs are assumed finite; NaN and infinity
//! propagate per IEEE754.

use crate::types::Point;

/// Direction of travel from `a` to `b`, in radians.
pub fn angle_between(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Advance `current` by `distance` along `heading`.
pub fn move_with_heading(current: Point, heading: f64, distance: f64) -> Point {
    Point::new(
        current.x + heading.cos() * distance,
        current.y + heading.sin() * distance,
    )
}

/// Shift a point by a fixed delta.
pub fn translate(point: Point, dx: f64, dy: f64) -> Point {
    Point::new(point.x + dx, point.y + dy)
}
