//! Footprint construction.
//!
//! A footprint is the ordered loop of ground-plane corners defining a
//! building's horizontal extent. It is kept as a bare point loop, not a
//! validated polygon: degenerate dimensions (width or length of zero)
//! are accepted here and only rejected by the extruder, which fails with
//! a construction error when it cannot build valid faces from them.

use crate::Point;

/// Returns the four corners of a rectangular footprint in the z=0 plane,
/// ordered counter-clockwise starting at the origin (outward normal +z).
pub fn rectangle(width: f64, length: f64) -> Vec<Point> {
    vec![
        Point::new(0., 0., 0.),
        Point::new(width, 0., 0.),
        Point::new(width, length, 0.),
        Point::new(0., length, 0.),
    ]
}
