//! The parameter contract of the UI surface.
//!
//! The sliders clamp their values to these bounds, so an out-of-range
//! parameter is prevented at the input level rather than handled as a
//! runtime error.

use serde::{Deserialize, Serialize};

/// Building width slider bounds, in meters.
pub const WIDTH_RANGE: (f64, f64) = (0.0, 50.0);
/// Building length slider bounds, in meters.
pub const LENGTH_RANGE: (f64, f64) = (0.0, 50.0);
/// Floor count slider bounds.
pub const FLOOR_COUNT_RANGE: (usize, usize) = (0, 6);
/// Floor height slider bounds, in meters.
pub const FLOOR_HEIGHT_RANGE: (f64, f64) = (2.0, 10.0);
/// Window-to-wall ratio slider bounds.
pub const WWR_RANGE: (f64, f64) = (0.0, 0.99);

/// The five numeric building-shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    pub width: f64,
    pub length: f64,
    pub floor_count: usize,
    pub floor_height: f64,
    pub wwr: f64,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            width: 10.0,
            length: 10.0,
            floor_count: 1,
            floor_height: 3.0,
            wwr: 0.4,
        }
    }
}

impl GeometryParams {
    /// Returns a copy with every parameter clamped to its slider bounds.
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.clamp(WIDTH_RANGE.0, WIDTH_RANGE.1),
            length: self.length.clamp(LENGTH_RANGE.0, LENGTH_RANGE.1),
            floor_count: self
                .floor_count
                .clamp(FLOOR_COUNT_RANGE.0, FLOOR_COUNT_RANGE.1),
            floor_height: self
                .floor_height
                .clamp(FLOOR_HEIGHT_RANGE.0, FLOOR_HEIGHT_RANGE.1),
            wwr: self.wwr.clamp(WWR_RANGE.0, WWR_RANGE.1),
        }
    }
}
