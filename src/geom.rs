pub mod footprint;
pub mod point;
pub mod polygon;
pub mod solid;
pub mod vector;

/// Geometric precision
pub(crate) const EPS: f64 = 1e-9;

/// Maximum coordinate deviation (in length units) for treating two
/// geometric boundaries as coincident when joining faces and solving
/// adjacency.
pub const JOIN_TOL: f64 = 0.01;
