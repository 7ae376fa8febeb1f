//! Named error kinds callers can recover by downcasting.
//!
//! Errors travel as `anyhow::Error` throughout; these types mark the two
//! failure classes that callers distinguish from generic failures.

use thiserror::Error;

/// Geometry could not be constructed from the given parameters, e.g. a
/// degenerate footprint or an open shell.
#[derive(Debug, Error)]
#[error("geometry construction failed: {reason}")]
pub struct GeometryConstructionError {
    pub reason: String,
}

impl GeometryConstructionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The exported model document could not be converted into a viewer
/// bundle.
#[derive(Debug, Error)]
#[error("visualization conversion failed: {reason}")]
pub struct VisualizationConversionError {
    pub reason: String,
}

impl VisualizationConversionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
