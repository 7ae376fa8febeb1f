//! Stateless metric readout of an assembled building model.

use crate::BuildingModel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three summary metrics shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub volume: f64,
    pub floor_area: f64,
    pub exterior_aperture_area: f64,
}

impl ModelMetrics {
    /// Reads the aggregates off an already-built model. No side effects.
    pub fn read(model: &BuildingModel) -> Self {
        Self {
            volume: model.volume(),
            floor_area: model.floor_area(),
            exterior_aperture_area: model.exterior_aperture_area(),
        }
    }

    /// Glazing area rounded to 1 decimal place for display.
    pub fn glazing_area_rounded(&self) -> f64 {
        (self.exterior_aperture_area * 10.0).round() / 10.0
    }
}

impl fmt::Display for ModelMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total volume: {} m3", self.volume)?;
        writeln!(f, "Total area: {} m2", self.floor_area)?;
        write!(f, "Total glazing area: {:.1} m2", self.exterior_aperture_area)
    }
}
