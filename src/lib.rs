pub mod config;
pub mod error;
pub mod geom;
pub mod io;
pub mod model;
pub mod session;
pub mod viz;

// Prelude
pub use config::GeometryParams;
pub use error::{GeometryConstructionError, VisualizationConversionError};
pub use geom::point::Point;
pub use geom::polygon::Polygon;
pub use geom::solid::FloorSolid;
pub use geom::vector::Vector;
pub use model::building::BuildingModel;
pub use model::metrics::ModelMetrics;
pub use model::room::Room;
pub use session::Session;

use uuid::Uuid;

/// Returns a random UUID string.
pub(crate) fn random_id() -> String {
    Uuid::new_v4().to_string()
}
