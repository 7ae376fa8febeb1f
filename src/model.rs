pub mod building;
pub mod metrics;
pub mod room;
