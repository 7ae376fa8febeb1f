//! File I/O for building models.

pub mod json;
pub mod stl;

pub use json::{read_model, write_model, MODEL_EXT};
pub use stl::model_to_stl_bytes;
