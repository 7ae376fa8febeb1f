//! The native JSON format for building models.
//!
//! A full-fidelity dump of the model hierarchy (rooms, faces, apertures,
//! boundaries) including UIDs for reference integrity.

use crate::BuildingModel;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// File extension of the native model format.
pub const MODEL_EXT: &str = "b3m";

/// Writes a model to a JSON file, overwriting if present.
pub fn write_model(path: &Path, model: &BuildingModel) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, model)
        .with_context(|| format!("Failed to serialize model to: {}", path.display()))?;

    Ok(())
}

/// Reads a model from a JSON file.
pub fn read_model(path: &Path) -> Result<BuildingModel> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let model: BuildingModel = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize model from: {}", path.display()))?;

    Ok(model)
}

/// Serializes a model to a JSON string.
pub fn to_json_string(model: &BuildingModel) -> Result<String> {
    serde_json::to_string_pretty(model).context("Failed to serialize model to string")
}

/// Deserializes a model from a JSON string.
pub fn from_json_string(json: &str) -> Result<BuildingModel> {
    serde_json::from_str(json).context("Failed to deserialize model from string")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{footprint, solid::extrude_floors};
    use tempfile::tempdir;

    fn sample_model(floors: usize) -> Result<BuildingModel> {
        let fp = footprint::rectangle(10., 10.);
        let solids = extrude_floors(&fp, 3., floors)?;
        BuildingModel::build("shoe_box", &solids, 0.4)
    }

    #[test]
    fn test_write_and_read_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(format!("test.{MODEL_EXT}"));

        let original = sample_model(2)?;
        write_model(&path, &original)?;
        let loaded = read_model(&path)?;

        assert_eq!(loaded.identifier, original.identifier);
        assert_eq!(loaded.uid, original.uid);
        assert_eq!(loaded.rooms().len(), original.rooms().len());
        assert!((loaded.volume() - original.volume()).abs() < 1e-10);
        assert!(
            (loaded.exterior_aperture_area() - original.exterior_aperture_area()).abs() < 1e-10
        );
        Ok(())
    }

    #[test]
    fn test_write_overwrites_existing_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(format!("test.{MODEL_EXT}"));

        let first = sample_model(1)?;
        write_model(&path, &first)?;
        let second = sample_model(3)?;
        write_model(&path, &second)?;

        let loaded = read_model(&path)?;
        assert_eq!(loaded.rooms().len(), 3);
        Ok(())
    }

    #[test]
    fn test_string_roundtrip_preserves_boundaries() -> Result<()> {
        let original = sample_model(2)?;
        let json = to_json_string(&original)?;
        assert!(json.contains("\"shoe_box\""));
        assert!(json.contains("Surface"));

        let loaded = from_json_string(&json)?;
        let top0 = loaded.get_room("room_0").unwrap().get_face("ceiling").unwrap();
        assert!(!top0.is_exterior());
        Ok(())
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_model(Path::new("/nonexistent/path/file.b3m"));
        assert!(result.is_err());
    }
}
