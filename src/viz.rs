//! Visualizer bridge: export, conversion and caching discipline.
//!
//! The model is serialized to its native JSON document inside the
//! session's temporary directory, converted to the renderer-native STL
//! bundle, and the raw bundle bytes are handed to the embedding host.
//! The converted bundle is cached keyed by the content hash of the
//! exported document, so a changed model can never be served from a
//! stale bundle with a coincidentally matching name.

use crate::error::VisualizationConversionError;
use crate::io;
use crate::BuildingModel;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory of the temp directory holding converted viewer bundles.
const BUNDLE_DIR: &str = "stl";

/// Writes the model's JSON document to `<dir>/<identifier>.b3m`,
/// overwriting if present, and returns the path.
pub fn export_model(model: &BuildingModel, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", model.identifier, io::MODEL_EXT));
    io::write_model(&path, model)?;
    tracing::debug!(path = %path.display(), "exported model document");
    Ok(path)
}

/// Converts an exported model document into a viewer bundle next to it,
/// under the `stl/` subdirectory, and returns the bundle path.
///
/// The bundle file name carries the content hash of the document;
/// conversion is skipped only when that exact file already exists.
pub fn create_viewer_bundle(model_path: &Path) -> Result<PathBuf> {
    let document = fs::read(model_path)
        .with_context(|| format!("Failed to read model document: {}", model_path.display()))?;
    let key = content_key(&document);

    let stem = model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            VisualizationConversionError::new(format!(
                "model path has no usable file stem: {}",
                model_path.display()
            ))
        })?;
    let bundle_dir = model_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(BUNDLE_DIR);
    fs::create_dir_all(&bundle_dir).map_err(|e| {
        VisualizationConversionError::new(format!(
            "failed to create bundle directory {}: {e}",
            bundle_dir.display()
        ))
    })?;

    let target = bundle_dir.join(format!("{stem}-{key}.stl"));
    if target.is_file() {
        tracing::debug!(path = %target.display(), "viewer bundle cache hit");
        return Ok(target);
    }

    let model = io::read_model(model_path)
        .map_err(|e| VisualizationConversionError::new(format!("{e:#}")))?;
    let stl = io::model_to_stl_bytes(&model)
        .map_err(|e| VisualizationConversionError::new(format!("{e:#}")))?;
    fs::write(&target, stl).map_err(|e| {
        VisualizationConversionError::new(format!(
            "failed to write bundle {}: {e}",
            target.display()
        ))
    })?;
    tracing::info!(path = %target.display(), "converted viewer bundle");
    Ok(target)
}

/// Exports, converts and returns the raw bundle bytes for embedding.
pub fn viewer_bytes(model: &BuildingModel, dir: &Path) -> Result<Vec<u8>> {
    let model_path = export_model(model, dir)?;
    let bundle = create_viewer_bundle(&model_path)?;
    fs::read(&bundle).with_context(|| format!("Failed to read bundle: {}", bundle.display()))
}

/// Cache key: first 16 hex chars of the SHA-256 of the document bytes.
fn content_key(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{footprint, solid::extrude_floors};
    use tempfile::tempdir;

    fn sample_model(floors: usize, wwr: f64) -> Result<BuildingModel> {
        let fp = footprint::rectangle(10., 10.);
        let solids = extrude_floors(&fp, 3., floors)?;
        BuildingModel::build("shoe_box", &solids, wwr)
    }

    #[test]
    fn test_export_uses_identifier_and_extension() -> Result<()> {
        let dir = tempdir()?;
        let model = sample_model(1, 0.4)?;
        let path = export_model(&model, dir.path())?;
        assert_eq!(path.file_name().unwrap(), "shoe_box.b3m");
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn test_bundle_is_keyed_by_content() -> Result<()> {
        let dir = tempdir()?;
        let model = sample_model(1, 0.4)?;
        let model_path = export_model(&model, dir.path())?;
        let bundle_a = create_viewer_bundle(&model_path)?;
        assert!(bundle_a.is_file());
        assert!(bundle_a.parent().unwrap().ends_with(BUNDLE_DIR));

        // Same document converts to the same (cached) bundle
        let bundle_b = create_viewer_bundle(&model_path)?;
        assert_eq!(bundle_a, bundle_b);

        // A changed model exports a different document, which hashes to
        // a different bundle name - the old bundle cannot be served
        let changed = sample_model(2, 0.4)?;
        let model_path = export_model(&changed, dir.path())?;
        let bundle_c = create_viewer_bundle(&model_path)?;
        assert_ne!(bundle_a, bundle_c);
        assert!(bundle_c.is_file());
        Ok(())
    }

    #[test]
    fn test_viewer_bytes_returns_bundle_content() -> Result<()> {
        let dir = tempdir()?;
        let model = sample_model(2, 0.4)?;
        let bytes = viewer_bytes(&model, dir.path())?;
        assert!(bytes.starts_with(b"binary STL - shoe_box"));
        assert!(bytes.len() > 84);
        Ok(())
    }

    #[test]
    fn test_missing_document_is_a_conversion_error() {
        let result = create_viewer_bundle(Path::new("/nonexistent/shoe_box.b3m"));
        assert!(result.is_err());
    }
}
