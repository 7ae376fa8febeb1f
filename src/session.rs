//! Session-scoped state and the interaction pipeline.
//!
//! Each user session owns one `Session`: the last-submitted parameters,
//! the derived geometry and model, and a scoped temporary directory for
//! exported artifacts. Every interaction runs synchronously top to
//! bottom: footprint, extrusion, model, metrics, then optionally the
//! visualizer bridge. Rebuilds are gated on the change detector, so the
//! expensive pipeline only runs when a tracked parameter changed.

use crate::config::GeometryParams;
use crate::geom::{footprint, solid};
use crate::model::metrics::ModelMetrics;
use crate::viz;
use crate::{BuildingModel, FloorSolid, Point};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Identifier of the single generated building.
const MODEL_ID: &str = "shoe_box";

/// Last-recorded values of the tracked parameter keys.
///
/// The first observation of a key records it and reports unchanged; any
/// later differing value updates all recorded values and reports
/// changed, exactly once, until the values change again.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    footprint: Option<Vec<Point>>,
    floor_count: Option<usize>,
    floor_height: Option<f64>,
    wwr: Option<f64>,
}

impl ChangeDetector {
    /// Compares the current values against the last-recorded ones,
    /// records them, and reports whether anything differed.
    pub fn observe(
        &mut self,
        footprint: &[Point],
        floor_count: usize,
        floor_height: f64,
        wwr: f64,
    ) -> bool {
        let changed = self.differs(footprint, floor_count, floor_height, wwr);
        self.record(footprint, floor_count, floor_height, wwr);
        changed
    }

    /// True if any recorded value differs from the current one.
    /// Keys never recorded do not count as differing.
    fn differs(&self, footprint: &[Point], floor_count: usize, floor_height: f64, wwr: f64) -> bool {
        self.footprint
            .as_deref()
            .is_some_and(|prev| prev != footprint)
            || self.floor_count.is_some_and(|prev| prev != floor_count)
            || self.floor_height.is_some_and(|prev| prev != floor_height)
            || self.wwr.is_some_and(|prev| prev != wwr)
    }

    fn record(&mut self, footprint: &[Point], floor_count: usize, floor_height: f64, wwr: f64) {
        self.footprint = Some(footprint.to_vec());
        self.floor_count = Some(floor_count);
        self.floor_height = Some(floor_height);
        self.wwr = Some(wwr);
    }
}

/// All state owned by one user session.
///
/// One struct with explicit optional fields for "not yet set" replaces
/// the dynamic attribute bag of a framework session store; nothing here
/// is process-wide.
#[derive(Debug)]
pub struct Session {
    pub footprint: Option<Vec<Point>>,
    pub floor_count: Option<usize>,
    pub floor_height: Option<f64>,
    pub wwr: Option<f64>,
    pub floor_solids: Option<Vec<FloorSolid>>,
    pub model: Option<BuildingModel>,
    temp_dir: TempDir,
    pub export_path: Option<PathBuf>,
    pub visualize: Option<bool>,
    changes: ChangeDetector,
}

impl Session {
    pub fn new() -> Result<Self> {
        Ok(Self {
            footprint: None,
            floor_count: None,
            floor_height: None,
            wwr: None,
            floor_solids: None,
            model: None,
            temp_dir: TempDir::new().context("Failed to allocate session temp directory")?,
            export_path: None,
            visualize: None,
            changes: ChangeDetector::default(),
        })
    }

    /// The session's scoped temporary directory.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Overwrites the scalar parameters and the derived footprint.
    /// Values are clamped to the slider bounds first.
    pub fn set_parameters(&mut self, params: &GeometryParams) {
        let p = params.clamped();
        self.footprint = Some(footprint::rectangle(p.width, p.length));
        self.floor_count = Some(p.floor_count);
        self.floor_height = Some(p.floor_height);
        self.wwr = Some(p.wwr);
    }

    /// Recomputes floor solids and the building model from the current
    /// parameters. Skipped when no tracked parameter changed since the
    /// last successful build; the derived artifacts are otherwise
    /// replaced wholesale, never patched.
    ///
    /// Parameters are recorded in the change detector only after
    /// construction succeeds, so resubmitting failing parameters fails
    /// again instead of silently keeping a model built from earlier
    /// parameters.
    pub fn rebuild(&mut self) -> Result<()> {
        let footprint = self.footprint.as_ref().context("Footprint not set")?;
        let floor_count = self.floor_count.context("Floor count not set")?;
        let floor_height = self.floor_height.context("Floor height not set")?;
        let wwr = self.wwr.context("Window-to-wall ratio not set")?;

        let changed = self
            .changes
            .differs(footprint, floor_count, floor_height, wwr);
        if !changed && self.model.is_some() {
            tracing::debug!("parameters unchanged, keeping current model");
            return Ok(());
        }

        tracing::info!(floor_count, floor_height, wwr, "rebuilding model");
        let solids = solid::extrude_floors(footprint, floor_height, floor_count)?;
        let model = BuildingModel::build(MODEL_ID, &solids, wwr)?;

        self.changes
            .record(footprint, floor_count, floor_height, wwr);
        self.floor_solids = Some(solids);
        self.model = Some(model);
        Ok(())
    }

    /// Reads the three summary metrics off the current model, if any.
    pub fn metrics(&self) -> Option<ModelMetrics> {
        self.model.as_ref().map(ModelMetrics::read)
    }

    /// Turns visualization on or off.
    ///
    /// On: exports the model, converts it and returns the bundle bytes
    /// for the embedding host. Off: resets the export path and allocates
    /// a fresh temporary directory; returns None.
    pub fn set_visualize(&mut self, on: bool) -> Result<Option<Vec<u8>>> {
        self.visualize = Some(on);
        if !on {
            self.export_path = None;
            self.temp_dir =
                TempDir::new().context("Failed to allocate session temp directory")?;
            return Ok(None);
        }

        let model = self.model.as_ref().context("No model to visualize")?;
        let model_path = viz::export_model(model, self.temp_dir.path())?;
        let bundle = viz::create_viewer_bundle(&model_path)?;
        let bytes = std::fs::read(&bundle)
            .with_context(|| format!("Failed to read bundle: {}", bundle.display()))?;
        self.export_path = Some(model_path);
        Ok(Some(bytes))
    }
}
