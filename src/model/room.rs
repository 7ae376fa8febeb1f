//! Rooms: semantic wrappers around floor solids.
//!
//! A room carries the shell geometry of one floor solid, classifies each
//! face by orientation and holds the window apertures cut into its
//! vertical faces.

use crate::error::GeometryConstructionError;
use crate::geom::solid::{shell_volume, FloorSolid};
use crate::random_id;
use crate::Polygon;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Face classification derived from the outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceKind {
    Floor,
    Ceiling,
    Wall,
}

/// What lies on the other side of a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Boundary {
    /// Exterior envelope.
    Outdoors,
    /// Shared interior boundary with a face of another room.
    Surface { room: String, face: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub name: String,
    pub kind: FaceKind,
    pub boundary: Boundary,
    pub polygon: Polygon,
    pub apertures: Vec<Polygon>,
}

impl Face {
    fn from_polygon(polygon: Polygon) -> Self {
        let kind = if polygon.is_horizontal() {
            if polygon.normal().dz < 0.0 {
                FaceKind::Floor
            } else {
                FaceKind::Ceiling
            }
        } else {
            FaceKind::Wall
        };
        Self {
            name: polygon.name.clone(),
            kind,
            boundary: Boundary::Outdoors,
            polygon,
            apertures: Vec::new(),
        }
    }

    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    pub fn aperture_area(&self) -> f64 {
        self.apertures.iter().map(|a| a.area()).sum()
    }

    pub fn is_exterior(&self) -> bool {
        self.boundary == Boundary::Outdoors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub uid: String,
    faces: Vec<Face>,
}

impl Room {
    /// Creates a room from a floor solid's shell.
    pub fn from_solid(name: &str, solid: &FloorSolid) -> Self {
        let faces = solid
            .faces()
            .iter()
            .cloned()
            .map(Face::from_polygon)
            .collect();
        Self {
            name: name.to_string(),
            uid: random_id(),
            faces,
        }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub(crate) fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    pub fn get_face(&self, name: &str) -> Option<&Face> {
        self.faces.iter().find(|f| f.name == name)
    }

    /// Cuts one centered aperture into every wall face, sized to the
    /// given ratio of window area to wall area. A ratio of zero removes
    /// all apertures. Ratios of 1 and above are rejected because a
    /// full-face opening leaves no frame.
    pub fn wall_apertures_by_ratio(&mut self, wwr: f64) -> Result<()> {
        if !(0.0..1.0).contains(&wwr) {
            return Err(GeometryConstructionError::new(format!(
                "window-to-wall ratio must be in [0, 1), got {wwr}"
            ))
            .into());
        }
        for face in self.faces.iter_mut() {
            if face.kind != FaceKind::Wall {
                continue;
            }
            face.apertures.clear();
            if wwr > 0.0 {
                let aperture = face
                    .polygon
                    .scaled_toward_centroid(wwr.sqrt(), &format!("{}_glz", face.name))
                    .map_err(|e| GeometryConstructionError::new(format!("{e:#}")))?;
                face.apertures.push(aperture);
            }
        }
        Ok(())
    }

    pub fn volume(&self) -> f64 {
        let polys: Vec<&Polygon> = self.faces.iter().map(|f| &f.polygon).collect();
        shell_volume(&polys)
    }

    /// Area of the floor faces.
    pub fn floor_area(&self) -> f64 {
        self.faces
            .iter()
            .filter(|f| f.kind == FaceKind::Floor)
            .map(|f| f.area())
            .sum()
    }

    /// Aperture area on exterior faces only.
    pub fn exterior_aperture_area(&self) -> f64 {
        self.faces
            .iter()
            .filter(|f| f.is_exterior())
            .map(|f| f.aperture_area())
            .sum()
    }
}
