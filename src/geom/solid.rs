//! Floor solids and the floor-by-floor extruder.
//!
//! A `FloorSolid` is one building story: a closed polyhedral shell made
//! of a bottom face, a top face and one side face per footprint edge.
//! Each solid is independently closed - consecutive floors do not share
//! faces, their top and bottom faces merely coincide in space.

use crate::error::GeometryConstructionError;
use crate::geom::JOIN_TOL;
use crate::random_id;
use crate::{Point, Polygon};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One story's closed polyhedral shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorSolid {
    pub name: String,
    pub uid: String,
    faces: Vec<Polygon>,
}

impl FloorSolid {
    /// Creates a solid from its boundary faces.
    ///
    /// The faces are joined within [`JOIN_TOL`]; joining that leaves any
    /// boundary edge unpaired is a construction failure.
    pub fn new(name: &str, faces: Vec<Polygon>) -> Result<Self> {
        let solid = Self {
            name: name.to_string(),
            uid: random_id(),
            faces,
        };
        solid.check_watertight(JOIN_TOL)?;
        Ok(solid)
    }

    pub fn faces(&self) -> &[Polygon] {
        &self.faces
    }

    pub fn get_face(&self, name: &str) -> Option<&Polygon> {
        self.faces.iter().find(|f| f.name == name)
    }

    /// Enclosed volume via signed tetrahedra over fan-triangulated faces.
    ///
    /// Exact for planar convex faces with outward normals.
    pub fn volume(&self) -> f64 {
        let polys: Vec<&Polygon> = self.faces.iter().collect();
        shell_volume(&polys)
    }

    /// Verifies that every edge of the shell is shared by exactly two
    /// faces within the given tolerance.
    fn check_watertight(&self, tol: f64) -> Result<()> {
        let mut edges: Vec<(Point, Point)> = Vec::new();
        for face in self.faces.iter() {
            edges.extend(face.edges());
        }
        for (i, (a0, a1)) in edges.iter().enumerate() {
            let mut shared = 0;
            for (b0, b1) in edges.iter() {
                let same = a0.is_close_within(b0, tol) && a1.is_close_within(b1, tol);
                let flipped = a0.is_close_within(b1, tol) && a1.is_close_within(b0, tol);
                if same || flipped {
                    shared += 1;
                }
            }
            if shared != 2 {
                return Err(GeometryConstructionError::new(format!(
                    "solid '{}' is not watertight: edge {} is shared by {} faces",
                    self.name, i, shared
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Signed-tetrahedron volume of a closed shell with outward normals.
pub(crate) fn shell_volume(faces: &[&Polygon]) -> f64 {
    let origin = Point::new(0., 0., 0.);
    let mut six_v = 0.0;
    for face in faces.iter() {
        let pts = face.vertices();
        let v0 = pts[0] - origin;
        for i in 1..pts.len() - 1 {
            let vi = pts[i] - origin;
            let vj = pts[i + 1] - origin;
            six_v += v0.dot(vi.cross(vj));
        }
    }
    (six_v / 6.0).abs()
}

/// Extrudes a footprint into `floor_count` independently closed floor
/// solids stacked bottom-to-top.
///
/// For floor index `i`, the bottom face lies at `i * floor_height` and
/// the top face at `(i + 1) * floor_height`. The top face is added for
/// every floor, not only the topmost one, so that each solid is
/// watertight on its own. Side faces wind with the footprint's edge
/// direction, which makes all normals point outward when the footprint
/// is counter-clockwise.
///
/// A floor count of zero yields an empty sequence. Every invocation
/// recomputes the full sequence from scratch.
pub fn extrude_floors(
    footprint: &[Point],
    floor_height: f64,
    floor_count: usize,
) -> Result<Vec<FloorSolid>> {
    if floor_count == 0 {
        return Ok(Vec::new());
    }
    if !(floor_height > 0.0) {
        return Err(GeometryConstructionError::new(format!(
            "floor height must be positive, got {floor_height}"
        ))
        .into());
    }

    let n = footprint.len();
    let mut solids: Vec<FloorSolid> = Vec::with_capacity(floor_count);

    for i in 0..floor_count {
        let base_height = i as f64 * floor_height;
        let top_height = (i + 1) as f64 * floor_height;
        let mut faces: Vec<Polygon> = Vec::with_capacity(n + 2);

        // Bottom face: footprint lifted to the base height, reversed so
        // the outward normal points down.
        let bottom_pts: Vec<Point> = footprint
            .iter()
            .rev()
            .map(|pt| pt.at_height(base_height))
            .collect();
        faces.push(construction_polygon("floor", bottom_pts)?);

        // One side face per footprint edge.
        for j in 0..n {
            let beg = footprint[j];
            let end = footprint[(j + 1) % n];
            let quad = vec![
                beg.at_height(base_height),
                end.at_height(base_height),
                end.at_height(top_height),
                beg.at_height(top_height),
            ];
            faces.push(construction_polygon(&format!("wall_{j}"), quad)?);
        }

        // Top face for every floor, so each solid is independently closed.
        let top_pts: Vec<Point> = footprint.iter().map(|pt| pt.at_height(top_height)).collect();
        faces.push(construction_polygon("ceiling", top_pts)?);

        solids.push(FloorSolid::new(&format!("floor_{i}"), faces)?);
    }

    Ok(solids)
}

fn construction_polygon(name: &str, pts: Vec<Point>) -> Result<Polygon> {
    Polygon::new(name, pts)
        .map_err(|e| GeometryConstructionError::new(format!("{e:#}")).into())
}
