//! Conversion of a building model to binary STL.
//!
//! STL loses the semantic hierarchy - it only carries raw triangles, one
//! fan per face and per aperture outline. This is the renderer-native
//! format handed to the embedded viewer.

use crate::{BuildingModel, Point, Polygon, Vector};
use anyhow::Result;
use std::io::Write;

/// Size in bytes of one binary STL facet record.
const FACET_SIZE: usize = 50;

/// Converts a model to binary STL bytes.
pub fn model_to_stl_bytes(model: &BuildingModel) -> Result<Vec<u8>> {
    let mut triangles: Vec<[Point; 3]> = Vec::new();
    for room in model.rooms() {
        for face in room.faces() {
            collect_triangles(&face.polygon, &mut triangles);
            for aperture in face.apertures.iter() {
                collect_triangles(aperture, &mut triangles);
            }
        }
    }

    let mut buf: Vec<u8> = Vec::with_capacity(84 + FACET_SIZE * triangles.len());

    // 80-byte header
    let mut header = [0u8; 80];
    let tag = format!("binary STL - {}", model.identifier);
    let bytes = tag.as_bytes();
    let len = bytes.len().min(80);
    header[..len].copy_from_slice(&bytes[..len]);
    buf.write_all(&header)?;

    // Number of triangles (u32 little-endian)
    buf.write_all(&(triangles.len() as u32).to_le_bytes())?;

    for [p0, p1, p2] in triangles.iter() {
        let v1 = *p1 - *p0;
        let v2 = *p2 - *p0;
        let normal = v1.cross(v2).normalize().unwrap_or(Vector::new(0., 0., 1.));

        write_f32_triple(&mut buf, normal.dx, normal.dy, normal.dz)?;
        write_f32_triple(&mut buf, p0.x, p0.y, p0.z)?;
        write_f32_triple(&mut buf, p1.x, p1.y, p1.z)?;
        write_f32_triple(&mut buf, p2.x, p2.y, p2.z)?;
        // Attribute byte count
        buf.write_all(&0u16.to_le_bytes())?;
    }

    Ok(buf)
}

/// Fan triangulation of a convex face loop.
fn collect_triangles(poly: &Polygon, out: &mut Vec<[Point; 3]>) {
    let pts = poly.vertices();
    for i in 1..pts.len() - 1 {
        out.push([pts[0], pts[i], pts[i + 1]]);
    }
}

fn write_f32_triple(buf: &mut Vec<u8>, a: f64, b: f64, c: f64) -> Result<()> {
    buf.write_all(&(a as f32).to_le_bytes())?;
    buf.write_all(&(b as f32).to_le_bytes())?;
    buf.write_all(&(c as f32).to_le_bytes())?;
    Ok(())
}
