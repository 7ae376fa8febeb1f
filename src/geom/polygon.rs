use crate::random_id;
use crate::{Point, Vector};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold on the z-component of the unit normal below which a face
/// counts as horizontal (or above which, depending on sign).
const HORIZONTAL_DZ: f64 = 1.0 - 1e-6;

/// An ordered, closed loop of coplanar points. The first and last points
/// are implicitly connected. Winding order determines the outward-facing
/// normal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub name: String,
    pub uid: String,
    pts: Vec<Point>,
    vn: Vector,
}

impl Polygon {
    /// Creates a polygon from an ordered loop of points.
    ///
    /// Fails if there are fewer than 3 points, any coordinate is not
    /// finite, two consecutive points coincide (the closing edge
    /// included), or the points are collinear so that no normal exists.
    pub fn new(name: &str, pts: Vec<Point>) -> Result<Self> {
        if pts.len() < 3 {
            return Err(anyhow!(
                "Polygon '{}' needs at least 3 points, got {}",
                name,
                pts.len()
            ));
        }
        for pt in pts.iter() {
            if !pt.is_finite() {
                return Err(anyhow!("Polygon '{}' has a non-finite point: {}", name, pt));
            }
        }
        for i in 0..pts.len() {
            let j = (i + 1) % pts.len();
            if pts[i].is_close(&pts[j]) {
                return Err(anyhow!(
                    "Polygon '{}' has duplicate consecutive points at index {}",
                    name,
                    i
                ));
            }
        }
        let vn = newell_vector(&pts)
            .normalize()
            .ok_or_else(|| anyhow!("Polygon '{}' is degenerate (no normal)", name))?;

        Ok(Self {
            name: name.to_string(),
            uid: random_id(),
            pts,
            vn,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    /// Unit normal implied by the winding order.
    pub fn normal(&self) -> Vector {
        self.vn
    }

    /// Surface area (Newell's method).
    pub fn area(&self) -> f64 {
        newell_vector(&self.pts).length()
    }

    /// Vertex-average centroid.
    pub fn centroid(&self) -> Point {
        let n = self.pts.len() as f64;
        let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
        for pt in self.pts.iter() {
            x += pt.x;
            y += pt.y;
            z += pt.z;
        }
        Point::new(x / n, y / n, z / n)
    }

    /// Returns all edges, the closing edge included.
    pub fn edges(&self) -> Vec<(Point, Point)> {
        let mut edges = Vec::with_capacity(self.pts.len());
        for i in 0..self.pts.len() {
            let j = (i + 1) % self.pts.len();
            edges.push((self.pts[i], self.pts[j]));
        }
        edges
    }

    /// Returns true if the face lies in a horizontal plane (normal
    /// pointing straight up or down).
    pub fn is_horizontal(&self) -> bool {
        self.vn.dz.abs() > HORIZONTAL_DZ
    }

    /// Returns a copy shrunk toward the centroid by factor `k` in both
    /// in-plane directions, so the area scales by `k * k`.
    ///
    /// Used to cut a centered aperture that leaves a frame around it.
    pub fn scaled_toward_centroid(&self, k: f64, name: &str) -> Result<Self> {
        if k <= 0.0 || k >= 1.0 {
            return Err(anyhow!("Scaling factor must be in (0, 1), got {}", k));
        }
        let c = self.centroid();
        let pts: Vec<Point> = self.pts.iter().map(|p| c + (*p - c) * k).collect();
        Self::new(name, pts)
    }

    /// Returns true if both polygons have the same vertices within the
    /// given tolerance, in any order.
    pub fn matches_within(&self, other: &Self, tol: f64) -> bool {
        if self.pts.len() != other.pts.len() {
            return false;
        }
        let mut used = vec![false; other.pts.len()];
        'outer: for p in self.pts.iter() {
            for (i, q) in other.pts.iter().enumerate() {
                if !used[i] && p.is_close_within(q, tol) {
                    used[i] = true;
                    continue 'outer;
                }
            }
            return false;
        }
        true
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({}, {} points)", self.name, self.pts.len())
    }
}

/// Area vector of a planar loop: half the sum of consecutive cross
/// products. Its length is the area, its direction the normal.
fn newell_vector(pts: &[Point]) -> Vector {
    let origin = Point::new(0., 0., 0.);
    let mut sum = Vector::new(0., 0., 0.);
    for i in 0..pts.len() {
        let j = (i + 1) % pts.len();
        let vi = pts[i] - origin;
        let vj = pts[j] - origin;
        sum = sum + vi.cross(vj);
    }
    sum * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::EPS;

    fn square(size: f64, z: f64) -> Vec<Point> {
        vec![
            Point::new(0., 0., z),
            Point::new(size, 0., z),
            Point::new(size, size, z),
            Point::new(0., size, z),
        ]
    }

    #[test]
    fn test_new_and_normal() -> Result<()> {
        let poly = Polygon::new("sq", square(1., 0.))?;
        assert!(poly.normal().is_close(&Vector::new(0., 0., 1.)));
        assert!(poly.is_horizontal());
        Ok(())
    }

    #[test]
    fn test_reversed_winding_flips_normal() -> Result<()> {
        let mut pts = square(1., 0.);
        pts.reverse();
        let poly = Polygon::new("sq", pts)?;
        assert!(poly.normal().is_close(&Vector::new(0., 0., -1.)));
        Ok(())
    }

    #[test]
    fn test_area() -> Result<()> {
        let poly = Polygon::new("sq", square(3., 5.))?;
        assert!((poly.area() - 9.).abs() < EPS);
        Ok(())
    }

    #[test]
    fn test_vertical_face_not_horizontal() -> Result<()> {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 0., 1.),
            Point::new(0., 0., 1.),
        ];
        let poly = Polygon::new("wall", pts)?;
        assert!(!poly.is_horizontal());
        Ok(())
    }

    #[test]
    fn test_too_few_points() {
        let pts = vec![Point::new(0., 0., 0.), Point::new(1., 0., 0.)];
        assert!(Polygon::new("bad", pts).is_err());
    }

    #[test]
    fn test_duplicate_consecutive_points() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(0., 0., 0.),
            Point::new(1., 1., 0.),
            Point::new(0., 1., 0.),
        ];
        assert!(Polygon::new("bad", pts).is_err());
    }

    #[test]
    fn test_closing_edge_duplicate() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 1., 0.),
            Point::new(0., 0., 0.),
        ];
        assert!(Polygon::new("bad", pts).is_err());
    }

    #[test]
    fn test_collinear_points_rejected() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(2., 0., 0.),
        ];
        assert!(Polygon::new("bad", pts).is_err());
    }

    #[test]
    fn test_non_finite_points_rejected() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(f64::NAN, 0., 0.),
            Point::new(1., 1., 0.),
        ];
        assert!(Polygon::new("bad", pts).is_err());
    }

    #[test]
    fn test_centroid() -> Result<()> {
        let poly = Polygon::new("sq", square(2., 0.))?;
        assert!(poly.centroid().is_close(&Point::new(1., 1., 0.)));
        Ok(())
    }

    #[test]
    fn test_scaled_toward_centroid_area_ratio() -> Result<()> {
        let poly = Polygon::new("sq", square(4., 0.))?;
        let r: f64 = 0.4;
        let inner = poly.scaled_toward_centroid(r.sqrt(), "sq_glz")?;
        let ratio = inner.area() / poly.area();
        assert!((ratio - r).abs() < 1e-9);
        // The aperture stays inside the parent loop
        for pt in inner.vertices() {
            assert!(pt.x > 0. && pt.x < 4.);
            assert!(pt.y > 0. && pt.y < 4.);
        }
        Ok(())
    }

    #[test]
    fn test_scaled_toward_centroid_invalid_factor() -> Result<()> {
        let poly = Polygon::new("sq", square(1., 0.))?;
        assert!(poly.scaled_toward_centroid(0.0, "a").is_err());
        assert!(poly.scaled_toward_centroid(1.0, "b").is_err());
        Ok(())
    }

    #[test]
    fn test_matches_within() -> Result<()> {
        let pa = Polygon::new("a", square(1., 0.))?;
        let mut pts = square(1., 0.);
        pts.reverse(); // Same vertices, opposite winding
        let pb = Polygon::new("b", pts)?;
        assert!(pa.matches_within(&pb, 0.01));

        let pc = Polygon::new("c", square(1., 1.))?; // Different plane
        assert!(!pa.matches_within(&pc, 0.01));
        Ok(())
    }

    #[test]
    fn test_matches_within_tolerance_edge() -> Result<()> {
        let pa = Polygon::new("a", square(1., 0.))?;
        let pts: Vec<Point> = square(1., 0.)
            .into_iter()
            .map(|p| p.at_height(0.009))
            .collect();
        let pb = Polygon::new("b", pts)?;
        assert!(pa.matches_within(&pb, 0.01));

        let pts: Vec<Point> = square(1., 0.)
            .into_iter()
            .map(|p| p.at_height(0.02))
            .collect();
        let pc = Polygon::new("c", pts)?;
        assert!(!pa.matches_within(&pc, 0.01));
        Ok(())
    }

    #[test]
    fn test_edges_include_closing_edge() -> Result<()> {
        let poly = Polygon::new("sq", square(1., 0.))?;
        let edges = poly.edges();
        assert_eq!(edges.len(), 4);
        let (last_beg, last_end) = edges[3];
        assert!(last_beg.is_close(&Point::new(0., 1., 0.)));
        assert!(last_end.is_close(&Point::new(0., 0., 0.)));
        Ok(())
    }
}
