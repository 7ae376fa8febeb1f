//! The building model: a named, ordered collection of rooms.
//!
//! Rooms are kept in floor order (bottom to top). Adjacency between
//! faces of different rooms is solved once over the complete room set
//! after all rooms are present - it is a cross-room relation and is not
//! maintained incrementally.

use crate::error::GeometryConstructionError;
use crate::geom::solid::FloorSolid;
use crate::geom::JOIN_TOL;
use crate::model::room::{Boundary, Room};
use crate::random_id;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingModel {
    pub identifier: String,
    pub uid: String,
    rooms: Vec<Room>,
}

impl BuildingModel {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            uid: random_id(),
            rooms: Vec::new(),
        }
    }

    /// Builds the full model from a floor solid sequence: one room named
    /// `room_<i>` per solid, window apertures at the given ratio, then a
    /// single adjacency pass over all rooms.
    pub fn build(identifier: &str, solids: &[FloorSolid], wwr: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&wwr) {
            return Err(GeometryConstructionError::new(format!(
                "window-to-wall ratio must be in [0, 1), got {wwr}"
            ))
            .into());
        }
        let mut model = Self::new(identifier);
        for (i, solid) in solids.iter().enumerate() {
            let mut room = Room::from_solid(&format!("room_{i}"), solid);
            room.wall_apertures_by_ratio(wwr)?;
            model.add_room(room)?;
        }
        model.solve_adjacency(JOIN_TOL);
        Ok(model)
    }

    pub fn add_room(&mut self, room: Room) -> Result<()> {
        if self.rooms.iter().any(|r| r.name == room.name) {
            return Err(anyhow!("Room is already present: {}", &room.name));
        }
        self.rooms.push(room);
        Ok(())
    }

    /// Rooms in floor order, bottom to top.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn get_room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    /// Marks faces of different rooms whose vertices coincide within the
    /// tolerance as shared interior boundaries, symmetrically on both
    /// sides. Runs over the complete pairwise room set.
    pub fn solve_adjacency(&mut self, tol: f64) {
        let mut matches: Vec<(usize, usize, usize, usize)> = Vec::new();
        for i in 0..self.rooms.len() {
            for j in (i + 1)..self.rooms.len() {
                for (fi, fa) in self.rooms[i].faces().iter().enumerate() {
                    for (fj, fb) in self.rooms[j].faces().iter().enumerate() {
                        if fa.polygon.matches_within(&fb.polygon, tol) {
                            matches.push((i, fi, j, fj));
                        }
                    }
                }
            }
        }
        for (i, fi, j, fj) in matches {
            let (room_i, face_i) = {
                let r = &self.rooms[i];
                (r.name.clone(), r.faces()[fi].name.clone())
            };
            let (room_j, face_j) = {
                let r = &self.rooms[j];
                (r.name.clone(), r.faces()[fj].name.clone())
            };
            tracing::debug!(
                a = format!("{room_i}/{face_i}"),
                b = format!("{room_j}/{face_j}"),
                "marking shared interior boundary"
            );
            self.rooms[i].faces_mut()[fi].boundary = Boundary::Surface {
                room: room_j,
                face: face_j,
            };
            self.rooms[j].faces_mut()[fj].boundary = Boundary::Surface {
                room: room_i,
                face: face_i,
            };
        }
    }

    /// Total enclosed volume of all rooms.
    pub fn volume(&self) -> f64 {
        self.rooms.iter().map(|r| r.volume()).sum()
    }

    /// Total floor area of all rooms.
    pub fn floor_area(&self) -> f64 {
        self.rooms.iter().map(|r| r.floor_area()).sum()
    }

    /// Total glazing area on the exterior envelope.
    pub fn exterior_aperture_area(&self) -> f64 {
        self.rooms.iter().map(|r| r.exterior_aperture_area()).sum()
    }
}
