//! # Solid Data Structure
//!
//! Core solid representation: an owned vertex buffer plus a face buffer of
//! index triples. Winding order of each face determines its outward normal
//! (counter-clockwise when viewed from outside).

use crate::error::MeshError;
use config::constants::MAX_FACES;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// =============================================================================
// AXIS-ALIGNED BOUNDING BOX
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Aabb {
    /// Creates a box from two corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Size along each axis.
    #[inline]
    pub fn extents(&self) -> DVec3 {
        self.max - self.min
    }

    /// Centre point of the box.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the box diagonal.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.extents().length()
    }

    /// Returns true if the two boxes overlap (touching counts).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

// =============================================================================
// SOLID
// =============================================================================

/// A triangulated solid body.
///
/// All geometry calculations use f64. A *valid* solid is closed and manifold;
/// see [`crate::repair::is_watertight`].
///
/// # Example
///
/// ```rust
/// use solid_mesh::Solid;
/// use glam::DVec3;
///
/// let mut solid = Solid::new();
/// solid.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// solid.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// solid.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// solid.add_face(0, 1, 2);
/// assert_eq!(solid.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Face indices (3 indices per triangle)
    faces: Vec<[u32; 3]>,
}

impl Solid {
    /// Creates an empty solid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solid with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Creates a solid from raw buffers, checking the index invariant.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidTopology`] if a face references a missing
    /// vertex or a coordinate is not finite, and [`MeshError::TooManyFaces`]
    /// when the face buffer exceeds the configured limit.
    pub fn from_buffers(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        if faces.len() > MAX_FACES {
            return Err(MeshError::TooManyFaces {
                count: faces.len(),
                max: MAX_FACES,
            });
        }
        let solid = Self { vertices, faces };
        solid.check_buffers()?;
        Ok(solid)
    }

    /// Builds a solid from buffers already known to be consistent.
    pub(crate) fn from_raw(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Verifies that every index is in range and every coordinate is finite.
    pub fn check_buffers(&self) -> Result<(), MeshError> {
        if let Some(v) = self.vertices.iter().find(|v| !v.is_finite()) {
            return Err(MeshError::invalid_topology(format!(
                "non-finite vertex {v:?}"
            )));
        }
        let count = self.vertices.len() as u32;
        if let Some(face) = self.faces.iter().find(|f| f.iter().any(|&i| i >= count)) {
            return Err(MeshError::invalid_topology(format!(
                "face {face:?} references a vertex outside 0..{count}"
            )));
        }
        Ok(())
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the solid has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a face by vertex indices.
    pub fn add_face(&mut self, v0: u32, v1: u32, v2: u32) {
        self.faces.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the three corner positions of a face.
    #[inline]
    pub fn face_corners(&self, face: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[face];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Unnormalized face normal (length = twice the face area).
    pub fn face_normal(&self, face: usize) -> DVec3 {
        let [a, b, c] = self.face_corners(face);
        (b - a).cross(c - a)
    }

    /// Consumes the solid and returns its buffers.
    pub fn into_buffers(self) -> (Vec<DVec3>, Vec<[u32; 3]>) {
        (self.vertices, self.faces)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// An empty solid yields a zero-sized box at the origin.
    pub fn bounding_box(&self) -> Aabb {
        let Some((first, rest)) = self.vertices.split_first() else {
            return Aabb::new(DVec3::ZERO, DVec3::ZERO);
        };

        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        Aabb::new(min, max)
    }

    /// Signed enclosed volume (positive for outward-wound closed solids).
    pub fn signed_volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                self.vertex(a).dot(self.vertex(b).cross(self.vertex(c)))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Generalized winding number of `point` with respect to this surface.
    ///
    /// Approximately 1 inside a closed outward-wound solid and 0 outside.
    /// Tolerates small cracks such as unresolved T-junctions.
    pub fn winding_number(&self, point: DVec3) -> f64 {
        let mut total = 0.0;
        for face in 0..self.faces.len() {
            let [a, b, c] = self.face_corners(face);
            let (a, b, c) = (a - point, b - point, c - point);
            let (la, lb, lc) = (a.length(), b.length(), c.length());
            let numerator = a.dot(b.cross(c));
            let denominator = la * lb * lc + a.dot(b) * lc + a.dot(c) * lb + b.dot(c) * la;
            total += 2.0 * numerator.atan2(denominator);
        }
        total / (4.0 * PI)
    }

    /// Returns true if `point` lies inside the solid.
    pub fn contains_point(&self, point: DVec3) -> bool {
        self.winding_number(point) > 0.5
    }

    /// Translates the solid by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Returns a uniformly scaled copy (about the origin).
    ///
    /// Used for unit conversion; a positive factor keeps face windings valid.
    pub fn scaled(&self, factor: f64) -> Solid {
        Solid {
            vertices: self.vertices.iter().map(|v| *v * factor).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Returns a copy with every face winding reversed.
    pub fn inverted(&self) -> Solid {
        Solid {
            vertices: self.vertices.clone(),
            faces: self.faces.iter().map(|&[a, b, c]| [a, c, b]).collect(),
        }
    }

    /// Appends another solid as a disjoint body (no boolean).
    pub fn merge(&mut self, other: &Solid) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
    }

    /// Concatenates several solids into one multi-body solid.
    pub fn concatenate<'a>(parts: impl IntoIterator<Item = &'a Solid>) -> Solid {
        let mut result = Solid::new();
        for part in parts {
            result.merge(part);
        }
        result
    }

    /// Flattened `[x, y, z, ...]` f32 vertex buffer for codecs.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }
}
