//! # Polygon for BSP Operations
//!
//! Convex polygon with a cached plane and splitting support.

use super::plane::{Classification, Plane};
use glam::DVec3;

/// A convex polygon with its supporting plane.
///
/// Pieces produced by splitting inherit the parent's plane rather than
/// recomputing it from (possibly sliver) corners.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    plane: Plane,
}

impl Polygon {
    /// Creates a polygon, deriving its plane from the first three vertices.
    ///
    /// Returns `None` for fewer than three vertices or a degenerate plane.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    fn with_plane(vertices: Vec<DVec3>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Polygon vertices, counter-clockwise around the plane normal.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Supporting plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Reverses winding and plane in place.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Classifies this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = false;
        let mut back = false;
        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }
        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Splits this polygon by `plane`.
    ///
    /// ## Parameters
    ///
    /// - `coplanar_front`: coplanar polygons facing the same way as `plane`
    /// - `coplanar_back`: coplanar polygons facing the other way
    /// - `front`: pieces in front of the plane
    /// - `back`: pieces behind the plane
    pub fn split(
        self,
        plane: &Plane,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    coplanar_front.push(self);
                } else {
                    coplanar_back.push(self);
                }
            }
            Classification::Front => front.push(self),
            Classification::Back => back.push(self),
            Classification::Spanning => {
                let (f, b) = self.split_spanning(plane);
                front.extend(f);
                back.extend(b);
            }
        }
    }

    /// Like [`Polygon::split`], but coplanar polygons join `front` or `back`
    /// according to their facing.
    pub fn partition(self, plane: &Plane, front: &mut Vec<Polygon>, back: &mut Vec<Polygon>) {
        match self.classify(plane) {
            Classification::Coplanar if self.plane.normal().dot(plane.normal()) > 0.0 => {
                front.push(self)
            }
            Classification::Coplanar | Classification::Back => back.push(self),
            Classification::Front => front.push(self),
            Classification::Spanning => {
                let (f, b) = self.split_spanning(plane);
                front.extend(f);
                back.extend(b);
            }
        }
    }

    /// Splits a polygon known to span `plane` into front and back pieces.
    fn split_spanning(&self, plane: &Plane) -> (Option<Polygon>, Option<Polygon>) {
        let n = self.vertices.len();
        let mut front_verts = Vec::with_capacity(n + 1);
        let mut back_verts = Vec::with_capacity(n + 1);

        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[(i + 1) % n];
            let ti = plane.classify_point(vi);
            let tj = plane.classify_point(vj);

            if ti != Classification::Back {
                front_verts.push(vi);
            }
            if ti != Classification::Front {
                back_verts.push(vi);
            }

            let crosses = matches!(
                (ti, tj),
                (Classification::Front, Classification::Back)
                    | (Classification::Back, Classification::Front)
            );
            if crosses {
                let t = plane.intersect_parameter(vi, vj);
                let v = vi.lerp(vj, t);
                front_verts.push(v);
                back_verts.push(v);
            }
        }

        let front = (front_verts.len() >= 3).then(|| Self::with_plane(front_verts, self.plane));
        let back = (back_verts.len() >= 3).then(|| Self::with_plane(back_verts, self.plane));
        (front, back)
    }
}

// =============================================================================
// TESTS
// =============================================================================
