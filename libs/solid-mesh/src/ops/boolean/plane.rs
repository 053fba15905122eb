//! # Plane for BSP Operations
//!
//! Plane representation with point classification.

use config::constants::{BSP_EPSILON, DEGENERATE_AREA_EPSILON};
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane, within [`BSP_EPSILON`].
    Coplanar,
    /// Polygon with vertices on both sides.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane `normal · p = w` with unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and offset.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Plane through three points, counter-clockwise when viewed from the front.
    ///
    /// Returns `None` for (near) collinear points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        if cross.length() <= DEGENERATE_AREA_EPSILON {
            return None;
        }
        let normal = cross.try_normalize()?;
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Reverses the plane in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from point to plane (positive = front).
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point relative to this plane.
    #[inline]
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > BSP_EPSILON {
            Classification::Front
        } else if dist < -BSP_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }

    /// Parameter along `a → b` where the segment crosses the plane.
    #[inline]
    pub fn intersect_parameter(&self, a: DVec3, b: DVec3) -> f64 {
        (self.w - self.normal.dot(a)) / self.normal.dot(b - a)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        assert!((plane.normal() - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_plane_from_collinear_points() {
        assert!(Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).is_none());
    }

    #[test]
    fn test_plane_classify_point() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(plane.classify_point(DVec3::Z), Classification::Front);
        assert_eq!(plane.classify_point(-DVec3::Z), Classification::Back);
        assert_eq!(
            plane.classify_point(DVec3::new(1.0, 1.0, 1e-7)),
            Classification::Coplanar
        );
    }

    #[test]
    fn test_plane_flip() {
        let mut plane = Plane::new(DVec3::Z, 5.0);
        plane.flip();
        assert_eq!(plane.normal(), -DVec3::Z);
        assert!((plane.signed_distance(DVec3::new(0.0, 0.0, 4.0)) - 1.0).abs() < 1e-12);
        assert!((plane.signed_distance(DVec3::new(0.0, 0.0, -6.0)) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersect_parameter() {
        let plane = Plane::new(DVec3::Z, 1.0);
        let t = plane.intersect_parameter(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0));
        assert!((t - 0.25).abs() < 1e-12);
    }
}
