//! # Box Primitive
//!
//! Axis-aligned rectangular prism centred on the local origin.

use crate::error::MeshError;
use crate::solid::Solid;
use glam::DVec3;

/// Creates a box with the given full extents, centred at the origin.
///
/// # Arguments
///
/// * `extents` - Size along X, Y and Z
///
/// # Returns
///
/// A solid with 8 vertices and 12 triangles (2 per side).
///
/// # Example
///
/// ```rust
/// use solid_mesh::primitives::create_box;
/// use glam::DVec3;
///
/// let cutter = create_box(DVec3::new(20.0, 4.0, 10.0)).unwrap();
/// assert_eq!(cutter.face_count(), 12);
/// assert_eq!(cutter.bounding_box().min, DVec3::new(-10.0, -2.0, -5.0));
/// ```
pub fn create_box(extents: DVec3) -> Result<Solid, MeshError> {
    if !extents.is_finite() || extents.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Box extents must be positive: {extents:?}"
        )));
    }

    let half = extents * 0.5;
    let (min, max) = (-half, half);
    let mut solid = Solid::with_capacity(8, 12);

    // z = min.z ring, then z = max.z ring, both counter-clockwise from above
    let v0 = solid.add_vertex(DVec3::new(min.x, min.y, min.z));
    let v1 = solid.add_vertex(DVec3::new(max.x, min.y, min.z));
    let v2 = solid.add_vertex(DVec3::new(max.x, max.y, min.z));
    let v3 = solid.add_vertex(DVec3::new(min.x, max.y, min.z));
    let v4 = solid.add_vertex(DVec3::new(min.x, min.y, max.z));
    let v5 = solid.add_vertex(DVec3::new(max.x, min.y, max.z));
    let v6 = solid.add_vertex(DVec3::new(max.x, max.y, max.z));
    let v7 = solid.add_vertex(DVec3::new(min.x, max.y, max.z));

    // Bottom
    solid.add_face(v0, v2, v1);
    solid.add_face(v0, v3, v2);
    // Top
    solid.add_face(v4, v5, v6);
    solid.add_face(v4, v6, v7);
    // -Y
    solid.add_face(v0, v1, v5);
    solid.add_face(v0, v5, v4);
    // +Y
    solid.add_face(v2, v3, v7);
    solid.add_face(v2, v7, v6);
    // -X
    solid.add_face(v3, v0, v4);
    solid.add_face(v3, v4, v7);
    // +X
    solid.add_face(v1, v2, v6);
    solid.add_face(v1, v6, v5);

    Ok(solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::is_watertight;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_counts() {
        let solid = create_box(DVec3::splat(10.0)).unwrap();
        assert_eq!(solid.vertex_count(), 8);
        assert_eq!(solid.face_count(), 12);
    }

    #[test]
    fn test_box_is_centred() {
        let solid = create_box(DVec3::new(10.0, 20.0, 30.0)).unwrap();
        let bbox = solid.bounding_box();
        assert_eq!(bbox.min, DVec3::new(-5.0, -10.0, -15.0));
        assert_eq!(bbox.max, DVec3::new(5.0, 10.0, 15.0));
        assert_eq!(bbox.center(), DVec3::ZERO);
    }

    #[test]
    fn test_box_is_closed_and_outward() {
        let solid = create_box(DVec3::new(2.0, 3.0, 4.0)).unwrap();
        assert!(is_watertight(&solid));
        assert_relative_eq!(solid.signed_volume(), 24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_box_invalid_extents() {
        assert!(create_box(DVec3::new(0.0, 10.0, 10.0)).is_err());
        assert!(create_box(DVec3::new(1.0, -1.0, 1.0)).is_err());
        assert!(create_box(DVec3::new(1.0, f64::INFINITY, 1.0)).is_err());
    }
}
