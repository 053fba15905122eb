//! # Cylinder Primitive
//!
//! Generates solids for cylinders, frustums and cones along the Z axis.

use crate::error::MeshError;
use crate::solid::Solid;
use config::constants::{MAX_SEGMENTS, MIN_SEGMENTS};
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a cylinder centred at the origin with its axis along Z.
///
/// Vertex 0 of each ring lies at angle 0 (on +X), so a segment count
/// divisible by 4 reproduces the full diameter along both X and Y.
///
/// # Example
///
/// ```rust
/// use solid_mesh::primitives::create_cylinder;
///
/// let cyl = create_cylinder(5.0, 10.0, 32).unwrap();
/// let bbox = cyl.bounding_box();
/// assert!((bbox.extents().x - 10.0).abs() < 1e-9);
/// assert!((bbox.min.z + 5.0).abs() < 1e-9);
/// ```
pub fn create_cylinder(radius: f64, height: f64, segments: u32) -> Result<Solid, MeshError> {
    create_frustum(radius, radius, height, segments)
}

/// Creates a frustum (or cone) centred at the origin with its axis along Z.
///
/// # Arguments
///
/// * `radius_bottom` - Radius at z = -height/2
/// * `radius_top` - Radius at z = +height/2
/// * `height` - Height along Z
/// * `segments` - Number of straight edges around the circumference
///
/// A zero radius collapses that ring into a single apex vertex.
pub fn create_frustum(
    radius_bottom: f64,
    radius_top: f64,
    height: f64,
    segments: u32,
) -> Result<Solid, MeshError> {
    if !(height > 0.0) || !height.is_finite() {
        return Err(MeshError::degenerate(format!(
            "Cylinder height must be positive: {height}"
        )));
    }

    if !(radius_bottom >= 0.0 && radius_top >= 0.0)
        || !radius_bottom.is_finite()
        || !radius_top.is_finite()
    {
        return Err(MeshError::degenerate(format!(
            "Cylinder radii must be non-negative: r1={radius_bottom}, r2={radius_top}"
        )));
    }

    if radius_bottom == 0.0 && radius_top == 0.0 {
        return Err(MeshError::degenerate(
            "Cylinder must have at least one non-zero radius",
        ));
    }

    if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
        return Err(MeshError::degenerate(format!(
            "Cylinder segments must be in {MIN_SEGMENTS}..={MAX_SEGMENTS}: {segments}"
        )));
    }

    let n = segments as usize;
    let mut solid = Solid::with_capacity(2 * n, 4 * n);
    let (z_bottom, z_top) = (-height / 2.0, height / 2.0);

    let bottom = ring(&mut solid, radius_bottom, z_bottom, segments);
    let top = ring(&mut solid, radius_top, z_top, segments);

    // Sides
    match (bottom.len() > 1, top.len() > 1) {
        (true, true) => {
            for j in 0..n {
                let k = (j + 1) % n;
                solid.add_face(bottom[j], bottom[k], top[k]);
                solid.add_face(bottom[j], top[k], top[j]);
            }
        }
        (true, false) => {
            for j in 0..n {
                solid.add_face(bottom[j], bottom[(j + 1) % n], top[0]);
            }
        }
        _ => {
            for j in 0..n {
                solid.add_face(bottom[0], top[(j + 1) % n], top[j]);
            }
        }
    }

    // Caps
    if bottom.len() > 1 {
        for j in 1..n - 1 {
            solid.add_face(bottom[0], bottom[j + 1], bottom[j]);
        }
    }
    if top.len() > 1 {
        for j in 1..n - 1 {
            solid.add_face(top[0], top[j], top[j + 1]);
        }
    }

    Ok(solid)
}

/// Adds a ring of vertices (or a single apex for radius 0) and returns the indices.
pub(crate) fn ring(solid: &mut Solid, radius: f64, z: f64, segments: u32) -> Vec<u32> {
    if radius == 0.0 {
        return vec![solid.add_vertex(DVec3::new(0.0, 0.0, z))];
    }
    (0..segments)
        .map(|j| {
            let theta = TAU * j as f64 / segments as f64;
            solid.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), z))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::is_watertight;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_basic() {
        let solid = create_cylinder(5.0, 10.0, 32).unwrap();
        assert_eq!(solid.vertex_count(), 64);
        assert_eq!(solid.face_count(), 2 * 32 + 2 * 30);
        assert!(is_watertight(&solid));
    }

    #[test]
    fn test_cylinder_centred() {
        let bbox = create_cylinder(5.0, 10.0, 32).unwrap().bounding_box();
        assert_relative_eq!(bbox.min.z, -5.0);
        assert_relative_eq!(bbox.max.z, 5.0);
        assert_relative_eq!(bbox.center().x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_exact_diameter_when_divisible_by_four() {
        let extents = create_cylinder(76.2, 10.0, 24).unwrap().bounding_box().extents();
        assert_relative_eq!(extents.x, 152.4, epsilon = 1e-9);
        assert_relative_eq!(extents.y, 152.4, epsilon = 1e-9);
    }

    #[test]
    fn test_cylinder_volume_matches_polygon_prism() {
        let n = 16u32;
        let solid = create_cylinder(2.0, 3.0, n).unwrap();
        let area = 0.5 * n as f64 * 4.0 * (TAU / n as f64).sin();
        assert_relative_eq!(solid.signed_volume(), area * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cone() {
        let solid = create_frustum(5.0, 0.0, 10.0, 16).unwrap();
        assert_eq!(solid.vertex_count(), 17);
        assert!(is_watertight(&solid));
    }

    #[test]
    fn test_inverted_cone() {
        let solid = create_frustum(0.0, 5.0, 10.0, 16).unwrap();
        assert!(is_watertight(&solid));
    }

    #[test]
    fn test_frustum() {
        let solid = create_frustum(5.0, 3.0, 10.0, 16).unwrap();
        assert!(is_watertight(&solid));
        assert_relative_eq!(solid.bounding_box().max.x, 5.0);
    }

    #[test]
    fn test_cylinder_invalid_height() {
        assert!(create_cylinder(5.0, 0.0, 32).is_err());
        assert!(create_cylinder(5.0, f64::NAN, 32).is_err());
    }

    #[test]
    fn test_cylinder_both_radii_zero() {
        assert!(create_frustum(0.0, 0.0, 10.0, 32).is_err());
    }

    #[test]
    fn test_cylinder_too_few_segments() {
        assert!(create_cylinder(5.0, 10.0, 2).is_err());
    }
}
