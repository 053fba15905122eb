//! # Rigid Transforms
//!
//! 4x4 affine transforms applied to whole solids. Composition follows the
//! "first, then" reading order: `a.then(b)` applies `a` before `b`.

use crate::solid::Solid;
use glam::{DMat4, DVec3};

/// An affine transform in homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: DMat4::IDENTITY,
        }
    }

    /// Wraps a raw matrix.
    pub fn from_matrix(matrix: DMat4) -> Self {
        Self { matrix }
    }

    /// Rotation by `angle` radians about `axis` through the origin.
    ///
    /// A zero axis yields the identity.
    pub fn rotation(axis: DVec3, angle: f64) -> Self {
        match axis.try_normalize() {
            Some(axis) => Self {
                matrix: DMat4::from_axis_angle(axis, angle),
            },
            None => Self::identity(),
        }
    }

    /// Rotation about +Z, counter-clockwise when viewed from above.
    pub fn rotation_z(angle: f64) -> Self {
        Self {
            matrix: DMat4::from_rotation_z(angle),
        }
    }

    /// Rotation about +Y.
    pub fn rotation_y(angle: f64) -> Self {
        Self {
            matrix: DMat4::from_rotation_y(angle),
        }
    }

    /// Translation by `offset`.
    pub fn translation(offset: DVec3) -> Self {
        Self {
            matrix: DMat4::from_translation(offset),
        }
    }

    /// Uniform scale about the origin.
    pub fn scale(factor: f64) -> Self {
        Self {
            matrix: DMat4::from_scale(DVec3::splat(factor)),
        }
    }

    /// Returns the transform that applies `self` first, then `next`.
    pub fn then(self, next: Transform) -> Transform {
        Transform {
            matrix: next.matrix * self.matrix,
        }
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// Maps a point (translation applies).
    #[inline]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.matrix.transform_point3(point)
    }

    /// Maps a direction (translation ignored).
    #[inline]
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.matrix.transform_vector3(vector)
    }

    /// Returns true if the transform mirrors space.
    pub fn is_mirroring(&self) -> bool {
        self.matrix.determinant() < 0.0
    }

    /// Applies the transform to every vertex of `solid`.
    ///
    /// Mirroring transforms reverse face windings so normals stay outward.
    pub fn apply(&self, solid: &Solid) -> Solid {
        let vertices = solid
            .vertices()
            .iter()
            .map(|v| self.transform_point(*v))
            .collect::<Vec<_>>();
        let faces = if self.is_mirroring() {
            solid.faces().iter().map(|&[a, b, c]| [a, c, b]).collect()
        } else {
            solid.faces().to_vec()
        };

        let mut result = Solid::with_capacity(vertices.len(), faces.len());
        for v in vertices {
            result.add_vertex(v);
        }
        for [a, b, c] in faces {
            result.add_face(a, b, c);
        }
        result
    }
}

/// Composes transforms in application order.
///
/// `compose([a, b, c])` applies `a`, then `b`, then `c`.
pub fn compose(transforms: impl IntoIterator<Item = Transform>) -> Transform {
    transforms
        .into_iter()
        .fold(Transform::identity(), Transform::then)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_then_applies_in_order() {
        let t = Transform::translation(DVec3::X).then(Transform::rotation_z(FRAC_PI_2));
        let p = t.transform_point(DVec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_matches_then() {
        let a = Transform::rotation_z(0.3);
        let b = Transform::translation(DVec3::new(1.0, 2.0, 3.0));
        let c = Transform::rotation(DVec3::Y, 0.7);
        let composed = compose([a, b, c]);
        let chained = a.then(b).then(c);
        let p = DVec3::new(0.5, -0.25, 2.0);
        assert!(composed
            .transform_point(p)
            .abs_diff_eq(chained.transform_point(p), 1e-12));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Transform::rotation(DVec3::ZERO, 1.0), Transform::identity());
    }

    #[test]
    fn test_vector_ignores_translation() {
        let t = Transform::translation(DVec3::splat(5.0));
        assert_eq!(t.transform_vector(DVec3::X), DVec3::X);
    }

    #[test]
    fn test_mirror_flips_winding() {
        let mut solid = Solid::new();
        solid.add_vertex(DVec3::ZERO);
        solid.add_vertex(DVec3::X);
        solid.add_vertex(DVec3::Y);
        solid.add_face(0, 1, 2);
        let mirror = Transform::from_matrix(DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0)));
        let mirrored = mirror.apply(&solid);
        assert_eq!(mirrored.faces()[0], [0, 2, 1]);
    }
}
