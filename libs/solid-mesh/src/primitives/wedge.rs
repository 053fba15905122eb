//! # Wedge Authoring
//!
//! Explicit eight-corner polyhedra for tapered, sloped cutters that no
//! primitive can express. Local frame: X is radial (outer end at +X),
//! Y is tangential, Z is up. Corner pairs are ordered `[-Y side, +Y side]`.

use crate::error::MeshError;
use crate::repair::inspect;
use crate::solid::Solid;
use glam::DVec3;

/// The eight corners of a wedge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeCorners {
    /// Outer end, bottom edge
    pub outer_bottom: [DVec3; 2],
    /// Outer end, top edge
    pub outer_top: [DVec3; 2],
    /// Inner end, bottom edge
    pub inner_bottom: [DVec3; 2],
    /// Inner end, top edge
    pub inner_top: [DVec3; 2],
}

impl WedgeCorners {
    /// Tapered wedge centred on the radial midpoint of its span.
    ///
    /// ## Parameters
    ///
    /// - `radial_span`: distance from the inner end to the outer end
    /// - `outer_half_width` / `inner_half_width`: tangential half-widths
    /// - `outer_height` / `inner_height`: heights of the two ends
    /// - `floor_rise`: how far the inner floor sits above the outer floor
    ///
    /// The outer floor lies at z = 0.
    pub fn tapered(
        radial_span: f64,
        outer_half_width: f64,
        inner_half_width: f64,
        outer_height: f64,
        inner_height: f64,
        floor_rise: f64,
    ) -> Self {
        let xo = radial_span / 2.0;
        let xi = -radial_span / 2.0;
        let (wo, wi) = (outer_half_width, inner_half_width);
        Self {
            outer_bottom: [DVec3::new(xo, -wo, 0.0), DVec3::new(xo, wo, 0.0)],
            outer_top: [
                DVec3::new(xo, -wo, outer_height),
                DVec3::new(xo, wo, outer_height),
            ],
            inner_bottom: [
                DVec3::new(xi, -wi, floor_rise),
                DVec3::new(xi, wi, floor_rise),
            ],
            inner_top: [
                DVec3::new(xi, -wi, floor_rise + inner_height),
                DVec3::new(xi, wi, floor_rise + inner_height),
            ],
        }
    }

    fn to_array(self) -> [DVec3; 8] {
        [
            self.outer_bottom[0],
            self.outer_bottom[1],
            self.outer_top[0],
            self.outer_top[1],
            self.inner_bottom[0],
            self.inner_bottom[1],
            self.inner_top[0],
            self.inner_top[1],
        ]
    }
}

/// Face list over [`WedgeCorners::to_array`] order, outward by right-hand rule.
const WEDGE_FACES: [[u32; 3]; 12] = [
    // Floor
    [0, 4, 5],
    [0, 5, 1],
    // Roof
    [2, 3, 7],
    [2, 7, 6],
    // Outer end
    [0, 1, 3],
    [0, 3, 2],
    // Inner end
    [4, 6, 7],
    [4, 7, 5],
    // -Y side
    [0, 2, 6],
    [0, 6, 4],
    // +Y side
    [1, 5, 7],
    [1, 7, 3],
];

/// Authors a wedge from explicit corners and validates it immediately.
///
/// # Errors
///
/// Returns [`MeshError::DegenerateGeometry`] when the corners produce a
/// solid that is not closed, has zero-area faces, or is wound inside out.
pub fn author_wedge(corners: WedgeCorners) -> Result<Solid, MeshError> {
    let solid = Solid::from_buffers(corners.to_array().to_vec(), WEDGE_FACES.to_vec())?;

    let report = inspect(&solid);
    if !report.is_watertight() || report.degenerate_faces > 0 {
        return Err(MeshError::degenerate(format!(
            "Authored wedge failed validation: {report}"
        )));
    }
    Ok(solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> WedgeCorners {
        WedgeCorners::tapered(60.0, 10.0, 7.0, 45.0, 27.0, 16.0)
    }

    #[test]
    fn test_wedge_is_valid() {
        let wedge = author_wedge(sample()).unwrap();
        assert_eq!(wedge.vertex_count(), 8);
        assert_eq!(wedge.face_count(), 12);
        assert!(wedge.signed_volume() > 0.0);
    }

    #[test]
    fn test_wedge_normals_point_outward() {
        let wedge = author_wedge(sample()).unwrap();
        let centroid = wedge.vertices().iter().copied().sum::<DVec3>() / 8.0;
        for face in 0..wedge.face_count() {
            let [a, b, c] = wedge.face_corners(face);
            let mid = (a + b + c) / 3.0;
            assert!(wedge.face_normal(face).dot(mid - centroid) > 0.0, "face {face}");
        }
    }

    #[test]
    fn test_wedge_is_centred_radially() {
        let bbox = author_wedge(sample()).unwrap().bounding_box();
        assert_relative_eq!(bbox.min.x, -30.0);
        assert_relative_eq!(bbox.max.x, 30.0);
        assert_relative_eq!(bbox.min.z, 0.0);
        assert_relative_eq!(bbox.max.z, 45.0);
    }

    #[test]
    fn test_inside_out_wedge_is_rejected() {
        let mut corners = sample();
        corners.outer_bottom.swap(0, 1);
        corners.outer_top.swap(0, 1);
        corners.inner_bottom.swap(0, 1);
        corners.inner_top.swap(0, 1);
        assert!(author_wedge(corners).is_err());
    }

    #[test]
    fn test_flat_wedge_is_rejected() {
        let corners = WedgeCorners::tapered(60.0, 10.0, 7.0, 0.0, 0.0, 0.0);
        assert!(author_wedge(corners).is_err());
    }
}
