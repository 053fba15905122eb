//! # Cup Primitive
//!
//! A hollow cylinder with a solid floor, authored directly as one closed
//! surface. Sits on z = 0 with its open end at z = height.

use crate::error::MeshError;
use crate::solid::Solid;
use config::constants::{MAX_SEGMENTS, MIN_SEGMENTS};

use super::cylinder::ring;

/// Creates a cup: outer wall, floor of thickness `floor`, inner bore open at the top.
///
/// ## Parameters
///
/// - `outer_radius`: radius of the outer wall
/// - `inner_radius`: radius of the bore (must be smaller than `outer_radius`)
/// - `height`: overall height, base at z = 0
/// - `floor`: floor thickness (must be smaller than `height`)
/// - `segments`: edges around the circumference, shared by both walls
pub fn create_cup(
    outer_radius: f64,
    inner_radius: f64,
    height: f64,
    floor: f64,
    segments: u32,
) -> Result<Solid, MeshError> {
    let finite = [outer_radius, inner_radius, height, floor]
        .iter()
        .all(|v| v.is_finite());
    if !finite || !(inner_radius > 0.0 && inner_radius < outer_radius) {
        return Err(MeshError::degenerate(format!(
            "Cup radii must satisfy 0 < inner < outer: inner={inner_radius}, outer={outer_radius}"
        )));
    }
    if !(floor > 0.0 && floor < height) {
        return Err(MeshError::degenerate(format!(
            "Cup floor must satisfy 0 < floor < height: floor={floor}, height={height}"
        )));
    }
    if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
        return Err(MeshError::degenerate(format!(
            "Cup segments must be in {MIN_SEGMENTS}..={MAX_SEGMENTS}: {segments}"
        )));
    }

    let n = segments as usize;
    let mut solid = Solid::with_capacity(4 * n, 8 * n);

    let outer_bottom = ring(&mut solid, outer_radius, 0.0, segments);
    let outer_top = ring(&mut solid, outer_radius, height, segments);
    let inner_top = ring(&mut solid, inner_radius, height, segments);
    let inner_floor = ring(&mut solid, inner_radius, floor, segments);

    for j in 0..n {
        let k = (j + 1) % n;

        // Outer wall, facing away from the axis
        solid.add_face(outer_bottom[j], outer_bottom[k], outer_top[k]);
        solid.add_face(outer_bottom[j], outer_top[k], outer_top[j]);

        // Top annulus, facing up
        solid.add_face(outer_top[j], outer_top[k], inner_top[k]);
        solid.add_face(outer_top[j], inner_top[k], inner_top[j]);

        // Bore wall, facing the axis
        solid.add_face(inner_floor[j], inner_top[k], inner_floor[k]);
        solid.add_face(inner_floor[j], inner_top[j], inner_top[k]);
    }

    for j in 1..n - 1 {
        // Underside
        solid.add_face(outer_bottom[0], outer_bottom[j + 1], outer_bottom[j]);
        // Floor of the bore
        solid.add_face(inner_floor[0], inner_floor[j], inner_floor[j + 1]);
    }

    Ok(solid)
}
