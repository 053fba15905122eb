//! # Tube Primitive
//!
//! Annular prisms: a circular or elliptical outer wall around a circular
//! bore, both open-ended walls closed by flat annuli. Sits on z = 0.

use crate::error::MeshError;
use crate::solid::Solid;
use config::constants::{MAX_SEGMENTS, MIN_SEGMENTS};
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a circular tube (washer) of the given height.
pub fn create_tube(
    outer_radius: f64,
    inner_radius: f64,
    height: f64,
    segments: u32,
) -> Result<Solid, MeshError> {
    create_elliptic_tube(outer_radius, outer_radius, inner_radius, height, segments)
}

/// Creates a tube whose outer wall is an ellipse.
///
/// ## Parameters
///
/// - `semi_x`, `semi_y`: outer semi-axes along X and Y
/// - `inner_radius`: radius of the circular bore
/// - `height`: extent along Z, base at z = 0
/// - `segments`: samples around both outlines, sharing angles
pub fn create_elliptic_tube(
    semi_x: f64,
    semi_y: f64,
    inner_radius: f64,
    height: f64,
    segments: u32,
) -> Result<Solid, MeshError> {
    let finite = [semi_x, semi_y, inner_radius, height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || !(inner_radius > 0.0 && inner_radius < semi_x.min(semi_y)) {
        return Err(MeshError::degenerate(format!(
            "Tube bore must fit inside the outer wall: inner={inner_radius}, semi-axes=({semi_x}, {semi_y})"
        )));
    }
    if !(height > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Tube height must be positive: {height}"
        )));
    }
    if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
        return Err(MeshError::degenerate(format!(
            "Tube segments must be in {MIN_SEGMENTS}..={MAX_SEGMENTS}: {segments}"
        )));
    }

    let n = segments as usize;
    let mut solid = Solid::with_capacity(4 * n, 8 * n);

    let outline = |solid: &mut Solid, rx: f64, ry: f64, z: f64| -> Vec<u32> {
        (0..n)
            .map(|j| {
                let theta = TAU * j as f64 / n as f64;
                solid.add_vertex(DVec3::new(rx * theta.cos(), ry * theta.sin(), z))
            })
            .collect()
    };
    let outer_bottom = outline(&mut solid, semi_x, semi_y, 0.0);
    let outer_top = outline(&mut solid, semi_x, semi_y, height);
    let inner_bottom = outline(&mut solid, inner_radius, inner_radius, 0.0);
    let inner_top = outline(&mut solid, inner_radius, inner_radius, height);

    for j in 0..n {
        let k = (j + 1) % n;

        solid.add_face(outer_bottom[j], outer_bottom[k], outer_top[k]);
        solid.add_face(outer_bottom[j], outer_top[k], outer_top[j]);

        solid.add_face(outer_top[j], outer_top[k], inner_top[k]);
        solid.add_face(outer_top[j], inner_top[k], inner_top[j]);

        solid.add_face(inner_bottom[j], inner_top[k], inner_bottom[k]);
        solid.add_face(inner_bottom[j], inner_top[j], inner_top[k]);

        solid.add_face(outer_bottom[j], inner_bottom[k], outer_bottom[k]);
        solid.add_face(outer_bottom[j], inner_bottom[j], inner_bottom[k]);
    }

    Ok(solid)
}
