//! Arc-sampled wedge derived with a convex hull.
//!
//! The cutter is sampled around the collar axis, so its local origin is the
//! axis itself and the ramp yaw swings the whole arc.

use super::{AuthoredSolid, BoxCut, Provenance, SlotCutter};
use crate::dimensions::CollarDimensions;
use crate::params::SlotStrategy;
use crate::slot::SlotDescriptor;
use config::constants::HULL_ARC_SAMPLES;
use glam::DVec3;
use solid_mesh::{convex_hull, MeshError};
use tracing::warn;

/// Hull of two arcs (inside the inner reach, outside the outer wall) at
/// the slot bottom and top. Falls back to a box when the hull is degenerate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HullWedge;

impl HullWedge {
    /// Points sampled on both arcs at both heights.
    pub fn arc_samples(dims: &CollarDimensions) -> Vec<DVec3> {
        let s = &dims.slots;
        let radii = [dims.outer_radius + s.overshoot, s.inner_reach - s.overshoot];
        let heights = [s.bottom, s.bottom + s.height];
        let last = (HULL_ARC_SAMPLES - 1).max(1) as f64;

        let mut points = Vec::with_capacity(4 * HULL_ARC_SAMPLES);
        for z in heights {
            for radius in radii {
                for j in 0..HULL_ARC_SAMPLES {
                    let theta = -s.angular_width / 2.0 + s.angular_width * j as f64 / last;
                    points.push(DVec3::new(radius * theta.cos(), radius * theta.sin(), z));
                }
            }
        }
        points
    }
}

impl SlotCutter for HullWedge {
    fn strategy(&self) -> SlotStrategy {
        SlotStrategy::HullWedge
    }

    fn author(
        &self,
        dims: &CollarDimensions,
        slot: &SlotDescriptor,
    ) -> Result<AuthoredSolid, MeshError> {
        match convex_hull(&Self::arc_samples(dims)) {
            Ok(solid) => Ok(AuthoredSolid {
                solid,
                provenance: Provenance::ConvexHull,
                yaw: slot.ramp_angle,
                anchor: DVec3::ZERO,
            }),
            Err(err) => {
                warn!(slot = slot.index, error = %err, "hull wedge degenerate, using box");
                BoxCut::author_with_width(dims, slot, dims.slots.width, Provenance::BoxFallback)
            }
        }
    }
}
