//! Explicit tapered wedge with a floor that rises toward the axis.

use super::{AuthoredSolid, Provenance, SlotCutter};
use crate::dimensions::CollarDimensions;
use crate::params::SlotStrategy;
use crate::slot::SlotDescriptor;
use glam::DVec3;
use solid_mesh::primitives::{author_wedge, WedgeCorners};
use solid_mesh::MeshError;

/// Eight-corner wedge from just outside the outer wall to the inner reach.
///
/// The inner end is narrower and shorter than the outer end, and its floor
/// is raised by `tan(slope) × span`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerWedge;

impl CornerWedge {
    /// Corners of the wedge, centred on its radial midpoint.
    pub fn corners(dims: &CollarDimensions) -> WedgeCorners {
        let s = &dims.slots;
        let span = dims.outer_radius + s.overshoot - s.inner_reach;
        let outer_half = s.width / 2.0;
        WedgeCorners::tapered(
            span,
            outer_half,
            outer_half * s.inner_width_ratio,
            s.height,
            s.height * s.inner_height_ratio,
            s.slope.tan() * span,
        )
    }
}

impl SlotCutter for CornerWedge {
    fn strategy(&self) -> SlotStrategy {
        SlotStrategy::CornerWedge
    }

    fn author(
        &self,
        dims: &CollarDimensions,
        slot: &SlotDescriptor,
    ) -> Result<AuthoredSolid, MeshError> {
        let s = &dims.slots;
        let solid = author_wedge(Self::corners(dims))?;
        let mid = (dims.outer_radius + s.overshoot + s.inner_reach) / 2.0;
        Ok(AuthoredSolid {
            solid,
            provenance: Provenance::ExplicitCorners,
            yaw: slot.ramp_angle,
            anchor: DVec3::new(mid, 0.0, s.bottom),
        })
    }
}
