//! Plain box cutter yawed by the ramp angle.

use super::{radial_extent, AuthoredSolid, Provenance, SlotCutter};
use crate::dimensions::CollarDimensions;
use crate::params::SlotStrategy;
use crate::slot::SlotDescriptor;
use glam::DVec3;
use solid_mesh::primitives::create_box;
use solid_mesh::MeshError;

/// Box spanning the wall, `width` wide and `height` tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxCut;

impl BoxCut {
    /// Box of the given tangential width; shared with the hull fallback.
    pub(crate) fn author_with_width(
        dims: &CollarDimensions,
        slot: &SlotDescriptor,
        width: f64,
        provenance: Provenance,
    ) -> Result<AuthoredSolid, MeshError> {
        let (length, center_radius) = radial_extent(dims);
        let height = dims.slots.height;
        let solid = create_box(DVec3::new(length, width, height))?;
        Ok(AuthoredSolid {
            solid,
            provenance,
            yaw: slot.ramp_angle,
            anchor: DVec3::new(center_radius, 0.0, dims.slots.bottom + height / 2.0),
        })
    }
}

impl SlotCutter for BoxCut {
    fn strategy(&self) -> SlotStrategy {
        SlotStrategy::BoxCut
    }

    fn author(
        &self,
        dims: &CollarDimensions,
        slot: &SlotDescriptor,
    ) -> Result<AuthoredSolid, MeshError> {
        Self::author_with_width(dims, slot, dims.slots.width, Provenance::Primitive)
    }
}
