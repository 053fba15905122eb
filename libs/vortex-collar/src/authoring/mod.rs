//! # Slot Cutter Authoring
//!
//! Three interchangeable ways to author the solid a slot is cut with.
//! Each returns the cutter in a local frame together with the yaw and anchor
//! that [`SlotDescriptor::placement`] needs to put it into collar space.
//!
//! | strategy | shape | provenance |
//! |---|---|---|
//! | [`BoxCut`] | yawed box | `Primitive` |
//! | [`HullWedge`] | hull of arc samples | `ConvexHull`, or `BoxFallback` |
//! | [`CornerWedge`] | explicit tapered wedge | `ExplicitCorners` |

mod box_cut;
mod corner_wedge;
mod hull_wedge;


pub use box_cut::BoxCut;
pub use corner_wedge::CornerWedge;
pub use hull_wedge::HullWedge;

use crate::dimensions::CollarDimensions;
use crate::params::SlotStrategy;
use crate::slot::SlotDescriptor;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use solid_mesh::{MeshError, Solid};
use std::fmt;

/// How an authored solid was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// A primitive generator
    Primitive,
    /// Explicit corner and face lists
    ExplicitCorners,
    /// Convex hull of a point cloud
    ConvexHull,
    /// Box standing in for a hull that could not be built
    BoxFallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Primitive => "primitive",
            Self::ExplicitCorners => "explicit corners",
            Self::ConvexHull => "convex hull",
            Self::BoxFallback => "box fallback",
        })
    }
}

/// A solid in its local frame plus the placement it expects.
#[derive(Debug, Clone)]
pub struct AuthoredSolid {
    pub solid: Solid,
    pub provenance: Provenance,
    /// Yaw about the local origin (rad)
    pub yaw: f64,
    /// Where the local origin lands before the slot's base rotation
    pub anchor: DVec3,
}

impl AuthoredSolid {
    /// The solid moved into collar space for `slot`.
    pub fn place(&self, slot: &SlotDescriptor) -> Solid {
        slot.placement(self.yaw, self.anchor).apply(&self.solid)
    }
}

/// Authors the cutter for one slot.
pub trait SlotCutter {
    /// Strategy this cutter implements.
    fn strategy(&self) -> SlotStrategy;

    /// Builds the cutter for `slot` in its local frame.
    fn author(
        &self,
        dims: &CollarDimensions,
        slot: &SlotDescriptor,
    ) -> Result<AuthoredSolid, MeshError>;
}

/// The cutter for a configured strategy.
pub fn cutter_for(strategy: SlotStrategy) -> Box<dyn SlotCutter> {
    match strategy {
        SlotStrategy::BoxCut => Box::new(BoxCut),
        SlotStrategy::HullWedge => Box::new(HullWedge),
        SlotStrategy::CornerWedge => Box::new(CornerWedge),
    }
}

/// Length and centre radius of a box cutter reaching `overshoot` past the
/// inner reach and the outer wall.
pub(crate) fn radial_extent(dims: &CollarDimensions) -> (f64, f64) {
    let s = &dims.slots;
    let inner = s.inner_reach - s.overshoot;
    let outer = dims.outer_radius + s.overshoot;
    (outer - inner, (outer + inner) / 2.0)
}
