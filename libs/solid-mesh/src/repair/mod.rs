//! # Mesh Validator & Repair
//!
//! Watertightness checks and best-effort repair of boolean output.
//!
//! ## Repair order
//!
//! ```text
//! weld → drop degenerate → split T-junctions → fill holes → orient
//! ```
//!
//! The sequence repeats until the solid is watertight or a pass changes
//! nothing. Repair is deterministic, and a watertight input comes back
//! unchanged.

mod fill;
mod orient;
mod stitch;
mod topology;
mod weld;

#[cfg(test)]
mod tests;

pub use fill::{boundary_loops, fill_holes};
pub use orient::orient;
pub use stitch::{split_t_junctions, stitch};
pub use topology::{inspect, is_watertight, TopologyReport};
pub use weld::{drop_degenerate_faces, weld};

use crate::solid::Solid;
use config::constants::{BSP_EPSILON, MAX_REPAIR_PASSES, WELD_EPSILON};
use tracing::debug;

/// One full repair pass.
fn repair_pass(solid: &Solid) -> Solid {
    let welded = weld(solid, WELD_EPSILON);
    let cleaned = drop_degenerate_faces(&welded, WELD_EPSILON);
    let split = split_t_junctions(&cleaned, BSP_EPSILON);
    let filled = fill_holes(&split);
    orient(&filled)
}

/// Repairs a solid toward a closed, consistently outward-wound manifold.
///
/// # Example
///
/// ```rust
/// use solid_mesh::primitives::create_box;
/// use solid_mesh::repair::{is_watertight, repair};
/// use glam::DVec3;
///
/// let (vertices, mut faces) = create_box(DVec3::ONE).unwrap().into_buffers();
/// faces.pop();
/// let open = solid_mesh::Solid::from_buffers(vertices, faces).unwrap();
///
/// let fixed = repair(open);
/// assert!(is_watertight(&fixed));
/// ```
pub fn repair(solid: Solid) -> Solid {
    let mut current = solid;
    for pass in 0..MAX_REPAIR_PASSES {
        let report = inspect(&current);
        if report.is_watertight() {
            return current;
        }
        debug!(pass, %report, "repair pass");

        let next = repair_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
