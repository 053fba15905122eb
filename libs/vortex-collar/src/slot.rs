//! # Slot Placement
//!
//! Slot `i` of `N` sits at `i · 2π/N` around the collar axis and is yawed by
//! the ramp angle. Descriptors are derived on demand from the index and the
//! dimensions; nothing about a slot is stored.

use glam::DVec3;
use solid_mesh::Transform;
use std::f64::consts::TAU;

/// Placement of one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotDescriptor {
    /// Slot index in `[0, count)`
    pub index: u32,
    /// Angle of the slot position around the axis (rad)
    pub base_angle: f64,
    /// Yaw of the slot relative to radial (rad)
    pub ramp_angle: f64,
}

impl SlotDescriptor {
    /// Descriptor for slot `index` of `count`.
    pub fn new(index: u32, count: u32, ramp_angle: f64) -> Self {
        Self {
            index,
            base_angle: TAU * index as f64 / count.max(1) as f64,
            ramp_angle,
        }
    }

    /// All descriptors in index order.
    pub fn all(count: u32, ramp_angle: f64) -> Vec<Self> {
        (0..count).map(|i| Self::new(i, count, ramp_angle)).collect()
    }

    /// Direction the slot faces, in `[0, 2π)`.
    pub fn placement_angle(&self) -> f64 {
        (self.base_angle + self.ramp_angle).rem_euclid(TAU)
    }

    /// Yaw by `yaw` about the local origin, move the local origin to
    /// `anchor`, then rotate into slot position about the collar axis.
    pub fn placement(&self, yaw: f64, anchor: DVec3) -> Transform {
        Transform::rotation_z(yaw)
            .then(Transform::translation(anchor))
            .then(Transform::rotation_z(self.base_angle))
    }

    /// Placement using the slot's own ramp angle.
    pub fn transform(&self, anchor: DVec3) -> Transform {
        self.placement(self.ramp_angle, anchor)
    }
}
