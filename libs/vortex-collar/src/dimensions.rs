//! # Derived Dimensions
//!
//! Working-unit radii, heights and angles computed once from
//! [`CollarParameters`]. Every geometric step reads from here, never from
//! the raw parameters.

use crate::params::{CollarParameters, SlotStrategy};
use serde::Serialize;

/// Slot geometry in working units and radians.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotDimensions {
    pub count: u32,
    pub strategy: SlotStrategy,
    /// Tangential width used for offsets: linear width for box cutters,
    /// arc length at the mid radius for wedges
    pub width: f64,
    pub angular_width: f64,
    pub height: f64,
    /// Z of the slot bottom at the outer wall
    pub bottom: f64,
    pub ramp_angle: f64,
    pub slope: f64,
    /// Radius the slot reaches on the inside
    pub inner_reach: f64,
    pub overshoot: f64,
    pub inner_width_ratio: f64,
    pub inner_height_ratio: f64,
}

/// Deflector plate geometry in working units and radians.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RampDimensions {
    pub length: f64,
    pub thickness: f64,
    pub height: f64,
    /// Radius of the plate centre before yaw
    pub center_radius: f64,
    /// Tangential offset of the plate centre
    pub offset: f64,
    pub center_z: f64,
    pub yaw: f64,
    pub tilt: f64,
}

/// Lip ring geometry in working units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LipDimensions {
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub height: f64,
    pub bottom: f64,
}

/// All derived collar dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollarDimensions {
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub height: f64,
    pub floor: f64,
    pub hollow_radius: f64,
    pub top_overshoot: f64,
    pub torch_radius: f64,
    pub slots: SlotDimensions,
    /// `None` when deflectors are disabled
    pub ramps: Option<RampDimensions>,
    pub lip: Option<LipDimensions>,
    pub segments: u32,
    pub hole_segments: u32,
    pub unit_scale: f64,
}

impl CollarDimensions {
    /// Total height including the lip.
    pub fn overall_height(&self) -> f64 {
        self.lip
            .as_ref()
            .map_or(self.height, |lip| lip.bottom + lip.height)
    }
}

impl From<&CollarParameters> for CollarDimensions {
    fn from(p: &CollarParameters) -> Self {
        let k = p.unit_scale;
        let outer_radius = p.outer_diameter / 2.0 * k;
        let inner_radius = p.inner_diameter / 2.0 * k;
        let height = p.height * k;
        let floor = p.floor_thickness * k;
        let mid_radius = (outer_radius + inner_radius) / 2.0;

        let s = &p.slots;
        let angular_width = s.angular_width.to_radians();
        let slots = SlotDimensions {
            count: s.count,
            strategy: s.strategy,
            width: match s.strategy {
                SlotStrategy::BoxCut => s.width * k,
                SlotStrategy::HullWedge | SlotStrategy::CornerWedge => angular_width * mid_radius,
            },
            angular_width,
            height: s.height * k,
            bottom: floor + s.floor_offset * k,
            ramp_angle: s.ramp_angle.to_radians(),
            slope: s.ramp_slope.to_radians(),
            inner_reach: inner_radius - s.inner_extension * k,
            overshoot: s.overshoot * k,
            inner_width_ratio: s.inner_width_ratio,
            inner_height_ratio: s.inner_height_ratio,
        };

        let r = &p.ramps;
        let ramps = r.enabled.then(|| {
            let length = (outer_radius - inner_radius) * r.wall_fraction
                + s.inner_extension * k * r.extension_fraction;
            let plate_height = r.height * k;
            let rise = slots.slope.tan() * length * 0.5;
            RampDimensions {
                length,
                thickness: r.thickness * k,
                height: plate_height,
                center_radius: inner_radius + r.radial_gap * k + length / 2.0,
                offset: slots.width * r.trailing_edge_fraction,
                center_z: floor + (r.lift - r.embed) * k + rise + plate_height / 2.0,
                yaw: slots.ramp_angle + r.yaw_bias.to_radians(),
                tilt: slots.slope * r.tilt_fraction,
            }
        });

        let lip = p.lip.as_ref().map(|lip| LipDimensions {
            outer_radius: inner_radius + lip.overhang * k,
            inner_radius: inner_radius - lip.inset * k,
            height: lip.height * k,
            bottom: height - lip.embed * k,
        });

        Self {
            outer_radius,
            inner_radius,
            height,
            floor,
            hollow_radius: inner_radius - p.hollow_inset * k,
            top_overshoot: p.top_overshoot * k,
            torch_radius: p.torch_hole_diameter / 2.0 * k,
            slots,
            ramps,
            lip,
            segments: p.segments,
            hole_segments: p.hole_segments,
            unit_scale: k,
        }
    }
}
