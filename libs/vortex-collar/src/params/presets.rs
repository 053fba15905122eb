//! Parameter sets reproducing the four collar design iterations.
//!
//! | iteration | base | slots | ramp angle | extras |
//! |---|---|---|---|---|
//! | 1 | boolean | box 0.5" × 1.5" | 22° | |
//! | 2 | authored cup | hull wedge 25° | 22° | |
//! | 3 | boolean | box 0.6" × 1.8" | 22° | |
//! | 4 | boolean, hollow inset 0.75" | corner wedge 35°, 15° slope | 45° | seating lip |

use super::{
    BaseConstruction, CollarParameters, LipParameters, RampParameters, SlotParameters,
    SlotStrategy,
};
use config::constants::{
    mm_to_inches, DEFAULT_HOLE_SEGMENTS, DEFAULT_SEGMENTS, INCH_TO_MM,
};
use std::ops::RangeInclusive;

/// Known design iteration numbers.
pub const ITERATIONS: RangeInclusive<u32> = 1..=4;

fn collar(floor_thickness: f64, slots: SlotParameters, ramps: RampParameters) -> CollarParameters {
    CollarParameters {
        outer_diameter: 6.0,
        inner_diameter: 4.0,
        height: 2.5,
        floor_thickness,
        hollow_inset: 0.0,
        top_overshoot: mm_to_inches(0.1),
        base: BaseConstruction::Boolean,
        slots,
        ramps,
        torch_hole_diameter: 0.5,
        lip: None,
        segments: DEFAULT_SEGMENTS,
        hole_segments: DEFAULT_HOLE_SEGMENTS,
        unit_scale: INCH_TO_MM,
    }
}

fn six_slots(strategy: SlotStrategy) -> SlotParameters {
    SlotParameters {
        count: 6,
        strategy,
        width: 0.6,
        angular_width: 25.0,
        height: 1.8,
        floor_offset: 0.0,
        ramp_angle: 22.0,
        ramp_slope: 0.0,
        inner_extension: 0.0,
        overshoot: mm_to_inches(5.0),
        inner_width_ratio: 1.0,
        inner_height_ratio: 1.0,
    }
}

fn flat_ramp(wall_fraction: f64, thickness: f64, height: f64, radial_gap_mm: f64) -> RampParameters {
    RampParameters {
        enabled: true,
        wall_fraction,
        extension_fraction: 0.0,
        thickness,
        height,
        radial_gap: mm_to_inches(radial_gap_mm),
        trailing_edge_fraction: 0.0,
        yaw_bias: 0.0,
        lift: 0.0,
        tilt_fraction: 0.0,
        embed: 0.01,
    }
}

/// Box slots, ramps biased slightly past the slot angle.
pub(super) fn iteration_1() -> CollarParameters {
    let slots = SlotParameters {
        width: 0.5,
        height: 1.5,
        overshoot: 0.1,
        ..six_slots(SlotStrategy::BoxCut)
    };
    let ramps = RampParameters {
        yaw_bias: 0.1_f64.to_degrees(),
        ..flat_ramp(0.8, 0.2, 1.35, 5.0)
    };
    CollarParameters {
        top_overshoot: mm_to_inches(1.0),
        segments: 64,
        ..collar(0.25, slots, ramps)
    }
}

/// Authored cup, hull-derived angular slots, thin plates toward the leading edge.
pub(super) fn iteration_2() -> CollarParameters {
    let slots = SlotParameters {
        height: 2.1,
        overshoot: 0.3,
        ..six_slots(SlotStrategy::HullWedge)
    };
    let ramps = RampParameters {
        trailing_edge_fraction: 0.15,
        ..flat_ramp(0.7, 0.15, 1.76, 2.0)
    };
    CollarParameters {
        base: BaseConstruction::Authored,
        ..collar(0.3, slots, ramps)
    }
}

/// Wider box slots lifted off the floor, plates on the trailing edge.
pub(super) fn iteration_3() -> CollarParameters {
    let slots = SlotParameters {
        floor_offset: mm_to_inches(0.5),
        ..six_slots(SlotStrategy::BoxCut)
    };
    let ramps = RampParameters {
        trailing_edge_fraction: 0.4,
        lift: mm_to_inches(0.5) + (1.8 - 1.53) / 2.0,
        ..flat_ramp(0.65, 0.21, 1.53, 3.0)
    };
    collar(0.3, slots, ramps)
}

/// Steep tapered wedges with rising floors reaching into the chamber, plus a lip.
pub(super) fn iteration_4() -> CollarParameters {
    let inner_extension = 0.75;
    let slots = SlotParameters {
        angular_width: 35.0,
        ramp_angle: 45.0,
        ramp_slope: 15.0,
        inner_extension,
        inner_width_ratio: 0.7,
        inner_height_ratio: 0.6,
        ..six_slots(SlotStrategy::CornerWedge)
    };
    let ramps = RampParameters {
        enabled: true,
        wall_fraction: 1.0,
        extension_fraction: 0.8,
        thickness: 0.2,
        height: 1.5,
        radial_gap: -0.3 * inner_extension,
        trailing_edge_fraction: 0.35,
        yaw_bias: 0.0,
        lift: 0.0,
        tilt_fraction: 0.3,
        embed: 0.01,
    };
    CollarParameters {
        hollow_inset: inner_extension,
        lip: Some(LipParameters::default()),
        ..collar(0.25, slots, ramps)
    }
}
