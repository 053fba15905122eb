//! # Design Parameters
//!
//! The immutable record every collar build starts from. Lengths are in
//! inches and angles in degrees; [`CollarParameters::unit_scale`] converts
//! lengths to the working unit (millimetres by default).
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON file only
//! needs the fields it changes:
//!
//! ```rust
//! use vortex_collar::params::{CollarParameters, SlotStrategy};
//!
//! let params: CollarParameters =
//!     serde_json::from_str(r#"{ "slots": { "count": 8, "strategy": "corner-wedge" } }"#).unwrap();
//! assert_eq!(params.slots.count, 8);
//! assert_eq!(params.slots.strategy, SlotStrategy::CornerWedge);
//! assert_eq!(params.outer_diameter, 6.0);
//! ```

mod presets;


pub use presets::ITERATIONS;

use crate::error::CollarError;
use config::constants::{INCH_TO_MM, MAX_SEGMENTS, MAX_SLOTS, MIN_SEGMENTS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// STRATEGIES
// =============================================================================

/// How slot cutters are authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStrategy {
    /// Plain box yawed by the ramp angle.
    #[default]
    BoxCut,
    /// Convex hull of arc samples at the inner and outer radius.
    HullWedge,
    /// Explicit eight-corner wedge, tapered and with a rising floor.
    CornerWedge,
}

impl SlotStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [SlotStrategy; 3] = [Self::BoxCut, Self::HullWedge, Self::CornerWedge];
}

impl fmt::Display for SlotStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BoxCut => "box-cut",
            Self::HullWedge => "hull-wedge",
            Self::CornerWedge => "corner-wedge",
        })
    }
}

impl FromStr for SlotStrategy {
    type Err = CollarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.to_string() == s)
            .ok_or_else(|| {
                CollarError::invalid(
                    "slots.strategy",
                    format!("unknown strategy '{s}' (expected box-cut, hull-wedge or corner-wedge)"),
                )
            })
    }
}

/// How the hollow base body is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseConstruction {
    /// Outer cylinder minus an over-extended inner cylinder.
    #[default]
    Boolean,
    /// Cup authored directly as one closed surface.
    Authored,
}

// =============================================================================
// PARAMETER GROUPS
// =============================================================================

/// Slot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotParameters {
    /// Number of slots, evenly spaced
    pub count: u32,
    /// Cutter authoring strategy
    pub strategy: SlotStrategy,
    /// Linear slot width for box cutters (in)
    pub width: f64,
    /// Angular slot width for wedge cutters (deg)
    pub angular_width: f64,
    /// Slot height at the outer wall (in)
    pub height: f64,
    /// Gap between the floor top and the slot bottom (in)
    pub floor_offset: f64,
    /// Yaw of the slot away from radial (deg)
    pub ramp_angle: f64,
    /// Rise of the slot floor toward the axis (deg)
    pub ramp_slope: f64,
    /// Distance the slot reaches inside the inner wall (in)
    pub inner_extension: f64,
    /// Distance a cutter extends past each wall it pierces (in)
    pub overshoot: f64,
    /// Inner-edge width as a fraction of the outer-edge width
    pub inner_width_ratio: f64,
    /// Inner-edge height as a fraction of the outer-edge height
    pub inner_height_ratio: f64,
}

/// Deflector plate added inside each slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampParameters {
    /// Add deflectors at all
    pub enabled: bool,
    /// Length as a fraction of the wall thickness
    pub wall_fraction: f64,
    /// Extra length as a fraction of the slot's inner extension
    pub extension_fraction: f64,
    /// Plate thickness (in)
    pub thickness: f64,
    /// Plate height (in)
    pub height: f64,
    /// Radial distance from the inner wall to the plate's inner end (in)
    pub radial_gap: f64,
    /// Tangential offset as a fraction of the slot width
    pub trailing_edge_fraction: f64,
    /// Extra yaw on top of the slot's ramp angle (deg)
    pub yaw_bias: f64,
    /// Height of the plate bottom above the floor (in)
    pub lift: f64,
    /// Tilt about the plate's long axis as a fraction of the ramp slope
    pub tilt_fraction: f64,
    /// Depth the plate sinks into the surface it stands on (in)
    pub embed: f64,
}

/// Seating lip on top of the collar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LipParameters {
    /// Lip height above the collar top (in)
    pub height: f64,
    /// Outer ring distance beyond the inner radius (in)
    pub overhang: f64,
    /// Inner ring distance inside the inner radius (in)
    pub inset: f64,
    /// Depth the lip sinks into the collar top (in)
    pub embed: f64,
}

impl Default for LipParameters {
    fn default() -> Self {
        Self {
            height: 0.3,
            overhang: 0.15,
            inset: 0.1,
            embed: 0.01,
        }
    }
}

// =============================================================================
// COLLAR PARAMETERS
// =============================================================================

/// Complete collar design.
///
/// The default is the third design iteration; see
/// [`CollarParameters::iteration`] for the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollarParameters {
    /// Outer wall diameter (in)
    pub outer_diameter: f64,
    /// Inner wall diameter; the tube seats here (in)
    pub inner_diameter: f64,
    /// Overall height without lip (in)
    pub height: f64,
    /// Floor thickness (in)
    pub floor_thickness: f64,
    /// Amount the hollow is narrower than the inner diameter, radially (in)
    pub hollow_inset: f64,
    /// Distance the hollowing cutter extends past the top (in)
    pub top_overshoot: f64,
    /// Base body construction
    pub base: BaseConstruction,
    /// Slot configuration
    pub slots: SlotParameters,
    /// Deflector configuration
    pub ramps: RampParameters,
    /// Torch entry hole diameter (in)
    pub torch_hole_diameter: f64,
    /// Optional seating lip
    pub lip: Option<LipParameters>,
    /// Circular tessellation of the walls
    pub segments: u32,
    /// Circular tessellation of the torch hole
    pub hole_segments: u32,
    /// Working units per inch
    pub unit_scale: f64,
}

impl Default for CollarParameters {
    fn default() -> Self {
        presets::iteration_3()
    }
}

impl Default for SlotParameters {
    fn default() -> Self {
        presets::iteration_3().slots
    }
}

impl Default for RampParameters {
    fn default() -> Self {
        presets::iteration_3().ramps
    }
}

impl CollarParameters {
    /// Parameters of a numbered design iteration (1 to 4).
    pub fn iteration(number: u32) -> Result<Self, CollarError> {
        match number {
            1 => Ok(presets::iteration_1()),
            2 => Ok(presets::iteration_2()),
            3 => Ok(presets::iteration_3()),
            4 => Ok(presets::iteration_4()),
            other => Err(CollarError::UnknownIteration(other)),
        }
    }

    /// Reads parameters from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, CollarError> {
        serde_json::from_str(text).map_err(|e| CollarError::invalid("json", e.to_string()))
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CollarError> {
        serde_json::to_string_pretty(self).map_err(|e| CollarError::invalid("json", e.to_string()))
    }

    /// Returns a copy with every length multiplied by `factor`.
    ///
    /// Angles, ratios, counts and tessellation are unchanged.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut p = self.clone();
        for length in [
            &mut p.outer_diameter,
            &mut p.inner_diameter,
            &mut p.height,
            &mut p.floor_thickness,
            &mut p.hollow_inset,
            &mut p.top_overshoot,
            &mut p.torch_hole_diameter,
            &mut p.slots.width,
            &mut p.slots.height,
            &mut p.slots.floor_offset,
            &mut p.slots.inner_extension,
            &mut p.slots.overshoot,
            &mut p.ramps.thickness,
            &mut p.ramps.height,
            &mut p.ramps.radial_gap,
            &mut p.ramps.lift,
            &mut p.ramps.embed,
        ] {
            *length *= factor;
        }
        if let Some(lip) = p.lip.as_mut() {
            lip.height *= factor;
            lip.overhang *= factor;
            lip.inset *= factor;
            lip.embed *= factor;
        }
        p
    }

    /// True when the working unit is millimetres.
    pub fn is_metric(&self) -> bool {
        (self.unit_scale - INCH_TO_MM).abs() < 1e-12
    }

    /// Checks every field before any geometry is built.
    pub fn validate(&self) -> Result<(), CollarError> {
        positive("unit_scale", self.unit_scale)?;
        positive("outer_diameter", self.outer_diameter)?;
        positive("inner_diameter", self.inner_diameter)?;
        positive("height", self.height)?;
        positive("floor_thickness", self.floor_thickness)?;
        non_negative("hollow_inset", self.hollow_inset)?;
        positive("top_overshoot", self.top_overshoot)?;
        positive("torch_hole_diameter", self.torch_hole_diameter)?;

        if self.inner_diameter >= self.outer_diameter {
            return Err(CollarError::invalid(
                "inner_diameter",
                format!(
                    "must be smaller than outer_diameter ({} >= {})",
                    self.inner_diameter, self.outer_diameter
                ),
            ));
        }
        if self.floor_thickness >= self.height {
            return Err(CollarError::invalid(
                "floor_thickness",
                format!("must be smaller than height ({} >= {})", self.floor_thickness, self.height),
            ));
        }
        let hollow_radius = self.inner_diameter / 2.0 - self.hollow_inset;
        if hollow_radius <= 0.0 {
            return Err(CollarError::invalid(
                "hollow_inset",
                "leaves no hollow inside the inner wall",
            ));
        }
        if self.torch_hole_diameter / 2.0 >= hollow_radius {
            return Err(CollarError::invalid(
                "torch_hole_diameter",
                "must fit inside the hollow",
            ));
        }

        for (field, segments) in [("segments", self.segments), ("hole_segments", self.hole_segments)] {
            if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
                return Err(CollarError::invalid(
                    field,
                    format!("must be in {MIN_SEGMENTS}..={MAX_SEGMENTS}, got {segments}"),
                ));
            }
        }

        self.validate_slots(hollow_radius)?;
        self.validate_ramps()?;
        if let Some(lip) = &self.lip {
            self.validate_lip(lip)?;
        }
        Ok(())
    }

    fn validate_slots(&self, hollow_radius: f64) -> Result<(), CollarError> {
        let s = &self.slots;
        if s.count > MAX_SLOTS {
            return Err(CollarError::invalid(
                "slots.count",
                format!("must be at most {MAX_SLOTS}, got {}", s.count),
            ));
        }
        if s.count == 0 {
            return Ok(());
        }

        positive("slots.height", s.height)?;
        non_negative("slots.floor_offset", s.floor_offset)?;
        non_negative("slots.inner_extension", s.inner_extension)?;
        positive("slots.overshoot", s.overshoot)?;
        match s.strategy {
            SlotStrategy::BoxCut => positive("slots.width", s.width)?,
            SlotStrategy::HullWedge | SlotStrategy::CornerWedge => {
                positive("slots.angular_width", s.angular_width)?;
                if s.angular_width * s.count as f64 >= 360.0 {
                    return Err(CollarError::invalid(
                        "slots.angular_width",
                        "slots would overlap around the circumference",
                    ));
                }
            }
        }
        if s.strategy == SlotStrategy::CornerWedge {
            ratio("slots.inner_width_ratio", s.inner_width_ratio)?;
            ratio("slots.inner_height_ratio", s.inner_height_ratio)?;
        }

        if !(s.ramp_angle.is_finite() && s.ramp_angle.abs() < 90.0) {
            return Err(CollarError::invalid(
                "slots.ramp_angle",
                format!("must be within (-90, 90) degrees, got {}", s.ramp_angle),
            ));
        }
        if !(s.ramp_slope.is_finite() && (0.0..90.0).contains(&s.ramp_slope)) {
            return Err(CollarError::invalid(
                "slots.ramp_slope",
                format!("must be within [0, 90) degrees, got {}", s.ramp_slope),
            ));
        }
        if s.inner_extension >= hollow_radius + self.hollow_inset {
            return Err(CollarError::invalid(
                "slots.inner_extension",
                "reaches past the collar axis",
            ));
        }
        if self.floor_thickness + s.floor_offset + s.height >= self.height {
            return Err(CollarError::invalid(
                "slots.height",
                "slot would cut through the collar top",
            ));
        }
        Ok(())
    }

    fn validate_ramps(&self) -> Result<(), CollarError> {
        let r = &self.ramps;
        if !r.enabled || self.slots.count == 0 {
            return Ok(());
        }
        positive("ramps.thickness", r.thickness)?;
        positive("ramps.height", r.height)?;
        non_negative("ramps.wall_fraction", r.wall_fraction)?;
        non_negative("ramps.extension_fraction", r.extension_fraction)?;
        non_negative("ramps.embed", r.embed)?;
        for (field, value) in [
            ("ramps.radial_gap", r.radial_gap),
            ("ramps.trailing_edge_fraction", r.trailing_edge_fraction),
            ("ramps.yaw_bias", r.yaw_bias),
            ("ramps.lift", r.lift),
            ("ramps.tilt_fraction", r.tilt_fraction),
        ] {
            finite(field, value)?;
        }
        let wall = (self.outer_diameter - self.inner_diameter) / 2.0;
        if r.wall_fraction * wall + r.extension_fraction * self.slots.inner_extension <= 0.0 {
            return Err(CollarError::invalid("ramps.wall_fraction", "ramp has no length"));
        }
        Ok(())
    }

    fn validate_lip(&self, lip: &LipParameters) -> Result<(), CollarError> {
        positive("lip.height", lip.height)?;
        non_negative("lip.overhang", lip.overhang)?;
        non_negative("lip.inset", lip.inset)?;
        non_negative("lip.embed", lip.embed)?;
        if lip.overhang + lip.inset <= 0.0 {
            return Err(CollarError::invalid("lip.overhang", "lip ring has no width"));
        }
        let inner_radius = self.inner_diameter / 2.0;
        if inner_radius + lip.overhang > self.outer_diameter / 2.0 {
            return Err(CollarError::invalid("lip.overhang", "lip overhangs the outer wall"));
        }
        if lip.inset >= inner_radius {
            return Err(CollarError::invalid("lip.inset", "lip closes the bore"));
        }
        if lip.embed >= lip.height {
            return Err(CollarError::invalid("lip.embed", "must be smaller than lip.height"));
        }
        Ok(())
    }
}

// =============================================================================
// FIELD CHECKS
// =============================================================================

fn finite(field: &str, value: f64) -> Result<(), CollarError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CollarError::invalid(field, format!("must be finite, got {value}")))
    }
}

pub(crate) fn positive(field: &str, value: f64) -> Result<(), CollarError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CollarError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), CollarError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CollarError::invalid(field, format!("must not be negative, got {value}")))
    }
}

fn ratio(field: &str, value: f64) -> Result<(), CollarError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(CollarError::invalid(field, format!("must be in (0, 1], got {value}")))
    }
}
