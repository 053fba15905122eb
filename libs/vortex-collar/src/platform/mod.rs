//! # Platform Assembly
//!
//! The ride platform the collar sits in: an elliptical deck with a central
//! drive hole, standing on four casters. Parts are kept separate so they can
//! be exported one by one or concatenated into a single assembly mesh.

#[cfg(test)]
mod tests;

use crate::error::CollarError;
use crate::params::positive;
use config::constants::{DEFAULT_CASTER_SEGMENTS, DEFAULT_DECK_SEGMENTS, MAX_SEGMENTS, MIN_SEGMENTS};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use solid_mesh::primitives::{create_cylinder, create_elliptic_tube};
use solid_mesh::{Solid, Transform};
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

/// Part names in assembly order.
pub const PART_NAMES: [&str; 5] = [
    "board",
    "caster_front_left",
    "caster_front_right",
    "caster_rear_left",
    "caster_rear_right",
];

/// Platform design dimensions in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformDimensions {
    /// Deck extent along Y
    pub length: f64,
    /// Deck extent along X
    pub width: f64,
    pub thickness: f64,
    pub drive_hole_diameter: f64,
    pub caster_bracket_radius: f64,
    pub caster_bracket_height: f64,
    pub caster_wheel_radius: f64,
    pub caster_wheel_width: f64,
    /// Height of the deck underside
    pub caster_height: f64,
    pub deck_segments: u32,
    pub caster_segments: u32,
}

impl Default for PlatformDimensions {
    fn default() -> Self {
        Self {
            length: 53.0,
            width: 28.0,
            thickness: 1.5,
            drive_hole_diameter: 13.0,
            caster_bracket_radius: 1.2,
            caster_bracket_height: 1.0,
            caster_wheel_radius: 1.5,
            caster_wheel_width: 0.8,
            caster_height: 3.0,
            deck_segments: DEFAULT_DECK_SEGMENTS,
            caster_segments: DEFAULT_CASTER_SEGMENTS,
        }
    }
}

impl PlatformDimensions {
    pub fn validate(&self) -> Result<(), CollarError> {
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("thickness", self.thickness),
            ("drive_hole_diameter", self.drive_hole_diameter),
            ("caster_bracket_radius", self.caster_bracket_radius),
            ("caster_bracket_height", self.caster_bracket_height),
            ("caster_wheel_radius", self.caster_wheel_radius),
            ("caster_wheel_width", self.caster_wheel_width),
            ("caster_height", self.caster_height),
        ] {
            positive(field, value)?;
        }
        if self.drive_hole_diameter >= self.width.min(self.length) {
            return Err(CollarError::invalid(
                "drive_hole_diameter",
                "drive hole must fit inside the deck",
            ));
        }
        for (field, segments) in [
            ("deck_segments", self.deck_segments),
            ("caster_segments", self.caster_segments),
        ] {
            if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
                return Err(CollarError::invalid(
                    field,
                    format!("must be in {MIN_SEGMENTS}..={MAX_SEGMENTS}, got {segments}"),
                ));
            }
        }
        Ok(())
    }

    /// Caster mount points under the deck, in `PART_NAMES` order.
    pub fn caster_positions(&self) -> [(&'static str, DVec3); 4] {
        let z = self.caster_height - self.caster_bracket_height / 2.0;
        let x = self.width / 4.0;
        let y = self.length / 3.0;
        [
            ("caster_front_left", DVec3::new(-x, -y, z)),
            ("caster_front_right", DVec3::new(x, -y, z)),
            ("caster_rear_left", DVec3::new(-x, y, z)),
            ("caster_rear_right", DVec3::new(x, y, z)),
        ]
    }
}

/// One exported part.
#[derive(Debug, Clone)]
pub struct NamedPart {
    pub name: &'static str,
    pub solid: Solid,
}

/// Platform part generator.
#[derive(Debug, Clone, Default)]
pub struct Platform {
    dims: PlatformDimensions,
}

impl Platform {
    pub fn new(dims: PlatformDimensions) -> Result<Self, CollarError> {
        dims.validate()?;
        Ok(Self { dims })
    }

    pub fn dimensions(&self) -> &PlatformDimensions {
        &self.dims
    }

    /// Elliptical deck with the drive hole, underside at `caster_height`.
    pub fn deck(&self) -> Result<Solid, CollarError> {
        let d = &self.dims;
        let deck = create_elliptic_tube(
            d.width / 2.0,
            d.length / 2.0,
            d.drive_hole_diameter / 2.0,
            d.thickness,
            d.deck_segments,
        )
        .map_err(|e| CollarError::authoring("board", e))?;
        Ok(Transform::translation(DVec3::new(0.0, 0.0, d.caster_height)).apply(&deck))
    }

    /// Bracket with the wheel hung below it, bracket centred on the origin.
    ///
    /// The two bodies overlap and are concatenated, not unioned.
    pub fn caster(&self) -> Result<Solid, CollarError> {
        let d = &self.dims;
        let bracket = create_cylinder(d.caster_bracket_radius, d.caster_bracket_height, d.caster_segments)
            .map_err(|e| CollarError::authoring("caster bracket", e))?;
        let wheel = create_cylinder(d.caster_wheel_radius, d.caster_wheel_width, d.caster_segments)
            .map_err(|e| CollarError::authoring("caster wheel", e))?;

        let hang = Transform::rotation(DVec3::X, FRAC_PI_2).then(Transform::translation(DVec3::new(
            0.0,
            0.0,
            -d.caster_bracket_height / 2.0 - d.caster_wheel_radius,
        )));
        Ok(Solid::concatenate([&bracket, &hang.apply(&wheel)]))
    }

    /// Every part in `PART_NAMES` order, scaled by `scale`.
    pub fn parts(&self, scale: f64) -> Result<Vec<NamedPart>, CollarError> {
        positive("scale", scale)?;
        let mut parts = Vec::with_capacity(PART_NAMES.len());
        parts.push(NamedPart {
            name: PART_NAMES[0],
            solid: self.deck()?,
        });

        let caster = self.caster()?;
        for (name, position) in self.dims.caster_positions() {
            parts.push(NamedPart {
                name,
                solid: Transform::translation(position).apply(&caster),
            });
        }

        if scale != 1.0 {
            for part in &mut parts {
                part.solid = part.solid.scaled(scale);
            }
        }
        debug!(parts = parts.len(), scale, "platform parts generated");
        Ok(parts)
    }

    /// A single part by name.
    pub fn part(&self, name: &str, scale: f64) -> Result<NamedPart, CollarError> {
        if !PART_NAMES.contains(&name) {
            return Err(CollarError::UnknownPart {
                name: name.to_string(),
                available: PART_NAMES.join(", "),
            });
        }
        self.parts(scale)?
            .into_iter()
            .find(|part| part.name == name)
            .ok_or_else(|| CollarError::UnknownPart {
                name: name.to_string(),
                available: PART_NAMES.join(", "),
            })
    }

    /// All parts concatenated into one mesh.
    pub fn assembly(&self, scale: f64) -> Result<Solid, CollarError> {
        let parts = self.parts(scale)?;
        Ok(Solid::concatenate(parts.iter().map(|part| &part.solid)))
    }
}
