//! # Build Report
//!
//! What happened during a collar build: the states visited, the outcome of
//! every feature, validation and repair, and a summary of the final solid.

use crate::authoring::Provenance;
use crate::params::SlotStrategy;
use crate::pipeline::PipelineState;
use config::constants::INCH_TO_MM;
use glam::DVec3;
use serde::Serialize;
use solid_mesh::{is_watertight, Aabb, Solid, TopologyReport};
use std::fmt;

/// A feature the pipeline tries to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "kebab-case")]
pub enum Feature {
    Base,
    Slot(u32),
    Ramp(u32),
    TorchHole,
    Lip,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Slot(i) => write!(f, "slot {i}"),
            Self::Ramp(i) => write!(f, "ramp {i}"),
            Self::TorchHole => f.write_str("torch hole"),
            Self::Lip => f.write_str("lip"),
        }
    }
}

/// Whether a feature made it into the solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FeatureStatus {
    Applied,
    Skipped { reason: String },
}

/// Outcome of one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureOutcome {
    pub feature: Feature,
    pub status: FeatureStatus,
    /// How the feature's solid was authored, when it got that far
    pub provenance: Option<Provenance>,
}

impl FeatureOutcome {
    pub fn is_applied(&self) -> bool {
        self.status == FeatureStatus::Applied
    }
}

/// Topology before and after the final repair step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub before: TopologyReport,
    /// Present only when repair ran
    pub after: Option<TopologyReport>,
}

impl ValidationSummary {
    pub fn repaired(&self) -> bool {
        self.after.is_some()
    }

    /// The report describing the returned solid.
    pub fn last(&self) -> &TopologyReport {
        self.after.as_ref().unwrap_or(&self.before)
    }
}

/// Size and topology of a finished solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolidSummary {
    pub vertex_count: usize,
    pub face_count: usize,
    pub watertight: bool,
    pub bounding_box: Aabb,
    /// Extents in working units
    pub extents: DVec3,
    /// Extents in inches
    pub source_extents: DVec3,
    /// Working units per inch
    pub unit_scale: f64,
}

impl SolidSummary {
    pub fn of(solid: &Solid, unit_scale: f64) -> Self {
        let bounding_box = solid.bounding_box();
        let extents = bounding_box.extents();
        Self {
            vertex_count: solid.vertex_count(),
            face_count: solid.face_count(),
            watertight: is_watertight(solid),
            bounding_box,
            extents,
            source_extents: extents / unit_scale,
            unit_scale,
        }
    }

    /// Name of the working unit.
    pub fn unit_label(&self) -> &'static str {
        if (self.unit_scale - INCH_TO_MM).abs() < 1e-12 {
            "mm"
        } else if (self.unit_scale - 1.0).abs() < 1e-12 {
            "in"
        } else {
            "units"
        }
    }
}

impl fmt::Display for SolidSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Watertight: {}", self.watertight)?;
        writeln!(f, "Dimensions:")?;
        let unit = self.unit_label();
        for (axis, working, source) in [
            ("X", self.extents.x, self.source_extents.x),
            ("Y", self.extents.y, self.source_extents.y),
            ("Z", self.extents.z, self.source_extents.z),
        ] {
            writeln!(f, "  {axis}: {working:.1} {unit} ({source:.2} in)")?;
        }
        Ok(())
    }
}

/// Everything a build produced besides the solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub strategy: SlotStrategy,
    pub states: Vec<PipelineState>,
    pub features: Vec<FeatureOutcome>,
    pub validation: ValidationSummary,
    pub summary: SolidSummary,
}

impl BuildReport {
    /// Features that were skipped.
    pub fn failures(&self) -> impl Iterator<Item = &FeatureOutcome> {
        self.features.iter().filter(|o| !o.is_applied())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Indices of slots that were cut.
    pub fn applied_slots(&self) -> Vec<u32> {
        self.features
            .iter()
            .filter(|o| o.is_applied())
            .filter_map(|o| match o.feature {
                Feature::Slot(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    /// Outcome of a feature, if it was attempted.
    pub fn outcome(&self, feature: Feature) -> Option<&FeatureOutcome> {
        self.features.iter().find(|o| o.feature == feature)
    }

    pub fn is_watertight(&self) -> bool {
        self.summary.watertight
    }

    /// Final state reached.
    pub fn final_state(&self) -> Option<PipelineState> {
        self.states.last().copied()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Collar build ({} slots)", self.strategy)?;
        write!(f, "{}", self.summary)?;

        let applied = self.features.len() - self.failure_count();
        writeln!(f, "Features: {applied} applied, {} skipped", self.failure_count())?;
        for outcome in self.failures() {
            if let FeatureStatus::Skipped { reason } = &outcome.status {
                writeln!(f, "  {} skipped: {reason}", outcome.feature)?;
            }
        }

        match &self.validation.after {
            Some(after) => {
                writeln!(f, "Repair: {} -> {after}", self.validation.before)?;
            }
            None => writeln!(f, "Repair: not needed")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solid_mesh::inspect;
    use solid_mesh::primitives::create_box;

    fn report_with(features: Vec<FeatureOutcome>) -> BuildReport {
        let solid = create_box(DVec3::new(152.4, 152.4, 63.5)).unwrap();
        BuildReport {
            strategy: SlotStrategy::BoxCut,
            states: vec![PipelineState::Init, PipelineState::Done],
            features,
            validation: ValidationSummary {
                before: inspect(&solid),
                after: None,
            },
            summary: SolidSummary::of(&solid, INCH_TO_MM),
        }
    }

    fn outcome(feature: Feature, applied: bool) -> FeatureOutcome {
        FeatureOutcome {
            feature,
            status: if applied {
                FeatureStatus::Applied
            } else {
                FeatureStatus::Skipped {
                    reason: "Boolean operation failed: injected".into(),
                }
            },
            provenance: Some(Provenance::Primitive),
        }
    }

    #[test]
    fn test_summary_extents_in_both_units() {
        let report = report_with(vec![]);
        assert!((report.summary.extents.x - 152.4).abs() < 1e-9);
        assert!((report.summary.source_extents.x - 6.0).abs() < 1e-9);
        assert!((report.summary.source_extents.z - 2.5).abs() < 1e-9);
        assert_eq!(report.summary.unit_label(), "mm");
    }

    #[test]
    fn test_failures_and_applied_slots() {
        let report = report_with(vec![
            outcome(Feature::Slot(0), true),
            outcome(Feature::Slot(1), false),
            outcome(Feature::Slot(2), true),
            outcome(Feature::Ramp(0), true),
        ]);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.applied_slots(), vec![0, 2]);
        assert!(report.outcome(Feature::Slot(1)).is_some_and(|o| !o.is_applied()));
        assert!(report.outcome(Feature::Lip).is_none());
    }

    #[test]
    fn test_display() {
        let report = report_with(vec![outcome(Feature::Slot(3), false)]);
        let text = report.to_string();
        assert!(text.contains("Watertight: true"));
        assert!(text.contains("X: 152.4 mm (6.00 in)"));
        assert!(text.contains("Z: 63.5 mm (2.50 in)"));
        assert!(text.contains("slot 3 skipped: Boolean operation failed"));
        assert!(text.contains("Repair: not needed"));
    }

    #[test]
    fn test_report_serializes() {
        let report = report_with(vec![outcome(Feature::Slot(3), false)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["features"][0]["feature"]["kind"], "slot");
        assert_eq!(json["features"][0]["feature"]["index"], 3);
        assert_eq!(json["features"][0]["status"]["status"], "skipped");
        assert_eq!(json["strategy"], "box-cut");
    }
}
