//! # Pipeline Tests

use super::*;
use crate::params::SlotStrategy;
use glam::DVec3;
use solid_mesh::is_watertight;

fn quick(iteration: u32) -> CollarParameters {
    let mut params = CollarParameters::iteration(iteration).unwrap();
    params.segments = 16;
    params.hole_segments = 8;
    params
}

/// Fails the `fail_on`-th difference call (1-based).
#[derive(Debug, Default)]
struct FailingEngine {
    inner: BspEngine,
    fail_on: usize,
    differences: usize,
}

impl FailingEngine {
    fn failing_difference(fail_on: usize) -> Self {
        Self {
            fail_on,
            ..Default::default()
        }
    }
}

impl CsgEngine for FailingEngine {
    fn union(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
        self.inner.union(a, b)
    }

    fn difference(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
        self.differences += 1;
        if self.differences == self.fail_on {
            return Err(MeshError::boolean_failed("injected"));
        }
        self.inner.difference(a, b)
    }
}

fn slot_centre(dims: &CollarDimensions, slot: &SlotDescriptor) -> DVec3 {
    let mid = (dims.outer_radius + dims.inner_radius) / 2.0;
    DVec3::new(
        mid * slot.base_angle.cos(),
        mid * slot.base_angle.sin(),
        dims.slots.bottom + dims.slots.height / 2.0,
    )
}

#[test]
fn test_invalid_parameters_rejected_up_front() {
    let mut params = quick(3);
    params.inner_diameter = 10.0;
    assert!(matches!(
        CollarPipeline::new(params),
        Err(CollarError::InvalidParameter { .. })
    ));
}

#[test]
fn test_state_sequence() {
    let output = build(quick(3)).unwrap();
    let states = &output.report.states;
    assert_eq!(states.first(), Some(&PipelineState::Init));
    assert_eq!(states[1], PipelineState::BaseHollowed);
    assert_eq!(states[2], PipelineState::SlotsCut(0));
    assert_eq!(states[7], PipelineState::SlotsCut(5));
    assert_eq!(states[8], PipelineState::RampsUnioned(0));
    assert_eq!(states[13], PipelineState::RampsUnioned(5));
    assert_eq!(states[14], PipelineState::HoleCut);
    assert_eq!(states[15], PipelineState::Validated);
    assert_eq!(output.report.final_state(), Some(PipelineState::Done));
    assert!(!states.contains(&PipelineState::LipUnioned));
}

#[test]
fn test_every_feature_applied() {
    let output = build(quick(3)).unwrap();
    let report = &output.report;
    assert_eq!(report.failure_count(), 0);
    assert_eq!(report.applied_slots(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(report.features.len(), 1 + 6 + 6 + 1);
    assert_eq!(report.summary.watertight, is_watertight(&output.solid));
    assert!(output.solid.signed_volume() > 0.0);
}

#[test]
fn test_slots_and_hole_are_empty() {
    let mut pipeline = CollarPipeline::new(quick(3)).unwrap();
    let output = pipeline.run().unwrap();
    let dims = pipeline.dimensions();
    for slot in pipeline.slots() {
        assert!(!output.solid.contains_point(slot_centre(dims, &slot)), "slot {}", slot.index);
    }
    assert!(!output.solid.contains_point(DVec3::new(0.0, 0.0, dims.floor / 2.0)));
    assert!(output.solid.contains_point(DVec3::new(25.4, 0.0, dims.floor / 2.0)));
}

#[test]
fn test_failed_slot_is_skipped() {
    // Difference #1 hollows the base, slot i is difference #(i + 2)
    let engine = FailingEngine::failing_difference(5);
    let mut pipeline = CollarPipeline::with_engine(quick(3), engine).unwrap();
    let output = pipeline.run().unwrap();
    let report = &output.report;

    assert_eq!(report.final_state(), Some(PipelineState::Done));
    assert_eq!(report.failure_count(), 1);
    let failed = report.failures().next().unwrap();
    assert_eq!(failed.feature, Feature::Slot(3));
    assert_eq!(failed.provenance, Some(Provenance::Primitive));
    assert_eq!(report.applied_slots(), vec![0, 1, 2, 4, 5]);
    assert!(report.states.contains(&PipelineState::SlotsCut(3)));

    let dims = pipeline.dimensions();
    let slots = pipeline.slots();
    assert!(output.solid.contains_point(slot_centre(dims, &slots[3])));
    assert!(!output.solid.contains_point(slot_centre(dims, &slots[2])));
}

#[test]
fn test_failed_hole_is_skipped() {
    // Base, six slots, then the torch hole
    let engine = FailingEngine::failing_difference(8);
    let mut pipeline = CollarPipeline::with_engine(quick(3), engine).unwrap();
    let output = pipeline.run().unwrap();
    assert_eq!(output.report.failures().next().unwrap().feature, Feature::TorchHole);
    let floor = pipeline.dimensions().floor;
    assert!(output.solid.contains_point(DVec3::new(0.0, 0.0, floor / 2.0)));
}

#[test]
fn test_base_failure_is_fatal() {
    let engine = FailingEngine::failing_difference(1);
    let mut pipeline = CollarPipeline::with_engine(quick(3), engine).unwrap();
    assert!(matches!(pipeline.run(), Err(CollarError::Base(_))));
}

#[test]
fn test_authored_base_needs_no_boolean() {
    // Iteration two authors its cup; difference #1 is slot 0
    let engine = FailingEngine::failing_difference(1);
    let mut pipeline = CollarPipeline::with_engine(quick(2), engine).unwrap();
    let output = pipeline.run().unwrap();
    assert_eq!(output.report.strategy, SlotStrategy::HullWedge);
    assert_eq!(output.report.failures().next().unwrap().feature, Feature::Slot(0));
    assert_eq!(pipeline.engine().differences, 6 + 1);
}

#[test]
fn test_lip_adds_state_and_height() {
    let output = build(quick(4)).unwrap();
    let report = &output.report;
    assert!(report.states.contains(&PipelineState::LipUnioned));
    assert!(report.outcome(Feature::Lip).is_some_and(|o| o.is_applied()));
    let top = output.solid.bounding_box().max.z;
    assert!((top - (2.5 + 0.3 - 0.01) * 25.4).abs() < 1e-6);
}

#[test]
fn test_no_slots_no_ramps() {
    let mut params = quick(3);
    params.slots.count = 0;
    let output = build(params).unwrap();
    let states = &output.report.states;
    assert_eq!(
        states.as_slice(),
        &[
            PipelineState::Init,
            PipelineState::BaseHollowed,
            PipelineState::HoleCut,
            PipelineState::Validated,
            PipelineState::Done,
        ]
    );
}

#[test]
fn test_disabled_ramps_skip_stage() {
    let mut params = quick(1);
    params.ramps.enabled = false;
    let output = build(params).unwrap();
    assert!(!output
        .report
        .states
        .iter()
        .any(|s| matches!(s, PipelineState::RampsUnioned(_))));
    assert!(output.report.outcome(Feature::Ramp(0)).is_none());
}

#[test]
fn test_state_display() {
    assert_eq!(PipelineState::SlotsCut(2).to_string(), "slot 2 cut");
    assert_eq!(PipelineState::BaseHollowed.to_string(), "base hollowed");
}
