//! End-to-end collar builds through the public API.

use glam::DVec3;
use proptest::prelude::*;
use solid_mesh::{MeshError, Solid};
use vortex_collar::{
    build, BspEngine, CollarParameters, CollarPipeline, CsgEngine, Feature, PipelineState,
    SlotDescriptor, ITERATIONS,
};

fn quick(iteration: u32) -> CollarParameters {
    let mut params = CollarParameters::iteration(iteration).unwrap();
    params.segments = 16;
    params.hole_segments = 8;
    params
}

#[test]
fn default_collar_has_the_design_envelope() {
    let output = build(quick(3)).unwrap();
    let extents = output.solid.bounding_box().extents();
    assert!((extents.x - 152.4).abs() < 1e-6);
    assert!((extents.y - 152.4).abs() < 1e-6);
    assert!((extents.z - 63.5).abs() < 1e-6);

    let summary = &output.report.summary;
    assert!((summary.source_extents.x - 6.0).abs() < 1e-6);
    assert!((summary.source_extents.z - 2.5).abs() < 1e-6);
}

#[test]
fn torch_hole_goes_through_the_floor() {
    let params = quick(3);
    let floor = params.floor_thickness * params.unit_scale;
    let output = build(params).unwrap();
    assert!(!output.solid.contains_point(DVec3::new(0.0, 0.0, floor / 2.0)));
    assert!(output.solid.contains_point(DVec3::new(25.4, 0.0, floor / 2.0)));
}

#[test]
fn slots_open_the_wall_between_solid_sections() {
    let params = quick(3);
    let k = params.unit_scale;
    let mid = (params.outer_diameter + params.inner_diameter) / 4.0 * k;
    let z = (params.floor_thickness + params.slots.floor_offset + params.slots.height / 2.0) * k;
    let output = build(params.clone()).unwrap();

    for slot in SlotDescriptor::all(params.slots.count, params.slots.ramp_angle.to_radians()) {
        let at = |angle: f64| DVec3::new(mid * angle.cos(), mid * angle.sin(), z);
        assert!(!output.solid.contains_point(at(slot.base_angle)), "slot {}", slot.index);
        assert!(output.solid.contains_point(at(slot.base_angle - 30f64.to_radians())));
    }
}

struct FailOnDifference {
    inner: BspEngine,
    target: usize,
    seen: usize,
}

impl CsgEngine for FailOnDifference {
    fn union(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
        self.inner.union(a, b)
    }

    fn difference(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
        self.seen += 1;
        if self.seen == self.target {
            Err(MeshError::boolean_failed("simulated kernel failure"))
        } else {
            self.inner.difference(a, b)
        }
    }
}

#[test]
fn one_failed_slot_does_not_stop_the_build() {
    let engine = FailOnDifference {
        inner: BspEngine,
        target: 5,
        seen: 0,
    };
    let output = CollarPipeline::with_engine(quick(3), engine)
        .unwrap()
        .run()
        .unwrap();
    let report = &output.report;
    assert_eq!(report.final_state(), Some(PipelineState::Done));
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failures().next().map(|o| o.feature), Some(Feature::Slot(3)));
    assert_eq!(report.applied_slots(), vec![0, 1, 2, 4, 5]);
    assert!(report.to_string().contains("slot 3 skipped"));
}

#[test]
fn every_iteration_builds() {
    for n in ITERATIONS {
        let output = build(quick(n)).unwrap();
        assert_eq!(output.report.final_state(), Some(PipelineState::Done), "iteration {n}");
        assert!(output.solid.signed_volume() > 0.0, "iteration {n}");
        assert!(output.report.summary.watertight, "iteration {n}");
        assert!(solid_mesh::is_watertight(&output.solid), "iteration {n}");
        assert_eq!(output.report.applied_slots().len(), 6, "iteration {n}");
    }
}

#[test]
fn report_serializes_to_json() {
    let output = build(quick(1)).unwrap();
    let json = serde_json::to_value(&output.report).unwrap();
    assert_eq!(json["strategy"], "box-cut");
    assert_eq!(json["states"][0]["state"], "init");
    assert!(json["summary"]["vertex_count"].as_u64().unwrap() > 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(3))]

    #[test]
    fn scaling_parameters_scales_the_envelope(k in prop::sample::select(vec![0.1, 1.0, 25.4])) {
        let base = build(quick(3)).unwrap().solid.bounding_box().extents();
        let scaled = build(quick(3).scaled(k)).unwrap().solid.bounding_box().extents();
        let expected = base * k;
        prop_assert!((scaled - expected).abs().max_element() < 1e-6 * k.max(1.0) * 152.4);
    }
}
