//! Property-based tests for transforms and scaling.

use glam::DVec3;
use proptest::prelude::*;
use solid_mesh::primitives::{create_box, create_cylinder};
use solid_mesh::{compose, is_watertight, Transform};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_offset() -> impl Strategy<Value = (f64, f64, f64)> {
    (-500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0)
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -std::f64::consts::PI..std::f64::consts::PI
}

fn arb_dim() -> impl Strategy<Value = f64> {
    0.1f64..200.0
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Composition applies left to right
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn compose_matches_sequential_application(
        angle in arb_angle(),
        (x, y, z) in arb_offset(),
        (px, py, pz) in arb_offset(),
    ) {
        let rotate = Transform::rotation_z(angle);
        let shift = Transform::translation(DVec3::new(x, y, z));
        let p = DVec3::new(px, py, pz);

        let sequential = shift.transform_point(rotate.transform_point(p));
        let composed = compose([rotate, shift]).transform_point(p);
        prop_assert!((sequential - composed).length() < TOL * (1.0 + p.length()));
    }
}

proptest! {
    #[test]
    fn rotation_then_translation_differs_from_reverse(
        angle in 0.1f64..3.0,
        x in 1.0f64..100.0,
    ) {
        let rotate = Transform::rotation_z(angle);
        let shift = Transform::translation(DVec3::new(x, 0.0, 0.0));
        let a = rotate.then(shift).transform_point(DVec3::ZERO);
        let b = shift.then(rotate).transform_point(DVec3::ZERO);
        prop_assert!((a - b).length() > TOL);
    }
}

// ---------------------------------------------------------------------------
// Rigid transforms preserve the solid
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rigid_transform_preserves_volume_and_closure(
        (sx, sy, sz) in (arb_dim(), arb_dim(), arb_dim()),
        axis in (-1.0f64..1.0, -1.0f64..1.0, 0.1f64..1.0),
        angle in arb_angle(),
        (x, y, z) in arb_offset(),
    ) {
        let cube = create_box(DVec3::new(sx, sy, sz)).unwrap();
        let placed = Transform::rotation(DVec3::new(axis.0, axis.1, axis.2), angle)
            .then(Transform::translation(DVec3::new(x, y, z)))
            .apply(&cube);

        prop_assert_eq!(placed.faces(), cube.faces());
        prop_assert!(is_watertight(&placed));
        let expected = sx * sy * sz;
        prop_assert!((placed.signed_volume() - expected).abs() < 1e-6 * expected + 1e-5);
    }
}

// ---------------------------------------------------------------------------
// Uniform scaling scales the bounding box
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scaling_scales_bounding_box(
        radius in 0.5f64..50.0,
        height in 0.5f64..50.0,
        k in prop::sample::select(vec![0.1f64, 1.0, 25.4]),
    ) {
        let cylinder = create_cylinder(radius, height, 16).unwrap();
        let before = cylinder.bounding_box().extents();
        let after = cylinder.scaled(k).bounding_box().extents();
        prop_assert!((after - before * k).length() < TOL * (1.0 + k * before.length()));
        prop_assert!(is_watertight(&cylinder.scaled(k)));
    }
}
