//! # Platform Tests

use super::*;
use approx::assert_relative_eq;
use config::constants::INCH_TO_MM;
use solid_mesh::{inspect, is_watertight};

#[test]
fn test_deck() {
    let deck = Platform::default().deck().unwrap();
    assert!(is_watertight(&deck));
    let bounds = deck.bounding_box();
    assert_relative_eq!(bounds.extents().x, 28.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.extents().y, 53.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.min.z, 3.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.max.z, 4.5, epsilon = 1e-9);

    assert!(!deck.contains_point(DVec3::new(0.0, 0.0, 3.75)));
    assert!(deck.contains_point(DVec3::new(10.0, 0.0, 3.75)));
    assert!(deck.contains_point(DVec3::new(0.0, 20.0, 3.75)));
}

#[test]
fn test_caster_is_two_bodies() {
    let caster = Platform::default().caster().unwrap();
    let report = inspect(&caster);
    assert_eq!(report.components, 2);
    assert_eq!(report.boundary_edges, 0);

    let bounds = caster.bounding_box();
    assert_relative_eq!(bounds.max.z, 0.5, epsilon = 1e-9);
    assert_relative_eq!(bounds.min.z, -0.5 - 3.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.extents().x, 3.0, epsilon = 1e-9);
    assert_relative_eq!(bounds.extents().y, 2.4, epsilon = 1e-9);
}

#[test]
fn test_parts_in_order() {
    let parts = Platform::default().parts(1.0).unwrap();
    let names: Vec<_> = parts.iter().map(|p| p.name).collect();
    assert_eq!(names, PART_NAMES);
}

#[test]
fn test_caster_positions() {
    let platform = Platform::default();
    let parts = platform.parts(1.0).unwrap();
    let expected = [(-7.0, -53.0 / 3.0), (7.0, -53.0 / 3.0), (-7.0, 53.0 / 3.0), (7.0, 53.0 / 3.0)];
    for (part, (x, y)) in parts[1..].iter().zip(expected) {
        let centre = part.solid.bounding_box().center();
        assert_relative_eq!(centre.x, x, epsilon = 1e-9);
        assert_relative_eq!(centre.y, y, epsilon = 1e-9);
        assert_relative_eq!(part.solid.bounding_box().max.z, 3.0, epsilon = 1e-9);
    }
}

#[test]
fn test_casters_touch_deck_underside() {
    let platform = Platform::default();
    let deck = platform.part("board", 1.0).unwrap();
    let caster = platform.part("caster_rear_right", 1.0).unwrap();
    assert_relative_eq!(
        caster.solid.bounding_box().max.z,
        deck.solid.bounding_box().min.z,
        epsilon = 1e-9
    );
}

#[test]
fn test_unknown_part_lists_names() {
    let err = Platform::default().part("wheel", 1.0).unwrap_err();
    match &err {
        CollarError::UnknownPart { name, available } => {
            assert_eq!(name, "wheel");
            assert!(available.contains("caster_front_left"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("board"));
}

#[test]
fn test_mm_scale() {
    let parts = Platform::default().parts(INCH_TO_MM).unwrap();
    let extents = parts[0].solid.bounding_box().extents();
    assert_relative_eq!(extents.x, 28.0 * INCH_TO_MM, epsilon = 1e-6);
    assert_relative_eq!(extents.y, 53.0 * INCH_TO_MM, epsilon = 1e-6);
}

#[test]
fn test_assembly_concatenates_all_parts() {
    let platform = Platform::default();
    let parts = platform.parts(1.0).unwrap();
    let assembly = platform.assembly(1.0).unwrap();
    let faces: usize = parts.iter().map(|p| p.solid.face_count()).sum();
    assert_eq!(assembly.face_count(), faces);
    assert_eq!(inspect(&assembly).components, 1 + 4 * 2);
}

#[test]
fn test_rejects_bad_scale_and_dimensions() {
    let platform = Platform::default();
    assert!(platform.parts(0.0).is_err());
    assert!(platform.assembly(f64::NAN).is_err());

    let dims = PlatformDimensions {
        drive_hole_diameter: 30.0,
        ..Default::default()
    };
    assert!(matches!(
        Platform::new(dims),
        Err(CollarError::InvalidParameter { field, .. }) if field == "drive_hole_diameter"
    ));
}

#[test]
fn test_dimensions_from_partial_json() {
    let dims: PlatformDimensions = serde_json::from_str(r#"{ "length": 40.0 }"#).unwrap();
    assert_relative_eq!(dims.length, 40.0);
    assert_relative_eq!(dims.width, 28.0);
    assert_eq!(dims.deck_segments, 64);
}
