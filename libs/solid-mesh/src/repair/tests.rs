//! Repair pipeline tests.

use super::*;
use crate::primitives::{create_box, create_cup, create_cylinder};
use crate::transform::Transform;
use glam::DVec3;

fn drop_faces(solid: Solid, drop: &[usize]) -> Solid {
    let (vertices, faces) = solid.into_buffers();
    let faces = faces
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !drop.contains(i))
        .map(|(_, f)| f)
        .collect();
    Solid::from_buffers(vertices, faces).unwrap()
}

#[test]
fn test_repair_returns_watertight_input_unchanged() {
    let cup = create_cup(3.0, 2.0, 2.5, 0.3, 16).unwrap();
    assert_eq!(repair(cup.clone()), cup);
}

#[test]
fn test_repair_fills_hole() {
    let open = drop_faces(create_cylinder(1.0, 1.0, 16).unwrap(), &[3, 40]);
    assert!(!is_watertight(&open));
    let fixed = repair(open);
    assert!(is_watertight(&fixed));
}

#[test]
fn test_repair_fixes_flipped_faces() {
    let (vertices, mut faces) = create_box(DVec3::splat(2.0)).unwrap().into_buffers();
    faces[2].swap(0, 1);
    faces[7].swap(1, 2);
    let broken = Solid::from_buffers(vertices, faces).unwrap();
    assert!(is_watertight(&repair(broken)));
}

#[test]
fn test_repair_turns_inside_out_solid() {
    let inverted = create_cylinder(1.0, 2.0, 12).unwrap().inverted();
    let fixed = repair(inverted);
    assert!(fixed.signed_volume() > 0.0);
    assert!(is_watertight(&fixed));
}

#[test]
fn test_repair_is_idempotent() {
    let mut broken = drop_faces(create_box(DVec3::ONE).unwrap(), &[0, 5]);
    let shifted = Transform::translation(DVec3::new(3.0, 0.0, 0.0))
        .apply(&create_box(DVec3::ONE).unwrap())
        .inverted();
    broken.merge(&shifted);

    let once = repair(broken);
    let twice = repair(once.clone());
    assert_eq!(once, twice);
    assert!(is_watertight(&once));
}

#[test]
fn test_repair_welds_duplicate_vertices() {
    let cube = create_box(DVec3::ONE).unwrap();
    let mut soup = Solid::new();
    for face in 0..cube.face_count() {
        let [a, b, c] = cube.face_corners(face);
        let i = soup.add_vertex(a);
        soup.add_vertex(b);
        soup.add_vertex(c);
        soup.add_face(i, i + 1, i + 2);
    }
    let fixed = repair(soup);
    assert_eq!(fixed.vertex_count(), 8);
    assert!(is_watertight(&fixed));
}

#[test]
fn test_repair_of_empty_solid_is_empty() {
    assert!(repair(Solid::new()).is_empty());
}
