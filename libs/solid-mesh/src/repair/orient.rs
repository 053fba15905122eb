//! # Orientation Repair
//!
//! Makes face windings consistent within each connected component, then
//! turns outward any component that encloses negative volume and is not
//! itself a cavity inside another component.

use crate::solid::Solid;
use std::collections::{HashMap, VecDeque};

use super::topology::{edge_key, face_components};

/// Returns true if `face` traverses `a → b`.
#[inline]
fn has_directed_edge(face: [u32; 3], a: u32, b: u32) -> bool {
    (0..3).any(|i| face[i] == a && face[(i + 1) % 3] == b)
}

#[inline]
fn flip(face: &mut [u32; 3]) {
    face.swap(1, 2);
}

/// Propagates the winding of each component's lowest face across shared edges.
fn propagate_winding(faces: &mut [[u32; 3]]) {
    let mut adjacency: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (f, face) in faces.iter().enumerate() {
        for i in 0..3 {
            adjacency
                .entry(edge_key(face[i], face[(i + 1) % 3]))
                .or_default()
                .push(f);
        }
    }

    let mut visited = vec![false; faces.len()];
    let mut queue = VecDeque::new();
    for seed in 0..faces.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(f) = queue.pop_front() {
            let face = faces[f];
            for i in 0..3 {
                let (a, b) = (face[i], face[(i + 1) % 3]);
                let Some(neighbours) = adjacency.get(&edge_key(a, b)) else {
                    continue;
                };
                for &n in neighbours {
                    if visited[n] {
                        continue;
                    }
                    // A consistent neighbour traverses the shared edge as b → a
                    if has_directed_edge(faces[n], a, b) {
                        flip(&mut faces[n]);
                    }
                    visited[n] = true;
                    queue.push_back(n);
                }
            }
        }
    }
}

/// Reorients faces so every component is consistently and outwardly wound.
///
/// Components with negative volume are flipped unless a point of theirs
/// lies inside another component, in which case they are treated as a
/// cavity and left inward-facing.
pub fn orient(solid: &Solid) -> Solid {
    let mut faces = solid.faces().to_vec();
    propagate_winding(&mut faces);
    let consistent = Solid::from_raw(solid.vertices().to_vec(), faces);

    let (labels, count) = face_components(&consistent);
    let mut volumes = vec![0.0; count];
    for (f, &[a, b, c]) in consistent.faces().iter().enumerate() {
        volumes[labels[f]] += consistent
            .vertex(a)
            .dot(consistent.vertex(b).cross(consistent.vertex(c)))
            / 6.0;
    }

    let component_solid = |label: usize| {
        let faces = consistent
            .faces()
            .iter()
            .zip(&labels)
            .filter(|(_, &l)| l == label)
            .map(|(f, _)| *f)
            .collect();
        Solid::from_raw(consistent.vertices().to_vec(), faces)
    };

    let mut flip_component = vec![false; count];
    for label in 0..count {
        if volumes[label] >= 0.0 {
            continue;
        }
        let Some(first) = labels.iter().position(|&l| l == label) else {
            continue;
        };
        let [pa, pb, pc] = consistent.face_corners(first);
        let probe = (pa + pb + pc) / 3.0;
        let enclosed = (0..count)
            .filter(|&other| other != label)
            .any(|other| component_solid(other).winding_number(probe).abs() > 0.5);
        flip_component[label] = !enclosed;
    }

    if !flip_component.iter().any(|&f| f) {
        return consistent;
    }
    let (vertices, mut faces) = consistent.into_buffers();
    for (face, &label) in faces.iter_mut().zip(&labels) {
        if flip_component[label] {
            flip(face);
        }
    }
    Solid::from_raw(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_box;
    use crate::repair::{inspect, is_watertight};
    use crate::transform::Transform;
    use glam::DVec3;

    #[test]
    fn test_orient_fixes_flipped_face() {
        let (vertices, mut faces) = create_box(DVec3::ONE).unwrap().into_buffers();
        faces[5].swap(1, 2);
        let broken = Solid::from_buffers(vertices, faces).unwrap();
        assert!(!is_watertight(&broken));
        assert!(is_watertight(&orient(&broken)));
    }

    #[test]
    fn test_orient_turns_inverted_solid_outward() {
        let inverted = create_box(DVec3::ONE).unwrap().inverted();
        let fixed = orient(&inverted);
        assert!(fixed.signed_volume() > 0.0);
        assert!(is_watertight(&fixed));
    }

    #[test]
    fn test_orient_keeps_cavity_inward() {
        let outer = create_box(DVec3::splat(4.0)).unwrap();
        let cavity = create_box(DVec3::ONE).unwrap().inverted();
        let mut solid = outer.clone();
        solid.merge(&cavity);
        let fixed = orient(&solid);
        assert_eq!(fixed, solid);
        assert!(inspect(&fixed).signed_volume > 0.0);
    }

    #[test]
    fn test_orient_flips_separate_inverted_body() {
        let a = create_box(DVec3::ONE).unwrap();
        let b = Transform::translation(DVec3::new(5.0, 0.0, 0.0))
            .apply(&create_box(DVec3::ONE).unwrap())
            .inverted();
        let mut solid = a;
        solid.merge(&b);
        let fixed = orient(&solid);
        assert!(is_watertight(&fixed));
        assert!((fixed.signed_volume() - 2.0).abs() < 1e-9);
    }
}
