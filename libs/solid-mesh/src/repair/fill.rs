//! # Hole Filling
//!
//! Closes boundary loops with fan triangles.

use crate::solid::Solid;
use std::collections::BTreeMap;

use super::topology::{edge_key, edge_uses};

/// Chains hole edges into closed loops.
///
/// A boundary edge `a → b` of an existing face needs a partner `b → a`;
/// the partners are the hole edges. Loops are traced starting from the
/// smallest unused edge so the result is deterministic. Open chains
/// (which only occur on non-manifold input) are discarded.
pub fn boundary_loops(solid: &Solid) -> Vec<Vec<u32>> {
    let uses = edge_uses(solid.faces());
    let mut outgoing: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for face in solid.faces() {
        for i in 0..3 {
            let (a, b) = (face[i], face[(i + 1) % 3]);
            if uses.get(&edge_key(a, b)).is_some_and(|u| u.total() == 1) {
                outgoing.entry(b).or_default().push(a);
            }
        }
    }
    for targets in outgoing.values_mut() {
        targets.sort_unstable();
    }

    let mut loops = Vec::new();
    loop {
        let Some(start) = outgoing
            .iter()
            .find(|(_, t)| !t.is_empty())
            .map(|(&v, _)| v)
        else {
            break;
        };
        let mut chain = vec![start];
        let mut current = start;
        let closed = loop {
            let Some(next) = outgoing.get_mut(&current).and_then(|t| {
                (!t.is_empty()).then(|| t.remove(0))
            }) else {
                break false;
            };
            if next == start {
                break true;
            }
            chain.push(next);
            current = next;
            if chain.len() > solid.vertex_count() {
                break false;
            }
        };
        if closed && chain.len() >= 3 {
            loops.push(chain);
        }
    }
    loops
}

/// Fills every closed boundary loop with a fan from its first vertex.
pub fn fill_holes(solid: &Solid) -> Solid {
    let loops = boundary_loops(solid);
    if loops.is_empty() {
        return solid.clone();
    }

    let mut faces = solid.faces().to_vec();
    for hole in loops {
        for pair in hole[1..].windows(2) {
            faces.push([hole[0], pair[0], pair[1]]);
        }
    }
    Solid::from_raw(solid.vertices().to_vec(), faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{create_box, create_cylinder};
    use crate::repair::is_watertight;
    use glam::DVec3;

    fn without_faces(solid: Solid, drop: &[usize]) -> Solid {
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
    fn test_fill_single_triangle_hole() {
        let open = without_faces(create_box(DVec3::ONE).unwrap(), &[0]);
        let loops = boundary_loops(&open);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
        assert!(is_watertight(&fill_holes(&open)));
    }

    #[test]
    fn test_fill_missing_cap() {
        // Faces after the 2n side faces are the bottom cap fan
        let n = 12;
        let cylinder = create_cylinder(1.0, 2.0, n).unwrap();
        let cap: Vec<usize> = (2 * n as usize..3 * n as usize - 2).collect();
        let open = without_faces(cylinder, &cap);
        let loops = boundary_loops(&open);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), n as usize);

        let filled = fill_holes(&open);
        assert!(is_watertight(&filled));
        assert_eq!(filled.face_count(), 4 * n as usize - 4);
    }

    #[test]
    fn test_fill_is_noop_on_closed() {
        let cube = create_box(DVec3::ONE).unwrap();
        assert_eq!(fill_holes(&cube), cube);
    }
}
