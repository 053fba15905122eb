//! # Topology Inspection
//!
//! Edge-incidence analysis used to decide whether a solid is printable.

use crate::solid::Solid;
use config::constants::DEGENERATE_AREA_EPSILON;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Summary of a solid's edge topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyReport {
    /// Edges used by exactly one face
    pub boundary_edges: usize,
    /// Edges used by more than two faces
    pub non_manifold_edges: usize,
    /// Edges shared by two faces that traverse it in the same direction
    pub inconsistent_edges: usize,
    /// Faces with repeated indices or (near) zero area
    pub degenerate_faces: usize,
    /// Number of face-connected components
    pub components: usize,
    /// Signed enclosed volume
    pub signed_volume: f64,
}

impl TopologyReport {
    /// Closed, manifold, consistently wound and enclosing positive volume.
    pub fn is_watertight(&self) -> bool {
        self.boundary_edges == 0
            && self.non_manifold_edges == 0
            && self.inconsistent_edges == 0
            && self.signed_volume > 0.0
    }
}

impl fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "boundary={} non_manifold={} inconsistent={} degenerate={} components={} volume={:.6}",
            self.boundary_edges,
            self.non_manifold_edges,
            self.inconsistent_edges,
            self.degenerate_faces,
            self.components,
            self.signed_volume
        )
    }
}

/// Per-edge usage: how many faces traverse it forward (low → high) and backward.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct EdgeUse {
    pub forward: u32,
    pub backward: u32,
}

impl EdgeUse {
    #[inline]
    pub fn total(&self) -> u32 {
        self.forward + self.backward
    }
}

#[inline]
pub(crate) fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Counts directed uses of every undirected edge.
pub(crate) fn edge_uses(faces: &[[u32; 3]]) -> HashMap<(u32, u32), EdgeUse> {
    let mut uses: HashMap<(u32, u32), EdgeUse> = HashMap::with_capacity(faces.len() * 3 / 2);
    for face in faces {
        for i in 0..3 {
            let (a, b) = (face[i], face[(i + 1) % 3]);
            let entry = uses.entry(edge_key(a, b)).or_default();
            if a < b {
                entry.forward += 1;
            } else {
                entry.backward += 1;
            }
        }
    }
    uses
}

/// Returns true if the face has repeated indices or its height over the
/// longest edge is below `tolerance`.
pub(crate) fn is_degenerate_face(solid: &Solid, face: usize, tolerance: f64) -> bool {
    let [a, b, c] = solid.faces()[face];
    if a == b || b == c || c == a {
        return true;
    }
    let [pa, pb, pc] = solid.face_corners(face);
    let twice_area = (pb - pa).cross(pc - pa).length();
    let longest = (pb - pa)
        .length_squared()
        .max((pc - pb).length_squared())
        .max((pa - pc).length_squared())
        .sqrt();
    if longest <= DEGENERATE_AREA_EPSILON {
        return true;
    }
    twice_area / longest <= tolerance
}

/// Labels faces by connected component (faces sharing a vertex are connected).
///
/// Returns the label per face and the number of components; labels are
/// assigned in order of each component's lowest face index.
pub(crate) fn face_components(solid: &Solid) -> (Vec<usize>, usize) {
    let mut parent: Vec<u32> = (0..solid.vertex_count() as u32).collect();

    fn find(parent: &mut [u32], mut x: u32) -> u32 {
        while parent[x as usize] != x {
            let next = parent[x as usize];
            parent[x as usize] = parent[next as usize];
            x = next;
        }
        x
    }

    for &[a, b, c] in solid.faces() {
        for (u, v) in [(a, b), (b, c)] {
            let (ru, rv) = (find(&mut parent, u), find(&mut parent, v));
            if ru != rv {
                parent[ru.max(rv) as usize] = ru.min(rv);
            }
        }
    }

    let mut labels = HashMap::new();
    let mut result = Vec::with_capacity(solid.face_count());
    for &[a, _, _] in solid.faces() {
        let root = find(&mut parent, a);
        let next = labels.len();
        result.push(*labels.entry(root).or_insert(next));
    }
    (result, labels.len())
}

/// Inspects the edge topology of a solid.
pub fn inspect(solid: &Solid) -> TopologyReport {
    let uses = edge_uses(solid.faces());

    let mut report = TopologyReport {
        boundary_edges: 0,
        non_manifold_edges: 0,
        inconsistent_edges: 0,
        degenerate_faces: 0,
        components: 0,
        signed_volume: solid.signed_volume(),
    };

    for edge in uses.values() {
        match edge.total() {
            1 => report.boundary_edges += 1,
            2 if edge.forward != 1 => report.inconsistent_edges += 1,
            2 => {}
            _ => report.non_manifold_edges += 1,
        }
    }

    report.degenerate_faces = (0..solid.face_count())
        .filter(|&f| is_degenerate_face(solid, f, DEGENERATE_AREA_EPSILON))
        .count();
    report.components = face_components(solid).1;
    report
}

/// Closed, manifold, consistently wound, positive volume.
pub fn is_watertight(solid: &Solid) -> bool {
    !solid.is_empty() && inspect(solid).is_watertight()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{create_box, create_cylinder};
    use glam::DVec3;

    #[test]
    fn test_box_report() {
        let report = inspect(&create_box(DVec3::ONE).unwrap());
        assert_eq!(report.boundary_edges, 0);
        assert_eq!(report.non_manifold_edges, 0);
        assert_eq!(report.inconsistent_edges, 0);
        assert_eq!(report.degenerate_faces, 0);
        assert_eq!(report.components, 1);
        assert!(report.is_watertight());
    }

    #[test]
    fn test_open_box_has_boundary() {
        let solid = create_box(DVec3::ONE).unwrap();
        let (vertices, mut faces) = solid.into_buffers();
        faces.pop();
        let open = Solid::from_buffers(vertices, faces).unwrap();
        let report = inspect(&open);
        assert_eq!(report.boundary_edges, 3);
        assert!(!is_watertight(&open));
    }

    #[test]
    fn test_flipped_face_is_inconsistent() {
        let (vertices, mut faces) = create_box(DVec3::ONE).unwrap().into_buffers();
        faces[0].swap(1, 2);
        let report = inspect(&Solid::from_buffers(vertices, faces).unwrap());
        assert_eq!(report.inconsistent_edges, 3);
        assert_eq!(report.boundary_edges, 0);
    }

    #[test]
    fn test_inverted_solid_is_not_watertight() {
        let inverted = create_box(DVec3::ONE).unwrap().inverted();
        let report = inspect(&inverted);
        assert_eq!(report.inconsistent_edges, 0);
        assert!(report.signed_volume < 0.0);
        assert!(!report.is_watertight());
    }

    #[test]
    fn test_two_components() {
        let mut solid = create_box(DVec3::ONE).unwrap();
        solid.merge(&create_cylinder(1.0, 1.0, 8).unwrap());
        assert_eq!(inspect(&solid).components, 2);
        assert!(is_watertight(&solid));
    }

    #[test]
    fn test_empty_is_not_watertight() {
        assert!(!is_watertight(&Solid::new()));
    }
}
