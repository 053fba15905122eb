//! # Vertex Welding
//!
//! Merges coincident vertices with a spatial hash and drops faces that
//! collapse as a result.

use crate::solid::Solid;
use glam::DVec3;
use std::collections::HashMap;

use super::topology::is_degenerate_face;

type Cell = (i64, i64, i64);

#[inline]
fn cell_of(p: DVec3, size: f64) -> Cell {
    (
        (p.x / size).floor() as i64,
        (p.y / size).floor() as i64,
        (p.z / size).floor() as i64,
    )
}

/// Merges vertices closer than `epsilon`, keeping the first occurrence.
///
/// Unreferenced vertices are dropped and faces with repeated indices are
/// removed. Vertex order is otherwise preserved, so a solid without
/// duplicates comes back identical.
pub fn weld(solid: &Solid, epsilon: f64) -> Solid {
    let epsilon = epsilon.max(f64::MIN_POSITIVE);
    let epsilon_sq = epsilon * epsilon;

    let mut grid: HashMap<Cell, Vec<u32>> = HashMap::new();
    let mut representatives: Vec<DVec3> = Vec::new();
    let mut remap: Vec<u32> = Vec::with_capacity(solid.vertex_count());

    for &p in solid.vertices() {
        let (cx, cy, cz) = cell_of(p, epsilon);
        let mut found = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    if let Some(&rep) = bucket
                        .iter()
                        .find(|&&r| representatives[r as usize].distance_squared(p) <= epsilon_sq)
                    {
                        found = Some(rep);
                        break 'search;
                    }
                }
            }
        }

        let index = found.unwrap_or_else(|| {
            let index = representatives.len() as u32;
            representatives.push(p);
            grid.entry((cx, cy, cz)).or_default().push(index);
            index
        });
        remap.push(index);
    }

    let faces = solid
        .faces()
        .iter()
        .map(|f| f.map(|i| remap[i as usize]))
        .filter(|[a, b, c]| a != b && b != c && c != a)
        .collect();

    compact(representatives, faces)
}

/// Removes faces whose height over their longest edge is below `tolerance`.
pub fn drop_degenerate_faces(solid: &Solid, tolerance: f64) -> Solid {
    let faces = (0..solid.face_count())
        .filter(|&f| !is_degenerate_face(solid, f, tolerance))
        .map(|f| solid.faces()[f])
        .collect();
    compact(solid.vertices().to_vec(), faces)
}

/// Drops vertices no face references, preserving relative order.
pub(crate) fn compact(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Solid {
    let mut used = vec![false; vertices.len()];
    for face in &faces {
        for &i in face {
            used[i as usize] = true;
        }
    }
    if used.iter().all(|&u| u) {
        return Solid::from_raw(vertices, faces);
    }

    let mut remap = vec![u32::MAX; vertices.len()];
    let mut kept = Vec::with_capacity(vertices.len());
    for (i, v) in vertices.into_iter().enumerate() {
        if used[i] {
            remap[i] = kept.len() as u32;
            kept.push(v);
        }
    }
    let faces = faces
        .into_iter()
        .map(|f| f.map(|i| remap[i as usize]))
        .collect();
    Solid::from_raw(kept, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_box;
    use crate::repair::is_watertight;

    /// Box with every face using its own three vertices.
    fn triangle_soup() -> Solid {
        let cube = create_box(DVec3::splat(2.0)).unwrap();
        let mut soup = Solid::new();
        for face in 0..cube.face_count() {
            let [a, b, c] = cube.face_corners(face);
            let i = soup.add_vertex(a);
            soup.add_vertex(b + DVec3::splat(1e-9));
            soup.add_vertex(c);
            soup.add_face(i, i + 1, i + 2);
        }
        soup
    }

    #[test]
    fn test_weld_merges_soup() {
        let soup = triangle_soup();
        assert!(!is_watertight(&soup));
        let welded = weld(&soup, 1e-7);
        assert_eq!(welded.vertex_count(), 8);
        assert_eq!(welded.face_count(), 12);
        assert!(is_watertight(&welded));
    }

    #[test]
    fn test_weld_is_identity_on_clean_solid() {
        let cube = create_box(DVec3::ONE).unwrap();
        assert_eq!(weld(&cube, 1e-7), cube);
    }

    #[test]
    fn test_weld_drops_collapsed_faces() {
        let mut solid = Solid::new();
        solid.add_vertex(DVec3::ZERO);
        solid.add_vertex(DVec3::new(1e-9, 0.0, 0.0));
        solid.add_vertex(DVec3::Y);
        solid.add_face(0, 1, 2);
        assert!(weld(&solid, 1e-7).is_empty());
    }

    #[test]
    fn test_drop_degenerate_removes_sliver() {
        let mut solid = Solid::new();
        solid.add_vertex(DVec3::ZERO);
        solid.add_vertex(DVec3::X);
        solid.add_vertex(DVec3::new(0.5, 1e-9, 0.0));
        solid.add_vertex(DVec3::Y);
        solid.add_face(0, 1, 2);
        solid.add_face(0, 1, 3);
        let cleaned = drop_degenerate_faces(&solid, 1e-7);
        assert_eq!(cleaned.face_count(), 1);
        assert_eq!(cleaned.vertex_count(), 3);
    }
}
