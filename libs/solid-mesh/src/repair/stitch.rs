//! # T-Junction Stitching
//!
//! BSP clipping leaves vertices lying on the interior of a neighbouring
//! face's edge. Those edges show up as boundary edges even though the
//! surface is geometrically closed. Splitting the face at the stray
//! vertices pairs the edges up again.

use crate::solid::Solid;
use config::constants::{BSP_EPSILON, MAX_REPAIR_PASSES, WELD_EPSILON};
use glam::DVec3;
use std::collections::BTreeSet;

use super::topology::{edge_key, edge_uses};
use super::weld::{drop_degenerate_faces, weld};

/// Boundary edges in face order, as `(face, edge slot)` pairs.
fn boundary_slots(solid: &Solid) -> Vec<(usize, usize)> {
    let uses = edge_uses(solid.faces());
    let mut slots = Vec::new();
    for (f, face) in solid.faces().iter().enumerate() {
        for i in 0..3 {
            let key = edge_key(face[i], face[(i + 1) % 3]);
            if uses.get(&key).is_some_and(|u| u.total() == 1) {
                slots.push((f, i));
            }
        }
    }
    slots
}

/// Parameter of `p` along segment `a → b` when `p` lies strictly inside it.
fn interior_parameter(a: DVec3, b: DVec3, p: DVec3, tolerance: f64) -> Option<f64> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= tolerance * tolerance {
        return None;
    }
    let t = (p - a).dot(ab) / len_sq;
    let len = len_sq.sqrt();
    if t * len <= tolerance || (1.0 - t) * len <= tolerance {
        return None;
    }
    let closest = a + ab * t;
    (closest.distance(p) <= tolerance).then_some(t)
}

/// One splitting pass. Returns `None` when no face needed splitting.
fn split_pass(solid: &Solid, tolerance: f64) -> Option<Solid> {
    let slots = boundary_slots(solid);
    if slots.is_empty() {
        return None;
    }

    let boundary_vertices: BTreeSet<u32> = slots
        .iter()
        .flat_map(|&(f, i)| {
            let face = solid.faces()[f];
            [face[i], face[(i + 1) % 3]]
        })
        .collect();

    let mut faces = solid.faces().to_vec();
    let mut split_any = false;
    let mut already_split = vec![false; faces.len()];
    let mut appended = Vec::new();

    for (f, i) in slots {
        if already_split[f] {
            continue;
        }
        let face = solid.faces()[f];
        let (a, b, c) = (face[i], face[(i + 1) % 3], face[(i + 2) % 3]);
        let (pa, pb) = (solid.vertex(a), solid.vertex(b));
        let (lo, hi) = (pa.min(pb), pa.max(pb));

        let mut on_edge: Vec<(f64, u32)> = boundary_vertices
            .iter()
            .filter(|&&v| v != a && v != b && v != c)
            .filter_map(|&v| {
                let p = solid.vertex(v);
                let inside_box = p.cmpge(lo - tolerance).all() && p.cmple(hi + tolerance).all();
                if !inside_box {
                    return None;
                }
                interior_parameter(pa, pb, p, tolerance).map(|t| (t, v))
            })
            .collect();
        if on_edge.is_empty() {
            continue;
        }
        on_edge.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));

        // Fan (a, v1, c), (v1, v2, c), ..., (vk, b, c)
        let chain: Vec<u32> = std::iter::once(a)
            .chain(on_edge.iter().map(|&(_, v)| v))
            .chain(std::iter::once(b))
            .collect();
        faces[f] = [chain[0], chain[1], c];
        for pair in chain[1..].windows(2) {
            appended.push([pair[0], pair[1], c]);
        }
        already_split[f] = true;
        split_any = true;
    }

    if !split_any {
        return None;
    }
    faces.extend(appended);
    Some(Solid::from_raw(solid.vertices().to_vec(), faces))
}

/// Splits faces along boundary edges that pass through other boundary vertices.
pub fn split_t_junctions(solid: &Solid, tolerance: f64) -> Solid {
    let mut current = solid.clone();
    for _ in 0..MAX_REPAIR_PASSES * 4 {
        match split_pass(&current, tolerance) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

/// Weld, drop slivers, split T-junctions.
///
/// Run after every boolean so that a geometrically closed result is also
/// topologically closed.
pub fn stitch(solid: &Solid) -> Solid {
    let welded = weld(solid, WELD_EPSILON);
    let cleaned = drop_degenerate_faces(&welded, WELD_EPSILON);
    let split = split_t_junctions(&cleaned, BSP_EPSILON);
    drop_degenerate_faces(&split, WELD_EPSILON)
}
