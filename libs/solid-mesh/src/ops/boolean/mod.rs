//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B)
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B); A.invert()
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); A.build(B); A.invert()
//!
//! Raw BSP output is a polygon soup with T-junctions wherever one side of
//! an edge was split and the other was not; every result goes through
//! [`crate::repair::stitch`] before it is returned.
//!
//! ## Failure mode
//!
//! Operands must be index-valid and finite. Polygon explosion, non-finite
//! output, or a union of non-empty operands that comes back empty yields
//! [`MeshError::BooleanFailed`]. Callers over-extend cutters past the
//! surfaces they pierce so that no face is coplanar with a cut.
//!
//! ## Example
//!
//! ```rust
//! use solid_mesh::ops::boolean::difference;
//! use solid_mesh::primitives::create_box;
//! use glam::DVec3;
//!
//! let block = create_box(DVec3::splat(4.0)).unwrap();
//! let cutter = create_box(DVec3::new(1.0, 1.0, 6.0)).unwrap();
//! let drilled = difference(&block, &cutter).unwrap();
//! assert!((drilled.signed_volume() - 60.0).abs() < 1e-6);
//! ```

mod bsp;
mod plane;
mod polygon;


use crate::error::MeshError;
use crate::repair::stitch;
use crate::solid::Solid;
use bsp::BspTree;
use config::constants::MAX_FACES;
use polygon::Polygon;
use std::fmt;
use tracing::debug;

/// The three boolean operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "union",
            Self::Difference => "difference",
            Self::Intersection => "intersection",
        })
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Union of two solids.
///
/// ## Parameters
///
/// - `a`: First solid
/// - `b`: Second solid
///
/// ## Returns
///
/// A new solid enclosing everything in either input.
pub fn union(a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
    boolean(BooleanOp::Union, a, b)
}

/// Difference of two solids (A - B).
///
/// ## Parameters
///
/// - `a`: Base solid
/// - `b`: Solid to subtract
pub fn difference(a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
    boolean(BooleanOp::Difference, a, b)
}

/// Intersection of two solids.
pub fn intersection(a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
    boolean(BooleanOp::Intersection, a, b)
}

/// Runs `op` on two solids.
pub fn boolean(op: BooleanOp, a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
    for (name, operand) in [("first", a), ("second", b)] {
        operand.check_buffers().map_err(|e| {
            MeshError::boolean_failed(format!("{op}: {name} operand is invalid: {e}"))
        })?;
    }

    if let Some(shortcut) = trivial_result(op, a, b) {
        return Ok(shortcut);
    }

    let polys_a = solid_to_polygons(a);
    let polys_b = solid_to_polygons(b);
    debug!(%op, a = polys_a.len(), b = polys_b.len(), "bsp boolean");

    let mut bsp_a = BspTree::new(polys_a)?;
    let mut bsp_b = BspTree::new(polys_b)?;

    match op {
        BooleanOp::Union => {
            bsp_a.clip_to(&bsp_b);
            bsp_b.clip_to(&bsp_a);
            bsp_b.invert();
            bsp_b.clip_to(&bsp_a);
            bsp_b.invert();
            bsp_a.build(bsp_b.into_polygons())?;
        }
        BooleanOp::Difference => {
            bsp_a.invert();
            bsp_a.clip_to(&bsp_b);
            bsp_b.clip_to(&bsp_a);
            bsp_b.invert();
            bsp_b.clip_to(&bsp_a);
            bsp_b.invert();
            bsp_a.build(bsp_b.into_polygons())?;
            bsp_a.invert();
        }
        BooleanOp::Intersection => {
            bsp_a.invert();
            bsp_b.clip_to(&bsp_a);
            bsp_b.invert();
            bsp_a.clip_to(&bsp_b);
            bsp_b.clip_to(&bsp_a);
            bsp_a.build(bsp_b.into_polygons())?;
            bsp_a.invert();
        }
    }

    let polygons = bsp_a.into_polygons();
    debug!(%op, polygons = polygons.len(), "bsp result");
    let raw = polygons_to_solid(&polygons)?;
    let result = stitch(&raw);

    if result.vertices().iter().any(|v| !v.is_finite()) {
        return Err(MeshError::boolean_failed(format!(
            "{op} produced non-finite coordinates"
        )));
    }
    if op == BooleanOp::Union && result.is_empty() {
        return Err(MeshError::boolean_failed(
            "union of non-empty operands produced an empty solid",
        ));
    }
    Ok(result)
}

/// Results that need no BSP work: empty operands and disjoint bounds.
fn trivial_result(op: BooleanOp, a: &Solid, b: &Solid) -> Option<Solid> {
    let disjoint = !a.is_empty() && !b.is_empty() && !a.bounding_box().intersects(&b.bounding_box());
    match op {
        BooleanOp::Union if a.is_empty() => Some(b.clone()),
        BooleanOp::Union if b.is_empty() => Some(a.clone()),
        BooleanOp::Union if disjoint => Some(Solid::concatenate([a, b])),
        BooleanOp::Difference if a.is_empty() => Some(Solid::new()),
        BooleanOp::Difference if b.is_empty() || disjoint => Some(a.clone()),
        BooleanOp::Intersection if a.is_empty() || b.is_empty() || disjoint => Some(Solid::new()),
        _ => None,
    }
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

/// One polygon per non-degenerate face.
fn solid_to_polygons(solid: &Solid) -> Vec<Polygon> {
    (0..solid.face_count())
        .filter_map(|f| Polygon::from_vertices(solid.face_corners(f).to_vec()))
        .collect()
}

/// Fan-triangulates convex polygons into an unwelded solid.
fn polygons_to_solid(polygons: &[Polygon]) -> Result<Solid, MeshError> {
    let face_count: usize = polygons.iter().map(|p| p.vertices().len().saturating_sub(2)).sum();
    if face_count > MAX_FACES {
        return Err(MeshError::TooManyFaces {
            count: face_count,
            max: MAX_FACES,
        });
    }

    let vertex_count = polygons.iter().map(|p| p.vertices().len()).sum();
    let mut solid = Solid::with_capacity(vertex_count, face_count);
    for poly in polygons {
        let base = solid.vertex_count() as u32;
        for v in poly.vertices() {
            solid.add_vertex(*v);
        }
        for i in 1..poly.vertices().len() as u32 - 1 {
            solid.add_face(base, base + i, base + i + 1);
        }
    }
    Ok(solid)
}
