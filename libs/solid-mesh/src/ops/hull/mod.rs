//! # Convex Hull
//!
//! QuickHull over point clouds. Used to derive cutters from sampled
//! outlines; only meaningful where the intended shape is convex.

mod quickhull;


pub use quickhull::convex_hull;

use crate::error::MeshError;
use crate::solid::Solid;

/// Computes the convex hull of the vertices of one or more solids.
///
/// Empty input yields an empty solid.
///
/// # Example
///
/// ```rust,ignore
/// let result = hull(&[&solid_a, &solid_b])?;
/// ```
pub fn hull(solids: &[&Solid]) -> Result<Solid, MeshError> {
    let points: Vec<_> = solids
        .iter()
        .flat_map(|s| s.vertices().iter().copied())
        .collect();

    if points.is_empty() {
        return Ok(Solid::new());
    }
    convex_hull(&points)
}
