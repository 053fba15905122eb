//! # CSG Engine
//!
//! The boolean backend the pipeline talks to. Swapping it lets tests inject
//! failures at a chosen operation.

use solid_mesh::{MeshError, Solid};

/// Boolean backend.
pub trait CsgEngine {
    fn union(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError>;

    fn difference(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError>;
}

/// BSP booleans from `solid-mesh`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BspEngine;

impl CsgEngine for BspEngine {
    fn union(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
        solid_mesh::union(a, b)
    }

    fn difference(&mut self, a: &Solid, b: &Solid) -> Result<Solid, MeshError> {
        solid_mesh::difference(a, b)
    }
}
