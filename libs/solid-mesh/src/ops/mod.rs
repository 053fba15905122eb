//! # Solid Operations
//!
//! Boolean CSG and convex hull.

pub mod boolean;
pub mod hull;

pub use boolean::{difference, intersection, union, BooleanOp};
pub use hull::convex_hull;
