//! # Primitives
//!
//! Closed, outward-wound solids for the shapes the collar and platform are
//! built from (box, cylinder, frustum, cup, tube) plus explicit wedge authoring.

pub mod cuboid;
pub mod cup;
pub mod cylinder;
pub mod tube;
pub mod wedge;

pub use cuboid::create_box;
pub use cup::create_cup;
pub use cylinder::{create_cylinder, create_frustum};
pub use tube::{create_elliptic_tube, create_tube};
pub use wedge::{author_wedge, WedgeCorners};
