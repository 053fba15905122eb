//! # Solid Mesh
//!
//! Triangle-mesh solids and the CSG kernel used to build printable parts.
//!
//! ## Architecture
//!
//! ```text
//! primitives ─┐
//! hull ───────┼→ Transform::apply → boolean (BSP) → stitch → repair → io
//! wedge ──────┘
//! ```
//!
//! ## Algorithms
//!
//! - **Boolean Operations**: BSP trees (csg.js algorithm) with welding and
//!   T-junction stitching of the output
//! - **Hull**: QuickHull with exact orientation predicates
//! - **Repair**: hole filling and per-component winding fix-up
//!
//! ## Usage
//!
//! ```rust
//! use solid_mesh::{difference, is_watertight, Transform};
//! use solid_mesh::primitives::create_cylinder;
//! use glam::DVec3;
//!
//! let body = create_cylinder(30.0, 20.0, 32).unwrap();
//! let bore = Transform::translation(DVec3::new(0.0, 0.0, 5.0))
//!     .apply(&create_cylinder(20.0, 20.0, 32).unwrap());
//! let cup = difference(&body, &bore).unwrap();
//! assert!(is_watertight(&cup));
//! ```

pub mod error;
pub mod io;
pub mod ops;
pub mod primitives;
pub mod repair;
pub mod solid;
pub mod transform;

pub use error::MeshError;
pub use ops::boolean::{difference, intersection, union};
pub use ops::hull::convex_hull;
pub use repair::{inspect, is_watertight, repair, TopologyReport};
pub use solid::{Aabb, Solid};
pub use transform::{compose, Transform};
