//! # Config Crate
//!
//! Centralized configuration constants for the vortex collar pipeline.
//! Tolerances, tessellation limits and unit factors live here so the mesh
//! kernel and the assembly pipeline agree on a single set of values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{inches_to_mm, INCH_TO_MM, WELD_EPSILON};
//!
//! assert_eq!(inches_to_mm(1.0), INCH_TO_MM);
//! assert!(WELD_EPSILON > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Compile-time only**: Runtime design parameters belong to the
//!   `vortex-collar` parameter set, not here

pub mod constants;
