//! # Vortex Collar
//!
//! Parameterized intake collar for a convection-vortex ride, plus the
//! platform it is mounted in.
//!
//! ## Architecture
//!
//! ```text
//! CollarParameters ─validate→ CollarDimensions ─→ CollarPipeline ─→ Solid + BuildReport
//!                                                   │
//!                       SlotCutter (box / hull / corner wedge), features, CsgEngine
//! ```
//!
//! Design values are in inches and converted once, by `unit_scale`, into
//! working units (millimetres by default). Slots are placed by index, so
//! no state is shared between them and one failed slot leaves the others
//! untouched.
//!
//! ## Usage
//!
//! ```rust
//! use vortex_collar::{build, CollarParameters, PipelineState};
//!
//! let mut params = CollarParameters::iteration(1).unwrap();
//! params.segments = 16;
//! params.hole_segments = 8;
//! let output = build(params).unwrap();
//! assert_eq!(output.report.final_state(), Some(PipelineState::Done));
//! ```

pub mod authoring;
pub mod dimensions;
pub mod error;
pub mod features;
pub mod params;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod slot;

pub use authoring::{cutter_for, AuthoredSolid, Provenance, SlotCutter};
pub use dimensions::CollarDimensions;
pub use error::CollarError;
pub use params::{BaseConstruction, CollarParameters, LipParameters, SlotStrategy, ITERATIONS};
pub use pipeline::{build, BspEngine, BuildOutput, CollarPipeline, CsgEngine, PipelineState};
pub use platform::{NamedPart, Platform, PlatformDimensions, PART_NAMES};
pub use report::{BuildReport, Feature, FeatureOutcome, FeatureStatus};
pub use slot::SlotDescriptor;
