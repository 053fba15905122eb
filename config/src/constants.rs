//! # Configuration Constants
//!
//! Centralized constants for the CSG pipeline. All geometric tolerances,
//! tessellation bounds and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Units**: Source-unit to working-unit conversion
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Tessellation defaults and bounds
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// UNIT CONSTANTS
// =============================================================================

/// Millimetres per inch.
///
/// Design parameters are authored in inches; printable output is written in
/// millimetres.
///
/// # Example
///
/// ```rust
/// use config::constants::INCH_TO_MM;
///
/// let outer_diameter_mm = 6.0 * INCH_TO_MM;
/// assert!((outer_diameter_mm - 152.4).abs() < 1e-9);
/// ```
pub const INCH_TO_MM: f64 = 25.4;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Plane thickness used by the BSP boolean engine.
///
/// Points closer than this to a splitting plane are treated as coplanar.
/// Matches the tolerance of the csg.js algorithm the engine is built on.
pub const BSP_EPSILON: f64 = 1e-5;

/// Tolerance used when merging coincident vertices.
///
/// Boolean splits compute the same intersection point from both sides of a
/// shared edge; the two results differ in the last bits and are welded
/// together with this tolerance. Scaled by the mesh extent when the mesh is
/// larger than one unit.
///
/// # Example
///
/// ```rust
/// use config::constants::{EPSILON, WELD_EPSILON};
///
/// assert!(WELD_EPSILON > EPSILON);
/// ```
pub const WELD_EPSILON: f64 = 1e-7;

/// Relative tolerance for hull visibility tests.
///
/// Multiplied by the bounding-box diagonal of the point cloud.
pub const HULL_EPSILON: f64 = 1e-9;

/// Triangles with twice-area below this (relative to squared extent) are
/// considered degenerate slivers.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default circular tessellation for collar walls.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SEGMENTS;
///
/// assert_eq!(DEFAULT_SEGMENTS % 4, 0);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 72;

/// Default circular tessellation for the torch entry hole.
pub const DEFAULT_HOLE_SEGMENTS: u32 = 32;

/// Default tessellation for the platform deck outline.
pub const DEFAULT_DECK_SEGMENTS: u32 = 64;

/// Default tessellation for caster cylinders.
pub const DEFAULT_CASTER_SEGMENTS: u32 = 32;

/// Minimum number of segments for any circular shape.
pub const MIN_SEGMENTS: u32 = 3;

/// Maximum number of segments for any circular shape.
///
/// Safety limit against runaway tessellation.
pub const MAX_SEGMENTS: u32 = 1000;

/// Number of samples taken along each arc of a hull-derived slot wedge.
pub const HULL_ARC_SAMPLES: usize = 12;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of slots around a collar.
pub const MAX_SLOTS: u32 = 64;

/// Maximum number of faces in a single solid.
pub const MAX_FACES: usize = 10_000_000;

/// Maximum number of polygons a single boolean may produce inside its BSP
/// trees before the operation is abandoned as numerically degenerate.
pub const MAX_BSP_POLYGONS: usize = 4_000_000;

/// Upper bound on repair passes before giving up.
pub const MAX_REPAIR_PASSES: usize = 8;

// =============================================================================
// HELPERS
// =============================================================================

/// Converts inches to millimetres.
///
/// # Example
///
/// ```rust
/// use config::constants::inches_to_mm;
///
/// assert!((inches_to_mm(2.5) - 63.5).abs() < 1e-9);
/// ```
#[inline]
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * INCH_TO_MM
}

/// Converts millimetres to inches.
#[inline]
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / INCH_TO_MM
}

/// Clamps a requested segment count to the supported range.
///
/// # Example
///
/// ```rust
/// use config::constants::{clamp_segments, MAX_SEGMENTS, MIN_SEGMENTS};
///
/// assert_eq!(clamp_segments(1), MIN_SEGMENTS);
/// assert_eq!(clamp_segments(5000), MAX_SEGMENTS);
/// assert_eq!(clamp_segments(72), 72);
/// ```
#[inline]
pub fn clamp_segments(segments: u32) -> u32 {
    segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
