pub mod bounds;
pub mod circle;
pub mod point;
pub mod ray;
pub mod segment;
pub mod vector;

use thiserror::Error;

/// Geometric tolerance.
///
/// Hits closer than `EPS` to a ray origin and near-parallel ray/segment pairs
/// are treated as non-intersecting, so a ray leaving a surface never hits
/// the same surface again at its own origin.
pub const EPS: f64 = 1e-6;

/// Inputs the geometry kernel refuses to work with.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// Direction vector too short to normalize
    #[error("degenerate geometry: zero-length direction vector")]
    ZeroDirection,
    /// Segment or edge defined by two (almost) identical points
    #[error("degenerate geometry: coincident points")]
    CoincidentPoints,
    /// NaN or infinite coordinate
    #[error("degenerate geometry: non-finite coordinate")]
    NonFinite,
}
