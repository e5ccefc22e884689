//! Public error kinds (spec §7: exactly two, no retry, no recovery inside the detector).

use thiserror::Error;

/// Failure modes for the scroll-motion detector.
///
/// `InvalidGeometry` covers mismatched dimensions, strides that are too
/// small for the declared width, buffers too short for the rectangle, and
/// hash-vector length mismatches in the test hook. `InvalidInput` covers
/// malformed call arguments that aren't geometry per se (e.g. a negative
/// `max_distance`).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
