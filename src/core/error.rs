//! Error types for track operations
//!
//! Defines all error types used throughout the library.

use crate::core::format::TrackFormat;
use thiserror::Error;

/// Main error type for track operations
#[derive(Debug, Error)]
pub enum TrackOpError {
    /// One side's format cannot be lifted to the operation's output shape.
    ///
    /// Unreachable for the six supported formats; reserved for the
    /// partition extension.
    #[error("cannot lift format '{from}' to '{to}'")]
    IncompatibleFormat { from: TrackFormat, to: TrackFormat },

    /// Intersection invoked on a track that declares internal overlaps
    /// without the brute-force opt-in
    #[error("track {track} declares internal overlaps; intersection requires overlap-free input unless brute-force mode is enabled")]
    OverlapPrecondition { track: &'static str },

    /// Accessor invoked on a collection-of-collections with zero regions
    #[error("track contents hold no regions")]
    EmptyContents,

    /// Aligned columns of one collection differ in length
    #[error("column '{column}' has length {actual}, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A region's collection does not match the track's declared format
    #[error("collection for region '{region}' disagrees with the declared format on column '{column}'")]
    ColumnPresenceMismatch {
        region: String,
        column: &'static str,
    },

    /// The two inputs carry value columns of different kinds
    /// (numeric vs. categorical)
    #[error("value columns of the two inputs have different kinds and cannot be merged")]
    ValueKindMismatch,
}

/// Result type alias for track operations
pub type Result<T> = std::result::Result<T, TrackOpError>;
