//! TrackOps - Set operations over genomic interval tracks
//!
//! Union and intersection of whole-genome tracks in the half-open,
//! zero-based coordinate convention, with auxiliary column merging and
//! link-graph rewriting.
//!
//! # Features
//!
//! - Columnar per-chromosome storage with points, segments, values,
//!   strands and link graphs
//! - Sweep-line union with configurable strand and value merge policies
//! - Two-pointer intersection with an indexed fallback for overlapping
//!   inputs
//! - Deterministic merge-id assignment and dangling-edge handling
//!
//! # Example
//!
//! ```
//! use trackops::{
//!     BinaryTrackOperation, Genome, GenomeRegion, TrackCollection, TrackContents,
//!     TrackFormat, Union,
//! };
//!
//! # fn main() -> trackops::Result<()> {
//! let genome = Genome::new("hg38", vec![GenomeRegion::chromosome("chr1", 248_956_422)]);
//! let chr1 = genome.regions()[0].clone();
//!
//! let a = TrackContents::new(
//!     genome.clone(),
//!     TrackFormat::Segments,
//!     false,
//!     vec![(chr1.clone(), TrackCollection::segments(vec![100], vec![200])?)],
//! )?;
//! let b = TrackContents::new(
//!     genome,
//!     TrackFormat::Segments,
//!     false,
//!     vec![(chr1, TrackCollection::segments(vec![150], vec![300])?)],
//! )?;
//!
//! let result = Union::new(&a, &b).calculate()?;
//! assert_eq!(result.collection("chr1").unwrap().starts(), &[100]);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod ops;

// Re-export commonly used types
pub use crate::core::{
    coerce_collection, ElementCounter, ElementRecord, Genome, GenomeRegion, LinkStats,
    OverlapClusterer, Result, Strand, StrandPolicy, TrackCollection, TrackContents, TrackFormat,
    TrackOpError, ValueColumn, ValueEntry, ValueKind, ValueMerge,
};
pub use crate::ops::{BinaryTrackOperation, InputRequirement, Intersect, Union, UnionConfig};
