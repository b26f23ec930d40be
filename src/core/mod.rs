//! Core data model for track operations
//!
//! This module contains the columnar element collection, the format
//! descriptor lattice, the genome-keyed collection-of-collections and the
//! lazy element stream.

mod collection;
mod contents;
mod error;
mod format;
mod strand;
mod stream;

pub use collection::{
    ElementRow, TrackCollection, ValueColumn, ValueEntry, ValueKind, ValueMerge,
};
pub use contents::{Genome, GenomeRegion, TrackContents};
pub use error::{Result, TrackOpError};
pub use format::{coerce_collection, TrackFormat};
pub use strand::{Strand, StrandPolicy};
pub use stream::{ElementCounter, ElementRecord, Elements, LinkStats, OverlapClusterer};
