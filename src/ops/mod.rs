//! Binary track operations
//!
//! The raw per-chromosome algorithms live in [`sweep`] and [`links`];
//! [`operator`] defines the shared validate/dispatch/assemble contract and
//! [`union`] and [`intersect`] implement it.

mod intersect;
mod links;
mod operator;
mod sweep;
mod union;

pub use intersect::Intersect;
pub use links::{tag_links, LinkRewriteContext, TRACK_A_TAG, TRACK_B_TAG};
pub use operator::{BinaryTrackOperation, InputRequirement};
pub use sweep::{
    intersect_indexed, intersect_two_pointer, union_sweep, IntersectSweep, SourceRef, SourceTrack,
    UnionSweep,
};
pub use union::{Union, UnionConfig};
