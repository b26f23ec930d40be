//! Shared contract for binary track operations
//!
//! An operation validates its inputs against declared requirements
//! before any per-chromosome work begins (fail fast, no partial
//! results), dispatches the configured raw algorithm once per
//! chromosome, and assembles the per-chromosome outputs back into a
//! single collection-of-collections.

use crate::core::{
    coerce_collection, Genome, GenomeRegion, Result, TrackCollection, TrackContents, TrackFormat,
    TrackOpError,
};

/// Declared format requirement for one input track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRequirement {
    /// Whether the operation accepts an input that declares internal
    /// overlaps
    pub accepts_overlapping: bool,
}

/// Contract shared by all binary track operations
///
/// `calculate` iterates the union of the chromosomes known to either
/// input's genome, preserving the ordering of the first input's genome
/// definition; chromosomes known only to the second genome are appended
/// in their own order. A chromosome with zero elements on both sides
/// still produces an empty-but-present output entry. Any per-chromosome
/// failure aborts the whole operation.
pub trait BinaryTrackOperation {
    /// The two input tracks, in order
    fn inputs(&self) -> (&TrackContents, &TrackContents);

    /// Per-input format requirements
    fn requirements(&self) -> [InputRequirement; 2];

    /// Format of the operation's output
    fn output_format(&self) -> TrackFormat;

    /// Per-input target formats
    ///
    /// `calculate` lifts each region's collection to its target through
    /// [`coerce_collection`] before dispatch. Defaults to the inputs' own
    /// formats, an identity coercion.
    fn input_formats(&self) -> [TrackFormat; 2] {
        let (a, b) = self.inputs();
        [a.format(), b.format()]
    }

    /// Whether the produced track declares internal overlaps
    fn result_allow_overlap(&self) -> bool {
        false
    }

    /// Operation-specific validation beyond the overlap requirements
    fn validate_formats(&self) -> Result<()> {
        Ok(())
    }

    /// Run the configured raw algorithm for one chromosome
    fn compute_region(
        &self,
        region: &GenomeRegion,
        a: &TrackCollection,
        b: &TrackCollection,
    ) -> Result<TrackCollection>;

    /// Validate both inputs against the declared requirements
    fn validate(&self) -> Result<()> {
        let (a, b) = self.inputs();
        let [req_a, req_b] = self.requirements();
        if a.allow_overlap() && !req_a.accepts_overlapping {
            return Err(TrackOpError::OverlapPrecondition { track: "A" });
        }
        if b.allow_overlap() && !req_b.accepts_overlapping {
            return Err(TrackOpError::OverlapPrecondition { track: "B" });
        }
        self.validate_formats()
    }

    /// Run the operation over every chromosome and assemble the result
    fn calculate(&self) -> Result<TrackContents> {
        self.validate()?;
        let (a, b) = self.inputs();

        let mut regions: Vec<GenomeRegion> = a.genome().regions().to_vec();
        for region in b.genome().regions() {
            if a.genome().region(&region.chrom).is_none() {
                regions.push(region.clone());
            }
        }

        let empty_a = a.empty_collection();
        let empty_b = b.empty_collection();
        let [fmt_a, fmt_b] = self.input_formats();

        let mut entries = Vec::with_capacity(regions.len());
        for region in &regions {
            let col_a =
                coerce_collection(a.collection(&region.chrom).unwrap_or(&empty_a), a.format(), fmt_a)?;
            let col_b =
                coerce_collection(b.collection(&region.chrom).unwrap_or(&empty_b), b.format(), fmt_b)?;
            let out = self.compute_region(region, &col_a, &col_b)?;
            entries.push((region.clone(), out));
        }

        let genome = Genome::new(a.genome().name(), regions);
        TrackContents::new(
            genome,
            self.output_format(),
            self.result_allow_overlap(),
            entries,
        )
    }
}
