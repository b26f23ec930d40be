//! Intersection of two tracks
//!
//! Per chromosome, emits the non-empty cuts between the footprints of the
//! two inputs. The output keeps the first input's format, and every cut
//! carries the aux data of the first-input element it was cut from; the
//! second input contributes footprint only.

use crate::core::{GenomeRegion, Result, TrackCollection, TrackContents, TrackFormat};
use crate::ops::operator::{BinaryTrackOperation, InputRequirement};
use crate::ops::sweep::{intersect_indexed, intersect_two_pointer, IntersectSweep};

/// Intersection of two tracks over a shared genome
///
/// The default algorithm is a linear two-pointer scan and requires both
/// inputs to be overlap-free. Inputs declaring `allow_overlap` are only
/// accepted through [`Intersect::brute_force`], which trades the scan for
/// an interval index over the second input and enumerates every
/// overlapping pair.
pub struct Intersect<'a> {
    a: &'a TrackContents,
    b: &'a TrackContents,
    brute_force: bool,
}

impl<'a> Intersect<'a> {
    pub fn new(a: &'a TrackContents, b: &'a TrackContents) -> Self {
        Intersect {
            a,
            b,
            brute_force: false,
        }
    }

    /// Opt in to the indexed algorithm that accepts overlapping inputs
    pub fn brute_force(mut self) -> Self {
        self.brute_force = true;
        self
    }
}

/// Copy one element's aux columns per the sweep's index map
fn copy_aux(source: &TrackCollection, sweep: &IntersectSweep, mut out: TrackCollection) -> Result<TrackCollection> {
    if let Some(values) = source.values() {
        let mut out_values = values.empty_like();
        for &idx in &sweep.source_idx {
            out_values.push(values.get(idx))?;
        }
        out = out.with_values(out_values)?;
    }
    if let Some(strands) = source.strands() {
        out = out.with_strands(sweep.source_idx.iter().map(|&idx| strands[idx]).collect())?;
    }
    if let (Some(ids), Some(edges)) = (source.ids(), source.edges()) {
        out = out.with_links(
            sweep.source_idx.iter().map(|&idx| ids[idx].clone()).collect(),
            sweep
                .source_idx
                .iter()
                .map(|&idx| edges[idx].clone())
                .collect(),
        )?;
        if let Some(weights) = source.weights() {
            out = out.with_weights(
                sweep
                    .source_idx
                    .iter()
                    .map(|&idx| weights[idx].clone())
                    .collect(),
            )?;
        }
    }
    Ok(out)
}

impl BinaryTrackOperation for Intersect<'_> {
    fn inputs(&self) -> (&TrackContents, &TrackContents) {
        (self.a, self.b)
    }

    fn requirements(&self) -> [InputRequirement; 2] {
        [InputRequirement {
            accepts_overlapping: self.brute_force,
        }; 2]
    }

    fn output_format(&self) -> TrackFormat {
        self.a.format()
    }

    fn input_formats(&self) -> [TrackFormat; 2] {
        // The second input contributes footprint only; its aux columns
        // are stripped in the coercion.
        let b_shape = if self.b.format().is_segmented() {
            TrackFormat::Segments
        } else {
            TrackFormat::Points
        };
        [self.a.format(), b_shape]
    }

    fn result_allow_overlap(&self) -> bool {
        self.a.allow_overlap() || self.b.allow_overlap()
    }

    fn compute_region(
        &self,
        _region: &GenomeRegion,
        a: &TrackCollection,
        b: &TrackCollection,
    ) -> Result<TrackCollection> {
        let a_ends = a.effective_ends();
        let b_ends = b.effective_ends();
        let sweep = if self.brute_force {
            intersect_indexed(a.starts(), &a_ends, b.starts(), &b_ends)
        } else {
            intersect_two_pointer(a.starts(), &a_ends, b.starts(), &b_ends)
        };

        let out = if self.a.format().is_segmented() {
            TrackCollection::segments(sweep.starts.clone(), sweep.ends.clone())?
        } else {
            // A point survives intact or not at all; its cut is the unit
            // interval at its own coordinate.
            TrackCollection::points(sweep.starts.clone())
        };
        copy_aux(a, &sweep, out)
    }
}
