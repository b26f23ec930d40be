//! Union of two tracks
//!
//! Per chromosome, the elements of both inputs are swept into one sorted
//! sequence; strictly overlapping elements collapse into a single merged
//! element whose aux data is folded group-wise. Link graphs survive the
//! collapse through a rename map applied after the whole chromosome is
//! processed, since an edge may reference an id that only merges later in
//! the sweep.

use crate::core::{
    GenomeRegion, Result, Strand, StrandPolicy, TrackCollection, TrackContents, TrackFormat,
    TrackOpError, ValueColumn, ValueEntry, ValueMerge,
};
use crate::ops::links::{tag_links, LinkRewriteContext, TRACK_A_TAG, TRACK_B_TAG};
use crate::ops::operator::{BinaryTrackOperation, InputRequirement};
use crate::ops::sweep::{union_sweep, SourceRef, SourceTrack};

/// Tunables of a union operation
#[derive(Debug, Clone, PartialEq)]
pub struct UnionConfig {
    /// Emit every input element unmerged, still sorted; the output
    /// declares `allow_overlap`
    pub result_allow_overlap: bool,
    /// How the strands of a merge group combine
    pub strand_policy: StrandPolicy,
    /// How the values of a merge group fold into one
    pub value_merge: ValueMerge,
    /// Suffix every id with its track tag before the sweep, so equal ids
    /// from the two inputs stay distinct nodes
    pub make_links_unique: bool,
    pub track_a_tag: String,
    pub track_b_tag: String,
}

impl Default for UnionConfig {
    fn default() -> Self {
        UnionConfig {
            result_allow_overlap: false,
            strand_policy: StrandPolicy::default(),
            value_merge: ValueMerge::default(),
            make_links_unique: false,
            track_a_tag: TRACK_A_TAG.to_owned(),
            track_b_tag: TRACK_B_TAG.to_owned(),
        }
    }
}

/// Union of two tracks over a shared genome
///
/// The output format is the join of the input formats: segment-shaped if
/// either input is, valued or linked only when both inputs are. The output
/// carries a strand column when any input does and the policy enables
/// strand use.
pub struct Union<'a> {
    a: &'a TrackContents,
    b: &'a TrackContents,
    config: UnionConfig,
    output_format: TrackFormat,
    stranded: bool,
}

impl<'a> Union<'a> {
    pub fn new(a: &'a TrackContents, b: &'a TrackContents) -> Self {
        Union::with_config(a, b, UnionConfig::default())
    }

    pub fn with_config(a: &'a TrackContents, b: &'a TrackContents, config: UnionConfig) -> Self {
        let output_format = TrackFormat::widen(a.format(), b.format());
        let stranded = config.strand_policy.use_strands && (a.stranded() || b.stranded());
        Union {
            a,
            b,
            config,
            output_format,
            stranded,
        }
    }
}

/// Owned id and edge columns of one input, tagged when requested
fn link_columns(
    collection: &TrackCollection,
    tag: Option<&str>,
) -> (Vec<String>, Vec<Vec<String>>) {
    let ids = collection.ids().unwrap_or(&[]).to_vec();
    let edges = collection.edges().unwrap_or(&[]).to_vec();
    match tag {
        Some(tag) => tag_links(&ids, &edges, tag),
        None => (ids, edges),
    }
}

impl BinaryTrackOperation for Union<'_> {
    fn inputs(&self) -> (&TrackContents, &TrackContents) {
        (self.a, self.b)
    }

    fn requirements(&self) -> [InputRequirement; 2] {
        // The sweep normalizes overlapping input either way: merged away
        // when merging, declared on the output when not.
        [InputRequirement {
            accepts_overlapping: true,
        }; 2]
    }

    fn output_format(&self) -> TrackFormat {
        self.output_format
    }

    fn input_formats(&self) -> [TrackFormat; 2] {
        // Both sides are lifted to the output format before the sweep;
        // one-sided aux columns drop out in the coercion.
        [self.output_format; 2]
    }

    fn result_allow_overlap(&self) -> bool {
        self.config.result_allow_overlap
    }

    fn validate_formats(&self) -> Result<()> {
        if self.output_format.has_values() && self.a.value_kind() != self.b.value_kind() {
            return Err(TrackOpError::ValueKindMismatch);
        }
        Ok(())
    }

    fn compute_region(
        &self,
        _region: &GenomeRegion,
        a: &TrackCollection,
        b: &TrackCollection,
    ) -> Result<TrackCollection> {
        let a_ends = a.effective_ends();
        let b_ends = b.effective_ends();
        let sweep = union_sweep(
            a.starts(),
            &a_ends,
            b.starts(),
            &b_ends,
            self.config.result_allow_overlap,
        );

        let side = |track: SourceTrack| match track {
            SourceTrack::A => a,
            SourceTrack::B => b,
        };

        let mut values_out = if self.output_format.has_values() {
            a.values().map(ValueColumn::empty_like)
        } else {
            None
        };
        let mut strands_out = self.stranded.then(Vec::new);

        let linked = self.output_format.has_links();
        let weighted = linked && a.weights().is_some() && b.weights().is_some();
        let (a_ids, a_edges) = if linked {
            link_columns(
                a,
                self.config.make_links_unique.then_some(&*self.config.track_a_tag),
            )
        } else {
            Default::default()
        };
        let (b_ids, b_edges) = if linked {
            link_columns(
                b,
                self.config.make_links_unique.then_some(&*self.config.track_b_tag),
            )
        } else {
            Default::default()
        };
        let side_ids = |source: SourceRef| match source.track {
            SourceTrack::A => &a_ids[source.idx],
            SourceTrack::B => &b_ids[source.idx],
        };
        let side_edges = |source: SourceRef| match source.track {
            SourceTrack::A => &a_edges[source.idx],
            SourceTrack::B => &b_edges[source.idx],
        };

        let mut ctx = LinkRewriteContext::new();
        let mut ids_out = Vec::new();
        let mut raw_edges: Vec<Vec<String>> = Vec::new();
        let mut raw_weights: Vec<Vec<f64>> = Vec::new();

        for group in &sweep.groups {
            if let Some(values) = values_out.as_mut() {
                let entries: Vec<ValueEntry> = group
                    .iter()
                    .filter_map(|source| side(source.track).values().map(|v| v.get(source.idx)))
                    .collect();
                if let Some(folded) = self.config.value_merge.fold(&entries) {
                    values.push(folded)?;
                }
            }
            if let Some(strands) = strands_out.as_mut() {
                let contributed = |source: &SourceRef| {
                    side(source.track)
                        .strands()
                        .map(|s| s[source.idx])
                        .unwrap_or(Strand::Missing)
                };
                // A sole contributor's strand is copied verbatim; the
                // policy only resolves multi-contributor conflicts.
                let strand = match group.as_slice() {
                    [single] => contributed(single),
                    _ => self.config.strand_policy.fold(group.iter().map(contributed)),
                };
                strands.push(strand);
            }
            if linked {
                let id = if group.len() == 1 {
                    let id = side_ids(group[0]).clone();
                    ctx.keep(&id);
                    id
                } else {
                    ctx.merge(group.iter().map(|&source| side_ids(source).as_str()))
                };
                ids_out.push(id);
                raw_edges.push(
                    group
                        .iter()
                        .flat_map(|&source| side_edges(source).iter().cloned())
                        .collect(),
                );
                if weighted {
                    raw_weights.push(
                        group
                            .iter()
                            .flat_map(|source| {
                                side(source.track)
                                    .weights()
                                    .map(|w| w[source.idx].clone())
                                    .unwrap_or_default()
                            })
                            .collect(),
                    );
                }
            }
        }

        let mut out = if self.output_format.is_segmented() {
            TrackCollection::segments(sweep.starts, sweep.ends)?
        } else {
            TrackCollection::points(sweep.starts)
        };
        if let Some(values) = values_out {
            out = out.with_values(values)?;
        }
        if let Some(strands) = strands_out {
            out = out.with_strands(strands)?;
        }
        if linked {
            // The rename map is only complete once every group has been
            // seen; rewrite all edge lists now.
            let mut edges_out = Vec::with_capacity(raw_edges.len());
            let mut weights_out = Vec::with_capacity(raw_edges.len());
            for (pos, edges) in raw_edges.iter().enumerate() {
                let (edges, weights) =
                    ctx.rewrite(edges, weighted.then(|| raw_weights[pos].as_slice()));
                edges_out.push(edges);
                weights_out.push(weights);
            }
            out = out.with_links(ids_out, edges_out)?;
            if weighted {
                out = out.with_weights(weights_out)?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Genome, GenomeRegion};

    fn genome() -> Genome {
        Genome::new("testg", vec![GenomeRegion::chromosome("chr1", 1000)])
    }

    fn contents(format: TrackFormat, collection: TrackCollection) -> TrackContents {
        let genome = genome();
        let chr1 = genome.regions()[0].clone();
        TrackContents::new(genome, format, false, vec![(chr1, collection)]).unwrap()
    }

    fn chr1(contents: &TrackContents) -> &TrackCollection {
        contents.collection("chr1").unwrap()
    }

    #[test]
    fn test_segment_union_merges_overlap() {
        let a = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![2], vec![5]).unwrap(),
        );
        let b = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![4], vec![8]).unwrap(),
        );
        let result = Union::new(&a, &b).calculate().unwrap();
        assert_eq!(result.format(), TrackFormat::Segments);
        assert_eq!(chr1(&result).starts(), &[2]);
        assert_eq!(chr1(&result).ends(), Some(&[8][..]));
    }

    #[test]
    fn test_point_union_stays_point_shaped() {
        let a = contents(TrackFormat::Points, TrackCollection::points(vec![2]));
        let b = contents(TrackFormat::Points, TrackCollection::points(vec![7]));
        let result = Union::new(&a, &b).calculate().unwrap();
        assert_eq!(result.format(), TrackFormat::Points);
        assert_eq!(chr1(&result).starts(), &[2, 7]);
        assert!(chr1(&result).ends().is_none());
    }

    #[test]
    fn test_value_merge_takes_max_by_default() {
        let a = contents(
            TrackFormat::ValuedPoints,
            TrackCollection::points(vec![10])
                .with_values(ValueColumn::Numeric(vec![45.0]))
                .unwrap(),
        );
        let b = contents(
            TrackFormat::ValuedPoints,
            TrackCollection::points(vec![10])
                .with_values(ValueColumn::Numeric(vec![100.0]))
                .unwrap(),
        );
        let result = Union::new(&a, &b).calculate().unwrap();
        assert_eq!(
            chr1(&result).values(),
            Some(&ValueColumn::Numeric(vec![100.0]))
        );
    }

    #[test]
    fn test_linked_union_rewires_merged_reference() {
        let a = contents(
            TrackFormat::LinkedPoints,
            TrackCollection::points(vec![10, 50])
                .with_links(
                    vec!["1".into(), "2".into()],
                    vec![vec!["2".into()], vec!["1".into()]],
                )
                .unwrap(),
        );
        let b = contents(
            TrackFormat::LinkedPoints,
            TrackCollection::points(vec![10])
                .with_links(vec!["3".into()], vec![vec!["3".into()]])
                .unwrap(),
        );
        let result = Union::new(&a, &b).calculate().unwrap();
        let out = chr1(&result);
        assert_eq!(out.ids(), Some(&["merge-1".into(), "2".into()][..]));
        // Merged edges concatenate A's then B's; B's self-edge follows the
        // group into its merge id.
        assert_eq!(
            out.edges(),
            Some(&[vec!["2".to_owned(), "merge-1".to_owned()], vec!["merge-1".to_owned()]][..])
        );
    }

    #[test]
    fn test_make_links_unique_tags_both_tracks() {
        let a = contents(
            TrackFormat::LinkedPoints,
            TrackCollection::points(vec![10])
                .with_links(vec!["1".into()], vec![vec!["1".into()]])
                .unwrap(),
        );
        let b = contents(
            TrackFormat::LinkedPoints,
            TrackCollection::points(vec![50])
                .with_links(vec!["1".into()], vec![vec!["1".into()]])
                .unwrap(),
        );
        let config = UnionConfig {
            make_links_unique: true,
            ..Default::default()
        };
        let result = Union::with_config(&a, &b, config).calculate().unwrap();
        let out = chr1(&result);
        assert_eq!(
            out.ids(),
            Some(&["1-track-1".into(), "1-track-2".into()][..])
        );
        assert_eq!(
            out.edges(),
            Some(&[vec!["1-track-1".to_owned()], vec!["1-track-2".to_owned()]][..])
        );
    }

    #[test]
    fn test_strand_conflict_resolves_to_missing() {
        let a = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![2], vec![6])
                .unwrap()
                .with_strands(vec![Strand::Plus])
                .unwrap(),
        );
        let b = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![4], vec![8])
                .unwrap()
                .with_strands(vec![Strand::Minus])
                .unwrap(),
        );
        let result = Union::new(&a, &b).calculate().unwrap();
        assert_eq!(chr1(&result).strands(), Some(&[Strand::Missing][..]));
    }

    #[test]
    fn test_single_contributor_strand_copied_verbatim() {
        let a = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![2], vec![4])
                .unwrap()
                .with_strands(vec![Strand::Missing])
                .unwrap(),
        );
        let b = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![10], vec![12]).unwrap(),
        );
        let config = UnionConfig {
            strand_policy: StrandPolicy {
                use_strands: true,
                treat_missing_as_negative: true,
            },
            ..Default::default()
        };
        let result = Union::with_config(&a, &b, config).calculate().unwrap();
        // No element merged, so the missing-as-negative reading never
        // applies.
        assert_eq!(
            chr1(&result).strands(),
            Some(&[Strand::Missing, Strand::Missing][..])
        );
    }

    #[test]
    fn test_treat_missing_as_negative_resolves_merge_conflict() {
        let a = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![2], vec![6])
                .unwrap()
                .with_strands(vec![Strand::Missing])
                .unwrap(),
        );
        let b = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![4], vec![8])
                .unwrap()
                .with_strands(vec![Strand::Minus])
                .unwrap(),
        );
        let config = UnionConfig {
            strand_policy: StrandPolicy {
                use_strands: true,
                treat_missing_as_negative: true,
            },
            ..Default::default()
        };
        let result = Union::with_config(&a, &b, config).calculate().unwrap();
        assert_eq!(chr1(&result).strands(), Some(&[Strand::Minus][..]));
    }

    #[test]
    fn test_strandless_side_contributes_missing() {
        let a = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![2], vec![6])
                .unwrap()
                .with_strands(vec![Strand::Plus])
                .unwrap(),
        );
        let b = contents(
            TrackFormat::Segments,
            TrackCollection::segments(vec![4], vec![8]).unwrap(),
        );
        let result = Union::new(&a, &b).calculate().unwrap();
        assert_eq!(chr1(&result).strands(), Some(&[Strand::Missing][..]));
    }

    #[test]
    fn test_value_kind_mismatch_rejected() {
        let a = contents(
            TrackFormat::ValuedPoints,
            TrackCollection::points(vec![1])
                .with_values(ValueColumn::Numeric(vec![1.0]))
                .unwrap(),
        );
        let b = contents(
            TrackFormat::ValuedPoints,
            TrackCollection::points(vec![2])
                .with_values(ValueColumn::Categorical(vec!["x".into()]))
                .unwrap(),
        );
        assert!(matches!(
            Union::new(&a, &b).calculate(),
            Err(TrackOpError::ValueKindMismatch)
        ));
    }

    #[test]
    fn test_one_sided_value_column_is_dropped() {
        let a = contents(
            TrackFormat::ValuedPoints,
            TrackCollection::points(vec![1])
                .with_values(ValueColumn::Numeric(vec![1.0]))
                .unwrap(),
        );
        let b = contents(TrackFormat::Points, TrackCollection::points(vec![5]));
        let result = Union::new(&a, &b).calculate().unwrap();
        assert_eq!(result.format(), TrackFormat::Points);
        assert!(chr1(&result).values().is_none());
    }
}
