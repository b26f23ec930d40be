//! Lazy element streams and single-purpose transformers
//!
//! [`TrackContents::iter_elements`] produces a lazy, single-pass, finite
//! sequence of owned element records; it is not restartable without
//! re-opening the source. Statistics collection over a track is expressed
//! as explicit composition of transformers over that sequence. Each
//! transformer declares what it adds and they compose by construction
//! order, not by nested wrapping.
//!
//! ```
//! use trackops::core::{ElementCounter, LinkStats, OverlapClusterer};
//! # use trackops::core::{Genome, GenomeRegion, TrackContents, TrackCollection, TrackFormat};
//! # let genome = Genome::new("g", vec![GenomeRegion::chromosome("chr1", 100)]);
//! # let chr1 = genome.regions()[0].clone();
//! # let contents = TrackContents::new(genome, TrackFormat::Points, false,
//! #     vec![(chr1, TrackCollection::points(vec![1, 2]))]).unwrap();
//! let mut stream = LinkStats::new(ElementCounter::new(contents.iter_elements()));
//! while let Some(_element) = stream.next() {}
//! assert_eq!(stream.source().counts().get("chr1"), Some(&2));
//! ```

use std::collections::HashMap;

use crate::core::collection::ValueEntry;
use crate::core::contents::TrackContents;
use crate::core::strand::Strand;

/// One element detached from its columnar storage
///
/// `end` is the explicit end for segment-shaped sources and the implicit
/// `start + 1` for point-shaped ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub value: Option<ValueEntry>,
    pub strand: Option<Strand>,
    pub id: Option<String>,
    pub edges: Vec<String>,
    pub weights: Vec<f64>,
}

/// Lazy walk over every element of every region, in region order
pub struct Elements<'a> {
    contents: &'a TrackContents,
    region_idx: usize,
    element_idx: usize,
}

impl<'a> Iterator for Elements<'a> {
    type Item = ElementRecord;

    fn next(&mut self) -> Option<ElementRecord> {
        loop {
            let (region, collection) = self.contents.entries().get(self.region_idx)?;
            if self.element_idx >= collection.len() {
                self.region_idx += 1;
                self.element_idx = 0;
                continue;
            }
            let row = collection.row(self.element_idx);
            self.element_idx += 1;
            return Some(ElementRecord {
                chrom: region.chrom.clone(),
                start: row.start(),
                end: row.end(),
                value: row.value(),
                strand: row.strand(),
                id: row.id().map(str::to_owned),
                edges: row.edges().map(<[String]>::to_vec).unwrap_or_default(),
                weights: row.weights().map(<[f64]>::to_vec).unwrap_or_default(),
            });
        }
    }
}

impl TrackContents {
    /// Lazy, single-pass element sequence over all regions
    pub fn iter_elements(&self) -> Elements<'_> {
        Elements {
            contents: self,
            region_idx: 0,
            element_idx: 0,
        }
    }
}

/// Pass-through transformer that counts elements per chromosome
///
/// Counts are complete once the stream is exhausted; this is the "extra
/// pass" statistics style of the import layer.
pub struct ElementCounter<S> {
    source: S,
    counts: HashMap<String, usize>,
}

impl<S: Iterator<Item = ElementRecord>> ElementCounter<S> {
    pub fn new(source: S) -> Self {
        ElementCounter {
            source,
            counts: HashMap::new(),
        }
    }

    /// Elements seen so far, per chromosome
    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }
}

impl<S: Iterator<Item = ElementRecord>> Iterator for ElementCounter<S> {
    type Item = ElementRecord;

    fn next(&mut self) -> Option<ElementRecord> {
        let element = self.source.next()?;
        *self.counts.entry(element.chrom.clone()).or_insert(0) += 1;
        Some(element)
    }
}

/// Transformer that collapses runs of overlapping elements
///
/// Requires the source to be sorted by start within each chromosome.
/// The footprint is widened; aux data follows the first element of the
/// run. Touching elements are not collapsed.
pub struct OverlapClusterer<S> {
    source: S,
    pending: Option<ElementRecord>,
}

impl<S: Iterator<Item = ElementRecord>> OverlapClusterer<S> {
    pub fn new(source: S) -> Self {
        OverlapClusterer {
            source,
            pending: None,
        }
    }
}

impl<S: Iterator<Item = ElementRecord>> Iterator for OverlapClusterer<S> {
    type Item = ElementRecord;

    fn next(&mut self) -> Option<ElementRecord> {
        let mut current = self.pending.take().or_else(|| self.source.next())?;
        for element in self.source.by_ref() {
            if element.chrom == current.chrom && element.start < current.end {
                current.end = current.end.max(element.end);
            } else {
                self.pending = Some(element);
                break;
            }
        }
        Some(current)
    }
}

/// Pass-through transformer inferring link-dependent attributes
///
/// Tracks, per chromosome, the longest edge list and the longest id
/// string seen so far.
pub struct LinkStats<S> {
    source: S,
    max_num_edges: HashMap<String, usize>,
    max_id_len: HashMap<String, usize>,
}

impl<S: Iterator<Item = ElementRecord>> LinkStats<S> {
    pub fn new(source: S) -> Self {
        LinkStats {
            source,
            max_num_edges: HashMap::new(),
            max_id_len: HashMap::new(),
        }
    }

    pub fn max_num_edges(&self) -> &HashMap<String, usize> {
        &self.max_num_edges
    }

    pub fn max_id_len(&self) -> &HashMap<String, usize> {
        &self.max_id_len
    }

    /// The wrapped upstream transformer
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: Iterator<Item = ElementRecord>> Iterator for LinkStats<S> {
    type Item = ElementRecord;

    fn next(&mut self) -> Option<ElementRecord> {
        let element = self.source.next()?;
        if !element.edges.is_empty() {
            let entry = self.max_num_edges.entry(element.chrom.clone()).or_insert(0);
            *entry = (*entry).max(element.edges.len());
        }
        if let Some(id) = &element.id {
            let entry = self.max_id_len.entry(element.chrom.clone()).or_insert(0);
            *entry = (*entry).max(id.len());
        }
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collection::TrackCollection;
    use crate::core::contents::{Genome, GenomeRegion};
    use crate::core::format::TrackFormat;

    fn two_chrom_contents() -> TrackContents {
        let genome = Genome::new(
            "testg",
            vec![
                GenomeRegion::chromosome("chr1", 1000),
                GenomeRegion::chromosome("chr2", 500),
            ],
        );
        let chr1 = genome.regions()[0].clone();
        let chr2 = genome.regions()[1].clone();
        TrackContents::new(
            genome,
            TrackFormat::Segments,
            true,
            vec![
                (
                    chr1,
                    TrackCollection::segments(vec![2, 3, 10], vec![5, 4, 12]).unwrap(),
                ),
                (chr2, TrackCollection::segments(vec![7], vec![9]).unwrap()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_elements_walk_all_regions() {
        let contents = two_chrom_contents();
        let elements: Vec<_> = contents.iter_elements().collect();
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0].chrom, "chr1");
        assert_eq!(elements[3].chrom, "chr2");
        assert_eq!(elements[3].start, 7);
        assert_eq!(elements[3].end, 9);
    }

    #[test]
    fn test_element_counter() {
        let contents = two_chrom_contents();
        let mut counter = ElementCounter::new(contents.iter_elements());
        while counter.next().is_some() {}
        assert_eq!(counter.counts().get("chr1"), Some(&3));
        assert_eq!(counter.counts().get("chr2"), Some(&1));
    }

    #[test]
    fn test_overlap_clusterer() {
        let contents = two_chrom_contents();
        let clustered: Vec<_> = OverlapClusterer::new(contents.iter_elements()).collect();
        // chr1: [2,5) absorbs [3,4); [10,12) stands alone. chr2 untouched.
        assert_eq!(clustered.len(), 3);
        assert_eq!((clustered[0].start, clustered[0].end), (2, 5));
        assert_eq!((clustered[1].start, clustered[1].end), (10, 12));
        assert_eq!(clustered[2].chrom, "chr2");
    }

    #[test]
    fn test_clusterer_does_not_merge_touching() {
        let genome = Genome::new("testg", vec![GenomeRegion::chromosome("chr1", 100)]);
        let chr1 = genome.regions()[0].clone();
        let contents = TrackContents::new(
            genome,
            TrackFormat::Segments,
            false,
            vec![(
                chr1,
                TrackCollection::segments(vec![2, 4], vec![4, 6]).unwrap(),
            )],
        )
        .unwrap();
        let clustered: Vec<_> = OverlapClusterer::new(contents.iter_elements()).collect();
        assert_eq!(clustered.len(), 2);
    }

    #[test]
    fn test_composed_transformers() {
        let genome = Genome::new("testg", vec![GenomeRegion::chromosome("chr1", 100)]);
        let chr1 = genome.regions()[0].clone();
        let contents = TrackContents::new(
            genome,
            TrackFormat::LinkedPoints,
            false,
            vec![(
                chr1,
                TrackCollection::points(vec![1, 5])
                    .with_links(
                        vec!["alpha".into(), "b".into()],
                        vec![vec!["b".into(), "alpha".into()], vec![]],
                    )
                    .unwrap(),
            )],
        )
        .unwrap();

        let mut stream = LinkStats::new(ElementCounter::new(contents.iter_elements()));
        while stream.next().is_some() {}
        assert_eq!(stream.max_num_edges().get("chr1"), Some(&2));
        assert_eq!(stream.max_id_len().get("chr1"), Some(&5));
        assert_eq!(stream.source().counts().get("chr1"), Some(&2));
    }
}
