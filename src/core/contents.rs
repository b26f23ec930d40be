//! Genome definition and collection-of-collections
//!
//! A [`TrackContents`] is an ordered mapping from genome region to
//! [`TrackCollection`], one entry per region known to the genome,
//! including empty entries for regions absent from the underlying data.
//! Contents are immutable inputs to operations; operations allocate brand
//! new contents as output.

use crate::core::collection::{TrackCollection, ValueKind};
use crate::core::error::{Result, TrackOpError};
use crate::core::format::TrackFormat;

/// One region of a genome, usually a whole chromosome
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomeRegion {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl GenomeRegion {
    /// A region spanning a chromosome from zero to its length
    pub fn chromosome(chrom: impl Into<String>, length: u64) -> Self {
        GenomeRegion {
            chrom: chrom.into(),
            start: 0,
            end: length,
        }
    }
}

impl std::fmt::Display for GenomeRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// A named, ordered set of genome regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    name: String,
    regions: Vec<GenomeRegion>,
}

impl Genome {
    pub fn new(name: impl Into<String>, regions: Vec<GenomeRegion>) -> Self {
        Genome {
            name: name.into(),
            regions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regions(&self) -> &[GenomeRegion] {
        &self.regions
    }

    pub fn region(&self, chrom: &str) -> Option<&GenomeRegion> {
        self.regions.iter().find(|r| r.chrom == chrom)
    }
}

/// Per-chromosome collections of one track, keyed by genome region
///
/// Carries the producer-declared format descriptor and `allow_overlap`
/// flag; neither is re-derived from the data.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackContents {
    genome: Genome,
    format: TrackFormat,
    allow_overlap: bool,
    entries: Vec<(GenomeRegion, TrackCollection)>,
    template: TrackCollection,
}

impl TrackContents {
    /// Build contents from per-region collections
    ///
    /// Regions of the genome missing from `collections` get an
    /// empty-but-present entry. Every collection is validated against the
    /// declared format, and strand presence, weight presence and value
    /// kind must be uniform across regions.
    pub fn new(
        genome: Genome,
        format: TrackFormat,
        allow_overlap: bool,
        collections: Vec<(GenomeRegion, TrackCollection)>,
    ) -> Result<Self> {
        let template = collections
            .first()
            .map(|(_, c)| c.empty_like())
            .unwrap_or_else(|| TrackCollection::empty_for(format));

        let mut provided: Vec<(GenomeRegion, TrackCollection)> = collections;
        let mut entries = Vec::with_capacity(genome.regions().len());
        for region in genome.regions() {
            let found = provided.iter().position(|(r, _)| r == region);
            let collection = match found {
                Some(pos) => provided.remove(pos).1,
                None => template.clone(),
            };
            entries.push((region.clone(), collection));
        }
        // Entries outside the genome definition are kept in given order.
        entries.extend(provided);

        let contents = TrackContents {
            genome,
            format,
            allow_overlap,
            entries,
            template,
        };
        contents.validate()?;
        Ok(contents)
    }

    fn validate(&self) -> Result<()> {
        let stranded = self.template.strands().is_some();
        let weighted = self.template.weights().is_some();
        let value_kind = self.template.values().map(|v| v.kind());
        for (region, collection) in &self.entries {
            let mismatch = |column: &'static str| TrackOpError::ColumnPresenceMismatch {
                region: region.to_string(),
                column,
            };
            if collection.ends().is_some() != self.format.is_segmented() {
                return Err(mismatch("ends"));
            }
            if collection.values().is_some() != self.format.has_values() {
                return Err(mismatch("values"));
            }
            if collection.ids().is_some() != self.format.has_links()
                || collection.edges().is_some() != self.format.has_links()
            {
                return Err(mismatch("ids"));
            }
            if collection.strands().is_some() != stranded {
                return Err(mismatch("strands"));
            }
            if collection.weights().is_some() != weighted {
                return Err(mismatch("weights"));
            }
            if collection.values().map(|v| v.kind()) != value_kind {
                return Err(mismatch("values"));
            }
        }
        Ok(())
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn format(&self) -> TrackFormat {
        self.format
    }

    pub fn allow_overlap(&self) -> bool {
        self.allow_overlap
    }

    /// Whether this track carries a strand column
    pub fn stranded(&self) -> bool {
        self.template.strands().is_some()
    }

    /// Kind of the value column, if the format carries one
    pub fn value_kind(&self) -> Option<ValueKind> {
        self.template.values().map(|v| v.kind())
    }

    pub fn entries(&self) -> &[(GenomeRegion, TrackCollection)] {
        &self.entries
    }

    pub fn regions(&self) -> impl Iterator<Item = &GenomeRegion> {
        self.entries.iter().map(|(r, _)| r)
    }

    /// Collection of one chromosome, if the region is known
    pub fn collection(&self, chrom: &str) -> Option<&TrackCollection> {
        self.entries
            .iter()
            .find(|(r, _)| r.chrom == chrom)
            .map(|(_, c)| c)
    }

    /// First region's collection; fails on contents with zero regions
    pub fn first_collection(&self) -> Result<&TrackCollection> {
        self.entries
            .first()
            .map(|(_, c)| c)
            .ok_or(TrackOpError::EmptyContents)
    }

    /// An empty collection with this track's column presence
    pub fn empty_collection(&self) -> TrackCollection {
        self.template.clone()
    }

    /// Total number of elements across all regions
    pub fn num_elements(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).sum()
    }
}
