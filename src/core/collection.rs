//! Columnar element collection for one chromosome
//!
//! The fundamental data structure: ordered columns aligned by a common
//! index. Parallel arrays are the performance-relevant layout and are kept
//! deliberately; [`ElementRow`] offers a per-element view backed by index
//! lookups, never by duplicated storage.

use crate::core::error::{Result, TrackOpError};
use crate::core::format::TrackFormat;
use crate::core::strand::Strand;

/// Kind of a value column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Numeric,
    Categorical,
}

/// A value column, numeric or categorical
#[derive(Debug, Clone, PartialEq)]
pub enum ValueColumn {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl ValueColumn {
    pub fn len(&self) -> usize {
        match self {
            ValueColumn::Numeric(v) => v.len(),
            ValueColumn::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ValueColumn::Numeric(_) => ValueKind::Numeric,
            ValueColumn::Categorical(_) => ValueKind::Categorical,
        }
    }

    /// One element's value
    pub fn get(&self, idx: usize) -> ValueEntry {
        match self {
            ValueColumn::Numeric(v) => ValueEntry::Numeric(v[idx]),
            ValueColumn::Categorical(v) => ValueEntry::Categorical(v[idx].clone()),
        }
    }

    /// An empty column of the same kind
    pub fn empty_like(&self) -> ValueColumn {
        match self.kind() {
            ValueKind::Numeric => ValueColumn::Numeric(Vec::new()),
            ValueKind::Categorical => ValueColumn::Categorical(Vec::new()),
        }
    }

    /// Append one value; the entry kind must match the column kind
    pub fn push(&mut self, entry: ValueEntry) -> Result<()> {
        match (self, entry) {
            (ValueColumn::Numeric(v), ValueEntry::Numeric(x)) => {
                v.push(x);
                Ok(())
            }
            (ValueColumn::Categorical(v), ValueEntry::Categorical(x)) => {
                v.push(x);
                Ok(())
            }
            _ => Err(TrackOpError::ValueKindMismatch),
        }
    }
}

/// One element's value, detached from its column
#[derive(Debug, Clone, PartialEq)]
pub enum ValueEntry {
    Numeric(f64),
    Categorical(String),
}

/// How the values of a merge group fold into one
///
/// Categorical values always keep the first contributor; contributors are
/// ordered A before B, so the choice is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMerge {
    #[default]
    Max,
    Min,
    Sum,
    KeepFirst,
}

impl ValueMerge {
    /// Fold the values of one merge group; `None` on an empty group
    pub fn fold(&self, entries: &[ValueEntry]) -> Option<ValueEntry> {
        let first = entries.first()?;
        match first {
            ValueEntry::Categorical(_) => Some(first.clone()),
            ValueEntry::Numeric(x) => {
                let rest = entries[1..].iter().filter_map(|e| match e {
                    ValueEntry::Numeric(y) => Some(*y),
                    ValueEntry::Categorical(_) => None,
                });
                let folded = match self {
                    ValueMerge::Max => rest.fold(*x, f64::max),
                    ValueMerge::Min => rest.fold(*x, f64::min),
                    ValueMerge::Sum => *x + rest.sum::<f64>(),
                    ValueMerge::KeepFirst => *x,
                };
                Some(ValueEntry::Numeric(folded))
            }
        }
    }
}

/// Columnar store of the elements of one chromosome
///
/// All present columns have equal length; this is validated at
/// construction. `ends` is absent for point-shaped collections; wherever
/// segment semantics are needed a point's end is implicitly `start + 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackCollection {
    starts: Vec<u64>,
    ends: Option<Vec<u64>>,
    values: Option<ValueColumn>,
    strands: Option<Vec<Strand>>,
    ids: Option<Vec<String>>,
    edges: Option<Vec<Vec<String>>>,
    weights: Option<Vec<Vec<f64>>>,
}

impl TrackCollection {
    /// A point-shaped collection
    pub fn points(starts: Vec<u64>) -> Self {
        TrackCollection {
            starts,
            ..Default::default()
        }
    }

    /// A segment-shaped collection
    pub fn segments(starts: Vec<u64>, ends: Vec<u64>) -> Result<Self> {
        let collection = TrackCollection {
            starts,
            ends: Some(ends),
            ..Default::default()
        };
        collection.check_len("ends", collection.ends.as_ref().map(Vec::len))?;
        Ok(collection)
    }

    pub fn with_values(mut self, values: ValueColumn) -> Result<Self> {
        self.check_len("values", Some(values.len()))?;
        self.values = Some(values);
        Ok(self)
    }

    pub fn with_strands(mut self, strands: Vec<Strand>) -> Result<Self> {
        self.check_len("strands", Some(strands.len()))?;
        self.strands = Some(strands);
        Ok(self)
    }

    /// Attach the link graph columns; `ids` and `edges` come together
    pub fn with_links(mut self, ids: Vec<String>, edges: Vec<Vec<String>>) -> Result<Self> {
        self.check_len("ids", Some(ids.len()))?;
        self.check_len("edges", Some(edges.len()))?;
        self.ids = Some(ids);
        self.edges = Some(edges);
        Ok(self)
    }

    /// Attach edge weights, aligned index-for-index with `edges`
    pub fn with_weights(mut self, weights: Vec<Vec<f64>>) -> Result<Self> {
        self.check_len("weights", Some(weights.len()))?;
        self.weights = Some(weights);
        Ok(self)
    }

    fn check_len(&self, column: &'static str, len: Option<usize>) -> Result<()> {
        match len {
            Some(actual) if actual != self.starts.len() => {
                Err(TrackOpError::ColumnLengthMismatch {
                    column,
                    expected: self.starts.len(),
                    actual,
                })
            }
            _ => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn starts(&self) -> &[u64] {
        &self.starts
    }

    pub fn ends(&self) -> Option<&[u64]> {
        self.ends.as_deref()
    }

    pub fn values(&self) -> Option<&ValueColumn> {
        self.values.as_ref()
    }

    pub fn strands(&self) -> Option<&[Strand]> {
        self.strands.as_deref()
    }

    pub fn ids(&self) -> Option<&[String]> {
        self.ids.as_deref()
    }

    pub fn edges(&self) -> Option<&[Vec<String>]> {
        self.edges.as_deref()
    }

    pub fn weights(&self) -> Option<&[Vec<f64>]> {
        self.weights.as_deref()
    }

    /// End coordinate of one element, implicitly `start + 1` for points
    pub fn end_of(&self, idx: usize) -> u64 {
        match &self.ends {
            Some(ends) => ends[idx],
            None => self.starts[idx] + 1,
        }
    }

    /// The full ends column, with implicit unit-interval ends
    /// manufactured for point-shaped collections
    pub fn effective_ends(&self) -> Vec<u64> {
        match &self.ends {
            Some(ends) => ends.clone(),
            None => self.starts.iter().map(|s| s + 1).collect(),
        }
    }

    /// The format implied by the populated columns
    ///
    /// `None` for column combinations outside the supported set.
    pub fn format(&self) -> Option<TrackFormat> {
        TrackFormat::from_parts(self.ends.is_some(), self.values.is_some(), self.ids.is_some())
    }

    /// A zero-length collection with the same column presence and kinds
    pub fn empty_like(&self) -> TrackCollection {
        TrackCollection {
            starts: Vec::new(),
            ends: self.ends.as_ref().map(|_| Vec::new()),
            values: self.values.as_ref().map(ValueColumn::empty_like),
            strands: self.strands.as_ref().map(|_| Vec::new()),
            ids: self.ids.as_ref().map(|_| Vec::new()),
            edges: self.edges.as_ref().map(|_| Vec::new()),
            weights: self.weights.as_ref().map(|_| Vec::new()),
        }
    }

    /// A zero-length collection populated per a format descriptor
    ///
    /// Value columns default to numeric.
    pub fn empty_for(format: TrackFormat) -> TrackCollection {
        TrackCollection {
            starts: Vec::new(),
            ends: format.is_segmented().then(Vec::new),
            values: format.has_values().then(|| ValueColumn::Numeric(Vec::new())),
            strands: None,
            ids: format.has_links().then(Vec::new),
            edges: format.has_links().then(Vec::new),
            weights: None,
        }
    }

    /// View of one element's full data
    pub fn row(&self, idx: usize) -> ElementRow<'_> {
        ElementRow {
            collection: self,
            idx,
        }
    }

    /// Iterate all elements as row views
    pub fn rows(&self) -> impl Iterator<Item = ElementRow<'_>> {
        (0..self.len()).map(move |idx| self.row(idx))
    }
}

/// One element's full data, backed by index lookups into the columns
#[derive(Debug, Clone, Copy)]
pub struct ElementRow<'a> {
    collection: &'a TrackCollection,
    idx: usize,
}

impl<'a> ElementRow<'a> {
    pub fn index(&self) -> usize {
        self.idx
    }

    pub fn start(&self) -> u64 {
        self.collection.starts[self.idx]
    }

    /// Explicit end, or `start + 1` for point-shaped collections
    pub fn end(&self) -> u64 {
        self.collection.end_of(self.idx)
    }

    pub fn value(&self) -> Option<ValueEntry> {
        self.collection.values.as_ref().map(|v| v.get(self.idx))
    }

    pub fn strand(&self) -> Option<Strand> {
        self.collection.strands.as_ref().map(|s| s[self.idx])
    }

    pub fn id(&self) -> Option<&'a str> {
        self.collection.ids.as_ref().map(|ids| ids[self.idx].as_str())
    }

    pub fn edges(&self) -> Option<&'a [String]> {
        self.collection.edges.as_ref().map(|e| e[self.idx].as_slice())
    }

    pub fn weights(&self) -> Option<&'a [f64]> {
        self.collection.weights.as_ref().map(|w| w[self.idx].as_slice())
    }
}
