//! Track format descriptor
//!
//! The format of a collection is the closed enumeration of which optional
//! columns it carries and whether its elements are point- or segment-shaped.
//! Binary operations decide their output format by joining the two input
//! formats, and lift the narrower side through [`coerce_collection`].
//!
//! Strand presence is orthogonal to the format and tracked separately.

use crate::core::collection::TrackCollection;
use crate::core::error::{Result, TrackOpError};

/// The declared shape of a collection
///
/// Partitions (segment variants with gap-filling semantics) are a declared
/// extension point and not part of the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackFormat {
    Points,
    ValuedPoints,
    LinkedPoints,
    LinkedValuedPoints,
    Segments,
    ValuedSegments,
}

impl TrackFormat {
    /// Derive a format from column presence
    ///
    /// Returns `None` for combinations outside the supported set
    /// (linked segments).
    pub fn from_parts(segmented: bool, valued: bool, linked: bool) -> Option<Self> {
        match (segmented, valued, linked) {
            (false, false, false) => Some(TrackFormat::Points),
            (false, true, false) => Some(TrackFormat::ValuedPoints),
            (false, false, true) => Some(TrackFormat::LinkedPoints),
            (false, true, true) => Some(TrackFormat::LinkedValuedPoints),
            (true, false, false) => Some(TrackFormat::Segments),
            (true, true, false) => Some(TrackFormat::ValuedSegments),
            (true, _, true) => None,
        }
    }

    /// Whether elements carry an explicit end coordinate
    pub fn is_segmented(&self) -> bool {
        matches!(self, TrackFormat::Segments | TrackFormat::ValuedSegments)
    }

    /// Whether elements carry a value
    pub fn has_values(&self) -> bool {
        matches!(
            self,
            TrackFormat::ValuedPoints
                | TrackFormat::LinkedValuedPoints
                | TrackFormat::ValuedSegments
        )
    }

    /// Whether elements carry ids and link edges
    pub fn has_links(&self) -> bool {
        matches!(
            self,
            TrackFormat::LinkedPoints | TrackFormat::LinkedValuedPoints
        )
    }

    /// Human-readable format name
    pub fn name(&self) -> &'static str {
        match self {
            TrackFormat::Points => "Points",
            TrackFormat::ValuedPoints => "Valued points",
            TrackFormat::LinkedPoints => "Linked points",
            TrackFormat::LinkedValuedPoints => "Linked valued points",
            TrackFormat::Segments => "Segments",
            TrackFormat::ValuedSegments => "Valued segments",
        }
    }

    /// The columns a collection of this format must populate
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TrackFormat::Points => &["starts"],
            TrackFormat::ValuedPoints => &["starts", "values"],
            TrackFormat::LinkedPoints => &["starts", "ids", "edges"],
            TrackFormat::LinkedValuedPoints => &["starts", "values", "ids", "edges"],
            TrackFormat::Segments => &["starts", "ends"],
            TrackFormat::ValuedSegments => &["starts", "ends", "values"],
        }
    }

    /// Join of two formats: the output format of a binary operation
    ///
    /// The result is segment-shaped if either input is, and carries values
    /// or links only when both inputs do (a value or id column cannot be
    /// synthesized for a side that lacks it).
    pub fn widen(a: TrackFormat, b: TrackFormat) -> TrackFormat {
        let segmented = a.is_segmented() || b.is_segmented();
        let valued = a.has_values() && b.has_values();
        // Linked inputs are point-shaped in the supported set, so a linked
        // join is never segment-shaped.
        let linked = a.has_links() && b.has_links();
        match (segmented, valued, linked) {
            (false, false, false) => TrackFormat::Points,
            (false, true, false) => TrackFormat::ValuedPoints,
            (false, false, true) => TrackFormat::LinkedPoints,
            (false, true, true) => TrackFormat::LinkedValuedPoints,
            (true, false, _) => TrackFormat::Segments,
            (true, true, _) => TrackFormat::ValuedSegments,
        }
    }
}

impl std::fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lift a collection from one format to another without mutating the source
///
/// Manufactures `ends = starts + 1` when widening points to segment shape
/// and drops aux columns absent from the target. Strand columns ride along
/// untouched. Fails with [`TrackOpError::IncompatibleFormat`] when the
/// target requires a column the source cannot supply; this is unreachable
/// for joins of the six supported formats.
pub fn coerce_collection(
    collection: &TrackCollection,
    from: TrackFormat,
    to: TrackFormat,
) -> Result<TrackCollection> {
    let incompatible = || TrackOpError::IncompatibleFormat { from, to };

    if (to.has_values() && !from.has_values())
        || (to.has_links() && !from.has_links())
        || (!to.is_segmented() && from.is_segmented())
    {
        return Err(incompatible());
    }

    let mut out = if to.is_segmented() {
        let ends = match collection.ends() {
            Some(ends) => ends.to_vec(),
            None => collection.starts().iter().map(|s| s + 1).collect(),
        };
        TrackCollection::segments(collection.starts().to_vec(), ends)?
    } else {
        TrackCollection::points(collection.starts().to_vec())
    };

    if to.has_values() {
        if let Some(values) = collection.values() {
            out = out.with_values(values.clone())?;
        }
    }
    if to.has_links() {
        if let (Some(ids), Some(edges)) = (collection.ids(), collection.edges()) {
            out = out.with_links(ids.to_vec(), edges.to_vec())?;
            if let Some(weights) = collection.weights() {
                out = out.with_weights(weights.to_vec())?;
            }
        }
    }
    if let Some(strands) = collection.strands() {
        out = out.with_strands(strands.to_vec())?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_same_format_is_identity() {
        for f in [
            TrackFormat::Points,
            TrackFormat::ValuedPoints,
            TrackFormat::LinkedPoints,
            TrackFormat::LinkedValuedPoints,
            TrackFormat::Segments,
            TrackFormat::ValuedSegments,
        ] {
            assert_eq!(TrackFormat::widen(f, f), f);
        }
    }

    #[test]
    fn test_widen_points_with_segments() {
        assert_eq!(
            TrackFormat::widen(TrackFormat::Points, TrackFormat::Segments),
            TrackFormat::Segments
        );
        assert_eq!(
            TrackFormat::widen(TrackFormat::Segments, TrackFormat::Points),
            TrackFormat::Segments
        );
    }

    #[test]
    fn test_widen_drops_one_sided_aux() {
        assert_eq!(
            TrackFormat::widen(TrackFormat::ValuedPoints, TrackFormat::Segments),
            TrackFormat::Segments
        );
        assert_eq!(
            TrackFormat::widen(TrackFormat::LinkedPoints, TrackFormat::Points),
            TrackFormat::Points
        );
    }

    #[test]
    fn test_widen_is_commutative() {
        let all = [
            TrackFormat::Points,
            TrackFormat::ValuedPoints,
            TrackFormat::LinkedPoints,
            TrackFormat::LinkedValuedPoints,
            TrackFormat::Segments,
            TrackFormat::ValuedSegments,
        ];
        for a in all {
            for b in all {
                assert_eq!(TrackFormat::widen(a, b), TrackFormat::widen(b, a));
            }
        }
    }

    #[test]
    fn test_from_parts_rejects_linked_segments() {
        assert_eq!(TrackFormat::from_parts(true, false, true), None);
        assert_eq!(TrackFormat::from_parts(true, true, true), None);
    }

    #[test]
    fn test_coerce_points_to_segments() {
        let points = TrackCollection::points(vec![2, 5]);
        let out = coerce_collection(&points, TrackFormat::Points, TrackFormat::Segments).unwrap();
        assert_eq!(out.starts(), &[2, 5]);
        assert_eq!(out.ends(), Some(&[3, 6][..]));
    }

    #[test]
    fn test_coerce_narrowing_shape_fails() {
        let segments = TrackCollection::segments(vec![2], vec![4]).unwrap();
        let err = coerce_collection(&segments, TrackFormat::Segments, TrackFormat::Points);
        assert!(matches!(
            err,
            Err(TrackOpError::IncompatibleFormat { .. })
        ));
    }
}
