//! Raw merge algorithms
//!
//! Pure functions over aligned `(starts, ends)` column pairs for one
//! chromosome. They know nothing about aux columns; instead they return an
//! index map back to the source elements so the operators can assemble
//! values, strands and links afterwards.

use rust_lapper::{Interval, Lapper};

/// Which input track an element came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTrack {
    A,
    B,
}

/// Reference back to one source element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRef {
    pub track: SourceTrack,
    pub idx: usize,
}

/// Output of the union sweep
///
/// `groups[i]` lists the source elements that contributed to output
/// element `i`, in A-before-B order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionSweep {
    pub starts: Vec<u64>,
    pub ends: Vec<u64>,
    pub groups: Vec<Vec<SourceRef>>,
}

/// Sweep-line union merge of two column sets
///
/// Elements are stable-sorted by `(start, end)` with ties broken A before
/// B, then by original index; the ordering is observable through merge-id
/// assignment and must stay deterministic.
///
/// With `result_allow_overlap` unset, an incoming element merges into the
/// open interval iff it strictly overlaps it (`start < cur_end`); elements
/// that only touch close the interval and open a new one. With it set, no
/// merging occurs and every input element is emitted on its own, still in
/// sorted order.
pub fn union_sweep(
    a_starts: &[u64],
    a_ends: &[u64],
    b_starts: &[u64],
    b_ends: &[u64],
    result_allow_overlap: bool,
) -> UnionSweep {
    let mut elements: Vec<(u64, u64, SourceRef)> =
        Vec::with_capacity(a_starts.len() + b_starts.len());
    for i in 0..a_starts.len() {
        elements.push((
            a_starts[i],
            a_ends[i],
            SourceRef {
                track: SourceTrack::A,
                idx: i,
            },
        ));
    }
    for j in 0..b_starts.len() {
        elements.push((
            b_starts[j],
            b_ends[j],
            SourceRef {
                track: SourceTrack::B,
                idx: j,
            },
        ));
    }
    // Stable sort keeps A before B and preserves original index order on
    // (start, end) ties.
    elements.sort_by_key(|&(start, end, _)| (start, end));

    let mut out = UnionSweep::default();

    if result_allow_overlap {
        for (start, end, source) in elements {
            out.starts.push(start);
            out.ends.push(end);
            out.groups.push(vec![source]);
        }
        return out;
    }

    let mut current: Option<(u64, u64, Vec<SourceRef>)> = None;
    for (start, end, source) in elements {
        match current.as_mut() {
            Some((_, cur_end, group)) if start < *cur_end => {
                *cur_end = (*cur_end).max(end);
                group.push(source);
            }
            _ => {
                if let Some((cur_start, cur_end, group)) = current.take() {
                    out.starts.push(cur_start);
                    out.ends.push(cur_end);
                    out.groups.push(group);
                }
                current = Some((start, end, vec![source]));
            }
        }
    }
    if let Some((cur_start, cur_end, group)) = current {
        out.starts.push(cur_start);
        out.ends.push(cur_end);
        out.groups.push(group);
    }

    out
}

/// Output of an intersection merge
///
/// `source_idx[i]` is the element of track A that output element `i`
/// carries its aux data from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectSweep {
    pub starts: Vec<u64>,
    pub ends: Vec<u64>,
    pub source_idx: Vec<usize>,
}

/// Two-pointer intersection of two overlap-free column sets
///
/// At each step the candidate cut is `[max(starts), min(ends))`; it is
/// emitted when non-empty, then the pointer with the smaller end advances
/// (both on equal ends). O(|A| + |B|) per chromosome.
pub fn intersect_two_pointer(
    a_starts: &[u64],
    a_ends: &[u64],
    b_starts: &[u64],
    b_ends: &[u64],
) -> IntersectSweep {
    let mut a_order: Vec<usize> = (0..a_starts.len()).collect();
    a_order.sort_by_key(|&i| (a_starts[i], a_ends[i]));
    let mut b_order: Vec<usize> = (0..b_starts.len()).collect();
    b_order.sort_by_key(|&j| (b_starts[j], b_ends[j]));

    let mut out = IntersectSweep::default();
    let (mut i, mut j) = (0, 0);
    while i < a_order.len() && j < b_order.len() {
        let ai = a_order[i];
        let bj = b_order[j];
        let lo = a_starts[ai].max(b_starts[bj]);
        let hi = a_ends[ai].min(b_ends[bj]);
        if lo < hi {
            out.starts.push(lo);
            out.ends.push(hi);
            out.source_idx.push(ai);
        }
        if a_ends[ai] < b_ends[bj] {
            i += 1;
        } else if b_ends[bj] < a_ends[ai] {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }

    out
}

/// Indexed intersection for inputs that may overlap internally
///
/// The escape hatch for tracks declaring `allow_overlap`: builds an
/// interval index over B and queries it per element of A, enumerating
/// every overlapping pair. Correct for overlapping inputs, but not the
/// performance-relevant path.
pub fn intersect_indexed(
    a_starts: &[u64],
    a_ends: &[u64],
    b_starts: &[u64],
    b_ends: &[u64],
) -> IntersectSweep {
    let intervals: Vec<Interval<u64, usize>> = (0..b_starts.len())
        // Zero-length segments cannot strictly overlap anything.
        .filter(|&j| b_starts[j] < b_ends[j])
        .map(|j| Interval {
            start: b_starts[j],
            stop: b_ends[j],
            val: j,
        })
        .collect();
    let lapper = Lapper::new(intervals);

    let mut a_order: Vec<usize> = (0..a_starts.len()).collect();
    a_order.sort_by_key(|&i| (a_starts[i], a_ends[i]));

    let mut out = IntersectSweep::default();
    for &ai in &a_order {
        if a_starts[ai] >= a_ends[ai] {
            continue;
        }
        let mut cuts: Vec<(u64, u64)> = lapper
            .find(a_starts[ai], a_ends[ai])
            .map(|iv| (a_starts[ai].max(iv.start), a_ends[ai].min(iv.stop)))
            .filter(|&(lo, hi)| lo < hi)
            .collect();
        cuts.sort_unstable();
        for (lo, hi) in cuts {
            out.starts.push(lo);
            out.ends.push(hi);
            out.source_idx.push(ai);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_disjoint() {
        let out = union_sweep(&[2], &[4], &[5], &[8], false);
        assert_eq!(out.starts, vec![2, 5]);
        assert_eq!(out.ends, vec![4, 8]);
        assert!(out.groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_union_partial_overlap_merges() {
        let out = union_sweep(&[2], &[4], &[3], &[5], false);
        assert_eq!(out.starts, vec![2]);
        assert_eq!(out.ends, vec![5]);
        assert_eq!(out.groups[0].len(), 2);
    }

    #[test]
    fn test_union_touching_does_not_merge() {
        let out = union_sweep(&[2], &[4], &[4], &[6], false);
        assert_eq!(out.starts, vec![2, 4]);
        assert_eq!(out.ends, vec![4, 6]);
    }

    #[test]
    fn test_union_bridge_joins_three() {
        // B joins two segments in A
        let out = union_sweep(&[2, 6], &[4, 8], &[3], &[7], false);
        assert_eq!(out.starts, vec![2]);
        assert_eq!(out.ends, vec![8]);
        assert_eq!(out.groups[0].len(), 3);
    }

    #[test]
    fn test_union_tie_break_a_before_b() {
        let out = union_sweep(&[14], &[15], &[14], &[15], true);
        assert_eq!(out.starts, vec![14, 14]);
        assert_eq!(out.groups[0], vec![SourceRef { track: SourceTrack::A, idx: 0 }]);
        assert_eq!(out.groups[1], vec![SourceRef { track: SourceTrack::B, idx: 0 }]);
    }

    #[test]
    fn test_union_allow_overlap_keeps_everything_sorted() {
        let out = union_sweep(&[14, 463], &[15, 464], &[45, 463], &[46, 464], true);
        assert_eq!(out.starts, vec![14, 45, 463, 463]);
        assert_eq!(out.groups[2][0].track, SourceTrack::A);
        assert_eq!(out.groups[3][0].track, SourceTrack::B);
    }

    #[test]
    fn test_union_unsorted_input_is_sorted() {
        let out = union_sweep(&[10, 1], &[11, 2], &[], &[], false);
        assert_eq!(out.starts, vec![1, 10]);
    }

    #[test]
    fn test_union_both_empty() {
        let out = union_sweep(&[], &[], &[], &[], false);
        assert!(out.starts.is_empty());
        assert!(out.groups.is_empty());
    }

    #[test]
    fn test_intersect_disjoint() {
        let out = intersect_two_pointer(&[2], &[4], &[5], &[8]);
        assert!(out.starts.is_empty());
    }

    #[test]
    fn test_intersect_partial() {
        let out = intersect_two_pointer(&[2], &[6], &[4], &[8]);
        assert_eq!(out.starts, vec![4]);
        assert_eq!(out.ends, vec![6]);
        assert_eq!(out.source_idx, vec![0]);
    }

    #[test]
    fn test_intersect_one_b_spans_two_a() {
        let out = intersect_two_pointer(&[2, 6], &[4, 10], &[3], &[8]);
        assert_eq!(out.starts, vec![3, 6]);
        assert_eq!(out.ends, vec![4, 8]);
        assert_eq!(out.source_idx, vec![0, 1]);
    }

    #[test]
    fn test_intersect_touching_is_empty() {
        let out = intersect_two_pointer(&[2], &[4], &[4], &[6]);
        assert!(out.starts.is_empty());
    }

    #[test]
    fn test_indexed_matches_two_pointer_on_overlap_free_input() {
        let a = (vec![2u64, 6, 20], vec![4u64, 10, 30]);
        let b = (vec![3u64, 25], vec![8u64, 40]);
        let fast = intersect_two_pointer(&a.0, &a.1, &b.0, &b.1);
        let slow = intersect_indexed(&a.0, &a.1, &b.0, &b.1);
        assert_eq!(fast, slow);
    }

    #[test]
    fn test_indexed_handles_overlapping_b() {
        // B overlaps itself; each pair is enumerated.
        let out = intersect_indexed(&[2], &[10], &[3, 4], &[6, 8]);
        assert_eq!(out.starts, vec![3, 4]);
        assert_eq!(out.ends, vec![6, 8]);
        assert_eq!(out.source_idx, vec![0, 0]);
    }
}
