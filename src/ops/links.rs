//! Link-graph maintenance across a union
//!
//! Two passes keep the directed id→edge relation consistent when linked
//! elements collapse: an optional uniqueness pre-pass that tags every id
//! with its input track before the sweep, and a rewrite pass that maps
//! every surviving edge reference to its final id once the sweep has
//! decided which elements merged.

use std::collections::HashMap;

/// Default uniqueness tag for the first input track
pub const TRACK_A_TAG: &str = "track-1";
/// Default uniqueness tag for the second input track
pub const TRACK_B_TAG: &str = "track-2";

/// Tag every id and edge reference of one track with a `-<tag>` suffix
///
/// Run before the sweep: the sweep's contributing-set computation is
/// shape-only, so two tracks that happen to share an id would otherwise
/// be mistaken for the same node.
pub fn tag_links(ids: &[String], edges: &[Vec<String>], tag: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let tagged_ids = ids.iter().map(|id| format!("{}-{}", id, tag)).collect();
    let tagged_edges = edges
        .iter()
        .map(|refs| refs.iter().map(|r| format!("{}-{}", r, tag)).collect())
        .collect();
    (tagged_ids, tagged_edges)
}

/// Rename map from original (or tagged) ids to final ids
///
/// Scoped to one chromosome's union invocation so that chromosome-level
/// work stays independent. Merge tokens `merge-<N>` are minted in the
/// sweep's left-to-right emission order.
#[derive(Debug, Default)]
pub struct LinkRewriteContext {
    rename: HashMap<String, String>,
    next_merge_id: usize,
}

impl LinkRewriteContext {
    pub fn new() -> Self {
        LinkRewriteContext {
            rename: HashMap::new(),
            next_merge_id: 1,
        }
    }

    /// Record an element that did not participate in any merge
    pub fn keep(&mut self, id: &str) {
        self.rename.insert(id.to_owned(), id.to_owned());
    }

    /// Mint a fresh merge id for a group and map every member id to it
    pub fn merge<'a, I: IntoIterator<Item = &'a str>>(&mut self, member_ids: I) -> String {
        let token = format!("merge-{}", self.next_merge_id);
        self.next_merge_id += 1;
        for id in member_ids {
            self.rename.insert(id.to_owned(), token.clone());
        }
        token
    }

    /// Rewrite one element's edge list through the completed rename map
    ///
    /// `weights` stays aligned with `edges`: when a reference to an id
    /// that no longer exists is dropped, its weight is dropped with it.
    /// The dropped reference is reported, not raised.
    pub fn rewrite(&self, edges: &[String], weights: Option<&[f64]>) -> (Vec<String>, Vec<f64>) {
        let mut out_edges = Vec::with_capacity(edges.len());
        let mut out_weights = Vec::with_capacity(edges.len());
        for (pos, reference) in edges.iter().enumerate() {
            match self.rename.get(reference) {
                Some(final_id) => {
                    out_edges.push(final_id.clone());
                    if let Some(weights) = weights {
                        out_weights.push(weights[pos]);
                    }
                }
                None => {
                    log::warn!("dropping dangling edge reference '{}'", reference);
                }
            }
        }
        (out_edges, out_weights)
    }
}
