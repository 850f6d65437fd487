#![forbid(unsafe_code)]

//! Search filtering over a [`TreeIndex`].
//!
//! A node is visible when its label contains the query (case-insensitive)
//! or when at least one of its descendants is visible. Ancestors kept only
//! for a descendant's sake are reported as forced-expanded so the match is
//! reachable without touching the persisted expansion set.

use crate::tree_index::TreeIndex;
use ahash::AHashSet;

/// Result of filtering an index against a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    visible: AHashSet<String>,
    forced_expanded: AHashSet<String>,
    direct_matches: usize,
}

impl Visibility {
    /// Ids that should be rendered.
    #[must_use]
    pub fn visible_ids(&self) -> &AHashSet<String> {
        &self.visible
    }

    /// Ids expanded implicitly because a descendant matches.
    #[must_use]
    pub fn forced_expanded_ids(&self) -> &AHashSet<String> {
        &self.forced_expanded
    }

    /// Whether `id` survived the filter.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    /// Whether `id` is expanded because of a matching descendant.
    #[must_use]
    pub fn is_forced_expanded(&self, id: &str) -> bool {
        self.forced_expanded.contains(id)
    }

    /// Number of nodes whose own label matched.
    #[must_use]
    pub fn direct_match_count(&self) -> usize {
        self.direct_matches
    }

    /// Whether nothing survived the filter (renders the empty-results message).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Compute the visible subset of `index` for `query`.
///
/// An empty query makes every id visible with nothing forced open. The
/// traversal walks the pre-order list backwards, which visits every node
/// after all of its descendants, so no recursion is needed.
#[must_use]
pub fn compute_visibility(index: &TreeIndex, query: &str) -> Visibility {
    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!(
        "tree_select.filter",
        query_len = query.len(),
        total_nodes = index.len(),
        visible_nodes = tracing::field::Empty,
        forced_expanded = tracing::field::Empty,
    );
    #[cfg(feature = "tracing")]
    let _guard = span.enter();

    let visibility = if query.is_empty() {
        Visibility {
            visible: index.ids().map(str::to_owned).collect(),
            forced_expanded: AHashSet::new(),
            direct_matches: index.len(),
        }
    } else {
        filter_postorder(index, &query.to_lowercase())
    };

    #[cfg(feature = "tracing")]
    {
        span.record("visible_nodes", visibility.visible.len());
        span.record("forced_expanded", visibility.forced_expanded.len());
    }

    visibility
}

fn filter_postorder(index: &TreeIndex, query_lower: &str) -> Visibility {
    let mut visible = AHashSet::new();
    let mut forced_expanded = AHashSet::new();
    let mut direct_matches = 0;

    for id in index.preorder().iter().rev() {
        let Some(node) = index.get(id) else {
            continue;
        };
        let direct = node.label_lower().contains(query_lower);
        let has_visible_child = node.child_ids().iter().any(|c| visible.contains(c));

        if direct {
            direct_matches += 1;
        }
        if direct || has_visible_child {
            visible.insert(id.clone());
        }
        if !direct && has_visible_child {
            forced_expanded.insert(id.clone());
        }
    }

    Visibility {
        visible,
        forced_expanded,
        direct_matches,
    }
}
