#![forbid(unsafe_code)]

//! Persisted expansion state for tree nodes.
//!
//! The set only records what the user toggled. Expansion implied by an
//! active search lives in [`Visibility`](crate::filter::Visibility) and is
//! unioned in at query time, never merged back here.

use ahash::AHashSet;

/// Set of explicitly expanded node ids.
///
/// Collapsing a parent leaves its descendants' entries alone, so
/// re-expanding the parent restores the subtree exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    expanded: AHashSet<String>,
}

impl ExpansionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a list of ids.
    #[must_use]
    pub fn with_expanded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Flip membership of `id`. Returns the new state (`true` = expanded).
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_owned());
            true
        }
    }

    /// Mark `id` expanded. Returns `true` if it was collapsed before.
    pub fn expand(&mut self, id: &str) -> bool {
        self.expanded.insert(id.to_owned())
    }

    /// Mark `id` collapsed. Returns `true` if it was expanded before.
    pub fn collapse(&mut self, id: &str) -> bool {
        self.expanded.remove(id)
    }

    /// Whether `id` was explicitly expanded.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Effective expansion: explicit membership or forced by a search match.
    #[must_use]
    pub fn is_expanded(&self, id: &str, forced_expanded: &AHashSet<String>) -> bool {
        self.expanded.contains(id) || forced_expanded.contains(id)
    }

    /// Number of explicitly expanded ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether nothing is explicitly expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Iterate over explicitly expanded ids (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}
