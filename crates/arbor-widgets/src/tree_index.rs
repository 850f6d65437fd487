#![forbid(unsafe_code)]

//! Flat, id-addressable index over a forest of hierarchical options.
//!
//! The option forest is walked once and every entry becomes a [`Node`] with
//! explicit parent/children/depth links. Filtering, expansion, and keyboard
//! navigation all work on this index rather than on the nested input.
//!
//! # Example
//!
//! ```
//! use arbor_widgets::tree_index::{HierarchicalOption, TreeIndex};
//!
//! let options = vec![
//!     HierarchicalOption::new("a", "Root 1").child(HierarchicalOption::new("a1", "Child 1")),
//!     HierarchicalOption::new("b", "Root 2"),
//! ];
//! let index = TreeIndex::build(&options);
//!
//! assert_eq!(index.roots(), ["a", "b"]);
//! assert_eq!(index.get("a1").and_then(|n| n.parent_id()), Some("a"));
//! assert_eq!(index.get("a1").map(|n| n.depth()), Some(1));
//! ```

use ahash::{AHashMap, AHashSet};

/// One entry of the externally supplied option tree.
///
/// Ids are expected to be unique across the whole forest. Duplicates are
/// tolerated: the last entry in depth-first order wins the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchicalOption {
    /// Identifier, unique across the whole forest.
    pub id: String,
    /// Display label, also the text the search filter matches against.
    pub label: String,
    /// Nested options. Empty for leaves.
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<HierarchicalOption>,
}

impl HierarchicalOption {
    /// Create a leaf option.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child option.
    #[must_use]
    pub fn child(mut self, option: HierarchicalOption) -> Self {
        self.children.push(option);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, children: Vec<HierarchicalOption>) -> Self {
        self.children = children;
        self
    }
}

/// A flattened option with explicit links to its relatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: String,
    label: String,
    label_lower: String,
    parent_id: Option<String>,
    depth: usize,
    child_ids: Vec<String>,
}

impl Node {
    /// Node id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lowercased label, precomputed for case-insensitive matching.
    #[must_use]
    pub(crate) fn label_lower(&self) -> &str {
        &self.label_lower
    }

    /// Id of the parent node, `None` for roots.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Distance from the root (roots are depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Ordered child ids.
    #[must_use]
    pub fn child_ids(&self) -> &[String] {
        &self.child_ids
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.child_ids.is_empty()
    }
}

/// Id-keyed lookup over an option forest plus the ordered root ids.
///
/// Built once per option forest and never mutated; a new forest means a new
/// index.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    nodes: AHashMap<String, Node>,
    roots: Vec<String>,
    preorder: Vec<String>,
}

impl TreeIndex {
    /// Flatten `options` into an index. O(n) in the total option count.
    ///
    /// The walk uses an explicit stack, so deep trees cannot overflow the
    /// call stack.
    #[must_use]
    pub fn build(options: &[HierarchicalOption]) -> Self {
        let mut nodes = AHashMap::with_capacity(options.len());
        let roots = options.iter().map(|o| o.id.clone()).collect();

        let mut stack: Vec<(&HierarchicalOption, Option<&str>, usize)> =
            options.iter().rev().map(|o| (o, None, 0)).collect();

        while let Some((option, parent, depth)) = stack.pop() {
            let node = Node {
                id: option.id.clone(),
                label: option.label.clone(),
                label_lower: option.label.to_lowercase(),
                parent_id: parent.map(str::to_owned),
                depth,
                child_ids: option.children.iter().map(|c| c.id.clone()).collect(),
            };
            nodes.insert(option.id.clone(), node);
            for child in option.children.iter().rev() {
                stack.push((child, Some(option.id.as_str()), depth + 1));
            }
        }

        let mut index = Self {
            nodes,
            roots,
            preorder: Vec::new(),
        };
        index.preorder = index.walk_preorder();
        index
    }

    /// Depth-first order of every node reachable from the roots.
    ///
    /// With duplicate ids the lookup map no longer mirrors the input shape,
    /// so each id is emitted at most once.
    fn walk_preorder(&self) -> Vec<String> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        let mut stack: Vec<&str> = self.roots.iter().rev().map(String::as_str).collect();

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            order.push(node.id.clone());
            stack.extend(node.child_ids.iter().rev().map(String::as_str));
        }
        order
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether `id` is present in the index.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Label for `id`, if indexed.
    #[must_use]
    pub fn label(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(Node::label)
    }

    /// Ordered root ids.
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Every reachable id in depth-first pre-order.
    #[must_use]
    pub fn preorder(&self) -> &[String] {
        &self.preorder
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every indexed id (unordered).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Ancestor ids of `id`, nearest first.
    ///
    /// Bounded by the node count so malformed (duplicate-id) input cannot
    /// loop forever.
    #[must_use]
    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id).and_then(Node::parent_id);
        while let Some(parent) = current {
            if out.len() >= self.nodes.len() {
                break;
            }
            out.push(parent);
            current = self.nodes.get(parent).and_then(Node::parent_id);
        }
        out
    }

    /// Root-to-node id chain, ending with `id` itself.
    ///
    /// Empty when `id` is not indexed.
    #[must_use]
    pub fn path(&self, id: &str) -> Vec<&str> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut path = self.ancestors(id);
        path.reverse();
        path.push(node.id());
        path
    }
}
