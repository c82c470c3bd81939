//! Tree nodes
//!
//! Provides [`TreeNode`], one cumulative path prefix in the navigation tree,
//! with a lazily filled attachment slot.

use indexmap::map::Values;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;

/// Ordered children of a node, keyed by each child's key
pub(crate) type Children<D> = IndexMap<String, TreeNode<D>>;

/// One node of the navigation tree
///
/// `key` is the cumulative prefix that makes the node unique in the tree;
/// `label` is the display text, which after compression may span several
/// segments. The attachment slot (a descriptor, for the explorer) stays empty
/// until first navigation and is then reused.
#[derive(Debug)]
pub struct TreeNode<D> {
    key: String,
    label: String,
    children: Children<D>,
    attachment: OnceCell<D>,
}

impl<D> TreeNode<D> {
    pub(crate) fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            children: IndexMap::new(),
            attachment: OnceCell::new(),
        }
    }

    /// Cumulative prefix identifying this node
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display text
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Child nodes in first-insertion order
    #[inline]
    pub fn children(&self) -> Values<'_, String, TreeNode<D>> {
        self.children.values()
    }

    /// Number of direct children
    #[inline]
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Look up a direct child by key
    #[inline]
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&TreeNode<D>> {
        self.children.get(key)
    }

    /// A node without children
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Attached value, if navigation already materialized one
    #[inline]
    #[must_use]
    pub fn attachment(&self) -> Option<&D> {
        self.attachment.get()
    }

    /// Whether the attachment slot is filled
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.get().is_some()
    }

    /// Return the attachment, creating it with `f` on first call
    pub fn get_or_attach_with<F>(&self, f: F) -> &D
    where
        F: FnOnce() -> D,
    {
        self.attachment.get_or_init(f)
    }

    /// Depth-first lookup of `key` in this subtree
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&TreeNode<D>> {
        if self.key == key {
            return Some(self);
        }
        if let Some(child) = self.children.get(key) {
            return Some(child);
        }
        self.children.values().find_map(|child| child.find(key))
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children<D> {
        &mut self.children
    }

    /// Count nodes in this subtree, self included
    pub(crate) fn subtree_len(&self) -> usize {
        1 + self.children.values().map(TreeNode::subtree_len).sum::<usize>()
    }

    /// Fold single-child chains, children first
    ///
    /// Returns the number of nodes absorbed in this subtree.
    pub(crate) fn compress(&mut self, joiner: char) -> usize {
        let mut merged = 0;
        let mut rekey = false;
        for child in self.children.values_mut() {
            let absorbed = child.compress(joiner);
            rekey |= absorbed > 0;
            merged += absorbed;
        }
        if rekey {
            self.children = std::mem::take(&mut self.children)
                .into_values()
                .map(|child| (child.key.clone(), child))
                .collect();
        }

        if self.children.len() == 1 {
            if let Some((_, child)) = self.children.pop() {
                self.absorb(child, joiner);
                merged += 1;
            }
        }
        merged
    }

    fn absorb(&mut self, child: TreeNode<D>, joiner: char) {
        let TreeNode {
            key,
            label,
            children,
            ..
        } = child;
        tracing::trace!(parent = %self.key, child = %key, "folding single-child node");
        self.label.push(joiner);
        self.label.push_str(&label);
        self.key = key;
        self.children = children;
    }

    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a TreeNode<D>>) {
        if self.is_leaf() {
            out.push(self);
        }
        for child in self.children.values() {
            child.collect_leaves(out);
        }
    }

    pub(crate) fn collect_outline(&self, depth: usize, out: &mut Vec<OutlineEntry>) {
        out.push(OutlineEntry {
            depth,
            key: self.key.clone(),
            label: self.label.clone(),
            leaf: self.is_leaf(),
            attached: self.is_attached(),
        });
        for child in self.children.values() {
            child.collect_outline(depth + 1, out);
        }
    }
}

/// Flattened view of one node, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// Nesting depth, zero for top-level nodes
    pub depth: usize,
    /// Node key
    pub key: String,
    /// Node label
    pub label: String,
    /// Whether the node has no children
    pub leaf: bool,
    /// Whether the node carries an attachment
    pub attached: bool,
}
