//! Tree builder and compressed navigation tree
//!
//! [`TreeBuilder`] walks each identifier's cumulative prefixes, creating nodes
//! on demand. [`TreeBuilder::build`] then folds single-child chains bottom-up
//! and yields the immutable [`SettingsTree`].

use crate::error::TreeError;
use crate::identifier::{split_segments, DEFAULT_SEPARATOR};
use crate::node::{Children, OutlineEntry, TreeNode};
use indexmap::map::Values;
use indexmap::{IndexMap, IndexSet};

/// Incremental builder for [`SettingsTree`]
///
/// Insertion is single-writer: a parallel identifier source must funnel its
/// results through one builder.
#[derive(Debug)]
pub struct TreeBuilder<D> {
    separator: char,
    roots: Children<D>,
    identifiers: IndexSet<String>,
    skipped: Vec<TreeError>,
}

impl<D> TreeBuilder<D> {
    /// Create builder using the default `_` separator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create builder splitting identifiers on `separator`
    #[inline]
    #[must_use]
    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            roots: IndexMap::new(),
            identifiers: IndexSet::new(),
            skipped: Vec::new(),
        }
    }

    /// Separator in use
    #[inline]
    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Insert one identifier
    ///
    /// Returns `true` if the identifier is new, `false` for a duplicate. An
    /// identifier whose path already exists as a prefix of an earlier one
    /// creates no node but still counts as new.
    ///
    /// # Errors
    /// Returns [`TreeError::MalformedIdentifier`] for an empty identifier or
    /// one with an empty segment; the tree is left untouched.
    pub fn insert(&mut self, identifier: &str) -> Result<bool, TreeError> {
        let segments = split_segments(identifier, self.separator)?;

        let mut level = &mut self.roots;
        let mut key = String::with_capacity(identifier.len());
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                key.push(self.separator);
            }
            key.push_str(segment);
            let node = level
                .entry(key.clone())
                .or_insert_with(|| TreeNode::new(key.clone(), segment));
            level = node.children_mut();
        }

        let new = self.identifiers.insert(key);
        if !new {
            tracing::debug!(identifier, "identifier already present");
        }
        Ok(new)
    }

    /// Insert every identifier, recording malformed ones instead of failing
    pub fn extend<I, S>(&mut self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for identifier in identifiers {
            if let Err(err) = self.insert(identifier.as_ref()) {
                tracing::warn!(error = %err, "skipping identifier");
                self.skipped.push(err);
            }
        }
    }

    /// Compress and freeze the tree
    #[must_use]
    pub fn build(self) -> SettingsTree<D> {
        let Self {
            separator,
            mut roots,
            identifiers,
            skipped,
        } = self;

        let mut merged = 0;
        for root in roots.values_mut() {
            merged += root.compress(separator);
        }
        let roots: Children<D> = roots
            .into_values()
            .map(|root| (root.key().to_string(), root))
            .collect();

        let tree = SettingsTree {
            separator,
            roots,
            skipped,
        };
        tracing::debug!(
            inserted = identifiers.len(),
            merged,
            nodes = tree.len(),
            skipped = tree.skipped.len(),
            "built settings tree"
        );
        tree
    }
}

impl<D> Default for TreeBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a compressed tree from identifiers in one step
///
/// Malformed identifiers are skipped and reported by [`SettingsTree::skipped`].
pub fn build<D, I, S>(identifiers: I, separator: char) -> SettingsTree<D>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TreeBuilder::with_separator(separator);
    builder.extend(identifiers);
    builder.build()
}

/// Compressed navigation tree
///
/// The roots are never merged with each other: only chains below a top-level
/// node fold. Node attachments are filled lazily through
/// [`TreeNode::get_or_attach_with`].
#[derive(Debug)]
pub struct SettingsTree<D> {
    separator: char,
    roots: Children<D>,
    skipped: Vec<TreeError>,
}

impl<D> SettingsTree<D> {
    /// Separator the tree was built with
    #[inline]
    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Top-level nodes in first-insertion order
    #[inline]
    pub fn roots(&self) -> Values<'_, String, TreeNode<D>> {
        self.roots.values()
    }

    /// Number of top-level nodes
    #[inline]
    #[must_use]
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Total number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.values().map(TreeNode::subtree_len).sum()
    }

    /// Check if tree has no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Identifiers rejected during the build
    #[inline]
    #[must_use]
    pub fn skipped(&self) -> &[TreeError] {
        &self.skipped
    }

    /// Find node by key anywhere in the tree
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&TreeNode<D>> {
        if let Some(root) = self.roots.get(key) {
            return Some(root);
        }
        self.roots.values().find_map(|root| root.find(key))
    }

    /// All leaves in display order
    #[must_use]
    pub fn leaves(&self) -> Vec<&TreeNode<D>> {
        let mut out = Vec::new();
        for root in self.roots.values() {
            root.collect_leaves(&mut out);
        }
        out
    }

    /// Flattened depth-first view of the tree
    #[must_use]
    pub fn outline(&self) -> Vec<OutlineEntry> {
        let mut out = Vec::new();
        for root in self.roots.values() {
            root.collect_outline(0, &mut out);
        }
        out
    }

    /// Keys containing `pattern`, case-insensitively, in display order
    ///
    /// An empty pattern matches every node.
    #[must_use]
    pub fn filter(&self, pattern: &str) -> Vec<&str> {
        let needle = pattern.to_lowercase();
        self.outline_nodes()
            .into_iter()
            .filter(|node| node.key().to_lowercase().contains(&needle))
            .map(TreeNode::key)
            .collect()
    }

    fn outline_nodes(&self) -> Vec<&TreeNode<D>> {
        fn walk<'a, D>(node: &'a TreeNode<D>, out: &mut Vec<&'a TreeNode<D>>) {
            out.push(node);
            for child in node.children() {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        for root in self.roots.values() {
            walk(root, &mut out);
        }
        out
    }
}
