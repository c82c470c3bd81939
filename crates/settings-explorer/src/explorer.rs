//! Navigation context
//!
//! [`Explorer`] owns the compressed tree, the identifier catalog and the
//! descriptor factory. Descriptors are materialized the first time their node
//! is selected and reused afterwards.

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};
use crate::sheet::PropertySheet;
use crate::source::{discover, IdentifierSource};
use indexmap::IndexMap;
use settings_model::{Descriptor, DescriptorFactory, Kind, SharedStore, Value};
use settings_tree::{Identifier, SettingsTree, TreeBuilder, TreeNode};

/// One navigation session over a settings store
#[derive(Debug)]
pub struct Explorer {
    config: ExplorerConfig,
    catalog: IndexMap<Identifier, Kind>,
    tree: SettingsTree<Descriptor>,
    factory: DescriptorFactory,
}

impl Explorer {
    /// Enumerate `source` and build the navigation tree
    ///
    /// Entries with unparseable kinds are skipped. Malformed identifiers are
    /// left out of the tree and reported by [`SettingsTree::skipped`].
    ///
    /// # Errors
    /// Returns [`ExplorerError::Store`] when the source cannot be enumerated
    pub fn load(
        source: &dyn IdentifierSource,
        store: SharedStore,
        config: ExplorerConfig,
    ) -> ExplorerResult<Self> {
        let mut catalog = discover(source, config.skip_generic)?;

        let mut builder = TreeBuilder::with_separator(config.separator);
        builder.extend(catalog.keys().map(Identifier::as_str));
        let tree = builder.build();
        catalog.retain(|id, _| tree.find(id.as_str()).is_some());

        tracing::info!(
            settings = catalog.len(),
            nodes = tree.len(),
            roots = tree.root_count(),
            "settings tree built"
        );

        Ok(Self {
            factory: DescriptorFactory::with_policy(store, config.cache_policy),
            config,
            catalog,
            tree,
        })
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Navigation tree
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &SettingsTree<Descriptor> {
        &self.tree
    }

    /// Selectable identifiers with their kinds, in source order
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &IndexMap<Identifier, Kind> {
        &self.catalog
    }

    /// Kind of a catalogued identifier
    #[must_use]
    pub fn kind_of(&self, key: &str) -> Option<Kind> {
        self.catalog.get(key).copied()
    }

    /// Select a node, materializing its descriptor on first selection
    ///
    /// Returns `None` for grouping nodes that are not settings themselves.
    ///
    /// # Errors
    /// Returns [`ExplorerError::NodeNotFound`] for unknown keys
    pub fn select(&self, key: &str) -> ExplorerResult<Option<&Descriptor>> {
        let node = self.node(key)?;
        Ok(self.attach(node))
    }

    /// Descriptor of a setting node
    ///
    /// # Errors
    /// Returns [`ExplorerError::NodeNotFound`] or [`ExplorerError::NotASetting`]
    pub fn descriptor(&self, key: &str) -> ExplorerResult<&Descriptor> {
        self.select(key)?
            .ok_or_else(|| ExplorerError::NotASetting(key.to_string()))
    }

    /// Failure-safe snapshot of a setting's properties and verbs
    ///
    /// # Errors
    /// Returns [`ExplorerError::NodeNotFound`] or [`ExplorerError::NotASetting`]
    pub fn properties(&self, key: &str) -> ExplorerResult<PropertySheet> {
        Ok(PropertySheet::read(self.descriptor(key)?))
    }

    /// Parse `text` for the setting's kind and write it
    ///
    /// # Errors
    /// - [`ExplorerError::NodeNotFound`] / [`ExplorerError::NotASetting`]
    /// - [`ExplorerError::Model`] when the text does not parse or the store
    ///   rejects the write
    pub fn set_value(&self, key: &str, text: &str) -> ExplorerResult<()> {
        let descriptor = self.descriptor(key)?;
        let value = Value::parse_for(descriptor.kind(), key, text)?;
        tracing::info!(id = key, value = %value, "setting value");
        descriptor.set_value(value)?;
        Ok(())
    }

    /// Run a named verb of a setting
    ///
    /// # Errors
    /// - [`ExplorerError::NodeNotFound`] / [`ExplorerError::NotASetting`]
    /// - [`ExplorerError::Model`] for unknown verbs or failed invocations
    pub fn invoke(&self, key: &str, verb: &str) -> ExplorerResult<()> {
        let descriptor = self.descriptor(key)?;
        descriptor.verbs().invoke(verb)?;
        Ok(())
    }

    /// Node keys containing `pattern`, case-insensitively
    #[must_use]
    pub fn filter(&self, pattern: &str) -> Vec<&str> {
        self.tree.filter(pattern)
    }

    fn node(&self, key: &str) -> ExplorerResult<&TreeNode<Descriptor>> {
        self.tree
            .find(key)
            .ok_or_else(|| ExplorerError::NodeNotFound(key.to_string()))
    }

    fn attach<'a>(&'a self, node: &'a TreeNode<Descriptor>) -> Option<&'a Descriptor> {
        if let Some(descriptor) = node.attachment() {
            return Some(descriptor);
        }
        let (id, kind) = self.catalog.get_key_value(node.key())?;
        Some(node.get_or_attach_with(|| {
            tracing::debug!(id = %id, kind = %kind, "materializing descriptor");
            self.factory.create(id.clone(), *kind)
        }))
    }
}
