//! Descriptor factory
//!
//! Selects the descriptor variant for a declared kind. Construction performs
//! no store interaction and cannot fail; unrecognized tags degrade to the
//! generic variant.

use crate::cache::CachePolicy;
use crate::descriptor::{
    ActionSetting, BooleanSetting, Descriptor, GenericSetting, ListSetting, RangeSetting,
};
use crate::kind::Kind;
use crate::store::SharedStore;
use settings_tree::Identifier;

/// Builds descriptors bound to one store
#[derive(Clone)]
pub struct DescriptorFactory {
    store: SharedStore,
    policy: CachePolicy,
}

impl DescriptorFactory {
    /// Create factory with the default cache policy
    #[inline]
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self::with_policy(store, CachePolicy::default())
    }

    /// Create factory whose value descriptors use `policy`
    #[inline]
    #[must_use]
    pub fn with_policy(store: SharedStore, policy: CachePolicy) -> Self {
        Self { store, policy }
    }

    /// Cache policy handed to value descriptors
    #[inline]
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Construct the variant for `kind`
    #[must_use]
    pub fn create(&self, id: Identifier, kind: Kind) -> Descriptor {
        tracing::debug!(id = %id, kind = %kind, "materializing descriptor");
        let store = SharedStore::clone(&self.store);
        match kind {
            Kind::Boolean => Descriptor::Boolean(BooleanSetting::new(id, store, self.policy)),
            Kind::Range => Descriptor::Range(RangeSetting::new(id, store, self.policy)),
            Kind::List => Descriptor::List(ListSetting::new(id, store, self.policy)),
            Kind::Action => Descriptor::Action(ActionSetting::new(id, store)),
            Kind::Generic => Descriptor::Generic(GenericSetting::new(id, store)),
        }
    }

    /// Construct from a raw store tag; unsupported tags yield the generic variant
    #[must_use]
    pub fn create_from_tag(&self, id: Identifier, tag: &str) -> Descriptor {
        let kind = Kind::from_tag(tag).unwrap_or_else(|err| {
            tracing::debug!(id = %id, error = %err, "falling back to generic descriptor");
            Kind::Generic
        });
        self.create(id, kind)
    }
}

impl std::fmt::Debug for DescriptorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorFactory")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
