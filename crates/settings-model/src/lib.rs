//! Settings Model
//!
//! Typed descriptors for individual settings of an external configuration
//! store.
//!
//! # Overview
//!
//! - **Kind**: closed tag declaring how a setting's value is read
//! - **DescriptorFactory**: picks the [`Descriptor`] variant for a kind
//! - **ValueCache**: one cached value per descriptor, invalidated on write
//! - **safe_read**: contains store errors and panics as a [`Failure`]
//! - **Capabilities**: static verb lists exposed through [`verbs_for`]
//!
//! # Example
//!
//! ```rust,ignore
//! use settings_model::{DescriptorFactory, Kind};
//! use settings_tree::Identifier;
//!
//! let factory = DescriptorFactory::new(store);
//! let descriptor = factory.create(Identifier::new("Display_NightLight")?, Kind::Boolean);
//!
//! // Read failures come back as text, never as a panic or error past this point
//! println!("{}", settings_model::render(&descriptor.info().description()));
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod capability;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod kind;
pub mod safe;
pub mod store;
pub mod value;

// Re-exports
pub use cache::{CachePolicy, ValueCache};
pub use capability::{verbs_for, Capabilities, Command, CommandSet, Verb, VerbFn};
pub use descriptor::{
    ActionSetting, BooleanSetting, Descriptor, GenericSetting, ListSetting, RangeSetting,
    SettingInfo, ValueSetting,
};
pub use error::{BoxError, KindError, ModelError, ModelResult, StoreError};
pub use factory::DescriptorFactory;
pub use kind::{Flag, Kind, GENERIC_TAGS};
pub use safe::{innermost_message, render, safe_read, Failure};
pub use store::{SettingsStore, SharedStore};
pub use value::{SettingValue, Value};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for descriptor operations
    pub use crate::{
        CachePolicy, Descriptor, DescriptorFactory, Failure, Flag, Kind, SettingsStore,
        SharedStore, StoreError, Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
