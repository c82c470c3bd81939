//! Settings Explorer
//!
//! Navigation context over a settings store: discovers identifiers, builds
//! the compressed tree, materializes descriptors on selection and renders
//! failure-safe property sheets.
//!
//! # Example
//!
//! ```rust,no_run
//! use settings_explorer::{catalog, Explorer, ExplorerConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(catalog::load_store("demos/catalog.toml")?);
//! let explorer = Explorer::load(store.as_ref(), store.clone(), ExplorerConfig::default())?;
//!
//! for entry in explorer.tree().outline() {
//!     println!("{}{}", "  ".repeat(entry.depth), entry.label);
//! }
//! println!("{}", explorer.properties("SystemSettings_Display_Brightness")?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod explorer;
pub mod memory;
pub mod sheet;
pub mod source;

// Re-exports
pub use catalog::{load_document, load_store, CatalogFormat};
pub use config::ExplorerConfig;
pub use error::{CatalogError, ConfigError, ExplorerError, ExplorerResult};
pub use explorer::Explorer;
pub use memory::{CatalogDocument, MemoryStore, StoredSetting};
pub use sheet::{Property, PropertySheet};
pub use source::{discover, IdentifierSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
