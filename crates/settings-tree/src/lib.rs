//! Settings Tree
//!
//! Turns a flat namespace of separator-delimited setting identifiers into a
//! compact navigation tree.
//!
//! # Overview
//!
//! - **Identifier**: validated setting name, split into segments on a separator
//! - **TreeBuilder**: inserts identifiers along their cumulative prefixes
//! - **SettingsTree**: the result after single-child chains are folded
//!
//! # Example
//!
//! ```rust
//! use settings_tree::{SettingsTree, TreeBuilder};
//!
//! let mut builder: TreeBuilder<()> = TreeBuilder::new();
//! builder.extend(["A_B_C", "A_B_D", "A_E"]);
//! let tree: SettingsTree<()> = builder.build();
//!
//! let a_b = tree.find("A_B").unwrap();
//! assert_eq!(a_b.child_count(), 2);
//! assert!(tree.find("A_E").unwrap().is_leaf());
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod identifier;
pub mod node;
pub mod tree;

// Re-exports
pub use error::{TreeError, TreeResult};
pub use identifier::{split_segments, Identifier, DEFAULT_SEPARATOR};
pub use node::{OutlineEntry, TreeNode};
pub use tree::{build, SettingsTree, TreeBuilder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
