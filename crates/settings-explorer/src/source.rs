//! Identifier discovery
//!
//! An [`IdentifierSource`] lists every setting identifier with its raw type
//! tag. [`discover`] turns that listing into the catalog the explorer builds
//! its tree from.

use indexmap::IndexMap;
use settings_model::{Kind, StoreError};
use settings_tree::Identifier;

/// Enumerates `(identifier, type tag)` pairs
pub trait IdentifierSource: Send + Sync {
    /// All entries, in the source's order
    ///
    /// # Errors
    /// Returns [`StoreError`] when the listing itself cannot be produced
    fn enumerate(&self) -> Result<Vec<(String, String)>, StoreError>;
}

impl IdentifierSource for Vec<(String, String)> {
    fn enumerate(&self) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self.clone())
    }
}

/// Parse a raw listing into identifier to kind, in source order
///
/// Entries are dropped, with a warning, when the identifier is empty or the
/// tag is outside the store's vocabulary. A repeated identifier keeps its
/// first kind. With `skip_generic`, entries of [`Kind::Generic`] are dropped
/// too.
///
/// # Errors
/// Propagates the source's enumeration error
pub fn discover(
    source: &dyn IdentifierSource,
    skip_generic: bool,
) -> Result<IndexMap<Identifier, Kind>, StoreError> {
    let mut catalog = IndexMap::new();
    for (raw, tag) in source.enumerate()? {
        let Ok(id) = Identifier::new(raw) else {
            tracing::warn!(tag = %tag, "skipping entry with empty identifier");
            continue;
        };
        let kind = match Kind::from_tag(&tag) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "skipping setting");
                continue;
            }
        };
        if skip_generic && kind == Kind::Generic {
            tracing::debug!(id = %id, "skipping generic setting");
            continue;
        }
        if catalog.contains_key(&id) {
            tracing::warn!(id = %id, "duplicate identifier, keeping first");
            continue;
        }
        catalog.insert(id, kind);
    }
    tracing::debug!(settings = catalog.len(), "discovered settings");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(id, tag)| ((*id).to_string(), (*tag).to_string()))
            .collect()
    }

    #[test]
    fn discover_parses_tags() {
        let source = listing(&[("A_B", "boolean"), ("A_C", "Custom"), ("A_D", "RANGE")]);
        let catalog = discover(&source, false).unwrap();
        let kinds: Vec<_> = catalog.values().copied().collect();
        assert_eq!(kinds, vec![Kind::Boolean, Kind::Generic, Kind::Range]);
    }

    #[test]
    fn discover_skips_bad_entries() {
        let source = listing(&[("A", "Boolean"), ("B", "Hologram"), ("", "List"), ("A", "Range")]);
        let catalog = discover(&source, false).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("A"), Some(&Kind::Boolean));
    }

    #[test]
    fn discover_skip_generic() {
        let source = listing(&[("A", "DisplayString"), ("B", "Action")]);
        let catalog = discover(&source, true).unwrap();
        assert_eq!(catalog.keys().map(Identifier::as_str).collect::<Vec<_>>(), vec!["B"]);
    }
}
