//! Catalog documents
//!
//! A catalog file seeds a [`MemoryStore`]. The format follows the file
//! extension: `.json`, `.toml`, `.yaml` or `.yml`.

use crate::error::CatalogError;
use crate::memory::{CatalogDocument, MemoryStore};
use std::path::Path;

/// Supported catalog encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON document
    Json,
    /// TOML document
    Toml,
    /// YAML document
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    /// Returns [`CatalogError::UnsupportedFormat`] for any other extension
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(CatalogError::UnsupportedFormat(extension)),
        }
    }

    /// Parse document text
    ///
    /// # Errors
    /// Returns the format's syntax or schema error
    pub fn parse(self, text: &str) -> Result<CatalogDocument, CatalogError> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Toml => toml::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

/// Read and parse a catalog document
///
/// # Errors
/// Returns [`CatalogError`] on unsupported extension, IO or parse failure
pub fn load_document(path: impl AsRef<Path>) -> Result<CatalogDocument, CatalogError> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
    let document = format.parse(&text)?;
    tracing::info!(
        path = %path.display(),
        ?format,
        settings = document.settings.len(),
        "loaded catalog"
    );
    Ok(document)
}

/// Load a catalog file into a fresh store
///
/// # Errors
/// See [`load_document`]
pub fn load_store(path: impl AsRef<Path>) -> Result<MemoryStore, CatalogError> {
    load_document(path).map(MemoryStore::from_document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings_model::Value;

    #[test]
    fn format_from_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.json")).unwrap(), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.TOML")).unwrap(), CatalogFormat::Toml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.yml")).unwrap(), CatalogFormat::Yaml);
        assert!(matches!(
            CatalogFormat::from_path(Path::new("a.ini")),
            Err(CatalogError::UnsupportedFormat(ext)) if ext == "ini"
        ));
        assert!(CatalogFormat::from_path(Path::new("catalog")).is_err());
    }

    #[test]
    fn parse_toml_document() {
        let text = r#"
            [settings.Display_Brightness]
            type = "Range"
            value = 40
            min = 0
            max = 100

            [settings.Display_Theme]
            type = "List"
            value = "Dark"
            possible_values = ["Light", "Dark"]
        "#;
        let document = CatalogFormat::Toml.parse(text).unwrap();
        let keys: Vec<_> = document.settings.keys().cloned().collect();
        assert_eq!(keys, vec!["Display_Brightness", "Display_Theme"]);

        let brightness = &document.settings["Display_Brightness"];
        assert_eq!(brightness.value, Some(Value::Int(40)));
        assert_eq!(brightness.max, Some(100));
        assert!(brightness.enabled);
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let text = r#"{"settings": {"A": {"type": "Boolean", "colour": "red"}}}"#;
        assert!(matches!(CatalogFormat::Json.parse(text), Err(CatalogError::Json(_))));
    }
}
