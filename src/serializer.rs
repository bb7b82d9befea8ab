//! Rendering an assembled [`OpenApiDocument`] as YAML or JSON text.

use crate::document::OpenApiDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Rendering {} paths as YAML", doc.paths.len());
    serde_yaml::to_string(doc).context("Failed to serialize OpenAPI document to YAML")
}

/// Pretty-printed JSON, the same text served at `<mount>/json`.
///
/// ```
/// use openapi_from_annotations::builder::DocumentBuilder;
/// use openapi_from_annotations::serializer::serialize_json;
///
/// let doc = DocumentBuilder::new().title("Cats").build();
/// assert!(serialize_json(&doc).unwrap().contains("\"title\": \"Cats\""));
/// ```
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Rendering {} paths as JSON", doc.paths.len());
    serde_json::to_string_pretty(doc).context("Failed to serialize OpenAPI document to JSON")
}

/// Write `content` to `path`, overwriting it and creating missing parent directories.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
