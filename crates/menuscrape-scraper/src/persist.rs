//! Whole-file persistence of the restaurant document.

use std::path::Path;

use menuscrape_core::RestaurantDocument;
use serde::Serialize;

use crate::error::ScraperError;

/// Serializes `document` as 4-space-indented JSON and replaces `path`.
///
/// The bytes go to a sibling `.tmp` file first and are renamed over the
/// target, so readers never observe a half-written document.
///
/// # Errors
///
/// - [`ScraperError::Serialize`] if the document cannot be encoded.
/// - [`ScraperError::Persist`] if the temp file cannot be written or renamed.
pub fn save_document(document: &RestaurantDocument, path: &Path) -> Result<(), ScraperError> {
    let bytes = to_pretty_json(document)?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let persist_err = |source: std::io::Error| ScraperError::Persist {
        path: path.display().to_string(),
        source,
    };

    std::fs::write(&tmp_path, &bytes).map_err(persist_err)?;
    std::fs::rename(&tmp_path, path).map_err(persist_err)?;

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        empty = document.is_empty(),
        "saved restaurant document"
    );
    Ok(())
}

/// Reads a previously saved document.
///
/// # Errors
///
/// - [`ScraperError::Persist`] if the file cannot be read.
/// - [`ScraperError::Decode`] if it is not a valid document.
pub fn load_document(path: &Path) -> Result<RestaurantDocument, ScraperError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScraperError::Persist {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ScraperError::Decode {
        context: path.display().to_string(),
        source: e,
    })
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, ScraperError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(ScraperError::Serialize)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use menuscrape_core::{Category, MenuItem, RestaurantRecord};

    use super::*;

    fn sample_document() -> RestaurantDocument {
        RestaurantDocument::new(RestaurantRecord {
            title: Some("Noodle Bar".to_owned()),
            categories: vec![Category {
                title: Some("Bowls".to_owned()),
                menu: vec![MenuItem {
                    name: "Dan Dan".to_owned(),
                    price: 14.5,
                    ..MenuItem::default()
                }],
            }],
            ..RestaurantRecord::default()
        })
    }

    #[test]
    fn save_then_load_returns_same_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurant_detail.json");
        let document = sample_document();
        save_document(&document, &path).unwrap();
        assert_eq!(load_document(&path).unwrap(), document);
    }

    #[test]
    fn save_uses_four_space_indent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_document(&sample_document(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n    \"data\": {\n        \"menu_id\""));
        assert!(!dir.path().join("out.json.tmp").exists());
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_document(&sample_document(), &path).unwrap();
        save_document(&RestaurantDocument::empty(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn save_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = save_document(&sample_document(), &path).unwrap_err();
        assert!(matches!(err, ScraperError::Persist { .. }));
    }
}
