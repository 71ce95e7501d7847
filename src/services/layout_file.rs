//! Layout file I/O service.
//!
//! This module centralizes layout JSON operations so the TUI, the CLI entry
//! point, and tests all load and save layouts the same way. Imports are
//! all-or-nothing: either the whole registry is replaced by the cleaned file
//! contents or the existing registry is kept untouched.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::registry::{ButtonRegistry, ReplaceOutcome};

/// Service for loading and saving button layout files.
pub struct LayoutService;

impl LayoutService {
    /// Loads a layout JSON file into `registry`.
    ///
    /// Parses the document, extracts the `buttons` array (untyped records),
    /// and applies [`ButtonRegistry::replace_all`] semantics. Any failure
    /// (unreadable file, malformed JSON, no valid buttons) leaves the
    /// registry unchanged and carries the underlying cause in the error.
    pub fn load(registry: &mut ButtonRegistry, path: &Path) -> Result<ReplaceOutcome> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

        let document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse layout file: {}", path.display()))?;

        let raw_entries = document
            .get("buttons")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let outcome = registry
            .replace_all(&raw_entries)
            .with_context(|| format!("Failed to load layout from {}", path.display()))?;

        Ok(outcome)
    }

    /// Saves the registry to a layout JSON file.
    ///
    /// The document round-trips exactly through [`LayoutService::load`].
    pub fn save(registry: &ButtonRegistry, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&registry.to_document())
            .context("Failed to serialize layout")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to save layout to {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RgbColor;

    #[test]
    fn test_save_then_load_roundtrip() {
        let mut registry = ButtonRegistry::new();
        registry.add("Pick and Roll", RgbColor::new(63, 81, 181)).unwrap();
        registry.add("Iso", RgbColor::new(255, 0, 0)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagger_layout.json");
        LayoutService::save(&registry, &path).unwrap();

        let mut reloaded = ButtonRegistry::seeded();
        let outcome = LayoutService::load(&mut reloaded, &path).unwrap();
        assert_eq!(outcome.loaded, 2);
        assert_eq!(outcome.dropped, 0);
        assert_eq!(reloaded, registry);
    }

    #[test]
    fn test_load_missing_file_keeps_registry() {
        let mut registry = ButtonRegistry::seeded();
        let before = registry.clone();

        let err = LayoutService::load(&mut registry, Path::new("/nonexistent/layout.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read layout file"));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_load_malformed_json_keeps_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let mut registry = ButtonRegistry::seeded();
        let before = registry.clone();
        let err = LayoutService::load(&mut registry, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse layout file"));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_load_without_buttons_key_keeps_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "{}").unwrap();

        let mut registry = ButtonRegistry::seeded();
        let before = registry.clone();
        assert!(LayoutService::load(&mut registry, &path).is_err());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_load_reports_dropped_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(
            &path,
            r#"{"buttons": [{"label": "Zone"}, {"label": "  "}, {"label": "Press"}]}"#,
        )
        .unwrap();

        let mut registry = ButtonRegistry::new();
        let outcome = LayoutService::load(&mut registry, &path).unwrap();
        assert_eq!(outcome.loaded, 2);
        assert_eq!(outcome.dropped, 1);
    }
}
