//! Button registry: the ordered set of tagging actions.
//!
//! The registry is always a clean validated snapshot. Buttons are appended
//! one at a time through [`ButtonRegistry::add`] or wholesale replaced by a
//! layout load through [`ButtonRegistry::replace_all`]; nothing edits a
//! button in place and nothing removes a single button.

use crate::constants::{DEFAULT_BUTTON_COLOR, DEFAULT_BUTTON_LABEL, MAX_LABEL_LEN};
use crate::models::{ButtonDef, RgbColor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors produced by registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The submitted label was empty after trimming.
    #[error("Label is required.")]
    EmptyLabel,
    /// A button with the same label (case-insensitively) already exists.
    #[error("That label already exists.")]
    DuplicateLabel(String),
    /// A bulk load produced zero surviving entries; the registry was left
    /// untouched.
    #[error("No valid buttons found.")]
    NoValidEntries,
}

/// Counts reported by a successful [`ButtonRegistry::replace_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Entries that survived cleaning and now form the registry
    pub loaded: usize,
    /// Entries dropped because their trimmed label was empty
    pub dropped: usize,
}

/// On-disk layout document: `{"buttons": [{"label": ..., "color": ...}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Button definitions in display order
    pub buttons: Vec<ButtonDef>,
}

/// Ordered collection of button definitions.
///
/// Insertion order is display order; the presentation layer groups buttons
/// into fixed-size rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonRegistry {
    buttons: Vec<ButtonDef>,
}

impl ButtonRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buttons: Vec::new(),
        }
    }

    /// Creates the registry a fresh session starts with: one seeded default
    /// button.
    #[must_use]
    pub fn seeded() -> Self {
        let color = RgbColor::from_hex(DEFAULT_BUTTON_COLOR)
            .unwrap_or(RgbColor { r: 63, g: 81, b: 181 });
        Self {
            buttons: vec![ButtonDef::new(DEFAULT_BUTTON_LABEL, color)],
        }
    }

    /// Buttons in display order.
    #[must_use]
    pub fn buttons(&self) -> &[ButtonDef] {
        &self.buttons
    }

    /// Number of buttons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// True when the registry holds no buttons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Adds a new button at the end of the display order.
    ///
    /// The label is trimmed before validation. Fails with
    /// [`RegistryError::EmptyLabel`] when nothing remains after trimming and
    /// with [`RegistryError::DuplicateLabel`] when an existing label matches
    /// case-insensitively.
    pub fn add(&mut self, label: &str, color: RgbColor) -> Result<(), RegistryError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(RegistryError::EmptyLabel);
        }
        if self
            .buttons
            .iter()
            .any(|b| b.label.eq_ignore_ascii_case(label))
        {
            return Err(RegistryError::DuplicateLabel(label.to_string()));
        }

        self.buttons.push(ButtonDef::new(label, color));
        Ok(())
    }

    /// Replaces the whole registry with a cleaned version of `raw_entries`.
    ///
    /// Each raw entry is an untyped JSON record. Labels are coerced to
    /// strings, trimmed, and truncated to [`MAX_LABEL_LEN`] characters;
    /// colors are coerced to strings with the default color substituted when
    /// absent, blank, or unparseable. Entries whose cleaned label is empty
    /// are dropped.
    ///
    /// The replacement is all-or-nothing: when zero entries survive, the
    /// existing registry is left untouched and
    /// [`RegistryError::NoValidEntries`] is returned.
    pub fn replace_all(&mut self, raw_entries: &[Value]) -> Result<ReplaceOutcome, RegistryError> {
        let mut cleaned = Vec::new();
        let mut dropped = 0;

        for entry in raw_entries {
            let label: String = coerce_to_string(entry.get("label"))
                .trim()
                .chars()
                .take(MAX_LABEL_LEN)
                .collect();
            if label.is_empty() {
                dropped += 1;
                continue;
            }

            let color_text = coerce_to_string(entry.get("color"));
            let color = parse_color_or_default(&color_text);
            cleaned.push(ButtonDef { label, color });
        }

        if cleaned.is_empty() {
            return Err(RegistryError::NoValidEntries);
        }

        let loaded = cleaned.len();
        self.buttons = cleaned;
        Ok(ReplaceOutcome { loaded, dropped })
    }

    /// Snapshot of the registry as a layout document for export.
    ///
    /// Round-trips exactly through [`ButtonRegistry::replace_all`].
    #[must_use]
    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            buttons: self.buttons.clone(),
        }
    }
}

impl Default for ButtonRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Coerces an optional JSON value to a string the way a duck-typed loader
/// would: strings pass through, scalars are stringified, everything else
/// becomes empty.
fn coerce_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn parse_color_or_default(text: &str) -> RgbColor {
    let text = text.trim();
    if text.is_empty() {
        return default_color();
    }
    RgbColor::from_hex(text).unwrap_or_else(|_| default_color())
}

fn default_color() -> RgbColor {
    RgbColor::from_hex(DEFAULT_BUTTON_COLOR).unwrap_or(RgbColor { r: 63, g: 81, b: 181 })
}
