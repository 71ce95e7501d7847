//! Button definitions for the tagging grid.

use crate::models::RgbColor;
use serde::{Deserialize, Serialize};

/// A user-defined tagging action: a labeled, colored button.
///
/// Buttons are owned by the registry, which enforces the label invariants
/// (non-empty after trimming, case-insensitively unique). A `ButtonDef` on
/// its own is just the label/color pair as it appears in layout files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDef {
    /// Display label, also the label stamped onto tag events
    pub label: String,
    /// Background color in the button grid
    pub color: RgbColor,
}

impl ButtonDef {
    /// Creates a new button definition.
    pub fn new(label: impl Into<String>, color: RgbColor) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}
