//! Data models for buttons, game context, and tag events.
//!
//! This module contains all the core data structures used throughout the
//! application. Models are designed to be independent of UI and business logic.

pub mod button;
pub mod event;
pub mod rgb;

// Re-export all model types
pub use button::ButtonDef;
pub use event::{GameContext, Quarter, ShotResult, TagEvent};
pub use rgb::RgbColor;
