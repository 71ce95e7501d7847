//! Courtside library
//!
//! This library provides the core functionality for the Courtside terminal
//! tagger: the button registry, the tag-event ledger with its aggregation
//! functions, layout file I/O, and the Ratatui-based presentation layer.

// Module declarations
pub mod config;
pub mod constants;
pub mod ledger;
pub mod models;
pub mod registry;
pub mod services;
pub mod tui;
