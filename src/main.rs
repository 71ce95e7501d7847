//! Courtside - Terminal-based basketball event tagger
//!
//! Tag possessions against a game context with configurable buttons, then
//! review per-quarter totals and shooting splits and export the session as
//! CSV.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use courtside::config::Config;
use courtside::constants::APP_BINARY_NAME;
use courtside::registry::ButtonRegistry;
use courtside::services::LayoutService;
use courtside::tui;

/// Courtside - Terminal-based basketball event tagger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a button layout JSON file
    #[arg(value_name = "FILE")]
    layout_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load or create default config
    let config = Config::load().unwrap_or_else(|_| Config::default());

    let mut registry = ButtonRegistry::seeded();
    let source_path = if let Some(path) = cli.layout_path {
        // Validate the file path before attempting to load
        if !path.exists() {
            eprintln!("Error: Layout file not found: {}", path.display());
            eprintln!();
            eprintln!("Please provide a valid path to a JSON button layout file.");
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {} my_buttons.json", APP_BINARY_NAME);
            eprintln!("  {} path/to/layout.json", APP_BINARY_NAME);
            eprintln!();
            eprintln!("Or start without a file to use the default buttons:");
            eprintln!("  {}", APP_BINARY_NAME);
            std::process::exit(1);
        }

        if let Some(ext) = path.extension() {
            if ext != "json" {
                eprintln!(
                    "Warning: Expected a JSON file (.json), but got: {}",
                    path.display()
                );
                eprintln!();
            }
        }

        LayoutService::load(&mut registry, &path)?;
        Some(path)
    } else {
        None
    };

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(config, registry, source_path);

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal before surfacing any loop error
    tui::restore_terminal(terminal)?;
    result?;

    Ok(())
}
