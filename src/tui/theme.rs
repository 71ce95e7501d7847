//! Theme system for consistent UI colors across dark and light modes.

use crate::config::ThemeMode;
use ratatui::style::Color;

/// Semantic color theme for the TUI.
///
/// Provides consistent colors across all UI components with support for
/// both dark and light terminal backgrounds. On top of the usual chrome
/// colors it carries the three outcome-category colors used everywhere a
/// result is displayed: green for made, red for missed, orange for fouls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color for confirmations and success messages
    pub success: Color,
    /// Error state color for errors and destructive actions
    pub error: Color,
    /// Warning state color for warnings and cautions
    pub warning: Color,

    /// Primary text content color
    pub text: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,

    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,

    /// Made-shot outcome color
    pub made: Color,
    /// Missed-shot outcome color
    pub missed: Color,
    /// Foul outcome color
    pub foul: Color,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Resolves a user preference into a concrete theme.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,

            made: Color::Green,
            missed: Color::Red,
            foul: Color::Rgb(255, 165, 0),
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),  // Dark green
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),

            made: Color::Rgb(0, 128, 0),
            missed: Color::Red,
            foul: Color::Rgb(200, 100, 0),
        }
    }

    /// Color for a result cell, chosen by outcome category.
    #[must_use]
    pub const fn result_color(&self, result: crate::models::ShotResult) -> Color {
        use crate::models::ShotResult;
        match result {
            ShotResult::Made2 | ShotResult::Made3 => self.made,
            ShotResult::Missed2 | ShotResult::Missed3 => self.missed,
            ShotResult::Foul => self.foul,
        }
    }

    /// Color for an FG% figure: green at or above the 50% threshold,
    /// red below.
    #[must_use]
    pub const fn fg_percent_color(&self, fg_percent: f64) -> Color {
        if fg_percent >= 50.0 {
            self.made
        } else {
            self.missed
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
