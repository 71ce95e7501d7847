//! Component trait pattern for TUI popups.
//!
//! Popup components are self-contained: they own their state, handle their
//! own keyboard input, and emit an event when the parent needs to act.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A popup component that can be rendered and handle input.
///
/// Returns `Some(Event)` from [`Component::handle_input`] when the component
/// wants to signal something to the parent; `None` when input was handled
/// internally.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Render the component within the provided area.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);
}
