//! Result picker popup: the second step of the two-step tagging flow.
//!
//! Activating a button opens one of these. The picker *is* the pending
//! activation slot: it carries the label of the button that opened it, so
//! the event it emits can never be attributed to a different button. A new
//! activation constructs a new picker, superseding the pending one.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{Quarter, ShotResult};
use crate::tui::{centered_rect, Component, Theme};

/// Events emitted by the result picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPickerEvent {
    /// User chose an outcome for the pending activation.
    Chosen {
        /// Label of the button whose activation opened this picker
        label: String,
        /// Chosen outcome
        result: ShotResult,
    },
    /// User dismissed the picker without choosing.
    Cancelled,
}

/// Pending-activation state: which button was clicked and which outcome is
/// highlighted.
#[derive(Debug, Clone)]
pub struct ResultPicker {
    label: String,
    quarter: Quarter,
    selected: usize,
}

impl ResultPicker {
    /// Creates a picker for an activation of the button with `label` during
    /// `quarter`.
    #[must_use]
    pub fn new(label: impl Into<String>, quarter: Quarter) -> Self {
        Self {
            label: label.into(),
            quarter,
            selected: 0,
        }
    }

    /// Label of the pending activation.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Currently highlighted outcome.
    #[must_use]
    pub fn selected_result(&self) -> ShotResult {
        ShotResult::ALL[self.selected]
    }

    fn previous(&mut self) {
        if self.selected == 0 {
            self.selected = ShotResult::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    fn next(&mut self) {
        self.selected = (self.selected + 1) % ShotResult::ALL.len();
    }
}

impl Component for ResultPicker {
    type Event = ResultPickerEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc => Some(ResultPickerEvent::Cancelled),
            KeyCode::Up => {
                self.previous();
                None
            }
            KeyCode::Down => {
                self.next();
                None
            }
            KeyCode::Enter => Some(ResultPickerEvent::Chosen {
                label: self.label.clone(),
                result: self.selected_result(),
            }),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(40, 45, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            popup,
        );

        let items: Vec<ListItem> = ShotResult::ALL
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let marker = if i == self.selected { "► " } else { "  " };
                let style = Style::default().fg(theme.result_color(*result));
                let style = if i == self.selected {
                    style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
                } else {
                    style
                };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(result.to_string(), style),
                ]))
            })
            .collect();

        let title = format!(" Result for {} ({}) ", self.label, self.quarter);
        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
        f.render_widget(list, popup);

        let hint_area = Rect {
            x: popup.x + 2,
            y: popup.y + popup.height.saturating_sub(2),
            width: popup.width.saturating_sub(4),
            height: 1,
        };
        let hints = Paragraph::new(Line::from(vec![
            Span::styled("↑↓", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Navigate  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Tag  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]))
        .style(Style::default().fg(theme.text_muted));
        f.render_widget(hints, hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_picker_carries_activation_label() {
        let picker = ResultPicker::new("Pick and Roll", Quarter::Q3);
        assert_eq!(picker.label(), "Pick and Roll");
        assert_eq!(picker.selected_result(), ShotResult::Made2);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut picker = ResultPicker::new("Iso", Quarter::Q1);
        picker.handle_input(key(KeyCode::Up));
        assert_eq!(picker.selected_result(), ShotResult::Foul);
        picker.handle_input(key(KeyCode::Down));
        assert_eq!(picker.selected_result(), ShotResult::Made2);
    }

    #[test]
    fn test_enter_emits_label_and_result() {
        let mut picker = ResultPicker::new("Iso", Quarter::Q1);
        picker.handle_input(key(KeyCode::Down));
        picker.handle_input(key(KeyCode::Down));

        let event = picker.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            event,
            ResultPickerEvent::Chosen {
                label: "Iso".to_string(),
                result: ShotResult::Missed2,
            }
        );
    }

    #[test]
    fn test_esc_cancels() {
        let mut picker = ResultPicker::new("Iso", Quarter::Q1);
        assert_eq!(
            picker.handle_input(key(KeyCode::Esc)),
            Some(ResultPickerEvent::Cancelled)
        );
    }

    #[test]
    fn test_unhandled_keys_stay_pending() {
        let mut picker = ResultPicker::new("Iso", Quarter::Q1);
        assert!(picker.handle_input(key(KeyCode::Char('x'))).is_none());
        assert_eq!(picker.selected_result(), ShotResult::Made2);
    }
}
