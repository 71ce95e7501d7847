//! New-button form popup: label and color for a registry add.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::DEFAULT_BUTTON_COLOR;
use crate::models::RgbColor;
use crate::tui::{centered_rect, Component, Theme};

/// Events emitted by the new-button form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonFormEvent {
    /// User submitted the form. The registry performs label validation;
    /// the form only guarantees the color parses.
    Submitted {
        /// Raw label text (untrimmed)
        label: String,
        /// Parsed button color
        color: RgbColor,
    },
    /// User dismissed the form.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Label,
    Color,
}

/// Editable new-button state.
#[derive(Debug, Clone)]
pub struct ButtonForm {
    active_field: FormField,
    label: String,
    color_text: String,
    error: Option<String>,
}

impl ButtonForm {
    /// Creates an empty form with the default color pre-filled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_field: FormField::Label,
            label: String::new(),
            color_text: DEFAULT_BUTTON_COLOR.to_string(),
            error: None,
        }
    }

    /// Shows a validation error from the parent (e.g. a duplicate label)
    /// while keeping the form open for correction.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    fn toggle_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Label => FormField::Color,
            FormField::Color => FormField::Label,
        };
    }

    fn submit(&mut self) -> Option<ButtonFormEvent> {
        let color_text = self.color_text.trim();
        let color = if color_text.is_empty() {
            RgbColor::from_hex(DEFAULT_BUTTON_COLOR).ok()?
        } else {
            match RgbColor::from_hex(color_text) {
                Ok(color) => color,
                Err(_) => {
                    self.error = Some("Invalid color. Use #RRGGBB.".to_string());
                    return None;
                }
            }
        };

        Some(ButtonFormEvent::Submitted {
            label: self.label.clone(),
            color,
        })
    }
}

impl Default for ButtonForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ButtonForm {
    type Event = ButtonFormEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc => Some(ButtonFormEvent::Cancelled),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.error = None;
                self.toggle_field();
                None
            }
            KeyCode::Backspace => {
                self.error = None;
                match self.active_field {
                    FormField::Label => {
                        self.label.pop();
                    }
                    FormField::Color => {
                        self.color_text.pop();
                    }
                }
                None
            }
            KeyCode::Char(c) => {
                self.error = None;
                match self.active_field {
                    FormField::Label => self.label.push(c),
                    FormField::Color => self.color_text.push(c),
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(55, 35, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            popup,
        );

        let field_line = |label: &str, value: &str, field: FormField| {
            let focused = self.active_field == field;
            let marker = if focused { "► " } else { "  " };
            let style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::raw(marker.to_string()),
                Span::styled(format!("{label}: "), Style::default().fg(theme.primary)),
                Span::styled(format!("{value}{cursor}"), style),
            ])
        };

        // Live color swatch when the hex parses
        let swatch = RgbColor::from_hex(&self.color_text).map_or_else(
            |_| Span::styled("(invalid)", Style::default().fg(theme.text_muted)),
            |c| Span::styled("███", Style::default().fg(c.to_ratatui_color())),
        );

        let mut lines = vec![
            Line::from(""),
            field_line("Label", &self.label, FormField::Label),
            Line::from(""),
            field_line("Color", &self.color_text, FormField::Color),
            Line::from(vec![Span::raw("         "), swatch]),
            Line::from(""),
        ];

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme.error),
            )));
        }

        lines.push(Line::from(vec![
            Span::styled("  Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Switch field  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Add  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]));

        let form = Paragraph::new(lines).block(
            Block::default()
                .title(" New Button ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
        f.render_widget(form, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ButtonForm, text: &str) {
        for c in text.chars() {
            form.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_defaults_to_standard_color() {
        let mut form = ButtonForm::new();
        type_text(&mut form, "Iso");

        let event = form.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            event,
            ButtonFormEvent::Submitted {
                label: "Iso".to_string(),
                color: RgbColor::new(63, 81, 181),
            }
        );
    }

    #[test]
    fn test_custom_color() {
        let mut form = ButtonForm::new();
        type_text(&mut form, "Iso");
        form.handle_input(key(KeyCode::Tab));
        for _ in 0..DEFAULT_BUTTON_COLOR.len() {
            form.handle_input(key(KeyCode::Backspace));
        }
        type_text(&mut form, "#ff0000");

        let event = form.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            event,
            ButtonFormEvent::Submitted {
                label: "Iso".to_string(),
                color: RgbColor::new(255, 0, 0),
            }
        );
    }

    #[test]
    fn test_invalid_color_blocks_submit() {
        let mut form = ButtonForm::new();
        type_text(&mut form, "Iso");
        form.handle_input(key(KeyCode::Tab));
        type_text(&mut form, "zz");

        assert!(form.handle_input(key(KeyCode::Enter)).is_none());
        assert!(form.error.is_some());
    }

    #[test]
    fn test_empty_label_submits_for_registry_validation() {
        // Label validation belongs to the registry, not the form
        let mut form = ButtonForm::new();
        let event = form.handle_input(key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            event,
            ButtonFormEvent::Submitted { label, .. } if label.is_empty()
        ));
    }

    #[test]
    fn test_esc_cancels() {
        let mut form = ButtonForm::new();
        assert_eq!(
            form.handle_input(key(KeyCode::Esc)),
            Some(ButtonFormEvent::Cancelled)
        );
    }
}
