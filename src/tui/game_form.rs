//! Game info form popup: opponent, date, and quarter.
//!
//! These three fields are the tagging gate; the form itself accepts any
//! partial state (leaving the gate closed) but rejects a date that is
//! present and unparseable.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{GameContext, Quarter};
use crate::tui::{centered_rect, Component, Theme};

/// Events emitted by the game info form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameFormEvent {
    /// User submitted the form; carries the new context.
    Submitted(GameContext),
    /// User dismissed the form without applying changes.
    Cancelled,
}

/// Which form row has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Opponent,
    Date,
    Quarter,
}

/// Editable game-info state, detached from the live context until submit.
#[derive(Debug, Clone)]
pub struct GameForm {
    active_field: FormField,
    opponent: String,
    date_text: String,
    quarter: Option<Quarter>,
    error: Option<String>,
}

impl GameForm {
    /// Creates a form pre-filled from the current context.
    #[must_use]
    pub fn new(context: &GameContext) -> Self {
        Self {
            active_field: FormField::Opponent,
            opponent: context.opponent.clone(),
            date_text: context
                .game_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            quarter: context.quarter,
            error: None,
        }
    }

    fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Opponent => FormField::Date,
            FormField::Date => FormField::Quarter,
            FormField::Quarter => FormField::Opponent,
        };
    }

    fn previous_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Opponent => FormField::Quarter,
            FormField::Date => FormField::Opponent,
            FormField::Quarter => FormField::Date,
        };
    }

    fn cycle_quarter(&mut self, forward: bool) {
        // None is a real option: the selector starts blank
        let options: Vec<Option<Quarter>> = std::iter::once(None)
            .chain(Quarter::ALL.iter().copied().map(Some))
            .collect();
        let current = options
            .iter()
            .position(|q| *q == self.quarter)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.quarter = options[next];
    }

    fn submit(&mut self) -> Option<GameFormEvent> {
        let date_text = self.date_text.trim();
        let game_date = if date_text.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(date_text, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    self.error = Some("Invalid date. Use YYYY-MM-DD.".to_string());
                    return None;
                }
            }
        };

        Some(GameFormEvent::Submitted(GameContext {
            opponent: self.opponent.clone(),
            game_date,
            quarter: self.quarter,
        }))
    }

    fn render_field(&self, label: &str, value: &str, field: FormField, theme: &Theme) -> Line<'_> {
        let focused = self.active_field == field;
        let marker = if focused { "► " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let cursor = if focused && field != FormField::Quarter {
            "_"
        } else {
            ""
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{label}: "), Style::default().fg(theme.primary)),
            Span::styled(format!("{value}{cursor}"), value_style),
        ])
    }
}

impl Component for GameForm {
    type Event = GameFormEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        self.error = None;
        match key.code {
            KeyCode::Esc => Some(GameFormEvent::Cancelled),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.previous_field();
                None
            }
            KeyCode::Left if self.active_field == FormField::Quarter => {
                self.cycle_quarter(false);
                None
            }
            KeyCode::Right if self.active_field == FormField::Quarter => {
                self.cycle_quarter(true);
                None
            }
            KeyCode::Backspace => {
                match self.active_field {
                    FormField::Opponent => {
                        self.opponent.pop();
                    }
                    FormField::Date => {
                        self.date_text.pop();
                    }
                    FormField::Quarter => {}
                }
                None
            }
            KeyCode::Char(c) => {
                match self.active_field {
                    FormField::Opponent => self.opponent.push(c),
                    FormField::Date => self.date_text.push(c),
                    FormField::Quarter => {}
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(55, 40, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            popup,
        );

        let quarter_text = self
            .quarter
            .map_or_else(|| "(none)".to_string(), |q| q.to_string());

        let mut lines = vec![
            Line::from(""),
            self.render_field("Opponent", &self.opponent, FormField::Opponent, theme),
            Line::from(""),
            self.render_field("Game Date", &self.date_text, FormField::Date, theme),
            Line::from(""),
            self.render_field("Quarter  ", &quarter_text, FormField::Quarter, theme),
            Line::from(""),
        ];

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme.error),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "  Opponent, Date, and Quarter are required before tagging.",
                Style::default().fg(theme.text_muted),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Next field  "),
            Span::styled("←→", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Quarter  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Apply  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]));

        let form = Paragraph::new(lines).block(
            Block::default()
                .title(" Game Info ")
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

    fn type_text(form: &mut GameForm, text: &str) {
        for c in text.chars() {
            form.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_prefills_from_context() {
        let ctx = GameContext {
            opponent: "Acadia".to_string(),
            game_date: NaiveDate::from_ymd_opt(2026, 1, 17),
            quarter: Some(Quarter::Q2),
        };
        let form = GameForm::new(&ctx);
        assert_eq!(form.opponent, "Acadia");
        assert_eq!(form.date_text, "2026-01-17");
        assert_eq!(form.quarter, Some(Quarter::Q2));
    }

    #[test]
    fn test_submit_complete_context() {
        let mut form = GameForm::new(&GameContext::default());
        type_text(&mut form, "Acadia");
        form.handle_input(key(KeyCode::Tab));
        type_text(&mut form, "2026-01-17");
        form.handle_input(key(KeyCode::Tab));
        form.handle_input(key(KeyCode::Right)); // None -> Q1

        let event = form.handle_input(key(KeyCode::Enter)).unwrap();
        let GameFormEvent::Submitted(ctx) = event else {
            panic!("expected submit");
        };
        assert!(ctx.is_complete());
        assert_eq!(ctx.opponent, "Acadia");
        assert_eq!(ctx.game_date, NaiveDate::from_ymd_opt(2026, 1, 17));
        assert_eq!(ctx.quarter, Some(Quarter::Q1));
    }

    #[test]
    fn test_submit_allows_incomplete_context() {
        let mut form = GameForm::new(&GameContext::default());
        type_text(&mut form, "Acadia");

        let event = form.handle_input(key(KeyCode::Enter)).unwrap();
        let GameFormEvent::Submitted(ctx) = event else {
            panic!("expected submit");
        };
        assert!(!ctx.is_complete());
        assert_eq!(ctx.game_date, None);
        assert_eq!(ctx.quarter, None);
    }

    #[test]
    fn test_invalid_date_blocks_submit() {
        let mut form = GameForm::new(&GameContext::default());
        form.handle_input(key(KeyCode::Tab));
        type_text(&mut form, "01/17/2026");

        assert!(form.handle_input(key(KeyCode::Enter)).is_none());
        assert!(form.error.is_some());
    }

    #[test]
    fn test_quarter_cycles_through_blank() {
        let mut form = GameForm::new(&GameContext::default());
        form.handle_input(key(KeyCode::Tab));
        form.handle_input(key(KeyCode::Tab)); // focus quarter

        assert_eq!(form.quarter, None);
        for expected in Quarter::ALL {
            form.handle_input(key(KeyCode::Right));
            assert_eq!(form.quarter, Some(expected));
        }
        form.handle_input(key(KeyCode::Right));
        assert_eq!(form.quarter, None);

        form.handle_input(key(KeyCode::Left));
        assert_eq!(form.quarter, Some(Quarter::OT));
    }

    #[test]
    fn test_esc_cancels() {
        let mut form = GameForm::new(&GameContext::default());
        assert_eq!(
            form.handle_input(key(KeyCode::Esc)),
            Some(GameFormEvent::Cancelled)
        );
    }
}
