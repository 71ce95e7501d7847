//! Status bar: game context summary, transient status, and key hints.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::{AppState, Theme};

/// Bottom status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render context line, status line, and key hints.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self::render_context_line(f, chunks[0], state, theme);

        let status_line = if state.status_message.is_empty() {
            Line::from("")
        } else {
            let color = state.status_color_override.unwrap_or(theme.success);
            Line::from(Span::styled(
                format!(" {}", state.status_message),
                Style::default().fg(color),
            ))
        };
        f.render_widget(
            Paragraph::new(status_line).style(Style::default().bg(theme.background)),
            chunks[1],
        );

        Self::render_hints(f, chunks[2], theme);
    }

    fn render_context_line(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let context = &state.context;
        let opponent = if context.opponent.trim().is_empty() {
            "(no opponent)".to_string()
        } else {
            format!("vs {}", context.opponent.trim())
        };
        let date = context
            .game_date
            .map_or_else(|| "(no date)".to_string(), |d| d.to_string());
        let quarter = context
            .quarter
            .map_or_else(|| "(no quarter)".to_string(), |q| q.to_string());

        let gate_style = if context.is_complete() {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.warning)
        };

        let mut spans = vec![Span::styled(
            format!(" {opponent}  {date}  {quarter}"),
            gate_style,
        )];
        if !context.is_complete() {
            spans.push(Span::styled(
                "  (press g to set game info)",
                Style::default().fg(theme.text_muted),
            ));
        }
        if state.dirty {
            spans.push(Span::styled(
                "  [unsaved layout]",
                Style::default().fg(theme.warning),
            ));
        }

        f.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background)),
            area,
        );
    }

    fn render_hints(f: &mut Frame, area: Rect, theme: &Theme) {
        let hint = |keys: &str, action: &str| {
            vec![
                Span::styled(
                    keys.to_string(),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {action}  "), Style::default().fg(theme.text_muted)),
            ]
        };

        let mut spans = vec![Span::raw(" ")];
        spans.extend(hint("Enter", "Tag"));
        spans.extend(hint("g", "Game"));
        spans.extend(hint("n", "New"));
        spans.extend(hint("u", "Undo"));
        spans.extend(hint("v", "View"));
        spans.extend(hint("e", "Export"));
        spans.extend(hint("?", "Help"));
        spans.extend(hint("q", "Quit"));

        f.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background)),
            area,
        );
    }
}
