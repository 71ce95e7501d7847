//! Tag button grid widget.
//!
//! Renders the registry in insertion order, batched into fixed-width rows,
//! and tracks which button the keyboard selection is on.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::BUTTONS_PER_ROW;
use crate::registry::ButtonRegistry;
use crate::tui::Theme;

/// Keyboard selection state for the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonGridState {
    /// Index of the selected button in registry order
    pub selected: usize,
}

impl ButtonGridState {
    /// Creates a grid selection at the first button.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: 0 }
    }

    /// Clamps the selection after the registry shrank (e.g. a layout load).
    pub fn clamp(&mut self, button_count: usize) {
        if button_count == 0 {
            self.selected = 0;
        } else if self.selected >= button_count {
            self.selected = button_count - 1;
        }
    }

    /// Move selection one button left, stopping at the first.
    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection one button right, stopping at the last.
    pub fn move_right(&mut self, button_count: usize) {
        if button_count > 0 && self.selected + 1 < button_count {
            self.selected += 1;
        }
    }

    /// Move selection one row up.
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(BUTTONS_PER_ROW);
    }

    /// Move selection one row down, stopping on the last row.
    pub fn move_down(&mut self, button_count: usize) {
        let candidate = self.selected + BUTTONS_PER_ROW;
        if candidate < button_count {
            self.selected = candidate;
        }
    }
}

/// Button grid widget.
pub struct ButtonGrid;

impl ButtonGrid {
    /// Render the registry as a grid of colored buttons, 5 per row.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        registry: &ButtonRegistry,
        state: &ButtonGridState,
        theme: &Theme,
    ) {
        let block = Block::default()
            .title(" Tag Buttons ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if registry.is_empty() {
            let empty = Paragraph::new("No buttons. Press n to add one.")
                .style(Style::default().fg(theme.text_muted));
            f.render_widget(empty, inner);
            return;
        }

        let buttons = registry.buttons();
        let rows: Vec<_> = buttons.chunks(BUTTONS_PER_ROW).collect();
        let row_constraints: Vec<Constraint> =
            rows.iter().map(|_| Constraint::Length(3)).collect();
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(inner);

        for (row_index, row) in rows.iter().enumerate() {
            // Fixed-width cells so a partial last row doesn't stretch
            let col_constraints: Vec<Constraint> = (0..BUTTONS_PER_ROW)
                .map(|_| Constraint::Ratio(1, BUTTONS_PER_ROW as u32))
                .collect();
            let col_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(col_constraints)
                .split(row_areas[row_index]);

            for (col_index, button) in row.iter().enumerate() {
                let index = row_index * BUTTONS_PER_ROW + col_index;
                let selected = index == state.selected;

                let bg = if selected {
                    button.color
                } else {
                    button.color.dim(60)
                };
                // Pick black or white text for contrast against the button color
                let fg = if bg.luminance() > 140 {
                    Color::Black
                } else {
                    Color::White
                };

                let mut style = Style::default().fg(fg).bg(bg.to_ratatui_color());
                if selected {
                    style = style.add_modifier(Modifier::BOLD);
                }

                let cell = Paragraph::new(Line::from(Span::raw(button.label.clone())))
                    .centered()
                    .style(style)
                    .block(Block::default().borders(Borders::ALL).border_style(
                        if selected {
                            Style::default().fg(theme.accent)
                        } else {
                            Style::default().fg(theme.text_muted)
                        },
                    ));
                f.render_widget(cell, col_areas[col_index]);
            }
        }
    }
}
