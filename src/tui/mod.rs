//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

pub mod button_form;
pub mod button_grid;
pub mod component;
pub mod game_form;
pub mod result_picker;
pub mod stats_panel;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::ledger::{export, EventLedger, LedgerError};
use crate::models::GameContext;
use crate::registry::ButtonRegistry;
use crate::services::LayoutService;

pub use button_form::{ButtonForm, ButtonFormEvent};
pub use button_grid::{ButtonGrid, ButtonGridState};
pub use component::Component;
pub use game_form::{GameForm, GameFormEvent};
pub use result_picker::{ResultPicker, ResultPickerEvent};
pub use stats_panel::{StatsPanel, StatsView};
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Type of popup currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Result picker for a pending button activation
    ResultPicker,
    /// Game info form
    GameForm,
    /// New button form
    ButtonForm,
    /// Reset confirmation dialog
    ResetConfirm,
    /// Help overlay
    Help,
}

/// Active component instance, paired with the popup that displays it.
#[derive(Debug, Clone)]
pub enum ActiveComponent {
    /// Pending activation awaiting a result choice
    ResultPicker(ResultPicker),
    /// Game info editor
    GameForm(GameForm),
    /// New button editor
    ButtonForm(ButtonForm),
}

/// Single source of truth for the TUI.
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Active color theme, refreshed each loop iteration
    pub theme: Theme,
    /// Tag button registry
    pub registry: ButtonRegistry,
    /// Session event ledger
    pub ledger: EventLedger,
    /// Current game context (the tagging gate)
    pub context: GameContext,
    /// Layout file backing the registry, if one was loaded or saved
    pub source_path: Option<PathBuf>,
    /// Registry has unsaved changes
    pub dirty: bool,
    /// Keyboard selection in the button grid
    pub grid: ButtonGridState,
    /// Active stats panel view
    pub stats_view: StatsView,
    /// Currently displayed popup
    pub active_popup: Option<PopupType>,
    /// Component instance backing the popup
    pub active_component: Option<ActiveComponent>,
    /// Transient status line
    pub status_message: String,
    /// Overrides the status color (used for warnings)
    pub status_color_override: Option<Color>,
    /// Blocking error overlay
    pub error_message: Option<String>,
    /// Exit flag checked by the main loop
    pub should_quit: bool,
}

impl AppState {
    /// Creates app state around a registry, typically one just loaded from a
    /// layout file.
    #[must_use]
    pub fn new(config: Config, registry: ButtonRegistry, source_path: Option<PathBuf>) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        Self {
            config,
            theme,
            registry,
            ledger: EventLedger::new(),
            context: GameContext::default(),
            source_path,
            dirty: false,
            grid: ButtonGridState::new(),
            stats_view: StatsView::default(),
            active_popup: None,
            active_component: None,
            status_message: "Press ? for help".to_string(),
            status_color_override: None,
            error_message: None,
            should_quit: false,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = None;
    }

    /// Set status message with custom foreground color (used for warnings)
    pub fn set_status_with_style(&mut self, message: impl Into<String>, color: Color) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = Some(color);
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Close the active popup and drop its component.
    pub fn close_popup(&mut self) {
        self.active_popup = None;
        self.active_component = None;
    }

    /// Activate the button at `index`: warn if the tagging gate is closed,
    /// otherwise open a result picker carrying the button's label.
    ///
    /// If a picker is already pending, the new activation supersedes it.
    pub fn activate_button(&mut self, index: usize) {
        let Some(label) = self.registry.buttons().get(index).map(|b| b.label.clone()) else {
            return;
        };
        if !EventLedger::can_tag(&self.context) {
            self.close_popup();
            let warning = self.theme.warning;
            self.set_status_with_style(LedgerError::MissingContext.to_string(), warning);
            return;
        }
        // Gate is open, so the quarter is present
        let Some(quarter) = self.context.quarter else {
            return;
        };
        let picker = ResultPicker::new(label, quarter);
        self.active_component = Some(ActiveComponent::ResultPicker(picker));
        self.active_popup = Some(PopupType::ResultPicker);
    }

    /// Open the game info form pre-filled from the current context.
    pub fn open_game_form(&mut self) {
        let form = GameForm::new(&self.context);
        self.active_component = Some(ActiveComponent::GameForm(form));
        self.active_popup = Some(PopupType::GameForm);
    }

    /// Open the new-button form.
    pub fn open_button_form(&mut self) {
        self.active_component = Some(ActiveComponent::ButtonForm(ButtonForm::new()));
        self.active_popup = Some(PopupType::ButtonForm);
    }

    /// Path the layout is saved to: the loaded file, or `layout.json` in the
    /// export directory for a session started without one.
    fn layout_save_path(&self) -> PathBuf {
        self.source_path
            .clone()
            .unwrap_or_else(|| self.config.export_dir().join("layout.json"))
    }

    fn save_layout(&mut self) {
        let path = self.layout_save_path();
        match LayoutService::save(&self.registry, &path) {
            Ok(()) => {
                self.source_path = Some(path.clone());
                self.dirty = false;
                self.set_status(format!("Saved layout to {}", path.display()));
            }
            Err(e) => self.set_error(format!("Save failed: {e:#}")),
        }
    }

    fn reload_layout(&mut self) {
        let Some(path) = self.source_path.clone() else {
            let warning = self.theme.warning;
            self.set_status_with_style("No layout file to reload.", warning);
            return;
        };
        match LayoutService::load(&mut self.registry, &path) {
            Ok(outcome) => {
                self.dirty = false;
                self.grid.clamp(self.registry.len());
                if outcome.dropped > 0 {
                    self.set_status(format!(
                        "Loaded {} buttons ({} invalid entries dropped)",
                        outcome.loaded, outcome.dropped
                    ));
                } else {
                    self.set_status(format!("Loaded {} buttons", outcome.loaded));
                }
            }
            Err(e) => self.set_error(format!("Reload failed: {e:#}")),
        }
    }

    fn export_events(&mut self) {
        if self.ledger.is_empty() {
            let warning = self.theme.warning;
            self.set_status_with_style("No events to export.", warning);
            return;
        }
        let filename = format!(
            "tag_events_{}.csv",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.config.export_dir().join(filename);
        match export::write_csv(self.ledger.events(), &path) {
            Ok(()) => self.set_status(format!(
                "Exported {} events to {}",
                self.ledger.len(),
                path.display()
            )),
            Err(e) => self.set_error(format!("Export failed: {e:#}")),
        }
    }

    fn undo_last(&mut self) {
        match self.ledger.undo_last() {
            Some(event) => self.set_status(format!(
                "Removed {} for {} ({} events left)",
                event.result,
                event.label,
                self.ledger.len()
            )),
            None => {
                let warning = self.theme.warning;
                self.set_status_with_style("Nothing to undo.", warning);
            }
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Apply theme based on user preference (Auto detects OS, Dark/Light are explicit)
        state.theme = Theme::from_mode(state.config.ui.theme_mode);

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(state, key)? {
                    break;
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(popup_type) = &state.active_popup {
        render_popup(f, *popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with layout source and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let source = state.source_path.as_ref().map_or_else(
        || "unsaved layout".to_string(),
        |p| p.display().to_string(),
    );
    let dirty_indicator = if state.dirty { " *" } else { "" };
    let title = format!(" {APP_NAME} - {source}{dirty_indicator}");

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );
    f.render_widget(title_widget, area);
}

/// Render main content: button grid on the left, stats panel on the right
fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    ButtonGrid::render(f, chunks[0], &state.registry, &state.grid, &state.theme);
    StatsPanel::render(
        f,
        chunks[1],
        &state.ledger,
        state.stats_view,
        state.config.ui.recent_rows,
        &state.theme,
    );
}

/// Render active popup
fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match popup_type {
        PopupType::ResultPicker => {
            if let Some(ActiveComponent::ResultPicker(ref picker)) = state.active_component {
                picker.render(f, f.area(), &state.theme);
            }
        }
        PopupType::GameForm => {
            if let Some(ActiveComponent::GameForm(ref form)) = state.active_component {
                form.render(f, f.area(), &state.theme);
            }
        }
        PopupType::ButtonForm => {
            if let Some(ActiveComponent::ButtonForm(ref form)) = state.active_component {
                form.render(f, f.area(), &state.theme);
            }
        }
        PopupType::ResetConfirm => render_reset_confirm(f, state),
        PopupType::Help => render_help_overlay(f, &state.theme),
    }
}

fn render_reset_confirm(f: &mut Frame, state: &AppState) {
    let popup = centered_rect(45, 25, f.area());
    f.render_widget(Clear, popup);
    f.render_widget(
        Block::default().style(Style::default().bg(state.theme.background)),
        popup,
    );

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Discard all {} tagged events?", state.ledger.len()),
            Style::default().fg(state.theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  y",
                Style::default()
                    .fg(state.theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Reset  "),
            Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Keep"),
        ]),
    ];
    let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Reset Events ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(state.theme.error)),
    );
    f.render_widget(dialog, popup);
}

fn render_help_overlay(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(60, 70, f.area());
    f.render_widget(Clear, popup);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        popup,
    );

    let binding = |keys: &str, action: &str| {
        Line::from(vec![
            Span::styled(
                format!("  {keys:<12}"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(action.to_string(), Style::default().fg(theme.text)),
        ])
    };

    let lines = vec![
        Line::from(""),
        binding("↑↓←→", "Move button selection"),
        binding("Enter/Space", "Tag with the selected button"),
        binding("1-9", "Tag with button by number"),
        Line::from(""),
        binding("g", "Edit game info (opponent, date, quarter)"),
        binding("n", "Add a tag button"),
        binding("u", "Undo the last tagged event"),
        binding("r", "Reset all events"),
        Line::from(""),
        binding("v / Tab", "Cycle stats view"),
        binding("s", "Save the button layout"),
        binding("L", "Reload the button layout from disk"),
        binding("e", "Export events as CSV"),
        Line::from(""),
        binding("?", "Toggle this help"),
        binding("q", "Quit"),
    ];
    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary)),
    );
    f.render_widget(help, popup);
}

/// Render blocking error overlay
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let popup = centered_rect(60, 30, f.area());
    f.render_widget(Clear, popup);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        popup,
    );

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(theme.error),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter or Esc to dismiss",
            Style::default().fg(theme.text_muted),
        )),
    ];
    let overlay = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error)),
    );
    f.render_widget(overlay, popup);
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events. Returns `Ok(true)` when the user quit.
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    if state.active_popup.is_some() {
        handle_popup_input(state, key);
        return Ok(false);
    }

    handle_main_input(state, key)
}

fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Left => state.grid.move_left(),
        KeyCode::Right => state.grid.move_right(state.registry.len()),
        KeyCode::Up => state.grid.move_up(),
        KeyCode::Down => state.grid.move_down(state.registry.len()),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let index = state.grid.selected;
            state.activate_button(index);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            state.activate_button(index);
        }
        KeyCode::Char('g') => state.open_game_form(),
        KeyCode::Char('n') => state.open_button_form(),
        KeyCode::Char('u') => state.undo_last(),
        KeyCode::Char('r') => {
            if state.ledger.is_empty() {
                let warning = state.theme.warning;
                state.set_status_with_style("No events to reset.", warning);
            } else {
                state.active_popup = Some(PopupType::ResetConfirm);
            }
        }
        KeyCode::Char('s') => state.save_layout(),
        KeyCode::Char('L') => state.reload_layout(),
        KeyCode::Char('e') => state.export_events(),
        KeyCode::Char('v') | KeyCode::Tab => state.stats_view = state.stats_view.next(),
        KeyCode::Char('?') => state.active_popup = Some(PopupType::Help),
        _ => {}
    }
    Ok(false)
}

fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) {
    match state.active_popup {
        Some(PopupType::ResultPicker) => {
            // A digit activates another button while a picker is pending,
            // superseding it; only the final choice appends an event.
            if let KeyCode::Char(c @ '1'..='9') = key.code {
                let index = (c as usize) - ('1' as usize);
                if index < state.registry.len() {
                    state.activate_button(index);
                    return;
                }
            }
            let Some(ActiveComponent::ResultPicker(picker)) = state.active_component.as_mut()
            else {
                state.close_popup();
                return;
            };
            if let Some(event) = picker.handle_input(key) {
                match event {
                    ResultPickerEvent::Chosen { label, result } => {
                        state.close_popup();
                        match state.ledger.append(&label, result, &state.context) {
                            Ok(event) => {
                                let result = event.result;
                                let label = event.label.clone();
                                let message = format!(
                                    "Tagged {} for {} ({} events)",
                                    result,
                                    label,
                                    state.ledger.len()
                                );
                                state.set_status(message);
                            }
                            Err(e) => {
                                let warning = state.theme.warning;
                                state.set_status_with_style(e.to_string(), warning);
                            }
                        }
                    }
                    ResultPickerEvent::Cancelled => state.close_popup(),
                }
            }
        }
        Some(PopupType::GameForm) => {
            let Some(ActiveComponent::GameForm(form)) = state.active_component.as_mut() else {
                state.close_popup();
                return;
            };
            if let Some(event) = form.handle_input(key) {
                match event {
                    GameFormEvent::Submitted(context) => {
                        state.close_popup();
                        state.context = context;
                        if state.context.is_complete() {
                            state.set_status("Game info set. Ready to tag.");
                        } else {
                            let warning = state.theme.warning;
                            state.set_status_with_style(
                                LedgerError::MissingContext.to_string(),
                                warning,
                            );
                        }
                    }
                    GameFormEvent::Cancelled => state.close_popup(),
                }
            }
        }
        Some(PopupType::ButtonForm) => {
            let Some(ActiveComponent::ButtonForm(form)) = state.active_component.as_mut() else {
                state.close_popup();
                return;
            };
            if let Some(event) = form.handle_input(key) {
                match event {
                    ButtonFormEvent::Submitted { label, color } => {
                        match state.registry.add(&label, color) {
                            Ok(()) => {
                                state.close_popup();
                                state.dirty = true;
                                let added = state
                                    .registry
                                    .buttons()
                                    .last()
                                    .map(|b| b.label.clone())
                                    .unwrap_or_default();
                                state.set_status(format!("Added button '{added}'"));
                            }
                            // Keep the form open so the label can be fixed
                            Err(e) => {
                                if let Some(ActiveComponent::ButtonForm(form)) =
                                    state.active_component.as_mut()
                                {
                                    form.set_error(e.to_string());
                                }
                            }
                        }
                    }
                    ButtonFormEvent::Cancelled => state.close_popup(),
                }
            }
        }
        Some(PopupType::ResetConfirm) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let count = state.ledger.len();
                state.ledger.reset_all();
                state.close_popup();
                state.set_status(format!("Reset {count} events"));
            }
            KeyCode::Char('n') | KeyCode::Esc => state.close_popup(),
            _ => {}
        },
        Some(PopupType::Help) => state.close_popup(),
        None => {}
    }
}
