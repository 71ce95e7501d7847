//! Stats panel: totals, shooting breakdown, and recent events.
//!
//! Every render recomputes the aggregates from the ledger's event snapshot;
//! the panel holds no counters of its own.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use std::collections::BTreeMap;

use crate::ledger::export::export_rows;
use crate::ledger::stats::{aggregate_counts, aggregate_shooting, overall_fg_percent};
use crate::ledger::EventLedger;
use crate::models::ShotResult;
use crate::tui::Theme;

/// Which aggregate view the panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsView {
    /// Count table plus bar chart
    #[default]
    Totals,
    /// Per-(tag, quarter) shooting percentages and the overall FG% metric
    Shooting,
    /// Recent events table in insertion order
    Recent,
}

impl StatsView {
    /// Cycles to the next view.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Totals => Self::Shooting,
            Self::Shooting => Self::Recent,
            Self::Recent => Self::Totals,
        }
    }

    /// Panel title for the current view.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Totals => " Totals ",
            Self::Shooting => " FG% Breakdown ",
            Self::Recent => " Recent Events ",
        }
    }
}

/// Stats panel widget.
pub struct StatsPanel;

impl StatsPanel {
    /// Render the active stats view.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        ledger: &EventLedger,
        view: StatsView,
        recent_rows: usize,
        theme: &Theme,
    ) {
        let block = Block::default()
            .title(view.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if ledger.is_empty() {
            let empty =
                Paragraph::new("No tags yet.").style(Style::default().fg(theme.text_muted));
            f.render_widget(empty, inner);
            return;
        }

        match view {
            StatsView::Totals => Self::render_totals(f, inner, ledger, theme),
            StatsView::Shooting => Self::render_shooting(f, inner, ledger, theme),
            StatsView::Recent => Self::render_recent(f, inner, ledger, recent_rows, theme),
        }
    }

    fn render_totals(f: &mut Frame, area: Rect, ledger: &EventLedger, theme: &Theme) {
        let counts = aggregate_counts(ledger.events());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let header = Row::new(["Tag", "Quarter", "Result", "Total"])
            .style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = counts
            .iter()
            .map(|((label, quarter, result), total)| {
                Row::new(vec![
                    Cell::from(label.clone()),
                    Cell::from(quarter.to_string()),
                    Cell::from(result.to_string()).style(
                        Style::default()
                            .fg(theme.result_color(*result))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::from(total.to_string()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
        )
        .header(header);
        f.render_widget(table, chunks[0]);

        Self::render_count_chart(f, chunks[1], &counts, theme);
    }

    /// Bar chart of totals per tag, one bar per result category summed over
    /// quarters, colored green/red/orange.
    fn render_count_chart(
        f: &mut Frame,
        area: Rect,
        counts: &BTreeMap<(String, crate::models::Quarter, ShotResult), u32>,
        theme: &Theme,
    ) {
        // Collapse quarters: (label, result) -> total
        let mut per_label: BTreeMap<String, BTreeMap<ShotResult, u64>> = BTreeMap::new();
        for ((label, _, result), total) in counts {
            *per_label
                .entry(label.clone())
                .or_default()
                .entry(*result)
                .or_insert(0) += u64::from(*total);
        }

        let groups: Vec<BarGroup> = per_label
            .iter()
            .map(|(label, results)| {
                let bars: Vec<Bar> = results
                    .iter()
                    .map(|(result, total)| {
                        Bar::default()
                            .value(*total)
                            .style(Style::default().fg(theme.result_color(*result)))
                            .value_style(
                                Style::default()
                                    .fg(theme.background)
                                    .bg(theme.result_color(*result)),
                            )
                    })
                    .collect();
                BarGroup::default()
                    .label(Line::from(label.clone()))
                    .bars(&bars)
            })
            .collect();

        let mut chart = BarChart::default()
            .bar_width(4)
            .bar_gap(1)
            .group_gap(3)
            .style(Style::default().bg(theme.background));
        for group in groups {
            chart = chart.data(group);
        }
        f.render_widget(chart, area);
    }

    fn render_shooting(f: &mut Frame, area: Rect, ledger: &EventLedger, theme: &Theme) {
        let counts = aggregate_counts(ledger.events());
        let shooting = aggregate_shooting(&counts);
        let overall = overall_fg_percent(&shooting);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        let header = Row::new(["Tag", "Quarter", "Made", "Missed", "Att", "FG%"])
            .style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = shooting
            .iter()
            .map(|((label, quarter), line)| {
                Row::new(vec![
                    Cell::from(label.clone()),
                    Cell::from(quarter.to_string()),
                    Cell::from(line.made.to_string()),
                    Cell::from(line.missed.to_string()),
                    Cell::from(line.attempts.to_string()),
                    Cell::from(format!("{:.1}", line.fg_percent)).style(
                        Style::default()
                            .fg(theme.fg_percent_color(line.fg_percent))
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Length(5),
                Constraint::Length(6),
            ],
        )
        .header(header);
        f.render_widget(table, chunks[0]);

        let metric = Paragraph::new(Line::from(vec![
            Span::styled("Overall FG%: ", Style::default().fg(theme.primary)),
            Span::styled(
                format!("{overall:.1}%"),
                Style::default()
                    .fg(theme.fg_percent_color(overall))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        f.render_widget(metric, chunks[1]);
    }

    fn render_recent(
        f: &mut Frame,
        area: Rect,
        ledger: &EventLedger,
        recent_rows: usize,
        theme: &Theme,
    ) {
        let all_rows = export_rows(ledger.events());
        let start = all_rows.len().saturating_sub(recent_rows);

        let header = Row::new(["Result", "Tag", "Quarter", "Opponent", "Date", "Time"])
            .style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = all_rows[start..]
            .iter()
            .map(|row| {
                let color = row
                    .result
                    .strip_prefix("Made")
                    .map(|_| theme.made)
                    .or_else(|| row.result.strip_prefix("Missed").map(|_| theme.missed))
                    .unwrap_or(theme.foul);
                Row::new(vec![
                    Cell::from(row.result.clone())
                        .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Cell::from(row.label.clone()),
                    Cell::from(row.quarter.clone()),
                    Cell::from(row.opponent.clone()),
                    Cell::from(row.game_date.clone()),
                    Cell::from(row.timestamp_iso.clone()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(9),
                Constraint::Min(14),
                Constraint::Length(8),
                Constraint::Min(10),
                Constraint::Length(11),
                Constraint::Length(20),
            ],
        )
        .header(header);
        f.render_widget(table, area);
    }
}
