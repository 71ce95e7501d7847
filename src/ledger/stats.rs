//! Pure aggregation over an immutable snapshot of the event sequence.
//!
//! Every function here folds `&[TagEvent]` (or a table derived from one)
//! into display-ready data. Nothing is cached between calls, so the stats
//! views can never drift from the ledger.

use crate::models::{Quarter, ShotResult, TagEvent};
use std::collections::BTreeMap;

/// Aggregation key: one row of the totals table.
pub type CountKey = (String, Quarter, ShotResult);

/// Key for the shooting breakdown: one (tag, quarter) line.
pub type ShootingKey = (String, Quarter);

/// Per-(tag, quarter) shooting summary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShootingLine {
    /// Made attempts (Made 2 + Made 3)
    pub made: u32,
    /// Missed attempts (Missed 2 + Missed 3)
    pub missed: u32,
    /// Total shooting attempts; fouls are excluded
    pub attempts: u32,
    /// Field-goal percentage, 0.0 when there are no attempts
    pub fg_percent: f64,
}

/// Folds the event sequence into a count per (label, quarter, result).
///
/// Counting is commutative, so any ordering of the same event multiset
/// produces the same table. The `BTreeMap` keeps keys sorted by label, then
/// quarter, then result for stable display.
#[must_use]
pub fn aggregate_counts(events: &[TagEvent]) -> BTreeMap<CountKey, u32> {
    let mut counts = BTreeMap::new();
    for event in events {
        let key = (event.label.clone(), event.quarter, event.result);
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Collapses a count table into per-(tag, quarter) shooting lines.
///
/// Fouls contribute to neither made nor missed and are excluded from
/// attempts entirely. A line with zero attempts has an FG% of exactly 0.0,
/// never NaN.
#[must_use]
pub fn aggregate_shooting(counts: &BTreeMap<CountKey, u32>) -> BTreeMap<ShootingKey, ShootingLine> {
    let mut lines: BTreeMap<ShootingKey, ShootingLine> = BTreeMap::new();

    for ((label, quarter, result), count) in counts {
        let line = lines.entry((label.clone(), *quarter)).or_default();
        if result.is_made() {
            line.made += count;
        } else if result.is_missed() {
            line.missed += count;
        }
    }

    for line in lines.values_mut() {
        line.attempts = line.made + line.missed;
        line.fg_percent = fg_percent(line.made, line.attempts);
    }

    lines
}

/// Overall field-goal percentage across every shooting line.
#[must_use]
pub fn overall_fg_percent(lines: &BTreeMap<ShootingKey, ShootingLine>) -> f64 {
    let made: u32 = lines.values().map(|l| l.made).sum();
    let attempts: u32 = lines.values().map(|l| l.attempts).sum();
    fg_percent(made, attempts)
}

/// Zero-attempt-safe percentage.
fn fg_percent(made: u32, attempts: u32) -> f64 {
    if attempts == 0 {
        0.0
    } else {
        f64::from(made) / f64::from(attempts) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EventLedger;
    use crate::models::GameContext;
    use chrono::NaiveDate;

    fn context(quarter: Quarter) -> GameContext {
        GameContext {
            opponent: "Acadia".to_string(),
            game_date: NaiveDate::from_ymd_opt(2026, 1, 17),
            quarter: Some(quarter),
        }
    }

    fn ledger_with(entries: &[(&str, Quarter, ShotResult)]) -> EventLedger {
        let mut ledger = EventLedger::new();
        for (label, quarter, result) in entries {
            ledger
                .append(label, *result, &context(*quarter))
                .expect("complete context");
        }
        ledger
    }

    #[test]
    fn test_counts_fold() {
        let ledger = ledger_with(&[
            ("A", Quarter::Q1, ShotResult::Made2),
            ("A", Quarter::Q1, ShotResult::Made2),
            ("A", Quarter::Q2, ShotResult::Made2),
            ("B", Quarter::Q1, ShotResult::Foul),
        ]);

        let counts = aggregate_counts(ledger.events());
        assert_eq!(counts.len(), 3);
        assert_eq!(
            counts[&("A".to_string(), Quarter::Q1, ShotResult::Made2)],
            2
        );
        assert_eq!(
            counts[&("A".to_string(), Quarter::Q2, ShotResult::Made2)],
            1
        );
        assert_eq!(counts[&("B".to_string(), Quarter::Q1, ShotResult::Foul)], 1);
    }

    #[test]
    fn test_counts_invariant_under_reordering() {
        let entries = [
            ("A", Quarter::Q1, ShotResult::Made2),
            ("B", Quarter::Q3, ShotResult::Missed3),
            ("A", Quarter::Q1, ShotResult::Made2),
            ("C", Quarter::OT, ShotResult::Foul),
        ];
        let mut reversed = entries;
        reversed.reverse();

        let forward = aggregate_counts(ledger_with(&entries).events());
        let backward = aggregate_counts(ledger_with(&reversed).events());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_count_keys_sorted_for_display() {
        let ledger = ledger_with(&[
            ("Zone", Quarter::Q1, ShotResult::Made2),
            ("Iso", Quarter::OT, ShotResult::Foul),
            ("Iso", Quarter::Q1, ShotResult::Missed2),
            ("Iso", Quarter::Q1, ShotResult::Made3),
        ]);

        let keys: Vec<_> = aggregate_counts(ledger.events()).into_keys().collect();
        assert_eq!(
            keys,
            vec![
                ("Iso".to_string(), Quarter::Q1, ShotResult::Made3),
                ("Iso".to_string(), Quarter::Q1, ShotResult::Missed2),
                ("Iso".to_string(), Quarter::OT, ShotResult::Foul),
                ("Zone".to_string(), Quarter::Q1, ShotResult::Made2),
            ]
        );
    }

    #[test]
    fn test_shooting_scenario() {
        // Spec scenario: A/Q1 Made 2, Missed 2, Made 3
        let ledger = ledger_with(&[
            ("A", Quarter::Q1, ShotResult::Made2),
            ("A", Quarter::Q1, ShotResult::Missed2),
            ("A", Quarter::Q1, ShotResult::Made3),
        ]);

        let shooting = aggregate_shooting(&aggregate_counts(ledger.events()));
        let line = shooting[&("A".to_string(), Quarter::Q1)];
        assert_eq!(line.made, 2);
        assert_eq!(line.missed, 1);
        assert_eq!(line.attempts, 3);
        assert!((line.fg_percent - 66.666_666).abs() < 0.001);
        assert_eq!(format!("{:.1}", line.fg_percent), "66.7");
    }

    #[test]
    fn test_fouls_excluded_from_attempts() {
        let ledger = ledger_with(&[
            ("A", Quarter::Q1, ShotResult::Foul),
            ("A", Quarter::Q1, ShotResult::Foul),
            ("A", Quarter::Q1, ShotResult::Made2),
        ]);

        let shooting = aggregate_shooting(&aggregate_counts(ledger.events()));
        let line = shooting[&("A".to_string(), Quarter::Q1)];
        assert_eq!(line.made, 1);
        assert_eq!(line.missed, 0);
        assert_eq!(line.attempts, 1);
        assert!((line.fg_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_attempts_never_nan() {
        // A line that only contains fouls has zero attempts
        let ledger = ledger_with(&[("A", Quarter::Q4, ShotResult::Foul)]);
        let shooting = aggregate_shooting(&aggregate_counts(ledger.events()));
        let line = shooting[&("A".to_string(), Quarter::Q4)];

        assert_eq!(line.attempts, 0);
        assert_eq!(line.fg_percent, 0.0);
        assert!(!line.fg_percent.is_nan());

        assert_eq!(overall_fg_percent(&shooting), 0.0);
    }

    #[test]
    fn test_overall_fg_spans_lines() {
        let ledger = ledger_with(&[
            ("A", Quarter::Q1, ShotResult::Made2),
            ("A", Quarter::Q2, ShotResult::Missed2),
            ("B", Quarter::Q1, ShotResult::Made3),
            ("B", Quarter::Q1, ShotResult::Missed3),
        ]);

        let shooting = aggregate_shooting(&aggregate_counts(ledger.events()));
        // 2 made of 4 attempts across all lines
        assert!((overall_fg_percent(&shooting) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_ledger_aggregates_cleanly() {
        let counts = aggregate_counts(&[]);
        assert!(counts.is_empty());
        let shooting = aggregate_shooting(&counts);
        assert!(shooting.is_empty());
        assert_eq!(overall_fg_percent(&shooting), 0.0);
    }
}
