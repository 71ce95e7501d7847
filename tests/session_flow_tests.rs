//! Integration tests for a full tagging session.
//!
//! Drives the library the way the TUI does: gate the ledger on game info,
//! tag a handful of possessions, and check the aggregates, undo, and reset
//! behavior over the same event sequence.

use chrono::NaiveDate;
use courtside::ledger::stats::{aggregate_counts, aggregate_shooting, overall_fg_percent};
use courtside::ledger::{EventLedger, LedgerError};
use courtside::models::{GameContext, Quarter, ShotResult};
use courtside::registry::ButtonRegistry;

fn game_context() -> GameContext {
    GameContext {
        opponent: "Acadia".to_string(),
        game_date: NaiveDate::from_ymd_opt(2026, 1, 17),
        quarter: Some(Quarter::Q1),
    }
}

#[test]
fn test_tagging_blocked_until_context_complete() {
    let mut ledger = EventLedger::new();
    let mut context = GameContext::default();

    assert!(!EventLedger::can_tag(&context));
    let err = ledger
        .append("Pick and Roll", ShotResult::Made2, &context)
        .unwrap_err();
    assert_eq!(err, LedgerError::MissingContext);
    assert!(ledger.is_empty());

    context.opponent = "Acadia".to_string();
    context.game_date = NaiveDate::from_ymd_opt(2026, 1, 17);
    assert!(!EventLedger::can_tag(&context));

    context.quarter = Some(Quarter::Q1);
    assert!(EventLedger::can_tag(&context));
    ledger
        .append("Pick and Roll", ShotResult::Made2, &context)
        .unwrap();
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_session_aggregates_follow_the_ledger() {
    let mut ledger = EventLedger::new();
    let mut context = game_context();

    // Q1: 2 made, 1 missed on the pick and roll, plus a foul drawn
    ledger
        .append("Pick and Roll", ShotResult::Made2, &context)
        .unwrap();
    ledger
        .append("Pick and Roll", ShotResult::Made3, &context)
        .unwrap();
    ledger
        .append("Pick and Roll", ShotResult::Missed2, &context)
        .unwrap();
    ledger
        .append("Pick and Roll", ShotResult::Foul, &context)
        .unwrap();

    // Q2: isolation goes cold
    context.quarter = Some(Quarter::Q2);
    ledger
        .append("Isolation", ShotResult::Missed3, &context)
        .unwrap();

    let counts = aggregate_counts(ledger.events());
    assert_eq!(
        counts[&("Pick and Roll".to_string(), Quarter::Q1, ShotResult::Made2)],
        1
    );
    assert_eq!(
        counts[&("Pick and Roll".to_string(), Quarter::Q1, ShotResult::Foul)],
        1
    );

    let shooting = aggregate_shooting(&counts);
    let line = &shooting[&("Pick and Roll".to_string(), Quarter::Q1)];
    assert_eq!(line.made, 2);
    assert_eq!(line.missed, 1);
    assert_eq!(line.attempts, 3);
    assert_eq!(format!("{:.1}", line.fg_percent), "66.7");

    // Foul never counts as an attempt anywhere
    let iso = &shooting[&("Isolation".to_string(), Quarter::Q2)];
    assert_eq!(iso.attempts, 1);
    assert_eq!(iso.fg_percent, 0.0);

    // Overall: 2 made of 4 attempts
    let overall = overall_fg_percent(&shooting);
    assert_eq!(format!("{overall:.1}"), "50.0");
}

#[test]
fn test_undo_walks_back_in_reverse_order() {
    let mut ledger = EventLedger::new();
    let context = game_context();

    ledger
        .append("Pick and Roll", ShotResult::Made2, &context)
        .unwrap();
    ledger
        .append("Isolation", ShotResult::Missed3, &context)
        .unwrap();

    let undone = ledger.undo_last().unwrap();
    assert_eq!(undone.label, "Isolation");
    assert_eq!(undone.result, ShotResult::Missed3);

    let undone = ledger.undo_last().unwrap();
    assert_eq!(undone.label, "Pick and Roll");

    assert!(ledger.undo_last().is_none());
    assert!(ledger.is_empty());
}

#[test]
fn test_reset_preserves_registry() {
    let mut registry = ButtonRegistry::seeded();
    registry
        .add("Isolation", courtside::models::RgbColor::new(255, 0, 0))
        .unwrap();

    let mut ledger = EventLedger::new();
    let context = game_context();
    ledger
        .append("Isolation", ShotResult::Made2, &context)
        .unwrap();

    ledger.reset_all();

    assert!(ledger.is_empty());
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_event_snapshot_is_immune_to_context_edits() {
    let mut ledger = EventLedger::new();
    let mut context = game_context();
    ledger
        .append("Pick and Roll", ShotResult::Made2, &context)
        .unwrap();

    // Editing game info afterwards must not rewrite history
    context.opponent = "Dalhousie".to_string();
    context.quarter = Some(Quarter::Q4);
    ledger
        .append("Pick and Roll", ShotResult::Made2, &context)
        .unwrap();

    assert_eq!(ledger.events()[0].opponent, "Acadia");
    assert_eq!(ledger.events()[0].quarter, Quarter::Q1);
    assert_eq!(ledger.events()[1].opponent, "Dalhousie");
    assert_eq!(ledger.events()[1].quarter, Quarter::Q4);
}
