//! Tag-event ledger: an append/pop-only ordered sequence of tag events.
//!
//! The ledger is the single source of truth for everything the stats views
//! show. Aggregates are never maintained incrementally; every render folds
//! the current event sequence through the pure functions in [`stats`].

pub mod export;
pub mod stats;

use crate::models::{GameContext, ShotResult, TagEvent};
use chrono::Local;
use thiserror::Error;

/// Errors produced by ledger mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Tagging was attempted without a complete (opponent, date, quarter)
    /// context.
    #[error("Enter Opponent, Date, and Quarter first.")]
    MissingContext,
}

/// Append-ordered sequence of tag events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLedger {
    events: Vec<TagEvent>,
}

impl EventLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[TagEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The tagging gate: true iff opponent, date, and quarter are all
    /// present.
    #[must_use]
    pub fn can_tag(context: &GameContext) -> bool {
        context.is_complete()
    }

    /// Records a tag event at the tail of the sequence.
    ///
    /// Re-validates the context itself rather than trusting an earlier
    /// [`EventLedger::can_tag`] check; the context may have been cleared
    /// between the activation and the result choice. The event is stamped
    /// with the current local instant at second resolution and a snapshot of
    /// the context (opponent trimmed).
    pub fn append(
        &mut self,
        label: &str,
        result: ShotResult,
        context: &GameContext,
    ) -> Result<&TagEvent, LedgerError> {
        if !Self::can_tag(context) {
            return Err(LedgerError::MissingContext);
        }

        // is_complete() guarantees both fields are present
        let game_date = context.game_date.ok_or(LedgerError::MissingContext)?;
        let quarter = context.quarter.ok_or(LedgerError::MissingContext)?;

        let event = TagEvent {
            opponent: context.opponent.trim().to_string(),
            game_date,
            quarter,
            timestamp_iso: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            label: label.to_string(),
            result,
        };

        self.events.push(event);
        Ok(self.events.last().expect("event was just pushed"))
    }

    /// Removes and returns the most recently appended event.
    ///
    /// No-op returning `None` when the ledger is empty.
    pub fn undo_last(&mut self) -> Option<TagEvent> {
        self.events.pop()
    }

    /// Empties the ledger unconditionally. Irreversible.
    pub fn reset_all(&mut self) {
        self.events.clear();
    }
}
