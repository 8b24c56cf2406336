//! Minor selection state machine and ledger
//!
//! A student holds at most one `selected` minor. Selecting another archives the
//! current one in the same unit of work; `completed` and `archived` records are
//! never removed. [`transition`] is the pure state-transition function and
//! [`MinorLedger`] is the storage seam that applies it atomically.

use crate::core::error::{AnalyticsError, Result};
use crate::core::models::{MinorId, MinorStatus, StudentId, UserMinor};
use crate::core::store::{CatalogStore, Snapshot};
use crate::debug;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Mutex;

/// An event on a student's minor history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinorEvent {
    /// Make this minor the student's current one
    Select(MinorId),
    /// Mark the currently selected minor as finished
    Complete(MinorId),
}

impl MinorEvent {
    /// The minor the event refers to
    #[must_use]
    pub const fn minor(self) -> MinorId {
        match self {
            Self::Select(id) | Self::Complete(id) => id,
        }
    }
}

impl fmt::Display for MinorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(id) => write!(f, "select minor {id}"),
            Self::Complete(id) => write!(f, "complete minor {id}"),
        }
    }
}

/// Result of applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Full history after the event
    pub history: Vec<UserMinor>,
    /// The record the event created or updated
    pub record: UserMinor,
}

fn move_to(record: &mut UserMinor, next: MinorStatus) -> Result<()> {
    if !record.status.can_transition_to(next) {
        return Err(AnalyticsError::InvalidTransition(format!(
            "minor {} cannot go from {} to {next}",
            record.minor, record.status
        )));
    }
    record.status = next;
    Ok(())
}

/// Apply `event` to `history`, returning the new history
///
/// `seq` is the sequence number for a newly created record. Reselecting the
/// minor that is already selected leaves the history unchanged.
///
/// # Errors
/// Returns [`AnalyticsError::InvalidTransition`] when completing a minor that
/// is not the selected one.
pub fn transition(history: &[UserMinor], event: MinorEvent, seq: u64) -> Result<Transition> {
    let mut next = history.to_vec();
    let selected = next
        .iter()
        .position(|um| um.status == MinorStatus::Selected);

    match event {
        MinorEvent::Select(minor) => {
            if let Some(pos) = selected {
                if next[pos].minor == minor {
                    let record = next[pos];
                    return Ok(Transition {
                        history: next,
                        record,
                    });
                }
                move_to(&mut next[pos], MinorStatus::Archived)?;
            }
            let record = UserMinor {
                minor,
                status: MinorStatus::Selected,
                seq,
            };
            next.push(record);
            Ok(Transition {
                history: next,
                record,
            })
        }
        MinorEvent::Complete(minor) => {
            let pos = selected
                .filter(|&pos| next[pos].minor == minor)
                .ok_or_else(|| {
                    AnalyticsError::InvalidTransition(format!(
                        "minor {minor} is not the selected minor"
                    ))
                })?;
            move_to(&mut next[pos], MinorStatus::Completed)?;
            Ok(Transition {
                record: next[pos],
                history: next,
            })
        }
    }
}

/// Storage seam that applies minor events atomically per student
pub trait MinorLedger {
    /// Apply an event; archive-then-insert happens as one unit
    ///
    /// # Errors
    /// Returns `NotFound` for unknown minors, `InvalidTransition` for disallowed
    /// events and `Storage` when atomicity cannot be guaranteed.
    fn apply(&self, student: StudentId, event: MinorEvent) -> Result<UserMinor>;

    /// A student's history in ledger order
    ///
    /// # Errors
    /// Returns `Storage` when the ledger cannot be read consistently.
    fn history(&self, student: StudentId) -> Result<Vec<UserMinor>>;
}

#[derive(Debug, Default)]
struct LedgerState {
    histories: HashMap<StudentId, Vec<UserMinor>>,
    next_seq: u64,
}

/// Mutex-guarded ledger; concurrent events serialize on the lock
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    known_minors: BTreeSet<MinorId>,
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Empty ledger accepting the given minors
    #[must_use]
    pub fn new(known_minors: impl IntoIterator<Item = MinorId>) -> Self {
        Self {
            known_minors: known_minors.into_iter().collect(),
            state: Mutex::new(LedgerState {
                histories: HashMap::new(),
                next_seq: 1,
            }),
        }
    }

    /// Seed a ledger with the minors and histories held in a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let histories: HashMap<StudentId, Vec<UserMinor>> = snapshot
            .students
            .iter()
            .map(|s| (s.id, s.minor_history()))
            .collect();
        let next_seq = histories
            .values()
            .flatten()
            .map(|um| um.seq)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            known_minors: snapshot.minors().iter().map(|m| m.id).collect(),
            state: Mutex::new(LedgerState {
                histories,
                next_seq,
            }),
        }
    }
}

impl MinorLedger for InMemoryLedger {
    fn apply(&self, student: StudentId, event: MinorEvent) -> Result<UserMinor> {
        if !self.known_minors.contains(&event.minor()) {
            return Err(AnalyticsError::not_found("minor", event.minor()));
        }
        let mut state = self
            .state
            .lock()
            .map_err(|_| AnalyticsError::Storage("selection ledger lock poisoned".to_string()))?;

        let seq = state.next_seq;
        let current = state.histories.get(&student).map_or(&[][..], Vec::as_slice);
        let outcome = transition(current, event, seq)?;
        if outcome.record.seq == seq && outcome.record.status == MinorStatus::Selected {
            state.next_seq += 1;
        }
        state.histories.insert(student, outcome.history);
        debug!("Ledger: student {student} {event} (seq {})", outcome.record.seq);
        Ok(outcome.record)
    }

    fn history(&self, student: StudentId) -> Result<Vec<UserMinor>> {
        let state = self
            .state
            .lock()
            .map_err(|_| AnalyticsError::Storage("selection ledger lock poisoned".to_string()))?;
        let mut history = state.histories.get(&student).cloned().unwrap_or_default();
        history.sort_by_key(|um| um.seq);
        Ok(history)
    }
}
