//! Integration tests for the minor selection invariant

mod common;

use common::demo;
use orbit_analytics::core::models::{MinorId, MinorStatus, StudentId};
use orbit_analytics::core::selection::{InMemoryLedger, MinorEvent, MinorLedger};
use orbit_analytics::AnalyticsError;
use std::sync::Arc;
use std::thread;

fn selected_count(history: &[orbit_analytics::core::models::UserMinor]) -> usize {
    history
        .iter()
        .filter(|um| um.status == MinorStatus::Selected)
        .count()
}

#[test]
fn test_select_sequence_archives_previous() {
    let ledger = InMemoryLedger::new([MinorId(1), MinorId(2), MinorId(3)]);
    let student = StudentId(1);

    for minor in [1, 2, 3] {
        ledger
            .apply(student, MinorEvent::Select(MinorId(minor)))
            .unwrap();
    }

    let history = ledger.history(student).unwrap();
    let states: Vec<(MinorId, MinorStatus)> =
        history.iter().map(|um| (um.minor, um.status)).collect();
    assert_eq!(
        states,
        vec![
            (MinorId(1), MinorStatus::Archived),
            (MinorId(2), MinorStatus::Archived),
            (MinorId(3), MinorStatus::Selected),
        ]
    );
}

#[test]
fn test_complete_then_select_keeps_completed() {
    let ledger = InMemoryLedger::new([MinorId(1), MinorId(2)]);
    let student = StudentId(5);

    ledger.apply(student, MinorEvent::Select(MinorId(1))).unwrap();
    let done = ledger
        .apply(student, MinorEvent::Complete(MinorId(1)))
        .unwrap();
    assert_eq!(done.status, MinorStatus::Completed);

    ledger.apply(student, MinorEvent::Select(MinorId(2))).unwrap();
    let history = ledger.history(student).unwrap();
    assert_eq!(history[0].status, MinorStatus::Completed);
    assert_eq!(history[1].status, MinorStatus::Selected);
}

#[test]
fn test_complete_requires_selection() {
    let ledger = InMemoryLedger::new([MinorId(1)]);
    let err = ledger
        .apply(StudentId(1), MinorEvent::Complete(MinorId(1)))
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidTransition(_)));
    assert!(ledger.history(StudentId(1)).unwrap().is_empty());
}

#[test]
fn test_concurrent_selects_leave_one_selected() {
    let minors: Vec<MinorId> = (1..=8).map(MinorId).collect();
    let ledger = Arc::new(InMemoryLedger::new(minors.clone()));
    let student = StudentId(1);

    let handles: Vec<_> = minors
        .into_iter()
        .map(|minor| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                for _ in 0..25 {
                    ledger.apply(student, MinorEvent::Select(minor)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("selector thread panicked");
    }

    let history = ledger.history(student).unwrap();
    assert_eq!(selected_count(&history), 1);

    let mut seqs: Vec<u64> = history.iter().map(|um| um.seq).collect();
    let before = seqs.len();
    seqs.dedup();
    assert_eq!(seqs.len(), before, "sequence numbers are unique and ordered");
}

#[test]
fn test_ledger_seeded_from_snapshot() {
    let snapshot = demo();
    let ledger = InMemoryLedger::from_snapshot(&snapshot);

    let grace = ledger.history(StudentId(2)).unwrap();
    assert_eq!(grace.len(), 2);
    assert_eq!(selected_count(&grace), 1);

    let record = ledger
        .apply(StudentId(2), MinorEvent::Select(MinorId(1)))
        .unwrap();
    assert_eq!(record.seq, 4, "new records continue after the snapshot's last seq");
    assert!(ledger
        .apply(StudentId(2), MinorEvent::Select(MinorId(77)))
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_snapshot_events_keep_single_selection() {
    let mut snapshot = demo();
    let ada = StudentId(1);

    snapshot
        .apply_minor_event(ada, MinorEvent::Select(MinorId(2)))
        .unwrap();
    snapshot
        .apply_minor_event(ada, MinorEvent::Select(MinorId(3)))
        .unwrap();

    let student = snapshot.students.iter().find(|s| s.id == ada).unwrap();
    assert_eq!(selected_count(&student.minors), 1);
    assert_eq!(student.selected_minor().map(|um| um.minor), Some(MinorId(3)));
    assert!(snapshot.validate().is_ok());
}
