//! Tests for bulk regeneration.

use std::sync::atomic::AtomicBool;

use super::*;
use crate::termination::{ExternalTermination, NeverTerminate};
use ranklevel_core::{ConfigurationError, RankLevelError};
use ranklevel_test::{
    numeral_table, Note, NoteStore, ProgressEvent, RecordingProgress, RecordingUndo,
    ReferenceFixture, UndoEvent,
};

const SOURCE: &str = "Expression";
const DESTINATION: &str = "Heisig Level";
const LABEL: &str = "Regenerate Heisig Levels";

fn regenerator() -> BulkRegenerator {
    let table = Arc::new(SharedRankTable::preloaded(numeral_table()));
    BulkRegenerator::from_config(table, &LevelConfig::default())
}

fn note(expression: &str, level: &str) -> Note {
    Note::new()
        .with_field(SOURCE, expression)
        .with_field(DESTINATION, level)
}

fn level(store: &NoteStore, id: u64) -> Option<&str> {
    store.note(id).and_then(|n| n.get(DESTINATION))
}

#[test]
fn test_overwrites_populated_destinations() {
    let mut store = NoteStore::new()
        .with_note(1, note("一二", "99"))
        .with_note(2, note("十", ""))
        .with_note(3, note("", "4"));

    let report = regenerator()
        .regenerate(
            &mut store,
            &[1, 2, 3],
            &mut RecordingProgress::new(),
            &NeverTerminate,
        )
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.updated, vec![1, 2, 3]);
    assert_eq!(level(&store, 1), Some("2"));
    assert_eq!(level(&store, 2), Some("10"));
    assert_eq!(level(&store, 3), Some("0"));
}

#[test]
fn test_ignores_marker_tag() {
    let mut store = NoteStore::new()
        .with_note(1, note("三", ""))
        .with_note(2, note("三", "").with_tag("heisig_levels"));

    regenerator()
        .regenerate(&mut store, &[1, 2], &mut RecordingProgress::new(), &NeverTerminate)
        .unwrap();

    assert_eq!(level(&store, 1), Some("3"));
    assert_eq!(level(&store, 2), Some("3"));
}

#[test]
fn test_progress_indices_precede_each_record() {
    let mut store = NoteStore::new()
        .with_note(10, note("一", ""))
        .with_note(20, note("二", ""))
        .with_note(30, note("三", ""));
    let mut progress = RecordingProgress::new();

    regenerator()
        .regenerate(&mut store, &[30, 10, 20], &mut progress, &NeverTerminate)
        .unwrap();

    let label = LevelConfig::default().labels.progress;
    assert_eq!(
        progress.events(),
        &[
            ProgressEvent::Start(3),
            ProgressEvent::Update(0, label.clone()),
            ProgressEvent::Update(1, label.clone()),
            ProgressEvent::Update(2, label),
            ProgressEvent::Finish,
        ]
    );
}

#[test]
fn test_one_failing_record_does_not_abort_batch() {
    let mut store = NoteStore::new()
        .with_note(1, note("一", ""))
        .with_note(2, note("二", "").with_locked_field(DESTINATION))
        .with_note(3, note("三", ""))
        .with_note(4, Note::new().with_field(SOURCE, "四"))
        .with_note(5, note("五", "").with_unreadable_field(SOURCE));

    let report = regenerator()
        .regenerate(
            &mut store,
            &[1, 2, 3, 4, 5, 6],
            &mut RecordingProgress::new(),
            &NeverTerminate,
        )
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.processed, 6);
    assert_eq!(report.updated, vec![1, 3]);
    let failed: Vec<u64> = report.failed.iter().map(|(id, _)| *id).collect();
    assert_eq!(failed, vec![2, 4, 5, 6]);
    assert!(matches!(report.failed[1].1, RecordAccessError::FieldNotFound(_)));
    assert!(matches!(report.failed[3].1, RecordAccessError::RecordNotFound(_)));

    assert_eq!(level(&store, 1), Some("1"));
    assert_eq!(level(&store, 2), Some(""));
    assert_eq!(level(&store, 3), Some("3"));
}

#[test]
fn test_refreshes_derived_state_once() {
    let mut store = NoteStore::new()
        .with_note(1, note("一", ""))
        .with_note(2, note("二", ""));

    regenerator()
        .regenerate(&mut store, &[2, 1], &mut RecordingProgress::new(), &NeverTerminate)
        .unwrap();

    assert_eq!(store.refreshed(), &[vec![2u64, 1]]);
}

#[test]
fn test_multiple_field_pairs() {
    let config = LevelConfig::default().with_field_pair("Reading", "Reading Level");
    let table = Arc::new(SharedRankTable::preloaded(numeral_table()));
    let regenerator = BulkRegenerator::from_config(table, &config);
    let mut store = NoteStore::new().with_note(
        1,
        note("一", "")
            .with_field("Reading", "七")
            .with_field("Reading Level", "1"),
    );

    regenerator
        .regenerate(&mut store, &[1], &mut RecordingProgress::new(), &NeverTerminate)
        .unwrap();

    let note = store.note(1).unwrap();
    assert_eq!(note.get(DESTINATION), Some("1"));
    assert_eq!(note.get("Reading Level"), Some("7"));
}

#[test]
fn test_empty_batch() {
    let mut store = NoteStore::new();
    let mut progress = RecordingProgress::new();

    let report = regenerator()
        .regenerate(&mut store, &[], &mut progress, &NeverTerminate)
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(
        progress.events(),
        &[ProgressEvent::Start(0), ProgressEvent::Finish]
    );
}

#[test]
fn test_progress_cancel_stops_between_records() {
    let mut store = NoteStore::new()
        .with_note(1, note("一", ""))
        .with_note(2, note("二", ""))
        .with_note(3, note("三", ""));
    let mut progress = RecordingProgress::cancel_after(2);

    let report = regenerator()
        .regenerate(&mut store, &[1, 2, 3], &mut progress, &NeverTerminate)
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.processed, 2);
    assert_eq!(progress.indices(), vec![0, 1]);
    assert_eq!(progress.events().last(), Some(&ProgressEvent::Finish));
    assert_eq!(level(&store, 2), Some("2"));
    assert_eq!(level(&store, 3), Some(""));
    assert_eq!(store.refreshed(), &[vec![1u64, 2]]);
}

#[test]
fn test_external_termination() {
    let mut store = NoteStore::new().with_note(1, note("一", ""));
    let term = ExternalTermination::new(Arc::new(AtomicBool::new(false)));
    term.request();

    let report = regenerator()
        .regenerate(&mut store, &[1], &mut RecordingProgress::new(), &term)
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.processed, 0);
    assert_eq!(level(&store, 1), Some(""));
}

#[test]
fn test_missing_reference_file_aborts_before_progress() {
    let fixture = ReferenceFixture::missing();
    let table = Arc::new(SharedRankTable::new(fixture.source()));
    let regenerator = BulkRegenerator::from_config(table, &LevelConfig::default());
    let mut store = NoteStore::new().with_note(1, note("一", "5"));
    let mut progress = RecordingProgress::new();

    let err = regenerator
        .regenerate(&mut store, &[1], &mut progress, &NeverTerminate)
        .unwrap_err();

    assert!(matches!(
        err,
        RankLevelError::Configuration(ConfigurationError::Missing { .. })
    ));
    assert!(progress.events().is_empty());
    assert_eq!(level(&store, 1), Some("5"));
}

#[test]
fn test_undo_group_wraps_batch() {
    let mut store = NoteStore::new().with_note(1, note("八", ""));
    let mut progress = RecordingProgress::new();
    let mut undo = RecordingUndo::new();

    let report = regenerator()
        .regenerate_in_undo_group(
            &mut store,
            &[1],
            &mut progress,
            &mut undo,
            LABEL,
            &NeverTerminate,
        )
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(
        undo.events(),
        &[
            UndoEvent::Begin(LABEL.to_string()),
            UndoEvent::End(LABEL.to_string()),
        ]
    );
    assert_eq!(level(&store, 1), Some("8"));
}

#[test]
fn test_undo_group_not_opened_without_table() {
    let fixture = ReferenceFixture::missing();
    let table = Arc::new(SharedRankTable::new(fixture.source()));
    let regenerator = BulkRegenerator::from_config(table, &LevelConfig::default());
    let mut undo = RecordingUndo::new();

    let result = regenerator.regenerate_in_undo_group(
        &mut NoteStore::new(),
        &[1],
        &mut RecordingProgress::new(),
        &mut undo,
        LABEL,
        &NeverTerminate,
    );

    assert!(result.is_err());
    assert!(undo.events().is_empty());
}

#[test]
fn test_seeded_reference_file() {
    let fixture = ReferenceFixture::numerals();
    let table = Arc::new(SharedRankTable::new(fixture.source()));
    let regenerator = BulkRegenerator::from_config(table, &LevelConfig::default());
    let mut store = NoteStore::new()
        .with_note(1, note("一", ""))
        .with_note(2, note("二三", ""));

    regenerator
        .regenerate(&mut store, &[1, 2], &mut RecordingProgress::new(), &NeverTerminate)
        .unwrap();

    assert_eq!(level(&store, 1), Some("1"));
    assert_eq!(level(&store, 2), Some("3"));
}
