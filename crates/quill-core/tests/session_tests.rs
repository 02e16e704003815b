//! Editor session tests against the real filesystem.

use quill_core::{CoreError, EditorSession, UndoOutcome};
use quill_history::HistoryConfig;
use quill_test_utils::assertions::assert_file_equals;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_edit_undo_save_on_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("draft.txt");
    fs::write(&path, "one").unwrap();

    let mut session = EditorSession::new();
    session.open(&path).unwrap();
    session.edit("two").unwrap();
    session.edit("three").unwrap();

    assert_eq!(session.undo(), UndoOutcome::Restored);
    assert_eq!(session.content(), Some("two"));

    session.save_in_place().unwrap();
    assert_file_equals(&path, "two");
}

#[test]
fn test_save_to_new_path_leaves_original() {
    let temp = TempDir::new().unwrap();
    let original = temp.path().join("a.txt");
    let copy = temp.path().join("b.txt");
    fs::write(&original, "base").unwrap();

    let mut session = EditorSession::new();
    session.open(&original).unwrap();
    session.edit("modified").unwrap();
    session.save(&copy).unwrap();

    assert_file_equals(&original, "base");
    assert_file_equals(&copy, "modified");
}

#[test]
fn test_open_missing_keeps_state() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.txt");
    fs::write(&path, "kept").unwrap();

    let mut session = EditorSession::new();
    session.open(&path).unwrap();

    let err = session.open(temp.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
    assert_eq!(session.content(), Some("kept"));
    assert_eq!(session.file_path(), Some(path.as_path()));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.txt");
    fs::write(&path, "x").unwrap();

    let mut session = EditorSession::new();
    session.open(&path).unwrap();

    let target = temp.path().join("no/such/dir/out.txt");
    assert!(session.save(&target).is_err());
    assert!(!target.exists());
}

#[test]
fn test_bounded_history_on_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.txt");
    fs::write(&path, "0").unwrap();

    let mut session = EditorSession::new()
        .with_history_config(HistoryConfig { max_depth: Some(3) })
        .unwrap();
    session.open(&path).unwrap();
    for n in 1..=5 {
        session.edit(n.to_string()).unwrap();
    }

    assert_eq!(session.history().len(), 3);
    assert_eq!(session.undo(), UndoOutcome::Restored);
    assert_eq!(session.content(), Some("4"));
}
