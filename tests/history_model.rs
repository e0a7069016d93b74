use eframe_redact::command::{Intensity, Operation, OperationHistory, ToolKind};
use eframe_redact::geometry::Rectangle;
use eframe_redact::{Bitmap, Command, EditorStore};

fn op(id: &str) -> Operation {
    Operation::with_id(
        id,
        ToolKind::Mosaic,
        Rectangle::new(0.0, 0.0, 20.0, 20.0),
        Intensity::new(4).unwrap(),
    )
}

fn ids(ops: &[Operation]) -> Vec<&str> {
    ops.iter().map(Operation::id).collect()
}

#[test]
fn test_append_after_undo_discards_future() {
    let mut history = OperationHistory::new();
    history.append(op("A"));
    history.append(op("B"));
    history.append(op("C"));
    assert_eq!(history.cursor(), Some(2));

    history.undo();
    history.undo();
    history.append(op("D"));

    assert_eq!(ids(history.operations()), vec!["A", "D"]);
    assert_eq!(history.cursor(), Some(1));
    assert!(!history.redo());
    assert_eq!(history.cursor(), Some(1));
}

#[test]
fn test_cursor_is_clamped_at_both_ends() {
    let mut history = OperationHistory::new();
    assert!(!history.undo());
    assert_eq!(history.cursor(), None);

    history.append(op("A"));
    assert!(history.undo());
    assert!(!history.undo());
    assert_eq!(history.cursor(), None);
    assert!(history.can_redo());

    assert!(history.redo());
    assert!(!history.redo());
    assert_eq!(history.cursor(), Some(0));
    assert!(!history.can_redo());
}

#[test]
fn test_undo_keeps_operations_for_redo() {
    let mut history = OperationHistory::new();
    history.append(op("A"));
    history.append(op("B"));
    history.undo();

    assert_eq!(ids(history.active()), vec!["A"]);
    assert_eq!(ids(history.future()), vec!["B"]);
    assert_eq!(history.len(), 2);
}

#[test]
fn test_loading_new_source_resets_history() {
    let mut store = EditorStore::default();
    store.dispatch(Command::LoadSource(Bitmap::new(64, 64))).unwrap();
    store
        .dispatch(Command::CommitSelection(Rectangle::new(1.0, 1.0, 30.0, 30.0)))
        .unwrap();
    store
        .dispatch(Command::CommitSelection(Rectangle::new(10.0, 10.0, 30.0, 30.0)))
        .unwrap();
    store.dispatch(Command::Undo).unwrap();
    assert!(store.can_redo());

    store.dispatch(Command::LoadSource(Bitmap::new(32, 32))).unwrap();
    assert!(store.history().is_empty());
    assert_eq!(store.history().cursor(), None);
    assert!(!store.can_undo());
    assert!(!store.can_redo());
}

#[test]
fn test_clear_edits_empties_the_log() {
    let mut store = EditorStore::default();
    store.dispatch(Command::LoadSource(Bitmap::new(64, 64))).unwrap();
    store
        .dispatch(Command::CommitSelection(Rectangle::new(0.0, 0.0, 40.0, 40.0)))
        .unwrap();

    store.dispatch(Command::ClearEdits).unwrap();
    assert!(store.history().is_empty());
    assert!(store.source().is_some());
}
