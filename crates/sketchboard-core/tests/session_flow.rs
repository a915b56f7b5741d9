//! End-to-end flows across the controller, history and storage.

use kurbo::Point;
use pollster::block_on;
use sketchboard_core::storage::{
    AutoSaveManager, CanvasSize, FileStorage, SketchData, Storage,
};
use sketchboard_core::{
    CanvasEvent, KeyEvent, PointerGestureController, ShapeKind, SketchConfig, ToolKind,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn drag(c: &mut PointerGestureController, tool: ToolKind, from: (f64, f64), to: (f64, f64)) {
    c.set_tool(tool);
    c.pointer_down(from.into());
    c.pointer_move(to.into());
    c.pointer_up(to.into());
}

fn canvas() -> CanvasSize {
    CanvasSize {
        width: 800.0,
        height: 600.0,
    }
}

#[test]
fn undo_all_then_redo_all_restores_each_state() {
    let mut c = PointerGestureController::default();
    let mut states = vec![c.shapes().to_vec()];

    drag(&mut c, ToolKind::Rectangle, (10.0, 10.0), (100.0, 80.0));
    states.push(c.shapes().to_vec());
    drag(&mut c, ToolKind::Arrow, (0.0, 0.0), (50.0, 52.0));
    states.push(c.shapes().to_vec());
    drag(&mut c, ToolKind::Move, (10.0, 45.0), (20.0, 55.0));
    states.push(c.shapes().to_vec());
    drag(&mut c, ToolKind::Eraser, (60.0, 60.0), (60.0, 60.0));
    states.push(c.shapes().to_vec());
    c.set_tool(ToolKind::Text);
    c.pointer_down(Point::new(200.0, 200.0));
    assert!(c.submit_text("label"));
    states.push(c.shapes().to_vec());

    for expected in states.iter().rev().skip(1) {
        assert!(c.handle_key(&KeyEvent::ctrl("z")).handled);
        assert_eq!(c.shapes(), expected.as_slice());
    }
    assert!(!c.undo());

    for expected in states.iter().skip(1) {
        assert!(c.handle_key(&KeyEvent::ctrl("y")).handled);
        assert_eq!(c.shapes(), expected.as_slice());
    }
    assert!(!c.redo());
}

#[test]
fn autosave_round_trip_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let config = SketchConfig::default();
    let mut autosave = AutoSaveManager::new(storage.clone()).with_delay(config.autosave_delay());
    let mut c = PointerGestureController::new(config);

    let t0 = Instant::now();
    drag(&mut c, ToolKind::Line, (0.0, 0.0), (10.0, 1.0));
    drag(&mut c, ToolKind::Ellipse, (20.0, 20.0), (80.0, 60.0));
    for event in c.poll_events() {
        if let CanvasEvent::StoreChanged { revision } = event {
            autosave.schedule(revision, t0);
        }
    }

    assert!(autosave.poll(t0 + Duration::from_millis(100)).is_none());
    let ticket = autosave
        .poll(t0 + Duration::from_millis(500))
        .expect("deadline passed");
    let sketch = SketchData::current(c.shapes().to_vec(), canvas());
    assert!(block_on(autosave.save(ticket, &sketch)).unwrap());

    let mut restarted = AutoSaveManager::new(storage.clone());
    let loaded = block_on(restarted.load_current()).expect("saved sketch");
    let mut fresh = PointerGestureController::default();
    fresh.load(loaded.shapes);
    assert_eq!(fresh.shapes(), c.shapes());
    assert_eq!(fresh.shapes()[1].kind, ShapeKind::Ellipse);
    assert!(!fresh.can_undo());

    let listed = block_on(storage.list_sketches()).unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn corrupt_save_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".current.json"), "{\"shapes\": [").unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let mut autosave = AutoSaveManager::new(storage);

    let loaded = block_on(autosave.load_current());
    assert!(loaded.is_none());

    let mut c = PointerGestureController::default();
    c.load(loaded.map(|s| s.shapes).unwrap_or_default());
    assert!(c.shapes().is_empty());
}
