//! Script replay against file storage and the SVG backend.

use sketchboard_app::{Script, Session};
use sketchboard_core::SketchConfig;
use sketchboard_core::storage::FileStorage;
use sketchboard_render::SvgSurface;
use std::sync::Arc;
use std::time::Instant;

const DRAW_THEN_ERASE: &str = r#"[
    {"type": "setTool", "tool": "rectangle"},
    {"type": "pointerDown", "x": 10, "y": 10},
    {"type": "pointerMove", "x": 100, "y": 80},
    {"type": "pointerUp", "x": 100, "y": 80},
    {"type": "wait", "ms": 600},
    {"type": "key", "key": "e"},
    {"type": "pointerDown", "x": 50, "y": 50},
    {"type": "pointerUp", "x": 50, "y": 50},
    {"type": "wait", "ms": 600}
]"#;

#[test]
fn erase_then_undo_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());

    let mut session = pollster::block_on(Session::start(SketchConfig::default(), storage.clone()));
    let summary = pollster::block_on(session.run(&Script::from_json(DRAW_THEN_ERASE).unwrap(), Instant::now()));
    assert_eq!(summary.events, 9);
    assert_eq!(summary.saves, 2);
    assert_eq!(summary.shapes, 0);

    let undo = Script::from_json(r#"[{"type": "key", "key": "z", "modifiers": {"ctrl": true}}]"#).unwrap();
    let summary = pollster::block_on(session.run(&undo, Instant::now()));
    assert_eq!(summary.shapes, 1);
    assert_eq!(summary.saves, 1);

    let restarted = pollster::block_on(Session::start(SketchConfig::default(), storage));
    assert_eq!(restarted.controller().shapes(), session.controller().shapes());
}

#[test]
fn rendered_output_matches_canvas_size() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let config = SketchConfig::from_json(r#"{"canvasWidth": 400, "canvasHeight": 300}"#).unwrap();

    let mut session = pollster::block_on(Session::start(config, storage));
    let script = Script::from_json(
        r#"[
            {"type": "setTool", "tool": "text"},
            {"type": "pointerDown", "x": 20, "y": 20},
            {"type": "submitText", "text": "hello"}
        ]"#,
    )
    .unwrap();
    pollster::block_on(session.run(&script, Instant::now()));

    let mut surface = SvgSurface::new(session.canvas_size());
    session.render(&mut surface).unwrap();
    let out = dir.path().join("out.svg");
    surface.save(&out).unwrap();

    let svg = std::fs::read_to_string(out).unwrap();
    assert!(svg.contains("width=\"400\" height=\"300\""));
    assert!(svg.contains(">hello</text>"));
}
