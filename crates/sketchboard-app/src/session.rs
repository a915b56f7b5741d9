//! A headless editing session.
//!
//! [`Session`] owns the gesture controller, the drawing engine and the
//! autosave manager, and plays the host role for them: it drains controller
//! events, schedules saves, tracks the text overlay and repaints on request.

use crate::script::{Script, ScriptEvent};
use kurbo::Size;
use peniko::Color;
use sketchboard_core::storage::{AutoSaveManager, CanvasSize, SketchData, Storage};
use sketchboard_core::{CanvasEvent, PointerGestureController, SketchConfig, TextOverlayRequest};
use sketchboard_render::{DrawingEngine, RenderContext, RenderResult, Surface};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counters reported after replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events: usize,
    pub saves: usize,
    pub shapes: usize,
}

pub struct Session<S: Storage> {
    controller: PointerGestureController,
    engine: DrawingEngine,
    autosave: AutoSaveManager<S>,
    canvas_size: Size,
    background: Color,
    overlay: Option<TextOverlayRequest>,
    needs_repaint: bool,
}

impl<S: Storage> Session<S> {
    /// Start a session, restoring the working canvas saved in `storage`.
    /// A missing or unreadable save starts an empty canvas.
    pub async fn start(config: SketchConfig, storage: Arc<S>) -> Self {
        let mut autosave = AutoSaveManager::new(storage).with_delay(config.autosave_delay());
        let engine = DrawingEngine::new().with_corner_radius(config.corner_radius);
        let canvas_size = Size::new(config.canvas_width, config.canvas_height);
        let background = config.background.into();
        let mut controller = PointerGestureController::new(config);

        match autosave.load_current().await {
            Some(sketch) => controller.load(sketch.shapes),
            None => log::info!("No saved sketch, starting with an empty canvas"),
        }

        let mut session = Self {
            controller,
            engine,
            autosave,
            canvas_size,
            background,
            overlay: None,
            needs_repaint: true,
        };
        session.drain_events(Instant::now());
        session
    }

    pub fn controller(&self) -> &PointerGestureController {
        &self.controller
    }

    pub fn autosave(&self) -> &AutoSaveManager<S> {
        &self.autosave
    }

    /// The text overlay currently shown, if any.
    pub fn overlay(&self) -> Option<TextOverlayRequest> {
        self.overlay
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Feed one input event to the controller at time `now`.
    pub fn apply(&mut self, event: &ScriptEvent, now: Instant) {
        let c = &mut self.controller;
        match event {
            ScriptEvent::PointerDown { .. } => {
                if let Some(point) = event.point() {
                    c.pointer_down(point);
                }
            }
            ScriptEvent::PointerMove { .. } => {
                if let Some(point) = event.point() {
                    c.pointer_move(point);
                }
            }
            ScriptEvent::PointerUp { .. } => {
                if let Some(point) = event.point() {
                    c.pointer_up(point);
                }
            }
            ScriptEvent::PointerLeave => c.pointer_leave(),
            ScriptEvent::SetTool { tool } => c.set_tool(*tool),
            ScriptEvent::Key { .. } => {
                if let Some(key) = event.key_event() {
                    let outcome = c.handle_key(&key);
                    if !outcome.handled {
                        log::debug!("Ignored key {:?}", key.key);
                    }
                }
            }
            ScriptEvent::SubmitText { text } => {
                c.submit_text(text);
            }
            ScriptEvent::CancelText => c.cancel_text(),
            ScriptEvent::Undo => {
                c.undo();
            }
            ScriptEvent::Redo => {
                c.redo();
            }
            ScriptEvent::Clear => c.clear(),
            ScriptEvent::Wait { .. } => {}
        }
        self.drain_events(now);
    }

    fn drain_events(&mut self, now: Instant) {
        for event in self.controller.poll_events() {
            match event {
                CanvasEvent::Repaint => self.needs_repaint = true,
                CanvasEvent::StoreChanged { revision } => self.autosave.schedule(revision, now),
                CanvasEvent::TextOverlay(request) => {
                    self.overlay = request.visible.then_some(request);
                }
                CanvasEvent::ToolChanged(tool) => log::debug!("Active tool: {}", tool.name()),
            }
        }
    }

    /// Snapshot of the working canvas for persistence.
    pub fn sketch(&self) -> SketchData {
        SketchData::current(
            self.controller.shapes().to_vec(),
            CanvasSize {
                width: self.canvas_size.width,
                height: self.canvas_size.height,
            },
        )
    }

    /// Run the autosave if its quiet period has elapsed. Returns whether a
    /// save completed; failures are logged and retried on the next change.
    pub async fn tick(&mut self, now: Instant) -> bool {
        match self.autosave.poll(now) {
            Some(ticket) => {
                let sketch = self.sketch();
                self.autosave.save(ticket, &sketch).await.is_ok()
            }
            None => false,
        }
    }

    /// Save any unsaved changes immediately.
    pub async fn flush(&mut self) -> bool {
        match self.autosave.flush() {
            Some(ticket) => {
                let sketch = self.sketch();
                self.autosave.save(ticket, &sketch).await.is_ok()
            }
            None => false,
        }
    }

    /// Repaint the whole canvas onto `surface`.
    pub fn render<T: Surface + ?Sized>(&mut self, surface: &mut T) -> RenderResult<()> {
        let ctx = RenderContext::new(self.controller.shapes(), self.canvas_size)
            .with_transient(self.controller.transient_shape())
            .with_highlight(self.controller.hovered())
            .with_background(self.background);
        self.engine.render(surface, &ctx)?;
        self.needs_repaint = false;
        Ok(())
    }

    /// Replay `script` on a virtual clock starting at `start`, then flush.
    pub async fn run(&mut self, script: &Script, start: Instant) -> RunSummary {
        log::debug!(
            "Replaying {} events spanning {:?}",
            script.events.len(),
            script.duration()
        );
        let mut now = start;
        let mut summary = RunSummary::default();
        for event in &script.events {
            if let ScriptEvent::Wait { ms } = event {
                now += Duration::from_millis(*ms);
            }
            self.apply(event, now);
            summary.events += 1;
            if self.tick(now).await {
                summary.saves += 1;
            }
        }
        if self.flush().await {
            summary.saves += 1;
        }
        summary.shapes = self.controller.shapes().len();
        log::info!(
            "Replayed {} events: {} shapes, {} saves",
            summary.events,
            summary.shapes,
            summary.saves
        );
        summary
    }
}
