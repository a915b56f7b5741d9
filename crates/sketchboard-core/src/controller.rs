//! Pointer gesture state machine.
//!
//! [`PointerGestureController`] owns the shape store and its history. Raw
//! pointer and keyboard events go in; store mutations happen synchronously,
//! and observers learn about them by draining [`CanvasEvent`]s with
//! [`PointerGestureController::poll_events`].

use crate::config::SketchConfig;
use crate::geometry::{colliding_shapes, find_shape_at_point};
use crate::history::HistoryManager;
use crate::input::{KeyEvent, KeyOutcome, ShortcutAction, resolve_shortcut};
use crate::shapes::{Shape, ShapeId};
use crate::snap::snap_line_endpoint;
use crate::store::ShapeStore;
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// Where the host should show (or hide) the text entry overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOverlayRequest {
    pub position: Point,
    pub visible: bool,
}

/// Notifications queued for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Something visible changed; repaint the whole canvas.
    Repaint,
    /// The committed shapes changed. `revision` increases with every mutation.
    StoreChanged { revision: u64 },
    TextOverlay(TextOverlayRequest),
    ToolChanged(ToolKind),
}

/// The gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Dragging out a new shape that is not committed yet.
    Drawing { tool: ToolKind, provisional: Shape },
    /// Eraser held down. `recorded` is set once this gesture has pushed history.
    Erasing { recorded: bool },
    /// Dragging a committed shape. `drag_offset` is the pointer position
    /// relative to the shape's start anchor at grab time.
    Moving { shape: Shape, drag_offset: Vec2 },
    /// Waiting for the text overlay to be submitted or cancelled.
    TextPending { anchor: Point },
}

/// Translates pointer and keyboard input into shape store mutations.
#[derive(Debug)]
pub struct PointerGestureController {
    store: ShapeStore,
    history: HistoryManager,
    tool: ToolKind,
    state: GestureState,
    hovered: Option<ShapeId>,
    overlay_focused: bool,
    config: SketchConfig,
    revision: u64,
    events: Vec<CanvasEvent>,
}

impl Default for PointerGestureController {
    fn default() -> Self {
        Self::new(SketchConfig::default())
    }
}

impl PointerGestureController {
    pub fn new(config: SketchConfig) -> Self {
        Self {
            store: ShapeStore::new(),
            history: HistoryManager::new(),
            tool: ToolKind::default(),
            state: GestureState::Idle,
            hovered: None,
            overlay_focused: false,
            config,
            revision: 0,
            events: Vec::new(),
        }
    }

    // --- Accessors ---

    pub fn shapes(&self) -> &[Shape] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Shape under the pointer while the move or eraser tool is idle, or the
    /// shape being dragged.
    pub fn hovered(&self) -> Option<&ShapeId> {
        self.hovered.as_ref()
    }

    /// The provisional shape of an in-progress drawing gesture.
    pub fn transient_shape(&self) -> Option<&Shape> {
        match &self.state {
            GestureState::Drawing { provisional, .. } => Some(provisional),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn is_overlay_focused(&self) -> bool {
        self.overlay_focused
    }

    /// Drain queued notifications, oldest first.
    pub fn poll_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Session ---

    /// Replace the store with loaded shapes. History is left untouched and no
    /// `StoreChanged` is queued, since nothing new needs saving.
    pub fn load(&mut self, shapes: Vec<Shape>) {
        self.store = ShapeStore::from_shapes(shapes);
        self.state = GestureState::Idle;
        self.hovered = None;
        log::info!("Loaded {} shapes", self.store.len());
        self.request_repaint();
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.abandon_gesture();
        if tool != self.tool {
            log::debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
            self.tool = tool;
            self.events.push(CanvasEvent::ToolChanged(tool));
        }
        if !tool.shows_hover() {
            self.hovered = None;
        }
        self.request_repaint();
    }

    /// Tell the controller whether the text overlay holds keyboard focus.
    /// Shortcuts are ignored while it does.
    pub fn set_overlay_focused(&mut self, focused: bool) {
        self.overlay_focused = focused;
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, point: Point) {
        if !matches!(self.state, GestureState::Idle) {
            log::debug!("Ignoring pointer down during {:?}", self.state);
            return;
        }

        match self.tool {
            ToolKind::Text => {
                self.state = GestureState::TextPending { anchor: point };
                self.overlay_focused = true;
                self.events.push(CanvasEvent::TextOverlay(TextOverlayRequest {
                    position: point,
                    visible: true,
                }));
            }
            ToolKind::Eraser => {
                self.state = GestureState::Erasing { recorded: false };
                self.erase_at(point);
            }
            ToolKind::Move => {
                let tolerance = self.config.hit_tolerance;
                if let Some(shape) = find_shape_at_point(point, self.store.as_slice(), &tolerance)
                {
                    let shape = shape.clone();
                    log::debug!("Grabbed {} {}", shape.kind().name(), shape.id());
                    self.history.push(self.store.snapshot());
                    self.hovered = Some(shape.id().clone());
                    self.state = GestureState::Moving {
                        drag_offset: point - shape.start_point,
                        shape,
                    };
                }
            }
            tool => {
                if let Some(kind) = tool.shape_kind() {
                    let provisional =
                        Shape::new(kind, point, point, self.config.default_style.clone());
                    self.state = GestureState::Drawing { tool, provisional };
                }
            }
        }
        self.request_repaint();
    }

    pub fn pointer_move(&mut self, point: Point) {
        match &mut self.state {
            GestureState::Drawing { provisional, .. } => {
                *provisional = provisional.with_end_point(point);
                self.request_repaint();
            }
            GestureState::Erasing { .. } => self.erase_at(point),
            GestureState::Moving { shape, drag_offset } => {
                let delta = (point - *drag_offset) - shape.start_point;
                let moved = shape.translate(delta.x, delta.y);
                if self.store.replace(moved.clone()) {
                    *shape = moved;
                    self.store_changed();
                }
            }
            GestureState::Idle if self.tool.shows_hover() => {
                let tolerance = self.config.hit_tolerance;
                let hovered =
                    find_shape_at_point(point, self.store.as_slice(), &tolerance)
                        .map(|s| s.id().clone());
                if hovered != self.hovered {
                    self.hovered = hovered;
                    self.request_repaint();
                }
            }
            GestureState::Idle | GestureState::TextPending { .. } => {}
        }
    }

    pub fn pointer_up(&mut self, point: Point) {
        self.finish_gesture(Some(point));
    }

    /// The pointer left the canvas. A drawing gesture is committed where the
    /// provisional shape currently ends.
    pub fn pointer_leave(&mut self) {
        self.finish_gesture(None);
        if matches!(self.state, GestureState::Idle) && self.hovered.take().is_some() {
            self.request_repaint();
        }
    }

    fn finish_gesture(&mut self, point: Option<Point>) {
        match std::mem::take(&mut self.state) {
            GestureState::Drawing { provisional, .. } => {
                let end = point.unwrap_or(provisional.end_point);
                self.commit_drawing(provisional, end);
            }
            GestureState::Erasing { .. } => self.request_repaint(),
            GestureState::Moving { shape, .. } => {
                log::debug!("Released {}", shape.id());
                self.request_repaint();
            }
            // The overlay keeps its anchor until it resolves
            pending @ GestureState::TextPending { .. } => self.state = pending,
            GestureState::Idle => {}
        }
    }

    fn commit_drawing(&mut self, provisional: Shape, end: Point) {
        let end = if provisional.kind().snaps_angle() {
            snap_line_endpoint(
                provisional.start_point,
                end,
                self.config.angle_snap_increment,
            )
            .point
        } else {
            end
        };
        let shape = provisional.with_end_point(end);
        log::info!(
            "Committed {} {} ({:?} -> {:?})",
            shape.kind().name(),
            shape.id(),
            shape.start_point,
            shape.end_point
        );
        self.history.push(self.store.snapshot());
        self.store.add(shape);
        self.store_changed();
    }

    fn erase_at(&mut self, point: Point) {
        let GestureState::Erasing { recorded } = &mut self.state else {
            return;
        };
        let ids = colliding_shapes(point, self.store.as_slice(), &self.config.hit_tolerance);
        if ids.is_empty() {
            return;
        }
        // One history entry per gesture, made at the first actual deletion
        if !*recorded {
            *recorded = true;
            self.history.push(self.store.snapshot());
        }
        let removed = self.store.remove_ids(&ids);
        log::info!("Erased {removed} shapes");
        if self.hovered.as_ref().is_some_and(|id| ids.contains(id)) {
            self.hovered = None;
        }
        self.store_changed();
    }

    // --- Text overlay ---

    /// Commit the overlay's text at the pending anchor. Whitespace-only text
    /// is discarded. Returns whether a shape was added.
    pub fn submit_text(&mut self, text: &str) -> bool {
        let GestureState::TextPending { anchor } = self.state else {
            return false;
        };
        let content = text.trim();
        let committed = !content.is_empty();
        if committed {
            let shape = Shape::text(anchor, content, self.config.default_style.clone());
            log::info!("Committed text {} at {:?}", shape.id(), anchor);
            self.history.push(self.store.snapshot());
            self.store.add(shape);
            self.store_changed();
        }
        self.close_overlay(anchor);
        committed
    }

    pub fn cancel_text(&mut self) {
        if let GestureState::TextPending { anchor } = self.state {
            self.close_overlay(anchor);
        }
    }

    fn close_overlay(&mut self, anchor: Point) {
        self.state = GestureState::Idle;
        self.overlay_focused = false;
        self.events.push(CanvasEvent::TextOverlay(TextOverlayRequest {
            position: anchor,
            visible: false,
        }));
        self.request_repaint();
    }

    // --- History ---

    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.abandon_pointer_gesture();
        match self.history.undo(self.store.snapshot()) {
            Some(previous) => {
                self.store.restore(previous);
                self.prune_hover();
                log::debug!("Undo ({} left)", self.history.undo_len());
                self.store_changed();
                true
            }
            None => false,
        }
    }

    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.abandon_pointer_gesture();
        match self.history.redo(self.store.snapshot()) {
            Some(next) => {
                self.store.restore(next);
                self.prune_hover();
                log::debug!("Redo ({} left)", self.history.redo_len());
                self.store_changed();
                true
            }
            None => false,
        }
    }

    /// Remove every shape and reset history.
    pub fn clear(&mut self) {
        self.abandon_gesture();
        self.history.push(self.store.snapshot());
        self.store.clear();
        self.history.clear();
        self.hovered = None;
        log::info!("Canvas cleared");
        self.store_changed();
    }

    // --- Keyboard ---

    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        if self.overlay_focused {
            return KeyOutcome::IGNORED;
        }
        match resolve_shortcut(event) {
            Some(ShortcutAction::Undo) => {
                self.undo();
                KeyOutcome {
                    handled: true,
                    prevent_default: true,
                }
            }
            Some(ShortcutAction::Redo) => {
                self.redo();
                KeyOutcome {
                    handled: true,
                    prevent_default: true,
                }
            }
            Some(ShortcutAction::SelectTool(tool)) => {
                self.set_tool(tool);
                KeyOutcome {
                    handled: true,
                    prevent_default: false,
                }
            }
            None => KeyOutcome::IGNORED,
        }
    }

    // --- Internals ---

    /// Drop any gesture in progress without committing it.
    fn abandon_gesture(&mut self) {
        if let GestureState::TextPending { anchor } = self.state {
            self.close_overlay(anchor);
        }
        self.abandon_pointer_gesture();
    }

    /// Like [`Self::abandon_gesture`] but leaves a pending text overlay open.
    fn abandon_pointer_gesture(&mut self) {
        if matches!(
            self.state,
            GestureState::Drawing { .. } | GestureState::Erasing { .. } | GestureState::Moving { .. }
        ) {
            log::debug!("Abandoning gesture {:?}", self.state);
            self.state = GestureState::Idle;
            self.request_repaint();
        }
    }

    fn prune_hover(&mut self) {
        if self.hovered.as_ref().is_some_and(|id| !self.store.contains(id)) {
            self.hovered = None;
        }
    }

    fn store_changed(&mut self) {
        self.revision += 1;
        self.events.push(CanvasEvent::StoreChanged {
            revision: self.revision,
        });
        self.request_repaint();
    }

    /// Queue a repaint unless one is already pending.
    fn request_repaint(&mut self) {
        if !self.events.contains(&CanvasEvent::Repaint) {
            self.events.push(CanvasEvent::Repaint);
        }
    }
}
