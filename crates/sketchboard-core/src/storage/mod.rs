//! Storage abstraction for persistence.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use autosave::{AutoSaveManager, DEFAULT_AUTOSAVE_DELAY_MS, SaveTicket};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use autosave::{PlatformAutoSaveManager, PlatformStorage, create_default_storage};
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::shapes::Shape;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Id under which the working canvas is saved.
pub const CURRENT_SKETCH_ID: &str = "current-sketch";

/// Display name of the working canvas.
pub const CURRENT_SKETCH_NAME: &str = "Current Sketch";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Sketch not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Canvas dimensions recorded with a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// A persisted sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchData {
    pub id: String,
    pub name: String,
    pub shapes: Vec<Shape>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub canvas_size: CanvasSize,
}

impl SketchData {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        shapes: Vec<Shape>,
        canvas_size: CanvasSize,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            shapes,
            created_at: now,
            updated_at: now,
            canvas_size,
        }
    }

    /// The working canvas, as written by autosave.
    pub fn current(shapes: Vec<Shape>, canvas_size: CanvasSize) -> Self {
        Self::new(CURRENT_SKETCH_ID, CURRENT_SKETCH_NAME, shapes, canvas_size)
    }

    pub fn metadata(&self) -> SketchMetadata {
        SketchMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Listing entry for a saved sketch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchMetadata {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trait for sketch storage backends.
///
/// Loads return `Ok(None)` both for a missing sketch and for stored data that
/// no longer parses; the latter is logged.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save the working canvas. Also stores it in the sketch collection.
    fn save_current_sketch(&self, data: &SketchData) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the working canvas, if one was saved.
    fn get_current_sketch(&self) -> BoxFuture<'_, StorageResult<Option<SketchData>>>;

    /// Save a sketch into the collection under `id`.
    fn save_sketch(&self, id: &str, data: &SketchData) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a sketch from the collection.
    fn load_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<Option<SketchData>>>;

    /// Delete a sketch. Deleting a missing sketch succeeds.
    fn delete_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Metadata of every sketch in the collection.
    fn list_sketches(&self) -> BoxFuture<'_, StorageResult<Vec<SketchMetadata>>>;
}

/// Trait for sketch storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save the working canvas. Also stores it in the sketch collection.
    fn save_current_sketch(&self, data: &SketchData) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the working canvas, if one was saved.
    fn get_current_sketch(&self) -> BoxFuture<'_, StorageResult<Option<SketchData>>>;

    /// Save a sketch into the collection under `id`.
    fn save_sketch(&self, id: &str, data: &SketchData) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a sketch from the collection.
    fn load_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<Option<SketchData>>>;

    /// Delete a sketch. Deleting a missing sketch succeeds.
    fn delete_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Metadata of every sketch in the collection.
    fn list_sketches(&self) -> BoxFuture<'_, StorageResult<Vec<SketchMetadata>>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
