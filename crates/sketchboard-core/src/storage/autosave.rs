//! Debounced auto-save of the working canvas.
//!
//! The manager is a single-slot scheduler driven by the host clock: every
//! store change pushes the deadline back, and [`AutoSaveManager::poll`] hands
//! out a [`SaveTicket`] once the canvas has been quiet for the delay.

use crate::storage::{SketchData, Storage, StorageResult};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default quiet period before saving, in milliseconds.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 500;

/// Permission to save a particular store revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    revision: u64,
}

impl SaveTicket {
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Manages debounced persistence of the working canvas.
pub struct AutoSaveManager<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Quiet period before a save fires.
    delay: Duration,
    /// When the pending save becomes due.
    deadline: Option<Instant>,
    /// Newest revision handed to `schedule`.
    latest_revision: u64,
    /// Newest revision known to be persisted.
    saved_revision: u64,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a new auto-save manager with the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            delay: Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS),
            deadline: None,
            latest_revision: 0,
            saved_revision: 0,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Note a store change. Replaces any pending deadline with `now + delay`.
    pub fn schedule(&mut self, revision: u64, now: Instant) {
        self.latest_revision = self.latest_revision.max(revision);
        self.deadline = Some(now + self.delay);
        log::debug!("Autosave scheduled for revision {revision}");
    }

    /// Whether changes exist that no completed save covers.
    pub fn is_dirty(&self) -> bool {
        self.latest_revision > self.saved_revision
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Hand out a ticket once the deadline has passed. Each deadline yields
    /// at most one ticket.
    pub fn poll(&mut self, now: Instant) -> Option<SaveTicket> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(SaveTicket {
                    revision: self.latest_revision,
                })
            }
            _ => None,
        }
    }

    /// Hand out a ticket now if anything is unsaved, skipping the quiet
    /// period. Used on shutdown.
    pub fn flush(&mut self) -> Option<SaveTicket> {
        self.deadline = None;
        self.is_dirty().then_some(SaveTicket {
            revision: self.latest_revision,
        })
    }

    /// Record that the save for `ticket` finished. Returns whether the manager
    /// is now clean; a ticket older than the newest scheduled revision leaves
    /// it dirty.
    pub fn complete(&mut self, ticket: SaveTicket) -> bool {
        self.saved_revision = self.saved_revision.max(ticket.revision);
        if self.is_dirty() {
            log::debug!(
                "Save of revision {} finished after revision {} was scheduled",
                ticket.revision,
                self.latest_revision
            );
        }
        !self.is_dirty()
    }

    /// Persist `sketch` for `ticket`. A failed save is logged and leaves the
    /// dirty flag untouched.
    pub async fn save(&mut self, ticket: SaveTicket, sketch: &SketchData) -> StorageResult<bool> {
        match self.storage.save_current_sketch(sketch).await {
            Ok(()) => {
                log::info!(
                    "Saved {} shapes (revision {})",
                    sketch.shapes.len(),
                    ticket.revision
                );
                Ok(self.complete(ticket))
            }
            Err(e) => {
                log::error!("Autosave failed: {e}");
                Err(e)
            }
        }
    }

    /// Load the working canvas saved by a previous session. Failures are
    /// logged and read as "nothing saved".
    pub async fn load_current(&mut self) -> Option<SketchData> {
        match self.storage.get_current_sketch().await {
            Ok(sketch) => sketch,
            Err(e) => {
                log::warn!("Failed to load saved sketch: {e}");
                None
            }
        }
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

/// Type alias for the auto-save manager with platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformAutoSaveManager = AutoSaveManager<PlatformStorage>;
