//! In-memory storage implementation.

use super::{BoxFuture, SketchData, SketchMetadata, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inner {
    current: Option<SketchData>,
    sketches: HashMap<String, SketchData>,
}

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }
}

impl Storage for MemoryStorage {
    fn save_current_sketch(&self, data: &SketchData) -> BoxFuture<'_, StorageResult<()>> {
        let data = data.clone();
        Box::pin(async move {
            let mut inner = self.write()?;
            inner.sketches.insert(data.id.clone(), data.clone());
            inner.current = Some(data);
            Ok(())
        })
    }

    fn get_current_sketch(&self) -> BoxFuture<'_, StorageResult<Option<SketchData>>> {
        Box::pin(async move { Ok(self.read()?.current.clone()) })
    }

    fn save_sketch(&self, id: &str, data: &SketchData) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let data = data.clone();
        Box::pin(async move {
            self.write()?.sketches.insert(id, data);
            Ok(())
        })
    }

    fn load_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<Option<SketchData>>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.sketches.get(&id).cloned()) })
    }

    fn delete_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.write()?.sketches.remove(&id);
            Ok(())
        })
    }

    fn list_sketches(&self) -> BoxFuture<'_, StorageResult<Vec<SketchMetadata>>> {
        Box::pin(async move {
            let inner = self.read()?;
            let list = inner.sketches.values().map(SketchData::metadata).collect();
            Ok(list)
        })
    }
}
