//! File-based storage implementation for native platforms.

use super::{BoxFuture, SketchData, SketchMetadata, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the working canvas. Sanitized ids never start with a dot, so
/// it cannot collide with a collection entry.
const CURRENT_FILE: &str = ".current.json";

/// File-based storage for native platforms.
///
/// Stores each sketch as a JSON file in a directory, plus the working canvas
/// in its own file.
pub struct FileStorage {
    /// Base directory for sketch storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/sketchboard/sketches/`
    /// On Windows: `%LOCALAPPDATA%\sketchboard\sketches\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("sketchboard").join("sketches"))
    }

    /// Get the file path for a sketch ID.
    fn sketch_path(&self, id: &str) -> PathBuf {
        // Sanitize ID to be safe for filenames
        let safe_id: String = id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    fn current_path(&self) -> PathBuf {
        self.base_path.join(CURRENT_FILE)
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

fn write_sketch(path: &Path, data: &SketchData) -> StorageResult<()> {
    let json = data
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

/// Missing files and files that no longer parse both read as `None`.
fn read_sketch(path: &Path) -> StorageResult<Option<SketchData>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    match SketchData::from_json(&json) {
        Ok(data) => Ok(Some(data)),
        Err(e) => {
            log::warn!("Ignoring malformed sketch {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

impl Storage for FileStorage {
    fn save_current_sketch(&self, data: &SketchData) -> BoxFuture<'_, StorageResult<()>> {
        let current = self.current_path();
        let entry = self.sketch_path(&data.id);
        let data = data.clone();
        Box::pin(async move {
            write_sketch(&current, &data)?;
            write_sketch(&entry, &data)
        })
    }

    fn get_current_sketch(&self) -> BoxFuture<'_, StorageResult<Option<SketchData>>> {
        let path = self.current_path();
        Box::pin(async move { read_sketch(&path) })
    }

    fn save_sketch(&self, id: &str, data: &SketchData) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.sketch_path(id);
        let data = data.clone();
        Box::pin(async move { write_sketch(&path, &data) })
    }

    fn load_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<Option<SketchData>>> {
        let path = self.sketch_path(id);
        Box::pin(async move { read_sketch(&path) })
    }

    fn delete_sketch(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.sketch_path(id);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn list_sketches(&self) -> BoxFuture<'_, StorageResult<Vec<SketchMetadata>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let mut sketches = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                let is_entry = path.extension().is_some_and(|e| e == "json")
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| !n.starts_with('.'));
                if !is_entry {
                    continue;
                }
                if let Some(data) = read_sketch(&path)? {
                    sketches.push(data.metadata());
                }
            }
            Ok(sketches)
        })
    }
}
