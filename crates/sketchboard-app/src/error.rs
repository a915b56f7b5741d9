//! Application-level errors.

use sketchboard_core::ConfigError;
use sketchboard_core::storage::StorageError;
use sketchboard_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid event script: {0}")]
    Script(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
