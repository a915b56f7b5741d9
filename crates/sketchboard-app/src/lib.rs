//! SketchBoard Application
//!
//! Headless session shell: replays recorded input against the gesture
//! controller, autosaves through the platform storage and renders SVG.

mod error;
mod script;
mod session;
mod shortcuts;

pub use error::{AppError, AppResult};
pub use script::{Script, ScriptEvent};
pub use session::{RunSummary, Session};
pub use shortcuts::{Shortcut, ShortcutRegistry};
