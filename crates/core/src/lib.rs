//! Core library: path resolution, file enumeration, category assignment and
//! document export.

pub mod assignments;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod resolver;
pub mod scanner;
pub mod session;

pub use assignments::{CategoryStore, GroupedFiles};
pub use error::{InvalidPathError, RenderError, SessionError};
pub use export::{ExportBuffer, ExportKind};
pub use models::{Category, FileRecord};
pub use session::{Session, SessionState};
