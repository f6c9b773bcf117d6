use crate::error::ClipboardError;

/// Somewhere a file path can be copied to. Sessions work without one.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(String),
    /// No clipboard, or it refused; the caller should show the path instead.
    Manual(String),
}

impl CopyOutcome {
    pub fn path(&self) -> &str {
        match self {
            CopyOutcome::Copied(p) | CopyOutcome::Manual(p) => p,
        }
    }
}
