//! Per-user session: one directory listing, its category choices and the
//! documents generated from them.
//!
//! A session moves through explicit states driven by user actions:
//!
//! ```text
//! AwaitingPath --open--> ListingFiles --> AwaitingAssignment --generate--> Exporting --> Ready
//!       ^                                        ^                                     |
//!       +------------ open (any state) ----------+------------ assign (changed) -------+
//! ```
//!
//! Sessions share no state with each other; a host serving several users
//! keeps one `Session` per user.

use crate::assignments::{Assignment, AssignmentMap, CategoryStore, GroupedFiles};
use crate::clipboard::{Clipboard, CopyOutcome};
use crate::config::AppConfig;
use crate::error::{RenderError, SessionError};
use crate::export::{self, ExportBuffer, ExportKind};
use crate::models::{Category, FileRecord};
use crate::resolver::{self, DriveMappings};
use crate::scanner::Scanner;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingPath,
    ListingFiles,
    AwaitingAssignment,
    Exporting,
    Ready,
}

/// Result of one generate request.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub generated: Vec<ExportKind>,
    pub failures: Vec<RenderError>,
}

pub struct Session {
    state: SessionState,
    drives: DriveMappings,
    scanner: Scanner,
    default_category: Category,
    display_base: Option<String>,
    resolved_base: Option<String>,
    files: Vec<FileRecord>,
    selections: Vec<Category>,
    store: CategoryStore,
    formats: BTreeSet<ExportKind>,
    exports: BTreeMap<ExportKind, ExportBuffer>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Result<Self, SessionError> {
        let scanner = Scanner::new(&config.scan.exclude)?;
        debug!("session started");
        Ok(Self {
            state: SessionState::AwaitingPath,
            drives: DriveMappings::from_config(&config.drives),
            scanner,
            default_category: config.export.default_category,
            display_base: None,
            resolved_base: None,
            files: Vec::new(),
            selections: Vec::new(),
            store: CategoryStore::new(),
            formats: config.export.formats.iter().copied().collect(),
            exports: BTreeMap::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// The path as the user typed it, once a listing exists.
    pub fn display_base(&self) -> Option<&str> {
        self.display_base.as_deref()
    }

    pub fn resolved_base(&self) -> Option<&str> {
        self.resolved_base.as_deref()
    }

    pub fn category_of(&self, index: usize) -> Option<Category> {
        self.selections.get(index).copied()
    }

    pub fn formats(&self) -> &BTreeSet<ExportKind> {
        &self.formats
    }

    pub fn grouped(&self) -> GroupedFiles {
        self.store.grouped()
    }

    /// Resolves and lists `path`, replacing any previous listing. Every file
    /// starts in the default category.
    pub fn open(&mut self, path: &str) -> Result<&[FileRecord], SessionError> {
        self.state = SessionState::ListingFiles;
        let listed = resolver::resolve(path, &self.drives)
            .map_err(SessionError::from)
            .and_then(|resolved| {
                let files = self.scanner.enumerate(&resolved, path)?;
                Ok((resolved, files))
            });
        let (resolved, files) = match listed {
            Ok(listed) => listed,
            Err(err) => {
                warn!(path, error = %err, "cannot open directory");
                self.reset();
                return Err(err);
            }
        };

        info!(path, %resolved, files = files.len(), "directory listed");
        self.selections = vec![self.default_category; files.len()];
        self.files = files;
        self.display_base = Some(path.to_string());
        self.resolved_base = Some(resolved);
        self.exports.clear();
        self.sync_store();
        self.state = SessionState::AwaitingAssignment;
        Ok(&self.files)
    }

    /// Files `index` (0-based, listing order) under `category`.
    pub fn assign(&mut self, index: usize, category: Category) -> Result<(), SessionError> {
        self.require_listing()?;
        let len = self.selections.len();
        let slot = self
            .selections
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;
        *slot = category;
        self.sync_store();
        Ok(())
    }

    /// Files every listed file called `name` under `category`; returns how many matched.
    pub fn assign_name(&mut self, name: &str, category: Category) -> Result<usize, SessionError> {
        self.require_listing()?;
        let mut matched = 0;
        for (file, slot) in self.files.iter().zip(self.selections.iter_mut()) {
            if file.name == name {
                *slot = category;
                matched += 1;
            }
        }
        if matched == 0 {
            return Err(SessionError::UnknownFile(name.to_string()));
        }
        self.sync_store();
        Ok(matched)
    }

    pub fn set_formats(&mut self, formats: impl IntoIterator<Item = ExportKind>) {
        self.formats = formats.into_iter().collect();
        debug!(formats = ?self.formats, "export formats selected");
    }

    /// Discards earlier documents and renders every selected format.
    pub fn generate(&mut self) -> Result<ExportReport, SessionError> {
        self.require_listing()?;
        self.state = SessionState::Exporting;
        self.exports.clear();

        let batch = export::render_selected(&self.formats, &self.store.grouped());
        let report = ExportReport {
            generated: batch.buffers.keys().copied().collect(),
            failures: batch.failures,
        };
        self.exports = batch.buffers;
        self.state = SessionState::Ready;
        info!(
            generated = report.generated.len(),
            failed = report.failures.len(),
            "exports generated"
        );
        Ok(report)
    }

    /// A generated document, if its format is still selected.
    pub fn export(&self, kind: ExportKind) -> Option<&ExportBuffer> {
        if !self.formats.contains(&kind) {
            return None;
        }
        self.exports.get(&kind)
    }

    pub fn exports(&self) -> impl Iterator<Item = &ExportBuffer> {
        self.exports
            .values()
            .filter(|buffer| self.formats.contains(&buffer.kind))
    }

    /// Copies the client-facing path of file `index`.
    pub fn copy_path(
        &self,
        index: usize,
        clipboard: Option<&mut dyn Clipboard>,
    ) -> Result<CopyOutcome, SessionError> {
        self.require_listing()?;
        let file = self.files.get(index).ok_or(SessionError::IndexOutOfRange {
            index,
            len: self.files.len(),
        })?;
        let path = file.relative_path.clone();
        let Some(clipboard) = clipboard else {
            return Ok(CopyOutcome::Manual(path));
        };
        match clipboard.copy(&path) {
            Ok(()) => Ok(CopyOutcome::Copied(path)),
            Err(err) => {
                warn!(error = %err, "clipboard copy failed");
                Ok(CopyOutcome::Manual(path))
            }
        }
    }

    pub fn close(self) {
        debug!(
            files = self.files.len(),
            exports = self.exports.len(),
            "session closed"
        );
    }

    fn require_listing(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::AwaitingPath | SessionState::ListingFiles => Err(SessionError::NoListing),
            _ => Ok(()),
        }
    }

    /// Pushes the full selection to the store; drops stale documents if it changed.
    fn sync_store(&mut self) {
        let mut map = AssignmentMap::with_capacity(self.files.len());
        for (file, category) in self.files.iter().zip(&self.selections) {
            map.insert(
                file.name.clone(),
                Assignment {
                    modified: file.modified.clone(),
                    category: *category,
                },
            );
        }
        if self.store.set_all(map) {
            if !self.exports.is_empty() {
                debug!("assignments changed, discarding generated exports");
            }
            self.exports.clear();
            self.state = SessionState::AwaitingAssignment;
        }
    }

    fn reset(&mut self) {
        self.state = SessionState::AwaitingPath;
        self.files.clear();
        self.selections.clear();
        self.display_base = None;
        self.resolved_base = None;
        self.exports.clear();
        self.store.set_all(AssignmentMap::new());
    }
}
