//! Walks a resolved directory and produces one `FileRecord` per file.

use crate::error::{EnumerateError, FileAccessError};
use crate::models::{FileRecord, UNAVAILABLE};
use crate::resolver::normalize;
use chrono::{DateTime, Local};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct Scanner {
    excludes: GlobSet,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            excludes: GlobSet::empty(),
        }
    }
}

impl Scanner {
    pub fn new(excludes: &[String]) -> Result<Self, EnumerateError> {
        Ok(Self {
            excludes: build_globset(excludes)?,
        })
    }

    /// Lists every file below `base`. `display_base` replaces the first
    /// occurrence of `base` in each path to form `relative_path`.
    pub fn enumerate(
        &self,
        base: &str,
        display_base: &str,
    ) -> Result<Vec<FileRecord>, EnumerateError> {
        let root = Path::new(base);
        if !root.exists() {
            return Err(EnumerateError::PathNotFound(base.to_string()));
        }

        let mut items = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_excluded(root, e.path()));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            // The root itself is never listed, even when it is a file.
            let path = entry.path();
            if entry.depth() == 0 || path.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let absolute_path = normalize(&path.to_string_lossy());
            let relative_path = client_relative(&absolute_path, base, display_base);
            let modified = match modified_date(path) {
                Ok(date) => date,
                Err(err) => {
                    warn!(error = %err, "modification time unavailable");
                    UNAVAILABLE.to_string()
                }
            };

            items.push(FileRecord {
                name,
                modified,
                absolute_path,
                relative_path,
            });
        }

        info!(base, files = items.len(), "enumeration complete");
        Ok(items)
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        if self.excludes.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        let hit = self.excludes.is_match(relative);
        if hit {
            debug!(?relative, "excluded");
        }
        hit
    }
}

pub fn enumerate(base: &str, display_base: &str) -> Result<Vec<FileRecord>, EnumerateError> {
    Scanner::default().enumerate(base, display_base)
}

/// Literal, first-occurrence substitution of `base` by `display_base`.
pub fn client_relative(absolute_path: &str, base: &str, display_base: &str) -> String {
    absolute_path.replacen(base, display_base, 1)
}

fn modified_date(path: &Path) -> Result<String, FileAccessError> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| FileAccessError {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(DateTime::<Local>::from(modified)
        .format("%Y-%m-%d")
        .to_string())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, EnumerateError> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|source| EnumerateError::InvalidPattern {
            pattern: pat.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| EnumerateError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })
}
