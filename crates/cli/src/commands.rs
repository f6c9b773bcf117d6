//! One-shot `list` and `export` commands.

use crate::output::{self, WrittenFile};
use anyhow::{bail, Context, Result};
use filecat_core::config::AppConfig;
use filecat_core::{Category, ExportKind, FileRecord, Session, SessionError};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub base: String,
    pub resolved: String,
    pub files: Vec<FileRecord>,
}

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub path: String,
    pub assignments: Vec<(String, Category)>,
    /// Empty means the formats from configuration.
    pub formats: Vec<ExportKind>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub base: String,
    pub files: usize,
    pub written: Vec<WrittenFile>,
    pub failures: Vec<String>,
}

/// Opens `path` on the blocking pool, since the walk does synchronous I/O.
/// The session comes back either way; on failure it awaits a new path.
pub async fn open_in_background(
    mut session: Session,
    path: String,
) -> Result<(Session, Result<usize, SessionError>)> {
    tokio::task::spawn_blocking(move || {
        let opened = session.open(&path).map(|files| files.len());
        (session, opened)
    })
    .await
    .context("directory walk panicked")
}

pub async fn open_session(session: Session, path: String) -> Result<Session> {
    let (session, opened) = open_in_background(session, path).await?;
    opened?;
    Ok(session)
}

pub async fn list(config: &AppConfig, path: &str) -> Result<Listing> {
    let session = open_session(Session::new(config)?, path.to_string()).await?;
    let listing = Listing {
        base: path.to_string(),
        resolved: session.resolved_base().unwrap_or_default().to_string(),
        files: session.files().to_vec(),
    };
    session.close();
    Ok(listing)
}

pub async fn export(config: &AppConfig, request: ExportRequest) -> Result<ExportSummary> {
    let mut session = open_session(Session::new(config)?, request.path.clone()).await?;
    for (name, category) in &request.assignments {
        session
            .assign_name(name, *category)
            .with_context(|| format!("assigning {name} to {category}"))?;
    }
    if !request.formats.is_empty() {
        session.set_formats(request.formats.iter().copied());
    }
    if session.formats().is_empty() {
        bail!("no export format selected; pass --excel, --word or --pdf");
    }

    let report = session.generate()?;
    for failure in &report.failures {
        warn!(kind = %failure.kind(), error = %failure, "export not written");
    }
    let failures = report.failures.iter().map(ToString::to_string).collect();
    let written = output::write_exports(&request.out_dir, session.exports()).await?;
    let summary = ExportSummary {
        base: request.path,
        files: session.files().len(),
        written,
        failures,
    };
    session.close();
    Ok(summary)
}
