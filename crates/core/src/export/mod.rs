//! Renders a grouped listing into downloadable documents.
//!
//! Each renderer is a pure function of the grouping: same input, same bytes.
//! Renderers share nothing, so one failing never stops the others.

use crate::assignments::GroupedFiles;
use crate::error::{RenderError, UnknownExportKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

#[cfg(feature = "office")]
mod excel;
#[cfg(feature = "office")]
mod ooxml;
#[cfg(feature = "pdf")]
mod pdf;
mod table;
#[cfg(feature = "office")]
mod word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ExportKind {
    Excel,
    Word,
    Pdf,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Excel, ExportKind::Word, ExportKind::Pdf];

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportKind::Excel => "output.xlsx",
            ExportKind::Word => "output.docx",
            ExportKind::Pdf => "output.pdf",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportKind::Excel => "application/vnd.ms-excel",
            ExportKind::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportKind::Pdf => "application/pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Excel => "Excel",
            ExportKind::Word => "Word",
            ExportKind::Pdf => "PDF",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportKind {
    type Err = UnknownExportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportKind::Excel),
            "word" | "docx" => Ok(ExportKind::Word),
            "pdf" => Ok(ExportKind::Pdf),
            _ => Err(UnknownExportKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExportKind {
    type Error = UnknownExportKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBuffer {
    pub kind: ExportKind,
    pub bytes: Vec<u8>,
}

impl ExportBuffer {
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    pub fn mime(&self) -> &'static str {
        self.kind.mime()
    }
}

/// Outcome of rendering several formats at once.
#[derive(Debug, Default)]
pub struct ExportBatch {
    pub buffers: BTreeMap<ExportKind, ExportBuffer>,
    pub failures: Vec<RenderError>,
}

pub fn render(kind: ExportKind, grouped: &GroupedFiles) -> Result<ExportBuffer, RenderError> {
    let bytes = match kind {
        ExportKind::Excel => render_excel(grouped)?,
        ExportKind::Word => render_word(grouped)?,
        ExportKind::Pdf => render_pdf(grouped)?,
    };
    info!(%kind, bytes = bytes.len(), "rendered export");
    Ok(ExportBuffer { kind, bytes })
}

/// Renders each requested format independently.
pub fn render_selected(kinds: &BTreeSet<ExportKind>, grouped: &GroupedFiles) -> ExportBatch {
    let mut batch = ExportBatch::default();
    for &kind in kinds {
        match render(kind, grouped) {
            Ok(buffer) => {
                batch.buffers.insert(kind, buffer);
            }
            Err(err) => {
                warn!(%kind, error = %err, "export failed");
                batch.failures.push(err);
            }
        }
    }
    batch
}

#[cfg(feature = "office")]
pub fn render_excel(grouped: &GroupedFiles) -> Result<Vec<u8>, RenderError> {
    excel::render(grouped).map_err(|e| RenderError::failed(ExportKind::Excel, e))
}

#[cfg(not(feature = "office"))]
pub fn render_excel(_grouped: &GroupedFiles) -> Result<Vec<u8>, RenderError> {
    Err(RenderError::Unsupported(ExportKind::Excel))
}

#[cfg(feature = "office")]
pub fn render_word(grouped: &GroupedFiles) -> Result<Vec<u8>, RenderError> {
    word::render(grouped).map_err(|e| RenderError::failed(ExportKind::Word, e))
}

#[cfg(not(feature = "office"))]
pub fn render_word(_grouped: &GroupedFiles) -> Result<Vec<u8>, RenderError> {
    Err(RenderError::Unsupported(ExportKind::Word))
}

#[cfg(feature = "pdf")]
pub fn render_pdf(grouped: &GroupedFiles) -> Result<Vec<u8>, RenderError> {
    pdf::render(grouped).map_err(|e| RenderError::failed(ExportKind::Pdf, e))
}

#[cfg(not(feature = "pdf"))]
pub fn render_pdf(_grouped: &GroupedFiles) -> Result<Vec<u8>, RenderError> {
    Err(RenderError::Unsupported(ExportKind::Pdf))
}
