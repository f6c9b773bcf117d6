//! Writes generated documents to disk under their fixed file names.

use anyhow::{Context, Result};
use filecat_core::{ExportBuffer, ExportKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    pub kind: ExportKind,
    pub path: PathBuf,
    pub mime: &'static str,
    pub bytes: usize,
}

/// Writes every buffer into `dir`, creating it if needed. Existing files with
/// the same name are replaced.
pub async fn write_exports<'a>(
    dir: &Path,
    buffers: impl IntoIterator<Item = &'a ExportBuffer>,
) -> Result<Vec<WrittenFile>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let mut written = Vec::new();
    for buffer in buffers {
        let path = dir.join(buffer.file_name());
        tokio::fs::write(&path, &buffer.bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), bytes = buffer.bytes.len(), "export written");
        written.push(WrittenFile {
            kind: buffer.kind,
            path,
            mime: buffer.mime(),
            bytes: buffer.bytes.len(),
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_under_fixed_names() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out");
        let buffers = [
            ExportBuffer {
                kind: ExportKind::Pdf,
                bytes: b"%PDF-1.5".to_vec(),
            },
            ExportBuffer {
                kind: ExportKind::Word,
                bytes: vec![1, 2, 3],
            },
        ];

        let written = write_exports(&out, &buffers).await.unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].path, out.join("output.pdf"));
        assert_eq!(written[0].mime, "application/pdf");
        assert_eq!(std::fs::read(out.join("output.docx")).unwrap(), vec![1, 2, 3]);
    }
}
