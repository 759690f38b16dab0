//! Saving exported documents for the operator.

use async_trait::async_trait;
use bytes::Bytes;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

pub const PDF_MIME: &str = "application/pdf";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Destination for exported files.
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Persist `contents` under `filename`, returning where it landed.
    async fn deliver(&self, filename: &str, mime: &str, contents: Bytes) -> io::Result<PathBuf>;
}

/// Replace characters that would escape the target directory.
///
/// Sample ids are embedded in report filenames, so `WS/7` must not become a
/// subdirectory.
pub fn safe_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}

/// Saves files into a directory.
///
/// Contents go to a hidden `.part` file first and are renamed into place, so
/// a failed write never leaves a file under the requested name and two
/// deliveries under one name never share a staging file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Write into a uniquely named hidden file beside `target`, then rename it
/// into place. The staging file is removed if anything fails.
fn stage(
    dir: PathBuf,
    name: String,
    target: PathBuf,
    contents: Bytes,
) -> impl FnOnce() -> io::Result<()> + Send + 'static {
    move || {
        let mut partial = tempfile::Builder::new()
            .prefix(&format!(".{}.", name))
            .suffix(".part")
            .tempfile_in(&dir)?;
        partial.write_all(&contents)?;
        partial.as_file().sync_all()?;
        partial.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

#[async_trait]
impl FileSink for DirectorySink {
    async fn deliver(&self, filename: &str, mime: &str, contents: Bytes) -> io::Result<PathBuf> {
        let name = safe_filename(filename);
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(&name);
        let staged = stage(self.dir.clone(), name, target.clone(), contents.clone());
        tokio::task::spawn_blocking(staged)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;
        info!(
            "Saved {} ({}, {} bytes)",
            target.display(),
            mime,
            contents.len()
        );
        Ok(target)
    }
}
