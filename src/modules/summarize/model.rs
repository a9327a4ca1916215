use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::modules::summarize::schema::{FileData, RemoteFile};

/// A client upload staged on local disk for the duration of one request.
///
/// The staged file is removed when this value is dropped unless [`IncomingFile::remove`]
/// already did so, which keeps the staging directory clean on every exit path.
#[derive(Debug)]
pub struct IncomingFile {
    path: PathBuf,
    pub original_filename: String,
    pub mime_type: String,
    pub size: u64,
    removed: bool,
}

impl IncomingFile {
    pub fn new(path: PathBuf, original_filename: String, mime_type: String) -> Self {
        Self { path, original_filename, mime_type, size: 0, removed: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn absolute_path(&self) -> std::io::Result<PathBuf> {
        std::path::absolute(&self.path)
    }

    pub async fn remove(mut self) -> std::io::Result<()> {
        tokio::fs::remove_file(&self.path).await?;
        self.removed = true;
        Ok(())
    }
}

impl Drop for IncomingFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        // Only reached on failure paths; a single unlink is short enough to do inline.
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed staged file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove staged file {}: {}", self.path.display(), e),
        }
    }
}

/// Prompt plus the reference to an uploaded file, sent as one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub file: FileData,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(remote: &RemoteFile, prompt: &str) -> Self {
        Self {
            file: FileData { mime_type: remote.mime_type.clone(), file_uri: remote.uri.clone() },
            prompt: prompt.to_string(),
        }
    }
}

/// Summarize pipeline configuration
#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    pub prompt: String,
    pub upload_dir: PathBuf,
    pub max_file_size: usize,
    pub request_timeout: Duration,
}

impl SummarizeConfig {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            upload_dir: PathBuf::from("uploads"),
            max_file_size: 20 * 1024 * 1024, // 20MB
            request_timeout: Duration::from_secs(120),
        }
    }
}
