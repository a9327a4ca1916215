#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::api::error;
use crate::modules::summarize::{
    client::GenerativeClient, model::GenerationRequest, schema::RemoteFile,
};

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub path: PathBuf,
    pub mime_type: String,
    pub display_name: String,
    pub contents: Vec<u8>,
}

/// Scripted stand-in for the generative service.
///
/// Without a fixed summary it answers with `summary of <file contents>`, so
/// concurrent requests can check they got their own result back.
#[derive(Default)]
pub struct FakeClient {
    summary: Option<String>,
    upload_error: Option<String>,
    generate_error: Option<String>,
    delay: Option<Duration>,
    uploads: Mutex<Vec<RecordedUpload>>,
    generations: Mutex<Vec<GenerationRequest>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeClient {
    pub fn with_summary(summary: &str) -> Self {
        Self { summary: Some(summary.to_string()), ..Default::default() }
    }

    pub fn failing_upload(message: &str) -> Self {
        Self { upload_error: Some(message.to_string()), ..Default::default() }
    }

    pub fn failing_generation(message: &str) -> Self {
        Self { generate_error: Some(message.to_string()), ..Default::default() }
    }

    /// Delay every generation call.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn generations(&self) -> Vec<GenerationRequest> {
        self.generations.lock().unwrap().clone()
    }

    /// Most generation calls that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GenerativeClient for FakeClient {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, error::SystemError> {
        let contents = tokio::fs::read(path).await?;
        self.uploads.lock().unwrap().push(RecordedUpload {
            path: path.to_path_buf(),
            mime_type: mime_type.to_string(),
            display_name: display_name.to_string(),
            contents,
        });

        if let Some(message) = &self.upload_error {
            return Err(error::SystemError::upstream(429, message.clone()));
        }

        Ok(RemoteFile {
            name: format!("files/{display_name}"),
            display_name: Some(display_name.to_string()),
            mime_type: mime_type.to_string(),
            uri: format!("https://files.test/{display_name}"),
            size_bytes: None,
            state: Some("ACTIVE".to_string()),
        })
    }

    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, error::SystemError> {
        self.generations.lock().unwrap().push(request.clone());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if let Some(message) = &self.generate_error {
            return Err(error::SystemError::upstream(503, message.clone()));
        }
        if let Some(summary) = &self.summary {
            return Ok(summary.clone());
        }

        let contents = self
            .uploads
            .lock()
            .unwrap()
            .iter()
            .find(|upload| request.file.file_uri.ends_with(&format!("/{}", upload.display_name)))
            .map(|upload| String::from_utf8_lossy(&upload.contents).into_owned())
            .unwrap_or_default();
        Ok(format!("summary of {contents}"))
    }
}

pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, filename: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self { name, filename: Some(filename), content_type: Some(content_type), data }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self { name, filename: None, content_type: None, data: value.as_bytes() }
    }
}

/// Build a `multipart/form-data` body, returning its content type and bytes.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let boundary = "relay-test-boundary";
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

/// Files currently present in a staging directory.
pub fn staged_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    }
}
