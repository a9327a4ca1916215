use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use crate::{
    api::error,
    modules::summarize::{
        client::GenerativeClient,
        model::GenerationRequest,
        schema::{
            ApiErrorResponse, GenerateContentRequest, GenerateContentResponse, RemoteFile,
            UploadFileInfo, UploadFileMetadata, UploadFileResponse,
        },
    },
};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini REST client shared by every request.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/upload/{}/files", self.base_url, API_VERSION)
    }

    fn generate_url(&self) -> String {
        format!("{}/{}/models/{}:generateContent", self.base_url, API_VERSION, self.model)
    }

    /// Turn a non-2xx response into an upstream error carrying the service message.
    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, error::SystemError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (reason, message) = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) => (parsed.error.status, parsed.error.message),
            Err(_) if body.trim().is_empty() => (None, status.to_string()),
            Err(_) => (None, body),
        };
        Err(error::SystemError::upstream_with_reason(status.as_u16(), reason, message))
    }
}

/// Metadata part followed by the raw file bytes, as a `multipart/related` body.
fn multipart_related_body(
    boundary: &str,
    metadata: &[u8],
    mime_type: &str,
    bytes: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata.len() + bytes.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=utf-8\r\n\r\n");
    body.extend_from_slice(metadata);
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[async_trait::async_trait]
impl GenerativeClient for GeminiClient {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, error::SystemError> {
        let bytes = tokio::fs::read(path).await?;
        let metadata = serde_json::to_vec(&UploadFileMetadata {
            file: UploadFileInfo { display_name, mime_type },
        })?;
        let boundary = Uuid::now_v7().simple().to_string();
        let body = multipart_related_body(&boundary, &metadata, mime_type, &bytes);

        log::debug!("Uploading {} ({} bytes, {})", display_name, bytes.len(), mime_type);

        let response = self
            .http
            .post(self.upload_url())
            .header(API_KEY_HEADER, &self.api_key)
            .header("X-Goog-Upload-Protocol", "multipart")
            .header(CONTENT_TYPE, format!("multipart/related; boundary={boundary}"))
            .body(body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let uploaded: UploadFileResponse = serde_json::from_slice(&response.bytes().await?)?;
        log::debug!("Uploaded {} as {}", display_name, uploaded.file.uri);
        Ok(uploaded.file)
    }

    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, error::SystemError> {
        log::debug!("Generating content with {} for {}", self.model, request.file.file_uri);

        let response = self
            .http
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let generated: GenerateContentResponse = serde_json::from_slice(&response.bytes().await?)?;
        generated.text()
    }
}
