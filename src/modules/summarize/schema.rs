use serde::{Deserialize, Serialize};

use crate::api::error::SystemError;
use crate::modules::summarize::model::GenerationRequest;

/// Finish reasons that mean the candidate text was withheld.
const BLOCKED_FINISH_REASONS: &[&str] =
    &["SAFETY", "RECITATION", "LANGUAGE", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// Successful upload response body
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub summary: String,
}

/// File handle returned by the generative service after an upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub mime_type: String,
    pub uri: String,
    #[serde(default)]
    pub size_bytes: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileMetadata<'a> {
    pub file: UploadFileInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileInfo<'a> {
    pub display_name: &'a str,
    pub mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UploadFileResponse {
    pub file: RemoteFile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part { file_data: Some(request.file.clone()), ..Default::default() },
                    Part { text: Some(request.prompt.clone()), ..Default::default() },
                ],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub finish_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub block_reason_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Text of the first candidate. Empty when the service returned nothing,
    /// an error when the output was blocked.
    pub fn text(&self) -> Result<String, SystemError> {
        if let Some(candidate) = self.candidates.first() {
            if let Some(reason) = candidate
                .finish_reason
                .as_deref()
                .filter(|reason| BLOCKED_FINISH_REASONS.contains(reason))
            {
                let mut message = format!("Candidate was blocked due to {reason}");
                if let Some(detail) = &candidate.finish_message {
                    message.push_str(": ");
                    message.push_str(detail);
                }
                return Err(SystemError::Blocked(message));
            }

            let text = candidate
                .content
                .iter()
                .flat_map(|content| content.parts.iter())
                .filter_map(|part| part.text.as_deref())
                .collect::<String>();
            return Ok(text);
        }

        if let Some(feedback) = &self.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                let mut message = format!("Text not available. Response was blocked due to {reason}");
                if let Some(detail) = &feedback.block_reason_message {
                    message.push_str(": ");
                    message.push_str(detail);
                }
                return Err(SystemError::Blocked(message));
            }
        }

        Ok(String::new())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
