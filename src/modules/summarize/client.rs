use std::path::Path;

use crate::{
    api::error,
    modules::summarize::{model::GenerationRequest, schema::RemoteFile},
};

#[async_trait::async_trait]
pub trait GenerativeClient {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, error::SystemError>;

    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, error::SystemError>;
}
