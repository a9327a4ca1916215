use std::future::Future;
use std::sync::Arc;

use actix_web::web::Bytes;
use futures_util::{Stream, TryStreamExt};
use tokio::io::AsyncWriteExt;

use crate::api::error;
use crate::modules::summarize::{
    client::GenerativeClient,
    model::{GenerationRequest, IncomingFile, SummarizeConfig},
};
use crate::utils::generate_filename;

pub struct SummarizeService<C>
where
    C: GenerativeClient + Send + Sync,
{
    client: Arc<C>,
    config: SummarizeConfig,
}

impl<C> Clone for SummarizeService<C>
where
    C: GenerativeClient + Send + Sync,
{
    fn clone(&self) -> Self {
        Self { client: self.client.clone(), config: self.config.clone() }
    }
}

impl<C> SummarizeService<C>
where
    C: GenerativeClient + Send + Sync,
{
    pub fn new(client: Arc<C>, config: SummarizeConfig) -> Self {
        Self { client, config }
    }

    /// Stream one uploaded file part to a uniquely named file in the staging directory.
    pub async fn stage_file<S, E>(
        &self,
        original_filename: String,
        mime_type: String,
        stream: S,
    ) -> Result<IncomingFile, error::SystemError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: std::fmt::Display,
    {
        tokio::fs::create_dir_all(&self.config.upload_dir).await?;

        let path = self.config.upload_dir.join(generate_filename(&original_filename));
        let mut incoming = IncomingFile::new(path, original_filename, mime_type);
        let mut staged = tokio::fs::File::create(incoming.path()).await?;

        let mut stream = std::pin::pin!(stream);
        while let Some(chunk) =
            stream.try_next().await.map_err(|e| error::SystemError::bad_request(e.to_string()))?
        {
            incoming.size += chunk.len() as u64;
            if incoming.size > self.config.max_file_size as u64 {
                return Err(error::SystemError::payload_too_large("File too large"));
            }
            staged.write_all(&chunk).await?;
        }
        staged.flush().await?;

        log::debug!(
            "Staged {} ({} bytes) at {}",
            incoming.original_filename,
            incoming.size,
            incoming.path().display()
        );
        Ok(incoming)
    }

    /// Upload the staged file, ask for a summary of it and return the generated text.
    ///
    /// The staged file is deleted before returning, whatever the outcome.
    pub async fn summarize(&self, file: IncomingFile) -> Result<String, error::SystemError> {
        let path = file.absolute_path()?;

        let remote = self
            .with_timeout(
                "file upload",
                self.client.upload_file(&path, &file.mime_type, &file.original_filename),
            )
            .await?;

        let request = GenerationRequest::new(&remote, &self.config.prompt);
        let summary =
            self.with_timeout("content generation", self.client.generate_content(&request)).await?;

        log::info!(
            "Generated summary for {} ({} chars)",
            file.original_filename,
            summary.chars().count()
        );

        file.remove().await?;
        Ok(summary)
    }

    async fn with_timeout<T, F>(
        &self,
        operation: &'static str,
        call: F,
    ) -> Result<T, error::SystemError>
    where
        F: Future<Output = Result<T, error::SystemError>>,
    {
        let limit = self.config.request_timeout;
        tokio::time::timeout(limit, call)
            .await
            .map_err(|_| error::SystemError::Timeout { operation, limit })?
    }
}
