use actix_multipart::Multipart;
use actix_web::{web, HttpMessage, HttpRequest};
use futures_util::TryStreamExt;

use crate::api::{error, success};
use crate::constants::{FILE_FIELD, NO_FILE_UPLOADED};
use crate::modules::summarize::{
    client::GenerativeClient, model::IncomingFile, schema::SummaryResponse,
    service::SummarizeService,
};
use crate::utils::guess_mime_type;

/// Upload one file and answer with its generated summary
pub async fn upload_file<C>(
    req: HttpRequest,
    mut payload: Multipart,
    service: web::Data<SummarizeService<C>>,
) -> Result<success::Success<SummaryResponse>, error::Error>
where
    C: GenerativeClient + Send + Sync + 'static,
{
    // A body that is not multipart cannot carry a file part
    if !req.content_type().to_ascii_lowercase().starts_with("multipart/") {
        return Err(error::Error::bad_request(NO_FILE_UPLOADED));
    }

    let mut incoming: Option<IncomingFile> = None;

    while let Some(mut field) =
        payload.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        let disposition = field.content_disposition();
        let name = disposition.and_then(|cd| cd.get_name()).unwrap_or_default().to_string();
        let filename = disposition
            .and_then(|cd| cd.get_filename())
            .filter(|filename| !filename.is_empty())
            .map(str::to_string);

        // Plain form fields are accepted and ignored
        let Some(filename) = filename else {
            while field
                .try_next()
                .await
                .map_err(|e| error::Error::bad_request(e.to_string()))?
                .is_some()
            {}
            continue;
        };

        if name != FILE_FIELD || incoming.is_some() {
            return Err(error::Error::bad_request(format!("Unexpected field: {name}")));
        }

        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| guess_mime_type(&filename));

        incoming = Some(service.stage_file(filename, mime_type, field).await?);
    }

    let Some(file) = incoming else {
        return Err(error::Error::bad_request(NO_FILE_UPLOADED));
    };

    let summary = service.summarize(file).await.map_err(error::Error::bad_gateway)?;

    Ok(success::Success::ok(SummaryResponse { summary }))
}
