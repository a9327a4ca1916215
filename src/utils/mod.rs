use std::path::Path;

use uuid::Uuid;

use crate::constants::FALLBACK_MIME_TYPE;

/// Unique staging name. The client's extension is kept only when it is plain
/// ASCII alphanumerics, so nothing from the client reaches the path otherwise.
pub fn generate_filename(original_filename: &str) -> String {
    let id = Uuid::now_v7();
    match Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.bytes().all(|b| b.is_ascii_alphanumeric()))
    {
        Some(ext) if !ext.is_empty() => format!("{id}.{ext}"),
        _ => id.to_string(),
    }
}

pub fn guess_mime_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}
