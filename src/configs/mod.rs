use std::path::PathBuf;
use std::time::Duration;

use actix_cors::Cors;

use crate::{
    api::error,
    constants::Env,
    modules::summarize::{GeminiClient, SummarizeConfig},
};

pub fn gemini_client(env: &Env) -> Result<GeminiClient, error::SystemError> {
    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()?;
    Ok(GeminiClient::new(http, env.api_key.as_str(), env.base_url.as_str(), env.model.as_str()))
}

pub fn summarize_config(env: &Env) -> SummarizeConfig {
    SummarizeConfig {
        upload_dir: PathBuf::from(&env.upload_dir),
        max_file_size: env.max_file_size,
        request_timeout: Duration::from_secs(env.request_timeout_secs),
        ..SummarizeConfig::new(env.prompt.as_str())
    }
}

/// Any origin unless a frontend URL is configured.
pub fn cors(frontend_url: Option<&str>) -> Cors {
    match frontend_url {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(),
    }
}
