use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};

use crate::modules::summarize::{GeminiClient, SummarizeService};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let client = configs::gemini_client(&ENV)
        .map_err(|e| std::io::Error::other(format!("Gemini client error: {e}")))?;

    let summarize_service =
        SummarizeService::new(Arc::new(client), configs::summarize_config(&ENV));

    log::info!("Server running on http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(configs::cors(ENV.frontend_url.as_deref()))
            .wrap(Logger::default())
            .app_data(web::Data::new(summarize_service.clone()))
            .service(health_check)
            .configure(modules::summarize::route::configure::<GeminiClient>)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(ENV.workers)
    .run()
    .await
}
