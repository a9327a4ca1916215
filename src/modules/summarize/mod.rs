pub mod client;
pub mod client_gemini;
pub mod handle;
pub mod model;
pub mod route;
pub mod schema;
pub mod service;

pub use client_gemini::GeminiClient;
pub use model::SummarizeConfig;
pub use service::SummarizeService;
