pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const FILE_FIELD: &str = "file";
pub const NO_FILE_UPLOADED: &str = "No file uploaded";
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

pub struct Env {
    pub api_key: String,
    pub prompt: String,
    pub model: String,
    pub base_url: String,
    pub upload_dir: String,
    pub max_file_size: usize,
    pub request_timeout_secs: u64,
    pub frontend_url: Option<String>,
    pub ip: String,
    pub port: u16,
    pub workers: usize,
}

impl Env {
    fn new() -> Self {
        let api_key = std::env::var("API_KEY")
            .expect("API_KEY must be set in .env file or environment variable");

        // the lowercase name is what older deployments put in their .env
        let prompt = std::env::var("PROMPT")
            .or_else(|_| std::env::var("prompt"))
            .expect("PROMPT must be set in .env file or environment variable");

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        let max_file_size = std::env::var("MAX_FILE_SIZE")
            .unwrap_or_else(|_| (20 * 1024 * 1024).to_string())
            .parse::<usize>()
            .expect("MAX_FILE_SIZE must be a valid usize integer");
        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64 integer");

        let frontend_url = std::env::var("FRONTEND_URL").ok().filter(|url| !url.is_empty());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        let workers = std::env::var("WORKERS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<usize>()
            .expect("WORKERS must be a valid usize integer");

        Env {
            api_key,
            prompt,
            model,
            base_url,
            upload_dir,
            max_file_size,
            request_timeout_secs,
            frontend_url,
            ip,
            port,
            workers,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
