use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| format!("PORT: {}", e))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self {
            port,
            // An empty key counts as unset so the fallback engine still runs.
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| ".".to_string()),
        })
    }
}
