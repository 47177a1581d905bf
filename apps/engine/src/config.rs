use anyhow::{ensure, Result};

/// Default endpoint: the Gemini generateContent route for the model every
/// engine call uses. Override with GEMINI_API_URL (useful for proxies).
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent";

/// Engine configuration loaded from environment variables.
///
/// The API key is intentionally optional here: a missing key does not stop
/// the process, it fails each generation call with `NotConfigured` instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let gemini_api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string());
        ensure!(
            gemini_api_url.starts_with("http://") || gemini_api_url.starts_with("https://"),
            "GEMINI_API_URL must be an absolute http(s) URL, got '{gemini_api_url}'"
        );

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_api_url,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_targets_generate_content() {
        assert!(DEFAULT_GEMINI_API_URL.starts_with("https://"));
        assert!(DEFAULT_GEMINI_API_URL.ends_with(":generateContent"));
    }
}
