use serde::Deserialize;

use sightgate_vision::{DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL};

/// SightGate runtime configuration.
///
/// The API key lives here and is handed to the provider constructor
/// explicitly; nothing reads the environment after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Groq API key
    pub groq_api_key: Option<String>,
    /// Override for the Groq API base URL
    pub groq_base_url: Option<String>,
    /// Model for single-image endpoints
    pub image_model: String,
    /// Model for the video frame-grid endpoint
    pub video_model: String,
    /// Directory for rolling log files
    pub log_dir: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            groq_api_key: None,
            groq_base_url: None,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("SIGHTGATE_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SIGHTGATE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            groq_base_url: std::env::var("GROQ_BASE_URL").ok(),
            image_model: std::env::var("SIGHTGATE_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            video_model: std::env::var("SIGHTGATE_VIDEO_MODEL")
                .unwrap_or_else(|_| DEFAULT_VIDEO_MODEL.to_string()),
            log_dir: std::env::var("SIGHTGATE_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
