//! Environment-backed configuration, resolved once at startup.
//!
//! `dotenvy` loads `.env` in the binary before this runs; everything here
//! reads plain environment variables with safe defaults.

use std::env;

pub const DEFAULT_HF_MODEL: &str = "cardiffnlp/twitter-xlm-roberta-base-sentiment";
pub const DEFAULT_HF_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PORT: u16 = 8080;

/// Which classifier backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Lexicon,
    HuggingFace,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: Provider,
    pub hf_token: String,
    pub hf_model: String,
    pub hf_timeout_secs: u64,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Lexicon,
            hf_token: String::new(),
            hf_model: DEFAULT_HF_MODEL.to_string(),
            hf_timeout_secs: DEFAULT_HF_TIMEOUT_SECS,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let provider = match env::var("AI_PROVIDER")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "huggingface" | "hf" => Provider::HuggingFace,
            _ => Provider::Lexicon,
        };
        let hf_token = env::var("HUGGINGFACE_TOKEN")
            .unwrap_or_default()
            .trim()
            .to_string();
        let hf_model = env::var("HUGGINGFACE_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_HF_MODEL.to_string());
        let hf_timeout_secs = parse_env("HUGGINGFACE_TIMEOUT_SECS", DEFAULT_HF_TIMEOUT_SECS);
        let port = parse_env("PORT", DEFAULT_PORT);

        Self {
            provider,
            hf_token,
            hf_model,
            hf_timeout_secs,
            port,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
