pub mod chat;

use std::time::Duration;

use crate::config::{ RelayConfig, DEFAULT_MAX_COMPLETION_TOKENS, DEFAULT_TEMPERATURE };

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub completion_model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub timeout: Duration,
}

impl From<&RelayConfig> for LlmConfig {
    fn from(config: &RelayConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            completion_model: config.chat_model.clone(),
            base_url: config.chat_base_url.clone(),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
            timeout: config.request_timeout,
        }
    }
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            completion_model: "gpt-5-mini-2025-08-07".to_string(),
            base_url: base_url.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            timeout: Duration::from_secs(120),
        }
    }
}
