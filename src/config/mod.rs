pub mod prompt;

use log::info;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Args;
use crate::error::ConfigError;

/// Chat page bundled with the binary.
pub const CHAT_PAGE: &str = include_str!("../../static/chat.html");

pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 4000;

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

/// Everything the service needs, resolved once before the listener binds and
/// never mutated afterwards.
#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub chat_model: String,
    pub chat_base_url: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub request_timeout: Duration,
    pub system_prompt: Arc<str>,
    pub page: Arc<str>,
    pub server_addr: String,
    pub tls: Option<TlsPaths>,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"<redacted>")
            .field("chat_model", &self.chat_model)
            .field("chat_base_url", &self.chat_base_url)
            .field("temperature", &self.temperature)
            .field("max_completion_tokens", &self.max_completion_tokens)
            .field("request_timeout", &self.request_timeout)
            .field("server_addr", &self.server_addr)
            .field("tls", &self.tls)
            .finish()
    }
}

impl RelayConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let api_key = args.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?
            .to_string();

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let tls = if args.enable_tls {
            let cert_path = args.tls_cert_path
                .clone()
                .ok_or(ConfigError::MissingTlsPath("TLS_CERT_PATH"))?;
            let key_path = args.tls_key_path
                .clone()
                .ok_or(ConfigError::MissingTlsPath("TLS_KEY_PATH"))?;
            Some(TlsPaths { cert_path, key_path })
        } else {
            None
        };

        let page: Arc<str> = match args.page_path.as_deref() {
            Some(path) => Arc::from(read_text_file("chat page", path)?),
            None => Arc::from(CHAT_PAGE),
        };

        Ok(Self {
            api_key,
            chat_model: args.chat_model.clone(),
            chat_base_url: args.chat_base_url.clone(),
            temperature: DEFAULT_TEMPERATURE,
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            system_prompt: prompt::load_system_prompt(args.system_prompt_path.as_deref())?,
            page,
            server_addr: args.server_addr.clone(),
            tls,
        })
    }

    pub fn api_key_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn log_summary(&self, args: &Args) {
        info!("--- Core Configuration ---");
        info!("Server Address: {}", self.server_addr);
        info!("Chat Model: {}", self.chat_model);
        info!("Chat Base URL: {}", self.chat_base_url);
        info!("Request Timeout: {}s", self.request_timeout.as_secs());
        info!("API Key Configured: {}", if self.api_key_configured() { "yes" } else { "no" });
        info!(
            "System Prompt: {}",
            args.system_prompt_path.as_deref().unwrap_or("built-in")
        );
        info!("Chat Page: {}", args.page_path.as_deref().unwrap_or("bundled"));
        info!("TLS Enabled: {}", self.tls.is_some());
        info!("-------------------------");
    }
}

pub(crate) fn read_text_file(kind: &'static str, path: &str) -> Result<String, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        kind,
        path: path.to_string(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(ConfigError::EmptyFile { kind, path: path.to_string() });
    }
    Ok(content)
}
