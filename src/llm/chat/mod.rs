pub mod openai;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use self::openai::OpenAIChatClient;
use super::LlmConfig;
use crate::error::RelayError;
use crate::models::chat::ChatMessage;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub response: String,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<CompletionResponse, RelayError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> String;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, RelayError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
