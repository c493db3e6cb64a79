use log::{ debug, error, info };
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::history::build_messages;
use crate::llm::chat::{ ChatClient, new_client as new_chat_client };
use crate::llm::LlmConfig;
use crate::models::chat::ChatRequest;

/// Turns one browser request into one completion call.
///
/// Holds no per-conversation state: the history travels with every request
/// and the relay only reshapes it.
#[derive(Clone)]
pub struct ChatRelay {
    chat_client: Arc<dyn ChatClient>,
    system_prompt: Arc<str>,
}

impl ChatRelay {
    pub fn new(chat_client: Arc<dyn ChatClient>, system_prompt: Arc<str>) -> Self {
        Self { chat_client, system_prompt }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let chat_client = new_chat_client(&LlmConfig::from(config))?;
        info!(
            "Chat relay ready: Model={}, Endpoint={}",
            chat_client.get_model(),
            chat_client.get_base_url()
        );
        Ok(Self::new(chat_client, config.system_prompt.clone()))
    }

    pub async fn handle_chat(&self, request: ChatRequest) -> Result<String, RelayError> {
        let messages = build_messages(&self.system_prompt, &request.history, &request.message);
        debug!(
            "Chat turn: {} history turns, {} messages for model {}",
            request.history.len(),
            messages.len(),
            self.chat_client.get_model()
        );

        match self.chat_client.complete(&messages).await {
            Ok(completion) => {
                info!("Chat completion received ({} chars)", completion.response.len());
                Ok(completion.response)
            }
            Err(e) => {
                error!("Chat completion failed: {}", e);
                Err(e)
            }
        }
    }
}
