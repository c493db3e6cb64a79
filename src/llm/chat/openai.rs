use async_trait::async_trait;
use log::{ debug, info };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, CompletionResponse };
use crate::error::RelayError;
use crate::llm::LlmConfig;
use crate::models::chat::ChatMessage;

pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

impl OpenAIChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| RelayError::ClientSetup(format!("Invalid API key format: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::ClientSetup(e.to_string()))?;

        Ok(Self {
            http,
            model: config.completion_model.clone(),
            base_url: config.base_url.clone(),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, RelayError> {
        info!(
            "Chat client configured: Model={}, BaseURL={}, Timeout={}s",
            config.completion_model,
            config.base_url,
            config.timeout.as_secs()
        );
        Self::new(config)
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1/chat/completions") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> OpenAIChatRequest<'a> {
        OpenAIChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_completion_tokens: self.max_completion_tokens,
        }
    }
}

fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<OpenAIErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn parse_completion(body: &str) -> Result<CompletionResponse, RelayError> {
    let resp: OpenAIResponse = serde_json::from_str(body)?;
    let content = resp.choices
        .into_iter()
        .next()
        .ok_or(RelayError::EmptyChoices)?
        .message.content
        .ok_or(RelayError::MissingContent)?;

    Ok(CompletionResponse { response: content })
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<CompletionResponse, RelayError> {
        let url = self.completions_url();
        let req = self.build_request(messages);
        debug!("Sending {} messages to {}", messages.len(), url);

        let resp = self.http.post(&url).json(&req).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(RelayError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        parse_completion(&body)
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> OpenAIChatClient {
        OpenAIChatClient::new(&LlmConfig::new("sk-test", base_url)).unwrap()
    }

    #[test]
    fn request_pins_sampling_parameters() {
        let client = client("https://api.openai.com");
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = serde_json::to_value(client.build_request(&messages)).unwrap();

        assert_eq!(body, json!({
            "model": "gpt-5-mini-2025-08-07",
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "hi" }
            ],
            "temperature": 0.0,
            "max_completion_tokens": 4000
        }));
    }

    #[test]
    fn reports_configured_model_and_base_url() {
        let client = client("http://localhost:8080/");
        assert_eq!(client.get_model(), "gpt-5-mini-2025-08-07");
        assert_eq!(client.get_base_url(), "http://localhost:8080/");
    }

    #[test]
    fn completions_url_accepts_several_base_forms() {
        let expected = "https://api.openai.com/v1/chat/completions";
        assert_eq!(client("https://api.openai.com").completions_url(), expected);
        assert_eq!(client("https://api.openai.com/").completions_url(), expected);
        assert_eq!(client("https://api.openai.com/v1").completions_url(), expected);
        assert_eq!(client(expected).completions_url(), expected);
    }

    #[test]
    fn first_choice_content_is_returned() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "first" } },
                { "message": { "role": "assistant", "content": "second" } }
            ]
        }).to_string();
        assert_eq!(parse_completion(&body).unwrap().response, "first");
    }

    #[test]
    fn unexpected_shapes_are_errors() {
        assert!(matches!(parse_completion(r#"{"choices":[]}"#), Err(RelayError::EmptyChoices)));
        assert!(matches!(
            parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(RelayError::MissingContent)
        ));
        assert!(matches!(parse_completion("not json"), Err(RelayError::Decode(_))));
    }

    #[test]
    fn api_error_prefers_the_upstream_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(body), "Incorrect API key provided");
        assert_eq!(api_error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(api_error_message(""), "empty response body");
    }
}
