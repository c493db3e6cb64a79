use serde::{ ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer };
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of the list sent to the completion API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A past exchange as kept by the browser. `assistant` is `None` for a turn
/// that never got an answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user: String,
    #[serde(default)]
    pub assistant: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<ConversationTurn>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where D: Deserializer<'de>, T: Default + Deserialize<'de>
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of every `/chat` answer. The `success` flag on the wire comes from
/// the variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatResponse {
    Success(String),
    Failure(String),
}

impl ChatResponse {
    pub fn success(response: String) -> Self {
        ChatResponse::Success(response)
    }

    pub fn failure(error: impl ToString) -> Self {
        ChatResponse::Failure(error.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChatResponse::Success(_))
    }
}

impl Serialize for ChatResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChatResponse", 2)?;
        state.serialize_field("success", &self.is_success())?;
        match self {
            ChatResponse::Success(response) => state.serialize_field("response", response)?,
            ChatResponse::Failure(error) => state.serialize_field("error", error)?,
        }
        state.end()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_to_empty() {
        let req: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req, ChatRequest::default());

        let req: ChatRequest = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.history.is_empty());

        let req: ChatRequest = serde_json::from_value(
            json!({ "history": [{ "user": "a", "assistant": "b" }] })
        ).unwrap();
        assert_eq!(req.message, "");
        assert_eq!(req.history.len(), 1);
    }

    #[test]
    fn null_fields_behave_like_missing_ones() {
        let req: ChatRequest = serde_json::from_value(
            json!({ "message": null, "history": null })
        ).unwrap();
        assert_eq!(req, ChatRequest::default());
    }

    #[test]
    fn assistant_may_be_null_or_absent() {
        let turns: Vec<ConversationTurn> = serde_json::from_value(
            json!([{ "user": "a", "assistant": null }, { "user": "b" }])
        ).unwrap();
        assert!(turns.iter().all(|t| t.assistant.is_none()));
    }

    #[test]
    fn turn_without_user_is_rejected() {
        let res = serde_json::from_value::<ChatRequest>(
            json!({ "history": [{ "assistant": "b" }] })
        );
        assert!(res.is_err());
    }

    #[test]
    fn responses_serialize_to_flat_objects() {
        let ok = serde_json::to_value(ChatResponse::success("hello".into())).unwrap();
        assert_eq!(ok, json!({ "success": true, "response": "hello" }));

        let err = serde_json::to_value(ChatResponse::failure("boom")).unwrap();
        assert_eq!(err, json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn success_flag_follows_the_variant() {
        assert!(ChatResponse::Success(String::new()).is_success());
        assert!(!ChatResponse::Failure(String::new()).is_success());

        let empty_reply = serde_json::to_value(ChatResponse::Success(String::new())).unwrap();
        assert_eq!(empty_reply, json!({ "success": true, "response": "" }));
    }

    #[test]
    fn roles_are_lowercase_on_the_wire() {
        let msg = serde_json::to_value(ChatMessage::assistant("x")).unwrap();
        assert_eq!(msg, json!({ "role": "assistant", "content": "x" }));
        assert_eq!(Role::System.to_string(), "system");
    }
}
