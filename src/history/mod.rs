use crate::models::chat::{ ChatMessage, ConversationTurn };

/// Flattens the client-held history into the list the completion API expects:
/// the system instruction, then each turn as a user message followed by its
/// assistant reply, then the current message.
///
/// Turns without a reply (absent or empty) contribute only their user message.
pub fn build_messages(
    system_prompt: &str,
    history: &[ConversationTurn],
    message: &str
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(system_prompt));

    for turn in history {
        messages.push(ChatMessage::user(turn.user.as_str()));
        if let Some(reply) = turn.assistant.as_deref().filter(|r| !r.is_empty()) {
            messages.push(ChatMessage::assistant(reply));
        }
    }

    messages.push(ChatMessage::user(message));
    messages
}
