use serde::Deserialize;

use crate::core::types::{ChatMessage, ChatRole, TokenUsage, ToolCallRequest};

/// Response body from the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCallRequest>>,
}

impl AssistantMessage {
    /// Re-shape into a conversation message so the tool round can echo the
    /// assistant's tool calls back to the endpoint.
    pub fn into_chat_message(self) -> ChatMessage {
        ChatMessage {
            role: ChatRole::Assistant,
            content: self.content,
            tool_call_id: None,
            name: None,
            tool_calls: self.tool_calls,
        }
    }
}
