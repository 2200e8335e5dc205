use serde::Serialize;
use serde_json::Value;

use crate::core::types::{ChatMessage, ToolDescriptor};

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<WireResponseFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<FunctionTool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoiceMode>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WireResponseFormat {
    #[serde(rename = "type")]
    kind: ResponseFormatKind,
}

impl WireResponseFormat {
    /// The forced-JSON response mode.
    pub fn json_object() -> Self {
        Self {
            kind: ResponseFormatKind::JsonObject,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
enum ResponseFormatKind {
    JsonObject,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ToolChoiceMode {
    Auto,
}

/// A tool schema in the `{"type":"function","function":{...}}` envelope.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct FunctionTool {
    #[serde(rename = "type")]
    kind: FunctionType,
    function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
enum FunctionType {
    Function,
}

#[derive(Debug, Clone, Serialize)]
struct FunctionDefinition {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    parameters: Value,
}

impl FunctionTool {
    pub fn from_descriptor(tool: &ToolDescriptor) -> Self {
        Self {
            kind: FunctionType::Function,
            function: FunctionDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        }
    }
}
