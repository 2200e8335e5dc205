//! The completion client: request submission, retry orchestration, JSON
//! output coercion and the single tool-resolution round.

use std::fmt;

use serde_json::Value;
use tracing::{debug, info};

use crate::core::error::LlmError;
use crate::core::retry::{retry_transport, retry_turn};
use crate::core::types::{
    ChatMessage, ChatRole, CompletionOptions, CompletionResponse, Content, ResponseFormat,
    TokenUsage, ToolDescriptor, UnmatchedToolCalls,
};
use crate::provider::ProviderConfig;

use super::request::{ChatCompletionRequest, FunctionTool, ToolChoiceMode, WireResponseFormat};
use super::response::{AssistantMessage, ChatCompletionResponse};

/// Client for a hosted chat-completion endpoint.
///
/// Construction validates the provider configuration eagerly and performs no
/// network I/O. The client holds no mutable state, so a single instance can
/// serve any number of concurrent calls; each call owns its own conversation
/// copy and retry counters.
pub struct CompletionClient {
    http: reqwest::Client,
    config: ProviderConfig,
    max_retries: u32,
    unmatched_tool_policy: UnmatchedToolCalls,
}

impl CompletionClient {
    /// `max_retries` bounds both retry policies and must be at least 1.
    pub fn new(config: impl Into<ProviderConfig>, max_retries: u32) -> Result<Self, LlmError> {
        if max_retries == 0 {
            return Err(LlmError::Configuration(
                "max_retries must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder().build().map_err(|e| {
            LlmError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            config: config.into(),
            max_retries,
            unmatched_tool_policy: UnmatchedToolCalls::default(),
        })
    }

    /// Policy for tool calls whose name matches no supplied descriptor.
    pub fn with_unmatched_tool_policy(mut self, policy: UnmatchedToolCalls) -> Self {
        self.unmatched_tool_policy = policy;
        self
    }

    /// Single-turn completion over a system + user prompt pair.
    ///
    /// The whole turn is governed by the turn retry policy: a structured
    /// output that fails to parse redoes the turn from scratch, and any
    /// other failure redoes it after exponential backoff.
    pub async fn generate_response(
        &self,
        user_prompt: &str,
        system_prompt: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        retry_turn(self.max_retries, || {
            self.single_turn(user_prompt, system_prompt, options)
        })
        .await
    }

    /// Multi-turn completion over a caller-managed conversation, with tool
    /// dispatch.
    ///
    /// Tool schemas are attached with automatic tool choice. When the model
    /// requests tool calls, each call matching a descriptor is dispatched
    /// and answered with a tool-role message carrying the call's id; the
    /// conversation is then resubmitted once and that response becomes the
    /// final answer.
    pub async fn generate_chat_response(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        retry_turn(self.max_retries, || self.chat_turn(messages, tools, options)).await
    }

    async fn single_turn(
        &self,
        user_prompt: &str,
        system_prompt: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        // The system slot is always present; without a prompt it goes out
        // with no content field at all.
        let mut messages = vec![
            ChatMessage {
                role: ChatRole::System,
                content: system_prompt.map(str::to_string),
                tool_call_id: None,
                name: None,
                tool_calls: None,
            },
            ChatMessage::user(user_prompt),
        ];

        let request = self.base_request(messages.clone(), options, None, None);
        let response = retry_transport(self.max_retries, || self.post_chat(&request)).await?;

        let mut usage = response.usage;
        let message = first_message(response)?;

        let tool_calls = message.tool_calls.clone().unwrap_or_default();
        let raw = if tool_calls.is_empty() {
            message.content.unwrap_or_default()
        } else {
            messages.push(message.into_chat_message());

            // No named tools can be supplied through this entry point, so
            // only calls with an empty function name are answered, with an
            // empty placeholder result.
            for call in &tool_calls {
                if call.function.name.is_empty() {
                    let args: Value = serde_json::from_str(&call.function.arguments).map_err(
                        |e| LlmError::ToolArguments {
                            name: call.function.name.clone(),
                            source: e,
                        },
                    )?;
                    debug!(args = %args, "parsed tool-call arguments");
                    messages.push(ChatMessage::tool(call.id.clone(), "", ""));
                }
            }

            let follow_up = self.base_request(messages.clone(), options, None, None);
            let final_response = self.post_chat(&follow_up).await?;
            usage = final_response.usage;
            first_message(final_response)?.content.unwrap_or_default()
        };

        self.build_envelope(raw, usage, options)
    }

    async fn chat_turn(
        &self,
        history: &[ChatMessage],
        tools: &[ToolDescriptor],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let mut messages = history.to_vec();

        let wire_tools = if tools.is_empty() {
            None
        } else {
            Some(tools.iter().map(FunctionTool::from_descriptor).collect())
        };
        let tool_choice = wire_tools.as_ref().map(|_| ToolChoiceMode::Auto);

        let request = self.base_request(messages.clone(), options, wire_tools, tool_choice);
        let response = retry_transport(self.max_retries, || self.post_chat(&request)).await?;

        let mut usage = response.usage;
        let message = first_message(response)?;

        let tool_calls = message.tool_calls.clone().unwrap_or_default();
        let raw = if tool_calls.is_empty() {
            message.content.unwrap_or_default()
        } else {
            info!(count = tool_calls.len(), "model requested tool execution");
            messages.push(message.into_chat_message());

            for call in &tool_calls {
                match tools.iter().find(|t| t.name == call.function.name) {
                    Some(tool) => {
                        let args: Value = serde_json::from_str(&call.function.arguments)
                            .map_err(|e| LlmError::ToolArguments {
                                name: call.function.name.clone(),
                                source: e,
                            })?;
                        debug!(tool = %tool.name, args = %args, "parsed tool-call arguments");

                        let positional = positional_arguments(&args);
                        let result = tool.invoke(&positional);
                        messages.push(ChatMessage::tool(call.id.clone(), &tool.name, result));
                    }
                    None => match self.unmatched_tool_policy {
                        UnmatchedToolCalls::Ignore => {
                            debug!(
                                name = %call.function.name,
                                "dropping tool call with no matching descriptor"
                            );
                        }
                        UnmatchedToolCalls::Placeholder => {
                            messages.push(ChatMessage::tool(
                                call.id.clone(),
                                &call.function.name,
                                "",
                            ));
                        }
                        UnmatchedToolCalls::Fail => {
                            return Err(LlmError::UnknownTool(call.function.name.clone()));
                        }
                    },
                }
            }

            // Tool schemas are not re-attached for the resolution round.
            let follow_up = self.base_request(messages.clone(), options, None, None);
            let final_response = self.post_chat(&follow_up).await?;
            usage = final_response.usage;
            first_message(final_response)?.content.unwrap_or_default()
        };

        self.build_envelope(raw, usage, options)
    }

    fn base_request(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
        tools: Option<Vec<FunctionTool>>,
        tool_choice: Option<ToolChoiceMode>,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: options.model.clone(),
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            response_format: (options.output_format == ResponseFormat::Json)
                .then(WireResponseFormat::json_object),
            tools,
            tool_choice,
        }
    }

    /// One remote call, no retries; classification only.
    async fn post_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let url = self.config.completions_url();
        let (auth_name, auth_value) = self.config.auth_header();

        debug!(url = %url, model = %request.model, "submitting completion request");

        let res = self
            .http
            .post(&url)
            .header(auth_name, auth_value)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Network {
                message: "request to completion endpoint failed".to_string(),
                source: e,
            })?;

        let status = res.status();
        if !status.is_success() {
            let message = res
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = res.text().await.map_err(|e| LlmError::Network {
            message: "failed to read response body".to_string(),
            source: e,
        })?;

        serde_json::from_str(&body).map_err(|e| LlmError::Wire {
            message: "unexpected completion response shape".to_string(),
            source: e,
        })
    }

    fn build_envelope(
        &self,
        raw: String,
        usage: TokenUsage,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            content: finalize_content(raw, options.output_format)?,
            token_usage: usage,
            model: options.model.clone(),
            response_format: options.output_format,
        })
    }
}

// Manual impl so the configured credential never lands in logs.
impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("provider", &self.config.provider())
            .field("max_retries", &self.max_retries)
            .field("unmatched_tool_policy", &self.unmatched_tool_policy)
            .finish_non_exhaustive()
    }
}

fn first_message(response: ChatCompletionResponse) -> Result<AssistantMessage, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or(LlmError::EmptyResponse)
}

/// A JSON object's values in the object's own key order; any other value is
/// handed over as the sole argument.
fn positional_arguments(args: &Value) -> Vec<Value> {
    match args {
        Value::Object(map) => map.values().cloned().collect(),
        other => vec![other.clone()],
    }
}

/// The one finalize step shared by both entry points: text passes through,
/// JSON gets its markdown fence stripped and must parse.
fn finalize_content(raw: String, format: ResponseFormat) -> Result<Content, LlmError> {
    match format {
        ResponseFormat::Text => Ok(Content::Text(raw)),
        ResponseFormat::Json => {
            let stripped = strip_json_fence(&raw);
            let value = serde_json::from_str(&stripped).map_err(LlmError::ContentParse)?;
            Ok(Content::Json(value))
        }
    }
}

fn strip_json_fence(raw: &str) -> String {
    raw.replace("```json\n", "")
        .replace("```json", "")
        .replace("\n```", "")
        .replace("```", "")
        .trim()
        .to_string()
}
