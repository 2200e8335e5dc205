//! # chatwrap
//!
//! Resilient chat-completion client for OpenAI and Azure OpenAI deployments.
//!
//! The client wraps a hosted completion endpoint with provider selection,
//! exponential-backoff retries, optional structured-JSON output coercion and
//! a single round of tool dispatch. Credentials are injected explicitly;
//! resolve them from the environment once at startup with the `from_env`
//! helpers if that is where they live.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatwrap::{CompletionClient, CompletionOptions, OpenAiConfig, ResponseFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionClient::new(OpenAiConfig::from_env()?, 3)?;
//!
//!     let options = CompletionOptions::default().with_output_format(ResponseFormat::Json);
//!     let response = client
//!         .generate_response(
//!             "Summarize this repo as JSON with keys `name` and `purpose`.",
//!             Some("You are a terse release-notes bot."),
//!             &options,
//!         )
//!         .await?;
//!
//!     println!("{:?}", response.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Tool dispatch
//!
//! Tools are plain descriptors: a name, a JSON-schema parameter description
//! and a local callable. When the model requests a matching call during
//! [`CompletionClient::generate_chat_response`], the callable runs locally,
//! its string result is appended as a tool-role message and the conversation
//! is resubmitted once for the final answer.

pub mod completions;
pub mod core;
pub mod provider;

pub use completions::CompletionClient;
pub use core::error::LlmError;
pub use core::types::{
    ChatMessage, ChatRole, CompletionOptions, CompletionResponse, Content, FunctionCall,
    ResponseFormat, TokenUsage, ToolCallRequest, ToolDescriptor, UnmatchedToolCalls,
};
pub use provider::{AzureConfig, OpenAiConfig, Provider, ProviderConfig};
