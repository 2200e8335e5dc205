pub mod error;
pub mod retry;
pub mod types;

pub use error::LlmError;
pub use types::{
    ChatMessage, ChatRole, CompletionOptions, CompletionResponse, Content, FunctionCall,
    ResponseFormat, TokenUsage, ToolCallRequest, ToolDescriptor, UnmatchedToolCalls,
};
