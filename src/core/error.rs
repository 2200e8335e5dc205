use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    /// Missing credential, invalid provider selection, or bad client setup.
    /// Raised synchronously at construction and never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The endpoint answered with a body we could not decode.
    #[error("failed to decode completion response: {message}")]
    Wire {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Structured output was requested but the returned text did not parse.
    /// The turn retry policy redoes the whole turn for this variant.
    #[error("response content is not valid JSON")]
    ContentParse(#[source] serde_json::Error),

    #[error("failed to parse arguments for tool `{name}`")]
    ToolArguments {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model requested unknown tool `{0}`")]
    UnknownTool(String),

    #[error("response contained no choices")]
    EmptyResponse,

    #[error("failed to parse response as JSON after {retries} retries")]
    JsonRetriesExhausted { retries: u32 },

    #[error("failed to generate a valid response after {retries} retries")]
    RetriesExhausted { retries: u32 },
}
