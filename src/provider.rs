//! Provider selection and per-provider configuration.
//!
//! The two recognized deployment targets are plain OpenAI and an Azure
//! OpenAI deployment. Each variant owns its own required fields and is
//! validated by its own constructor; the client itself never reads the
//! process environment. Call the `from_env` helpers once at startup if the
//! credentials live there.

mod constants;

use std::fmt;
use std::str::FromStr;

use crate::core::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Azure,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Azure => write!(f, "azure"),
        }
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "azure" => Ok(Provider::Azure),
            other => Err(LlmError::Configuration(format!(
                "invalid service provider `{other}`, choose `openai` or `azure`"
            ))),
        }
    }
}

fn require(value: String, what: &str) -> Result<String, LlmError> {
    if value.trim().is_empty() {
        Err(LlmError::Configuration(format!("{what} is required")))
    } else {
        Ok(value)
    }
}

fn env_var(name: &str) -> Result<String, LlmError> {
    std::env::var(name)
        .map_err(|_| LlmError::Configuration(format!("{name} is required, set it in the environment")))
}

/// Configuration for the plain OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            api_key: require(api_key.into(), "OpenAI API key")?,
            base_url: constants::openai::API_BASE.to_string(),
        })
    }

    /// Resolve the API key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(env_var(constants::openai::API_KEY_ENV_VAR)?)
    }

    /// Point the client somewhere else, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Configuration for an Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) deployment: String,
    pub(crate) api_version: String,
}

impl AzureConfig {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            api_key: require(api_key.into(), "Azure OpenAI API key")?,
            endpoint: require(endpoint.into(), "Azure OpenAI endpoint")?,
            deployment: require(deployment.into(), "Azure OpenAI deployment name")?,
            api_version: constants::azure::API_VERSION.to_string(),
        })
    }

    /// Resolve key, endpoint and deployment from `AZURE_OPENAI_API_KEY`,
    /// `AZURE_OPENAI_ENDPOINT` and `AZURE_OPENAI_DEPLOYMENT_NAME`.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(
            env_var(constants::azure::API_KEY_ENV_VAR)?,
            env_var(constants::azure::ENDPOINT_ENV_VAR)?,
            env_var(constants::azure::DEPLOYMENT_ENV_VAR)?,
        )
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

/// Tagged union over the recognized provider configurations.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    OpenAi(OpenAiConfig),
    Azure(AzureConfig),
}

impl ProviderConfig {
    /// Resolve the selected provider's configuration from the environment.
    pub fn from_env(provider: Provider) -> Result<Self, LlmError> {
        match provider {
            Provider::OpenAi => Ok(Self::OpenAi(OpenAiConfig::from_env()?)),
            Provider::Azure => Ok(Self::Azure(AzureConfig::from_env()?)),
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            ProviderConfig::OpenAi(_) => Provider::OpenAi,
            ProviderConfig::Azure(_) => Provider::Azure,
        }
    }

    pub(crate) fn completions_url(&self) -> String {
        match self {
            ProviderConfig::OpenAi(config) => format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                constants::openai::COMPLETIONS_ENDPOINT
            ),
            ProviderConfig::Azure(config) => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                config.endpoint.trim_end_matches('/'),
                config.deployment,
                config.api_version
            ),
        }
    }

    pub(crate) fn auth_header(&self) -> (&'static str, String) {
        match self {
            ProviderConfig::OpenAi(config) => {
                ("Authorization", format!("Bearer {}", config.api_key))
            }
            ProviderConfig::Azure(config) => ("api-key", config.api_key.clone()),
        }
    }
}

impl From<OpenAiConfig> for ProviderConfig {
    fn from(config: OpenAiConfig) -> Self {
        Self::OpenAi(config)
    }
}

impl From<AzureConfig> for ProviderConfig {
    fn from(config: AzureConfig) -> Self {
        Self::Azure(config)
    }
}
