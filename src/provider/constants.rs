pub mod openai {
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
}

pub mod azure {
    pub const API_VERSION: &str = "2024-06-01";
    pub const API_KEY_ENV_VAR: &str = "AZURE_OPENAI_API_KEY";
    pub const ENDPOINT_ENV_VAR: &str = "AZURE_OPENAI_ENDPOINT";
    pub const DEPLOYMENT_ENV_VAR: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
}
