// Configuration type definitions

use serde::Deserialize;

/// Backend (suggestion function) configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, e.g. "https://myproject.supabase.co"
    #[serde(default)]
    pub base_url: String,
    /// Name of the deployed suggestion function
    #[serde(default = "default_function")]
    pub function: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_function() -> String {
    "generate-ticket-suggestions".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: String::new(),
            function: default_function(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Assistant configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Whether the AI assistant is enabled at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig { enabled: true }
    }
}

/// Session configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Identity of the signed-in agent; absent disables retrieval
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub session: SessionConfig,
}
