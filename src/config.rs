/// Default reasoning-service endpoint (OpenRouter chat completions).
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-haiku";

/// Default request timeout for the reasoning-service call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contract ceiling on the reasoning-service timeout.
pub const MAX_TIMEOUT_SECS: u64 = 45;

/// Low temperature: the goal is reproducible structured output.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

pub const DEFAULT_MAX_TOKENS: u32 = 1500;

/// Configuration for the external reasoning client. Passed explicitly into
/// constructors; there is no process-wide state.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Absent credential means the remote path is permanently disabled and
    /// every analysis uses the rule-based fallback.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ModelConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Timeout to apply to the HTTP client, clamped to the contract ceiling.
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.min(MAX_TIMEOUT_SECS)
    }
}
