use serde::{Deserialize, Serialize};

use super::EngineError;
use crate::config::ModelConfig;

/// Reasoning-service client abstraction (allows mocking).
pub trait LlmClient: Send + Sync {
    /// Send one prompt, return the model's raw text completion.
    fn complete(&self, prompt: &str) -> Result<String, EngineError>;
}

/// Blocking HTTP client for an OpenRouter-style chat-completions endpoint.
pub struct OpenRouterClient {
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl OpenRouterClient {
    /// Build a client from configuration. An absent credential is a
    /// constructor-time failure: the engine then runs permanently on the
    /// rule-based fallback instead of probing at request time.
    pub fn from_config(config: &ModelConfig) -> Result<Self, EngineError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(EngineError::MissingApiKey)?;

        let timeout_secs = config.effective_timeout_secs();
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EngineError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_secs,
            client,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl LlmClient for OpenRouterClient {
    fn complete(&self, prompt: &str) -> Result<String, EngineError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    EngineError::Connection(self.endpoint.clone())
                } else {
                    EngineError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EngineError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| EngineError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| EngineError::MalformedResponse("response has no choices".into()))
    }
}

/// Mock client for tests — returns a configured response or a canned failure.
pub struct MockLlmClient {
    outcome: MockOutcome,
}

enum MockOutcome {
    Respond(String),
    FailConnect,
    FailTimeout,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            outcome: MockOutcome::Respond(response.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: MockOutcome::FailConnect,
        }
    }

    pub fn timing_out() -> Self {
        Self {
            outcome: MockOutcome::FailTimeout,
        }
    }
}

impl LlmClient for MockLlmClient {
    fn complete(&self, _prompt: &str) -> Result<String, EngineError> {
        match &self.outcome {
            MockOutcome::Respond(r) => Ok(r.clone()),
            MockOutcome::FailConnect => Err(EngineError::Connection("mock".into())),
            MockOutcome::FailTimeout => Err(EngineError::Timeout(30)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_fails_at_construction() {
        let config = ModelConfig::default();
        assert!(matches!(
            OpenRouterClient::from_config(&config),
            Err(EngineError::MissingApiKey)
        ));
    }

    #[test]
    fn blank_api_key_fails_at_construction() {
        let config = ModelConfig::with_api_key("   ");
        assert!(matches!(
            OpenRouterClient::from_config(&config),
            Err(EngineError::MissingApiKey)
        ));
    }

    #[test]
    fn client_constructor_trims_trailing_slash() {
        let config = ModelConfig {
            endpoint: "https://openrouter.ai/api/v1/chat/completions/".into(),
            ..ModelConfig::with_api_key("sk-test")
        };
        let client = OpenRouterClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint, "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(client.timeout_secs, 30);
    }

    #[test]
    fn mock_client_returns_configured_response() {
        let client = MockLlmClient::new(r#"{"interactions": []}"#);
        assert_eq!(client.complete("prompt").unwrap(), r#"{"interactions": []}"#);
    }

    #[test]
    fn mock_client_failure_modes() {
        assert!(matches!(
            MockLlmClient::failing().complete("p"),
            Err(EngineError::Connection(_))
        ));
        assert!(matches!(
            MockLlmClient::timing_out().complete("p"),
            Err(EngineError::Timeout(_))
        ));
    }

    #[test]
    fn chat_request_serializes_openrouter_shape() {
        let body = ChatRequest {
            model: "anthropic/claude-3-haiku",
            messages: vec![ChatMessage {
                role: "user",
                content: "analyze",
            }],
            max_tokens: 1500,
            temperature: 0.1,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "anthropic/claude-3-haiku");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 1500);
    }
}
