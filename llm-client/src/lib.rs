pub mod style;
pub mod voice;

use async_trait::async_trait;
use dugout_core::{CoreError, LlmError};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const HTTP_REFERER: &str = "https://laygraphs.com";
const APP_TITLE: &str = "Dugout Braves Bot";
const PROVIDER: &str = "openrouter";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One chat-completion call: a system-style instruction plus one user
/// instruction, with the sampling knobs the voice prompts pin down.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free-form text. A non-2xx response or an unparseable body
    /// is a hard error for the invocation; there is no retry.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError>;
}

pub struct OpenRouterClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_key,
            model,
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenRouterClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        debug!("Requesting completion from model {}", self.model);
        let response = self
            .client
            .post(OPENROUTER_URL)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", HTTP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Completion request failed: {}", e);
                if e.is_timeout() {
                    CoreError::Llm(LlmError::RequestTimeout {
                        provider: PROVIDER.to_string(),
                    })
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Completion request returned {}: {}", status, body);
            return match status.as_u16() {
                401 | 403 => Err(CoreError::Llm(LlmError::AuthenticationFailed {
                    provider: PROVIDER.to_string(),
                })),
                429 => Err(CoreError::Llm(LlmError::RateLimitExceeded {
                    provider: PROVIDER.to_string(),
                })),
                _ => Err(CoreError::Llm(LlmError::RequestRejected {
                    provider: PROVIDER.to_string(),
                    details: format!("status {}: {}", status, body),
                })),
            };
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            CoreError::Llm(LlmError::InvalidResponseFormat {
                provider: PROVIDER.to_string(),
                details: e.to_string(),
            })
        })?;

        let text = extract_content(&body)?;
        Ok(text)
    }
}

/// Pull `choices[0].message.content` out of a chat-completion body.
pub fn extract_content(body: &serde_json::Value) -> Result<String, LlmError> {
    let content = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| LlmError::InvalidResponseFormat {
            provider: PROVIDER.to_string(),
            details: "No choices[0].message.content in response".to_string(),
        })?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(LlmError::EmptyCompletion {
            provider: PROVIDER.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
