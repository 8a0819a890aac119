//! OpenRouter Provider Implementation
//!
//! Integration with OpenRouter's OpenAI-compatible chat-completions API.
//!
//! # Features
//!
//! - Async HTTP communication with the OpenRouter API
//! - Configurable endpoint and model
//! - Bounded request timeout
//!
//! No retries are attempted: a failed inference call propagates to the
//! caller.
//!
//! # Examples
//!
//! ```no_run
//! use ledgermail_llm::OpenRouterProvider;
//!
//! let provider = OpenRouterProvider::new(
//!     "https://openrouter.ai/api/v1",
//!     "mistralai/mistral-7b-instruct:free",
//!     "sk-or-...",
//! );
//! ```

use crate::LlmError;
use async_trait::async_trait;
use ledgermail_domain::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenRouter API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// OpenRouter chat-completions provider
///
/// One provider value is constructed at process start and shared by
/// reference for the whole run; there is no global client state.
pub struct OpenRouterProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://openrouter.ai/api/v1")
    /// - `model`: model identifier (e.g., "mistralai/mistral-7b-instruct:free")
    /// - `api_key`: bearer token for the API
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_timeout(endpoint, model, api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a provider with an explicit request timeout in seconds
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// The model this provider sends requests for
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))?;

        Ok(choice.message.content)
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt).await
    }
}
