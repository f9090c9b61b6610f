//! ASI chat-completions provider
//!
//! Talks to an OpenAI-compatible chat-completions endpoint (the ASI gateway by
//! default). The pipeline only ever needs a single system + user exchange, so
//! the request surface here is deliberately narrow.
//!
//! # Features
//!
//! - Async HTTP communication with the completions API
//! - Configurable base URL, model, and temperature
//! - Retry logic with exponential backoff
//! - Timeout handling

use crate::OracleError;
use async_trait::async_trait;
use mirror_domain::traits::Oracle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default ASI gateway base URL
pub const DEFAULT_BASE_URL: &str = "https://api.asi1.ai/v1";

/// Default model served by the gateway
pub const DEFAULT_MODEL: &str = "asi1-mini";

/// Default timeout for completion requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// OpenAI-compatible chat-completions oracle
pub struct AsiOracle {
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl AsiOracle {
    /// Create a new oracle for the given API key and base URL
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mirror_llm::AsiOracle;
    ///
    /// let oracle = AsiOracle::new("sk-...", "https://api.asi1.ai/v1");
    /// ```
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            temperature: 0.3,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a new oracle against the default gateway
    pub fn default_gateway(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_BASE_URL)
    }

    /// Set the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn request_completion(&self, system: &str, user: &str) -> Result<String, OracleError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: self.temperature,
        };

        // Retry loop with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response
                            .json::<ChatCompletionResponse>()
                            .await
                            .map_err(|e| {
                                OracleError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                ))
                            })?;

                        return parsed
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|choice| choice.message.content)
                            .ok_or_else(|| {
                                OracleError::InvalidResponse("Empty completion".to_string())
                            });
                    } else if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        // Not worth retrying
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(OracleError::Rejected(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(OracleError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(OracleError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| OracleError::Communication("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl Oracle for AsiOracle {
    type Error = OracleError;

    async fn complete(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        self.request_completion(system, user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_creation() {
        let oracle = AsiOracle::new("key", "https://api.asi1.ai/v1");
        assert_eq!(oracle.base_url, "https://api.asi1.ai/v1");
        assert_eq!(oracle.model, DEFAULT_MODEL);
        assert_eq!(oracle.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_oracle_default_gateway() {
        let oracle = AsiOracle::default_gateway("key");
        assert_eq!(oracle.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_oracle_builders() {
        let oracle = AsiOracle::new("key", "http://localhost:9999")
            .with_model("asi1-large")
            .with_temperature(0.2)
            .with_max_retries(1);
        assert_eq!(oracle.model, "asi1-large");
        assert_eq!(oracle.temperature, 0.2);
        assert_eq!(oracle.max_retries, 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        // Port 1 should refuse connections immediately
        let oracle = AsiOracle::new("key", "http://127.0.0.1:1").with_max_retries(1);
        let result = oracle.complete("system", "user").await;
        assert!(matches!(result, Err(OracleError::Communication(_))));
    }
}
