//! HTTP client for an OpenAI-compatible Chat Completions endpoint.
//!
//! Two call shapes: POST `{base}/chat/completions` for the summarize and
//! ask flows, and GET `{base}/models` for the operator-facing credential
//! check. Every call is attempted exactly once; there are no retries.

use crate::config::{resolve_api_base, resolve_model};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of the `GET /models` credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheck {
    /// The endpoint accepted the credential.
    Valid,
    /// The endpoint returned 401.
    Unauthorized,
}

/// Client for the completion endpoint.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl ChatClient {
    /// Create a client using the configured endpoint and model.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(resolve_api_base())
    }

    /// Create a client against a specific base URL (tests, custom servers).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url: base_url.into(),
            model: resolve_model(),
        }
    }

    /// Issue one chat completion and return the trimmed text of the
    /// first choice.
    ///
    /// # Errors
    ///
    /// Returns `Error::Api` with `"API request failed: <status>"` on a
    /// non-success status, and with the transport reason on a connection
    /// failure. The caller decides whether that is soft-degraded
    /// (summaries) or surfaced (ask).
    pub async fn complete(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatCompletionMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatCompletionMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            max_tokens,
            temperature,
        };

        tracing::debug!(model = %self.model, %url, "sending completion request");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "completion request rejected");
            return Err(Error::Api(format!("API request failed: {}", status.as_u16())));
        }

        let data: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(format!("Failed to parse response: {e}")))?;

        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api("No choices in response".to_string()))?;

        Ok(choice.message.content.unwrap_or_default().trim().to_string())
    }

    /// Check the credential against the models-listing endpoint.
    ///
    /// Used only by `lks key test`; the core flows never call this.
    ///
    /// # Errors
    ///
    /// Returns `Error::Api` for any status other than success or 401, and
    /// for transport failures.
    pub async fn validate_key(&self, api_key: &str) -> Result<KeyCheck> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .send()
            .await
            .map_err(|e| Error::Api(format!("Connection test failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(KeyCheck::Valid);
        }
        if status.as_u16() == 401 {
            return Ok(KeyCheck::Unauthorized);
        }
        Err(Error::Api(format!(
            "Connection failed with status: {}",
            status.as_u16()
        )))
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

// Wire types for the OpenAI-compatible endpoint.

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_returns_trimmed_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "  An answer.  "}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(server.uri());
        let text = client
            .complete("sk-test", "system", "user", 150, 0.7)
            .await
            .unwrap();
        assert_eq!(text, "An answer.");
    }

    #[tokio::test]
    async fn test_complete_sends_model_and_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ],
                "max_tokens": 150
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(server.uri());
        client.complete("sk-test", "sys", "usr", 150, 0.7).await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_maps_http_failure_to_status_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(server.uri());
        let err = client
            .complete("sk-test", "s", "u", 150, 0.7)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API request failed: 500");
    }

    #[tokio::test]
    async fn test_validate_key_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("Authorization", "Bearer sk-good"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("Authorization", "Bearer sk-bad"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(server.uri());
        assert_eq!(client.validate_key("sk-good").await.unwrap(), KeyCheck::Valid);
        assert_eq!(
            client.validate_key("sk-bad").await.unwrap(),
            KeyCheck::Unauthorized
        );
    }
}
