// OpenAI chat completion client

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::AppConfig;

/// Failures surfaced by the completion endpoint. The controller turns each of
/// these into a single user-facing notification; nothing above this boundary
/// uses exception-style control flow.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Provider { status: u16, message: String },
    #[error("response contained no choices")]
    EmptyResponse,
}

/// One completion call: the key authenticates it, the prompts become the
/// system and user messages. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Seam between the controller and the HTTP transport, so controller behavior
/// can be exercised against a test double.
#[allow(async_fn_in_trait)]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(base_url: String, request_timeout: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }
}

impl CompletionApi for OpenAiClient {
    /// One POST per call: bearer auth, fixed model, a system message and a
    /// user message. No retry; a failure ends the attempt.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ApiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = ChatRequest {
            model: request.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Provider {
                status,
                message: provider_message(&text),
            });
        }

        let decoded = response.json::<ChatResponse>().await?;

        decoded
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(ApiError::EmptyResponse)
    }
}

/// Pull the human-readable message out of the provider's error envelope,
/// falling back to the raw body when it is not JSON.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| body.to_string(), |envelope| envelope.error.message)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request_for(model: &str) -> CompletionRequest {
        CompletionRequest {
            api_key: "sk-test".to_string(),
            model: model.to_string(),
            system_prompt: "You are a drafting assistant.".to_string(),
            user_prompt: "Draft a hello".to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("https://api.openai.com".to_string(), 120);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_from_config() {
        let client = OpenAiClient::from_config(&AppConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_provider_message_extraction() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(provider_message(body), "Incorrect API key provided");
        assert_eq!(provider_message("plain text failure"), "plain text failure");
    }

    #[tokio::test]
    async fn test_complete_sends_two_messages_and_trims_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "You are a drafting assistant." },
                    { "role": "user", "content": "Draft a hello" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "  Hello!  \n" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), 30).unwrap();
        let text = client.complete(request_for("gpt-4o-mini")).await.unwrap();
        assert_eq!(text, "Hello!");
    }

    #[tokio::test]
    async fn test_complete_surfaces_provider_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), 30).unwrap();
        let err = client.complete(request_for("gpt-4o-mini")).await.unwrap_err();
        match err {
            ApiError::Provider { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_keeps_raw_body_when_error_is_not_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), 30).unwrap();
        let err = client.complete(request_for("gpt-4o-mini")).await.unwrap_err();
        assert_eq!(err.to_string(), "upstream exploded");
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), 30).unwrap();
        let err = client.complete(request_for("gpt-4o-mini")).await.unwrap_err();
        assert!(matches!(err, ApiError::EmptyResponse));
    }
}
