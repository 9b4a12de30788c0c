//! OpenAI-compatible Chat Completions client.
//!
//! Each call authenticates with the credential passed in by the caller, so
//! usage is attributed to the user who issued the command.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionError, CompletionService, Credential, value_object::NO_RESPONSE_TEXT};

pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

/// Completion service talking to an OpenAI-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionService {
    client: Client,
    endpoint: String,
    model: String,
}

impl OpenAiCompletionService {
    /// Creates a client for `{base_url}/chat/completions`.
    ///
    /// `timeout` bounds the whole HTTP exchange.
    pub fn new(
        base_url: impl AsRef<str>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CompletionError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.as_ref().trim_end_matches('/')),
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    async fn complete(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| CompletionError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read completion error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Transport(format!("invalid response body: {err}")))?;

        extract_text_response(parsed)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::EmptyResponse)?;
    Ok(choice
        .message
        .content
        .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string()))
}

fn map_http_error(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());
    CompletionError::Status {
        status: status.as_u16(),
        message,
    }
}
