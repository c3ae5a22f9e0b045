//! Chat-completions API client.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ModelConfig;

use super::error::{ApiErrorResponse, ChatError};
use super::types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// Chat-completion model client.
///
/// Sends a prompt to the configured chat-completions endpoint and returns the
/// raw text content of the first completion choice.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<ChatClientInner>,
}

struct ChatClientInner {
    client: reqwest::Client,
    model: String,
    completions_url: String,
}

impl ChatClient {
    /// Create a new chat client.
    ///
    /// # Arguments
    ///
    /// * `config` - Model configuration containing API key, model ID, base
    ///   URL and per-request timeout
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &ModelConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.api_key.expose_secret()
        ))
        .expect("Invalid API key for header");
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        let completions_url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        Self {
            inner: Arc::new(ChatClientInner {
                client,
                model: config.model.clone(),
                completions_url,
            }),
        }
    }

    /// Send a system + user prompt and return the completion text.
    ///
    /// Asks the service for a JSON-shaped payload (`response_format:
    /// json_object`) where supported.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns an error
    /// response, or the response carries no completion text.
    #[instrument(skip(self, system, user), fields(model = %self.inner.model))]
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ChatError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.completions_url)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle a response, successful or not.
    async fn handle_response(&self, response: reqwest::Response) -> Result<String, ChatError> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::Parse(format!("Failed to parse response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ChatError::Empty)
    }

    /// Map an error status code to a `ChatError`.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ChatError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ChatError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ChatError::Unauthorized("Invalid API key".to_owned());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    ChatError::Api {
                        error_type: api_error
                            .error
                            .error_type
                            .unwrap_or_else(|| "unknown".to_owned()),
                        message: api_error.error.message,
                    }
                } else {
                    ChatError::Api {
                        error_type: "unknown".to_owned(),
                        message: body,
                    }
                }
            }
            Err(e) => ChatError::Http(e),
        }
    }
}
