use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::domain::Quiz;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Seam for the generation backend. Returns the raw answer text of the
/// first choice, unmodified; fence stripping belongs to the quiz parser.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

pub struct OpenAiService {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl OpenAiService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.openai_connect_timeout_secs))
            .timeout(Duration::from_secs(config.openai_read_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("failed to build OpenAI HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            max_tokens: config.openai_max_tokens,
        })
    }

    /// Request body with the quiz shape attached as a native structured
    /// output constraint, derived from the same type the parser decodes.
    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "max_completion_tokens": self.max_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "quiz",
                    "schema": schemars::schema_for!(Quiz)
                }
            }
        })
    }

    async fn send(&self, prompt: &str) -> AppResult<String> {
        log::info!(
            "requesting quiz from OpenAI (model={}, max_tokens={})",
            self.model,
            self.max_tokens
        );

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::AuthenticationError);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::ModelNotFound(self.model.clone()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("OpenAI API error {}: {}", status, body);
            return Err(AppError::GenerationError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }

        let root: Value = serde_json::from_str(&body).map_err(|_| AppError::GenerationError {
            status: status.as_u16(),
            body: body.clone(),
        })?;

        let content = root["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }

        Ok(content.to_string())
    }
}

#[async_trait]
impl CompletionBackend for OpenAiService {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.send(prompt).await
    }
}
