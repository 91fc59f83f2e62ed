//! Model endpoint clients.

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use reqwest::{Certificate, Client};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{ClassifyError, ClassifyResult};
use super::prompt::user_message;
use super::retry::RetryPolicy;
use crate::config::Config;

/// Produces a label for a name given a system prompt.
#[async_trait]
pub trait LabelProvider: Send + Sync {
    async fn classify(&self, name: &str, system_prompt: &str) -> ClassifyResult<String>;
}

/// OpenAI-compatible chat-completions client with retry.
pub struct OpenAiProvider {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("retry", &self.retry)
            .finish()
    }
}

impl OpenAiProvider {
    /// Creates a client.
    ///
    /// If `ca_bundle` is given, every certificate in it is trusted in addition to the
    /// system roots.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        retry: RetryPolicy,
        timeout: Duration,
        ca_bundle: Option<&Path>,
    ) -> ClassifyResult<Self> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(path) = ca_bundle {
            let pem = fs::read(path)?;
            let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| {
                ClassifyError::InvalidRequest(format!(
                    "invalid CA bundle {}: {}",
                    path.display(),
                    e
                ))
            })?;
            debug!(path = %path.display(), certificates = certificates.len(), "Loaded CA bundle");
            for certificate in certificates {
                builder = builder.add_root_certificate(certificate);
            }
        }
        let client = builder
            .build()
            .map_err(|e| ClassifyError::InvalidRequest(format!("failed to build client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            retry,
        })
    }

    /// Creates a client from [`Config`]; fails if no API key is configured.
    pub fn from_config(config: &Config) -> ClassifyResult<Self> {
        let api_key = config.require_api_key()?;
        Self::new(
            config.api_url.clone(),
            api_key,
            config.model.clone(),
            RetryPolicy::from_config(config),
            config.request_timeout,
            config.ca_bundle_if_present(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the deterministic (temperature 0) two-message request for `name`.
    pub fn build_request(
        &self,
        name: &str,
        system_prompt: &str,
    ) -> ClassifyResult<CreateChatCompletionRequest> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(invalid)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message(name))
            .build()
            .map_err(invalid)?;

        CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .temperature(0.0)
            .build()
            .map_err(invalid)
    }

    async fn send_once(&self, request: &CreateChatCompletionRequest) -> ClassifyResult<String> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClassifyError::UnexpectedResponse(e.to_string()))?;
        extract_label(&body)
    }
}

#[async_trait]
impl LabelProvider for OpenAiProvider {
    #[instrument(skip(self, system_prompt), fields(model = %self.model))]
    async fn classify(&self, name: &str, system_prompt: &str) -> ClassifyResult<String> {
        let request = self.build_request(name, system_prompt)?;

        let mut attempt = 1;
        loop {
            match self.send_once(&request).await {
                Ok(label) => return Ok(label),
                Err(e) if e.is_retryable() && self.retry.allows_retry_after(attempt) => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Model call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn invalid(e: impl std::fmt::Display) -> ClassifyError {
    ClassifyError::InvalidRequest(e.to_string())
}

/// Pulls `choices[0].message.content` out of a completion response, trimmed.
pub fn extract_label(body: &Value) -> ClassifyResult<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            ClassifyError::UnexpectedResponse(
                serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()),
            )
        })
}
