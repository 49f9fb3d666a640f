use super::types::*;
use crate::{Error, Result, config::UpstreamConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, warn};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

/// Chat-completion client for OpenRouter and other OpenAI-compatible endpoints.
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    site_url: String,
    app_name: String,
}

impl OpenRouterClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&config.base_url),
            api_key: config.api_key.clone(),
            site_url: config.site_url.clone(),
            app_name: config.app_name.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Sending chat completion to {} with model {}",
            self.endpoint, request.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", &self.app_name)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
            error!("Upstream error status: {}", status);
            error!("Upstream error body: {}", body);
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Upstream response status: {}, {} bytes", status, text.len());

        match serde_json::from_str::<ChatCompletionResponse>(&text) {
            Ok(parsed) => {
                if let Some(ref usage) = parsed.usage {
                    debug!(
                        "Token usage: prompt={}, completion={}, total={}",
                        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                    );
                }
                Ok(parsed)
            }
            Err(e) => {
                warn!("Upstream success body did not decode, treating as empty: {}", e);
                Ok(ChatCompletionResponse::default())
            }
        }
    }
}
