mod error;
mod normalize;
pub mod prompt;
mod request;

pub use error::ClassificationError;
pub use normalize::{
    MAX_CALORIES, NormalizedResult, UNKNOWN_LABEL, UNKNOWN_LABEL_AR, normalize, parse_reply,
};
pub use request::{ClassifyRequest, DEFAULT_DATA_URL_PREFIX, to_data_url};

use crate::{
    Result,
    config::UpstreamConfig,
    llm::{LlmClient, OpenRouterClient},
};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Stateless relay between one image and the upstream provider.
pub struct Classifier {
    llm: Option<Arc<dyn LlmClient>>,
    model: String,
    max_tokens: u32,
}

impl Classifier {
    /// Builds the upstream client only when a credential is configured.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let llm: Option<Arc<dyn LlmClient>> = if config.has_credential() {
            Some(Arc::new(OpenRouterClient::new(config)?))
        } else {
            None
        };

        Ok(Self::new(llm, config.model.clone(), config.max_tokens))
    }

    pub fn new(llm: Option<Arc<dyn LlmClient>>, model: String, max_tokens: u32) -> Self {
        Self {
            llm,
            model,
            max_tokens,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn classify(
        &self,
        request: ClassifyRequest,
    ) -> std::result::Result<NormalizedResult, ClassificationError> {
        let span = info_span!("classify", request_id = %Uuid::new_v4());
        self.classify_inner(request).instrument(span).await
    }

    async fn classify_inner(
        &self,
        request: ClassifyRequest,
    ) -> std::result::Result<NormalizedResult, ClassificationError> {
        let image = request.image().ok_or_else(ClassificationError::missing_image)?;
        let llm = self
            .llm
            .as_ref()
            .ok_or(ClassificationError::MissingCredential)?;

        let image_url = to_data_url(image);
        debug!("Forwarding image of {} bytes", image_url.len());

        let upstream_request = prompt::build_request(&self.model, &image_url, self.max_tokens);
        let response = llm
            .create_chat_completion(upstream_request)
            .await
            .map_err(|e| {
                error!("Upstream call failed: {}", e);
                ClassificationError::from(e)
            })?;

        let text = response.first_text();
        let result = parse_reply(text).inspect_err(|_| {
            if response.is_truncated() {
                warn!(
                    "Model reply hit the {} token ceiling before finishing",
                    self.max_tokens
                );
            }
            warn!("JSON parse failed. Raw text: {}", text);
        })?;

        info!(
            "Classified image as '{}' (score {:.2}, prompt v{})",
            result.label,
            result.score,
            prompt::PROMPT_VERSION
        );
        Ok(result)
    }
}
