//! Caller side of the relay: image encoding, the HTTP call and the
//! per-session last result.

mod session;

pub use session::Session;

use crate::{Result, classify::NormalizedResult, server::types::ErrorResponse};
use base64::{Engine, engine::general_purpose};
use std::{path::Path, time::Duration};
use thiserror::Error;
use tracing::debug;

/// A failed classification as seen by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {message}")]
pub struct RelayFailure {
    pub kind: String,
    pub message: String,
    pub status: Option<u16>,
}

pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(relay_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/classify", relay_url.trim_end_matches('/')),
        })
    }

    pub async fn classify(
        &self,
        image_data_url: String,
    ) -> std::result::Result<NormalizedResult, RelayFailure> {
        debug!("Posting image to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "image": image_data_url }))
            .send()
            .await
            .map_err(|e| RelayFailure {
                kind: "network_error".to_string(),
                message: e.to_string(),
                status: None,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| RelayFailure {
            kind: "network_error".to_string(),
            message: e.to_string(),
            status: Some(status.as_u16()),
        })?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| RelayFailure {
                kind: "parse_error".to_string(),
                message: format!("Unexpected relay response: {}", e),
                status: Some(status.as_u16()),
            });
        }

        Err(match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => RelayFailure {
                message: failure_message(&body),
                kind: body.error,
                status: Some(status.as_u16()),
            },
            Err(_) => RelayFailure {
                kind: "server_error".to_string(),
                message: if text.is_empty() {
                    status.to_string()
                } else {
                    text
                },
                status: Some(status.as_u16()),
            },
        })
    }
}

// Prefer the provider's own message when the relay passed one through.
fn failure_message(body: &ErrorResponse) -> String {
    body.details
        .as_ref()
        .and_then(|details| details.pointer("/error/message"))
        .and_then(|message| message.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.message.clone())
}

/// Reads an image file into a data URL, picking the MIME type by extension.
pub async fn encode_image_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(format!(
        "data:{};base64,{}",
        mime_type_for(path),
        general_purpose::STANDARD.encode(&bytes)
    ))
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_mime_type_for_extension() {
        assert_eq!(mime_type_for(Path::new("meal.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("meal.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("meal.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("meal")), "image/jpeg");
    }

    #[tokio::test]
    async fn test_encode_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.png");
        tokio::fs::write(&path, b"abc").await.unwrap();

        let data_url = encode_image_file(&path).await.unwrap();
        assert_eq!(data_url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_failure_message_prefers_provider_message() {
        let mut body = ErrorResponse::new("upstream_error", "Upstream provider returned status 401");
        body.details = Some(json!({"error": {"message": "No auth credentials found"}}));
        assert_eq!(failure_message(&body), "No auth credentials found");

        body.details = Some(json!("plain text"));
        assert_eq!(failure_message(&body), "Upstream provider returned status 401");
    }
}
