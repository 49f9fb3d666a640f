use axum::http::StatusCode;
use thiserror::Error;

/// Every way a classification can fail, as reported to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationError {
    #[error("{0}")]
    MissingInput(String),

    #[error("Image is too large: the request body exceeds the {limit_bytes} byte limit")]
    ImageTooLarge { limit_bytes: usize },

    #[error("Upstream API key is not configured (set OPENROUTER_API_KEY)")]
    MissingCredential,

    #[error("Upstream provider returned status {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Could not parse JSON from the model reply")]
    Parse { raw: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClassificationError {
    pub fn missing_image() -> Self {
        Self::MissingInput("image is required".to_string())
    }

    /// Machine-readable kind carried in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "missing_input",
            Self::ImageTooLarge { .. } => "image_too_large",
            Self::MissingCredential => "missing_credential",
            Self::Upstream { .. } => "upstream_error",
            Self::Parse { .. } => "parse_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Provider error statuses pass through; anything else upstream maps to 502.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput(_) => StatusCode::BAD_REQUEST,
            Self::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MissingCredential | Self::Parse { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }
}

impl From<crate::Error> for ClassificationError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::UpstreamStatus { status, body } => Self::Upstream { status, body },
            other if other.is_timeout() => {
                Self::Internal(format!("Upstream request timed out: {}", other))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}
