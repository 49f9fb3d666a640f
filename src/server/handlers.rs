use super::types::{ErrorResponse, HealthResponse};
use crate::classify::{ClassificationError, Classifier, ClassifyRequest, NormalizedResult};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

type ErrorReply = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub body_limit_bytes: usize,
}

pub async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<NormalizedResult>, ErrorReply> {
    let Json(request) =
        payload.map_err(|rejection| rejection_reply(rejection, state.body_limit_bytes))?;

    info!("Received classify request");

    match state.classifier.classify(request).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err(error_reply(e)),
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        credential_configured: state.classifier.has_credential(),
    })
}

/// Oversized bodies are reported as such; any other unreadable body means the
/// image never arrived.
fn rejection_reply(rejection: JsonRejection, body_limit_bytes: usize) -> ErrorReply {
    warn!("Rejected classify body: {}", rejection.body_text());

    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return error_reply(ClassificationError::ImageTooLarge {
            limit_bytes: body_limit_bytes,
        });
    }

    let (_, body) = error_reply(ClassificationError::MissingInput(format!(
        "Request body must be JSON with an image field: {}",
        rejection.body_text()
    )));
    (rejection.status(), body)
}

pub fn error_reply(err: ClassificationError) -> ErrorReply {
    let status = err.status_code();
    let mut body = ErrorResponse::new(err.kind(), err.to_string());

    match err {
        ClassificationError::Upstream {
            status: upstream_status,
            body: details,
        } => {
            body.status = Some(upstream_status);
            body.details = Some(details);
        }
        ClassificationError::Parse { raw } => {
            body.raw = Some(raw);
        }
        ClassificationError::Internal(detail) => {
            error!("Classification failed internally: {}", detail);
            body.message = "Classification failed due to an internal error".to_string();
        }
        ClassificationError::MissingInput(_)
        | ClassificationError::ImageTooLarge { .. }
        | ClassificationError::MissingCredential => {}
    }

    (status, Json(body))
}
