pub mod handlers;
pub mod types;

use crate::{Result, classify::Classifier, config::Config};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub fn router(classifier: Arc<Classifier>, body_limit_bytes: usize) -> Router {
    let app_state = handlers::AppState {
        classifier,
        body_limit_bytes,
    };

    Router::new()
        .route("/classify", post(handlers::classify))
        .route("/api/classify", post(handlers::classify))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    if config.upstream.has_credential() {
        info!(
            "Using upstream key (len={}) for model {}",
            config.upstream.api_key.len(),
            config.upstream.model
        );
    } else {
        warn!("Upstream API key is missing; classify requests will fail with missing_credential");
    }

    let classifier = Arc::new(Classifier::from_config(&config.upstream)?);
    let app = router(classifier, config.server.body_limit_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
