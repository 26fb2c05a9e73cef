mod error;
pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    config::{Config, ServerConfig},
    llm::OpenAiClient,
};
use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, header},
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span};
use uuid::Uuid;

pub async fn run(config: Config) -> Result<()> {
    if config.llm.api_key().is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; completion routes will answer 500");
    }

    let llm = OpenAiClient::new(config.llm.clone());
    info!("Using completion model: {}", llm.model());

    let app = router(AppState::new(Arc::new(llm)), &config.server)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Builds the application router with CORS and request tracing applied.
pub fn router(state: AppState, server: &ServerConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(handlers::index))
        .route("/api/search", post(handlers::search))
        .route("/api/extract", post(handlers::extract))
        .route("/api/insight", post(handlers::insight))
        .route("/api/populate_form", post(handlers::populate_form))
        .route("/api/chat", post(handlers::chat))
        .layer(cors_layer(&server.allowed_origins)?)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .with_state(state))
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(format!("Invalid allowed origin: '{}'", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
