pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{files::FilesController, health, podcast::PodcastController};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::TtsRepository;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    tts_repo: Arc<dyn TtsRepository>,
    files_controller: Arc<FilesController>,
    podcast_controller: Arc<PodcastController>,
) -> Router {
    // Storage RPC
    let files_routes = Router::new()
        .route(
            "/api/files/generate-upload-url",
            post(FilesController::generate_upload_url),
        )
        .with_state(files_controller);

    // Podcast generation
    let podcast_routes = Router::new()
        .route("/api/podcasts/generate", post(PodcastController::generate))
        .with_state(podcast_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(tts_repo)
        .merge(files_routes)
        .merge(podcast_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server on the configured address
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
