//! Router assembly and server lifecycle

use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use shared::{Component, component_info, logging};

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::web::handlers;

/// The HTTP API over a shared [`AppState`]
#[derive(Clone)]
pub struct WebServer {
    state: AppState,
}

impl WebServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            // Size is enforced while streaming, against the configured ceiling
            .route("/upload-pdf", post(handlers::upload_pdf).layer(DefaultBodyLimit::disable()))
            .route("/generate-summary", post(handlers::generate_summary))
            .route("/generate-flashcards", post(handlers::generate_flashcards))
            .route("/generate-quiz", post(handlers::generate_quiz))
            .route("/discover-research", post(handlers::discover_research))
            .route("/discover-videos", post(handlers::discover_videos))
            .route("/discover-resources", post(handlers::discover_resources))
            .route("/ask-question", post(handlers::ask_question))
            .route("/clear-session", delete(handlers::clear_session))
            .route("/session-info", get(handlers::session_info))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.state.clone())
    }

    /// Serve until Ctrl+C, then cancel in-flight work
    pub async fn run(&self, address: SocketAddr) -> WebServerResult<()> {
        let router = self.build_router();
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {address}: {e}")))?;

        component_info!(Component::Api, address = %address, "🌐 Listening on http://{}", address);

        let state = self.state.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    logging::log_error(Component::Api, "Signal handling", &err);
                }
                logging::log_shutdown(Component::Api, "Received Ctrl+C signal");
                state.set_ready(false);
                state.orchestrator.cancel_all();
            })
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))?;

        logging::log_success(Component::Api, "Server stopped gracefully");
        Ok(())
    }
}
