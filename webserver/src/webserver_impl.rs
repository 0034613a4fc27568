//! Main webserver implementation

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use shared::{ProcessId, logging, process_info};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::traits::CopyService;
use crate::web::handlers::{generate_handler, health_check};

/// Request bodies above this size are rejected
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Main webserver struct with dependency injection
pub struct WebServer<C: CopyService> {
    state: Arc<WebServerState>,
    copy_service: Arc<C>,
    shutdown: CancellationToken,
}

impl<C: CopyService> Clone for WebServer<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            copy_service: Arc::clone(&self.copy_service),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<C> WebServer<C>
where
    C: CopyService + 'static,
{
    pub fn new(state: WebServerState, copy_service: C) -> Self {
        Self {
            state: Arc::new(state),
            copy_service: Arc::new(copy_service),
            shutdown: CancellationToken::new(),
        }
    }

    /// Stop serving when `token` is cancelled instead of on Ctrl+C
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/api/generate", post(generate_handler::<C>))
            .route("/health", get(health_check::<C>))
            .layer(
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive())
                    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until the shutdown token is cancelled or Ctrl+C arrives
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();
        let bind_address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {}: {}", bind_address, e)))?;

        process_info!(ProcessId::current(), "🌐 Web server listening on http://{}", bind_address);

        let shutdown = self.shutdown.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.cancelled() => {},
                    result = tokio::signal::ctrl_c() => match result {
                        Ok(()) => {
                            logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal");
                            shutdown.cancel();
                        }
                        Err(e) => {
                            logging::log_error(ProcessId::current(), "Signal handling", &e);
                            shutdown.cancelled().await;
                        }
                    },
                }
            })
            .await?;

        Ok(())
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn copy_service(&self) -> &Arc<C> {
        &self.copy_service
    }
}
