//! HTTP server for the scrape endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use hub6_client::Hub6Client;

use crate::collector::HubCollector;

const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Collector for the configured hub; probe collectors share its descriptors.
    collector: Arc<HubCollector>,
    /// Per-request timeout for probe collectors.
    timeout: Duration,
}

impl AppState {
    pub fn new(collector: HubCollector, timeout: Duration) -> Self {
        Self {
            collector: Arc::new(collector),
            timeout,
        }
    }
}

/// Query parameters of the probe endpoint.
#[derive(Debug, Deserialize)]
struct ProbeParams {
    target: Option<String>,
}

/// Create the HTTP router.
pub fn create_router(state: AppState, metrics_path: &str, probe_path: &str) -> Router {
    Router::new()
        .route(metrics_path, get(metrics_handler))
        .route(probe_path, get(probe_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn metrics_response(body: String) -> Response {
    (StatusCode::OK, [("content-type", CONTENT_TYPE)], body).into_response()
}

/// Handler scraping the configured hub.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    debug!(hub = %state.collector.address(), "Scrape requested");
    metrics_response(state.collector.scrape().await)
}

/// Handler scraping the hub named by `?target=`.
async fn probe_handler(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
) -> Response {
    let Some(target) = params.target.filter(|t| !t.trim().is_empty()) else {
        return (StatusCode::BAD_REQUEST, "missing target parameter\n").into_response();
    };

    debug!(hub = %target, "Probe requested");

    let client = match Hub6Client::new(target.trim(), state.timeout) {
        Ok(client) => client,
        Err(e) => {
            warn!(hub = %target, error = %e, "Failed to create hub client");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to create client: {}\n", e),
            )
                .into_response();
        }
    };

    let collector = HubCollector::new(client, state.collector.descriptors());
    metrics_response(collector.scrape().await)
}

/// Handler for the /health endpoint.
async fn health_handler() -> Response {
    (StatusCode::OK, "healthy\n").into_response()
}

/// HTTP server configuration.
pub struct HttpServer {
    state: AppState,
    listen_addr: SocketAddr,
    metrics_path: String,
    probe_path: String,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new(
        state: AppState,
        listen_addr: SocketAddr,
        metrics_path: String,
        probe_path: String,
    ) -> Self {
        Self {
            state,
            listen_addr,
            metrics_path,
            probe_path,
        }
    }

    /// Run the HTTP server until the shutdown signal is received.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let router = create_router(self.state, &self.metrics_path, &self.probe_path);

        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.listen_addr, e))?;

        info!(
            addr = %self.listen_addr,
            metrics_path = %self.metrics_path,
            probe_path = %self.probe_path,
            "HTTP server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                loop {
                    if shutdown.changed().await.is_err() {
                        break;
                    }
                    if *shutdown.borrow() {
                        break;
                    }
                }
                info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
