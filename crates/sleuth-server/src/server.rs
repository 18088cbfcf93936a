//! Server initialization and routing
//!
//! Middleware stack (outermost first): tracing, CORS, timeout body, timeout,
//! body limit.

use crate::error::ServerError;
use crate::routes::{api_info, health, not_found, plagiarism};
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use sleuth_core::config::{ServerConfig, SleuthConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Browser access for the configured origins.
///
/// Credentials are allowed, so methods and headers are mirrored rather than
/// wildcarded. A `*` origin switches to a credential-less permissive policy.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// `TimeoutLayer` answers with an empty 408; give it the usual error body.
///
/// A comparison already handed to the blocking pool is not cancelled by the
/// timeout. It runs to completion and its result is dropped.
async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return ServerError::Timeout.into_response();
    }
    response
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let config = &state.server;
    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/check-plagiarism", post(plagiarism::check_plagiarism))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.timeout_secs),
        ))
        .layer(map_response(timeout_body))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn socket_addr(config: &ServerConfig) -> anyhow::Result<SocketAddr> {
    let addr = format!("{}:{}", config.host, config.port);
    addr.parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address {addr}: {e}"))
}

/// Start the HTTP server and block until Ctrl+C or SIGTERM.
pub async fn start_server(config: SleuthConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let addr = socket_addr(&state.server)?;

    tracing::info!(
        "Starting sleuth-server on {} (default language: {})",
        addr,
        state.default_language
    );
    tracing::info!(
        "Timeout: {}s, Max body: {} bytes, CORS origins: {:?}",
        state.server.timeout_secs,
        state.server.max_upload_bytes,
        state.server.allowed_origins
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        () = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_gets_json_body() {
        let response = timeout_body(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let passthrough = timeout_body(StatusCode::OK.into_response()).await;
        assert_eq!(passthrough.status(), StatusCode::OK);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(socket_addr(&config).unwrap().port(), 8000);
        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(socket_addr(&bad).is_err());
    }
}
