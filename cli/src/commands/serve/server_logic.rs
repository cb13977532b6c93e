//! # Echo Backend HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! This module implements the HTTP server behind `echo-bridge serve`:
//! - Routing of `/api/echo` and `/api/health`
//! - Port availability checking with automatic fallback
//! - CORS configuration
//! - Graceful shutdown handling
//!
//! ## Architecture
//!
//! The server implementation uses Axum and follows these steps:
//! 1. Find an available port if the requested one is in use
//! 2. Set up the Axum router with appropriate middleware
//! 3. Start the server with graceful shutdown handlers
//! 4. Display connection information
//!
use super::handlers;
use crate::core::config::ServerSettings;
use crate::core::error::{EchoBridgeError, Result};
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Binds the echo backend according to `settings` and serves until Ctrl+C or
/// SIGTERM.
///
/// ## Errors
///
/// - No available port within `MAX_PORT_ATTEMPTS` consecutive ports.
/// - Binding the `TcpListener` fails.
/// - The Axum server encounters a fatal error.
pub async fn run_server(settings: ServerSettings) -> Result<()> {
    let addr = find_available_port(settings.host, settings.port, MAX_PORT_ATTEMPTS).await?;
    let app = create_app(settings.enable_cors);

    println!("\n=================================================================");
    println!("📡 Echo Bridge backend");
    println!("🌐 Local URL:         http://{}", addr);
    println!("✉️  Echo endpoint:     POST http://{}/api/echo", addr);
    println!("💓 Health endpoint:   GET  http://{}/api/health", addr);
    println!("🔒 CORS enabled:      {}", settings.enable_cors);
    println!("=================================================================\n");

    info!("Starting echo backend on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C (or SIGTERM on Unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and then the following ports, up to `max_attempts`
/// binds in total, returning the first address that could be bound.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    Err(EchoBridgeError::Server(format!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host, start_port, max_attempts
    ))
    .into())
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router for the two API routes with tracing, CORS and
/// panic-catching middleware.
pub fn create_app(enable_cors: bool) -> Router {
    let cors_layer = if enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/api/echo", post(handlers::echo))
        .route("/api/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer)
                .layer(CatchPanicLayer::custom(handlers::handle_panic)),
        )
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::bridge::{ApiError, EchoClient, EchoResponse};
    use crate::core::config::ClientConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::net::Ipv4Addr;
    use std::time::Duration;
    use tower::ServiceExt;

    fn post_echo(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/echo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_find_available_port_start_is_free() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 50000;

        let addr = find_available_port(host, start_port, 5).await?;

        assert_eq!(addr.port(), start_port);
        assert_eq!(addr.ip(), host);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_port_start_occupied() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 51000;

        let _listener = TcpListener::bind(SocketAddr::new(host, start_port)).await?;

        let addr = find_available_port(host, start_port, 5).await?;

        assert!(addr.port() > start_port);
        assert!(addr.port() < start_port + 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_echo_route_success() {
        let response = create_app(true)
            .oneshot(post_echo(r#"{"message":"Hello, World!"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: EchoResponse = read_json(response).await;
        assert_eq!(body.echo, "Echo: Hello, World!");
        assert!(!body.timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_echo_route_validation_failures() {
        let too_long = format!(r#"{{"message":"{}"}}"#, "a".repeat(1001));
        for body in [r#"{"message":""}"#, r#"{"message":null}"#, r#"{}"#, too_long.as_str()] {
            let response = create_app(true).oneshot(post_echo(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let error: ApiError = read_json(response).await;
            assert_eq!(error.error, "Validation failed");
            assert_eq!(error.status, 400);
        }
    }

    #[tokio::test]
    async fn test_echo_route_counts_surrounding_whitespace() {
        let trailing = format!(r#"{{"message":"{} "}}"#, "a".repeat(1000));
        let padded = format!(r#"{{"message":"   {}   "}}"#, "a".repeat(999));
        for body in [trailing.as_str(), padded.as_str()] {
            let response = create_app(true).oneshot(post_echo(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let error: ApiError = read_json(response).await;
            assert_eq!(error.error, "Validation failed");
            assert_eq!(error.message, "{message=Message cannot exceed 1000 characters}");
        }
    }

    #[tokio::test]
    async fn test_echo_route_keeps_padding_within_limit() {
        let response = create_app(true)
            .oneshot(post_echo(r#"{"message":"  hi  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: EchoResponse = read_json(response).await;
        assert_eq!(body.echo, "Echo:   hi  ");
    }

    #[tokio::test]
    async fn test_echo_route_malformed_json() {
        let response = create_app(true)
            .oneshot(post_echo("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.error, "Malformed request");
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = create_app(false)
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Echo Bridge Backend is running!");
    }

    #[tokio::test]
    async fn test_cors_header_when_enabled() {
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = create_app(true).oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    /// Full round trip: the transport client against a live backend.
    #[tokio::test]
    async fn test_client_round_trip_against_backend() -> Result<()> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            axum::serve(listener, create_app(true).into_make_service()).await
        });

        let client = EchoClient::new(&ClientConfig {
            api_url: format!("http://{}", addr),
            timeout: Duration::from_secs(5),
        })?;

        let response = client.echo("round trip").await?;
        assert_eq!(response.echo, "Echo: round trip");

        let err = client.echo("   ").await.unwrap_err();
        assert_eq!(err.status, 400);
        assert_eq!(err.error, "Validation failed");
        assert_eq!(err.message, "{message=Message cannot be empty}");

        assert_eq!(client.check_health().await?, "Echo Bridge Backend is running!");

        server.abort();
        Ok(())
    }
}
