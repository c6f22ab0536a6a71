//! HTTP server for the AI real estate assistant
//!
//! Exposes the walkthrough session API and the chat/analysis boundary to
//! the hosted text-generation provider.

pub mod routes;
pub mod state;

pub use state::ServerAppState;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue,
    },
    routing::{get, post, put},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    version: String,
}

/// Build the application router (exposed separately for tests)
pub fn build_router(state: ServerAppState, cors_origins: Option<Vec<String>>) -> Router {
    // CORS must be the outermost layer so preflight OPTIONS requests are
    // answered before anything else runs
    let cors = match &cors_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods(Any)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        }
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]),
    };

    Router::new()
        .route("/api/chat", post(routes::chat_handler))
        .route("/api/analyze", post(routes::analyze_handler))
        .route("/api/walkthrough", post(routes::create_walkthrough_handler))
        .route(
            "/api/walkthrough/:session/rooms/:room/items/:item/status",
            put(routes::update_item_status_handler),
        )
        .route(
            "/api/walkthrough/:session/rooms/:room/complete",
            post(routes::complete_room_handler),
        )
        .route(
            "/api/walkthrough/:session/report",
            get(routes::report_handler),
        )
        .route(
            "/api/walkthrough/:session/agent",
            get(routes::get_selected_agent_handler).put(routes::set_selected_agent_handler),
        )
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server until shutdown is requested
pub async fn run_server(
    port: u16,
    bind: &str,
    state: ServerAppState,
    cors_origins: Option<Vec<String>>,
) -> Result<(), String> {
    let provider_status = if state.provider.has_credential() {
        "live (credential configured)"
    } else {
        "fallback only (no credential)"
    };

    let app = build_router(state.clone(), cors_origins.clone());

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let cors_display = match &cors_origins {
        Some(origins) if !origins.is_empty() => origins.join(", "),
        _ => "*".to_string(),
    };

    println!("Propertyscope server");
    println!("  URL:          http://{}:{}", bind, port);
    println!("  CORS origins: {}", cors_display);
    println!("  Provider:     {}", provider_status);
    println!("  Endpoints:");
    println!("    POST /api/chat                  - Streamed chat");
    println!("    POST /api/analyze               - Property analysis");
    println!("    POST /api/walkthrough           - Start a walkthrough");
    println!("    GET  /api/walkthrough/:id/report - Risk/cost report");
    println!("    GET  /health                    - Health check");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}", addr);

    // Shutdown signal polls the shared flag set by the signal handlers
    let shutdown_state = state.shutdown_state.clone();
    let shutdown_signal = async move {
        loop {
            if shutdown_state.is_shutdown_requested() {
                log::info!("Shutdown signal received, stopping server...");
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Version endpoint
async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
