//! REST API Routes Module
//!
//! Includes:
//! - Conductor reasoning log routes (audit trail of delegation decisions)
//! - Health check endpoints (Kubernetes-compatible)
//! - MCP (Model Context Protocol) server for agent tool calls
//! - CORS support for browser-based clients

pub mod conductor_log;
pub mod health;
pub mod mcp;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use baton_storage::ReasoningLogStore;

use crate::config::ApiConfig;

// Re-export route creation functions for convenience
pub use conductor_log::create_router as conductor_log_router;
pub use health::create_router as health_router;
pub use mcp::create_router as mcp_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// ROUTER ASSEMBLY
// ============================================================================

/// Build the complete API router.
///
/// # Middleware Order (outer to inner)
/// 1. CORS (outermost) - handles preflight requests
/// 2. Trace - request/response logging
pub fn create_api_router(store: Arc<dyn ReasoningLogStore>, api_config: &ApiConfig) -> Router {
    let cors = build_cors_layer(api_config);

    let router = Router::new()
        .nest(
            "/api/v1/conductor-log",
            conductor_log::create_router(store.clone()),
        )
        // MCP server (not under /api/v1 - uses its own protocol)
        .nest("/mcp", mcp::create_router(store.clone()))
        // Health checks
        .nest("/health", health::create_router(store));

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", axum::routing::get(openapi_json));

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let mut cors = if config.cors_origins.is_empty() {
        // Dev mode: allow all origins
        CorsLayer::new().allow_origin(Any)
    } else {
        let allowed = config.clone();
        CorsLayer::new().allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _: &axum::http::request::Parts| {
                origin
                    .to_str()
                    .map(|o| allowed.is_origin_allowed(o))
                    .unwrap_or(false)
            },
        ))
    };

    cors = cors
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    // Credentials cannot be combined with a wildcard origin.
    if config.cors_allow_credentials && !config.cors_origins.is_empty() {
        cors = cors.allow_credentials(true);
    }

    cors
}
