//! Model Context Protocol (MCP) routes
//!
//! Implements the MCP specification for tool-based agent interaction with
//! the reasoning audit log.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use baton_storage::ReasoningLogStore;

// Sub-modules
pub mod handlers;
pub mod tools;
pub mod types;

// Re-export key types
pub use handlers::*;
pub use tools::*;
pub use types::*;

/// Create the MCP router with all endpoints.
pub fn create_router(store: Arc<dyn ReasoningLogStore>) -> Router {
    let state = Arc::new(McpState::new(store));

    Router::new()
        // Server information
        .route("/info", get(|| async { "BATON MCP Server" }))
        // Core protocol endpoints
        .route("/initialize", post(initialize))
        .route("/tools/list", get(list_tools).post(list_tools))
        .route("/tools/call", post(call_tool))
        .with_state(state)
}
