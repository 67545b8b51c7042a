//! BATON API - REST and MCP layer for the mission coordination framework
//!
//! Exposes the conductor reasoning log over two surfaces that share one
//! storage handle and one validation path:
//! - REST routes under `/api/v1/conductor-log`
//! - An MCP tool server under `/mcp` for agent clients

pub mod config;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod validation;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
