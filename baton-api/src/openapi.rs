//! OpenAPI documentation assembly.

use utoipa::OpenApi;

/// OpenAPI document for the BATON API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BATON API",
        description = "Reasoning audit log and agent tool surface for the BATON mission coordination framework"
    ),
    paths(
        crate::routes::conductor_log::create_log_entry,
        crate::routes::conductor_log::get_log_entry,
        crate::routes::conductor_log::update_outcome,
        crate::routes::conductor_log::get_work_order_history,
        crate::routes::conductor_log::get_stats,
        crate::routes::health::ping,
        crate::routes::health::liveness,
        crate::routes::health::readiness,
        crate::routes::mcp::handlers::list_tools,
        crate::routes::mcp::handlers::call_tool,
    ),
    components(schemas(
        baton_core::ReasoningEntry,
        baton_core::DelegationStats,
        baton_core::Outcome,
        crate::error::ApiError,
        crate::error::ErrorCode,
        crate::routes::conductor_log::CreateLogEntryRequest,
        crate::routes::conductor_log::UpdateOutcomeRequest,
        crate::routes::health::HealthResponse,
        crate::routes::health::HealthStatus,
        crate::routes::health::HealthDetails,
        crate::routes::health::ComponentHealth,
        crate::routes::mcp::types::Tool,
        crate::routes::mcp::types::ListToolsResponse,
        crate::routes::mcp::types::CallToolRequest,
        crate::routes::mcp::types::CallToolResponse,
        crate::routes::mcp::types::ContentBlock,
    )),
    tags(
        (name = "Conductor Log", description = "Audit trail of delegation decisions"),
        (name = "Health", description = "Service health checks"),
        (name = "MCP", description = "Model Context Protocol tool surface"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/api/v1/conductor-log"));
        assert!(json.contains("/mcp/tools/call"));
        assert!(json.contains("/health/ready"));
    }
}
