//! MCP handler functions

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use baton_core::{EntryId, Outcome, WorkOrderId};

use super::tools::{get_available_tools, McpState};
use super::types::*;
use crate::error::{ApiError, ApiResult};
use crate::routes::conductor_log::CreateLogEntryRequest;

pub async fn initialize(
    State(_state): State<Arc<McpState>>,
    Json(req): Json<InitializeRequest>,
) -> impl IntoResponse {
    tracing::info!(
        client_name = %req.client_info.name,
        client_version = %req.client_info.version,
        protocol_version = %req.protocol_version,
        "MCP session initialized"
    );

    let response = InitializeResponse {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: "BATON MCP Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    Json(response)
}

/// POST /mcp/tools/list - List available tools
#[utoipa::path(
    post,
    path = "/mcp/tools/list",
    tag = "MCP",
    responses(
        (status = 200, description = "List of available tools", body = ListToolsResponse),
    ),
)]
pub async fn list_tools(State(_state): State<Arc<McpState>>) -> impl IntoResponse {
    Json(ListToolsResponse {
        tools: get_available_tools(),
    })
}

/// POST /mcp/tools/call - Execute a tool
#[utoipa::path(
    post,
    path = "/mcp/tools/call",
    tag = "MCP",
    request_body = CallToolRequest,
    responses(
        (status = 200, description = "Tool execution result", body = CallToolResponse),
    ),
)]
pub async fn call_tool(
    State(state): State<Arc<McpState>>,
    Json(req): Json<CallToolRequest>,
) -> ApiResult<impl IntoResponse> {
    tracing::debug!(tool = %req.name, "MCP tool call");

    let result = execute_tool(&state, &req.name, req.arguments).await;

    // Tool failures come back as in-band error content, not HTTP errors,
    // so agent clients always get a well-formed tool response.
    match result {
        Ok(content) => Ok(Json(CallToolResponse {
            content,
            is_error: false,
        })),
        Err(e) => Ok(Json(CallToolResponse {
            content: vec![ContentBlock::Text {
                text: format!("Error: {}", e.message),
            }],
            is_error: true,
        })),
    }
}

// ============================================================================
// TOOL EXECUTION
// ============================================================================

async fn execute_tool(
    state: &McpState,
    name: &str,
    args: JsonValue,
) -> ApiResult<Vec<ContentBlock>> {
    match name {
        "log_conductor_reasoning" => log_conductor_reasoning(state, args).await,
        "update_delegation_outcome" => update_delegation_outcome(state, args).await,
        "get_work_order_reasoning" => get_work_order_reasoning(state, args).await,
        _ => Err(ApiError::tool_not_found(name)),
    }
}

async fn log_conductor_reasoning(
    state: &McpState,
    args: JsonValue,
) -> ApiResult<Vec<ContentBlock>> {
    let req: CreateLogEntryRequest = serde_json::from_value(args)?;
    let entry = state.store.create_entry(req.into_validated_entry()?).await?;

    tracing::info!(
        entry_id = %entry.entry_id,
        work_order_id = %entry.work_order_id,
        "Reasoning entry recorded via MCP"
    );

    Ok(vec![ContentBlock::Text {
        text: serde_json::to_string_pretty(&entry)?,
    }])
}

#[derive(Debug, serde::Deserialize)]
struct UpdateOutcomeArgs {
    entry_id: Uuid,
    outcome: String,
    notes: Option<String>,
}

async fn update_delegation_outcome(
    state: &McpState,
    args: JsonValue,
) -> ApiResult<Vec<ContentBlock>> {
    let args: UpdateOutcomeArgs = serde_json::from_value(args)?;

    let outcome: Outcome = args
        .outcome
        .parse()
        .map_err(|_| ApiError::invalid_input(format!("Unknown outcome: {}", args.outcome)))?;
    if !outcome.is_closed() {
        return Err(ApiError::invalid_input(
            "outcome must be one of: success, failure, partial",
        ));
    }

    let entry = state
        .store
        .update_outcome(EntryId::from(args.entry_id), outcome, args.notes)
        .await?;

    Ok(vec![ContentBlock::Text {
        text: serde_json::to_string_pretty(&entry)?,
    }])
}

#[derive(Debug, serde::Deserialize)]
struct GetWorkOrderArgs {
    work_order_id: String,
}

async fn get_work_order_reasoning(
    state: &McpState,
    args: JsonValue,
) -> ApiResult<Vec<ContentBlock>> {
    let args: GetWorkOrderArgs = serde_json::from_value(args)?;
    let entries = state
        .store
        .get_history(&WorkOrderId::new(args.work_order_id))
        .await?;

    Ok(vec![ContentBlock::Text {
        text: serde_json::to_string_pretty(&entries)?,
    }])
}
