//! MCP tool definitions

use std::sync::Arc;

use baton_storage::ReasoningLogStore;

use super::types::Tool;

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for MCP routes.
#[derive(Clone)]
pub struct McpState {
    pub store: Arc<dyn ReasoningLogStore>,
}

impl McpState {
    pub fn new(store: Arc<dyn ReasoningLogStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// TOOL DEFINITIONS
// ============================================================================

pub fn get_available_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "log_conductor_reasoning".to_string(),
            description: "Record why a work order was delegated to a specific agent"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "work_order_id": {
                        "type": "string",
                        "description": "Work order this delegation belongs to"
                    },
                    "mission_id": {
                        "type": "string",
                        "description": "Mission the work order is part of"
                    },
                    "conductor_agent": {
                        "type": "string",
                        "description": "Identifier of the delegating actor"
                    },
                    "delegation_target": {
                        "type": "string",
                        "description": "Identifier or type of the agent delegated to"
                    },
                    "reasoning": {
                        "type": "string",
                        "description": "Free-text rationale for the delegation"
                    },
                    "context_injected": {
                        "type": "object",
                        "description": "Optional snapshot of the context handed to the sub-agent"
                    },
                    "confidence_score": {
                        "type": "number",
                        "minimum": 0,
                        "maximum": 1,
                        "description": "Expected-success estimate in [0, 1]"
                    }
                },
                "required": ["work_order_id", "mission_id", "conductor_agent", "delegation_target", "reasoning", "confidence_score"]
            }),
        },
        Tool {
            name: "update_delegation_outcome".to_string(),
            description: "Record the eventual outcome of a delegation, exactly once".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "entry_id": {
                        "type": "string",
                        "format": "uuid",
                        "description": "Reasoning entry ID returned when the delegation was logged"
                    },
                    "outcome": {
                        "type": "string",
                        "enum": ["success", "failure", "partial"],
                        "description": "Eventual outcome of the delegation"
                    },
                    "notes": {
                        "type": "string",
                        "description": "Optional notes about how the delegation went"
                    }
                },
                "required": ["entry_id", "outcome"]
            }),
        },
        Tool {
            name: "get_work_order_reasoning".to_string(),
            description: "Get the full delegation audit trail for a work order".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "work_order_id": {
                        "type": "string",
                        "description": "Work order ID"
                    }
                },
                "required": ["work_order_id"]
            }),
        },
    ]
}
