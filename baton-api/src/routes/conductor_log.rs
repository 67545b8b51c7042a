//! Conductor Reasoning Log REST API Routes
//!
//! Axum route handlers for the reasoning audit log: recording delegation
//! decisions, closing their outcomes, and reading history and statistics.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use baton_core::{EntryId, MissionId, NewEntry, Outcome, WorkOrderId};
use baton_storage::{ReasoningLogStore, StatsFilter};

use crate::{
    error::{ApiError, ApiResult},
    validation::{ValidateNonEmpty, ValidateUnitInterval},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for conductor-log routes.
#[derive(Clone)]
pub struct LogState {
    pub store: Arc<dyn ReasoningLogStore>,
}

impl LogState {
    pub fn new(store: Arc<dyn ReasoningLogStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

/// Request to record a delegation decision.
#[derive(Debug, Clone, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateLogEntryRequest {
    /// Work order this delegation belongs to
    pub work_order_id: String,
    /// Mission the work order is part of
    pub mission_id: String,
    /// Identifier of the delegating actor
    pub conductor_agent: String,
    /// Identifier/type of the agent delegated to
    pub delegation_target: String,
    /// Free-text rationale for the delegation
    pub reasoning: String,
    /// Snapshot of the context handed to the sub-agent
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub context_injected: Option<serde_json::Value>,
    /// Expected-success estimate in [0, 1]
    pub confidence_score: f64,
}

impl CreateLogEntryRequest {
    fn validate(&self) -> ApiResult<()> {
        self.work_order_id.validate_non_empty("work_order_id")?;
        self.mission_id.validate_non_empty("mission_id")?;
        self.conductor_agent.validate_non_empty("conductor_agent")?;
        self.delegation_target.validate_non_empty("delegation_target")?;
        self.reasoning.validate_non_empty("reasoning")?;
        self.confidence_score
            .validate_unit_interval("confidence_score")?;
        Ok(())
    }

    /// Validate and convert into a storage-layer creation input.
    pub fn into_validated_entry(self) -> ApiResult<NewEntry> {
        self.validate()?;
        Ok(self.into_new_entry())
    }

    fn into_new_entry(self) -> NewEntry {
        NewEntry {
            work_order_id: WorkOrderId::new(self.work_order_id),
            mission_id: MissionId::new(self.mission_id),
            conductor_agent: self.conductor_agent,
            delegation_target: self.delegation_target,
            reasoning: self.reasoning,
            context_injected: self.context_injected,
            confidence_score: self.confidence_score,
        }
    }
}

/// Request to record the eventual outcome of a delegation.
#[derive(Debug, Clone, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateOutcomeRequest {
    /// Eventual outcome; must be a closed value (success, failure, partial)
    pub outcome: Outcome,
    /// Optional notes about how the delegation went
    pub notes: Option<String>,
}

/// Query parameters for delegation statistics.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct StatsQuery {
    pub conductor_agent: Option<String>,
    pub delegation_target: Option<String>,
}

impl StatsQuery {
    fn into_filter(self) -> StatsFilter {
        StatsFilter {
            conductor_agent: self.conductor_agent,
            delegation_target: self.delegation_target,
        }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/conductor-log - Record a delegation decision
#[utoipa::path(
    post,
    path = "/api/v1/conductor-log",
    tag = "Conductor Log",
    request_body = CreateLogEntryRequest,
    responses(
        (status = 201, description = "Reasoning entry recorded", body = baton_core::ReasoningEntry),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn create_log_entry(
    State(state): State<Arc<LogState>>,
    Json(req): Json<CreateLogEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    let entry = state.store.create_entry(req.into_validated_entry()?).await?;

    tracing::info!(
        entry_id = %entry.entry_id,
        work_order_id = %entry.work_order_id,
        delegation_target = %entry.delegation_target,
        "Reasoning entry recorded"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/conductor-log/{id} - Get a reasoning entry by ID
#[utoipa::path(
    get,
    path = "/api/v1/conductor-log/{id}",
    tag = "Conductor Log",
    params(
        ("id" = Uuid, Path, description = "Reasoning entry ID")
    ),
    responses(
        (status = 200, description = "Reasoning entry", body = baton_core::ReasoningEntry),
        (status = 404, description = "Entry not found", body = ApiError),
    ),
)]
pub async fn get_log_entry(
    State(state): State<Arc<LogState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let id = EntryId::from(id);
    let entry = state
        .store
        .get_entry(id)
        .await?
        .ok_or_else(|| ApiError::entry_not_found(id))?;

    Ok(Json(entry))
}

/// PATCH /api/v1/conductor-log/{id}/outcome - Record the delegation outcome
#[utoipa::path(
    patch,
    path = "/api/v1/conductor-log/{id}/outcome",
    tag = "Conductor Log",
    params(
        ("id" = Uuid, Path, description = "Reasoning entry ID")
    ),
    request_body = UpdateOutcomeRequest,
    responses(
        (status = 200, description = "Outcome recorded", body = baton_core::ReasoningEntry),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Entry not found", body = ApiError),
        (status = 409, description = "Outcome already closed with a different value", body = ApiError),
    ),
)]
pub async fn update_outcome(
    State(state): State<Arc<LogState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOutcomeRequest>,
) -> ApiResult<impl IntoResponse> {
    if !req.outcome.is_closed() {
        return Err(ApiError::invalid_input(
            "outcome must be one of: success, failure, partial",
        ));
    }

    let entry = state
        .store
        .update_outcome(EntryId::from(id), req.outcome, req.notes)
        .await?;

    tracing::info!(
        entry_id = %entry.entry_id,
        outcome = %entry.outcome,
        "Delegation outcome recorded"
    );

    Ok(Json(entry))
}

/// GET /api/v1/conductor-log/work-order/{work_order_id} - Audit trail for one work order
#[utoipa::path(
    get,
    path = "/api/v1/conductor-log/work-order/{work_order_id}",
    tag = "Conductor Log",
    params(
        ("work_order_id" = String, Path, description = "Work order ID")
    ),
    responses(
        (status = 200, description = "Entries ascending by creation time", body = Vec<baton_core::ReasoningEntry>),
    ),
)]
pub async fn get_work_order_history(
    State(state): State<Arc<LogState>>,
    Path(work_order_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let entries = state
        .store
        .get_history(&WorkOrderId::new(work_order_id))
        .await?;

    Ok(Json(entries))
}

/// GET /api/v1/conductor-log/stats - Aggregate delegation statistics
#[utoipa::path(
    get,
    path = "/api/v1/conductor-log/stats",
    tag = "Conductor Log",
    params(
        ("conductor_agent" = Option<String>, Query, description = "Filter by conductor agent"),
        ("delegation_target" = Option<String>, Query, description = "Filter by delegation target"),
    ),
    responses(
        (status = 200, description = "Statistics per (conductor, target) pair", body = Vec<baton_core::DelegationStats>),
    ),
)]
pub async fn get_stats(
    State(state): State<Arc<LogState>>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<impl IntoResponse> {
    let stats = state.store.get_stats(&query.into_filter()).await?;
    Ok(Json(stats))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the conductor-log routes router.
pub fn create_router(store: Arc<dyn ReasoningLogStore>) -> axum::Router {
    let state = Arc::new(LogState::new(store));

    axum::Router::new()
        .route("/", axum::routing::post(create_log_entry))
        .route("/stats", axum::routing::get(get_stats))
        .route(
            "/work-order/:work_order_id",
            axum::routing::get(get_work_order_history),
        )
        .route("/:id", axum::routing::get(get_log_entry))
        .route("/:id/outcome", axum::routing::patch(update_outcome))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateLogEntryRequest {
        CreateLogEntryRequest {
            work_order_id: "wo-1".to_string(),
            mission_id: "m-1".to_string(),
            conductor_agent: "conductor".to_string(),
            delegation_target: "rust-specialist".to_string(),
            reasoning: "The task needs systems expertise".to_string(),
            context_injected: None,
            confidence_score: 0.8,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(valid_request().validate().is_ok());

        let mut req = valid_request();
        req.reasoning = "  ".to_string();
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.confidence_score = 1.5;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_into_new_entry() {
        let entry = valid_request().into_new_entry();
        assert_eq!(entry.work_order_id, WorkOrderId::new("wo-1"));
        assert_eq!(entry.mission_id, MissionId::new("m-1"));
        assert_eq!(entry.context_injected, None);
    }

    #[test]
    fn test_update_outcome_request_deserialization() {
        let req: UpdateOutcomeRequest =
            serde_json::from_str(r#"{"outcome": "success", "notes": "done"}"#).unwrap();
        assert_eq!(req.outcome, Outcome::Success);
        assert_eq!(req.notes.as_deref(), Some("done"));

        let req: UpdateOutcomeRequest = serde_json::from_str(r#"{"outcome": "pending"}"#).unwrap();
        assert!(!req.outcome.is_closed());
    }

    #[test]
    fn test_stats_query_into_filter() {
        let query = StatsQuery {
            conductor_agent: Some("conductor".to_string()),
            delegation_target: None,
        };
        let filter = query.into_filter();
        assert_eq!(filter.conductor_agent.as_deref(), Some("conductor"));
        assert!(filter.delegation_target.is_none());
    }
}
