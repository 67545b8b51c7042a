//! Error types for the BATON API layer.
//!
//! ApiError is the single error surface of the API: every handler returns
//! it, and it serializes as JSON with a stable error code and the matching
//! HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use baton_core::{StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each code maps to one HTTP status and names a category a client can
/// branch on without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    /// Field value is out of valid range
    InvalidRange,

    /// Field format is incorrect
    InvalidFormat,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested reasoning entry does not exist
    EntryNotFound,

    /// Requested tool does not exist
    ToolNotFound,

    // ========================================================================
    // Conflict Errors (409)
    // ========================================================================
    /// Entry outcome is already closed with a different value
    OutcomeConflict,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Storage operation failed
    StorageFailure,

    /// Service is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::MissingField
            | ErrorCode::InvalidRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

            ErrorCode::EntryNotFound | ErrorCode::ToolNotFound => StatusCode::NOT_FOUND,

            ErrorCode::OutcomeConflict => StatusCode::CONFLICT,

            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            ErrorCode::InternalError | ErrorCode::StorageFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::InvalidRange => "Value is out of valid range",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::EntryNotFound => "Reasoning entry not found",
            ErrorCode::ToolNotFound => "Tool not found",
            ErrorCode::OutcomeConflict => "Entry outcome is already recorded",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageFailure => "Storage operation failed",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
///
/// Returned by every endpoint when an error occurs, in the same format for
/// REST and MCP callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (field errors, conflicting values, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a MissingField error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    /// Create an InvalidRange error.
    pub fn invalid_range(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidRange,
            format!("Field '{}' must be between {} and {}", field, min, max),
        )
    }

    /// Create an EntryNotFound error.
    pub fn entry_not_found(id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EntryNotFound,
            format!("Reasoning entry {} not found", id),
        )
    }

    /// Create a ToolNotFound error.
    pub fn tool_not_found(name: &str) -> Self {
        Self::new(ErrorCode::ToolNotFound, format!("Tool '{}' not found", name))
    }

    /// Create an OutcomeConflict error.
    pub fn outcome_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::OutcomeConflict, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a StorageFailure error.
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageFailure, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in
/// Axum handlers:
/// ```ignore
/// async fn handler() -> Result<Json<Response>, ApiError> {
///     Err(ApiError::missing_field("reasoning"))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN ERRORS
// ============================================================================

/// Convert from core validation errors to ApiError.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::RequiredFieldMissing { field } => ApiError::missing_field(&field),
            ValidationError::InvalidValue { field, reason } => {
                ApiError::invalid_input(format!("Invalid value for '{}': {}", field, reason))
            }
            ValidationError::OutOfRange {
                field, min, max, ..
            } => ApiError::invalid_range(&field, min, max),
        }
    }
}

/// Convert from storage errors to ApiError.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::EntryNotFound { id } => ApiError::entry_not_found(id),
            StorageError::OutcomeConflict {
                id,
                existing,
                requested,
            } => ApiError::outcome_conflict(format!(
                "Entry {} outcome already closed as '{}', cannot set '{}'",
                id, existing, requested
            ))
            .with_details(serde_json::json!({
                "existing": existing,
                "requested": requested,
            })),
            StorageError::Validation(v) => v.into(),
            StorageError::Backend { reason } => {
                tracing::error!(reason = %reason, "Storage backend error");
                // Generic message to avoid leaking internal details
                ApiError::storage_failure("Storage operation failed")
            }
        }
    }
}

/// Convert from serde_json::Error to ApiError.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use baton_core::{EntryId, Outcome};
    use uuid::Uuid;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::ValidationFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::EntryNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::OutcomeConflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::InternalError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::ServiceUnavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_api_error_constructors() {
        let err = ApiError::missing_field("reasoning");
        assert_eq!(err.code, ErrorCode::MissingField);
        assert!(err.message.contains("reasoning"));

        let err = ApiError::entry_not_found("123");
        assert_eq!(err.code, ErrorCode::EntryNotFound);
        assert!(err.message.contains("123"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let id = EntryId::new(Uuid::nil());
        let err: ApiError = StorageError::OutcomeConflict {
            id,
            existing: Outcome::Success,
            requested: Outcome::Failure,
        }
        .into();

        assert_eq!(err.code, ErrorCode::OutcomeConflict);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.details.is_some());

        let err: ApiError = StorageError::EntryNotFound { id }.into();
        assert_eq!(err.code, ErrorCode::EntryNotFound);
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ApiError = ValidationError::OutOfRange {
            field: "confidence_score".to_string(),
            value: 1.4,
            min: 0.0,
            max: 1.0,
        }
        .into();

        assert_eq!(err.code, ErrorCode::InvalidRange);
        assert!(err.message.contains("confidence_score"));
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::outcome_conflict("already closed");
        let json = serde_json::to_string(&err)?;

        assert!(json.contains("OUTCOME_CONFLICT"));
        assert!(json.contains("already closed"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }
}
