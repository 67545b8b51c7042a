//! Validation Traits
//!
//! Common validation patterns extracted from route handlers.

use crate::error::{ApiError, ApiResult};

/// Trait for validating non-empty strings.
///
/// # Example
/// ```ignore
/// use baton_api::validation::ValidateNonEmpty;
///
/// fn log_reasoning(reasoning: &str) -> ApiResult<()> {
///     reasoning.validate_non_empty("reasoning")?;
///     // ... rest of logic
/// }
/// ```
pub trait ValidateNonEmpty {
    /// Validate that the value is non-empty.
    ///
    /// # Errors
    /// Returns `ApiError::missing_field` if the value is empty or
    /// whitespace-only.
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        if self.trim().is_empty() {
            return Err(ApiError::missing_field(field_name));
        }
        Ok(())
    }
}

impl ValidateNonEmpty for &str {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        (*self).validate_non_empty(field_name)
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        self.as_str().validate_non_empty(field_name)
    }
}

impl<T: ValidateNonEmpty> ValidateNonEmpty for Option<T> {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        match self {
            Some(value) => value.validate_non_empty(field_name),
            None => Err(ApiError::missing_field(field_name)),
        }
    }
}

/// Trait for validating values on the closed unit interval.
pub trait ValidateUnitInterval {
    /// Validate that the value is a finite number in [0, 1].
    fn validate_unit_interval(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateUnitInterval for f64 {
    fn validate_unit_interval(&self, field_name: &str) -> ApiResult<()> {
        if !self.is_finite() || *self < 0.0 || *self > 1.0 {
            return Err(ApiError::invalid_range(field_name, 0.0, 1.0));
        }
        Ok(())
    }
}
