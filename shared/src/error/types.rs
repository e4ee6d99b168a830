//! Error types for engine operations

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the settlement engine, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidInput, msg)
    }

    /// Create a negative count error
    pub fn negative_count(field: impl Into<String>, value: i64) -> Self {
        let f = field.into();
        Self::with_message(
            ErrorCode::NegativeCount,
            format!("{} must be non-negative, got {}", f, value),
        )
        .with_detail("field", f)
        .with_detail("value", value)
    }

    /// Create a breakdown mismatch error
    pub fn breakdown_mismatch(field: impl Into<String>, total: i64, sum: i64) -> Self {
        let f = field.into();
        Self::with_message(
            ErrorCode::BreakdownMismatch,
            format!("{} breakdown sums to {} but total is {}", f, sum, total),
        )
        .with_detail("field", f)
        .with_detail("total", total)
        .with_detail("sum", sum)
    }

    /// Create an invalid rate error
    pub fn invalid_rate(rate: f64) -> Self {
        Self::with_message(
            ErrorCode::InvalidRate,
            format!("commission rate must be between 0 and 100, got {}", rate),
        )
        .with_detail("rate", rate)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a month not found error
    pub fn month_not_found(year: i32, month: u32) -> Self {
        Self::with_message(
            ErrorCode::MonthNotFound,
            format!("no monthly record for {}-{:02}", year, month),
        )
        .with_detail("year", year)
        .with_detail("month", month)
    }

    /// Create a date not found error
    pub fn date_not_found(date: impl Into<String>) -> Self {
        let d = date.into();
        Self::with_message(
            ErrorCode::DateNotFound,
            format!("no daily record for {}", d),
        )
        .with_detail("date", d)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut err = AppError::validation("payload validation failed");
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<Value> = field_errors
                .iter()
                .map(|e| Value::String(e.code.to_string()))
                .collect();
            err = err.with_detail(field.to_string(), Value::Array(messages));
        }
        err
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::MonthNotFound);
        assert_eq!(err.code, ErrorCode::MonthNotFound);
        assert_eq!(err.message, "Monthly record not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::InvalidInput, "bad counts");
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "bad counts");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::invalid_input("breakdown missing")
            .with_detail("field", "online_breakdown")
            .with_detail("date", "2024-07-01");

        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "online_breakdown");
        assert_eq!(details.get("date").unwrap(), "2024-07-01");
    }

    #[test]
    fn test_convenience_constructors() {
        let err = AppError::negative_count("online", -3);
        assert_eq!(err.code, ErrorCode::NegativeCount);
        assert_eq!(err.message, "online must be non-negative, got -3");

        let err = AppError::breakdown_mismatch("online", 10, 7);
        assert_eq!(err.code, ErrorCode::BreakdownMismatch);
        assert_eq!(err.message, "online breakdown sums to 7 but total is 10");

        let err = AppError::invalid_rate(120.0);
        assert_eq!(err.code, ErrorCode::InvalidRate);

        let err = AppError::month_not_found(2024, 7);
        assert_eq!(err.code, ErrorCode::MonthNotFound);
        assert_eq!(err.message, "no monthly record for 2024-07");

        let err = AppError::date_not_found("2024-07-32");
        assert_eq!(err.code, ErrorCode::DateNotFound);

        let err = AppError::already_exists("channel NAVER");
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(err.message, "channel NAVER already exists");
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::DateNotFound, "no daily record for 2024-07-09");
        assert_eq!(format!("{}", err), "no daily record for 2024-07-09");
    }

    #[test]
    fn test_app_error_serialize() {
        let err = AppError::invalid_rate(101.0);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":2001"));
        assert!(json.contains("101"));
    }
}
