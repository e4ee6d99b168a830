//! Unified error system for the settlement engine
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Input errors
//! - 2xxx: Rate and master-data errors
//! - 3xxx: Period errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::MonthNotFound);
//!
//! // Create an error with custom message
//! let err = AppError::with_message(ErrorCode::InvalidInput, "counts missing");
//!
//! // Create an error with details
//! let err = AppError::invalid_input("breakdown missing")
//!     .with_detail("field", "online_breakdown");
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
