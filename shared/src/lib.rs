//! Shared types for the maze-park settlement system
//!
//! Common types used across crates: data models, error types, and the
//! unified error-code scheme.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
