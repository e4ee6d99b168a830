//! Category Model
//!
//! An offline ("on-site") sales grouping at the park gate. Same shape as
//! [`super::channel::Channel`] minus the commission rate: offline sales carry
//! no per-category commission.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Offline sales category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category code (e.g. "GROUP")
    pub code: String,
    /// Display name
    pub name: String,
    pub sort_order: i32,
    /// Categories referenced by historical records are deactivated, never deleted
    pub is_active: bool,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub sort_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
