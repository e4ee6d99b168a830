//! Channel Model
//!
//! An online sales channel (external marketplace) that the ticket platform
//! sells through. Each channel carries a commission rate deducted from every
//! monetary flow attributable to its visitors.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Online sales channel entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel code (e.g. "NAVER")
    pub code: String,
    /// Display name
    pub name: String,
    /// Commission percentage in [0, 100]
    pub fee_rate: f64,
    pub sort_order: i32,
    /// Channels referenced by historical records are deactivated, never deleted
    pub is_active: bool,
}

/// Create channel payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChannelCreate {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub fee_rate: f64,
    pub sort_order: Option<i32>,
}

/// Update channel payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChannelUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub fee_rate: Option<f64>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
