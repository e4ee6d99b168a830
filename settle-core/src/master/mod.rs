//! Master Data Service
//!
//! In-memory channel/category registry. The engine consumes it read-only
//! (rate and name lookups); configuration surfaces drive it through the
//! Create/Update payloads. Channels and categories referenced by historical
//! records are soft-deactivated, never removed.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Channel, ChannelCreate, ChannelUpdate,
};
use std::collections::BTreeMap;
use validator::Validate;

/// Channel and category registry
#[derive(Debug, Clone, Default)]
pub struct MasterData {
    channels: BTreeMap<String, Channel>,
    categories: BTreeMap<String, Category>,
}

impl MasterData {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Lookups ====================

    pub fn channel(&self, code: &str) -> Option<&Channel> {
        self.channels.get(code)
    }

    pub fn category(&self, code: &str) -> Option<&Category> {
        self.categories.get(code)
    }

    /// Active channels in display order (sort_order, then code)
    pub fn active_channels(&self) -> Vec<&Channel> {
        let mut channels: Vec<&Channel> =
            self.channels.values().filter(|c| c.is_active).collect();
        channels.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.code.cmp(&b.code)));
        channels
    }

    /// Active categories in display order (sort_order, then code)
    pub fn active_categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> =
            self.categories.values().filter(|c| c.is_active).collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.code.cmp(&b.code)));
        categories
    }

    // ==================== Channels ====================

    pub fn create_channel(&mut self, payload: ChannelCreate) -> AppResult<&Channel> {
        if !(0.0..=100.0).contains(&payload.fee_rate) || !payload.fee_rate.is_finite() {
            return Err(AppError::invalid_rate(payload.fee_rate));
        }
        payload.validate()?;
        if self.channels.contains_key(&payload.code) {
            return Err(AppError::already_exists(format!(
                "channel {}",
                payload.code
            )));
        }

        let sort_order = payload
            .sort_order
            .unwrap_or_else(|| self.channels.len() as i32);
        let channel = Channel {
            code: payload.code.clone(),
            name: payload.name,
            fee_rate: payload.fee_rate,
            sort_order,
            is_active: true,
        };
        tracing::info!(channel = %channel.code, fee_rate = channel.fee_rate, "Channel created");
        Ok(self.channels.entry(payload.code).or_insert(channel))
    }

    pub fn update_channel(&mut self, code: &str, payload: ChannelUpdate) -> AppResult<&Channel> {
        if let Some(rate) = payload.fee_rate
            && (!(0.0..=100.0).contains(&rate) || !rate.is_finite())
        {
            return Err(AppError::invalid_rate(rate));
        }
        payload.validate()?;

        let channel = self.channels.get_mut(code).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ChannelNotFound,
                format!("channel {} not found", code),
            )
        })?;

        if let Some(name) = payload.name {
            channel.name = name;
        }
        if let Some(fee_rate) = payload.fee_rate {
            channel.fee_rate = fee_rate;
        }
        if let Some(sort_order) = payload.sort_order {
            channel.sort_order = sort_order;
        }
        if let Some(is_active) = payload.is_active {
            channel.is_active = is_active;
        }
        Ok(channel)
    }

    /// Soft-deactivate a channel (historical records keep referencing it)
    pub fn deactivate_channel(&mut self, code: &str) -> AppResult<()> {
        let channel = self.channels.get_mut(code).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ChannelNotFound,
                format!("channel {} not found", code),
            )
        })?;
        channel.is_active = false;
        tracing::info!(channel = %code, "Channel deactivated");
        Ok(())
    }

    // ==================== Categories ====================

    pub fn create_category(&mut self, payload: CategoryCreate) -> AppResult<&Category> {
        payload.validate()?;
        if self.categories.contains_key(&payload.code) {
            return Err(AppError::already_exists(format!(
                "category {}",
                payload.code
            )));
        }

        let sort_order = payload
            .sort_order
            .unwrap_or_else(|| self.categories.len() as i32);
        let category = Category {
            code: payload.code.clone(),
            name: payload.name,
            sort_order,
            is_active: true,
        };
        tracing::info!(category = %category.code, "Category created");
        Ok(self.categories.entry(payload.code).or_insert(category))
    }

    pub fn update_category(
        &mut self,
        code: &str,
        payload: CategoryUpdate,
    ) -> AppResult<&Category> {
        payload.validate()?;

        let category = self.categories.get_mut(code).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("category {} not found", code),
            )
        })?;

        if let Some(name) = payload.name {
            category.name = name;
        }
        if let Some(sort_order) = payload.sort_order {
            category.sort_order = sort_order;
        }
        if let Some(is_active) = payload.is_active {
            category.is_active = is_active;
        }
        Ok(category)
    }

    /// Soft-deactivate a category
    pub fn deactivate_category(&mut self, code: &str) -> AppResult<()> {
        let category = self.categories.get_mut(code).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("category {} not found", code),
            )
        })?;
        category.is_active = false;
        Ok(())
    }
}
