//! Storage interface
//!
//! The engine treats persistence as an opaque collaborator keyed by
//! (year, month). Implementations own durability, retries, and locking; the
//! engine is handed records, operates on them, and hands them back. Callers
//! must serialize mutations per (year, month) — see [`crate::service`].

use shared::error::AppResult;
use shared::models::{FlowCheck, MonthlyRecord};

mod memory;

pub use memory::MemoryStore;

/// Opaque get/put storage for monthly records and flow acknowledgements
pub trait SettlementStore {
    /// Fetch one monthly record, `None` when the month has no data yet
    fn monthly_record(&self, year: i32, month: u32) -> AppResult<Option<MonthlyRecord>>;

    /// Upsert one monthly record under its (year, month) key
    fn save_monthly_record(&mut self, record: MonthlyRecord) -> AppResult<()>;

    /// Every (year, month) with data, oldest first
    fn available_months(&self) -> AppResult<Vec<(i32, u32)>>;

    /// Flow acknowledgements recorded for one month
    fn flow_checks(&self, year: i32, month: u32) -> AppResult<Vec<FlowCheck>>;

    /// Upsert one flow acknowledgement under (year, month, flow id)
    fn save_flow_check(&mut self, year: i32, month: u32, check: FlowCheck) -> AppResult<()>;
}
