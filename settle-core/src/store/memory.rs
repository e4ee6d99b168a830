//! In-memory store
//!
//! BTreeMap-backed [`SettlementStore`] used by tests and single-process
//! setups. Durable backends live outside this crate.

use super::SettlementStore;
use shared::error::AppResult;
use shared::models::{FlowCheck, FlowId, MonthlyRecord};
use std::collections::BTreeMap;

/// Non-durable store keyed by (year, month)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<(i32, u32), MonthlyRecord>,
    checks: BTreeMap<(i32, u32, FlowId), FlowCheck>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettlementStore for MemoryStore {
    fn monthly_record(&self, year: i32, month: u32) -> AppResult<Option<MonthlyRecord>> {
        Ok(self.records.get(&(year, month)).cloned())
    }

    fn save_monthly_record(&mut self, record: MonthlyRecord) -> AppResult<()> {
        self.records.insert((record.year, record.month), record);
        Ok(())
    }

    fn available_months(&self) -> AppResult<Vec<(i32, u32)>> {
        Ok(self.records.keys().copied().collect())
    }

    fn flow_checks(&self, year: i32, month: u32) -> AppResult<Vec<FlowCheck>> {
        Ok(self
            .checks
            .range((year, month, FlowId::TicketSales)..=(year, month, FlowId::AgencyCommission))
            .map(|(_, check)| check.clone())
            .collect())
    }

    fn save_flow_check(&mut self, year: i32, month: u32, check: FlowCheck) -> AppResult<()> {
        self.checks.insert((year, month, check.flow_id), check);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::new_month;

    #[test]
    fn test_record_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.monthly_record(2024, 7).unwrap().is_none());

        let record = new_month(2024, 7).unwrap();
        store.save_monthly_record(record.clone()).unwrap();

        assert_eq!(store.monthly_record(2024, 7).unwrap(), Some(record));
    }

    #[test]
    fn test_available_months_sorted() {
        let mut store = MemoryStore::new();
        for (y, m) in [(2024, 3), (2023, 12), (2024, 1)] {
            store.save_monthly_record(new_month(y, m).unwrap()).unwrap();
        }
        assert_eq!(
            store.available_months().unwrap(),
            vec![(2023, 12), (2024, 1), (2024, 3)]
        );
    }

    #[test]
    fn test_flow_checks_scoped_to_month() {
        let mut store = MemoryStore::new();
        let check = FlowCheck {
            flow_id: FlowId::ParkFee,
            checked: true,
            checked_at: Some(1_700_000_000_000),
            amount: 140_000.0,
        };
        store.save_flow_check(2024, 7, check.clone()).unwrap();

        assert_eq!(store.flow_checks(2024, 7).unwrap(), vec![check]);
        assert!(store.flow_checks(2024, 8).unwrap().is_empty());
    }
}
