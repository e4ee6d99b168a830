//! Settlement Service
//!
//! Load → operate → save orchestration over a [`SettlementStore`]. The
//! service never holds live period state: every operation loads the monthly
//! record, runs the aggregator/ledger on it, and hands it back to the store.
//!
//! Concurrency contract: the service takes `&mut self` and assumes the caller
//! serializes mutations per (year, month). It owns no locks; collaborators
//! that need cross-process exclusivity provide it themselves.

use crate::aggregator;
use crate::master::MasterData;
use crate::rollup::{self, CumulativeSettlement};
use crate::store::SettlementStore;
use crate::visibility;
use chrono::{Datelike, NaiveDate, Utc};
use shared::error::{AppError, AppResult};
use shared::models::{
    CompanyCode, CompanySettlementView, DailyCounts, FlowCheck, FlowId, MonthlyRecord,
    MonthlySummary, Settlement,
};
use std::collections::BTreeSet;

pub struct SettlementService<S: SettlementStore> {
    store: S,
    master: MasterData,
}

impl<S: SettlementStore> SettlementService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            master: MasterData::new(),
        }
    }

    pub fn with_master(store: S, master: MasterData) -> Self {
        Self { store, master }
    }

    /// Channel/category master data, for configuration changes
    pub fn master(&self) -> &MasterData {
        &self.master
    }

    pub fn master_mut(&mut self) -> &mut MasterData {
        &mut self.master
    }

    // ==================== Ingestion & Correction ====================

    /// Ingest one day's counts, creating the monthly record on first sight
    pub fn ingest_day(&mut self, date: NaiveDate, counts: DailyCounts) -> AppResult<()> {
        let (year, month) = (date.year(), date.month());
        let mut record = match self.store.monthly_record(year, month)? {
            Some(record) => record,
            None => {
                tracing::info!(year, month, "Opening new monthly record");
                aggregator::new_month(year, month)?
            }
        };

        aggregator::ingest_day(&mut record, date, counts, &self.master)?;
        self.refresh_flow_checks(year, month, &record.settlement)?;
        self.store.save_monthly_record(record)
    }

    /// Correct one previously ingested date
    ///
    /// Returns the updated summary and recomputed settlement. Flow checks
    /// whose acknowledged amount no longer matches are invalidated.
    pub fn correct_day(
        &mut self,
        date: NaiveDate,
        counts: DailyCounts,
    ) -> AppResult<(MonthlySummary, Settlement)> {
        let (year, month) = (date.year(), date.month());
        let mut record = self
            .store
            .monthly_record(year, month)?
            .ok_or_else(|| AppError::month_not_found(year, month))?;

        let result = aggregator::apply_daily_correction(&mut record, date, counts, &self.master)?;
        self.refresh_flow_checks(year, month, &record.settlement)?;
        self.store.save_monthly_record(record)?;
        Ok(result)
    }

    // ==================== Views ====================

    /// The full monthly record
    pub fn monthly(&self, year: i32, month: u32) -> AppResult<MonthlyRecord> {
        self.store
            .monthly_record(year, month)?
            .ok_or_else(|| AppError::month_not_found(year, month))
    }

    /// Company rows of one month, redacted for the viewer's entitlements
    pub fn monthly_company_views(
        &self,
        year: i32,
        month: u32,
        viewable: &BTreeSet<CompanyCode>,
    ) -> AppResult<Vec<CompanySettlementView>> {
        let record = self.monthly(year, month)?;
        Ok(visibility::filter_for_viewer(
            &record.settlement.companies,
            viewable,
        ))
    }

    /// Cumulative settlement over every month of one year
    pub fn yearly(&self, year: i32) -> AppResult<CumulativeSettlement> {
        rollup::yearly(&self.all_records()?, year)
    }

    /// Cumulative settlement over everything in the store
    pub fn all_time(&self) -> AppResult<CumulativeSettlement> {
        rollup::rollup(&self.all_records()?)
    }

    /// Every (year, month) with data, oldest first
    pub fn available_months(&self) -> AppResult<Vec<(i32, u32)>> {
        self.store.available_months()
    }

    fn all_records(&self) -> AppResult<Vec<MonthlyRecord>> {
        let mut records = Vec::new();
        for (year, month) in self.store.available_months()? {
            if let Some(record) = self.store.monthly_record(year, month)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    // ==================== Flow Acknowledgements ====================

    /// Acknowledgements recorded for one month
    pub fn flow_checks(&self, year: i32, month: u32) -> AppResult<Vec<FlowCheck>> {
        self.store.flow_checks(year, month)
    }

    /// Check a flow off (or un-check it) against its currently computed amount
    pub fn set_flow_checked(
        &mut self,
        year: i32,
        month: u32,
        flow_id: FlowId,
        checked: bool,
    ) -> AppResult<FlowCheck> {
        let record = self.monthly(year, month)?;
        let amount = record
            .settlement
            .flow(flow_id)
            .map(|flow| flow.amount)
            .unwrap_or(0.0);

        let check = FlowCheck {
            flow_id,
            checked,
            checked_at: checked.then(|| Utc::now().timestamp_millis()),
            amount,
        };
        self.store.save_flow_check(year, month, check.clone())?;
        tracing::info!(year, month, flow = %flow_id, checked, amount, "Flow check updated");
        Ok(check)
    }

    /// Invalidate acknowledgements whose amount no longer matches
    ///
    /// A check certifies one specific figure; once a correction moves that
    /// figure, the certification is void and must be redone.
    fn refresh_flow_checks(
        &mut self,
        year: i32,
        month: u32,
        settlement: &Settlement,
    ) -> AppResult<()> {
        for mut check in self.store.flow_checks(year, month)? {
            let Some(flow) = settlement.flow(check.flow_id) else {
                continue;
            };
            if check.checked && check.amount != flow.amount {
                tracing::warn!(
                    year,
                    month,
                    flow = %check.flow_id,
                    old_amount = check.amount,
                    new_amount = flow.amount,
                    "Flow amount changed, invalidating acknowledgement"
                );
                check.checked = false;
                check.checked_at = None;
                check.amount = flow.amount;
                self.store.save_flow_check(year, month, check)?;
            }
        }
        Ok(())
    }
}
