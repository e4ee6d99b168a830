//! Cumulative Rollup
//!
//! Combines monthly records into yearly or all-time company summaries. Each
//! month's ledger runs independently (rates may change between months, and
//! the relationship math is not linear across rate changes); only the
//! resulting figures are summed. Profit rates are recomputed once from the
//! summed revenue/profit, never averaged across months.

use crate::ledger;
use crate::money::{to_amount, to_decimal, to_rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{
    CompanyCode, CompanySettlement, FlowId, MonthlyRecord, SettlementFlow,
};
use std::collections::{BTreeMap, BTreeSet};

/// Cumulative settlement across a selection of months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSettlement {
    /// Summed flow amounts, one entry per relationship
    pub flows: Vec<SettlementFlow>,
    /// Summed company figures with recomputed profit rates
    pub companies: Vec<CompanySettlement>,
    pub online_count: i64,
    pub offline_count: i64,
    pub total_count: i64,
    /// Number of months contributing data
    pub month_count: usize,
    /// Years represented in the selection
    pub years: BTreeSet<i32>,
}

/// Roll up every given month (the all-time view when given everything)
///
/// Months are processed oldest to newest; each month's settlement is
/// recomputed from its sales maps rather than trusted from storage.
pub fn rollup(records: &[MonthlyRecord]) -> AppResult<CumulativeSettlement> {
    let mut ordered: Vec<&MonthlyRecord> = records.iter().collect();
    ordered.sort_by_key(|r| (r.year, r.month));

    let mut flow_totals: BTreeMap<FlowId, Decimal> = BTreeMap::new();
    let mut flow_shapes: BTreeMap<FlowId, SettlementFlow> = BTreeMap::new();
    let mut revenue: BTreeMap<CompanyCode, Decimal> = BTreeMap::new();
    let mut cost: BTreeMap<CompanyCode, Decimal> = BTreeMap::new();
    let mut profit: BTreeMap<CompanyCode, Decimal> = BTreeMap::new();

    let mut online_count = 0_i64;
    let mut offline_count = 0_i64;
    let mut years = BTreeSet::new();

    for record in &ordered {
        let settlement = ledger::settle_monthly_record(record)?;

        for flow in settlement.flows {
            *flow_totals.entry(flow.id).or_insert(Decimal::ZERO) += to_decimal(flow.amount);
            flow_shapes.entry(flow.id).or_insert(flow);
        }
        for company in settlement.companies {
            *revenue.entry(company.code).or_insert(Decimal::ZERO) += to_decimal(company.revenue);
            *cost.entry(company.code).or_insert(Decimal::ZERO) += to_decimal(company.cost);
            *profit.entry(company.code).or_insert(Decimal::ZERO) += to_decimal(company.profit);
        }

        online_count += record.summary.online_count;
        offline_count += record.summary.offline_count;
        years.insert(record.year);
    }

    let flows = FlowId::ALL
        .iter()
        .filter_map(|id| {
            flow_shapes.remove(id).map(|shape| SettlementFlow {
                amount: to_amount(*flow_totals.get(id).unwrap_or(&Decimal::ZERO)),
                ..shape
            })
        })
        .collect();

    let companies = CompanyCode::ALL
        .iter()
        .map(|&code| {
            let revenue = revenue.get(&code).copied().unwrap_or(Decimal::ZERO);
            let cost = cost.get(&code).copied().unwrap_or(Decimal::ZERO);
            let profit = profit.get(&code).copied().unwrap_or(Decimal::ZERO);
            let profit_rate = if revenue > Decimal::ZERO {
                to_rate(profit / revenue * Decimal::ONE_HUNDRED)
            } else {
                0.0
            };
            CompanySettlement {
                code,
                name: code.name().to_string(),
                revenue: to_amount(revenue),
                cost: to_amount(cost),
                profit: to_amount(profit),
                profit_rate,
            }
        })
        .collect();

    Ok(CumulativeSettlement {
        flows,
        companies,
        online_count,
        offline_count,
        total_count: online_count + offline_count,
        month_count: ordered.len(),
        years,
    })
}

/// Roll up every month of one year
pub fn yearly(records: &[MonthlyRecord], year: i32) -> AppResult<CumulativeSettlement> {
    let selected: Vec<MonthlyRecord> = records
        .iter()
        .filter(|r| r.year == year)
        .cloned()
        .collect();
    rollup(&selected)
}

impl CumulativeSettlement {
    /// Look up a company row by code
    pub fn company(&self, code: CompanyCode) -> Option<&CompanySettlement> {
        self.companies.iter().find(|c| c.code == code)
    }

    /// Look up a flow by id
    pub fn flow(&self, id: FlowId) -> Option<&SettlementFlow> {
        self.flows.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{ingest_day, new_month};
    use crate::master::MasterData;
    use chrono::NaiveDate;
    use shared::models::{ChannelCreate, DailyCounts};

    fn master(fee_rate: f64) -> MasterData {
        let mut master = MasterData::new();
        master
            .create_channel(ChannelCreate {
                code: "NAVER".to_string(),
                name: "Naver Booking".to_string(),
                fee_rate,
                sort_order: None,
            })
            .unwrap();
        master
    }

    fn month_with(
        year: i32,
        month: u32,
        online: i64,
        offline: i64,
        master: &MasterData,
    ) -> MonthlyRecord {
        let mut record = new_month(year, month).unwrap();
        let mut online_breakdown = BTreeMap::new();
        if online > 0 {
            online_breakdown.insert("NAVER".to_string(), online);
        }
        let mut offline_breakdown = BTreeMap::new();
        if offline > 0 {
            offline_breakdown.insert("GATE".to_string(), offline);
        }
        ingest_day(
            &mut record,
            NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            DailyCounts {
                online,
                offline,
                online_breakdown,
                offline_breakdown,
            },
            master,
        )
        .unwrap();
        record
    }

    #[test]
    fn test_rollup_is_additive_under_constant_rates() {
        let master = master(10.0);
        let m1 = month_with(2024, 7, 100, 50, &master);
        let m2 = month_with(2024, 8, 40, 10, &master);

        let combined = rollup(&[m1.clone(), m2.clone()]).unwrap();

        for &code in &CompanyCode::ALL {
            let c1 = m1.settlement.company(code).unwrap();
            let c2 = m2.settlement.company(code).unwrap();
            let c = combined.company(code).unwrap();
            assert_eq!(c.revenue, c1.revenue + c2.revenue);
            assert_eq!(c.cost, c1.cost + c2.cost);
            assert_eq!(c.profit, c1.profit + c2.profit);
        }
    }

    #[test]
    fn test_rollup_counts_and_years() {
        let master = master(10.0);
        let months = [
            month_with(2023, 12, 10, 5, &master),
            month_with(2024, 1, 20, 0, &master),
            month_with(2024, 2, 0, 7, &master),
        ];
        let cumulative = rollup(&months).unwrap();

        assert_eq!(cumulative.online_count, 30);
        assert_eq!(cumulative.offline_count, 12);
        assert_eq!(cumulative.total_count, 42);
        assert_eq!(cumulative.month_count, 3);
        assert_eq!(cumulative.years, BTreeSet::from([2023, 2024]));
    }

    #[test]
    fn test_yearly_selects_one_year() {
        let master = master(0.0);
        let months = [
            month_with(2023, 12, 10, 0, &master),
            month_with(2024, 1, 20, 0, &master),
            month_with(2024, 3, 30, 0, &master),
        ];

        let y2024 = yearly(&months, 2024).unwrap();
        assert_eq!(y2024.month_count, 2);
        assert_eq!(y2024.online_count, 50);
        assert_eq!(y2024.years, BTreeSet::from([2024]));

        let y2022 = yearly(&months, 2022).unwrap();
        assert_eq!(y2022.month_count, 0);
        assert_eq!(y2022.total_count, 0);
    }

    #[test]
    fn test_profit_rate_from_summed_figures() {
        // Months with different fee rates: the cumulative profit rate is
        // derived from summed revenue/profit once, after summation
        let high_fee = master(50.0);
        let no_fee = master(0.0);
        let m1 = month_with(2024, 1, 100, 0, &high_fee);
        let m2 = month_with(2024, 2, 100, 0, &no_fee);

        let combined = rollup(&[m1, m2]).unwrap();
        let tkt = combined.company(CompanyCode::Tkt).unwrap();

        // Summed: revenue 150000+300000, profit 60000+120000
        assert_eq!(tkt.revenue, 450_000.0);
        assert_eq!(tkt.profit, 180_000.0);
        assert_eq!(tkt.profit_rate, 40.0);
    }

    #[test]
    fn test_rollup_flow_sums() {
        let master = master(10.0);
        let m1 = month_with(2024, 7, 100, 50, &master);
        let m2 = month_with(2024, 8, 100, 50, &master);

        let combined = rollup(&[m1, m2]).unwrap();
        assert_eq!(
            combined.flow(FlowId::TicketSales).unwrap().amount,
            840_000.0
        );
        assert_eq!(
            combined.flow(FlowId::AgencyCommission).unwrap().amount,
            84_000.0
        );
    }

    #[test]
    fn test_empty_rollup() {
        let cumulative = rollup(&[]).unwrap();
        assert_eq!(cumulative.month_count, 0);
        assert!(cumulative.flows.is_empty());
        for company in &cumulative.companies {
            assert_eq!(company.revenue, 0.0);
            assert_eq!(company.profit_rate, 0.0);
        }
    }
}
