//! Settlement Ledger
//!
//! Converts total visitor counts (per channel, plus offline) into the full
//! set of inter-company flows and the derived per-company figures.
//!
//! Accumulation keeps full `Decimal` precision across channels; each flow is
//! rounded to whole currency units exactly once, at the reporting boundary.
//! Company books are folded from the rounded flow amounts so that reported
//! flows and company totals always agree.

use crate::flows::{self, AGENCY_FLOW, FlowDef, PRIMARY_FLOWS};
use crate::master::MasterData;
use crate::money::{to_amount, to_decimal, to_rate};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};
use shared::models::{
    CompanyCode, CompanySettlement, FlowId, MonthlyRecord, Settlement, SettlementFlow,
};
use std::collections::BTreeMap;

mod volume;

pub use volume::ChannelVolume;

#[cfg(test)]
mod tests;

/// Offline visitors carry no channel commission
const OFFLINE_FEE_RATE: f64 = 0.0;

/// Compute the full settlement for one period
///
/// Pure computation: identical inputs yield bit-identical output. Fails with
/// `NegativeCount` on a negative count and `InvalidRate` on a rate outside
/// [0, 100]; never fails on unknown channel codes (those are resolved to
/// zero-fee volumes upstream, see [`ChannelVolume::resolve`]).
pub fn compute_settlement(
    volumes: &[ChannelVolume],
    offline_count: i64,
) -> AppResult<Settlement> {
    if offline_count < 0 {
        return Err(AppError::negative_count("offline count", offline_count));
    }

    let mut totals: BTreeMap<FlowId, Decimal> = PRIMARY_FLOWS
        .iter()
        .map(|def| (def.id, Decimal::ZERO))
        .collect();
    let mut margin = Decimal::ZERO;

    for volume in volumes {
        if volume.count < 0 {
            return Err(AppError::negative_count(
                format!("count for channel {}", volume.code),
                volume.count,
            ));
        }
        accumulate(&mut totals, &mut margin, volume.count, volume.fee_rate)?;
    }
    accumulate(&mut totals, &mut margin, offline_count, OFFLINE_FEE_RATE)?;

    // Derived phase: agency commission over the accumulated margin, rounded
    // once together with everything else
    let agency_total = margin * flows::agency_rate();

    let mut settlement_flows = Vec::with_capacity(PRIMARY_FLOWS.len() + 1);
    for def in &PRIMARY_FLOWS {
        settlement_flows.push(build_flow(def, totals[&def.id]));
    }
    settlement_flows.push(build_flow(&AGENCY_FLOW, agency_total));

    let companies = fold_companies(&settlement_flows);

    Ok(Settlement {
        flows: settlement_flows,
        companies,
    })
}

/// Compute the settlement of a monthly record from its sales maps and summary
pub fn settle_monthly_record(record: &MonthlyRecord) -> AppResult<Settlement> {
    let volumes: Vec<ChannelVolume> = record
        .channel_sales
        .iter()
        .map(|(code, sales)| ChannelVolume {
            code: code.clone(),
            name: sales.name.clone(),
            fee_rate: sales.fee_rate,
            count: sales.count,
        })
        .collect();
    compute_settlement(&volumes, record.summary.offline_count)
}

/// Add one volume's contribution to every primary flow and to the margin
fn accumulate(
    totals: &mut BTreeMap<FlowId, Decimal>,
    margin: &mut Decimal,
    count: i64,
    fee_rate: f64,
) -> AppResult<()> {
    let n = Decimal::from(count);
    for def in &PRIMARY_FLOWS {
        let per_visitor = flows::flow_amount_per_visitor(def, fee_rate)?;
        *totals
            .get_mut(&def.id)
            .expect("all primary flows are pre-seeded") += per_visitor * n;
    }
    *margin += flows::net_margin_per_visitor(fee_rate)? * n;
    Ok(())
}

fn build_flow(def: &FlowDef, total: Decimal) -> SettlementFlow {
    SettlementFlow {
        id: def.id,
        source: def.source,
        counterparty: def.counterparty,
        is_revenue: def.is_revenue,
        amount: to_amount(total),
    }
}

/// Fold rounded flows into the four company rows
///
/// revenue  = revenue-bearing flows where the company is source
/// cost     = flows where the company is counterparty
/// profit   = revenue - cost + non-revenue flows where the company is source
fn fold_companies(flows: &[SettlementFlow]) -> Vec<CompanySettlement> {
    CompanyCode::ALL
        .iter()
        .map(|&code| {
            let mut revenue = Decimal::ZERO;
            let mut cost = Decimal::ZERO;
            let mut non_revenue = Decimal::ZERO;

            for flow in flows {
                let amount = to_decimal(flow.amount);
                if flow.source == code {
                    if flow.is_revenue {
                        revenue += amount;
                    } else {
                        non_revenue += amount;
                    }
                }
                if flow.counterparty == Some(code) {
                    cost += amount;
                }
            }

            let profit = revenue - cost + non_revenue;
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
        .collect()
}

/// An empty settlement (no visitors): every flow and company figure is zero
pub fn empty_settlement() -> Settlement {
    compute_settlement(&[], 0).expect("empty input is always valid")
}

/// Resolve raw per-channel counts against master data
///
/// Unknown codes degrade gracefully to a zero-commission channel with the raw
/// code as both code and label; historical data commonly references retired
/// channels, so this is deliberate, not an error.
pub fn resolve_volumes(
    counts: &BTreeMap<String, i64>,
    master: &MasterData,
) -> Vec<ChannelVolume> {
    counts
        .iter()
        .map(|(code, &count)| ChannelVolume::resolve(code, count, master))
        .collect()
}
