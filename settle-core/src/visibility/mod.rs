//! Visibility Filter
//!
//! Display-time redaction of ledger rows. A viewer entitled to all four
//! companies sees everything; otherwise money fields of rows outside the
//! viewer's set are blanked while company identity stays visible. The
//! underlying computed ledger is never mutated.

use shared::models::{CompanyCode, CompanySettlement, CompanySettlementView};
use std::collections::BTreeSet;

/// Redact company rows the viewer is not entitled to see
pub fn filter_for_viewer(
    companies: &[CompanySettlement],
    viewable: &BTreeSet<CompanyCode>,
) -> Vec<CompanySettlementView> {
    let sees_all = CompanyCode::ALL.iter().all(|code| viewable.contains(code));

    companies
        .iter()
        .map(|company| {
            if sees_all || viewable.contains(&company.code) {
                CompanySettlementView {
                    code: company.code,
                    name: company.name.clone(),
                    revenue: Some(company.revenue),
                    cost: Some(company.cost),
                    profit: Some(company.profit),
                    profit_rate: Some(company.profit_rate),
                }
            } else {
                CompanySettlementView {
                    code: company.code,
                    name: company.name.clone(),
                    revenue: None,
                    cost: None,
                    profit: None,
                    profit_rate: None,
                }
            }
        })
        .collect()
}
