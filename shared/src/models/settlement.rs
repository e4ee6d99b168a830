//! Settlement Models
//!
//! The derived output of the ledger: named inter-company flows and the
//! per-company revenue/cost/profit view, plus the operator acknowledgement
//! that is persisted separately per flow.

use super::company::CompanyCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a settlement relationship
///
/// The first four are primary (fixed fraction of the base unit price); the
/// agency commission is derived from the others and always evaluated last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowId {
    /// Gross ticket revenue collected from visitors
    TicketSales,
    /// Per-visitor park entry fee paid by the platform to the park
    ParkFee,
    /// Per-visitor marketing fee paid by the platform
    MarketingFee,
    /// Non-revenue operations share paid by the park to the platform
    OperationsShare,
    /// Agency commission on the platform's net margin (derived)
    AgencyCommission,
}

impl FlowId {
    /// All flows in evaluation/display order
    pub const ALL: [FlowId; 5] = [
        Self::TicketSales,
        Self::ParkFee,
        Self::MarketingFee,
        Self::OperationsShare,
        Self::AgencyCommission,
    ];

    /// Stable string id
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TicketSales => "ticket_sales",
            Self::ParkFee => "park_fee",
            Self::MarketingFee => "marketing_fee",
            Self::OperationsShare => "operations_share",
            Self::AgencyCommission => "agency_commission",
        }
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, directed monetary flow for a period
///
/// `source` is the receiving side; `counterparty` is the paying side, `None`
/// when the money comes from outside the four parties (visitors buying
/// tickets). The amount is single-valued: what the counterparty pays is
/// exactly what the source receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementFlow {
    pub id: FlowId,
    /// Receiving company
    pub source: CompanyCode,
    /// Paying company (`None` = external ticket buyers)
    pub counterparty: Option<CompanyCode>,
    /// Whether the amount counts toward the source's revenue (vs. profit only)
    pub is_revenue: bool,
    /// Amount in whole currency units
    pub amount: f64,
}

/// One company's position for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettlement {
    pub code: CompanyCode,
    pub name: String,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    /// profit / revenue * 100, rounded to 1 decimal; 0 when revenue is 0
    pub profit_rate: f64,
}

/// Full derived settlement for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub flows: Vec<SettlementFlow>,
    /// One entry per company, in [`CompanyCode::ALL`] order
    pub companies: Vec<CompanySettlement>,
}

impl Settlement {
    /// Look up a flow by id
    pub fn flow(&self, id: FlowId) -> Option<&SettlementFlow> {
        self.flows.iter().find(|f| f.id == id)
    }

    /// Look up a company row by code
    pub fn company(&self, code: CompanyCode) -> Option<&CompanySettlement> {
        self.companies.iter().find(|c| c.code == code)
    }
}

/// Visibility-filtered company row
///
/// Company identity stays visible; money fields are `None` when the viewer is
/// not entitled to the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettlementView {
    pub code: CompanyCode,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_rate: Option<f64>,
}

/// Operator acknowledgement of one flow for one (year, month)
///
/// Flows themselves are derived and recomputed on demand; the check-off is
/// the only separately persisted piece. `amount` records what the operator
/// actually verified, so a later recompute that changes the figure can
/// invalidate the check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCheck {
    pub flow_id: FlowId,
    pub checked: bool,
    /// Unix millis of the last check-off
    pub checked_at: Option<i64>,
    /// The amount the check was made against
    pub amount: f64,
}
