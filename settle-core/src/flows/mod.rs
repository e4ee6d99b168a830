//! Fee-Adjusted Flow Model
//!
//! The fixed per-visitor monetary flows between the four parties, adjusted by
//! a channel's commission rate. Amounts are fractions of the base unit price
//! and are not configurable per channel; only the fee multiplier changes.
//!
//! Evaluation is two-phase: the four primary flows are fixed fractions, the
//! agency commission is derived from the platform's net margin and must be
//! computed after every primary flow for the same visitors is known.

use crate::money::to_decimal;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};
use shared::models::{CompanyCode, FlowId};

/// Base unit price charged per visitor, before any commission adjustment
pub const BASE_UNIT_PRICE: i64 = 3000;

/// Per-visitor park entry fee (platform -> park)
pub const PARK_FEE: i64 = 1000;

/// Per-visitor marketing fee (platform -> marketing partner)
pub const MARKETING_FEE: i64 = 1000;

/// Per-visitor operations share (park -> platform, non-revenue)
pub const OPERATIONS_SHARE: i64 = 500;

/// Agency commission percentage of the platform's net margin
pub const AGENCY_COMMISSION_PERCENT: i64 = 20;

/// Static definition of one settlement relationship
#[derive(Debug, Clone, Copy)]
pub struct FlowDef {
    pub id: FlowId,
    /// Receiving company
    pub source: CompanyCode,
    /// Paying company (`None` = external ticket buyers)
    pub counterparty: Option<CompanyCode>,
    /// Whether the flow counts toward the source's revenue
    pub is_revenue: bool,
    /// Fixed per-visitor amount before fee adjustment
    pub per_visitor: i64,
}

/// The four primary relationships, in evaluation order
pub const PRIMARY_FLOWS: [FlowDef; 4] = [
    FlowDef {
        id: FlowId::TicketSales,
        source: CompanyCode::Tkt,
        counterparty: None,
        is_revenue: true,
        per_visitor: BASE_UNIT_PRICE,
    },
    FlowDef {
        id: FlowId::ParkFee,
        source: CompanyCode::Maze,
        counterparty: Some(CompanyCode::Tkt),
        is_revenue: true,
        per_visitor: PARK_FEE,
    },
    FlowDef {
        id: FlowId::MarketingFee,
        source: CompanyCode::Mkt,
        counterparty: Some(CompanyCode::Tkt),
        is_revenue: true,
        per_visitor: MARKETING_FEE,
    },
    FlowDef {
        id: FlowId::OperationsShare,
        source: CompanyCode::Tkt,
        counterparty: Some(CompanyCode::Maze),
        is_revenue: false,
        per_visitor: OPERATIONS_SHARE,
    },
];

/// Static shape of the derived agency-commission flow
pub const AGENCY_FLOW: FlowDef = FlowDef {
    id: FlowId::AgencyCommission,
    source: CompanyCode::Agc,
    counterparty: Some(CompanyCode::Tkt),
    is_revenue: true,
    // Derived, not a fixed fraction; see `net_margin_per_visitor`
    per_visitor: 0,
};

/// Look up a primary flow definition by id
pub fn primary_flow(id: FlowId) -> Option<&'static FlowDef> {
    PRIMARY_FLOWS.iter().find(|def| def.id == id)
}

/// Commission multiplier for a channel rate: (100 - rate) / 100
///
/// Rejects rates outside [0, 100] (including NaN/Infinity).
pub fn fee_multiplier(fee_rate: f64) -> AppResult<Decimal> {
    if !fee_rate.is_finite() || !(0.0..=100.0).contains(&fee_rate) {
        return Err(AppError::invalid_rate(fee_rate));
    }
    Ok((Decimal::ONE_HUNDRED - to_decimal(fee_rate)) / Decimal::ONE_HUNDRED)
}

/// Fee-adjusted amount of one primary flow for a single visitor
///
/// Deterministic, no side effects. The agency commission has no fixed
/// per-visitor amount; use [`net_margin_per_visitor`] and [`agency_rate`].
pub fn flow_amount_per_visitor(def: &FlowDef, fee_rate: f64) -> AppResult<Decimal> {
    Ok(Decimal::from(def.per_visitor) * fee_multiplier(fee_rate)?)
}

/// The platform's net margin for a single visitor at the given rate
///
/// base revenue - park fee - marketing fee + operations share, each already
/// fee-adjusted. The agency commission is a percentage of this margin.
pub fn net_margin_per_visitor(fee_rate: f64) -> AppResult<Decimal> {
    let margin = BASE_UNIT_PRICE - PARK_FEE - MARKETING_FEE + OPERATIONS_SHARE;
    Ok(Decimal::from(margin) * fee_multiplier(fee_rate)?)
}

/// Agency commission rate as a fraction (0.20)
pub fn agency_rate() -> Decimal {
    Decimal::from(AGENCY_COMMISSION_PERCENT) / Decimal::ONE_HUNDRED
}
