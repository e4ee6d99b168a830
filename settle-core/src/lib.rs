//! Settle Core - theme-park visitor settlement engine
//!
//! Turns daily visitor counts into the monthly four-party money settlement:
//! ticket platform, park operator, marketing partner, and operating agency.
//!
//! # Module structure
//!
//! ```text
//! settle-core/src/
//! ├── flows/         # Fee-adjusted flow model (constants, per-visitor math)
//! ├── ledger/        # Settlement computation per period
//! ├── aggregator/    # Monthly record ingestion and corrections
//! ├── rollup/        # Yearly / all-time cumulative views
//! ├── visibility/    # Per-viewer redaction of company rows
//! ├── master/        # Channel and category master data
//! ├── store/         # Storage trait + in-memory implementation
//! ├── service.rs     # Load → operate → save orchestration
//! ├── money.rs       # Decimal/f64 conversion and rounding
//! └── common/        # Logging setup
//! ```

pub mod aggregator;
pub mod common;
pub mod flows;
pub mod ledger;
pub mod master;
pub mod money;
pub mod rollup;
pub mod service;
pub mod store;
pub mod visibility;

pub use ledger::{ChannelVolume, compute_settlement, settle_monthly_record};
pub use master::MasterData;
pub use rollup::CumulativeSettlement;
pub use service::SettlementService;
pub use store::{MemoryStore, SettlementStore};
pub use visibility::filter_for_viewer;

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use common::{cleanup_old_logs, init_logger, init_logger_with_file};
