//! Data models
//!
//! Shared between the settlement engine and its surrounding surfaces
//! (API layer, storage adapters). All monetary fields are `f64` at this
//! boundary; the engine computes in `Decimal` internally.

pub mod category;
pub mod channel;
pub mod company;
pub mod daily_record;
pub mod monthly_record;
pub mod settlement;

// Re-exports
pub use category::*;
pub use channel::*;
pub use company::*;
pub use daily_record::*;
pub use monthly_record::*;
pub use settlement::*;
