//! Daily Record Model
//!
//! One calendar date's visitor counts, with the full per-code breakdowns
//! retained. Keeping the per-day breakdowns (not just the aggregates) is what
//! makes later corrections an exact inverse of ingestion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar date's visitor counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Business date (unique within its month)
    pub date: NaiveDate,
    /// Online visitor count (sum of `online_breakdown`)
    pub online: i64,
    /// Offline visitor count (sum of `offline_breakdown`)
    pub offline: i64,
    /// Derived: online + offline
    pub total: i64,
    /// Channel code -> visitor count
    #[serde(default)]
    pub online_breakdown: BTreeMap<String, i64>,
    /// Category code -> visitor count
    #[serde(default)]
    pub offline_breakdown: BTreeMap<String, i64>,
}

/// Daily ingestion / correction payload
///
/// The same value shape feeds both paths: ingestion appends a new date,
/// a correction replaces the stored values of an existing date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCounts {
    pub online: i64,
    pub offline: i64,
    #[serde(default)]
    pub online_breakdown: BTreeMap<String, i64>,
    #[serde(default)]
    pub offline_breakdown: BTreeMap<String, i64>,
}

impl DailyRecord {
    /// Build a record from validated counts
    pub fn from_counts(date: NaiveDate, counts: DailyCounts) -> Self {
        Self {
            date,
            online: counts.online,
            offline: counts.offline,
            total: counts.online + counts.offline,
            online_breakdown: counts.online_breakdown,
            offline_breakdown: counts.offline_breakdown,
        }
    }

    /// The stored values as a counts payload (used for correction round-trips)
    pub fn to_counts(&self) -> DailyCounts {
        DailyCounts {
            online: self.online,
            offline: self.offline,
            online_breakdown: self.online_breakdown.clone(),
            offline_breakdown: self.offline_breakdown.clone(),
        }
    }
}
