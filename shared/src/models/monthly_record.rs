//! Monthly Record Model
//!
//! Aggregation root for one (year, month): the ordered daily records, the
//! running summary, the accumulated channel/category sales maps, and the
//! derived settlement. The settlement is a pure function of the summary and
//! the sales maps; it is always recomputed by the engine, never hand-edited.

use super::daily_record::DailyRecord;
use super::settlement::Settlement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running monthly totals
///
/// Invariant: equals the sum of the corresponding fields across all daily
/// records. Maintained by deltas on correction, O(1) per edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub online_count: i64,
    pub offline_count: i64,
    pub total_count: i64,
}

/// Accumulated monthly sales for one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSales {
    pub name: String,
    pub count: i64,
    /// Commission rate snapshot taken when the channel first appeared in the
    /// month; rate changes in master data do not rewrite history
    pub fee_rate: f64,
}

/// Accumulated monthly sales for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub name: String,
    pub count: i64,
}

/// Aggregation root for one (year, month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub year: i32,
    pub month: u32,
    /// Daily records, date ascending, no duplicate dates
    pub days: Vec<DailyRecord>,
    pub summary: MonthlySummary,
    /// Channel code -> accumulated sales
    #[serde(default)]
    pub channel_sales: BTreeMap<String, ChannelSales>,
    /// Category code -> accumulated sales
    #[serde(default)]
    pub category_sales: BTreeMap<String, CategorySales>,
    /// Derived settlement; recomputed whenever summary or sales maps change
    pub settlement: Settlement,
}

impl MonthlyRecord {
    /// Find a daily record by date
    pub fn day(&self, date: chrono::NaiveDate) -> Option<&DailyRecord> {
        self.days.iter().find(|d| d.date == date)
    }
}
