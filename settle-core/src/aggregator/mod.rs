//! Period Aggregator
//!
//! Maintains one MonthlyRecord under ingestion and single-day corrections.
//! The summary moves by deltas (O(1) per correction, never re-summed from
//! days); the sales maps move by exact breakdown reversal (each day retains
//! its full prior breakdown, so a correction subtracts exactly what was
//! added); the settlement is always recomputed in full, because it is
//! bounded by the number of channels/categories and correctness there
//! matters more than speed.
//!
//! Validation happens entirely before any mutation: a rejected ingestion or
//! correction leaves the record untouched.

use crate::ledger;
use crate::master::MasterData;
use chrono::{Datelike, NaiveDate};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CategorySales, ChannelSales, DailyCounts, DailyRecord, MonthlyRecord, MonthlySummary,
    Settlement,
};
use std::collections::BTreeMap;


/// Create an empty monthly record
pub fn new_month(year: i32, month: u32) -> AppResult<MonthlyRecord> {
    if !(1..=12).contains(&month) {
        return Err(AppError::invalid_input(format!("invalid month {}", month)));
    }
    Ok(MonthlyRecord {
        year,
        month,
        days: Vec::new(),
        summary: MonthlySummary::default(),
        channel_sales: BTreeMap::new(),
        category_sales: BTreeMap::new(),
        settlement: ledger::empty_settlement(),
    })
}

/// Append a new daily record to a month
///
/// Fails with `DateOutOfMonth` if the date does not belong to the record's
/// (year, month), `DuplicateDate` if the date was already ingested, and the
/// usual input errors for bad counts. Corrections to existing dates go
/// through [`apply_daily_correction`] instead.
pub fn ingest_day(
    record: &mut MonthlyRecord,
    date: NaiveDate,
    counts: DailyCounts,
    master: &MasterData,
) -> AppResult<()> {
    if date.year() != record.year || date.month() != record.month {
        return Err(AppError::with_message(
            ErrorCode::DateOutOfMonth,
            format!(
                "{} does not belong to {}-{:02}",
                date, record.year, record.month
            ),
        ));
    }
    if record.day(date).is_some() {
        return Err(AppError::with_message(
            ErrorCode::DuplicateDate,
            format!("daily record for {} already exists", date),
        ));
    }
    validate_counts(&counts)?;

    record.summary.online_count += counts.online;
    record.summary.offline_count += counts.offline;
    record.summary.total_count += counts.online + counts.offline;

    for (code, &count) in &counts.online_breakdown {
        add_channel_sales(&mut record.channel_sales, code, count, master);
    }
    for (code, &count) in &counts.offline_breakdown {
        add_category_sales(&mut record.category_sales, code, count, master);
    }

    let day = DailyRecord::from_counts(date, counts);
    let position = record
        .days
        .iter()
        .position(|d| d.date > date)
        .unwrap_or(record.days.len());
    record.days.insert(position, day);

    record.settlement = ledger::settle_monthly_record(record)?;
    tracing::debug!(date = %date, total = record.summary.total_count, "Daily record ingested");
    Ok(())
}

/// Apply a correction to one previously ingested date
///
/// Returns the updated summary and the fully recomputed settlement.
pub fn apply_daily_correction(
    record: &mut MonthlyRecord,
    date: NaiveDate,
    counts: DailyCounts,
    master: &MasterData,
) -> AppResult<(MonthlySummary, Settlement)> {
    let index = record
        .days
        .iter()
        .position(|d| d.date == date)
        .ok_or_else(|| AppError::date_not_found(date.to_string()))?;
    validate_counts(&counts)?;

    let old = record.days[index].clone();
    let online_delta = counts.online - old.online;
    let offline_delta = counts.offline - old.offline;

    record.summary.online_count += online_delta;
    record.summary.offline_count += offline_delta;
    record.summary.total_count += online_delta + offline_delta;

    // Exact reversal: the day's stored breakdown is precisely what ingestion
    // added, so subtracting it and adding the new one cannot drift
    for (code, &count) in &old.online_breakdown {
        remove_channel_sales(&mut record.channel_sales, code, count);
    }
    for (code, &count) in &old.offline_breakdown {
        remove_category_sales(&mut record.category_sales, code, count);
    }
    for (code, &count) in &counts.online_breakdown {
        add_channel_sales(&mut record.channel_sales, code, count, master);
    }
    for (code, &count) in &counts.offline_breakdown {
        add_category_sales(&mut record.category_sales, code, count, master);
    }

    record.days[index] = DailyRecord::from_counts(date, counts);

    record.settlement = ledger::settle_monthly_record(record)?;
    tracing::info!(
        date = %date,
        online_delta,
        offline_delta,
        "Daily correction applied"
    );
    Ok((record.summary.clone(), record.settlement.clone()))
}

/// Validate a counts payload without touching any state
fn validate_counts(counts: &DailyCounts) -> AppResult<()> {
    if counts.online < 0 {
        return Err(AppError::negative_count("online", counts.online));
    }
    if counts.offline < 0 {
        return Err(AppError::negative_count("offline", counts.offline));
    }
    for (code, &count) in &counts.online_breakdown {
        if count < 0 {
            return Err(AppError::negative_count(format!("online[{}]", code), count));
        }
    }
    for (code, &count) in &counts.offline_breakdown {
        if count < 0 {
            return Err(AppError::negative_count(format!("offline[{}]", code), count));
        }
    }

    // A non-zero total with an empty breakdown fails here too: empty sums to 0
    let online_sum: i64 = counts.online_breakdown.values().sum();
    if online_sum != counts.online {
        return Err(AppError::breakdown_mismatch("online", counts.online, online_sum));
    }
    let offline_sum: i64 = counts.offline_breakdown.values().sum();
    if offline_sum != counts.offline {
        return Err(AppError::breakdown_mismatch(
            "offline",
            counts.offline,
            offline_sum,
        ));
    }
    Ok(())
}

/// Add to a channel's accumulated sales, creating the entry on first sight
///
/// The fee rate is snapshotted from master data when the entry is created;
/// unknown codes get a zero rate and the raw code as label.
fn add_channel_sales(
    sales: &mut BTreeMap<String, ChannelSales>,
    code: &str,
    count: i64,
    master: &MasterData,
) {
    let entry = sales.entry(code.to_string()).or_insert_with(|| {
        match master.channel(code) {
            Some(channel) => ChannelSales {
                name: channel.name.clone(),
                count: 0,
                fee_rate: channel.fee_rate,
            },
            None => {
                tracing::warn!(
                    channel = %code,
                    "Channel not in master data, accumulating at zero commission"
                );
                ChannelSales {
                    name: code.to_string(),
                    count: 0,
                    fee_rate: 0.0,
                }
            }
        }
    });
    entry.count += count;
}

fn remove_channel_sales(sales: &mut BTreeMap<String, ChannelSales>, code: &str, count: i64) {
    match sales.get_mut(code) {
        Some(entry) => {
            entry.count -= count;
            if entry.count < 0 {
                // Cannot happen when days and maps are kept in lockstep
                tracing::error!(channel = %code, count = entry.count, "Channel sales went negative, clamping");
                entry.count = 0;
            }
        }
        None => {
            tracing::error!(channel = %code, "Reversing breakdown for unknown channel entry");
        }
    }
}

fn add_category_sales(
    sales: &mut BTreeMap<String, CategorySales>,
    code: &str,
    count: i64,
    master: &MasterData,
) {
    let entry = sales.entry(code.to_string()).or_insert_with(|| {
        match master.category(code) {
            Some(category) => CategorySales {
                name: category.name.clone(),
                count: 0,
            },
            None => {
                tracing::warn!(
                    category = %code,
                    "Category not in master data, accumulating under raw code"
                );
                CategorySales {
                    name: code.to_string(),
                    count: 0,
                }
            }
        }
    });
    entry.count += count;
}

fn remove_category_sales(sales: &mut BTreeMap<String, CategorySales>, code: &str, count: i64) {
    match sales.get_mut(code) {
        Some(entry) => {
            entry.count -= count;
            if entry.count < 0 {
                tracing::error!(category = %code, count = entry.count, "Category sales went negative, clamping");
                entry.count = 0;
            }
        }
        None => {
            tracing::error!(category = %code, "Reversing breakdown for unknown category entry");
        }
    }
}
