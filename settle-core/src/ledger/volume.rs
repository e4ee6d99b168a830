//! Channel volume input for the ledger

use crate::master::MasterData;

/// Total visitor count for one channel over a period, with the commission
/// rate the ledger should apply to it
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelVolume {
    pub code: String,
    pub name: String,
    /// Commission percentage in [0, 100]
    pub fee_rate: f64,
    pub count: i64,
}

impl ChannelVolume {
    /// Resolve a raw (code, count) pair against master data
    ///
    /// Unknown codes become a zero-commission volume named after the raw
    /// code. Deactivated channels still resolve; deactivation only hides a
    /// channel from configuration UIs, not from historical math.
    pub fn resolve(code: &str, count: i64, master: &MasterData) -> Self {
        match master.channel(code) {
            Some(channel) => Self {
                code: channel.code.clone(),
                name: channel.name.clone(),
                fee_rate: channel.fee_rate,
                count,
            },
            None => {
                tracing::warn!(
                    channel = %code,
                    "Channel not in master data, treating as zero-commission"
                );
                Self {
                    code: code.to_string(),
                    name: code.to_string(),
                    fee_rate: 0.0,
                    count,
                }
            }
        }
    }
}
