//! Company Model
//!
//! The four corporate parties of the settlement. The set is closed: every
//! flow and every ledger row references one of these codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four settlement parties
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompanyCode {
    /// Park operator (runs the maze park and the offline gate)
    #[serde(rename = "MAZE")]
    Maze,
    /// Online ticketing platform (sells through external channels)
    #[serde(rename = "TKT")]
    Tkt,
    /// Marketing partner
    #[serde(rename = "MKT")]
    Mkt,
    /// Operating agency (commission on the platform's net margin)
    #[serde(rename = "AGC")]
    Agc,
}

impl CompanyCode {
    /// All companies in fixed display order
    pub const ALL: [CompanyCode; 4] = [Self::Maze, Self::Tkt, Self::Mkt, Self::Agc];

    /// Stable string code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maze => "MAZE",
            Self::Tkt => "TKT",
            Self::Mkt => "MKT",
            Self::Agc => "AGC",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Maze => "Maze Park",
            Self::Tkt => "Ticket Platform",
            Self::Mkt => "Marketing Partner",
            Self::Agc => "Operating Agency",
        }
    }
}

impl fmt::Display for CompanyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
