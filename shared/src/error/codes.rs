//! Unified error codes for the settlement engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Input errors (counts, breakdowns, dates)
//! - 2xxx: Rate and master-data errors
//! - 3xxx: Period errors (missing months/days)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Input ====================
    /// Malformed input (generic)
    InvalidInput = 1001,
    /// A visitor count is negative
    NegativeCount = 1002,
    /// A breakdown does not sum to its declared total
    BreakdownMismatch = 1003,
    /// Date does not fall within the target month
    DateOutOfMonth = 1004,
    /// A daily record for this date already exists
    DuplicateDate = 1005,

    // ==================== 2xxx: Rate / Master Data ====================
    /// Commission rate outside the [0, 100] range
    InvalidRate = 2001,
    /// Channel code not present in master data
    ChannelNotFound = 2002,
    /// Category code not present in master data
    CategoryNotFound = 2003,

    // ==================== 3xxx: Period ====================
    /// No monthly record exists for the requested (year, month)
    MonthNotFound = 3001,
    /// The requested date is not among the month's daily records
    DateNotFound = 3002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::InvalidInput => "Invalid input",
            Self::NegativeCount => "Visitor count must be non-negative",
            Self::BreakdownMismatch => "Breakdown does not sum to its total",
            Self::DateOutOfMonth => "Date does not belong to the target month",
            Self::DuplicateDate => "Daily record for this date already exists",

            Self::InvalidRate => "Commission rate must be between 0 and 100",
            Self::ChannelNotFound => "Channel not found",
            Self::CategoryNotFound => "Category not found",

            Self::MonthNotFound => "Monthly record not found",
            Self::DateNotFound => "Daily record not found",

            Self::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unrecognized u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::InvalidInput,
            1002 => Self::NegativeCount,
            1003 => Self::BreakdownMismatch,
            1004 => Self::DateOutOfMonth,
            1005 => Self::DuplicateDate,

            2001 => Self::InvalidRate,
            2002 => Self::ChannelNotFound,
            2003 => Self::CategoryNotFound,

            3001 => Self::MonthNotFound,
            3002 => Self::DateNotFound,

            9001 => Self::InternalError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
