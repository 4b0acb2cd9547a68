use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: u32,
    pub correct: u32,
    pub percentage: u32,
    pub median_elapsed_ms: u64,
    pub fastest_elapsed_ms: u64,
}

/// Aggregate of one calendar day of attempts for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Serialized as an ISO `YYYY-MM-DD` string.
    pub date: NaiveDate,
    pub total: u32,
    pub correct: u32,
    pub accuracy: u32,
    pub median_elapsed_ms: u64,
}
