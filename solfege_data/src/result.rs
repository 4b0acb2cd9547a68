use serde::{Deserialize, Serialize};

use crate::model::Mode;

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// A single answered question. Field names match the persisted JSON blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub timestamp: TimestampMs,
    pub mode: Mode,
    pub correct: bool,
    #[serde(rename = "timeMs", default)]
    pub elapsed_ms: u64,
}

impl AttemptRecord {
    /// Only correct answers with a measured time count towards timing stats.
    pub fn is_timed_success(&self) -> bool {
        self.correct && self.elapsed_ms > 0
    }
}

/// Chronological, append-only list of attempts. This is the whole persisted state.
pub type AttemptLog = Vec<AttemptRecord>;
