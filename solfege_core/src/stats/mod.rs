pub mod aggregate;
pub mod storage;

use std::sync::Arc;

use chrono::FixedOffset;
use parking_lot::Mutex;
use solfege_data::{AttemptLog, AttemptRecord, DailyBucket, Mode, SummaryStats};
use tracing::{debug, info, warn};

use crate::error::StatsError;
use crate::time::SharedClock;

use self::aggregate::DayZone;
use self::storage::Storage;

/// Versioned so a format change can move to a new key and leave the old blob behind.
pub const STORAGE_KEY: &str = "solfege_performance_v1";

pub const DEFAULT_HISTORY_DAYS: usize = 7;
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// The store both engines report into.
pub type SharedStats = Arc<Mutex<StatsStore>>;

/// Append-only attempt log with summary and per-day aggregation.
///
/// The in-memory log is authoritative. Persistence is best effort: a missing,
/// unreadable or malformed blob loads as an empty history and failed writes
/// are logged and otherwise ignored.
pub struct StatsStore {
    log: AttemptLog,
    storage: Box<dyn Storage>,
    clock: SharedClock,
    zone: DayZone,
}

impl StatsStore {
    /// Loads the persisted log. Day buckets follow device-local time.
    pub fn open(storage: Box<dyn Storage>, clock: SharedClock) -> Self {
        let log = match load_log(storage.as_ref()) {
            Ok(log) => log,
            Err(e) => {
                warn!("starting with empty history: {e}");
                AttemptLog::new()
            }
        };
        debug!(entries = log.len(), "history loaded");

        Self {
            log,
            storage,
            clock,
            zone: DayZone::Local,
        }
    }

    /// Assigns attempts to calendar days in a fixed offset instead of local time.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.zone = DayZone::Fixed(offset);
        self
    }

    pub fn into_shared(self) -> SharedStats {
        Arc::new(Mutex::new(self))
    }

    pub fn day_zone(&self) -> DayZone {
        self.zone
    }

    pub fn log(&self) -> &[AttemptRecord] {
        &self.log
    }

    pub fn record_result(&mut self, mode: Mode, correct: bool, elapsed_ms: u64) {
        let record = AttemptRecord {
            timestamp: self.clock.now_ms(),
            mode,
            correct,
            elapsed_ms,
        };
        debug!(%mode, correct, elapsed_ms, "recording attempt");
        self.log.push(record);
        self.persist();
    }

    pub fn summary(&self, mode: Mode) -> SummaryStats {
        aggregate::summarize(self.entries(mode))
    }

    pub fn daily_buckets(&self, mode: Mode, days: usize) -> Vec<DailyBucket> {
        aggregate::daily_buckets(self.entries(mode), &self.zone, days)
    }

    /// The last `limit` attempts for the mode, oldest first.
    pub fn recent_history(&self, mode: Mode, limit: usize) -> Vec<AttemptRecord> {
        let entries: Vec<AttemptRecord> = self.entries(mode).copied().collect();
        let skip = entries.len().saturating_sub(limit);
        entries.into_iter().skip(skip).collect()
    }

    /// Clears every mode's history.
    pub fn reset(&mut self) {
        info!(cleared = self.log.len(), "resetting history");
        self.log.clear();
        self.persist();
    }

    fn entries(&self, mode: Mode) -> impl Iterator<Item = &AttemptRecord> {
        self.log.iter().filter(move |r| r.mode == mode)
    }

    fn persist(&self) {
        if let Err(e) = save_log(self.storage.as_ref(), &self.log) {
            warn!("history kept in memory only: {e}");
        }
    }
}

fn load_log(storage: &dyn Storage) -> Result<AttemptLog, StatsError> {
    let stored = storage
        .load(STORAGE_KEY)
        .map_err(StatsError::PersistenceUnavailable)?;
    match stored {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(AttemptLog::new()),
    }
}

fn save_log(storage: &dyn Storage, log: &AttemptLog) -> Result<(), StatsError> {
    let json = serde_json::to_string(log)?;
    storage
        .save(STORAGE_KEY, &json)
        .map_err(StatsError::PersistenceWriteFailure)
}
