use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use solfege_data::{AttemptRecord, DailyBucket, SummaryStats, TimestampMs};

/// Median of an ascending slice; even lengths average the middle pair, rounding half up.
pub fn median_ms(sorted: &[u64]) -> u64 {
    let n = sorted.len();
    match n {
        0 => 0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => {
            let (a, b) = (sorted[n / 2 - 1], sorted[n / 2]);
            a / 2 + b / 2 + (a % 2 + b % 2 + 1) / 2
        }
    }
}

/// `part / total * 100` rounded half up, 0 when there is nothing to divide.
pub fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (part as u64, total as u64);
    ((part * 200 + total) / (2 * total)) as u32
}

pub fn summarize<'a>(records: impl IntoIterator<Item = &'a AttemptRecord>) -> SummaryStats {
    let mut total = 0;
    let mut correct = 0;
    let mut times = Vec::new();

    for record in records {
        total += 1;
        if record.correct {
            correct += 1;
        }
        if record.is_timed_success() {
            times.push(record.elapsed_ms);
        }
    }
    times.sort_unstable();

    SummaryStats {
        total,
        correct,
        percentage: percentage(correct, total),
        median_elapsed_ms: median_ms(&times),
        fastest_elapsed_ms: times.first().copied().unwrap_or(0),
    }
}

/// Calendar date of a timestamp in the given zone. Each day covers [00:00, 24:00).
pub fn local_date<Tz: TimeZone>(timestamp: TimestampMs, zone: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp).map(|utc| utc.with_timezone(zone).date_naive())
}

/// Zone used to assign attempts to calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayZone {
    /// Device-local time, using the offset in force at each attempt.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DayZone {
    pub fn date_of(&self, timestamp: TimestampMs) -> Option<NaiveDate> {
        match self {
            DayZone::Local => local_date(timestamp, &Local),
            DayZone::Fixed(offset) => local_date(timestamp, offset),
        }
    }
}

#[derive(Default)]
struct DayTally {
    total: u32,
    correct: u32,
    times: Vec<u64>,
}

/// Groups records per day and keeps the `days` most recent dates, oldest first.
pub fn daily_buckets<'a>(
    records: impl IntoIterator<Item = &'a AttemptRecord>,
    zone: &DayZone,
    days: usize,
) -> Vec<DailyBucket> {
    let mut by_date: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();

    for record in records {
        let Some(date) = zone.date_of(record.timestamp) else {
            continue;
        };
        let tally = by_date.entry(date).or_default();
        tally.total += 1;
        if record.correct {
            tally.correct += 1;
        }
        if record.is_timed_success() {
            tally.times.push(record.elapsed_ms);
        }
    }

    let skip = by_date.len().saturating_sub(days);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, mut tally)| {
            tally.times.sort_unstable();
            DailyBucket {
                date,
                total: tally.total,
                correct: tally.correct,
                accuracy: percentage(tally.correct, tally.total),
                median_elapsed_ms: median_ms(&tally.times),
            }
        })
        .collect()
}
