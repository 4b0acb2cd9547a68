use solfege_data::TimestampMs;

/// One-shot delayed task. Nothing runs on its own: the owner polls it with
/// the current time and acts when it reports that it fired.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    due_at: Option<TimestampMs>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer, replacing any earlier schedule.
    pub fn schedule(&mut self, now: TimestampMs, delay_ms: u64) {
        self.due_at = Some(now.saturating_add(delay_ms as i64));
    }

    pub fn cancel(&mut self) {
        self.due_at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn due_at(&self) -> Option<TimestampMs> {
        self.due_at
    }

    /// Returns true exactly once, on the first poll at or after the due time.
    pub fn fire_if_due(&mut self, now: TimestampMs) -> bool {
        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Measures how long the player took to answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stopwatch {
    started_at: Option<TimestampMs>,
}

impl Stopwatch {
    pub fn start(&mut self, now: TimestampMs) {
        self.started_at = Some(now);
    }

    /// Zero if never started or if the clock went backwards.
    pub fn elapsed_ms(&self, now: TimestampMs) -> u64 {
        match self.started_at {
            Some(start) if now > start => (now - start) as u64,
            _ => 0,
        }
    }
}
