use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use solfege_data::{Degree, Direction, Mode};
use tracing::debug;

use crate::config::TrainerConfig;
use crate::gameplay::events::{GameEvent, Outcome, QuestionView};
use crate::gameplay::QuizEngine;
use crate::stats::SharedStats;
use crate::time::{SharedClock, Stopwatch, Timer};

pub const MIN_LEN: usize = 2;
pub const MAX_LEN: usize = 5;

pub const INSTRUCTION_ASC_KEY: &str = "instruction_ordinance_asc";
pub const INSTRUCTION_DESC_KEY: &str = "instruction_ordinance_desc";

/// A run of consecutive degrees. The first note is always given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub target: Vec<Degree>,
    pub revealed: Vec<Degree>,
    pub direction: Direction,
}

impl Sequence {
    /// `len` is clamped to 2..=5.
    pub fn new(start: Degree, direction: Direction, len: usize) -> Self {
        let len = len.clamp(MIN_LEN, MAX_LEN);
        let target = (0..len as i32)
            .map(|i| start.offset(i * direction.step()))
            .collect();
        Self {
            target,
            revealed: vec![start],
            direction,
        }
    }

    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let start = Degree::from_index(rng.random_range(0..7));
        let direction = if rng.random_bool(0.5) {
            Direction::Ascending
        } else {
            Direction::Descending
        };
        let len = rng.random_range(MIN_LEN..=MAX_LEN);
        Self::new(start, direction, len)
    }

    pub fn start(&self) -> Degree {
        self.target[0]
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// The degree for the next open slot, if any.
    pub fn expected(&self) -> Option<Degree> {
        self.target.get(self.revealed.len()).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed.len() >= self.target.len()
    }

    fn view(&self) -> QuestionView {
        QuestionView::Ordinance {
            total_len: self.target.len(),
            revealed: self.revealed.clone(),
            direction: self.direction,
        }
    }
}

/// Result of one input against the current sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    /// Right note, more slots to fill.
    Progress,
    /// Right note and the sequence is full.
    Complete,
    /// Wrong note; the slot stays open.
    Mistake,
}

/// Sequence quiz: the player fills the remaining slots one note at a time.
/// Mistakes are recorded but leave the sequence in place for another try.
pub struct OrdinanceEngine {
    stats: SharedStats,
    clock: SharedClock,
    events: Sender<GameEvent>,
    rng: StdRng,
    advance_delay_ms: u64,
    current: Option<Sequence>,
    stopwatch: Stopwatch,
    advance: Timer,
}

impl OrdinanceEngine {
    pub fn new(
        stats: SharedStats,
        clock: SharedClock,
        events: Sender<GameEvent>,
        config: &TrainerConfig,
    ) -> Self {
        Self {
            stats,
            clock,
            events,
            rng: StdRng::from_os_rng(),
            advance_delay_ms: config.ordinance_advance_ms,
            current: None,
            stopwatch: Stopwatch::default(),
            advance: Timer::new(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn current(&self) -> Option<&Sequence> {
        self.current.as_ref()
    }

    pub fn next_question(&mut self) {
        let sequence = Sequence::generate(&mut self.rng);
        self.present(sequence);
    }

    pub fn present(&mut self, sequence: Sequence) {
        self.advance.cancel();
        debug!(
            start = %sequence.start(),
            direction = ?sequence.direction,
            len = sequence.len(),
            "ordinance sequence"
        );

        let key = match sequence.direction {
            Direction::Ascending => INSTRUCTION_ASC_KEY,
            Direction::Descending => INSTRUCTION_DESC_KEY,
        };
        self.emit(GameEvent::Instruction {
            key,
            params: Vec::new(),
        });
        self.emit(GameEvent::QuestionReady(sequence.view()));

        self.current = Some(sequence);
        self.stopwatch.start(self.clock.now_ms());
    }

    /// Returns None when there is no open slot to fill.
    pub fn handle_input(&mut self, selected: Degree) -> Option<SequenceStep> {
        let sequence = self.current.as_mut()?;
        let expected = sequence.expected()?;

        if selected != expected {
            self.stats.lock().record_result(Mode::Ordinance, false, 0);
            self.emit(GameEvent::AnswerFeedback {
                mode: Mode::Ordinance,
                outcome: Outcome::Incorrect,
                selected,
                correct: None,
            });
            return Some(SequenceStep::Mistake);
        }

        sequence.revealed.push(selected);
        let progress = GameEvent::SequenceProgress {
            revealed: sequence.revealed.clone(),
            total_len: sequence.target.len(),
            direction: sequence.direction,
        };
        let complete = sequence.is_complete();
        self.emit(progress);

        if !complete {
            return Some(SequenceStep::Progress);
        }

        let now = self.clock.now_ms();
        let elapsed_ms = self.stopwatch.elapsed_ms(now);
        self.stats
            .lock()
            .record_result(Mode::Ordinance, true, elapsed_ms);
        self.emit(GameEvent::AnswerFeedback {
            mode: Mode::Ordinance,
            outcome: Outcome::Correct,
            selected,
            correct: Some(selected),
        });

        self.advance.schedule(now, self.advance_delay_ms);
        Some(SequenceStep::Complete)
    }

    fn emit(&self, event: GameEvent) {
        let _ = self.events.send(event);
    }
}

impl QuizEngine for OrdinanceEngine {
    fn mode(&self) -> Mode {
        Mode::Ordinance
    }

    fn next_question(&mut self) {
        OrdinanceEngine::next_question(self);
    }

    fn submit(&mut self, degree: Degree) {
        self.handle_input(degree);
    }

    fn update(&mut self) -> bool {
        if self.advance.fire_if_due(self.clock.now_ms()) {
            OrdinanceEngine::next_question(self);
            true
        } else {
            false
        }
    }

    fn suspend(&mut self) {
        self.advance.cancel();
    }

    fn advance_pending(&self) -> bool {
        self.advance.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_sequence_wraps_below_do() {
        let seq = Sequence::new(Degree::Re, Direction::Descending, 4);
        assert_eq!(seq.target, vec![Degree::Re, Degree::Do, Degree::Si, Degree::La]);
        assert_eq!(seq.revealed, vec![Degree::Re]);
        assert_eq!(seq.expected(), Some(Degree::Do));
    }

    #[test]
    fn length_is_clamped() {
        assert_eq!(Sequence::new(Degree::Do, Direction::Ascending, 1).len(), MIN_LEN);
        assert_eq!(Sequence::new(Degree::Do, Direction::Ascending, 9).len(), MAX_LEN);
    }
}
