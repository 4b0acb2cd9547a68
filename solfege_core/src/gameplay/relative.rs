use std::ops::RangeInclusive;

use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use solfege_data::{Degree, Mode};
use tracing::debug;

use crate::config::TrainerConfig;
use crate::error::ConfigError;
use crate::gameplay::events::{GameEvent, Outcome, QuestionView, StaffNote};
use crate::gameplay::QuizEngine;
use crate::stats::SharedStats;
use crate::time::{SharedClock, Stopwatch, Timer};

/// Staff steps between reference and target. Never zero.
pub const INTERVALS: [i32; 8] = [-4, -3, -2, -1, 1, 2, 3, 4];

pub const INSTRUCTION_KEY: &str = "instruction_relative";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeQuestion {
    pub reference: Degree,
    pub reference_position: i32,
    pub target: Degree,
    pub target_position: i32,
    pub answered: bool,
}

impl RelativeQuestion {
    pub fn from_interval(reference: Degree, reference_position: i32, interval: i32) -> Self {
        Self {
            reference,
            reference_position,
            target: reference.offset(interval),
            target_position: reference_position + interval,
            answered: false,
        }
    }

    pub fn generate<R: Rng>(rng: &mut R, staff: &RangeInclusive<i32>) -> Self {
        let reference = Degree::from_index(rng.random_range(0..7));
        let position = rng.random_range(staff.clone());
        let interval = INTERVALS[rng.random_range(0..INTERVALS.len())];
        Self::from_interval(reference, position, interval)
    }

    pub fn interval(&self) -> i32 {
        self.target_position - self.reference_position
    }

    /// What the player sees; the target label stays hidden until answered.
    pub fn view(&self, reveal_target: bool) -> QuestionView {
        QuestionView::Relative {
            reference: StaffNote {
                position: self.reference_position,
                label: Some(self.reference),
            },
            target: StaffNote {
                position: self.target_position,
                label: reveal_target.then_some(self.target),
            },
        }
    }
}

/// Pitch-naming quiz: one reference note is labelled and the player names the other.
/// Every answer, right or wrong, ends the question.
pub struct RelativeEngine {
    stats: SharedStats,
    clock: SharedClock,
    events: Sender<GameEvent>,
    rng: StdRng,
    staff_range: RangeInclusive<i32>,
    advance_delay_ms: u64,
    current: Option<RelativeQuestion>,
    stopwatch: Stopwatch,
    advance: Timer,
}

impl RelativeEngine {
    /// Fails if `config` has an empty staff range.
    pub fn new(
        stats: SharedStats,
        clock: SharedClock,
        events: Sender<GameEvent>,
        config: &TrainerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            stats,
            clock,
            events,
            rng: StdRng::from_os_rng(),
            staff_range: config.staff_range(),
            advance_delay_ms: config.relative_advance_ms,
            current: None,
            stopwatch: Stopwatch::default(),
            advance: Timer::new(),
        })
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn current(&self) -> Option<&RelativeQuestion> {
        self.current.as_ref()
    }

    pub fn next_question(&mut self) {
        let question = RelativeQuestion::generate(&mut self.rng, &self.staff_range);
        self.present(question);
    }

    /// Shows a specific question, replacing the current one.
    pub fn present(&mut self, question: RelativeQuestion) {
        self.advance.cancel();
        let question = RelativeQuestion {
            answered: false,
            ..question
        };
        debug!(
            reference = %question.reference,
            position = question.reference_position,
            interval = question.interval(),
            "relative question"
        );

        self.emit(GameEvent::Instruction {
            key: INSTRUCTION_KEY,
            params: vec![("ref", question.reference.to_string())],
        });
        self.emit(GameEvent::QuestionReady(question.view(false)));

        self.current = Some(question);
        self.stopwatch.start(self.clock.now_ms());
    }

    /// Judges the answer to the current question. Returns None when there is
    /// nothing to answer, including a second answer to the same question.
    pub fn check_answer(&mut self, selected: Degree) -> Option<Outcome> {
        let question = self.current.as_mut()?;
        if question.answered {
            return None;
        }
        question.answered = true;
        let target = question.target;

        let now = self.clock.now_ms();
        let elapsed_ms = self.stopwatch.elapsed_ms(now);
        let outcome = Outcome::from_correct(selected == target);

        self.stats
            .lock()
            .record_result(Mode::Relative, outcome.is_correct(), elapsed_ms);

        self.emit(GameEvent::AnswerFeedback {
            mode: Mode::Relative,
            outcome,
            selected,
            correct: Some(target),
        });

        self.advance.schedule(now, self.advance_delay_ms);
        Some(outcome)
    }

    fn emit(&self, event: GameEvent) {
        let _ = self.events.send(event);
    }
}

impl QuizEngine for RelativeEngine {
    fn mode(&self) -> Mode {
        Mode::Relative
    }

    fn next_question(&mut self) {
        RelativeEngine::next_question(self);
    }

    fn submit(&mut self, degree: Degree) {
        self.check_answer(degree);
    }

    fn update(&mut self) -> bool {
        if self.advance.fire_if_due(self.clock.now_ms()) {
            RelativeEngine::next_question(self);
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
