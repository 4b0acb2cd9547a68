use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::SeedableRng;
use solfege_data::Mode;
use tracing::debug;

use crate::config::TrainerConfig;
use crate::error::ConfigError;
use crate::gameplay::{GameEvent, OrdinanceEngine, QuizEngine, RelativeEngine};
use crate::input::events::AnswerInput;
use crate::input::InputQueue;
use crate::stats::SharedStats;
use crate::time::SharedClock;

/// One player session: both quiz modes sharing a single stats store, with
/// input routed to whichever mode is active.
pub struct Trainer {
    stats: SharedStats,
    relative: RelativeEngine,
    ordinance: OrdinanceEngine,
    active: Option<Mode>,
    input: InputQueue,
}

impl Trainer {
    pub fn new(
        stats: SharedStats,
        clock: SharedClock,
        events: Sender<GameEvent>,
        config: &TrainerConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            relative: RelativeEngine::new(stats.clone(), clock.clone(), events.clone(), config)?,
            ordinance: OrdinanceEngine::new(stats.clone(), clock, events, config),
            stats,
            active: None,
            input: InputQueue::new(),
        })
    }

    /// Makes question generation reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            relative: self.relative.with_rng(StdRng::seed_from_u64(seed)),
            ordinance: self
                .ordinance
                .with_rng(StdRng::seed_from_u64(seed.wrapping_add(1))),
            ..self
        }
    }

    pub fn stats(&self) -> &SharedStats {
        &self.stats
    }

    pub fn active_mode(&self) -> Option<Mode> {
        self.active
    }

    pub fn relative(&self) -> &RelativeEngine {
        &self.relative
    }

    pub fn relative_mut(&mut self) -> &mut RelativeEngine {
        &mut self.relative
    }

    pub fn ordinance(&self) -> &OrdinanceEngine {
        &self.ordinance
    }

    pub fn ordinance_mut(&mut self) -> &mut OrdinanceEngine {
        &mut self.ordinance
    }

    /// The handle the UI binds its answer buttons to.
    pub fn answer_input(&self) -> Sender<AnswerInput> {
        self.input.sender()
    }

    /// Queues an answer for the next `pump`.
    pub fn push_answer(&self, input: impl Into<AnswerInput>) {
        self.input.push(input.into());
    }

    /// Switches to `mode` and starts a fresh question there.
    pub fn select_mode(&mut self, mode: Mode) {
        if let Some(previous) = self.active {
            self.engine_mut(previous).suspend();
        }
        debug!(%mode, "mode selected");
        self.active = Some(mode);
        self.input.clear();
        self.engine_mut(mode).next_question();
    }

    /// Leaves the active mode; pending advances are cancelled.
    pub fn back_to_menu(&mut self) {
        if let Some(mode) = self.active.take() {
            self.engine_mut(mode).suspend();
        }
        self.input.clear();
    }

    /// Feeds queued answers to the active mode, then runs any due auto-advance.
    /// Returns the number of answers consumed.
    pub fn pump(&mut self) -> usize {
        let Some(mode) = self.active else {
            return self.input.clear();
        };

        let mut consumed = 0;
        while let Some(input) = self.input.pop() {
            self.engine_mut(mode).submit(input.degree);
            consumed += 1;
        }
        self.engine_mut(mode).update();
        consumed
    }

    fn engine_mut(&mut self, mode: Mode) -> &mut dyn QuizEngine {
        match mode {
            Mode::Relative => &mut self.relative,
            Mode::Ordinance => &mut self.ordinance,
        }
    }
}
