use solfege_data::{Degree, Direction, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        self == Outcome::Correct
    }
}

/// A note drawn on the staff. `label: None` is drawn as "?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffNote {
    pub position: i32,
    pub label: Option<Degree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionView {
    Relative {
        reference: StaffNote,
        target: StaffNote,
    },
    Ordinance {
        total_len: usize,
        revealed: Vec<Degree>,
        direction: Direction,
    },
}

/// Everything an engine tells the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Instruction text lookup key plus `{name}` substitutions.
    Instruction {
        key: &'static str,
        params: Vec<(&'static str, String)>,
    },
    QuestionReady(QuestionView),
    AnswerFeedback {
        mode: Mode,
        outcome: Outcome,
        selected: Degree,
        /// The right answer when the mode reveals it.
        correct: Option<Degree>,
    },
    SequenceProgress {
        revealed: Vec<Degree>,
        total_len: usize,
        direction: Direction,
    },
}
