use solfege_data::Degree;

/// A single selection made by the player on the answer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerInput {
    pub degree: Degree,
}

impl From<Degree> for AnswerInput {
    fn from(degree: Degree) -> Self {
        Self { degree }
    }
}
