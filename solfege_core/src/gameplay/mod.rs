pub mod events;
pub mod ordinance;
pub mod relative;

use solfege_data::{Degree, Mode};

pub use events::{GameEvent, Outcome, QuestionView, StaffNote};
pub use ordinance::{OrdinanceEngine, Sequence, SequenceStep};
pub use relative::{RelativeEngine, RelativeQuestion};

/// Common surface of the two quiz state machines, used by the trainer to
/// route input without caring which mode is active.
pub trait QuizEngine {
    fn mode(&self) -> Mode;

    /// Replaces the current question and cancels any pending auto-advance.
    fn next_question(&mut self);

    /// Feeds one player selection. Calls that make no sense in the current
    /// state are ignored.
    fn submit(&mut self, degree: Degree);

    /// Fires the auto-advance if it is due. Returns true if a new question was produced.
    fn update(&mut self) -> bool;

    /// Cancels pending work, e.g. when the player leaves the mode.
    fn suspend(&mut self);

    fn advance_pending(&self) -> bool;
}
