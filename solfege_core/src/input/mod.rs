pub mod events;

use self::events::AnswerInput;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Carries answer selections from the presentation layer to the active engine.
pub struct InputQueue {
    sender: Sender<AnswerInput>,
    receiver: Receiver<AnswerInput>,
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn push(&self, input: AnswerInput) {
        let _ = self.sender.send(input);
    }

    /// Non-blocking. Returns None if queue is empty.
    pub fn pop(&self) -> Option<AnswerInput> {
        self.receiver.try_recv().ok()
    }

    /// The handle a UI binds its answer buttons to.
    pub fn sender(&self) -> Sender<AnswerInput> {
        self.sender.clone()
    }

    /// Drops anything queued, e.g. clicks that arrived while no mode was active.
    pub fn clear(&self) -> usize {
        self.receiver.try_iter().count()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
