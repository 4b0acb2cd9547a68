pub mod clock;
pub mod timer;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use timer::{Stopwatch, Timer};
