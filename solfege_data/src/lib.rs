pub mod model;
pub mod profile;
pub mod result;

pub use model::{Degree, Direction, Mode, ParseDegreeError};
pub use profile::{DailyBucket, SummaryStats};
pub use result::{AttemptLog, AttemptRecord, TimestampMs};
