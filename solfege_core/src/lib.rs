pub mod chart;
pub mod config;
pub mod error;
pub mod gameplay;
pub mod input;
pub mod staff;
pub mod stats;
pub mod time;
pub mod trainer;

pub use config::TrainerConfig;
pub use error::{ConfigError, StatsError, StorageError};
pub use stats::{SharedStats, StatsStore, STORAGE_KEY};
pub use trainer::Trainer;
