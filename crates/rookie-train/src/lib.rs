//! Self-play training: games between an incumbent and a mutated challenger,
//! match statistics, promotion and persistence.

pub mod config;
pub mod error;
pub mod game;
pub mod persist;
pub mod stats;
pub mod trainer;

pub use config::TrainerConfig;
pub use error::TrainError;
pub use game::{GameRecord, GameRules, Termination, play_game};
pub use stats::{MatchStats, TrainingRecord};
pub use trainer::{CHALLENGER_COLOR, INCUMBENT_COLOR, SelfPlayTrainer};
