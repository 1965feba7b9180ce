//! Trainer settings.

use rookie_engine::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::game::GameRules;

/// Settings for a self-play training session.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Number of mutate/play/promote cycles.
    pub iterations: usize,
    /// Games played between incumbent and challenger per iteration.
    pub games_per_iteration: usize,
    /// Search settings shared by both bots.
    pub search: SearchConfig,
    /// Hard cap on plies per game.
    pub max_plies: usize,
    /// Half-move clock value at which a game is drawn.
    pub fifty_move_halfmoves: u32,
    /// Occurrences of one position that draw the game.
    pub repetition_limit: usize,
    /// Relative mutation range for each parameter.
    pub jitter: f64,
    /// Seed for a reproducible session; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl TrainerConfig {
    /// Game adjudication limits.
    pub fn rules(&self) -> GameRules {
        GameRules {
            max_plies: self.max_plies,
            fifty_move_halfmoves: self.fifty_move_halfmoves,
            repetition_limit: self.repetition_limit,
        }
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        let rules = GameRules::default();
        Self {
            iterations: 10,
            games_per_iteration: 10,
            search: SearchConfig::default(),
            max_plies: rules.max_plies,
            fifty_move_halfmoves: rules.fifty_move_halfmoves,
            repetition_limit: rules.repetition_limit,
            jitter: 0.05,
            seed: None,
        }
    }
}
