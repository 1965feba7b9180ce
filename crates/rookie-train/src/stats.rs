//! Match statistics and the per-iteration training log row.

use rookie_core::{Color, Outcome};
use serde::{Deserialize, Serialize};

/// Results of one incumbent-versus-challenger match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub games: u32,
    pub incumbent_wins: u32,
    pub challenger_wins: u32,
    pub draws: u32,
}

impl MatchStats {
    /// Count one finished game; `incumbent` is the color the incumbent played.
    pub fn record(&mut self, outcome: Outcome, incumbent: Color) {
        self.games += 1;
        match outcome {
            Outcome::Win(winner) if winner == incumbent => self.incumbent_wins += 1,
            Outcome::Win(_) => self.challenger_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    fn rate(&self, count: u32) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.games)
        }
    }

    pub fn incumbent_win_rate(&self) -> f64 {
        self.rate(self.incumbent_wins)
    }

    pub fn challenger_win_rate(&self) -> f64 {
        self.rate(self.challenger_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Whether the challenger won strictly more often than the incumbent.
    pub fn challenger_is_better(&self) -> bool {
        self.challenger_win_rate() > self.incumbent_win_rate()
    }
}

/// One row of the training log. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Zero-based iteration index.
    pub iteration: usize,
    pub stats: MatchStats,
    pub incumbent_win_rate: f64,
    pub challenger_win_rate: f64,
    pub draw_rate: f64,
    /// Whether the challenger's parameters replaced the incumbent's.
    pub promoted: bool,
}

impl TrainingRecord {
    pub fn new(iteration: usize, stats: MatchStats, promoted: bool) -> Self {
        Self {
            iteration,
            stats,
            incumbent_win_rate: stats.incumbent_win_rate(),
            challenger_win_rate: stats.challenger_win_rate(),
            draw_rate: stats.draw_rate(),
            promoted,
        }
    }
}
