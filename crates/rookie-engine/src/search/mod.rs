//! Root move selection on top of negamax and the transposition table.

pub mod negamax;
pub mod tt;

use rookie_core::Position;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::eval::config::EvaluationConfig;
use crate::eval::evaluate;
use negamax::{INF, SearchContext, negamax};
use tt::TranspositionTable;

/// Search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fixed search depth in plies.
    pub depth: u8,
    /// Transposition table capacity in entries (rounded up to a power of two).
    pub tt_entries: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            tt_entries: 1 << 16,
        }
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Best root move, or `None` when there were no legal moves.
    pub best_move: Option<M>,
    /// Score of `best_move` for the side to move. With no legal moves this
    /// is the static evaluation of the position itself.
    pub score: i32,
    /// Total nodes visited below the root.
    pub nodes: u64,
    /// Depth searched.
    pub depth: u8,
}

/// Fixed-depth alpha-beta searcher owning a persistent transposition table.
#[derive(Debug, Clone)]
pub struct Searcher {
    tt: TranspositionTable,
    depth: u8,
}

impl Searcher {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.tt_entries),
            depth: config.depth,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Clear the transposition table (preserving the allocation).
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Pick the best of `legal_moves` in `pos`.
    ///
    /// Every root move is searched with the full lower bound raised as better
    /// moves are found; there is no cutoff at the root. Ties keep the earliest
    /// move in `legal_moves` order. `pos` is restored before returning.
    pub fn search<P: Position>(
        &mut self,
        pos: &mut P,
        legal_moves: &[P::Move],
        config: &EvaluationConfig,
    ) -> SearchResult<P::Move> {
        self.tt.new_generation();

        if legal_moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: evaluate(pos, config),
                nodes: 0,
                depth: self.depth,
            };
        }

        let mut ctx = SearchContext {
            nodes: 0,
            tt: &mut self.tt,
            config,
        };

        let child_depth = self.depth.saturating_sub(1);
        let mut best_move = None;
        let mut best_score = -INF;
        let mut alpha = -INF;
        let beta = INF;

        for mv in legal_moves {
            let score = {
                let mut child = pos.play(mv);
                -negamax(&mut *child, child_depth, -beta, -alpha, &mut ctx)
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv.clone());
            }
            alpha = alpha.max(best_score);
        }

        debug!(
            depth = self.depth,
            nodes = ctx.nodes,
            score = best_score,
            tt_len = ctx.tt.len(),
            "search finished"
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes: ctx.nodes,
            depth: self.depth,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
