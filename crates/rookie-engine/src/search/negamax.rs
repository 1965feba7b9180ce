//! Fixed-depth negamax alpha-beta search.

use rookie_core::Position;

use crate::eval::config::EvaluationConfig;
use crate::eval::{MATE_SCORE, evaluate_with_status};
use crate::search::tt::{Bound, TranspositionTable};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 3 * MATE_SCORE;

/// Search state threaded through negamax calls.
pub(super) struct SearchContext<'a> {
    /// Total nodes visited.
    pub nodes: u64,
    pub tt: &'a mut TranspositionTable,
    pub config: &'a EvaluationConfig,
}

/// Negamax alpha-beta search.
///
/// Returns the value of `pos` for the side to move, searched `depth` plies
/// deep. Each ply maximises the negated values of its children, which is the
/// alternating max/min of minimax with every score kept relative to the side
/// to move. That is the same convention the evaluator and the table use.
pub(super) fn negamax<P: Position>(
    pos: &mut P,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    let key = pos.key();
    if let Some(entry) = ctx.tt.probe(&key, depth) {
        let cutoff = match entry.bound {
            Bound::Exact => true,
            Bound::LowerBound => entry.value >= beta,
            Bound::UpperBound => entry.value <= alpha,
        };
        if cutoff {
            return entry.value;
        }
    }

    let status = pos.status();
    if depth == 0 || status.is_over() {
        let value = evaluate_with_status(pos, status, ctx.config);
        ctx.tt.store(key, value, depth, Bound::Exact);
        return value;
    }

    let original_alpha = alpha;
    let mut best_score = -INF;

    for mv in pos.legal_moves() {
        let score = {
            let mut child = pos.play(&mv);
            -negamax(&mut *child, depth - 1, -beta, -alpha, ctx)
        };

        if score > best_score {
            best_score = score;
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            break;
        }
    }

    let bound = if best_score <= original_alpha {
        Bound::UpperBound
    } else if best_score >= beta {
        Bound::LowerBound
    } else {
        Bound::Exact
    };
    ctx.tt.store(key, best_score, depth, bound);

    best_score
}
