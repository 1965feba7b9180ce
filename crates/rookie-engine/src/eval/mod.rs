//! Static evaluation: material plus piece-square tables.

pub mod config;
pub mod material;
pub mod pst;

use rookie_core::{Color, GameStatus, Position};

use config::EvaluationConfig;

/// Score units per material point.
///
/// Scores and evaluation parameters are integers in thousandths of a point,
/// so fractional positional terms keep their resolution and mirrored
/// positions still sum to exactly negated totals.
pub const SCORE_SCALE: i32 = 1_000;

/// Magnitude of a checkmate score: 10000 points.
///
/// Non-mate evaluations are clamped strictly inside `±MATE_SCORE`, so a
/// mate always dominates any material or positional sum.
pub const MATE_SCORE: i32 = 10_000 * SCORE_SCALE;

/// Evaluate `pos` from the side to move's perspective, in score units.
///
/// Positive scores favour the side to move.
pub fn evaluate<P: Position>(pos: &P, config: &EvaluationConfig) -> i32 {
    evaluate_with_status(pos, pos.status(), config)
}

/// [`evaluate`] with the terminal status already known.
pub(crate) fn evaluate_with_status<P: Position>(
    pos: &P,
    status: GameStatus,
    config: &EvaluationConfig,
) -> i32 {
    let mover = pos.side_to_move();

    let white_score = match status {
        // The side to move is the one that got mated.
        GameStatus::Checkmate => (!mover).sign() * MATE_SCORE,
        GameStatus::Stalemate | GameStatus::InsufficientMaterial => return 0,
        GameStatus::Ongoing => placement(pos, config),
    };

    match mover {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}

/// Material and positional balance from White's perspective.
fn placement<P: Position>(pos: &P, config: &EvaluationConfig) -> i32 {
    let total: i64 = pos
        .pieces()
        .map(|(sq, piece)| i64::from(piece.color.sign() * config.piece_value(piece, sq)))
        .sum();
    let limit = i64::from(MATE_SCORE - 1);
    // In range after the clamp.
    total.clamp(-limit, limit) as i32
}
