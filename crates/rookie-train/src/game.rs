//! A single self-play game with draw adjudication.

use std::collections::HashMap;

use rookie_core::{Color, GameStatus, Outcome, Position, PositionKey};
use rookie_engine::Bot;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Adjudication limits applied on top of the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Plies after which the game is drawn.
    pub max_plies: usize,
    /// Half-move clock value that draws the game.
    pub fifty_move_halfmoves: u32,
    /// Occurrence count of one position that draws the game.
    pub repetition_limit: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_plies: 200,
            fifty_move_halfmoves: 100,
            repetition_limit: 3,
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    /// A position occurred `repetition_limit` times.
    Repetition,
    /// The half-move clock reached its limit.
    FiftyMoves,
    /// The ply cap was reached.
    PlyLimit,
    /// A bot returned no move although the game was not over.
    NoMove,
}

/// A finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord<M> {
    pub outcome: Outcome,
    pub termination: Termination,
    /// Moves in the order they were played.
    pub moves: Vec<M>,
}

impl<M> GameRecord<M> {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Play one game from `start` until the rules engine or an adjudication
/// rule ends it.
///
/// The bot whose color is to move is asked for each move. Only checkmate is
/// decisive; every other ending is a draw.
pub fn play_game<P, W, B>(start: &P, white: &mut W, black: &mut B, rules: &GameRules) -> GameRecord<P::Move>
where
    P: Position + Clone,
    W: Bot<P> + ?Sized,
    B: Bot<P> + ?Sized,
{
    let mut pos = start.clone();
    let mut moves = Vec::new();
    let mut seen: HashMap<PositionKey, usize> = HashMap::new();

    let termination = loop {
        let occurrences = seen.entry(pos.key()).or_insert(0);
        *occurrences += 1;
        if *occurrences >= rules.repetition_limit {
            break Termination::Repetition;
        }

        match pos.status() {
            GameStatus::Checkmate => break Termination::Checkmate,
            GameStatus::Stalemate => break Termination::Stalemate,
            GameStatus::InsufficientMaterial => break Termination::InsufficientMaterial,
            GameStatus::Ongoing => {}
        }

        if pos.halfmove_clock() >= rules.fifty_move_halfmoves {
            break Termination::FiftyMoves;
        }
        if moves.len() >= rules.max_plies {
            break Termination::PlyLimit;
        }

        let choice = match pos.side_to_move() {
            Color::White => white.select_move(&mut pos),
            Color::Black => black.select_move(&mut pos),
        };
        let Some(mv) = choice else {
            break Termination::NoMove;
        };
        pos.make_move(&mv);
        moves.push(mv);
    };

    let outcome = match termination {
        Termination::Checkmate => Outcome::Win(!pos.side_to_move()),
        _ => Outcome::Draw,
    };

    debug!(?outcome, ?termination, plies = moves.len(), "game finished");

    GameRecord {
        outcome,
        termination,
        moves,
    }
}
