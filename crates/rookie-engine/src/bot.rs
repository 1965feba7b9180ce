//! Move-selecting players: the [`Bot`] trait and the book-plus-search bot.

use std::fmt::Debug;
use std::hash::Hash;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rookie_core::Position;
use tracing::debug;

use crate::book::OpeningBook;
use crate::eval::config::EvaluationConfig;
use crate::search::{SearchConfig, Searcher};

/// Anything that can pick a move for the side to move.
pub trait Bot<P: Position>: Debug {
    /// Pick a move, or `None` when the position has no legal move.
    ///
    /// `pos` is borrowed mutably for make/unmake during search and is left
    /// unchanged on return.
    fn select_move(&mut self, pos: &mut P) -> Option<P::Move>;
}

/// Opening book first, fixed-depth alpha-beta search on a miss.
#[derive(Debug, Clone)]
pub struct SearchBot<M> {
    config: EvaluationConfig,
    searcher: Searcher,
    book: OpeningBook<M>,
    rng: StdRng,
}

impl<M: Clone + Eq + Hash> SearchBot<M> {
    /// A bot with an empty opening book.
    pub fn new(config: EvaluationConfig, search: &SearchConfig, seed: u64) -> Self {
        Self::with_book(config, search, OpeningBook::new(), seed)
    }

    pub fn with_book(
        config: EvaluationConfig,
        search: &SearchConfig,
        book: OpeningBook<M>,
        seed: u64,
    ) -> Self {
        Self {
            config,
            searcher: Searcher::new(search),
            book,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn book(&self) -> &OpeningBook<M> {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut OpeningBook<M> {
        &mut self.book
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Replace the evaluation parameters wholesale.
    ///
    /// The opening book and transposition table are kept.
    pub fn promote(&mut self, config: &EvaluationConfig) {
        self.config = config.clone();
    }

    /// Choose among `legal_moves` for `pos`.
    ///
    /// A book move is only played if it is one of `legal_moves`; otherwise
    /// the search runs to the configured depth.
    pub fn choose_move<P>(&mut self, pos: &mut P, legal_moves: &[M]) -> Option<M>
    where
        P: Position<Move = M>,
    {
        if legal_moves.is_empty() {
            return None;
        }

        if let Some(mv) = self.book.lookup(&pos.key(), &mut self.rng) {
            if legal_moves.contains(&mv) {
                debug!(book_hit = true, "move chosen from opening book");
                return Some(mv);
            }
        }

        self.searcher
            .search(pos, legal_moves, &self.config)
            .best_move
    }
}

impl<P> Bot<P> for SearchBot<P::Move>
where
    P: Position,
{
    fn select_move(&mut self, pos: &mut P) -> Option<P::Move> {
        let legal = pos.legal_moves();
        self.choose_move(pos, &legal)
    }
}

#[cfg(test)]
mod tests {
    use rookie_core::{ChessMove, ChessPosition};

    use super::*;

    fn bot(depth: u8) -> SearchBot<ChessMove> {
        SearchBot::new(
            EvaluationConfig::default(),
            &SearchConfig { depth, tt_entries: 1 << 12 },
            7,
        )
    }

    #[test]
    fn no_legal_moves_returns_none() {
        let mut pos = ChessPosition::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(bot(2).select_move(&mut pos), None);
    }

    #[test]
    fn book_hit_skips_search() {
        let mut pos = ChessPosition::default();
        let mut bot = bot(2);
        let a3 = pos.parse_uci("a2a3").unwrap();
        bot.book_mut().insert(pos.key(), a3, 10);

        assert_eq!(bot.select_move(&mut pos), Some(a3));
        assert!(bot.searcher().tt().is_empty(), "search should not have run");
    }

    #[test]
    fn illegal_book_move_falls_back_to_search() {
        let mut pos = ChessPosition::default();
        let mut bot = bot(1);
        let e4 = pos.parse_uci("e2e4").unwrap();
        bot.book_mut().insert(pos.key(), e4, 10);

        let legal: Vec<ChessMove> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| *mv != e4)
            .collect();
        let chosen = bot.choose_move(&mut pos, &legal).unwrap();
        assert_ne!(chosen, e4);
        assert!(legal.contains(&chosen));
    }

    #[test]
    fn select_move_leaves_position_unchanged() {
        let mut pos = ChessPosition::default();
        let before = pos.clone();
        bot(2).select_move(&mut pos);
        assert_eq!(pos, before);
    }

    #[test]
    fn promote_replaces_config_only() {
        let mut pos = ChessPosition::default();
        let mut bot = bot(1);
        let e4 = pos.parse_uci("e2e4").unwrap();
        bot.book_mut().insert(pos.key(), e4, 10);

        let mut other = EvaluationConfig::default();
        other.set_material(rookie_core::PieceKind::Queen, 950);
        bot.promote(&other);

        assert_eq!(bot.config(), &other);
        assert_eq!(bot.book().len(), 1);
        assert_eq!(bot.select_move(&mut pos), Some(e4));
    }
}
