//! The mutate / play / analyze / promote / record loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rookie_core::{Color, Position};
use rookie_engine::{EvaluationConfig, SearchBot};
use tracing::{debug, info};

use crate::config::TrainerConfig;
use crate::game::play_game;
use crate::stats::{MatchStats, TrainingRecord};

/// The incumbent plays White in every game of a match.
pub const INCUMBENT_COLOR: Color = Color::White;
/// The challenger plays Black in every game of a match.
pub const CHALLENGER_COLOR: Color = Color::Black;

/// Self-play trainer owning the incumbent bot and the training log.
///
/// The incumbent keeps its opening book and transposition table for the
/// whole session. Each iteration's challenger starts from a mutated copy of
/// the incumbent's parameters, a copy of its book and an empty table.
#[derive(Debug)]
pub struct SelfPlayTrainer<P: Position> {
    config: TrainerConfig,
    start: P,
    incumbent: SearchBot<P::Move>,
    records: Vec<TrainingRecord>,
    rng: StdRng,
}

impl<P: Position + Clone> SelfPlayTrainer<P> {
    /// A trainer whose incumbent starts from the default evaluation.
    pub fn new(config: TrainerConfig, start: P) -> Self {
        Self::with_evaluation(config, start, EvaluationConfig::default())
    }

    /// A trainer whose incumbent starts from `evaluation`.
    pub fn with_evaluation(config: TrainerConfig, start: P, evaluation: EvaluationConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let incumbent = SearchBot::new(evaluation, &config.search, rng.random());
        Self {
            config,
            start,
            incumbent,
            records: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn incumbent(&self) -> &SearchBot<P::Move> {
        &self.incumbent
    }

    /// Completed iterations, oldest first.
    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    /// Run one full iteration and return its log row.
    pub fn run_iteration(&mut self) -> &TrainingRecord {
        let iteration = self.records.len();

        let mutated = self
            .incumbent
            .config()
            .mutated(&mut self.rng, self.config.jitter);
        let mut challenger = SearchBot::with_book(
            mutated,
            &self.config.search,
            self.incumbent.book().clone(),
            self.rng.random(),
        );

        let stats = self.play_match(iteration, &mut challenger);
        self.conclude(iteration, stats, &challenger)
    }

    /// Play the iteration's games, incumbent as White, and reinforce the
    /// incumbent's book after each one.
    fn play_match(&mut self, iteration: usize, challenger: &mut SearchBot<P::Move>) -> MatchStats {
        let rules = self.config.rules();
        let mut stats = MatchStats::default();
        for game in 0..self.config.games_per_iteration {
            let record = play_game(&self.start, &mut self.incumbent, challenger, &rules);
            stats.record(record.outcome, INCUMBENT_COLOR);
            self.incumbent.book_mut().update(
                self.start.clone(),
                &record.moves,
                record.outcome,
                INCUMBENT_COLOR,
            );
            debug!(
                iteration,
                game,
                outcome = ?record.outcome,
                termination = ?record.termination,
                plies = record.plies(),
                "training game finished"
            );
        }
        stats
    }

    /// Promote the challenger's parameters if it won strictly more often,
    /// then append the log row.
    fn conclude(
        &mut self,
        iteration: usize,
        stats: MatchStats,
        challenger: &SearchBot<P::Move>,
    ) -> &TrainingRecord {
        let promoted = stats.challenger_is_better();
        if promoted {
            self.incumbent.promote(challenger.config());
            info!(
                iteration,
                challenger_wins = stats.challenger_wins,
                incumbent_wins = stats.incumbent_wins,
                "challenger promoted"
            );
        }

        let record = TrainingRecord::new(iteration, stats, promoted);
        info!(
            iteration,
            incumbent_win_rate = record.incumbent_win_rate,
            challenger_win_rate = record.challenger_win_rate,
            draw_rate = record.draw_rate,
            promoted,
            "iteration complete"
        );
        self.records.push(record);
        &self.records[iteration]
    }

    /// Run the configured number of iterations.
    pub fn run(&mut self) -> &[TrainingRecord] {
        for _ in 0..self.config.iterations {
            self.run_iteration();
        }
        &self.records
    }
}
