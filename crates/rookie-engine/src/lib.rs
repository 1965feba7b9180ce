//! Search, evaluation and opening book for rookie.

pub mod book;
pub mod bot;
pub mod eval;
pub mod search;

pub use book::{BOOK_PLIES, OpeningBook};
pub use bot::{Bot, SearchBot};
pub use eval::config::{ConfigError, EvaluationConfig};
pub use eval::{MATE_SCORE, SCORE_SCALE, evaluate};
pub use search::{SearchConfig, SearchResult, Searcher};
