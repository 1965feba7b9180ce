//! Errors raised when building positions or parsing moves.

/// Errors from the rules-engine adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The FEN string could not be parsed.
    #[error("invalid FEN \"{fen}\": {reason}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
        /// Parser message.
        reason: String,
    },

    /// The FEN parsed but does not describe a legal chess position.
    #[error("illegal position \"{fen}\": {reason}")]
    IllegalSetup {
        /// The offending FEN string.
        fen: String,
        /// Validation message.
        reason: String,
    },

    /// A move string is malformed or not legal in the current position.
    #[error("invalid move: {uci}")]
    InvalidMove {
        /// The UCI move string.
        uci: String,
    },
}
