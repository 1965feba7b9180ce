//! Errors from loading and saving training artifacts.

use std::path::PathBuf;

/// Errors from the persistence layer.
///
/// Training itself never fails: stalled games are adjudicated as draws.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A file did not contain the expected JSON document.
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        /// The file being parsed or written.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}
