//! JSON persistence for the promoted configuration and the training log.

use std::fs;
use std::path::Path;

use rookie_engine::EvaluationConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TrainerConfig;
use crate::error::TrainError;
use crate::stats::TrainingRecord;

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TrainError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| TrainError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| TrainError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote JSON");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TrainError> {
    let text = fs::read_to_string(path).map_err(|source| TrainError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TrainError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Save material values and piece-square tables.
pub fn save_config(path: impl AsRef<Path>, config: &EvaluationConfig) -> Result<(), TrainError> {
    write_json(path.as_ref(), config)
}

/// Load a configuration written by [`save_config`].
///
/// Fails if any piece kind is missing or a table does not have 64 entries.
pub fn load_config(path: impl AsRef<Path>) -> Result<EvaluationConfig, TrainError> {
    read_json(path.as_ref())
}

pub fn save_records(path: impl AsRef<Path>, records: &[TrainingRecord]) -> Result<(), TrainError> {
    write_json(path.as_ref(), records)
}

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>, TrainError> {
    read_json(path.as_ref())
}

/// Load trainer settings; absent fields take their defaults.
pub fn load_trainer_config(path: impl AsRef<Path>) -> Result<TrainerConfig, TrainError> {
    read_json(path.as_ref())
}
