use std::path::PathBuf;

use anyhow::{Context, Result};
use rookie_core::ChessPosition;
use rookie_train::persist::{load_trainer_config, save_config, save_records};
use rookie_train::{SelfPlayTrainer, TrainerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Usage: `rookie [trainer-config.json] [output-dir]`
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args_os().skip(1);
    let config = match args.next() {
        Some(path) => {
            let path = PathBuf::from(path);
            load_trainer_config(&path)
                .with_context(|| format!("loading trainer config from {}", path.display()))?
        }
        None => TrainerConfig::default(),
    };
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    info!(
        iterations = config.iterations,
        games = config.games_per_iteration,
        depth = config.search.depth,
        "rookie training session starting"
    );

    let mut trainer = SelfPlayTrainer::new(config, ChessPosition::default());
    let records = trainer.run();
    let promotions = records.iter().filter(|r| r.promoted).count();

    let config_path = out_dir.join("best_config.json");
    let log_path = out_dir.join("training_log.json");
    save_config(&config_path, trainer.incumbent().config()).context("saving best configuration")?;
    save_records(&log_path, trainer.records()).context("saving training log")?;

    info!(
        promotions,
        config = %config_path.display(),
        log = %log_path.display(),
        "training session finished"
    );
    Ok(())
}
