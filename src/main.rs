use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use torus_snake::game::GameConfig;
use torus_snake::logging;
use torus_snake::modes::HumanMode;
use tracing::info;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around board, in the terminal")]
struct Cli {
    /// YAML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds per game step (overrides the config file)
    #[arg(long)]
    step_ms: Option<u64>,

    /// Seed for food placement (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file values, then command line overrides
    fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(step_ms) = self.step_ms {
            config.step_interval_ms = step_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.into_config()?;

    logging::init(config.log_file.as_deref())?;
    info!(
        step_interval_ms = config.step_interval_ms,
        frame_interval_ms = config.frame_interval_ms,
        seed = ?config.seed,
        "Starting game"
    );

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::try_parse_from(["torus_snake"]).unwrap();
        assert_eq!(cli.into_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from(["torus_snake", "--step-ms", "60", "--seed", "5"]).unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.step_interval_ms, 60);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_zero_step_is_rejected() {
        let cli = Cli::try_parse_from(["torus_snake", "--step-ms", "0"]).unwrap();
        assert!(cli.into_config().is_err());
    }
}
