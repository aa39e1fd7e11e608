// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Settings;
use crate::controller::MovementStrategy;
use crate::scene::ControllerKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "maze-walker")]
#[command(about = "Walk a generated maze with a collision-aware first-person camera", long_about = None)]
pub struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible maze
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub rows: Option<usize>,

    #[arg(long)]
    pub cols: Option<usize>,

    /// How movement keys map to world directions
    #[arg(long, value_enum)]
    pub strategy: Option<MovementStrategy>,

    /// Controller active at startup (Tab switches at runtime)
    #[arg(long, value_enum, default_value_t = ControllerKind::Game)]
    pub controller: ControllerKind,

    /// Run the autopilot without opening a window
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Update budget for the headless run
    #[arg(long, default_value_t = 20_000)]
    pub frames: usize,
}

impl Cli {
    /// Settings from the config file (or defaults) with flag overrides applied
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(seed) = self.seed {
            settings.maze.seed = Some(seed);
        }
        if let Some(rows) = self.rows {
            settings.maze.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.maze.cols = cols;
        }
        if let Some(strategy) = self.strategy {
            settings.game.strategy = Some(strategy);
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["maze-walker"]).unwrap();
        assert!(!cli.headless);
        assert_eq!(cli.controller, ControllerKind::Game);
        assert_eq!(cli.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "maze-walker",
            "--seed",
            "7",
            "--rows",
            "21",
            "--strategy",
            "planar",
            "--controller",
            "trackball",
            "--headless",
        ])
        .unwrap();

        let settings = cli.settings().unwrap();
        assert_eq!(settings.maze.seed, Some(7));
        assert_eq!(settings.maze.rows, 21);
        assert_eq!(settings.maze.cols, 15);
        assert_eq!(settings.game.strategy, Some(MovementStrategy::Planar));
        assert_eq!(cli.controller, ControllerKind::Trackball);
        assert!(cli.headless);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::try_parse_from(["maze-walker", "--cols", "3"]).unwrap();
        assert!(cli.settings().is_err());
    }
}
