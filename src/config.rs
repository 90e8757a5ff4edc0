use crate::engine::EngineConfig;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Daily MLB run line predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "mlb-spread-predictor", version, about)]
pub struct PredictorConfig {
    /// Seed for synthetic data, the train/test split and the forest
    #[arg(long, env = "PREDICTOR_SEED", default_value = "42")]
    pub seed: u64,

    /// Number of synthetic games to train on
    #[arg(long, env = "TRAINING_SAMPLES", default_value = "1000")]
    pub samples: usize,

    /// Trees in the random forest
    #[arg(long, env = "FOREST_TREES", default_value = "100")]
    pub trees: usize,

    /// Ensemble weight of the random forest; the SVM gets the rest
    #[arg(long, env = "FOREST_WEIGHT", default_value = "0.6")]
    pub forest_weight: f64,

    /// Minimum confidence (%) a game needs when not showing all games
    #[arg(long, env = "MIN_CONFIDENCE", default_value = "60")]
    pub min_confidence: f64,

    /// Show every game regardless of confidence
    #[arg(long, env = "SHOW_ALL", default_value_t = true, action = ArgAction::Set)]
    pub show_all: bool,

    /// JSON schedule to use instead of the built-in slate (needs --stats-file)
    #[arg(long, env = "GAMES_FILE", requires = "stats_file")]
    pub games_file: Option<PathBuf>,

    /// JSON team catalog to use instead of the built-in one (needs --games-file)
    #[arg(long, env = "STATS_FILE", requires = "games_file")]
    pub stats_file: Option<PathBuf>,

    /// Write the ranked predictions to this CSV file
    #[arg(long, env = "SAVE_CSV")]
    pub csv: Option<PathBuf>,

    /// Write the full dashboard to this JSON file
    #[arg(long, env = "SAVE_JSON")]
    pub json: Option<PathBuf>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            samples: 1000,
            trees: 100,
            forest_weight: 0.6,
            min_confidence: 60.0,
            show_all: true,
            games_file: None,
            stats_file: None,
            csv: None,
            json: None,
        }
    }
}

impl PredictorConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(50.0..=80.0).contains(&self.min_confidence) {
            anyhow::bail!("min_confidence must be between 50 and 80");
        }
        if !(0.0..=1.0).contains(&self.forest_weight) {
            anyhow::bail!("forest_weight must be between 0.0 and 1.0");
        }
        if self.samples < 10 {
            anyhow::bail!("samples must be at least 10");
        }
        if self.trees == 0 {
            anyhow::bail!("trees must be at least 1");
        }
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            n_samples: self.samples,
            seed: self.seed,
            n_trees: self.trees,
            forest_weight: self.forest_weight,
        }
    }

    /// Confidence cut-off applied to the card list, if any
    pub fn threshold(&self) -> Option<f64> {
        if self.show_all {
            None
        } else {
            Some(self.min_confidence)
        }
    }
}
