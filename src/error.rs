use crate::models::TeamId;
use thiserror::Error;

/// Errors raised while training the scoring engine or building recommendations
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("unknown team id: {0}")]
    UnknownTeam(TeamId),

    #[error("synthetic training data collapsed to a single class after {attempts} attempt(s)")]
    DegenerateTrainingData { attempts: usize },

    #[error("scoring engine has not been trained")]
    ModelNotTrained,

    #[error("ensemble weights must be non-negative and sum to 1.0 (got {0})")]
    InvalidEnsembleWeights(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to fit {model}: {reason}")]
    ModelFit { model: &'static str, reason: String },
}

pub type PredictorResult<T> = std::result::Result<T, PredictorError>;
