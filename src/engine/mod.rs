pub mod ensemble;
pub mod forest;
pub mod scaler;
pub mod svm;
pub mod synthetic;

use crate::error::{PredictorError, PredictorResult};
use crate::models::{TeamStat, TrainingExample, FEATURE_COUNT};
use ensemble::{Ensemble, ProbabilisticClassifier};
use forest::{RandomForest, DEFAULT_TREES};
use linfa::Dataset;
use linfa::prelude::*;
use linfa_preprocessing::linear_scaling::LinearScaler;
use ndarray::{arr2, Array1};
use serde::{Deserialize, Serialize};
use svm::{KernelSvm, SvmParams};
use synthetic::{generate_training_data, is_degenerate, train_test_split, DEFAULT_SAMPLES, TEST_FRACTION};
use tracing::{debug, info, warn};

/// How many seeds to try before giving up on single-class synthetic data
pub const MAX_SYNTHESIS_ATTEMPTS: usize = 5;

/// Home field advantage fed to the model at inference time
pub const INFERENCE_HOME_FIELD: f64 = 0.05;

/// Recent form difference fed to the model at inference time
pub const INFERENCE_RECENT_FORM: f64 = 0.0;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_FOREST_WEIGHT: f64 = 0.6;

/// Training settings for the scoring engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub n_samples: usize,
    pub seed: u64,
    pub n_trees: usize,
    pub forest_weight: f64, // The SVM gets the remainder
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            n_samples: DEFAULT_SAMPLES,
            seed: DEFAULT_SEED,
            n_trees: DEFAULT_TREES,
            forest_weight: DEFAULT_FOREST_WEIGHT,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> PredictorResult<()> {
        if self.n_samples < 10 {
            return Err(PredictorError::InvalidConfig(format!(
                "need at least 10 training samples, got {}",
                self.n_samples
            )));
        }
        if self.n_trees == 0 {
            return Err(PredictorError::InvalidConfig(
                "forest needs at least one tree".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.forest_weight) {
            return Err(PredictorError::InvalidEnsembleWeights(self.forest_weight));
        }
        Ok(())
    }
}

/// Held-out results of one training pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub forest_accuracy: f64,
    pub svm_accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
    pub positive_rate: f64, // Share of synthetic games labeled "covered"
    pub seed: u64,          // Seed that produced the data actually used
}

impl TrainingReport {
    /// (random forest accuracy, SVM accuracy)
    pub fn accuracies(&self) -> (f64, f64) {
        (self.forest_accuracy, self.svm_accuracy)
    }
}

/// A two-class train/test split and the seed that produced it
struct SyntheticSplit {
    train: Vec<TrainingExample>,
    test: Vec<TrainingExample>,
    positive_rate: f64,
    seed: u64,
}

struct FittedModels {
    scaler: LinearScaler<f64>,
    ensemble: Ensemble,
    report: TrainingReport,
}

/// Caller-owned ensemble of a random forest and a kernel SVM.
///
/// `train` refits everything from the configured seed, so calling it again
/// reproduces the same models. `predict` refuses to run before a successful
/// `train`; use `predict_or_train` for train-on-first-use.
pub struct ScoringEngine {
    config: EngineConfig,
    fitted: Option<FittedModels>,
}

impl ScoringEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn report(&self) -> Option<&TrainingReport> {
        self.fitted.as_ref().map(|f| &f.report)
    }

    /// Synthesize data, fit the scaler and both models, and score them on the held-out split
    pub fn train(&mut self) -> PredictorResult<TrainingReport> {
        self.train_with_generator(generate_training_data)
    }

    /// Train on data drawn from `generate(n_samples, seed)` instead of the built-in synthesis
    pub fn train_with_generator<G>(&mut self, generate: G) -> PredictorResult<TrainingReport>
    where
        G: Fn(usize, u64) -> Vec<TrainingExample>,
    {
        self.config.validate()?;
        let split = self.synthesize(generate)?;

        let train = to_dataset(&split.train);
        let test = to_dataset(&split.test);
        let scaler = scaler::fit_standard(&train)?;
        let train = scaler::standardize(&scaler, &train);
        let test = scaler::standardize(&scaler, &test);

        debug!("Fitting random forest with {} trees", self.config.n_trees);
        let forest = RandomForest::fit(&train, self.config.n_trees, split.seed)?;
        debug!("Fitting kernel SVM on {} rows", train.records().nrows());
        let svm = KernelSvm::fit(&train, SvmParams::default())?;

        let report = TrainingReport {
            forest_accuracy: forest.accuracy(&test),
            svm_accuracy: svm.accuracy(&test),
            train_size: split.train.len(),
            test_size: split.test.len(),
            positive_rate: split.positive_rate,
            seed: split.seed,
        };

        let ensemble = Ensemble::new(vec![
            (self.config.forest_weight, Box::new(forest) as Box<dyn ProbabilisticClassifier>),
            (1.0 - self.config.forest_weight, Box::new(svm) as Box<dyn ProbabilisticClassifier>),
        ])?;

        info!(
            "Trained models on {} games: random forest {:.1}%, SVM {:.1}%",
            report.train_size,
            report.forest_accuracy * 100.0,
            report.svm_accuracy * 100.0
        );

        self.fitted = Some(FittedModels {
            scaler,
            ensemble,
            report,
        });
        Ok(report)
    }

    /// Draw and split synthetic data, moving to the next seed while either the
    /// full set or its training side comes back single-class
    fn synthesize<G>(&self, generate: G) -> PredictorResult<SyntheticSplit>
    where
        G: Fn(usize, u64) -> Vec<TrainingExample>,
    {
        for attempt in 0..MAX_SYNTHESIS_ATTEMPTS {
            let seed = self.config.seed.wrapping_add(attempt as u64);
            let examples = generate(self.config.n_samples, seed);
            if is_degenerate(&examples) {
                warn!("Synthetic data with seed {} has a single class, re-seeding", seed);
                continue;
            }

            let (train, test) = train_test_split(&examples, TEST_FRACTION, seed);
            if is_degenerate(&train) {
                warn!("Training split with seed {} has a single class, re-seeding", seed);
                continue;
            }

            let positives = examples.iter().filter(|e| e.label).count();
            return Ok(SyntheticSplit {
                train,
                test,
                positive_rate: positives as f64 / examples.len() as f64,
                seed,
            });
        }
        Err(PredictorError::DegenerateTrainingData {
            attempts: MAX_SYNTHESIS_ATTEMPTS,
        })
    }

    /// Ensemble probability that the home side covers
    pub fn predict(&self, home: &TeamStat, away: &TeamStat) -> PredictorResult<f64> {
        let fitted = self.fitted.as_ref().ok_or(PredictorError::ModelNotTrained)?;
        let scaled = fitted.scaler.transform(arr2(&[feature_vector(home, away)]));
        Ok(fitted.ensemble.predict_proba(&scaled)[0])
    }

    pub fn predict_or_train(&mut self, home: &TeamStat, away: &TeamStat) -> PredictorResult<f64> {
        if !self.is_trained() {
            self.train()?;
        }
        self.predict(home, away)
    }

    /// Member names and weights of the fitted ensemble
    pub fn weights(&self) -> Option<Vec<(String, f64)>> {
        self.fitted.as_ref().map(|f| f.ensemble.weights())
    }
}

/// Inference-time features; the two perturbation terms are fixed rather than sampled
pub fn feature_vector(home: &TeamStat, away: &TeamStat) -> [f64; FEATURE_COUNT] {
    [
        home.win_pct,
        away.win_pct,
        home.runs_per_game,
        away.runs_per_game,
        home.era,
        away.era,
        INFERENCE_HOME_FIELD,
        INFERENCE_RECENT_FORM,
    ]
}

fn to_dataset(examples: &[TrainingExample]) -> Dataset<f64, bool, ndarray::Ix1> {
    let rows: Vec<[f64; FEATURE_COUNT]> = examples.iter().map(|e| e.features).collect();
    let labels: Array1<bool> = examples.iter().map(|e| e.label).collect();
    Dataset::new(arr2(&rows), labels)
}
