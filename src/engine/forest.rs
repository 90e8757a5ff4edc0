use super::ensemble::ProbabilisticClassifier;
use crate::error::{PredictorError, PredictorResult};
use linfa::prelude::*;
use linfa_trees::{DecisionTree, DecisionTreeParams, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_TREES: usize = 100;

/// Fully grown Gini tree, as each forest member is
fn tree_params() -> DecisionTreeParams<f64, bool> {
    DecisionTree::params()
        .split_quality(SplitQuality::Gini)
        .max_depth(None)
        .min_weight_split(2.0)
        .min_weight_leaf(1.0)
}

/// Bagged decision trees; the probability is the share of trees voting "covers"
pub struct RandomForest {
    trees: Vec<DecisionTree<f64, bool>>,
}

impl RandomForest {
    /// Fit `n_trees` trees, each on a seeded bootstrap resample of `train`
    pub fn fit(train: &Dataset<f64, bool, ndarray::Ix1>, n_trees: usize, seed: u64) -> PredictorResult<Self> {
        let n = train.records().nrows();
        if n == 0 {
            return Err(PredictorError::ModelFit {
                model: "random forest",
                reason: "no training rows".to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let params = tree_params();
        let mut trees = Vec::with_capacity(n_trees);

        for _ in 0..n_trees {
            let rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let bootstrap = Dataset::new(
                train.records().select(Axis(0), &rows),
                train.targets().select(Axis(0), &rows),
            );
            let tree = params.fit(&bootstrap).map_err(|e| PredictorError::ModelFit {
                model: "decision tree",
                reason: e.to_string(),
            })?;
            trees.push(tree);
        }

        Ok(Self { trees })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl ProbabilisticClassifier for RandomForest {
    fn name(&self) -> &str {
        "Random Forest"
    }

    fn predict_proba(&self, records: &Array2<f64>) -> Array1<f64> {
        if self.trees.is_empty() {
            return Array1::from_elem(records.nrows(), 0.5);
        }

        let mut votes: Array1<f64> = Array1::zeros(records.nrows());
        for tree in &self.trees {
            let predicted: Array1<bool> = tree.predict(records);
            votes.zip_mut_with(&predicted, |v, covers| {
                if *covers {
                    *v += 1.0;
                }
            });
        }
        votes / self.trees.len() as f64
    }
}
