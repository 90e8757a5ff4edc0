use crate::error::{PredictorError, PredictorResult};
use linfa::Dataset;
use ndarray::{Array1, Array2};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// A binary classifier that reports a class-1 probability rather than a hard label
pub trait ProbabilisticClassifier {
    fn name(&self) -> &str;

    /// Probability that each row belongs to class 1 ("covers")
    fn predict_proba(&self, records: &Array2<f64>) -> Array1<f64>;

    fn predict_labels(&self, records: &Array2<f64>) -> Array1<bool> {
        self.predict_proba(records).mapv(|p| p > 0.5)
    }

    /// Share of rows whose predicted label matches
    fn accuracy(&self, dataset: &Dataset<f64, bool, ndarray::Ix1>) -> f64 {
        let total = dataset.records().nrows();
        if total == 0 {
            return 0.0;
        }
        let correct = self
            .predict_labels(dataset.records())
            .iter()
            .zip(dataset.targets().iter())
            .filter(|(predicted, actual)| predicted == actual)
            .count();
        correct as f64 / total as f64
    }
}

struct Member {
    weight: f64,
    model: Box<dyn ProbabilisticClassifier>,
}

/// Weighted average of member probabilities
pub struct Ensemble {
    members: Vec<Member>,
}

impl Ensemble {
    /// Weights must be non-negative and sum to one
    pub fn new(members: Vec<(f64, Box<dyn ProbabilisticClassifier>)>) -> PredictorResult<Self> {
        let total: f64 = members.iter().map(|(w, _)| w).sum();
        let negative = members.iter().any(|(w, _)| *w < 0.0 || !w.is_finite());
        if members.is_empty() || negative || (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(PredictorError::InvalidEnsembleWeights(total));
        }

        Ok(Self {
            members: members
                .into_iter()
                .map(|(weight, model)| Member { weight, model })
                .collect(),
        })
    }

    pub fn predict_proba(&self, records: &Array2<f64>) -> Array1<f64> {
        let mut total: Array1<f64> = Array1::zeros(records.nrows());
        for member in &self.members {
            total.scaled_add(member.weight, &member.model.predict_proba(records));
        }
        total.mapv_into(|p| p.clamp(0.0, 1.0))
    }

    /// (name, weight) of every member, in insertion order
    pub fn weights(&self) -> Vec<(String, f64)> {
        self.members
            .iter()
            .map(|m| (m.model.name().to_string(), m.weight))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    struct Constant(f64);

    impl ProbabilisticClassifier for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn predict_proba(&self, records: &Array2<f64>) -> Array1<f64> {
            Array1::from_elem(records.nrows(), self.0)
        }
    }

    #[test]
    fn test_weighted_average() {
        let ensemble = Ensemble::new(vec![
            (0.6, Box::new(Constant(0.8)) as Box<dyn ProbabilisticClassifier>),
            (0.4, Box::new(Constant(0.3)) as Box<dyn ProbabilisticClassifier>),
        ])
        .unwrap();
        let probabilities = ensemble.predict_proba(&Array2::zeros((3, 8)));
        assert_eq!(probabilities.len(), 3);
        for p in probabilities.iter() {
            assert_relative_eq!(*p, 0.6 * 0.8 + 0.4 * 0.3, epsilon = 1e-12);
        }
        assert_eq!(ensemble.weights().len(), 2);
    }

    #[test]
    fn test_rejects_bad_weights() {
        let bad_sum = Ensemble::new(vec![
            (0.6, Box::new(Constant(0.5)) as Box<dyn ProbabilisticClassifier>),
            (0.6, Box::new(Constant(0.5)) as Box<dyn ProbabilisticClassifier>),
        ]);
        assert!(matches!(bad_sum, Err(PredictorError::InvalidEnsembleWeights(_))));

        let negative = Ensemble::new(vec![
            (1.5, Box::new(Constant(0.5)) as Box<dyn ProbabilisticClassifier>),
            (-0.5, Box::new(Constant(0.5)) as Box<dyn ProbabilisticClassifier>),
        ]);
        assert!(negative.is_err());

        assert!(Ensemble::new(Vec::new()).is_err());
    }

    #[test]
    fn test_accuracy_counts_matches() {
        let model = Constant(0.9);
        let dataset = Dataset::new(Array2::zeros((4, 8)), array![true, true, true, false]);
        assert_relative_eq!(model.accuracy(&dataset), 0.75);
    }
}
