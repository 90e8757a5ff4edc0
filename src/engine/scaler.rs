use crate::error::{PredictorError, PredictorResult};
use linfa::prelude::*;
use linfa_preprocessing::linear_scaling::LinearScaler;

/// Fit a zero-mean, unit-variance scaler on the training split only.
///
/// Zero-variance columns keep a scale of one, so they come out centred rather
/// than divided by zero.
pub fn fit_standard(train: &Dataset<f64, bool, ndarray::Ix1>) -> PredictorResult<LinearScaler<f64>> {
    LinearScaler::standard()
        .fit(train)
        .map_err(|e| PredictorError::ModelFit {
            model: "standard scaler",
            reason: e.to_string(),
        })
}

/// Apply a fitted scaler to a copy of the dataset's records
pub fn standardize(scaler: &LinearScaler<f64>, dataset: &Dataset<f64, bool, ndarray::Ix1>) -> Dataset<f64, bool, ndarray::Ix1> {
    Dataset::new(
        scaler.transform(dataset.records().to_owned()),
        dataset.targets().to_owned(),
    )
}
