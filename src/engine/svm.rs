//! Gaussian-kernel support vector classifier with Platt-scaled probabilities.
//!
//! linfa's kernel is `exp(-|x - y|^2 / width)`, so the "scale" heuristic
//! `gamma = 1 / (d * Var(X))` becomes a width of `d * Var(X)`.

use super::ensemble::ProbabilisticClassifier;
use crate::error::{PredictorError, PredictorResult};
use linfa::dataset::Pr;
use linfa::prelude::*;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct SvmParams {
    pub c: f64,
    /// None selects `n_features * Var(X)`
    pub kernel_width: Option<f64>,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            kernel_width: None,
        }
    }
}

/// Kernel width matching the "scale" gamma over every entry of `records`
fn scale_kernel_width(records: &Array2<f64>) -> f64 {
    let Some(mean) = records.mean() else {
        return 1.0;
    };
    let variance = records.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / records.len() as f64;
    if variance > 0.0 {
        records.ncols() as f64 * variance
    } else {
        1.0
    }
}

/// Kernel SVM whose class-1 probability is Platt calibrated
pub struct KernelSvm {
    model: Svm<f64, Pr>,
    kernel_width: f64,
}

impl KernelSvm {
    pub fn fit(train: &Dataset<f64, bool, ndarray::Ix1>, params: SvmParams) -> PredictorResult<Self> {
        let kernel_width = params
            .kernel_width
            .unwrap_or_else(|| scale_kernel_width(train.records()));

        let model = Svm::<f64, Pr>::params()
            .pos_neg_weights(params.c, params.c)
            .gaussian_kernel(kernel_width)
            .fit(train)
            .map_err(|e| PredictorError::ModelFit {
                model: "kernel SVM",
                reason: e.to_string(),
            })?;
        debug!("SVM kernel width {:.4}, C {}", kernel_width, params.c);

        Ok(Self {
            model,
            kernel_width,
        })
    }

    pub fn kernel_width(&self) -> f64 {
        self.kernel_width
    }
}

impl ProbabilisticClassifier for KernelSvm {
    fn name(&self) -> &str {
        "SVM"
    }

    fn predict_proba(&self, records: &Array2<f64>) -> Array1<f64> {
        let probabilities: Array1<Pr> = self.model.predict(records);
        probabilities.mapv(|p| f64::from(*p))
    }
}
