//! Binary logistic regression over sparse features.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tfidf::SparseVector;

/// Optimizer settings.
#[derive(Debug, Clone, Copy)]
pub struct FitParams {
    /// Inverse L2 regularization strength.
    pub c: f64,
    /// Iteration cap for gradient descent.
    pub max_iter: usize,
    /// Stop once every gradient component is below this.
    pub tolerance: f64,
    /// Gradient descent step size.
    pub learning_rate: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-6,
            learning_rate: 1.0,
        }
    }
}

/// Fitted weights. Predicts the probability of the positive class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    /// `w · x + b`. Columns beyond `coef` contribute nothing.
    pub fn decision(&self, x: &SparseVector) -> f64 {
        x.iter()
            .filter_map(|(column, value)| self.coef.get(*column).map(|w| w * value))
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the positive class.
    pub fn probability(&self, x: &SparseVector) -> f64 {
        sigmoid(self.decision(x))
    }

    /// Fit by full-batch gradient descent on the weighted, L2-regularized log loss.
    ///
    /// `targets[i]` is true for the positive class. `sample_weights` must be the
    /// same length as `samples`.
    pub fn fit(
        samples: &[SparseVector],
        targets: &[bool],
        sample_weights: &[f64],
        n_features: usize,
        params: FitParams,
    ) -> Self {
        let mut model = Self {
            coef: vec![0.0; n_features],
            intercept: 0.0,
        };

        let total_weight: f64 = sample_weights.iter().sum();
        if samples.is_empty() || total_weight <= 0.0 {
            return model;
        }
        let l2 = 1.0 / (params.c * total_weight);

        let mut grad = vec![0.0; n_features];
        for iteration in 0..params.max_iter {
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_intercept = 0.0;

            for ((x, &y), &w) in samples.iter().zip(targets).zip(sample_weights) {
                let residual = model.probability(x) - if y { 1.0 } else { 0.0 };
                let scaled = w * residual / total_weight;
                for (column, value) in x {
                    if let Some(g) = grad.get_mut(*column) {
                        *g += scaled * value;
                    }
                }
                grad_intercept += scaled;
            }

            let mut max_component = grad_intercept.abs();
            for (g, coef) in grad.iter_mut().zip(&model.coef) {
                *g += l2 * coef;
                max_component = max_component.max(g.abs());
            }

            if max_component < params.tolerance {
                debug!(iteration, "Logistic regression converged");
                break;
            }

            for (coef, g) in model.coef.iter_mut().zip(&grad) {
                *coef -= params.learning_rate * g;
            }
            model.intercept -= params.learning_rate * grad_intercept;
        }

        model
    }
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
