use log::debug;

use super::dataset::FeatureMatrix;

/// Multinomial logistic regression with an L2 penalty, fitted by full-batch
/// gradient descent on standardized features.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Inverse regularization strength.
    pub c: f64,
    pub max_iter: usize,
    pub learning_rate: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        LogisticRegression {
            c: 1.0,
            max_iter: 100,
            learning_rate: 0.5,
        }
    }
}

fn standardize(column: &[f64]) -> Vec<f64> {
    let n = column.len().max(1) as f64;
    let mean = column.iter().sum::<f64>() / n;
    let std = (column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let scale = if std > 0.0 { std } else { 1.0 };
    column.iter().map(|v| (v - mean) / scale).collect()
}

impl LogisticRegression {
    /// Fits the model on the selected feature columns and returns the
    /// coefficients as `[class][feature]`.
    pub fn fit(&self, matrix: &FeatureMatrix, features: &[usize]) -> Vec<Vec<f64>> {
        let n_classes = matrix.n_classes();
        let n_samples = matrix.n_samples();
        let d = features.len();
        if n_samples == 0 || n_classes == 0 {
            return vec![vec![0.0; d]; n_classes];
        }

        let x: Vec<Vec<f64>> = features
            .iter()
            .map(|&feature| standardize(&matrix.columns[feature]))
            .collect();

        let mut weights = vec![vec![0.0; d]; n_classes];
        let mut bias = vec![0.0; n_classes];
        let n = n_samples as f64;
        let penalty = 1.0 / (self.c * n);

        let mut logits = vec![0.0; n_classes];
        for _ in 0..self.max_iter {
            let mut grad_w = vec![vec![0.0; d]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for sample in 0..n_samples {
                for class in 0..n_classes {
                    logits[class] = bias[class]
                        + weights[class]
                            .iter()
                            .zip(&x)
                            .map(|(w, column)| w * column[sample])
                            .sum::<f64>();
                }
                let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let norm: f64 = logits.iter().map(|z| (z - max).exp()).sum();

                for class in 0..n_classes {
                    let p = (logits[class] - max).exp() / norm;
                    let error = p - if matrix.labels[sample] == class { 1.0 } else { 0.0 };
                    grad_b[class] += error;
                    for (g, column) in grad_w[class].iter_mut().zip(&x) {
                        *g += error * column[sample];
                    }
                }
            }

            for class in 0..n_classes {
                bias[class] -= self.learning_rate * grad_b[class] / n;
                for j in 0..d {
                    let gradient = grad_w[class][j] / n + penalty * weights[class][j];
                    weights[class][j] -= self.learning_rate * gradient;
                }
            }
        }

        weights
    }
}

/// Outcome of recursive feature elimination, indexed like `FeatureMatrix::names`.
#[derive(Debug, Clone, PartialEq)]
pub struct RfeResult {
    pub support: Vec<bool>,
    /// 1 for selected features, higher for features eliminated earlier.
    pub ranking: Vec<usize>,
}

/// Removes the feature with the smallest summed squared coefficient, one per
/// round, until `n_select` remain.
pub fn recursive_feature_elimination(
    matrix: &FeatureMatrix,
    model: &LogisticRegression,
    n_select: usize,
) -> RfeResult {
    let n_features = matrix.n_features();
    let mut remaining: Vec<usize> = (0..n_features).collect();
    let mut eliminated = Vec::new();

    while remaining.len() > n_select.max(1) {
        let weights = model.fit(matrix, &remaining);
        let importance = |position: usize| -> f64 {
            weights.iter().map(|class| class[position].powi(2)).sum()
        };

        let weakest = (0..remaining.len())
            .min_by(|&a, &b| importance(a).total_cmp(&importance(b)))
            .unwrap_or(0);
        let feature = remaining.remove(weakest);
        debug!("RFE eliminated {}", matrix.names[feature]);
        eliminated.push(feature);
    }

    let mut support = vec![false; n_features];
    let mut ranking = vec![1; n_features];
    for &feature in &remaining {
        support[feature] = true;
    }
    let rounds = eliminated.len();
    for (round, &feature) in eliminated.iter().enumerate() {
        ranking[feature] = rounds - round + 1;
    }

    RfeResult { support, ranking }
}
