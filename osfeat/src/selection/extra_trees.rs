use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::dataset::FeatureMatrix;

/// Extremely randomized trees, grown only to measure impurity-based feature importance.
#[derive(Debug, Clone)]
pub struct ExtraTrees {
    pub n_estimators: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ExtraTrees {
    fn default() -> Self {
        ExtraTrees {
            n_estimators: 10,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&count| (count as f64 / total).powi(2))
        .sum::<f64>()
}

struct Split {
    feature: usize,
    threshold: f64,
    /// Weighted impurity of both children, `n_left * gini_left + n_right * gini_right`.
    children_impurity: f64,
}

impl ExtraTrees {
    /// Mean decrease in gini impurity per feature, normalized to sum to one.
    pub fn feature_importances(&self, matrix: &FeatureMatrix) -> Vec<f64> {
        let n_features = matrix.n_features();
        let mut importances = vec![0.0; n_features];
        if n_features == 0 || matrix.n_samples() == 0 {
            return importances;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        for _ in 0..self.n_estimators {
            let tree = self.grow_tree(matrix, &mut rng);
            let total: f64 = tree.iter().sum();
            if total > 0.0 {
                for (sum, value) in importances.iter_mut().zip(tree) {
                    *sum += value / total;
                }
            }
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            importances.iter_mut().for_each(|value| *value /= total);
        }
        importances
    }

    /// Grows one tree to purity and returns its unnormalized impurity decrease per feature.
    fn grow_tree(&self, matrix: &FeatureMatrix, rng: &mut StdRng) -> Vec<f64> {
        let n_features = matrix.n_features();
        let max_features = ((n_features as f64).sqrt() as usize).max(1);
        let mut decrease = vec![0.0; n_features];
        let mut feature_order: Vec<usize> = (0..n_features).collect();

        let mut stack = vec![(0..matrix.n_samples()).collect::<Vec<usize>>()];
        while let Some(samples) = stack.pop() {
            let counts = class_counts(matrix, &samples);
            let impurity = gini(&counts, samples.len());
            if samples.len() < self.min_samples_split || impurity == 0.0 {
                continue;
            }

            feature_order.shuffle(rng);
            let mut best: Option<Split> = None;
            let mut visited = 0;
            for &feature in &feature_order {
                if visited == max_features {
                    break;
                }
                let column = &matrix.columns[feature];
                let (min, max) = samples.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &s| {
                    (lo.min(column[s]), hi.max(column[s]))
                });
                if max <= min || !(max - min).is_finite() {
                    continue;
                }
                visited += 1;

                let mut threshold = rng.gen_range(min..max);
                if threshold >= max {
                    threshold = min;
                }
                let children_impurity = split_impurity(matrix, &samples, feature, threshold);
                if best
                    .as_ref()
                    .map_or(true, |split| children_impurity < split.children_impurity)
                {
                    best = Some(Split {
                        feature,
                        threshold,
                        children_impurity,
                    });
                }
            }

            let Some(split) = best else {
                continue;
            };
            decrease[split.feature] += samples.len() as f64 * impurity - split.children_impurity;

            let column = &matrix.columns[split.feature];
            let (left, right): (Vec<usize>, Vec<usize>) = samples
                .into_iter()
                .partition(|&s| column[s] <= split.threshold);
            stack.push(left);
            stack.push(right);
        }

        decrease
    }
}

fn class_counts(matrix: &FeatureMatrix, samples: &[usize]) -> Vec<usize> {
    let mut counts = vec![0; matrix.n_classes()];
    for &sample in samples {
        counts[matrix.labels[sample]] += 1;
    }
    counts
}

fn split_impurity(
    matrix: &FeatureMatrix,
    samples: &[usize],
    feature: usize,
    threshold: f64,
) -> f64 {
    let column = &matrix.columns[feature];
    let mut left = vec![0; matrix.n_classes()];
    let mut right = vec![0; matrix.n_classes()];
    for &sample in samples {
        if column[sample] <= threshold {
            left[matrix.labels[sample]] += 1;
        } else {
            right[matrix.labels[sample]] += 1;
        }
    }
    let n_left: usize = left.iter().sum();
    let n_right: usize = right.iter().sum();
    n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right)
}
