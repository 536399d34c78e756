use super::dataset::FeatureMatrix;
use crate::pipeline::stats::FeatureStats;

/// ANOVA F value of every feature against the class label.
///
/// Undefined ratios (single class, one sample per class, or no variance at all)
/// come out as NaN; zero within-class variance with a between-class spread is infinite.
pub fn anova_f(matrix: &FeatureMatrix) -> Vec<f64> {
    matrix
        .columns
        .iter()
        .map(|column| f_value(column, &matrix.labels, matrix.n_classes()))
        .collect()
}

fn f_value(column: &[f64], labels: &[usize], n_classes: usize) -> f64 {
    let mut per_class = vec![FeatureStats::new(); n_classes];
    for (&value, &label) in column.iter().zip(labels) {
        per_class[label].add_value(value);
    }
    let present: Vec<&FeatureStats> = per_class.iter().filter(|s| s.get_count() > 0).collect();

    let n = column.len();
    let k = present.len();
    if k < 2 || n <= k {
        return f64::NAN;
    }

    let grand_mean = column.iter().sum::<f64>() / n as f64;
    let ss_between: f64 = present
        .iter()
        .map(|stats| {
            let mean = stats.get_mean().unwrap_or(grand_mean);
            stats.get_count() as f64 * (mean - grand_mean).powi(2)
        })
        .sum();

    let class_means: Vec<f64> = per_class
        .iter()
        .map(|stats| stats.get_mean().unwrap_or(0.0))
        .collect();
    let ss_within: f64 = column
        .iter()
        .zip(labels)
        .map(|(&value, &label)| (value - class_means[label]).powi(2))
        .sum();

    let ms_between = ss_between / (k - 1) as f64;
    let ms_within = ss_within / (n - k) as f64;
    if ms_within == 0.0 {
        return if ms_between > 0.0 { f64::INFINITY } else { f64::NAN };
    }
    ms_between / ms_within
}

/// Mutual information between every feature and the class label, in nats.
///
/// Continuous features are estimated with the nearest-neighbour method of
/// Ross (2014) after scaling each feature to unit variance.
pub fn mutual_info(matrix: &FeatureMatrix, neighbors: usize) -> Vec<f64> {
    matrix
        .columns
        .iter()
        .map(|column| {
            let stats: FeatureStats = column.iter().copied().collect();
            let mean = stats.get_mean().unwrap_or(0.0);
            let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / column.len().max(1) as f64;
            let scale = if variance > 0.0 { variance.sqrt() } else { 1.0 };
            let scaled: Vec<f64> = column.iter().map(|v| v / scale).collect();
            mi_continuous_discrete(&scaled, &matrix.labels, matrix.n_classes(), neighbors)
        })
        .collect()
}

/// Distance to the k-th nearest other point, for every point of a sorted slice.
fn kth_neighbor_distances(sorted: &[f64], k: usize) -> Vec<f64> {
    (0..sorted.len())
        .map(|i| {
            let (mut left, mut right) = (i, i + 1);
            let mut distance = 0.0;
            for _ in 0..k {
                let to_left = (left > 0).then(|| sorted[i] - sorted[left - 1]);
                let to_right = (right < sorted.len()).then(|| sorted[right] - sorted[i]);
                distance = match (to_left, to_right) {
                    (Some(l), Some(r)) if l <= r => {
                        left -= 1;
                        l
                    }
                    (Some(_), Some(r)) | (None, Some(r)) => {
                        right += 1;
                        r
                    }
                    (Some(l), None) => {
                        left -= 1;
                        l
                    }
                    (None, None) => break,
                };
            }
            distance
        })
        .collect()
}

/// Largest float strictly below `value`, or 0 for 0.
fn next_below(value: f64) -> f64 {
    if value > 0.0 {
        f64::from_bits(value.to_bits() - 1)
    } else {
        value
    }
}

pub fn mi_continuous_discrete(
    column: &[f64],
    labels: &[usize],
    n_classes: usize,
    neighbors: usize,
) -> f64 {
    let mut by_class: Vec<Vec<f64>> = vec![Vec::new(); n_classes];
    for (&value, &label) in column.iter().zip(labels) {
        by_class[label].push(value);
    }

    // (value, radius, k, class size) for every sample of a class with two or more members
    let mut points: Vec<(f64, f64, usize, usize)> = Vec::new();
    for mut values in by_class.into_iter().filter(|values| values.len() > 1) {
        values.sort_by(f64::total_cmp);
        let count = values.len();
        let k = neighbors.min(count - 1).max(1);
        let radii = kth_neighbor_distances(&values, k);
        points.extend(
            values
                .into_iter()
                .zip(radii)
                .map(|(value, radius)| (value, next_below(radius), k, count)),
        );
    }

    let n = points.len();
    if n == 0 {
        return 0.0;
    }

    let mut all: Vec<f64> = points.iter().map(|point| point.0).collect();
    all.sort_by(f64::total_cmp);

    let mut sum_k = 0.0;
    let mut sum_label = 0.0;
    let mut sum_m = 0.0;
    for &(value, radius, k, count) in &points {
        let low = all.partition_point(|&x| x < value - radius);
        let high = all.partition_point(|&x| x <= value + radius);
        let within = (high - low).max(1);
        sum_k += digamma(k as f64);
        sum_label += digamma(count as f64);
        sum_m += digamma(within as f64);
    }

    let n_f = n as f64;
    let mi = digamma(n_f) + sum_k / n_f - sum_label / n_f - sum_m / n_f;
    mi.max(0.0)
}

/// Digamma function for positive arguments.
pub fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln()
        - 0.5 * inv
        - inv2
            * (1.0 / 12.0
                - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))))
}
