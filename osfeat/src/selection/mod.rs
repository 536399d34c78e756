pub mod dataset;
pub mod extra_trees;
pub mod report;
pub mod rfe;
pub mod univariate;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::{PipelineError, Result};
use dataset::FeatureMatrix;
use extra_trees::ExtraTrees;
use rfe::{recursive_feature_elimination, LogisticRegression, RfeResult};

/// Columns ranked by default; the last one is the label.
pub const DEFAULT_FEATURES: [&str; 31] = [
    "ip.hdr_len",
    "ip.flags.rb",
    "ip.flags.df",
    "ip.flags.mf",
    "ip.frag_offset",
    "ip.ttl",
    "ip.len",
    "tcp.seq",
    "tcp.ack",
    "tcp.len",
    "tcp.hdr_len",
    "tcp.flags.fin",
    "tcp.flags.syn",
    "tcp.flags.reset",
    "tcp.flags.push",
    "tcp.flags.ack",
    "tcp.flags.urg",
    "tcp.flags.cwr",
    "tcp.window_size",
    "tcp.urgent_pointer",
    "tcp.time_delta",
    "tcp.srcport",
    "tcp.dstport",
    "frame.len",
    "average_time_delta",
    "std_time_delta",
    "average_ttl",
    "std_ttl",
    "average_len",
    "std_len",
    "os",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Seed of the extra-trees random number generator.
    pub seed: u64,
    pub n_estimators: usize,
    /// Neighbours used by the mutual information estimator.
    pub neighbors: usize,
    /// Gradient descent iterations per logistic regression fit.
    pub max_iter: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            seed: 42,
            n_estimators: 10,
            neighbors: 3,
            max_iter: 100,
        }
    }
}

/// A feature name with its score, as produced by one ranking method.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScore {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct SelectionReport {
    pub top: usize,
    /// Features kept after the constant-column filter, in dataset order.
    pub features: Vec<String>,
    pub dropped: Vec<String>,
    pub anova: Vec<f64>,
    pub mutual_info: Vec<f64>,
    pub rfe: RfeResult,
    pub importances: Vec<f64>,
}

/// Sorts scores descending; NaN scores go last.
pub fn rank_descending(names: &[String], scores: &[f64]) -> Vec<FeatureScore> {
    let key = |score: f64| if score.is_nan() { f64::NEG_INFINITY } else { score };
    let mut ranked: Vec<FeatureScore> = names
        .iter()
        .zip(scores)
        .map(|(name, &score)| FeatureScore {
            name: name.clone(),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| key(b.score).total_cmp(&key(a.score)));
    ranked
}

/// Runs the variance filter and all ranking methods on a loaded dataset.
pub fn select_features(
    mut matrix: FeatureMatrix,
    top: usize,
    config: &SelectionConfig,
) -> Result<(FeatureMatrix, SelectionReport)> {
    if top == 0 {
        return Err(PipelineError::Config(
            "number of best features must be at least 1".to_string(),
        ));
    }

    let dropped = matrix.drop_constant_columns();
    if matrix.n_features() == 0 {
        return Err(PipelineError::EmptyDataset(
            "every feature column is constant".to_string(),
        ));
    }
    info!(
        "Ranking {} features over {} samples and {} classes",
        matrix.n_features(),
        matrix.n_samples(),
        matrix.n_classes()
    );

    let anova = univariate::anova_f(&matrix);
    let mutual_info = univariate::mutual_info(&matrix, config.neighbors);
    debug!("Univariate scoring done");

    let model = LogisticRegression {
        max_iter: config.max_iter,
        ..LogisticRegression::default()
    };
    let rfe = recursive_feature_elimination(&matrix, &model, top.min(matrix.n_features()));
    debug!("Recursive feature elimination done");

    let importances = ExtraTrees {
        n_estimators: config.n_estimators,
        seed: config.seed,
        ..ExtraTrees::default()
    }
    .feature_importances(&matrix);

    let report = SelectionReport {
        top,
        features: matrix.names.clone(),
        dropped,
        anova,
        mutual_info,
        rfe,
        importances,
    };
    Ok((matrix, report))
}
