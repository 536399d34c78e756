pub mod aggregates;
pub mod labeler;
pub mod normalizer;
pub mod splitter;
pub mod stats;
pub mod windower;

use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::{
    errors::Result,
    labels::LabelTable,
    output::{AppendSummary, DatasetSink},
    parsers::csv_parser::{CsvParser, RawTable},
};
use labeler::LabeledTable;
use splitter::SplitConfig;

/// Runs one raw table through every stage up to labeling.
pub fn process_table(
    raw: RawTable,
    window_size: usize,
    labels: &LabelTable,
) -> Result<LabeledTable> {
    let normalized = normalizer::normalize(raw)?;
    let windowed = windower::window_table(normalized, window_size);
    debug!(
        "Assigned {} rows to {} windows",
        windowed.records.len(),
        windowed.records.last().map_or(0, |record| record.window)
    );
    let featured = aggregates::attach_aggregates(windowed);
    Ok(labeler::label(featured, labels))
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: Vec<PathBuf>,
    pub rows: AppendSummary,
}

/// Processes the given capture exports one after the other, in file name order,
/// appending each to the sink. A file that fails is logged and skipped.
pub fn run_batch(
    inputs: &[PathBuf],
    window_size: usize,
    split: &SplitConfig,
    labels: &LabelTable,
    sink: &mut DatasetSink,
) -> Result<BatchSummary> {
    let mut ordered: Vec<&PathBuf> = inputs.iter().collect();
    ordered.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then(a.cmp(b)));

    let mut summary = BatchSummary::default();
    for path in ordered {
        match process_file(path, window_size, split, labels, sink) {
            Ok(rows) => {
                summary.processed += 1;
                summary.rows.train_rows += rows.train_rows;
                summary.rows.test_rows += rows.test_rows;
                summary.rows.misc_rows += rows.misc_rows;
            }
            Err(e) => {
                error!("Skipping {}: {}", path.display(), e);
                summary.failed.push(path.clone());
            }
        }
    }

    sink.flush_and_close()?;
    Ok(summary)
}

fn process_file(
    path: &Path,
    window_size: usize,
    split: &SplitConfig,
    labels: &LabelTable,
    sink: &mut DatasetSink,
) -> Result<AppendSummary> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let raw = CsvParser.read_table(path)?;
    let raw_rows = raw.rows.len();
    let labeled = process_table(raw, window_size, labels)?;
    let headers = labeled.headers();
    let labeled_rows = labeled.records.len();

    let destination = split.destination(&file_name);
    let rows = sink.append(&file_name, &headers, &split.split(labeled.records), destination)?;

    info!(
        "{}: {} raw rows, {} labeled, {} train, {} test, {} misc",
        file_name, raw_rows, labeled_rows, rows.train_rows, rows.test_rows, rows.misc_rows
    );
    Ok(rows)
}
