use serde::{Deserialize, Serialize};

use super::labeler::LabeledRecord;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    /// Rows per file kept for training.
    pub train_rows: usize,
    /// Rows per file held out for testing, taken right after the training rows.
    pub test_rows: usize,
    /// File name whose training rows go to the miscellaneous output instead.
    pub skip_file: Option<String>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            train_rows: 700,
            test_rows: 140,
            skip_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSplit {
    pub train: Vec<LabeledRecord>,
    pub test: Vec<LabeledRecord>,
}

/// Where a processed file's rows are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Cumulative,
    Miscellaneous,
}

impl SplitConfig {
    /// Training rows are `[0, train_rows)`, test rows `[train_rows, train_rows + test_rows)`,
    /// both clamped to what the file has.
    pub fn split(&self, mut records: Vec<LabeledRecord>) -> DatasetSplit {
        let test_end = self.train_rows.saturating_add(self.test_rows);
        records.truncate(test_end);

        let test = if records.len() > self.train_rows {
            records.split_off(self.train_rows)
        } else {
            Vec::new()
        };

        DatasetSplit {
            train: records,
            test,
        }
    }

    pub fn destination(&self, file_name: &str) -> Destination {
        match &self.skip_file {
            Some(skip) if skip == file_name => Destination::Miscellaneous,
            _ => Destination::Cumulative,
        }
    }
}
