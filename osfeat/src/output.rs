use std::{
    fs::{File, OpenOptions},
    io::BufWriter,
    path::{Path, PathBuf},
};

use csv::{Writer, WriterBuilder};
use log::debug;

use crate::{
    errors::{PipelineError, Result},
    pipeline::{
        labeler::LabeledRecord,
        splitter::{DatasetSplit, Destination},
    },
};

pub const TRAIN_FILE: &str = "labeled.csv";
pub const TEST_FILE: &str = "test.csv";
pub const MISC_FILE: &str = "labeled_to_miss.csv";

/// Appends rows to one cumulative CSV file.
///
/// The file is opened in append mode once per run, and the first write of the
/// run is the only one that emits the header.
pub struct DatasetWriter {
    path: PathBuf,
    headers: Option<Vec<String>>,
    writer: Option<Writer<BufWriter<File>>>,
}

impl DatasetWriter {
    pub fn new(path: PathBuf) -> Self {
        DatasetWriter {
            path,
            headers: None,
            writer: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fails when a header was already written and `headers` differs from it.
    pub fn check_headers(&self, file: &str, headers: &[String]) -> Result<()> {
        match &self.headers {
            Some(written) if written.as_slice() != headers => Err(PipelineError::SchemaMismatch {
                file: file.to_string(),
                target: self.path.display().to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Opens the file in append mode if this run has not opened it yet.
    pub fn open(&mut self) -> Result<()> {
        if self.writer.is_none() {
            debug!("Opening {}", self.path.display());
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            let writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(file));
            self.writer = Some(writer);
        }
        Ok(())
    }

    pub fn write_records(
        &mut self,
        headers: &[String],
        records: &[LabeledRecord],
    ) -> Result<usize> {
        self.open()?;
        let Some(writer) = self.writer.as_mut() else {
            return Ok(0);
        };
        if self.headers.is_none() {
            debug!("Writing header to {}", self.path.display());
            writer.write_record(headers)?;
            self.headers = Some(headers.to_vec());
        }
        for record in records {
            writer.write_record(record.dump_values())?;
        }
        Ok(records.len())
    }

    /// Flushes buffered rows to disk.
    pub fn flush_and_close(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// The cumulative training and test files plus the miscellaneous output.
pub struct DatasetSink {
    pub train: DatasetWriter,
    pub test: DatasetWriter,
    pub misc: DatasetWriter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub misc_rows: usize,
}

impl DatasetSink {
    pub fn new(output_dir: &Path) -> Self {
        DatasetSink {
            train: DatasetWriter::new(output_dir.join(TRAIN_FILE)),
            test: DatasetWriter::new(output_dir.join(TEST_FILE)),
            misc: DatasetWriter::new(output_dir.join(MISC_FILE)),
        }
    }

    pub fn append(
        &mut self,
        file: &str,
        headers: &[String],
        split: &DatasetSplit,
        destination: Destination,
    ) -> Result<AppendSummary> {
        match destination {
            Destination::Miscellaneous => {
                self.misc.check_headers(file, headers)?;
                self.misc.open()?;
                let misc_rows = self.misc.write_records(headers, &split.train)?;
                Ok(AppendSummary {
                    misc_rows,
                    ..AppendSummary::default()
                })
            }
            Destination::Cumulative => {
                self.train.check_headers(file, headers)?;
                self.test.check_headers(file, headers)?;
                // Both files must be writable before either receives this file's rows.
                self.train.open()?;
                self.test.open()?;
                Ok(AppendSummary {
                    train_rows: self.train.write_records(headers, &split.train)?,
                    test_rows: self.test.write_records(headers, &split.test)?,
                    misc_rows: 0,
                })
            }
        }
    }

    pub fn flush_and_close(&mut self) -> Result<()> {
        self.train.flush_and_close()?;
        self.test.flush_and_close()?;
        self.misc.flush_and_close()
    }
}
