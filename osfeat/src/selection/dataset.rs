use std::{collections::BTreeSet, path::Path};

use csv::WriterBuilder;
use log::debug;

use crate::{
    errors::{PipelineError, Result},
    parsers::csv_parser::{CsvParser, RawTable},
};

/// Parses one feature value; boolean flag fields count as 1 and 0.
fn parse_feature(value: &str) -> Option<f64> {
    if value.eq_ignore_ascii_case("true") {
        return Some(1.0);
    }
    if value.eq_ignore_ascii_case("false") {
        return Some(0.0);
    }
    value.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Numeric feature columns plus an encoded class label, read from a labeled dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub label_name: String,
    /// Column-major: `columns[feature][sample]`.
    pub columns: Vec<Vec<f64>>,
    /// Index into `classes` for every sample.
    pub labels: Vec<usize>,
    /// Distinct label values, sorted.
    pub classes: Vec<String>,
}

impl FeatureMatrix {
    pub fn load<P: AsRef<Path>>(path: P, requested: &[String]) -> Result<Self> {
        let raw = CsvParser.read_table(path)?;
        Self::from_table(&raw, requested)
    }

    /// Takes the requested columns in file order. The last requested name is the label.
    pub fn from_table(raw: &RawTable, requested: &[String]) -> Result<Self> {
        let (label_name, feature_names) = requested
            .split_last()
            .ok_or_else(|| PipelineError::Config("no columns requested".to_string()))?;

        let find = |name: &String| {
            raw.column_index(name)
                .ok_or_else(|| PipelineError::MissingColumn(name.clone()))
        };

        let label_index = find(label_name)?;
        let mut features = feature_names
            .iter()
            .map(|name| Ok((find(name)?, name.clone())))
            .collect::<Result<Vec<(usize, String)>>>()?;
        features.sort_by_key(|(index, _)| *index);
        features.dedup_by_key(|(index, _)| *index);

        if raw.rows.is_empty() {
            return Err(PipelineError::EmptyDataset(
                "labeled dataset has no rows".to_string(),
            ));
        }

        let mut columns = vec![Vec::with_capacity(raw.rows.len()); features.len()];
        for (row, values) in raw.rows.iter().enumerate() {
            for (column, (index, name)) in columns.iter_mut().zip(&features) {
                let value = parse_feature(&values[*index]).ok_or_else(|| PipelineError::Parse {
                    column: name.clone(),
                    row,
                    value: values[*index].clone(),
                })?;
                column.push(value);
            }
        }

        let classes: Vec<String> = raw
            .rows
            .iter()
            .map(|values| values[label_index].clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        let labels = raw
            .rows
            .iter()
            .map(|values| {
                classes
                    .binary_search(&values[label_index])
                    .unwrap_or_default()
            })
            .collect();

        Ok(FeatureMatrix {
            names: features.into_iter().map(|(_, name)| name).collect(),
            label_name: label_name.clone(),
            columns,
            labels,
            classes,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Drops every feature whose value never differs from the first row's.
    /// Returns the names of the dropped features.
    pub fn drop_constant_columns(&mut self) -> Vec<String> {
        let constant: Vec<bool> = self
            .columns
            .iter()
            .map(|column| match column.first() {
                Some(first) => column.iter().all(|value| value == first),
                None => false,
            })
            .collect();

        let mut dropped = Vec::new();
        let mut kept_names = Vec::new();
        let mut kept_columns = Vec::new();
        for ((name, column), is_constant) in self
            .names
            .drain(..)
            .zip(self.columns.drain(..))
            .zip(constant)
        {
            if is_constant {
                dropped.push(name);
            } else {
                kept_names.push(name);
                kept_columns.push(column);
            }
        }
        self.names = kept_names;
        self.columns = kept_columns;

        debug!("Dropped {} constant columns: {:?}", dropped.len(), dropped);
        dropped
    }

    /// Writes the retained features and the label column to a CSV file.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = WriterBuilder::new().from_path(path)?;

        let mut header = self.names.clone();
        header.push(self.label_name.clone());
        writer.write_record(&header)?;

        for sample in 0..self.n_samples() {
            let mut record: Vec<String> = self
                .columns
                .iter()
                .map(|column| column[sample].to_string())
                .collect();
            record.push(self.classes[self.labels[sample]].clone());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
