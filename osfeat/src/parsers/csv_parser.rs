use crate::errors::Result;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A delimited file held fully in memory, every field still a string.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

pub struct CsvParser;

fn preprocess_headers(headers: &StringRecord) -> (Vec<String>, HashSet<usize>) {
    let mut unique_headers = Vec::new();
    let mut seen = HashSet::new();
    let mut indices = HashSet::new();

    for (index, header) in headers.iter().enumerate() {
        let trimmed_header = header.trim();
        if seen.insert(trimmed_header.to_string()) {
            unique_headers.push(trimmed_header.to_string());
            indices.insert(index);
        }
    }

    (unique_headers, indices)
}

fn filter_record(record: &StringRecord, indices: &HashSet<usize>, width: usize) -> Vec<String> {
    let mut filtered: Vec<String> = record
        .iter()
        .enumerate()
        .filter(|(index, _)| indices.contains(index))
        .map(|(_, field)| field.to_string())
        .collect();
    // short rows are padded so that absent trailing fields read as missing
    filtered.resize(width, String::new());
    filtered
}

impl CsvParser {
    pub fn read_table<P: AsRef<Path>>(&self, file_path: P) -> Result<RawTable> {
        debug!("Reading csv file: {:?}", file_path.as_ref());
        let file = File::open(file_path)?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<RawTable> {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let (unique_headers, indices) = preprocess_headers(&headers);
        let width = unique_headers.len();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(filter_record(&record, &indices, width));
        }

        Ok(RawTable {
            headers: unique_headers,
            rows,
        })
    }
}
