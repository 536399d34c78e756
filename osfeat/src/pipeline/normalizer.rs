use log::debug;

use crate::{
    errors::{PipelineError, Result},
    parsers::csv_parser::RawTable,
    records::packet_record::{CaptureTable, Schema, HEX_COLUMNS, UNRELIABLE_COLUMNS},
};

/// Spellings that pandas reads as a missing value.
const NA_VALUES: [&str; 8] = ["", "NaN", "nan", "NA", "N/A", "null", "None", "<NA>"];

pub fn is_missing(value: &str) -> bool {
    NA_VALUES.contains(&value.trim())
}

/// Parses a hexadecimal field such as `0x0018` (prefix optional) into an integer.
pub fn parse_hex(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16).ok()
}

/// Cleans a raw capture export and puts it into stream order.
///
/// Drops the unreliable columns, then every row with a missing value, decodes
/// the hexadecimal fields and sorts by stream id and relative timestamp.
pub fn normalize(raw: RawTable) -> Result<CaptureTable> {
    let keep: Vec<usize> = raw
        .headers
        .iter()
        .enumerate()
        .filter(|(_, header)| !UNRELIABLE_COLUMNS.contains(&header.as_str()))
        .map(|(index, _)| index)
        .collect();

    for column in UNRELIABLE_COLUMNS {
        if raw.column_index(column).is_none() {
            debug!("Column {} not present, nothing to drop", column);
        }
    }

    let columns: Vec<String> = keep.iter().map(|&i| raw.headers[i].clone()).collect();
    let schema = Schema::new(columns)?;

    let hex_indices = HEX_COLUMNS
        .iter()
        .map(|name| {
            schema
                .columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
        })
        .collect::<Result<Vec<usize>>>()?;

    let total = raw.rows.len();
    let mut records = Vec::with_capacity(total);

    for (row, raw_values) in raw.rows.into_iter().enumerate() {
        let mut values: Vec<String> = keep.iter().map(|&i| raw_values[i].clone()).collect();
        if values.iter().any(|value| is_missing(value)) {
            continue;
        }

        for &index in &hex_indices {
            let decoded = parse_hex(&values[index]).ok_or_else(|| PipelineError::Parse {
                column: schema.columns[index].clone(),
                row,
                value: values[index].clone(),
            })?;
            values[index] = decoded.to_string();
        }

        records.push(schema.record(row, values)?);
    }

    debug!(
        "Normalizer kept {} of {} rows ({} with missing values)",
        records.len(),
        total,
        total - records.len()
    );

    // stable, so packets with equal timestamps keep their capture order
    records.sort_by(|a, b| {
        a.stream
            .cmp(&b.stream)
            .then(a.time_relative.total_cmp(&b.time_relative))
    });

    Ok(CaptureTable { schema, records })
}
