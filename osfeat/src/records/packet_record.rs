use crate::errors::{PipelineError, Result};

pub const STREAM: &str = "tcp.stream";
pub const TIME_RELATIVE: &str = "frame.time_relative";
pub const SOURCE_IP: &str = "ip.src";
pub const TTL: &str = "ip.ttl";
pub const TIME_DELTA: &str = "tcp.time_delta";
pub const PAYLOAD_LEN: &str = "tcp.len";

/// Columns dropped before anything else, they are too sparse in tshark exports.
pub const UNRELIABLE_COLUMNS: [&str; 2] = ["ip.tos", "tcp.options.mss_val"];

/// Columns exported by tshark as hexadecimal strings.
pub const HEX_COLUMNS: [&str; 3] = ["ip.dsfield", "tcp.flags", "ip.flags"];

/// Column layout of a normalized capture table.
///
/// `columns` lists every retained column in file order. The typed indices point
/// into it for the fields the pipeline reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub columns: Vec<String>,
    stream: usize,
    time_relative: usize,
    source_ip: usize,
    ttl: usize,
    time_delta: usize,
    payload_len: usize,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let find = |name: &str| {
            columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
        };

        Ok(Schema {
            stream: find(STREAM)?,
            time_relative: find(TIME_RELATIVE)?,
            source_ip: find(SOURCE_IP)?,
            ttl: find(TTL)?,
            time_delta: find(TIME_DELTA)?,
            payload_len: find(PAYLOAD_LEN)?,
            columns,
        })
    }

    /// Builds a `PacketRecord` from one row of already cleaned string values.
    pub fn record(&self, row: usize, values: Vec<String>) -> Result<PacketRecord> {
        let parse_f64 =
            |index: usize| parse_field::<f64>(&self.columns[index], row, &values[index]);

        Ok(PacketRecord {
            stream: parse_field::<u64>(&self.columns[self.stream], row, &values[self.stream])?,
            time_relative: parse_f64(self.time_relative)?,
            source_ip: values[self.source_ip].clone(),
            ttl: parse_f64(self.ttl)?,
            time_delta: parse_f64(self.time_delta)?,
            payload_len: parse_f64(self.payload_len)?,
            values,
        })
    }
}

fn parse_field<T: std::str::FromStr>(column: &str, row: usize, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| PipelineError::Parse {
        column: column.to_string(),
        row,
        value: value.to_string(),
    })
}

/// One packet of a capture export.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketRecord {
    pub stream: u64,
    pub time_relative: f64,
    pub source_ip: String,
    pub ttl: f64,
    pub time_delta: f64,
    pub payload_len: f64,
    /// All retained columns in schema order, written back out verbatim.
    pub values: Vec<String>,
}

/// A normalized capture: sorted by stream then relative time.
#[derive(Debug, Clone)]
pub struct CaptureTable {
    pub schema: Schema,
    pub records: Vec<PacketRecord>,
}
