use std::collections::BTreeSet;

use log::debug;

use super::aggregates::{FeaturedRecord, FeaturedTable};
use crate::{labels::LabelTable, records::packet_record::Schema};

pub const LABEL_COLUMN: &str = "os";

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub record: FeaturedRecord,
    pub os: String,
}

#[derive(Debug, Clone)]
pub struct LabeledTable {
    pub schema: Schema,
    pub records: Vec<LabeledRecord>,
}

/// Labels every packet by its source address, dropping packets from unknown hosts.
pub fn label(table: FeaturedTable, labels: &LabelTable) -> LabeledTable {
    let unknown: BTreeSet<&str> = table
        .records
        .iter()
        .map(|record| record.packet.source_ip.as_str())
        .filter(|address| !labels.contains(address))
        .collect();

    if !unknown.is_empty() {
        debug!("Dropping rows of {} unlabeled addresses: {:?}", unknown.len(), unknown);
    }

    let records = table
        .records
        .into_iter()
        .filter_map(|record| {
            let os = labels.label(&record.packet.source_ip)?.to_string();
            Some(LabeledRecord { record, os })
        })
        .collect();

    LabeledTable {
        schema: table.schema,
        records,
    }
}

pub const WINDOW_COLUMN: &str = "stream_key";

impl LabeledRecord {
    pub fn dump_values(&self) -> Vec<String> {
        let mut values = self.record.packet.values.clone();
        values.push(self.record.window.to_string());
        values.extend(self.record.aggregate.dump_values());
        values.push(self.os.clone());
        values
    }
}

impl LabeledTable {
    pub fn headers(&self) -> Vec<String> {
        labeled_headers(&self.schema)
    }
}

pub fn labeled_headers(schema: &Schema) -> Vec<String> {
    let mut headers = schema.columns.clone();
    headers.push(WINDOW_COLUMN.to_string());
    headers.extend(crate::pipeline::aggregates::Signal::headers());
    headers.push(LABEL_COLUMN.to_string());
    headers
}
