use std::collections::BTreeMap;

use log::debug;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use super::{
    stats::FeatureStats,
    windower::{WindowKey, WindowedRecord, WindowedTable},
};
use crate::records::packet_record::{PacketRecord, Schema};

/// The per-packet signals summarized over each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum Signal {
    #[strum(serialize = "time_delta")]
    TimeDelta,
    #[strum(serialize = "ttl")]
    Ttl,
    #[strum(serialize = "len")]
    PayloadLen,
}

impl Signal {
    pub fn value(&self, packet: &PacketRecord) -> f64 {
        match self {
            Signal::TimeDelta => packet.time_delta,
            Signal::Ttl => packet.ttl,
            Signal::PayloadLen => packet.payload_len,
        }
    }

    pub fn headers() -> Vec<String> {
        Signal::iter()
            .flat_map(|signal| [format!("average_{signal}"), format!("std_{signal}")])
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSummary {
    pub mean: f64,
    pub std: f64,
}

/// Mean and standard deviation of each signal over one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAggregate {
    pub time_delta: SignalSummary,
    pub ttl: SignalSummary,
    pub len: SignalSummary,
}

impl WindowAggregate {
    pub fn get(&self, signal: Signal) -> SignalSummary {
        match signal {
            Signal::TimeDelta => self.time_delta,
            Signal::Ttl => self.ttl,
            Signal::PayloadLen => self.len,
        }
    }

    /// Values in the same order as `Signal::headers`.
    pub fn dump_values(&self) -> Vec<String> {
        Signal::iter()
            .flat_map(|signal| {
                let summary = self.get(signal);
                [format!("{:?}", summary.mean), format!("{:?}", summary.std)]
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedRecord {
    pub window: WindowKey,
    pub packet: PacketRecord,
    pub aggregate: WindowAggregate,
}

#[derive(Debug, Clone)]
pub struct FeaturedTable {
    pub schema: Schema,
    pub records: Vec<FeaturedRecord>,
}

/// Accumulates one window's statistics for every signal.
#[derive(Default)]
struct WindowAccumulator {
    time_delta: FeatureStats,
    ttl: FeatureStats,
    len: FeatureStats,
}

impl WindowAccumulator {
    fn stats_mut(&mut self, signal: Signal) -> &mut FeatureStats {
        match signal {
            Signal::TimeDelta => &mut self.time_delta,
            Signal::Ttl => &mut self.ttl,
            Signal::PayloadLen => &mut self.len,
        }
    }

    /// `None` when any mean or standard deviation is undefined.
    fn finish(&self) -> Option<WindowAggregate> {
        let summary = |stats: &FeatureStats| {
            Some(SignalSummary {
                mean: stats.get_mean()?,
                std: stats.get_std()?,
            })
        };

        Some(WindowAggregate {
            time_delta: summary(&self.time_delta)?,
            ttl: summary(&self.ttl)?,
            len: summary(&self.len)?,
        })
    }
}

/// Computes every window's aggregate, keyed by window.
///
/// Windows with a single packet map to `None`.
pub fn window_aggregates(
    records: &[WindowedRecord],
) -> BTreeMap<WindowKey, Option<WindowAggregate>> {
    let mut accumulators: BTreeMap<WindowKey, WindowAccumulator> = BTreeMap::new();

    for record in records {
        let accumulator = accumulators.entry(record.window).or_default();
        for signal in Signal::iter() {
            accumulator
                .stats_mut(signal)
                .add_value(signal.value(&record.packet));
        }
    }

    accumulators
        .into_iter()
        .map(|(window, accumulator)| (window, accumulator.finish()))
        .collect()
}

/// Joins each window's aggregate back onto its packets and drops the packets
/// whose window has no defined aggregate.
pub fn attach_aggregates(table: WindowedTable) -> FeaturedTable {
    let aggregates = window_aggregates(&table.records);
    let total = table.records.len();

    let records: Vec<FeaturedRecord> = table
        .records
        .into_iter()
        .filter_map(|record| {
            let aggregate = aggregates.get(&record.window).copied().flatten()?;
            Some(FeaturedRecord {
                window: record.window,
                packet: record.packet,
                aggregate,
            })
        })
        .collect();

    debug!(
        "Aggregated {} windows, dropped {} rows without a defined aggregate",
        aggregates.len(),
        total - records.len()
    );

    FeaturedTable {
        schema: table.schema,
        records,
    }
}
