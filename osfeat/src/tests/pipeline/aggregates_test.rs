#[cfg(test)]
mod tests {
    use crate::{
        pipeline::{
            aggregates::{attach_aggregates, window_aggregates, Signal},
            stats::FeatureStats,
            windower::{WindowedRecord, WindowedTable},
        },
        tests::fixtures::{packet_row, single_stream, windowed},
    };

    #[test]
    fn test_feature_stats() {
        let stats: FeatureStats = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert_eq!(stats.get_count(), 8);
        assert_eq!(stats.get_mean(), Some(5.0));
        // sample standard deviation, sqrt(32 / 7)
        assert!((stats.get_std().unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);

        let single: FeatureStats = [3.0].into_iter().collect();
        assert_eq!(single.get_mean(), Some(3.0));
        assert_eq!(single.get_std(), None);
        assert_eq!(FeatureStats::new().get_mean(), None);
    }

    #[test]
    fn test_feature_stats_match_two_pass() {
        let values = [0.000112, 0.1, 0.0301, 1.72, 0.000087, 0.3, 0.05, 0.000204, 2.4, 0.0009];
        let stats: FeatureStats = values.into_iter().collect();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        assert!((stats.get_mean().unwrap() - mean).abs() <= 1e-12 * mean.abs());
        assert!((stats.get_std().unwrap() - variance.sqrt()).abs() <= 1e-12 * variance.sqrt());

        let constant: FeatureStats = [64.0; 10].into_iter().collect();
        assert_eq!(constant.get_mean(), Some(64.0));
        assert_eq!(constant.get_std(), Some(0.0));
    }

    #[test]
    fn test_signal_headers() {
        assert_eq!(
            Signal::headers(),
            vec![
                "average_time_delta",
                "std_time_delta",
                "average_ttl",
                "std_ttl",
                "average_len",
                "std_len"
            ]
        );
    }

    #[test]
    fn test_single_stream_of_25_keeps_every_row() {
        let table = attach_aggregates(windowed(single_stream(25, "10.0.0.5")));

        assert_eq!(table.records.len(), 25);
        let first = table.records[0].aggregate;
        assert_eq!(first.ttl.mean, 64.0);
        assert_eq!(first.ttl.std, 0.0);
        assert!((first.time_delta.mean - 0.55).abs() < 1e-12);
        // sample std of 0.1..=1.0
        assert!((first.time_delta.std - 0.302_765_035_409_749_6).abs() < 1e-12);

        let last = table.records[24].aggregate;
        assert!((last.time_delta.mean - 2.3).abs() < 1e-12);
        assert!(last.time_delta.std > 0.0);
    }

    #[test]
    fn test_single_packet_window_is_dropped() {
        let featured = attach_aggregates(windowed(single_stream(11, "10.0.0.5")));
        assert_eq!(featured.records.len(), 10);
        assert!(featured.records.iter().all(|r| r.window == 1));

        let mut rows = single_stream(20, "10.0.0.5");
        rows.push(packet_row(7, 0.0, "10.0.0.5", 64, 0.0, 0));
        let featured = attach_aggregates(windowed(rows));
        assert_eq!(featured.records.len(), 20);
        assert!(featured.records.iter().all(|r| r.packet.stream == 0));
    }

    #[test]
    fn test_aggregates_identical_within_window() {
        let mut rows = single_stream(23, "10.0.0.5");
        for i in 0..6 {
            rows.push(packet_row(3, i as f64, "10.0.0.6", 128 - i as u8, 0.05 * i as f64, i * 10));
        }
        let featured = attach_aggregates(windowed(rows));

        for pair in featured.records.windows(2) {
            if pair[0].window == pair[1].window {
                assert_eq!(
                    pair[0].aggregate.dump_values(),
                    pair[1].aggregate.dump_values()
                );
                assert_eq!(
                    pair[0].aggregate.ttl.std.to_bits(),
                    pair[1].aggregate.ttl.std.to_bits()
                );
            }
        }
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let mut rows = single_stream(31, "10.0.0.5");
        rows.push(packet_row(4, 0.0, "10.0.0.6", 60, 0.2, 12));
        rows.push(packet_row(4, 0.5, "10.0.0.6", 61, 0.3, 0));
        let first = attach_aggregates(windowed(rows));

        let again = attach_aggregates(WindowedTable {
            schema: first.schema.clone(),
            records: first
                .records
                .iter()
                .map(|r| WindowedRecord {
                    window: r.window,
                    packet: r.packet.clone(),
                })
                .collect(),
        });

        assert_eq!(first.records, again.records);
    }

    #[test]
    fn test_window_aggregates_mark_undefined_windows() {
        let table = windowed(single_stream(11, "10.0.0.5"));
        let aggregates = window_aggregates(&table.records);

        assert_eq!(aggregates.len(), 2);
        assert!(aggregates[&1].is_some());
        assert!(aggregates[&2].is_none());
    }
}
