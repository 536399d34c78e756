#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{
        labels::{default_labels, LabelTable},
        pipeline::{aggregates::attach_aggregates, labeler::label},
        tests::fixtures::{packet_row, single_stream, windowed},
    };

    fn mixed_rows() -> Vec<Vec<String>> {
        let mut rows = single_stream(12, "192.168.10.5");
        for i in 0..5 {
            rows.push(packet_row(1, i as f64, "10.0.0.99", 64, 0.1, 0));
        }
        for i in 0..4 {
            rows.push(packet_row(2, i as f64, "10.0.0.7", 64, 0.1 * i as f64, 40));
        }
        rows
    }

    #[test]
    fn test_default_table() {
        let table = LabelTable::default();
        assert_eq!(table.len(), 26);
        assert_eq!(table.label("192.168.10.25"), Some("macOS"));
        assert_eq!(table.label("10.0.0.5"), Some("Ubuntu 20.4"));
        assert_eq!(table.label("10.0.0.99"), None);
    }

    #[test]
    fn test_unknown_source_is_excluded() {
        let labels = LabelTable::default();
        let labeled = label(attach_aggregates(windowed(mixed_rows())), &labels);

        assert_eq!(labeled.records.len(), 12 + 4);
        assert!(labeled
            .records
            .iter()
            .all(|r| r.record.packet.source_ip != "10.0.0.99"));
        for record in &labeled.records {
            assert_eq!(
                Some(record.os.as_str()),
                labels.label(&record.record.packet.source_ip)
            );
        }
    }

    #[test]
    fn test_labels_follow_table() {
        let labels = LabelTable::new(BTreeMap::from([
            ("192.168.10.5".to_string(), "Windows".to_string()),
            ("10.0.0.99".to_string(), "Haiku".to_string()),
        ]));
        let labeled = label(attach_aggregates(windowed(mixed_rows())), &labels);

        let haiku = labeled.records.iter().filter(|r| r.os == "Haiku").count();
        let windows = labeled.records.iter().filter(|r| r.os == "Windows").count();
        assert_eq!(haiku, 5);
        assert_eq!(windows, 12);
        assert_eq!(labeled.records.len(), 17);
    }

    #[test]
    fn test_labeled_headers_and_values() {
        let labels = LabelTable::new(default_labels());
        let labeled = label(attach_aggregates(windowed(mixed_rows())), &labels);

        let headers = labeled.headers();
        assert_eq!(headers.len(), 11 + 1 + 6 + 1);
        assert_eq!(headers[11], "stream_key");
        assert_eq!(headers[12], "average_time_delta");
        assert_eq!(headers.last().map(String::as_str), Some("os"));

        let values = labeled.records[0].dump_values();
        assert_eq!(values.len(), headers.len());
        assert_eq!(values[11], "1");
        assert_eq!(values[14], "64.0");
        assert_eq!(values[15], "0.0");
        assert_eq!(values.last().map(String::as_str), Some("Windows"));
    }
}
