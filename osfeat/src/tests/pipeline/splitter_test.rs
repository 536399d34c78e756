#[cfg(test)]
mod tests {
    use crate::{
        labels::LabelTable,
        pipeline::{
            aggregates::attach_aggregates,
            labeler::{label, LabeledRecord},
            splitter::{Destination, SplitConfig},
        },
        tests::fixtures::{single_stream, windowed},
    };

    fn labeled(count: usize) -> Vec<LabeledRecord> {
        // one stream, windows of ten: every row keeps a defined aggregate
        let rows = single_stream(count, "192.168.10.9");
        label(attach_aggregates(windowed(rows)), &LabelTable::default()).records
    }

    #[test]
    fn test_split_900_rows() {
        let records = labeled(900);
        assert_eq!(records.len(), 900);
        let expected_test = records[700..840].to_vec();

        let split = SplitConfig::default().split(records);
        assert_eq!(split.train.len(), 700);
        assert_eq!(split.test, expected_test);
    }

    #[test]
    fn test_split_short_files() {
        let split = SplitConfig::default().split(labeled(750));
        assert_eq!((split.train.len(), split.test.len()), (700, 50));

        let split = SplitConfig::default().split(labeled(500));
        assert_eq!((split.train.len(), split.test.len()), (500, 0));

        let split = SplitConfig::default().split(Vec::new());
        assert!(split.train.is_empty() && split.test.is_empty());
    }

    #[test]
    fn test_custom_budget() {
        let config = SplitConfig {
            train_rows: 20,
            test_rows: 5,
            skip_file: None,
        };
        let split = config.split(labeled(40));
        assert_eq!((split.train.len(), split.test.len()), (20, 5));
    }

    #[test]
    fn test_destination() {
        let config = SplitConfig {
            skip_file: Some("monday.csv".to_string()),
            ..SplitConfig::default()
        };
        assert_eq!(config.destination("monday.csv"), Destination::Miscellaneous);
        assert_eq!(config.destination("tuesday.csv"), Destination::Cumulative);
        assert_eq!(
            SplitConfig::default().destination("monday.csv"),
            Destination::Cumulative
        );
    }
}
