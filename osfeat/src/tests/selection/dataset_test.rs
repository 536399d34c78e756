#[cfg(test)]
mod tests {
    use crate::{
        errors::PipelineError,
        parsers::csv_parser::{CsvParser, RawTable},
        selection::dataset::FeatureMatrix,
    };

    fn raw() -> RawTable {
        let csv = "\
ip.ttl,tcp.len,ip.flags.rb,os,tcp.len
64,10,0,Ubuntu,99
128,0,0,Windows,99
64,20,0,Ubuntu,99
128,5,0,Windows,99
";
        CsvParser.read_from(csv.as_bytes()).unwrap()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_duplicate_headers_keep_first() {
        let raw = raw();
        assert_eq!(raw.headers, vec!["ip.ttl", "tcp.len", "ip.flags.rb", "os"]);
        assert_eq!(raw.rows[0], vec!["64", "10", "0", "Ubuntu"]);
    }

    #[test]
    fn test_load_in_file_order() {
        let matrix =
            FeatureMatrix::from_table(&raw(), &names(&["ip.flags.rb", "tcp.len", "ip.ttl", "os"]))
                .unwrap();

        assert_eq!(matrix.names, vec!["ip.ttl", "tcp.len", "ip.flags.rb"]);
        assert_eq!(matrix.label_name, "os");
        assert_eq!(matrix.classes, vec!["Ubuntu", "Windows"]);
        assert_eq!(matrix.labels, vec![0, 1, 0, 1]);
        assert_eq!(matrix.columns[1], vec![10.0, 0.0, 20.0, 5.0]);
        assert_eq!(matrix.n_samples(), 4);
    }

    #[test]
    fn test_missing_column() {
        assert!(matches!(
            FeatureMatrix::from_table(&raw(), &names(&["ip.ttl", "tcp.window_size", "os"])),
            Err(PipelineError::MissingColumn(column)) if column == "tcp.window_size"
        ));
        assert!(matches!(
            FeatureMatrix::from_table(&raw(), &[]),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_non_numeric_feature() {
        assert!(matches!(
            FeatureMatrix::from_table(&raw(), &names(&["os", "ip.ttl"])),
            Err(PipelineError::Parse { column, .. }) if column == "os"
        ));
    }

    #[test]
    fn test_boolean_flag_columns() {
        let csv = "\
ip.flags.df,tcp.flags.syn,ip.ttl,os
True,false,64,Linux
False,TRUE,128,Windows
true,False,64,Linux
";
        let raw = CsvParser.read_from(csv.as_bytes()).unwrap();
        let requested = names(&["ip.flags.df", "tcp.flags.syn", "ip.ttl", "os"]);
        let matrix = FeatureMatrix::from_table(&raw, &requested).unwrap();

        assert_eq!(matrix.columns[0], vec![1.0, 0.0, 1.0]);
        assert_eq!(matrix.columns[1], vec![0.0, 1.0, 0.0]);
        assert_eq!(matrix.columns[2], vec![64.0, 128.0, 64.0]);

        let csv = "ip.flags.df,os\nyes,Linux\n";
        let raw = CsvParser.read_from(csv.as_bytes()).unwrap();
        assert!(matches!(
            FeatureMatrix::from_table(&raw, &names(&["ip.flags.df", "os"])),
            Err(PipelineError::Parse { column, value, .. })
                if column == "ip.flags.df" && value == "yes"
        ));
    }

    #[test]
    fn test_drop_constant_columns() {
        let mut matrix =
            FeatureMatrix::from_table(&raw(), &names(&["ip.ttl", "tcp.len", "ip.flags.rb", "os"]))
                .unwrap();

        assert_eq!(matrix.drop_constant_columns(), vec!["ip.flags.rb"]);
        assert_eq!(matrix.names, vec!["ip.ttl", "tcp.len"]);
        assert_eq!(matrix.columns.len(), 2);
    }

    #[test]
    fn test_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train-set.csv");
        let mut matrix =
            FeatureMatrix::from_table(&raw(), &names(&["ip.ttl", "ip.flags.rb", "os"])).unwrap();
        matrix.drop_constant_columns();
        matrix.export(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ip.ttl,os\n64,Ubuntu\n128,Windows\n64,Ubuntu\n128,Windows\n");
    }
}
