use std::collections::BTreeMap;

/// Ground-truth operating system of each known host, keyed by source address.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    labels: BTreeMap<String, String>,
}

impl LabelTable {
    pub fn new(labels: BTreeMap<String, String>) -> Self {
        LabelTable { labels }
    }

    pub fn label(&self, address: &str) -> Option<&str> {
        self.labels.get(address).map(String::as_str)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.labels.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Hosts of the CIC-IDS-2017 capture and of the real-traffic lab captures.
pub fn default_labels() -> BTreeMap<String, String> {
    [
        // CIC-IDS-2017
        ("192.168.10.51", "Ubuntu"),
        ("192.168.10.19", "Ubuntu"),
        ("192.168.10.17", "Ubuntu"),
        ("192.168.10.16", "Ubuntu"),
        ("192.168.10.12", "Ubuntu"),
        ("192.168.10.9", "Windows"),
        ("192.168.10.5", "Windows"),
        ("192.168.10.8", "Windows"),
        ("192.168.10.14", "Windows"),
        ("192.168.10.15", "Windows"),
        ("192.168.10.25", "macOS"),
        // real traffic
        ("10.0.0.6", "Win 7"),
        ("192.168.0.100", "Win10"),
        ("192.168.1.11", "Win10"),
        ("132.73.223.74", "Win10"),
        ("192.168.1.34", "Win11"),
        ("192.168.1.105", "Win11"),
        ("192.168.1.81", "Mac2017"),
        ("192.168.31.59", "Mac2018"),
        ("192.168.1.56", "Mac2019"),
        ("192.168.0.10", "Mac2020"),
        ("10.100.102.8", "Rhel8"),
        ("192.168.43.80", "Pop"),
        ("10.100.102.7", "Ubuntu2018"),
        ("10.0.0.7", "Arch"),
        ("10.0.0.5", "Ubuntu 20.4"),
    ]
    .into_iter()
    .map(|(address, os)| (address.to_string(), os.to_string()))
    .collect()
}

impl Default for LabelTable {
    fn default() -> Self {
        LabelTable::new(default_labels())
    }
}
