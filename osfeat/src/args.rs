use std::{collections::BTreeMap, path::PathBuf};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{PipelineError, Result},
    labels::{default_labels, LabelTable},
    pipeline::{splitter::SplitConfig, windower::DEFAULT_WINDOW_SIZE},
    selection::SelectionConfig,
};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Path to a TOML configuration file, written with the defaults if it does not exist
    #[clap(long, global = true)]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the labeled training and test datasets from tshark CSV exports
    Label {
        /// The capture exports to process, handled in file name order
        #[clap(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving labeled.csv, test.csv and labeled_to_miss.csv
        #[clap(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// File name whose rows go to labeled_to_miss.csv instead
        #[clap(long)]
        skip_file: Option<String>,
    },

    /// Rank the features of a labeled dataset
    Select {
        /// The relative path to the labeled dataset
        path: PathBuf,

        /// The number of best features to select
        #[clap(short = 'k', long, default_value_t = 10)]
        top: usize,

        /// Columns to rank, comma separated, the label column last
        #[clap(long, value_delimiter = ',')]
        features: Option<Vec<String>>,

        /// Write the dataset without its constant columns to this file
        #[clap(long)]
        export_path: Option<PathBuf>,

        /// Write all scores to this CSV file
        #[clap(long)]
        report_path: Option<PathBuf>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Maximum number of packets per window
    pub size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            size: DEFAULT_WINDOW_SIZE,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub window: WindowConfig,
    pub split: SplitConfig,
    pub selection: SelectionConfig,
    /// Source address to operating system label
    pub labels: BTreeMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            window: WindowConfig::default(),
            split: SplitConfig::default(),
            selection: SelectionConfig::default(),
            labels: default_labels(),
        }
    }
}

impl ConfigFile {
    pub fn validate(&self) -> Result<()> {
        if self.window.size == 0 {
            return Err(PipelineError::Config("window.size must be at least 1".to_string()));
        }
        if self.labels.is_empty() {
            return Err(PipelineError::Config("the label table is empty".to_string()));
        }
        Ok(())
    }

    pub fn label_table(&self) -> LabelTable {
        LabelTable::new(self.labels.clone())
    }
}
