use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot parse value {value:?} in column {column} (row {row})")]
    Parse {
        column: String,
        row: usize,
        value: String,
    },

    #[error("required column not found: {0}")]
    MissingColumn(String),

    #[error("header of {file} does not match the header already written to {target}")]
    SchemaMismatch { file: String, target: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("dataset is empty: {0}")]
    EmptyDataset(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
