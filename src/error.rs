use thiserror::Error;

use crate::core::SeriesId;
use crate::ingest::ParseIssue;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("dataset `{name}` not found")]
    DatasetNotFound { name: String },

    #[error("column `{column}` not found in dataset `{dataset}`")]
    ColumnNotFound { dataset: String, column: String },

    #[error("series {id} not found")]
    SeriesNotFound { id: SeriesId },

    #[error("failed to load file `{file}`: {}", summarize_issues(.issues))]
    Parse {
        file: String,
        issues: Vec<ParseIssue>,
    },

    #[error("trace index {index} out of range for {len} traces")]
    InvalidTraceIndex { index: usize, len: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

fn summarize_issues(issues: &[ParseIssue]) -> String {
    match issues {
        [] => "unknown parse error".to_owned(),
        [first] => first.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
