//! Failure taxonomy for the search pipeline.
//!
//! None of these escape the widget as a panic: every failure resets the
//! result set to empty, is logged, and is handed back as a value.

use thiserror::Error;

/// Why the data source could not produce a dataset.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("data not available for filtering: {0}")]
    DataUnavailable(#[from] FetchError),

    #[error("filter path not found: {path}")]
    PathNotFound { path: String },

    #[error("filter path '{path}' does not resolve to a list of records")]
    Shape { path: String },

    #[error("filter property not found: {field}")]
    FieldAccess { field: String },
}

impl SearchError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        SearchError::Configuration(reason.into())
    }

    /// Short stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Configuration(_) => "configuration",
            SearchError::DataUnavailable(_) => "data_unavailable",
            SearchError::PathNotFound { .. } => "path_not_found",
            SearchError::Shape { .. } => "shape",
            SearchError::FieldAccess { .. } => "field_access",
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
