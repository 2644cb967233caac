use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading, aggregating or rendering the nutrition data
#[derive(Debug, Error)]
pub enum NutritionError {
    /// Input dataset absent at startup
    #[error("input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    /// Any failure while reading or transforming the table
    #[error("processing error: {0}")]
    Processing(String),

    /// Ranking requested against an empty dataset
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Chart backend failure
    #[error("render error: {0}")]
    Render(String),

    /// Configuration file unreadable or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error outside of the data library
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PolarsError> for NutritionError {
    fn from(err: PolarsError) -> Self {
        NutritionError::Processing(err.to_string())
    }
}

/// Coarse classification used by the service to pick its degraded state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInputFile,
    ProcessingError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingInputFile => "missing_input_file",
            ErrorKind::ProcessingError => "processing_error",
        }
    }
}

impl NutritionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NutritionError::MissingInputFile(_) => ErrorKind::MissingInputFile,
            _ => ErrorKind::ProcessingError,
        }
    }

    /// Wrap a chart backend error
    pub(crate) fn render(err: impl std::fmt::Display) -> Self {
        NutritionError::Render(err.to_string())
    }
}

/// Type alias for Results using NutritionError
pub type Result<T> = std::result::Result<T, NutritionError>;
