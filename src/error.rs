//! The error type of this crate.
use polars::prelude::PolarsError;
use thiserror::Error;

use std::io;
use std::path::PathBuf;


/// Errors returned by loading, fitting, evaluating and persisting models.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The file that caused the error.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// An error raised by `polars`.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// The model file is not valid JSON for the expected model type.
    #[error("malformed model file: {0}")]
    Json(#[from] serde_json::Error),

    /// A column required by a pipeline stage is missing.
    #[error("column `{0}` does not exist")]
    MissingColumn(String),

    /// A column has a type the stage cannot consume.
    #[error("column `{name}` has type {found}, expected {expected}")]
    ColumnType {
        /// Column name.
        name: String,
        /// The type found in the frame.
        found: String,
        /// The type the stage expects.
        expected: &'static str,
    },

    /// The label column cannot be read as a binary label.
    #[error("invalid label {value:?} in column `{column}` (row {row})")]
    InvalidLabel {
        /// Label column name.
        column: String,
        /// Row index.
        row: usize,
        /// The offending value.
        value: String,
    },

    /// The training set does not contain both classes.
    #[error("the label column `{0}` must contain both classes")]
    SingleClass(String),

    /// The frame has no rows.
    #[error("the data set is empty")]
    EmptyData,

    /// A hyper-parameter is out of its valid range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The model file has a version this crate cannot read.
    #[error("unsupported model format version {0}")]
    UnsupportedVersion(u32),
}


/// A `Result` alias with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;


impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
