use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer failures
// ---------------------------------------------------------------------------

/// Everything that can go wrong between a file on disk and a typed dataset.
///
/// None of these are recovered from: the page that triggered the load is
/// aborted and the message is shown in its place.
#[derive(Debug, Error)]
pub enum DataError {
    /// Input file is missing or cannot be read.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a well-formed spreadsheet.
    #[error("{} is not a readable spreadsheet: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// A column the dashboard needs is absent from the loaded dataset.
    #[error("dataset '{dataset}' has no column '{column}'")]
    Lookup { dataset: String, column: String },
}

impl DataError {
    pub fn format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DataError::Format {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn lookup(dataset: impl Into<String>, column: impl Into<String>) -> Self {
        DataError::Lookup {
            dataset: dataset.into(),
            column: column.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
