use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("export file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read export file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single export row produced no entity.
///
/// Skips are expected in real exports; loaders log them at debug level and
/// carry on with the next row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("row has no product title")]
    MissingTitle,

    #[error("row has no value for required column {field}")]
    MissingField { field: &'static str },

    #[error("category \"{name}\" is excluded from the catalog")]
    ExcludedCategory { name: String },
}
