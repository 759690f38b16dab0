/// Error types for capture and export workflows
use thiserror::Error;
use wqr_core::error::RepositoryError;

/// Failure to capture one rendered region. Never fatal to an export.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The region has not been rendered
    #[error("region {0} is not rendered")]
    MissingRegion(String),

    /// The region snapshot exists but could not be read
    #[error("failed to read region {region}: {source}")]
    Io {
        region: String,
        #[source]
        source: std::io::Error,
    },

    /// The region snapshot is not a PNG image
    #[error("region {0} is not a PNG image")]
    InvalidImage(String),
}

/// Failure of an export workflow. Raised at most once per run.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Fetching or submitting to the analysis service failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The returned document could not be saved
    #[error("failed to save {filename}: {source}")]
    Delivery {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// The sample has not been loaded, so there is nothing to report on
    #[error("sample {0} is not loaded")]
    NotLoaded(String),

    /// The owning view was closed before the export finished
    #[error("export cancelled")]
    Cancelled,
}
