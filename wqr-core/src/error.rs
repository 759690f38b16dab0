/// Error types for the analysis service repository
use std::fmt;
use thiserror::Error;

/// The repository operation a failure belongs to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operation {
    ListSamples,
    GetSample,
    GetSummary,
    GetPollutionAggregates,
    ExportCsv,
    ExportReport,
    ExportSampleReport,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListSamples => "list samples",
            Operation::GetSample => "get sample",
            Operation::GetSummary => "get summary",
            Operation::GetPollutionAggregates => "get pollution aggregates",
            Operation::ExportCsv => "export csv",
            Operation::ExportReport => "export report",
            Operation::ExportSampleReport => "export sample report",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure of a single repository call. Nothing is retried automatically.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The request could not be sent, timed out, or got a non-success status
    #[error("{operation} failed: {detail}")]
    Network { operation: Operation, detail: String },

    /// The response arrived but its shape did not match the data model
    #[error("{operation} returned malformed data: {detail}")]
    DataIntegrity { operation: Operation, detail: String },
}

impl RepositoryError {
    pub fn network(operation: Operation, detail: impl fmt::Display) -> Self {
        RepositoryError::Network {
            operation,
            detail: detail.to_string(),
        }
    }

    pub fn data_integrity(operation: Operation, detail: impl fmt::Display) -> Self {
        RepositoryError::DataIntegrity {
            operation,
            detail: detail.to_string(),
        }
    }

    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            RepositoryError::Network { operation, .. }
            | RepositoryError::DataIntegrity { operation, .. } => *operation,
        }
    }
}

/// Type alias for Results using RepositoryError
pub type Result<T> = std::result::Result<T, RepositoryError>;
