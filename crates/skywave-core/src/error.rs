use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkywaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleFailure),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Store error: {0}")]
    Store(String),
}

/// Failure modes of the hosted analysis service. All of them are recovered
/// through the fallback chain for telemetry queries and are terminal for the
/// primary analysis query.
#[derive(Error, Debug)]
pub enum OracleFailure {
    #[error("network failure: {0}")]
    Network(String),

    #[error("service returned status {0}")]
    Status(u16),

    #[error("response was not valid JSON: {0}")]
    Parse(String),

    #[error("response failed schema validation: {0}")]
    Schema(String),
}

impl SkywaveError {
    /// True when the error came from the analysis service rather than local
    /// input or state.
    pub fn is_oracle(&self) -> bool {
        matches!(self, SkywaveError::Oracle(_))
    }
}

pub type Result<T> = std::result::Result<T, SkywaveError>;
