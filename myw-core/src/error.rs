use thiserror::Error;

/// Failure of a weather fetch. Both kinds are recoverable by fetching again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The source answered with a non-success status (unknown city, bad coordinates,
    /// forecast unavailable).
    #[error("weather source returned HTTP {status}")]
    SourceNotFound { status: u16 },

    /// Transport failure or a response body that could not be understood.
    #[error("transient weather source failure: {0}")]
    Transient(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transient(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Transient(format!("malformed response body: {err}"))
    }
}

/// Failure reported by a device position source. Never leaves the location resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location capability is not available on this platform")]
    Unsupported,

    #[error("location permission denied: {0}")]
    Denied(String),

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("location request timed out")]
    Timeout,
}
