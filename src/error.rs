use thiserror::Error;

/// Failure of the one property-collection read
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("listings API returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure reported by a source that does not read over HTTP
    #[error("{0}")]
    Other(String),
}

/// Failure reading or writing the preference store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("preference store I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference store is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("preference store unavailable")]
    Unavailable,
}
