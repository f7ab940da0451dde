use thiserror::Error;

/// Failures surfaced by the upload, chat and sample-document requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, aborted)
    #[error("Network request failed: {0}")]
    Transport(String),

    /// A response arrived but its body could not be read or decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The backend answered with an `error` field
    #[error("{0}")]
    Server(String),

    #[error("Request failed with status {0}")]
    Status(u16),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
