use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Configuration invalid: {0}")]
    ConfigInvalid(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed catalog response: {0}")]
    MalformedResponse(String),

    #[error("Invalid metadata_modified timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
}

impl ExplorerError {
    /// True when the request itself failed to complete.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
