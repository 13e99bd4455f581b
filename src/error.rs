use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the panel, one variant per failure class.
///
/// Every variant renders as a plain human-readable message; the front end
/// shows that text near the control that triggered it and nothing else.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP response (connection, timeout,
    /// malformed body).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-OK status. The message is whatever
    /// the server put in its JSON body, or a generic fallback.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    /// Rejected before any network call was made.
    #[error("{0}")]
    Validation(String),
    /// Local I/O failure (reading the image file, terminal input).
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The environment or arguments are unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True if this error came back from the server rather than the client.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}
