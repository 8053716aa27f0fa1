//! Error types for the core library.

use thiserror::Error;

/// Main error type for the core library.
///
/// Sending to an identity that is missing from the current presence set is
/// deliberately not an error: presence snapshots can lag behind reality.
#[derive(Error, Debug)]
pub enum Error {
    /// Local input rejected before anything is sent upstream
    #[error("validation error: {0}")]
    Validation(String),

    /// Inbound event missing required fields; dropped by the router
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// Local send attempted before the join was acknowledged
    #[error("not joined: wait for the join acknowledgment before sending")]
    NotJoined,

    /// Join requested after the session was already established
    #[error("already joined as {0}")]
    AlreadyJoined(String),

    /// Transport channel error
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl Error {
    /// Whether this error was raised by local validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
