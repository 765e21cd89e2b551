//! Error types for the Mandrill transport.

use thiserror::Error;

/// Errors raised while translating or sending a message.
#[derive(Debug, Error)]
pub enum Error {
    /// The message has no sender address.
    #[error("message has no sender address")]
    MissingSender,

    /// An attachment has no usable filename.
    #[error("attachment #{index} has no filename")]
    MissingFilename { index: usize },

    /// The HTTP client could not be built, or the request could not be
    /// completed (including timeouts).
    #[error("failed to dispatch request: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered 200 but the body was not usable JSON.
    #[error("failed to parse response: {0}")]
    ResponseParse(serde_json::Error),

    /// The provider rejected the request.
    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// HTTP status of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
