use std::io;

use pyrus_sdk::{ApiError, ValidationError};
use thiserror::Error;

/// Every way a Pyrus client call can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request build error: {0}")]
    Build(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding failed, including form field values that do
    /// not match their type tag.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error envelope returned by the server.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response shape did not match what the call expected, for example
    /// a file where JSON was expected.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// The server's error envelope, when the call failed with one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        ClientError::UnexpectedResponse(message.into())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}
