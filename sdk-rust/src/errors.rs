use crate::text_utils::strip_diacritics;
use std::path::PathBuf;
use thiserror::Error;

/// Message shown when a failed response carries neither `message` nor
/// `error`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Solicitud fallida";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The request could not be built (e.g. a token that is not a valid
    /// header value).
    #[error("{0}")]
    InvalidInput(String),
    /// The request never produced a response (connection refused, DNS,
    /// TLS...).
    #[error("{0}")]
    Transport(String),
    /// The API answered with a non-2xx status. The message is taken from the
    /// response body when available.
    #[error("{1}")]
    StatusCode(reqwest::StatusCode, String),
}

impl RequestError {
    /// Build a status error from the parsed body of a failed response.
    #[must_use]
    pub fn from_response(status: reqwest::StatusCode, body: Option<&serde_json::Value>) -> Self {
        let message = body
            .and_then(|body| {
                non_empty_str(body.get("message")).or_else(|| non_empty_str(body.get("error")))
            })
            .unwrap_or(FALLBACK_ERROR_MESSAGE);
        Self::StatusCode(status, strip_diacritics(message))
    }

    /// The text to display to the user, with diacritics removed.
    #[must_use]
    pub fn message(&self) -> String {
        strip_diacritics(&self.to_string())
    }

    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::StatusCode(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

fn non_empty_str(value: Option<&serde_json::Value>) -> Option<&str> {
    value
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
}

pub type RequestResult<T> = Result<T, RequestError>;

/// Errors raised while opening a file-backed storage.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access storage file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Storage file {0} is not a JSON object: {1}")]
    Corrupt(PathBuf, #[source] serde_json::Error),
}
