use thiserror::Error;

/// Errors raised while setting up the backoffice. Errors of user actions
/// never escape a controller; they end up in the message area.
#[derive(Debug, Error)]
pub enum BackofficeError {
    #[error("Storage error: {0}")]
    Storage(#[from] portfolio_sdk::StorageError),
}
