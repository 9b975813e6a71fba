use async_trait::async_trait;
use portfolio_sdk::{ApiClient, CallOptions, RequestError};

/// Decides whether the stored session is still accepted.
///
/// Called by [`crate::ProjectController::require_auth`] only when a token is
/// stored. An `Err` makes the controller clear the session and go back to
/// the login page.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate_session(&self) -> Result<(), RequestError>;
}

/// Validates by sending an authenticated `GET /projects` and accepting any
/// 2xx answer. This is the only way an expired token is detected.
pub struct ProbeSessionValidator {
    client: ApiClient,
}

impl ProbeSessionValidator {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionValidator for ProbeSessionValidator {
    async fn validate_session(&self) -> Result<(), RequestError> {
        self.client
            .call("/projects", CallOptions::get().auth())
            .await
            .map(|_| ())
    }
}
