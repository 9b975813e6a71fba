use crate::{messages, LoginForm, Page, RegisterForm, Route, StatusMessage};
use portfolio_sdk::{filter_itson_id, ApiClient};
use std::{sync::Arc, time::Duration};

/// How long the "account created" message stays before going to login.
pub const DEFAULT_REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Submitting,
    Authenticated,
}

/// Redirects to the landing page when a token is already stored. The token
/// is not validated here; the landing page does that.
fn redirect_if_logged_in(client: &ApiClient, page: &dyn Page) -> bool {
    if client.session().get_token().is_some() {
        tracing::debug!("token present, skipping auth form");
        page.navigate(Route::Home);
        return true;
    }
    false
}

/// Sign-up page.
pub struct RegisterFlow {
    client: ApiClient,
    page: Arc<dyn Page>,
    redirect_delay: Duration,
    state: AuthState,
}

impl RegisterFlow {
    pub fn new(client: ApiClient, page: Arc<dyn Page>) -> Self {
        Self {
            client,
            page,
            redirect_delay: DEFAULT_REGISTER_REDIRECT_DELAY,
            state: AuthState::Anonymous,
        }
    }

    #[must_use]
    pub fn with_redirect_delay(mut self, redirect_delay: Duration) -> Self {
        self.redirect_delay = redirect_delay;
        self
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Returns `false` when the user was sent to the landing page instead of
    /// being shown the form.
    pub fn attach(&self) -> bool {
        !redirect_if_logged_in(&self.client, self.page.as_ref())
    }

    /// Value to put back in the ITSON id field after each keystroke.
    #[must_use]
    pub fn on_itson_id_input(&self, raw: &str) -> String {
        filter_itson_id(raw)
    }

    /// Nothing guards against a second submit while one is in flight.
    pub async fn submit(&mut self, form: &RegisterForm) {
        self.state = AuthState::Submitting;
        self.page.set_message(StatusMessage::neutral(messages::REGISTERING));

        match self.client.register(&form.to_request()).await {
            Ok(_) => {
                tracing::info!("account registered");
                self.state = AuthState::Anonymous;
                self.page
                    .set_message(StatusMessage::success(messages::ACCOUNT_CREATED));
                tokio::time::sleep(self.redirect_delay).await;
                self.page.navigate(Route::Login);
            }
            Err(error) => {
                tracing::info!(%error, "registration failed");
                self.state = AuthState::Anonymous;
                self.page.set_message(StatusMessage::neutral(&error.message()));
            }
        }
    }
}

/// Log-in page.
pub struct LoginFlow {
    client: ApiClient,
    page: Arc<dyn Page>,
    state: AuthState,
}

impl LoginFlow {
    pub fn new(client: ApiClient, page: Arc<dyn Page>) -> Self {
        Self {
            client,
            page,
            state: AuthState::Anonymous,
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Returns `false` when the user was sent to the landing page instead of
    /// being shown the form.
    pub fn attach(&self) -> bool {
        !redirect_if_logged_in(&self.client, self.page.as_ref())
    }

    pub async fn submit(&mut self, form: &LoginForm) {
        self.state = AuthState::Submitting;
        self.page.set_message(StatusMessage::neutral(messages::LOGGING_IN));

        match self.client.login(&form.to_request()).await {
            Ok(response) => {
                let session = self.client.session();
                if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
                    session.save_token(token);
                }
                if let Some(user) = &response.user {
                    session.save_user(user);
                }
                tracing::info!("logged in");
                self.state = AuthState::Authenticated;
                self.page.navigate(Route::Home);
            }
            Err(error) => {
                tracing::info!(%error, "login failed");
                self.state = AuthState::Anonymous;
                self.page.set_message(StatusMessage::neutral(&error.message()));
            }
        }
    }
}
