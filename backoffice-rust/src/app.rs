use crate::{
    auth::DEFAULT_REGISTER_REDIRECT_DELAY, BackofficeError, CardOptions, LoginFlow, Page,
    ProbeSessionValidator, ProjectController, RegisterFlow, SessionValidator,
};
use portfolio_sdk::{
    ApiClient, ApiClientOptions, FileStorage, KeyValueStorage, SessionStore,
};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// Settings of a [`Backoffice`].
/// # Default Values
/// - `api`: default base URL and a fresh `reqwest` client
/// - `card_options`: every card part shown
/// - `register_redirect_delay`: 700 ms
/// - `validator`: `None`, a probe request on `GET /projects`
#[derive(Clone)]
pub struct BackofficeOptions {
    pub api: ApiClientOptions,
    pub card_options: CardOptions,
    /// Pause between "account created" and the move to the login page.
    pub register_redirect_delay: Duration,
    /// Replaces the probe request used to check a stored session.
    pub validator: Option<Arc<dyn SessionValidator>>,
}

impl Default for BackofficeOptions {
    fn default() -> Self {
        Self {
            api: ApiClientOptions::default(),
            card_options: CardOptions::default(),
            register_redirect_delay: DEFAULT_REGISTER_REDIRECT_DELAY,
            validator: None,
        }
    }
}

/// The kind of document being loaded, i.e. which form it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Register,
    Login,
    Home,
    /// A page without any backoffice form.
    Other,
}

/// Result of [`Backoffice::on_load`]: the handler now driving the page, or
/// the fact that the page navigated away.
pub enum LoadedPage {
    Register(RegisterFlow),
    Login(LoginFlow),
    Home(ProjectController),
    Redirected,
    Other,
}

/// Entry point wiring the client, the session store and the page together.
pub struct Backoffice {
    client: ApiClient,
    page: Arc<dyn Page>,
    validator: Arc<dyn SessionValidator>,
    card_options: CardOptions,
    register_redirect_delay: Duration,
}

impl Backoffice {
    /// Backoffice over HTTP with the session kept in `storage`.
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        page: Arc<dyn Page>,
        mut options: BackofficeOptions,
    ) -> Self {
        let api = std::mem::take(&mut options.api);
        let client = ApiClient::new(SessionStore::new(storage), api);
        Self::with_client(client, page, options)
    }

    /// Backoffice with the session persisted in a JSON file.
    pub fn with_file_storage(
        path: impl Into<PathBuf>,
        page: Arc<dyn Page>,
        options: BackofficeOptions,
    ) -> Result<Self, BackofficeError> {
        let storage = FileStorage::open(path)?;
        Ok(Self::new(Arc::new(storage), page, options))
    }

    /// Backoffice over an existing client, e.g. one using a mock transport.
    pub fn with_client(client: ApiClient, page: Arc<dyn Page>, options: BackofficeOptions) -> Self {
        let validator = options
            .validator
            .unwrap_or_else(|| Arc::new(ProbeSessionValidator::new(client.clone())));
        Self {
            client,
            page,
            validator,
            card_options: options.card_options,
            register_redirect_delay: options.register_redirect_delay,
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn register_flow(&self) -> RegisterFlow {
        RegisterFlow::new(self.client.clone(), self.page.clone())
            .with_redirect_delay(self.register_redirect_delay)
    }

    #[must_use]
    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(self.client.clone(), self.page.clone())
    }

    #[must_use]
    pub fn project_controller(&self) -> ProjectController {
        ProjectController::new(self.client.clone(), self.page.clone(), self.validator.clone())
            .with_card_options(self.card_options)
    }

    /// Attach the handler matching the loaded document. The landing page is
    /// only handed out once the session was validated and the list loaded.
    pub async fn on_load(&self, kind: PageKind) -> LoadedPage {
        tracing::debug!(?kind, "page loaded");
        match kind {
            PageKind::Register => {
                let flow = self.register_flow();
                if flow.attach() {
                    LoadedPage::Register(flow)
                } else {
                    LoadedPage::Redirected
                }
            }
            PageKind::Login => {
                let flow = self.login_flow();
                if flow.attach() {
                    LoadedPage::Login(flow)
                } else {
                    LoadedPage::Redirected
                }
            }
            PageKind::Home => {
                let mut controller = self.project_controller();
                if controller.start().await {
                    LoadedPage::Home(controller)
                } else {
                    LoadedPage::Redirected
                }
            }
            PageKind::Other => LoadedPage::Other,
        }
    }
}
