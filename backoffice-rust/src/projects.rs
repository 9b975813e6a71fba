use crate::{
    messages, render_projects, CardOptions, Page, ProjectForm, Route, SessionValidator,
    StatusMessage,
};
use portfolio_sdk::{ApiClient, Project, RequestError};
use std::sync::Arc;

/// Data attributes of the element a click landed on inside the project
/// list container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// `data-edit`
    pub edit: Option<String>,
    /// `data-del`
    pub delete: Option<String>,
}

impl ClickTarget {
    #[must_use]
    pub fn edit(id: impl Into<String>) -> Self {
        Self {
            edit: Some(id.into()),
            delete: None,
        }
    }

    #[must_use]
    pub fn delete(id: impl Into<String>) -> Self {
        Self {
            edit: None,
            delete: Some(id.into()),
        }
    }
}

/// Controller of the landing page: session guard, project list and the
/// create/edit form.
///
/// The controller owns the list last loaded from the API. It is a display
/// cache only: every mutation is followed by a full reload.
pub struct ProjectController {
    client: ApiClient,
    page: Arc<dyn Page>,
    validator: Arc<dyn SessionValidator>,
    card_options: CardOptions,
    projects: Vec<Project>,
}

impl ProjectController {
    pub fn new(
        client: ApiClient,
        page: Arc<dyn Page>,
        validator: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            client,
            page,
            validator,
            card_options: CardOptions::default(),
            projects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_card_options(mut self, card_options: CardOptions) -> Self {
        self.card_options = card_options;
        self
    }

    /// Projects from the last successful load.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Guard and first load. Returns `false` when the user was sent to the
    /// login page.
    pub async fn start(&mut self) -> bool {
        if !self.require_auth().await {
            return false;
        }
        self.load_projects().await;
        true
    }

    /// Requires a stored token that the validator accepts. Otherwise the
    /// session is cleared and the user goes to the login page; no message
    /// is shown.
    pub async fn require_auth(&self) -> bool {
        if self.client.session().get_token().is_none() {
            self.page.navigate(Route::Login);
            return false;
        }

        match self.validator.validate_session().await {
            Ok(()) => true,
            Err(error) => {
                tracing::info!(%error, "session rejected, logging out");
                self.client.session().clear_auth();
                self.page.navigate(Route::Login);
                false
            }
        }
    }

    /// Reload the list from the API and render it. On failure the error is
    /// shown and the previous list stays.
    pub async fn load_projects(&mut self) {
        match self.client.list_projects().await {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "projects loaded");
                self.projects = projects;
                self.page
                    .set_project_list(&render_projects(&self.projects, self.card_options));
            }
            Err(error) => self.show_error(&error),
        }
    }

    /// Delegated click on the list container.
    pub async fn handle_click(&mut self, target: &ClickTarget) {
        if let Some(id) = non_empty(target.delete.as_deref()) {
            self.delete_project(id).await;
        }
        if let Some(id) = non_empty(target.edit.as_deref()) {
            self.enter_edit_mode(id).await;
        }
    }

    pub async fn delete_project(&mut self, id: &str) {
        match self.client.delete_project(id).await {
            Ok(_) => {
                tracing::info!(id, "project deleted");
                self.load_projects().await;
                self.page.set_message(StatusMessage::success(messages::DELETED));
            }
            Err(error) => self.show_error(&error),
        }
    }

    /// Fill the form with the project and reveal it. Looks in the loaded list
    /// first, then asks the API; an unknown project leaves the page as is.
    pub async fn enter_edit_mode(&mut self, id: &str) {
        let Some(project) = self.find_project(id).await else {
            tracing::debug!(id, "project to edit not found");
            return;
        };

        self.page.show_form_panel();
        self.page.set_form_title(messages::EDIT_PROJECT_TITLE);
        self.page.set_project_form(ProjectForm::from_project(&project));
    }

    async fn find_project(&self, id: &str) -> Option<Project> {
        if let Some(project) = self.projects.iter().find(|p| p.id == id) {
            return Some(project.clone());
        }
        match self.client.get_project(id).await {
            Ok(project) => project,
            Err(error) => {
                tracing::debug!(id, %error, "failed to fetch project");
                None
            }
        }
    }

    /// Save the form: update when it holds a project id, create otherwise.
    /// On failure the form stays open with its values.
    pub async fn submit(&mut self) {
        self.page.set_message(StatusMessage::neutral(messages::SAVING));

        let form = self.page.project_form();
        let input = form.to_input();

        let result = match form.editing_id() {
            Some(id) => self
                .client
                .update_project(id, &input)
                .await
                .map(|_| messages::UPDATED),
            None => self
                .client
                .create_project(&input)
                .await
                .map(|_| messages::CREATED),
        };

        match result {
            Ok(message) => {
                tracing::info!(id = form.editing_id(), status = message, "project saved");
                self.page.set_message(StatusMessage::success(message));
                self.hide_form();
                self.load_projects().await;
            }
            Err(error) => self.show_error(&error),
        }
    }

    /// Reveal an empty form for a new project.
    pub fn add(&self) {
        self.reset_form();
        self.page.show_form_panel();
        self.page.set_message(StatusMessage::cleared());
    }

    /// Hide the form and discard what was typed.
    pub fn cancel(&self) {
        self.hide_form();
        self.page.set_message(StatusMessage::cleared());
    }

    pub fn logout(&self) {
        self.client.session().clear_auth();
        tracing::info!("logged out");
        self.page.navigate(Route::Login);
    }

    fn hide_form(&self) {
        self.page.hide_form_panel();
        self.reset_form();
    }

    fn reset_form(&self) {
        self.page.set_form_title(messages::NEW_PROJECT_TITLE);
        self.page.set_project_form(ProjectForm::default());
    }

    fn show_error(&self, error: &RequestError) {
        self.page.set_message(StatusMessage::neutral(&error.message()));
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
