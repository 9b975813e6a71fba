use crate::{messages, ProjectForm, Route};
use portfolio_sdk::strip_diacritics;
use std::sync::{Mutex, MutexGuard};

/// Color of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
}

impl Tone {
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Neutral => "#94a3b8",
            Self::Success => "#22c55e",
        }
    }
}

/// Text of the message area. Diacritics are stripped on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    #[must_use]
    pub fn new(text: &str, tone: Tone) -> Self {
        Self {
            text: strip_diacritics(text),
            tone,
        }
    }

    #[must_use]
    pub fn neutral(text: &str) -> Self {
        Self::new(text, Tone::Neutral)
    }

    #[must_use]
    pub fn success(text: &str) -> Self {
        Self::new(text, Tone::Success)
    }

    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }
}

/// The document the controllers drive: message area, navigation, project
/// form panel and project list container.
///
/// Implementations only mutate presentation state; they never call the API.
pub trait Page: Send + Sync {
    fn set_message(&self, message: StatusMessage);
    fn navigate(&self, route: Route);

    fn show_form_panel(&self);
    fn hide_form_panel(&self);
    fn set_form_title(&self, title: &str);
    /// Current values of the project form.
    fn project_form(&self) -> ProjectForm;
    fn set_project_form(&self, form: ProjectForm);

    /// Replace the content of the project list container.
    fn set_project_list(&self, html: &str);
}

#[derive(Debug, Clone)]
struct HeadlessState {
    message: StatusMessage,
    messages: Vec<StatusMessage>,
    routes: Vec<Route>,
    form_visible: bool,
    form_title: String,
    form: ProjectForm,
    list_html: String,
}

impl Default for HeadlessState {
    fn default() -> Self {
        Self {
            message: StatusMessage::cleared(),
            messages: Vec::new(),
            routes: Vec::new(),
            form_visible: false,
            form_title: messages::NEW_PROJECT_TITLE.to_string(),
            form: ProjectForm::default(),
            list_html: String::new(),
        }
    }
}

/// In-memory page. Keeps every message and navigation so a host (or a
/// test) can replay what the user would have seen.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    state: Mutex<HeadlessState>,
}

impl HeadlessPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// The message currently displayed.
    #[must_use]
    pub fn message(&self) -> StatusMessage {
        self.state().message.clone()
    }

    /// Every message displayed so far, oldest first.
    #[must_use]
    pub fn message_history(&self) -> Vec<StatusMessage> {
        self.state().messages.clone()
    }

    /// Every navigation requested so far, oldest first.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.state().routes.clone()
    }

    #[must_use]
    pub fn current_route(&self) -> Option<Route> {
        self.state().routes.last().copied()
    }

    #[must_use]
    pub fn form_visible(&self) -> bool {
        self.state().form_visible
    }

    #[must_use]
    pub fn form_title(&self) -> String {
        self.state().form_title.clone()
    }

    #[must_use]
    pub fn list_html(&self) -> String {
        self.state().list_html.clone()
    }
}

impl Page for HeadlessPage {
    fn set_message(&self, message: StatusMessage) {
        let mut state = self.state();
        state.messages.push(message.clone());
        state.message = message;
    }

    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigate");
        self.state().routes.push(route);
    }

    fn show_form_panel(&self) {
        self.state().form_visible = true;
    }

    fn hide_form_panel(&self) {
        self.state().form_visible = false;
    }

    fn set_form_title(&self, title: &str) {
        self.state().form_title = title.to_string();
    }

    fn project_form(&self) -> ProjectForm {
        self.state().form.clone()
    }

    fn set_project_form(&self, form: ProjectForm) {
        self.state().form = form;
    }

    fn set_project_list(&self, html: &str) {
        self.state().list_html = html.to_string();
    }
}
