mod app;
mod auth;
mod errors;
mod form;
pub mod messages;
mod page;
mod projects;
mod render;
mod routes;
mod validator;

pub use app::{Backoffice, BackofficeOptions, LoadedPage, PageKind};
pub use auth::{AuthState, LoginFlow, RegisterFlow, DEFAULT_REGISTER_REDIRECT_DELAY};
pub use errors::BackofficeError;
pub use form::{LoginForm, ProjectForm, RegisterForm};
pub use page::{HeadlessPage, Page, StatusMessage, Tone};
pub use projects::{ClickTarget, ProjectController};
pub use render::{render_projects, CardOptions};
pub use routes::Route;
pub use validator::{ProbeSessionValidator, SessionValidator};
