use portfolio_sdk::{parse_csv, LoginRequest, Project, ProjectInput, RegisterRequest};

/// Raw values of the project form, as typed.
///
/// `project_id` is the hidden field holding the project being edited; empty
/// means the form creates a new project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub project_id: String,
    pub title: String,
    pub description: String,
    /// Comma separated.
    pub technologies: String,
    pub repository: String,
    /// Comma separated.
    pub images: String,
}

impl ProjectForm {
    /// Values shown when editing `project`. Lists are joined with `", "`
    /// and a missing repository becomes an empty field.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            technologies: project.technologies.join(", "),
            repository: project.repository.clone().unwrap_or_default(),
            images: project.images.join(", "),
        }
    }

    /// The project being edited, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        Some(self.project_id.as_str()).filter(|id| !id.is_empty())
    }

    /// Request body for the form. Text fields are trimmed, lists are split
    /// on commas and a blank repository is left out.
    #[must_use]
    pub fn to_input(&self) -> ProjectInput {
        let repository = self.repository.trim();
        ProjectInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            technologies: parse_csv(Some(self.technologies.as_str())),
            repository: (!repository.is_empty()).then(|| repository.to_string()),
            images: parse_csv(Some(self.images.as_str())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub itson_id: String,
    pub password: String,
}

impl RegisterForm {
    /// Trims everything but the password.
    #[must_use]
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            itson_id: self.itson_id.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Trims the email, the password is sent as typed.
    #[must_use]
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}
