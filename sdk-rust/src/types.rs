use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A portfolio project as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Project {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    /// Technologies in the order they were typed. Duplicates are allowed.
    #[serde(default, deserialize_with = "list_or_empty")]
    pub technologies: Vec<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub repository: Option<String>,
    /// Image URLs.
    #[serde(default, deserialize_with = "list_or_empty")]
    pub images: Vec<String>,
}

/// Body of `POST /projects` and `PUT /projects/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    /// Omitted from the body when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    pub images: Vec<String>,
}

impl From<&Project> for ProjectInput {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            technologies: project.technologies.clone(),
            repository: project.repository.clone(),
            images: project.images.clone(),
        }
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub itson_id: String,
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer of `POST /auth/login`. `user` is kept as sent, whatever its shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "utoipa", schema(value_type = Object))]
    pub user: Option<Value>,
}

impl LoginResponse {
    /// Pick `token` and `user` out of a login body independently, so a
    /// malformed `user` does not cost the token.
    #[must_use]
    pub fn from_value(data: Option<Value>) -> Self {
        let Some(Value::Object(mut object)) = data else {
            return Self::default();
        };
        Self {
            token: object.remove("token").and_then(scalar_text),
            user: object.remove("user").filter(|user| !user.is_null()),
        }
    }
}

/// The profile object handed out at login. Fields the backoffice does not
/// know about are kept so the stored profile matches what the API sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itson_id: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "utoipa", schema(value_type = Object))]
    pub extra: Map<String, Value>,
}

/// Normalize a list response: a bare array, an object with a `projects`
/// array, or anything else (an empty list).
#[must_use]
pub fn projects_from_value(data: Option<Value>) -> Vec<Project> {
    let list = match data {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut object)) => match object.remove("projects") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    list.into_iter()
        .filter_map(|item| match serde_json::from_value::<Project>(item) {
            Ok(project) => Some(project),
            Err(error) => {
                tracing::warn!(%error, "skipping malformed project entry");
                None
            }
        })
        .collect()
}

/// Unwrap a single project response: `{ project: {...} }` or the bare
/// object.
#[must_use]
pub fn project_from_value(data: Option<Value>) -> Option<Project> {
    let value = match data? {
        Value::Object(mut object) => match object.remove("project") {
            Some(project @ Value::Object(_)) => project,
            Some(_) | None => Value::Object(object),
        },
        _ => return None,
    };
    serde_json::from_value(value).ok()
}

/// Scalars as text; `null`, arrays and objects as `None`.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(string_or_none(deserializer)?.unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    })
}
