use crate::{
    opentelemetry::trace_request,
    transport::{ApiRequest, HttpTransport, Transport},
    types::{project_from_value, projects_from_value},
    LoginRequest, LoginResponse, Project, ProjectInput, RegisterRequest, RegisterResponse,
    RequestError, RequestResult, SessionStore,
};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://portfolio-api-three-black.vercel.app/api/v1";
/// Header carrying the session token on authenticated requests.
pub const AUTH_TOKEN_HEADER: &str = "auth-token";
const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Clone, Default)]
pub struct ApiClientOptions {
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    pub client: Option<Client>,
}

/// Options of a single [`ApiClient::call`].
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Attach the stored token under [`AUTH_TOKEN_HEADER`].
    pub requires_auth: bool,
    /// Extra headers. They replace the defaults with the same name.
    pub headers: Vec<(String, String)>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            requires_auth: false,
            headers: Vec::new(),
        }
    }
}

impl CallOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Client of the portfolio API.
///
/// Every call is a single attempt: no retries, no timeout beyond what the
/// underlying client enforces. A non-2xx answer becomes a
/// [`RequestError::StatusCode`] whose message comes from the body's
/// `message` or `error` field.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl ApiClient {
    /// Client over HTTP.
    #[must_use]
    pub fn new(session: SessionStore, mut options: ApiClientOptions) -> Self {
        let base_url = options
            .base_url
            .take()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = options.client.take().unwrap_or_default();
        Self::with_transport(Arc::new(HttpTransport::new(base_url, client)), session)
    }

    /// Client over any transport, e.g. [`crate::sdk_test::MockTransport`].
    pub fn with_transport(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self { transport, session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a request and return the parsed JSON body of a 2xx answer.
    /// A body that is not JSON yields `None`.
    pub async fn call(&self, path: &str, options: CallOptions) -> RequestResult<Option<Value>> {
        let CallOptions {
            method,
            body,
            requires_auth,
            headers: extra_headers,
        } = options;

        let mut headers = vec![("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())];
        for (name, value) in extra_headers {
            headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }
        if requires_auth {
            headers.retain(|(key, _)| !key.eq_ignore_ascii_case(AUTH_TOKEN_HEADER));
            headers.push((
                AUTH_TOKEN_HEADER.to_string(),
                self.session.get_token().unwrap_or_default(),
            ));
        }

        let request = ApiRequest {
            method,
            path: path.to_string(),
            headers,
            body,
        };

        let transport = self.transport.clone();
        let response = trace_request(request, |request| async move {
            transport.send(request).await
        })
        .await?;

        if !response.status.is_success() {
            let error = RequestError::from_response(response.status, response.body.as_ref());
            tracing::debug!(status = %response.status, message = %error, "request rejected");
            return Err(error);
        }

        Ok(response.body)
    }

    pub async fn register(&self, request: &RegisterRequest) -> RequestResult<RegisterResponse> {
        let data = self
            .call(
                "/auth/register",
                CallOptions::method(Method::POST).body(to_body(request)?),
            )
            .await?;
        Ok(decode_or_default(data))
    }

    pub async fn login(&self, request: &LoginRequest) -> RequestResult<LoginResponse> {
        let data = self
            .call(
                "/auth/login",
                CallOptions::method(Method::POST).body(to_body(request)?),
            )
            .await?;
        Ok(LoginResponse::from_value(data))
    }

    /// `GET /projects`, normalized to a list.
    pub async fn list_projects(&self) -> RequestResult<Vec<Project>> {
        let data = self.call("/projects", CallOptions::get().auth()).await?;
        Ok(projects_from_value(data))
    }

    /// `GET /projects/:id`. `Ok(None)` when the body holds no project.
    pub async fn get_project(&self, id: &str) -> RequestResult<Option<Project>> {
        let data = self
            .call(&project_path(id), CallOptions::get().auth())
            .await?;
        Ok(project_from_value(data))
    }

    pub async fn create_project(&self, input: &ProjectInput) -> RequestResult<Option<Value>> {
        self.call(
            "/projects",
            CallOptions::method(Method::POST)
                .auth()
                .body(to_body(input)?),
        )
        .await
    }

    pub async fn update_project(
        &self,
        id: &str,
        input: &ProjectInput,
    ) -> RequestResult<Option<Value>> {
        self.call(
            &project_path(id),
            CallOptions::method(Method::PUT)
                .auth()
                .body(to_body(input)?),
        )
        .await
    }

    pub async fn delete_project(&self, id: &str) -> RequestResult<Option<Value>> {
        self.call(&project_path(id), CallOptions::method(Method::DELETE).auth())
            .await
    }
}

fn project_path(id: &str) -> String {
    format!("/projects/{id}")
}

fn to_body<T: Serialize>(value: &T) -> RequestResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| RequestError::InvalidInput(format!("Failed to encode body: {error}")))
}

fn decode_or_default<T: serde::de::DeserializeOwned + Default>(data: Option<Value>) -> T {
    data.and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk_test::MockTransport;
    use reqwest::StatusCode;
    use serde_json::json;

    fn client_with(transport: &Arc<MockTransport>) -> ApiClient {
        ApiClient::with_transport(transport.clone(), SessionStore::in_memory())
    }

    #[tokio::test]
    async fn call_sets_json_content_type_without_auth() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(StatusCode::OK, json!({ "ok": true }));
        let client = client_with(&transport);

        let data = client.call("/ping", CallOptions::get()).await.unwrap();

        assert_eq!(data, Some(json!({ "ok": true })));
        let request = &transport.tracked_requests()[0];
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header(AUTH_TOKEN_HEADER), None);
    }

    #[tokio::test]
    async fn call_sends_empty_token_when_none_stored() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(StatusCode::OK, json!([]));
        let client = client_with(&transport);

        client.call("/projects", CallOptions::get().auth()).await.unwrap();

        assert_eq!(
            transport.tracked_requests()[0].header(AUTH_TOKEN_HEADER),
            Some("")
        );
    }

    #[tokio::test]
    async fn call_sends_stored_token() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(StatusCode::OK, json!([]));
        let client = client_with(&transport);
        client.session().save_token("t1");

        client.call("/projects", CallOptions::get().auth()).await.unwrap();

        assert_eq!(
            transport.tracked_requests()[0].header(AUTH_TOKEN_HEADER),
            Some("t1")
        );
    }

    #[tokio::test]
    async fn call_lets_headers_override_content_type() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_empty(StatusCode::NO_CONTENT);
        let client = client_with(&transport);

        let data = client
            .call(
                "/upload",
                CallOptions::method(Method::POST).header("content-type", "text/plain"),
            )
            .await
            .unwrap();

        assert_eq!(data, None);
        let request = &transport.tracked_requests()[0];
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("Content-Type"), Some("text/plain"));
    }

    #[tokio::test]
    async fn call_maps_failed_status_to_sanitized_message() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Contraseña inválida" }),
        );
        transport.enqueue_empty(StatusCode::BAD_GATEWAY);
        let client = client_with(&transport);

        let first = client.call("/auth/login", CallOptions::get()).await.unwrap_err();
        let second = client.call("/auth/login", CallOptions::get()).await.unwrap_err();

        assert_eq!(first.message(), "Contrasena invalida");
        assert_eq!(second.message(), "Solicitud fallida");
        assert_eq!(second.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn call_makes_a_single_attempt() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_error(RequestError::Transport("connection refused".into()));
        transport.enqueue_json(StatusCode::OK, json!([]));
        let client = client_with(&transport);

        let error = client.list_projects().await.unwrap_err();

        assert_eq!(error.message(), "connection refused");
        assert_eq!(transport.tracked_requests().len(), 1);
    }

    #[tokio::test]
    async fn list_projects_accepts_both_shapes() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(StatusCode::OK, json!([{ "_id": "a" }]));
        transport.enqueue_json(StatusCode::OK, json!({ "projects": [{ "_id": "b" }] }));
        transport.enqueue_empty(StatusCode::OK);
        let client = client_with(&transport);

        assert_eq!(client.list_projects().await.unwrap()[0].id, "a");
        assert_eq!(client.list_projects().await.unwrap()[0].id, "b");
        assert!(client.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn project_mutations_hit_the_expected_routes() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(StatusCode::CREATED, json!({ "_id": "p9" }));
        transport.enqueue_json(StatusCode::OK, json!({ "project": { "_id": "p1" } }));
        transport.enqueue_json(StatusCode::OK, json!({ "message": "ok" }));
        transport.enqueue_json(StatusCode::OK, json!({ "_id": "p1", "title": "T" }));
        let client = client_with(&transport);
        client.session().save_token("t1");

        let input = ProjectInput {
            title: "T".into(),
            technologies: vec!["Rust".into()],
            ..Default::default()
        };
        client.create_project(&input).await.unwrap();
        client.update_project("p1", &input).await.unwrap();
        client.delete_project("p1").await.unwrap();
        let fetched = client.get_project("p1").await.unwrap().unwrap();

        let requests = transport.tracked_requests();
        let routes: Vec<(Method, &str)> = requests
            .iter()
            .map(|r| (r.method.clone(), r.path.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                (Method::POST, "/projects"),
                (Method::PUT, "/projects/p1"),
                (Method::DELETE, "/projects/p1"),
                (Method::GET, "/projects/p1"),
            ]
        );
        assert!(requests
            .iter()
            .all(|r| r.header(AUTH_TOKEN_HEADER) == Some("t1")));
        assert_eq!(
            requests[0].body,
            Some(json!({
                "title": "T",
                "description": "",
                "technologies": ["Rust"],
                "images": []
            }))
        );
        assert_eq!(fetched.title, "T");
    }

    #[tokio::test]
    async fn login_decodes_token_and_user() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(
            StatusCode::OK,
            json!({ "token": "t1", "user": { "name": "A" } }),
        );
        let client = client_with(&transport);

        let response = client
            .login(&LoginRequest {
                email: "a@b.com".into(),
                password: "x".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.token.as_deref(), Some("t1"));
        assert_eq!(response.user, Some(json!({ "name": "A" })));
        let request = &transport.tracked_requests()[0];
        assert_eq!(request.path, "/auth/login");
        assert_eq!(request.header(AUTH_TOKEN_HEADER), None);
        assert_eq!(
            request.body,
            Some(json!({ "email": "a@b.com", "password": "x" }))
        );
    }

    #[tokio::test]
    async fn login_keeps_token_when_user_is_not_an_object() {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(StatusCode::OK, json!({ "token": "t1", "user": "A" }));
        let client = client_with(&transport);

        let response = client.login(&LoginRequest::default()).await.unwrap();

        assert_eq!(response.token.as_deref(), Some("t1"));
        assert_eq!(response.user, Some(json!("A")));
    }
}
