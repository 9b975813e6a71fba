use crate::{RequestError, RequestResult};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Method, StatusCode,
};
use serde_json::Value;

/// A fully prepared request: the path is relative to the API base URL and
/// the headers are final.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Value of the first header with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The status of a response and its body, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }
}

/// Sends prepared requests to the API. One attempt per call.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> RequestResult<ApiResponse>;
}

/// `reqwest` backed transport.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_headers(request: &ApiRequest) -> RequestResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &request.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                RequestError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                RequestError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> RequestResult<ApiResponse> {
        let headers = Self::request_headers(&request)?;
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            // `json()` would overwrite the caller's content type
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok());

        Ok(ApiResponse { status, body })
    }
}
