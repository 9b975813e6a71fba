use std::{collections::VecDeque, sync::Mutex};

use reqwest::StatusCode;
use serde_json::Value;

use crate::{
    transport::{ApiRequest, ApiResponse, Transport},
    RequestError, RequestResult,
};

/// Result for a mocked `send` call.
/// It can either be a response to return or an error to fail with.
#[derive(Debug, Clone)]
pub enum MockResult {
    Response(ApiResponse),
    Error(RequestError),
}

impl MockResult {
    /// Construct a result that yields the provided response.
    pub fn response(response: ApiResponse) -> Self {
        Self::Response(response)
    }

    /// Construct a result that fails with the provided error.
    pub fn error(error: RequestError) -> Self {
        Self::Error(error)
    }
}

impl From<ApiResponse> for MockResult {
    fn from(response: ApiResponse) -> Self {
        Self::response(response)
    }
}

impl From<RequestError> for MockResult {
    fn from(error: RequestError) -> Self {
        Self::error(error)
    }
}

#[derive(Default)]
struct MockTransportState {
    mocked_results: VecDeque<MockResult>,
    tracked_requests: Vec<ApiRequest>,
}

/// A transport for tests that records requests and answers with queued
/// results, in order.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockTransportState>,
}

impl MockTransport {
    /// Construct a new mock transport with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue one or more mocked results.
    pub fn enqueue_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked result.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult>,
    {
        self.enqueue_results(std::iter::once(result.into()))
    }

    /// Enqueue a response with a JSON body.
    pub fn enqueue_json(&self, status: StatusCode, body: Value) -> &Self {
        self.enqueue(ApiResponse::new(status, Some(body)))
    }

    /// Enqueue a response whose body is missing or not JSON.
    pub fn enqueue_empty(&self, status: StatusCode) -> &Self {
        self.enqueue(ApiResponse::new(status, None))
    }

    /// Enqueue a failure that happens before any response.
    pub fn enqueue_error(&self, error: RequestError) -> &Self {
        self.enqueue(error)
    }

    /// Retrieve the requests sent so far.
    pub fn tracked_requests(&self) -> Vec<ApiRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clone()
    }

    /// Number of queued results not consumed yet.
    pub fn pending(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.len()
    }

    /// Reset tracked requests without touching queued results.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clear();
    }

    /// Clear both tracked requests and queued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.clear();
        state.tracked_requests.clear();
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> RequestResult<ApiResponse> {
        let mut state = self.state.lock().expect("mock state poisoned");
        let description = format!("{} {}", request.method, request.path);
        state.tracked_requests.push(request);

        let result = state.mocked_results.pop_front().ok_or_else(|| {
            RequestError::Transport(format!("no mocked result available for {description}"))
        })?;

        match result {
            MockResult::Response(response) => Ok(response),
            MockResult::Error(error) => Err(error),
        }
    }
}
