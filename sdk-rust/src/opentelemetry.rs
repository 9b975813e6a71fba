use crate::{ApiRequest, ApiResponse, RequestResult};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Span covering one API request, named `portfolio_sdk.request`.
pub struct RequestSpan {
    span: Span,
    start_time: Instant,
    status: Option<u16>,
}

impl RequestSpan {
    pub fn new(request: &ApiRequest) -> Self {
        let span = info_span!(
            "portfolio_sdk.request",
            method = %request.method,
            path = %request.path,
            status = tracing::field::Empty,
        );
        span.set_attribute("http.request.method", request.method.to_string());
        span.set_attribute("url.path", request.path.clone());
        span.set_attribute(
            "portfolio_sdk.authenticated",
            request.header(crate::AUTH_TOKEN_HEADER).is_some(),
        );

        Self {
            span,
            start_time: Instant::now(),
            status: None,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_response(&mut self, response: &ApiResponse) {
        let status = response.status.as_u16();
        self.status = Some(status);
        self.span.record("status", status);
        self.span
            .set_attribute("http.response.status_code", i64::from(status));
        if !response.status.is_success() {
            self.span
                .set_status(Status::error(format!("status {status}")));
        }
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        self.span
            .set_attribute("portfolio_sdk.duration_seconds", elapsed);
        let _entered = self.span.enter();
        tracing::debug!(status = ?self.status, elapsed, "request finished");
    }
}

/// Run `f` inside a request span and record its outcome.
pub async fn trace_request<F, Fut>(request: ApiRequest, f: F) -> RequestResult<ApiResponse>
where
    F: FnOnce(ApiRequest) -> Fut,
    Fut: std::future::Future<Output = RequestResult<ApiResponse>>,
{
    let mut span = RequestSpan::new(&request);
    let result = span.instrument_future(f(request)).await;

    match &result {
        Ok(response) => span.on_response(response),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}
