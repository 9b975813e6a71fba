use portfolio_sdk::{
    sdk_test::{MockResult, MockTransport},
    ApiRequest, ApiResponse, Method, RequestError, StatusCode, Transport,
};
use serde_json::json;

fn get(path: &str) -> ApiRequest {
    ApiRequest {
        method: Method::GET,
        path: path.to_string(),
        headers: Vec::new(),
        body: None,
    }
}

#[tokio::test]
async fn mock_transport_answers_in_order_and_tracks_requests() {
    let transport = MockTransport::new();
    transport
        .enqueue_json(StatusCode::OK, json!({ "projects": [] }))
        .enqueue(MockResult::error(RequestError::Transport(
            "connection reset".to_string(),
        )))
        .enqueue_empty(StatusCode::NO_CONTENT);

    let first = transport
        .send(get("/projects"))
        .await
        .expect("first send should succeed");
    assert_eq!(
        first,
        ApiResponse::new(StatusCode::OK, Some(json!({ "projects": [] })))
    );

    let second = transport
        .send(get("/projects/p1"))
        .await
        .expect_err("second send should fail");
    assert_eq!(second.message(), "connection reset");

    let third = transport
        .send(get("/projects/p2"))
        .await
        .expect("third send should succeed");
    assert_eq!(third.body, None);

    let paths: Vec<_> = transport
        .tracked_requests()
        .into_iter()
        .map(|request| request.path)
        .collect();
    assert_eq!(paths, vec!["/projects", "/projects/p1", "/projects/p2"]);
    assert_eq!(transport.pending(), 0);
}

#[tokio::test]
async fn mock_transport_reset_keeps_queue_and_restore_clears_it() {
    let transport = MockTransport::new();
    transport
        .enqueue_json(StatusCode::OK, json!([]))
        .enqueue_json(StatusCode::OK, json!([]))
        .enqueue_json(StatusCode::OK, json!([]));

    transport
        .send(get("/projects"))
        .await
        .expect("send should succeed");
    transport.reset();
    assert!(transport.tracked_requests().is_empty());
    assert_eq!(transport.pending(), 2);

    transport
        .send(get("/projects"))
        .await
        .expect("send should succeed");
    assert_eq!(transport.tracked_requests().len(), 1);

    transport.restore();
    assert!(transport.tracked_requests().is_empty());
    assert_eq!(transport.pending(), 0);

    let error = transport
        .send(get("/projects"))
        .await
        .expect_err("empty queue should fail");
    assert!(matches!(error, RequestError::Transport(_)));
}
