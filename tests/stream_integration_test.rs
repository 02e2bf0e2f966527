//! Log stream subscriber against a real SSE endpoint (wiremock).

mod common;

use common::{next_message, real_api, sse_body};
use futures::StreamExt;
use tokio::sync::mpsc;
use wendash::app::tasks::run_stream_subscriber;
use wendash::app::AppMessage;
use wendash::sse::SseFrame;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

#[tokio::test]
async fn test_open_stream_parses_frames() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .and(header("Accept", "text/event-stream"))
        .respond_with(sse_response(
            ": keepalive\nevent: stats\ndata: {}\n\nid: 7\ndata: {\"message\":\"a\"}\n\nretry: 1500\n\n"
                .to_string(),
        ))
        .mount(&server)
        .await;

    let frames: Vec<SseFrame> = real_api(&server.uri())
        .open_stream(None)
        .await
        .unwrap()
        .map(|frame| frame.unwrap())
        .collect()
        .await;

    assert_eq!(frames.len(), 3);
    match &frames[0] {
        SseFrame::Message(msg) => {
            assert_eq!(msg.event, "stats");
            assert!(!msg.is_default_type());
        }
        other => panic!("unexpected {:?}", other),
    }
    match &frames[1] {
        SseFrame::Message(msg) => {
            assert!(msg.is_default_type());
            assert_eq!(msg.data, r#"{"message":"a"}"#);
            assert_eq!(msg.last_event_id.as_deref(), Some("7"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
        frames[2],
        SseFrame::Retry(std::time::Duration::from_millis(1500))
    );
}

#[tokio::test]
async fn test_open_stream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = real_api(&server.uri()).open_stream(None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_subscriber_reconnects_with_last_event_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(sse_response(format!(
            "id: 41\n{}",
            sse_body(&[r#"{"time":"t","message":"hello"}"#])
        )))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_stream_subscriber(real_api(&server.uri()), tx));

    assert_eq!(next_message(&mut rx).await, AppMessage::StreamOpened);
    match next_message(&mut rx).await {
        AppMessage::StreamMessage(msg) => assert_eq!(msg.data, r#"{"time":"t","message":"hello"}"#),
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(next_message(&mut rx).await, AppMessage::StreamError(_)));
    assert_eq!(next_message(&mut rx).await, AppMessage::StreamOpened);

    handle.abort();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.len() >= 2);
    assert!(requests[0].headers.get("Last-Event-ID").is_none());
    assert_eq!(
        requests[1]
            .headers
            .get("Last-Event-ID")
            .and_then(|v| v.to_str().ok()),
        Some("41")
    );
}

#[tokio::test]
async fn test_subscriber_survives_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(sse_response(sse_body(&[r#"{"message":"back"}"#])))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_stream_subscriber(real_api(&server.uri()), tx));

    assert!(matches!(next_message(&mut rx).await, AppMessage::StreamError(_)));
    assert_eq!(next_message(&mut rx).await, AppMessage::StreamOpened);
    assert!(matches!(next_message(&mut rx).await, AppMessage::StreamMessage(_)));

    handle.abort();
}
