use crate::e2e::helpers;

use helpers::TestContext;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_context::test_context;

/// Read SSE frames until `needle` shows up or the timeout passes
async fn read_until(body: &mut Incoming, needle: &str) -> String {
    let mut received = String::new();
    let read = async {
        while let Some(frame) = body.frame().await {
            let frame = frame.unwrap();
            if let Some(data) = frame.data_ref() {
                received.push_str(&String::from_utf8_lossy(data));
                if received.contains(needle) {
                    break;
                }
            }
        }
    };
    let _ = tokio::time::timeout(Duration::from_secs(2), read).await;
    received
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_track_an_anonymous_event(ctx: &TestContext) {
    let body = json!({ "event": "popup_opened", "data": { "site": "amazon" } });

    let response = ctx.client.post("/api/events/track", &body).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap(), &json!({ "success": true }));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_empty_event_name(ctx: &TestContext) {
    let body = json!({ "event": "   " });

    let response = ctx.client.post("/api/events/track", &body).await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("event is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_sign_in_for_the_event_stream(ctx: &TestContext) {
    let response = ctx.client.open_stream("/api/events/stream", None).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_stream_topics(ctx: &TestContext) {
    let user = ctx.fixtures.user("listener@example.com");

    let response = ctx
        .client
        .open_stream("/api/events/stream?topics=auth,weather", Some(&user.token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stream_the_callers_tracked_events(ctx: &TestContext) {
    let user = ctx.fixtures.user("listener@example.com");

    let response = ctx
        .client
        .open_stream("/api/events/stream?topics=tracking", Some(&user.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/event-stream")
    );
    let mut body = response.into_body();

    let track = json!({ "event": "summary_shared", "data": { "channel": "email" } });
    ctx.client
        .post_with_auth("/api/events/track", &track, &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let received = read_until(&mut body, "summary_shared").await;
    assert!(received.contains("event: eventTracked"), "got: {received}");
    assert!(received.contains("summary_shared"), "got: {received}");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_stream_other_users_events(ctx: &TestContext) {
    let listener = ctx.fixtures.user("listener@example.com");
    let other = ctx.fixtures.user("other@example.com");

    let response = ctx
        .client
        .open_stream("/api/events/stream?topics=tracking", Some(&listener.token))
        .await
        .unwrap();
    let mut body = response.into_body();

    let track = json!({ "event": "someone_elses_event" });
    ctx.client
        .post_with_auth("/api/events/track", &track, &other.token)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let received = read_until(&mut body, "someone_elses_event").await;
    assert!(!received.contains("someone_elses_event"), "got: {received}");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stream_analysis_states(ctx: &TestContext) {
    let user = ctx.fixtures.user("watcher@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    let response = ctx
        .client
        .open_stream("/api/events/stream?topics=analysis", Some(&user.token))
        .await
        .unwrap();
    let mut body = response.into_body();

    let analyze = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "reviews": helpers::fixtures::sample_reviews()
    });
    ctx.client
        .post_with_auth("/api/analyze", &analyze, &user.token)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let received = read_until(&mut body, r#""state":"summary""#).await;
    assert!(received.contains(r#""state":"loading""#), "got: {received}");
    assert!(received.contains(r#""state":"summary""#), "got: {received}");
}
