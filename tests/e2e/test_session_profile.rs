use crate::e2e::helpers;

use helpers::assertions::{assert_error_body, assert_profile_response};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use review_summarizer_backend::infrastructure::repositories::ProfileStore;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_a_free_profile_on_first_sign_in(ctx: &TestContext) {
    let user = ctx.fixtures.user("shopper@example.com");

    let response = ctx
        .client
        .post_with_auth("/api/session", &json!({}), &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let profile = response.body.as_ref().unwrap();
    assert_eq!(profile["id"], user.id().to_string());
    assert_eq!(profile["email"], "shopper@example.com");
    assert_eq!(profile["displayName"], "Test Shopper");
    assert_eq!(profile["subscriptionTier"], "free");
    assert_eq!(profile["monthlyLimit"], 5);
    assert_eq!(profile["dailyLimit"], 2);
    assert_eq!(profile["preferences"]["theme"], "light");

    let stored = ctx.profiles.find(user.id()).await.unwrap();
    assert!(stored.is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_existing_usage_on_repeat_sign_in(ctx: &TestContext) {
    let user = ctx.fixtures.user("returning@example.com");
    ctx.fixtures.free_profile(&user, 3, 1).await;

    let response = ctx
        .client
        .post_with_auth("/api/session", &json!({}), &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let profile = response.body.as_ref().unwrap();
    assert_eq!(profile["monthlySummariesUsed"], 3);
    assert_eq!(profile["todaySummariesUsed"], 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_sign_in_without_a_token(ctx: &TestContext) {
    let response = ctx.client.post("/api/session", &json!({})).await.unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_error_message("not authenticated");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_invalid_token(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_auth("/api/me", "not-a-real-token")
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_sign_out_with_no_content(ctx: &TestContext) {
    let user = ctx.fixtures.user("leaving@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    let response = ctx
        .client
        .delete_with_auth("/api/session", &user.token)
        .await
        .unwrap();

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.body_bytes.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_remaining_usage(ctx: &TestContext) {
    let user = ctx.fixtures.user("counter@example.com");
    ctx.fixtures.free_profile(&user, 4, 1).await;

    let response = ctx.client.get_with_auth("/api/me", &user.token).await.unwrap();
    response.assert_status(StatusCode::OK);

    let me = response.body.as_ref().unwrap();
    assert_profile_response(me);
    assert_eq!(me["remaining"], json!({ "monthly": 1, "daily": 1 }));
    assert_eq!(me["quotaState"], "free_under_limit");
    assert_eq!(me["canGenerate"], true);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_free_at_limit(ctx: &TestContext) {
    let user = ctx.fixtures.user("capped@example.com");
    ctx.fixtures.free_profile(&user, 5, 0).await;

    let response = ctx.client.get_with_auth("/api/me", &user.token).await.unwrap();
    response.assert_status(StatusCode::OK);

    let me = response.body.as_ref().unwrap();
    assert_eq!(me["quotaState"], "free_at_limit");
    assert_eq!(me["canGenerate"], false);
    assert_eq!(me["remaining"]["monthly"], 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_upgrade_to_pro(ctx: &TestContext) {
    let user = ctx.fixtures.user("upgrader@example.com");
    ctx.fixtures.free_profile(&user, 5, 2).await;

    let proof = json!({
        "transactionId": "txn_123",
        "amount": "9.99",
        "currency": "USD"
    });

    let response = ctx
        .client
        .post_with_auth("/api/me/upgrade", &proof, &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let me = response.body.as_ref().unwrap();
    assert_eq!(me["profile"]["subscriptionTier"], "pro");
    assert_eq!(me["profile"]["subscriptionStatus"], "active");
    assert_eq!(me["profile"]["paymentInfo"]["transactionId"], "txn_123");
    assert!(me["profile"]["subscriptionEndDate"].is_string());
    assert_eq!(
        me["remaining"],
        json!({ "monthly": "unlimited", "daily": "unlimited" })
    );
    assert_eq!(me["canGenerate"], true);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_upgrade_without_transaction_id(ctx: &TestContext) {
    let user = ctx.fixtures.user("sloppy@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    let proof = json!({ "transactionId": "  ", "amount": "9.99", "currency": "USD" });

    let response = ctx
        .client
        .post_with_auth("/api/me/upgrade", &proof, &user.token)
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(response.body.as_ref().unwrap(), "transactionId is required");

    let stored = ctx.profiles.find(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.subscription_tier.to_string(), "free");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_session_before_validating_the_upgrade(ctx: &TestContext) {
    let proof = json!({ "transactionId": "", "amount": "9.99", "currency": "USD" });

    let response = ctx.client.post("/api/me/upgrade", &proof).await.unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_update_preferences(ctx: &TestContext) {
    let user = ctx.fixtures.user("dark@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    let preferences = json!({
        "autoAnalyze": true,
        "showNotifications": false,
        "theme": "dark",
        "defaultSummaryLength": "short"
    });

    let response = ctx
        .client
        .put_with_auth("/api/me/preferences", &preferences, &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["profile"]["preferences"], preferences);

    let stored = ctx.profiles.find(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.preferences.theme, "dark");
    assert!(stored.preferences.auto_analyze);
}
