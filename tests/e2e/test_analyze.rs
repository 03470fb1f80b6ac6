use crate::e2e::helpers;

use helpers::assertions::{assert_error_body, assert_summary_shape};
use helpers::fixtures::{amazon_page_html, sample_reviews};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use review_summarizer_backend::infrastructure::repositories::ProfileStore;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_anonymous_analysis(ctx: &TestContext) {
    let body = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "reviews": sample_reviews()
    });

    let response = ctx.client.post("/api/analyze", &body).await.unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(ctx.summaries.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_summarize_and_record_usage(ctx: &TestContext) {
    let user = ctx.fixtures.user("analyst@example.com");
    ctx.fixtures.free_profile(&user, 1, 0).await;

    let body = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "reviews": sample_reviews()
    });

    let response = ctx
        .client
        .post_with_auth("/api/analyze", &body, &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_summary_shape(&body["result"]);
    assert_eq!(body["result"]["totalReviews"], 3);
    assert!(body["summaryId"].is_string());

    let stored = ctx.profiles.find(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.monthly_summaries_used, 2);
    assert_eq!(stored.today_summaries_used, 1);
    assert_eq!(stored.total_summaries_generated, 2);
    assert!(stored.last_summary_at.is_some());
    assert_eq!(ctx.summaries.len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_extract_from_html_when_no_reviews_are_supplied(ctx: &TestContext) {
    let user = ctx.fixtures.user("scraper@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    let body = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "html": amazon_page_html()
    });

    let response = ctx
        .client
        .post_with_auth("/api/analyze", &body, &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let result = &response.body.as_ref().unwrap()["result"];
    assert_eq!(result["totalReviews"], 2);
    assert_eq!(result["avgRating"], "4.5");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refuse_when_the_free_quota_is_exhausted(ctx: &TestContext) {
    let user = ctx.fixtures.user("capped@example.com");
    ctx.fixtures.free_profile(&user, 0, 2).await;

    let body = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "reviews": sample_reviews()
    });

    let response = ctx
        .client
        .post_with_auth("/api/analyze", &body, &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::PAYMENT_REQUIRED);

    let stored = ctx.profiles.find(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.today_summaries_used, 2);
    assert_eq!(stored.monthly_summaries_used, 0);
    assert!(ctx.summaries.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_pages_without_reviews(ctx: &TestContext) {
    let user = ctx.fixtures.user("empty@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    let body = json!({
        "url": "https://www.etsy.com/listing/1",
        "html": "<html><body><h1>Handmade Mug</h1></body></html>"
    });

    let response = ctx
        .client
        .post_with_auth("/api/analyze", &body, &user.token)
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(response.body.as_ref().unwrap(), "No reviews found");

    let stored = ctx.profiles.find(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.monthly_summaries_used, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_html_or_reviews(ctx: &TestContext) {
    let user = ctx.fixtures.user("lazy@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    let response = ctx
        .client
        .post_with_auth("/api/analyze", &json!({ "url": "https://example.com" }), &user.token)
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_history_newest_first(ctx: &TestContext) {
    let user = ctx.fixtures.user("historian@example.com");
    ctx.fixtures.free_profile(&user, 0, 0).await;

    for url in [
        "https://www.amazon.com/First/dp/B000001",
        "https://www.amazon.com/Second/dp/B000002",
    ] {
        let body = json!({ "url": url, "reviews": sample_reviews() });
        ctx.client
            .post_with_auth("/api/analyze", &body, &user.token)
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    let response = ctx
        .client
        .get_with_auth("/api/summaries", &user.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let records = response.body.as_ref().unwrap().as_array().unwrap().clone();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["productInfo"]["url"], "https://www.amazon.com/Second/dp/B000002");
    assert_eq!(records[0]["userId"], user.id().to_string());
    assert_eq!(records[0]["metadata"]["reviewCount"], 3);

    let response = ctx
        .client
        .get_with_auth("/api/summaries?limit=1", &user.token)
        .await
        .unwrap();
    assert_eq!(response.body.as_ref().unwrap().as_array().unwrap().len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_show_other_users_history(ctx: &TestContext) {
    let owner = ctx.fixtures.user("owner@example.com");
    let other = ctx.fixtures.user("other@example.com");
    ctx.fixtures.free_profile(&owner, 0, 0).await;

    let body = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "reviews": sample_reviews()
    });
    ctx.client
        .post_with_auth("/api/analyze", &body, &owner.token)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx
        .client
        .get_with_auth("/api/summaries", &other.token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap(), &json!([]));
}
