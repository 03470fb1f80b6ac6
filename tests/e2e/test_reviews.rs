use crate::e2e::helpers;

use helpers::assertions::assert_summary_shape;
use helpers::fixtures::{amazon_page_html, sample_reviews};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_extract_reviews_from_an_amazon_page(ctx: &TestContext) {
    let body = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "html": amazon_page_html()
    });

    let response = ctx.client.post("/api/reviews/extract", &body).await.unwrap();
    response.assert_status(StatusCode::OK);

    let reviews = response.body.as_ref().unwrap()["reviews"].as_array().unwrap().clone();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["source"], "amazon");
    assert_eq!(reviews[0]["rating"], "5.0");
    assert_eq!(reviews[0]["title"], "Works great");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_no_reviews_for_unstructured_html(ctx: &TestContext) {
    let body = json!({
        "url": "https://www.etsy.com/listing/1",
        "html": "<<<>>> not html at all"
    });

    let response = ctx.client.post("/api/reviews/extract", &body).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["reviews"], json!([]));

    let response = ctx.client.post("/api/reviews/check", &body).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["hasReviews"], false);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_detect_reviews_on_an_amazon_page(ctx: &TestContext) {
    let body = json!({
        "url": "https://www.amazon.com/Kettle/dp/B000123",
        "html": amazon_page_html()
    });

    let response = ctx.client.post("/api/reviews/check", &body).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["hasReviews"], true);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_process_reviews_without_a_session(ctx: &TestContext) {
    let body = json!({ "reviews": sample_reviews() });

    let response = ctx.client.post("/api/reviews/process", &body).await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], true);

    let result = &body["result"];
    assert_summary_shape(result);
    assert_eq!(result["totalReviews"], 3);
    assert_eq!(result["avgRating"], "3.7");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_summarize_an_empty_review_list(ctx: &TestContext) {
    let body = json!({ "reviews": [] });

    let response = ctx.client.post("/api/reviews/process", &body).await.unwrap();
    response.assert_status(StatusCode::OK);

    let result = &response.body.as_ref().unwrap()["result"];
    assert_eq!(result["totalReviews"], 0);
    assert_eq!(result["avgRating"], "N/A");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_classify_product_pages(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/pages/product?url=https://www.amazon.com/Kettle/dp/B000123")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["isProductPage"], true);
    assert_eq!(body["site"], "amazon");

    let response = ctx
        .client
        .get("/api/pages/product?url=https://blog.example.com/post/1")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["isProductPage"], false);
    assert_eq!(body["site"], "generic");
}
