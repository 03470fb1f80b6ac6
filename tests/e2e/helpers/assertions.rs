use serde_json::Value;

/// Error bodies carry a single `error` message
pub fn assert_error_body(body: &Value, expected_fragment: &str) {
    let message = body
        .get("error")
        .and_then(|v| v.as_str())
        .expect("Missing error field");
    assert!(
        message.contains(expected_fragment),
        "Expected error to contain '{}', got '{}'",
        expected_fragment,
        message
    );
}

pub fn assert_summary_shape(summary: &Value) {
    assert!(summary.get("totalReviews").and_then(|v| v.as_u64()).is_some());
    assert!(summary.get("avgRating").and_then(|v| v.as_str()).is_some());
    assert!(summary.get("keyInsights").and_then(|v| v.as_array()).is_some());
    assert!(summary.get("pros").and_then(|v| v.as_array()).is_some());
    assert!(summary.get("cons").and_then(|v| v.as_array()).is_some());

    let sentiment = summary.get("sentiment").expect("Missing sentiment");
    assert!(sentiment.get("percentage").and_then(|v| v.as_u64()).is_some());
    assert!(sentiment.get("label").and_then(|v| v.as_str()).is_some());
}

pub fn assert_profile_response(me: &Value) {
    let profile = me.get("profile").expect("Missing profile");
    assert!(profile.get("id").and_then(|v| v.as_str()).is_some());
    assert!(profile.get("email").and_then(|v| v.as_str()).is_some());
    assert!(profile.get("subscriptionTier").is_some());
    assert!(profile.get("preferences").is_some());

    let remaining = me.get("remaining").expect("Missing remaining");
    assert!(remaining.get("monthly").is_some());
    assert!(remaining.get("daily").is_some());
    assert!(me.get("canGenerate").and_then(|v| v.as_bool()).is_some());
}
