use chrono::Utc;
use review_summarizer_backend::domain::profile::UserProfile;
use review_summarizer_backend::domain::session::{JwtManager, SessionUser};
use review_summarizer_backend::infrastructure::config::Config;
use review_summarizer_backend::infrastructure::repositories::ProfileStore;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// A signed-in shopper and the bearer token for it
#[allow(dead_code)]
pub struct TestUser {
    pub user: SessionUser,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> Uuid {
        self.user.uid
    }
}

pub struct TestFixtures {
    profiles: Arc<dyn ProfileStore>,
    config: Config,
    jwt: JwtManager,
}

impl TestFixtures {
    pub fn new(profiles: Arc<dyn ProfileStore>, config: Config) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_expiration_hours);
        Self {
            profiles,
            config,
            jwt,
        }
    }

    /// Mint a token for a new identity without creating a profile
    pub fn user(&self, email: &str) -> TestUser {
        let user = SessionUser {
            uid: Uuid::new_v4(),
            email: email.to_string(),
            display_name: Some("Test Shopper".to_string()),
            photo_url: None,
        };
        let token = self.jwt.generate_token(&user).unwrap();
        TestUser { user, token }
    }

    /// Free profile with the given usage already counted for this month and day
    pub async fn free_profile(
        &self,
        user: &TestUser,
        monthly_used: i32,
        today_used: i32,
    ) -> UserProfile {
        let mut profile = UserProfile::new_free(&user.user, self.config.quota_limits(), Utc::now());
        profile.monthly_summaries_used = monthly_used;
        profile.today_summaries_used = today_used;
        profile.total_summaries_generated = monthly_used;
        self.profiles.create(&profile).await.unwrap()
    }
}

pub fn sample_reviews() -> Value {
    json!([
        {
            "rating": "5",
            "body": "Great quality kettle, boils fast and I love the design.",
            "source": "amazon"
        },
        {
            "rating": "4",
            "body": "Good price for what you get. Shipping was quick.",
            "source": "amazon"
        },
        {
            "rating": "2",
            "body": "The lid felt cheap and the handle arrived broken.",
            "source": "amazon"
        }
    ])
}

pub fn amazon_page_html() -> String {
    r#"<html><head><title>Kettle</title></head><body>
        <h1 id="productTitle">Stainless Kettle 1.7L</h1>
        <div data-hook="review">
          <i class="a-icon-alt">5.0 out of 5 stars</i>
          <span data-hook="review-title">Works great</span>
          <span data-hook="review-body">Great quality kettle, boils fast and I love the design.</span>
        </div>
        <div data-hook="review">
          <i class="a-icon-alt">4.0 out of 5 stars</i>
          <span data-hook="review-body">Good price for what you get. Shipping was quick.</span>
        </div>
      </body></html>"#
        .to_string()
}
