use scraper::{ElementRef, Html};

use super::text::{attr, child_text, selector};
use super::{ExtractionStrategy, SiteId, MAX_ELEMENTS, MIN_STRATEGY_BODY_CHARS};
use crate::domain::review::{Review, ReviewSource};

const REVIEW_SELECTOR: &str = r#".shop2-review-review, .listing-review, [class*="review"]"#;
const PRESENCE_SELECTOR: &str = ".shop2-review-review, .listing-review";
const RATING_SELECTOR: &str = r#".rating, .stars, [class*="star"]"#;
const BODY_SELECTOR: &str = ".review-text, .review-body";

pub struct EtsyStrategy;

impl EtsyStrategy {
    fn review(element: &ElementRef<'_>) -> Option<Review> {
        let body = child_text(element, BODY_SELECTOR)?;
        if body.chars().count() <= MIN_STRATEGY_BODY_CHARS {
            return None;
        }

        let rating = selector(RATING_SELECTOR)
            .and_then(|s| element.select(&s).next())
            .and_then(|star| attr(&star, "title").or_else(|| attr(&star, "aria-label")));

        Some(Review {
            rating,
            title: None,
            body,
            helpful: None,
            date: None,
            source: ReviewSource::Etsy,
        })
    }
}

impl ExtractionStrategy for EtsyStrategy {
    fn site(&self) -> SiteId {
        SiteId::Etsy
    }

    fn extract(&self, document: &Html) -> Vec<Review> {
        let Some(selector) = selector(REVIEW_SELECTOR) else {
            return Vec::new();
        };

        document
            .select(&selector)
            .take(MAX_ELEMENTS)
            .filter_map(|element| Self::review(&element))
            .collect()
    }

    fn has_reviews(&self, document: &Html) -> bool {
        selector(PRESENCE_SELECTOR)
            .map(|s| document.select(&s).next().is_some())
            .unwrap_or(false)
    }
}
