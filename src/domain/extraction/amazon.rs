use scraper::{ElementRef, Html};

use super::text::{attr, child_text, first_number, selector, text_content};
use super::{ExtractionStrategy, SiteId, MAX_ELEMENTS, MIN_STRATEGY_BODY_CHARS};
use crate::domain::review::{Review, ReviewSource};

/// Tried in order; the first one matching anything is used.
const REVIEW_SELECTORS: &[&str] = &[
    r#"[data-hook="review"]"#,
    ".review",
    r#"[data-testid="reviews-section"] [data-testid="review"]"#,
];
const PRESENCE_SELECTOR: &str = r#"[data-hook="review"], .review"#;
const RATING_SELECTOR: &str = r#".a-icon-alt, [class*="rating"], .cr-original-review-rating"#;
const TITLE_SELECTOR: &str = r#"[data-hook="review-title"], .review-title, .cr-original-review-title"#;
const BODY_SELECTOR: &str = r#"[data-hook="review-body"], .review-body, .cr-original-review-body"#;
const HELPFUL_SELECTOR: &str = r#"[data-hook="helpful-vote-statement"], .helpful-vote"#;
const DATE_SELECTOR: &str = r#"[data-hook="review-date"], .review-date"#;

pub struct AmazonStrategy;

impl AmazonStrategy {
    fn rating(element: &ElementRef<'_>) -> Option<String> {
        let selector = selector(RATING_SELECTOR)?;
        let rating = element.select(&selector).next()?;
        let text = text_content(&rating);
        let source = if text.is_empty() {
            attr(&rating, "alt")?
        } else {
            text
        };
        first_number(&source)
    }

    fn review(element: &ElementRef<'_>) -> Option<Review> {
        let body = child_text(element, BODY_SELECTOR)?;
        if body.chars().count() <= MIN_STRATEGY_BODY_CHARS {
            return None;
        }

        Some(Review {
            rating: Self::rating(element),
            title: child_text(element, TITLE_SELECTOR),
            body,
            helpful: child_text(element, HELPFUL_SELECTOR),
            date: child_text(element, DATE_SELECTOR),
            source: ReviewSource::Amazon,
        })
    }
}

impl ExtractionStrategy for AmazonStrategy {
    fn site(&self) -> SiteId {
        SiteId::Amazon
    }

    fn extract(&self, document: &Html) -> Vec<Review> {
        for css in REVIEW_SELECTORS {
            let Some(selector) = selector(css) else {
                continue;
            };
            let elements: Vec<ElementRef<'_>> = document.select(&selector).collect();
            if elements.is_empty() {
                continue;
            }

            return elements
                .iter()
                .take(MAX_ELEMENTS)
                .filter_map(Self::review)
                .collect();
        }

        Vec::new()
    }

    fn has_reviews(&self, document: &Html) -> bool {
        selector(PRESENCE_SELECTOR)
            .map(|s| document.select(&s).next().is_some())
            .unwrap_or(false)
    }
}
