use scraper::{ElementRef, Html};

use super::text::{attr, char_len, selector, text_content};
use super::{ExtractionStrategy, SiteId, MAX_ELEMENTS};
use crate::domain::review::{Review, ReviewSource};

/// Tried in order; the first one yielding any review wins.
const REVIEW_SELECTORS: &[&str] = &[
    r#"[class*="review"]"#,
    r#"[class*="comment"]"#,
    r#"[class*="feedback"]"#,
    r#"[data-testid*="review"]"#,
    ".testimonial",
];
const PRESENCE_SELECTOR: &str = r#"[class*="review"], [class*="comment"]"#;
const RATING_SELECTOR: &str = r#"[class*="star"], [class*="rating"], [class*="score"]"#;
const MIN_TEXT_CHARS: usize = 20;
const MAX_TEXT_CHARS: usize = 1000;

/// Fallback for sites without a dedicated strategy
pub struct GenericStrategy;

impl GenericStrategy {
    fn review(element: &ElementRef<'_>) -> Option<Review> {
        let raw = text_content(element);
        let body = raw.trim();
        let len = char_len(body);
        if !(MIN_TEXT_CHARS..=MAX_TEXT_CHARS).contains(&len) {
            return None;
        }

        let rating = selector(RATING_SELECTOR)
            .and_then(|s| element.select(&s).next())
            .and_then(|child| {
                let text = text_content(&child);
                if text.is_empty() {
                    attr(&child, "title")
                } else {
                    Some(text)
                }
            });

        Some(Review {
            rating,
            title: None,
            body: body.to_string(),
            helpful: None,
            date: None,
            source: ReviewSource::Generic,
        })
    }
}

impl ExtractionStrategy for GenericStrategy {
    fn site(&self) -> SiteId {
        SiteId::Generic
    }

    fn extract(&self, document: &Html) -> Vec<Review> {
        for css in REVIEW_SELECTORS {
            let Some(selector) = selector(css) else {
                continue;
            };

            let reviews: Vec<Review> = document
                .select(&selector)
                .filter_map(|element| Self::review(&element))
                .take(MAX_ELEMENTS)
                .collect();

            if !reviews.is_empty() {
                return reviews;
            }
        }

        Vec::new()
    }

    fn has_reviews(&self, document: &Html) -> bool {
        selector(PRESENCE_SELECTOR)
            .map(|s| document.select(&s).next().is_some())
            .unwrap_or(false)
    }
}
