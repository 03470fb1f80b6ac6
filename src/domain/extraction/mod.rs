//! Review extraction from captured page HTML.
//!
//! A [`ReviewExtractor`] picks an [`ExtractionStrategy`] by the page's host and
//! falls back to [`GenericStrategy`]. Nothing in here returns an error: a page
//! that cannot be parsed or matched yields no reviews.

pub mod amazon;
pub mod ebay;
pub mod etsy;
pub mod generic;
pub mod product;
mod text;

use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

pub use amazon::AmazonStrategy;
pub use ebay::EbayStrategy;
pub use etsy::EtsyStrategy;
pub use generic::GenericStrategy;
pub use product::{is_product_page, ProductInfo};

use crate::domain::review::{retain_valid, Review};

/// Elements each strategy inspects per page
pub const MAX_ELEMENTS: usize = 50;
/// Strategies keep bodies strictly longer than this
pub const MIN_STRATEGY_BODY_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    Amazon,
    Ebay,
    Etsy,
    Generic,
}

impl SiteId {
    pub fn from_host(host: &str) -> Self {
        let host = host.to_ascii_lowercase();
        if host.contains("amazon") {
            SiteId::Amazon
        } else if host.contains("ebay") {
            SiteId::Ebay
        } else if host.contains("etsy") {
            SiteId::Etsy
        } else {
            SiteId::Generic
        }
    }

    /// Site for a page URL; unparseable URLs are generic
    pub fn from_url(url: &str) -> Self {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(Self::from_host))
            .unwrap_or(SiteId::Generic)
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteId::Amazon => write!(f, "amazon"),
            SiteId::Ebay => write!(f, "ebay"),
            SiteId::Etsy => write!(f, "etsy"),
            SiteId::Generic => write!(f, "generic"),
        }
    }
}

/// Loaded page as captured by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

/// Site-specific review scraping
pub trait ExtractionStrategy: Send + Sync {
    fn site(&self) -> SiteId;

    /// Candidate reviews in document order, before the final length filter
    fn extract(&self, document: &Html) -> Vec<Review>;

    fn has_reviews(&self, document: &Html) -> bool;
}

/// Registry of strategies keyed by site
pub struct ReviewExtractor {
    strategies: HashMap<SiteId, Box<dyn ExtractionStrategy>>,
    fallback: GenericStrategy,
}

impl ReviewExtractor {
    pub fn new() -> Self {
        let mut extractor = Self {
            strategies: HashMap::new(),
            fallback: GenericStrategy,
        };
        extractor.register(Box::new(AmazonStrategy));
        extractor.register(Box::new(EbayStrategy));
        extractor.register(Box::new(EtsyStrategy));
        extractor
    }

    pub fn register(&mut self, strategy: Box<dyn ExtractionStrategy>) {
        self.strategies.insert(strategy.site(), strategy);
    }

    pub fn strategy(&self, site: SiteId) -> &dyn ExtractionStrategy {
        match self.strategies.get(&site) {
            Some(strategy) => strategy.as_ref(),
            None => &self.fallback,
        }
    }

    /// Reviews on the page after the final length filter, at most 50
    pub fn extract(&self, page: &PageSnapshot) -> Vec<Review> {
        let site = SiteId::from_url(&page.url);
        let document = Html::parse_document(&page.html);
        let reviews = retain_valid(self.strategy(site).extract(&document));

        tracing::debug!(site = %site, url = %page.url, count = reviews.len(), "Extracted reviews");
        reviews
    }

    pub fn has_reviews(&self, page: &PageSnapshot) -> bool {
        let site = SiteId::from_url(&page.url);
        let document = Html::parse_document(&page.html);
        self.strategy(site).has_reviews(&document)
    }

    pub fn product_info(&self, page: &PageSnapshot) -> ProductInfo {
        ProductInfo::from_page(page)
    }
}

impl Default for ReviewExtractor {
    fn default() -> Self {
        Self::new()
    }
}
