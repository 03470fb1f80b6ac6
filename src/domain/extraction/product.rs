use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::LazyLock;
use url::Url;

use super::text::{attr, selector, text_content};
use super::PageSnapshot;

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
const MAX_TITLE_CHARS: usize = 100;
const TITLE_SELECTOR: &str = r#"h1, [id*="title"], [class*="title"]"#;
const IMAGE_SELECTOR: &str = r#"img[src*="product"], img[class*="product"], img[id*="product"]"#;
const OG_IMAGE_SELECTOR: &str = r#"meta[property="og:image"]"#;

static PRODUCT_PAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"amazon\.(com|co\.uk|de|fr|it|es|ca)/.*/dp/",
        r"amazon\.(com|co\.uk|de|fr|it|es|ca)/dp/",
        r"ebay\.(com|co\.uk|de|fr|it|es|ca)/itm/",
        r"etsy\.com/listing/",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Product a summary was produced for
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub title: String,
    pub url: String,
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductInfo {
    pub fn unknown(url: &str) -> Self {
        Self {
            title: UNKNOWN_PRODUCT.to_string(),
            url: url.to_string(),
            site: hostname(url),
            image: None,
        }
    }

    pub fn from_page(page: &PageSnapshot) -> Self {
        let document = Html::parse_document(&page.html);
        Self::from_document(&document, &page.url)
    }

    pub fn from_document(document: &Html, url: &str) -> Self {
        let title = heading_title(document)
            .or_else(|| document_title(document))
            .map(|title| title.chars().take(MAX_TITLE_CHARS).collect::<String>())
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());

        Self {
            title,
            url: url.to_string(),
            site: hostname(url),
            image: product_image(document, url),
        }
    }
}

fn heading_title(document: &Html) -> Option<String> {
    let selector = selector(TITLE_SELECTOR)?;
    let heading = document.select(&selector).next()?;
    let text = text_content(&heading);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `<title>` text before the first `-`
fn document_title(document: &Html) -> Option<String> {
    let selector = selector("title")?;
    let title = document.select(&selector).next()?;
    let text = text_content(&title);
    let head = text.split('-').next().unwrap_or("").trim();
    (!head.is_empty()).then(|| head.to_string())
}

fn product_image(document: &Html, url: &str) -> Option<String> {
    let from_img = selector(IMAGE_SELECTOR)
        .and_then(|s| document.select(&s).next())
        .and_then(|img| attr(&img, "src"))
        .map(|src| resolve(url, &src));

    from_img.or_else(|| {
        selector(OG_IMAGE_SELECTOR)
            .and_then(|s| document.select(&s).next())
            .and_then(|meta| attr(&meta, "content"))
    })
}

/// Resolve a possibly relative `src` against the page URL
fn resolve(base: &str, src: &str) -> String {
    Url::parse(base)
        .and_then(|base| base.join(src))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| src.to_string())
}

pub fn hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Whether the URL looks like a product detail page on a supported marketplace
pub fn is_product_page(url: &str) -> bool {
    PRODUCT_PAGE_PATTERNS.iter().any(|pattern| pattern.is_match(url))
}
