use serde::{Deserialize, Serialize};

/// Site a review was scraped from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    Amazon,
    Ebay,
    Etsy,
    Generic,
}

impl std::fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewSource::Amazon => write!(f, "amazon"),
            ReviewSource::Ebay => write!(f, "ebay"),
            ReviewSource::Etsy => write!(f, "etsy"),
            ReviewSource::Generic => write!(f, "generic"),
        }
    }
}

/// One extracted review-like text block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpful: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default = "default_source")]
    pub source: ReviewSource,
}

fn default_source() -> ReviewSource {
    ReviewSource::Generic
}

impl Review {
    pub fn new(source: ReviewSource, body: impl Into<String>) -> Self {
        Self {
            rating: None,
            title: None,
            body: body.into(),
            helpful: None,
            date: None,
            source,
        }
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Lowercased `body + " " + title`, the text the lexical passes run over
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.body, self.title.as_deref().unwrap_or("")).to_lowercase()
    }
}
