use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Sentinel shown when no review carries a usable rating
pub const NOT_AVAILABLE: &str = "N/A";

/// Mean star rating, one decimal place, or the `N/A` sentinel.
///
/// Serialized as a plain string (`"4.5"` / `"N/A"`) so stored summaries read
/// the same as what the popup renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageRating {
    Value(Decimal),
    NotAvailable,
}

impl std::fmt::Display for AverageRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AverageRating::Value(value) => write!(f, "{}", value),
            AverageRating::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

impl FromStr for AverageRating {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NOT_AVAILABLE {
            return Ok(AverageRating::NotAvailable);
        }
        Decimal::from_str(s).map(AverageRating::Value)
    }
}

impl Serialize for AverageRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AverageRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the keyword histogram
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Mixed")]
    Mixed,
    #[serde(rename = "Negative")]
    Negative,
}

impl SentimentLabel {
    /// Thresholds are strict: a score sitting exactly on a boundary takes the lower label.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 70.0 {
            SentimentLabel::VeryPositive
        } else if percentage > 50.0 {
            SentimentLabel::Positive
        } else if percentage > 30.0 {
            SentimentLabel::Mixed
        } else {
            SentimentLabel::Negative
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::VeryPositive => write!(f, "Very Positive"),
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Mixed => write!(f, "Mixed"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentiment {
    pub percentage: u8,
    pub label: SentimentLabel,
}

/// Result of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_reviews: usize,
    pub avg_rating: AverageRating,
    pub key_insights: Vec<KeywordCount>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub sentiment: Sentiment,
}
