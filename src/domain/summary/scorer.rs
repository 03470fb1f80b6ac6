//! Lexical scorer turning extracted reviews into a [`Summary`].
//!
//! Every function here is pure and total: malformed input degrades to empty
//! collections or sentinel values, never to an error.

use super::model::{AverageRating, KeywordCount, Sentiment, SentimentLabel, Summary};
use crate::domain::review::Review;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

/// Product aspects counted for the key-insights histogram, in tie-break order.
pub const INSIGHT_KEYWORDS: &[&str] = &[
    "quality",
    "price",
    "shipping",
    "size",
    "color",
    "material",
    "battery",
    "easy",
    "difficult",
];

/// Words marking a sentence as a pro.
pub const PRO_WORDS: &[&str] = &[
    "great",
    "excellent",
    "good",
    "love",
    "perfect",
    "amazing",
    "best",
    "recommend",
];

/// Words marking a sentence as a con.
pub const CON_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "poor",
    "cheap",
    "broken",
    "defective",
    "slow",
    "expensive",
    "disappointed",
];

pub const POSITIVE_WORDS: &[&str] = PRO_WORDS;

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "poor",
    "hate",
    "worst",
    "awful",
    "disappointed",
];

pub const MAX_INSIGHTS: usize = 6;
/// Sentences collected before deduplication.
pub const MAX_COLLECTED_SENTENCES: usize = 5;
/// Unique sentences returned after deduplication.
pub const MAX_RETURNED_SENTENCES: usize = 4;
const MIN_SENTENCE_CHARS: usize = 15;
const MAX_SENTENCE_CHARS: usize = 100;
const NEUTRAL_PERCENTAGE: f64 = 50.0;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d.]+").expect("number pattern is valid"));

/// Build the full summary for one analysis run.
#[must_use]
pub fn summarize(reviews: &[Review]) -> Summary {
    Summary {
        total_reviews: reviews.len(),
        avg_rating: average_rating(reviews),
        key_insights: keyword_histogram(reviews),
        pros: extract_pros(reviews),
        cons: extract_cons(reviews),
        sentiment: sentiment(reviews),
    }
}

/// Parse the leading number out of a rating string such as `"4.5 out of 5 stars"`.
///
/// Takes the first run of digits and dots and keeps its longest valid decimal
/// prefix, so `"4.5.1"` reads as `4.5`. Returns `None` when nothing numeric is
/// present.
#[must_use]
pub fn parse_rating(raw: &str) -> Option<Decimal> {
    let run = NUMBER_PATTERN.find(raw)?.as_str();

    let mut number = String::with_capacity(run.len() + 1);
    let mut seen_dot = false;
    for c in run.chars() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        number.push(c);
    }

    let number = number.trim_end_matches('.');
    if !number.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let number = if number.starts_with('.') {
        format!("0{number}")
    } else {
        number.to_string()
    };

    Decimal::from_str(&number).ok()
}

/// Mean of all positive ratings, rounded to one decimal place.
///
/// The mean is taken in binary floating point and rounded on its exact value,
/// so `4.5` and `4.6` average to `4.5499..` and read as `"4.5"`. Exact ties
/// such as `4.25` round up.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> AverageRating {
    let ratings: Vec<f64> = reviews
        .iter()
        .filter_map(|review| review.rating.as_deref())
        .filter_map(parse_rating)
        .filter(|rating| *rating > Decimal::ZERO)
        .filter_map(|rating| rating.to_string().parse::<f64>().ok())
        .collect();

    if ratings.is_empty() {
        return AverageRating::NotAvailable;
    }

    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
    let Some(exact) = Decimal::from_f64_retain(mean) else {
        return AverageRating::NotAvailable;
    };

    let mut rounded = exact.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    AverageRating::Value(rounded)
}

/// Count insight keywords across all reviews, keeping the six most frequent.
#[must_use]
pub fn keyword_histogram(reviews: &[Review]) -> Vec<KeywordCount> {
    let texts: Vec<String> = reviews.iter().map(Review::searchable_text).collect();

    let mut counts: Vec<KeywordCount> = INSIGHT_KEYWORDS
        .iter()
        .map(|keyword| KeywordCount {
            keyword: (*keyword).to_string(),
            count: texts.iter().map(|text| text.matches(keyword).count()).sum(),
        })
        .filter(|item| item.count > 0)
        .collect();

    // stable: equal counts keep vocabulary order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_INSIGHTS);
    counts
}

/// Pull sentences mentioning any of `polarity_words` out of the review bodies.
///
/// Collection stops once `max_count` sentences are gathered; duplicates are
/// then removed (first occurrence wins) and at most `dedupe_cap` returned.
#[must_use]
pub fn extract_sentences(
    reviews: &[Review],
    polarity_words: &[&str],
    max_count: usize,
    dedupe_cap: usize,
) -> Vec<String> {
    let mut collected: Vec<String> = Vec::new();

    'reviews: for review in reviews {
        for sentence in review.body.split(['.', '!', '?']) {
            if collected.len() >= max_count {
                break 'reviews;
            }

            let trimmed = sentence.trim();
            let length = trimmed.chars().count();
            if length <= MIN_SENTENCE_CHARS || length >= MAX_SENTENCE_CHARS {
                continue;
            }

            let lower = trimmed.to_lowercase();
            if polarity_words.iter().any(|word| lower.contains(word)) {
                collected.push(trimmed.to_string());
            }
        }
    }

    let mut seen = HashSet::new();
    collected
        .into_iter()
        .filter(|sentence| seen.insert(sentence.clone()))
        .take(dedupe_cap)
        .collect()
}

#[must_use]
pub fn extract_pros(reviews: &[Review]) -> Vec<String> {
    extract_sentences(
        reviews,
        PRO_WORDS,
        MAX_COLLECTED_SENTENCES,
        MAX_RETURNED_SENTENCES,
    )
}

#[must_use]
pub fn extract_cons(reviews: &[Review]) -> Vec<String> {
    extract_sentences(
        reviews,
        CON_WORDS,
        MAX_COLLECTED_SENTENCES,
        MAX_RETURNED_SENTENCES,
    )
}

/// Share of positive word hits among all polarity hits.
///
/// With no hits at all the score is a neutral 50. The label is taken from the
/// unrounded share; the reported percentage is rounded to an integer.
#[must_use]
pub fn sentiment(reviews: &[Review]) -> Sentiment {
    let mut positive = 0usize;
    let mut negative = 0usize;

    for text in reviews.iter().map(Review::searchable_text) {
        positive += POSITIVE_WORDS
            .iter()
            .map(|word| text.matches(word).count())
            .sum::<usize>();
        negative += NEGATIVE_WORDS
            .iter()
            .map(|word| text.matches(word).count())
            .sum::<usize>();
    }

    let total = positive + negative;
    let percentage = if total > 0 {
        positive as f64 * 100.0 / total as f64
    } else {
        NEUTRAL_PERCENTAGE
    };

    Sentiment {
        percentage: percentage.round().clamp(0.0, 100.0) as u8,
        label: SentimentLabel::from_percentage(percentage),
    }
}
