pub mod model;
pub mod scorer;

pub use model::{AverageRating, KeywordCount, Sentiment, SentimentLabel, Summary};
pub use scorer::summarize;
