use serde::Deserialize;
use std::env;

use crate::domain::analysis::HistoryLimits;
use crate::domain::quota::QuotaLimits;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Absent means profiles and history live in memory
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub log_format: LogFormat,
    // Free tier
    pub free_monthly_limit: i32,
    pub free_daily_limit: i32,
    pub profile_cache_enabled: bool,
    // History paging
    pub history_default_limit: i64,
    pub history_max_limit: i64,
    pub event_channel_capacity: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            free_monthly_limit: env::var("FREE_MONTHLY_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            free_daily_limit: env::var("FREE_DAILY_LIMIT")
                .unwrap_or_else(|_| "2".to_string())
                .parse()?,
            profile_cache_enabled: env::var("PROFILE_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            history_default_limit: env::var("HISTORY_DEFAULT_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            history_max_limit: env::var("HISTORY_MAX_LIMIT")
                .unwrap_or_else(|_| "50".to_string())
                .parse()?,
            event_channel_capacity: env::var("EVENT_CHANNEL_CAPACITY")
                .unwrap_or_else(|_| "256".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn quota_limits(&self) -> QuotaLimits {
        QuotaLimits {
            monthly: self.free_monthly_limit,
            daily: self.free_daily_limit,
        }
    }

    pub fn history_limits(&self) -> HistoryLimits {
        HistoryLimits {
            default: self.history_default_limit,
            max: self.history_max_limit,
        }
    }
}
