use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_summarizer_backend::infrastructure::config::{Config, LogFormat};
use review_summarizer_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use review_summarizer_backend::infrastructure::http::{build_app, start_http_server};
use review_summarizer_backend::infrastructure::repositories::{
    InMemoryProfileStore, InMemorySummaryStore, PgProfileRepository, PgSummaryRepository,
    ProfileStore, SummaryHistoryStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    init_logging(&config);

    tracing::info!(
        "Starting review summarizer backend on {}:{}",
        config.host,
        config.port
    );

    let (profile_store, summary_store): (Arc<dyn ProfileStore>, Arc<dyn SummaryHistoryStore>) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = create_pool(database_url).await?;
                tracing::info!("Database connection pool created");

                check_connection(&pool).await?;
                tracing::info!("Database connection verified");

                run_migrations(&pool).await?;
                tracing::info!("Database migrations applied");

                let pool = Arc::new(pool);
                let profiles: Arc<dyn ProfileStore> = Arc::new(PgProfileRepository::new(pool.clone()));
                let summaries: Arc<dyn SummaryHistoryStore> = Arc::new(PgSummaryRepository::new(pool));
                (profiles, summaries)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, profiles and history are kept in memory");
                let profiles: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::new());
                let summaries: Arc<dyn SummaryHistoryStore> = Arc::new(InMemorySummaryStore::new());
                (profiles, summaries)
            }
        };

    tracing::info!(
        monthly = config.free_monthly_limit,
        daily = config.free_daily_limit,
        cache = config.profile_cache_enabled,
        "Free tier limits loaded"
    );

    let app = build_app(&config, profile_store, summary_store);

    start_http_server(&config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "review_summarizer_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
