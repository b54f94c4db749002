use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use coinlens_core::limits::SubmissionLimiter;
use coinlens_core::tokens::{AdmissionService, AdmissionServiceTrait, IngestionClient};
use coinlens_resolver::{
    CandidateAggregator, CoinGeckoSource, DexScreenerSource, PairLookupSource,
    RegistryDetailSource, TokenSource,
};
use coinlens_storage_sqlite::{db, tokens::TokenRepository};

pub struct AppState {
    pub aggregator: CandidateAggregator,
    pub admission_service: Arc<dyn AdmissionServiceTrait + Send + Sync>,
    pub submission_limiter: SubmissionLimiter,
}

pub fn init_tracing() {
    let log_format = std::env::var("COINLENS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let token_repository = Arc::new(TokenRepository::new(pool, writer));

    // Both sources back the search aggregator; the registry and DEX halves
    // are also consulted individually by the admission gate.
    let coingecko = Arc::new(CoinGeckoSource::new(config.coingecko_api_key.clone()));
    let dexscreener = Arc::new(DexScreenerSource::new());

    let aggregator = CandidateAggregator::new(vec![
        coingecko.clone() as Arc<dyn TokenSource>,
        dexscreener.clone() as Arc<dyn TokenSource>,
    ]);

    let ingestion_client = Arc::new(IngestionClient::new(
        config.ingestion_url.clone(),
        config.ingestion_service_key.clone(),
    ));

    let admission_service: Arc<dyn AdmissionServiceTrait + Send + Sync> =
        Arc::new(AdmissionService::new(
            token_repository,
            coingecko as Arc<dyn RegistryDetailSource>,
            dexscreener as Arc<dyn PairLookupSource>,
            ingestion_client,
        ));

    Ok(Arc::new(AppState {
        aggregator,
        admission_service,
        submission_limiter: SubmissionLimiter::new(),
    }))
}
