//! Server configuration, read once from the environment at startup.

use anyhow::{bail, Result};

/// Runtime configuration for the Coinlens server.
///
/// Ingestion credentials are required: their absence is a startup-time
/// configuration error, never a per-request one. The registry API key is
/// optional and only unlocks a higher upstream rate tier.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    pub listen_addr: String,
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Optional CoinGecko API key (demo tier).
    pub coingecko_api_key: Option<String>,
    /// Downstream ingestion endpoint URL.
    pub ingestion_url: String,
    /// Bearer key for the ingestion endpoint.
    pub ingestion_service_key: String,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr =
            env_non_empty("COINLENS_LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3310".to_string());
        let db_path =
            env_non_empty("COINLENS_DB_PATH").unwrap_or_else(|| "./coinlens.db".to_string());
        let coingecko_api_key = env_non_empty("COINGECKO_API_KEY");

        let Some(ingestion_url) = env_non_empty("INGESTION_URL") else {
            bail!("INGESTION_URL is not set; the ingestion endpoint is required");
        };
        let Some(ingestion_service_key) = env_non_empty("INGESTION_SERVICE_KEY") else {
            bail!("INGESTION_SERVICE_KEY is not set; ingestion credentials are required");
        };

        Ok(Self {
            listen_addr,
            db_path,
            coingecko_api_key,
            ingestion_url,
            ingestion_service_key,
        })
    }
}
