//! Database model for tracked tokens.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use coinlens_core::tokens::{NewTrackedToken, TrackedToken};

use crate::schema::tracked_tokens;

/// Diesel-facing row type; converted to/from the core domain model at the
/// repository boundary.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = tracked_tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackedTokenDB {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub contract_address: String,
    pub network: String,
    pub website_url: String,
    pub pool_address: Option<String>,
    pub whitepaper_url: Option<String>,
    pub market_cap: Option<f64>,
    pub liquidity_usd: f64,
    pub is_native: bool,
    pub created_at: NaiveDateTime,
}

impl From<TrackedTokenDB> for TrackedToken {
    fn from(row: TrackedTokenDB) -> Self {
        Self {
            id: row.id,
            symbol: row.symbol,
            name: row.name,
            contract_address: row.contract_address,
            network: row.network,
            website_url: row.website_url,
            pool_address: row.pool_address,
            whitepaper_url: row.whitepaper_url,
            market_cap: row.market_cap,
            liquidity_usd: row.liquidity_usd,
            is_native: row.is_native,
            created_at: row.created_at,
        }
    }
}

impl TrackedTokenDB {
    /// Build an insertable row, minting a UUID when the caller did not
    /// supply an explicit record ID.
    pub fn from_new(new_token: NewTrackedToken) -> Self {
        Self {
            id: new_token
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            symbol: new_token.symbol,
            name: new_token.name,
            contract_address: new_token.contract_address,
            network: new_token.network,
            website_url: new_token.website_url,
            pool_address: new_token.pool_address,
            whitepaper_url: new_token.whitepaper_url,
            market_cap: new_token.market_cap,
            liquidity_usd: new_token.liquidity_usd,
            is_native: new_token.is_native,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
