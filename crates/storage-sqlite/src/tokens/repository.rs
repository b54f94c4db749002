use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use coinlens_core::tokens::{NewTrackedToken, TokenRepositoryTrait, TrackedToken};
use coinlens_core::Result;

use super::model::TrackedTokenDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::tracked_tokens;

/// Repository for tracked tokens.
///
/// Reads go straight to the pool; writes are serialized through the writer
/// actor. The table's UNIQUE(contract_address, network) constraint is what
/// resolves concurrent admissions for the same token: the losing insert
/// surfaces as `DatabaseError::UniqueViolation`.
pub struct TokenRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TokenRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn find_by_contract_impl(
        &self,
        contract_address: &str,
        network: &str,
    ) -> Result<Option<TrackedToken>> {
        let mut conn = get_connection(&self.pool)?;

        let row = tracked_tokens::table
            .select(TrackedTokenDB::as_select())
            .filter(tracked_tokens::contract_address.eq(contract_address))
            .filter(tracked_tokens::network.eq(network))
            .first::<TrackedTokenDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(TrackedToken::from))
    }
}

#[async_trait]
impl TokenRepositoryTrait for TokenRepository {
    fn find_by_contract(
        &self,
        contract_address: &str,
        network: &str,
    ) -> Result<Option<TrackedToken>> {
        self.find_by_contract_impl(contract_address, network)
    }

    async fn insert_if_absent(&self, new_token: NewTrackedToken) -> Result<TrackedToken> {
        let row = TrackedTokenDB::from_new(new_token);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TrackedToken> {
                let inserted = diesel::insert_into(tracked_tokens::table)
                    .values(&row)
                    .get_result::<TrackedTokenDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(inserted.into())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use coinlens_core::errors::{DatabaseError, Error};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, TokenRepository) {
        let dir = TempDir::new().unwrap();
        let db_path = dir
            .path()
            .join("coinlens-test.db")
            .to_string_lossy()
            .to_string();

        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::spawn_writer((*pool).clone());

        (dir, TokenRepository::new(pool, writer))
    }

    fn alpha_token() -> NewTrackedToken {
        NewTrackedToken {
            id: Some("proj-1".to_string()),
            symbol: "ALPHA".to_string(),
            name: "Alpha Token".to_string(),
            contract_address: "0x6b175474e89094c44da98b954eedeac495271d0f".to_string(),
            network: "ethereum".to_string(),
            website_url: "https://alpha.example".to_string(),
            pool_address: Some("0xpool".to_string()),
            whitepaper_url: None,
            market_cap: Some(1_500_000.0),
            liquidity_usd: 250_000.0,
            is_native: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (_dir, repo) = setup().await;

        let inserted = repo.insert_if_absent(alpha_token()).await.unwrap();
        assert_eq!(inserted.id, "proj-1");
        assert_eq!(inserted.symbol, "ALPHA");

        let found = repo
            .find_by_contract("0x6b175474e89094c44da98b954eedeac495271d0f", "ethereum")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, "proj-1");
        assert_eq!(found.liquidity_usd, 250_000.0);

        // Different network is a different identity
        assert!(repo
            .find_by_contract("0x6b175474e89094c44da98b954eedeac495271d0f", "bsc")
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let (_dir, repo) = setup().await;
        assert!(repo.find_by_contract("0xnothing", "ethereum").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_unique_violation() {
        let (_dir, repo) = setup().await;

        repo.insert_if_absent(alpha_token()).await.unwrap();

        let mut duplicate = alpha_token();
        duplicate.id = Some("proj-2".to_string());

        let err = repo.insert_if_absent(duplicate).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_id_minted_when_absent() {
        let (_dir, repo) = setup().await;

        let mut token = alpha_token();
        token.id = None;

        let inserted = repo.insert_if_absent(token).await.unwrap();
        assert!(!inserted.id.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_one_wins() {
        let (_dir, repo) = setup().await;
        let repo = Arc::new(repo);

        let mut first = alpha_token();
        first.id = Some("proj-a".to_string());
        let mut second = alpha_token();
        second.id = Some("proj-b".to_string());

        let (a, b) = tokio::join!(
            {
                let repo = repo.clone();
                async move { repo.insert_if_absent(first).await }
            },
            {
                let repo = repo.clone();
                async move { repo.insert_if_absent(second).await }
            }
        );

        // Exactly one succeeds; the store's constraint decides the winner
        let outcomes = [a.is_ok(), b.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);

        let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(matches!(
            loser,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }
}
