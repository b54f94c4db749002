use super::tokens_model::{
    AdmittedToken, IngestionReceipt, IngestionRequest, NewTrackedToken, TokenSubmission,
    TrackedToken,
};
use crate::errors::Result;

/// Trait defining the contract for the tracked-token store.
///
/// The store's UNIQUE(contract_address, network) constraint is the source
/// of truth for duplicate prevention under concurrency; `find_by_contract`
/// exists so the gate can fail fast, not for correctness.
#[async_trait::async_trait]
pub trait TokenRepositoryTrait: Send + Sync {
    /// Look up a tracked token by its normalized (address, network) pair.
    fn find_by_contract(
        &self,
        contract_address: &str,
        network: &str,
    ) -> Result<Option<TrackedToken>>;

    /// Insert a token, relying on the store's uniqueness constraint.
    /// A duplicate surfaces as `DatabaseError::UniqueViolation`.
    async fn insert_if_absent(&self, new_token: NewTrackedToken) -> Result<TrackedToken>;
}

/// Trait defining the contract for the downstream ingestion call.
#[async_trait::async_trait]
pub trait IngestionClientTrait: Send + Sync {
    /// POST the normalized payload to the ingestion endpoint once.
    /// Non-success is a hard failure; no retries are attempted here.
    async fn dispatch(&self, request: &IngestionRequest) -> Result<IngestionReceipt>;
}

/// Trait defining the contract for the admission gate.
#[async_trait::async_trait]
pub trait AdmissionServiceTrait: Send + Sync {
    /// Run the full admission sequence for a confirmed submission.
    async fn admit(&self, submission: TokenSubmission) -> Result<AdmittedToken>;
}
