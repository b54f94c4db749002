//! Token admission domain: models, traits, gate and dispatcher.

pub mod admission_service;
pub mod ingestion;
pub mod tokens_model;
pub mod tokens_traits;

pub use admission_service::{AdmissionService, MIN_LIQUIDITY_USD, NATIVE_LIQUIDITY_SENTINEL_USD};
pub use ingestion::IngestionClient;
pub use tokens_model::{
    AdmittedToken, IngestionReceipt, IngestionRequest, NewTrackedToken, TokenSubmission,
    TrackedToken,
};
pub use tokens_traits::{AdmissionServiceTrait, IngestionClientTrait, TokenRepositoryTrait};
