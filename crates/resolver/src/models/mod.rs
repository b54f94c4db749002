//! Data models for token resolution.

mod candidate;
mod upstream;

pub use candidate::{CandidateSource, RankedCandidates, TokenCandidate};
pub use upstream::{DexPair, RegistryCoin};
