pub mod model;
pub mod repository;

pub use model::TrackedTokenDB;
pub use repository::TokenRepository;
