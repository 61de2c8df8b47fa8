mod error;
mod match_store;

pub use error::StoreError;
pub use match_store::MatchStore;
