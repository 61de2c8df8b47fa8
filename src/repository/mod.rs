mod error;
mod in_memory;
mod repository;

pub use error::RepositoryError;
pub use in_memory::HashMapRepository;
pub use repository::{Commit, Find, Get, Repository};
